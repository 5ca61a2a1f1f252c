// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Advance widths of the standard PDF fonts, taken from the Adobe AFM files.
//
// Widths are in 1/1000 em and cover printable ASCII (0x20..=0x7E); index is
// `char as usize - 0x20`. Characters outside the table measure as
// `FALLBACK_WIDTH`.

use super::StandardFont;

/// Width used for characters not covered by a table.
const FALLBACK_WIDTH: u16 = 500;

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn table(font: StandardFont) -> &'static [u16; 95] {
    match font {
        StandardFont::TimesRoman => &TIMES_ROMAN,
        StandardFont::TimesBold => &TIMES_BOLD,
        StandardFont::Helvetica => &HELVETICA,
        StandardFont::HelveticaBold => &HELVETICA_BOLD,
    }
}

/// Advance width of one character in 1/1000 em.
pub fn char_width(font: StandardFont, c: char) -> u16 {
    let code = c as usize;
    if (0x20..=0x7E).contains(&code) {
        table(font)[code - 0x20]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` set in a standard font at `size` points.
pub fn text_width(font: StandardFont, text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(font, c) as u32).sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_helvetica_width() {
        // H(722) e(556) l(222) l(222) o(556)
        let width = text_width(StandardFont::Helvetica, "Hello", 10.0);
        assert!((width - 22.78).abs() < 1e-3);
    }

    #[test]
    fn bold_is_wider_than_regular() {
        let regular = text_width(StandardFont::TimesRoman, "Certificate", 20.0);
        let bold = text_width(StandardFont::TimesBold, "Certificate", 20.0);
        assert!(bold > regular);
    }

    #[test]
    fn space_and_fallback_widths() {
        assert_eq!(char_width(StandardFont::TimesRoman, ' '), 250);
        assert_eq!(char_width(StandardFont::HelveticaBold, '~'), 584);
        assert_eq!(char_width(StandardFont::TimesRoman, 'é'), FALLBACK_WIDTH);
        assert_eq!(text_width(StandardFont::TimesRoman, "", 20.0), 0.0);
    }
}
