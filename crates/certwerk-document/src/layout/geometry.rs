// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page geometry: centering, the vertical cursor, composite runs and the
// double-ruled border.

use certwerk_core::{CertificateConfig, PageSize, Rgb};

use crate::backend::{DocumentBackend, DrawOp, FontHandle, Point, TextRun};

/// One line of vertical flow.
pub const LINE_SPACING: f32 = 32.0;
/// Left edge of wrapped, left-aligned text.
pub const CONTENT_MARGIN: f32 = 60.0;
/// Stroke weight of both border frames.
pub const BORDER_THICKNESS: f32 = 0.75;
/// Distance from the page top to the first flow line, before the extra
/// spacing line.
const CONTENT_TOP_OFFSET: f32 = 180.0;

/// Horizontal start of a run of `text_width` centered on the page.
pub fn center_x(page_width: f32, text_width: f32) -> f32 {
    (page_width - text_width) / 2.0
}

/// Width available to wrapped text.
pub fn content_width(page: PageSize) -> f32 {
    page.width - 2.0 * CONTENT_MARGIN
}

/// The vertical offset of the next flow block. Only moves down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    y: f32,
    advances: usize,
}

impl LayoutCursor {
    /// Cursor positioned at the first flow line of `page`.
    pub fn at_content_top(page: PageSize) -> Self {
        Self {
            y: page.height - CONTENT_TOP_OFFSET - LINE_SPACING,
            advances: 0,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// How many times the cursor has moved.
    pub fn advances(&self) -> usize {
        self.advances
    }

    /// Move down by `factor` line spacings.
    pub fn advance(&mut self, factor: f32) {
        self.y -= LINE_SPACING * factor;
        self.advances += 1;
    }
}

/// A piece of a composite line.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub font: FontHandle,
}

impl<'a> Segment<'a> {
    pub fn new(text: &'a str, font: FontHandle) -> Self {
        Self { text, font }
    }
}

/// Several runs laid edge to edge and centered as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLine {
    pub runs: Vec<TextRun>,
    pub total_width: f32,
    pub start_x: f32,
}

/// Measure every segment, center their combined width, and place each run
/// at the right edge of the one before it.
pub fn composite_line(
    backend: &dyn DocumentBackend,
    segments: &[Segment<'_>],
    size: f32,
    page_width: f32,
    y: f32,
) -> CompositeLine {
    let widths: Vec<f32> = segments
        .iter()
        .map(|segment| backend.measure_text_width(segment.text, segment.font, size))
        .collect();
    let total_width: f32 = widths.iter().sum();
    let start_x = center_x(page_width, total_width);

    let mut x = start_x;
    let mut runs = Vec::with_capacity(segments.len());
    for (segment, width) in segments.iter().zip(widths) {
        runs.push(TextRun::new(segment.text, x, y, size, segment.font));
        x += width;
    }

    CompositeLine {
        runs,
        total_width,
        start_x,
    }
}

/// Opaque white background followed by the outer and inner border frames.
pub fn page_chrome(page: PageSize, config: &CertificateConfig) -> Vec<DrawOp> {
    let mut ops = vec![DrawOp::Rectangle {
        x: 0.0,
        y: 0.0,
        width: page.width,
        height: page.height,
        color: Rgb::WHITE,
    }];
    ops.extend(frame(page, config.outer_margin));
    ops.extend(frame(page, config.inner_margin()));
    ops
}

/// Four line segments: top, right, bottom, left.
fn frame(page: PageSize, margin: f32) -> [DrawOp; 4] {
    let top_left = Point::new(margin, page.height - margin);
    let top_right = Point::new(page.width - margin, page.height - margin);
    let bottom_right = Point::new(page.width - margin, margin);
    let bottom_left = Point::new(margin, margin);

    let side = |start: Point, end: Point| DrawOp::Line {
        start,
        end,
        thickness: BORDER_THICKNESS,
        color: Rgb::BLACK,
    };

    [
        side(top_left, top_right),
        side(top_right, bottom_right),
        side(bottom_right, bottom_left),
        side(bottom_left, top_left),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;
    use crate::fonts::StandardFont;

    #[test]
    fn centering_formula() {
        assert_eq!(center_x(842.0, 142.0), 350.0);
        assert_eq!(center_x(842.0, 0.0), 421.0);
    }

    #[test]
    fn cursor_starts_below_title_and_moves_down() {
        let mut cursor = LayoutCursor::at_content_top(PageSize::A4_LANDSCAPE);
        assert_eq!(cursor.y(), 383.0);
        cursor.advance(0.8);
        cursor.advance(0.7);
        assert!((cursor.y() - 335.0).abs() < 1e-3);
        assert_eq!(cursor.advances(), 2);
    }

    #[test]
    fn composite_runs_are_adjacent_and_centered() {
        let mut backend = RecordingBackend::new();
        let body = backend.embed_standard_font(StandardFont::TimesRoman);
        let bold = backend.embed_standard_font(StandardFont::HelveticaBold);
        let segments = [
            Segment::new("This is to certify that Mr/Ms ", body),
            Segment::new("Asha", bold),
            Segment::new(", II Year ECE from ", body),
        ];

        let line = composite_line(&backend, &segments, 20.0, 842.0, 383.0);
        let widths: Vec<f32> = segments
            .iter()
            .map(|s| backend.measure_text_width(s.text, s.font, 20.0))
            .collect();

        assert!((line.total_width - widths.iter().sum::<f32>()).abs() < 1e-3);
        assert!((line.start_x - (842.0 - line.total_width) / 2.0).abs() < 1e-3);
        assert_eq!(line.runs[0].x, line.start_x);
        assert!((line.runs[1].x - (line.start_x + widths[0])).abs() < 1e-3);
        assert!((line.runs[2].x - (line.start_x + widths[0] + widths[1])).abs() < 1e-3);
        assert!(line.runs.iter().all(|run| run.y == 383.0));
    }

    #[test]
    fn border_is_two_concentric_frames() {
        let ops = page_chrome(PageSize::A4_LANDSCAPE, &CertificateConfig::default());
        assert_eq!(ops.len(), 9);
        assert_eq!(
            ops[0],
            DrawOp::Rectangle {
                x: 0.0,
                y: 0.0,
                width: 842.0,
                height: 595.0,
                color: Rgb::WHITE,
            }
        );

        let DrawOp::Line { start, end, thickness, .. } = &ops[1] else {
            panic!("expected outer top edge");
        };
        assert_eq!((*start, *end), (Point::new(40.0, 555.0), Point::new(802.0, 555.0)));
        assert_eq!(*thickness, BORDER_THICKNESS);

        let DrawOp::Line { start, .. } = &ops[5] else {
            panic!("expected inner top edge");
        };
        assert_eq!(*start, Point::new(44.0, 551.0));
    }
}
