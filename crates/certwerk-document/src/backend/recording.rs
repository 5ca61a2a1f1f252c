// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recording backend for tests and dry runs.
//
// Every draw call is kept as a `DrawOp`; nothing is encoded. Embedding can be
// made to fail on demand so degraded paths are reachable without corrupt
// fixtures.

use certwerk_core::error::{CertwerkError, Result};
use certwerk_core::{PageSize, Rgb};

use super::{DocumentBackend, DrawOp, FontHandle, ImageHandle, ImagePlacement, Point, TextRun};
use crate::fonts::{StandardFont, metrics};
use crate::image::PNG_SIGNATURE;

/// Embedded fonts measure as this fraction of an em per character.
const TRUETYPE_CHAR_WIDTH_EM: f32 = 0.5;

/// What a font handle refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedFont {
    Standard(StandardFont),
    TrueType { len: usize },
}

/// Backend that records instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    page: Option<PageSize>,
    fonts: Vec<EmbeddedFont>,
    images: usize,
    drawn: Vec<DrawOp>,
    fail_fonts: bool,
    image_limit: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every TrueType font, as if the data were corrupt.
    pub fn with_failing_fonts(mut self) -> Self {
        self.fail_fonts = true;
        self
    }

    /// Reject every image.
    pub fn with_failing_images(self) -> Self {
        self.with_image_limit(0)
    }

    /// Accept the first `limit` images and reject the rest.
    pub fn with_image_limit(mut self, limit: usize) -> Self {
        self.image_limit = Some(limit);
        self
    }

    pub fn page(&self) -> Option<PageSize> {
        self.page
    }

    pub fn fonts(&self) -> &[EmbeddedFont] {
        &self.fonts
    }

    /// Number of images successfully embedded.
    pub fn image_count(&self) -> usize {
        self.images
    }

    pub fn drawn(&self) -> &[DrawOp] {
        &self.drawn
    }

    /// Text of every drawn text run, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.drawn.iter().filter_map(DrawOp::text).collect()
    }
}

impl DocumentBackend for RecordingBackend {
    fn add_page(&mut self, size: PageSize) {
        self.page = Some(size);
    }

    fn embed_standard_font(&mut self, font: StandardFont) -> FontHandle {
        self.fonts.push(EmbeddedFont::Standard(font));
        FontHandle(self.fonts.len() - 1)
    }

    fn embed_font(&mut self, bytes: &[u8]) -> Result<FontHandle> {
        if self.fail_fonts {
            return Err(CertwerkError::FontLoad("font rejected by backend".into()));
        }
        if bytes.is_empty() {
            return Err(CertwerkError::FontLoad("empty font data".into()));
        }
        self.fonts.push(EmbeddedFont::TrueType { len: bytes.len() });
        Ok(FontHandle(self.fonts.len() - 1))
    }

    fn embed_image(&mut self, bytes: &[u8]) -> Result<ImageHandle> {
        if self.image_limit.is_some_and(|limit| self.images >= limit) {
            return Err(CertwerkError::ImageDecode("image rejected by backend".into()));
        }
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(CertwerkError::ImageDecode("missing PNG signature".into()));
        }
        self.images += 1;
        Ok(ImageHandle(self.images - 1))
    }

    fn measure_text_width(&self, text: &str, font: FontHandle, size: f32) -> f32 {
        match self.fonts.get(font.0) {
            Some(EmbeddedFont::Standard(standard)) => metrics::text_width(*standard, text, size),
            Some(EmbeddedFont::TrueType { .. }) => {
                text.chars().count() as f32 * TRUETYPE_CHAR_WIDTH_EM * size
            }
            None => 0.0,
        }
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.drawn.push(DrawOp::Text(run.clone()));
    }

    fn draw_line(&mut self, start: Point, end: Point, thickness: f32, color: Rgb) {
        self.drawn.push(DrawOp::Line {
            start,
            end,
            thickness,
            color,
        });
    }

    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.drawn.push(DrawOp::Rectangle {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_image(&mut self, placement: &ImagePlacement) {
        self.drawn.push(DrawOp::Image(placement.clone()));
    }

    /// One line per recorded operation.
    fn save(self) -> Result<Vec<u8>> {
        let mut dump = String::new();
        for op in &self.drawn {
            dump.push_str(&format!("{op:?}\n"));
        }
        Ok(dump.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_limit_rejects_later_images() {
        let mut backend = RecordingBackend::new().with_image_limit(1);
        assert!(backend.embed_image(&PNG_SIGNATURE).is_ok());
        assert!(backend.embed_image(&PNG_SIGNATURE).is_err());
        assert_eq!(backend.image_count(), 1);
    }

    #[test]
    fn truetype_fonts_measure_half_an_em_per_char() {
        let mut backend = RecordingBackend::new();
        let font = backend.embed_font(b"ttf").unwrap();
        assert_eq!(backend.measure_text_width("abcd", font, 10.0), 20.0);
    }

    #[test]
    fn save_dumps_recorded_ops() {
        let mut backend = RecordingBackend::new();
        backend.draw_rectangle(0.0, 0.0, 1.0, 1.0, Rgb::WHITE);
        let dump = String::from_utf8(backend.save().unwrap()).unwrap();
        assert!(dump.starts_with("Rectangle"));
        assert_eq!(dump.lines().count(), 1);
    }
}
