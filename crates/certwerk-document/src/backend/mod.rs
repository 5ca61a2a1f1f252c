// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document backend: the page-description primitives the layout engine draws
// with.
//
// The engine decides what to draw and where; a backend decides how the bytes
// are encoded. `PdfBackend` writes real PDF through `printpdf`, while
// `RecordingBackend` only records what it was asked to do.

pub mod pdf;
pub mod recording;

use certwerk_core::error::Result;
use certwerk_core::{PageSize, Rgb};

use crate::fonts::StandardFont;

pub use pdf::PdfBackend;
pub use recording::RecordingBackend;

/// Opaque reference to a font embedded in a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub usize);

/// Opaque reference to an image embedded in a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub usize);

/// A position on the page in points, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single run of text in one font.
///
/// When `max_width` is set the backend wraps the run onto further lines below
/// `y`, each `line_height` apart.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub font: FontHandle,
    pub color: Rgb,
    pub max_width: Option<f32>,
    pub line_height: Option<f32>,
}

impl TextRun {
    /// A black, unwrapped run.
    pub fn new(text: impl Into<String>, x: f32, y: f32, size: f32, font: FontHandle) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            font,
            color: Rgb::BLACK,
            max_width: None,
            line_height: None,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn wrapped(mut self, max_width: f32, line_height: f32) -> Self {
        self.max_width = Some(max_width);
        self.line_height = Some(line_height);
        self
    }
}

/// An image scaled into a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    pub image: ImageHandle,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// 1.0 is fully opaque.
    pub opacity: f32,
}

/// One drawing instruction with absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Line {
        start: Point,
        end: Point,
        thickness: f32,
        color: Rgb,
    },
    Text(TextRun),
    Image(ImagePlacement),
}

impl DrawOp {
    /// Hand this operation to a backend.
    pub fn apply(self, backend: &mut dyn DocumentBackend) {
        match self {
            DrawOp::Rectangle {
                x,
                y,
                width,
                height,
                color,
            } => backend.draw_rectangle(x, y, width, height, color),
            DrawOp::Line {
                start,
                end,
                thickness,
                color,
            } => backend.draw_line(start, end, thickness, color),
            DrawOp::Text(run) => backend.draw_text(&run),
            DrawOp::Image(placement) => backend.draw_image(&placement),
        }
    }

    /// The text of a text operation.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text(run) => Some(&run.text),
            _ => None,
        }
    }
}

/// Page-description capabilities consumed by the layout engine.
///
/// Constructing a backend creates the document. Embedding can fail; drawing
/// cannot, because every handle passed to a draw call came from a successful
/// embed on the same backend.
pub trait DocumentBackend {
    /// Start the (single) page.
    fn add_page(&mut self, size: PageSize);

    /// Embed a built-in font. Always succeeds.
    fn embed_standard_font(&mut self, font: StandardFont) -> FontHandle;

    /// Embed a TrueType/OpenType font from raw bytes.
    fn embed_font(&mut self, bytes: &[u8]) -> Result<FontHandle>;

    /// Embed a PNG image from raw bytes.
    fn embed_image(&mut self, bytes: &[u8]) -> Result<ImageHandle>;

    /// Width of `text` set in `font` at `size` points.
    fn measure_text_width(&self, text: &str, font: FontHandle, size: f32) -> f32;

    fn draw_text(&mut self, run: &TextRun);

    fn draw_line(&mut self, start: Point, end: Point, thickness: f32, color: Rgb);

    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb);

    fn draw_image(&mut self, placement: &ImagePlacement);

    /// Serialize the finished document.
    fn save(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}
