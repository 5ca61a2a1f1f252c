// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF backend: draws the certificate page using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: the page is a `Vec<Op>` that is
// accumulated as draw calls arrive and turned into a `PdfPage` on `save()`.

use std::collections::HashMap;

use certwerk_core::error::{CertwerkError, Result};
use certwerk_core::{PageSize, Rgb};
use image::RgbaImage;
use printpdf::{
    BuiltinFont, Color, FontId, Line, LinePoint, Mm, Op, PaintMode, ParsedFont, PdfDocument,
    PdfPage, PdfSaveOptions, Polygon, PolygonRing, Pt, RawImage, RawImageData, RawImageFormat,
    TextItem, WindingOrder, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use super::{DocumentBackend, FontHandle, ImageHandle, ImagePlacement, Point, TextRun};
use crate::fonts::{StandardFont, metrics};
use crate::image::{apply_opacity, decode_png};
use crate::wrap::wrap_to_width;

/// A font known to the document.
enum FontEntry {
    Builtin(StandardFont),
    Embedded { id: FontId, metrics: TrueTypeMetrics },
}

/// Horizontal advances of an embedded TrueType font, read once at embed time.
struct TrueTypeMetrics {
    units_per_em: f32,
    advances: HashMap<char, u16>,
    notdef_advance: u16,
}

impl TrueTypeMetrics {
    fn from_face(face: &ttf_parser::Face<'_>) -> Self {
        let mut advances = HashMap::new();
        let unicode = face
            .tables()
            .cmap
            .into_iter()
            .flat_map(|cmap| cmap.subtables)
            .filter(|subtable| subtable.is_unicode());
        for subtable in unicode {
            subtable.codepoints(|codepoint| {
                let Some(c) = char::from_u32(codepoint) else {
                    return;
                };
                let advance = subtable
                    .glyph_index(codepoint)
                    .and_then(|glyph| face.glyph_hor_advance(glyph));
                if let Some(advance) = advance {
                    advances.entry(c).or_insert(advance);
                }
            });
        }

        Self {
            units_per_em: face.units_per_em().max(1) as f32,
            advances,
            notdef_advance: face
                .glyph_hor_advance(ttf_parser::GlyphId(0))
                .unwrap_or(0),
        }
    }

    /// Characters without a glyph measure as `.notdef`.
    fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| *self.advances.get(&c).unwrap_or(&self.notdef_advance) as u32)
            .sum();
        units as f32 * size / self.units_per_em
    }
}

/// Writes a single-page PDF.
pub struct PdfBackend {
    doc: PdfDocument,
    page: Option<PageSize>,
    ops: Vec<Op>,
    fonts: Vec<FontEntry>,
    images: Vec<RgbaImage>,
}

impl PdfBackend {
    /// Create an empty document. `title` goes into the PDF metadata.
    pub fn new(title: &str) -> Self {
        Self {
            doc: PdfDocument::new(title),
            page: None,
            ops: Vec::new(),
            fonts: Vec::new(),
            images: Vec::new(),
        }
    }

    fn builtin(font: StandardFont) -> BuiltinFont {
        match font {
            StandardFont::TimesRoman => BuiltinFont::TimesRoman,
            StandardFont::TimesBold => BuiltinFont::TimesBold,
            StandardFont::Helvetica => BuiltinFont::Helvetica,
            StandardFont::HelveticaBold => BuiltinFont::HelveticaBold,
        }
    }

    /// Emit one line of text as its own text section.
    fn write_line(&mut self, text: &str, x: f32, y: f32, size: f32, font: FontHandle) {
        let items = vec![TextItem::Text(text.to_owned())];
        let (set_font, write) = match self.fonts.get(font.0) {
            Some(FontEntry::Builtin(standard)) => (
                Op::SetFontSizeBuiltinFont {
                    size: Pt(size),
                    font: Self::builtin(*standard),
                },
                Op::WriteTextBuiltinFont {
                    items,
                    font: Self::builtin(*standard),
                },
            ),
            Some(FontEntry::Embedded { id, .. }) => (
                Op::SetFontSize {
                    size: Pt(size),
                    font: id.clone(),
                },
                Op::WriteText {
                    items,
                    font: id.clone(),
                },
            ),
            None => {
                warn!(handle = font.0, "Text run references an unknown font; dropped");
                return;
            }
        };

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: printpdf::Point { x: Pt(x), y: Pt(y) },
        });
        self.ops.push(set_font);
        self.ops.push(write);
        self.ops.push(Op::EndTextSection);
    }
}

impl DocumentBackend for PdfBackend {
    fn add_page(&mut self, size: PageSize) {
        if self.page.is_some() {
            warn!("Certificate documents have exactly one page; ignoring extra page");
            return;
        }
        info!(width = size.width, height = size.height, "Page added");
        self.page = Some(size);
    }

    fn embed_standard_font(&mut self, font: StandardFont) -> FontHandle {
        self.fonts.push(FontEntry::Builtin(font));
        FontHandle(self.fonts.len() - 1)
    }

    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    fn embed_font(&mut self, bytes: &[u8]) -> Result<FontHandle> {
        let face = ttf_parser::Face::parse(bytes, 0)
            .map_err(|err| CertwerkError::FontLoad(format!("unreadable font data: {err}")))?;
        let metrics = TrueTypeMetrics::from_face(&face);

        let mut warnings = Vec::new();
        let parsed = ParsedFont::from_bytes(bytes, 0, &mut warnings).ok_or_else(|| {
            CertwerkError::FontLoad("font could not be prepared for embedding".into())
        })?;
        let id = self.doc.add_font(&parsed);

        debug!(
            handle = self.fonts.len(),
            glyphs = metrics.advances.len(),
            "Font embedded"
        );
        self.fonts.push(FontEntry::Embedded { id, metrics });
        Ok(FontHandle(self.fonts.len() - 1))
    }

    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    fn embed_image(&mut self, bytes: &[u8]) -> Result<ImageHandle> {
        let pixels = decode_png(bytes)?;
        debug!(
            width = pixels.width(),
            height = pixels.height(),
            "Image decoded for embedding"
        );
        self.images.push(pixels);
        Ok(ImageHandle(self.images.len() - 1))
    }

    fn measure_text_width(&self, text: &str, font: FontHandle, size: f32) -> f32 {
        match self.fonts.get(font.0) {
            Some(FontEntry::Builtin(standard)) => metrics::text_width(*standard, text, size),
            Some(FontEntry::Embedded { metrics, .. }) => metrics.text_width(text, size),
            None => 0.0,
        }
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.ops.push(Op::SetFillColor {
            col: pdf_color(run.color),
        });

        match run.max_width {
            Some(max_width) => {
                let lines = wrap_to_width(&run.text, max_width, |line| {
                    self.measure_text_width(line, run.font, run.size)
                });
                let line_height = run.line_height.unwrap_or(run.size);
                for (idx, line) in lines.iter().enumerate() {
                    let y = run.y - idx as f32 * line_height;
                    self.write_line(line, run.x, y, run.size, run.font);
                }
            }
            None => self.write_line(&run.text, run.x, run.y, run.size, run.font),
        }
    }

    fn draw_line(&mut self, start: Point, end: Point, thickness: f32, color: Rgb) {
        self.ops.push(Op::SetOutlineColor {
            col: pdf_color(color),
        });
        self.ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
        self.ops.push(Op::DrawLine {
            line: Line {
                points: vec![line_point(start), line_point(end)],
                is_closed: false,
            },
        });
    }

    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.ops.push(Op::SetFillColor {
            col: pdf_color(color),
        });
        let corners = [
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ];
        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: corners.into_iter().map(line_point).collect(),
                }],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            },
        });
    }

    fn draw_image(&mut self, placement: &ImagePlacement) {
        let Some(pixels) = self.images.get(placement.image.0) else {
            warn!(handle = placement.image.0, "Unknown image handle; dropped");
            return;
        };

        // printpdf writes the alpha channel as a soft mask.
        let faded = apply_opacity(pixels, placement.opacity);
        let (img_width, img_height) = faded.dimensions();
        let raw = RawImage {
            pixels: RawImageData::U8(faded.into_raw()),
            width: img_width as usize,
            height: img_height as usize,
            data_format: RawImageFormat::RGBA8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // At 72 dpi one pixel is one point, so scale straight to the target box.
        self.ops.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(placement.x)),
                translate_y: Some(Pt(placement.y)),
                scale_x: Some(placement.width / img_width.max(1) as f32),
                scale_y: Some(placement.height / img_height.max(1) as f32),
                dpi: Some(72.0),
                rotate: None,
            },
        });
    }

    #[instrument(skip(self))]
    fn save(mut self) -> Result<Vec<u8>> {
        let size = self
            .page
            .ok_or_else(|| CertwerkError::PdfError("no page was added".into()))?;

        let page = PdfPage::new(pt_to_mm(size.width), pt_to_mm(size.height), self.ops);
        self.doc.with_pages(vec![page]);

        let mut warnings = Vec::new();
        let output = self.doc.save(&PdfSaveOptions::default(), &mut warnings);

        info!(
            bytes = output.len(),
            warnings = warnings.len(),
            "Certificate PDF serialized"
        );
        Ok(output)
    }
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(color.r, color.g, color.b, None))
}

fn line_point(point: Point) -> LinePoint {
    LinePoint {
        p: printpdf::Point {
            x: Pt(point.x),
            y: Pt(point.y),
        },
        bezier: false,
    }
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}
