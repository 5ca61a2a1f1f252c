// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// TrueType embedding through the PDF backend, using the public-domain Tuffy
// font under tests/fonts/.

use certwerk_core::{CertificateConfig, CertificateRequest, PageSize, Year};
use certwerk_document::backend::DrawOp;
use certwerk_document::fonts::resolve::TITLE_FONT_RESOURCE;
use certwerk_document::fonts::{FontRole, FontSource, StandardFont};
use certwerk_document::{CertificateEngine, DocumentBackend, MemoryLoader, PdfBackend};

const TUFFY: &[u8] = include_bytes!("fonts/Tuffy.ttf");

fn request() -> CertificateRequest {
    CertificateRequest::new(
        "Asha Raman",
        Year::III,
        "B.Tech CSE",
        "PONDICHERRY ENGINEERING COLLEGE",
        "2024-03-10",
    )
}

/// Width straight from the font's `hmtx` advances.
fn advance_width(text: &str, size: f32) -> f32 {
    let face = ttf_parser::Face::parse(TUFFY, 0).unwrap();
    let units: u32 = text
        .chars()
        .map(|c| {
            let glyph = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
            face.glyph_hor_advance(glyph).unwrap_or(0) as u32
        })
        .sum();
    units as f32 * size / face.units_per_em() as f32
}

#[test]
fn truetype_font_embeds() {
    let mut backend = PdfBackend::new("fonts");
    backend.add_page(PageSize::A4_LANDSCAPE);
    let standard = backend.embed_standard_font(StandardFont::TimesRoman);

    let handle = backend.embed_font(TUFFY).unwrap();
    assert_ne!(handle, standard);
}

#[test]
fn truetype_widths_follow_horizontal_advances() {
    let mut backend = PdfBackend::new("fonts");
    let font = backend.embed_font(TUFFY).unwrap();

    for (text, size) in [("Certificate of Merit", 40.0), ("AAHA Solutions", 17.0)] {
        let expected = advance_width(text, size);
        let measured = backend.measure_text_width(text, font, size);
        assert!(expected > 0.0);
        assert!(
            (measured - expected).abs() < 1e-3,
            "{text:?}: measured {measured}, expected {expected}"
        );
    }
    assert_eq!(backend.measure_text_width("", font, 40.0), 0.0);
}

#[test]
fn unmapped_characters_measure_as_notdef() {
    let mut backend = PdfBackend::new("fonts");
    let font = backend.embed_font(TUFFY).unwrap();

    let face = ttf_parser::Face::parse(TUFFY, 0).unwrap();
    let notdef = face.glyph_hor_advance(ttf_parser::GlyphId(0)).unwrap_or(0) as f32;
    let expected = notdef * 10.0 / face.units_per_em() as f32;

    // Private-use code point, not mapped by Tuffy.
    assert!(face.glyph_index('\u{E000}').is_none());
    let measured = backend.measure_text_width("\u{E000}", font, 10.0);
    assert!((measured - expected).abs() < 1e-3);
}

#[test]
fn embedded_title_font_is_preferred_and_centers_by_its_metrics() {
    let loader = MemoryLoader::new().with(TITLE_FONT_RESOURCE, TUFFY.to_vec());
    let engine = CertificateEngine::new(loader, CertificateConfig::default());
    let request = request();

    let mut backend = PdfBackend::new("fonts");
    let layout = engine.layout(&request, &mut backend).unwrap();

    assert_eq!(
        layout.report.fonts.source(FontRole::Title),
        FontSource::Preferred(TITLE_FONT_RESOURCE)
    );
    assert_eq!(layout.report.degraded_fonts, vec![FontRole::InstitutionName]);

    let title = layout
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text(run) if run.text == request.certificate_title => Some(run),
            _ => None,
        })
        .unwrap();
    let expected_x = (PageSize::A4_LANDSCAPE.width - advance_width(&title.text, title.size)) / 2.0;
    assert!((title.x - expected_x).abs() < 1e-2);
}

#[test]
fn pdf_with_embedded_title_font_has_one_page() {
    let loader = MemoryLoader::new().with(TITLE_FONT_RESOURCE, TUFFY.to_vec());
    let engine = CertificateEngine::new(loader, CertificateConfig::default());

    let bytes = engine.generate_pdf(&request()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}
