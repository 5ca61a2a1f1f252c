// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the certwerk-document crate: one full layout pass
// through the recording backend, and complete PDF generation.

use std::io::Cursor;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use certwerk_core::{CertificateConfig, CertificateRequest, Year};
use certwerk_document::{CertificateEngine, MemoryLoader, RecordingBackend};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A request with every optional field set and a 64x32 logo, so every block
/// (including the faded watermark) is exercised.
fn full_request() -> CertificateRequest {
    let logo = RgbaImage::from_pixel(64, 32, Rgba([118, 166, 68, 255]));
    let mut png = Vec::new();
    DynamicImage::ImageRgba8(logo)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .expect("encode benchmark logo");

    let mut request = CertificateRequest::new(
        "Asha Raman",
        Year::III,
        "B.Tech CSE",
        "PONDICHERRY ENGINEERING COLLEGE",
        "2024-03-10",
    );
    request.internship_course = Some("Web Development".into());
    request.project_title = Some("Campus Navigator".into());
    request.technologies = Some("Rust, PostgreSQL".into());
    request.duration = Some("15 days".into());
    request.internship_start_date = Some("2024-01-05".into());
    request.internship_end_date = Some("2024-01-20".into());
    request.logo_image = Some(png.clone());
    request.signature_image = Some(png);
    request
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_layout(c: &mut Criterion) {
    let engine = CertificateEngine::new(MemoryLoader::new(), CertificateConfig::default());
    let request = full_request();

    c.bench_function("layout (all blocks, recording backend)", |b| {
        b.iter(|| {
            let mut backend = RecordingBackend::new();
            let layout = engine.layout(black_box(&request), &mut backend);
            black_box(layout.map(|layout| layout.ops.len()).ok());
        });
    });
}

/// Includes PNG decoding, watermark compositing and PDF serialization.
fn bench_generate_pdf(c: &mut Criterion) {
    let engine = CertificateEngine::new(MemoryLoader::new(), CertificateConfig::default());
    let request = full_request();

    c.bench_function("generate_pdf (all blocks)", |b| {
        b.iter(|| black_box(engine.generate_pdf(black_box(&request)).map(|pdf| pdf.len()).ok()));
    });
}

criterion_group!(benches, bench_layout, bench_generate_pdf);
criterion_main!(benches);
