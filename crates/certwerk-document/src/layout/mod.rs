// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout engine: turns a certificate request into drawing operations on one
// A4-landscape page and hands them to a document backend.
//
// A run is: validate images, normalize text, start the page, resolve fonts,
// draw the chrome, then walk the block list with a downward-moving cursor.
// Everything derived along the way lives only for that run.

pub mod blocks;
pub mod geometry;

use certwerk_core::error::Result;
use certwerk_core::{CertificateConfig, CertificateRequest, ImageField, PageSize};
use tracing::{debug, info, instrument, warn};

use crate::backend::{DocumentBackend, DrawOp, PdfBackend};
use crate::fonts::{FontRole, ResolvedFontSet, resolve_fonts};
use crate::image::validate_png;
use crate::normalize::{clean_text, normalize};
use crate::resources::{DirectoryLoader, ResourceLoader};

use blocks::{Advance, BLOCKS, BlockContext, BlockOutcome};
use geometry::{LayoutCursor, page_chrome};

/// What happened to each block during one run.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutReport {
    /// Blocks that drew something, in page order.
    pub rendered: Vec<&'static str>,
    /// Blocks whose inputs were absent.
    pub omitted: Vec<&'static str>,
    /// Blocks that applied but could not draw, with the reason.
    pub skipped: Vec<(&'static str, String)>,
    /// Font roles that fell back from their decorative font.
    pub degraded_fonts: Vec<FontRole>,
    pub cursor_advances: usize,
    /// Cursor position after the last flow block.
    pub final_y: f32,
    pub fonts: ResolvedFontSet,
}

impl LayoutReport {
    pub fn was_rendered(&self, block: &str) -> bool {
        self.rendered.iter().any(|name| *name == block)
    }
}

/// The computed page: every drawing operation in order, plus the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub ops: Vec<DrawOp>,
    pub report: LayoutReport,
}

/// Generates certificates. Holds no per-run state, so one engine can serve
/// any number of sequential or concurrent runs.
#[derive(Debug, Clone)]
pub struct CertificateEngine<L> {
    loader: L,
    config: CertificateConfig,
}

impl CertificateEngine<DirectoryLoader> {
    /// Engine that loads decorative fonts from `config.assets_dir`.
    pub fn from_config(config: CertificateConfig) -> Self {
        let loader = DirectoryLoader::new(config.assets_dir.clone());
        Self::new(loader, config)
    }
}

impl<L: ResourceLoader> CertificateEngine<L> {
    pub fn new(loader: L, config: CertificateConfig) -> Self {
        Self { loader, config }
    }

    pub fn config(&self) -> &CertificateConfig {
        &self.config
    }

    /// Compute the page without drawing it.
    ///
    /// Fails only when a supplied logo or signature is not a PNG; that check
    /// runs before the page is created. Every other problem degrades the
    /// output and is reported in [`LayoutReport`].
    #[instrument(skip_all, fields(student = %request.student_name))]
    pub fn layout(
        &self,
        request: &CertificateRequest,
        backend: &mut dyn DocumentBackend,
    ) -> Result<Layout> {
        validate_request(request)?;
        let request = normalize(request);

        let page = PageSize::A4_LANDSCAPE;
        backend.add_page(page);
        let fonts = resolve_fonts(&self.loader, backend);

        let mut ops = page_chrome(page, &self.config);
        let mut cursor = LayoutCursor::at_content_top(page);
        let mut rendered = Vec::new();
        let mut omitted = Vec::new();
        let mut skipped = Vec::new();

        for block in BLOCKS {
            if !(block.applies)(&request) {
                debug!(block = block.name, "Block omitted");
                omitted.push(block.name);
                continue;
            }

            let mut ctx = BlockContext {
                backend: &mut *backend,
                fonts: &fonts,
                request: &request,
                config: &self.config,
                page,
                y: cursor.y(),
                ops: &mut ops,
            };
            match (block.render)(&mut ctx) {
                BlockOutcome::Drawn => {
                    rendered.push(block.name);
                    if let Advance::Lines(factor) = block.advance {
                        cursor.advance(factor);
                    }
                }
                BlockOutcome::Skipped(reason) => {
                    debug!(block = block.name, %reason, "Block skipped");
                    skipped.push((block.name, reason));
                }
            }
        }

        let degraded_fonts = fonts.degraded_roles();
        if !skipped.is_empty() || !degraded_fonts.is_empty() {
            warn!(
                skipped = skipped.len(),
                degraded_fonts = degraded_fonts.len(),
                "Certificate laid out with degradations"
            );
        }
        info!(
            ops = ops.len(),
            blocks = rendered.len(),
            final_y = cursor.y(),
            "Certificate laid out"
        );

        Ok(Layout {
            ops,
            report: LayoutReport {
                rendered,
                omitted,
                skipped,
                degraded_fonts,
                cursor_advances: cursor.advances(),
                final_y: cursor.y(),
                fonts,
            },
        })
    }

    /// Lay out, draw and serialize one certificate with `backend`.
    pub fn generate<B: DocumentBackend>(
        &self,
        request: &CertificateRequest,
        mut backend: B,
    ) -> Result<Vec<u8>> {
        let layout = self.layout(request, &mut backend)?;
        for op in layout.ops {
            op.apply(&mut backend);
        }
        backend.save()
    }

    /// Generate a certificate as PDF bytes.
    pub fn generate_pdf(&self, request: &CertificateRequest) -> Result<Vec<u8>> {
        let title = format!("{} - {}", request.certificate_title, request.student_name);
        self.generate(request, PdfBackend::new(&clean_text(&title)))
    }
}

/// Reject logo or signature payloads that are not PNG images.
pub fn validate_request(request: &CertificateRequest) -> Result<()> {
    for field in [ImageField::Logo, ImageField::Signature] {
        if let Some(bytes) = request.image(field) {
            validate_png(field, bytes)?;
        }
    }
    Ok(())
}

/// `{studentName}_Certificate.pdf`, with path separators in the name
/// replaced so the result is always a single file name.
pub fn certificate_file_name(student_name: &str) -> String {
    let name: String = clean_text(student_name)
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{name}_Certificate.pdf")
}
