// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// certwerk-document: Certificate layout and rendering for Certwerk.
//
// Normalizes a certificate request, resolves decorative fonts with fallback,
// lays the page out block by block and renders it through a document backend
// (PDF via `printpdf`, or a recording backend for tests and dry runs).

pub mod backend;
pub mod fonts;
pub mod image;
pub mod layout;
pub mod normalize;
pub mod resources;
pub mod wrap;

// Re-export the primary types so callers can use `certwerk_document::CertificateEngine` etc.
pub use backend::{DocumentBackend, DrawOp, PdfBackend, RecordingBackend};
pub use fonts::{FontRole, FontSource, ResolvedFontSet};
pub use layout::{
    CertificateEngine, Layout, LayoutReport, certificate_file_name, validate_request,
};
pub use normalize::{NormalizedRequest, normalize};
pub use resources::{DirectoryLoader, MemoryLoader, ResourceLoader};
