// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Certwerk.

use thiserror::Error;

use crate::types::ImageField;

/// Top-level error type for all Certwerk operations.
///
/// Only [`CertwerkError::InvalidImageFormat`] ever escapes certificate
/// generation; the font, image and resource variants are produced by the
/// backend and loaders and are downgraded to log entries by the engine.
#[derive(Debug, Error)]
pub enum CertwerkError {
    // -- Request preconditions --
    #[error("the {field} is not a valid PNG file: {reason}")]
    InvalidImageFormat { field: ImageField, reason: String },

    #[error("invalid certificate request: {0}")]
    InvalidRequest(String),

    // -- Resource / embedding errors --
    #[error("font could not be loaded: {0}")]
    FontLoad(String),

    #[error("image could not be decoded: {0}")]
    ImageDecode(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CertwerkError>;
