// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the people filling in certificate requests.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::CertwerkError;
use crate::types::ImageField;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something on the machine went wrong; trying again may help.
    Transient,
    /// The user must fix an input (replace an image, fill in a field).
    ActionRequired,
    /// Cannot be fixed by retrying or changing input.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether running the same request again could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `CertwerkError` into a `HumanError`.
pub fn humanize_error(err: &CertwerkError) -> HumanError {
    match err {
        CertwerkError::InvalidImageFormat { field, .. } => HumanError {
            message: format!("The {field} is not a valid PNG file."),
            suggestion: match field {
                ImageField::Logo => "Export the logo as a PNG image and choose it again.".into(),
                ImageField::Signature => {
                    "Scan or export the signature as a PNG image and choose it again.".into()
                }
            },
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CertwerkError::InvalidRequest(detail) => HumanError {
            message: "The certificate details are incomplete.".into(),
            suggestion: format!("Check the request file and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CertwerkError::FontLoad(_) | CertwerkError::ResourceNotFound(_) => HumanError {
            message: "A certificate font could not be loaded.".into(),
            suggestion: "Make sure the fonts folder is installed next to the program.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        CertwerkError::ImageDecode(_) => HumanError {
            message: "There's a problem with one of the images.".into(),
            suggestion: "The image may be damaged. Try saving it as a PNG again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CertwerkError::PdfError(_) => HumanError {
            message: "The certificate could not be created.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CertwerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again."
                        .into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The program doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or choose a different folder.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full."
                        .into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        CertwerkError::Serialization(_) => HumanError {
            message: "The request file couldn't be read.".into(),
            suggestion: "Check that it is valid JSON with the expected field names.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}
