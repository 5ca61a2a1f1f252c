// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The organisation that issues certificates. Printed below the "at" line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    pub name: String,
    pub description: String,
    pub address: String,
}

impl Default for Issuer {
    fn default() -> Self {
        Self {
            name: "AAHA Solutions".into(),
            description: "(a software development company)".into(),
            address: "Located at No:27, 3rd Cross, SithanKudi, Brindavan Colony, Puducherry-605013"
                .into(),
        }
    }
}

/// Settings that shape a generation run.
///
/// Font sizes, colours and role bindings are fixed design constants and are
/// deliberately absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateConfig {
    /// Directory holding the decorative font files.
    pub assets_dir: PathBuf,
    /// Distance of the outer border frame from the page edge, in points.
    pub outer_margin: f32,
    /// Gap between the outer and inner border frames, in points.
    pub border_gap: f32,
    /// Organisation printed on every certificate.
    pub issuer: Issuer,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets/fonts"),
            outer_margin: 40.0,
            border_gap: 4.0,
            issuer: Issuer::default(),
        }
    }
}

impl CertificateConfig {
    /// Margin of the inner border frame.
    pub fn inner_margin(&self) -> f32 {
        self.outer_margin + self.border_gap
    }
}
