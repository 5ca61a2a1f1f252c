// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fonts module: standard-font metrics and per-run font resolution with
// chained fallback.

pub mod metrics;
pub mod resolve;

pub use resolve::{FontRole, FontSource, ResolvedFont, ResolvedFontSet, resolve_fonts};

/// The built-in PDF fonts the engine falls back to. They need no font file
/// and can always be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    TimesRoman,
    TimesBold,
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// PostScript name of the font.
    pub fn postscript_name(&self) -> &'static str {
        match self {
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }
}
