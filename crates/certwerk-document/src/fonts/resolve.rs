// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font resolution: binds every logical font role to a renderable font.
//
// Each role names an optional decorative font file and a fallback, which is
// either a standard font or another role. The graph below is static and
// acyclic; it is resolved once per generation run, dependencies first, into an
// immutable `ResolvedFontSet`. Resolution never fails: a decorative font that
// cannot be loaded or embedded is logged and its fallback is used instead.

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use super::StandardFont;
use crate::backend::{DocumentBackend, FontHandle};
use crate::resources::ResourceLoader;

/// Decorative blackletter face used for the certificate title.
pub const TITLE_FONT_RESOURCE: &str = "oldenglish.ttf";
/// Decorative capitals used for institution and issuer names.
pub const INSTITUTION_FONT_RESOURCE: &str = "CinzelDecorative-Bold.ttf";

/// A named purpose a font is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Title,
    Body,
    Emphasis,
    InstitutionName,
}

impl FontRole {
    pub const ALL: [FontRole; 4] = [
        FontRole::Title,
        FontRole::Body,
        FontRole::Emphasis,
        FontRole::InstitutionName,
    ];

    fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Body => 1,
            Self::Emphasis => 2,
            Self::InstitutionName => 3,
        }
    }

    /// Preferred decorative resource and fallback for this role.
    fn binding(self) -> RoleBinding {
        match self {
            Self::Title => RoleBinding {
                preferred: Some(TITLE_FONT_RESOURCE),
                fallback: Fallback::Standard(StandardFont::TimesRoman),
            },
            Self::Body => RoleBinding {
                preferred: None,
                fallback: Fallback::Standard(StandardFont::TimesRoman),
            },
            Self::Emphasis => RoleBinding {
                preferred: None,
                fallback: Fallback::Standard(StandardFont::HelveticaBold),
            },
            // Chained: inherits whatever the emphasis role resolved to.
            Self::InstitutionName => RoleBinding {
                preferred: Some(INSTITUTION_FONT_RESOURCE),
                fallback: Fallback::Role(FontRole::Emphasis),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RoleBinding {
    preferred: Option<&'static str>,
    fallback: Fallback,
}

#[derive(Debug, Clone, Copy)]
enum Fallback {
    Standard(StandardFont),
    Role(FontRole),
}

/// Where a role's font ultimately came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    /// The role's own decorative font resource.
    Preferred(&'static str),
    /// A built-in standard font.
    Standard(StandardFont),
    /// The resolved font of another role.
    Inherited(FontRole),
}

/// A role bound to a concrete backend font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFont {
    pub handle: FontHandle,
    pub source: FontSource,
}

/// Every role bound to a font. Owned by exactly one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFontSet {
    fonts: [ResolvedFont; 4],
}

impl ResolvedFontSet {
    pub fn get(&self, role: FontRole) -> ResolvedFont {
        self.fonts[role.index()]
    }

    pub fn handle(&self, role: FontRole) -> FontHandle {
        self.get(role).handle
    }

    pub fn source(&self, role: FontRole) -> FontSource {
        self.get(role).source
    }

    /// Roles that ended up on a fallback instead of their decorative font.
    pub fn degraded_roles(&self) -> Vec<FontRole> {
        FontRole::ALL
            .into_iter()
            .filter(|role| {
                role.binding().preferred.is_some()
                    && !matches!(self.source(*role), FontSource::Preferred(_))
            })
            .collect()
    }
}

/// Resolve every font role against `loader` and `backend`.
#[instrument(skip_all)]
pub fn resolve_fonts(
    loader: &dyn ResourceLoader,
    backend: &mut dyn DocumentBackend,
) -> ResolvedFontSet {
    let mut resolver = Resolver {
        loader,
        backend,
        resolved: [None; 4],
        standard: HashMap::new(),
    };

    let fonts = FontRole::ALL.map(|role| resolver.resolve(role));
    let set = ResolvedFontSet { fonts };

    let degraded = set.degraded_roles();
    if degraded.is_empty() {
        info!("All decorative fonts resolved");
    } else {
        info!(?degraded, "Font resolution finished with fallbacks");
    }
    set
}

struct Resolver<'a> {
    loader: &'a dyn ResourceLoader,
    backend: &'a mut dyn DocumentBackend,
    resolved: [Option<ResolvedFont>; 4],
    standard: HashMap<StandardFont, FontHandle>,
}

impl Resolver<'_> {
    fn resolve(&mut self, role: FontRole) -> ResolvedFont {
        if let Some(done) = self.resolved[role.index()] {
            return done;
        }

        let binding = role.binding();
        let resolved = match binding.preferred.map(|name| (name, self.load_preferred(name))) {
            Some((name, Ok(handle))) => {
                debug!(?role, resource = name, "Decorative font embedded");
                ResolvedFont {
                    handle,
                    source: FontSource::Preferred(name),
                }
            }
            Some((name, Err(err))) => {
                warn!(?role, resource = name, error = %err, "Decorative font unavailable; falling back");
                self.fallback(binding.fallback)
            }
            None => self.fallback(binding.fallback),
        };

        self.resolved[role.index()] = Some(resolved);
        resolved
    }

    fn load_preferred(&mut self, name: &str) -> certwerk_core::error::Result<FontHandle> {
        let bytes = self.loader.load(name)?;
        self.backend.embed_font(&bytes)
    }

    fn fallback(&mut self, fallback: Fallback) -> ResolvedFont {
        match fallback {
            Fallback::Standard(font) => ResolvedFont {
                handle: self.standard_font(font),
                source: FontSource::Standard(font),
            },
            Fallback::Role(other) => ResolvedFont {
                handle: self.resolve(other).handle,
                source: FontSource::Inherited(other),
            },
        }
    }

    fn standard_font(&mut self, font: StandardFont) -> FontHandle {
        if let Some(handle) = self.standard.get(&font) {
            return *handle;
        }
        let handle = self.backend.embed_standard_font(font);
        self.standard.insert(font, handle);
        handle
    }
}
