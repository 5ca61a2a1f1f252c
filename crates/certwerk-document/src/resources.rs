// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resource loading: maps logical resource names (font files) to bytes.
//
// The engine never touches the filesystem directly; it asks a loader. Tests
// swap in a `MemoryLoader` that deterministically succeeds or fails.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use certwerk_core::error::{CertwerkError, Result};
use tracing::debug;

/// Something that can produce the bytes of a named resource.
pub trait ResourceLoader {
    /// Load the resource called `name`.
    ///
    /// Fails with [`CertwerkError::ResourceNotFound`] when no such resource
    /// exists, or another error when it exists but cannot be read.
    fn load(&self, name: &str) -> Result<Vec<u8>>;
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for &T {
    fn load(&self, name: &str) -> Result<Vec<u8>> {
        (**self).load(name)
    }
}

/// Loads resources from files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLoader for DirectoryLoader {
    fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), len = bytes.len(), "Resource loaded");
                Ok(bytes)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(CertwerkError::ResourceNotFound(path.display().to_string()))
            }
            Err(err) => Err(CertwerkError::Io(err)),
        }
    }
}

/// Serves resources from an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    /// An empty loader: every lookup fails with `ResourceNotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, builder style.
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), bytes.into());
    }
}

impl ResourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<Vec<u8>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| CertwerkError::ResourceNotFound(name.to_owned()))
    }
}
