// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Template resource resolution.
//!
//! This module provides the [`ResourceResolver`] trait and the filesystem
//! implementation used by default.
//!
//! # Resolver Implementations
//!
//! - [`FileSystemResolver`]: Loads templates from disk
//! - [`MemoryResourceResolver`](crate::MemoryResourceResolver): Loads templates
//!   from in-memory storage (testing, embedded templates)
//!
//! Resolvers only answer questions about concrete paths. Joining an include
//! target onto the including file's directory happens in
//! [`join_path`](crate::loader::join_path), so every resolver sees the same
//! path layout.

use std::io;
use std::path::{Path, PathBuf};

/// Trait for locating and reading template sources.
///
/// Implementations must be thread-safe so an engine can be shared across
/// threads; each render call only reads through the resolver.
pub trait ResourceResolver: Send + Sync {
    /// Returns `true` if `path` names a readable template.
    fn is_file(&self, path: &Path) -> bool;

    /// Returns the canonical form of `path`, used to detect include cycles.
    ///
    /// Implementations fall back to the path unchanged when it cannot be
    /// canonicalized.
    fn canonicalize(&self, path: &Path) -> PathBuf;

    /// Reads the full template source at `path`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        (**self).canonicalize(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

/// Filesystem-based resource resolver.
///
/// Paths are used exactly as given; relative paths resolve against the
/// process working directory.
///
/// # Examples
///
/// ```rust,ignore
/// use pdpug::{Engine, FileSystemResolver};
///
/// let engine = Engine::new(FileSystemResolver::new());
/// let html = engine.render("views/index.pdpug", &data)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemResolver;

impl FileSystemResolver {
    /// Creates a new filesystem resolver.
    pub fn new() -> Self {
        Self
    }
}

impl ResourceResolver for FileSystemResolver {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|e| {
            tracing::debug!("Cannot canonicalize '{}': {}", path.display(), e);
            path.to_path_buf()
        })
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
