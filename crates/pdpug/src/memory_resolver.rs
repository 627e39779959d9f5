// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use crate::resolver::ResourceResolver;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Memory-based resource resolver that stores templates in memory.
///
/// Paths are normalized lexically (`.` dropped, `..` resolved), so
/// `views/partials/../nav.pdpug` and `views/nav.pdpug` name the same
/// template. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceResolver {
    templates: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryResourceResolver {
    /// Create a new memory resource resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Helper to access templates with mutable reference
    fn with_templates_mut<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut HashMap<PathBuf, String>) -> T,
    {
        let mut guard = self.templates.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Add a template to the memory resolver
    pub fn add_template<P: AsRef<Path>>(&self, path: P, content: impl Into<String>) {
        let key = normalize_path(path.as_ref());
        let content = content.into();
        self.with_templates_mut(|templates| {
            templates.insert(key, content);
        });
    }

    /// Remove a template from the memory resolver
    pub fn remove_template<P: AsRef<Path>>(&self, path: P) {
        let key = normalize_path(path.as_ref());
        self.with_templates_mut(|templates| {
            templates.remove(&key);
        });
    }

    /// Clear all templates
    pub fn clear(&self) {
        self.with_templates_mut(HashMap::clear);
    }
}

/// Resolves `.` and `..` components without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

impl ResourceResolver for MemoryResourceResolver {
    fn is_file(&self, path: &Path) -> bool {
        let key = normalize_path(path);
        self.with_templates_mut(|templates| templates.contains_key(&key))
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        normalize_path(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let key = normalize_path(path);
        self.with_templates_mut(|templates| templates.get(&key).cloned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Template not in memory: {}", path.display()),
                )
            })
    }
}
