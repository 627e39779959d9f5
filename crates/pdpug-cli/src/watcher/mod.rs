// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! File system watching for rebuilds.
//!
//! This module provides `FileWatcher` for monitoring template and data
//! file changes.
//!
//! # Features
//!
//! - Debounced file change events (750ms)
//! - Filters for template files and the data file
//! - Recursive directory watching

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, RecommendedCache};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

/// Quiet period before a burst of events is reported.
pub const DEBOUNCE: Duration = Duration::from_millis(750);

/// Watches a template directory and an optional data file.
///
/// Uses debouncing to prevent multiple rapid rebuilds and filters
/// events to only report relevant files.
pub struct FileWatcher {
    _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
    rx: mpsc::Receiver<Vec<PathBuf>>,
}

impl FileWatcher {
    /// Starts watching `templates_dir` recursively, plus `data_file` if given.
    ///
    /// Only files ending in `.<extension>` and the data file itself are
    /// reported.
    pub fn new(
        templates_dir: &Path,
        extension: &str,
        data_file: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let templates_dir = canonical(templates_dir);
        let data_file = data_file.map(canonical);
        let (tx, rx) = mpsc::channel();

        let filter = WatchFilter {
            extension: extension.to_string(),
            data_file: data_file.clone(),
        };

        let mut debouncer = new_debouncer(DEBOUNCE, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let mut changed: Vec<PathBuf> = events
                        .iter()
                        .flat_map(|e| e.paths.iter())
                        .filter(|p| filter.is_relevant(p))
                        .cloned()
                        .collect();
                    changed.sort();
                    changed.dedup();

                    if !changed.is_empty() {
                        let _ = tx.send(changed);
                    }
                }
                Err(errors) => {
                    for error in errors {
                        tracing::warn!("Watch error: {}", error);
                    }
                }
            }
        })?;

        debouncer.watch(&templates_dir, RecursiveMode::Recursive)?;

        // Watch the data file's directory so editors that replace the file
        // on save are still seen.
        if let Some(dir) = data_file.as_deref().and_then(Path::parent) {
            if !dir.starts_with(&templates_dir) {
                debouncer.watch(dir, RecursiveMode::NonRecursive)?;
            }
        }

        tracing::debug!("Watching {}", templates_dir.display());
        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    /// Blocks until the next batch of relevant changes.
    ///
    /// Returns `None` once the watcher has shut down.
    pub fn recv(&self) -> Option<Vec<PathBuf>> {
        self.rx.recv().ok()
    }
}

/// Decides which changed paths trigger a rebuild.
#[derive(Debug, Clone)]
pub struct WatchFilter {
    /// Template extension, without the dot.
    pub extension: String,
    /// Data file, compared by exact path.
    pub data_file: Option<PathBuf>,
}

impl WatchFilter {
    /// Returns `true` for template files and the data file.
    pub fn is_relevant(&self, path: &Path) -> bool {
        if self.data_file.as_deref() == Some(path) {
            return true;
        }
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
