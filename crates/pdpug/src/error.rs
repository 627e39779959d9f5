// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the PDpug templating engine.
//!
//! This module defines [`PdpugError`], the error enum returned by every
//! fallible engine operation.
//!
//! # Error Categories
//!
//! - **Template errors**: the entry template is missing or unreadable
//! - **Include errors**: an `@include` target is missing, forms a cycle,
//!   or nests too deeply
//!
//! Nothing else in the engine fails. Unresolved variables render as empty
//! strings, malformed attribute tokens are dropped and loops over values
//! that are not lists run zero times.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for PDpug operations.
///
/// Every variant is fatal to the render call that produced it; no partial
/// output is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum PdpugError {
    /// The template path does not name a readable file.
    #[error("Template not found: {}", path.display())]
    TemplateNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The template exists but reading it failed.
    #[error("Cannot read template '{}': {source}", path.display())]
    TemplateReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An `@include` directive points at a file that does not exist.
    #[error("Include not found: {}", path.display())]
    IncludeNotFound {
        /// The resolved include path.
        path: PathBuf,
    },

    /// An `@include` directive re-enters a file already on the include chain.
    #[error("Include cycle detected at: {}", path.display())]
    IncludeCycle {
        /// The resolved include path that closed the cycle.
        path: PathBuf,
    },

    /// Includes are nested deeper than [`crate::MAX_INCLUDE_DEPTH`].
    #[error("Too many nested includes (depth {depth})")]
    TooManyIncludes {
        /// The depth at which expansion gave up.
        depth: usize,
    },
}

/// Convenience type alias for Results with [`PdpugError`].
pub type Result<T> = std::result::Result<T, PdpugError>;
