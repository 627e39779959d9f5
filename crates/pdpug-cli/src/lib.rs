// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! PDpug CLI library.
//!
//! This crate provides the command-line interface for the PDpug templating
//! engine: rendering single templates, inspecting include expansion and
//! building a directory of templates into static HTML.
//!
//! # Usage
//!
//! This crate is primarily used through the `pdpug` binary:
//!
//! ```bash
//! pdpug render views/index.pdpug --data data.json   # Render to stdout
//! pdpug expand views/index.pdpug                    # Show spliced includes
//! pdpug build                                       # Render every page
//! pdpug watch                                       # Rebuild on change
//! ```
//!
//! # Configuration
//!
//! Projects are configured via an optional `pdpug.toml` at the project root.

/// CLI commands (render, expand, build, watch).
pub mod commands;
/// Project configuration from `pdpug.toml`.
pub mod config;
/// JSON data loading.
pub mod data;
/// File system watching for rebuilds.
pub mod watcher;
