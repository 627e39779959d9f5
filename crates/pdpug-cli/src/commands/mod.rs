// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! This module contains the implementations for all PDpug CLI commands:
//!
//! - `render`: Render one template to stdout or a file
//! - `expand`: Print a template with its includes spliced in
//! - `build`: Render every page template into the output directory
//! - `watch`: Watch files and rebuild on changes

/// Production build command.
pub mod build;
/// Include expansion command.
pub mod expand;
/// Single template render command.
pub mod render;
/// File watch command.
pub mod watch;
