// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # PDpug
//!
//! Whitespace-indented HTML templates for Rust.
//!
//! A template is a text file where each line is an element, a text line or a
//! directive, and nesting is expressed with two-space indentation. Rendering
//! produces HTML directly from the lines; there is no intermediate tree.
//!
//! ## Features
//!
//! - Element shorthand (`div#main.card.wide(data-id="7") text`)
//! - Escaped `#{path}` and raw `!{path}` interpolation
//! - `@if` / `@else` conditionals and `@foreach` loops
//! - `@include` splicing with cycle and depth detection
//! - Filesystem or in-memory template resolution
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pdpug::{Engine, map_from_json};
//!
//! let engine = Engine::filesystem();
//! let data = map_from_json(serde_json::json!({ "name": "World" }));
//! let html = engine.render("views/hello.pdpug", &data)?;
//! ```

/// Error types.
pub mod error;
/// Template data values.
pub mod value;
/// Variable scopes and path lookup.
pub mod scope;
/// Resource resolution (filesystem).
pub mod resolver;
/// In-memory resource resolver for tests and embedding.
pub mod memory_resolver;
/// Template loading and line helpers.
pub mod loader;
/// `@include` expansion.
pub mod include;
/// Element line parsing.
pub mod element;
/// `#{}` / `!{}` interpolation and HTML escaping.
pub mod interpolate;
/// Line renderer.
pub mod render;
/// Main template engine.
pub mod engine;

pub use element::{parse_element, split_attributes, Element};
pub use engine::{render, Engine};
pub use error::{PdpugError, Result};
pub use include::{expand_includes, MAX_INCLUDE_DEPTH};
pub use interpolate::{escape_html, interpolate_attr, interpolate_text};
pub use loader::{join_path, level, load_lines, split_lines, INDENT_WIDTH};
pub use memory_resolver::MemoryResourceResolver;
pub use render::{OpenTag, RenderContext, DOCTYPE};
pub use resolver::{FileSystemResolver, ResourceResolver};
pub use scope::{get, Scope};
pub use value::{map_from_json, Map, Value};
