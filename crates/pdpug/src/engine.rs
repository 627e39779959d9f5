// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! PDpug template engine for rendering templates.
//!
//! This module provides the [`Engine`] type that runs the complete template
//! lifecycle: loading, include expansion and rendering.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pdpug::{Engine, map_from_json};
//!
//! let engine = Engine::filesystem();
//! let data = map_from_json(serde_json::json!({ "name": "World" }));
//! let html = engine.render("views/hello.pdpug", &data)?;
//! ```
//!
//! # Architecture
//!
//! - **Resolver**: Locates template files by path (filesystem or memory)
//! - **Loader**: Reads a template into raw lines
//! - **Include expansion**: Splices `@include` targets into one flat line list
//! - **Renderer**: Walks the lines and produces HTML
//!
//! Every call starts from scratch; nothing is cached between renders. An
//! engine only reads through its resolver, so one engine can serve
//! concurrent renders from several threads.

use crate::error::Result;
use crate::include::expand_includes;
use crate::loader::{load_lines, split_lines};
use crate::render::RenderContext;
use crate::resolver::{FileSystemResolver, ResourceResolver};
use crate::scope::Scope;
use crate::value::Map;
use std::path::Path;

/// Main PDpug template engine.
///
/// The engine is generic over the resource resolver type `R`, allowing
/// different template loading strategies.
///
/// # Examples
///
/// ```rust,ignore
/// use pdpug::{Engine, MemoryResourceResolver, Map};
///
/// let resolver = MemoryResourceResolver::new();
/// resolver.add_template("hello.pdpug", "h1 Hello, #{name}!");
///
/// let engine = Engine::new(resolver);
/// let html = engine.render("hello.pdpug", &Map::new())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine<R: ResourceResolver = FileSystemResolver> {
    resolver: R,
}

impl Engine<FileSystemResolver> {
    /// Creates an engine that reads templates from disk.
    pub fn filesystem() -> Self {
        Self::new(FileSystemResolver::new())
    }
}

impl<R: ResourceResolver> Engine<R> {
    /// Creates an engine over the given resolver.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Returns a reference to the resolver used by this engine.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Loads a template and expands all of its includes.
    ///
    /// Include targets resolve relative to the directory of the file that
    /// contains the `@include`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or any include is missing or
    /// unreadable, if includes form a cycle, or if they nest too deeply.
    pub fn expand<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let lines = load_lines(&self.resolver, path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut chain = vec![self.resolver.canonicalize(path)];
        expand_includes(&self.resolver, lines, base_dir, 0, &mut chain)
    }

    /// Renders the template at `path` with `data`.
    ///
    /// Either the complete HTML is returned or an error; no partial output
    /// escapes a failed render.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let html = engine.render("views/recetas_lista.pdpug", &data)?;
    /// ```
    pub fn render<P: AsRef<Path>>(&self, path: P, data: &Map) -> Result<String> {
        let path = path.as_ref();
        tracing::debug!("Rendering template '{}'", path.display());
        let lines = self.expand(path)?;
        Ok(render_expanded(&lines, data))
    }

    /// Renders template source held in memory.
    ///
    /// `@include` paths in `source` resolve relative to `base_dir`.
    pub fn render_source<P: AsRef<Path>>(&self, source: &str, base_dir: P, data: &Map) -> Result<String> {
        let mut chain = Vec::new();
        let lines = expand_includes(&self.resolver, split_lines(source), base_dir.as_ref(), 0, &mut chain)?;
        Ok(render_expanded(&lines, data))
    }
}

fn render_expanded(lines: &[String], data: &Map) -> String {
    let mut ctx = RenderContext::new();
    ctx.render_lines(lines, &Scope::new(data));
    ctx.finish()
}

/// Renders the template at `path` from disk with `data`.
///
/// Shorthand for `Engine::filesystem().render(path, data)`.
pub fn render<P: AsRef<Path>>(path: P, data: &Map) -> Result<String> {
    Engine::filesystem().render(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdpugError;
    use crate::memory_resolver::MemoryResourceResolver;
    use crate::value::map_from_json;
    use serde_json::json;

    fn engine() -> Engine<MemoryResourceResolver> {
        Engine::new(MemoryResourceResolver::new())
    }

    #[test]
    fn test_render_from_memory() {
        let engine = engine();
        engine
            .resolver()
            .add_template("views/hello.pdpug", "h1.title Hello, #{name}!");

        let html = engine
            .render("views/hello.pdpug", &map_from_json(json!({ "name": "Ana" })))
            .unwrap();
        assert_eq!(html, "<h1 class=\"title\">Hello, Ana!\n</h1>\n");
    }

    #[test]
    fn test_missing_template() {
        let err = engine().render("nope.pdpug", &Map::new()).unwrap_err();
        assert!(matches!(err, PdpugError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_errors_leave_no_output() {
        let engine = engine();
        engine
            .resolver()
            .add_template("v/page.pdpug", "html\n  body\n    @include \"missing.pdpug\"");

        let result = engine.render("v/page.pdpug", &Map::new());
        assert!(matches!(result, Err(PdpugError::IncludeNotFound { .. })));
    }

    #[test]
    fn test_render_source_resolves_includes_from_base_dir() {
        let engine = engine();
        engine.resolver().add_template("v/partials/footer.pdpug", "footer !{year}");

        let html = engine
            .render_source(
                "main\n@include \"partials/footer.pdpug\"",
                "v",
                &map_from_json(json!({ "year": 2024 })),
            )
            .unwrap();
        assert_eq!(html, "<main>\n</main>\n<footer>2024\n</footer>\n");
    }

    #[test]
    fn test_expand_returns_flat_lines() {
        let engine = engine();
        engine.resolver().add_template("v/a.pdpug", "div\n  @include 'b.pdpug'");
        engine.resolver().add_template("v/b.pdpug", "p b");

        assert_eq!(engine.expand("v/a.pdpug").unwrap(), vec!["div", "  p b"]);
    }

    #[test]
    fn test_engine_is_reusable_across_threads() {
        let engine = engine();
        engine.resolver().add_template("v/n.pdpug", "span #{n}");
        let engine = std::sync::Arc::new(engine);

        let handles: Vec<_> = (0..4)
            .map(|n| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    let data = map_from_json(json!({ "n": n }));
                    engine.render("v/n.pdpug", &data).unwrap()
                })
            })
            .collect();

        for (n, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("<span>{n}\n</span>\n"));
        }
    }
}
