// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Line renderer.
//!
//! Rendering walks an include-expanded list of lines with a cursor. Nesting
//! is tracked by a stack of open tags, each remembering the indentation
//! level it was opened at. Before a line is handled, every open tag at the
//! line's level or deeper is closed, so siblings close each other and a
//! dedent closes the whole subtree.
//!
//! `@if` and `@foreach` capture the run of lines indented deeper than the
//! directive and render that slice recursively: once for the chosen branch,
//! or once per item with the loop variable bound in a child [`Scope`].

use crate::element::parse_element;
use crate::interpolate::interpolate_text;
use crate::loader::{self, is_blank, is_space, trim_start};
use crate::scope::Scope;
use crate::value::{Map, Value};
use std::borrow::Cow;

/// Output of the `doctype html` line.
pub const DOCTYPE: &str = "<!doctype html>\n";

/// An element that has been opened but not yet closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    /// Tag name to close.
    pub tag: String,
    /// Indentation level of the line that opened it.
    pub level: usize,
}

/// Mutable state of one render call: the open-tag stack and the output.
#[derive(Debug, Default)]
pub struct RenderContext {
    stack: Vec<OpenTag>,
    out: String,
}

impl RenderContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags currently open, outermost first.
    pub fn stack(&self) -> &[OpenTag] {
        &self.stack
    }

    /// Output produced so far.
    pub fn output(&self) -> &str {
        &self.out
    }

    /// Closes every remaining tag and returns the finished output.
    pub fn finish(mut self) -> String {
        self.close_to_level(0);
        self.out
    }

    /// Pops and closes open tags while the innermost one sits at `level` or deeper.
    pub fn close_to_level(&mut self, level: usize) {
        while let Some(top) = self.stack.last() {
            if top.level < level {
                break;
            }
            if let Some(top) = self.stack.pop() {
                self.out.push_str("</");
                self.out.push_str(&top.tag);
                self.out.push_str(">\n");
            }
        }
    }

    /// Renders `lines` against `scope`, appending to the output.
    ///
    /// Tags opened here may still be open when this returns; callers close
    /// them with [`close_to_level`](Self::close_to_level) or [`finish`](Self::finish).
    pub fn render_lines(&mut self, lines: &[String], scope: &Scope<'_>) {
        let mut i = 0;

        while i < lines.len() {
            let raw = &lines[i];
            if is_blank(raw) {
                i += 1;
                continue;
            }

            let level = loader::level(raw);
            let line = trim_start(raw);
            self.close_to_level(level);

            if line.starts_with("//") {
                i += 1;
                continue;
            }

            if line == "doctype html" {
                self.out.push_str(DOCTYPE);
                i += 1;
                continue;
            }

            if let Some(text) = line.strip_prefix('|') {
                self.out.push_str(&interpolate_text(trim_start(text), scope));
                self.out.push('\n');
                i += 1;
                continue;
            }

            if let Some(path) = parse_if(line) {
                i = self.render_if(lines, i, level, path, scope);
                continue;
            }

            if line == "@else" {
                i += 1;
                continue;
            }

            if let Some((path, name)) = parse_foreach(line) {
                i = self.render_foreach(lines, i, level, path, name, scope);
                continue;
            }

            let element = parse_element(line, scope);
            self.out.push('<');
            self.out.push_str(&element.tag);
            self.out.push_str(&element.attrs);
            self.out.push('>');
            if !element.text.is_empty() {
                self.out.push_str(&interpolate_text(&element.text, scope));
            }
            self.out.push('\n');
            self.stack.push(OpenTag {
                tag: element.tag,
                level,
            });
            i += 1;
        }
    }

    /// Handles the `@if` at `lines[at]`; returns the index after its blocks.
    fn render_if(
        &mut self,
        lines: &[String],
        at: usize,
        level: usize,
        path: &str,
        scope: &Scope<'_>,
    ) -> usize {
        let true_end = block_end(lines, at + 1, level);
        let true_block = &lines[at + 1..true_end];

        let mut next = true_end;
        let mut else_block: &[String] = &[];
        if let Some(candidate) = lines.get(next) {
            if loader::level(candidate) == level && trim_start(candidate) == "@else" {
                let else_end = block_end(lines, next + 1, level);
                else_block = &lines[next + 1..else_end];
                next = else_end;
            }
        }

        let truthy = scope.lookup(path).is_some_and(Value::is_truthy);
        tracing::trace!("@if {} -> {}", path, truthy);

        let chosen = if truthy { true_block } else { else_block };
        if !chosen.is_empty() {
            self.render_lines(chosen, scope);
            self.close_to_level(level + 1);
        }
        next
    }

    /// Handles the `@foreach` at `lines[at]`; returns the index after its block.
    fn render_foreach(
        &mut self,
        lines: &[String],
        at: usize,
        level: usize,
        path: &str,
        name: &str,
        scope: &Scope<'_>,
    ) -> usize {
        let end = block_end(lines, at + 1, level);
        let block = &lines[at + 1..end];

        let items = scope
            .lookup(path)
            .and_then(Value::as_list)
            .unwrap_or_default();
        tracing::trace!("@foreach {} as {} ({} items)", path, name, items.len());

        for item in items {
            let bound = loop_binding(item);
            let child = scope.bind(name, &bound);
            self.render_lines(block, &child);
            self.close_to_level(level + 1);
        }
        end
    }
}

/// Index of the first line at or after `from` that is not deeper than `level`.
fn block_end(lines: &[String], from: usize, level: usize) -> usize {
    let mut end = from;
    while end < lines.len() && loader::level(&lines[end]) > level {
        end += 1;
    }
    end
}

/// Value bound to the loop variable for one item.
///
/// Maps and lists are bound unchanged; scalars are wrapped as `{"0": item}`.
fn loop_binding(item: &Value) -> Cow<'_, Value> {
    match item {
        Value::Map(_) | Value::List(_) => Cow::Borrowed(item),
        scalar => {
            let mut wrapped = Map::new();
            wrapped.insert("0".to_string(), scalar.clone());
            Cow::Owned(Value::Map(wrapped))
        }
    }
}

fn skip_spaces(s: &str) -> &str {
    s.trim_start_matches(is_space)
}

/// Skips at least one whitespace character.
fn require_spaces(s: &str) -> Option<&str> {
    let rest = skip_spaces(s);
    (rest.len() < s.len()).then_some(rest)
}

/// Takes an optionally `$`-prefixed name: `[A-Za-z_]` followed by
/// `[A-Za-z0-9_]`, plus `.` when `dotted` is set.
fn take_name(s: &str, dotted: bool) -> Option<(&str, &str)> {
    let s = s.strip_prefix('$').unwrap_or(s);
    let first = *s.as_bytes().first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = s
        .bytes()
        .take_while(|&b| b.is_ascii_alphanumeric() || b == b'_' || (dotted && b == b'.'))
        .count();
    Some(s.split_at(len))
}

/// Matches `@if <path>`.
fn parse_if(line: &str) -> Option<&str> {
    let rest = require_spaces(line.strip_prefix("@if")?)?;
    let (path, rest) = take_name(rest, true)?;
    skip_spaces(rest).is_empty().then_some(path)
}

/// Matches `@foreach <path> as <name>`.
fn parse_foreach(line: &str) -> Option<(&str, &str)> {
    let rest = require_spaces(line.strip_prefix("@foreach")?)?;
    let (path, rest) = take_name(rest, true)?;
    let rest = require_spaces(rest)?;
    let rest = require_spaces(rest.strip_prefix("as")?)?;
    let (name, rest) = take_name(rest, false)?;
    skip_spaces(rest).is_empty().then_some((path, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::map_from_json;
    use serde_json::json;

    fn render(source: &str, data: serde_json::Value) -> String {
        let data = map_from_json(data);
        let lines = loader::split_lines(source);
        let mut ctx = RenderContext::new();
        ctx.render_lines(&lines, &Scope::new(&data));
        ctx.finish()
    }

    #[test]
    fn test_parse_if() {
        assert_eq!(parse_if("@if user.admin"), Some("user.admin"));
        assert_eq!(parse_if("@if $user  "), Some("user"));
        assert_eq!(parse_if("@if"), None);
        assert_eq!(parse_if("@ifuser"), None);
        assert_eq!(parse_if("@if user admin"), None);
        assert_eq!(parse_if("@if 1user"), None);
        assert_eq!(parse_if("@if\x0Buser\x0B"), Some("user"));
    }

    #[test]
    fn test_parse_foreach() {
        assert_eq!(parse_foreach("@foreach recipes as r"), Some(("recipes", "r")));
        assert_eq!(
            parse_foreach("@foreach $data.rows   as  $row "),
            Some(("data.rows", "row"))
        );
        assert_eq!(parse_foreach("@foreach recipes as r.x"), None);
        assert_eq!(parse_foreach("@foreach recipes r"), None);
        assert_eq!(parse_foreach("@foreach recipes asr"), None);
        assert_eq!(parse_foreach("@foreach recipes as"), None);
    }

    #[test]
    fn test_nesting_and_end_of_input_close() {
        let html = render("html\n  body\n    p Hi", json!({}));
        assert_eq!(html, "<html>\n<body>\n<p>Hi\n</p>\n</body>\n</html>\n");
    }

    #[test]
    fn test_siblings_close_each_other() {
        let html = render("ul\n  li a\n  li b\np after", json!({}));
        assert_eq!(
            html,
            "<ul>\n<li>a\n</li>\n<li>b\n</li>\n</ul>\n<p>after\n</p>\n"
        );
    }

    #[test]
    fn test_doctype_comment_and_text_lines() {
        let html = render(
            "doctype html\n// hidden\ndiv\n  | Hello #{name}\n  |raw !{name}",
            json!({ "name": "<Ana>" }),
        );
        assert_eq!(
            html,
            "<!doctype html>\n<div>\nHello &lt;Ana&gt;\nraw <Ana>\n</div>\n"
        );
    }

    #[test]
    fn test_comment_closes_open_tags() {
        let html = render("div\n  p a\n// note\np b", json!({}));
        assert_eq!(html, "<div>\n<p>a\n</p>\n</div>\n<p>b\n</p>\n");
    }

    #[test]
    fn test_if_else() {
        let source = "@if user\n  p Hi #{user}\n@else\n  p Login";
        assert_eq!(render(source, json!({ "user": "Ana" })), "<p>Hi Ana\n</p>\n");
        assert_eq!(render(source, json!({ "user": "" })), "<p>Login\n</p>\n");
        assert_eq!(render(source, json!({})), "<p>Login\n</p>\n");
    }

    #[test]
    fn test_if_treats_nbsp_as_text_and_nul_as_blank() {
        let html = render(
            "@if nbsp\n  p nbsp\n@if nul\n  p nul",
            json!({ "nbsp": "\u{a0}", "nul": "\u{0}" }),
        );
        assert_eq!(html, "<p>nbsp\n</p>\n");
    }

    #[test]
    fn test_if_without_else_renders_nothing_when_falsy() {
        let html = render("div\n  @if flag\n    p yes\n  span end", json!({ "flag": 0 }));
        assert_eq!(html, "<div>\n<span>end\n</span>\n</div>\n");
    }

    #[test]
    fn test_if_closes_its_own_nesting() {
        let html = render(
            "div\n  @if flag\n    section\n      p deep\n  p sibling",
            json!({ "flag": true }),
        );
        assert_eq!(
            html,
            "<div>\n<section>\n<p>deep\n</p>\n</section>\n<p>sibling\n</p>\n</div>\n"
        );
    }

    #[test]
    fn test_lone_else_is_skipped() {
        assert_eq!(render("@else\n  p x", json!({})), "<p>x\n</p>\n");
    }

    #[test]
    fn test_foreach_binds_items() {
        let html = render(
            "ul\n  @foreach recipes as r\n    li\n      a(href=\"/r/#{r.slug}\") #{r.title}",
            json!({ "recipes": [
                { "slug": "tortilla", "title": "Tortilla" },
                { "slug": "paella", "title": "Paella & Co" }
            ] }),
        );
        assert_eq!(
            html,
            "<ul>\n<li>\n<a href=\"/r/tortilla\">Tortilla\n</a>\n</li>\n\
             <li>\n<a href=\"/r/paella\">Paella &amp; Co\n</a>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_foreach_over_non_list_renders_nothing() {
        let source = "@foreach items as it\n  p #{it.name}\np done";
        assert_eq!(render(source, json!({ "items": "nope" })), "<p>done\n</p>\n");
        assert_eq!(render(source, json!({ "items": { "a": 1 } })), "<p>done\n</p>\n");
        assert_eq!(render(source, json!({ "items": [] })), "<p>done\n</p>\n");
        assert_eq!(render(source, json!({})), "<p>done\n</p>\n");
    }

    #[test]
    fn test_foreach_scalar_items_are_wrapped() {
        let html = render(
            "@foreach tags as t\n  span #{t.0}|#{t}",
            json!({ "tags": ["a", 2] }),
        );
        assert_eq!(html, "<span>a|\n</span>\n<span>2|\n</span>\n");
    }

    #[test]
    fn test_loop_variable_does_not_leak() {
        let html = render(
            "@foreach items as title\n  p #{title.0}\nh1 #{title}",
            json!({ "items": ["x"], "title": "Recipes" }),
        );
        assert_eq!(html, "<p>x\n</p>\n<h1>Recipes\n</h1>\n");
    }

    #[test]
    fn test_nested_foreach_iterations_stay_separate() {
        let html = render(
            "@foreach groups as g\n  section\n    @foreach g.items as it\n      div\n        b #{it.0}",
            json!({ "groups": [ { "items": ["a", "b"] }, { "items": ["c"] } ] }),
        );
        assert_eq!(
            html,
            "<section>\n\
             <div>\n<b>a\n</b>\n</div>\n\
             <div>\n<b>b\n</b>\n</div>\n\
             </section>\n\
             <section>\n\
             <div>\n<b>c\n</b>\n</div>\n\
             </section>\n"
        );
    }

    #[test]
    fn test_blank_line_without_indent_ends_block() {
        let html = render("@if flag\n  p one\n\n  p two", json!({}));
        assert_eq!(html, "<p>two\n</p>\n");
    }

    #[test]
    fn test_malformed_directive_renders_as_element() {
        let html = render("@if not valid", json!({}));
        assert_eq!(html, "<div>@if not valid\n</div>\n");
    }

    #[test]
    fn test_close_to_level() {
        let mut ctx = RenderContext::new();
        let data = Map::new();
        ctx.render_lines(&loader::split_lines("a\n  b\n    c"), &Scope::new(&data));
        assert_eq!(ctx.stack().len(), 3);

        ctx.close_to_level(1);
        assert_eq!(
            ctx.stack(),
            &[OpenTag {
                tag: "a".to_string(),
                level: 0
            }]
        );
        assert!(ctx.output().ends_with("</c>\n</b>\n"));
        assert_eq!(ctx.finish(), "<a>\n<b>\n<c>\n</c>\n</b>\n</a>\n");
    }
}
