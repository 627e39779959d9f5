// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Element line parsing.
//!
//! An element line has the shape
//!
//! ```text
//! tag#id.class1.class2(attr="v", attr2=v2, bool_attr) trailing text
//! ```
//!
//! where every part is optional. The tag defaults to `div`. The scanner
//! never fails: anything it cannot make sense of is either dropped or ends
//! up in the trailing text.

use crate::interpolate::{escape_html, interpolate_attr};
use crate::loader::{is_space, trim};
use crate::scope::Scope;

/// A parsed element line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Rendered attributes, each preceded by a space; empty if there are none.
    pub attrs: String,
    /// Trailing inline text, trimmed and not yet interpolated.
    pub text: String,
}

/// Parses a left-trimmed element line.
///
/// `id` and `class` from the shorthand selectors come first, followed by
/// the parenthesized attributes in source order. Attribute values are
/// interpolated against `scope` and escaped.
pub fn parse_element(line: &str, scope: &Scope<'_>) -> Element {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    let mut tag = "div";
    if bytes.first().is_some_and(u8::is_ascii_alphabetic) {
        i = ident_end(bytes, 0);
        tag = &line[..i];
    }

    let mut id = "";
    let mut classes = Vec::new();
    while i < len {
        match bytes[i] {
            b'#' => {
                let end = ident_end(bytes, i + 1);
                id = &line[i + 1..end];
                i = end;
            }
            b'.' => {
                let end = ident_end(bytes, i + 1);
                if end > i + 1 {
                    classes.push(&line[i + 1..end]);
                }
                i = end;
            }
            _ => break,
        }
    }

    let mut attrs_raw = "";
    if i < len && bytes[i] == b'(' {
        let start = i;
        let mut depth = 0usize;
        let mut close = None;
        while i < len {
            match bytes[i] {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        i += 1;
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        attrs_raw = match close {
            Some(close) => &line[start + 1..close],
            // unbalanced: the last character of the line is not captured
            None => drop_last_char(&line[start + 1..]),
        };
    }

    let text = trim(&line[i..]).to_string();

    let mut attrs = Vec::new();
    if !id.is_empty() {
        attrs.push(format!("id=\"{}\"", escape_html(id)));
    }
    if !classes.is_empty() {
        attrs.push(format!("class=\"{}\"", escape_html(&classes.join(" "))));
    }
    let attrs_raw = trim(attrs_raw);
    if !attrs_raw.is_empty() {
        attrs.extend(
            split_attributes(attrs_raw)
                .into_iter()
                .filter_map(|token| render_attribute(token, scope)),
        );
    }

    let attrs = if attrs.is_empty() {
        String::new()
    } else {
        format!(" {}", attrs.join(" "))
    };

    Element {
        tag: tag.to_string(),
        attrs,
        text,
    }
}

/// Renders one attribute token, or `None` if it has no usable name.
fn render_attribute(token: &str, scope: &Scope<'_>) -> Option<String> {
    let token = trim(token);
    if token.is_empty() {
        return None;
    }

    match token.split_once('=') {
        None => {
            let key = sanitize_name(token);
            (!key.is_empty()).then_some(key)
        }
        Some((key, value)) => {
            let key = sanitize_name(trim(key));
            if key.is_empty() {
                return None;
            }
            let value = unquote(trim(value));
            let value = escape_html(&interpolate_attr(value, scope));
            Some(format!("{key}=\"{value}\""))
        }
    }
}

/// Splits the text between parentheses into attribute tokens.
///
/// Tokens are separated by a comma (with any surrounding whitespace) or by
/// a whitespace run that is directly followed by `name=`. Quotes are not
/// special, so a comma inside a quoted value still splits.
pub fn split_attributes(raw: &str) -> Vec<&str> {
    let bytes = raw.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b',' && !is_space(char::from(bytes[i])) {
            i += 1;
            continue;
        }

        let ws_end = i + count_spaces(&bytes[i..]);
        if bytes.get(ws_end) == Some(&b',') {
            let next = ws_end + 1 + count_spaces(&bytes[ws_end + 1..]);
            parts.push(&raw[start..i]);
            start = next;
            i = next;
        } else if starts_assignment(&bytes[ws_end..]) {
            parts.push(&raw[start..i]);
            start = ws_end;
            i = ws_end;
        } else {
            i = ws_end;
        }
    }

    parts.push(&raw[start..]);
    parts
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn ident_end(bytes: &[u8], from: usize) -> usize {
    from + bytes[from..].iter().take_while(|&&b| is_ident_byte(b)).count()
}

fn count_spaces(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| is_space(char::from(b))).count()
}

/// Matches `[A-Za-z0-9_-]+\s*=` at the start of `bytes`.
fn starts_assignment(bytes: &[u8]) -> bool {
    let name_len = ident_end(bytes, 0);
    if name_len == 0 {
        return false;
    }
    let rest = &bytes[name_len..];
    rest.get(count_spaces(rest)) == Some(&b'=')
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Strips one matching pair of `"` or `'` around a value.
fn unquote(value: &str) -> &str {
    let quoted = (value.starts_with('"') && value.ends_with('"'))
        || (value.starts_with('\'') && value.ends_with('\''));
    if !quoted {
        return value;
    }
    if value.len() < 2 {
        return "";
    }
    &value[1..value.len() - 1]
}

fn drop_last_char(s: &str) -> &str {
    match s.char_indices().next_back() {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{map_from_json, Map};
    use serde_json::json;

    fn parse(line: &str) -> Element {
        let data = Map::new();
        parse_element(line, &Scope::new(&data))
    }

    fn parse_with(line: &str, value: serde_json::Value) -> Element {
        let data = map_from_json(value);
        parse_element(line, &Scope::new(&data))
    }

    #[test]
    fn test_full_element() {
        let el = parse(r#"div#a.b.c(x="1") hi"#);
        assert_eq!(el.tag, "div");
        assert_eq!(el.attrs, r#" id="a" class="b c" x="1""#);
        assert_eq!(el.text, "hi");
    }

    #[test]
    fn test_tag_defaults_to_div() {
        assert_eq!(parse(".card").tag, "div");
        assert_eq!(parse(".card").attrs, r#" class="card""#);
        assert_eq!(parse("#main").attrs, r#" id="main""#);
        assert_eq!(parse("h1-title_x Hello").tag, "h1-title_x");
        assert_eq!(parse("(role=\"x\")").tag, "div");
    }

    #[test]
    fn test_plain_tag_and_text() {
        let el = parse("p   Some text here  ");
        assert_eq!(el.tag, "p");
        assert_eq!(el.attrs, "");
        assert_eq!(el.text, "Some text here");
    }

    #[test]
    fn test_id_last_wins_and_classes_keep_duplicates() {
        let el = parse("li#one.a#two.a.b");
        assert_eq!(el.attrs, r#" id="two" class="a a b""#);
    }

    #[test]
    fn test_empty_selectors() {
        assert_eq!(parse("div#.x").attrs, r#" class="x""#);
        assert_eq!(parse("div..x").attrs, r#" class="x""#);
        assert_eq!(parse("div#a#").attrs, "");
    }

    #[test]
    fn test_shorthand_precedes_parenthesized_attrs() {
        let el = parse(r#"a.btn(href="/x", title='Go') Go"#);
        assert_eq!(el.attrs, r#" class="btn" href="/x" title="Go""#);
    }

    #[test]
    fn test_space_separated_and_boolean_attrs() {
        let el = parse(r#"input(type="checkbox", name=done, checked)"#);
        assert_eq!(el.tag, "input");
        assert_eq!(el.attrs, r#" type="checkbox" name="done" checked"#);
        assert_eq!(el.text, "");

        let el = parse(r#"input(type="text" name="q")"#);
        assert_eq!(el.attrs, r#" type="text" name="q""#);
    }

    #[test]
    fn test_attribute_values_are_interpolated_and_escaped() {
        let el = parse_with(
            r#"a(href="/receta?r=#{recipe.slug}&x=1", title="!{recipe.title}") Ver"#,
            json!({ "recipe": { "slug": "tortilla", "title": "Tom & \"Jerry\"" } }),
        );
        assert_eq!(
            el.attrs,
            r#" href="/receta?r=tortilla&amp;x=1" title="Tom &amp; &quot;Jerry&quot;""#
        );
    }

    #[test]
    fn test_nested_parentheses() {
        let el = parse(r#"button(onclick="go(1)") Click"#);
        assert_eq!(el.attrs, r#" onclick="go(1)""#);
        assert_eq!(el.text, "Click");
    }

    #[test]
    fn test_unbalanced_parentheses_drop_last_char() {
        let el = parse(r#"a(href="/x""#);
        assert_eq!(el.attrs, r#" href="&quot;/x""#);
        assert_eq!(el.text, "");

        let el = parse("div(");
        assert_eq!(el.attrs, "");
    }

    #[test]
    fn test_malformed_tokens_are_dropped() {
        let el = parse(r#"div(="x", ***, ok)"#);
        assert_eq!(el.attrs, " ok");
    }

    #[test]
    fn test_attribute_names_are_sanitized() {
        let el = parse(r#"div(data-x!="1", @click)"#);
        assert_eq!(el.attrs, r#" data-x="1" click"#);
    }

    #[test]
    fn test_lone_quote_value_becomes_empty() {
        assert_eq!(parse(r#"div(x=")"#).attrs, r#" x="""#);
    }

    #[test]
    fn test_split_attributes() {
        assert_eq!(split_attributes("a=1, b=2"), vec!["a=1", "b=2"]);
        assert_eq!(split_attributes("a=1 ,b=2"), vec!["a=1", "b=2"]);
        assert_eq!(split_attributes("a=1 b = 2"), vec!["a=1", "b = 2"]);
        assert_eq!(split_attributes(r#"t="x y" z=1"#), vec![r#"t="x y""#, "z=1"]);
        assert_eq!(split_attributes(r#"t="x, y""#), vec![r#"t="x"#, r#"y""#]);
        assert_eq!(split_attributes("checked disabled"), vec!["checked disabled"]);
        assert_eq!(split_attributes("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_line_starting_with_non_letter() {
        let el = parse("@if broken syntax here");
        assert_eq!(el.tag, "div");
        assert_eq!(el.text, "@if broken syntax here");
    }
}
