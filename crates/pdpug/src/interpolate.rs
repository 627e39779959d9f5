// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Variable interpolation.
//!
//! Two markers are recognised, both taking a dotted path with no spaces:
//!
//! - `#{path}`: the value is HTML-escaped
//! - `!{path}`: the value is inserted verbatim
//!
//! Inside attribute values both markers insert the raw value, because the
//! caller escapes the finished attribute string as a whole.

use crate::scope::Scope;

/// Interpolates element text and `|` lines.
///
/// Raw markers are replaced first and escaped markers second, over the
/// whole string each time.
pub fn interpolate_text(text: &str, scope: &Scope<'_>) -> String {
    let text = replace_markers(text, &['!'], |path| scope.get_text(path));
    replace_markers(&text, &['#'], |path| escape_html(&scope.get_text(path)))
}

/// Interpolates an attribute value; `#{}` and `!{}` both insert raw text.
pub fn interpolate_attr(text: &str, scope: &Scope<'_>) -> String {
    replace_markers(text, &['#', '!'], |path| scope.get_text(path))
}

/// Escapes `&`, `<`, `>`, `"` and `'` for use in HTML text or attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replaces every `<sigil>{path}` marker in `text` with `resolve(path)`.
///
/// Scanning is left to right and non-overlapping. A sigil that does not
/// start a well-formed marker is copied through unchanged.
fn replace_markers<F>(text: &str, sigils: &[char], mut resolve: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(sigils) {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match parse_marker(candidate) {
            Some((path, len)) => {
                out.push_str(&resolve(path));
                rest = &candidate[len..];
            }
            None => {
                // sigils are ASCII
                out.push_str(&candidate[..1]);
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parses `<sigil>{path}` at the start of `s`, returning the path and the
/// byte length of the whole marker.
fn parse_marker(s: &str) -> Option<(&str, usize)> {
    let body = s.get(1..)?.strip_prefix('{')?;
    let bytes = body.as_bytes();

    let first = *bytes.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }

    let len = bytes
        .iter()
        .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
        .count();
    if bytes.get(len) != Some(&b'}') {
        return None;
    }

    Some((&body[..len], len + 3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::map_from_json as data;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain ñ"), "plain ñ");
    }

    #[test]
    fn test_escaped_and_raw_markers() {
        let data = data(json!({ "html": "<b>\"hi\" & 'bye'</b>" }));
        let scope = Scope::new(&data);

        assert_eq!(
            interpolate_text("#{html}", &scope),
            "&lt;b&gt;&quot;hi&quot; &amp; &#039;bye&#039;&lt;/b&gt;"
        );
        assert_eq!(interpolate_text("!{html}", &scope), "<b>\"hi\" & 'bye'</b>");
    }

    #[test]
    fn test_dotted_paths_and_missing_values() {
        let data = data(json!({ "user": { "name": "Ana", "age": 31 } }));
        let scope = Scope::new(&data);

        assert_eq!(
            interpolate_text("#{user.name} (#{user.age}) #{user.email}.", &scope),
            "Ana (31) ."
        );
    }

    #[test]
    fn test_malformed_markers_are_literal() {
        let data = data(json!({ "a": "A" }));
        let scope = Scope::new(&data);

        assert_eq!(interpolate_text("#{ a }", &scope), "#{ a }");
        assert_eq!(interpolate_text("#{1a}", &scope), "#{1a}");
        assert_eq!(interpolate_text("#{a", &scope), "#{a");
        assert_eq!(interpolate_text("# {a}", &scope), "# {a}");
        assert_eq!(interpolate_text("##{a}!", &scope), "#A!");
        assert_eq!(interpolate_text("!!{a}#", &scope), "!A#");
    }

    #[test]
    fn test_raw_pass_runs_before_escaped_pass() {
        let data = data(json!({ "tpl": "#{name}", "name": "<Ana>" }));
        let scope = Scope::new(&data);

        assert_eq!(interpolate_text("!{tpl}", &scope), "&lt;Ana&gt;");
    }

    #[test]
    fn test_attribute_mode_never_escapes() {
        let data = data(json!({ "q": "a&b", "slug": "<x>" }));
        let scope = Scope::new(&data);

        assert_eq!(interpolate_attr("/search?q=#{q}&s=!{slug}", &scope), "/search?q=a&b&s=<x>");
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        let data = data(json!({ "plato": "paella" }));
        let scope = Scope::new(&data);

        assert_eq!(interpolate_text("¡Receta: #{plato}! ñ", &scope), "¡Receta: paella! ñ");
    }
}
