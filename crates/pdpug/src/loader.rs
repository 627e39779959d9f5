// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Template loading and line helpers.
//!
//! Templates are handled as ordered lists of raw lines. Leading whitespace
//! is kept verbatim because it carries the nesting structure.

use crate::error::{PdpugError, Result};
use crate::resolver::ResourceResolver;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Number of leading spaces that make up one nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Characters stripped when a line is left-trimmed or tested for blankness.
const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Loads a template file as a list of lines.
///
/// Line terminators (`\n` or `\r\n`) are removed; leading whitespace is
/// preserved.
///
/// # Errors
///
/// - [`PdpugError::TemplateNotFound`] if `path` is not a file
/// - [`PdpugError::TemplateReadError`] if reading fails afterwards
pub fn load_lines<R: ResourceResolver + ?Sized>(resolver: &R, path: &Path) -> Result<Vec<String>> {
    if !resolver.is_file(path) {
        return Err(PdpugError::TemplateNotFound {
            path: path.to_path_buf(),
        });
    }

    let source = resolver
        .read_to_string(path)
        .map_err(|source| PdpugError::TemplateReadError {
            path: path.to_path_buf(),
            source,
        })?;

    let lines = split_lines(&source);
    tracing::debug!("Loaded template '{}' ({} lines)", path.display(), lines.len());
    Ok(lines)
}

/// Splits template source into lines without terminators.
pub fn split_lines(source: &str) -> Vec<String> {
    source.lines().map(str::to_string).collect()
}

/// Nesting level of a raw line: leading spaces divided by [`INDENT_WIDTH`].
///
/// Only the space character counts; a tab ends the indentation run.
pub fn level(raw_line: &str) -> usize {
    let spaces = raw_line.bytes().take_while(|&b| b == b' ').count();
    spaces / INDENT_WIDTH
}

/// Matches the `\s` class used by directive and attribute syntax.
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Strips leading whitespace.
pub(crate) fn trim_start(line: &str) -> &str {
    line.trim_start_matches(WHITESPACE)
}

/// Strips whitespace from both ends.
pub(crate) fn trim(line: &str) -> &str {
    line.trim_matches(WHITESPACE)
}

/// Returns `true` if the line holds nothing but whitespace.
pub(crate) fn is_blank(line: &str) -> bool {
    trim(line).is_empty()
}

/// Joins an include target onto the including file's directory.
///
/// Targets starting with `/`, `\` or a drive prefix such as `C:\` are
/// returned unchanged. Otherwise both separator styles in `rel` are
/// converted to the platform separator.
pub fn join_path(base_dir: &Path, rel: &str) -> PathBuf {
    if is_absolute(rel) {
        return PathBuf::from(rel);
    }

    let base_str = base_dir.to_string_lossy();
    let base: &str = if base_str.is_empty() { "." } else { &base_str };
    let base = base.trim_end_matches(&['/', '\\'][..]);
    let rel: String = rel
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();

    PathBuf::from(format!("{}{}{}", base, MAIN_SEPARATOR, rel))
}

fn is_absolute(rel: &str) -> bool {
    let bytes = rel.as_bytes();
    match bytes {
        [b'/', ..] | [b'\\', ..] => true,
        [drive, b':', b'\\', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}
