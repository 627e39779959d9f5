// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! `@include` expansion.
//!
//! Includes are resolved in a pass of their own before anything is rendered.
//! Each `@include "file"` line is replaced by the (recursively expanded)
//! lines of the target file, every one of them prefixed with the include
//! line's own leading whitespace. Directives inside included files are left
//! for the renderer, exactly as if they had been written inline.

use crate::error::{PdpugError, Result};
use crate::loader::{is_space, join_path, split_lines, trim_start};
use crate::resolver::ResourceResolver;
use std::path::{Path, PathBuf};

/// Deepest include nesting accepted before expansion gives up.
pub const MAX_INCLUDE_DEPTH: usize = 20;

/// Expands every `@include` directive in `lines`.
///
/// `base_dir` is the directory of the file the lines came from; `chain`
/// holds the canonical paths of the files currently being expanded, outermost
/// first. The chain is restored before returning successfully.
///
/// # Errors
///
/// - [`PdpugError::TooManyIncludes`] when called with `depth` above [`MAX_INCLUDE_DEPTH`]
/// - [`PdpugError::IncludeNotFound`] when a target does not exist
/// - [`PdpugError::IncludeCycle`] when a target is already on `chain`
/// - [`PdpugError::TemplateReadError`] when a target cannot be read
pub fn expand_includes<R: ResourceResolver + ?Sized>(
    resolver: &R,
    lines: Vec<String>,
    base_dir: &Path,
    depth: usize,
    chain: &mut Vec<PathBuf>,
) -> Result<Vec<String>> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(PdpugError::TooManyIncludes { depth });
    }

    let mut out = Vec::with_capacity(lines.len());

    for raw_line in lines {
        let trimmed = trim_start(&raw_line);
        let Some(target) = parse_include(trimmed) else {
            out.push(raw_line);
            continue;
        };

        let indent = &raw_line[..raw_line.len() - trimmed.len()];
        let include_path = join_path(base_dir, target);

        if !resolver.is_file(&include_path) {
            return Err(PdpugError::IncludeNotFound { path: include_path });
        }

        let canonical = resolver.canonicalize(&include_path);
        if chain.contains(&canonical) {
            return Err(PdpugError::IncludeCycle { path: include_path });
        }

        tracing::debug!(
            "Expanding include '{}' at depth {}",
            include_path.display(),
            depth + 1
        );

        let included = resolver
            .read_to_string(&include_path)
            .map(|source| split_lines(&source))
            .map_err(|source| PdpugError::TemplateReadError {
                path: include_path.clone(),
                source,
            })?;
        let include_dir = include_path.parent().unwrap_or(base_dir).to_path_buf();

        chain.push(canonical);
        let included = expand_includes(resolver, included, &include_dir, depth + 1, chain)?;
        chain.pop();

        out.extend(included.into_iter().map(|line| format!("{indent}{line}")));
    }

    Ok(out)
}

/// Extracts the target of an `@include "path"` or `@include 'path'` line.
///
/// `line` must already be left-trimmed. Anything after the closing quote
/// other than whitespace disqualifies the line.
fn parse_include(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("@include")?;
    let quoted = rest.trim_start_matches(is_space);
    if quoted.len() == rest.len() {
        return None;
    }

    let quote = quoted.chars().next().filter(|&c| c == '"' || c == '\'')?;
    let body = &quoted[1..];
    let end = body.find(quote)?;
    let target = &body[..end];
    let tail = &body[end + 1..];

    if target.is_empty() || !tail.chars().all(is_space) {
        return None;
    }
    Some(target)
}
