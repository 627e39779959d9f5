// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Loading template data from JSON files.

use anyhow::{bail, Context};
use pdpug::{map_from_json, Map};
use std::fs;
use std::path::Path;

/// Reads the JSON data file at `path`, or returns an empty map when no file
/// is given.
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid JSON, or its top-level
/// value is not an object.
pub fn load_data(path: Option<&Path>) -> anyhow::Result<Map> {
    let Some(path) = path else {
        return Ok(Map::new());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    if !json.is_object() {
        bail!("Data file {} must contain a JSON object", path.display());
    }

    tracing::debug!("Loaded data from {}", path.display());
    Ok(map_from_json(json))
}
