// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Render command for a single template.

use crate::config::Config;
use crate::data::load_data;
use anyhow::Context;
use pdpug::Engine;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renders `template` with data from `data` (or `render.data` in the
/// configuration) and writes the HTML to `output` or stdout.
pub fn run(template: &Path, data: Option<PathBuf>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let data_file = config.data_file(data);
    let html = render_file(template, data_file.as_deref())?;

    match output {
        Some(output) => write_output(&output, &html),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Renders one template from disk with an optional JSON data file.
pub fn render_file(template: &Path, data: Option<&Path>) -> anyhow::Result<String> {
    let data = load_data(data)?;
    Engine::filesystem()
        .render(template, &data)
        .with_context(|| format!("Failed to render {}", template.display()))
}

/// Writes `html` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, html: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
