// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Expand command: prints a template after include splicing.

use anyhow::Context;
use pdpug::Engine;
use std::path::Path;

/// Prints the include-expanded source of `template`.
pub fn run(template: &Path) -> anyhow::Result<()> {
    println!("{}", expand_file(template)?);
    Ok(())
}

/// Returns the include-expanded source of `template`, one line per line.
pub fn expand_file(template: &Path) -> anyhow::Result<String> {
    let lines = Engine::filesystem()
        .expand(template)
        .with_context(|| format!("Failed to expand {}", template.display()))?;
    Ok(lines.join("\n"))
}
