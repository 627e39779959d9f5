// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! File watcher command for rebuilding on template changes.

use crate::commands::build::{build_and_report, BuildOptions};
use crate::config::Config;
use crate::watcher::FileWatcher;
use console::style;
use std::path::{Path, PathBuf};

/// Builds once, then rebuilds whenever a template or the data file changes.
///
/// A failing build is reported and watching continues.
pub fn run(data: Option<PathBuf>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let options = BuildOptions::from_config(&config, Path::new("."), data, output);

    rebuild(&options);

    let watcher = FileWatcher::new(
        &options.templates_dir,
        &options.extension,
        options.data.as_deref(),
    )?;

    println!(
        "Watching for changes in: {}",
        options.templates_dir.display()
    );
    println!("Press Ctrl+C to stop...");
    println!();

    while let Some(paths) = watcher.recv() {
        let files = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  File changed: {} - rebuild triggered", files);
        rebuild(&options);
    }

    println!("\nStopping file watcher...");
    Ok(())
}

fn rebuild(options: &BuildOptions) {
    if let Err(err) = build_and_report(options) {
        eprintln!("{} {:#}", style("Build failed:").red().bold(), err);
    }
}
