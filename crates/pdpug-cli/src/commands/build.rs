// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Build command for rendering a template directory into static HTML.

use crate::config::Config;
use crate::data::load_data;
use anyhow::Context;
use console::style;
use pdpug::{Engine, ResourceResolver};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

/// Settings for one build, resolved from `pdpug.toml` and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Directory scanned for templates.
    pub templates_dir: PathBuf,
    /// Directory the HTML files are written into.
    pub output_dir: PathBuf,
    /// JSON data file shared by every page.
    pub data: Option<PathBuf>,
    /// Template file extension, without the dot.
    pub extension: String,
}

impl BuildOptions {
    /// Resolves options relative to `root`; flags take precedence over `config`.
    pub fn from_config(
        config: &Config,
        root: &Path,
        data: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Self {
        let output_dir = output.unwrap_or_else(|| PathBuf::from(&config.render.output_dir));
        Self {
            templates_dir: root.join(&config.render.templates_dir),
            output_dir: root.join(output_dir),
            data: config.data_file(data).map(|path| root.join(path)),
            extension: config.render.extension.clone(),
        }
    }
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
    /// Template path relative to the templates directory.
    pub template: PathBuf,
    /// Written HTML file.
    pub output: PathBuf,
}

/// Outcome of a successful build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages written, in template path order.
    pub pages: Vec<BuiltPage>,
    /// Partials (file names starting with `_`) that were skipped.
    pub partials: usize,
}

/// Returns `true` for partial templates, which are only ever included.
pub fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('_'))
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Renders every page template under `options.templates_dir`.
///
/// Output mirrors the template layout: `views/blog/post.pdpug` becomes
/// `dist/blog/post.html`. The first failing template aborts the build.
pub fn build_site<R: ResourceResolver>(
    engine: &Engine<R>,
    options: &BuildOptions,
) -> anyhow::Result<BuildReport> {
    let data = load_data(options.data.as_deref())?;

    let pattern = format!(
        "{}/**/*.{}",
        glob::Pattern::escape(&options.templates_dir.to_string_lossy()),
        options.extension
    );

    // glob drops leading `./` from the paths it yields
    let templates_dir = without_cur_dir(&options.templates_dir);
    let mut report = BuildReport::default();

    for path in glob::glob(&pattern)?.flatten() {
        if is_partial(&path) {
            report.partials += 1;
            continue;
        }

        let relative = path
            .strip_prefix(&templates_dir)
            .or_else(|_| path.strip_prefix(&options.templates_dir))?
            .to_path_buf();
        let output = options.output_dir.join(&relative).with_extension("html");

        let html = engine
            .render(&path, &data)
            .with_context(|| format!("Failed to render {}", relative.display()))?;

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&output, html)
            .with_context(|| format!("Failed to write {}", output.display()))?;

        tracing::debug!("Rendered {} -> {}", relative.display(), output.display());
        report.pages.push(BuiltPage {
            template: relative,
            output,
        });
    }

    Ok(report)
}

/// Runs the build command and prints a summary.
pub fn run(data: Option<PathBuf>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let options = BuildOptions::from_config(&config, Path::new("."), data, output);
    build_and_report(&options)
}

/// Builds once and prints the styled summary; shared with `watch`.
pub(crate) fn build_and_report(options: &BuildOptions) -> anyhow::Result<()> {
    println!(
        "{} {}",
        style("Building templates from:").cyan(),
        options.templates_dir.display()
    );

    let start = Instant::now();
    let report = build_site(&Engine::filesystem(), options)?;
    let elapsed = start.elapsed();

    if report.pages.is_empty() {
        println!("No templates found in {}", options.templates_dir.display());
        return Ok(());
    }

    for page in &report.pages {
        println!(
            "  {} {} -> {}",
            style("✓").green(),
            page.template.display(),
            page.output.display()
        );
    }

    println!(
        "{} {} page(s) in {:.2?} ({} partial(s) skipped)",
        style("Built").green().bold(),
        report.pages.len(),
        elapsed,
        report.partials
    );
    Ok(())
}
