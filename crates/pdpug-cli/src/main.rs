// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use pdpug_cli::commands;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdpug")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Indentation-based HTML templating CLI", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single template to stdout or a file
    Render {
        /// Template file to render
        template: PathBuf,
        /// JSON data file (overrides `render.data` in pdpug.toml)
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Write the HTML to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a template with all includes spliced in
    Expand {
        /// Template file to expand
        template: PathBuf,
    },
    /// Render every page template into the output directory
    Build {
        /// JSON data file (overrides `render.data` in pdpug.toml)
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Output directory (overrides `render.output_dir` in pdpug.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build, then rebuild whenever templates or data change
    Watch {
        /// JSON data file (overrides `render.data` in pdpug.toml)
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Output directory (overrides `render.output_dir` in pdpug.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render {
            template,
            data,
            output,
        } => commands::render::run(&template, data, output),
        Commands::Expand { template } => commands::expand::run(&template),
        Commands::Build { data, output } => commands::build::run(data, output),
        Commands::Watch { data, output } => commands::watch::run(data, output),
    }
}
