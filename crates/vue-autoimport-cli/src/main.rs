// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vue_autoimport_cli::commands;
use vue_autoimport_cli::config::{BuildMode, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "vue-autoimport")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Injects missing Vue composable imports into <script setup> blocks", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Path to the config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a single file and print the result
    Transform {
        /// File to transform, or - for stdin
        file: String,
        /// Module id passed to the transform (defaults to the file path)
        #[arg(long)]
        id: Option<String>,
        /// Write the source map to this path
        #[arg(long)]
        sourcemap: Option<PathBuf>,
        /// Build mode: production, diagnose
        #[arg(long, value_enum, default_value = "production")]
        mode: BuildMode,
    },
    /// Write a transformed copy of the source tree
    Build {
        /// Build mode: production, diagnose
        #[arg(long, value_enum, default_value = "production")]
        mode: BuildMode,
        /// Output directory (overrides build.out_dir)
        #[arg(short, long)]
        out_dir: Option<String>,
    },
    /// Build, then rebuild components on change (no bundler)
    Watch {
        /// Build mode: production, diagnose
        #[arg(long, value_enum, default_value = "production")]
        mode: BuildMode,
    },
    /// Write the global declaration file for auto-imported composables
    Dts {
        /// Output path (overrides build.dts)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Transform {
            file,
            id,
            sourcemap,
            mode,
        } => commands::transform::run(&cli.config, mode, &file, id, sourcemap.as_deref()).await,
        Commands::Build { mode, out_dir } => commands::build::run(&cli.config, mode, out_dir).await,
        Commands::Watch { mode } => commands::watch::run(&cli.config, mode).await,
        Commands::Dts { output } => commands::dts::run(&cli.config, output).await,
    }
}
