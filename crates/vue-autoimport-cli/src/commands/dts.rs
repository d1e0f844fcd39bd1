// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Declaration file command.

use crate::config::{Config, DEFAULT_DTS_FILE};
use anyhow::Context;
use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use vue_autoimport::generate_dts;

/// Writes the global declaration file for the configured composables.
///
/// The path is taken from `output`, then `build.dts`, then `auto-imports.d.ts`.
pub async fn run(config_path: &Path, output: Option<String>) -> anyhow::Result<()> {
    let config = Config::load_from(config_path)?;
    let path = write_dts(&config, output.as_deref())?;
    println!("{} {}", style("Wrote declarations to:").cyan(), path.display());
    Ok(())
}

/// Writes the declaration file and returns its path.
pub fn write_dts(config: &Config, output: Option<&str>) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(
        output
            .or(config.build.dts.as_deref())
            .unwrap_or(DEFAULT_DTS_FILE),
    );
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let dts = generate_dts(&config.transform.module, &config.transform.composables);
    fs::write(&path, dts).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
