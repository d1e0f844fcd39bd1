// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Transform command for rewriting a single file.

use crate::config::{BuildMode, Config};
use anyhow::{bail, Context};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use vue_autoimport::{AutoImportPlugin, SourceMap, TransformPlugin};

/// Runs the transform command, printing the result to stdout.
///
/// `file` may be `-` to read from stdin, in which case `id` is required.
pub async fn run(
    config_path: &Path,
    mode: BuildMode,
    file: &str,
    id: Option<String>,
    sourcemap: Option<&Path>,
) -> anyhow::Result<()> {
    let config = Config::load_from(config_path)?;
    let plugin = AutoImportPlugin::new(config.plugin_options(mode))?;

    let (code, id) = if file == "-" {
        let Some(id) = id else {
            bail!("--id is required when reading from stdin");
        };
        let mut code = String::new();
        io::stdin().read_to_string(&mut code)?;
        (code, id)
    } else {
        let code = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?;
        (code, id.unwrap_or_else(|| file.replace('\\', "/")))
    };

    let (output, map) = transform_source(&plugin, &code, &id);
    io::stdout().write_all(output.as_bytes())?;

    if let Some(path) = sourcemap {
        match map {
            Some(map) => {
                fs::write(path, map.to_json()?)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            None => tracing::info!("{} was not rewritten, no source map written", id),
        }
    }

    Ok(())
}

/// Transforms `code`, returning the original text when the plugin declines.
pub fn transform_source(plugin: &AutoImportPlugin, code: &str, id: &str) -> (String, Option<SourceMap>) {
    match plugin.transform(code, id) {
        Some(output) => (output.code, output.map),
        None => (code.to_string(), None),
    }
}
