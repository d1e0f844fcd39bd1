// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Watch command: build once, then rebuild components as they change.

use crate::commands::build::{build_globset, build_project, process_file, FileOutcome};
use crate::config::{BuildMode, Config};
use crate::watcher::FileWatcher;
use console::style;
use globset::GlobSet;
use std::path::{Path, PathBuf};
use tokio::signal;
use vue_autoimport::AutoImportPlugin;

/// Runs the watcher until Ctrl+C.
pub async fn run(config_path: &Path, mode: BuildMode) -> anyhow::Result<()> {
    let config = Config::load_from(config_path)?;
    let root = std::env::current_dir()?;

    let report = build_project(&root, &config, mode, |_, _| {})?;
    println!(
        "{} {} component(s), {} unchanged, {} other file(s)",
        style("Initial build:").green(),
        report.transformed.len(),
        report.skipped.len(),
        report.copied.len()
    );

    let plugin = AutoImportPlugin::new(config.plugin_options(mode))?;
    let src_dir = root.join(&config.build.src_dir);
    let out_dir = root.join(&config.build.out_dir);
    let extensions = config.transform.extensions.clone();
    let exclude = build_globset(&config.build.exclude)?;

    println!("Watching for changes in: {}", config.build.src_dir);
    println!("Press Ctrl+C to stop...");
    println!();

    let watch_dir = src_dir.clone();
    let _watcher = FileWatcher::new(&watch_dir, extensions, move |paths: Vec<PathBuf>| {
        for relative in rebuild_targets(paths, &exclude) {
            match process_file(&plugin, &src_dir, &out_dir, &relative) {
                Ok(FileOutcome::Transformed(_)) => {
                    println!("  {} {}", style("rewrote").green(), relative.display())
                }
                Ok(FileOutcome::Skipped(reason)) => {
                    println!("  {} {} ({})", style("unchanged").dim(), relative.display(), reason)
                }
                Ok(FileOutcome::Copied) => {
                    println!("  {} {}", style("copied").dim(), relative.display())
                }
                Ok(FileOutcome::Removed) => {
                    println!("  {} {}", style("removed").yellow(), relative.display())
                }
                Err(e) => tracing::error!("Failed to rebuild {}: {:#}", relative.display(), e),
            }
        }
    })?;

    // Wait for Ctrl+C
    signal::ctrl_c().await?;

    println!("\nStopping file watcher...");
    Ok(())
}

/// Keeps the changed paths a build would have picked up.
///
/// Drops absolute paths and anything matching `build.exclude`.
pub fn rebuild_targets(paths: Vec<PathBuf>, exclude: &GlobSet) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|path| {
            if path.is_absolute() {
                tracing::warn!("Ignoring absolute path {}", path.display());
                return false;
            }
            if exclude.is_match(path) {
                tracing::debug!("Excluded {}", path.display());
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_targets_applies_exclude() {
        let exclude = build_globset(&["**/node_modules/**".to_string()]).unwrap();
        let paths = vec![
            PathBuf::from("components/A.vue"),
            PathBuf::from("node_modules/lib/Dep.vue"),
            PathBuf::from("/work/app/src/B.vue"),
        ];
        assert_eq!(rebuild_targets(paths, &exclude), vec![PathBuf::from("components/A.vue")]);
    }
}
