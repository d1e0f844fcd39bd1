// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Build command for writing a transformed copy of the source tree.

use crate::config::{BuildMode, Config};
use anyhow::{bail, Context};
use console::style;
use globset::{Glob, GlobSet, GlobSetBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use vue_autoimport::{Analysis, AutoImportPlugin, SkipReason};

/// What a build did, with paths relative to the source directory.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Components that received an import.
    pub transformed: Vec<PathBuf>,
    /// Components left unchanged, with the reason.
    pub skipped: Vec<(PathBuf, SkipReason)>,
    /// Other files copied verbatim.
    pub copied: Vec<PathBuf>,
    /// Source map files written, relative to the output directory.
    pub maps: Vec<PathBuf>,
    /// Declaration file written, if any.
    pub dts: Option<PathBuf>,
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The component was rewritten; carries the map path if one was written.
    Transformed(Option<PathBuf>),
    /// The component was copied unchanged.
    Skipped(SkipReason),
    /// Not a component; copied unchanged.
    Copied,
    /// The source is gone; its outputs were removed.
    Removed,
}

/// Runs the build command.
pub async fn run(config_path: &Path, mode: BuildMode, out_dir: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load_from(config_path)?;
    if let Some(out_dir) = out_dir {
        config.build.out_dir = out_dir;
    }
    let root = std::env::current_dir()?;

    println!(
        "{} {} ({:?} mode)",
        style("Building components from:").cyan(),
        config.build.src_dir,
        mode
    );

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {spinner:.green} Transforming [{bar:30.cyan/blue}] {pos}/{len}")?
            .progress_chars("━━╺"),
    );

    let start = Instant::now();
    let pb_clone = pb.clone();
    let report = build_project(&root, &config, mode, move |current, total| {
        pb_clone.set_length(total as u64);
        pb_clone.set_position(current as u64);
    })?;
    pb.finish_and_clear();
    let elapsed = start.elapsed();

    print_report(&report, mode);

    println!();
    println!(
        "{} {} {}",
        style("Build complete!").green().bold(),
        style("Finished in").dim(),
        style(format!("{}ms", elapsed.as_millis())).cyan()
    );
    Ok(())
}

/// Builds the project rooted at `root`.
///
/// Every file under `src_dir` that is not excluded lands at the same relative
/// path under `out_dir`: components rewritten where needed, everything else
/// copied. `on_progress` receives `(done, total)` after each file.
///
/// # Errors
///
/// Returns an error if the source directory is missing, the output directory
/// overlaps it, a glob pattern is invalid, or a file cannot be written.
pub fn build_project<F>(
    root: &Path,
    config: &Config,
    mode: BuildMode,
    mut on_progress: F,
) -> anyhow::Result<BuildReport>
where
    F: FnMut(usize, usize),
{
    let plugin = AutoImportPlugin::new(config.plugin_options(mode))?;
    let src_dir = root.join(&config.build.src_dir);
    let out_dir = root.join(&config.build.out_dir);

    if !src_dir.is_dir() {
        bail!("Source directory {} does not exist", src_dir.display());
    }
    if src_dir.starts_with(&out_dir) {
        bail!(
            "Output directory {} would contain the sources in {}",
            out_dir.display(),
            src_dir.display()
        );
    }

    if config.build.empty_out_dir && out_dir.exists() {
        tracing::debug!("Emptying {}", out_dir.display());
        fs::remove_dir_all(&out_dir)
            .with_context(|| format!("Failed to empty {}", out_dir.display()))?;
    }
    fs::create_dir_all(&out_dir)?;

    let exclude = build_globset(&config.build.exclude)?;
    let files = collect_sources(&src_dir, &out_dir, &exclude)?;
    tracing::debug!("Found {} file(s) in {}", files.len(), src_dir.display());

    let mut report = BuildReport::default();
    let total = files.len();
    for (i, relative) in files.into_iter().enumerate() {
        let outcome = process_file(&plugin, &src_dir, &out_dir, &relative)?;
        if mode.is_diagnose() {
            tracing::info!("{}: {:?}", relative.display(), outcome);
        }
        match outcome {
            FileOutcome::Transformed(map) => {
                report.transformed.push(relative);
                report.maps.extend(map);
            }
            FileOutcome::Skipped(reason) => report.skipped.push((relative, reason)),
            FileOutcome::Copied => report.copied.push(relative),
            FileOutcome::Removed => {}
        }
        on_progress(i + 1, total);
    }

    if let Some(dts) = &config.build.dts {
        let dts_path = root.join(dts);
        write_file(&dts_path, plugin.dts().as_bytes())?;
        report.dts = Some(dts_path);
    }

    Ok(report)
}

/// Transforms or copies one file from `src_dir` to `out_dir`.
///
/// If the source no longer exists, its outputs are removed instead.
pub fn process_file(
    plugin: &AutoImportPlugin,
    src_dir: &Path,
    out_dir: &Path,
    relative: &Path,
) -> anyhow::Result<FileOutcome> {
    if relative.is_absolute() {
        bail!("Expected a path relative to {}, got {}", src_dir.display(), relative.display());
    }
    let source_path = src_dir.join(relative);
    let dest_path = out_dir.join(relative);
    let map_path = map_path_for(&dest_path);
    let id = relative.to_string_lossy().replace('\\', "/");

    if !source_path.exists() {
        remove_if_exists(&dest_path)?;
        remove_if_exists(&map_path)?;
        return Ok(FileOutcome::Removed);
    }

    if !plugin.is_component(&id) {
        copy_file(&source_path, &dest_path)?;
        return Ok(FileOutcome::Copied);
    }

    let code = match fs::read_to_string(&source_path) {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("Copying {} unchanged: {}", source_path.display(), e);
            copy_file(&source_path, &dest_path)?;
            return Ok(FileOutcome::Copied);
        }
    };

    match plugin.analyze(&code, &id) {
        Analysis::Import(plan) => {
            let output = plugin.apply(&code, &id, &plan);
            write_file(&dest_path, output.code.as_bytes())?;
            let written_map = match output.map {
                Some(map) => {
                    write_file(&map_path, map.to_json()?.as_bytes())?;
                    Some(map_path.strip_prefix(out_dir).unwrap_or(&map_path).to_path_buf())
                }
                None => {
                    remove_if_exists(&map_path)?;
                    None
                }
            };
            Ok(FileOutcome::Transformed(written_map))
        }
        Analysis::Skip(reason) => {
            remove_if_exists(&map_path)?;
            write_file(&dest_path, code.as_bytes())?;
            Ok(FileOutcome::Skipped(reason))
        }
    }
}

/// `App.vue` -> `App.vue.map`
pub fn map_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".map");
    PathBuf::from(name)
}

/// Compiles the `build.exclude` patterns.
pub fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("Invalid exclude pattern {:?}", pattern))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn collect_sources(src_dir: &Path, out_dir: &Path, exclude: &GlobSet) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = format!("{}/**/*", glob::Pattern::escape(&src_dir.to_string_lossy()));
    let mut files = Vec::new();

    for path in glob::glob(&pattern)?.flatten() {
        if !path.is_file() || path.starts_with(out_dir) {
            continue;
        }
        let relative = path.strip_prefix(src_dir)?.to_path_buf();
        if exclude.is_match(&relative) {
            tracing::debug!("Excluded {}", relative.display());
            continue;
        }
        files.push(relative);
    }

    files.sort();
    Ok(files)
}

fn write_file(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

fn copy_file(from: &Path, to: &Path) -> anyhow::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to).with_context(|| format!("Failed to copy {}", from.display()))?;
    Ok(())
}

fn remove_if_exists(path: &Path) -> anyhow::Result<()> {
    if path.is_file() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

fn print_report(report: &BuildReport, mode: BuildMode) {
    println!(
        "{} {} component(s)",
        style("Rewrote").green(),
        report.transformed.len()
    );
    if mode.is_diagnose() {
        for path in &report.transformed {
            println!("    {} {}", style("+").green(), path.display());
        }
    }

    println!(
        "{} {} component(s) unchanged",
        style("Left").green(),
        report.skipped.len()
    );
    if mode.is_diagnose() {
        for (path, reason) in &report.skipped {
            println!("    {} {} ({})", style("-").dim(), path.display(), reason);
        }
    }

    println!("{} {} other file(s)", style("Copied").green(), report.copied.len());

    if !report.maps.is_empty() {
        println!("{} {} source map(s)", style("Wrote").green(), report.maps.len());
    }
    if let Some(dts) = &report.dts {
        println!("{} {}", style("Wrote declarations to:").cyan(), dts.display());
    }
}
