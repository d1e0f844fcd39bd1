// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! File system watching for incremental rebuilds.
//!
//! This module provides `FileWatcher` for monitoring component changes.
//!
//! # Features
//!
//! - Debounced file change events (750ms)
//! - Filters for configured component suffixes (`.vue` by default)
//! - Recursive directory watching

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebouncedEvent, Debouncer, RecommendedCache};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(750);

/// Watches a source tree for changes to component files.
///
/// Stops watching when dropped.
pub struct FileWatcher {
    _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
}

impl FileWatcher {
    /// Starts watching `path` recursively.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory to watch
    /// * `extensions` - File name suffixes that trigger the callback
    /// * `on_change` - Invoked with the changed paths, relative to `path`
    pub fn new<F>(path: &Path, extensions: Vec<String>, on_change: F) -> anyhow::Result<Self>
    where
        F: Fn(Vec<PathBuf>) + Send + 'static,
    {
        let mut bases = vec![path.to_path_buf()];
        if let Ok(canonical) = path.canonicalize() {
            if canonical != path {
                bases.push(canonical);
            }
        }

        let mut debouncer = new_debouncer(
            DEBOUNCE,
            None,
            move |result: Result<Vec<DebouncedEvent>, Vec<notify::Error>>| match result {
                Ok(events) => {
                    let mut changed_paths: Vec<PathBuf> = events
                        .iter()
                        .flat_map(|e| e.paths.iter())
                        .filter(|p| matches_extension(p, &extensions))
                        .filter_map(|p| relative_to(&bases, p))
                        .collect();
                    changed_paths.sort();
                    changed_paths.dedup();

                    if !changed_paths.is_empty() {
                        on_change(changed_paths);
                    }
                }
                Err(errors) => {
                    for error in errors {
                        tracing::warn!("Watch error: {}", error);
                    }
                }
            },
        )?;

        debouncer.watch(path, RecursiveMode::Recursive)?;

        Ok(Self {
            _debouncer: debouncer,
        })
    }
}

/// Strips the first matching base from `path`.
///
/// Returns `None` for paths outside every base.
pub fn relative_to(bases: &[PathBuf], path: &Path) -> Option<PathBuf> {
    let relative = bases.iter().find_map(|base| path.strip_prefix(base).ok());
    if relative.is_none() {
        tracing::debug!("Ignoring change outside the watched tree: {}", path.display());
    }
    relative.map(Path::to_path_buf)
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|ext| !ext.is_empty() && name.ends_with(ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_extension() {
        let extensions = vec![".vue".to_string()];
        assert!(matches_extension(Path::new("src/App.vue"), &extensions));
        assert!(!matches_extension(Path::new("src/App.vue.swp"), &extensions));
        assert!(!matches_extension(Path::new("src/main.ts"), &extensions));
        assert!(!matches_extension(Path::new("src/"), &[String::new()]));
    }

    #[test]
    fn test_relative_to_drops_foreign_paths() {
        let bases = vec![PathBuf::from("/work/app/src"), PathBuf::from("/private/work/app/src")];
        assert_eq!(
            relative_to(&bases, Path::new("/work/app/src/components/A.vue")),
            Some(PathBuf::from("components/A.vue"))
        );
        assert_eq!(
            relative_to(&bases, Path::new("/private/work/app/src/A.vue")),
            Some(PathBuf::from("A.vue"))
        );
        assert_eq!(relative_to(&bases, Path::new("/elsewhere/A.vue")), None);
    }
}
