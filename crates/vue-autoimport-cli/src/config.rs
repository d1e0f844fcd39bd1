// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project configuration.
//!
//! Configuration is loaded from `autoimport.toml` at the project root. Every
//! key is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! [transform]
//! module = "vue"
//! composables = ["ref", "reactive", "watch", "computed", "onMounted", "onUnmounted", "onBeforeMount"]
//! extensions = [".vue"]
//!
//! [transform.sourcemap]
//! hires = true
//!
//! [build]
//! src_dir = "src"
//! out_dir = "dist"
//! empty_out_dir = true
//! sourcemap = true
//! exclude = ["**/node_modules/**"]
//! dts = "auto-imports.d.ts"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use vue_autoimport::{AutoImportOptions, SourceMapOptions};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "autoimport.toml";

/// Declaration file written by `dts` when nothing else is configured.
pub const DEFAULT_DTS_FILE: &str = "auto-imports.d.ts";

/// Main configuration structure loaded from `autoimport.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Transform options (module, composables, extensions, source maps).
    #[serde(default)]
    pub transform: AutoImportOptions,
    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Build configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Directory holding the component sources (default: "src").
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory the transformed tree is written to (default: "dist").
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Remove the output directory before building (default: true).
    #[serde(default = "default_true")]
    pub empty_out_dir: bool,

    /// Write a `.map` file next to every rewritten component (default: true).
    #[serde(default = "default_true")]
    pub sourcemap: bool,

    /// Glob patterns, relative to `src_dir`, of files to leave out.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Declaration file to write on build, relative to the project root.
    #[serde(default)]
    pub dts: Option<String>,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_true() -> bool {
    true
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            empty_out_dir: true,
            sourcemap: true,
            exclude: default_exclude(),
            dts: None,
        }
    }
}

/// How a build treats source maps and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BuildMode {
    /// Source maps as configured.
    #[default]
    Production,
    /// Hi-res maps with embedded sources, plus a per-file report.
    Diagnose,
}

impl BuildMode {
    /// Returns true for [`BuildMode::Diagnose`].
    pub fn is_diagnose(self) -> bool {
        self == BuildMode::Diagnose
    }

    /// Applies the mode on top of the configured source map settings.
    pub fn sourcemap_options(self, configured: SourceMapOptions) -> SourceMapOptions {
        match self {
            BuildMode::Production => configured,
            BuildMode::Diagnose => SourceMapOptions {
                enabled: true,
                hires: true,
                include_content: true,
            },
        }
    }
}

impl Config {
    /// Loads configuration from `autoimport.toml` in the current directory.
    ///
    /// If no configuration file exists, returns default configuration.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Transform options for a build in `mode`.
    pub fn plugin_options(&self, mode: BuildMode) -> AutoImportOptions {
        let mut options = self.transform.clone();
        options.sourcemap = mode.sourcemap_options(options.sourcemap);
        if !self.build.sourcemap {
            options.sourcemap.enabled = false;
        }
        options
    }
}
