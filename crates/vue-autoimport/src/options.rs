// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Options for the auto-import transform.
//!
//! Every field has a default, so the options can be embedded in a config file
//! where any subset of keys is given:
//!
//! ```toml
//! [transform]
//! module = "vue"
//! composables = ["ref", "computed"]
//! extensions = [".vue"]
//!
//! [transform.sourcemap]
//! hires = true
//! include_content = false
//! ```

use serde::{Deserialize, Serialize};

/// Composables recognized when no list is configured, in import order.
pub const DEFAULT_COMPOSABLES: &[&str] = &[
    "ref",
    "reactive",
    "watch",
    "computed",
    "onMounted",
    "onUnmounted",
    "onBeforeMount",
];

/// Options for [`AutoImportPlugin`](crate::AutoImportPlugin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoImportOptions {
    /// Module every generated import draws from (default: "vue").
    #[serde(default = "default_module")]
    pub module: String,

    /// Candidate symbols, in the order they are listed in a generated import.
    #[serde(default = "default_composables")]
    pub composables: Vec<String>,

    /// Id suffixes that mark a file as a component (default: ".vue").
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Source map generation settings.
    #[serde(default)]
    pub sourcemap: SourceMapOptions,
}

/// Controls the source map attached to a rewritten file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMapOptions {
    /// Emit a map at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Map every character instead of only line starts.
    #[serde(default = "default_true")]
    pub hires: bool,

    /// Embed the original text as `sourcesContent`.
    #[serde(default)]
    pub include_content: bool,
}

fn default_module() -> String {
    "vue".to_string()
}

fn default_composables() -> Vec<String> {
    DEFAULT_COMPOSABLES.iter().map(|s| s.to_string()).collect()
}

fn default_extensions() -> Vec<String> {
    vec![".vue".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for AutoImportOptions {
    fn default() -> Self {
        Self {
            module: default_module(),
            composables: default_composables(),
            extensions: default_extensions(),
            sourcemap: SourceMapOptions::default(),
        }
    }
}

impl Default for SourceMapOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            hires: true,
            include_content: false,
        }
    }
}

impl AutoImportOptions {
    /// Replaces the module imports are drawn from.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Replaces the candidate symbol list.
    pub fn with_composables<I, S>(mut self, composables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composables = composables.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the recognized id suffixes.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the source map settings.
    pub fn with_sourcemap(mut self, sourcemap: SourceMapOptions) -> Self {
        self.sourcemap = sourcemap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_vue_composables() {
        let options = AutoImportOptions::default();
        assert_eq!(options.module, "vue");
        assert_eq!(options.composables.len(), 7);
        assert_eq!(options.composables[0], "ref");
        assert_eq!(options.composables[6], "onBeforeMount");
        assert_eq!(options.extensions, vec![".vue".to_string()]);
        assert!(options.sourcemap.hires);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options: AutoImportOptions = toml::from_str(
            r#"
composables = ["ref", "shallowRef"]

[sourcemap]
hires = false
"#,
        )
        .unwrap();

        assert_eq!(options.module, "vue");
        assert_eq!(options.composables, vec!["ref", "shallowRef"]);
        assert_eq!(options.extensions, vec![".vue"]);
        assert!(options.sourcemap.enabled);
        assert!(!options.sourcemap.hires);
        assert!(!options.sourcemap.include_content);
    }
}
