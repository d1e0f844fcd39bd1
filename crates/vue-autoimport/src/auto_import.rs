// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Injecting missing composable imports into `<script setup>` blocks.
//!
//! For every component file the plugin:
//!
//! 1. **Checks the id**: only ids ending in a configured extension are touched
//! 2. **Finds the setup block**: the first `<script setup ...>` in the file
//! 3. **Respects hand-written imports**: any `import { ... } from 'vue'` in the
//!    block disables the plugin for the whole file, whatever it imports
//! 4. **Collects used composables**: `name(` or `name (` anywhere in the block,
//!    strings and comments included, in configured order
//! 5. **Inserts one import** right after the opening tag
//!
//! Every early exit is "no change", never an error.
//!
//! ```rust,ignore
//! use vue_autoimport::{AutoImportPlugin, TransformPlugin};
//!
//! let plugin = AutoImportPlugin::default();
//! let out = plugin
//!     .transform("<script setup>\nconst x = ref(1)\n</script>", "App.vue")
//!     .unwrap();
//! assert!(out.code.contains("import { ref } from 'vue'"));
//! ```

use crate::dts::generate_dts;
use crate::edit::EditBuffer;
use crate::error::{AutoImportError, Result};
use crate::options::AutoImportOptions;
use crate::plugin::{TransformOutput, TransformPlugin};
use crate::setup_block::SetupBlock;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

/// Name the plugin reports to its host.
pub const PLUGIN_NAME: &str = "auto-import-vue-composables";

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// Why a file was left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The id does not end in a configured extension.
    UnsupportedExtension,
    /// The file has no `<script setup>` block.
    NoSetupBlock,
    /// The setup block already imports from the module.
    ExistingImport,
    /// No configured composable is called in the setup block.
    NoComposablesUsed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::UnsupportedExtension => "not a component file",
            SkipReason::NoSetupBlock => "no <script setup> block",
            SkipReason::ExistingImport => "setup block already imports from the module",
            SkipReason::NoComposablesUsed => "no composables used",
        };
        f.write_str(reason)
    }
}

/// The import a file needs and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    /// Used composables, in configured order.
    pub symbols: Vec<String>,
    /// The import statement, ending in a newline.
    pub statement: String,
    /// Byte offset just past the setup block's opening tag.
    pub offset: usize,
}

/// Outcome of [`AutoImportPlugin::analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// The file is left unchanged.
    Skip(SkipReason),
    /// The file gets an import.
    Import(ImportPlan),
}

/// Adds `import { ... } from 'vue'` for composables a setup block calls
/// without importing.
#[derive(Debug, Clone)]
pub struct AutoImportPlugin {
    options: AutoImportOptions,
    existing_import: Regex,
    usages: Vec<(String, Regex)>,
}

impl AutoImportPlugin {
    /// Creates a plugin, compiling one usage pattern per composable.
    ///
    /// # Errors
    ///
    /// Returns an error if a composable is not a JavaScript identifier, the
    /// module name is empty, or no extension is configured.
    pub fn new(options: AutoImportOptions) -> Result<Self> {
        if options.module.is_empty() {
            return Err(AutoImportError::EmptyModule);
        }
        if options.extensions.iter().all(|e| e.is_empty()) {
            return Err(AutoImportError::NoExtensions);
        }

        let existing_import = Regex::new(&format!(
            r#"import\s+\{{[^}}]*\}}\s+from\s+['"]{}['"]"#,
            regex::escape(&options.module)
        ))?;

        let mut usages: Vec<(String, Regex)> = Vec::with_capacity(options.composables.len());
        for name in &options.composables {
            if !IDENTIFIER_RE.is_match(name) {
                return Err(AutoImportError::InvalidSymbol(name.clone()));
            }
            // A name listed twice would be imported twice.
            if usages.iter().any(|(existing, _)| existing == name) {
                continue;
            }
            let usage = Regex::new(&format!(r"(?-u:\b){}\s*\(", regex::escape(name)))?;
            usages.push((name.clone(), usage));
        }

        Ok(Self {
            options,
            existing_import,
            usages,
        })
    }

    /// The options this plugin was built from.
    pub fn options(&self) -> &AutoImportOptions {
        &self.options
    }

    /// Returns true if `id` ends in one of the configured extensions.
    pub fn is_component(&self, id: &str) -> bool {
        self.options
            .extensions
            .iter()
            .any(|ext| !ext.is_empty() && id.ends_with(ext.as_str()))
    }

    /// Decides whether and how a file should be rewritten.
    pub fn analyze(&self, code: &str, id: &str) -> Analysis {
        if !self.is_component(id) {
            return Analysis::Skip(SkipReason::UnsupportedExtension);
        }

        let Some(block) = SetupBlock::find(code) else {
            return Analysis::Skip(SkipReason::NoSetupBlock);
        };

        if self.existing_import.is_match(block.content) {
            return Analysis::Skip(SkipReason::ExistingImport);
        }

        let symbols = self.used_symbols(block.content);
        if symbols.is_empty() {
            return Analysis::Skip(SkipReason::NoComposablesUsed);
        }

        let statement = self.import_statement(&symbols);
        Analysis::Import(ImportPlan {
            symbols,
            statement,
            offset: block.content_start,
        })
    }

    /// Configured composables called in `script`, in configured order.
    pub fn used_symbols(&self, script: &str) -> Vec<String> {
        self.usages
            .iter()
            .filter(|(_, usage)| usage.is_match(script))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Builds `import { a, b } from '<module>'` followed by a newline.
    pub fn import_statement<S: AsRef<str>>(&self, symbols: &[S]) -> String {
        let names = symbols
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        format!("import {{ {} }} from '{}'\n", names, self.options.module)
    }

    /// Global declarations for every configured composable.
    pub fn dts(&self) -> String {
        generate_dts(&self.options.module, &self.options.composables)
    }

    /// Inserts the planned import into `code`, with a map when enabled.
    ///
    /// `plan` must come from [`analyze`](Self::analyze) on the same `code`.
    pub fn apply(&self, code: &str, id: &str, plan: &ImportPlan) -> TransformOutput {
        let mut buffer = EditBuffer::new(code);
        buffer.prepend_left(plan.offset, format!("\n{}", plan.statement));

        let sourcemap = &self.options.sourcemap;
        let map = sourcemap
            .enabled
            .then(|| buffer.generate_map(id, sourcemap));

        tracing::debug!("Injected {{ {} }} into {}", plan.symbols.join(", "), id);

        TransformOutput {
            code: buffer.to_string(),
            map,
        }
    }
}

impl Default for AutoImportPlugin {
    fn default() -> Self {
        Self::new(AutoImportOptions::default())
            .expect("built-in composables are valid identifiers")
    }
}

impl TransformPlugin for AutoImportPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn transform(&self, code: &str, id: &str) -> Option<TransformOutput> {
        match self.analyze(code, id) {
            Analysis::Import(plan) => Some(self.apply(code, id, &plan)),
            Analysis::Skip(reason) => {
                tracing::trace!("Leaving {} unchanged: {}", id, reason);
                None
            }
        }
    }
}
