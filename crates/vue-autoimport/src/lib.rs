// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # vue-autoimport
//!
//! Injects missing composable imports into Vue single-file components.
//!
//! A component that calls `ref(...)` or `computed(...)` in its
//! `<script setup>` block without importing them gets
//! `import { ref, computed } from 'vue'` inserted right after the opening tag,
//! together with a source map that keeps error positions pointing at the file
//! the author wrote.
//!
//! ## Features
//!
//! - Per-file transform hook ([`TransformPlugin`]) returning `None` for "no change"
//! - Configurable module, composable list and file extensions
//! - Hi-res or line-level Source Map v3 output
//! - Plugin pipelines with composed source maps
//! - Global declaration file for the auto-imported names
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vue_autoimport::{AutoImportPlugin, TransformPlugin};
//!
//! let plugin = AutoImportPlugin::default();
//! let source = "<script setup>\nconst count = ref(0)\n</script>";
//!
//! if let Some(out) = plugin.transform(source, "src/Counter.vue") {
//!     println!("{}", out.code);
//!     println!("{}", out.map.unwrap().to_json()?);
//! }
//! ```

/// Import injection for `<script setup>` blocks.
pub mod auto_import;
/// Declaration file generation.
pub mod dts;
/// Offset-addressed text edits.
pub mod edit;
/// Error types.
pub mod error;
/// Transform options.
pub mod options;
/// Plugin pipelines.
pub mod pipeline;
/// The per-file transform hook.
pub mod plugin;
/// Locating `<script setup>` blocks.
pub mod setup_block;
/// Source Map v3 model and VLQ codec.
pub mod sourcemap;

pub use auto_import::{Analysis, AutoImportPlugin, ImportPlan, SkipReason, PLUGIN_NAME};
pub use dts::generate_dts;
pub use edit::EditBuffer;
pub use error::*;
pub use options::{AutoImportOptions, SourceMapOptions, DEFAULT_COMPOSABLES};
pub use pipeline::Pipeline;
pub use plugin::{TransformOutput, TransformPlugin};
pub use setup_block::SetupBlock;
pub use sourcemap::{OriginalPosition, Segment, SourceMap};

#[cfg(test)]
mod tests;
