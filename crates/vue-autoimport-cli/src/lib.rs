// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! vue-autoimport CLI library.
//!
//! This crate hosts the [`vue_autoimport`] transform outside a bundler: it
//! rewrites single files, whole source trees, and keeps a source tree in sync
//! while watching it.
//!
//! # Usage
//!
//! This crate is primarily used through the `vue-autoimport` binary:
//!
//! ```bash
//! vue-autoimport transform src/App.vue    # Print the rewritten file
//! vue-autoimport build                    # Transform src/ into dist/
//! vue-autoimport build --mode diagnose    # Hi-res maps and a per-file report
//! vue-autoimport watch                    # Rebuild components on change
//! vue-autoimport dts                      # Write auto-imports.d.ts
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `autoimport.toml` at the project root.

/// CLI commands (transform, build, watch, dts).
pub mod commands;
/// Project configuration from `autoimport.toml`.
pub mod config;
/// File system watching for incremental rebuilds.
pub mod watcher;
