// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for vue-autoimport.
//!
//! The transform itself never fails: every input it cannot handle is reported
//! as "no change". [`AutoImportError`] only covers the edges around it:
//!
//! - **Construction errors**: invalid options passed to [`AutoImportPlugin::new`]
//! - **Source map errors**: malformed `mappings` or JSON when reading a map back
//!
//! [`AutoImportPlugin::new`]: crate::AutoImportPlugin::new

use thiserror::Error;

/// The main error type for vue-autoimport operations.
#[derive(Error, Debug)]
pub enum AutoImportError {
    /// A configured composable name is not a valid JavaScript identifier.
    #[error("Invalid composable name: {0:?}")]
    InvalidSymbol(String),

    /// The module to import from is empty.
    #[error("Import module name must not be empty")]
    EmptyModule,

    /// No file extension was configured, so no file would ever be transformed.
    #[error("At least one file extension must be configured")]
    NoExtensions,

    /// A usage or guard pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// A source map could not be decoded.
    #[error("Source map error: {0}")]
    SourceMap(String),

    /// Source map JSON could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with [`AutoImportError`].
pub type Result<T> = std::result::Result<T, AutoImportError>;
