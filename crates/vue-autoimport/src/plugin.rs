// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The per-file transform hook a host pipeline calls.

use crate::sourcemap::SourceMap;

/// A rewritten file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// The full new text of the file.
    pub code: String,
    /// Maps positions in `code` back to the text the plugin received.
    pub map: Option<SourceMap>,
}

/// A named per-file transform.
///
/// `transform` receives the file text and its id (a path, possibly carrying a
/// query string) and returns `None` to leave the file alone. Implementations
/// must not fail: input they cannot handle is simply left unchanged.
pub trait TransformPlugin: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Transforms one file.
    fn transform(&self, code: &str, id: &str) -> Option<TransformOutput>;
}

impl<P: TransformPlugin + ?Sized> TransformPlugin for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn transform(&self, code: &str, id: &str) -> Option<TransformOutput> {
        (**self).transform(code, id)
    }
}
