// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Running several transform plugins over one file.
//!
//! Plugins run in the order they were added. Each sees the previous plugin's
//! output, and the source maps are composed so the final map still points at
//! the file the pipeline received.

use crate::plugin::{TransformOutput, TransformPlugin};

/// An ordered list of [`TransformPlugin`]s, itself usable as a plugin.
#[derive(Default)]
pub struct Pipeline {
    plugins: Vec<Box<dyn TransformPlugin>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plugin.
    pub fn with_plugin<P: TransformPlugin + 'static>(mut self, plugin: P) -> Self {
        self.push(Box::new(plugin));
        self
    }

    /// Appends an already boxed plugin.
    pub fn push(&mut self, plugin: Box<dyn TransformPlugin>) {
        self.plugins.push(plugin);
    }

    /// Plugin names, in run order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Number of plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns true if the pipeline has no plugins.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}

impl TransformPlugin for Pipeline {
    fn name(&self) -> &str {
        "pipeline"
    }

    /// Returns `None` if no plugin changed the file. The map is dropped as soon
    /// as one changing plugin does not provide one.
    fn transform(&self, code: &str, id: &str) -> Option<TransformOutput> {
        let mut current: Option<TransformOutput> = None;

        for plugin in &self.plugins {
            let input = current.as_ref().map_or(code, |o| o.code.as_str());
            let Some(output) = plugin.transform(input, id) else {
                continue;
            };
            tracing::debug!("Plugin '{}' rewrote {}", plugin.name(), id);

            current = Some(match current.take() {
                None => output,
                Some(previous) => {
                    let map = match (output.map, previous.map) {
                        (Some(later), Some(earlier)) => match later.compose(&earlier) {
                            Ok(map) => Some(map),
                            Err(e) => {
                                tracing::warn!("Dropping source map for {}: {}", id, e);
                                None
                            }
                        },
                        _ => None,
                    };
                    TransformOutput {
                        code: output.code,
                        map,
                    }
                }
            });
        }

        current
    }
}
