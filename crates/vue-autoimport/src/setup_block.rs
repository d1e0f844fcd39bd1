// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Locating the `<script setup>` block of a single-file component.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `<script setup ...>` followed by the shortest run of text up to `</script>`.
    /// Tag names fold ASCII case only.
    static ref SETUP_BLOCK_RE: Regex =
        Regex::new(r"(?s)((?i-u:<script)\s+(?i-u:setup)[^>]*>)(.*?)(?i-u:</script>)").unwrap();
}

/// The first `<script setup>` block of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupBlock<'a> {
    /// The opening tag, including attributes and the closing `>`.
    pub open_tag: &'a str,
    /// Text between the opening tag and `</script>`.
    pub content: &'a str,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset just past the opening tag's `>`.
    pub content_start: usize,
}

impl<'a> SetupBlock<'a> {
    /// Finds the first setup block in `source`, matching the tag name
    /// case-insensitively.
    ///
    /// The `setup` attribute must come first. `<script lang="ts" setup>` is
    /// not recognized.
    pub fn find(source: &'a str) -> Option<Self> {
        let caps = SETUP_BLOCK_RE.captures(source)?;
        let open_tag = caps.get(1)?;
        let content = caps.get(2)?;
        Some(Self {
            open_tag: open_tag.as_str(),
            content: content.as_str(),
            start: open_tag.start(),
            content_start: open_tag.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_plain_setup_block() {
        let source = "<template><p/></template>\n<script setup>\nconst a = 1\n</script>";
        let block = SetupBlock::find(source).unwrap();
        assert_eq!(block.open_tag, "<script setup>");
        assert_eq!(block.content, "\nconst a = 1\n");
        assert_eq!(&source[block.start..block.content_start], "<script setup>");
    }

    #[test]
    fn test_find_with_attributes_and_case() {
        let source = "<SCRIPT Setup lang=\"ts\">let a: number = 1</Script>";
        let block = SetupBlock::find(source).unwrap();
        assert_eq!(block.open_tag, "<SCRIPT Setup lang=\"ts\">");
        assert_eq!(block.content, "let a: number = 1");
        assert_eq!(block.content_start, block.open_tag.len());
    }

    #[test]
    fn test_skips_plain_script_and_takes_first_setup() {
        let source = "<script>export default {}</script>\n\
                      <script setup>first()</script>\n\
                      <script setup>second()</script>";
        let block = SetupBlock::find(source).unwrap();
        assert_eq!(block.content, "first()");
    }

    #[test]
    fn test_no_setup_block() {
        assert!(SetupBlock::find("<script>const a = ref(1)</script>").is_none());
        assert!(SetupBlock::find("<script lang=\"ts\" setup>ref()</script>").is_none());
        assert!(SetupBlock::find("<script setup>never closed").is_none());
        assert!(SetupBlock::find("").is_none());
    }

    #[test]
    fn test_case_folding_is_ascii_only() {
        // U+017F LATIN SMALL LETTER LONG S folds to `s` under Unicode rules.
        assert!(SetupBlock::find("<\u{17f}cript \u{17f}etup>ref()</script>").is_none());
        let block = SetupBlock::find("<script setup>ref()</\u{17f}cript></SCRIPT>").unwrap();
        assert_eq!(block.content, "ref()</\u{17f}cript>");
    }
}
