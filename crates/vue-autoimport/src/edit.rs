// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Offset-addressed text edits with source map generation.
//!
//! An [`EditBuffer`] never touches the original text. Insertions are recorded
//! against byte offsets of the original, so later edits do not shift earlier
//! ones, and the map can be generated from the untouched original afterwards.

use crate::options::SourceMapOptions;
use crate::sourcemap::{Segment, SourceMap};

#[derive(Debug, Clone)]
struct Insertion {
    offset: usize,
    text: String,
}

/// Records insertions into an immutable original text.
#[derive(Debug, Clone)]
pub struct EditBuffer<'a> {
    original: &'a str,
    insertions: Vec<Insertion>,
}

impl<'a> EditBuffer<'a> {
    /// Creates a buffer over `original`.
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            insertions: Vec::new(),
        }
    }

    /// The untouched original text.
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// Returns true if no edit has been recorded.
    pub fn is_unchanged(&self) -> bool {
        self.insertions.iter().all(|i| i.text.is_empty())
    }

    /// Inserts `text` at `offset` of the original, to the left of whatever
    /// already sits there. Several insertions at one offset keep call order.
    ///
    /// Offsets past the end are clamped to the end. Offsets that fall inside a
    /// multi-byte character are ignored.
    pub fn prepend_left(&mut self, offset: usize, text: impl Into<String>) -> &mut Self {
        let offset = offset.min(self.original.len());
        if !self.original.is_char_boundary(offset) {
            tracing::warn!("Ignoring insertion inside a character at byte {}", offset);
            return self;
        }
        // Stable position after every insertion already at this offset.
        let idx = self.insertions.partition_point(|i| i.offset <= offset);
        self.insertions.insert(
            idx,
            Insertion {
                offset,
                text: text.into(),
            },
        );
        self
    }

    /// Generates a Source Map v3 describing the recorded insertions.
    ///
    /// Inserted text is unmapped. With `hires`, every original character gets a
    /// segment; otherwise only line starts and the first character after each
    /// insertion do.
    pub fn generate_map(&self, source: &str, options: &SourceMapOptions) -> SourceMap {
        let mut lines: Vec<Vec<Segment>> = vec![Vec::new()];
        let mut generated_column = 0u32;
        let mut original_line = 0u32;
        let mut original_column = 0u32;
        let mut after_insertion = false;
        let mut pending = self.insertions.iter().peekable();

        for (offset, c) in self.original.char_indices() {
            while let Some(insertion) = pending.next_if(|i| i.offset == offset) {
                if !insertion.text.is_empty() {
                    emit_inserted(&insertion.text, &mut lines, &mut generated_column);
                    after_insertion = true;
                }
            }

            if options.hires || original_column == 0 || after_insertion {
                push_segment(
                    &mut lines,
                    Segment::mapped(generated_column, 0, original_line, original_column),
                );
            }
            after_insertion = false;

            if c == '\n' {
                lines.push(Vec::new());
                generated_column = 0;
                original_line += 1;
                original_column = 0;
            } else {
                let width = c.len_utf16() as u32;
                generated_column += width;
                original_column += width;
            }
        }

        for insertion in pending {
            emit_inserted(&insertion.text, &mut lines, &mut generated_column);
        }

        let sources_content = options
            .include_content
            .then(|| vec![Some(self.original.to_string())]);

        SourceMap::from_segments(
            Some(source.to_string()),
            vec![source.to_string()],
            sources_content,
            &lines,
        )
    }
}

impl std::fmt::Display for EditBuffer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut cursor = 0;
        for insertion in &self.insertions {
            f.write_str(&self.original[cursor..insertion.offset])?;
            f.write_str(&insertion.text)?;
            cursor = insertion.offset;
        }
        f.write_str(&self.original[cursor..])
    }
}

/// Marks inserted text as unmapped at its start and at every line it opens.
fn emit_inserted(text: &str, lines: &mut Vec<Vec<Segment>>, column: &mut u32) {
    let mut line_start = true;
    for c in text.chars() {
        if line_start {
            push_segment(lines, Segment::unmapped(*column));
            line_start = false;
        }
        if c == '\n' {
            lines.push(Vec::new());
            *column = 0;
            line_start = true;
        } else {
            *column += c.len_utf16() as u32;
        }
    }
}

fn push_segment(lines: &mut [Vec<Segment>], segment: Segment) {
    if let Some(line) = lines.last_mut() {
        // Replace rather than duplicate a segment at the same column.
        match line.last_mut() {
            Some(last) if last.generated_column == segment.generated_column => *last = segment,
            _ => line.push(segment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hires() -> SourceMapOptions {
        SourceMapOptions::default()
    }

    fn lowres() -> SourceMapOptions {
        SourceMapOptions {
            hires: false,
            ..SourceMapOptions::default()
        }
    }

    #[test]
    fn test_insertions_keep_call_order() {
        let mut buffer = EditBuffer::new("ac");
        buffer.prepend_left(1, "b").prepend_left(1, "B").prepend_left(0, ">");
        assert_eq!(buffer.to_string(), ">abBc");
    }

    #[test]
    fn test_out_of_range_offsets_do_not_panic() {
        let mut buffer = EditBuffer::new("é");
        buffer.prepend_left(1, "x");
        buffer.prepend_left(99, "!");
        assert_eq!(buffer.to_string(), "é!");
    }

    #[test]
    fn test_unchanged_buffer_renders_original() {
        let buffer = EditBuffer::new("<div/>");
        assert!(buffer.is_unchanged());
        assert_eq!(buffer.to_string(), "<div/>");
    }

    #[test]
    fn test_map_skips_inserted_lines() {
        let original = "<script setup>\nconst a = 1\n</script>";
        let mut buffer = EditBuffer::new(original);
        buffer.prepend_left(14, "\nimport { ref } from 'vue'\n");
        let output = buffer.to_string();
        assert_eq!(
            output,
            "<script setup>\nimport { ref } from 'vue'\n\nconst a = 1\n</script>"
        );

        for options in [hires(), lowres()] {
            let map = buffer.generate_map("App.vue", &options);
            assert_eq!(map.lookup(0, 3).unwrap().column, 3);
            assert!(map.lookup(1, 0).is_none());
            assert!(map.lookup(1, 10).is_none());

            let pos = map.lookup(3, 6).unwrap();
            assert_eq!((pos.line, pos.column), (1, 6));
            let pos = map.lookup(4, 2).unwrap();
            assert_eq!((pos.line, pos.column), (2, 2));
        }
    }

    #[test]
    fn test_map_columns_count_utf16_units() {
        let original = "😀x";
        let mut buffer = EditBuffer::new(original);
        buffer.prepend_left(0, "ab");
        let map = buffer.generate_map("a.vue", &hires());

        // "ab" takes columns 0-1, the emoji 2-3, "x" column 4.
        let pos = map.lookup(0, 4).unwrap();
        assert_eq!((pos.line, pos.column), (0, 2));
        assert!(map.lookup(0, 1).is_none());
    }

    #[test]
    fn test_map_embeds_content_on_request() {
        let buffer = EditBuffer::new("abc");
        let options = SourceMapOptions {
            include_content: true,
            ..hires()
        };
        let map = buffer.generate_map("a.vue", &options);
        assert_eq!(map.sources, vec!["a.vue".to_string()]);
        assert_eq!(map.sources_content, Some(vec![Some("abc".to_string())]));
        assert!(buffer.generate_map("a.vue", &hires()).sources_content.is_none());
    }
}
