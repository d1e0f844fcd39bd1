// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Source Map v3 support.
//!
//! Maps are produced by [`EditBuffer::generate_map`](crate::EditBuffer::generate_map)
//! and consumed by whatever reports errors against the rewritten file. Lines and
//! columns are 0-based everywhere in this module; columns count UTF-16 code units,
//! as browsers and bundlers expect.

use crate::error::{AutoImportError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_CONTINUATION: u64 = 0b10_0000;
const VLQ_MASK: u64 = 0b01_1111;

/// Position in an original source that a generated position came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Original {
    /// Index into [`SourceMap::sources`].
    pub source: u32,
    /// Line in the original source.
    pub line: u32,
    /// Column in the original source.
    pub column: u32,
}

/// One decoded mapping segment. `original` is `None` for generated text
/// that has no counterpart in the source (inserted code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Column in the generated line.
    pub generated_column: u32,
    /// Where the generated text came from, if anywhere.
    pub original: Option<Original>,
}

impl Segment {
    /// A segment pointing back into `source`.
    pub fn mapped(generated_column: u32, source: u32, line: u32, column: u32) -> Self {
        Self {
            generated_column,
            original: Some(Original { source, line, column }),
        }
    }

    /// A segment marking generated-only text.
    pub fn unmapped(generated_column: u32) -> Self {
        Self {
            generated_column,
            original: None,
        }
    }
}

/// Result of [`SourceMap::lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
    /// Name of the original source.
    pub source: String,
    /// Line in the original source.
    pub line: u32,
    /// Column in the original source.
    pub column: u32,
}

/// A Source Map v3 document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    /// Always 3.
    pub version: u8,
    /// Name of the generated file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Original source names.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Original source texts, parallel to `sources`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    /// Symbol names referenced by mappings (unused by this crate).
    #[serde(default)]
    pub names: Vec<String>,
    /// Base64 VLQ encoded mappings.
    pub mappings: String,
}

impl SourceMap {
    /// Builds a map from decoded segments, one `Vec` per generated line.
    pub fn from_segments(
        file: Option<String>,
        sources: Vec<String>,
        sources_content: Option<Vec<Option<String>>>,
        lines: &[Vec<Segment>],
    ) -> Self {
        Self {
            version: 3,
            file,
            sources,
            sources_content,
            names: Vec::new(),
            mappings: encode_mappings(lines),
        }
    }

    /// Decodes `mappings` into segments, one `Vec` per generated line.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid Base64, truncated VLQ values, or segments
    /// with an unsupported number of fields.
    pub fn segments(&self) -> Result<Vec<Vec<Segment>>> {
        decode_mappings(&self.mappings)
    }

    /// Finds the original position of a generated position.
    ///
    /// Returns `None` for inserted text, for positions before the first segment
    /// of a line, and for maps whose mappings fail to decode.
    pub fn lookup(&self, line: u32, column: u32) -> Option<OriginalPosition> {
        let lines = self.segments().ok()?;
        self.lookup_in(&lines, line, column)
    }

    fn lookup_in(&self, lines: &[Vec<Segment>], line: u32, column: u32) -> Option<OriginalPosition> {
        let original = lookup_segment(lines, line, column)?;
        let source = self.sources.get(original.source as usize)?;
        Some(OriginalPosition {
            source: source.clone(),
            line: original.line,
            column: original.column,
        })
    }

    /// Composes two maps: `self` maps a final file onto an intermediate one,
    /// `earlier` maps that intermediate file onto the original. The result maps
    /// the final file straight onto the original.
    ///
    /// Both maps are expected to describe a single file, so the source index in
    /// `self` is ignored.
    pub fn compose(&self, earlier: &SourceMap) -> Result<SourceMap> {
        let later_lines = self.segments()?;
        let earlier_lines = earlier.segments()?;

        let lines: Vec<Vec<Segment>> = later_lines
            .iter()
            .map(|segments| {
                segments
                    .iter()
                    .map(|segment| Segment {
                        generated_column: segment.generated_column,
                        original: segment.original.and_then(|o| {
                            lookup_segment(&earlier_lines, o.line, o.column)
                        }),
                    })
                    .collect()
            })
            .collect();

        Ok(SourceMap::from_segments(
            self.file.clone(),
            earlier.sources.clone(),
            earlier.sources_content.clone(),
            &lines,
        ))
    }

    /// Serializes the map as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads a map from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: SourceMap = serde_json::from_str(json)?;
        if map.version != 3 {
            return Err(AutoImportError::SourceMap(format!(
                "unsupported source map version {}",
                map.version
            )));
        }
        Ok(map)
    }

    /// Translates `file:LINE:COL` positions in an error message from the
    /// rewritten file back to the original file.
    ///
    /// Positions in the message are 1-based. Positions that land in inserted
    /// text are left as they are.
    pub fn translate_error(&self, error_msg: &str, file: &str) -> String {
        let Ok(lines) = self.segments() else {
            return error_msg.to_string();
        };
        let Ok(re) = Regex::new(&format!(r"{}:(\d+):(\d+)", regex::escape(file))) else {
            return error_msg.to_string();
        };

        let result: Cow<str> = re.replace_all(error_msg, |caps: &regex::Captures| {
            let line = caps[1].parse::<u32>().ok().and_then(|l| l.checked_sub(1));
            let column = caps[2].parse::<u32>().ok().and_then(|c| c.checked_sub(1));
            if let (Some(line), Some(column)) = (line, column) {
                let original = lookup_segment(&lines, line, column);
                if let Some((l, c)) = original.and_then(|o| {
                    Some((o.line.checked_add(1)?, o.column.checked_add(1)?))
                }) {
                    return format!("{}:{}:{}", file, l, c);
                }
            }
            caps[0].to_string()
        });

        result.into_owned()
    }
}

/// Finds the segment covering `column` and extends its original column by the
/// distance from the segment start. Columns past `u32::MAX` are unmapped.
fn lookup_segment(lines: &[Vec<Segment>], line: u32, column: u32) -> Option<Original> {
    let segments = lines.get(line as usize)?;
    let idx = segments.partition_point(|s| s.generated_column <= column);
    let segment = segments.get(idx.checked_sub(1)?)?;
    let original = segment.original?;
    Some(Original {
        column: original
            .column
            .checked_add(column - segment.generated_column)?,
        ..original
    })
}

fn encode_vlq(out: &mut String, value: i64) {
    let mut vlq = if value < 0 {
        (value.unsigned_abs() << 1) | 1
    } else {
        (value as u64) << 1
    };
    loop {
        let mut digit = vlq & VLQ_MASK;
        vlq >>= 5;
        if vlq > 0 {
            digit |= VLQ_CONTINUATION;
        }
        out.push(BASE64_CHARS[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

fn base64_value(byte: u8) -> Option<u64> {
    let value = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(value as u64)
}

fn decode_vlq_fields(segment: &str) -> Result<Vec<i64>> {
    let mut fields = Vec::with_capacity(5);
    let mut value: u64 = 0;
    let mut shift = 0u32;

    for byte in segment.bytes() {
        let digit = base64_value(byte).ok_or_else(|| {
            AutoImportError::SourceMap(format!("invalid base64 character {:?}", byte as char))
        })?;
        if shift > 60 {
            return Err(AutoImportError::SourceMap("VLQ value overflows".to_string()));
        }
        value |= (digit & VLQ_MASK) << shift;
        if digit & VLQ_CONTINUATION != 0 {
            shift += 5;
        } else {
            let magnitude = (value >> 1) as i64;
            fields.push(if value & 1 == 1 { -magnitude } else { magnitude });
            value = 0;
            shift = 0;
        }
    }

    if shift != 0 {
        return Err(AutoImportError::SourceMap(format!("truncated VLQ segment {:?}", segment)));
    }
    Ok(fields)
}

fn encode_mappings(lines: &[Vec<Segment>]) -> String {
    let mut out = String::new();
    let mut prev_source = 0i64;
    let mut prev_line = 0i64;
    let mut prev_column = 0i64;

    for (i, segments) in lines.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let mut prev_generated = 0i64;
        for (j, segment) in segments.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            let generated = segment.generated_column as i64;
            encode_vlq(&mut out, generated - prev_generated);
            prev_generated = generated;

            if let Some(original) = segment.original {
                let (source, line, column) = (
                    original.source as i64,
                    original.line as i64,
                    original.column as i64,
                );
                encode_vlq(&mut out, source - prev_source);
                encode_vlq(&mut out, line - prev_line);
                encode_vlq(&mut out, column - prev_column);
                prev_source = source;
                prev_line = line;
                prev_column = column;
            }
        }
    }

    out
}

fn decode_mappings(mappings: &str) -> Result<Vec<Vec<Segment>>> {
    let mut lines = Vec::new();
    let mut source = 0i64;
    let mut line = 0i64;
    let mut column = 0i64;

    for encoded_line in mappings.split(';') {
        let mut segments = Vec::new();
        let mut generated = 0i64;

        for encoded in encoded_line.split(',').filter(|s| !s.is_empty()) {
            let fields = decode_vlq_fields(encoded)?;
            generated = add_delta(generated, fields[0])?;
            let generated_column = to_u32(generated)?;

            match fields.len() {
                1 => segments.push(Segment::unmapped(generated_column)),
                // The fifth field indexes `names`, which is not tracked.
                4 | 5 => {
                    source = add_delta(source, fields[1])?;
                    line = add_delta(line, fields[2])?;
                    column = add_delta(column, fields[3])?;
                    segments.push(Segment::mapped(
                        generated_column,
                        to_u32(source)?,
                        to_u32(line)?,
                        to_u32(column)?,
                    ));
                }
                n => {
                    return Err(AutoImportError::SourceMap(format!(
                        "segment {:?} has {} fields",
                        encoded, n
                    )))
                }
            }
        }

        segments.sort_by_key(|s| s.generated_column);
        lines.push(segments);
    }

    Ok(lines)
}

fn add_delta(value: i64, delta: i64) -> Result<i64> {
    value
        .checked_add(delta)
        .ok_or_else(|| AutoImportError::SourceMap(format!("mapping delta {} overflows", delta)))
}

fn to_u32(value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| AutoImportError::SourceMap(format!("mapping value {} out of range", value)))
}
