//! BED12 block field adapter
//!
//! Translates the textual blockCount / blockSizes / blockStarts / thickStart /
//! thickEnd columns of a BED12 line into a [`BlockEncoding`] and back.
//! Lists are split with memchr; empty elements (trailing commas) are skipped.

use crate::core::{BlockEncoding, BlockFieldError, BlockFieldResult, Interval};
use memchr::memchr;

/// Textual BED12 block columns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockFields {
    pub block_count: String,
    pub block_sizes: String,
    pub block_starts: String,
    pub thick_start: Option<String>,
    pub thick_end: Option<String>,
    /// Comma-separated child types, an extension column
    pub child_types: Option<String>,
}

impl BlockFields {
    /// Parse block columns into an encoding
    ///
    /// Counts are not cross-checked here; the codec reports a mismatch as
    /// `BlockCountMismatch` when decoding.
    ///
    /// # Examples
    /// ```
    /// use region_engine::bed::BlockFields;
    /// let enc = BlockFields::parse("2", "10,20,", "0,40,", None, None).unwrap();
    /// assert_eq!(enc.block_sizes, vec![10, 20]);
    /// assert_eq!(enc.block_starts, vec![0, 40]);
    /// ```
    pub fn parse(
        block_count: &str,
        block_sizes: &str,
        block_starts: &str,
        thick_start: Option<&str>,
        thick_end: Option<&str>,
    ) -> BlockFieldResult<BlockEncoding> {
        let block_count = parse_number::<usize>("blockCount", block_count.trim())?;
        let block_sizes = parse_list("blockSizes", block_sizes)?;
        let block_starts = parse_list("blockStarts", block_starts)?;

        let thick_range = match (thick_start, thick_end) {
            (Some(start), Some(end)) => Some(Interval {
                start: parse_number("thickStart", start.trim())?,
                end: parse_number("thickEnd", end.trim())?,
            }),
            (None, None) => None,
            _ => return Err(BlockFieldError::UnpairedThickRange),
        };

        Ok(BlockEncoding {
            block_count,
            block_sizes,
            block_starts,
            thick_range,
            child_types: None,
        })
    }

    /// Parse the columns held by this value, including child types
    pub fn to_encoding(&self) -> BlockFieldResult<BlockEncoding> {
        let mut encoding = Self::parse(
            &self.block_count,
            &self.block_sizes,
            &self.block_starts,
            self.thick_start.as_deref(),
            self.thick_end.as_deref(),
        )?;
        encoding.child_types = self.child_types.as_deref().map(parse_child_types);
        Ok(encoding)
    }

    /// Render an encoding as BED12 columns (UCSC style, trailing commas)
    ///
    /// # Examples
    /// ```
    /// use region_engine::bed::BlockFields;
    /// use region_engine::BlockEncoding;
    /// let enc = BlockEncoding {
    ///     block_count: 2,
    ///     block_sizes: vec![10, 20],
    ///     block_starts: vec![0, 40],
    ///     ..Default::default()
    /// };
    /// let fields = BlockFields::format(&enc);
    /// assert_eq!(fields.block_sizes, "10,20,");
    /// assert_eq!(fields.block_starts, "0,40,");
    /// ```
    pub fn format(encoding: &BlockEncoding) -> Self {
        Self {
            block_count: encoding.block_count.to_string(),
            block_sizes: format_list(&encoding.block_sizes),
            block_starts: format_list(&encoding.block_starts),
            thick_start: encoding.thick_range.map(|t| t.start.to_string()),
            thick_end: encoding.thick_range.map(|t| t.end.to_string()),
            child_types: encoding.child_types.as_ref().map(|types| {
                let mut out = String::new();
                for t in types {
                    out.push_str(t);
                    out.push(',');
                }
                out
            }),
        }
    }
}

/// Split a comma-separated list, skipping empty elements
fn split_list(field: &str) -> impl Iterator<Item = &str> {
    let bytes = field.as_bytes();
    let mut pos = 0;
    std::iter::from_fn(move || {
        while pos <= bytes.len() {
            let end = memchr(b',', &bytes[pos..])
                .map(|i| pos + i)
                .unwrap_or(bytes.len());
            let element = field[pos..end].trim();
            pos = end + 1;
            if !element.is_empty() {
                return Some(element);
            }
        }
        None
    })
}

fn parse_list(field: &'static str, value: &str) -> BlockFieldResult<Vec<u64>> {
    split_list(value).map(|s| parse_number(field, s)).collect()
}

/// Parse a comma-separated child type column
pub fn parse_child_types(value: &str) -> Vec<String> {
    split_list(value).map(str::to_string).collect()
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> BlockFieldResult<T> {
    value.parse().map_err(|_| BlockFieldError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn format_list(values: &[u64]) -> String {
    let mut out = String::with_capacity(values.len() * 4);
    for v in values {
        out.push_str(&v.to_string());
        out.push(',');
    }
    out
}
