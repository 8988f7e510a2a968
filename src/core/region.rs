//! Sequence and region model
//!
//! A [`Sequence`] is referenced by regions through its name only. A [`Region`]
//! owns its children; children carry genomic-absolute canonical intervals.

use crate::core::error::{EngineError, EngineResult};
use crate::core::{Interval, Orientation};
use std::collections::HashMap;

/// Property key holding the canonical thick (coding) start of a region
pub const THICK_START: &str = "thickStart";

/// Property key holding the canonical thick (coding) end of a region
pub const THICK_END: &str = "thickEnd";

/// Transcript anchor used by anchor-relative coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Transcription start site
    Tss,
    /// Transcription end site
    Tes,
}

impl Anchor {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tss" => Some(Anchor::Tss),
            "tes" => Some(Anchor::Tes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Tss => "TSS",
            Anchor::Tes => "TES",
        }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sequence segment of the genome that regions are placed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
    /// Canonical genomic start (1-based, inclusive)
    pub genomic_start: i64,
    /// Canonical genomic end (1-based, inclusive)
    pub genomic_end: i64,
    pub orientation: Orientation,
    pub tss: Option<i64>,
    pub tes: Option<i64>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, genomic_start: i64, genomic_end: i64, orientation: Orientation) -> Self {
        Self {
            name: name.into(),
            genomic_start,
            genomic_end,
            orientation,
            tss: None,
            tes: None,
        }
    }

    pub fn with_tss(mut self, tss: i64) -> Self {
        self.tss = Some(tss);
        self
    }

    pub fn with_tes(mut self, tes: i64) -> Self {
        self.tes = Some(tes);
        self
    }

    /// Number of bases in the sequence
    pub fn length(&self) -> i64 {
        self.genomic_end - self.genomic_start + 1
    }

    /// Genomic span of the sequence, rejecting non-positive lengths
    pub fn span(&self) -> EngineResult<Interval> {
        if self.length() <= 0 {
            return Err(EngineError::InvalidInterval {
                start: self.genomic_start,
                end: self.genomic_end,
            });
        }
        Ok(Interval {
            start: self.genomic_start,
            end: self.genomic_end,
        })
    }

    /// Genomic position of an anchor
    pub fn anchor(&self, anchor: Anchor) -> EngineResult<i64> {
        let pos = match anchor {
            Anchor::Tss => self.tss,
            Anchor::Tes => self.tes,
        };
        pos.ok_or(EngineError::MissingAnchor(anchor))
    }
}

/// Value stored in a region's property map
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl PropertyValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

/// A typed, scored genomic region
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Name of the sequence the region lies on
    pub sequence: String,
    /// Canonical genomic interval
    pub interval: Interval,
    pub orientation: Orientation,
    pub region_type: String,
    pub score: f64,
    pub properties: HashMap<String, PropertyValue>,
    /// Nested sub-regions, sorted by genomic start when encoded
    pub children: Vec<Region>,
}

impl Region {
    pub fn new(sequence: impl Into<String>, interval: Interval, region_type: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            interval,
            orientation: Orientation::Indeterminate,
            region_type: region_type.into(),
            score: 0.0,
            properties: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn start(&self) -> i64 {
        self.interval.start
    }

    pub fn end(&self) -> i64 {
        self.interval.end
    }

    pub fn length(&self) -> i64 {
        self.interval.length()
    }

    /// Location string `sequence:start-end` in canonical coordinates
    ///
    /// # Examples
    /// ```
    /// use region_engine::core::{Interval, Region};
    /// let region = Region::new("chr1", Interval { start: 100, end: 200 }, "exon");
    /// assert_eq!(region.location(), "chr1:100-200");
    /// ```
    pub fn location(&self) -> String {
        format!("{}:{}-{}", self.sequence, self.interval.start, self.interval.end)
    }

    pub fn is_nested(&self) -> bool {
        !self.children.is_empty()
    }

    /// Canonical thick range, if both ends are set and ordered
    pub fn thick_range(&self) -> Option<Interval> {
        let start = self.properties.get(THICK_START)?.as_integer()?;
        let end = self.properties.get(THICK_END)?.as_integer()?;
        Interval::new(start, end).ok()
    }

    pub fn set_thick_range(&mut self, thick: Interval) {
        self.properties.insert(THICK_START.to_string(), PropertyValue::Integer(thick.start));
        self.properties.insert(THICK_END.to_string(), PropertyValue::Integer(thick.end));
    }

    pub fn clear_thick_range(&mut self) {
        self.properties.remove(THICK_START);
        self.properties.remove(THICK_END);
    }
}
