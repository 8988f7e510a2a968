//! Coordinate system conversion
//!
//! Converts intervals between the three coordinate systems regions are shown in:
//!
//! 1. Genomic: absolute positions, in any [`Indexing`] convention
//! 2. Sequence-relative: positions counted from the first base of a sequence,
//!    mirrored when the sequence is displayed on the reverse strand
//! 3. Anchor-relative: signed distance from the sequence's TSS or TES,
//!    measured along the sequence's own strand
//!
//! Every conversion goes through the canonical system (genomic, 1-based,
//! end-inclusive). Conversions that run against genomic order swap start and
//! end so that `start <= end` holds again, and report the swap so callers can
//! flip the region's strand symbol.

use crate::core::error::EngineResult;
use crate::core::region::{Anchor, Sequence};
use crate::core::{Indexing, Interval, Orientation};

/// Coordinate system an interval is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSystem {
    /// Absolute genomic coordinates
    Genomic(Indexing),
    /// Relative to the first displayed base of the sequence; `offset` is the
    /// number given to that base (0 or 1 in practice)
    SequenceRelative { offset: i64 },
    /// Relative to a transcript anchor; with `skip_zero` the anchor base is +1
    /// and the base upstream of it is -1
    AnchorRelative { anchor: Anchor, skip_zero: bool },
}

impl CoordinateSystem {
    /// Genomic, 1-based, end-inclusive
    pub const CANONICAL: CoordinateSystem = CoordinateSystem::Genomic(Indexing::CANONICAL);

    pub fn is_canonical(&self) -> bool {
        *self == Self::CANONICAL
    }
}

impl std::fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateSystem::Genomic(idx) => write!(
                f,
                "genomic ({}-based, {} end)",
                if idx.zero_indexed { 0 } else { 1 },
                if idx.exclusive_end { "exclusive" } else { "inclusive" }
            ),
            CoordinateSystem::SequenceRelative { offset } => write!(f, "relative (offset {})", offset),
            CoordinateSystem::AnchorRelative { anchor, skip_zero } => {
                write!(f, "{}-relative", anchor)?;
                if *skip_zero {
                    write!(f, " (no zero)")?;
                }
                Ok(())
            }
        }
    }
}

/// Coordinate transformer bound to one sequence and its display strand
///
/// The display strand only affects [`CoordinateSystem::SequenceRelative`];
/// anchor-relative coordinates always follow the sequence's own orientation.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateTransformer<'a> {
    sequence: &'a Sequence,
    display: Orientation,
}

impl<'a> CoordinateTransformer<'a> {
    /// Create a transformer; fails with `InvalidInterval` for a sequence with
    /// non-positive length
    pub fn new(sequence: &'a Sequence, display: Orientation) -> EngineResult<Self> {
        sequence.span()?;
        Ok(Self { sequence, display })
    }

    pub fn sequence(&self) -> &Sequence {
        self.sequence
    }

    pub fn display_orientation(&self) -> Orientation {
        self.display
    }

    /// Convert an interval in `from` coordinates to canonical coordinates
    ///
    /// # Examples
    /// ```
    /// use region_engine::core::{CoordinateSystem, CoordinateTransformer, Indexing, Interval, Orientation, Sequence};
    /// let seq = Sequence::new("chr1", 1000, 2000, Orientation::Reverse);
    /// let tf = CoordinateTransformer::new(&seq, Orientation::Reverse).unwrap();
    ///
    /// let bed = Interval { start: 0, end: 99 };
    /// assert_eq!(tf.to_canonical(bed, CoordinateSystem::Genomic(Indexing::BED)).unwrap(), Interval { start: 1, end: 99 });
    ///
    /// let rel = Interval { start: 0, end: 9 };
    /// let sys = CoordinateSystem::SequenceRelative { offset: 0 };
    /// assert_eq!(tf.to_canonical(rel, sys).unwrap(), Interval { start: 1991, end: 2000 });
    /// ```
    pub fn to_canonical(&self, value: Interval, from: CoordinateSystem) -> EngineResult<Interval> {
        self.to_canonical_stranded(value, from, Orientation::Indeterminate)
            .map(|(interval, _)| interval)
    }

    /// Convert to canonical coordinates, carrying the region's strand along
    ///
    /// The returned orientation is `orientation` inverted when the conversion
    /// ran against genomic order.
    pub fn to_canonical_stranded(
        &self,
        value: Interval,
        from: CoordinateSystem,
        orientation: Orientation,
    ) -> EngineResult<(Interval, Orientation)> {
        let (interval, reversed) = match from {
            CoordinateSystem::Genomic(indexing) => (indexing.to_canonical(value)?, false),
            CoordinateSystem::SequenceRelative { offset } => {
                value.validate()?;
                self.relative_to_genomic(value, offset)
            }
            CoordinateSystem::AnchorRelative { anchor, skip_zero } => {
                value.validate()?;
                self.anchor_to_genomic(value, anchor, skip_zero)?
            }
        };
        Ok((interval, flip_if(orientation, reversed)))
    }

    /// Convert a canonical interval into `to` coordinates
    pub fn from_canonical(&self, value: Interval, to: CoordinateSystem) -> EngineResult<Interval> {
        self.from_canonical_stranded(value, to, Orientation::Indeterminate)
            .map(|(interval, _)| interval)
    }

    /// Convert from canonical coordinates, carrying the region's strand along
    pub fn from_canonical_stranded(
        &self,
        value: Interval,
        to: CoordinateSystem,
        orientation: Orientation,
    ) -> EngineResult<(Interval, Orientation)> {
        value.validate()?;
        let (interval, reversed) = match to {
            CoordinateSystem::Genomic(indexing) => (indexing.from_canonical(value), false),
            CoordinateSystem::SequenceRelative { offset } => self.genomic_to_relative(value, offset),
            CoordinateSystem::AnchorRelative { anchor, skip_zero } => {
                self.genomic_to_anchor(value, anchor, skip_zero)?
            }
        };
        Ok((interval, flip_if(orientation, reversed)))
    }

    /// Convert directly between two coordinate systems
    pub fn convert(&self, value: Interval, from: CoordinateSystem, to: CoordinateSystem) -> EngineResult<Interval> {
        let canonical = self.to_canonical(value, from)?;
        self.from_canonical(canonical, to)
    }

    /// Relative positions to genomic; the offset is removed before mirroring
    fn relative_to_genomic(&self, value: Interval, offset: i64) -> (Interval, bool) {
        let base = self.sequence.genomic_start;
        let first = value.start - offset;
        let second = value.end - offset;

        if self.display.is_reverse() {
            let last = self.sequence.length() - 1;
            ordered_by_direction(base + last - first, base + last - second, true)
        } else {
            ordered_by_direction(base + first, base + second, false)
        }
    }

    /// Genomic to relative positions; mirroring happens before the offset is added
    fn genomic_to_relative(&self, value: Interval, offset: i64) -> (Interval, bool) {
        let base = self.sequence.genomic_start;
        let first = value.start - base;
        let second = value.end - base;

        if self.display.is_reverse() {
            let last = self.sequence.length() - 1;
            ordered_by_direction(last - first + offset, last - second + offset, true)
        } else {
            ordered_by_direction(first + offset, second + offset, false)
        }
    }

    fn anchor_to_genomic(&self, value: Interval, anchor: Anchor, skip_zero: bool) -> EngineResult<(Interval, bool)> {
        let anchor_pos = self.sequence.anchor(anchor)?;
        let first = restore_zero(value.start, skip_zero);
        let second = restore_zero(value.end, skip_zero);

        Ok(if self.sequence.orientation.is_reverse() {
            ordered_by_direction(anchor_pos - first, anchor_pos - second, true)
        } else {
            ordered_by_direction(anchor_pos + first, anchor_pos + second, false)
        })
    }

    fn genomic_to_anchor(&self, value: Interval, anchor: Anchor, skip_zero: bool) -> EngineResult<(Interval, bool)> {
        let anchor_pos = self.sequence.anchor(anchor)?;

        Ok(if self.sequence.orientation.is_reverse() {
            ordered_by_direction(
                skip_zero_delta(anchor_pos - value.start, skip_zero),
                skip_zero_delta(anchor_pos - value.end, skip_zero),
                true,
            )
        } else {
            ordered_by_direction(
                skip_zero_delta(value.start - anchor_pos, skip_zero),
                skip_zero_delta(value.end - anchor_pos, skip_zero),
                false,
            )
        })
    }
}

/// Shift non-negative anchor deltas up by one so that 0 never appears
#[inline]
fn skip_zero_delta(delta: i64, skip_zero: bool) -> i64 {
    if skip_zero && delta >= 0 {
        delta + 1
    } else {
        delta
    }
}

/// Undo [`skip_zero_delta`]; a literal 0 is read as the anchor base
#[inline]
fn restore_zero(value: i64, skip_zero: bool) -> i64 {
    if skip_zero && value > 0 {
        value - 1
    } else {
        value
    }
}

/// Build the interval from the images of (start, end) under a monotone map
#[inline]
fn ordered_by_direction(first: i64, second: i64, reversing: bool) -> (Interval, bool) {
    let (interval, _) = Interval::ordered(first, second);
    (interval, reversing)
}

#[inline]
fn flip_if(orientation: Orientation, reversed: bool) -> Orientation {
    if reversed {
        orientation.invert()
    } else {
        orientation
    }
}
