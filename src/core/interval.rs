//! Interval value type and indexing conventions
//!
//! An [`Interval`] is just a pair of coordinates. Whether those coordinates are
//! 0- or 1-based and whether the end is inclusive is a property of the
//! coordinate system the interval is read in, described by [`Indexing`].
//! Inside the engine every interval is canonical: genomic, 1-based, end-inclusive.

use crate::core::error::{EngineError, EngineResult};
use std::cmp::Ordering;
use std::fmt;

/// A pair of coordinates with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    /// Create a validated interval
    ///
    /// # Examples
    /// ```
    /// use region_engine::core::Interval;
    /// assert!(Interval::new(10, 20).is_ok());
    /// assert!(Interval::new(10, 10).is_ok());
    /// assert!(Interval::new(20, 10).is_err());
    /// ```
    pub fn new(start: i64, end: i64) -> EngineResult<Self> {
        let interval = Self { start, end };
        interval.validate()?;
        Ok(interval)
    }

    /// Build an interval from two coordinates in either order
    ///
    /// Returns the ordered interval and whether the coordinates were swapped.
    #[inline]
    pub fn ordered(a: i64, b: i64) -> (Self, bool) {
        if a <= b {
            (Self { start: a, end: b }, false)
        } else {
            (Self { start: b, end: a }, true)
        }
    }

    /// Check the `start <= end` invariant
    #[inline]
    pub fn validate(&self) -> EngineResult<()> {
        if self.start > self.end {
            return Err(EngineError::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of bases covered (canonical, end-inclusive)
    #[inline]
    pub fn length(&self) -> i64 {
        self.end - self.start + 1
    }

    /// Shift both ends by the same amount
    #[inline]
    pub fn shift(&self, delta: i64) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Indexing convention of a positional coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Indexing {
    /// First base is numbered 0 instead of 1
    pub zero_indexed: bool,
    /// End coordinate points one past the last base
    pub exclusive_end: bool,
}

impl Indexing {
    /// 1-based, end-inclusive (the engine's internal convention)
    pub const CANONICAL: Indexing = Indexing {
        zero_indexed: false,
        exclusive_end: false,
    };

    /// 0-based, end-exclusive
    pub const BED: Indexing = Indexing {
        zero_indexed: true,
        exclusive_end: true,
    };

    /// 1-based, end-inclusive
    pub const GFF: Indexing = Indexing {
        zero_indexed: false,
        exclusive_end: false,
    };

    pub fn new(zero_indexed: bool, exclusive_end: bool) -> Self {
        Self {
            zero_indexed,
            exclusive_end,
        }
    }

    #[inline]
    fn start_shift(&self) -> i64 {
        self.zero_indexed as i64
    }

    #[inline]
    fn end_shift(&self) -> i64 {
        self.zero_indexed as i64 - self.exclusive_end as i64
    }

    /// Convert a raw interval in this convention to canonical coordinates
    ///
    /// # Examples
    /// ```
    /// use region_engine::core::{Indexing, Interval};
    /// let bed = Interval { start: 0, end: 99 };
    /// assert_eq!(Indexing::BED.to_canonical(bed).unwrap(), Interval { start: 1, end: 99 });
    /// ```
    pub fn to_canonical(&self, raw: Interval) -> EngineResult<Interval> {
        Interval::new(
            raw.start + self.start_shift(),
            raw.end + self.end_shift(),
        )
    }

    /// Convert a canonical interval into this convention
    ///
    /// The result is not validated: a one-base canonical interval becomes an
    /// `end == start + 1` pair in BED, which is how that format expresses it.
    pub fn from_canonical(&self, canonical: Interval) -> Interval {
        Interval {
            start: canonical.start - self.start_shift(),
            end: canonical.end - self.end_shift(),
        }
    }

    /// Convert a single canonical position into this convention's start numbering
    #[inline]
    pub fn position_from_canonical(&self, pos: i64) -> i64 {
        pos - self.start_shift()
    }

    /// Convert a single position in this convention's start numbering to canonical
    #[inline]
    pub fn position_to_canonical(&self, pos: i64) -> i64 {
        pos + self.start_shift()
    }
}

/// Relationship-level distance between two canonical intervals
///
/// Overlap is a distinct state rather than a negative gap. Ordering puts
/// `Overlapping` before every gap, and shorter gaps before longer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceResult {
    Overlapping,
    NoOverlap(u64),
}

impl DistanceResult {
    /// Gap in bases, or `None` when the intervals overlap
    pub fn gap(&self) -> Option<u64> {
        match self {
            DistanceResult::Overlapping => None,
            DistanceResult::NoOverlap(gap) => Some(*gap),
        }
    }

    pub fn is_overlapping(&self) -> bool {
        matches!(self, DistanceResult::Overlapping)
    }

    /// Sort key with overlap below every gap
    #[inline]
    pub(crate) fn rank(&self) -> i64 {
        match self {
            DistanceResult::Overlapping => -1,
            DistanceResult::NoOverlap(gap) => *gap as i64,
        }
    }
}

impl Ord for DistanceResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for DistanceResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DistanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceResult::Overlapping => write!(f, "overlapping"),
            DistanceResult::NoOverlap(gap) => write!(f, "{}", gap),
        }
    }
}
