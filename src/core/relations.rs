//! Interval relationship predicates and measures
//!
//! All functions take canonical intervals (genomic, 1-based, end-inclusive)
//! and fail with `InvalidInterval` if either input has `start > end`.

use crate::core::cancel::CancelCheck;
use crate::core::error::{EngineError, EngineResult};
use crate::core::{DistanceResult, Interval};

#[inline]
fn check_pair(a: &Interval, b: &Interval) -> EngineResult<()> {
    a.validate()?;
    b.validate()
}

#[inline]
fn overlaps_unchecked(a: &Interval, b: &Interval) -> bool {
    !(a.end < b.start || b.end < a.start)
}

/// True unless one interval ends before the other starts
///
/// # Examples
/// ```
/// use region_engine::core::{overlaps, Interval};
/// let a = Interval { start: 10, end: 20 };
/// assert!(overlaps(&a, &Interval { start: 20, end: 30 }).unwrap());
/// assert!(!overlaps(&a, &Interval { start: 21, end: 30 }).unwrap());
/// ```
pub fn overlaps(a: &Interval, b: &Interval) -> EngineResult<bool> {
    check_pair(a, b)?;
    Ok(overlaps_unchecked(a, b))
}

/// True when `inner` lies entirely inside `outer`
pub fn contains(outer: &Interval, inner: &Interval) -> EngineResult<bool> {
    check_pair(outer, inner)?;
    Ok(outer.start <= inner.start && outer.end >= inner.end)
}

/// Number of bases shared by both intervals
pub fn overlap_length(a: &Interval, b: &Interval) -> EngineResult<u64> {
    check_pair(a, b)?;
    Ok(overlap_length_unchecked(a, b))
}

#[inline]
fn overlap_length_unchecked(a: &Interval, b: &Interval) -> u64 {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    if end < start {
        0
    } else {
        (end - start + 1) as u64
    }
}

/// Number of bases strictly between two intervals, or `Overlapping`
///
/// # Examples
/// ```
/// use region_engine::core::{distance, DistanceResult, Interval};
/// let a = Interval { start: 10, end: 20 };
/// assert_eq!(distance(&a, &Interval { start: 25, end: 30 }).unwrap(), DistanceResult::NoOverlap(4));
/// assert_eq!(distance(&a, &Interval { start: 15, end: 30 }).unwrap(), DistanceResult::Overlapping);
/// ```
pub fn distance(a: &Interval, b: &Interval) -> EngineResult<DistanceResult> {
    check_pair(a, b)?;
    Ok(distance_unchecked(a, b))
}

#[inline]
pub(crate) fn distance_unchecked(a: &Interval, b: &Interval) -> DistanceResult {
    if overlaps_unchecked(a, b) {
        DistanceResult::Overlapping
    } else {
        let gap = a.start.max(b.start) - a.end.min(b.end) - 1;
        DistanceResult::NoOverlap(gap as u64)
    }
}

/// Fraction of `query` covered by `other`, in `[0, 1]`
///
/// # Examples
/// ```
/// use region_engine::core::{percentage_overlap, Interval};
/// let query = Interval { start: 100, end: 199 };
/// assert_eq!(percentage_overlap(&query, &Interval { start: 150, end: 300 }).unwrap(), 0.5);
/// assert_eq!(percentage_overlap(&query, &Interval { start: 50, end: 300 }).unwrap(), 1.0);
/// ```
pub fn percentage_overlap(query: &Interval, other: &Interval) -> EngineResult<f64> {
    check_pair(query, other)?;
    Ok(percentage_overlap_unchecked(query, other))
}

#[inline]
fn percentage_overlap_unchecked(query: &Interval, other: &Interval) -> f64 {
    if other.start <= query.start && other.end >= query.end {
        return 1.0;
    }
    overlap_length_unchecked(query, other) as f64 / query.length() as f64
}

/// Fraction of `query` covered by each candidate, in input order
pub fn percentage_overlap_all<F>(
    query: &Interval,
    others: &[Interval],
    cancel: &mut CancelCheck<F>,
) -> EngineResult<Vec<f64>>
where
    F: FnMut() -> bool,
{
    query.validate()?;
    let mut result = Vec::with_capacity(others.len());
    for other in others {
        cancel.tick()?;
        other.validate()?;
        result.push(percentage_overlap_unchecked(query, other));
    }
    Ok(result)
}

/// Largest fraction of `query` covered by any single candidate
///
/// Stops scanning as soon as one candidate covers the whole query. Returns
/// 0.0 for an empty candidate list.
pub fn percentage_overlap_max<F>(
    query: &Interval,
    others: &[Interval],
    cancel: &mut CancelCheck<F>,
) -> EngineResult<f64>
where
    F: FnMut() -> bool,
{
    query.validate()?;
    let mut best = 0.0f64;
    for other in others {
        cancel.tick()?;
        other.validate()?;
        best = best.max(percentage_overlap_unchecked(query, other));
        if best >= 1.0 {
            break;
        }
    }
    Ok(best)
}

/// Grow both ends of an interval by `radius`
pub fn widen(interval: &Interval, radius: i64) -> EngineResult<Interval> {
    interval.validate()?;
    let invalid = || EngineError::InvalidInterval {
        start: interval.start.saturating_sub(radius),
        end: interval.end.saturating_add(radius),
    };
    if radius < 0 {
        return Err(invalid());
    }
    Ok(Interval {
        start: interval.start.checked_sub(radius).ok_or_else(invalid)?,
        end: interval.end.checked_add(radius).ok_or_else(invalid)?,
    })
}

/// True when `b` overlaps `a` widened by `radius` on both sides
pub fn within(a: &Interval, b: &Interval, radius: i64) -> EngineResult<bool> {
    b.validate()?;
    let widened = widen(a, radius)?;
    Ok(overlaps_unchecked(&widened, b))
}
