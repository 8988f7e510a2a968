//! Nearest-neighbour search over position-sorted regions
//!
//! Candidates must be sorted by canonical start. That precondition is
//! established once by the caller, when building [`NearestNeighborSearch`],
//! and is only checked in debug builds.
//!
//! The scan starts at the query's sorted position and walks both ways:
//!
//! - Rightwards (start >= query start) the gap grows monotonically, so the
//!   scan stops at the first candidate farther than the best found so far.
//! - Leftwards a candidate's end is not monotone in its start, so the scan
//!   uses `query.start - candidate.start - max_span` as a lower bound on the
//!   gap and stops once that bound exceeds the best distance.
//!
//! Ties are broken by position in the sorted list: the earliest candidate wins.

use crate::core::cancel::CancelCheck;
use crate::core::error::EngineResult;
use crate::core::relations::distance_unchecked;
use crate::core::{DistanceResult, Region};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Predicate restricting which candidates take part in a query
pub enum TypeFilter<'a> {
    /// Every candidate qualifies
    Any,
    /// Candidate type must be in the collection
    ByCollection(HashSet<String>),
    /// Candidate type must appear in the text list
    ByTextList(Vec<String>),
    /// Candidate type must be a known interaction partner of the query's type
    InteractionPartnersOf(Box<dyn Fn(&str) -> HashSet<String> + 'a>),
}

impl<'a> TypeFilter<'a> {
    /// Filter on interaction partners resolved through `lookup`
    ///
    /// The lookup receives the type of each query region.
    pub fn interaction_partners_of<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> HashSet<String> + 'a,
    {
        TypeFilter::InteractionPartnersOf(Box::new(lookup))
    }

    /// Check a candidate type for a query of type `query_type`
    ///
    /// For interaction partners this runs the lookup on every call; searches
    /// cache the partner set per query type instead.
    pub fn accepts(&self, query_type: &str, candidate_type: &str) -> bool {
        FilterCache::new(self).for_query(query_type).accepts(candidate_type)
    }
}

impl fmt::Debug for TypeFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::Any => write!(f, "Any"),
            TypeFilter::ByCollection(set) => f.debug_tuple("ByCollection").field(set).finish(),
            TypeFilter::ByTextList(list) => f.debug_tuple("ByTextList").field(list).finish(),
            TypeFilter::InteractionPartnersOf(_) => write!(f, "InteractionPartnersOf(..)"),
        }
    }
}

/// Type filter with partner sets resolved once per query type
pub(crate) struct FilterCache<'f, 'a> {
    filter: &'f TypeFilter<'a>,
    partners: HashMap<String, HashSet<String>>,
}

impl<'f, 'a> FilterCache<'f, 'a> {
    pub(crate) fn new(filter: &'f TypeFilter<'a>) -> Self {
        Self {
            filter,
            partners: HashMap::new(),
        }
    }

    /// Candidate predicate for a query of type `query_type`
    pub(crate) fn for_query(&mut self, query_type: &str) -> PreparedFilter<'_> {
        let filter = self.filter;
        match filter {
            TypeFilter::Any => PreparedFilter::Any,
            TypeFilter::ByCollection(set) => PreparedFilter::Set(set),
            TypeFilter::ByTextList(list) => PreparedFilter::List(list),
            TypeFilter::InteractionPartnersOf(lookup) => {
                let set = self
                    .partners
                    .entry(query_type.to_string())
                    .or_insert_with(|| lookup(query_type));
                PreparedFilter::Set(set)
            }
        }
    }
}

/// Candidate predicate for one query
pub(crate) enum PreparedFilter<'f> {
    Any,
    Set(&'f HashSet<String>),
    List(&'f [String]),
}

impl PreparedFilter<'_> {
    #[inline]
    pub(crate) fn accepts(&self, region_type: &str) -> bool {
        match self {
            PreparedFilter::Any => true,
            PreparedFilter::Set(set) => set.contains(region_type),
            PreparedFilter::List(list) => list.iter().any(|t| t == region_type),
        }
    }
}

/// The closest qualifying candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Position of the candidate in the sorted slice
    pub index: usize,
    pub distance: DistanceResult,
}

impl Neighbor {
    /// Gap in bases, `None` for an overlapping neighbour
    pub fn gap(&self) -> Option<u64> {
        self.distance.gap()
    }

    #[inline]
    fn beats(&self, other: &Neighbor) -> bool {
        (self.distance, self.index) < (other.distance, other.index)
    }
}

/// Nearest-neighbour search over a position-sorted region slice
#[derive(Debug, Clone, Copy)]
pub struct NearestNeighborSearch<'a> {
    candidates: &'a [Region],
    /// Longest candidate length, bounds how far left a candidate can reach
    max_span: i64,
}

impl<'a> NearestNeighborSearch<'a> {
    /// Wrap candidates sorted by canonical start
    ///
    /// Fails with `InvalidInterval` if any candidate interval is inverted.
    pub fn new(candidates: &'a [Region]) -> EngineResult<Self> {
        debug_assert!(
            candidates.windows(2).all(|w| w[0].interval.start <= w[1].interval.start),
            "candidates must be sorted by start"
        );

        let mut max_span = 0;
        for candidate in candidates {
            candidate.interval.validate()?;
            max_span = max_span.max(candidate.interval.length());
        }

        Ok(Self { candidates, max_span })
    }

    pub fn candidates(&self) -> &'a [Region] {
        self.candidates
    }

    /// Find the closest candidate to `query`
    ///
    /// `query` itself is skipped by identity, so it may be an element of the
    /// candidate slice. Candidates on other sequences are ignored.
    pub fn nearest(&self, query: &Region, allow_overlap: bool, filter: &TypeFilter<'_>) -> EngineResult<Option<Neighbor>> {
        query.interval.validate()?;
        let mut cache = FilterCache::new(filter);
        Ok(self.nearest_prepared(query, allow_overlap, &cache.for_query(&query.region_type)))
    }

    /// Nearest neighbour of every candidate among the others, in slice order
    pub fn nearest_all<F>(
        &self,
        allow_overlap: bool,
        filter: &TypeFilter<'_>,
        cancel: &mut CancelCheck<F>,
    ) -> EngineResult<Vec<Option<Neighbor>>>
    where
        F: FnMut() -> bool,
    {
        log::debug!("Nearest-neighbour scan over {} regions", self.candidates.len());
        let mut cache = FilterCache::new(filter);
        let mut results = Vec::with_capacity(self.candidates.len());

        for query in self.candidates {
            cancel.tick()?;
            let prepared = cache.for_query(&query.region_type);
            results.push(self.nearest_prepared(query, allow_overlap, &prepared));
        }

        log::debug!(
            "Nearest-neighbour scan finished: {} of {} regions have a neighbour",
            results.iter().filter(|r| r.is_some()).count(),
            results.len()
        );
        Ok(results)
    }

    fn nearest_prepared(&self, query: &Region, allow_overlap: bool, filter: &PreparedFilter<'_>) -> Option<Neighbor> {
        let q = query.interval;
        let pivot = self.candidates.partition_point(|c| c.interval.start < q.start);
        let mut best: Option<Neighbor> = None;

        // Leftwards: starts before the query, ends anywhere
        for index in (0..pivot).rev() {
            let candidate = &self.candidates[index];
            if let Some(current) = best {
                let lower_bound = q.start - candidate.interval.start - self.max_span;
                if lower_bound > current.distance.rank() {
                    log::trace!("Left scan pruned at index {}", index);
                    break;
                }
            }
            self.consider(query, index, allow_overlap, filter, &mut best);
        }

        // Rightwards: gaps never shrink
        for index in pivot..self.candidates.len() {
            let candidate = &self.candidates[index];
            let distance = distance_unchecked(&q, &candidate.interval);
            if let Some(current) = best {
                if distance > current.distance {
                    log::trace!("Right scan pruned at index {}", index);
                    break;
                }
            }
            self.consider(query, index, allow_overlap, filter, &mut best);
        }

        best
    }

    #[inline]
    fn consider(
        &self,
        query: &Region,
        index: usize,
        allow_overlap: bool,
        filter: &PreparedFilter<'_>,
        best: &mut Option<Neighbor>,
    ) {
        let candidate = &self.candidates[index];
        if std::ptr::eq(query, candidate) || candidate.sequence != query.sequence {
            return;
        }

        let distance = distance_unchecked(&query.interval, &candidate.interval);
        if distance.is_overlapping() && !allow_overlap {
            return;
        }
        if !filter.accepts(&candidate.region_type) {
            return;
        }

        let neighbor = Neighbor { index, distance };
        match best {
            Some(current) if !neighbor.beats(current) => {}
            _ => *best = Some(neighbor),
        }
    }
}

/// Find the closest candidate to `query` in a start-sorted slice
///
/// Convenience wrapper building a [`NearestNeighborSearch`] for one query; bulk
/// callers should build the search once and reuse it.
pub fn nearest(
    query: &Region,
    candidates: &[Region],
    allow_overlap: bool,
    filter: &TypeFilter<'_>,
) -> EngineResult<Option<Neighbor>> {
    NearestNeighborSearch::new(candidates)?.nearest(query, allow_overlap, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cancel::never_cancelled;
    use crate::core::{EngineError, Interval};

    fn region(start: i64, end: i64, region_type: &str) -> Region {
        Region::new("chr1", Interval { start, end }, region_type)
    }

    #[test]
    fn test_equidistant_tie_prefers_earliest() {
        let candidates = vec![region(480, 490, "a"), region(510, 520, "a")];
        let query = region(500, 500, "q");
        let result = nearest(&query, &candidates, false, &TypeFilter::Any).unwrap().unwrap();
        assert_eq!(result.index, 0);
        assert_eq!(result.gap(), Some(9));
    }

    #[test]
    fn test_long_left_candidate_is_found() {
        // The first candidate starts far left but ends right before the query
        let candidates = vec![
            region(100, 995, "a"),
            region(800, 810, "a"),
            region(900, 910, "a"),
            region(1100, 1200, "a"),
        ];
        let query = region(1000, 1050, "q");
        let result = nearest(&query, &candidates, false, &TypeFilter::Any).unwrap().unwrap();
        assert_eq!(result.index, 0);
        assert_eq!(result.distance, DistanceResult::NoOverlap(4));
    }

    #[test]
    fn test_overlap_skipped_unless_allowed() {
        let candidates = vec![region(90, 110, "a"), region(200, 210, "a")];
        let query = region(100, 120, "q");

        let result = nearest(&query, &candidates, false, &TypeFilter::Any).unwrap().unwrap();
        assert_eq!(result.index, 1);
        assert_eq!(result.gap(), Some(79));

        let result = nearest(&query, &candidates, true, &TypeFilter::Any).unwrap().unwrap();
        assert_eq!(result.index, 0);
        assert_eq!(result.distance, DistanceResult::Overlapping);
    }

    #[test]
    fn test_filter_by_collection_and_list() {
        let candidates = vec![region(10, 20, "promoter"), region(60, 70, "enhancer"), region(200, 210, "promoter")];
        let query = region(40, 50, "q");

        let set: HashSet<String> = ["promoter".to_string()].into_iter().collect();
        let result = nearest(&query, &candidates, false, &TypeFilter::ByCollection(set)).unwrap().unwrap();
        assert_eq!(result.index, 0);

        let list = TypeFilter::ByTextList(vec!["enhancer".to_string()]);
        let result = nearest(&query, &candidates, false, &list).unwrap().unwrap();
        assert_eq!(result.index, 1);

        let none = TypeFilter::ByTextList(vec!["silencer".to_string()]);
        assert_eq!(nearest(&query, &candidates, false, &none).unwrap(), None);
    }

    #[test]
    fn test_interaction_partners() {
        let candidates = vec![region(10, 20, "MYC"), region(60, 70, "MAX"), region(80, 90, "TP53")];
        let query = region(40, 45, "MYC");
        let filter = TypeFilter::interaction_partners_of(|t: &str| {
            if t == "MYC" {
                ["MAX".to_string()].into_iter().collect()
            } else {
                HashSet::new()
            }
        });
        assert!(filter.accepts("MYC", "MAX"));
        assert!(!filter.accepts("MYC", "TP53"));
        assert!(!filter.accepts("TP53", "MAX"));

        let result = nearest(&query, &candidates, false, &filter).unwrap().unwrap();
        assert_eq!(result.index, 1);
        assert_eq!(result.gap(), Some(14));
    }

    #[test]
    fn test_other_sequences_ignored() {
        let mut other = region(101, 102, "a");
        other.sequence = "chr2".to_string();
        let candidates = vec![region(10, 20, "a"), other];
        let query = region(100, 100, "q");
        let result = nearest(&query, &candidates, false, &TypeFilter::Any).unwrap().unwrap();
        assert_eq!(result.index, 0);
    }

    #[test]
    fn test_no_candidates() {
        let query = region(100, 100, "q");
        assert_eq!(nearest(&query, &[], false, &TypeFilter::Any).unwrap(), None);
    }

    #[test]
    fn test_nearest_all_skips_self() {
        let regions = vec![region(10, 20, "a"), region(30, 40, "a"), region(100, 110, "a")];
        let search = NearestNeighborSearch::new(&regions).unwrap();
        let mut cancel = CancelCheck::new(never_cancelled);
        let results = search.nearest_all(false, &TypeFilter::Any, &mut cancel).unwrap();

        let indices: Vec<usize> = results.iter().map(|r| r.unwrap().index).collect();
        assert_eq!(indices, vec![1, 0, 1]);
        assert_eq!(results[2].unwrap().gap(), Some(59));
    }

    #[test]
    fn test_nearest_all_cancelled() {
        let regions: Vec<Region> = (0..100).map(|i| region(i * 10 + 1, i * 10 + 5, "a")).collect();
        let search = NearestNeighborSearch::new(&regions).unwrap();
        let mut cancel = CancelCheck::with_interval(|| true, 16);
        assert_eq!(
            search.nearest_all(false, &TypeFilter::Any, &mut cancel),
            Err(EngineError::Cancelled)
        );
    }

    #[test]
    fn test_invalid_candidate() {
        let candidates = vec![region(10, 5, "a")];
        assert!(NearestNeighborSearch::new(&candidates).is_err());
    }
}
