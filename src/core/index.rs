//! Interval index for overlap and within-radius queries
//!
//! Uses rust-lapper for O(log n + k) interval queries, one tree per sequence.
//! Regions are stored by their position in the indexed slice, so the slice
//! does not need to be sorted.

use crate::core::cancel::CancelCheck;
use crate::core::error::{EngineError, EngineResult};
use crate::core::nearest::{FilterCache, PreparedFilter, TypeFilter};
use crate::core::relations::widen;
use crate::core::{Interval, Region};
use rust_lapper::{Interval as LapperInterval, Lapper};
use std::collections::HashMap;
use std::fmt;

/// Type alias for indexed region intervals
pub type RegionInterval = LapperInterval<u64, usize>;

/// Search radius for within-distance queries
pub enum Radius<'a> {
    /// Same radius for every query
    Fixed(u64),
    /// Radius resolved per query region (e.g. per type or per sequence)
    PerRegion(Box<dyn Fn(&Region) -> u64 + 'a>),
}

impl<'a> Radius<'a> {
    pub fn per_region<F>(lookup: F) -> Self
    where
        F: Fn(&Region) -> u64 + 'a,
    {
        Radius::PerRegion(Box::new(lookup))
    }

    pub fn resolve(&self, region: &Region) -> u64 {
        match self {
            Radius::Fixed(radius) => *radius,
            Radius::PerRegion(lookup) => lookup(region),
        }
    }
}

impl fmt::Debug for Radius<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radius::Fixed(radius) => f.debug_tuple("Fixed").field(radius).finish(),
            Radius::PerRegion(_) => write!(f, "PerRegion(..)"),
        }
    }
}

/// Interval index over a region slice, organized by sequence
pub struct RegionIndex<'a> {
    regions: &'a [Region],
    /// Sequence name -> interval tree of region indices
    maps: HashMap<String, Lapper<u64, usize>>,
}

impl<'a> RegionIndex<'a> {
    /// Build the index; fails with `InvalidInterval` for inverted or negative intervals
    pub fn new(regions: &'a [Region]) -> EngineResult<Self> {
        let mut by_sequence: HashMap<String, Vec<RegionInterval>> = HashMap::new();

        for (index, region) in regions.iter().enumerate() {
            by_sequence
                .entry(region.sequence.clone())
                .or_default()
                .push(to_lapper(&region.interval, index)?);
        }

        let maps = by_sequence
            .into_iter()
            .map(|(sequence, intervals)| (sequence, Lapper::new(intervals)))
            .collect();

        Ok(Self { regions, maps })
    }

    pub fn regions(&self) -> &'a [Region] {
        self.regions
    }

    /// Total number of indexed regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Check if any region lies on a sequence
    pub fn has_sequence(&self, sequence: &str) -> bool {
        self.maps.contains_key(sequence)
    }

    /// Indices of regions on `sequence` overlapping a canonical interval, ascending
    pub fn overlapping(&self, sequence: &str, interval: &Interval) -> EngineResult<Vec<usize>> {
        interval.validate()?;
        let mut hits = self.query(sequence, interval);
        hits.sort_unstable();
        Ok(hits)
    }

    /// Indices of regions within `radius` bases of `query`, ascending
    ///
    /// `query` itself is skipped by identity.
    pub fn within(&self, query: &Region, radius: u64, filter: &TypeFilter<'_>) -> EngineResult<Vec<usize>> {
        let mut cache = FilterCache::new(filter);
        self.within_prepared(query, radius, &cache.for_query(&query.region_type))
    }

    /// Within-radius neighbours of every indexed region, in slice order
    pub fn within_all<F>(
        &self,
        radius: &Radius<'_>,
        filter: &TypeFilter<'_>,
        cancel: &mut CancelCheck<F>,
    ) -> EngineResult<Vec<Vec<usize>>>
    where
        F: FnMut() -> bool,
    {
        log::debug!("Within-radius scan over {} regions", self.regions.len());
        let mut cache = FilterCache::new(filter);
        let mut results = Vec::with_capacity(self.regions.len());

        for region in self.regions {
            cancel.tick()?;
            let prepared = cache.for_query(&region.region_type);
            results.push(self.within_prepared(region, radius.resolve(region), &prepared)?);
        }
        Ok(results)
    }

    fn within_prepared(&self, query: &Region, radius: u64, filter: &PreparedFilter<'_>) -> EngineResult<Vec<usize>> {
        let radius = i64::try_from(radius).map_err(|_| EngineError::InvalidInterval {
            start: query.interval.start,
            end: query.interval.end,
        })?;
        let widened = widen(&query.interval, radius)?;

        let mut hits: Vec<usize> = self
            .query(&query.sequence, &widened)
            .into_iter()
            .filter(|&index| {
                let candidate = &self.regions[index];
                !std::ptr::eq(query, candidate) && filter.accepts(&candidate.region_type)
            })
            .collect();
        hits.sort_unstable();
        Ok(hits)
    }

    fn query(&self, sequence: &str, interval: &Interval) -> Vec<usize> {
        match self.maps.get(sequence) {
            Some(lapper) => {
                // canonical [start, end] is [start, end + 1) for the tree
                let start = interval.start.max(0) as u64;
                let stop = interval.end.saturating_add(1).max(0) as u64;
                lapper.find(start, stop).map(|iv| iv.val).collect()
            }
            None => vec![],
        }
    }
}

fn to_lapper(interval: &Interval, index: usize) -> EngineResult<RegionInterval> {
    interval.validate()?;
    if interval.start < 0 {
        return Err(EngineError::InvalidInterval {
            start: interval.start,
            end: interval.end,
        });
    }
    Ok(LapperInterval {
        start: interval.start as u64,
        stop: interval.end as u64 + 1,
        val: index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cancel::never_cancelled;
    use std::collections::HashSet;

    fn region(sequence: &str, start: i64, end: i64, region_type: &str) -> Region {
        Region::new(sequence, Interval { start, end }, region_type)
    }

    fn create_test_regions() -> Vec<Region> {
        vec![
            region("chr1", 300, 400, "exon"),
            region("chr1", 100, 200, "promoter"),
            region("chr1", 150, 160, "tfbs"),
            region("chr2", 100, 200, "exon"),
            region("chr1", 1000, 1100, "exon"),
        ]
    }

    #[test]
    fn test_index_creation() {
        let regions = create_test_regions();
        let index = RegionIndex::new(&regions).unwrap();
        assert_eq!(index.len(), 5);
        assert!(index.has_sequence("chr1"));
        assert!(index.has_sequence("chr2"));
        assert!(!index.has_sequence("chr3"));
    }

    #[test]
    fn test_overlapping() {
        let regions = create_test_regions();
        let index = RegionIndex::new(&regions).unwrap();

        let hits = index.overlapping("chr1", &Interval { start: 155, end: 300 }).unwrap();
        assert_eq!(hits, vec![0, 1, 2]);

        // inclusive ends touch
        let hits = index.overlapping("chr1", &Interval { start: 200, end: 200 }).unwrap();
        assert_eq!(hits, vec![1]);

        let hits = index.overlapping("chr1", &Interval { start: 201, end: 299 }).unwrap();
        assert!(hits.is_empty());

        let hits = index.overlapping("chr3", &Interval { start: 1, end: 10_000 }).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_within() {
        let regions = create_test_regions();
        let index = RegionIndex::new(&regions).unwrap();

        let query = &regions[0];
        // 99 bases lie between the two, so the radius must reach 100
        let hits = index.within(query, 100, &TypeFilter::Any).unwrap();
        assert_eq!(hits, vec![1]);

        let hits = index.within(query, 99, &TypeFilter::Any).unwrap();
        assert!(hits.is_empty());

        let exons: HashSet<String> = ["exon".to_string()].into_iter().collect();
        let hits = index.within(query, 700, &TypeFilter::ByCollection(exons)).unwrap();
        assert_eq!(hits, vec![4]);
    }

    #[test]
    fn test_within_all() {
        let regions = create_test_regions();
        let index = RegionIndex::new(&regions).unwrap();
        let mut cancel = CancelCheck::new(never_cancelled);

        let radius = Radius::per_region(|r| if r.region_type == "tfbs" { 1000 } else { 0 });
        let results = index.within_all(&radius, &TypeFilter::Any, &mut cancel).unwrap();
        assert_eq!(results[0], Vec::<usize>::new());
        assert_eq!(results[1], vec![2]);
        assert_eq!(results[2], vec![0, 1, 4]);
        assert_eq!(results[3], Vec::<usize>::new());
    }

    #[test]
    fn test_within_all_partners_follow_query_type() {
        let regions = create_test_regions();
        let index = RegionIndex::new(&regions).unwrap();
        let mut cancel = CancelCheck::new(never_cancelled);

        let lookups = std::cell::Cell::new(0);
        let filter = TypeFilter::interaction_partners_of(|t: &str| {
            lookups.set(lookups.get() + 1);
            let partners: &[&str] = match t {
                "exon" => &["promoter"],
                "promoter" => &["exon", "tfbs"],
                "tfbs" => &["promoter"],
                _ => &[],
            };
            partners.iter().map(|p| p.to_string()).collect()
        });

        let results = index.within_all(&Radius::Fixed(1000), &filter, &mut cancel).unwrap();
        assert_eq!(results[0], vec![1]);
        assert_eq!(results[1], vec![0, 2, 4]);
        assert_eq!(results[2], vec![1]);
        assert_eq!(results[3], Vec::<usize>::new());
        assert_eq!(results[4], vec![1]);
        // one lookup per distinct query type
        assert_eq!(lookups.get(), 3);
    }

    #[test]
    fn test_negative_interval_rejected() {
        let regions = vec![region("chr1", -5, 10, "a")];
        assert!(RegionIndex::new(&regions).is_err());
    }
}
