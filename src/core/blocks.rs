//! Block-structured (BED12-style) region codec
//!
//! A nested region is a parent interval plus an ordered list of child
//! sub-intervals. On the wire it becomes a block list: one size and one start
//! offset (relative to the parent start) per child, plus an optional thick
//! range on the parent.
//!
//! Offsets and sizes do not depend on the indexing convention; only the
//! absolute thick range does, so the codec carries an [`Indexing`] for it.

use crate::core::error::{EngineError, EngineResult};
use crate::core::{Indexing, Interval, Region};

/// Compact block list describing a region's children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockEncoding {
    pub block_count: usize,
    pub block_sizes: Vec<u64>,
    /// Offsets from the parent start
    pub block_starts: Vec<u64>,
    /// Thick range in the codec's indexing convention, not validated
    pub thick_range: Option<Interval>,
    /// Per-child types, present only when every child has a non-default type
    pub child_types: Option<Vec<String>>,
}

impl BlockEncoding {
    /// Check that the size and start lists match the declared count
    pub fn check_counts(&self) -> EngineResult<()> {
        if self.block_sizes.len() != self.block_count || self.block_starts.len() != self.block_count {
            return Err(EngineError::BlockCountMismatch {
                declared: self.block_count,
                sizes: self.block_sizes.len(),
                starts: self.block_starts.len(),
            });
        }
        if let Some(types) = &self.child_types {
            if types.len() != self.block_count {
                return Err(EngineError::ChildTypeCountMismatch {
                    declared: self.block_count,
                    types: types.len(),
                });
            }
        }
        Ok(())
    }

    /// Iterate over `(offset, size)` pairs
    pub fn blocks(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.block_starts.iter().copied().zip(self.block_sizes.iter().copied())
    }
}

/// Encodes and decodes nested regions as block lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchicalRegionCodec {
    indexing: Indexing,
}

impl Default for HierarchicalRegionCodec {
    fn default() -> Self {
        Self::new(Indexing::CANONICAL)
    }
}

impl HierarchicalRegionCodec {
    /// Codec whose thick range uses `indexing`
    pub fn new(indexing: Indexing) -> Self {
        Self { indexing }
    }

    /// Codec for BED12 (0-based, end-exclusive thick range)
    pub fn bed() -> Self {
        Self::new(Indexing::BED)
    }

    pub fn indexing(&self) -> Indexing {
        self.indexing
    }

    /// Encode a parent region's children as blocks
    ///
    /// Children must already be sorted by genomic start. A child starting
    /// before the parent fails with `InvalidInterval`.
    pub fn encode(&self, parent: &Region) -> EngineResult<BlockEncoding> {
        parent.interval.validate()?;
        debug_assert!(
            parent.children.windows(2).all(|w| w[0].interval.start <= w[1].interval.start),
            "children must be sorted by start"
        );

        let mut block_sizes = Vec::with_capacity(parent.children.len());
        let mut block_starts = Vec::with_capacity(parent.children.len());
        let mut custom_types = true;

        for child in &parent.children {
            child.interval.validate()?;
            let offset = child.interval.start - parent.interval.start;
            if offset < 0 {
                return Err(EngineError::InvalidInterval {
                    start: child.interval.start,
                    end: child.interval.end,
                });
            }
            block_starts.push(offset as u64);
            block_sizes.push(child.interval.length() as u64);
            custom_types &= child.region_type != child.location();
        }

        let child_types = if custom_types && !parent.children.is_empty() {
            Some(parent.children.iter().map(|c| c.region_type.clone()).collect())
        } else {
            None
        };

        Ok(BlockEncoding {
            block_count: parent.children.len(),
            block_sizes,
            block_starts,
            thick_range: parent.thick_range().map(|t| self.indexing.from_canonical(t)),
            child_types,
        })
    }

    /// Decode block offsets into canonical child intervals
    ///
    /// # Examples
    /// ```
    /// use region_engine::core::{BlockEncoding, HierarchicalRegionCodec, Interval};
    /// let encoding = BlockEncoding {
    ///     block_count: 2,
    ///     block_sizes: vec![20, 30],
    ///     block_starts: vec![0, 70],
    ///     ..Default::default()
    /// };
    /// let children = HierarchicalRegionCodec::default()
    ///     .decode_intervals(Interval { start: 2000, end: 2100 }, &encoding)
    ///     .unwrap();
    /// assert_eq!(children, vec![Interval { start: 2000, end: 2019 }, Interval { start: 2070, end: 2099 }]);
    /// ```
    pub fn decode_intervals(&self, parent_interval: Interval, encoding: &BlockEncoding) -> EngineResult<Vec<Interval>> {
        parent_interval.validate()?;
        encoding.check_counts()?;

        encoding
            .blocks()
            .map(|(offset, size)| {
                let start = parent_interval.start + offset as i64;
                Interval::new(start, start + size as i64 - 1)
            })
            .collect()
    }

    /// Decode blocks into child regions of `parent`
    ///
    /// Children inherit the parent's sequence and orientation. Their type is
    /// taken from the embedded type list, or defaults to their own location.
    pub fn decode(&self, parent: &Region, encoding: &BlockEncoding) -> EngineResult<Vec<Region>> {
        let intervals = self.decode_intervals(parent.interval, encoding)?;

        let children = intervals
            .into_iter()
            .enumerate()
            .map(|(i, interval)| {
                let mut child = Region::new(parent.sequence.clone(), interval, String::new())
                    .with_orientation(parent.orientation);
                child.region_type = match &encoding.child_types {
                    Some(types) => types[i].clone(),
                    None => child.location(),
                };
                child
            })
            .collect();

        Ok(children)
    }

    /// Canonical thick range of an encoding, if present and valid
    pub fn decode_thick_range(&self, encoding: &BlockEncoding) -> Option<Interval> {
        let raw = encoding.thick_range?;
        match self.indexing.to_canonical(raw) {
            Ok(thick) => Some(thick),
            Err(_) if raw.start == raw.end && self.indexing.exclusive_end => {
                // empty thick range, the usual way of saying "no coding part"
                None
            }
            Err(e) => {
                log::warn!("Dropping thick range {}: {}", raw, e);
                None
            }
        }
    }

    /// Replace `parent`'s children and thick range with the decoded ones
    pub fn decode_into(&self, parent: &mut Region, encoding: &BlockEncoding) -> EngineResult<()> {
        parent.children = self.decode(parent, encoding)?;
        match self.decode_thick_range(encoding) {
            Some(thick) => parent.set_thick_range(thick),
            None => parent.clear_thick_range(),
        }
        Ok(())
    }
}
