//! RegionEngine - Coordinate and interval relationship engine
//!
//! Converts intervals between genomic, sequence-relative and anchor-relative
//! coordinate systems, and answers relationship queries over regions.
//!
//! # Features
//!
//! - One canonical system: genomic, 1-based, end-inclusive
//! - Strand-aware relative coordinates with TSS/TES anchors
//! - Overlap, containment, distance and percentage-overlap predicates
//! - Nearest-neighbour search with type filters
//! - Interval tree index for overlap and within-radius queries
//! - BED12-style block encoding of nested regions
//!
//! # Example
//!
//! ```
//! use region_engine::{CoordinateSystem, CoordinateTransformer, Interval, Orientation, Sequence};
//!
//! let gene = Sequence::new("geneA", 1001, 2000, Orientation::Reverse);
//! let tf = CoordinateTransformer::new(&gene, Orientation::Reverse)?;
//!
//! let canonical = tf.to_canonical(
//!     Interval { start: 0, end: 9 },
//!     CoordinateSystem::SequenceRelative { offset: 0 },
//! )?;
//! assert_eq!(canonical, Interval { start: 1991, end: 2000 });
//! # Ok::<(), region_engine::EngineError>(())
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    distance, nearest, overlaps, percentage_overlap, within, Anchor, BlockEncoding, CancelCheck,
    CoordinateSystem, CoordinateTransformer, DistanceResult, EngineError, HierarchicalRegionCodec,
    Indexing, Interval, NearestNeighborSearch, Neighbor, Orientation, OrientationPolicy, Region,
    RegionEngineError, RegionIndex, Sequence, TypeFilter,
};
pub use crate::formats::{bed, params};
