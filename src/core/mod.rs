//! Core coordinate and interval functionality
//!
//! This module contains the interval model, coordinate transformer,
//! relationship predicates, nearest-neighbour search, interval index
//! and the hierarchical block codec.

mod blocks;
mod cancel;
mod error;
mod index;
mod interval;
mod nearest;
mod orientation;
mod region;
mod relations;
mod transform;

pub use blocks::{BlockEncoding, HierarchicalRegionCodec};
pub use cancel::{never_cancelled, CancelCheck, CANCEL_CHECK_INTERVAL};
pub use error::{
    BlockFieldError, BlockFieldResult, EngineError, EngineResult, ParamError, ParamResult,
    RegionEngineError, Result,
};
pub use index::{Radius, RegionIndex, RegionInterval};
pub use interval::{DistanceResult, Indexing, Interval};
pub use nearest::{nearest, NearestNeighborSearch, Neighbor, TypeFilter};
pub use orientation::{relative_strand_symbol, resolve_display_strand, Orientation, OrientationPolicy};
pub use region::{Anchor, PropertyValue, Region, Sequence, THICK_END, THICK_START};
pub use relations::{
    contains, distance, overlap_length, overlaps, percentage_overlap, percentage_overlap_all,
    percentage_overlap_max, widen, within,
};
pub use transform::{CoordinateSystem, CoordinateTransformer};
