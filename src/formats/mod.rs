//! Format boundary adapters
//!
//! Translation between the textual fields of surrounding formats (BED12 block
//! columns, coordinate and filter parameters) and the engine's value types.

pub mod bed;
pub mod params;

pub use bed::{parse_child_types, BlockFields};
pub use params::{
    parse_orientation_policy, CoordinateSelector, FilterResolver, InMemoryResolver, PositionKind,
    TypeFilterSpec,
};
