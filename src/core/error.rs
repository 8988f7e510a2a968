//! Error types for RegionEngine
//!
//! Defines all error types used throughout the library.

use crate::core::region::Anchor;
use thiserror::Error;

/// Main error type for RegionEngine operations
#[derive(Debug, Error)]
pub enum RegionEngineError {
    /// Coordinate and interval engine errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// BED12 block field errors
    #[error("Block field error: {0}")]
    BlockField(#[from] BlockFieldError),

    /// Format-level parameter errors
    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),
}

/// Errors raised by the coordinate and interval engine
///
/// All of these are recoverable by the caller; the format layer is expected
/// to attach line numbers before reporting them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// start > end after normalization, or a sequence with non-positive length
    #[error("Invalid interval: start ({start}) > end ({end})")]
    InvalidInterval { start: i64, end: i64 },

    /// Anchor-relative conversion requested but the anchor is absent
    #[error("Sequence has no {0} anchor")]
    MissingAnchor(Anchor),

    /// Declared block count disagrees with the supplied lists
    #[error("Block count mismatch: declared {declared}, got {sizes} sizes and {starts} starts")]
    BlockCountMismatch {
        declared: usize,
        sizes: usize,
        starts: usize,
    },

    /// Embedded child type list disagrees with the declared block count
    #[error("Child type count mismatch: declared {declared} blocks, got {types} types")]
    ChildTypeCountMismatch { declared: usize, types: usize },

    /// Conversion the transformer does not define
    #[error("Unsupported coordinate system: {0}")]
    UnsupportedCoordinateSystem(String),

    /// Bulk traversal observed a cancellation signal
    #[error("Operation cancelled")]
    Cancelled,
}

/// Errors that can occur while parsing BED12 block fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockFieldError {
    /// Failed to parse an integer element
    #[error("Invalid number in field {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// thickStart given without thickEnd or vice versa
    #[error("thickStart and thickEnd must be given together")]
    UnpairedThickRange,
}

/// Errors that can occur while translating format-level parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Unknown orientation policy string
    #[error("Unrecognized orientation policy: '{0}'")]
    UnknownOrientationPolicy(String),

    /// Filter names a collection or text list the resolver does not know
    #[error("Unknown collection or text list: '{0}'")]
    UnknownFilterObject(String),

    /// A numeric radius was given where a type filter was required
    #[error("Numeric radius {0} is not a type filter")]
    RadiusNotAFilter(u64),
}

/// Result type alias for RegionEngine operations
pub type Result<T> = std::result::Result<T, RegionEngineError>;

/// Result type alias for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Result type alias for block field parsing
pub type BlockFieldResult<T> = std::result::Result<T, BlockFieldError>;

/// Result type alias for parameter translation
pub type ParamResult<T> = std::result::Result<T, ParamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidInterval { start: 10, end: 5 };
        assert_eq!(err.to_string(), "Invalid interval: start (10) > end (5)");

        let err = EngineError::MissingAnchor(Anchor::Tss);
        assert_eq!(err.to_string(), "Sequence has no TSS anchor");

        let err = EngineError::BlockCountMismatch { declared: 3, sizes: 2, starts: 3 };
        assert_eq!(
            err.to_string(),
            "Block count mismatch: declared 3, got 2 sizes and 3 starts"
        );
    }

    #[test]
    fn test_aggregate_from() {
        let err: RegionEngineError = EngineError::Cancelled.into();
        assert!(matches!(err, RegionEngineError::Engine(EngineError::Cancelled)));

        let err: RegionEngineError = ParamError::RadiusNotAFilter(5).into();
        assert_eq!(err.to_string(), "Parameter error: Numeric radius 5 is not a type filter");
    }
}
