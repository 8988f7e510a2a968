//! Property-based tests for orientation resolution and format parameters

use proptest::prelude::*;
use region_engine::core::{
    relative_strand_symbol, resolve_display_strand, Anchor, CoordinateSystem, Indexing, Orientation,
    OrientationPolicy, ParamError,
};
use region_engine::params::{
    parse_orientation_policy, CoordinateSelector, InMemoryResolver, TypeFilterSpec,
};

// ============================================================================
// Generators
// ============================================================================

fn arb_orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![
        Just(Orientation::Direct),
        Just(Orientation::Reverse),
        Just(Orientation::Indeterminate),
    ]
}

fn arb_policy() -> impl Strategy<Value = OrientationPolicy> {
    prop_oneof![
        Just(OrientationPolicy::Direct),
        Just(OrientationPolicy::Reverse),
        Just(OrientationPolicy::RelativeToSequence),
        Just(OrientationPolicy::Opposite),
    ]
}

/// Randomly change the case of each character
fn arb_case_mix(word: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect()
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Policy strings parse regardless of case
    #[test]
    fn prop_policy_case_insensitive(policy in arb_policy(), upper in any::<bool>()) {
        let text = if upper {
            policy.as_str().to_uppercase()
        } else {
            policy.as_str().to_lowercase()
        };
        prop_assert_eq!(parse_orientation_policy(&text).unwrap(), policy);
    }

    /// "From Sequence" and "From Gene" mean Relative in any case
    #[test]
    fn prop_policy_synonyms(
        seq in arb_case_mix("from sequence"),
        gene in arb_case_mix("from gene"),
    ) {
        prop_assert_eq!(parse_orientation_policy(&seq).unwrap(), OrientationPolicy::RelativeToSequence);
        prop_assert_eq!(parse_orientation_policy(&gene).unwrap(), OrientationPolicy::RelativeToSequence);
    }

    /// Opposite is always the inverse of Relative
    #[test]
    fn prop_opposite_inverts_relative(seq in arb_orientation()) {
        let relative = resolve_display_strand(OrientationPolicy::RelativeToSequence, seq);
        let opposite = resolve_display_strand(OrientationPolicy::Opposite, seq);
        prop_assert_eq!(relative, seq);
        prop_assert_eq!(opposite, seq.invert());
    }

    /// A region on the displayed strand reads '+', the other strand '-'
    #[test]
    fn prop_relative_symbol(region in arb_orientation(), display in arb_orientation()) {
        let symbol = relative_strand_symbol(region, display);
        prop_assert!(matches!(symbol, '+' | '-' | '.'));
        if region == Orientation::Indeterminate {
            prop_assert_eq!(symbol, '.');
        }
        if display == Orientation::Reverse && region != Orientation::Indeterminate {
            prop_assert_eq!(symbol, region.invert().to_char());
        }
        if display == Orientation::Indeterminate && region != Orientation::Indeterminate {
            prop_assert_eq!(symbol, '-');
        }
    }

    /// Bare non-negative integers are radii, never object names
    #[test]
    fn prop_numeric_filter_is_radius(radius in any::<u64>()) {
        let spec = TypeFilterSpec::parse(&radius.to_string());
        prop_assert_eq!(spec.radius(), Some(radius));
        let resolver = InMemoryResolver::new();
        prop_assert_eq!(
            spec.resolve(&resolver).unwrap_err(),
            ParamError::RadiusNotAFilter(radius)
        );
    }

    /// Genomic selectors carry their indexing flags through
    #[test]
    fn prop_genomic_selector(zero in any::<bool>(), exclusive in any::<bool>()) {
        let system = CoordinateSelector::parse("Genomic")
            .unwrap()
            .with_indexing(Indexing::new(zero, exclusive))
            .coordinate_system();
        prop_assert_eq!(system, CoordinateSystem::Genomic(Indexing::new(zero, exclusive)));
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_opposite_example() {
    assert_eq!(
        resolve_display_strand(OrientationPolicy::Opposite, Orientation::Direct),
        Orientation::Reverse
    );
}

#[test]
fn test_anchor_selector() {
    let system = CoordinateSelector::parse("TES").unwrap().with_skip_zero(true).coordinate_system();
    assert_eq!(
        system,
        CoordinateSystem::AnchorRelative {
            anchor: Anchor::Tes,
            skip_zero: true
        }
    );
}

#[test]
fn test_keyword_filters() {
    let resolver = InMemoryResolver::new()
        .with_collection("coding", ["exon", "cds"])
        .with_interaction("tf", "tfbs");

    let filter = TypeFilterSpec::parse("closest").resolve(&resolver).unwrap();
    assert!(filter.accepts("tf", "intron"));

    let filter = TypeFilterSpec::parse("interacting").resolve(&resolver).unwrap();
    assert!(filter.accepts("tf", "tfbs"));
    assert!(!filter.accepts("tf", "exon"));

    let filter = TypeFilterSpec::parse("coding").resolve(&resolver).unwrap();
    assert!(filter.accepts("tf", "cds"));
    assert!(!filter.accepts("tf", "tfbs"));
}
