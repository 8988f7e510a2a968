//! Format-level parameter translation
//!
//! Surrounding formats expose user-facing parameters ("Position",
//! "Relative-offset", a strand policy string, a type filter string). This
//! module turns them into the engine's value types.

use crate::core::{
    Anchor, CoordinateSystem, EngineError, EngineResult, Indexing, OrientationPolicy, ParamError,
    ParamResult, TypeFilter,
};
use std::collections::{HashMap, HashSet};

/// Parse an orientation policy string
///
/// # Examples
/// ```
/// use region_engine::params::parse_orientation_policy;
/// use region_engine::OrientationPolicy;
/// assert_eq!(parse_orientation_policy("From Gene").unwrap(), OrientationPolicy::RelativeToSequence);
/// assert!(parse_orientation_policy("sideways").is_err());
/// ```
pub fn parse_orientation_policy(s: &str) -> ParamResult<OrientationPolicy> {
    OrientationPolicy::from_str(s).ok_or_else(|| ParamError::UnknownOrientationPolicy(s.to_string()))
}

/// Which coordinate system a "Position" parameter selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionKind {
    #[default]
    Genomic,
    Relative,
    Anchor(Anchor),
}

impl PositionKind {
    /// Parse a position keyword (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "genomic" | "absolute" => Some(PositionKind::Genomic),
            "relative" | "sequence" => Some(PositionKind::Relative),
            _ => Anchor::from_str(s.trim()).map(PositionKind::Anchor),
        }
    }
}

/// User-facing coordinate parameters of a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinateSelector {
    pub position: PositionKind,
    pub zero_indexed: bool,
    pub exclusive_end: bool,
    pub relative_offset: i64,
    pub skip_zero: bool,
}

impl CoordinateSelector {
    /// Build a selector from a position keyword
    pub fn parse(position: &str) -> EngineResult<Self> {
        let position = PositionKind::from_str(position)
            .ok_or_else(|| EngineError::UnsupportedCoordinateSystem(position.to_string()))?;
        Ok(Self {
            position,
            ..Default::default()
        })
    }

    pub fn with_indexing(mut self, indexing: Indexing) -> Self {
        self.zero_indexed = indexing.zero_indexed;
        self.exclusive_end = indexing.exclusive_end;
        self
    }

    pub fn with_relative_offset(mut self, offset: i64) -> Self {
        self.relative_offset = offset;
        self
    }

    pub fn with_skip_zero(mut self, skip_zero: bool) -> Self {
        self.skip_zero = skip_zero;
        self
    }

    /// Engine coordinate system for these parameters
    ///
    /// Relative and anchor systems are end-inclusive, so the indexing flags
    /// only apply to genomic positions.
    pub fn coordinate_system(&self) -> CoordinateSystem {
        match self.position {
            PositionKind::Genomic => {
                CoordinateSystem::Genomic(Indexing::new(self.zero_indexed, self.exclusive_end))
            }
            PositionKind::Relative => CoordinateSystem::SequenceRelative {
                offset: self.relative_offset,
            },
            PositionKind::Anchor(anchor) => CoordinateSystem::AnchorRelative {
                anchor,
                skip_zero: self.skip_zero,
            },
        }
    }
}

/// Resolves filter object names and interaction partners
///
/// Stands in for whatever registry the surrounding application keeps.
pub trait FilterResolver {
    /// Type collection registered under `name`
    fn collection(&self, name: &str) -> Option<HashSet<String>>;

    /// Text list registered under `name`
    fn text_list(&self, name: &str) -> Option<Vec<String>>;

    /// Known interaction partners of a region type
    fn interaction_partners(&self, region_type: &str) -> HashSet<String>;
}

/// Simple resolver backed by in-memory maps
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    collections: HashMap<String, HashSet<String>>,
    text_lists: HashMap<String, Vec<String>>,
    partners: HashMap<String, HashSet<String>>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection<I, S>(mut self, name: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections
            .insert(name.into(), types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_text_list<I, S>(mut self, name: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_lists
            .insert(name.into(), types.into_iter().map(Into::into).collect());
        self
    }

    /// Register a symmetric interaction between two types
    pub fn with_interaction(mut self, a: &str, b: &str) -> Self {
        self.partners.entry(a.to_string()).or_default().insert(b.to_string());
        self.partners.entry(b.to_string()).or_default().insert(a.to_string());
        self
    }
}

impl FilterResolver for InMemoryResolver {
    fn collection(&self, name: &str) -> Option<HashSet<String>> {
        self.collections.get(name).cloned()
    }

    fn text_list(&self, name: &str) -> Option<Vec<String>> {
        self.text_lists.get(name).cloned()
    }

    fn interaction_partners(&self, region_type: &str) -> HashSet<String> {
        self.partners.get(region_type).cloned().unwrap_or_default()
    }
}

/// Parsed type filter string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilterSpec {
    /// "any"
    Any,
    /// "closest": any type, nearest only
    Closest,
    /// "interaction partner" / "interacting"
    InteractionPartner,
    /// Bare number, a search radius rather than a type filter
    Radius(u64),
    /// Name of a collection or text list
    Object(String),
}

impl TypeFilterSpec {
    /// Parse a filter string; never fails, unknown words become object names
    ///
    /// # Examples
    /// ```
    /// use region_engine::params::TypeFilterSpec;
    /// assert_eq!(TypeFilterSpec::parse("Interacting"), TypeFilterSpec::InteractionPartner);
    /// assert_eq!(TypeFilterSpec::parse("500"), TypeFilterSpec::Radius(500));
    /// assert_eq!(TypeFilterSpec::parse("enhancers"), TypeFilterSpec::Object("enhancers".into()));
    /// ```
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "any" => TypeFilterSpec::Any,
            "closest" => TypeFilterSpec::Closest,
            "interaction partner" | "interaction partners" | "interacting" => {
                TypeFilterSpec::InteractionPartner
            }
            _ => match trimmed.parse::<u64>() {
                Ok(radius) => TypeFilterSpec::Radius(radius),
                Err(_) => TypeFilterSpec::Object(trimmed.to_string()),
            },
        }
    }

    /// Radius carried by a numeric spec
    pub fn radius(&self) -> Option<u64> {
        match self {
            TypeFilterSpec::Radius(r) => Some(*r),
            _ => None,
        }
    }

    /// Resolve into an engine filter
    ///
    /// A named object is looked up as a collection first, then as a text list.
    /// Interaction partners are looked up for each query's own type.
    pub fn resolve<'r, R>(&self, resolver: &'r R) -> ParamResult<TypeFilter<'r>>
    where
        R: FilterResolver + ?Sized,
    {
        match self {
            TypeFilterSpec::Any | TypeFilterSpec::Closest => Ok(TypeFilter::Any),
            TypeFilterSpec::InteractionPartner => Ok(TypeFilter::interaction_partners_of(move |t: &str| {
                resolver.interaction_partners(t)
            })),
            TypeFilterSpec::Radius(r) => Err(ParamError::RadiusNotAFilter(*r)),
            TypeFilterSpec::Object(name) => {
                if let Some(set) = resolver.collection(name) {
                    Ok(TypeFilter::ByCollection(set))
                } else if let Some(list) = resolver.text_list(name) {
                    Ok(TypeFilter::ByTextList(list))
                } else {
                    Err(ParamError::UnknownFilterObject(name.clone()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> InMemoryResolver {
        InMemoryResolver::new()
            .with_collection("regulatory", ["enhancer", "promoter"])
            .with_text_list("marks", ["H3K4me3"])
            .with_interaction("tf", "tfbs")
    }

    #[test]
    fn test_parse_orientation_policy() {
        assert_eq!(parse_orientation_policy("direct").unwrap(), OrientationPolicy::Direct);
        assert_eq!(parse_orientation_policy("OPPOSITE").unwrap(), OrientationPolicy::Opposite);
        assert_eq!(
            parse_orientation_policy("From Sequence").unwrap(),
            OrientationPolicy::RelativeToSequence
        );
        assert_eq!(
            parse_orientation_policy("up"),
            Err(ParamError::UnknownOrientationPolicy("up".to_string()))
        );
    }

    #[test]
    fn test_position_kind() {
        assert_eq!(PositionKind::from_str("Genomic"), Some(PositionKind::Genomic));
        assert_eq!(PositionKind::from_str("relative"), Some(PositionKind::Relative));
        assert_eq!(PositionKind::from_str("TSS"), Some(PositionKind::Anchor(Anchor::Tss)));
        assert_eq!(PositionKind::from_str("tes"), Some(PositionKind::Anchor(Anchor::Tes)));
        assert_eq!(PositionKind::from_str("cds"), None);
    }

    #[test]
    fn test_selector_to_system() {
        let sel = CoordinateSelector::parse("genomic").unwrap().with_indexing(Indexing::BED);
        assert_eq!(sel.coordinate_system(), CoordinateSystem::Genomic(Indexing::BED));

        let sel = CoordinateSelector::parse("relative").unwrap().with_relative_offset(1);
        assert_eq!(sel.coordinate_system(), CoordinateSystem::SequenceRelative { offset: 1 });

        let sel = CoordinateSelector::parse("tss").unwrap().with_skip_zero(true);
        assert_eq!(
            sel.coordinate_system(),
            CoordinateSystem::AnchorRelative {
                anchor: Anchor::Tss,
                skip_zero: true
            }
        );

        assert_eq!(
            CoordinateSelector::parse("cds"),
            Err(EngineError::UnsupportedCoordinateSystem("cds".to_string()))
        );
    }

    #[test]
    fn test_type_filter_spec_parse() {
        assert_eq!(TypeFilterSpec::parse("ANY"), TypeFilterSpec::Any);
        assert_eq!(TypeFilterSpec::parse(" closest "), TypeFilterSpec::Closest);
        assert_eq!(TypeFilterSpec::parse("interaction partner"), TypeFilterSpec::InteractionPartner);
        assert_eq!(TypeFilterSpec::parse("0"), TypeFilterSpec::Radius(0));
        assert_eq!(TypeFilterSpec::parse("-5"), TypeFilterSpec::Object("-5".to_string()));
        assert_eq!(TypeFilterSpec::parse("500").radius(), Some(500));
        assert_eq!(TypeFilterSpec::parse("any").radius(), None);
    }

    #[test]
    fn test_resolve() {
        let r = resolver();

        let filter = TypeFilterSpec::Any.resolve(&r).unwrap();
        assert!(filter.accepts("tf", "anything"));

        let filter = TypeFilterSpec::Object("regulatory".into()).resolve(&r).unwrap();
        assert!(filter.accepts("tf", "enhancer"));
        assert!(!filter.accepts("tf", "exon"));

        let filter = TypeFilterSpec::Object("marks".into()).resolve(&r).unwrap();
        assert!(matches!(filter, TypeFilter::ByTextList(_)));
        assert!(filter.accepts("tf", "H3K4me3"));

        let filter = TypeFilterSpec::InteractionPartner.resolve(&r).unwrap();
        assert!(filter.accepts("tf", "tfbs"));
        assert!(!filter.accepts("tf", "tf"));
        assert!(filter.accepts("tfbs", "tf"));

        assert_eq!(
            TypeFilterSpec::Object("nope".into()).resolve(&r).unwrap_err(),
            ParamError::UnknownFilterObject("nope".to_string())
        );
        assert_eq!(
            TypeFilterSpec::Radius(10).resolve(&r).unwrap_err(),
            ParamError::RadiusNotAFilter(10)
        );
    }

    #[test]
    fn test_resolve_through_trait_object() {
        let r = resolver();
        let dyn_resolver: &dyn FilterResolver = &r;
        let filter = TypeFilterSpec::InteractionPartner.resolve(dyn_resolver).unwrap();
        assert!(filter.accepts("tfbs", "tf"));
    }
}
