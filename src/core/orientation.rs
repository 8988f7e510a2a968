//! Orientation and display-strand resolution
//!
//! Regions and sequences carry an [`Orientation`]. What is shown to a user is
//! the orientation *relative* to a display strand chosen by an
//! [`OrientationPolicy`].

/// Strand orientation of a sequence or region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Orientation {
    #[default]
    Direct,
    Reverse,
    Indeterminate,
}

impl Orientation {
    /// Swap Direct and Reverse; Indeterminate stays as it is
    ///
    /// # Examples
    /// ```
    /// use region_engine::core::Orientation;
    /// assert_eq!(Orientation::Direct.invert(), Orientation::Reverse);
    /// assert_eq!(Orientation::Reverse.invert(), Orientation::Direct);
    /// assert_eq!(Orientation::Indeterminate.invert(), Orientation::Indeterminate);
    /// ```
    pub fn invert(&self) -> Self {
        match self {
            Orientation::Direct => Orientation::Reverse,
            Orientation::Reverse => Orientation::Direct,
            Orientation::Indeterminate => Orientation::Indeterminate,
        }
    }

    /// Parse orientation from a strand character
    ///
    /// # Examples
    /// ```
    /// use region_engine::core::Orientation;
    /// assert_eq!(Orientation::from_char('+'), Some(Orientation::Direct));
    /// assert_eq!(Orientation::from_char('-'), Some(Orientation::Reverse));
    /// assert_eq!(Orientation::from_char('.'), Some(Orientation::Indeterminate));
    /// assert_eq!(Orientation::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Orientation::Direct),
            '-' => Some(Orientation::Reverse),
            '.' => Some(Orientation::Indeterminate),
            _ => None,
        }
    }

    /// Parse orientation from a numeric strand (1, -1, 0)
    pub fn from_number(n: i64) -> Self {
        match n.signum() {
            1 => Orientation::Direct,
            -1 => Orientation::Reverse,
            _ => Orientation::Indeterminate,
        }
    }

    /// Convert to strand character
    pub fn to_char(&self) -> char {
        match self {
            Orientation::Direct => '+',
            Orientation::Reverse => '-',
            Orientation::Indeterminate => '.',
        }
    }

    /// Reverse is the only orientation that mirrors coordinates
    #[inline]
    pub fn is_reverse(&self) -> bool {
        matches!(self, Orientation::Reverse)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// How the display strand is chosen for a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OrientationPolicy {
    /// Always show the direct strand
    Direct,
    /// Always show the reverse strand
    Reverse,
    /// Show the strand the sequence itself is on
    #[default]
    RelativeToSequence,
    /// Show the strand opposite to the sequence
    Opposite,
}

impl OrientationPolicy {
    /// Parse from a user-facing policy string (case-insensitive)
    ///
    /// "From Sequence" and "From Gene" are accepted for `Relative`.
    ///
    /// # Examples
    /// ```
    /// use region_engine::core::OrientationPolicy;
    /// assert_eq!(OrientationPolicy::from_str("direct"), Some(OrientationPolicy::Direct));
    /// assert_eq!(OrientationPolicy::from_str("From Gene"), Some(OrientationPolicy::RelativeToSequence));
    /// assert_eq!(OrientationPolicy::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Some(OrientationPolicy::Direct),
            "reverse" => Some(OrientationPolicy::Reverse),
            "relative" | "from sequence" | "from gene" => Some(OrientationPolicy::RelativeToSequence),
            "opposite" => Some(OrientationPolicy::Opposite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrientationPolicy::Direct => "Direct",
            OrientationPolicy::Reverse => "Reverse",
            OrientationPolicy::RelativeToSequence => "Relative",
            OrientationPolicy::Opposite => "Opposite",
        }
    }
}

/// Resolve the effective display strand for a sequence
///
/// # Examples
/// ```
/// use region_engine::core::{resolve_display_strand, Orientation, OrientationPolicy};
/// assert_eq!(
///     resolve_display_strand(OrientationPolicy::Opposite, Orientation::Direct),
///     Orientation::Reverse
/// );
/// assert_eq!(
///     resolve_display_strand(OrientationPolicy::RelativeToSequence, Orientation::Reverse),
///     Orientation::Reverse
/// );
/// ```
pub fn resolve_display_strand(policy: OrientationPolicy, sequence_orientation: Orientation) -> Orientation {
    match policy {
        OrientationPolicy::Direct => Orientation::Direct,
        OrientationPolicy::Reverse => Orientation::Reverse,
        OrientationPolicy::RelativeToSequence => sequence_orientation,
        OrientationPolicy::Opposite => sequence_orientation.invert(),
    }
}

/// Strand symbol of a region as seen from the display strand
///
/// `'.'` for regions without orientation, `'+'` when the region's strand
/// equals the display strand, `'-'` otherwise. An oriented region never
/// matches an indeterminate display strand.
pub fn relative_strand_symbol(region: Orientation, display: Orientation) -> char {
    match region {
        Orientation::Indeterminate => '.',
        _ if region == display => '+',
        _ => '-',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_involution() {
        assert_eq!(Orientation::Direct.invert().invert(), Orientation::Direct);
        assert_eq!(Orientation::Reverse.invert().invert(), Orientation::Reverse);
    }

    #[test]
    fn test_from_number() {
        assert_eq!(Orientation::from_number(1), Orientation::Direct);
        assert_eq!(Orientation::from_number(-1), Orientation::Reverse);
        assert_eq!(Orientation::from_number(0), Orientation::Indeterminate);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Orientation::Direct), "+");
        assert_eq!(format!("{}", Orientation::Reverse), "-");
        assert_eq!(format!("{}", Orientation::Indeterminate), ".");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(OrientationPolicy::from_str("REVERSE"), Some(OrientationPolicy::Reverse));
        assert_eq!(OrientationPolicy::from_str("Relative"), Some(OrientationPolicy::RelativeToSequence));
        assert_eq!(OrientationPolicy::from_str("from sequence"), Some(OrientationPolicy::RelativeToSequence));
        assert_eq!(OrientationPolicy::from_str(" Opposite "), Some(OrientationPolicy::Opposite));
        assert_eq!(OrientationPolicy::from_str(""), None);
    }

    #[test]
    fn test_resolve_display_strand() {
        use Orientation::*;
        assert_eq!(resolve_display_strand(OrientationPolicy::Direct, Reverse), Direct);
        assert_eq!(resolve_display_strand(OrientationPolicy::Reverse, Direct), Reverse);
        assert_eq!(resolve_display_strand(OrientationPolicy::RelativeToSequence, Indeterminate), Indeterminate);
        assert_eq!(resolve_display_strand(OrientationPolicy::Opposite, Reverse), Direct);
        assert_eq!(resolve_display_strand(OrientationPolicy::Opposite, Indeterminate), Indeterminate);
    }

    #[test]
    fn test_relative_strand_symbol() {
        use Orientation::*;
        assert_eq!(relative_strand_symbol(Indeterminate, Direct), '.');
        assert_eq!(relative_strand_symbol(Direct, Direct), '+');
        assert_eq!(relative_strand_symbol(Reverse, Reverse), '+');
        assert_eq!(relative_strand_symbol(Direct, Reverse), '-');
        assert_eq!(relative_strand_symbol(Reverse, Indeterminate), '-');
        assert_eq!(relative_strand_symbol(Direct, Indeterminate), '-');
        assert_eq!(relative_strand_symbol(Indeterminate, Indeterminate), '.');
    }
}
