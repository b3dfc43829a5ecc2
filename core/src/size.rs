//! Size variants shared by form controls.

/// The visual size of a control. Purely presentational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Size {
    /// Compact variant.
    Small,
    /// The default variant.
    #[default]
    Default,
    /// Enlarged variant.
    Large,
}

impl Size {
    /// The variant name, as used by style sheets and backends.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Default => "default",
            Self::Large => "large",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_variants() {
        assert_eq!(Size::default().as_str(), "default");
        assert_eq!(Size::Small.as_str(), "small");
        assert_eq!(Size::Large.as_str(), "large");
    }
}
