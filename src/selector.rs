//! Upstream source selection
//!
//! The coastal flag always comes from the caller; nothing here looks at
//! coordinates.

/// Which upstream forecast sources a request needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Atmospheric data only
    Standard,
    /// Atmospheric plus marine data
    Coastal,
}

impl Selection {
    #[must_use]
    pub fn use_marine_source(self) -> bool {
        matches!(self, Selection::Coastal)
    }
}

#[must_use]
pub fn select_sources(is_coastal: bool) -> Selection {
    if is_coastal {
        Selection::Coastal
    } else {
        Selection::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coastal_flag_selects_marine() {
        assert_eq!(select_sources(true), Selection::Coastal);
        assert!(select_sources(true).use_marine_source());
    }

    #[test]
    fn test_inland_is_atmospheric_only() {
        assert_eq!(select_sources(false), Selection::Standard);
        assert!(!select_sources(false).use_marine_source());
    }
}
