//! Category selection for catalog filtering.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The category picker's selection: everything, or one named category.
///
/// Serializes as the plain category name, with the sentinel `"All"` for
/// [`CategoryFilter::All`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Sentinel label for "no category restriction".
    pub const ALL_LABEL: &'static str = "All";

    /// Build a filter from a picker label. Empty input and `"All"` mean no restriction.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Named(label.to_owned())
        }
    }

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    /// The picker label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_everything() {
        assert!(CategoryFilter::All.matches("Weights"));
        assert!(CategoryFilter::All.matches(""));
    }

    #[test]
    fn test_named_matches_exactly() {
        let filter = CategoryFilter::from_label("Weights");
        assert!(filter.matches("Weights"));
        assert!(!filter.matches("weights"));
        assert!(!filter.matches("Yoga"));
    }

    #[test]
    fn test_blank_label_is_all() {
        assert_eq!(CategoryFilter::from_label("  "), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_label("All"), CategoryFilter::All);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&CategoryFilter::All).ok();
        assert_eq!(json.as_deref(), Some("\"All\""));
        let parsed: Option<CategoryFilter> = serde_json::from_str("\"Yoga\"").ok();
        assert_eq!(parsed, Some(CategoryFilter::Named("Yoga".to_owned())));
    }
}
