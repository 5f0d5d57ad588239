use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMetadata {
    pub key: String,
    pub name: String,
    /// `#rrggbb`
    pub color: String,
    pub description: String,
}

/// Which cards the explore view lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(key) => key == category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_everything() {
        assert!(CategoryFilter::All.matches("generation"));
        assert!(CategoryFilter::All.matches(""));
    }

    #[test]
    fn test_category_matches_only_its_key() {
        let filter = CategoryFilter::Category("network".into());
        assert!(filter.matches("network"));
        assert!(!filter.matches("limits"));
    }
}
