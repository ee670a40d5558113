use serde::{Deserialize, Serialize};

pub use stackshuffle_core::{Accent, Pool, Role, TechCategory, TechItem};

/// One entry of the list-form pool file: a category tagged with its role key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub color: Accent,
    #[serde(default)]
    pub items: Vec<TechItem>,
}

impl From<CategoryEntry> for TechCategory {
    fn from(entry: CategoryEntry) -> Self {
        TechCategory::new(entry.label, entry.color, entry.items)
    }
}
