use serde::{Deserialize, Serialize};

/// Icon given to items added without one.
pub const DEFAULT_ICON: &str = "🔧";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TechItem {
    pub name: String,
    pub icon: String,
}

impl TechItem {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }

    /// Builds an item from editor input. Blank names yield `None`; a blank
    /// or missing icon falls back to [`DEFAULT_ICON`].
    pub fn from_input(name: &str, icon: Option<&str>) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let icon = icon
            .map(str::trim)
            .filter(|icon| !icon.is_empty())
            .unwrap_or(DEFAULT_ICON);
        Some(Self::new(name, icon))
    }
}

/// Colour tag a front end may use when drawing a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    #[default]
    Primary,
    Secondary,
    Accent,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechCategory {
    pub label: String,
    #[serde(default)]
    pub color: Accent,
    #[serde(default)]
    pub items: Vec<TechItem>,
}

impl TechCategory {
    pub fn new(label: impl Into<String>, color: Accent, items: Vec<TechItem>) -> Self {
        Self {
            label: label.into(),
            color,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, name: &str) -> Option<&TechItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.item(name).is_some()
    }

    /// First name that appears more than once, if any.
    pub fn duplicate_name(&self) -> Option<&str> {
        self.items.iter().enumerate().find_map(|(idx, item)| {
            self.items[..idx]
                .iter()
                .any(|prev| prev.name == item.name)
                .then_some(item.name.as_str())
        })
    }
}
