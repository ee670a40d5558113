use crate::{Accent, Role, TechCategory, TechItem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("{role} already has an item named {name:?}")]
    DuplicateItem { role: Role, name: String },
    #[error("{role} has no item named {name:?}")]
    UnknownItem { role: Role, name: String },
}

/// Every selectable option, one category per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub frontend: TechCategory,
    pub backend: TechCategory,
    pub database: TechCategory,
}

impl Pool {
    pub fn new(frontend: TechCategory, backend: TechCategory, database: TechCategory) -> Self {
        Self {
            frontend,
            backend,
            database,
        }
    }

    pub fn category(&self, role: Role) -> &TechCategory {
        match role {
            Role::Frontend => &self.frontend,
            Role::Backend => &self.backend,
            Role::Database => &self.database,
        }
    }

    pub fn category_mut(&mut self, role: Role) -> &mut TechCategory {
        match role {
            Role::Frontend => &mut self.frontend,
            Role::Backend => &mut self.backend,
            Role::Database => &mut self.database,
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = (Role, &TechCategory)> {
        Role::ALL.into_iter().map(move |role| (role, self.category(role)))
    }

    /// First role, in role order, whose category has no items.
    pub fn first_empty_role(&self) -> Option<Role> {
        self.categories()
            .find(|(_, category)| category.is_empty())
            .map(|(role, _)| role)
    }

    /// Number of distinct stacks this pool can produce.
    pub fn combination_count(&self) -> usize {
        self.categories()
            .map(|(_, category)| category.len())
            .fold(1usize, usize::saturating_mul)
    }

    /// Appends `item` to the end of the role's category.
    pub fn add_item(&mut self, role: Role, item: TechItem) -> Result<(), PoolError> {
        let category = self.category_mut(role);
        if category.contains(&item.name) {
            return Err(PoolError::DuplicateItem {
                role,
                name: item.name,
            });
        }
        category.items.push(item);
        Ok(())
    }

    /// Removes the named item; the remaining items keep their order.
    pub fn remove_item(&mut self, role: Role, name: &str) -> Result<TechItem, PoolError> {
        let category = self.category_mut(role);
        let Some(idx) = category.items.iter().position(|item| item.name == name) else {
            return Err(PoolError::UnknownItem {
                role,
                name: name.to_string(),
            });
        };
        Ok(category.items.remove(idx))
    }
}

impl Default for Pool {
    fn default() -> Self {
        fn items(entries: &[(&str, &str)]) -> Vec<TechItem> {
            entries
                .iter()
                .map(|(name, icon)| TechItem::new(*name, *icon))
                .collect()
        }

        Self {
            frontend: TechCategory::new(
                Role::Frontend.label(),
                Accent::Primary,
                items(&[
                    ("React", "⚛️"),
                    ("Angular", "🅰️"),
                    ("Vue.js", "💚"),
                    ("Svelte", "🔥"),
                    ("Next.js", "▲"),
                    ("HTML/CSS/JS", "🌐"),
                    ("Solid.js", "💎"),
                    ("Flutter Web", "🦋"),
                ]),
            ),
            backend: TechCategory::new(
                Role::Backend.label(),
                Accent::Secondary,
                items(&[
                    ("Node.js", "🟢"),
                    ("Spring Boot", "🍃"),
                    ("Django", "🐍"),
                    ("Flask", "🧪"),
                    ("Express.js", "⚡"),
                    ("FastAPI", "🚀"),
                    ("Go (Gin)", "🐹"),
                    ("Ruby on Rails", "💎"),
                ]),
            ),
            database: TechCategory::new(
                Role::Database.label(),
                Accent::Accent,
                items(&[
                    ("MySQL", "🐬"),
                    ("MongoDB", "🍃"),
                    ("PostgreSQL", "🐘"),
                    ("Firebase", "🔥"),
                    ("Redis", "🔴"),
                    ("SQLite", "📦"),
                    ("Supabase", "⚡"),
                    ("CockroachDB", "🪳"),
                ]),
            ),
        }
    }
}
