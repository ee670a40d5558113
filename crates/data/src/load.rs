use crate::schema::{CategoryEntry, Pool, Role, TechCategory};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads a pool file in either map form (`{"frontend": {...}, ...}`) or the
/// list form (`[{"key": "frontend", ...}, ...]`).
pub fn load_pool(path: &Path) -> anyhow::Result<Pool> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let pool = parse_pool(&raw).with_context(|| format!("parse {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        combinations = pool.combination_count(),
        "loaded stack pool"
    );
    Ok(pool)
}

pub fn parse_pool(raw: &str) -> anyhow::Result<Pool> {
    let value: Value = serde_json::from_str(raw)?;
    let pool = match value {
        Value::Array(_) => {
            let entries: Vec<CategoryEntry> = serde_json::from_value(value)?;
            pool_from_entries(entries)?
        }
        Value::Object(_) => serde_json::from_value(value)?,
        _ => bail!("pool must be a JSON object or array"),
    };
    validate_pool(&pool)?;
    Ok(pool)
}

pub fn pool_from_entries(entries: Vec<CategoryEntry>) -> anyhow::Result<Pool> {
    let mut frontend: Option<TechCategory> = None;
    let mut backend: Option<TechCategory> = None;
    let mut database: Option<TechCategory> = None;
    for entry in entries {
        let role: Role = entry.key.parse()?;
        let slot = match role {
            Role::Frontend => &mut frontend,
            Role::Backend => &mut backend,
            Role::Database => &mut database,
        };
        if slot.is_some() {
            bail!("duplicate category for role {role}");
        }
        *slot = Some(entry.into());
    }
    let (Some(frontend), Some(backend), Some(database)) = (frontend, backend, database) else {
        bail!("pool needs one category each for frontend, backend and database");
    };
    Ok(Pool::new(frontend, backend, database))
}

/// Item names must be unique within a category. Empty categories are allowed
/// here; sampling reports them.
pub fn validate_pool(pool: &Pool) -> anyhow::Result<()> {
    for (role, category) in pool.categories() {
        if let Some(name) = category.duplicate_name() {
            bail!("duplicate {role} item {name:?}");
        }
    }
    Ok(())
}

pub fn write_export(path: &Path, text: &str) -> anyhow::Result<()> {
    fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote export");
    Ok(())
}

pub(crate) fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_form_maps_keys_to_roles() {
        let raw = r#"
[
  {"label":"DB","key":"database","color":"accent","items":[{"name":"Redis","icon":"🔴"}]},
  {"label":"Front","key":"frontend","items":[{"name":"Svelte","icon":"🔥"}]},
  {"label":"Back","key":"backend","color":"secondary","items":[]}
]
"#;
        let pool = parse_pool(raw).expect("pool");
        assert_eq!(pool.frontend.label, "Front");
        assert_eq!(pool.database.items[0].name, "Redis");
        assert!(pool.backend.is_empty());
        assert_eq!(pool.first_empty_role(), Some(Role::Backend));
    }

    #[test]
    fn list_form_requires_every_role_once() {
        let missing = r#"[{"label":"F","key":"frontend"},{"label":"B","key":"backend"}]"#;
        assert!(parse_pool(missing).is_err());

        let twice = r#"[
            {"label":"F","key":"frontend"},
            {"label":"F2","key":"frontend"},
            {"label":"B","key":"backend"},
            {"label":"D","key":"database"}
        ]"#;
        let err = parse_pool(twice).expect_err("duplicate role");
        assert!(err.to_string().contains("duplicate category"));

        let unknown = r#"[{"label":"M","key":"mobile"}]"#;
        assert!(parse_pool(unknown).is_err());
    }

    #[test]
    fn duplicate_items_are_rejected() {
        let raw = r#"{
            "frontend":{"label":"Frontend","items":[{"name":"React","icon":"⚛️"},{"name":"React","icon":"🔧"}]},
            "backend":{"label":"Backend","items":[{"name":"Flask","icon":"🧪"}]},
            "database":{"label":"Database","items":[{"name":"Redis","icon":"🔴"}]}
        }"#;
        let err = parse_pool(raw).expect_err("duplicate item");
        assert!(err.to_string().contains("React"));
    }

    #[test]
    fn scalar_is_rejected() {
        assert!(parse_pool("42").is_err());
    }
}
