use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Slot of a stack. Order of `ALL` is the order used for keys and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Frontend,
    Backend,
    Database,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0} (expected frontend, backend or database)")]
pub struct RoleParseError(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Frontend, Role::Backend, Role::Database];

    pub fn key(self) -> &'static str {
        match self {
            Role::Frontend => "frontend",
            Role::Backend => "backend",
            Role::Database => "database",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Frontend => "Frontend",
            Role::Backend => "Backend",
            Role::Database => "Database",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "frontend" | "front" | "fe" | "f" => Ok(Role::Frontend),
            "backend" | "back" | "be" | "b" => Ok(Role::Backend),
            "database" | "db" | "d" => Ok(Role::Database),
            _ => Err(RoleParseError(value.to_string())),
        }
    }
}
