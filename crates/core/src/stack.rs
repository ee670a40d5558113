use crate::{Role, TechItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub frontend: TechItem,
    pub backend: TechItem,
    pub database: TechItem,
}

/// Identity of a stack for dedup: item names in role order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComboKey {
    pub frontend: String,
    pub backend: String,
    pub database: String,
}

impl Stack {
    pub fn item(&self, role: Role) -> &TechItem {
        match role {
            Role::Frontend => &self.frontend,
            Role::Backend => &self.backend,
            Role::Database => &self.database,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (Role, &TechItem)> {
        Role::ALL.into_iter().map(move |role| (role, self.item(role)))
    }

    pub fn combo_key(&self) -> ComboKey {
        ComboKey {
            frontend: self.frontend.name.clone(),
            backend: self.backend.name.clone(),
            database: self.database.name.clone(),
        }
    }
}

/// Team number 0 marks a single, unlabeled stack.
pub const SINGLE_TEAM: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStack {
    pub team_number: u32,
    pub stack: Stack,
}

impl TeamStack {
    pub fn single(stack: Stack) -> Self {
        Self {
            team_number: SINGLE_TEAM,
            stack,
        }
    }

    pub fn label(&self) -> String {
        if self.team_number == SINGLE_TEAM {
            "Your Stack".to_string()
        } else {
            format!("Team {}", self.team_number)
        }
    }
}
