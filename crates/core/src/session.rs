use crate::{
    export_text, generate_batch, generate_stack, Pool, PoolError, RngState, Role, SampleError,
    SamplerConfig, Stack, TeamStack, TechItem,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_TEAMS: u32 = 2;
pub const MAX_TEAMS: u32 = 20;
pub const DEFAULT_TEAMS: u32 = 4;

pub fn clamp_team_count(requested: i64) -> u32 {
    requested.clamp(i64::from(MIN_TEAMS), i64::from(MAX_TEAMS)) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Single,
    Team,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Single => f.write_str("single"),
            Mode::Team => f.write_str("team"),
        }
    }
}

impl FromStr for Mode {
    type Err = SessionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" | "s" | "one" => Ok(Mode::Single),
            "team" | "teams" | "t" => Ok(Mode::Team),
            other => Err(SessionError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("item name is blank")]
    BlankName,
    #[error("unknown mode: {0} (expected single or team)")]
    UnknownMode(String),
    #[error("nothing generated yet")]
    NoResults,
}

/// Latest generation result; replaced wholesale on each run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Outcome {
    Single { stack: Stack },
    Team { teams: Vec<TeamStack>, filled: usize },
}

impl Outcome {
    /// Assignments for display and export; a single stack is team 0.
    pub fn assignments(&self) -> Vec<TeamStack> {
        match self {
            Outcome::Single { stack } => vec![TeamStack::single(stack.clone())],
            Outcome::Team { teams, .. } => teams.clone(),
        }
    }
}

/// View state shared by the front ends: the editable pool plus the last result.
#[derive(Debug, Clone)]
pub struct Session {
    pub pool: Pool,
    mode: Mode,
    team_count: u32,
    sampler: SamplerConfig,
    rng: RngState,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(pool: Pool, rng: RngState) -> Self {
        Self {
            pool,
            mode: Mode::default(),
            team_count: DEFAULT_TEAMS,
            sampler: SamplerConfig::default(),
            rng,
            outcome: None,
        }
    }

    pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn team_count(&self) -> u32 {
        self.team_count
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Switching mode drops the current result.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    pub fn set_team_count(&mut self, requested: i64) -> u32 {
        self.team_count = clamp_team_count(requested);
        self.team_count
    }

    pub fn reset(&mut self) {
        self.outcome = None;
    }

    pub fn generate(&mut self) -> Result<&Outcome, SessionError> {
        self.outcome = None;
        let outcome = match self.mode {
            Mode::Single => Outcome::Single {
                stack: generate_stack(&self.pool, &mut self.rng)?,
            },
            Mode::Team => {
                let batch = generate_batch(
                    &self.pool,
                    self.team_count as usize,
                    self.sampler,
                    &mut self.rng,
                )?;
                Outcome::Team {
                    teams: batch.teams,
                    filled: batch.filled,
                }
            }
        };
        Ok(self.outcome.insert(outcome))
    }

    pub fn add_item(
        &mut self,
        role: Role,
        name: &str,
        icon: Option<&str>,
    ) -> Result<TechItem, SessionError> {
        let item = TechItem::from_input(name, icon).ok_or(SessionError::BlankName)?;
        self.pool.add_item(role, item.clone())?;
        Ok(item)
    }

    pub fn remove_item(&mut self, role: Role, name: &str) -> Result<TechItem, SessionError> {
        Ok(self.pool.remove_item(role, name.trim())?)
    }

    pub fn export(&self) -> Result<String, SessionError> {
        let outcome = self.outcome.as_ref().ok_or(SessionError::NoResults)?;
        Ok(export_text(&outcome.assignments()))
    }
}
