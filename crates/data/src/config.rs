use crate::load::{load_json, load_pool};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use stackshuffle_core::{
    clamp_team_count, Pool, RngState, SamplerConfig, Session, DEFAULT_ATTEMPT_MULTIPLIER,
    DEFAULT_TEAMS, EXPORT_FILE_NAME,
};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "STACKSHUFFLE_CONFIG";

fn default_team_count() -> u32 {
    DEFAULT_TEAMS
}

fn default_attempt_multiplier() -> usize {
    DEFAULT_ATTEMPT_MULTIPLIER
}

fn default_export_path() -> PathBuf {
    PathBuf::from(EXPORT_FILE_NAME)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_team_count")]
    pub team_count: u32,
    #[serde(default = "default_attempt_multiplier")]
    pub attempt_multiplier: usize,
    #[serde(default)]
    pub pool: Option<PathBuf>,
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            seed: None,
            team_count: DEFAULT_TEAMS,
            attempt_multiplier: DEFAULT_ATTEMPT_MULTIPLIER,
            pool: None,
            export_path: default_export_path(),
        }
    }
}

impl ShuffleConfig {
    pub fn sampler(&self) -> SamplerConfig {
        SamplerConfig {
            attempt_multiplier: self.attempt_multiplier,
        }
    }

    pub fn rng(&self) -> RngState {
        match self.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        }
    }

    pub fn team_count(&self) -> u32 {
        clamp_team_count(i64::from(self.team_count))
    }

    /// The configured pool file, or the built-in pool.
    pub fn initial_pool(&self) -> anyhow::Result<Pool> {
        match &self.pool {
            Some(path) => load_pool(path),
            None => Ok(Pool::default()),
        }
    }

    /// Builds a session from this config: pool, seed, team count and sampler budget.
    pub fn session(&self) -> anyhow::Result<Session> {
        let mut session =
            Session::new(self.initial_pool()?, self.rng()).with_sampler(self.sampler());
        session.set_team_count(i64::from(self.team_count));
        Ok(session)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.attempt_multiplier == 0 {
            bail!("attempt_multiplier must be at least 1");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<ShuffleConfig> {
    let mut config: ShuffleConfig = load_json(path)?;
    config.validate()?;
    // pool paths are relative to the config file
    if let (Some(pool), Some(dir)) = (config.pool.as_mut(), path.parent()) {
        if pool.is_relative() {
            *pool = dir.join(&*pool);
        }
    }
    Ok(config)
}

/// Explicit path first, then `STACKSHUFFLE_CONFIG`, then defaults.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<ShuffleConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => load_config(Path::new(&path)),
        _ => Ok(ShuffleConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackshuffle_core::{MAX_TEAMS, MIN_TEAMS};

    #[test]
    fn team_count_is_clamped() {
        assert_eq!(clamp_team_count(-3), MIN_TEAMS);
        assert_eq!(clamp_team_count(0), MIN_TEAMS);
        assert_eq!(clamp_team_count(7), 7);
        assert_eq!(clamp_team_count(500), MAX_TEAMS);
        let config = ShuffleConfig {
            team_count: 1,
            ..ShuffleConfig::default()
        };
        assert_eq!(config.team_count(), MIN_TEAMS);
    }

    #[test]
    fn session_takes_config_values() {
        let config = ShuffleConfig {
            seed: Some(8),
            team_count: 9,
            ..ShuffleConfig::default()
        };
        let session = config.session().expect("session");
        assert_eq!(session.seed(), 8);
        assert_eq!(session.team_count(), 9);
    }

    #[test]
    fn empty_object_gives_defaults() {
        let config: ShuffleConfig = serde_json::from_str("{}").expect("config");
        assert_eq!(config.seed, None);
        assert_eq!(config.team_count, DEFAULT_TEAMS);
        assert_eq!(config.attempt_multiplier, DEFAULT_ATTEMPT_MULTIPLIER);
        assert_eq!(config.export_path, PathBuf::from(EXPORT_FILE_NAME));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_multiplier_is_invalid() {
        let config: ShuffleConfig =
            serde_json::from_str(r#"{"attempt_multiplier":0}"#).expect("config");
        assert!(config.validate().is_err());
    }

    #[test]
    fn seeded_config_replays() {
        let config = ShuffleConfig {
            seed: Some(5),
            ..ShuffleConfig::default()
        };
        assert_eq!(config.rng().seed(), 5);
        assert_eq!(config.rng().next_u64(), config.rng().next_u64());
    }
}
