//! Random stack selection.
//!
//! `generate_unique_stacks` is best-effort: it rejects repeated combinations
//! for a bounded number of attempts and then pads with unchecked draws, so
//! duplicates do appear once `count` nears `Pool::combination_count()`.

use crate::{Pool, RandomSource, Role, Stack, TeamStack, TechCategory, TechItem};
use std::collections::HashSet;
use thiserror::Error;

pub const DEFAULT_ATTEMPT_MULTIPLIER: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("the {0} pool is empty")]
    EmptyCategory(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Unique-phase budget is `attempt_multiplier * count` draws.
    pub attempt_multiplier: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            attempt_multiplier: DEFAULT_ATTEMPT_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub teams: Vec<TeamStack>,
    /// Draws spent in the unique phase.
    pub attempts: usize,
    /// Entries appended without a uniqueness check.
    pub filled: usize,
}

impl Batch {
    pub fn unique(&self) -> usize {
        self.teams.len() - self.filled
    }
}

pub fn ensure_sampleable(pool: &Pool) -> Result<(), SampleError> {
    match pool.first_empty_role() {
        Some(role) => Err(SampleError::EmptyCategory(role)),
        None => Ok(()),
    }
}

/// Picks one item per role, each uniformly from its category.
pub fn generate_stack<R>(pool: &Pool, rng: &mut R) -> Result<Stack, SampleError>
where
    R: RandomSource + ?Sized,
{
    ensure_sampleable(pool)?;
    Ok(draw(pool, rng))
}

pub fn generate_unique_stacks<R>(
    pool: &Pool,
    count: usize,
    rng: &mut R,
) -> Result<Vec<TeamStack>, SampleError>
where
    R: RandomSource + ?Sized,
{
    generate_batch(pool, count, SamplerConfig::default(), rng).map(|batch| batch.teams)
}

/// Returns exactly `count` teams numbered `1..=count`.
pub fn generate_batch<R>(
    pool: &Pool,
    count: usize,
    config: SamplerConfig,
    rng: &mut R,
) -> Result<Batch, SampleError>
where
    R: RandomSource + ?Sized,
{
    ensure_sampleable(pool)?;

    let mut teams = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    let max_attempts = count.saturating_mul(config.attempt_multiplier);
    let mut attempts = 0usize;

    while teams.len() < count && attempts < max_attempts {
        let stack = draw(pool, rng);
        if seen.insert(stack.combo_key()) {
            teams.push(TeamStack {
                team_number: next_team_number(&teams),
                stack,
            });
        }
        attempts += 1;
    }

    let filled = count - teams.len();
    if filled > 0 {
        tracing::debug!(
            unique = teams.len(),
            filled,
            attempts,
            combinations = pool.combination_count(),
            "unique stacks exhausted, filling remaining teams without dedup"
        );
    }
    while teams.len() < count {
        teams.push(TeamStack {
            team_number: next_team_number(&teams),
            stack: draw(pool, rng),
        });
    }

    Ok(Batch {
        teams,
        attempts,
        filled,
    })
}

fn next_team_number(teams: &[TeamStack]) -> u32 {
    u32::try_from(teams.len() + 1).unwrap_or(u32::MAX)
}

fn draw<R>(pool: &Pool, rng: &mut R) -> Stack
where
    R: RandomSource + ?Sized,
{
    Stack {
        frontend: pick(&pool.frontend, rng),
        backend: pick(&pool.backend, rng),
        database: pick(&pool.database, rng),
    }
}

fn pick<R>(category: &TechCategory, rng: &mut R) -> TechItem
where
    R: RandomSource + ?Sized,
{
    let idx = rng.next_index(category.items.len());
    category.items[idx].clone()
}
