//! Tradition engine: a single point pool spent on perks

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::{CommandError, CommandResult};
use crate::progression::ResearchState;

/// Tradition point pool and unlocked perks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraditionState {
    pub points: f64,
    pub unlocked: Vec<String>,
    /// exclusivity group id -> perk id that claimed it
    pub exclusive_picks: AHashMap<String, String>,
}

impl TraditionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, perk_id: &str) -> bool {
        self.unlocked.iter().any(|id| id == perk_id)
    }
}

/// Accrue tradition points from this tick's influence income. The pool
/// only grows; an influence deficit earns nothing rather than draining it.
pub fn advance_traditions(state: &mut TraditionState, config: &GameConfig, influence_income: f64) {
    state.points += influence_income.max(0.0) * config.traditions.points_per_influence_income;
}

/// Unlock a perk, spending points.
///
/// Validates existence, era gate (against the research state's unlocked
/// eras), double unlock, prerequisites, point balance, and exclusivity, in
/// that order. No state change on failure.
pub fn unlock_tradition(
    state: &mut TraditionState,
    research: &ResearchState,
    config: &GameConfig,
    perk_id: &str,
) -> CommandResult {
    let perk = config
        .perk(perk_id)
        .ok_or_else(|| CommandError::PerkNotFound(perk_id.to_string()))?;
    if !research.era_unlocked(perk.era) {
        return Err(CommandError::EraLocked(perk.era));
    }
    if state.is_unlocked(perk_id) {
        return Err(CommandError::AlreadyUnlocked(perk.id.clone()));
    }
    for prereq in &perk.prerequisites {
        if !state.is_unlocked(prereq) {
            return Err(CommandError::PrerequisiteMissing(prereq.clone()));
        }
    }
    if state.points < perk.cost {
        return Err(CommandError::InsufficientPoints {
            needed: perk.cost,
            available: state.points,
        });
    }
    if let Some(group) = &perk.exclusive_group {
        if let Some(picked) = state.exclusive_picks.get(group) {
            return Err(CommandError::ExclusiveGroupTaken {
                group: group.clone(),
                picked: picked.clone(),
            });
        }
    }

    state.points -= perk.cost;
    state.unlocked.push(perk.id.clone());
    if let Some(group) = &perk.exclusive_group {
        state
            .exclusive_picks
            .insert(group.clone(), perk.id.clone());
    }
    tracing::info!(perk = %perk.id, remaining_points = state.points, "tradition adopted");
    Ok(())
}
