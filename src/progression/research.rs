//! Research engine: three branches, era gates, exclusivity groups

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::{GameConfig, TechDef};
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::ResearchBranch;

/// Progress of one research branch. At most one tech is in flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchProgress {
    pub current: Option<String>,
    pub progress: f64,
    pub completed: Vec<String>,
}

/// Full research state.
///
/// `unlocked_eras` and `current_era` are derived data, recomputed from the
/// completed-tech union on every advance rather than patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchState {
    pub branches: AHashMap<ResearchBranch, BranchProgress>,
    /// exclusivity group id -> tech id that claimed it
    pub exclusive_picks: AHashMap<String, String>,
    pub unlocked_eras: Vec<u32>,
    pub current_era: u32,
}

impl ResearchState {
    pub fn new(config: &GameConfig) -> Self {
        let mut state = Self {
            branches: ResearchBranch::ALL
                .iter()
                .map(|b| (*b, BranchProgress::default()))
                .collect(),
            exclusive_picks: AHashMap::new(),
            unlocked_eras: Vec::new(),
            current_era: 0,
        };
        recompute_eras(&mut state, config);
        state
    }

    pub fn branch(&self, branch: ResearchBranch) -> &BranchProgress {
        &self.branches[&branch]
    }

    /// Whether `tech_id` appears in any branch's completed list
    pub fn is_completed(&self, tech_id: &str) -> bool {
        self.branches
            .values()
            .any(|b| b.completed.iter().any(|id| id == tech_id))
    }

    pub fn era_unlocked(&self, era: u32) -> bool {
        self.unlocked_eras.contains(&era)
    }
}

/// Recompute era unlocks from scratch. An era is unlocked when every one
/// of its gateway techs is completed (no gateways means unlocked from the
/// start); `current_era` is the maximum unlocked era id.
fn recompute_eras(state: &mut ResearchState, config: &GameConfig) {
    let mut unlocked: Vec<u32> = config
        .research
        .eras
        .iter()
        .filter(|era| era.gateway_techs.iter().all(|id| state.is_completed(id)))
        .map(|era| era.id)
        .collect();
    unlocked.sort_unstable();
    state.current_era = unlocked.last().copied().unwrap_or(0);
    state.unlocked_eras = unlocked;
}

fn validate_exclusivity(
    picks: &AHashMap<String, String>,
    tech: &TechDef,
) -> CommandResult {
    let Some(group) = &tech.exclusive_group else {
        return Ok(());
    };
    match picks.get(group) {
        Some(picked) if picked != &tech.id => Err(CommandError::ExclusiveGroupTaken {
            group: group.clone(),
            picked: picked.clone(),
        }),
        _ => Ok(()),
    }
}

/// Start (or restart) a tech in its branch.
///
/// Validates existence, branch match, era gate, completion, prerequisites,
/// and exclusivity, in that order, with no state change on failure. A
/// branch that is already busy drops its current project and resets
/// progress; spent progress is not refunded.
pub fn start_research(
    state: &mut ResearchState,
    config: &GameConfig,
    branch: ResearchBranch,
    tech_id: &str,
) -> CommandResult {
    let tech = config
        .tech(tech_id)
        .ok_or_else(|| CommandError::TechNotFound(tech_id.to_string()))?;
    if tech.branch != branch {
        return Err(CommandError::WrongBranch {
            tech: tech.id.clone(),
            expected: tech.branch.name().to_string(),
            requested: branch.name().to_string(),
        });
    }
    if !state.era_unlocked(tech.era) {
        return Err(CommandError::EraLocked(tech.era));
    }
    if state.is_completed(tech_id) {
        return Err(CommandError::AlreadyCompleted(tech.id.clone()));
    }
    for prereq in &tech.prerequisites {
        if !state.is_completed(prereq) {
            return Err(CommandError::PrerequisiteMissing(prereq.clone()));
        }
    }
    validate_exclusivity(&state.exclusive_picks, tech)?;

    let progress = state.branches.get_mut(&branch).expect("all branches present");
    if progress.current.as_deref() != Some(tech_id) {
        progress.progress = 0.0;
    }
    progress.current = Some(tech_id.to_string());
    tracing::debug!(branch = branch.name(), tech = tech_id, "research started");
    Ok(())
}

/// Advance research by one tick of income.
///
/// The income splits evenly across the three branches whether or not a
/// branch is busy; an idle branch's share is simply lost. Returns the tech
/// ids completed this call, in branch order.
pub fn advance_research(
    state: &mut ResearchState,
    config: &GameConfig,
    research_income: f64,
) -> Vec<String> {
    let share = research_income.max(0.0) / ResearchBranch::ALL.len() as f64;
    let mut completed = Vec::new();

    for branch in ResearchBranch::ALL {
        let progress = state.branches.get_mut(&branch).expect("all branches present");
        let Some(current) = progress.current.clone() else {
            continue;
        };
        let Some(tech) = config.tech(&current) else {
            // Config swapped underneath a running project; drop it.
            progress.current = None;
            progress.progress = 0.0;
            continue;
        };

        progress.progress += share;
        if progress.progress >= tech.cost {
            progress.completed.push(current.clone());
            progress.current = None;
            progress.progress = 0.0;
            if let Some(group) = &tech.exclusive_group {
                state
                    .exclusive_picks
                    .entry(group.clone())
                    .or_insert_with(|| current.clone());
            }
            tracing::info!(branch = branch.name(), tech = %current, "research completed");
            completed.push(current);
        }
    }

    recompute_eras(state, config);
    completed
}
