//! Diplomacy: empire relations, war/peace hysteresis, and border access
//!
//! Opinion drifts on a fixed cadence and crossing the war threshold flips
//! an empire to war, seeding hostile power into deterministic war-zone
//! systems. The peace threshold sits above the war threshold so relations
//! do not flap at the boundary.

pub mod ai;

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::{EmpireId, Tick};
use crate::session::{GameEventKind, GameSession};

pub const OPINION_MIN: i32 = -100;
pub const OPINION_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmpireKind {
    Player,
    Ai,
}

/// War footing toward the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarStatus {
    Peace,
    War { since: Tick },
}

/// A player or AI empire. Opinion and war status are always relative to
/// the player; the player's own entry stays at peace with itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empire {
    pub id: EmpireId,
    pub kind: EmpireKind,
    pub name: String,
    pub opinion: i32,
    pub war_status: WarStatus,
    pub border_access: bool,
}

impl Empire {
    pub fn at_war(&self) -> bool {
        matches!(self.war_status, WarStatus::War { .. })
    }
}

fn clamp_opinion(value: i32) -> i32 {
    value.clamp(OPINION_MIN, OPINION_MAX)
}

/// Seed hostile power into war-zone systems for a war started by the
/// empire at `empire_index`. Candidates are uncolonized non-home systems;
/// the picks come from the galaxy's stateless zone picker so the same
/// `(tick, empire)` always yields the same zones.
fn seed_war_zones(session: &mut GameSession, config: &GameConfig, empire_index: usize) {
    let tick = session.clock.tick;
    let candidates: Vec<_> = session
        .galaxy
        .systems
        .iter()
        .filter(|s| {
            s.id != session.home_system && session.economy.planet_in_system(s.id).is_none()
        })
        .map(|s| s.id)
        .collect();
    if candidates.is_empty() {
        return;
    }

    let picker = session.galaxy.zone_picker();
    for slot in 0..config.diplomacy.war_zone_count {
        let system_id = candidates[picker.pick(tick, empire_index, slot, candidates.len())];
        if let Some(system) = session.galaxy.get_mut(system_id) {
            system.hostile_power += config.diplomacy.war_zone_power;
            tracing::info!(
                system = system_id.0,
                power = system.hostile_power,
                "war zone seeded"
            );
            session.log_event(GameEventKind::WarZoneSeeded {
                system: system_id,
                power: config.diplomacy.war_zone_power,
            });
        }
    }
}

fn start_war(session: &mut GameSession, config: &GameConfig, empire_index: usize) {
    let tick = session.clock.tick;
    {
        let empire = &mut session.empires[empire_index];
        empire.war_status = WarStatus::War { since: tick };
        empire.border_access = false;
        tracing::info!(empire = %empire.name, tick, "war declared");
    }
    let empire_id = session.empires[empire_index].id;
    session.log_event(GameEventKind::WarDeclared { empire: empire_id });
    seed_war_zones(session, config, empire_index);
}

fn end_war(session: &mut GameSession, empire_index: usize) {
    let empire = &mut session.empires[empire_index];
    empire.war_status = WarStatus::Peace;
    tracing::info!(empire = %empire.name, "peace signed");
    let empire_id = empire.id;
    session.log_event(GameEventKind::PeaceSigned { empire: empire_id });
}

/// Diplomacy pass, run once per tick. On the configured cadence every AI
/// empire's opinion drifts, then war/peace transitions apply with
/// hysteresis: war starts at or below the war threshold, peace returns at
/// or above the (strictly higher) peace threshold.
pub fn advance_diplomacy(session: &mut GameSession, config: &GameConfig) {
    let interval = config.diplomacy.auto_check_interval;
    if interval == 0 || session.clock.tick % interval != 0 {
        return;
    }

    for index in 0..session.empires.len() {
        if session.empires[index].kind != EmpireKind::Ai {
            continue;
        }
        let opinion = {
            let empire = &mut session.empires[index];
            empire.opinion = clamp_opinion(empire.opinion + config.diplomacy.opinion_drift);
            empire.opinion
        };
        let at_war = session.empires[index].at_war();

        if !at_war && opinion <= config.diplomacy.war_threshold {
            start_war(session, config, index);
        } else if at_war && opinion >= config.diplomacy.peace_threshold {
            end_war(session, index);
        }
    }
}

fn empire_index(session: &GameSession, id: EmpireId) -> CommandResult<usize> {
    if id == session.player {
        return Err(CommandError::SelfTarget);
    }
    session
        .empires
        .iter()
        .position(|e| e.id == id)
        .ok_or(CommandError::EmpireNotFound(id))
}

/// Player-initiated war declaration. Drops opinion to the war threshold
/// so the next automatic checks do not immediately sue for peace.
pub fn declare_war(
    session: &mut GameSession,
    config: &GameConfig,
    target: EmpireId,
) -> CommandResult {
    let index = empire_index(session, target)?;
    if session.empires[index].at_war() {
        return Err(CommandError::AlreadyAtWar(target));
    }
    {
        let empire = &mut session.empires[index];
        empire.opinion = empire.opinion.min(config.diplomacy.war_threshold);
    }
    start_war(session, config, index);
    Ok(())
}

/// Propose peace to an empire at war. Accepted only when its opinion has
/// recovered to the peace threshold; otherwise refused with no change.
pub fn propose_peace(
    session: &mut GameSession,
    config: &GameConfig,
    target: EmpireId,
) -> CommandResult {
    let index = empire_index(session, target)?;
    if !session.empires[index].at_war() {
        return Err(CommandError::AlreadyAtPeace(target));
    }
    if session.empires[index].opinion < config.diplomacy.peace_threshold {
        return Err(CommandError::PeaceRefused);
    }
    end_war(session, index);
    Ok(())
}

/// Request border access from an empire. Granted only at peace with
/// opinion at or above the configured bar.
pub fn request_border_access(
    session: &mut GameSession,
    config: &GameConfig,
    target: EmpireId,
) -> CommandResult {
    let index = empire_index(session, target)?;
    let empire = &session.empires[index];
    if empire.border_access {
        return Err(CommandError::AccessAlreadyGranted);
    }
    if empire.at_war() || empire.opinion < config.diplomacy.border_access_opinion {
        return Err(CommandError::AccessRefused);
    }
    session.empires[index].border_access = true;
    tracing::debug!(empire = %session.empires[index].name, "border access granted");
    Ok(())
}
