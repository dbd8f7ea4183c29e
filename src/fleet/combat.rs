//! Combat resolution against system hostile power
//!
//! Combat triggers when a fleet with at least one ship occupies a system
//! whose hostile power is positive. Resolution is fully deterministic: no
//! dice, just attack totals against hull points.

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::types::{FleetId, ShipId, SystemId, Tick};
use crate::fleet::{Fleet, Ship};
use crate::session::{GameEventKind, GameSession};

/// Outcome of a single engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatResult {
    /// Hostiles cleared, at least one ship survived
    PlayerVictory,
    /// Fleet annihilated, hostile power reduced but not cleared
    PlayerDefeat,
    /// Hostiles cleared but the damage consumed every ship
    MutualDestruction,
}

/// Ships lost by one fleet in an engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetLosses {
    pub fleet_id: FleetId,
    pub ships_lost: u32,
}

/// Record of one engagement. The session keeps only the most recent few.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    pub system_id: SystemId,
    pub tick: Tick,
    pub fleet_power: u32,
    pub hostile_power: u32,
    pub result: CombatResult,
    pub losses: Vec<FleetLosses>,
}

/// Resolve one fleet against a system's hostile power.
///
/// Returns the report and the system's remaining hostile power.
///
/// When the fleet's attack total matches or exceeds the hostile power, the
/// hostiles are cleared and exactly `hostile_power` hull damage is
/// distributed greedily across the fleet in ship order: fully consumed
/// ships are destroyed, the first partially damaged ship absorbs the
/// remainder and survives. An under-powered fleet is annihilated and only
/// chips the hostile power down by its attack total.
pub fn resolve_engagement(
    fleet: &mut Fleet,
    hostile_power: u32,
    tick: Tick,
    config: &GameConfig,
) -> (CombatReport, u32) {
    let fleet_attack = fleet.total_attack(config);
    debug_assert!(hostile_power > 0, "engagement against empty system");
    debug_assert!(!fleet.ships.is_empty(), "engagement with empty fleet");

    let (result, ships_lost, remaining_hostile) = if fleet_attack >= hostile_power {
        let mut damage = hostile_power;
        let mut survivors: Vec<Ship> = Vec::with_capacity(fleet.ships.len());
        let mut lost = 0u32;

        for mut ship in fleet.ships.drain(..) {
            if damage == 0 {
                survivors.push(ship);
            } else if ship.hull_points <= damage {
                damage -= ship.hull_points;
                lost += 1;
            } else {
                ship.hull_points = (ship.hull_points - damage).min(ship.max_hull);
                damage = 0;
                survivors.push(ship);
            }
        }
        let result = if survivors.is_empty() {
            CombatResult::MutualDestruction
        } else {
            CombatResult::PlayerVictory
        };
        fleet.ships = survivors;
        (result, lost, 0)
    } else {
        let lost = fleet.ships.len() as u32;
        fleet.ships.clear();
        (CombatResult::PlayerDefeat, lost, hostile_power - fleet_attack)
    };

    let report = CombatReport {
        system_id: fleet.system_id,
        tick,
        fleet_power: fleet_attack,
        hostile_power,
        result,
        losses: vec![FleetLosses {
            fleet_id: fleet.id,
            ships_lost,
        }],
    };
    (report, remaining_hostile)
}

/// Run the combat phase for one tick: every fleet with ships parked in a
/// hostile system fights. Respawns the fallback fleet if the engagements
/// leave no ship anywhere.
pub fn run_combat_phase(session: &mut GameSession, config: &GameConfig) {
    let tick = session.clock.tick;

    for index in 0..session.fleets.len() {
        let (system_id, has_ships) = {
            let fleet = &session.fleets[index];
            (fleet.system_id, !fleet.ships.is_empty())
        };
        if !has_ships {
            continue;
        }
        let hostile = session
            .galaxy
            .get(system_id)
            .map(|s| s.hostile_power)
            .unwrap_or(0);
        if hostile == 0 {
            continue;
        }

        let (report, remaining) = resolve_engagement(&mut session.fleets[index], hostile, tick, config);
        if let Some(system) = session.galaxy.get_mut(system_id) {
            system.hostile_power = remaining;
        }
        tracing::info!(
            system = system_id.0,
            result = ?report.result,
            fleet_power = report.fleet_power,
            hostile_power = report.hostile_power,
            "combat resolved"
        );
        session.log_event(GameEventKind::CombatResolved {
            system: system_id,
            result: report.result,
        });
        session.push_combat_report(report, config);
    }

    respawn_fallback_fleet(session, config);
}

/// If destruction emptied every fleet, respawn a single-ship fleet at the
/// home system so action loops never run on zero fleets.
fn respawn_fallback_fleet(session: &mut GameSession, config: &GameConfig) {
    if session.fleets.iter().any(|f| !f.ships.is_empty()) {
        return;
    }
    let Some(design) = config.design(&config.fleet.fallback_design) else {
        return;
    };
    let fleet_id = FleetId(session.ids.next());
    let ship_id = ShipId(session.ids.next());
    let mut fleet = Fleet::idle_at(fleet_id, session.player, session.home_system);
    fleet.ships.push(Ship::from_design(ship_id, design, None));
    tracing::info!(fleet = fleet_id.0, "all fleets destroyed, respawning fallback fleet");
    session.fleets.push(fleet);
    session.log_event(GameEventKind::FleetRespawned {
        fleet: fleet_id,
        system: session.home_system,
    });
}
