//! AI empire behavior
//!
//! AI empires at war maintain a threat-scaled set of fleets and send idle
//! ones against hostile-power systems. AI ships are free: the AI has no
//! ledger, only fleet caps, so its pressure scales with the hostile map
//! rather than with an economy.

use crate::core::config::GameConfig;
use crate::core::types::{FleetId, ShipId, SystemId};
use crate::diplomacy::EmpireKind;
use crate::fleet::movement::order_fleet_move;
use crate::fleet::{Fleet, Ship};
use crate::session::GameSession;

/// Desired fleet count for one AI empire: one fleet plus one per
/// configured chunk of hostile systems, hard-capped.
fn desired_fleet_count(hostile_count: usize, config: &GameConfig) -> usize {
    let extra = if config.ai.hostiles_per_extra_fleet == 0 {
        0
    } else {
        hostile_count / config.ai.hostiles_per_extra_fleet
    };
    (1 + extra).min(config.ai.max_fleets)
}

/// Desired ships per AI fleet: a base contingent plus threat scaling,
/// with the scaled portion capped.
fn desired_fleet_size(hostile_count: usize, config: &GameConfig) -> u32 {
    let scaled = (config.ai.extra_per_hostile * hostile_count as u32).min(config.ai.max_ships);
    config.ai.base_ships + scaled
}

/// Top an AI empire's fleets up to the desired count and size. New fleets
/// spawn at the home system; existing fleets get ships added in place.
fn ensure_ai_fleets(session: &mut GameSession, config: &GameConfig, empire_index: usize) {
    let empire_id = session.empires[empire_index].id;
    let hostile_count = session.galaxy.hostile_systems().count();
    let want_fleets = desired_fleet_count(hostile_count, config);
    let want_ships = desired_fleet_size(hostile_count, config);
    let Some(design) = config.design(&config.ai.ship_design) else {
        return;
    };

    let owned: usize = session.fleets.iter().filter(|f| f.owner == empire_id).count();
    for _ in owned..want_fleets {
        let fleet_id = FleetId(session.ids.next());
        session
            .fleets
            .push(Fleet::idle_at(fleet_id, empire_id, session.home_system));
        tracing::debug!(empire = empire_id.0, fleet = fleet_id.0, "ai fleet raised");
    }

    for fleet in session.fleets.iter_mut().filter(|f| f.owner == empire_id) {
        while (fleet.ships.len() as u32) < want_ships {
            let ship_id = ShipId(session.ids.next());
            fleet.ships.push(Ship::from_design(ship_id, design, None));
        }
    }
}

/// Nearest system with hostile power, measured from `from`, skipping the
/// excluded system so a repulsed fleet does not ping-pong on one target.
fn nearest_hostile_target(
    session: &GameSession,
    from: SystemId,
    exclude: Option<SystemId>,
) -> Option<SystemId> {
    let origin = session.galaxy.get(from)?.position;
    session
        .galaxy
        .hostile_systems()
        .filter(|s| Some(s.id) != exclude)
        .min_by(|a, b| {
            let da = origin.distance(&a.position);
            let db = origin.distance(&b.position);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|s| s.id)
}

/// AI phase, run on the same `auto_check_interval` cadence as the
/// diplomacy pass. Each AI empire at war tops up its fleets and routes
/// every idle one to the nearest hostile system.
pub fn run_ai_phase(session: &mut GameSession, config: &GameConfig) {
    let interval = config.diplomacy.auto_check_interval;
    if interval == 0 || session.clock.tick % interval != 0 {
        return;
    }

    for empire_index in 0..session.empires.len() {
        let empire = &session.empires[empire_index];
        if empire.kind != EmpireKind::Ai || !empire.at_war() {
            continue;
        }
        ensure_ai_fleets(session, config, empire_index);

        let empire_id = session.empires[empire_index].id;
        let idle: Vec<(FleetId, SystemId, Option<SystemId>)> = session
            .fleets
            .iter()
            .filter(|f| f.owner == empire_id && f.target_system_id.is_none() && !f.ships.is_empty())
            .map(|f| (f.id, f.system_id, f.last_target))
            .collect();

        for (fleet_id, at, last) in idle {
            // Skip fleets already parked on a live target; combat handles them.
            let parked_on_hostile = session
                .galaxy
                .get(at)
                .map(|s| s.hostile_power > 0)
                .unwrap_or(false);
            if parked_on_hostile {
                continue;
            }
            let Some(target) = nearest_hostile_target(session, at, last) else {
                continue;
            };
            if order_fleet_move(session, config, fleet_id, target).is_ok() {
                tracing::debug!(fleet = fleet_id.0, system = target.0, "ai fleet dispatched");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EmpireId;
    use crate::diplomacy::declare_war;

    fn warring_session() -> (GameSession, GameConfig, EmpireId) {
        let config = GameConfig::standard();
        let mut session = GameSession::new(&config, 42);
        let ai = session
            .empires
            .iter()
            .find(|e| e.kind == EmpireKind::Ai)
            .map(|e| e.id)
            .unwrap();
        declare_war(&mut session, &config, ai).unwrap();
        (session, config, ai)
    }

    fn ai_fleets<'a>(session: &'a GameSession, ai: EmpireId) -> Vec<&'a Fleet> {
        session.fleets.iter().filter(|f| f.owner == ai).collect()
    }

    #[test]
    fn test_fleet_count_scales_with_hostiles() {
        let config = GameConfig::standard();
        assert_eq!(desired_fleet_count(0, &config), 1);
        assert_eq!(desired_fleet_count(2, &config), 1);
        assert_eq!(desired_fleet_count(3, &config), 2);
        assert_eq!(desired_fleet_count(100, &config), config.ai.max_fleets);
    }

    #[test]
    fn test_fleet_size_threat_scaling_is_capped() {
        let config = GameConfig::standard();
        assert_eq!(desired_fleet_size(0, &config), config.ai.base_ships);
        assert_eq!(
            desired_fleet_size(100, &config),
            config.ai.base_ships + config.ai.max_ships
        );
    }

    #[test]
    fn test_ai_raises_and_stocks_fleets_at_war() {
        let (mut session, config, ai) = warring_session();
        run_ai_phase(&mut session, &config);

        let fleets = ai_fleets(&session, ai);
        let hostiles = session.galaxy.hostile_systems().count();
        assert_eq!(fleets.len(), desired_fleet_count(hostiles, &config));
        for fleet in fleets {
            assert_eq!(fleet.ships.len() as u32, desired_fleet_size(hostiles, &config));
        }
    }

    #[test]
    fn test_ai_idle_fleets_get_move_orders() {
        let (mut session, config, ai) = warring_session();
        run_ai_phase(&mut session, &config);

        // War zones guarantee at least one hostile system
        assert!(session.galaxy.hostile_systems().count() > 0);
        for fleet in ai_fleets(&session, ai) {
            let parked_on_hostile = session
                .galaxy
                .get(fleet.system_id)
                .map(|s| s.hostile_power > 0)
                .unwrap_or(false);
            assert!(
                fleet.target_system_id.is_some() || parked_on_hostile,
                "idle ai fleet away from any hostile system"
            );
        }
    }

    #[test]
    fn test_ai_phase_only_on_check_cadence() {
        let (mut session, config, ai) = warring_session();

        session.clock.tick = 3; // off-cadence
        let snapshot = session.clone();
        run_ai_phase(&mut session, &config);
        assert_eq!(session, snapshot);

        session.clock.tick = config.diplomacy.auto_check_interval;
        run_ai_phase(&mut session, &config);
        assert!(!ai_fleets(&session, ai).is_empty());
    }

    #[test]
    fn test_ai_does_nothing_at_peace() {
        let config = GameConfig::standard();
        let mut session = GameSession::new(&config, 42);
        let fleets_before = session.fleets.len();

        run_ai_phase(&mut session, &config);
        assert_eq!(session.fleets.len(), fleets_before);
    }

    #[test]
    fn test_excluded_last_target_not_repicked() {
        let (mut session, config, _) = warring_session();
        // Pin exactly two hostile systems so the exclusion is observable
        for system in &mut session.galaxy.systems {
            system.hostile_power = 0;
        }
        let a = session.galaxy.systems[1].id;
        let b = session.galaxy.systems[2].id;
        session.galaxy.get_mut(a).unwrap().hostile_power = 10;
        session.galaxy.get_mut(b).unwrap().hostile_power = 10;
        let _ = config;

        let picked = nearest_hostile_target(&session, session.home_system, Some(a));
        assert_eq!(picked, Some(b));
    }
}
