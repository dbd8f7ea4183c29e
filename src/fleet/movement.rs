//! Fleet movement: travel-time calculation, move orders, and arrival

use crate::core::config::GameConfig;
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::{FleetId, SystemId};
use crate::galaxy::Galaxy;
use crate::session::{GameEventKind, GameSession};

/// Deterministic, symmetric travel time between two systems.
///
/// Same system is free; otherwise a flat base cost plus straight-line
/// distance over the configured speed, never less than one tick. There is
/// no pathfinding: positions are a decorative scatter.
pub fn calculate_travel_ticks(
    from: SystemId,
    to: SystemId,
    galaxy: &Galaxy,
    config: &GameConfig,
) -> u32 {
    if from == to {
        return 0;
    }
    let (Some(a), Some(b)) = (galaxy.get(from), galaxy.get(to)) else {
        return 0;
    };
    let distance = a.position.distance(&b.position);
    let ticks = (config.fleet.base_travel_ticks + distance / config.fleet.distance_per_tick).round();
    (ticks as u32).max(1)
}

/// Order a fleet toward a target system.
///
/// A fleet with no ships cannot take orders. Ordering a fleet to its
/// current system clears any pending order.
pub fn order_fleet_move(
    session: &mut GameSession,
    config: &GameConfig,
    fleet_id: FleetId,
    target: SystemId,
) -> CommandResult {
    if session.galaxy.get(target).is_none() {
        return Err(CommandError::SystemNotFound(target));
    }
    let travel = {
        let fleet = session
            .fleets
            .iter()
            .find(|f| f.id == fleet_id)
            .ok_or(CommandError::FleetNotFound(fleet_id))?;
        if fleet.ships.is_empty() {
            return Err(CommandError::EmptyFleet);
        }
        calculate_travel_ticks(fleet.system_id, target, &session.galaxy, config)
    };

    let fleet = session
        .fleets
        .iter_mut()
        .find(|f| f.id == fleet_id)
        .expect("fleet checked above");
    if travel == 0 {
        fleet.target_system_id = None;
        fleet.ticks_to_arrival = 0;
        return Ok(());
    }
    fleet.last_target = fleet.target_system_id.or(fleet.last_target);
    fleet.target_system_id = Some(target);
    fleet.ticks_to_arrival = travel;
    Ok(())
}

/// Advance all in-flight fleets by one tick; arriving fleets snap to
/// their destination and clear the order.
pub fn advance_fleets(session: &mut GameSession, _config: &GameConfig) {
    let mut arrivals = Vec::new();

    for fleet in &mut session.fleets {
        let Some(target) = fleet.target_system_id else {
            continue;
        };
        if fleet.ticks_to_arrival > 0 {
            fleet.ticks_to_arrival -= 1;
        }
        if fleet.ticks_to_arrival == 0 {
            fleet.system_id = target;
            fleet.target_system_id = None;
            fleet.last_target = Some(target);
            arrivals.push((fleet.id, target));
        }
    }

    for (fleet, system) in arrivals {
        tracing::debug!(fleet = fleet.0, system = system.0, "fleet arrived");
        session.log_event(GameEventKind::FleetArrived { fleet, system });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;

    fn session_and_config() -> (GameSession, GameConfig) {
        let config = GameConfig::standard();
        let session = GameSession::new(&config, 42);
        (session, config)
    }

    #[test]
    fn test_travel_ticks_same_system_is_zero() {
        let (session, config) = session_and_config();
        let id = session.galaxy.systems[0].id;
        assert_eq!(calculate_travel_ticks(id, id, &session.galaxy, &config), 0);
    }

    #[test]
    fn test_travel_ticks_formula() {
        let (mut session, config) = session_and_config();
        // Pin two systems 600 units apart: round(3 + 600/60) = 13
        let a = session.galaxy.systems[0].id;
        let b = session.galaxy.systems[1].id;
        session.galaxy.get_mut(a).unwrap().position = Position::new(0.0, 0.0);
        session.galaxy.get_mut(b).unwrap().position = Position::new(600.0, 0.0);

        assert_eq!(calculate_travel_ticks(a, b, &session.galaxy, &config), 13);
    }

    #[test]
    fn test_travel_ticks_symmetric_with_minimum() {
        let (mut session, config) = session_and_config();
        let a = session.galaxy.systems[0].id;
        let b = session.galaxy.systems[1].id;
        session.galaxy.get_mut(a).unwrap().position = Position::new(0.0, 0.0);
        session.galaxy.get_mut(b).unwrap().position = Position::new(0.0, 1.0);

        let ab = calculate_travel_ticks(a, b, &session.galaxy, &config);
        let ba = calculate_travel_ticks(b, a, &session.galaxy, &config);
        assert_eq!(ab, ba);
        assert!(ab >= 1);
    }

    #[test]
    fn test_order_and_arrival() {
        let (mut session, config) = session_and_config();
        let a = session.galaxy.systems[0].id;
        let b = session.galaxy.systems[1].id;
        session.galaxy.get_mut(a).unwrap().position = Position::new(0.0, 0.0);
        session.galaxy.get_mut(b).unwrap().position = Position::new(60.0, 0.0);
        let fleet_id = session.fleets[0].id;

        order_fleet_move(&mut session, &config, fleet_id, b).unwrap();
        let expected = calculate_travel_ticks(a, b, &session.galaxy, &config);
        assert_eq!(session.fleets[0].ticks_to_arrival, expected);

        for _ in 0..expected {
            advance_fleets(&mut session, &config);
        }
        let fleet = &session.fleets[0];
        assert_eq!(fleet.system_id, b);
        assert_eq!(fleet.target_system_id, None);
        assert_eq!(fleet.last_target, Some(b));
    }

    #[test]
    fn test_order_to_unknown_system_fails_clean() {
        let (mut session, config) = session_and_config();
        let fleet_id = session.fleets[0].id;
        let snapshot = session.clone();

        let result = order_fleet_move(&mut session, &config, fleet_id, SystemId(9999));
        assert_eq!(result, Err(CommandError::SystemNotFound(SystemId(9999))));
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_order_empty_fleet_rejected() {
        let (mut session, config) = session_and_config();
        let fleet_id = session.fleets[0].id;
        session.fleets[0].ships.clear();
        let target = session.galaxy.systems[1].id;
        let snapshot = session.clone();

        let result = order_fleet_move(&mut session, &config, fleet_id, target);
        assert_eq!(result, Err(CommandError::EmptyFleet));
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_order_to_current_system_clears_order() {
        let (mut session, config) = session_and_config();
        let here = session.fleets[0].system_id;
        let fleet_id = session.fleets[0].id;

        order_fleet_move(&mut session, &config, fleet_id, here).unwrap();
        assert_eq!(session.fleets[0].target_system_id, None);
        assert_eq!(session.fleets[0].ticks_to_arrival, 0);
    }
}
