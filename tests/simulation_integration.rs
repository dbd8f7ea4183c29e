//! Integration tests for the simulation pipeline
//!
//! These tests drive whole sessions through the public driver and verify
//! the cross-system behavior the kernel guarantees:
//! - Commands either apply fully or leave the session untouched
//! - The colonization pipeline frees a ship, spends the cost, and founds
//!   a planet after exactly its advertised tick count
//! - Combat clears hostile systems and the fallback fleet respawns after
//!   a total wipe
//! - Whole runs are deterministic per seed and survive snapshotting

use stellar_dominion::colonization::start_colonization;
use stellar_dominion::core::error::CommandError;
use stellar_dominion::core::types::{ResourceKind, ShipClass, SystemId};
use stellar_dominion::fleet::movement::order_fleet_move;
use stellar_dominion::galaxy::Visibility;
use stellar_dominion::persistence;
use stellar_dominion::shipyard::queue_ship_build;
use stellar_dominion::sim::{advance_simulation, advance_tick};
use stellar_dominion::{GameConfig, GameSession};

// ============================================================================
// Helpers
// ============================================================================

fn fresh_session() -> (GameSession, GameConfig) {
    let config = GameConfig::standard();
    let session = GameSession::new(&config, 42);
    (session, config)
}

/// Pick an uncolonized habitable system, survey it, and park it at the
/// home position so the travel stage has zero length.
fn prepared_colony_target(session: &mut GameSession) -> SystemId {
    let target = session
        .galaxy
        .systems
        .iter()
        .skip(1)
        .find(|s| s.habitable_world.is_some())
        .map(|s| s.id)
        .expect("default galaxy has habitable systems");
    let home = session.galaxy.get(session.home_system).unwrap().position;
    let system = session.galaxy.get_mut(target).unwrap();
    system.reveal_to(Visibility::Surveyed);
    system.position = home;
    system.hostile_power = 0;
    target
}

// ============================================================================
// Colonization Pipeline
// ============================================================================

/// Full colonization workflow through the driver:
/// 1. Start a mission against a surveyed habitable system
/// 2. Verify the colony ship and the cost were consumed immediately
/// 3. Advance the driver for the mission's advertised tick count
/// 4. Verify the colony exists after exactly that many ticks, not before
#[test]
fn test_colonization_end_to_end_takes_exact_duration() {
    let (mut session, config) = fresh_session();
    let target = prepared_colony_target(&mut session);
    let energy_before = session.economy.amount(ResourceKind::Energy);

    start_colonization(&mut session, &config, target).unwrap();

    // Cost spent and colony ship consumed at mission start
    assert!(session.economy.amount(ResourceKind::Energy) < energy_before);
    assert!(!session.fleets.iter().any(|f| f
        .ships
        .iter()
        .any(|s| s.class(&config) == Some(ShipClass::Colony))));

    let total = session.colonization_tasks[0].mission_total_ticks as u64;
    let almost = advance_simulation(&session, total - 1, &config);
    assert!(
        almost.economy.planet_in_system(target).is_none(),
        "colony appeared a tick early"
    );

    let done = advance_simulation(&almost, 1, &config);
    let planet = done
        .economy
        .planet_in_system(target)
        .expect("colony founded on the final tick");
    assert_eq!(planet.population.workers, 1);
    assert!(done.colonization_tasks.is_empty());
}

#[test]
fn test_failed_commands_leave_session_unchanged() {
    let (mut session, config) = fresh_session();
    let snapshot = session.clone();

    // Colonizing an unsurveyed system
    let unknown = session
        .galaxy
        .systems
        .iter()
        .find(|s| s.visibility == Visibility::Unknown)
        .map(|s| s.id)
        .unwrap();
    assert_eq!(
        start_colonization(&mut session, &config, unknown),
        Err(CommandError::NotRevealed)
    );
    assert_eq!(session, snapshot);

    // Building an unknown design
    assert!(queue_ship_build(&mut session, &config, "dreadnought", None, None).is_err());
    assert_eq!(session, snapshot);

    // Moving a nonexistent fleet
    let somewhere = session.galaxy.systems[1].id;
    assert!(order_fleet_move(
        &mut session,
        &config,
        stellar_dominion::core::types::FleetId(9999),
        somewhere
    )
    .is_err());
    assert_eq!(session, snapshot);
}

// ============================================================================
// Combat and the Fallback Fleet
// ============================================================================

/// Order the starting fleet into a weak hostile system and let the driver
/// run movement and combat; the hostiles must be cleared.
#[test]
fn test_fleet_clears_hostile_system_through_driver() {
    let (mut session, config) = fresh_session();
    let target = session.galaxy.systems[1].id;
    {
        let home = session.galaxy.get(session.home_system).unwrap().position;
        let system = session.galaxy.get_mut(target).unwrap();
        system.position = home; // minimum travel time
        system.hostile_power = 5; // below the starting fleet's attack
    }

    let fleet_id = session.fleets[0].id;
    order_fleet_move(&mut session, &config, fleet_id, target).unwrap();

    let after = advance_simulation(&session, 10, &config);
    assert_eq!(after.galaxy.get(target).unwrap().hostile_power, 0);
    assert!(after
        .combat_reports
        .iter()
        .any(|r| r.system_id == target));
}

/// A hopeless engagement wipes the fleet; the driver must respawn the
/// single-ship fallback fleet at home the same tick.
#[test]
fn test_total_wipe_respawns_fallback_fleet() {
    let (mut session, config) = fresh_session();
    let home = session.home_system;
    session.galaxy.get_mut(home).unwrap().hostile_power = 100_000;

    advance_tick(&mut session, &config);

    assert!(session.fleets.iter().any(|f| !f.ships.is_empty()));
    let fallback = session
        .fleets
        .iter()
        .find(|f| !f.ships.is_empty())
        .unwrap();
    assert_eq!(fallback.system_id, home);
    assert_eq!(fallback.ships.len(), 1);
}

// ============================================================================
// Determinism and Snapshots
// ============================================================================

#[test]
fn test_same_seed_same_commands_same_outcome() {
    let config = GameConfig::standard();

    let run = |seed: u64| {
        let mut session = GameSession::new(&config, seed);
        let target = prepared_colony_target(&mut session);
        start_colonization(&mut session, &config, target).unwrap();
        queue_ship_build(&mut session, &config, "corvette", None, None).unwrap();
        advance_simulation(&session, 50, &config)
    };

    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}

#[test]
fn test_snapshot_mid_run_resumes_identically() {
    let (session, config) = fresh_session();
    let mid = advance_simulation(&session, 30, &config);

    let snapshot = persistence::to_snapshot(&mid).unwrap();
    let restored = persistence::from_snapshot(&snapshot).unwrap();

    let direct = advance_simulation(&mid, 30, &config);
    let resumed = advance_simulation(&restored, 30, &config);
    assert_eq!(direct, resumed);
}

// ============================================================================
// Long-Run Economy Health
// ============================================================================

#[test]
fn test_resources_stay_non_negative_for_500_ticks() {
    let (session, config) = fresh_session();
    let mut current = session;
    for _ in 0..50 {
        current = advance_simulation(&current, 10, &config);
        for kind in ResourceKind::ALL {
            assert!(
                current.economy.amount(kind) >= 0.0,
                "{kind:?} negative at tick {}",
                current.clock.tick
            );
        }
    }
    assert_eq!(current.clock.tick, 500);
}
