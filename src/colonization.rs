//! Colonization pipeline
//!
//! A multi-stage task machine turning a surveyed system into a colony:
//! `preparing -> traveling -> colonizing -> (removed, planet created)`.
//! Starting a mission consumes exactly one colony ship and the configured
//! cost, or nothing at all if any validation fails.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::{PlanetId, ShipClass, SystemId, TaskId};
use crate::economy::{Planet, Population};
use crate::fleet::movement::calculate_travel_ticks;
use crate::galaxy::Visibility;
use crate::session::{GameEventKind, GameSession};

/// Pipeline stage of a colonization mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColonizationStage {
    Preparing,
    Traveling,
    Colonizing,
}

/// An in-flight colonization mission.
///
/// Stage transitions are driven purely by ticks. `stage_ticks_remaining`
/// and the mission counters are kept in sync every tick so the UI can
/// report both stage and overall progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonizationTask {
    pub id: TaskId,
    pub system_id: SystemId,
    pub stage: ColonizationStage,
    pub stage_ticks_remaining: u32,
    pub mission_ticks_remaining: u32,
    pub mission_total_ticks: u32,
    prepare_ticks: u32,
    travel_ticks: u32,
    colonize_ticks: u32,
}

impl ColonizationTask {
    fn new(
        id: TaskId,
        system_id: SystemId,
        prepare_ticks: u32,
        travel_ticks: u32,
        colonize_ticks: u32,
    ) -> Self {
        let total = prepare_ticks + travel_ticks + colonize_ticks;
        let mut task = Self {
            id,
            system_id,
            stage: ColonizationStage::Preparing,
            stage_ticks_remaining: prepare_ticks,
            mission_ticks_remaining: total,
            mission_total_ticks: total,
            prepare_ticks,
            travel_ticks,
            colonize_ticks,
        };
        task.refresh_stage();
        task
    }

    /// Recompute the stage from mission progress. Deriving the stage from
    /// elapsed ticks (instead of patching it incrementally) makes the
    /// mission complete after exactly `mission_total_ticks` advances, even
    /// when a stage has zero length.
    fn refresh_stage(&mut self) {
        let elapsed = self.mission_total_ticks - self.mission_ticks_remaining;
        if elapsed < self.prepare_ticks {
            self.stage = ColonizationStage::Preparing;
            self.stage_ticks_remaining = self.prepare_ticks - elapsed;
        } else if elapsed < self.prepare_ticks + self.travel_ticks {
            self.stage = ColonizationStage::Traveling;
            self.stage_ticks_remaining = self.prepare_ticks + self.travel_ticks - elapsed;
        } else {
            self.stage = ColonizationStage::Colonizing;
            self.stage_ticks_remaining = self.mission_ticks_remaining;
        }
    }
}

/// Start a colonization mission against a system.
///
/// Validation order: system exists, system revealed, system surveyed (or
/// already partially known through an owned planet), habitable world
/// present, not already colonized, no mission already in flight,
/// affordable, and a free colony ship exists. Any failure returns a
/// tagged reason with zero side effects.
pub fn start_colonization(
    session: &mut GameSession,
    config: &GameConfig,
    system_id: SystemId,
) -> CommandResult {
    let system = session
        .galaxy
        .get(system_id)
        .ok_or(CommandError::SystemNotFound(system_id))?;
    if system.visibility == Visibility::Unknown {
        return Err(CommandError::NotRevealed);
    }
    let partially_known = session.economy.planet_in_system(system_id).is_some();
    if system.visibility != Visibility::Surveyed && !partially_known {
        return Err(CommandError::NotSurveyed);
    }
    if system.habitable_world.is_none() {
        return Err(CommandError::NoHabitableWorld);
    }
    if session.economy.planet_in_system(system_id).is_some() {
        return Err(CommandError::AlreadyColonized);
    }
    if session.colonization_tasks.iter().any(|t| t.system_id == system_id) {
        return Err(CommandError::ColonizationInProgress);
    }
    session.economy.check_afford(&config.colonization.cost)?;

    let carrier_index = session
        .fleets
        .iter()
        .position(|f| f.ships.iter().any(|s| s.class(config) == Some(ShipClass::Colony)))
        .ok_or(CommandError::NoColonyShip)?;

    // All validations passed; commit.
    session.economy.spend(&config.colonization.cost);
    let carrier_system = session.fleets[carrier_index].system_id;
    let consumed = session.fleets[carrier_index]
        .detach_first_of_class(ShipClass::Colony, config)
        .expect("colony ship checked above");
    drop(consumed);

    let travel_ticks = calculate_travel_ticks(carrier_system, system_id, &session.galaxy, config);
    let task = ColonizationTask::new(
        TaskId(session.ids.next()),
        system_id,
        config.colonization.prepare_ticks,
        travel_ticks,
        config.colonization.colonize_ticks,
    );
    tracing::info!(
        system = system_id.0,
        total_ticks = task.mission_total_ticks,
        "colonization mission started"
    );
    session.colonization_tasks.push(task);
    Ok(())
}

/// Advance every colonization mission by one tick. A mission reaching
/// zero is removed and its planet synthesized from the system's habitable
/// world template.
pub fn advance_colonization(session: &mut GameSession, _config: &GameConfig) {
    let mut founded = Vec::new();

    for task in &mut session.colonization_tasks {
        task.mission_ticks_remaining = task.mission_ticks_remaining.saturating_sub(1);
        if task.mission_ticks_remaining == 0 {
            founded.push(task.system_id);
        } else {
            task.refresh_stage();
        }
    }
    session
        .colonization_tasks
        .retain(|t| t.mission_ticks_remaining > 0);

    for system_id in founded {
        let world = session
            .galaxy
            .get(system_id)
            .and_then(|s| s.habitable_world.clone());
        // A mission can only be created against a habitable system; if the
        // template is gone the caller skipped validation.
        let Some(world) = world else {
            panic!("colonization completed for system {:?} with no habitable world", system_id);
        };

        let planet = Planet {
            id: PlanetId(session.ids.next()),
            system_id,
            kind: world.kind,
            size: world.size,
            population: Population {
                workers: 1,
                specialists: 0,
                researchers: 0,
            },
            base_production: world.base_production,
            upkeep: world.upkeep,
            districts: AHashMap::new(),
            stability: 1.0,
            happiness: 1.0,
        };
        let planet_id = planet.id;
        session.economy.planets.push(planet);
        tracing::info!(system = system_id.0, planet = planet_id.0, "colony founded");
        session.log_event(GameEventKind::ColonyFounded {
            system: system_id,
            planet: planet_id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ResourceKind;
    use crate::fleet::Ship;

    /// Session with a surveyed habitable target next to home and a colony
    /// ship parked in the first fleet.
    fn colonization_setup() -> (GameSession, GameConfig, SystemId) {
        let config = GameConfig::standard();
        let mut session = GameSession::new(&config, 42);

        let target = session
            .galaxy
            .systems
            .iter()
            .skip(1)
            .find(|s| s.habitable_world.is_some())
            .map(|s| s.id)
            .expect("default galaxy has habitable systems");
        let home_position = session.galaxy.get(session.home_system).unwrap().position;
        {
            let system = session.galaxy.get_mut(target).unwrap();
            system.reveal_to(Visibility::Surveyed);
            system.position = home_position;
            system.hostile_power = 0;
        }

        let colony_design = config.design("colony_ship").unwrap();
        let ship_id = crate::core::types::ShipId(session.ids.next());
        session.fleets[0]
            .ships
            .push(Ship::from_design(ship_id, colony_design, None));
        (session, config, target)
    }

    #[test]
    fn test_mission_takes_exactly_total_ticks() {
        let (mut session, config, target) = colonization_setup();
        start_colonization(&mut session, &config, target).unwrap();

        // Zero travel distance: total = prepare (2) + colonize (4) = 6
        let total = session.colonization_tasks[0].mission_total_ticks;
        assert_eq!(total, 6);

        for i in 0..total {
            assert!(session.economy.planet_in_system(target).is_none(), "early at {i}");
            advance_colonization(&mut session, &config);
        }
        assert!(session.economy.planet_in_system(target).is_some());
        assert!(session.colonization_tasks.is_empty());
    }

    #[test]
    fn test_new_colony_starts_with_one_worker() {
        let (mut session, config, target) = colonization_setup();
        start_colonization(&mut session, &config, target).unwrap();
        for _ in 0..session.colonization_tasks[0].mission_total_ticks {
            advance_colonization(&mut session, &config);
        }
        let planet = session.economy.planet_in_system(target).unwrap();
        assert_eq!(
            planet.population,
            Population {
                workers: 1,
                specialists: 0,
                researchers: 0
            }
        );
    }

    #[test]
    fn test_stage_progression() {
        let (mut session, config, target) = colonization_setup();
        start_colonization(&mut session, &config, target).unwrap();
        assert_eq!(session.colonization_tasks[0].stage, ColonizationStage::Preparing);

        // prepare_ticks = 2, travel = 0, so tick 2 lands in Colonizing
        advance_colonization(&mut session, &config);
        advance_colonization(&mut session, &config);
        assert_eq!(session.colonization_tasks[0].stage, ColonizationStage::Colonizing);
    }

    #[test]
    fn test_consumes_exactly_one_colony_ship() {
        let (mut session, config, target) = colonization_setup();
        let colony_ships_before = session.fleets[0]
            .ships
            .iter()
            .filter(|s| s.class(&config) == Some(ShipClass::Colony))
            .count();
        start_colonization(&mut session, &config, target).unwrap();
        let colony_ships_after = session.fleets[0]
            .ships
            .iter()
            .filter(|s| s.class(&config) == Some(ShipClass::Colony))
            .count();
        assert_eq!(colony_ships_before - colony_ships_after, 1);
    }

    #[test]
    fn test_validation_failures_are_side_effect_free() {
        let (mut session, config, target) = colonization_setup();

        // Unknown system
        {
            let snapshot = session.clone();
            let ghost = SystemId(9999);
            assert_eq!(
                start_colonization(&mut session, &config, ghost),
                Err(CommandError::SystemNotFound(ghost))
            );
            assert_eq!(session, snapshot);
        }

        // Not surveyed
        {
            let mut other = session.clone();
            other.galaxy.get_mut(target).unwrap().visibility = Visibility::Revealed;
            let snapshot = other.clone();
            assert_eq!(
                start_colonization(&mut other, &config, target),
                Err(CommandError::NotSurveyed)
            );
            assert_eq!(other, snapshot);
        }

        // Unaffordable
        {
            let mut broke = session.clone();
            broke
                .economy
                .ledgers
                .get_mut(&ResourceKind::Energy)
                .unwrap()
                .amount = 0.0;
            let snapshot = broke.clone();
            assert!(matches!(
                start_colonization(&mut broke, &config, target),
                Err(CommandError::InsufficientResources(_))
            ));
            assert_eq!(broke, snapshot);
        }

        // No colony ship: session keeps resources and fleet intact
        {
            let mut no_ship = session.clone();
            for fleet in &mut no_ship.fleets {
                fleet
                    .ships
                    .retain(|s| s.class(&config) != Some(ShipClass::Colony));
            }
            let snapshot = no_ship.clone();
            assert_eq!(
                start_colonization(&mut no_ship, &config, target),
                Err(CommandError::NoColonyShip)
            );
            assert_eq!(no_ship, snapshot);
        }
    }

    #[test]
    fn test_duplicate_mission_rejected() {
        let (mut session, config, target) = colonization_setup();
        start_colonization(&mut session, &config, target).unwrap();

        // Second colony ship available, same target
        let design = config.design("colony_ship").unwrap();
        let ship_id = crate::core::types::ShipId(session.ids.next());
        session.fleets[0].ships.push(Ship::from_design(ship_id, design, None));

        assert_eq!(
            start_colonization(&mut session, &config, target),
            Err(CommandError::ColonizationInProgress)
        );
    }

    #[test]
    fn test_already_colonized_rejected() {
        let (mut session, config, target) = colonization_setup();
        start_colonization(&mut session, &config, target).unwrap();
        for _ in 0..6 {
            advance_colonization(&mut session, &config);
        }

        let design = config.design("colony_ship").unwrap();
        let ship_id = crate::core::types::ShipId(session.ids.next());
        session.fleets[0].ships.push(Ship::from_design(ship_id, design, None));

        assert_eq!(
            start_colonization(&mut session, &config, target),
            Err(CommandError::AlreadyColonized)
        );
    }
}
