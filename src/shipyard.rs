//! Shipyard build queue
//!
//! A bounded FIFO of build tasks. Tasks tick down independently (no
//! head-of-queue blocking) and completed ships join the session's first
//! fleet.

use serde::{Deserialize, Serialize};

use crate::core::config::{GameConfig, ResourceAmount};
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::{FleetId, ShipId, TaskId};
use crate::fleet::{Fleet, Ship};
use crate::session::{GameEventKind, GameSession};

/// A queued ship build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipyardTask {
    pub id: TaskId,
    pub design_id: String,
    pub template_id: Option<String>,
    /// Free-form cost multiplier chosen at queue time (1.0 = stock)
    pub customization: Option<f64>,
    pub ticks_remaining: u32,
    pub total_ticks: u32,
}

/// Effective cost of a build: base design cost scaled by the template's
/// cost multiplier and the free-form customization multiplier.
///
/// The customization multiplier must be positive and finite; a zero or
/// negative factor would credit the ledgers instead of charging them.
fn effective_cost(
    config: &GameConfig,
    design_id: &str,
    template_id: Option<&str>,
    customization: Option<f64>,
) -> CommandResult<Vec<ResourceAmount>> {
    let design = config
        .design(design_id)
        .ok_or_else(|| CommandError::DesignNotFound(design_id.to_string()))?;
    if let Some(factor) = customization {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(CommandError::InvalidMultiplier(factor));
        }
    }
    let template_multiplier = match template_id {
        Some(id) => {
            config
                .template(id)
                .ok_or_else(|| CommandError::TemplateNotFound(id.to_string()))?
                .cost_multiplier
        }
        None => 1.0,
    };
    let multiplier = template_multiplier * customization.unwrap_or(1.0);
    Ok(design
        .cost
        .iter()
        .map(|entry| ResourceAmount {
            resource: entry.resource,
            amount: entry.amount * multiplier,
        })
        .collect())
}

/// Queue a ship build. Validates design existence, queue capacity, and
/// affordability of the effective cost, in that order, before spending.
/// No partial spend on failure.
pub fn queue_ship_build(
    session: &mut GameSession,
    config: &GameConfig,
    design_id: &str,
    template_id: Option<&str>,
    customization: Option<f64>,
) -> CommandResult {
    let cost = effective_cost(config, design_id, template_id, customization)?;
    if session.shipyard_queue.len() >= config.simulation.shipyard_queue_size {
        return Err(CommandError::QueueFull);
    }
    session.economy.check_afford(&cost)?;

    session.economy.spend(&cost);
    let design = config.design(design_id).expect("design checked above");
    session.shipyard_queue.push(ShipyardTask {
        id: TaskId(session.ids.next()),
        design_id: design_id.to_string(),
        template_id: template_id.map(|s| s.to_string()),
        customization,
        ticks_remaining: design.build_ticks,
        total_ticks: design.build_ticks,
    });
    Ok(())
}

/// Advance every queued build by one tick. Each task reaching zero spawns
/// its ship into the session's first fleet, creating a fallback fleet at
/// the home system if no fleet exists.
pub fn advance_shipyard(session: &mut GameSession, config: &GameConfig) {
    let mut completed = Vec::new();

    for task in &mut session.shipyard_queue {
        task.ticks_remaining = task.ticks_remaining.saturating_sub(1);
        if task.ticks_remaining == 0 {
            completed.push((task.design_id.clone(), task.template_id.clone()));
        }
    }
    session.shipyard_queue.retain(|t| t.ticks_remaining > 0);

    for (design_id, template_id) in completed {
        let Some(design) = config.design(&design_id) else {
            continue;
        };
        let template = template_id.as_deref().and_then(|id| config.template(id));
        let ship = Ship::from_design(ShipId(session.ids.next()), design, template);

        if session.fleets.is_empty() {
            let fleet_id = FleetId(session.ids.next());
            session
                .fleets
                .push(Fleet::idle_at(fleet_id, session.player, session.home_system));
        }
        let fleet = session.fleets.first_mut().expect("ensured above");
        let fleet_id = fleet.id;
        fleet.ships.push(ship);
        tracing::debug!(design = %design_id, fleet = fleet_id.0, "ship completed");
        session.log_event(GameEventKind::ShipCompleted {
            fleet: fleet_id,
            design: design_id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ResourceKind;

    fn session_and_config() -> (GameSession, GameConfig) {
        let config = GameConfig::standard();
        let mut session = GameSession::new(&config, 42);
        session
            .economy
            .ledgers
            .get_mut(&ResourceKind::Alloys)
            .unwrap()
            .amount = 10_000.0;
        session
            .economy
            .ledgers
            .get_mut(&ResourceKind::Minerals)
            .unwrap()
            .amount = 10_000.0;
        (session, config)
    }

    #[test]
    fn test_queue_bound_enforced() {
        let (mut session, config) = session_and_config();
        for _ in 0..config.simulation.shipyard_queue_size {
            queue_ship_build(&mut session, &config, "corvette", None, None).unwrap();
        }
        let result = queue_ship_build(&mut session, &config, "corvette", None, None);
        assert_eq!(result, Err(CommandError::QueueFull));
        assert_eq!(session.shipyard_queue.len(), config.simulation.shipyard_queue_size);
    }

    #[test]
    fn test_effective_cost_multiplies() {
        let config = GameConfig::standard();
        // Corvette base: 30 alloys. Assault refit 1.25x, customization 2x.
        let cost = effective_cost(&config, "corvette", Some("assault_refit"), Some(2.0)).unwrap();
        let alloys = cost
            .iter()
            .find(|c| c.resource == ResourceKind::Alloys)
            .unwrap();
        assert!((alloys.amount - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_customization_rejected() {
        let (mut session, config) = session_and_config();
        let alloys_before = session.economy.amount(ResourceKind::Alloys);
        let snapshot = session.clone();

        let result = queue_ship_build(&mut session, &config, "corvette", None, Some(-10.0));
        assert_eq!(result, Err(CommandError::InvalidMultiplier(-10.0)));

        let result = queue_ship_build(&mut session, &config, "corvette", None, Some(0.0));
        assert_eq!(result, Err(CommandError::InvalidMultiplier(0.0)));

        // Nothing queued, nothing spent, nothing credited
        assert_eq!(session, snapshot);
        assert_eq!(session.economy.amount(ResourceKind::Alloys), alloys_before);
    }

    #[test]
    fn test_unknown_design_and_template() {
        let (mut session, config) = session_and_config();
        assert_eq!(
            queue_ship_build(&mut session, &config, "star_destroyer", None, None),
            Err(CommandError::DesignNotFound("star_destroyer".to_string()))
        );
        assert_eq!(
            queue_ship_build(&mut session, &config, "corvette", Some("gold_plating"), None),
            Err(CommandError::TemplateNotFound("gold_plating".to_string()))
        );
        assert!(session.shipyard_queue.is_empty());
    }

    #[test]
    fn test_insufficient_resources_no_partial_spend() {
        let (mut session, config) = session_and_config();
        session
            .economy
            .ledgers
            .get_mut(&ResourceKind::Alloys)
            .unwrap()
            .amount = 5.0;
        let snapshot = session.clone();

        let result = queue_ship_build(&mut session, &config, "corvette", None, None);

        assert_eq!(
            result,
            Err(CommandError::InsufficientResources(ResourceKind::Alloys))
        );
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_build_completes_into_first_fleet() {
        let (mut session, config) = session_and_config();
        let first_fleet = session.fleets[0].id;
        let ships_before = session.fleets[0].ships.len();
        queue_ship_build(&mut session, &config, "corvette", Some("bulwark_refit"), None).unwrap();

        let build_ticks = config.design("corvette").unwrap().build_ticks;
        for _ in 0..build_ticks {
            advance_shipyard(&mut session, &config);
        }

        assert!(session.shipyard_queue.is_empty());
        let fleet = session.fleets.iter().find(|f| f.id == first_fleet).unwrap();
        assert_eq!(fleet.ships.len(), ships_before + 1);
        let new_ship = fleet.ships.last().unwrap();
        assert_eq!(new_ship.max_hull, config.design("corvette").unwrap().hull + 12);
    }

    #[test]
    fn test_tasks_tick_independently_not_head_blocking() {
        let (mut session, config) = session_and_config();
        let ships_before: usize = session.fleets.iter().map(|f| f.ships.len()).sum();
        // corvette: 4 ticks, destroyer: 6 ticks, queued in that order
        queue_ship_build(&mut session, &config, "destroyer", None, None).unwrap();
        queue_ship_build(&mut session, &config, "corvette", None, None).unwrap();

        for _ in 0..4 {
            advance_shipyard(&mut session, &config);
        }
        // Corvette done despite sitting behind the destroyer
        let ships_now: usize = session.fleets.iter().map(|f| f.ships.len()).sum();
        assert_eq!(ships_now, ships_before + 1);
        assert_eq!(session.shipyard_queue.len(), 1);

        for _ in 0..2 {
            advance_shipyard(&mut session, &config);
        }
        let ships_now: usize = session.fleets.iter().map(|f| f.ships.len()).sum();
        assert_eq!(ships_now, ships_before + 2);
        assert!(session.shipyard_queue.is_empty());
    }

    #[test]
    fn test_fallback_fleet_created_when_none_exists() {
        let (mut session, config) = session_and_config();
        session.fleets.clear();
        queue_ship_build(&mut session, &config, "corvette", None, None).unwrap();

        for _ in 0..config.design("corvette").unwrap().build_ticks {
            advance_shipyard(&mut session, &config);
        }

        assert_eq!(session.fleets.len(), 1);
        assert_eq!(session.fleets[0].system_id, session.home_system);
        assert_eq!(session.fleets[0].ships.len(), 1);
    }
}
