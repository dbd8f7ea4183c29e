//! District construction queue

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::{PlanetId, TaskId};
use crate::session::{GameEventKind, GameSession};

/// A pending district build. Ticks to zero, applies its effect exactly
/// once, then is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictConstructionTask {
    pub id: TaskId,
    pub planet_id: PlanetId,
    pub district_id: String,
    pub ticks_remaining: u32,
    pub total_ticks: u32,
}

/// Queue a district build on a planet. Validates planet, district id, and
/// affordability before spending; a failed command leaves the session
/// unchanged.
pub fn queue_district(
    session: &mut GameSession,
    config: &GameConfig,
    planet_id: PlanetId,
    district_id: &str,
) -> CommandResult {
    if session.economy.planet(planet_id).is_none() {
        return Err(CommandError::PlanetNotFound(planet_id));
    }
    let district = config
        .district(district_id)
        .ok_or_else(|| CommandError::DistrictNotFound(district_id.to_string()))?;
    session.economy.check_afford(&district.cost)?;

    session.economy.spend(&district.cost);
    let task = DistrictConstructionTask {
        id: TaskId(session.ids.next()),
        planet_id,
        district_id: district_id.to_string(),
        ticks_remaining: district.build_ticks,
        total_ticks: district.build_ticks,
    };
    session.district_tasks.push(task);
    Ok(())
}

/// Advance every district build by one tick. A task reaching zero
/// increments its planet's district count and is removed.
pub fn advance_district_construction(session: &mut GameSession, _config: &GameConfig) {
    let mut completed = Vec::new();

    for task in &mut session.district_tasks {
        task.ticks_remaining = task.ticks_remaining.saturating_sub(1);
        if task.ticks_remaining == 0 {
            completed.push((task.id, task.planet_id, task.district_id.clone()));
        }
    }
    session.district_tasks.retain(|t| t.ticks_remaining > 0);

    for (_, planet_id, district_id) in completed {
        if let Some(planet) = session.economy.planet_mut(planet_id) {
            *planet.districts.entry(district_id.clone()).or_insert(0) += 1;
        }
        tracing::debug!(planet = planet_id.0, district = %district_id, "district completed");
        session.log_event(GameEventKind::DistrictCompleted {
            planet: planet_id,
            district: district_id,
        });
    }
}
