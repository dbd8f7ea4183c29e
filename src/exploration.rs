//! Survey pipeline: turning revealed systems into surveyed ones
//!
//! Surveying takes a fixed number of ticks per system. A completed survey
//! also acts as a sensor sweep, revealing every unknown system within
//! range of the surveyed one.

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::{SystemId, TaskId};
use crate::galaxy::{Galaxy, Visibility};
use crate::session::{GameEventKind, GameSession};

/// An in-flight survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyTask {
    pub id: TaskId,
    pub system_id: SystemId,
    pub ticks_remaining: u32,
    pub total_ticks: u32,
}

/// Start surveying a revealed system. Unknown systems cannot be targeted,
/// and a system is surveyed at most once.
pub fn start_survey(
    session: &mut GameSession,
    config: &GameConfig,
    system_id: SystemId,
) -> CommandResult {
    let system = session
        .galaxy
        .get(system_id)
        .ok_or(CommandError::SystemNotFound(system_id))?;
    match system.visibility {
        Visibility::Unknown => return Err(CommandError::NotRevealed),
        Visibility::Surveyed => return Err(CommandError::AlreadySurveyed),
        Visibility::Revealed => {}
    }
    if session.survey_tasks.iter().any(|t| t.system_id == system_id) {
        return Err(CommandError::SurveyInProgress);
    }

    session.survey_tasks.push(SurveyTask {
        id: TaskId(session.ids.next()),
        system_id,
        ticks_remaining: config.exploration.survey_ticks,
        total_ticks: config.exploration.survey_ticks,
    });
    tracing::debug!(system = system_id.0, "survey started");
    Ok(())
}

/// Reveal every unknown system within sensor range of `center`. Returns
/// the ids revealed, for event logging.
pub fn reveal_within_range(galaxy: &mut Galaxy, center: SystemId, range: f32) -> Vec<SystemId> {
    let Some(origin) = galaxy.get(center).map(|s| s.position) else {
        return Vec::new();
    };
    let mut revealed = Vec::new();
    for system in &mut galaxy.systems {
        if system.visibility == Visibility::Unknown && origin.distance(&system.position) <= range {
            system.reveal_to(Visibility::Revealed);
            revealed.push(system.id);
        }
    }
    revealed
}

/// Advance all surveys by one tick; completed ones mark their system
/// surveyed and sweep the surrounding area for new contacts.
pub fn advance_surveys(session: &mut GameSession, config: &GameConfig) {
    let mut completed = Vec::new();

    for task in &mut session.survey_tasks {
        task.ticks_remaining = task.ticks_remaining.saturating_sub(1);
        if task.ticks_remaining == 0 {
            completed.push(task.system_id);
        }
    }
    session.survey_tasks.retain(|t| t.ticks_remaining > 0);

    for system_id in completed {
        if let Some(system) = session.galaxy.get_mut(system_id) {
            system.reveal_to(Visibility::Surveyed);
        }
        let revealed =
            reveal_within_range(&mut session.galaxy, system_id, config.exploration.sensor_range);
        tracing::info!(
            system = system_id.0,
            revealed = revealed.len(),
            "survey completed"
        );
        session.log_event(GameEventKind::SystemSurveyed { system: system_id });
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

    fn revealed_target(session: &mut GameSession) -> SystemId {
        let id = session.galaxy.systems[1].id;
        session.galaxy.get_mut(id).unwrap().reveal_to(Visibility::Revealed);
        id
    }

    #[test]
    fn test_survey_completes_after_configured_ticks() {
        let (mut session, config) = session_and_config();
        let target = revealed_target(&mut session);
        start_survey(&mut session, &config, target).unwrap();

        for _ in 0..config.exploration.survey_ticks {
            assert_ne!(session.galaxy.get(target).unwrap().visibility, Visibility::Surveyed);
            advance_surveys(&mut session, &config);
        }
        assert_eq!(session.galaxy.get(target).unwrap().visibility, Visibility::Surveyed);
        assert!(session.survey_tasks.is_empty());
    }

    #[test]
    fn test_completed_survey_reveals_neighbors() {
        let (mut session, config) = session_and_config();
        let target = revealed_target(&mut session);
        let neighbor = session.galaxy.systems[2].id;
        let far = session.galaxy.systems[3].id;
        {
            let target_pos = Position::new(2000.0, 2000.0);
            session.galaxy.get_mut(target).unwrap().position = target_pos;
            let n = session.galaxy.get_mut(neighbor).unwrap();
            n.position = Position::new(2000.0 + config.exploration.sensor_range / 2.0, 2000.0);
            n.visibility = Visibility::Unknown;
            let f = session.galaxy.get_mut(far).unwrap();
            f.position = Position::new(2000.0 + config.exploration.sensor_range * 3.0, 2000.0);
            f.visibility = Visibility::Unknown;
        }

        start_survey(&mut session, &config, target).unwrap();
        for _ in 0..config.exploration.survey_ticks {
            advance_surveys(&mut session, &config);
        }

        assert_eq!(session.galaxy.get(neighbor).unwrap().visibility, Visibility::Revealed);
        assert_eq!(session.galaxy.get(far).unwrap().visibility, Visibility::Unknown);
    }

    #[test]
    fn test_start_survey_validation() {
        let (mut session, config) = session_and_config();

        assert_eq!(
            start_survey(&mut session, &config, SystemId(9999)),
            Err(CommandError::SystemNotFound(SystemId(9999)))
        );
        let home_system = session.home_system;
        assert_eq!(
            start_survey(&mut session, &config, home_system),
            Err(CommandError::AlreadySurveyed)
        );

        let unknown = session
            .galaxy
            .systems
            .iter()
            .find(|s| s.visibility == Visibility::Unknown)
            .map(|s| s.id)
            .unwrap();
        assert_eq!(
            start_survey(&mut session, &config, unknown),
            Err(CommandError::NotRevealed)
        );

        let target = revealed_target(&mut session);
        start_survey(&mut session, &config, target).unwrap();
        assert_eq!(
            start_survey(&mut session, &config, target),
            Err(CommandError::SurveyInProgress)
        );
    }
}
