//! Simulation driver: the per-tick pipeline
//!
//! One tick runs the subsystems in a fixed order. The order is load
//! bearing: colonization frees a colony-ship slot before the shipyard
//! spawns ships that tick, combat settles before the economy nets that
//! tick's production, and the progression engines consume the income the
//! economy just computed.

use crate::colonization::advance_colonization;
use crate::core::config::GameConfig;
use crate::diplomacy::advance_diplomacy;
use crate::diplomacy::ai::run_ai_phase;
use crate::economy::districts::advance_district_construction;
use crate::economy::ledger::advance_economy;
use crate::economy::population::rebalance_jobs;
use crate::exploration::advance_surveys;
use crate::fleet::combat::run_combat_phase;
use crate::fleet::movement::advance_fleets;
use crate::progression::{advance_research, advance_traditions};
use crate::session::{GameEventKind, GameSession, TickIncome};
use crate::shipyard::advance_shipyard;

/// Advance one tick in place.
pub fn advance_tick(session: &mut GameSession, config: &GameConfig) {
    session.clock.tick += 1;
    tracing::trace!(tick = session.clock.tick, "tick start");

    advance_colonization(session, config);
    advance_district_construction(session, config);
    advance_shipyard(session, config);
    advance_fleets(session, config);
    run_combat_phase(session, config);
    advance_surveys(session, config);

    let net = advance_economy(&mut session.economy, config);
    if config.economy.auto_rebalance
        && config.economy.rebalance_interval > 0
        && session.clock.tick % config.economy.rebalance_interval == 0
    {
        rebalance_jobs(&mut session.economy, &net, config);
    }
    let income = TickIncome::from_net(&net);

    let eras_before = session.research.unlocked_eras.clone();
    let completed = advance_research(&mut session.research, config, income.research);
    for tech in completed {
        session.log_event(GameEventKind::TechCompleted { tech });
    }
    for era in session
        .research
        .unlocked_eras
        .clone()
        .into_iter()
        .filter(|e| !eras_before.contains(e))
    {
        tracing::info!(era, "era unlocked");
        session.log_event(GameEventKind::EraUnlocked { era });
    }
    advance_traditions(&mut session.traditions, config, income.influence);

    advance_diplomacy(session, config);
    run_ai_phase(session, config);
}

/// Advance a session by a whole number of ticks, returning the new value.
///
/// The input is never mutated; zero ticks returns an identical session.
pub fn advance_simulation(
    session: &GameSession,
    tick_count: u64,
    config: &GameConfig,
) -> GameSession {
    let mut next = session.clone();
    for _ in 0..tick_count {
        advance_tick(&mut next, config);
    }
    next
}

/// Driver entry for a wall-clock caller: convert elapsed milliseconds to
/// ticks via the session clock (capped), then advance.
pub fn advance_with_elapsed(
    session: &GameSession,
    delta_ms: f64,
    config: &GameConfig,
) -> GameSession {
    let mut next = session.clone();
    let ticks = next.clock.pending_ticks(delta_ms, config);
    for _ in 0..ticks {
        advance_tick(&mut next, config);
    }
    next
}
