//! Session snapshots
//!
//! A snapshot is the whole session as JSON. Loading resets the clock's
//! wall-time carry so a session saved mid-tick does not burst-advance on
//! its first frame back.

use std::fs;
use std::path::Path;

use crate::core::error::PersistenceError;
use crate::session::GameSession;

/// Serialize a session to a JSON snapshot string
pub fn to_snapshot(session: &GameSession) -> Result<String, PersistenceError> {
    serde_json::to_string(session).map_err(PersistenceError::Serialize)
}

/// Restore a session from a JSON snapshot string
pub fn from_snapshot(snapshot: &str) -> Result<GameSession, PersistenceError> {
    let mut session: GameSession =
        serde_json::from_str(snapshot).map_err(PersistenceError::Deserialize)?;
    session.clock.carry_ms = 0.0;
    Ok(session)
}

pub fn save_to_file(session: &GameSession, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
    let snapshot = to_snapshot(session)?;
    fs::write(path.as_ref(), snapshot)?;
    tracing::info!(path = %path.as_ref().display(), tick = session.clock.tick, "session saved");
    Ok(())
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GameSession, PersistenceError> {
    let snapshot = fs::read_to_string(path.as_ref())?;
    let session = from_snapshot(&snapshot)?;
    tracing::info!(path = %path.as_ref().display(), tick = session.clock.tick, "session loaded");
    Ok(session)
}
