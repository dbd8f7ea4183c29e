//! Stellar Dominion - deterministic space-strategy simulation kernel

pub mod colonization;
pub mod core;
pub mod diplomacy;
pub mod economy;
pub mod exploration;
pub mod fleet;
pub mod galaxy;
pub mod persistence;
pub mod progression;
pub mod session;
pub mod shipyard;
pub mod sim;

pub use crate::core::config::GameConfig;
pub use crate::session::GameSession;
pub use crate::sim::{advance_simulation, advance_tick, advance_with_elapsed};
