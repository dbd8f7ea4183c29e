//! Research and tradition progression
//!
//! Two parallel-track allocators over a tech/perk dependency graph with
//! era gates and mutual-exclusion groups. Both operate on their own state
//! value and nothing else; the simulation driver feeds them the tick's
//! income figures and logs whatever they report back.

pub mod research;
pub mod tradition;

pub use research::{advance_research, start_research, BranchProgress, ResearchState};
pub use tradition::{advance_traditions, unlock_tradition, TraditionState};
