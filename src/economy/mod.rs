//! Economy state: resource ledgers, planets, and population
//!
//! Submodules hold the engines; this module owns the state they operate on.

pub mod districts;
pub mod ledger;
pub mod population;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::ResourceAmount;
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::{JobKind, PlanetId, PlanetKind, ResourceKind, SystemId};

pub use ledger::ResourceLedger;

/// Population of a planet, bucketed by job.
///
/// `workers` is the base pool; the other buckets are filled by promotion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub workers: u32,
    pub specialists: u32,
    pub researchers: u32,
}

impl Population {
    pub fn count(&self, job: JobKind) -> u32 {
        match job {
            JobKind::Workers => self.workers,
            JobKind::Specialists => self.specialists,
            JobKind::Researchers => self.researchers,
        }
    }

    pub fn count_mut(&mut self, job: JobKind) -> &mut u32 {
        match job {
            JobKind::Workers => &mut self.workers,
            JobKind::Specialists => &mut self.specialists,
            JobKind::Researchers => &mut self.researchers,
        }
    }

    pub fn total(&self) -> u32 {
        self.workers + self.specialists + self.researchers
    }
}

/// A colonized planet. Created by colonization completion, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub system_id: SystemId,
    pub kind: PlanetKind,
    pub size: u32,
    pub population: Population,
    pub base_production: Vec<ResourceAmount>,
    pub upkeep: Vec<ResourceAmount>,
    /// Completed district counts by district id
    pub districts: AHashMap<String, u32>,
    pub stability: f64,
    pub happiness: f64,
}

/// Empire-level economy: one ledger per resource type plus all planets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomyState {
    pub ledgers: AHashMap<ResourceKind, ResourceLedger>,
    pub planets: Vec<Planet>,
}

impl EconomyState {
    /// Fresh economy with the configured starting amounts
    pub fn with_starting_resources(starting: &[ResourceAmount]) -> Self {
        let mut ledgers = AHashMap::new();
        for kind in ResourceKind::ALL {
            ledgers.insert(kind, ResourceLedger::default());
        }
        for entry in starting {
            ledgers.entry(entry.resource).or_default().amount = entry.amount;
        }
        Self {
            ledgers,
            planets: Vec::new(),
        }
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.iter().find(|p| p.id == id)
    }

    pub fn planet_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.iter_mut().find(|p| p.id == id)
    }

    pub fn planet_in_system(&self, system: SystemId) -> Option<&Planet> {
        self.planets.iter().find(|p| p.system_id == system)
    }

    pub fn amount(&self, kind: ResourceKind) -> f64 {
        self.ledgers.get(&kind).map(|l| l.amount).unwrap_or(0.0)
    }

    /// All-or-nothing affordability check. Returns the first resource that
    /// falls short, or Ok if the whole cost is covered.
    pub fn check_afford(&self, cost: &[ResourceAmount]) -> CommandResult {
        for entry in cost {
            if self.amount(entry.resource) < entry.amount {
                return Err(CommandError::InsufficientResources(entry.resource));
            }
        }
        Ok(())
    }

    /// Deduct a cost. Callers must have passed `check_afford` first; a
    /// partial spend here would be a validation bug, so it is asserted.
    pub fn spend(&mut self, cost: &[ResourceAmount]) {
        debug_assert!(self.check_afford(cost).is_ok(), "spend without affordability check");
        for entry in cost {
            if let Some(ledger) = self.ledgers.get_mut(&entry.resource) {
                ledger.amount = (ledger.amount - entry.amount).max(0.0);
            }
        }
    }
}
