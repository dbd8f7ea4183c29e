//! Resource ledger and the per-tick economy pass

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::types::{JobKind, ResourceKind};
use crate::economy::EconomyState;

/// Per-resource bookkeeping.
///
/// `amount` is clamped at zero after every tick: deficits destroy surplus,
/// they never go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub amount: f64,
    pub income: f64,
    pub upkeep: f64,
}

/// Advance the economy by one tick.
///
/// Sums each planet's base production/upkeep, per-job production/upkeep
/// scaled by assigned population, and completed-district output; nets
/// income against upkeep and folds the result into the stockpiles.
/// Returns the net production per resource for downstream stages.
pub fn advance_economy(
    economy: &mut EconomyState,
    config: &GameConfig,
) -> AHashMap<ResourceKind, f64> {
    let mut income: AHashMap<ResourceKind, f64> = AHashMap::new();
    let mut upkeep: AHashMap<ResourceKind, f64> = AHashMap::new();

    for planet in &economy.planets {
        for entry in &planet.base_production {
            *income.entry(entry.resource).or_default() += entry.amount;
        }
        for entry in &planet.upkeep {
            *upkeep.entry(entry.resource).or_default() += entry.amount;
        }

        for job in [JobKind::Workers, JobKind::Specialists, JobKind::Researchers] {
            let assigned = planet.population.count(job) as f64;
            if assigned == 0.0 {
                continue;
            }
            if let Some(def) = config.job(job) {
                for entry in &def.production {
                    *income.entry(entry.resource).or_default() += entry.amount * assigned;
                }
                for entry in &def.upkeep {
                    *upkeep.entry(entry.resource).or_default() += entry.amount * assigned;
                }
            }
        }

        for (district_id, count) in &planet.districts {
            let Some(def) = config.district(district_id) else {
                continue;
            };
            let count = *count as f64;
            for entry in &def.production {
                *income.entry(entry.resource).or_default() += entry.amount * count;
            }
            for entry in &def.upkeep {
                *upkeep.entry(entry.resource).or_default() += entry.amount * count;
            }
        }
    }

    let mut net = AHashMap::new();
    for kind in ResourceKind::ALL {
        let gross = income.get(&kind).copied().unwrap_or(0.0);
        let cost = upkeep.get(&kind).copied().unwrap_or(0.0);
        let ledger = economy.ledgers.entry(kind).or_default();
        ledger.income = gross;
        ledger.upkeep = cost;
        ledger.amount = (ledger.amount + gross - cost).max(0.0);
        net.insert(kind, gross - cost);
    }
    net
}
