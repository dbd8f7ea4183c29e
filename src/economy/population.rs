//! Population job assignment: promotion, demotion, and the optional
//! automatic rebalancing pass

use ahash::AHashMap;

use crate::core::config::GameConfig;
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::{JobKind, ResourceKind};
use crate::economy::{EconomyState, Planet};

/// Move one population unit from the worker pool into a target job
pub fn promote_population(planet: &mut Planet, job: JobKind) -> CommandResult {
    if job == JobKind::Workers {
        return Err(CommandError::InvalidJob(job));
    }
    if planet.population.workers == 0 {
        return Err(CommandError::NoWorkers);
    }
    planet.population.workers -= 1;
    *planet.population.count_mut(job) += 1;
    Ok(())
}

/// Move one population unit from a job back into the worker pool
pub fn demote_population(planet: &mut Planet, job: JobKind) -> CommandResult {
    if job == JobKind::Workers {
        return Err(CommandError::InvalidJob(job));
    }
    if planet.population.count(job) == 0 {
        return Err(CommandError::NoPopulation(job));
    }
    *planet.population.count_mut(job) -= 1;
    planet.population.workers += 1;
    Ok(())
}

/// Scheduled heuristic pass shifting population toward deficit priority
/// resources. At most one unit moves per invocation, always via
/// promote/demote, so total population is preserved by construction.
pub fn rebalance_jobs(
    economy: &mut EconomyState,
    net: &AHashMap<ResourceKind, f64>,
    config: &GameConfig,
) {
    for &resource in &config.economy.priority_resources {
        let shortfall = net.get(&resource).copied().unwrap_or(0.0);
        if shortfall >= config.economy.deficit_threshold {
            continue;
        }

        let Some(producing_job) = config
            .jobs
            .iter()
            .find(|j| j.production.iter().any(|p| p.resource == resource))
            .map(|j| j.kind)
        else {
            continue;
        };

        let moved = if producing_job == JobKind::Workers {
            // The base pool produces it: pull one unit back from the
            // most-staffed specialist job.
            demote_busiest(economy, resource)
        } else {
            promote_where_possible(economy, producing_job, resource)
        };

        if moved {
            return;
        }
    }
}

fn promote_where_possible(economy: &mut EconomyState, job: JobKind, resource: ResourceKind) -> bool {
    let candidate = economy
        .planets
        .iter_mut()
        .filter(|p| p.population.workers > 0)
        .max_by_key(|p| p.population.workers);
    if let Some(planet) = candidate {
        if promote_population(planet, job).is_ok() {
            tracing::debug!(
                planet = planet.id.0,
                ?job,
                ?resource,
                "rebalanced one worker into deficit job"
            );
            return true;
        }
    }
    false
}

fn demote_busiest(economy: &mut EconomyState, resource: ResourceKind) -> bool {
    for planet in economy.planets.iter_mut() {
        let job = [JobKind::Specialists, JobKind::Researchers]
            .into_iter()
            .filter(|&j| planet.population.count(j) > 0)
            .max_by_key(|&j| planet.population.count(j));
        if let Some(job) = job {
            if demote_population(planet, job).is_ok() {
                tracing::debug!(planet = planet.id.0, ?job, ?resource, "rebalanced one unit back to workers");
                return true;
            }
        }
    }
    false
}
