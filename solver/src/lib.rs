pub mod initial;
pub mod local_search;
#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use model::base_types::{Cost, VehicleIdx};
use model::config::Config;
use model::errors::PlanningError;
use model::fleet::Fleet;
use model::locations::Locations;
use model::tasks::Tasks;
use solution::plan::Plan;

use initial::RandomAdmissible;
use local_search::{LocalSearch, ProgressEvent};

/// The result of a planning run: one concrete plan per vehicle, the cost of
/// the assignment they were exported from, the number of search iterations
/// performed and a human-readable summary for diagnostics.
pub struct PlanningOutcome {
    pub plans: HashMap<VehicleIdx, Plan>,
    pub cost: Cost,
    pub iterations: usize,
    pub summary: String,
}

/// Plans pickup-and-delivery routes for the given instance.
///
/// This is the pure entry point: validates the configuration, builds a
/// random feasible start assignment, improves it by stochastic local search
/// and exports the best assignment found. Identical seed, configuration and
/// catalogs give an identical outcome.
///
/// Infeasible instances and invalid configurations are reported before any
/// search work is done; exhausting the iteration, stagnation or time budget
/// is a normal terminal condition.
pub fn plan<'a>(
    locations: Arc<Locations>,
    fleet: Arc<Fleet>,
    tasks: Arc<Tasks>,
    config: &'a Config,
    observer: Option<&'a mut dyn FnMut(ProgressEvent)>,
) -> Result<PlanningOutcome, PlanningError> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };

    let start = RandomAdmissible::initialize(locations, fleet, tasks).solve(&mut rng)?;

    let deadline = config.time_limit.map(|limit| Instant::now() + limit);
    let search = LocalSearch::initialize(config, deadline, observer);
    let (best, iterations) = search.solve(start, &mut rng);

    let assignment = best.into_assignment();
    Ok(PlanningOutcome {
        plans: assignment.export_plans(),
        cost: assignment.cost(),
        iterations,
        summary: assignment.to_string(),
    })
}
