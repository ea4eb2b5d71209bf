use std::time as stdtime;

use model::errors::PlanningError;
use model::json_serialisation::load_instance_from_json;
use solution::json_serialisation::plans_to_json;
use solver::local_search::ProgressEvent;

/// Loads an instance document, runs the planner and returns the per-vehicle
/// plans as a JSON document. All host integration lives here; the solver
/// itself is a pure function of the catalogs and the configuration.
pub fn run(input_data: serde_json::Value) -> Result<serde_json::Value, PlanningError> {
    let (locations, fleet, tasks, config) = load_instance_from_json(input_data)?;
    let start_time = stdtime::Instant::now();

    let mut print_progress = |event: ProgressEvent| {
        if event.iteration % 1000 == 0 {
            println!(
                "iteration {}: current cost {:.2}, best cost {:.2}",
                event.iteration, event.current_cost, event.best_cost
            );
        }
    };

    let outcome = solver::plan(
        locations.clone(),
        fleet.clone(),
        tasks.clone(),
        &config,
        Some(&mut print_progress),
    )?;

    let runtime_duration = stdtime::Instant::now().duration_since(start_time);

    println!("\n\nFinal assignment:");
    println!("{}", outcome.summary);
    println!("Iterations: {}", outcome.iterations);
    println!("Running time: {:0.2}sec", runtime_duration.as_secs_f32());

    Ok(plans_to_json(
        &outcome.plans,
        outcome.cost,
        &locations,
        &fleet,
        &tasks,
    ))
}
