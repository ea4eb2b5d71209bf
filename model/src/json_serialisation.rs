
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::base_types::{Capacity, Cost, Distance, Idx, LocationIdx, TaskIdx, VehicleIdx, Weight};
use crate::config::Config;
use crate::errors::PlanningError;
use crate::fleet::{Fleet, Vehicle};
use crate::locations::{Leg, Locations};
use crate::tasks::{Task, Tasks};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct JsonInstance {
    locations: Vec<String>,
    legs: Vec<JsonLeg>,
    vehicles: Vec<JsonVehicle>,
    tasks: Vec<JsonTask>,
    #[serde(default)]
    config: Option<JsonConfig>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct JsonLeg {
    from: String,
    to: String,
    distance: Distance,
    #[serde(default)]
    via: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct JsonVehicle {
    id: String,
    capacity: Capacity,
    cost_per_distance: Cost,
    start_location: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct JsonTask {
    id: String,
    weight: Weight,
    pickup: String,
    delivery: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct JsonConfig {
    acceptance_probability: Option<f64>,
    max_iterations: Option<usize>,
    max_global_stagnation: Option<usize>,
    max_local_stagnation: Option<usize>,
    perturbation_steps: Option<usize>,
    time_limit_ms: Option<u64>,
    seed: Option<u64>,
}

/// Loads a planning instance from a JSON document. All catalogs are static
/// and referenced multiple times during the search, hence the Arc-wrapping.
pub fn load_instance_from_json(
    input: serde_json::Value,
) -> Result<(Arc<Locations>, Arc<Fleet>, Arc<Tasks>, Config), PlanningError> {
    let instance: JsonInstance = serde_json::from_value(input)
        .map_err(|err| PlanningError::MalformedInstance(err.to_string()))?;

    let location_of = build_location_index(&instance.locations)?;
    let locations = Arc::new(build_locations(&instance, &location_of)?);
    let fleet = Arc::new(build_fleet(&instance.vehicles, &location_of)?);
    let tasks = Arc::new(build_tasks(&instance.tasks, &location_of)?);
    let config = build_config(instance.config.unwrap_or_default());

    Ok((locations, fleet, tasks, config))
}

fn build_location_index(
    names: &[String],
) -> Result<HashMap<String, LocationIdx>, PlanningError> {
    let mut location_of = HashMap::new();
    for (i, name) in names.iter().enumerate() {
        if location_of
            .insert(name.clone(), LocationIdx(i as Idx))
            .is_some()
        {
            return Err(PlanningError::MalformedInstance(format!(
                "duplicate location {}",
                name
            )));
        }
    }
    Ok(location_of)
}

fn resolve(
    location_of: &HashMap<String, LocationIdx>,
    name: &str,
) -> Result<LocationIdx, PlanningError> {
    location_of
        .get(name)
        .copied()
        .ok_or_else(|| PlanningError::MalformedInstance(format!("unknown location {}", name)))
}

fn build_locations(
    instance: &JsonInstance,
    location_of: &HashMap<String, LocationIdx>,
) -> Result<Locations, PlanningError> {
    let n = instance.locations.len();
    let mut legs: Vec<Vec<Option<Leg>>> = vec![vec![None; n]; n];
    for (i, row) in legs.iter_mut().enumerate() {
        row[i] = Some(Leg::direct(0.0));
    }

    for json_leg in &instance.legs {
        let from = resolve(location_of, &json_leg.from)?;
        let to = resolve(location_of, &json_leg.to)?;
        if from == to {
            return Err(PlanningError::MalformedInstance(format!(
                "leg from {} to itself",
                json_leg.from
            )));
        }
        let via = json_leg
            .via
            .iter()
            .map(|name| resolve(location_of, name))
            .collect::<Result<Vec<_>, _>>()?;
        let forward = Leg::new(json_leg.distance, via.clone());
        let backward = Leg::new(json_leg.distance, via.into_iter().rev().collect());
        let slot = &mut legs[from.0 as usize][to.0 as usize];
        if slot.is_some() {
            return Err(PlanningError::MalformedInstance(format!(
                "duplicate leg between {} and {}",
                json_leg.from, json_leg.to
            )));
        }
        *slot = Some(forward);
        legs[to.0 as usize][from.0 as usize] = Some(backward);
    }

    let mut rows = Vec::with_capacity(n);
    for (i, row) in legs.into_iter().enumerate() {
        let mut out = Vec::with_capacity(n);
        for (j, leg) in row.into_iter().enumerate() {
            out.push(leg.ok_or_else(|| {
                PlanningError::MalformedInstance(format!(
                    "missing leg between {} and {}",
                    instance.locations[i], instance.locations[j]
                ))
            })?);
        }
        rows.push(out);
    }

    Locations::new(instance.locations.clone(), rows)
}

fn build_fleet(
    vehicles: &[JsonVehicle],
    location_of: &HashMap<String, LocationIdx>,
) -> Result<Fleet, PlanningError> {
    let mut seen = HashMap::new();
    let mut out = Vec::with_capacity(vehicles.len());
    for (i, json_vehicle) in vehicles.iter().enumerate() {
        if seen.insert(json_vehicle.id.clone(), i).is_some() {
            return Err(PlanningError::MalformedInstance(format!(
                "duplicate vehicle id {}",
                json_vehicle.id
            )));
        }
        if !json_vehicle.cost_per_distance.is_finite() || json_vehicle.cost_per_distance < 0.0 {
            return Err(PlanningError::MalformedInstance(format!(
                "vehicle {} has invalid cost per distance",
                json_vehicle.id
            )));
        }
        out.push(Vehicle::new(
            VehicleIdx(i as Idx),
            json_vehicle.id.clone(),
            json_vehicle.capacity,
            json_vehicle.cost_per_distance,
            resolve(location_of, &json_vehicle.start_location)?,
        ));
    }
    Ok(Fleet::new(out))
}

fn build_tasks(
    tasks: &[JsonTask],
    location_of: &HashMap<String, LocationIdx>,
) -> Result<Tasks, PlanningError> {
    let mut seen = HashMap::new();
    let mut out = Vec::with_capacity(tasks.len());
    for (i, json_task) in tasks.iter().enumerate() {
        if seen.insert(json_task.id.clone(), i).is_some() {
            return Err(PlanningError::MalformedInstance(format!(
                "duplicate task id {}",
                json_task.id
            )));
        }
        out.push(Task::new(
            TaskIdx(i as Idx),
            json_task.id.clone(),
            json_task.weight,
            resolve(location_of, &json_task.pickup)?,
            resolve(location_of, &json_task.delivery)?,
        ));
    }
    Ok(Tasks::new(out))
}

fn build_config(json_config: JsonConfig) -> Config {
    let mut config = Config::default();
    if let Some(p) = json_config.acceptance_probability {
        config.acceptance_probability = p;
    }
    if let Some(n) = json_config.max_iterations {
        config.max_iterations = n;
    }
    if let Some(n) = json_config.max_global_stagnation {
        config.max_global_stagnation = n;
    }
    if let Some(n) = json_config.max_local_stagnation {
        config.max_local_stagnation = n;
    }
    if let Some(n) = json_config.perturbation_steps {
        config.perturbation_steps = n;
    }
    if let Some(ms) = json_config.time_limit_ms {
        config.time_limit = Some(Duration::from_millis(ms));
    }
    config.seed = json_config.seed;
    config
}
