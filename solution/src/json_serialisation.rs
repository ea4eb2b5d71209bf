use std::collections::HashMap;

use serde::Serialize;

use model::base_types::{Cost, VehicleIdx};
use model::fleet::Fleet;
use model::locations::Locations;
use model::tasks::Tasks;

use crate::plan::{Plan, PlanStep};

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum JsonStep<'a> {
    Move { location: &'a str },
    Pickup { task: &'a str },
    Delivery { task: &'a str },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonPlan<'a> {
    vehicle: &'a str,
    steps: Vec<JsonStep<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    total_cost: Cost,
    plans: Vec<JsonPlan<'a>>,
}

/// Serialises exported plans, in fleet order, using the external
/// vehicle/task/location ids of the catalogs.
pub fn plans_to_json(
    plans: &HashMap<VehicleIdx, Plan>,
    total_cost: Cost,
    locations: &Locations,
    fleet: &Fleet,
    tasks: &Tasks,
) -> serde_json::Value {
    let json_plans = fleet
        .iter()
        .map(|v| {
            let steps = plans[&v]
                .steps()
                .iter()
                .map(|step| match step {
                    PlanStep::Move(location) => JsonStep::Move {
                        location: locations.name_of(*location),
                    },
                    PlanStep::Pickup(task) => JsonStep::Pickup {
                        task: tasks.get(*task).id(),
                    },
                    PlanStep::Delivery(task) => JsonStep::Delivery {
                        task: tasks.get(*task).id(),
                    },
                })
                .collect();
            JsonPlan {
                vehicle: fleet.get(v).id(),
                steps,
            }
        })
        .collect();

    let output = JsonOutput {
        total_cost,
        plans: json_plans,
    };
    serde_json::to_value(output).expect("plan serialisation cannot fail")
}
