mod neighborhood;
#[cfg(test)]
mod tests;

use std::collections::HashMap as StdHashMap;
use std::fmt;
use std::sync::Arc;

use im::HashMap;
use itertools::Itertools;

use model::base_types::{Cost, TaskIdx, VehicleIdx};
use model::fleet::Fleet;
use model::locations::Locations;
use model::tasks::Tasks;

use crate::plan::{Plan, PlanStep};
use crate::task_sequence::{ActionKind, TaskSequence};

/// A solution candidate: the partition of all tasks over the fleet, together
/// with the ordered action sequence of each vehicle.
///
/// This is an immutable object. Whenever a modification is applied a copy is
/// created; the vehicle map is structurally shared, so copies are cheap and
/// candidate branches never alias each other's sequences.
#[derive(Clone)]
pub struct Assignment {
    sequences: HashMap<VehicleIdx, TaskSequence>,

    locations: Arc<Locations>,
    fleet: Arc<Fleet>,
    tasks: Arc<Tasks>,
}

// static functions
impl Assignment {
    /// The assignment with no tasks placed; every vehicle has an empty
    /// sequence.
    pub fn empty(locations: Arc<Locations>, fleet: Arc<Fleet>, tasks: Arc<Tasks>) -> Assignment {
        let sequences = fleet.iter().map(|v| (v, TaskSequence::empty())).collect();
        Assignment {
            sequences,
            locations,
            fleet,
            tasks,
        }
    }
}

// basic methods
impl Assignment {
    /// Replaces one vehicle's sequence by the trivially feasible
    /// pickup-then-deliver-per-task ordering of the given tasks.
    pub fn assign_tasks(&self, vehicle: VehicleIdx, tasks: &[TaskIdx]) -> Assignment {
        self.with_sequence(vehicle, TaskSequence::from_tasks(tasks))
    }

    pub fn sequence_of(&self, vehicle: VehicleIdx) -> &TaskSequence {
        &self.sequences[&vehicle]
    }

    /// All vehicles in fleet order. Iteration never goes through the shared
    /// map directly, so it is deterministic.
    pub fn vehicles(&self) -> impl Iterator<Item = VehicleIdx> + '_ {
        self.fleet.iter()
    }

    /// All placed tasks, in fleet order and per-vehicle pickup order.
    pub fn assigned_tasks(&self) -> impl Iterator<Item = TaskIdx> + '_ {
        self.fleet
            .iter()
            .flat_map(|v| self.sequence_of(v).carried_tasks())
    }

    pub fn number_of_assigned_tasks(&self) -> usize {
        self.fleet
            .iter()
            .map(|v| self.sequence_of(v).number_of_tasks())
            .sum()
    }

    pub fn locations(&self) -> &Arc<Locations> {
        &self.locations
    }

    pub fn fleet(&self) -> &Arc<Fleet> {
        &self.fleet
    }

    pub fn tasks(&self) -> &Arc<Tasks> {
        &self.tasks
    }

    pub(crate) fn with_sequence(&self, vehicle: VehicleIdx, sequence: TaskSequence) -> Assignment {
        let mut copy = self.clone();
        copy.sequences.insert(vehicle, sequence);
        copy
    }
}

// cost and export
impl Assignment {
    /// The total distance-weighted cost: for each vehicle its route distance
    /// (walking the action sequence from the vehicle's start location) times
    /// its cost per distance. A vehicle without tasks contributes zero.
    pub fn cost(&self) -> Cost {
        self.fleet
            .iter()
            .map(|v| {
                let vehicle = self.fleet.get(v);
                let route = self.sequence_of(v).distance(
                    vehicle.start_location(),
                    &self.locations,
                    &self.tasks,
                );
                vehicle.cost_per_distance() * route
            })
            .sum()
    }

    /// Converts each vehicle's sequence into a concrete step plan: a move
    /// step per stop on the way to the next action's location, then the
    /// pickup or delivery itself.
    pub fn export_plans(&self) -> StdHashMap<VehicleIdx, Plan> {
        self.fleet
            .iter()
            .map(|v| {
                let mut steps = Vec::new();
                let mut last = self.fleet.get(v).start_location();
                for action in self.sequence_of(v).actions() {
                    let target = action.location(&self.tasks);
                    for stop in self.locations.path(last, target) {
                        steps.push(PlanStep::Move(stop));
                    }
                    steps.push(match action.kind() {
                        ActionKind::Pickup => PlanStep::Pickup(action.task()),
                        ActionKind::Delivery => PlanStep::Delivery(action.task()),
                    });
                    last = target;
                }
                (v, Plan::new(steps))
            })
            .collect()
    }
}

// human-readable summary for diagnostics
impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "total cost: {:.2}", self.cost())?;
        for v in self.fleet.iter() {
            let vehicle = self.fleet.get(v);
            let sequence = self.sequence_of(v);
            if sequence.is_empty() {
                writeln!(f, "vehicle {}: -", vehicle.id())?;
            } else {
                let actions = sequence
                    .actions()
                    .map(|action| {
                        let task = self.tasks.get(action.task());
                        match action.kind() {
                            ActionKind::Pickup => format!("pickup {}", task.id()),
                            ActionKind::Delivery => format!("deliver {}", task.id()),
                        }
                    })
                    .join(", ");
                writeln!(f, "vehicle {}: {}", vehicle.id(), actions)?;
            }
        }
        Ok(())
    }
}
