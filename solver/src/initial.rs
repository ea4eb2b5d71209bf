use std::sync::Arc;

use rand::Rng;

use model::base_types::{TaskIdx, VehicleIdx};
use model::errors::PlanningError;
use model::fleet::Fleet;
use model::locations::Locations;
use model::tasks::Tasks;
use solution::Assignment;

/// Builds the assignment the search starts from: every task goes to a
/// uniformly random admissible vehicle (one whose capacity is at least the
/// task's weight), and each vehicle's sequence picks up and delivers its
/// tasks one after the other, which is feasible for any admissible split.
///
/// Infeasibility is detected here: a task no vehicle can carry, or an empty
/// fleet, ends the run before any search is started.
pub struct RandomAdmissible {
    locations: Arc<Locations>,
    fleet: Arc<Fleet>,
    tasks: Arc<Tasks>,
}

impl RandomAdmissible {
    pub fn initialize(
        locations: Arc<Locations>,
        fleet: Arc<Fleet>,
        tasks: Arc<Tasks>,
    ) -> RandomAdmissible {
        RandomAdmissible {
            locations,
            fleet,
            tasks,
        }
    }

    pub fn solve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Assignment, PlanningError> {
        if self.fleet.is_empty() {
            return Err(PlanningError::EmptyFleet);
        }

        let mut tasks_per_vehicle: Vec<Vec<TaskIdx>> = vec![Vec::new(); self.fleet.len()];
        for task in self.tasks.iter() {
            let weight = self.tasks.get(task).weight();
            let admissible: Vec<VehicleIdx> = self
                .fleet
                .iter()
                .filter(|&v| self.fleet.get(v).capacity() >= weight)
                .collect();
            if admissible.is_empty() {
                return Err(PlanningError::InfeasibleTask { task, weight });
            }
            let vehicle = admissible[rng.random_range(0..admissible.len())];
            tasks_per_vehicle[vehicle.0 as usize].push(task);
        }

        let mut assignment = Assignment::empty(
            self.locations.clone(),
            self.fleet.clone(),
            self.tasks.clone(),
        );
        for vehicle in self.fleet.iter() {
            let assigned = &tasks_per_vehicle[vehicle.0 as usize];
            if !assigned.is_empty() {
                assignment = assignment.assign_tasks(vehicle, assigned);
            }
        }
        Ok(assignment)
    }
}

/// Baseline builder for regression comparisons: every task, in arrival
/// order, onto the first vehicle that can carry the heaviest task. Since the
/// sequence never holds more than one task at a time, that single capacity
/// check covers prefix feasibility too.
pub struct DesignatedVehicle {
    locations: Arc<Locations>,
    fleet: Arc<Fleet>,
    tasks: Arc<Tasks>,
}

impl DesignatedVehicle {
    pub fn initialize(
        locations: Arc<Locations>,
        fleet: Arc<Fleet>,
        tasks: Arc<Tasks>,
    ) -> DesignatedVehicle {
        DesignatedVehicle {
            locations,
            fleet,
            tasks,
        }
    }

    pub fn solve(&self) -> Result<Assignment, PlanningError> {
        if self.fleet.is_empty() {
            return Err(PlanningError::EmptyFleet);
        }

        let assignment = Assignment::empty(
            self.locations.clone(),
            self.fleet.clone(),
            self.tasks.clone(),
        );
        let Some(heaviest) = self.tasks.iter().max_by_key(|&t| self.tasks.get(t).weight())
        else {
            return Ok(assignment); // no tasks, nothing to place
        };
        let weight = self.tasks.get(heaviest).weight();

        let designated = self
            .fleet
            .iter()
            .find(|&v| self.fleet.get(v).capacity() >= weight)
            .ok_or(PlanningError::InfeasibleTask {
                task: heaviest,
                weight,
            })?;

        let all_tasks: Vec<TaskIdx> = self.tasks.iter().collect();
        Ok(assignment.assign_tasks(designated, &all_tasks))
    }
}
