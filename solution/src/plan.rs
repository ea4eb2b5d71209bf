use model::base_types::{Distance, LocationIdx, TaskIdx};
use model::locations::Locations;

/// One step of a vehicle's concrete plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStep {
    /// Travel to the given location.
    Move(LocationIdx),
    /// Load the given task at its pickup location.
    Pickup(TaskIdx),
    /// Unload the given task at its delivery location.
    Delivery(TaskIdx),
}

/// The concrete move/pickup/delivery step sequence of one vehicle. Immutable
/// once produced by the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<PlanStep>,
}

impl Plan {
    pub(crate) fn new(steps: Vec<PlanStep>) -> Plan {
        Plan { steps }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Recomputes the distance traveled by this plan, starting at the given
    /// location. Pickup and delivery steps do not move the vehicle.
    pub fn total_distance(&self, start: LocationIdx, locations: &Locations) -> Distance {
        let mut last = start;
        let mut total = 0.0;
        for step in &self.steps {
            if let PlanStep::Move(location) = step {
                total += locations.distance(last, *location);
                last = *location;
            }
        }
        total
    }
}
