use crate::base_types::{TaskIdx, Weight};
use derive_more::Display;

/// Failures that are reported to the caller before or instead of a search
/// run. The search itself never fails; running out of iterations, stagnation
/// or time budget is a normal terminal condition.
#[derive(Display, Debug, Clone, PartialEq)]
pub enum PlanningError {
    /// The task's weight exceeds the capacity of every vehicle in the fleet.
    #[display(fmt = "task {} (weight {}) exceeds every vehicle's capacity", task, weight)]
    InfeasibleTask { task: TaskIdx, weight: Weight },

    /// There is no vehicle to assign tasks to.
    #[display(fmt = "cannot plan for an empty fleet")]
    EmptyFleet,

    /// A search parameter is out of range.
    #[display(fmt = "invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// The instance document could not be interpreted.
    #[display(fmt = "malformed instance: {}", _0)]
    MalformedInstance(String),
}

impl std::error::Error for PlanningError {}
