
use std::collections::HashSet;

use model::base_types::{Capacity, Distance, LocationIdx, TaskIdx};
use model::locations::Locations;
use model::tasks::Tasks;

pub type Position = usize; // the position within the action sequence

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Pickup,
    Delivery,
}

/// One slot of a vehicle's action sequence: pick a task up or deliver it.
/// Each carried task contributes exactly two actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    task: TaskIdx,
    kind: ActionKind,
}

impl Action {
    pub fn pickup(task: TaskIdx) -> Action {
        Action {
            task,
            kind: ActionKind::Pickup,
        }
    }

    pub fn delivery(task: TaskIdx) -> Action {
        Action {
            task,
            kind: ActionKind::Delivery,
        }
    }

    pub fn task(&self) -> TaskIdx {
        self.task
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// The location at which this action is performed.
    pub fn location(&self, tasks: &Tasks) -> LocationIdx {
        match self.kind {
            ActionKind::Pickup => tasks.get(self.task).pickup(),
            ActionKind::Delivery => tasks.get(self.task).delivery(),
        }
    }
}

/// The ordered pickup/delivery sequence of a single vehicle.
///
/// This is an immutable object; every modification returns a fresh sequence.
/// An action's index is its position in the sequence, nothing is stored
/// redundantly, so structural edits cannot leave stale bookkeeping behind.
///
/// The following must hold for a sequence to be feasible (checked by
/// `is_precedence_feasible` and `is_capacity_feasible`, which the
/// neighborhood generator uses to filter candidates):
/// - each task is picked up before it is delivered;
/// - the running load never exceeds the vehicle's capacity at any prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSequence {
    actions: Vec<Action>,
}

// basic public methods
impl TaskSequence {
    pub fn empty() -> TaskSequence {
        TaskSequence {
            actions: Vec::new(),
        }
    }

    /// Builds the trivially feasible sequence that picks up and delivers each
    /// task in turn: the i-th task occupies positions 2i and 2i+1.
    pub fn from_tasks(tasks: &[TaskIdx]) -> TaskSequence {
        let mut actions = Vec::with_capacity(2 * tasks.len());
        for &task in tasks {
            actions.push(Action::pickup(task));
            actions.push(Action::delivery(task));
        }
        TaskSequence { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn number_of_tasks(&self) -> usize {
        self.actions.len() / 2
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> + '_ {
        self.actions.iter()
    }

    /// The carried tasks in pickup order.
    pub fn carried_tasks(&self) -> impl Iterator<Item = TaskIdx> + '_ {
        self.actions
            .iter()
            .filter(|action| action.kind() == ActionKind::Pickup)
            .map(|action| action.task())
    }

    pub fn position_of(&self, task: TaskIdx, kind: ActionKind) -> Option<Position> {
        self.actions
            .iter()
            .position(|action| action.task() == task && action.kind() == kind)
    }
}

// modifications; each returns a fresh sequence
impl TaskSequence {
    /// Exchanges the actions at positions i and j.
    pub fn swap_actions(&self, i: Position, j: Position) -> TaskSequence {
        let mut actions = self.actions.clone();
        actions.swap(i, j);
        TaskSequence { actions }
    }

    /// Appends the pickup and delivery of a task after all present actions.
    pub fn push_task(&self, task: TaskIdx) -> TaskSequence {
        let mut actions = self.actions.clone();
        actions.push(Action::pickup(task));
        actions.push(Action::delivery(task));
        TaskSequence { actions }
    }

    /// Removes both actions of a task; subsequent actions move up, their new
    /// positions being implied by the array order.
    pub fn remove_task(&self, task: TaskIdx) -> TaskSequence {
        let actions = self
            .actions
            .iter()
            .filter(|action| action.task() != task)
            .copied()
            .collect();
        TaskSequence { actions }
    }
}

// feasibility and metrics
impl TaskSequence {
    /// True if every task is picked up before it is delivered.
    pub fn is_precedence_feasible(&self) -> bool {
        let mut picked_up: HashSet<TaskIdx> = HashSet::new();
        for action in &self.actions {
            match action.kind() {
                ActionKind::Pickup => {
                    picked_up.insert(action.task());
                }
                ActionKind::Delivery => {
                    if !picked_up.contains(&action.task()) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// True if the running load stays within the given capacity for every
    /// prefix of the sequence.
    pub fn is_capacity_feasible(&self, capacity: Capacity, tasks: &Tasks) -> bool {
        let mut load: i64 = 0;
        for action in &self.actions {
            let weight = i64::from(tasks.get(action.task()).weight());
            match action.kind() {
                ActionKind::Pickup => load += weight,
                ActionKind::Delivery => load -= weight,
            }
            if load > i64::from(capacity) {
                return false;
            }
        }
        true
    }

    /// The distance to perform all actions in order, starting at the given
    /// location.
    pub fn distance(
        &self,
        start: LocationIdx,
        locations: &Locations,
        tasks: &Tasks,
    ) -> Distance {
        let mut last = start;
        let mut total = 0.0;
        for action in &self.actions {
            let target = action.location(tasks);
            total += locations.distance(last, target);
            last = target;
        }
        total
    }
}
