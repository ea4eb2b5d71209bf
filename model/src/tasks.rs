use std::fmt;

use crate::base_types::{LocationIdx, TaskIdx, Weight};

/// The read-only task catalog. Tasks are identified by their index, which
/// equals their position in the catalog; the search references tasks by
/// index only and never copies or mutates the records.
pub struct Tasks {
    tasks: Vec<Task>,
}

#[derive(Clone)]
pub struct Task {
    idx: TaskIdx,
    id: String,
    weight: Weight,
    pickup: LocationIdx,
    delivery: LocationIdx,
}

/////////////////////////////////////////////////////////////////////
//////////////////////////////// Tasks //////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Tasks {
    pub fn new(tasks: Vec<Task>) -> Tasks {
        debug_assert!(tasks.iter().enumerate().all(|(i, t)| t.idx.0 as usize == i));
        Tasks { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TaskIdx> + '_ {
        self.tasks.iter().map(|t| t.idx)
    }

    pub fn get(&self, idx: TaskIdx) -> &Task {
        &self.tasks[idx.0 as usize]
    }
}

/////////////////////////////////////////////////////////////////////
//////////////////////////////// Task ///////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Task {
    pub fn new(
        idx: TaskIdx,
        id: String,
        weight: Weight,
        pickup: LocationIdx,
        delivery: LocationIdx,
    ) -> Task {
        Task {
            idx,
            id,
            weight,
            pickup,
            delivery,
        }
    }

    pub fn idx(&self) -> TaskIdx {
        self.idx
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn pickup(&self) -> LocationIdx {
        self.pickup
    }

    pub fn delivery(&self) -> LocationIdx {
        self.delivery
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "task {} (weight: {}; {} -> {})",
            self.id, self.weight, self.pickup, self.delivery
        )
    }
}
