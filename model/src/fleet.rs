use std::fmt;

use crate::base_types::{Capacity, Cost, LocationIdx, VehicleIdx};

/// The read-only vehicle roster. Vehicles are identified by their index,
/// which equals their position in the roster; iteration is always in index
/// order so that callers walking the fleet are deterministic.
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

#[derive(Clone)]
pub struct Vehicle {
    idx: VehicleIdx,
    id: String,
    capacity: Capacity,
    cost_per_distance: Cost,
    start_location: LocationIdx,
}

/////////////////////////////////////////////////////////////////////
//////////////////////////////// Fleet //////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Fleet {
    pub fn new(vehicles: Vec<Vehicle>) -> Fleet {
        debug_assert!(vehicles
            .iter()
            .enumerate()
            .all(|(i, v)| v.idx.0 as usize == i));
        Fleet { vehicles }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = VehicleIdx> + '_ {
        self.vehicles.iter().map(|v| v.idx)
    }

    pub fn get(&self, idx: VehicleIdx) -> &Vehicle {
        &self.vehicles[idx.0 as usize]
    }
}

/////////////////////////////////////////////////////////////////////
/////////////////////////////// Vehicle /////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Vehicle {
    pub fn new(
        idx: VehicleIdx,
        id: String,
        capacity: Capacity,
        cost_per_distance: Cost,
        start_location: LocationIdx,
    ) -> Vehicle {
        Vehicle {
            idx,
            id,
            capacity,
            cost_per_distance,
            start_location,
        }
    }

    pub fn idx(&self) -> VehicleIdx {
        self.idx
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn cost_per_distance(&self) -> Cost {
        self.cost_per_distance
    }

    pub fn start_location(&self) -> LocationIdx {
        self.start_location
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "vehicle {} (capacity: {}; cost/dist: {})",
            self.id, self.capacity, self.cost_per_distance
        )
    }
}
