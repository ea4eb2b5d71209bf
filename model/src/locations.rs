use std::collections::HashMap;

use crate::base_types::{Distance, Idx, LocationIdx};
use crate::errors::PlanningError;

/// A type for storing the pair-wise travel legs between all locations.
/// Legs are stored as a Vec<Vec<Leg>>-matrix; the indices in the matrix equal
/// the indices stored in each location.
///
/// The distance can be obtained by the dist function which has two
/// LocationIdx as input and provides a Distance. The path function provides
/// the ordered stops for traveling between two locations: every stop after
/// the origin up to and including the destination.
///
/// Distances are symmetric and consistent with the paths. Symmetry is
/// enforced on construction; path consistency is the data provider's
/// responsibility.
pub struct Locations {
    names: Vec<String>,
    name_to_idx: HashMap<String, LocationIdx>,
    legs: Vec<Vec<Leg>>,
}

#[derive(Clone)]
pub struct Leg {
    distance: Distance,
    via: Vec<LocationIdx>, // stops strictly between the endpoints, in travel order
}

impl Leg {
    pub fn new(distance: Distance, via: Vec<LocationIdx>) -> Leg {
        Leg { distance, via }
    }

    pub fn direct(distance: Distance) -> Leg {
        Leg {
            distance,
            via: Vec::new(),
        }
    }
}

/////////////////////////////////////////////////////////////////////
////////////////////////////// Locations ////////////////////////////
/////////////////////////////////////////////////////////////////////

// static functions
impl Locations {
    pub fn new(names: Vec<String>, legs: Vec<Vec<Leg>>) -> Result<Locations, PlanningError> {
        let n = names.len();
        if legs.len() != n || legs.iter().any(|row| row.len() != n) {
            return Err(PlanningError::MalformedInstance(format!(
                "leg matrix must be {}x{}",
                n, n
            )));
        }
        for (i, row) in legs.iter().enumerate() {
            for (j, leg) in row.iter().enumerate() {
                if !leg.distance.is_finite() || leg.distance < 0.0 {
                    return Err(PlanningError::MalformedInstance(format!(
                        "distance between {} and {} must be finite and non-negative",
                        names[i], names[j]
                    )));
                }
                if (leg.distance - legs[j][i].distance).abs() > f64::EPSILON {
                    return Err(PlanningError::MalformedInstance(format!(
                        "distances between {} and {} are not symmetric",
                        names[i], names[j]
                    )));
                }
            }
            if row[i].distance != 0.0 {
                return Err(PlanningError::MalformedInstance(format!(
                    "distance from {} to itself must be zero",
                    names[i]
                )));
            }
        }
        let name_to_idx = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), LocationIdx(i as Idx)))
            .collect();
        Ok(Locations {
            names,
            name_to_idx,
            legs,
        })
    }

    /// Build from a plain symmetric distance matrix; all legs are direct.
    pub fn from_distance_matrix(
        names: Vec<String>,
        matrix: Vec<Vec<Distance>>,
    ) -> Result<Locations, PlanningError> {
        let legs = matrix
            .into_iter()
            .map(|row| row.into_iter().map(Leg::direct).collect())
            .collect();
        Locations::new(names, legs)
    }
}

// methods
impl Locations {
    pub fn number_of_locations(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = LocationIdx> + '_ {
        (0..self.names.len()).map(|i| LocationIdx(i as Idx))
    }

    pub fn idx_of_name(&self, name: &str) -> Option<LocationIdx> {
        self.name_to_idx.get(name).copied()
    }

    pub fn name_of(&self, location: LocationIdx) -> &str {
        &self.names[location.0 as usize]
    }

    pub fn distance(&self, a: LocationIdx, b: LocationIdx) -> Distance {
        self.legs[a.0 as usize][b.0 as usize].distance
    }

    /// The ordered stops for traveling from a to b: every stop after a up to
    /// and including b itself. Empty iff a == b.
    pub fn path(&self, a: LocationIdx, b: LocationIdx) -> Vec<LocationIdx> {
        if a == b {
            return Vec::new();
        }
        let leg = &self.legs[a.0 as usize][b.0 as usize];
        let mut stops = leg.via.clone();
        stops.push(b);
        stops
    }
}
