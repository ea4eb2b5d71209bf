use itertools::Itertools;
use rand::Rng;

use model::base_types::VehicleIdx;

use super::Assignment;

impl Assignment {
    /// All assignments one structural edit away from this one, built from a
    /// single uniformly chosen vehicle with a non-empty sequence: every
    /// feasible exchange of two of its action positions, plus every move of
    /// one of its tasks to the back of another vehicle's sequence.
    ///
    /// The list is recomputed on every call. It is empty iff no vehicle
    /// carries a task, or the only loaded vehicle holds a single task and
    /// there is no other vehicle to hand it to.
    pub fn neighborhood<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Assignment> {
        let loaded: Vec<VehicleIdx> = self
            .fleet
            .iter()
            .filter(|&v| !self.sequence_of(v).is_empty())
            .collect();
        if loaded.is_empty() {
            return Vec::new();
        }
        let vehicle = loaded[rng.random_range(0..loaded.len())];

        let mut neighbors = self.action_swap_neighbors(vehicle);
        neighbors.extend(self.reassignment_neighbors(vehicle));
        neighbors
    }

    /// The exhaustive variant: both move families applied to every vehicle.
    pub fn full_neighborhood(&self) -> Vec<Assignment> {
        let mut neighbors = Vec::new();
        for vehicle in self.fleet.iter() {
            neighbors.extend(self.action_swap_neighbors(vehicle));
            neighbors.extend(self.reassignment_neighbors(vehicle));
        }
        neighbors
    }

    /// All pairwise exchanges of two action positions of one vehicle.
    /// Candidates breaking precedence or prefix-capacity are dropped here;
    /// such an edit is a dead candidate, not an error.
    fn action_swap_neighbors(&self, vehicle: VehicleIdx) -> Vec<Assignment> {
        let sequence = self.sequence_of(vehicle);
        let capacity = self.fleet.get(vehicle).capacity();

        (0..sequence.len())
            .tuple_combinations()
            .filter_map(|(i, j)| {
                let swapped = sequence.swap_actions(i, j);
                if swapped.is_precedence_feasible()
                    && swapped.is_capacity_feasible(capacity, &self.tasks)
                {
                    Some(self.with_sequence(vehicle, swapped))
                } else {
                    None
                }
            })
            .collect()
    }

    /// All moves of one task from the given vehicle to the back of another
    /// vehicle's sequence. Appending the pickup directly before the delivery
    /// keeps precedence and prefix-capacity valid by construction, so the
    /// destination's total capacity is the only gate.
    fn reassignment_neighbors(&self, from: VehicleIdx) -> Vec<Assignment> {
        let sequence = self.sequence_of(from);
        let mut neighbors = Vec::new();

        for task in sequence.carried_tasks() {
            let weight = self.tasks.get(task).weight();
            let shortened = sequence.remove_task(task);

            for to in self.fleet.iter() {
                if to == from || weight > self.fleet.get(to).capacity() {
                    continue;
                }
                let extended = self.sequence_of(to).push_task(task);
                debug_assert!(extended.is_precedence_feasible());
                neighbors.push(
                    self.with_sequence(from, shortened.clone())
                        .with_sequence(to, extended),
                );
            }
        }
        neighbors
    }
}
