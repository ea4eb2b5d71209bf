use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use model::base_types::{LocationIdx, TaskIdx, VehicleIdx};
use model::fleet::{Fleet, Vehicle};
use model::locations::Locations;
use model::tasks::{Task, Tasks};

use crate::plan::PlanStep;
use crate::test_utilities::{default_assignment, init_test_data, TestData};
use crate::Assignment;

fn assert_valid(assignment: &Assignment, d: &TestData) {
    for v in assignment.vehicles() {
        let sequence = assignment.sequence_of(v);
        assert!(sequence.is_precedence_feasible());
        assert!(sequence.is_capacity_feasible(d.fleet.get(v).capacity(), &d.tasks));
    }
    // partition: every task exactly once across the fleet
    let mut assigned: Vec<TaskIdx> = assignment.assigned_tasks().collect();
    assigned.sort();
    let all: Vec<TaskIdx> = d.tasks.iter().collect();
    assert_eq!(assigned, all);
}

#[test]
fn empty_assignment_has_cost_zero() {
    let d = init_test_data();
    let assignment = Assignment::empty(d.locations.clone(), d.fleet.clone(), d.tasks.clone());

    assert_eq!(assignment.cost(), 0.0);
    assert_eq!(assignment.number_of_assigned_tasks(), 0);
    assert!(assignment.vehicles().all(|v| assignment.sequence_of(v).is_empty()));
}

#[test]
fn cost_weighs_route_distance_per_vehicle() {
    let d = init_test_data();
    let assignment = default_assignment(&d);

    // v1 (cost/dist 1): A->A pickup, A->B deliver            = 10
    // v2 (cost/dist 2): A->B, B->C for t2, C->A, A->C for t3 = 39
    assert!((assignment.cost() - (10.0 + 2.0 * 39.0)).abs() < 1e-9);
}

#[test]
fn assign_tasks_keeps_the_partition() {
    let d = init_test_data();
    let assignment = default_assignment(&d);
    assert_valid(&assignment, &d);
}

#[test]
fn clones_do_not_alias() {
    let d = init_test_data();
    let assignment = default_assignment(&d);

    let modified = assignment.assign_tasks(d.v1, &[]);
    assert_eq!(modified.sequence_of(d.v1).len(), 0);
    // the original still carries t1 on v1
    assert_eq!(assignment.sequence_of(d.v1).number_of_tasks(), 1);
}

#[test]
fn full_neighborhood_enumerates_both_move_families() {
    let d = init_test_data();
    let assignment = default_assignment(&d);

    let neighbors = assignment.full_neighborhood();
    // v1 ([t1]): no feasible swap, one move to v2.
    // v2 ([t2, t3]): one feasible swap (both tasks on board), two moves to v1.
    assert_eq!(neighbors.len(), 4);

    for neighbor in &neighbors {
        for v in neighbor.vehicles() {
            let sequence = neighbor.sequence_of(v);
            assert!(sequence.is_precedence_feasible());
            assert!(sequence.is_capacity_feasible(d.fleet.get(v).capacity(), &d.tasks));
        }
    }
}

#[test]
fn neighborhood_picks_one_loaded_vehicle() {
    let d = init_test_data();
    let assignment = default_assignment(&d);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..20 {
        let neighbors = assignment.neighborhood(&mut rng);
        // either v1's single family result (1) or v2's (3)
        assert!(neighbors.len() == 1 || neighbors.len() == 3);
    }
}

#[test]
fn neighborhood_of_task_free_assignment_is_empty() {
    let d = init_test_data();
    let assignment = Assignment::empty(d.locations.clone(), d.fleet.clone(), d.tasks.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    assert!(assignment.neighborhood(&mut rng).is_empty());
    assert!(assignment.full_neighborhood().is_empty());
}

#[test]
fn invariants_hold_across_a_random_walk() {
    let d = init_test_data();
    let mut current = default_assignment(&d);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..25 {
        let neighbors = current.neighborhood(&mut rng);
        assert!(!neighbors.is_empty());
        for neighbor in &neighbors {
            assert_valid(neighbor, &d);
        }
        let pick = rng.random_range(0..neighbors.len());
        current = neighbors[pick].clone();
    }
}

#[test]
fn task_weight_equal_to_destination_capacity_is_admissible() {
    let locations = Arc::new(
        Locations::from_distance_matrix(vec!["A".to_string()], vec![vec![0.0]]).unwrap(),
    );
    let a = LocationIdx(0);
    let fleet = Arc::new(Fleet::new(vec![
        Vehicle::new(VehicleIdx(0), "v1".to_string(), 20, 1.0, a),
        Vehicle::new(VehicleIdx(1), "v2".to_string(), 30, 1.0, a),
    ]));
    let heavy = TaskIdx(0);
    let tasks = Arc::new(Tasks::new(vec![Task::new(
        heavy,
        "heavy".to_string(),
        20,
        a,
        a,
    )]));

    let assignment = Assignment::empty(locations, fleet, tasks.clone())
        .assign_tasks(VehicleIdx(1), &[heavy]);

    // the only neighbor hands the weight-20 task to the capacity-20 vehicle
    let neighbors = assignment.full_neighborhood();
    assert_eq!(neighbors.len(), 1);
    assert_eq!(
        neighbors[0].sequence_of(VehicleIdx(0)).number_of_tasks(),
        1
    );
}

#[test]
fn exported_plans_reproduce_the_cost() {
    let d = init_test_data();
    let assignment = default_assignment(&d);

    let plans = assignment.export_plans();
    let recomputed: f64 = assignment
        .vehicles()
        .map(|v| {
            let vehicle = d.fleet.get(v);
            vehicle.cost_per_distance()
                * plans[&v].total_distance(vehicle.start_location(), &d.locations)
        })
        .sum();

    assert!((recomputed - assignment.cost()).abs() < 1e-9);
}

#[test]
fn exported_plan_lists_moves_and_actions_in_order() {
    let d = init_test_data();
    let assignment = default_assignment(&d);

    let plans = assignment.export_plans();
    // v1 starts at A, picks t1 up there, then moves to B to deliver
    assert_eq!(
        plans[&d.v1].steps(),
        &[
            PlanStep::Pickup(d.t1),
            PlanStep::Move(d.b),
            PlanStep::Delivery(d.t1),
        ]
    );
}

#[test]
fn display_summarises_cost_and_sequences() {
    let d = init_test_data();
    let summary = default_assignment(&d).to_string();

    assert!(summary.contains("total cost"));
    assert!(summary.contains("vehicle v1: pickup t1, deliver t1"));
    assert!(summary.contains("vehicle v2: pickup t2, deliver t2, pickup t3, deliver t3"));
}
