use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use model::base_types::{LocationIdx, TaskIdx, VehicleIdx};
use model::config::Config;
use model::errors::PlanningError;
use model::fleet::{Fleet, Vehicle};
use model::locations::Locations;
use model::tasks::{Task, Tasks};
use solution::plan::PlanStep;
use solution::test_utilities::init_test_data;

use crate::initial::{DesignatedVehicle, RandomAdmissible};
use crate::{plan, PlanningOutcome};

fn spec_config() -> Config {
    Config::default()
        .with_max_iterations(100)
        .with_max_global_stagnation(50)
        .with_acceptance_probability(0.1)
        .with_seed(42)
}

fn assert_each_task_served_once(outcome: &PlanningOutcome, tasks: &Tasks) {
    for task in tasks.iter() {
        let pickups: usize = outcome
            .plans
            .values()
            .map(|plan| {
                plan.steps()
                    .iter()
                    .filter(|step| matches!(step, PlanStep::Pickup(t) if *t == task))
                    .count()
            })
            .sum();
        let deliveries: usize = outcome
            .plans
            .values()
            .map(|plan| {
                plan.steps()
                    .iter()
                    .filter(|step| matches!(step, PlanStep::Delivery(t) if *t == task))
                    .count()
            })
            .sum();
        assert_eq!(pickups, 1, "task {} must be picked up exactly once", task);
        assert_eq!(deliveries, 1, "task {} must be delivered exactly once", task);
    }
}

#[test]
fn random_admissible_respects_capacities() {
    let d = init_test_data();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let assignment =
        RandomAdmissible::initialize(d.locations.clone(), d.fleet.clone(), d.tasks.clone())
            .solve(&mut rng)
            .unwrap();

    assert_eq!(assignment.number_of_assigned_tasks(), 3);
    for v in assignment.vehicles() {
        let capacity = d.fleet.get(v).capacity();
        let sequence = assignment.sequence_of(v);
        assert!(sequence.is_precedence_feasible());
        assert!(sequence.is_capacity_feasible(capacity, &d.tasks));
        for task in sequence.carried_tasks() {
            assert!(d.tasks.get(task).weight() <= capacity);
        }
    }
}

#[test]
fn task_too_heavy_for_every_vehicle_is_infeasible() {
    let d = init_test_data();
    let heavy = TaskIdx(0);
    let tasks = Arc::new(Tasks::new(vec![Task::new(
        heavy,
        "boulder".to_string(),
        40,
        d.a,
        d.b,
    )]));
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let result = RandomAdmissible::initialize(d.locations.clone(), d.fleet.clone(), tasks)
        .solve(&mut rng);

    assert_eq!(
        result.err(),
        Some(PlanningError::InfeasibleTask {
            task: heavy,
            weight: 40
        })
    );
}

#[test]
fn empty_fleet_is_infeasible() {
    let d = init_test_data();
    let fleet = Arc::new(Fleet::new(Vec::new()));
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let result = RandomAdmissible::initialize(d.locations.clone(), fleet, d.tasks.clone())
        .solve(&mut rng);

    assert_eq!(result.err(), Some(PlanningError::EmptyFleet));
}

#[test]
fn infeasible_instance_never_starts_the_search() {
    let locations = Arc::new(
        Locations::from_distance_matrix(vec!["A".to_string()], vec![vec![0.0]]).unwrap(),
    );
    let a = LocationIdx(0);
    let fleet = Arc::new(Fleet::new(vec![Vehicle::new(
        VehicleIdx(0),
        "v1".to_string(),
        5,
        1.0,
        a,
    )]));
    let tasks = Arc::new(Tasks::new(vec![Task::new(
        TaskIdx(0),
        "t1".to_string(),
        6,
        a,
        a,
    )]));

    let mut events = 0;
    let result = plan(
        locations,
        fleet,
        tasks,
        &spec_config(),
        Some(&mut |_| events += 1),
    );

    assert!(matches!(
        result.err(),
        Some(PlanningError::InfeasibleTask { .. })
    ));
    assert_eq!(events, 0);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let d = init_test_data();
    let config = spec_config().with_acceptance_probability(2.0);

    let result = plan(
        d.locations.clone(),
        d.fleet.clone(),
        d.tasks.clone(),
        &config,
        None,
    );

    assert!(matches!(result.err(), Some(PlanningError::InvalidConfig(_))));
}

#[test]
fn designated_vehicle_baseline_uses_one_vehicle_in_order() {
    let d = init_test_data();
    let baseline =
        DesignatedVehicle::initialize(d.locations.clone(), d.fleet.clone(), d.tasks.clone())
            .solve()
            .unwrap();

    assert_eq!(
        baseline.sequence_of(d.v1).carried_tasks().collect::<Vec<_>>(),
        vec![d.t1, d.t2, d.t3]
    );
    assert!(baseline.sequence_of(d.v2).is_empty());
    // A->B (t1), B->C (t2), C->A->C (t3) at cost 1 per distance
    assert!((baseline.cost() - 39.0).abs() < 1e-9);
}

#[test]
fn search_does_not_lose_to_the_designated_baseline() {
    let d = init_test_data();
    let baseline =
        DesignatedVehicle::initialize(d.locations.clone(), d.fleet.clone(), d.tasks.clone())
            .solve()
            .unwrap();

    let outcome = plan(
        d.locations.clone(),
        d.fleet.clone(),
        d.tasks.clone(),
        &spec_config(),
        None,
    )
    .unwrap();

    assert!(
        outcome.cost <= baseline.cost() + 1e-9,
        "search cost {} must not exceed baseline cost {}",
        outcome.cost,
        baseline.cost()
    );
    assert_each_task_served_once(&outcome, &d.tasks);
    assert!(outcome.summary.contains("total cost"));
}

#[test]
fn identical_seeds_give_identical_outcomes() {
    let d = init_test_data();
    let config = spec_config().with_seed(7);

    let first = plan(
        d.locations.clone(),
        d.fleet.clone(),
        d.tasks.clone(),
        &config,
        None,
    )
    .unwrap();
    let second = plan(
        d.locations.clone(),
        d.fleet.clone(),
        d.tasks.clone(),
        &config,
        None,
    )
    .unwrap();

    assert_eq!(first.cost, second.cost);
    assert_eq!(first.iterations, second.iterations);
    assert_eq!(first.plans, second.plans);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn expired_deadline_returns_the_start_assignment() {
    let d = init_test_data();
    let config = spec_config().with_time_limit(Duration::ZERO);

    let outcome = plan(
        d.locations.clone(),
        d.fleet.clone(),
        d.tasks.clone(),
        &config,
        None,
    )
    .unwrap();

    assert_eq!(outcome.iterations, 0);
    assert_each_task_served_once(&outcome, &d.tasks);
}

#[test]
fn observer_sees_one_event_per_iteration() {
    let d = init_test_data();
    let mut events = Vec::new();

    let outcome = plan(
        d.locations.clone(),
        d.fleet.clone(),
        d.tasks.clone(),
        &spec_config(),
        Some(&mut |event| events.push(event)),
    )
    .unwrap();

    assert_eq!(events.len(), outcome.iterations);
    assert!(!events.is_empty());
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.iteration, i);
        assert!(event.best_cost <= event.current_cost + 1e-9);
    }
    // the tracked best never gets worse
    for window in events.windows(2) {
        assert!(window[1].best_cost <= window[0].best_cost + 1e-9);
    }
    // the final best matches the returned outcome
    assert!((events.last().unwrap().best_cost - outcome.cost).abs() < 1e-9);
}
