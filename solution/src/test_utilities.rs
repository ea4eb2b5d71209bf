use std::sync::Arc;

use model::base_types::{LocationIdx, TaskIdx, VehicleIdx};
use model::fleet::{Fleet, Vehicle};
use model::locations::Locations;
use model::tasks::{Task, Tasks};

use crate::Assignment;

pub struct TestData {
    pub locations: Arc<Locations>,
    pub fleet: Arc<Fleet>,
    pub tasks: Arc<Tasks>,
    pub a: LocationIdx,
    pub b: LocationIdx,
    pub c: LocationIdx,
    pub v1: VehicleIdx,
    pub v2: VehicleIdx,
    pub t1: TaskIdx,
    pub t2: TaskIdx,
    pub t3: TaskIdx,
}

/// Two vehicles (capacities 20 and 30, both starting at A) and three tasks
/// over the triangle A-B-C with distances A-B = 10, B-C = 5, A-C = 12.
pub fn init_test_data() -> TestData {
    let locations = Arc::new(
        Locations::from_distance_matrix(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec![
                vec![0.0, 10.0, 12.0],
                vec![10.0, 0.0, 5.0],
                vec![12.0, 5.0, 0.0],
            ],
        )
        .unwrap(),
    );
    let a = locations.idx_of_name("A").unwrap();
    let b = locations.idx_of_name("B").unwrap();
    let c = locations.idx_of_name("C").unwrap();

    let v1 = VehicleIdx(0);
    let v2 = VehicleIdx(1);
    let fleet = Arc::new(Fleet::new(vec![
        Vehicle::new(v1, "v1".to_string(), 20, 1.0, a),
        Vehicle::new(v2, "v2".to_string(), 30, 2.0, a),
    ]));

    let t1 = TaskIdx(0);
    let t2 = TaskIdx(1);
    let t3 = TaskIdx(2);
    let tasks = Arc::new(Tasks::new(vec![
        Task::new(t1, "t1".to_string(), 10, a, b),
        Task::new(t2, "t2".to_string(), 15, b, c),
        Task::new(t3, "t3".to_string(), 5, a, c),
    ]));

    TestData {
        locations,
        fleet,
        tasks,
        a,
        b,
        c,
        v1,
        v2,
        t1,
        t2,
        t3,
    }
}

/// t1 on the first vehicle, t2 and t3 on the second.
pub fn default_assignment(d: &TestData) -> Assignment {
    Assignment::empty(d.locations.clone(), d.fleet.clone(), d.tasks.clone())
        .assign_tasks(d.v1, &[d.t1])
        .assign_tasks(d.v2, &[d.t2, d.t3])
}
