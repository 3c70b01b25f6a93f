use anyhow::Result;
use factory_actor_core::algorithm::Algorithm;
use factory_actor_core::traits::CycleLog;
use factory_collection_actor::CollectionAlgorithm;
use factory_collection_actor::algorithm::CollectionProgress;
use factory_collection_actor::algorithm::collection_parameters::CollectionParameters;
use factory_collection_actor::algorithm::collection_solution::CollectionSolution;
use factory_scheduling_environment::FactoryLayout;
use factory_scheduling_environment::SchedulingEnvironment;
use factory_scheduling_environment::task_environment::TaskEnvironment;
use factory_scheduling_environment::task_environment::TaskProfile;
use factory_scheduling_environment::worker_environment::WorkerEnvironment;
use factory_scheduling_environment::worker_environment::true_worker::TrueWorkerProfile;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;

const TIRELESS: f64 = 1.0e9;

#[test]
fn test_probe_percentages_follow_inverse_delivery_times() -> Result<()>
{
    let factory_layout = FactoryLayout {
        station_count: 3,
        simulation_horizon: 8.0,
    };
    let station_1 = factory_layout.station(1)?;
    let station_2 = factory_layout.station(2)?;
    let station_3 = factory_layout.station(3)?;

    let task_environment = TaskEnvironment::new(vec![
        TaskProfile::new(station_1, 2.0, 1.0),
        TaskProfile::new(station_2, 4.0, 1.0),
        TaskProfile::new(station_3, 3.0, 1.0),
    ]);

    // Every home station produces exactly one unit in the base cycle.
    let probe_worker = WorkerId::new(3);
    let worker_environment = WorkerEnvironment::new(vec![
        TrueWorkerProfile::new(WorkerId::new(1), vec![2.0, 1.0, 1.0], TIRELESS),
        TrueWorkerProfile::new(WorkerId::new(2), vec![1.0, 4.0, 1.0], TIRELESS),
        TrueWorkerProfile::new(probe_worker, vec![3.0, 3.0, 3.0], TIRELESS),
    ]);

    let scheduling_environment = SchedulingEnvironment::builder()
        .factory_layout(factory_layout)
        .task_environment(task_environment)
        .worker_environment(worker_environment)
        .build()?;

    let mut collection_algorithm: CollectionAlgorithm =
        Algorithm::<CollectionSolution, CollectionParameters, CollectionProgress>::builder()
            .parameters_and_solution(&scheduling_environment)?
            .build()?;
    collection_algorithm.run(&mut CycleLog::default())?;

    let factory_worker = &collection_algorithm.factory_workers()[&probe_worker];
    let at_station_1 = factory_worker.average_percentage(&station_1);
    let at_station_2 = factory_worker.average_percentage(&station_2);

    assert_eq!(at_station_1, 150.0);
    assert_eq!(at_station_2, 75.0);
    assert_eq!(at_station_1 / at_station_2, 4.0 / 2.0);
    assert_eq!(factory_worker.average_percentage(&station_3), 100.0);
    Ok(())
}
