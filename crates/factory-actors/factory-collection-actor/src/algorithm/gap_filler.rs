use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::FactoryWorkers;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;

/// Percentage of a probe that measures a single worker on its own: the
/// worker's output relative to the station total, offset by 100. This is not
/// the same scale as a rotation percentage.
pub fn isolated_percentage(individual_performance: f64, base_total: f64) -> f64
{
    if base_total > 0.0 {
        individual_performance / base_total * 100.0 + 100.0
    } else {
        100.0
    }
}

/// Every worker and station pair without an observation, workers in id
/// order and stations ascending.
pub fn missing_pairs(factory_workers: &FactoryWorkers, station_count: usize) -> Vec<(WorkerId, Station)>
{
    factory_workers
        .values()
        .filter(|factory_worker| !factory_worker.is_complete(station_count))
        .flat_map(|factory_worker| {
            factory_worker
                .missing_stations(station_count)
                .into_iter()
                .map(|station| (factory_worker.worker_id, station))
        })
        .collect()
}
