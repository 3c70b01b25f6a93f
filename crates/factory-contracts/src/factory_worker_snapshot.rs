use std::collections::BTreeMap;

use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::FactoryWorkers;
use factory_scheduling_environment::worker_environment::factory_worker::FactoryWorkerProfile;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use serde::Deserialize;
use serde::Serialize;

/// Display copy of a `FactoryWorkerProfile` together with the figures that
/// are derived from it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FactoryWorkerSnapshot
{
    pub worker_id: WorkerId,
    pub performance_percentages: BTreeMap<Station, Vec<f64>>,
    pub data_completeness: f64,
    pub average_percentages: BTreeMap<Station, f64>,
}

impl FactoryWorkerSnapshot
{
    pub fn new(factory_worker: &FactoryWorkerProfile, station_count: usize) -> Self
    {
        Self {
            worker_id: factory_worker.worker_id,
            performance_percentages: factory_worker.performance_percentages.clone(),
            data_completeness: factory_worker.data_completeness(station_count),
            average_percentages: Station::all(station_count)
                .map(|station| (station, factory_worker.average_percentage(&station)))
                .collect(),
        }
    }

    pub fn from_factory_workers(
        factory_workers: &FactoryWorkers,
        station_count: usize,
    ) -> Vec<FactoryWorkerSnapshot>
    {
        factory_workers
            .values()
            .map(|factory_worker| Self::new(factory_worker, station_count))
            .collect()
    }
}
