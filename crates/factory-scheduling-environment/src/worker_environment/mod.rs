pub mod factory_worker;
pub mod true_worker;
pub mod worker_id;

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use self::factory_worker::FactoryWorkerProfile;
use self::true_worker::TrueWorkerProfile;
use self::worker_id::WorkerId;

pub type TrueWorkers = BTreeMap<WorkerId, TrueWorkerProfile>;
pub type FactoryWorkers = BTreeMap<WorkerId, FactoryWorkerProfile>;

/// Both registries are keyed by `WorkerId`. Ids are handed out in hire order,
/// so iterating either map enumerates the workers in the order they were
/// hired.
#[derive(Clone, Default, Serialize, Deserialize, Debug)]
pub struct WorkerEnvironment
{
    pub true_workers: TrueWorkers,
    pub factory_workers: FactoryWorkers,
}

impl WorkerEnvironment
{
    pub fn new(true_workers: Vec<TrueWorkerProfile>) -> Self
    {
        let factory_workers = true_workers
            .iter()
            .map(|true_worker| {
                (
                    true_worker.worker_id,
                    FactoryWorkerProfile::new(true_worker.worker_id),
                )
            })
            .collect();

        let true_workers = true_workers
            .into_iter()
            .map(|true_worker| (true_worker.worker_id, true_worker))
            .collect();

        Self {
            true_workers,
            factory_workers,
        }
    }

    pub fn incomplete_workers(&self, station_count: usize) -> Vec<WorkerId>
    {
        self.factory_workers
            .values()
            .filter(|factory_worker| !factory_worker.is_complete(station_count))
            .map(|factory_worker| factory_worker.worker_id)
            .collect()
    }
}
