use factory_actor_core::traits::Solution;
use factory_scheduling_environment::assignment::Assignment;
use factory_scheduling_environment::worker_environment::FactoryWorkers;

use super::collection_parameters::CollectionParameters;

/// The learned model and the working assignment. Both start as copies of
/// what the environment held when the collection started.
#[derive(Debug, Clone)]
pub struct CollectionSolution
{
    pub factory_workers: FactoryWorkers,
    pub current_assignment: Assignment,
}

impl Solution for CollectionSolution
{
    type Parameters = CollectionParameters;

    fn new(parameters: &Self::Parameters) -> Self
    {
        Self {
            factory_workers: parameters.prior_factory_workers.clone(),
            current_assignment: parameters.original_assignment.clone(),
        }
    }
}

impl CollectionSolution
{
    pub fn number_of_incomplete_workers(&self, station_count: usize) -> usize
    {
        self.factory_workers
            .values()
            .filter(|factory_worker| !factory_worker.is_complete(station_count))
            .count()
    }
}
