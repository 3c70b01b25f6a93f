use anyhow::Result;
use anyhow::bail;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use itertools::Itertools;
use tracing::Level;
use tracing::event;

use crate::algorithm::CollectionAlgorithm;

pub trait CollectionAssertions
{
    fn assert_every_worker_is_complete(&self) -> Result<()>;

    fn assert_assignment_holds_the_original_workers(&self) -> Result<()>;
}

impl CollectionAssertions for CollectionAlgorithm
{
    fn assert_every_worker_is_complete(&self) -> Result<()>
    {
        let station_count = self.parameters.station_count();

        let incomplete: Vec<(WorkerId, Vec<Station>)> = self
            .solution
            .factory_workers
            .values()
            .filter(|factory_worker| !factory_worker.is_complete(station_count))
            .map(|factory_worker| {
                (
                    factory_worker.worker_id,
                    factory_worker.missing_stations(station_count),
                )
            })
            .collect();

        if !incomplete.is_empty() {
            event!(
                Level::ERROR,
                incomplete_workers = ?incomplete,
                "workers are missing observations after the collection"
            );
            bail!(
                "{} workers are missing observations: {}",
                incomplete.len(),
                incomplete
                    .iter()
                    .map(|(worker_id, _)| worker_id)
                    .join(", ")
            );
        }
        Ok(())
    }

    // The optimizer only exchanges workers inside a position, so the station
    // lengths and the set of workers never change.
    fn assert_assignment_holds_the_original_workers(&self) -> Result<()>
    {
        let original_assignment = &self.parameters.original_assignment;
        let current_assignment = &self.solution.current_assignment;

        let original_workers: Vec<WorkerId> = original_assignment.concatenated().sorted().collect();
        let current_workers: Vec<WorkerId> = current_assignment.concatenated().sorted().collect();

        if original_workers != current_workers {
            event!(
                Level::ERROR,
                original_workers = ?original_workers,
                current_workers = ?current_workers,
                "the working assignment does not hold the original workers"
            );
            bail!("The working assignment does not hold the workers of the original assignment");
        }

        for ((station, original), (_, current)) in original_assignment
            .stations()
            .zip(current_assignment.stations())
        {
            if original.len() != current.len() {
                event!(
                    Level::ERROR,
                    station = %station,
                    original_length = original.len(),
                    current_length = current.len(),
                    "station length changed during the collection"
                );
                bail!("Station {} changed length during the collection", station);
            }
        }
        Ok(())
    }
}
