use std::collections::BTreeSet;

use anyhow::Result;
use anyhow::bail;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use tracing::Level;
use tracing::event;

use crate::algorithm::AssignmentAlgorithm;

pub trait AssignmentAssertions
{
    fn assert_quotas_sum_to_worker_count(&self) -> Result<()>;

    fn assert_workers_placed_at_most_once(&self) -> Result<()>;
}

impl AssignmentAssertions for AssignmentAlgorithm
{
    fn assert_quotas_sum_to_worker_count(&self) -> Result<()>
    {
        let quota_sum: usize = self.parameters.station_quotas.values().sum();

        if quota_sum != self.parameters.total_worker_count {
            event!(
                Level::ERROR,
                quota_sum,
                total_worker_count = self.parameters.total_worker_count,
                station_quotas = ?self.parameters.station_quotas,
            );
            bail!(
                "Quotas sum to {} for {} workers",
                quota_sum,
                self.parameters.total_worker_count
            );
        }
        Ok(())
    }

    fn assert_workers_placed_at_most_once(&self) -> Result<()>
    {
        let mut seen: BTreeSet<WorkerId> = BTreeSet::new();

        for worker_id in self.solution.assignment.concatenated() {
            if !seen.insert(worker_id) {
                event!(
                    Level::ERROR,
                    worker_id = %worker_id,
                    assignment = %self.solution.assignment,
                    "worker placed at more than one spot"
                );
                bail!("Worker {} is placed more than once", worker_id);
            }
        }
        Ok(())
    }
}
