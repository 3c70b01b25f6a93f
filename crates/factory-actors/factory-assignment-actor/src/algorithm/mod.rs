pub mod assignment_parameters;
pub mod assignment_solution;

use std::ops::Deref;
use std::ops::DerefMut;

use anyhow::Context;
use anyhow::Result;
use factory_actor_core::algorithm::Algorithm;
use factory_contracts::AssignmentReport;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use itertools::Itertools;
use tracing::Level;
use tracing::event;

use self::assignment_parameters::AssignmentParameters;
use self::assignment_solution::AssignmentSolution;
use crate::assert_functions::AssignmentAssertions;

pub struct AssignmentAlgorithm(Algorithm<AssignmentSolution, AssignmentParameters, ()>);

impl AssignmentAlgorithm
{
    /// Fills the stations up to their quotas one position at a time. In each
    /// round the stations still under quota pick in ascending order of the
    /// score they have collected so far, and each takes the unplaced worker
    /// with the highest score for it. Equal scores go to the worker hired
    /// first.
    pub fn solve(&mut self) -> Result<AssignmentReport>
    {
        let Algorithm {
            solution,
            parameters,
            ..
        } = &mut self.0;

        for position in 0..parameters.max_quota() {
            let stations_needing_worker: Vec<Station> = parameters
                .station_quotas
                .iter()
                .filter(|(station, quota)| solution.assignment.workers(station).len() < **quota)
                .map(|(station, _)| (*station, solution.station_score(parameters, station)))
                .sorted_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(station, _)| station)
                .collect();

            for station in &stations_needing_worker {
                let mut best: Option<(WorkerId, f64)> = None;
                for worker_id in parameters
                    .worker_station_scores
                    .keys()
                    .filter(|worker_id| !solution.is_placed(worker_id))
                {
                    let score = parameters.score(worker_id, station);
                    if best.is_none_or(|(_, best_score)| score > best_score) {
                        best = Some((*worker_id, score));
                    }
                }

                match best {
                    Some((worker_id, score)) => {
                        event!(Level::TRACE, position, station = %station, worker_id = %worker_id, score, "worker placed");
                        solution.place(station, worker_id);
                    }
                    None => {
                        event!(
                            Level::WARN,
                            station = %station,
                            "no unplaced worker left for a station under quota"
                        );
                    }
                }
            }
        }

        self.assert_quotas_sum_to_worker_count()
            .context("Station quotas do not add up to the number of workers")?;
        self.assert_workers_placed_at_most_once()
            .context("The final assignment places a worker twice")?;

        let assignment_report = self.solution.report(&self.parameters);
        event!(
            Level::INFO,
            total_performance = assignment_report.total_performance,
            average_performance = assignment_report.average_performance,
            placed_workers = assignment_report.assignment.number_of_workers(),
            "final assignment solved"
        );
        Ok(assignment_report)
    }
}

impl Deref for AssignmentAlgorithm
{
    type Target = Algorithm<AssignmentSolution, AssignmentParameters, ()>;

    fn deref(&self) -> &Self::Target
    {
        &self.0
    }
}

impl DerefMut for AssignmentAlgorithm
{
    fn deref_mut(&mut self) -> &mut Self::Target
    {
        &mut self.0
    }
}

impl From<Algorithm<AssignmentSolution, AssignmentParameters, ()>> for AssignmentAlgorithm
{
    fn from(value: Algorithm<AssignmentSolution, AssignmentParameters, ()>) -> Self
    {
        AssignmentAlgorithm(value)
    }
}
