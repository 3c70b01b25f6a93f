use std::collections::BTreeMap;
use std::collections::BTreeSet;

use factory_actor_core::traits::Solution;
use factory_contracts::AssignmentReport;
use factory_contracts::StationDetail;
use factory_contracts::WorkerEfficiency;
use factory_scheduling_environment::assignment::Assignment;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;

use super::assignment_parameters::AssignmentParameters;

const LEADERBOARD_SIZE: usize = 3;

#[derive(Debug, Clone)]
pub struct AssignmentSolution
{
    pub assignment: Assignment,
    pub placed_workers: BTreeSet<WorkerId>,
}

impl Solution for AssignmentSolution
{
    type Parameters = AssignmentParameters;

    fn new(parameters: &Self::Parameters) -> Self
    {
        Self {
            assignment: Assignment::new(parameters.station_count),
            placed_workers: BTreeSet::new(),
        }
    }
}

impl AssignmentSolution
{
    pub fn place(&mut self, station: &Station, worker_id: WorkerId)
    {
        self.assignment.assign_to_station(station, worker_id);
        self.placed_workers.insert(worker_id);
    }

    pub fn is_placed(&self, worker_id: &WorkerId) -> bool
    {
        self.placed_workers.contains(worker_id)
    }

    pub fn station_score(&self, parameters: &AssignmentParameters, station: &Station) -> f64
    {
        self.assignment
            .workers(station)
            .iter()
            .map(|worker_id| parameters.score(worker_id, station))
            .sum()
    }

    /// Summary of the placement: totals, per station detail and the best and
    /// worst placed workers. The leaderboards overlap when fewer than six
    /// workers were placed.
    pub fn report(&self, parameters: &AssignmentParameters) -> AssignmentReport
    {
        let station_details: BTreeMap<Station, StationDetail> = self
            .assignment
            .stations()
            .map(|(station, worker_ids)| {
                (
                    *station,
                    StationDetail {
                        workers: worker_ids.clone(),
                        total_performance: self.station_score(parameters, station),
                        worker_count: worker_ids.len(),
                    },
                )
            })
            .collect();

        let total_performance: f64 = station_details
            .values()
            .map(|station_detail| station_detail.total_performance)
            .sum();
        let placed = self.assignment.number_of_workers();
        let average_performance = if placed > 0 {
            total_performance / placed as f64
        } else {
            0.0
        };

        let mut worker_efficiencies: Vec<WorkerEfficiency> = self
            .assignment
            .stations()
            .flat_map(|(station, worker_ids)| {
                worker_ids.iter().map(|worker_id| WorkerEfficiency {
                    worker_id: *worker_id,
                    station: *station,
                    efficiency: parameters.score(worker_id, station),
                })
            })
            .collect();
        worker_efficiencies.sort_by(|a, b| b.efficiency.total_cmp(&a.efficiency));

        let best_workers = worker_efficiencies
            .iter()
            .take(LEADERBOARD_SIZE)
            .copied()
            .collect();
        let worst_workers =
            worker_efficiencies[worker_efficiencies.len().saturating_sub(LEADERBOARD_SIZE)..].to_vec();

        AssignmentReport {
            assignment: self.assignment.clone(),
            worker_station_scores: parameters.worker_station_scores.clone(),
            total_performance,
            average_performance,
            station_details,
            worker_efficiencies,
            best_workers,
            worst_workers,
        }
    }
}
