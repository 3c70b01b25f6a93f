use std::collections::BTreeMap;

use anyhow::Result;
use factory_actor_core::traits::Parameters;
use factory_contracts::assignment_report::WorkerStationScores;
use factory_scheduling_environment::SchedulingEnvironment;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::FactoryWorkers;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;

pub type StationQuotas = BTreeMap<Station, usize>;

pub struct AssignmentParameters
{
    pub station_count: usize,
    pub total_worker_count: usize,
    pub worker_station_scores: WorkerStationScores,
    pub station_quotas: StationQuotas,
}

impl AssignmentParameters
{
    /// Scores are the learned averages, zero for stations without data. The
    /// assignment the collection ended with plays no part here.
    pub fn new(
        factory_workers: &FactoryWorkers,
        total_worker_count: usize,
        station_count: usize,
    ) -> Self
    {
        let worker_station_scores = factory_workers
            .iter()
            .map(|(worker_id, factory_worker)| {
                (
                    *worker_id,
                    Station::all(station_count)
                        .map(|station| (station, factory_worker.average_percentage(&station)))
                        .collect(),
                )
            })
            .collect();

        Self {
            station_count,
            total_worker_count,
            worker_station_scores,
            station_quotas: station_quotas(total_worker_count, station_count),
        }
    }

    pub fn score(&self, worker_id: &WorkerId, station: &Station) -> f64
    {
        self.worker_station_scores
            .get(worker_id)
            .and_then(|station_scores| station_scores.get(station))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn max_quota(&self) -> usize
    {
        self.station_quotas.values().copied().max().unwrap_or(0)
    }
}

impl Parameters for AssignmentParameters
{
    fn from_source(scheduling_environment: &SchedulingEnvironment) -> Result<Self>
    {
        Ok(Self::new(
            &scheduling_environment.worker_environment.factory_workers,
            scheduling_environment.number_of_workers(),
            scheduling_environment.station_count(),
        ))
    }
}

/// `N / S` workers per station, the first `N mod S` stations take one more.
pub fn station_quotas(total_worker_count: usize, station_count: usize) -> StationQuotas
{
    if station_count == 0 {
        return StationQuotas::new();
    }

    let base_workers = total_worker_count / station_count;
    let extra_workers = total_worker_count % station_count;

    Station::all(station_count)
        .map(|station| {
            let extra = usize::from(station.number() <= extra_workers);
            (station, base_workers + extra)
        })
        .collect()
}
