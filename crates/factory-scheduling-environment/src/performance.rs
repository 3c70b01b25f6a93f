//! Simulation of the factory floor. Turns ground truth into observed
//! performance; nothing in here is used to make decisions.

use std::collections::BTreeMap;

use tracing::Level;
use tracing::event;

use crate::assignment::Assignment;
use crate::station::Station;
use crate::task_environment::TaskEnvironment;
use crate::worker_environment::TrueWorkers;

pub type StationPerformance = BTreeMap<Station, f64>;

/// Sum of the individual performances of everyone assigned to `station`.
/// Ids without a true profile contribute nothing; they point at a registry
/// that went out of step with the assignment.
pub fn station_total(
    true_workers: &TrueWorkers,
    task_environment: &TaskEnvironment,
    assignment: &Assignment,
    station: &Station,
    horizon: f64,
) -> f64
{
    let Some(task) = task_environment.task(station) else {
        event!(Level::ERROR, station = %station, "no task profile for station");
        debug_assert!(false, "no task profile for {}", station);
        return 0.0;
    };

    assignment
        .workers(station)
        .iter()
        .map(|worker_id| match true_workers.get(worker_id) {
            Some(true_worker) => true_worker.performance(station, task, horizon),
            None => {
                event!(
                    Level::ERROR,
                    worker_id = %worker_id,
                    station = %station,
                    "assigned worker has no true profile"
                );
                debug_assert!(false, "assigned worker {} has no true profile", worker_id);
                0.0
            }
        })
        .sum()
}

pub fn station_totals<'a>(
    true_workers: &TrueWorkers,
    task_environment: &TaskEnvironment,
    assignment: &Assignment,
    stations: impl IntoIterator<Item = &'a Station>,
    horizon: f64,
) -> StationPerformance
{
    stations
        .into_iter()
        .map(|station| {
            (
                *station,
                station_total(true_workers, task_environment, assignment, station, horizon),
            )
        })
        .collect()
}

/// Station totals for every station of the assignment.
pub fn simulate_station_performance(
    true_workers: &TrueWorkers,
    task_environment: &TaskEnvironment,
    assignment: &Assignment,
    horizon: f64,
) -> StationPerformance
{
    let stations: Vec<Station> = assignment.stations().map(|(station, _)| *station).collect();
    station_totals(
        true_workers,
        task_environment,
        assignment,
        &stations,
        horizon,
    )
}
