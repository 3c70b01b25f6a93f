use std::collections::BTreeMap;
use std::collections::BTreeSet;

use factory_contracts::OptimizationDetail;
use factory_scheduling_environment::assignment::Assignment;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::FactoryWorkers;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use tracing::Level;
use tracing::event;

/// Reassigns the cohort at `position` of `assignment`. Stations are visited
/// in ascending order and each takes the unused cohort worker with the
/// highest learned average for it; on equal scores the worker met first in
/// the cohort keeps the spot.
pub fn optimize_position(
    factory_workers: &FactoryWorkers,
    assignment: &Assignment,
    position: usize,
) -> (Assignment, BTreeMap<Station, OptimizationDetail>)
{
    let mut optimized_assignment = assignment.clone();
    let cohort = assignment.position_cohort(position);

    let mut used_workers: BTreeSet<WorkerId> = BTreeSet::new();
    let mut optimization_details = BTreeMap::new();

    for (station, _) in &cohort {
        let mut best: Option<(WorkerId, f64)> = None;

        for (_, worker_id) in cohort
            .iter()
            .filter(|(_, worker_id)| !used_workers.contains(worker_id))
        {
            let score = learned_score(factory_workers, worker_id, station);
            let best_score = best.map_or(f64::NEG_INFINITY, |(_, best_score)| best_score);
            if score > best_score {
                best = Some((*worker_id, score));
            }
        }

        let Some((new_worker, score)) = best else {
            continue;
        };

        if let Some(old_worker) = optimized_assignment.set_worker_at(station, position, new_worker)
        {
            used_workers.insert(new_worker);
            optimization_details.insert(
                *station,
                OptimizationDetail {
                    old_worker,
                    new_worker,
                    score,
                },
            );
        }
    }

    event!(
        Level::DEBUG,
        position,
        changed_stations = optimization_details
            .values()
            .filter(|detail| detail.old_worker != detail.new_worker)
            .count(),
        "optimized position"
    );
    (optimized_assignment, optimization_details)
}

fn learned_score(factory_workers: &FactoryWorkers, worker_id: &WorkerId, station: &Station) -> f64
{
    match factory_workers.get(worker_id) {
        Some(factory_worker) => factory_worker.average_percentage(station),
        None => {
            event!(
                Level::ERROR,
                worker_id = %worker_id,
                "cohort worker has no factory profile"
            );
            debug_assert!(false, "worker {} has no factory profile", worker_id);
            0.0
        }
    }
}
