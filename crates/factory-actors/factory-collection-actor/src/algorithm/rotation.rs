use factory_scheduling_environment::assignment::Assignment;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::FactoryWorkers;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use tracing::Level;
use tracing::event;

/// Shifts the cohort by `rotation`: station `s_i` receives the worker that
/// was at index `(i + rotation) mod n`.
pub fn rotate_cohort(cohort: &[(Station, WorkerId)], rotation: usize) -> Vec<(Station, WorkerId)>
{
    let cohort_size = cohort.len();
    cohort
        .iter()
        .enumerate()
        .map(|(index, (station, _))| (*station, cohort[(index + rotation) % cohort_size].1))
        .collect()
}

/// Station total relative to its base total. A station without base output
/// compares as 100.
pub fn raw_percentage(current_total: f64, base_total: f64) -> f64
{
    if base_total != 0.0 {
        current_total / base_total * 100.0
    } else {
        100.0
    }
}

/// Sum of `average - 100` over the other positions of `station` whose
/// occupant in `probe_assignment` is not the one the original assignment had
/// there. Positions beyond the original station length are not counted.
pub fn confound_adjustment(
    factory_workers: &FactoryWorkers,
    probe_assignment: &Assignment,
    original_assignment: &Assignment,
    station: &Station,
    position: usize,
) -> f64
{
    probe_assignment
        .workers(station)
        .iter()
        .enumerate()
        .filter(|(other_position, _)| *other_position != position)
        .filter(|(other_position, worker_id)| {
            original_assignment
                .worker_at(station, *other_position)
                .is_some_and(|original_worker_id| original_worker_id != **worker_id)
        })
        .map(|(_, worker_id)| match factory_workers.get(worker_id) {
            Some(factory_worker) => factory_worker.average_percentage(station) - 100.0,
            None => {
                event!(
                    Level::ERROR,
                    worker_id = %worker_id,
                    station = %station,
                    "confounding worker has no factory profile"
                );
                debug_assert!(false, "worker {} has no factory profile", worker_id);
                0.0
            }
        })
        .sum()
}
