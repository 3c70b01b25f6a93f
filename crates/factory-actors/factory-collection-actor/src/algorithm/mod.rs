pub mod collection_parameters;
pub mod collection_solution;
pub mod gap_filler;
pub mod position_optimizer;
pub mod rotation;

use std::collections::BTreeMap;
use std::ops::Deref;
use std::ops::DerefMut;

use anyhow::Context;
use anyhow::Result;
use factory_actor_core::algorithm::Algorithm;
use factory_actor_core::traits::CycleObserver;
use factory_contracts::CycleDetails;
use factory_contracts::CycleEvent;
use factory_contracts::CycleLabel;
use factory_contracts::FactoryWorkerSnapshot;
use factory_contracts::PerformanceComparison;
use factory_scheduling_environment::assignment::Assignment;
use factory_scheduling_environment::performance::simulate_station_performance;
use factory_scheduling_environment::performance::station_totals;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::FactoryWorkers;
use tracing::Level;
use tracing::event;

use self::collection_parameters::CollectionParameters;
use self::collection_solution::CollectionSolution;
use crate::assert_functions::CollectionAssertions;

pub const BASE_CYCLE: u64 = 1;

/// Counts the rotations so that every rotation event gets its own number.
/// Numbering continues after the base cycle.
#[derive(Debug, Default)]
pub struct CollectionProgress
{
    rotations_performed: u64,
}

impl CollectionProgress
{
    fn next_rotation_label(&mut self) -> CycleLabel
    {
        self.rotations_performed += 1;
        CycleLabel::Numbered(BASE_CYCLE + self.rotations_performed)
    }

    pub fn rotations_performed(&self) -> u64
    {
        self.rotations_performed
    }
}

pub struct CollectionAlgorithm(Algorithm<CollectionSolution, CollectionParameters, CollectionProgress>);

impl CollectionAlgorithm
{
    /// Runs the whole collection: base phase, one rotation round per
    /// position of the original assignment with an optimization after every
    /// round except the last, then gap filling. Returns the working
    /// assignment; the learned model is left in the solution.
    pub fn run<O>(&mut self, observer: &mut O) -> Result<Assignment>
    where
        O: CycleObserver,
    {
        self.record_base(observer);

        let max_station_length = self.parameters.original_assignment.max_station_length();

        for position in 0..max_station_length {
            if !self.position_needs_testing(position) {
                self.skip_position(position, observer);
                continue;
            }

            self.collect_position(position, observer);

            if position + 1 < max_station_length {
                self.optimize_position(position, observer);
            }
        }

        let station_count = self.parameters.station_count();
        if self.solution.number_of_incomplete_workers(station_count) > 0 {
            self.fill_gaps(observer);
        }

        self.assert_every_worker_is_complete()
            .context("Data collection finished with unmeasured worker and station pairs")?;
        self.assert_assignment_holds_the_original_workers()
            .context("The working assignment lost or gained workers during the collection")?;

        event!(
            Level::INFO,
            rotations = self.solution_intermediate.rotations_performed(),
            workers = self.solution.factory_workers.len(),
            "data collection finished"
        );
        Ok(self.solution.current_assignment.clone())
    }

    pub fn factory_workers(&self) -> &FactoryWorkers
    {
        &self.solution.factory_workers
    }

    pub fn into_factory_workers(self) -> FactoryWorkers
    {
        self.0.solution.factory_workers
    }

    /// Records 100 for every worker at its home station and reports the base
    /// performance every later percentage is measured against.
    fn record_base<O>(&mut self, observer: &mut O)
    where
        O: CycleObserver,
    {
        let Algorithm {
            solution,
            parameters,
            ..
        } = &mut self.0;

        let mut performance_comparison = BTreeMap::new();
        for (station, worker_ids) in parameters.original_assignment.stations() {
            for worker_id in worker_ids {
                match solution.factory_workers.get_mut(worker_id) {
                    Some(factory_worker) => {
                        factory_worker.record_performance_percentage(*station, 100.0)
                    }
                    None => {
                        event!(Level::ERROR, worker_id = %worker_id, station = %station, "assigned worker has no factory profile");
                        debug_assert!(false, "worker {} has no factory profile", worker_id);
                    }
                }
            }

            if let Some(worker_id) = worker_ids.first() {
                let base_total = parameters.base_total(station);
                let raw_percentage = rotation::raw_percentage(base_total, base_total);
                performance_comparison.insert(
                    *station,
                    PerformanceComparison {
                        worker_id: *worker_id,
                        raw_percentage: Some(raw_percentage),
                        adjusted_percentage: raw_percentage,
                    },
                );
            }
        }

        observer.observe(CycleEvent {
            cycle: CycleLabel::Numbered(BASE_CYCLE),
            assignment: parameters.original_assignment.clone(),
            factory_workers: FactoryWorkerSnapshot::from_factory_workers(
                &solution.factory_workers,
                parameters.station_count(),
            ),
            details: CycleDetails::Base {
                base_performance: parameters.base_performance.clone(),
                performance_comparison,
            },
        });
    }

    /// A position needs testing while any worker it holds in the original
    /// assignment misses data. Workers without a factory profile are ignored.
    fn position_needs_testing(&self, position: usize) -> bool
    {
        let station_count = self.parameters.station_count();
        self.parameters
            .original_assignment
            .position_cohort(position)
            .iter()
            .filter_map(|(_, worker_id)| self.solution.factory_workers.get(worker_id))
            .any(|factory_worker| !factory_worker.is_complete(station_count))
    }

    fn skip_position<O>(&self, position: usize, observer: &mut O)
    where
        O: CycleObserver,
    {
        event!(Level::DEBUG, position, "position skipped");
        observer.observe(CycleEvent {
            cycle: CycleLabel::SkipPosition(position),
            assignment: self.solution.current_assignment.clone(),
            factory_workers: Vec::new(),
            details: CycleDetails::Skip {
                position,
                message: format!(
                    "Skipped position {} - all workers have complete data",
                    position + 1
                ),
            },
        });
    }

    /// Rotates the original cohort of `position` through its stations on a
    /// copy of the working assignment and records one confound adjusted
    /// percentage for every worker and station pair not measured before.
    pub fn collect_position<O>(&mut self, position: usize, observer: &mut O)
    where
        O: CycleObserver,
    {
        let Algorithm {
            solution_intermediate,
            solution,
            parameters,
        } = &mut self.0;

        let cohort = parameters.original_assignment.position_cohort(position);
        let cohort_stations: Vec<Station> = cohort.iter().map(|(station, _)| *station).collect();

        let mut probe_assignment = solution.current_assignment.clone();

        for rotation in 0..cohort.len() {
            let rotated_cohort = rotation::rotate_cohort(&cohort, rotation);
            for (station, worker_id) in &rotated_cohort {
                probe_assignment.set_worker_at(station, position, *worker_id);
            }

            let current_performance = station_totals(
                &parameters.true_workers,
                &parameters.task_environment,
                &probe_assignment,
                &cohort_stations,
                parameters.horizon(),
            );

            let mut performance_comparison = BTreeMap::new();
            for (station, worker_id) in &rotated_cohort {
                let Some(factory_worker) = solution.factory_workers.get(worker_id) else {
                    event!(Level::ERROR, worker_id = %worker_id, station = %station, "rotated worker has no factory profile");
                    debug_assert!(false, "worker {} has no factory profile", worker_id);
                    continue;
                };

                if factory_worker.has_data_for_station(station) {
                    continue;
                }

                let raw_percentage = rotation::raw_percentage(
                    current_performance.get(station).copied().unwrap_or(0.0),
                    parameters.base_total(station),
                );
                let adjustment = rotation::confound_adjustment(
                    &solution.factory_workers,
                    &probe_assignment,
                    &parameters.original_assignment,
                    station,
                    position,
                );
                let adjusted_percentage = raw_percentage - adjustment;

                if let Some(factory_worker) = solution.factory_workers.get_mut(worker_id) {
                    factory_worker.record_performance_percentage(*station, adjusted_percentage);
                }

                performance_comparison.insert(
                    *station,
                    PerformanceComparison {
                        worker_id: *worker_id,
                        raw_percentage: Some(raw_percentage),
                        adjusted_percentage,
                    },
                );
            }

            let cycle = solution_intermediate.next_rotation_label();
            event!(
                Level::DEBUG,
                cycle = %cycle,
                position,
                rotation,
                recorded = performance_comparison.len(),
                "rotation measured"
            );

            observer.observe(CycleEvent {
                cycle,
                assignment: probe_assignment.clone(),
                factory_workers: FactoryWorkerSnapshot::from_factory_workers(
                    &solution.factory_workers,
                    parameters.station_count(),
                ),
                details: CycleDetails::Rotation {
                    position,
                    rotation,
                    performance_comparison,
                },
            });
        }
    }

    pub fn optimize_position<O>(&mut self, position: usize, observer: &mut O)
    where
        O: CycleObserver,
    {
        let (optimized_assignment, optimization_details) = position_optimizer::optimize_position(
            &self.solution.factory_workers,
            &self.solution.current_assignment,
            position,
        );
        self.solution.current_assignment = optimized_assignment;

        observer.observe(CycleEvent {
            cycle: CycleLabel::OptimizePosition(position),
            assignment: self.solution.current_assignment.clone(),
            factory_workers: FactoryWorkerSnapshot::from_factory_workers(
                &self.solution.factory_workers,
                self.parameters.station_count(),
            ),
            details: CycleDetails::Optimization {
                position,
                optimization_details,
            },
        });
    }

    /// Measures every pair the rotations left open with an isolated probe.
    /// The station totals of the working assignment are taken once, before
    /// the first probe. The working assignment itself is not changed.
    pub fn fill_gaps<O>(&mut self, observer: &mut O)
    where
        O: CycleObserver,
    {
        let Algorithm {
            solution,
            parameters,
            ..
        } = &mut self.0;

        let base_performance = simulate_station_performance(
            &parameters.true_workers,
            &parameters.task_environment,
            &solution.current_assignment,
            parameters.horizon(),
        );

        let missing_pairs =
            gap_filler::missing_pairs(&solution.factory_workers, parameters.station_count());
        event!(
            Level::INFO,
            missing_pairs = missing_pairs.len(),
            "filling gaps in the learned model"
        );

        for (worker_id, station) in missing_pairs {
            let probe_assignment = solution
                .current_assignment
                .with_worker_moved(&worker_id, &station);

            let (Some(true_worker), Some(task)) = (
                parameters.true_workers.get(&worker_id),
                parameters.task_environment.task(&station),
            ) else {
                event!(Level::ERROR, worker_id = %worker_id, station = %station, "gap probe without true profile or task");
                debug_assert!(false, "gap probe for {} at {} cannot be simulated", worker_id, station);
                continue;
            };

            let individual_performance =
                true_worker.performance(&station, task, parameters.horizon());
            let percentage = gap_filler::isolated_percentage(
                individual_performance,
                base_performance.get(&station).copied().unwrap_or(0.0),
            );

            if let Some(factory_worker) = solution.factory_workers.get_mut(&worker_id) {
                factory_worker.record_performance_percentage(station, percentage);
            }

            observer.observe(CycleEvent {
                cycle: CycleLabel::Fix(worker_id, station),
                assignment: probe_assignment,
                factory_workers: FactoryWorkerSnapshot::from_factory_workers(
                    &solution.factory_workers,
                    parameters.station_count(),
                ),
                details: CycleDetails::IncompleteFix {
                    worker_id,
                    station,
                    performance_comparison: BTreeMap::from([(
                        station,
                        PerformanceComparison {
                            worker_id,
                            raw_percentage: None,
                            adjusted_percentage: percentage,
                        },
                    )]),
                },
            });
        }
    }
}

impl Deref for CollectionAlgorithm
{
    type Target = Algorithm<CollectionSolution, CollectionParameters, CollectionProgress>;

    fn deref(&self) -> &Self::Target
    {
        &self.0
    }
}

impl DerefMut for CollectionAlgorithm
{
    fn deref_mut(&mut self) -> &mut Self::Target
    {
        &mut self.0
    }
}

impl From<Algorithm<CollectionSolution, CollectionParameters, CollectionProgress>>
    for CollectionAlgorithm
{
    fn from(value: Algorithm<CollectionSolution, CollectionParameters, CollectionProgress>) -> Self
    {
        CollectionAlgorithm(value)
    }
}
