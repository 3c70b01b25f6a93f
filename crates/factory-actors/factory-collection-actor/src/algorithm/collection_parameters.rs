use anyhow::Result;
use anyhow::ensure;
use factory_actor_core::traits::Parameters;
use factory_scheduling_environment::FactoryLayout;
use factory_scheduling_environment::SchedulingEnvironment;
use factory_scheduling_environment::assignment::Assignment;
use factory_scheduling_environment::performance::StationPerformance;
use factory_scheduling_environment::performance::simulate_station_performance;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::task_environment::TaskEnvironment;
use factory_scheduling_environment::worker_environment::FactoryWorkers;
use factory_scheduling_environment::worker_environment::TrueWorkers;

/// Everything that stays fixed while data is collected. The original
/// assignment is both the baseline of every percentage and the source of the
/// cohorts; it is never re-derived from the assignment the optimizer mutates.
pub struct CollectionParameters
{
    pub factory_layout: FactoryLayout,
    pub true_workers: TrueWorkers,
    pub task_environment: TaskEnvironment,
    pub prior_factory_workers: FactoryWorkers,
    pub original_assignment: Assignment,
    pub base_performance: StationPerformance,
}

impl CollectionParameters
{
    pub fn new(
        factory_layout: FactoryLayout,
        true_workers: TrueWorkers,
        task_environment: TaskEnvironment,
        prior_factory_workers: FactoryWorkers,
        original_assignment: Assignment,
    ) -> Self
    {
        let base_performance = simulate_station_performance(
            &true_workers,
            &task_environment,
            &original_assignment,
            factory_layout.simulation_horizon,
        );

        Self {
            factory_layout,
            true_workers,
            task_environment,
            prior_factory_workers,
            original_assignment,
            base_performance,
        }
    }

    pub fn station_count(&self) -> usize
    {
        self.factory_layout.station_count
    }

    pub fn horizon(&self) -> f64
    {
        self.factory_layout.simulation_horizon
    }

    pub fn base_total(&self, station: &Station) -> f64
    {
        self.base_performance.get(station).copied().unwrap_or(0.0)
    }
}

impl Parameters for CollectionParameters
{
    fn from_source(scheduling_environment: &SchedulingEnvironment) -> Result<Self>
    {
        ensure!(
            scheduling_environment.assignment.station_count() == scheduling_environment.station_count(),
            "The assignment has {} stations but the factory has {}",
            scheduling_environment.assignment.station_count(),
            scheduling_environment.station_count()
        );

        Ok(Self::new(
            scheduling_environment.factory_layout,
            scheduling_environment.worker_environment.true_workers.clone(),
            scheduling_environment.task_environment.clone(),
            scheduling_environment
                .worker_environment
                .factory_workers
                .clone(),
            scheduling_environment.assignment.clone(),
        ))
    }
}
