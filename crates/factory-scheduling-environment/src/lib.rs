pub mod assignment;
pub mod error;
pub mod generator;
pub mod performance;
pub mod station;
pub mod task_environment;
pub mod worker_environment;

use std::fmt;

use anyhow::Result;
use anyhow::bail;
use serde::Deserialize;
use serde::Serialize;
use tracing::Level;
use tracing::event;

use self::assignment::Assignment;
use self::error::SchedulingEnvironmentError;
use self::station::Station;
use self::task_environment::TaskEnvironment;
use self::worker_environment::WorkerEnvironment;
use self::worker_environment::factory_worker::FactoryWorkerProfile;
use self::worker_environment::true_worker::TrueWorkerProfile;
use self::worker_environment::worker_id::WorkerId;

pub const DEFAULT_STATION_COUNT: usize = 6;
pub const DEFAULT_SIMULATION_HORIZON: f64 = 8.0;

/// Fixed shape of the factory floor. Every other structure in the
/// environment is sized from the `station_count` held here.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FactoryLayout
{
    pub station_count: usize,
    pub simulation_horizon: f64,
}

impl Default for FactoryLayout
{
    fn default() -> Self
    {
        Self {
            station_count: DEFAULT_STATION_COUNT,
            simulation_horizon: DEFAULT_SIMULATION_HORIZON,
        }
    }
}

impl FactoryLayout
{
    pub fn stations(&self) -> impl Iterator<Item = Station> + use<>
    {
        Station::all(self.station_count)
    }

    pub fn station(&self, number: usize) -> Result<Station, SchedulingEnvironmentError>
    {
        Station::new(number, self.station_count)
    }
}

/// The session wide state: ground truth, learned model, task parameters and
/// the station occupancy. The two worker registries and the assignment are
/// only ever changed together through `hire_worker` and `fire_worker`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SchedulingEnvironment
{
    pub factory_layout: FactoryLayout,
    pub worker_environment: WorkerEnvironment,
    pub task_environment: TaskEnvironment,
    pub assignment: Assignment,
}

pub struct SchedulingEnvironmentBuilder
{
    factory_layout: Option<FactoryLayout>,
    worker_environment: Option<WorkerEnvironment>,
    task_environment: Option<TaskEnvironment>,
}

impl SchedulingEnvironment
{
    pub fn builder() -> SchedulingEnvironmentBuilder
    {
        SchedulingEnvironmentBuilder {
            factory_layout: None,
            worker_environment: None,
            task_environment: None,
        }
    }

    pub fn station_count(&self) -> usize
    {
        self.factory_layout.station_count
    }

    pub fn number_of_workers(&self) -> usize
    {
        self.worker_environment.true_workers.len()
    }

    pub fn hire_worker(&mut self, true_worker: TrueWorkerProfile) -> Result<WorkerId>
    {
        let worker_id = true_worker.worker_id;

        if self.worker_environment.true_workers.contains_key(&worker_id) {
            bail!(SchedulingEnvironmentError::DuplicateWorker(worker_id));
        }
        if true_worker.skills.len() != self.station_count() {
            bail!(SchedulingEnvironmentError::SkillCountMismatch {
                worker_id,
                skills: true_worker.skills.len(),
                station_count: self.station_count(),
            });
        }

        self.worker_environment
            .factory_workers
            .insert(worker_id, FactoryWorkerProfile::new(worker_id));
        self.worker_environment
            .true_workers
            .insert(worker_id, true_worker);

        let station = self.assignment.hire(worker_id);

        event!(Level::INFO, worker_id = %worker_id, station = %station, "hired worker");
        Ok(worker_id)
    }

    pub fn fire_worker(&mut self, worker_id: &WorkerId) -> Result<()>
    {
        if self
            .worker_environment
            .true_workers
            .remove(worker_id)
            .is_none()
        {
            bail!(SchedulingEnvironmentError::UnknownWorker(*worker_id));
        }
        self.worker_environment.factory_workers.remove(worker_id);

        self.assignment = self.assignment.fire(worker_id);

        event!(Level::INFO, worker_id = %worker_id, remaining = self.number_of_workers(), "fired worker");
        Ok(())
    }
}

impl SchedulingEnvironmentBuilder
{
    pub fn build(self) -> Result<SchedulingEnvironment>
    {
        let factory_layout = self.factory_layout.unwrap_or_default();

        if factory_layout.station_count == 0 {
            bail!(SchedulingEnvironmentError::NoStations);
        }

        // Without generated tasks every station takes one time unit and costs
        // no energy.
        let task_environment = match self.task_environment {
            Some(task_environment) => task_environment,
            None => TaskEnvironment::uniform(&factory_layout, 1.0, 0.0),
        };

        if task_environment.len() != factory_layout.station_count {
            bail!(SchedulingEnvironmentError::TaskCountMismatch {
                tasks: task_environment.len(),
                station_count: factory_layout.station_count,
            });
        }

        let worker_environment = self.worker_environment.unwrap_or_default();

        let worker_ids: Vec<WorkerId> = worker_environment.true_workers.keys().copied().collect();
        let assignment = Assignment::sequential(&worker_ids, factory_layout.station_count);

        Ok(SchedulingEnvironment {
            factory_layout,
            worker_environment,
            task_environment,
            assignment,
        })
    }

    pub fn factory_layout(mut self, factory_layout: FactoryLayout) -> Self
    {
        self.factory_layout = Some(factory_layout);
        self
    }

    pub fn task_environment(mut self, task_environment: TaskEnvironment) -> Self
    {
        self.task_environment = Some(task_environment);
        self
    }

    pub fn worker_environment(mut self, worker_environment: WorkerEnvironment) -> Self
    {
        self.worker_environment = Some(worker_environment);
        self
    }
}

impl fmt::Display for SchedulingEnvironment
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(
            f,
            "The Scheduling Environment is currently comprised of\
            \n  number of stations: {}\
            \n  number of workers: {}\
            \n  simulation horizon: {}",
            self.factory_layout.station_count,
            self.number_of_workers(),
            self.factory_layout.simulation_horizon,
        )
    }
}

#[cfg(test)]
mod tests
{
    use anyhow::Result;

    use super::*;
    use crate::task_environment::TaskProfile;
    use crate::worker_environment::worker_id::WorkerIdAllocator;

    fn true_worker(allocator: &mut WorkerIdAllocator, skill: f64) -> TrueWorkerProfile
    {
        TrueWorkerProfile::new(allocator.next(), vec![skill; DEFAULT_STATION_COUNT], 5.0)
    }

    #[test]
    fn test_hire_keeps_registries_and_assignment_in_lockstep() -> Result<()>
    {
        let mut scheduling_environment = SchedulingEnvironment::builder().build()?;
        let mut allocator = WorkerIdAllocator::default();

        for _ in 0..8 {
            scheduling_environment.hire_worker(true_worker(&mut allocator, 4.0))?;
        }

        assert_eq!(scheduling_environment.number_of_workers(), 8);
        assert_eq!(scheduling_environment.worker_environment.factory_workers.len(), 8);
        assert_eq!(scheduling_environment.assignment.number_of_workers(), 8);

        let first = scheduling_environment.factory_layout.station(1)?;
        let second = scheduling_environment.factory_layout.station(2)?;
        let third = scheduling_environment.factory_layout.station(3)?;
        assert_eq!(scheduling_environment.assignment.workers(&first).len(), 2);
        assert_eq!(scheduling_environment.assignment.workers(&second).len(), 2);
        assert_eq!(scheduling_environment.assignment.workers(&third).len(), 1);
        Ok(())
    }

    #[test]
    fn test_fire_unknown_worker_is_an_error() -> Result<()>
    {
        let mut scheduling_environment = SchedulingEnvironment::builder().build()?;

        let error = scheduling_environment
            .fire_worker(&WorkerId::new(42))
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<SchedulingEnvironmentError>(),
            Some(&SchedulingEnvironmentError::UnknownWorker(WorkerId::new(42)))
        );
        Ok(())
    }

    #[test]
    fn test_fire_removes_worker_everywhere() -> Result<()>
    {
        let mut scheduling_environment = SchedulingEnvironment::builder().build()?;
        let mut allocator = WorkerIdAllocator::default();

        let hired = (0..7)
            .map(|_| scheduling_environment.hire_worker(true_worker(&mut allocator, 2.0)))
            .collect::<Result<Vec<_>>>()?;

        scheduling_environment.fire_worker(&hired[3])?;

        assert!(!scheduling_environment
            .worker_environment
            .true_workers
            .contains_key(&hired[3]));
        assert!(!scheduling_environment
            .worker_environment
            .factory_workers
            .contains_key(&hired[3]));
        assert_eq!(scheduling_environment.assignment.locate(&hired[3]), None);
        assert_eq!(scheduling_environment.assignment.number_of_workers(), 6);
        Ok(())
    }

    #[test]
    fn test_builder_rejects_mismatching_tasks() -> Result<()>
    {
        let layout = FactoryLayout {
            station_count: 3,
            simulation_horizon: DEFAULT_SIMULATION_HORIZON,
        };
        let tasks = TaskEnvironment::new(vec![TaskProfile::new(Station::new(1, 3)?, 2.0, 1.0)]);

        let result = SchedulingEnvironment::builder()
            .factory_layout(layout)
            .task_environment(tasks)
            .build();

        assert!(result.is_err());
        Ok(())
    }
}
