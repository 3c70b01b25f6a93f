pub mod logging;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use factory_actor_core::algorithm::Algorithm;
use factory_actor_core::traits::CycleLog;
use factory_assignment_actor::AssignmentAlgorithm;
use factory_assignment_actor::algorithm::assignment_parameters::AssignmentParameters;
use factory_assignment_actor::algorithm::assignment_solution::AssignmentSolution;
use factory_collection_actor::CollectionAlgorithm;
use factory_collection_actor::algorithm::CollectionProgress;
use factory_collection_actor::algorithm::collection_parameters::CollectionParameters;
use factory_collection_actor::algorithm::collection_solution::CollectionSolution;
use factory_configuration::SystemConfigurations;
use factory_contracts::AssignmentReport;
use factory_contracts::CycleEvent;
use factory_scheduling_environment::SchedulingEnvironment;
use factory_scheduling_environment::generator::generate_task_profiles;
use factory_scheduling_environment::generator::generate_true_worker;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use factory_scheduling_environment::worker_environment::worker_id::WorkerIdAllocator;
use rand::rngs::StdRng;
use serde::Serialize;
use strum_macros::Display;
use tracing::Level;
use tracing::event;
use tracing::instrument;

#[derive(Display, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState
{
    Hiring,
    Running,
    Completed,
}

/// One interactive session. The task profiles are drawn once when the
/// session is created and every hired worker is sampled from the same
/// generator. An optimization run is replayed one cycle event at a time.
pub struct Orchestrator
{
    scheduling_environment: SchedulingEnvironment,
    system_configurations: SystemConfigurations,
    rng: StdRng,
    worker_id_allocator: WorkerIdAllocator,
    session_state: SessionState,
    cycle_history: Vec<CycleEvent>,
    current_cycle_index: usize,
    final_results: Option<AssignmentReport>,
}

impl Orchestrator
{
    pub fn new(system_configurations: SystemConfigurations, mut rng: StdRng) -> Result<Self>
    {
        system_configurations
            .validate()
            .context("Could not start a session from the system configurations")?;

        let factory_layout = system_configurations.factory_layout();
        let task_environment = generate_task_profiles(
            &mut rng,
            &system_configurations.sampling_ranges(),
            &factory_layout,
        );

        let scheduling_environment = SchedulingEnvironment::builder()
            .factory_layout(factory_layout)
            .task_environment(task_environment)
            .build()
            .context("Could not build the scheduling environment")?;

        event!(
            Level::INFO,
            station_count = factory_layout.station_count,
            simulation_horizon = factory_layout.simulation_horizon,
            "session created"
        );

        Ok(Self {
            scheduling_environment,
            system_configurations,
            rng,
            worker_id_allocator: WorkerIdAllocator::default(),
            session_state: SessionState::Hiring,
            cycle_history: Vec::new(),
            current_cycle_index: 0,
            final_results: None,
        })
    }

    #[instrument(level = "info", skip_all)]
    pub fn hire_worker(&mut self) -> Result<WorkerId>
    {
        self.ensure_not_running("hire a worker")?;

        let true_worker = generate_true_worker(
            &mut self.worker_id_allocator,
            &mut self.rng,
            &self.system_configurations.sampling_ranges(),
            &self.scheduling_environment.factory_layout,
        );

        self.scheduling_environment
            .hire_worker(true_worker)
            .context("Could not hire a new worker")
    }

    #[instrument(level = "info", skip_all, fields(worker_id = %worker_id))]
    pub fn fire_worker(&mut self, worker_id: &WorkerId) -> Result<()>
    {
        self.ensure_not_running("fire a worker")?;

        self.scheduling_environment
            .fire_worker(worker_id)
            .with_context(|| format!("Could not fire worker {}", worker_id))?;

        if self.session_state == SessionState::Completed {
            self.final_results = None;
            self.cycle_history.clear();
            self.current_cycle_index = 0;
        }
        Ok(())
    }

    /// Runs the collection and the final solver. The learned model replaces
    /// the one held by the environment, and the events of the collection
    /// become the history that `next_cycle` steps through.
    #[instrument(level = "info", skip_all)]
    pub fn start_optimization(&mut self) -> Result<()>
    {
        self.ensure_not_running("start an optimization")?;

        if self.scheduling_environment.number_of_workers() == 0 {
            event!(Level::WARN, "no workers hired, nothing to optimize");
            return Ok(());
        }

        let mut collection_algorithm: CollectionAlgorithm =
            Algorithm::<CollectionSolution, CollectionParameters, CollectionProgress>::builder()
                .parameters_and_solution(&self.scheduling_environment)
                .context("Could not derive the collection parameters")?
                .build()?;

        let mut cycle_log = CycleLog::default();
        collection_algorithm
            .run(&mut cycle_log)
            .context("The data collection failed")?;

        self.scheduling_environment.worker_environment.factory_workers =
            collection_algorithm.into_factory_workers();

        let mut assignment_algorithm: AssignmentAlgorithm =
            Algorithm::<AssignmentSolution, AssignmentParameters, ()>::builder()
                .parameters_and_solution(&self.scheduling_environment)
                .context("Could not derive the assignment parameters")?
                .build()?;

        let assignment_report = assignment_algorithm
            .solve()
            .context("The final assignment could not be solved")?;

        self.cycle_history = cycle_log.into_cycle_events();
        self.current_cycle_index = 0;
        self.final_results = Some(assignment_report);
        self.session_state = SessionState::Running;

        event!(
            Level::INFO,
            cycles = self.cycle_history.len(),
            "optimization started"
        );
        Ok(())
    }

    /// Steps to the next recorded cycle. Stepping past the last one completes
    /// the session and installs the solved assignment.
    #[instrument(level = "debug", skip_all, fields(current_cycle_index = self.current_cycle_index))]
    pub fn next_cycle(&mut self) -> Result<SessionState>
    {
        if self.session_state != SessionState::Running {
            bail!(
                "There is no optimization to step through, the session is {}",
                self.session_state
            );
        }

        if self.current_cycle_index + 1 < self.cycle_history.len() {
            self.current_cycle_index += 1;
            return Ok(self.session_state);
        }

        let Some(assignment_report) = &self.final_results else {
            bail!("A running session has no final results");
        };

        self.scheduling_environment.assignment = assignment_report.assignment.clone();
        self.session_state = SessionState::Completed;

        event!(
            Level::INFO,
            total_performance = assignment_report.total_performance,
            assignment = %self.scheduling_environment.assignment,
            "optimization completed"
        );
        Ok(self.session_state)
    }

    pub fn current_cycle(&self) -> Option<&CycleEvent>
    {
        match self.session_state {
            SessionState::Running => self.cycle_history.get(self.current_cycle_index),
            SessionState::Hiring | SessionState::Completed => None,
        }
    }

    pub fn current_cycle_index(&self) -> usize
    {
        self.current_cycle_index
    }

    pub fn cycle_history(&self) -> &[CycleEvent]
    {
        &self.cycle_history
    }

    pub fn final_results(&self) -> Option<&AssignmentReport>
    {
        self.final_results.as_ref()
    }

    pub fn session_state(&self) -> SessionState
    {
        self.session_state
    }

    pub fn scheduling_environment(&self) -> &SchedulingEnvironment
    {
        &self.scheduling_environment
    }

    pub fn system_configurations(&self) -> &SystemConfigurations
    {
        &self.system_configurations
    }

    fn ensure_not_running(&self, operation: &str) -> Result<()>
    {
        if self.session_state == SessionState::Running {
            event!(Level::WARN, operation, "rejected while cycles are being replayed");
            bail!("Cannot {} while an optimization is being stepped through", operation);
        }
        Ok(())
    }
}
