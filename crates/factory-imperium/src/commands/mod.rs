use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Subcommand;
use factory_configuration::SystemConfigurations;
use factory_orchestrator::Orchestrator;
use factory_orchestrator::SessionState;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::Level;
use tracing::event;

use crate::printing;

#[derive(Subcommand, Debug)]
pub enum Commands
{
    /// Hire workers, learn their performance and print the final assignment
    Run {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Same session as `run`, printing every cycle of the data collection
    Cycles {
        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(Args, Debug)]
pub struct SessionArgs
{
    /// Number of workers to hire
    #[arg(long, short = 'w')]
    workers: usize,
    /// Seed of the generator, a random session when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Workers to fire after the first run, the session is then optimized again
    #[arg(long = "fire", value_name = "WORKER_ID")]
    fire: Vec<WorkerId>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn handle_command(command: Commands, system_configurations: SystemConfigurations) -> Result<()>
{
    match command {
        Commands::Run { session } => {
            let mut orchestrator = hire_workers(&session, system_configurations)?;

            run_session(&mut orchestrator, &session, |_| Ok(()))?;
            print_final_results(&orchestrator, session.json)
        }
        Commands::Cycles { session } => {
            let mut orchestrator = hire_workers(&session, system_configurations)?;

            let json = session.json;
            run_session(&mut orchestrator, &session, |orchestrator| {
                print_cycles(orchestrator, json)
            })?;
            print_final_results(&orchestrator, session.json)
        }
    }
}

fn hire_workers(
    session: &SessionArgs,
    system_configurations: SystemConfigurations,
) -> Result<Orchestrator>
{
    let rng = match session.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut orchestrator = Orchestrator::new(system_configurations, rng)?;
    for _ in 0..session.workers {
        orchestrator.hire_worker()?;
    }
    Ok(orchestrator)
}

/// Optimizes once, then again after each requested fire. `on_started` sees
/// the orchestrator right after the collection has recorded its cycles.
fn run_session<F>(orchestrator: &mut Orchestrator, session: &SessionArgs, mut on_started: F) -> Result<()>
where
    F: FnMut(&Orchestrator) -> Result<()>,
{
    optimize(orchestrator, &mut on_started)?;

    for worker_id in &session.fire {
        orchestrator
            .fire_worker(worker_id)
            .with_context(|| format!("Could not fire worker {} from the session", worker_id))?;
        optimize(orchestrator, &mut on_started)?;
    }
    Ok(())
}

fn optimize<F>(orchestrator: &mut Orchestrator, on_started: &mut F) -> Result<()>
where
    F: FnMut(&Orchestrator) -> Result<()>,
{
    orchestrator.start_optimization()?;
    if orchestrator.session_state() != SessionState::Running {
        event!(Level::WARN, "nothing was optimized");
        return Ok(());
    }

    on_started(orchestrator)?;
    while orchestrator.next_cycle()? == SessionState::Running {}
    Ok(())
}

fn print_cycles(orchestrator: &Orchestrator, json: bool) -> Result<()>
{
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(orchestrator.cycle_history())
                .context("Could not serialize the cycle history")?
        );
    } else {
        for cycle_event in orchestrator.cycle_history() {
            printing::print_cycle_event(cycle_event);
        }
    }
    Ok(())
}

fn print_final_results(orchestrator: &Orchestrator, json: bool) -> Result<()>
{
    let Some(assignment_report) = orchestrator.final_results() else {
        println!("No workers were hired, nothing to assign");
        return Ok(());
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(assignment_report)
                .context("Could not serialize the final results")?
        );
    } else {
        printing::print_assignment_report(assignment_report);
    }
    Ok(())
}
