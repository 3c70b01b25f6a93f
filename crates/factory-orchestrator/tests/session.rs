use anyhow::Result;
use factory_configuration::SystemConfigurations;
use factory_contracts::CyclePhase;
use factory_orchestrator::Orchestrator;
use factory_orchestrator::SessionState;
use factory_scheduling_environment::station::Station;
use factory_scheduling_environment::worker_environment::worker_id::WorkerId;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn orchestrator_with_workers(number_of_workers: usize, seed: u64) -> Result<Orchestrator>
{
    let mut orchestrator =
        Orchestrator::new(SystemConfigurations::default(), StdRng::seed_from_u64(seed))?;
    for _ in 0..number_of_workers {
        orchestrator.hire_worker()?;
    }
    Ok(orchestrator)
}

fn run_to_completion(orchestrator: &mut Orchestrator) -> Result<()>
{
    orchestrator.start_optimization()?;
    while orchestrator.next_cycle()? == SessionState::Running {}
    Ok(())
}

fn cycle_labels(orchestrator: &Orchestrator) -> Vec<String>
{
    orchestrator
        .cycle_history()
        .iter()
        .map(|cycle_event| cycle_event.cycle.to_string())
        .collect()
}

fn station_lengths(orchestrator: &Orchestrator) -> Vec<usize>
{
    orchestrator
        .scheduling_environment()
        .assignment
        .stations()
        .map(|(_, worker_ids)| worker_ids.len())
        .collect()
}

#[test]
fn test_hired_workers_fill_the_stations_in_turn() -> Result<()>
{
    let orchestrator = orchestrator_with_workers(8, 1)?;

    let worker_ids: Vec<String> = orchestrator
        .scheduling_environment()
        .assignment
        .concatenated()
        .map(|worker_id| worker_id.to_string())
        .collect();

    assert_eq!(
        worker_ids,
        vec!["0001", "0007", "0002", "0008", "0003", "0004", "0005", "0006"]
    );
    assert_eq!(station_lengths(&orchestrator), vec![2, 2, 1, 1, 1, 1]);
    assert_eq!(orchestrator.session_state(), SessionState::Hiring);
    Ok(())
}

#[test]
fn test_base_cycle_of_six_workers_compares_at_one_hundred() -> Result<()>
{
    let mut orchestrator = orchestrator_with_workers(6, 3)?;
    assert_eq!(station_lengths(&orchestrator), vec![1; 6]);

    orchestrator.start_optimization()?;

    assert_eq!(orchestrator.session_state(), SessionState::Running);
    let base_event = orchestrator.current_cycle().unwrap();
    assert_eq!(base_event.phase(), CyclePhase::Base);
    assert_eq!(base_event.cycle.to_string(), "1");

    let performance_comparison = base_event.performance_comparison().unwrap();
    assert_eq!(performance_comparison.len(), 6);
    for comparison in performance_comparison.values() {
        assert_eq!(comparison.raw_percentage, Some(100.0));
        assert_eq!(comparison.adjusted_percentage, 100.0);
    }
    Ok(())
}

#[test]
fn test_full_run_learns_every_station_of_every_worker() -> Result<()>
{
    let mut orchestrator = orchestrator_with_workers(10, 7)?;

    run_to_completion(&mut orchestrator)?;

    assert_eq!(orchestrator.session_state(), SessionState::Completed);
    assert!(orchestrator.current_cycle().is_none());

    let station_count = orchestrator.scheduling_environment().station_count();
    for factory_worker in orchestrator
        .scheduling_environment()
        .worker_environment
        .factory_workers
        .values()
    {
        assert!(factory_worker.is_complete(station_count));
        assert_eq!(factory_worker.number_of_observations(), station_count);
        assert_eq!(factory_worker.data_completeness(station_count), 100.0);
    }

    let assignment_report = orchestrator.final_results().unwrap();
    assert_eq!(
        orchestrator.scheduling_environment().assignment,
        assignment_report.assignment
    );
    assert_eq!(station_lengths(&orchestrator), vec![2, 2, 2, 2, 1, 1]);

    let total_of_stations: f64 = assignment_report
        .station_details
        .values()
        .map(|station_detail| station_detail.total_performance)
        .sum();
    assert_eq!(assignment_report.total_performance, total_of_stations);
    assert_eq!(assignment_report.best_workers.len(), 3);
    assert_eq!(assignment_report.worst_workers.len(), 3);
    Ok(())
}

#[test]
fn test_cycle_history_is_stepped_through_in_order() -> Result<()>
{
    let mut orchestrator = orchestrator_with_workers(12, 5)?;
    orchestrator.start_optimization()?;

    let history_length = orchestrator.cycle_history().len();
    let mut phases = vec![orchestrator.current_cycle().unwrap().phase()];

    while orchestrator.next_cycle()? == SessionState::Running {
        assert_eq!(orchestrator.current_cycle_index(), phases.len());
        phases.push(orchestrator.current_cycle().unwrap().phase());
    }

    assert_eq!(phases.len(), history_length);
    assert_eq!(phases[0], CyclePhase::Base);
    assert!(phases.contains(&CyclePhase::Optimization));
    assert!(orchestrator.next_cycle().is_err());
    Ok(())
}

#[test]
fn test_start_without_workers_does_nothing() -> Result<()>
{
    let mut orchestrator = orchestrator_with_workers(0, 2)?;

    orchestrator.start_optimization()?;

    assert_eq!(orchestrator.session_state(), SessionState::Hiring);
    assert!(orchestrator.cycle_history().is_empty());
    assert!(orchestrator.final_results().is_none());
    assert!(orchestrator.next_cycle().is_err());
    Ok(())
}

#[test]
fn test_hire_and_fire_are_rejected_while_running() -> Result<()>
{
    let mut orchestrator = orchestrator_with_workers(3, 9)?;
    orchestrator.start_optimization()?;

    assert!(orchestrator.hire_worker().is_err());
    assert!(orchestrator.fire_worker(&WorkerId::new(1)).is_err());
    assert!(orchestrator.start_optimization().is_err());
    assert_eq!(orchestrator.scheduling_environment().number_of_workers(), 3);
    Ok(())
}

#[test]
fn test_firing_after_completion_clears_the_results() -> Result<()>
{
    let mut orchestrator = orchestrator_with_workers(7, 4)?;
    run_to_completion(&mut orchestrator)?;

    orchestrator.fire_worker(&WorkerId::new(3))?;

    assert_eq!(orchestrator.session_state(), SessionState::Completed);
    assert!(orchestrator.final_results().is_none());
    assert!(orchestrator.cycle_history().is_empty());
    assert_eq!(station_lengths(&orchestrator), vec![1; 6]);
    assert!(orchestrator.fire_worker(&WorkerId::new(3)).is_err());

    // The learned model survives, so the next run only needs its base cycle.
    orchestrator.start_optimization()?;
    assert_eq!(cycle_labels(&orchestrator), vec!["1", "Skip_Pos_1"]);
    Ok(())
}

#[test]
fn test_hiring_continues_the_id_sequence_after_a_fire() -> Result<()>
{
    let mut orchestrator = orchestrator_with_workers(2, 6)?;
    orchestrator.fire_worker(&WorkerId::new(2))?;

    let worker_id = orchestrator.hire_worker()?;

    assert_eq!(worker_id.to_string(), "0003");
    let station_2 = Station::new(2, 6)?;
    assert_eq!(
        orchestrator.scheduling_environment().assignment.workers(&station_2),
        &[worker_id]
    );
    Ok(())
}

#[test]
fn test_cycle_events_serialize_for_presentation() -> Result<()>
{
    let mut orchestrator = orchestrator_with_workers(6, 8)?;
    orchestrator.start_optimization()?;

    let serialized = serde_json::to_value(orchestrator.cycle_history())?;

    assert_eq!(
        serialized.as_array().map(|events| events.len()),
        Some(orchestrator.cycle_history().len())
    );
    assert_eq!(serialized[0]["cycle"]["Numbered"], 1);
    Ok(())
}
