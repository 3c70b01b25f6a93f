use colored::Colorize;
use factory_contracts::AssignmentReport;
use factory_contracts::CycleDetails;
use factory_contracts::CycleEvent;
use factory_contracts::WorkerEfficiency;

pub fn print_cycle_event(cycle_event: &CycleEvent)
{
    println!(
        "{} {} ({})",
        "Cycle".bold(),
        cycle_event.cycle.to_string().bold().cyan(),
        cycle_event.phase()
    );
    print!("{}", cycle_event.assignment);

    match &cycle_event.details {
        CycleDetails::Skip { message, .. } => println!("  {}", message.yellow()),
        CycleDetails::Optimization {
            optimization_details,
            ..
        } => {
            for (station, optimization_detail) in optimization_details {
                println!(
                    "  {} {} -> {} score {:.2}",
                    station,
                    optimization_detail.old_worker,
                    optimization_detail.new_worker.to_string().green(),
                    optimization_detail.score
                );
            }
        }
        CycleDetails::Base { .. }
        | CycleDetails::Rotation { .. }
        | CycleDetails::IncompleteFix { .. } => {
            for (station, performance_comparison) in
                cycle_event.performance_comparison().into_iter().flatten()
            {
                let raw_percentage = match performance_comparison.raw_percentage {
                    Some(raw_percentage) => format!("{:>8.2}%", raw_percentage),
                    None => format!("{:>9}", "-"),
                };
                println!(
                    "  {} {} raw {} adjusted {:>8.2}%",
                    station,
                    performance_comparison.worker_id,
                    raw_percentage,
                    performance_comparison.adjusted_percentage
                );
            }
        }
    }
    println!();
}

pub fn print_assignment_report(assignment_report: &AssignmentReport)
{
    println!("{}", "Final assignment".bold().underline());
    for (station, station_detail) in &assignment_report.station_details {
        let worker_ids: Vec<String> = station_detail
            .workers
            .iter()
            .map(|worker_id| worker_id.to_string())
            .collect();
        println!(
            "{:>4}: [{}] total {:.2}",
            station.to_string().bold(),
            worker_ids.join(", "),
            station_detail.total_performance
        );
    }

    println!(
        "{} {:.2}, {} {:.2}",
        "total performance".bold(),
        assignment_report.total_performance,
        "average".bold(),
        assignment_report.average_performance
    );

    println!("{}", "Best workers".green().bold());
    print_leaderboard(&assignment_report.best_workers);
    println!("{}", "Worst workers".red().bold());
    print_leaderboard(&assignment_report.worst_workers);
}

fn print_leaderboard(worker_efficiencies: &[WorkerEfficiency])
{
    for worker_efficiency in worker_efficiencies {
        println!(
            "  {} at {} {:.2}%",
            worker_efficiency.worker_id,
            worker_efficiency.station,
            worker_efficiency.efficiency
        );
    }
}
