mod cli;

use colored::*;
use roster_core::domain::UNASSIGNED;
use roster_core::error::RosterError;
use roster_core::generate_roster;
use roster_core::solve::SolveStatus;

fn main() {
    // 1) Gather config from CLI (target month, policy toggles, solver knobs)
    let config = cli::parse_config_from_args();
    println!(
        "Target month: {}-{:02}  (cap {}, slack day {:?}, budget {}s, {} workers)",
        config.year,
        config.month,
        if config.enforce_duty_cap {
            config.duty_cap.to_string()
        } else {
            "off".to_string()
        },
        config.slack_weekday,
        config.solver.time_limit_secs,
        config.solver.num_workers,
    );

    // Doctor table; in production these rows come from the roster sheet.
    let table_data = vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", "4,5,18"],
        vec!["Georgiou", ""],
        vec!["Dimitriou", "12,13,14,15"],
        vec!["Nikolaou", "27"],
        vec!["Papadaki", "1,2,3"],
    ];

    // 2) Build the model, search, decode
    let run = match generate_roster(table_data, &config) {
        Ok(run) => run,
        Err(err) => {
            match &err {
                RosterError::Infeasible | RosterError::UncoverableDay(_) => {
                    eprintln!("{} {}", "No feasible schedule:".red().bold(), err);
                }
                RosterError::InsufficientCapacity { .. } => {
                    eprintln!("{} {}", "Not enough doctor capacity:".red().bold(), err);
                }
                _ => eprintln!("{} {}", "Roster generation failed:".red().bold(), err),
            }
            std::process::exit(1);
        }
    };

    // 3) Recoverable input problems
    for warning in &run.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }

    if run.roster.status == SolveStatus::Feasible {
        println!(
            "{}",
            "Note: roster is valid but optimality was not proven within the time budget."
                .yellow()
        );
    }

    // 4) The roster itself, one row per day
    println!("--- Duty roster {}-{:02} ---", config.year, config.month);
    for entry in &run.roster.entries {
        let date = entry.date.format("%Y-%m-%d %a").to_string();
        match &entry.doctor {
            Some(name) => println!("  {date}  {name}"),
            None => println!("  {date}  {}", UNASSIGNED.yellow()),
        }
    }

    // 5) Per-doctor diagnostics
    println!("--- Doctor summary ---");
    for summary in &run.roster.summaries {
        let dates: Vec<String> = summary
            .dates
            .iter()
            .map(|d| d.format("%d").to_string())
            .collect();
        println!(
            "  {}: {} duties, {} weekend, {} full weekends off  [{}]",
            summary.name.cyan(),
            summary.duty_count,
            summary.weekend_count,
            summary.full_weekends_off,
            dates.join(",")
        );
    }
    println!(
        "Objective: {:.1} ({:?})",
        run.roster.objective_value, run.roster.status
    );
}
