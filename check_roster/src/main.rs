use roster_core::calendar::build_month;
use roster_core::domain::RosterConfig;
use roster_core::generate_roster;
use roster_core::parse::{parse_from_table, resolve_unavailability};
use roster_core::verify::{verify_roster, RuleKind};

fn demo_table() -> Vec<Vec<&'static str>> {
    vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", "4,5,18"],
        vec!["Georgiou", ""],
        vec!["Dimitriou", "12,13,14,15"],
        vec!["Nikolaou", "27"],
        vec!["Papadaki", "1,2,3"],
    ]
}

fn main() {
    println!("🔍 Generating a roster and checking every duty rule...");

    let config = RosterConfig::for_month(2026, 9);

    let run = match generate_roster(demo_table(), &config) {
        Ok(run) => run,
        Err(err) => {
            println!("❌ No roster to check: {err}");
            std::process::exit(1);
        }
    };

    let calendar = match build_month(config.year, config.month) {
        Ok(calendar) => calendar,
        Err(err) => {
            println!("❌ {err}");
            std::process::exit(1);
        }
    };
    let rows = match parse_from_table(demo_table()) {
        Ok(rows) => rows,
        Err(err) => {
            println!("❌ {err}");
            std::process::exit(1);
        }
    };
    let (doctors, _) = resolve_unavailability(&rows, &calendar);

    let violations = verify_roster(&run.roster, &calendar, &doctors, &config);

    println!("\n📊 Rule check results:");
    let rules = [
        (RuleKind::Coverage, "every non-slack day has one doctor"),
        (RuleKind::ConsecutiveDuty, "no doctor works adjacent days"),
        (RuleKind::DutyBalance, "duty counts stay in the fairness band"),
        (RuleKind::DutyCap, "no doctor exceeds the duty cap"),
        (RuleKind::WeekendBalance, "weekend duties stay balanced"),
        (RuleKind::RestWeekend, "each doctor keeps a weekend free"),
    ];
    for (rule, label) in rules {
        let hits: Vec<_> = violations.iter().filter(|v| v.rule == rule).collect();
        if hits.is_empty() {
            println!("✅ {label}");
        } else {
            println!("❌ {label}");
            for violation in hits {
                println!("   {}", violation.message);
            }
        }
    }

    if violations.is_empty() {
        println!("\n✅ Roster honors all duty rules.");
    } else {
        println!("\n❌ {} rule violation(s) found.", violations.len());
        std::process::exit(1);
    }
}
