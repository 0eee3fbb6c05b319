//! End-to-end runs against the real search backend.

use chrono::{Datelike, Weekday};

use roster_core::calendar::build_month;
use roster_core::domain::{Roster, RosterConfig};
use roster_core::error::RosterError;
use roster_core::generate_roster;
use roster_core::parse::{parse_from_table, resolve_unavailability};
use roster_core::verify::verify_roster;

fn no_consecutive(roster: &Roster) -> bool {
    roster.entries.windows(2).all(|pair| {
        match (&pair[0].doctor, &pair[1].doctor) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    })
}

fn spread(counts: &[u32]) -> u32 {
    counts.iter().max().unwrap_or(&0) - counts.iter().min().unwrap_or(&0)
}

fn check_rules(table: Vec<Vec<&str>>, roster: &Roster, config: &RosterConfig) {
    let cal = build_month(config.year, config.month).unwrap();
    let rows = parse_from_table(table).unwrap();
    let (doctors, _) = resolve_unavailability(&rows, &cal);
    let violations = verify_roster(roster, &cal, &doctors, config);
    assert!(violations.is_empty(), "rule violations: {violations:?}");
}

#[test]
fn three_doctors_thirty_days_split_evenly() {
    let table = vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", ""],
        vec!["Georgiou", ""],
        vec!["Dimitriou", ""],
    ];
    let mut config = RosterConfig::for_month(2026, 9);
    config.enforce_duty_cap = false;

    let run = generate_roster(table.clone(), &config).unwrap();
    assert!(run.warnings.is_empty());

    let duty_counts: Vec<u32> = run.roster.summaries.iter().map(|s| s.duty_count).collect();
    assert_eq!(duty_counts.iter().sum::<u32>(), 30);
    assert!(duty_counts.iter().all(|&c| c == 9 || c == 10));

    let weekend_counts: Vec<u32> = run
        .roster
        .summaries
        .iter()
        .map(|s| s.weekend_count)
        .collect();
    assert!(spread(&weekend_counts) <= 1);

    assert!(no_consecutive(&run.roster));
    assert!(run.roster.entries.iter().all(|e| e.doctor.is_some()));
    check_rules(table, &run.roster, &config);
}

#[test]
fn fully_blocked_doctor_gets_nothing() {
    let all_month: String = (1..=30)
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let table = vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", ""],
        vec!["Georgiou", ""],
        vec!["Dimitriou", ""],
        vec!["Nikolaou", ""],
        vec!["Papadaki", all_month.as_str()],
    ];
    let config = RosterConfig::for_month(2026, 9);

    let run = generate_roster(table.clone(), &config).unwrap();
    let blocked = run
        .roster
        .summaries
        .iter()
        .find(|s| s.name == "Papadaki")
        .unwrap();
    assert_eq!(blocked.duty_count, 0);
    assert!(blocked.dates.is_empty());

    // The other four cover everything except relaxed Wednesdays.
    for entry in &run.roster.entries {
        if entry.doctor.is_none() {
            assert_eq!(entry.date.weekday(), Weekday::Wed);
        }
    }
    check_rules(table, &run.roster, &config);
}

#[test]
fn fully_blocked_doctor_with_thin_staff_is_fatal() {
    let all_month: String = (1..=30)
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let table = vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", ""],
        vec!["Georgiou", ""],
        vec!["Dimitriou", ""],
        vec!["Papadaki", all_month.as_str()],
    ];
    let config = RosterConfig::for_month(2026, 9);

    // Three capped doctors supply 21 duties; 25 non-slack days need cover.
    let err = generate_roster(table, &config).unwrap_err();
    assert!(matches!(err, RosterError::InsufficientCapacity { .. }));
}

#[test]
fn slack_weekday_absorbs_short_capacity() {
    let table = vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", ""],
        vec!["Georgiou", ""],
        vec!["Dimitriou", ""],
        vec!["Nikolaou", ""],
    ];
    let config = RosterConfig::for_month(2026, 9);

    // 4 doctors x cap 7 = 28 < 30 days: two days must stay open, and only
    // Wednesdays may.
    let run = generate_roster(table.clone(), &config).unwrap();
    let unassigned: Vec<_> = run
        .roster
        .entries
        .iter()
        .filter(|e| e.doctor.is_none())
        .collect();
    assert_eq!(unassigned.len(), 2);
    assert!(unassigned
        .iter()
        .all(|e| e.date.weekday() == Weekday::Wed));
    assert!(run
        .roster
        .summaries
        .iter()
        .all(|s| s.duty_count == 7));
    check_rules(table, &run.roster, &config);
}

#[test]
fn rest_weekend_constraint_frees_a_full_span_each() {
    let table = vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", ""],
        vec!["Georgiou", ""],
        vec!["Dimitriou", ""],
    ];
    let mut config = RosterConfig::for_month(2026, 9);
    config.enforce_duty_cap = false;
    config.require_rest_weekend = true;
    // Terms toggle independently of the hard constraints.
    config.objective.penalize_alternation = false;
    config.objective.penalize_weekend_repeats = false;

    let run = generate_roster(table.clone(), &config).unwrap();
    assert!(run
        .roster
        .summaries
        .iter()
        .all(|s| s.full_weekends_off >= 1));
    check_rules(table, &run.roster, &config);
}

#[test]
fn day_nobody_can_take_reports_infeasible_without_searching() {
    let table = vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", "10"],
        vec!["Georgiou", "10"],
        vec!["Dimitriou", "10"],
    ];
    let mut config = RosterConfig::for_month(2026, 9);
    config.enforce_duty_cap = false;

    // September 10th 2026 is a Thursday, so the slack relaxation cannot
    // save it even if it were active.
    let err = generate_roster(table, &config).unwrap_err();
    assert!(matches!(err, RosterError::UncoverableDay(_)));
}

#[test]
fn identical_inputs_decode_identically() {
    let table = vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", "4,5,18"],
        vec!["Georgiou", ""],
        vec!["Dimitriou", "12,13"],
    ];
    let mut config = RosterConfig::for_month(2026, 9);
    config.enforce_duty_cap = false;

    let first = generate_roster(table.clone(), &config).unwrap();
    let second = generate_roster(table, &config).unwrap();
    assert_eq!(first.roster.entries, second.roster.entries);
    assert_eq!(first.roster.summaries, second.roster.summaries);
}

#[test]
fn warnings_surface_without_aborting() {
    let table = vec![
        vec!["Doctor", "Unavailability"],
        vec!["Andreou", "3,oops,99"],
        vec!["Georgiou", ""],
        vec!["Dimitriou", ""],
    ];
    let mut config = RosterConfig::for_month(2026, 9);
    config.enforce_duty_cap = false;

    let run = generate_roster(table, &config).unwrap();
    assert_eq!(run.warnings.len(), 2);
    assert!(run.roster.entries.iter().all(|e| e.doctor.is_some()));
}
