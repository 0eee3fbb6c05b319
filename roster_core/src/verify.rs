//! Post-hoc duty-rule checks over a decoded roster.
//!
//! Everything is recomputed from the roster entries; a clean result means
//! the printed schedule itself honors the rules, not merely that the
//! model claimed so.

use chrono::Datelike;

use crate::calendar::MonthCalendar;
use crate::compiler::{duty_bounds, slack_active, weekend_bounds};
use crate::domain::{Doctor, Roster, RosterConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Coverage,
    ConsecutiveDuty,
    DutyBalance,
    DutyCap,
    WeekendBalance,
    RestWeekend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub rule: RuleKind,
    pub message: String,
}

impl RuleViolation {
    fn new(rule: RuleKind, message: impl Into<String>) -> Self {
        RuleViolation {
            rule,
            message: message.into(),
        }
    }
}

/// Checks every duty rule and returns all violations found.
pub fn verify_roster(
    roster: &Roster,
    calendar: &MonthCalendar,
    doctors: &[Doctor],
    config: &RosterConfig,
) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    if roster.entries.len() != calendar.len() {
        violations.push(RuleViolation::new(
            RuleKind::Coverage,
            format!(
                "roster has {} entries for a {}-day month",
                roster.entries.len(),
                calendar.len()
            ),
        ));
        return violations;
    }

    let relaxed = slack_active(doctors, calendar, config);
    for (day, entry) in calendar.days.iter().zip(&roster.entries) {
        if entry.doctor.is_none() {
            let is_slack = relaxed && day.date.weekday() == config.slack_weekday;
            if !is_slack {
                violations.push(RuleViolation::new(
                    RuleKind::Coverage,
                    format!("{} has no doctor and is not a slack day", day.date),
                ));
            }
        }
    }

    for pair in roster.entries.windows(2) {
        if let (Some(a), Some(b)) = (&pair[0].doctor, &pair[1].doctor) {
            if a == b {
                violations.push(RuleViolation::new(
                    RuleKind::ConsecutiveDuty,
                    format!("{} works {} and {}", a, pair[0].date, pair[1].date),
                ));
            }
        }
    }

    for doctor in doctors {
        let duties: Vec<usize> = roster
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.doctor.as_deref() == Some(doctor.name.as_str()))
            .map(|(i, _)| i)
            .collect();
        let count = duties.len() as u32;

        let (lo, hi) = duty_bounds(doctor, doctors, calendar);
        if count < lo || count > hi {
            violations.push(RuleViolation::new(
                RuleKind::DutyBalance,
                format!("{} has {count} duties outside [{lo}, {hi}]", doctor.name),
            ));
        }

        if config.enforce_duty_cap && count > config.duty_cap {
            violations.push(RuleViolation::new(
                RuleKind::DutyCap,
                format!(
                    "{} has {count} duties above the cap of {}",
                    doctor.name, config.duty_cap
                ),
            ));
        }

        let weekend_count = duties
            .iter()
            .filter(|&&i| calendar.days[i].is_weekend)
            .count() as u32;
        let (wlo, whi) = weekend_bounds(doctor, doctors, calendar);
        if weekend_count < wlo || weekend_count > whi {
            violations.push(RuleViolation::new(
                RuleKind::WeekendBalance,
                format!(
                    "{} has {weekend_count} weekend duties outside [{wlo}, {whi}]",
                    doctor.name
                ),
            ));
        }

        if config.require_rest_weekend && !calendar.full_weekends.is_empty() {
            let has_free_weekend = calendar
                .full_weekends
                .iter()
                .any(|triplet| triplet.iter().all(|idx| !duties.contains(idx)));
            if !has_free_weekend {
                violations.push(RuleViolation::new(
                    RuleKind::RestWeekend,
                    format!("{} has no free Friday..Sunday span", doctor.name),
                ));
            }
        }
    }

    violations
}
