use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::solve::{SolveConfig, SolveStatus};

/// Sentinel printed for a slack day that ended up with no doctor.
pub const UNASSIGNED: &str = "UNASSIGNED";

/// One calendar day of the target month, flags precomputed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyDay {
    pub date: NaiveDate,
    /// 0-based position in the month; adjacency constraints rely on it.
    pub index: usize,
    pub is_weekend: bool,
    pub is_friday: bool,
}

/// Raw input row, one per doctor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRow {
    #[serde(rename = "Doctor")]
    pub name: String,
    /// Comma-separated day-of-month numbers, may be empty or absent.
    #[serde(rename = "Unavailability", default)]
    pub unavailability: Option<String>,
}

/// A doctor with resolved unavailable dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub name: String,
    pub unavailable: BTreeSet<NaiveDate>,
}

impl Doctor {
    pub fn new(name: impl Into<String>) -> Self {
        Doctor {
            name: name.into(),
            unavailable: BTreeSet::new(),
        }
    }

    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.unavailable.contains(&date)
    }
}

/// Policy weights for the soft objective terms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SoftWeights {
    /// Reward per fully-off Friday..Sunday span.
    pub full_weekend_off: f64,
    /// Penalty per work-rest-work pattern (duty on day i and i+2).
    pub alternation: f64,
    /// Penalty per duty above/below the ideal per-block count.
    pub block_deviation: f64,
    /// Penalty per unit a doctor's weekends-off count strays from the average.
    pub weekend_off_balance: f64,
    /// Penalty per Saturday (or Sunday) duty beyond the first.
    pub weekend_repeat: f64,
}

impl Default for SoftWeights {
    fn default() -> Self {
        SoftWeights {
            full_weekend_off: 10.0,
            alternation: 3.0,
            block_deviation: 2.0,
            weekend_off_balance: 6.0,
            weekend_repeat: 4.0,
        }
    }
}

/// Which soft terms participate in the objective. Each flag is independent
/// of the others and of the hard-constraint toggles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObjectivePolicy {
    pub reward_full_weekends_off: bool,
    pub penalize_alternation: bool,
    pub penalize_block_deviation: bool,
    pub balance_full_weekends_off: bool,
    pub penalize_weekend_repeats: bool,
    pub weights: SoftWeights,
}

impl Default for ObjectivePolicy {
    fn default() -> Self {
        ObjectivePolicy {
            reward_full_weekends_off: true,
            penalize_alternation: true,
            penalize_block_deviation: true,
            balance_full_weekends_off: true,
            penalize_weekend_repeats: true,
            weights: SoftWeights::default(),
        }
    }
}

/// Full configuration surface for one roster run.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub year: i32,
    pub month: u32,
    /// Absolute per-doctor duty ceiling.
    pub duty_cap: u32,
    /// The cap is a toggleable hard constraint (off lets the fairness band
    /// alone govern duty counts).
    pub enforce_duty_cap: bool,
    /// When on, every doctor must keep at least one Friday..Sunday span free.
    pub require_rest_weekend: bool,
    /// Number of nearly-equal blocks for the block-deviation term.
    pub blocks: usize,
    /// Weekday allowed to go unassigned when capacity cannot cover the month.
    pub slack_weekday: Weekday,
    pub objective: ObjectivePolicy,
    pub solver: SolveConfig,
}

impl RosterConfig {
    pub fn for_month(year: i32, month: u32) -> Self {
        RosterConfig {
            year,
            month,
            duty_cap: 7,
            enforce_duty_cap: true,
            require_rest_weekend: false,
            blocks: 4,
            slack_weekday: Weekday::Wed,
            objective: ObjectivePolicy::default(),
            solver: SolveConfig::default(),
        }
    }
}

/// One decoded roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub date: NaiveDate,
    /// `None` is the UNASSIGNED sentinel, only possible on a slack day.
    pub doctor: Option<String>,
}

/// Per-doctor statistics recomputed from the decoded roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorSummary {
    pub name: String,
    pub duty_count: u32,
    pub weekend_count: u32,
    pub full_weekends_off: u32,
    pub dates: Vec<NaiveDate>,
}

/// The decoded schedule for the month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
    pub summaries: Vec<DoctorSummary>,
    pub status: SolveStatus,
    pub objective_value: f64,
}
