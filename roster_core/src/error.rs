use std::fmt;

use chrono::NaiveDate;

/// Everything that can sink a roster run.
///
/// Malformed unavailability tokens are deliberately absent: those are
/// recoverable and surface as [`crate::parse::TokenWarning`]s instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// No doctors in the input at all.
    NoDoctors,
    /// The year/month pair does not name a real month.
    InvalidMonth { year: i32, month: u32 },
    /// Two input rows share a doctor name.
    DuplicateDoctor(String),
    /// The input table is structurally broken (missing columns, empty name).
    BadTable(String),
    /// Every doctor is unavailable on a day that is not allowed to go
    /// unassigned; the model is infeasible before any search runs.
    UncoverableDay(NaiveDate),
    /// Doctor-day supply cannot cover the month even with the slack-day
    /// relaxation.
    InsufficientCapacity { supply: u32, demand: u32 },
    /// The search engine proved no assignment satisfies the hard constraints.
    Infeasible,
    /// The search engine failed for another reason (budget exhausted with
    /// nothing feasible, backend error).
    Solver(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::NoDoctors => write!(f, "no doctors in the input"),
            RosterError::InvalidMonth { year, month } => {
                write!(f, "{year}-{month:02} is not a valid month")
            }
            RosterError::DuplicateDoctor(name) => {
                write!(f, "duplicate doctor name: {name}")
            }
            RosterError::BadTable(reason) => write!(f, "bad input table: {reason}"),
            RosterError::UncoverableDay(date) => {
                write!(f, "no doctor is available on {date}")
            }
            RosterError::InsufficientCapacity { supply, demand } => write!(
                f,
                "doctor-day supply {supply} cannot cover {demand} days even with the slack day relaxed"
            ),
            RosterError::Infeasible => write!(f, "no feasible schedule exists"),
            RosterError::Solver(reason) => write!(f, "solver failure: {reason}"),
        }
    }
}

impl std::error::Error for RosterError {}
