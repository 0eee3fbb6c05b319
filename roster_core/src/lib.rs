//! Monthly on-call roster generation.
//!
//! Turns a doctor table and a fairness policy into a constraint model
//! (one boolean per doctor-day, hard fairness rules, a weighted soft
//! objective), hands the model to an exact search backend, and decodes
//! the solved values into a calendar-ordered roster with per-doctor
//! statistics.

pub mod calendar;
pub mod compiler;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod parse;
pub mod solve;
pub mod verify;

use crate::compiler::RosterCompiler;
use crate::domain::{DoctorRow, Roster, RosterConfig};
use crate::error::RosterError;
use crate::extractor::RosterExtractor;
use crate::parse::TokenWarning;
use crate::solve::SolveStatus;

/// A finished run: the decoded roster plus any skipped-token warnings.
#[derive(Debug)]
pub struct RosterRun {
    pub roster: Roster,
    pub warnings: Vec<TokenWarning>,
}

/// Full pipeline from parsed doctor rows to a decoded roster.
pub fn generate_from_rows(
    rows: &[DoctorRow],
    config: &RosterConfig,
) -> Result<RosterRun, RosterError> {
    if rows.is_empty() {
        return Err(RosterError::NoDoctors);
    }
    let month = calendar::build_month(config.year, config.month)?;
    let (doctors, warnings) = parse::resolve_unavailability(rows, &month);

    let model = RosterCompiler::new(month.clone(), doctors.clone(), config.clone())?.compile()?;
    let outcome = solve::solve(model, &config.solver)?;
    match outcome.status {
        SolveStatus::Infeasible => Err(RosterError::Infeasible),
        SolveStatus::Timeout => Err(RosterError::Solver(
            "search budget exhausted with no feasible roster".to_string(),
        )),
        SolveStatus::Optimal | SolveStatus::Feasible => {
            let roster = RosterExtractor::new(&month, &doctors).extract(&outcome);
            Ok(RosterRun { roster, warnings })
        }
    }
}

/// Same pipeline, starting from a raw header+rows table.
pub fn generate_roster(
    table: Vec<Vec<&str>>,
    config: &RosterConfig,
) -> Result<RosterRun, RosterError> {
    let rows = parse::parse_from_table(table)?;
    generate_from_rows(&rows, config)
}
