//! The search-engine boundary. Model construction never reaches past
//! this module; the engine sees the finished variable set, constraint
//! list and objective, and hands back solved 0/1 values.

use std::collections::HashMap;
use std::time::Instant;

use good_lp::{default_solver, ResolutionError, Solution, SolverModel};
use serde::{Deserialize, Serialize};

use crate::compiler::RosterModel;
use crate::error::RosterError;

/// What the engine reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven best assignment.
    Optimal,
    /// Valid assignment, optimality not proven inside the time budget.
    Feasible,
    /// No assignment satisfies the hard constraints.
    Infeasible,
    /// Budget expired with nothing feasible found.
    Timeout,
}

/// Engine knobs. The backend here (microlp through good_lp) is exact,
/// deterministic and single-threaded: it cannot be interrupted mid-run,
/// so the budget classifies the result afterwards rather than truncating
/// the search, and worker counts above one are accepted but unused.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolveConfig {
    pub time_limit_secs: u64,
    pub num_workers: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            time_limit_secs: 120,
            num_workers: 1,
        }
    }
}

/// Solved values, keyed like the model's assignment map.
#[derive(Debug)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub assignment: HashMap<(usize, usize), bool>,
    pub objective_value: f64,
    pub solve_time_ms: u128,
}

impl SolveOutcome {
    fn empty(status: SolveStatus, solve_time_ms: u128) -> Self {
        SolveOutcome {
            status,
            assignment: HashMap::new(),
            objective_value: 0.0,
            solve_time_ms,
        }
    }

    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Runs the search over a frozen model.
pub fn solve(model: RosterModel, config: &SolveConfig) -> Result<SolveOutcome, RosterError> {
    let RosterModel {
        vars,
        assign,
        constraints,
        objective,
        ..
    } = model;

    let objective_copy = objective.clone();
    let start = Instant::now();

    let mut problem = vars.maximise(objective).using(default_solver);
    for constraint in constraints {
        problem = problem.with(constraint);
    }

    match problem.solve() {
        Ok(solution) => {
            let elapsed = start.elapsed();
            let assignment = assign
                .iter()
                .map(|(key, var)| (*key, solution.value(*var) > 0.5))
                .collect();
            let status = if elapsed.as_secs() <= config.time_limit_secs {
                SolveStatus::Optimal
            } else {
                // The run finished past its budget; report the roster as
                // usable but unproven so callers can flag it.
                SolveStatus::Feasible
            };
            Ok(SolveOutcome {
                status,
                assignment,
                objective_value: solution.eval(&objective_copy),
                solve_time_ms: elapsed.as_millis(),
            })
        }
        Err(ResolutionError::Infeasible) => Ok(SolveOutcome::empty(
            SolveStatus::Infeasible,
            start.elapsed().as_millis(),
        )),
        Err(other) => Err(RosterError::Solver(other.to_string())),
    }
}
