//! Hard constraint families. Each `apply_*` takes the compiler and pushes
//! linear (in)equalities; an accepted solution must satisfy all of them.

use good_lp::{constraint, Expression};

use crate::compiler::objective::WeekendOffVars;
use crate::compiler::{debugging, duty_bounds, weekend_bounds, RosterCompiler};

/// Every day gets exactly one doctor; a slack day may go unassigned
/// instead of sinking the whole model.
pub fn apply_coverage(c: &mut RosterCompiler) {
    let before = c.constraints.len();
    for i in 0..c.calendar.days.len() {
        let mut total = Expression::from(0);
        let mut any = false;
        for di in 0..c.doctors.len() {
            if let Some(var) = c.assign.get(&(i, di)) {
                total += *var;
                any = true;
            }
        }
        if !any {
            // Only reachable on a slack day (checked earlier); it simply
            // stays unassigned.
            continue;
        }
        if c.is_slack_day(i) {
            c.constraints.push(constraint!(total <= 1));
        } else {
            c.constraints.push(constraint!(total == 1));
        }
    }
    debugging::debug_print(
        c,
        "📐",
        &format!("coverage: {} constraints", c.constraints.len() - before),
    );
}

fn doctor_total(c: &RosterCompiler, di: usize) -> Option<Expression> {
    let mut total = Expression::from(0);
    let mut any = false;
    for i in 0..c.calendar.days.len() {
        if let Some(var) = c.assign.get(&(i, di)) {
            total += *var;
            any = true;
        }
    }
    any.then_some(total)
}

/// Per-doctor duty count inside `[floor(T/D), ceil(T/D)]`, the lower edge
/// clamped to what the doctor's availability can physically supply.
pub fn apply_duty_bands(c: &mut RosterCompiler) {
    let before = c.constraints.len();
    for di in 0..c.doctors.len() {
        let Some(total) = doctor_total(c, di) else {
            continue;
        };
        let (lo, hi) = duty_bounds(&c.doctors[di], &c.doctors, &c.calendar);
        c.constraints.push(constraint!(total.clone() >= lo as f64));
        c.constraints.push(constraint!(total <= hi as f64));
    }
    debugging::debug_print(
        c,
        "📐",
        &format!("duty bands: {} constraints", c.constraints.len() - before),
    );
}

/// Absolute safety ceiling on any doctor's monthly duty count,
/// independent of the fairness band.
pub fn apply_duty_cap(c: &mut RosterCompiler) {
    let cap = c.config.duty_cap as f64;
    let before = c.constraints.len();
    for di in 0..c.doctors.len() {
        let Some(total) = doctor_total(c, di) else {
            continue;
        };
        c.constraints.push(constraint!(total <= cap));
    }
    debugging::debug_print(
        c,
        "📐",
        &format!("duty cap: {} constraints", c.constraints.len() - before),
    );
}

/// No doctor works two date-adjacent days.
pub fn apply_no_consecutive(c: &mut RosterCompiler) {
    let days = c.calendar.days.len();
    let before = c.constraints.len();
    for i in 0..days.saturating_sub(1) {
        for di in 0..c.doctors.len() {
            let (Some(&today), Some(&tomorrow)) =
                (c.assign.get(&(i, di)), c.assign.get(&(i + 1, di)))
            else {
                continue;
            };
            c.constraints.push(constraint!(today + tomorrow <= 1));
        }
    }
    debugging::debug_print(
        c,
        "📐",
        &format!(
            "no consecutive duty: {} constraints",
            c.constraints.len() - before
        ),
    );
}

/// Weekend duty spread inside `[floor(W/D), ceil(W/D)]`.
pub fn apply_weekend_bands(c: &mut RosterCompiler) {
    let before = c.constraints.len();
    for di in 0..c.doctors.len() {
        let mut total = Expression::from(0);
        let mut any = false;
        for day in &c.calendar.days {
            if !day.is_weekend {
                continue;
            }
            if let Some(var) = c.assign.get(&(day.index, di)) {
                total += *var;
                any = true;
            }
        }
        if !any {
            continue;
        }
        let (lo, hi) = weekend_bounds(&c.doctors[di], &c.doctors, &c.calendar);
        c.constraints.push(constraint!(total.clone() >= lo as f64));
        c.constraints.push(constraint!(total <= hi as f64));
    }
    debugging::debug_print(
        c,
        "📐",
        &format!(
            "weekend bands: {} constraints",
            c.constraints.len() - before
        ),
    );
}

/// Every doctor keeps at least one full Friday..Sunday span free.
/// Days the doctor is unavailable already count as off, which the
/// indicator variables encode.
pub fn apply_rest_weekend(c: &mut RosterCompiler, offs: &WeekendOffVars) {
    let weekend_count = c.calendar.full_weekends.len();
    let before = c.constraints.len();
    for di in 0..c.doctors.len() {
        let mut free = Expression::from(0);
        let mut any = false;
        for wi in 0..weekend_count {
            if let Some(off) = offs.get(di, wi) {
                free += off;
                any = true;
            }
        }
        if any {
            c.constraints.push(constraint!(free >= 1));
        }
    }
    debugging::debug_print(
        c,
        "📐",
        &format!(
            "rest weekend: {} constraints",
            c.constraints.len() - before
        ),
    );
}
