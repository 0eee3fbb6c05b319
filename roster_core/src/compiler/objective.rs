//! Soft preference terms. Everything here lands in one weighted maximize
//! expression; every term can be toggled on its own.
//!
//! Indicator and deviation variables are bounded from both directions by
//! pairs of linear inequalities, so their solved values are exact and the
//! decoder never has to trust model-side bookkeeping.

use std::collections::HashMap;

use good_lp::{constraint, variable, Expression, Variable};

use crate::compiler::{active_doctor_count, debugging, RosterCompiler};

/// Binary "this doctor has the whole Friday..Sunday span off" indicators,
/// keyed by (doctor index, full-weekend index). Shared between the
/// rest-weekend hard constraint and two soft terms.
#[derive(Debug, Default)]
pub struct WeekendOffVars {
    vars: HashMap<(usize, usize), Variable>,
}

impl WeekendOffVars {
    pub fn get(&self, doctor: usize, weekend: usize) -> Option<Variable> {
        self.vars.get(&(doctor, weekend)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Allocates one indicator per (available doctor, full weekend).
///
/// `off = 1` exactly when the doctor has zero assignments across the
/// triplet: `off + x <= 1` for each assignment variable in the span
/// forces it down, `off + sum(x) >= 1` forces it up. A day with no
/// variable (doctor unavailable) contributes nothing, so it counts as off.
pub fn add_full_weekend_indicators(c: &mut RosterCompiler) -> WeekendOffVars {
    let mut out = WeekendOffVars::default();
    let weekends = c.calendar.full_weekends.clone();
    for di in 0..c.doctors.len() {
        let has_vars = (0..c.calendar.days.len()).any(|i| c.assign.contains_key(&(i, di)));
        if !has_vars {
            continue;
        }
        for (wi, triplet) in weekends.iter().enumerate() {
            let off = c.vars.add(variable().binary());
            let mut assigned = Expression::from(0);
            for &idx in triplet {
                if let Some(&x) = c.assign.get(&(idx, di)) {
                    c.constraints.push(constraint!(off + x <= 1));
                    assigned += x;
                }
            }
            c.constraints.push(constraint!(off + assigned >= 1));
            out.vars.insert((di, wi), off);
        }
    }
    debugging::debug_print(
        c,
        "🎯",
        &format!("{} full-weekend-off indicators", out.vars.len()),
    );
    out
}

/// Positive reward for every fully-off weekend span.
fn add_weekend_off_reward(c: &mut RosterCompiler, offs: &WeekendOffVars) {
    let weight = c.config.objective.weights.full_weekend_off;
    for di in 0..c.doctors.len() {
        for wi in 0..c.calendar.full_weekends.len() {
            if let Some(off) = offs.get(di, wi) {
                c.objective += weight * off;
            }
        }
    }
}

/// Penalizes duty on both day i and day i+2: a work-rest-work oscillation
/// looks fair by count but is exhausting in practice.
fn add_alternation_penalty(c: &mut RosterCompiler) {
    let weight = c.config.objective.weights.alternation;
    let days = c.calendar.days.len();
    let mut added = 0usize;
    for di in 0..c.doctors.len() {
        for i in 0..days.saturating_sub(2) {
            let (Some(&first), Some(&second)) =
                (c.assign.get(&(i, di)), c.assign.get(&(i + 2, di)))
            else {
                continue;
            };
            let both = c.vars.add(variable().binary());
            // both = first AND second, bounded from both sides.
            c.constraints.push(constraint!(first + second - both <= 1));
            c.constraints.push(constraint!(both <= first));
            c.constraints.push(constraint!(both <= second));
            c.objective += (-weight) * both;
            added += 1;
        }
    }
    debugging::debug_print(c, "🎯", &format!("{added} alternation indicators"));
}

/// Smooths duty across the month: the days are split into nearly equal
/// blocks and each doctor's per-block count is penalized for leaving
/// `[floor(ideal), ceil(ideal)]`, ideal = (T/D)/blocks.
fn add_block_deviation_penalty(c: &mut RosterCompiler) {
    let weight = c.config.objective.weights.block_deviation;
    let t = c.calendar.days.len();
    let d = active_doctor_count(&c.doctors, &c.calendar);
    if d == 0 {
        return;
    }
    let blocks = c.config.blocks.max(1);
    let ideal = (t as f64 / d as f64) / blocks as f64;
    let lo = ideal.floor();
    let hi = ideal.ceil();

    let base = t / blocks;
    let extra = t % blocks;
    let mut start = 0usize;
    for bi in 0..blocks {
        let len = base + usize::from(bi < extra);
        if len == 0 {
            continue;
        }
        let end = start + len;
        for di in 0..c.doctors.len() {
            let mut count = Expression::from(0);
            let mut any = false;
            for i in start..end {
                if let Some(var) = c.assign.get(&(i, di)) {
                    count += *var;
                    any = true;
                }
            }
            if !any {
                continue;
            }
            let over = c.vars.add(variable().min(0.0));
            let under = c.vars.add(variable().min(0.0));
            c.constraints.push(constraint!(count.clone() - hi <= over));
            c.constraints.push(constraint!(lo - count <= under));
            c.objective += (-weight) * over;
            c.objective += (-weight) * under;
        }
        start = end;
    }
}

/// Keeps rest weekends shared: each doctor's full-weekends-off count is
/// pulled toward the average over all rostered doctors.
fn add_weekend_off_balance(c: &mut RosterCompiler, offs: &WeekendOffVars) {
    let weight = c.config.objective.weights.weekend_off_balance;
    let weekend_count = c.calendar.full_weekends.len();
    if weekend_count == 0 || offs.is_empty() {
        return;
    }

    let mut participants = Vec::new();
    let mut total = Expression::from(0);
    for di in 0..c.doctors.len() {
        let mut count = Expression::from(0);
        let mut any = false;
        for wi in 0..weekend_count {
            if let Some(off) = offs.get(di, wi) {
                count += off;
                total += off;
                any = true;
            }
        }
        if any {
            participants.push((di, count));
        }
    }
    if participants.len() < 2 {
        return;
    }

    let share = 1.0 / participants.len() as f64;
    for (_, count) in participants {
        let average = share * total.clone();
        let deviation = c.vars.add(variable().min(0.0));
        c.constraints
            .push(constraint!(count.clone() - average.clone() <= deviation));
        c.constraints.push(constraint!(average - count <= deviation));
        c.objective += (-weight) * deviation;
    }
}

/// Discourages loading one doctor's weekend duty onto the same weekday:
/// every Saturday beyond the first costs, likewise Sunday.
fn add_weekend_repeat_penalty(c: &mut RosterCompiler) {
    use chrono::{Datelike, Weekday};

    let weight = c.config.objective.weights.weekend_repeat;
    for target in [Weekday::Sat, Weekday::Sun] {
        for di in 0..c.doctors.len() {
            let mut count = Expression::from(0);
            let mut vars = 0usize;
            for day in &c.calendar.days {
                if day.date.weekday() != target {
                    continue;
                }
                if let Some(var) = c.assign.get(&(day.index, di)) {
                    count += *var;
                    vars += 1;
                }
            }
            if vars < 2 {
                continue;
            }
            let excess = c.vars.add(variable().min(0.0));
            c.constraints.push(constraint!(count - 1.0 <= excess));
            c.objective += (-weight) * excess;
        }
    }
}

/// Sums every enabled term, with its policy weight, into the one
/// maximize expression.
pub fn compose(c: &mut RosterCompiler, offs: &WeekendOffVars) {
    let policy = c.config.objective;
    if policy.reward_full_weekends_off {
        add_weekend_off_reward(c, offs);
    }
    if policy.penalize_alternation {
        add_alternation_penalty(c);
    }
    if policy.penalize_block_deviation {
        add_block_deviation_penalty(c);
    }
    if policy.balance_full_weekends_off {
        add_weekend_off_balance(c, offs);
    }
    if policy.penalize_weekend_repeats {
        add_weekend_repeat_penalty(c);
    }
}
