pub mod constraints;
pub mod debugging;
pub mod objective;

use std::collections::HashMap;
use std::env;

use good_lp::{variable, variables, Constraint, Expression, ProblemVariables, Variable};

use crate::calendar::MonthCalendar;
use crate::domain::{Doctor, RosterConfig};
use crate::error::RosterError;

/// Maximum duties a doctor's availability can possibly yield under the
/// no-consecutive-duty rule (the contiguous worst case).
pub fn available_day_count(doctor: &Doctor, calendar: &MonthCalendar) -> u32 {
    calendar
        .days
        .iter()
        .filter(|day| doctor.is_available(day.date))
        .count() as u32
}

pub fn available_weekend_count(doctor: &Doctor, calendar: &MonthCalendar) -> u32 {
    calendar
        .days
        .iter()
        .filter(|day| day.is_weekend && doctor.is_available(day.date))
        .count() as u32
}

/// How many duties this doctor can supply at most.
pub fn doctor_supply(doctor: &Doctor, calendar: &MonthCalendar, config: &RosterConfig) -> u32 {
    let available = available_day_count(doctor, calendar);
    let spaced = (available + 1) / 2;
    if config.enforce_duty_cap {
        spaced.min(config.duty_cap)
    } else {
        spaced
    }
}

pub fn total_supply(doctors: &[Doctor], calendar: &MonthCalendar, config: &RosterConfig) -> u32 {
    doctors
        .iter()
        .map(|d| doctor_supply(d, calendar, config))
        .sum()
}

/// Whether the at-most-1 relaxation on the slack weekday is in force.
pub fn slack_active(doctors: &[Doctor], calendar: &MonthCalendar, config: &RosterConfig) -> bool {
    total_supply(doctors, calendar, config) < calendar.len() as u32
}

/// Doctors with at least one available day; fairness bands are computed
/// over these, so a doctor blocked for the whole month never drags the
/// bands into infeasibility.
pub fn active_doctor_count(doctors: &[Doctor], calendar: &MonthCalendar) -> u32 {
    doctors
        .iter()
        .filter(|d| available_day_count(d, calendar) > 0)
        .count() as u32
}

/// Duty-count fairness band for one doctor: `[lo, hi]` with
/// `lo = min(floor(T/D), supply ceiling)` and `hi = ceil(T/D)`.
pub fn duty_bounds(doctor: &Doctor, doctors: &[Doctor], calendar: &MonthCalendar) -> (u32, u32) {
    let t = calendar.len() as u32;
    let d = active_doctor_count(doctors, calendar);
    if d == 0 {
        return (0, 0);
    }
    let available = available_day_count(doctor, calendar);
    let lo = (t / d).min((available + 1) / 2);
    let hi = (t + d - 1) / d;
    (lo, hi)
}

/// Weekend fairness band, same shape as [`duty_bounds`] over weekend days.
pub fn weekend_bounds(
    doctor: &Doctor,
    doctors: &[Doctor],
    calendar: &MonthCalendar,
) -> (u32, u32) {
    let w = calendar.weekend_day_count() as u32;
    let d = active_doctor_count(doctors, calendar);
    if d == 0 {
        return (0, 0);
    }
    let available = available_weekend_count(doctor, calendar);
    let lo = (w / d).min((available + 1) / 2);
    let hi = (w + d - 1) / d;
    (lo, hi)
}

/// Builds the constraint model: one boolean variable per (day, doctor)
/// pair the doctor is available for, every hard constraint, and the
/// weighted soft objective over the same variables.
pub struct RosterCompiler {
    pub calendar: MonthCalendar,
    pub doctors: Vec<Doctor>,
    pub config: RosterConfig,
    pub vars: ProblemVariables,
    /// (day index, doctor index) -> assignment variable. A missing key
    /// means "cannot be assigned", which is stronger than "assigned = 0".
    pub assign: HashMap<(usize, usize), Variable>,
    pub constraints: Vec<Constraint>,
    pub objective: Expression,
    pub slack_active: bool,
    pub debug: bool,
}

impl RosterCompiler {
    pub fn new(
        calendar: MonthCalendar,
        doctors: Vec<Doctor>,
        config: RosterConfig,
    ) -> Result<Self, RosterError> {
        if doctors.is_empty() {
            return Err(RosterError::NoDoctors);
        }
        if calendar.is_empty() {
            return Err(RosterError::InvalidMonth {
                year: config.year,
                month: config.month,
            });
        }

        let debug = env::var("RUST_DEBUG").is_ok() || env::args().any(|arg| arg == "--debug");

        Ok(RosterCompiler {
            calendar,
            doctors,
            config,
            vars: variables!(),
            assign: HashMap::new(),
            constraints: Vec::new(),
            objective: Expression::from(0),
            slack_active: false,
            debug,
        })
    }

    /// Runs every build stage and freezes the result into a [`RosterModel`].
    ///
    /// Infeasibility by construction (a day nobody can take, supply short
    /// of the month) is detected here, before the search engine ever runs.
    pub fn compile(mut self) -> Result<RosterModel, RosterError> {
        self.allocate_variables();
        self.slack_active = slack_active(&self.doctors, &self.calendar, &self.config);
        if self.slack_active {
            debugging::debug_print(
                &self,
                "⚠️",
                &format!(
                    "capacity below {} days; {:?} coverage relaxed to at-most-1",
                    self.calendar.len(),
                    self.config.slack_weekday
                ),
            );
        }
        self.check_coverage_feasibility()?;

        constraints::apply_coverage(&mut self);
        constraints::apply_duty_bands(&mut self);
        if self.config.enforce_duty_cap {
            constraints::apply_duty_cap(&mut self);
        }
        constraints::apply_no_consecutive(&mut self);
        constraints::apply_weekend_bands(&mut self);

        let needs_indicators = self.config.require_rest_weekend
            || self.config.objective.reward_full_weekends_off
            || self.config.objective.balance_full_weekends_off;
        let weekend_offs = if needs_indicators {
            objective::add_full_weekend_indicators(&mut self)
        } else {
            objective::WeekendOffVars::default()
        };
        if self.config.require_rest_weekend {
            constraints::apply_rest_weekend(&mut self, &weekend_offs);
        }
        objective::compose(&mut self, &weekend_offs);

        debugging::debug_model_state(&self);

        Ok(RosterModel {
            calendar: self.calendar,
            doctors: self.doctors,
            config: self.config,
            vars: self.vars,
            assign: self.assign,
            constraints: self.constraints,
            objective: self.objective,
            slack_active: self.slack_active,
        })
    }

    fn allocate_variables(&mut self) {
        for i in 0..self.calendar.days.len() {
            let day = self.calendar.days[i];
            for di in 0..self.doctors.len() {
                if self.doctors[di].is_available(day.date) {
                    let var = self.vars.add(variable().binary());
                    self.assign.insert((day.index, di), var);
                }
            }
        }
        debugging::debug_print(
            self,
            "➕",
            &format!(
                "{} assignment variables over {} days x {} doctors",
                self.assign.len(),
                self.calendar.len(),
                self.doctors.len()
            ),
        );
    }

    pub fn is_slack_day(&self, index: usize) -> bool {
        use chrono::Datelike;
        self.slack_active
            && self.calendar.days[index].date.weekday() == self.config.slack_weekday
    }

    fn check_coverage_feasibility(&self) -> Result<(), RosterError> {
        for day in &self.calendar.days {
            let available = (0..self.doctors.len())
                .filter(|di| self.assign.contains_key(&(day.index, *di)))
                .count();
            if available == 0 && !self.is_slack_day(day.index) {
                return Err(RosterError::UncoverableDay(day.date));
            }
        }

        let slack_days = if self.slack_active {
            use chrono::Datelike;
            self.calendar
                .days
                .iter()
                .filter(|d| d.date.weekday() == self.config.slack_weekday)
                .count() as u32
        } else {
            0
        };
        let demand = self.calendar.len() as u32 - slack_days;
        let supply = total_supply(&self.doctors, &self.calendar, &self.config);
        if supply < demand {
            return Err(RosterError::InsufficientCapacity { supply, demand });
        }
        Ok(())
    }
}

/// The frozen model handed to the search engine. Never mutated again.
pub struct RosterModel {
    pub calendar: MonthCalendar,
    pub doctors: Vec<Doctor>,
    pub config: RosterConfig,
    pub vars: ProblemVariables,
    pub assign: HashMap<(usize, usize), Variable>,
    pub constraints: Vec<Constraint>,
    pub objective: Expression,
    pub slack_active: bool,
}
