use crate::calendar::MonthCalendar;
use crate::domain::{Doctor, DoctorSummary, Roster, RosterEntry};
use crate::solve::SolveOutcome;

/// Turns solved 0/1 values back into a calendar-ordered roster.
///
/// Ties between equally optimal rosters are broken here once and for all:
/// days are scanned in calendar order and each day's variables in doctor
/// insertion order, so the same solved values always decode to the same
/// roster. All summary statistics are recomputed from the decoded entries
/// alone — the model's own bookkeeping is never consulted, so the numbers
/// cannot drift from what the roster actually says.
pub struct RosterExtractor<'a> {
    pub calendar: &'a MonthCalendar,
    pub doctors: &'a [Doctor],
}

impl<'a> RosterExtractor<'a> {
    pub fn new(calendar: &'a MonthCalendar, doctors: &'a [Doctor]) -> Self {
        RosterExtractor { calendar, doctors }
    }

    pub fn extract(&self, outcome: &SolveOutcome) -> Roster {
        let entries = self.decode_entries(outcome);
        let summaries = self.summarize(&entries);
        Roster {
            entries,
            summaries,
            status: outcome.status,
            objective_value: outcome.objective_value,
        }
    }

    fn decode_entries(&self, outcome: &SolveOutcome) -> Vec<RosterEntry> {
        let mut entries = Vec::with_capacity(self.calendar.len());
        for day in &self.calendar.days {
            let assigned = (0..self.doctors.len())
                .find(|di| outcome.assignment.get(&(day.index, *di)) == Some(&true))
                .map(|di| self.doctors[di].name.clone());
            entries.push(RosterEntry {
                date: day.date,
                doctor: assigned,
            });
        }
        entries
    }

    fn summarize(&self, entries: &[RosterEntry]) -> Vec<DoctorSummary> {
        self.doctors
            .iter()
            .map(|doctor| {
                let mine: Vec<usize> = entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.doctor.as_deref() == Some(doctor.name.as_str()))
                    .map(|(i, _)| i)
                    .collect();
                let weekend_count = mine
                    .iter()
                    .filter(|&&i| self.calendar.days[i].is_weekend)
                    .count() as u32;
                let full_weekends_off = self
                    .calendar
                    .full_weekends
                    .iter()
                    .filter(|triplet| triplet.iter().all(|idx| !mine.contains(idx)))
                    .count() as u32;
                DoctorSummary {
                    name: doctor.name.clone(),
                    duty_count: mine.len() as u32,
                    weekend_count,
                    full_weekends_off,
                    dates: mine.iter().map(|&i| entries[i].date).collect(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::calendar::build_month;
    use crate::domain::Doctor;
    use crate::solve::{SolveOutcome, SolveStatus};

    fn outcome(assignment: HashMap<(usize, usize), bool>) -> SolveOutcome {
        SolveOutcome {
            status: SolveStatus::Optimal,
            assignment,
            objective_value: 0.0,
            solve_time_ms: 0,
        }
    }

    #[test]
    fn decodes_in_doctor_order_and_recomputes_stats() {
        let cal = build_month(2026, 9).unwrap();
        let doctors = vec![Doctor::new("A"), Doctor::new("B")];
        let mut assignment = HashMap::new();
        for day in &cal.days {
            // B on weekends, A otherwise.
            let di = usize::from(day.is_weekend);
            assignment.insert((day.index, di), true);
            assignment.insert((day.index, 1 - di), false);
        }
        let roster = RosterExtractor::new(&cal, &doctors).extract(&outcome(assignment));

        assert_eq!(roster.entries.len(), 30);
        assert!(roster.entries.iter().all(|e| e.doctor.is_some()));
        let a = &roster.summaries[0];
        let b = &roster.summaries[1];
        assert_eq!(a.duty_count, 22);
        assert_eq!(a.weekend_count, 0);
        assert_eq!(b.duty_count, 8);
        assert_eq!(b.weekend_count, 8);
        // B works every Saturday and Sunday, so no full weekend is free;
        // A is off Friday..Sunday only when B covers Friday, i.e. never.
        assert_eq!(b.full_weekends_off, 0);
        assert_eq!(a.full_weekends_off, 0);
        assert_eq!(b.dates.len(), 8);
    }

    #[test]
    fn unassigned_day_keeps_sentinel_slot() {
        let cal = build_month(2026, 9).unwrap();
        let doctors = vec![Doctor::new("A")];
        let mut assignment = HashMap::new();
        for day in &cal.days {
            assignment.insert((day.index, 0), day.index != 1);
        }
        let roster = RosterExtractor::new(&cal, &doctors).extract(&outcome(assignment));
        assert_eq!(roster.entries[1].doctor, None);
        assert_eq!(roster.summaries[0].duty_count, 29);
    }

    #[test]
    fn first_doctor_wins_a_decode_tie() {
        // Should the values ever carry two 1s on a day, insertion order
        // decides.
        let cal = build_month(2026, 9).unwrap();
        let doctors = vec![Doctor::new("A"), Doctor::new("B")];
        let mut assignment = HashMap::new();
        assignment.insert((0, 0), true);
        assignment.insert((0, 1), true);
        let roster = RosterExtractor::new(&cal, &doctors).extract(&outcome(assignment));
        assert_eq!(roster.entries[0].doctor.as_deref(), Some("A"));
    }
}
