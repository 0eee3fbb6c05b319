use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::DutyDay;
use crate::error::RosterError;

/// The ordered day sequence for one target month, flags precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DutyDay>,
    /// Index triplets [Fri, Sat, Sun] whose three days all fall in the month.
    pub full_weekends: Vec<[usize; 3]>,
}

impl MonthCalendar {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn weekend_day_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_weekend).count()
    }

    /// Resolves a day-of-month number to a date, `None` when out of range.
    pub fn day_of_month(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

/// Builds the full day sequence for `year`/`month`.
///
/// Handles 28..31-day months and the December wrap; weekend and Friday
/// flags are computed here once so nothing downstream touches weekday
/// arithmetic again.
pub fn build_month(year: i32, month: u32) -> Result<MonthCalendar, RosterError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(RosterError::InvalidMonth { year, month })?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or(RosterError::InvalidMonth { year, month })?;

    let mut days = Vec::new();
    let mut date = first;
    while date < next_first {
        let weekday = date.weekday();
        days.push(DutyDay {
            date,
            index: days.len(),
            is_weekend: weekday == Weekday::Sat || weekday == Weekday::Sun,
            is_friday: weekday == Weekday::Fri,
        });
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    // Friday anchors whose Saturday and Sunday are still inside the month.
    let full_weekends = days
        .iter()
        .filter(|d| d.is_friday && d.index + 2 < days.len())
        .map(|d| [d.index, d.index + 1, d.index + 2])
        .collect();

    Ok(MonthCalendar {
        year,
        month,
        days,
        full_weekends,
    })
}

/// The month after `today`'s, the default planning target.
pub fn following_month(today: NaiveDate) -> (i32, u32) {
    let month = today.month() % 12 + 1;
    let year = if month == 1 {
        today.year() + 1
    } else {
        today.year()
    };
    (year, month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn september_2026_layout() {
        let cal = build_month(2026, 9).unwrap();
        assert_eq!(cal.len(), 30);
        // Sep 1st 2026 is a Tuesday, so the first weekend is the 5th/6th.
        assert!(!cal.days[0].is_weekend);
        assert!(cal.days[4].is_weekend);
        assert!(cal.days[5].is_weekend);
        assert_eq!(cal.weekend_day_count(), 8);
        // Fridays on the 4th, 11th, 18th and 25th, all with room for Sunday.
        let fridays: Vec<usize> = cal
            .days
            .iter()
            .filter(|d| d.is_friday)
            .map(|d| d.index)
            .collect();
        assert_eq!(fridays, vec![3, 10, 17, 24]);
        assert_eq!(cal.full_weekends, vec![[3, 4, 5], [10, 11, 12], [17, 18, 19], [24, 25, 26]]);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(build_month(2026, 2).unwrap().len(), 28);
        assert_eq!(build_month(2024, 2).unwrap().len(), 29);
        assert_eq!(build_month(2026, 12).unwrap().len(), 31);
    }

    #[test]
    fn indices_are_contiguous() {
        let cal = build_month(2026, 12).unwrap();
        for (i, day) in cal.days.iter().enumerate() {
            assert_eq!(day.index, i);
        }
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert_eq!(
            build_month(2026, 13),
            Err(RosterError::InvalidMonth {
                year: 2026,
                month: 13
            })
        );
        assert!(build_month(2026, 0).is_err());
    }

    #[test]
    fn following_month_rolls_over_december() {
        let dec = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(following_month(dec), (2026, 1));
        let aug = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(following_month(aug), (2026, 9));
    }

    #[test]
    fn day_of_month_range() {
        let cal = build_month(2026, 2).unwrap();
        assert!(cal.day_of_month(28).is_some());
        assert!(cal.day_of_month(29).is_none());
        assert!(cal.day_of_month(0).is_none());
    }
}
