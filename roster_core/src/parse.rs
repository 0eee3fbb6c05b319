use std::collections::{BTreeSet, HashSet};

use regex::Regex;

use crate::calendar::MonthCalendar;
use crate::domain::{Doctor, DoctorRow};
use crate::error::RosterError;

/// A skipped unavailability token. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWarning {
    pub doctor: String,
    pub token: String,
    pub reason: String,
}

impl std::fmt::Display for TokenWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: skipped unavailability token '{}' ({})",
            self.doctor, self.token, self.reason
        )
    }
}

/// Parses a header+rows table into doctor rows.
///
/// The header must carry `Doctor` and `Unavailability` columns (in any
/// order). Empty and `null` unavailability cells mean "always available".
pub fn parse_from_table(rows: Vec<Vec<&str>>) -> Result<Vec<DoctorRow>, RosterError> {
    let header = rows
        .first()
        .ok_or_else(|| RosterError::BadTable("empty table".to_string()))?;
    let name_col = header
        .iter()
        .position(|h| h.trim() == "Doctor")
        .ok_or_else(|| RosterError::BadTable("missing 'Doctor' column".to_string()))?;
    let unavail_col = header.iter().position(|h| h.trim() == "Unavailability");

    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for row in rows.into_iter().skip(1) {
        let name = row
            .get(name_col)
            .map(|s| s.trim())
            .ok_or_else(|| RosterError::BadTable("row shorter than header".to_string()))?;
        if name.is_empty() {
            return Err(RosterError::BadTable("empty doctor name".to_string()));
        }
        if !seen.insert(name.to_string()) {
            return Err(RosterError::DuplicateDoctor(name.to_string()));
        }

        let unavailability = unavail_col
            .and_then(|col| row.get(col))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && *s != "null")
            .map(|s| s.to_string());

        out.push(DoctorRow {
            name: name.to_string(),
            unavailability,
        });
    }

    if out.is_empty() {
        return Err(RosterError::NoDoctors);
    }
    Ok(out)
}

/// Resolves raw unavailability specs against the target month.
///
/// Each comma-separated token must be a day-of-month number inside the
/// month; anything else is skipped with a warning, so a typo in one cell
/// never aborts the run.
pub fn resolve_unavailability(
    rows: &[DoctorRow],
    calendar: &MonthCalendar,
) -> (Vec<Doctor>, Vec<TokenWarning>) {
    let day_token = Regex::new(r"^\d{1,2}$").unwrap();
    let mut doctors = Vec::new();
    let mut warnings = Vec::new();

    for row in rows {
        let mut unavailable = BTreeSet::new();
        if let Some(spec) = &row.unavailability {
            for raw in spec.split(',') {
                let token = raw.trim();
                if token.is_empty() {
                    continue;
                }
                if !day_token.is_match(token) {
                    warnings.push(TokenWarning {
                        doctor: row.name.clone(),
                        token: token.to_string(),
                        reason: "not a day number".to_string(),
                    });
                    continue;
                }
                let day: u32 = match token.parse() {
                    Ok(day) => day,
                    Err(_) => {
                        warnings.push(TokenWarning {
                            doctor: row.name.clone(),
                            token: token.to_string(),
                            reason: "not a day number".to_string(),
                        });
                        continue;
                    }
                };
                match calendar.day_of_month(day) {
                    Some(date) => {
                        unavailable.insert(date);
                    }
                    None => warnings.push(TokenWarning {
                        doctor: row.name.clone(),
                        token: token.to_string(),
                        reason: format!("outside 1..={}", calendar.len()),
                    }),
                }
            }
        }
        doctors.push(Doctor {
            name: row.name.clone(),
            unavailable,
        });
    }

    (doctors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_month;

    fn table(rows: &[(&'static str, &'static str)]) -> Vec<Vec<&'static str>> {
        let mut out = vec![vec!["Doctor", "Unavailability"]];
        for (name, unavail) in rows {
            out.push(vec![name, unavail]);
        }
        out
    }

    #[test]
    fn parses_names_and_specs() {
        let rows = parse_from_table(table(&[("Andreou", "4,5"), ("Georgiou", "")])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Andreou");
        assert_eq!(rows[0].unavailability.as_deref(), Some("4,5"));
        assert_eq!(rows[1].unavailability, None);
    }

    #[test]
    fn null_cell_means_available() {
        let rows = parse_from_table(table(&[("Andreou", "null")])).unwrap();
        assert_eq!(rows[0].unavailability, None);
    }

    #[test]
    fn duplicate_doctor_is_fatal() {
        let err = parse_from_table(table(&[("Andreou", ""), ("Andreou", "3")])).unwrap_err();
        assert_eq!(err, RosterError::DuplicateDoctor("Andreou".to_string()));
    }

    #[test]
    fn missing_doctor_column_is_fatal() {
        let err = parse_from_table(vec![vec!["Name"], vec!["Andreou"]]).unwrap_err();
        assert!(matches!(err, RosterError::BadTable(_)));
    }

    #[test]
    fn resolves_good_tokens() {
        let cal = build_month(2026, 9).unwrap();
        let rows = parse_from_table(table(&[("Andreou", "1, 15 ,30")])).unwrap();
        let (doctors, warnings) = resolve_unavailability(&rows, &cal);
        assert!(warnings.is_empty());
        assert_eq!(doctors[0].unavailable.len(), 3);
        assert!(!doctors[0].is_available(cal.day_of_month(15).unwrap()));
        assert!(doctors[0].is_available(cal.day_of_month(16).unwrap()));
    }

    #[test]
    fn bad_tokens_warn_but_never_abort() {
        let cal = build_month(2026, 9).unwrap();
        let rows = parse_from_table(table(&[("Andreou", "3,oops,31,,12")])).unwrap();
        let (doctors, warnings) = resolve_unavailability(&rows, &cal);
        // 'oops' is not a number, 31 is outside September, the empty token
        // from the doubled comma is ignored outright.
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].token, "oops");
        assert_eq!(warnings[1].token, "31");
        assert_eq!(doctors[0].unavailable.len(), 2);
    }

    #[test]
    fn empty_spec_resolves_to_empty_set() {
        let cal = build_month(2026, 9).unwrap();
        let rows = parse_from_table(table(&[("Andreou", "")])).unwrap();
        let (doctors, warnings) = resolve_unavailability(&rows, &cal);
        assert!(warnings.is_empty());
        assert!(doctors[0].unavailable.is_empty());
    }
}
