//! Resolvers for the non-numeric shapes: empty input, a signed day offset,
//! and free text fuzzy-matched against month, weekday and relative-day names.

use chrono::{Datelike, Duration, NaiveDate};

use crate::Candidate;
use crate::datemath::{
    next_occurrence, next_weekday, previous_occurrence, previous_weekday, safe_annual_date,
    weekday_from_iso,
};
use crate::tables::{MONTH_NAMES, RELATIVE_DAYS, WEEKDAY_NAMES, weekday_name};

/// Nothing typed yet: the current week, anchored on today.
pub(crate) fn resolve_blank(today: NaiveDate) -> Vec<Candidate> {
    let mut out = vec![
        Candidate::new("Today", today),
        Candidate::new("Tomorrow", today + Duration::days(1)),
        Candidate::new("Yesterday", today - Duration::days(1)),
    ];
    for i in 2..=7 {
        let date = today + Duration::days(i);
        let name = weekday_name(date.weekday());
        let label = if i <= 5 {
            name.to_string()
        } else {
            format!("Next {name}")
        };
        out.push(Candidate::new(label, date));
    }
    out
}

/// An explicitly signed number is always a day offset.
pub(crate) fn resolve_signed(input: &str, today: NaiveDate) -> Vec<Candidate> {
    let Ok(offset) = input.parse::<i64>() else {
        return Vec::new();
    };
    let Some(date) = today.checked_add_signed(Duration::days(offset)) else {
        return Vec::new();
    };
    let plural = if offset.abs() == 1 { "" } else { "s" };
    vec![Candidate::new(format!("{input} day{plural}"), date)]
}

/// How well `query` matches `name`, case-insensitively. Prefix beats
/// substring beats subsequence; zero means no match.
fn match_strength(query: &str, name: &str) -> i32 {
    let name = name.to_lowercase();
    if name.starts_with(query) {
        15
    } else if name.contains(query) {
        10
    } else if is_subsequence(query, &name) {
        5
    } else {
        0
    }
}

fn is_subsequence(query: &str, name: &str) -> bool {
    let mut chars = name.chars();
    query.chars().all(|q| chars.any(|c| c == q))
}

/// Free text: fuzzy match against month names, weekday names and the
/// relative-day words, with the match strength carried as priority.
pub(crate) fn resolve_text(input: &str, today: NaiveDate) -> Vec<Candidate> {
    let query = input.to_lowercase();
    let mut out = Vec::new();

    for (index, name) in MONTH_NAMES.iter().enumerate() {
        let strength = match_strength(&query, name);
        if strength == 0 {
            continue;
        }
        let month = index as u32 + 1;
        let Some(annual) = safe_annual_date(month, today.day()) else {
            continue;
        };
        if let Some(prev) = previous_occurrence(annual, today, true) {
            out.push(Candidate::with_priority(format!("Previous {name}"), prev, strength));
            if let Some(next) = next_occurrence(annual, today, true) {
                out.push(Candidate::with_priority(format!("Next {name}"), next, strength));
                if next.year() - prev.year() == 2 {
                    out.push(Candidate::with_priority(format!("Current {name}"), today, strength));
                }
            }
        }
    }

    for (name, iso) in WEEKDAY_NAMES {
        let strength = match_strength(&query, name);
        if strength == 0 {
            continue;
        }
        let Some(weekday) = weekday_from_iso(iso as i32) else {
            continue;
        };
        out.push(Candidate::with_priority(
            format!("Previous {name}"),
            previous_weekday(today, weekday),
            strength,
        ));
        out.push(Candidate::with_priority(
            format!("Next {name}"),
            next_weekday(today, weekday),
            strength,
        ));
        if today.weekday() == weekday {
            out.push(Candidate::with_priority(format!("Current {name}"), today, strength));
        }
    }

    for (name, offset) in RELATIVE_DAYS {
        let strength = match_strength(&query, name);
        if strength == 0 {
            continue;
        }
        if let Some(date) = today.checked_add_signed(Duration::days(offset)) {
            out.push(Candidate::with_priority(name, date, strength));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        // A Thursday.
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    fn labels(out: &[Candidate]) -> Vec<String> {
        out.iter().map(Candidate::label).collect()
    }

    #[test]
    fn blank_lists_the_week() {
        let out = resolve_blank(today());
        assert_eq!(
            labels(&out),
            vec![
                "Today (2024-02-15)",
                "Tomorrow (2024-02-16)",
                "Yesterday (2024-02-14)",
                "Saturday (2024-02-17)",
                "Sunday (2024-02-18)",
                "Monday (2024-02-19)",
                "Tuesday (2024-02-20)",
                "Next Wednesday (2024-02-21)",
                "Next Thursday (2024-02-22)",
            ]
        );
    }

    #[test]
    fn signed_offsets() {
        let out = resolve_signed("+1", today());
        assert_eq!(labels(&out), vec!["+1 day (2024-02-16)"]);
        let out = resolve_signed("-10", today());
        assert_eq!(labels(&out), vec!["-10 days (2024-02-05)"]);
    }

    #[test]
    fn prefix_beats_subsequence() {
        let out = resolve_text("ma", today());
        let march = out.iter().find(|c| c.label() == "Next March (2024-03-15)").unwrap();
        let may = out.iter().find(|c| c.label() == "Next May (2024-05-15)").unwrap();
        assert_eq!(march.priority, 15);
        assert_eq!(may.priority, 15);
        // "ma" is a subsequence of "Monday" but not a substring.
        let monday = out.iter().find(|c| c.label().starts_with("Next Monday")).unwrap();
        assert_eq!(monday.priority, 5);
    }

    #[test]
    fn weekday_match_on_its_own_day() {
        let out = resolve_text("thu", today());
        assert!(labels(&out).contains(&"Previous Thursday (2024-02-08)".to_string()));
        assert!(labels(&out).contains(&"Next Thursday (2024-02-22)".to_string()));
        assert!(labels(&out).contains(&"Current Thursday (2024-02-15)".to_string()));
    }

    #[test]
    fn month_match_uses_strict_occurrences() {
        let out = resolve_text("febr", today());
        // Strict search skips clamped years on either side of today.
        assert!(labels(&out).contains(&"Previous February (2023-02-15)".to_string()));
        assert!(labels(&out).contains(&"Next February (2025-02-15)".to_string()));
        assert!(labels(&out).contains(&"Current February (2024-02-15)".to_string()));
    }

    #[test]
    fn relative_day_words() {
        let out = resolve_text("uber", today());
        assert_eq!(labels(&out), vec!["Ubermorgen (2024-02-17)"]);
        let out = resolve_text("tod", today());
        assert!(labels(&out).contains(&"Today (2024-02-15)".to_string()));
    }

    #[test]
    fn garbage_matches_nothing() {
        assert!(resolve_text("xyzzy", today()).is_empty());
    }
}
