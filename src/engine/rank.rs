//! Final ordering of candidates before they become suggestions.

use chrono::NaiveDate;

use crate::Candidate;

const MAX_SUGGESTIONS: usize = 25;

/// Sorts candidates by priority, then by distance from today, then by date,
/// drops duplicate dates keeping the best-ranked one, and caps the list.
pub(crate) fn rank(mut candidates: Vec<Candidate>, today: NaiveDate) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| {
                let da = (a.date - today).num_days().abs();
                let db = (b.date - today).num_days().abs();
                da.cmp(&db)
            })
            .then_with(|| b.date.cmp(&a.date))
    });

    let mut seen = Vec::new();
    candidates.retain(|c| {
        if seen.contains(&c.date) {
            false
        } else {
            seen.push(c.date);
            true
        }
    });

    candidates.truncate(MAX_SUGGESTIONS);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn priority_then_distance_then_future_first() {
        let out = rank(
            vec![
                Candidate::new("far", date(2024, 3, 15)),
                Candidate::new("past", date(2024, 2, 10)),
                Candidate::new("future", date(2024, 2, 20)),
                Candidate::with_priority("pinned", date(2025, 1, 1), 100),
            ],
            today(),
        );
        let labels: Vec<_> = out.iter().map(|c| c.comment.clone().unwrap()).collect();
        // Equal distance of five days: the future date sorts first.
        assert_eq!(labels, vec!["pinned", "future", "past", "far"]);
    }

    #[test]
    fn duplicate_dates_keep_the_better_ranked_entry() {
        let out = rank(
            vec![
                Candidate::new("plain", date(2024, 2, 20)),
                Candidate::with_priority("strong", date(2024, 2, 20), 10),
            ],
            today(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].comment.as_deref(), Some("strong"));
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let out = rank(
            vec![
                Candidate::new("first", date(2024, 2, 20)),
                Candidate::new("second", date(2024, 2, 20)),
            ],
            today(),
        );
        assert_eq!(out[0].comment.as_deref(), Some("first"));
    }

    #[test]
    fn list_is_capped() {
        let candidates = (1..=28)
            .map(|d| Candidate::new(format!("day {d}"), date(2024, 2, d)))
            .collect();
        assert_eq!(rank(candidates, today()).len(), MAX_SUGGESTIONS);
    }
}
