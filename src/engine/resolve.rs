//! Shape dispatch.
//!
//! The overall shape of the trimmed input decides which specialist runs:
//!
//! ```text
//! ""            ──▶ the current week
//! "123"         ──▶ fixed-length digit readings
//! "+3" / "-10"  ──▶ signed day offset
//! "mar"         ──▶ fuzzy name match
//! anything else ──▶ tokenize, classify, chain
//! ```
//!
//! Whatever the specialist finds, the raw input is also fed through the
//! strict date parser, and a successful parse is pinned to the top of the
//! list as the "Current input" entry.
//!
//! Set `DATEHINT_DEBUG=1` to print candidate traces on stderr.

use chrono::DateTime;
use chrono_tz::Tz;

use super::{chains, digits, rank, text};
use crate::Candidate;
use crate::parse::parse_date;

pub(crate) fn resolve(input: &str, now: DateTime<Tz>) -> Vec<Candidate> {
    let input = input.trim();
    let today = now.date_naive();

    let mut candidates = if input.is_empty() {
        text::resolve_blank(today)
    } else if regex!(r"^[0-9]+$").is_match(input) {
        digits::resolve_digits(input, today)
    } else if regex!(r"^[-+][0-9]+$").is_match(input) {
        text::resolve_signed(input, today)
    } else if regex!(r"^[A-Za-z]+$").is_match(input) {
        text::resolve_text(input, today)
    } else {
        chains::resolve_multipart(input, today)
    };

    if let Ok(date) = parse_date(input, now) {
        candidates.insert(0, Candidate::with_priority("Current input", date, 100));
    }

    if std::env::var_os("DATEHINT_DEBUG").is_some() {
        for candidate in &candidates {
            eprintln!("[resolve] input={input:?} priority={} label={:?}", candidate.priority, candidate.label());
        }
    }

    rank::rank(candidates, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Tz> {
        chrono_tz::UTC.with_ymd_and_hms(2024, 2, 15, 10, 30, 0).unwrap()
    }

    fn labels(input: &str) -> Vec<String> {
        resolve(input, now()).iter().map(Candidate::label).collect()
    }

    #[test]
    fn blank_input_lists_the_week() {
        let labels = labels("");
        assert_eq!(labels[0], "Today (2024-02-15)");
        assert_eq!(labels.len(), 9);
    }

    #[test]
    fn parseable_input_is_pinned_first() {
        // "2-29" parses strictly, so it leads even though the digit scan
        // would rank other dates closer to today.
        let labels = labels("2-29");
        assert_eq!(labels[0], "Current input (2024-02-29)");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(labels("  tomo  ")[0], "Current input (2024-02-16)");
    }

    #[test]
    fn shape_dispatch() {
        assert!(labels("29").contains(&"The 29th of this month (2024-02-29)".to_string()));
        // A signed offset also parses strictly, so the pinned entry absorbs it.
        assert_eq!(labels("+3"), vec!["Current input (2024-02-18)"]);
        assert!(labels("jul").contains(&"Next July (2024-07-15)".to_string()));
        assert!(labels("jul 14").contains(&"Next July 14th (2024-07-14)".to_string()));
    }

    #[test]
    fn duplicate_dates_collapse_across_specialists() {
        // "today" both fuzzy-matches and parses; the pinned entry wins.
        let labels = labels("today");
        assert_eq!(labels[0], "Current input (2024-02-15)");
        assert!(!labels.contains(&"Today (2024-02-15)".to_string()));
    }
}
