use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{engine, zones};

const MAX_ZONE_SUGGESTIONS: usize = 25;

/// Resolution context.
///
/// This holds the environment needed to resolve relative expressions (like
/// "tomorrow"): the current instant and the zone whose calendar day counts
/// as "today".
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference instant used to resolve relative expressions.
    pub now: DateTime<Utc>,
    /// Zone whose wall clock defines "today" and "upcoming".
    pub zone: Tz,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            // A Thursday morning.
            let now = Utc.with_ymd_and_hms(2024, 2, 15, 10, 30, 0).unwrap();
            Self { now, zone: chrono_tz::UTC }
        } else {
            Self { now: Utc::now(), zone: chrono_tz::UTC }
        }
    }
}

impl Context {
    /// The reference instant in the context's zone.
    pub(crate) fn zoned_now(&self) -> DateTime<Tz> {
        self.now.with_timezone(&self.zone)
    }

    /// The calendar day at the reference instant, in the context's zone.
    pub fn today(&self) -> NaiveDate {
        self.zoned_now().date_naive()
    }
}

/// One ranked date suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Human-readable label, e.g. `"Next Friday (2024-02-16)"`.
    pub label: String,
    /// The bare date in `yyyy-mm-dd` form, suitable for echoing back as input.
    pub value: String,
}

/// One time zone suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSuggestion {
    /// Human-readable label, e.g. `"Europe/Stockholm (11:30)"`.
    pub label: String,
    /// The tzdb identifier.
    pub id: String,
}

/// Date suggestions for `input` under a default [`Context`].
pub fn suggest(input: &str) -> Vec<Suggestion> {
    suggest_with(input, &Context::default())
}

/// Date suggestions for `input`: at most 25 entries, best first.
pub fn suggest_with(input: &str, ctx: &Context) -> Vec<Suggestion> {
    engine::resolve(input, ctx.zoned_now())
        .into_iter()
        .map(|candidate| Suggestion {
            label: candidate.label(),
            value: candidate.date.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

/// Time zone suggestions for `input`: at most 25 entries, best first.
pub fn suggest_zones(input: &str, ctx: &Context) -> Vec<ZoneSuggestion> {
    zones::search(input, ctx.now, ctx.zone)
        .into_iter()
        .take(MAX_ZONE_SUGGESTIONS)
        .map(|candidate| ZoneSuggestion { label: candidate.label, id: candidate.id.to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_pinned_for_tests() {
        let ctx = Context::default();
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
    }

    #[test]
    fn context_day_follows_the_zone() {
        let ctx = Context { zone: chrono_tz::Pacific::Auckland, ..Context::default() };
        // 10:30 UTC on the 15th is already the 16th in Auckland (+13).
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());
    }

    #[test]
    fn blank_input_lists_the_surrounding_week_in_order() {
        let labels: Vec<_> = suggest("").into_iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
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
    fn suggestion_values_echo_the_date() {
        let out = suggest("tomorrow");
        assert_eq!(out[0].label, "Current input (2024-02-16)");
        assert_eq!(out[0].value, "2024-02-16");
    }

    #[test]
    fn day_of_month_scan_includes_the_leap_day() {
        let labels: Vec<_> = suggest("29").into_iter().map(|s| s.label).collect();
        assert!(labels.contains(&"The 29th of this month (2024-02-29)".to_string()));
    }

    #[test]
    fn annual_date_match_says_today_only_on_the_day() {
        let labels: Vec<_> = suggest("0229").into_iter().map(|s| s.label).collect();
        assert!(!labels.iter().any(|l| l.starts_with("Today!")));

        let ctx = Context {
            now: Utc.with_ymd_and_hms(2024, 2, 29, 9, 0, 0).unwrap(),
            ..Context::default()
        };
        let labels: Vec<_> = suggest_with("0229", &ctx).into_iter().map(|s| s.label).collect();
        assert!(labels.contains(&"Today! (2024-02-29)".to_string()));
    }

    #[test]
    fn multipart_input_flows_through_the_chain_rules() {
        let labels: Vec<_> = suggest("jul 14").into_iter().map(|s| s.label).collect();
        assert!(labels.contains(&"Next July 14th (2024-07-14)".to_string()));
        assert!(labels.contains(&"Last July 14th (2023-07-14)".to_string()));
    }

    #[test]
    fn output_is_capped() {
        // A one-digit query fans out well past the cap before ranking.
        assert!(suggest("1").len() <= 25);
    }

    #[test]
    fn zone_suggestions_are_capped_and_mapped() {
        let ctx = Context::default();
        let out = suggest_zones("a", &ctx);
        assert!(out.len() <= MAX_ZONE_SUGGESTIONS);
        let out = suggest_zones("stockholm", &ctx);
        assert_eq!(out[0].id, "Europe/Stockholm");
        assert_eq!(out[0].label, "Europe/Stockholm (11:30)");
    }
}
