//! Resolver for pure-digit input, dispatched on digit count.
//!
//! Each length gets its own interpretation: single digits scan nearby days
//! and months, two digits read as a day-of-month or month, three and four
//! digits hit the precomputed annual-date index, eight digits are a literal
//! `yyyymmdd`. On top of whatever the length-specific scan finds, any nonzero
//! value also reads as a day offset in both directions.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::Candidate;
use crate::datemath::{next_occurrence, ordinal, previous_occurrence, safe_local_date};
use crate::tables::{four_digit_dates, month_name, short_month_day, three_digit_dates};

pub(crate) fn resolve_digits(input: &str, today: NaiveDate) -> Vec<Candidate> {
    let Ok(number) = input.parse::<i32>() else {
        return Vec::new();
    };

    let mut out = match input.len() {
        1 => one_digit(input, today),
        2 => two_digits(number, today),
        3 => three_digits(input, today),
        4 => four_digits(input, number, today),
        8 => eight_digits(input),
        _ => Vec::new(),
    };

    if number != 0 {
        let plural = if number == 1 { "" } else { "s" };
        if let Some(before) = today.checked_sub_signed(Duration::days(number as i64)) {
            if before.year() >= 1 {
                out.push(Candidate::new(format!("{number} day{plural} ago"), before));
            }
        }
        if let Some(after) = today.checked_add_signed(Duration::days(number as i64)) {
            if after.year() <= 9999 {
                out.push(Candidate::new(format!("{number} day{plural} from now"), after));
            }
        }
    } else {
        out.push(Candidate::new("0 days ago/from now", today));
    }

    out
}

/// Relative wording for a month `offset` months away from today, falling
/// back to the month name outside the last/this/next window.
fn month_phrase(date: NaiveDate, today: NaiveDate) -> String {
    let offset = (date.year() * 12 + date.month() as i32) - (today.year() * 12 + today.month() as i32);
    match offset {
        -1 => "last month".to_string(),
        0 => "this month".to_string(),
        1 => "next month".to_string(),
        _ => month_name(date.month()).unwrap_or("?").to_string(),
    }
}

/// One digit: days within [today − 1 week, today + 1 month] whose padded
/// day-of-month contains the digit, plus months within ±12 months whose
/// padded number contains it.
fn one_digit(input: &str, today: NaiveDate) -> Vec<Candidate> {
    let mut out = Vec::new();

    let start = today - Duration::weeks(1);
    let end = today + Months::new(1);
    let mut date = start;
    while date <= end {
        if format!("{:02}", date.day()).contains(input) {
            out.push(Candidate::new(
                format!("The {} of {}", ordinal(date.day() as i32), month_phrase(date, today)),
                date,
            ));
        }
        date += Duration::days(1);
    }

    for i in -12i32..=12 {
        let month = if i < 0 {
            today.checked_sub_months(Months::new(i.unsigned_abs()))
        } else {
            today.checked_add_months(Months::new(i as u32))
        };
        let Some(month) = month else { continue };
        let Some(name) = month_name(month.month()) else { continue };
        if format!("{:02}", month.month()).contains(input) {
            let label = if month.year() < today.year() {
                format!("Last {name}")
            } else if month.year() > today.year() {
                format!("Next {name}")
            } else {
                name.to_string()
            };
            out.push(Candidate::new(label, month));
        }
    }

    out
}

/// Two digits: day-of-month hits within [today − 1 month, today + 2 months],
/// plus a month reading when the value is 1–12.
fn two_digits(number: i32, today: NaiveDate) -> Vec<Candidate> {
    let mut out = Vec::new();

    if (1..=31).contains(&number) {
        let start = today - Months::new(1);
        let end = today + Months::new(2);
        let mut date = start;
        while date <= end {
            if date.day() == number as u32 {
                out.push(Candidate::new(
                    format!("The {} of {}", ordinal(number), month_phrase(date, today)),
                    date,
                ));
            }
            date += Duration::days(1);
        }
    }

    if (1..=12).contains(&number) {
        out.extend(month_reading(number as u32, today));
    }

    out
}

/// "Previous/Next/Current {Month}" for today's day-of-month carried into the
/// given month, clamped when today's day is too large for it.
fn month_reading(month: u32, today: NaiveDate) -> Vec<Candidate> {
    let Some(annual) = crate::datemath::safe_annual_date(month, today.day()) else {
        return Vec::new();
    };
    let (Some(prev), Some(next)) = (
        previous_occurrence(annual, today, false),
        next_occurrence(annual, today, false),
    ) else {
        return Vec::new();
    };
    let Some(name) = month_name(month) else {
        return Vec::new();
    };

    let mut out = vec![
        Candidate::new(format!("Previous {name}"), prev),
        Candidate::new(format!("Next {name}"), next),
    ];
    if next.year() - prev.year() == 2 {
        out.push(Candidate::new(format!("Current {name}"), today));
    }
    out
}

/// Three digits: index lookup; the "previous" entry only appears when it is
/// at most a week old.
fn three_digits(input: &str, today: NaiveDate) -> Vec<Candidate> {
    let Some(dates) = three_digit_dates().get(input) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for annual in dates {
        if let Some(prev) = previous_occurrence(*annual, today, false) {
            if prev >= today - Duration::weeks(1) {
                out.push(Candidate::new(
                    format!("Previous {}", short_month_day(prev.month(), prev.day())),
                    prev,
                ));
            }
        }
        if let Some(next) = next_occurrence(*annual, today, false) {
            out.push(Candidate::new(
                format!("Next {}", short_month_day(next.month(), next.day())),
                next,
            ));
        }
        if today.month() == annual.month && today.day() == annual.day {
            out.push(Candidate::new("Today!", today));
        }
    }
    out
}

/// Four digits: index lookup without the recency filter, plus the year
/// reading ("Today in 1994").
fn four_digits(input: &str, number: i32, today: NaiveDate) -> Vec<Candidate> {
    let mut out = Vec::new();

    if let Some(dates) = four_digit_dates().get(input) {
        for annual in dates {
            if let Some(prev) = previous_occurrence(*annual, today, false) {
                out.push(Candidate::new(
                    format!("Previous {}", short_month_day(prev.month(), prev.day())),
                    prev,
                ));
            }
            if let Some(next) = next_occurrence(*annual, today, false) {
                out.push(Candidate::new(
                    format!("Next {}", short_month_day(next.month(), next.day())),
                    next,
                ));
            }
            if today.month() == annual.month && today.day() == annual.day {
                out.push(Candidate::new("Today!", today));
            }
        }
    }

    if let Some(date) = safe_local_date(number, today.month(), today.day()) {
        out.push(Candidate::new(format!("Today in {number}"), date));
    }

    out
}

/// Eight digits: strict `yyyymmdd`; invalid calendar values suggest nothing.
fn eight_digits(input: &str) -> Vec<Candidate> {
    let (Ok(year), Ok(month), Ok(day)) = (
        input[0..4].parse::<i32>(),
        input[4..6].parse::<u32>(),
        input[6..8].parse::<u32>(),
    ) else {
        return Vec::new();
    };
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => vec![Candidate::new("Typed date", date)],
        None => Vec::new(),
    }
}
