//! Static lookup tables: month/weekday names, relative-day keywords, and the
//! precomputed 3-/4-digit annual-date index.
//!
//! Everything here is built once behind a `Lazy` and shared read-only; no
//! resolution call ever mutates these.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;

use crate::datemath::AnnualDate;

pub static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full weekday names keyed by ISO number (Monday = 1).
pub static WEEKDAY_NAMES: [(&str, u32); 7] = [
    ("Monday", 1),
    ("Tuesday", 2),
    ("Wednesday", 3),
    ("Thursday", 4),
    ("Friday", 5),
    ("Saturday", 6),
    ("Sunday", 7),
];

/// Relative-day keywords and their day offsets from today.
pub static RELATIVE_DAYS: [(&str, i64); 4] =
    [("Today", 0), ("Yesterday", -1), ("Tomorrow", 1), ("Ubermorgen", 2)];

pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize].0
}

/// `"Jul 14"`-style short label for an annual date.
pub fn short_month_day(month: u32, day: u32) -> String {
    match month_name(month) {
        Some(name) => format!("{} {day}", &name[..3]),
        None => format!("{month:02}-{day:02}"),
    }
}

/// 4-digit keys (`mmdd` and `ddmm`) to the recurring dates they can denote.
pub fn four_digit_dates() -> &'static DigitTable {
    &DIGIT_TABLES.1
}

/// Both 3-character slices of every 4-digit key, to the same recurring dates.
pub fn three_digit_dates() -> &'static DigitTable {
    &DIGIT_TABLES.0
}

type DigitTable = HashMap<String, Vec<AnnualDate>>;

static DIGIT_TABLES: Lazy<(DigitTable, DigitTable)> = Lazy::new(build_digit_tables);

/// Builds both tables from one full reference year. 2024 is a leap year, so
/// the index covers Feb 29 keys too.
fn build_digit_tables() -> (DigitTable, DigitTable) {
    let mut threes: DigitTable = HashMap::new();
    let mut fours: DigitTable = HashMap::new();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1);
    let end = NaiveDate::from_ymd_opt(2024, 12, 31);
    let (Some(start), Some(end)) = (start, end) else {
        return (threes, fours);
    };

    let mut date = start;
    while date <= end {
        let annual = AnnualDate::of(date);
        let mmdd = format!("{:02}{:02}", date.month(), date.day());
        let ddmm = format!("{:02}{:02}", date.day(), date.month());

        let mut keys = vec![mmdd];
        if !keys.contains(&ddmm) {
            keys.push(ddmm);
        }

        for key in &keys {
            insert_unique(&mut fours, key.clone(), annual);
            let head = key[..3].to_string();
            let tail = key[1..].to_string();
            insert_unique(&mut threes, head.clone(), annual);
            if tail != head {
                insert_unique(&mut threes, tail, annual);
            }
        }

        date += Duration::days(1);
    }

    (threes, fours)
}

fn insert_unique(table: &mut DigitTable, key: String, annual: AnnualDate) {
    let entry = table.entry(key).or_default();
    if !entry.contains(&annual) {
        entry.push(annual);
    }
}
