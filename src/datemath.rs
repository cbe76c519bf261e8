//! Calendar arithmetic on Gregorian dates and recurring annual dates.
//!
//! Everything here is a pure function of its arguments; "today" always comes
//! in as an explicit base date. The occurrence searches distinguish *strict*
//! mode (skip years where the annual date does not exist, so Feb 29 never
//! silently becomes Feb 28 or Mar 1) from clamping mode (degrade to the
//! nearest valid day in the chosen year).

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// A recurring (month, day) pair without a year, e.g. a birthday.
///
/// `day` may be invalid in some years (Feb 29); construction only requires
/// that *some* year contains the date. Ordering is by (month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnualDate {
    pub month: u32,
    pub day: u32,
}

impl AnnualDate {
    /// Returns `None` unless the (month, day) pair exists in at least one
    /// year (so `(2, 29)` is fine, `(2, 30)` is not).
    pub fn new(month: u32, day: u32) -> Option<Self> {
        let max = match month {
            2 => 29,
            m => days_in_month(2001, m),
        };
        if !(1..=12).contains(&month) || day == 0 || day > max {
            return None;
        }
        Some(AnnualDate { month, day })
    }

    pub fn of(date: NaiveDate) -> Self {
        AnnualDate { month: date.month(), day: date.day() }
    }

    pub fn is_valid_in(&self, year: i32) -> bool {
        self.day <= days_in_month(year, self.month)
    }

    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    /// The date in `year`, with the day clamped down to the month's length
    /// when necessary (Feb 29 in a common year becomes Feb 28).
    pub fn in_year_clamped(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day.min(days_in_month(year, self.month)))
    }
}

/// The year of the most recent past occurrence of a month: this year if the
/// month already passed, otherwise last year. A tie (base is *in* that month)
/// counts as not yet passed.
pub fn year_of_previous(month: u32, base: NaiveDate) -> i32 {
    if base.month() > month { base.year() } else { base.year() - 1 }
}

/// Mirror of [`year_of_previous`]: this year if the month is still ahead,
/// otherwise next year.
pub fn year_of_next(month: u32, base: NaiveDate) -> i32 {
    if base.month() < month { base.year() } else { base.year() + 1 }
}

/// Nearest occurrence of `date` strictly before `base`.
///
/// In strict mode, years where the annual date is invalid are skipped
/// entirely; otherwise the day is clamped within the first candidate year.
/// Returns `None` only if no valid year is found within the search bound.
pub fn previous_occurrence(date: AnnualDate, base: NaiveDate, strict: bool) -> Option<NaiveDate> {
    let mut year = base.year();
    if AnnualDate::of(base) <= date {
        year -= 1;
    }
    if !strict {
        return date.in_year_clamped(year);
    }
    // Feb 29 recurs at least every 8 years.
    for _ in 0..8 {
        if date.is_valid_in(year) {
            return date.in_year(year);
        }
        year -= 1;
    }
    None
}

/// Nearest occurrence of `date` strictly after `base`. See
/// [`previous_occurrence`] for the strict/clamping distinction.
pub fn next_occurrence(date: AnnualDate, base: NaiveDate, strict: bool) -> Option<NaiveDate> {
    let mut year = base.year();
    if AnnualDate::of(base) >= date {
        year += 1;
    }
    if !strict {
        return date.in_year_clamped(year);
    }
    for _ in 0..8 {
        if date.is_valid_in(year) {
            return date.in_year(year);
        }
        year += 1;
    }
    None
}

/// The annual date with the given month and the largest day `<= day` that is
/// valid in some year. Tolerates impossible day values from fuzzy input.
pub fn safe_annual_date(month: u32, day: u32) -> Option<AnnualDate> {
    (1..=day.max(1)).rev().find_map(|d| AnnualDate::new(month, d))
}

/// Same degradation as [`safe_annual_date`] for a fully specified year.
pub fn safe_local_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day.max(1)).rev().find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}

/// The nearest `weekday` strictly before `base` (a week back when `base`
/// itself falls on that weekday).
pub fn previous_weekday(base: NaiveDate, weekday: Weekday) -> NaiveDate {
    let diff = (base.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
    let diff = if diff == 0 { 7 } else { diff };
    base - Duration::days(diff as i64)
}

/// The nearest `weekday` strictly after `base`.
pub fn next_weekday(base: NaiveDate, weekday: Weekday) -> NaiveDate {
    let diff = (weekday.num_days_from_monday() + 7 - base.weekday().num_days_from_monday()) % 7;
    let diff = if diff == 0 { 7 } else { diff };
    base + Duration::days(diff as i64)
}

/// The `n`th occurrence of `weekday` in the given month, 1-based. `n == 5`
/// means "the last occurrence", whether that is the fourth or the fifth.
pub fn nth_weekday_of_month(year: i32, month: u32, n: u32, weekday: Weekday) -> Option<NaiveDate> {
    if !(1..=5).contains(&n) {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (weekday.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7;
    let len = days_in_month(year, month);
    let day = if n == 5 {
        1 + offset + 7 * ((len - 1 - offset) / 7)
    } else {
        1 + offset + 7 * (n - 1)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn weekday_from_iso(n: i32) -> Option<Weekday> {
    match n {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `12th`, `13th`, ..., `21st`, ...
pub fn ordinal(n: i32) -> String {
    let suffix = if (11..=13).contains(&(n.abs() % 100)) {
        "th"
    } else {
        match n.abs() % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}
