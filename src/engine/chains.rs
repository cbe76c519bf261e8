//! Chain builder and resolver for multi-token input.
//!
//! Every internally-consistent ordered combination of the tokens'
//! classifications (no duplicate field kinds) forms a chain. A chain's
//! field-kind union selects exactly one of ten resolution rules; the chain is
//! normalized by sorting its elements on [`FieldKind`] first, so token order
//! in the input never changes which rule fires or how its arguments bind.
//!
//! Every rule returns plain candidate lists; impossible calendar combinations
//! yield empty lists, never errors, so one bad reading cannot abort the rest
//! of the suggestion list.

use bitflags::bitflags;
use chrono::{Datelike, Duration, NaiveDate};

use crate::datemath::{
    next_occurrence, next_weekday, nth_weekday_of_month, ordinal, previous_occurrence,
    previous_weekday, safe_annual_date, safe_local_date, weekday_from_iso, year_of_next,
    year_of_previous,
};
use crate::engine::classify::{classify, tokenize};
use crate::tables::{month_name, weekday_name};
use crate::{Candidate, Chain, Classification, FieldKind};

bitflags! {
    /// Union of the field kinds present in one chain.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct FieldSet: u8 {
        const YEAR = 1;
        const MONTH = 2;
        const DAY_OF_WEEK = 4;
        const NUMBER = 8;
    }
}

impl From<FieldKind> for FieldSet {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Year => FieldSet::YEAR,
            FieldKind::Month => FieldSet::MONTH,
            FieldKind::DayOfWeek => FieldSet::DAY_OF_WEEK,
            FieldKind::Number => FieldSet::NUMBER,
        }
    }
}

/// The closed set of resolvable field-kind combinations. Single-kind chains
/// cannot occur (chains need at least two tokens), and a few two-kind unions
/// (e.g. Year+DayOfWeek) have no sensible reading and resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signature {
    YearMonth,
    MonthDayOfWeek,
    YearMonthDayOfWeek,
    YearNumber,
    MonthNumber,
    YearMonthNumber,
    DayOfWeekNumber,
    YearDayOfWeekNumber,
    MonthDayOfWeekNumber,
    YearMonthDayOfWeekNumber,
}

impl Signature {
    fn from_set(set: FieldSet) -> Option<Self> {
        const YM: u8 = FieldSet::YEAR.bits() | FieldSet::MONTH.bits();
        const MD: u8 = FieldSet::MONTH.bits() | FieldSet::DAY_OF_WEEK.bits();
        const YMD: u8 = YM | FieldSet::DAY_OF_WEEK.bits();
        const YN: u8 = FieldSet::YEAR.bits() | FieldSet::NUMBER.bits();
        const MN: u8 = FieldSet::MONTH.bits() | FieldSet::NUMBER.bits();
        const YMN: u8 = YM | FieldSet::NUMBER.bits();
        const DN: u8 = FieldSet::DAY_OF_WEEK.bits() | FieldSet::NUMBER.bits();
        const YDN: u8 = YN | FieldSet::DAY_OF_WEEK.bits();
        const MDN: u8 = MD | FieldSet::NUMBER.bits();
        const YMDN: u8 = YMD | FieldSet::NUMBER.bits();

        match set.bits() {
            YM => Some(Signature::YearMonth),
            MD => Some(Signature::MonthDayOfWeek),
            YMD => Some(Signature::YearMonthDayOfWeek),
            YN => Some(Signature::YearNumber),
            MN => Some(Signature::MonthNumber),
            YMN => Some(Signature::YearMonthNumber),
            DN => Some(Signature::DayOfWeekNumber),
            YDN => Some(Signature::YearDayOfWeekNumber),
            MDN => Some(Signature::MonthDayOfWeekNumber),
            YMDN => Some(Signature::YearMonthDayOfWeekNumber),
            _ => None,
        }
    }
}

/// Entry point for mixed letter/digit input: tokenize, classify, build every
/// consistent chain, resolve each one.
///
/// A token with zero classifications, or a token count outside 2–4,
/// invalidates the whole expression.
pub(crate) fn resolve_multipart(input: &str, today: NaiveDate) -> Vec<Candidate> {
    let tokens = tokenize(input);
    if !(2..=4).contains(&tokens.len()) {
        return Vec::new();
    }

    let parts: Vec<Vec<Classification>> = tokens.iter().map(|t| classify(t, today)).collect();
    if parts.iter().any(Vec::is_empty) {
        return Vec::new();
    }

    build_chains(&parts).iter().flat_map(|chain| resolve_chain(chain, today)).collect()
}

/// Cross-product of the per-token classification sets, in input order,
/// keeping only combinations whose field kinds are pairwise distinct.
pub(crate) fn build_chains(parts: &[Vec<Classification>]) -> Vec<Chain> {
    let mut chains: Vec<Chain> = match parts.first() {
        Some(first) => first.iter().map(|c| vec![*c]).collect(),
        None => return Vec::new(),
    };

    for part in &parts[1..] {
        let mut extended = Vec::new();
        for chain in &chains {
            for cls in part {
                if chain.iter().all(|c| c.kind != cls.kind) {
                    let mut longer = chain.clone();
                    longer.push(*cls);
                    extended.push(longer);
                }
            }
        }
        chains = extended;
    }

    chains
}

pub(crate) fn resolve_chain(chain: &Chain, today: NaiveDate) -> Vec<Candidate> {
    let mut sorted = chain.clone();
    sorted.sort_by_key(|c| c.kind);
    let set = sorted.iter().fold(FieldSet::empty(), |acc, c| acc | c.kind.into());
    let Some(signature) = Signature::from_set(set) else {
        return Vec::new();
    };

    match (signature, sorted.as_slice()) {
        (Signature::YearMonth, [year, month]) => year_month(year.value, month.value, today),
        (Signature::MonthDayOfWeek, [month, dow]) => month_dow(month.value, dow.value, today),
        (Signature::YearMonthDayOfWeek, [year, month, dow]) => {
            year_month_dow(year.value, month.value, dow.value, None)
        }
        (Signature::YearNumber, [year, number]) => year_number(year.value, number.value),
        (Signature::MonthNumber, [month, number]) => month_number(month.value, number.value, today),
        (Signature::YearMonthNumber, [year, month, number]) => {
            year_month_number(year.value, month.value, number.value)
        }
        (Signature::DayOfWeekNumber, [dow, number]) => dow_number(dow.value, number.value, today),
        (Signature::YearDayOfWeekNumber, [year, dow, number]) => {
            year_dow_number(year.value, dow.value, number.value)
        }
        (Signature::MonthDayOfWeekNumber, [month, dow, number]) => {
            month_dow_number(month.value, dow.value, number.value, today)
        }
        (Signature::YearMonthDayOfWeekNumber, [year, month, dow, number]) => {
            year_month_dow_number(year.value, month.value, dow.value, number.value, None)
        }
        _ => Vec::new(),
    }
}

/// Year+Month: today's day-of-month transplanted into that year and month,
/// degrading the day when the month is shorter.
fn year_month(year: i32, month: i32, today: NaiveDate) -> Vec<Candidate> {
    let (Some(name), Some(date)) = (
        month_name(month as u32),
        safe_local_date(year, month as u32, today.day()),
    ) else {
        return Vec::new();
    };
    vec![Candidate::new(format!("Today in {name} {year}"), date)]
}

/// Month+DayOfWeek: the 1st–5th occurrences of that weekday, replicated
/// across the previous and next year containing the month — plus the current
/// year when it sits exactly between them.
fn month_dow(month: i32, dow: i32, today: NaiveDate) -> Vec<Candidate> {
    let previous = year_of_previous(month as u32, today);
    let next = year_of_next(month as u32, today);

    let mut out = year_month_dow(previous, month, dow, Some("last"));
    if next - previous == 2 {
        out.extend(year_month_dow(today.year(), month, dow, Some("current")));
    }
    out.extend(year_month_dow(next, month, dow, Some("next")));
    out
}

/// Year+Month+DayOfWeek: the 1st through 5th occurrence of the weekday in
/// that month. The fifth falls back to the last occurrence when absent.
fn year_month_dow(year: i32, month: i32, dow: i32, year_word: Option<&str>) -> Vec<Candidate> {
    let (Some(weekday), Some(name)) = (weekday_from_iso(dow), month_name(month as u32)) else {
        return Vec::new();
    };

    ["First", "Second", "Third", "Fourth", "Fifth"]
        .iter()
        .zip(1u32..)
        .filter_map(|(word, n)| {
            let date = nth_weekday_of_month(year, month as u32, n, weekday)?;
            let label = match year_word {
                Some(rel) => format!("{word} {} of {rel} {name}", weekday_name(weekday)),
                None => format!("{word} {} of {name} {year}", weekday_name(weekday)),
            };
            Some(Candidate::new(label, date))
        })
        .collect()
}

/// Year+Number: the number as a day-of-year ordinal, counted from both ends.
fn year_number(year: i32, number: i32) -> Vec<Candidate> {
    let length = if crate::datemath::is_leap_year(year) { 366 } else { 365 };
    if number < 1 || number > length {
        return Vec::new();
    }

    let (Some(first), Some(last)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Vec::new();
    };

    vec![
        Candidate::with_priority(
            format!("The {} day of {year}", ordinal(number)),
            first + Duration::days(number as i64 - 1),
            10,
        ),
        Candidate::new(
            format!("The {}-to-last day of {year}", ordinal(number)),
            last - Duration::days(number as i64 - 1),
        ),
    ]
}

/// Month+Number: the number as a day-of-month, resolved to its previous and
/// next strict occurrence (a degraded day means the literal day is
/// impossible, so nothing is suggested).
fn month_number(month: i32, number: i32, today: NaiveDate) -> Vec<Candidate> {
    if number < 1 {
        return Vec::new();
    }
    let (Some(name), Some(annual)) = (month_name(month as u32), safe_annual_date(month as u32, number as u32))
    else {
        return Vec::new();
    };
    if annual.day < number as u32 {
        return Vec::new();
    }

    let (Some(prev), Some(next)) = (
        previous_occurrence(annual, today, true),
        next_occurrence(annual, today, true),
    ) else {
        return Vec::new();
    };

    let mut out = vec![
        Candidate::new(format!("Last {name} {}", ordinal(number)), prev),
        Candidate::new(format!("Next {name} {}", ordinal(number)), next),
    ];
    if next.year() - prev.year() == 2 {
        out.push(Candidate::new(format!("Current {name} {}", ordinal(number)), today));
    }
    out
}

/// Year+Month+Number: a literal date; invalid combinations suggest nothing.
fn year_month_number(year: i32, month: i32, number: i32) -> Vec<Candidate> {
    if number < 1 {
        return Vec::new();
    }
    match NaiveDate::from_ymd_opt(year, month as u32, number as u32) {
        Some(date) => vec![Candidate::plain(date)],
        None => Vec::new(),
    }
}

/// DayOfWeek+Number: the number counts weeks in both directions.
fn dow_number(dow: i32, number: i32, today: NaiveDate) -> Vec<Candidate> {
    let Some(weekday) = weekday_from_iso(dow) else {
        return Vec::new();
    };
    if number < 1 {
        return Vec::new();
    }

    let name = weekday_name(weekday);
    let plural = if number == 1 { "" } else { "s" };
    let back = previous_weekday(today, weekday) - Duration::weeks(number as i64 - 1);
    let ahead = next_weekday(today, weekday) + Duration::weeks(number as i64 - 1);

    vec![
        Candidate::new(format!("{number} {name}{plural} ago"), back),
        Candidate::new(format!("{number} {name}{plural} from now"), ahead),
    ]
}

/// Year+DayOfWeek+Number: the Nth (and Nth-to-last) such weekday of the
/// year. Walks in from just outside the year's boundary and keeps the result
/// only if it actually lands inside the target year.
fn year_dow_number(year: i32, dow: i32, number: i32) -> Vec<Candidate> {
    let Some(weekday) = weekday_from_iso(dow) else {
        return Vec::new();
    };
    if number < 1 || number > 53 {
        return Vec::new();
    }

    let name = weekday_name(weekday);
    let mut out = Vec::new();

    if let Some(anchor) = NaiveDate::from_ymd_opt(year - 1, 12, 24) {
        let forward = next_weekday(anchor, weekday) + Duration::weeks(number as i64);
        if forward.year() == year {
            out.push(Candidate::new(format!("The {} {name} of {year}", ordinal(number)), forward));
        }
    }

    if let Some(anchor) = NaiveDate::from_ymd_opt(year + 1, 1, 8) {
        let backward = previous_weekday(anchor, weekday) - Duration::weeks(number as i64);
        if backward.year() == year {
            out.push(Candidate::new(
                format!("The {}-to-last {name} of {year}", ordinal(number)),
                backward,
            ));
        }
    }

    out
}

/// Month+DayOfWeek+Number: Nth weekday of that month in the previous/next
/// (and possibly current) year containing it.
fn month_dow_number(month: i32, dow: i32, number: i32, today: NaiveDate) -> Vec<Candidate> {
    if number < 1 || number > 5 {
        return Vec::new();
    }

    let previous = year_of_previous(month as u32, today);
    let next = year_of_next(month as u32, today);

    let mut out = year_month_dow_number(previous, month, dow, number, Some("last"));
    if next - previous == 2 {
        out.extend(year_month_dow_number(today.year(), month, dow, number, Some("current")));
    }
    out.extend(year_month_dow_number(next, month, dow, number, Some("next")));
    out
}

/// Year+Month+DayOfWeek+Number: a single Nth-weekday-of-month resolution.
/// Five means "last", matching [`nth_weekday_of_month`].
fn year_month_dow_number(
    year: i32,
    month: i32,
    dow: i32,
    number: i32,
    year_word: Option<&str>,
) -> Vec<Candidate> {
    let (Some(weekday), Some(name)) = (weekday_from_iso(dow), month_name(month as u32)) else {
        return Vec::new();
    };
    let word = match number {
        1 => "First",
        2 => "Second",
        3 => "Third",
        4 => "Fourth",
        5 => "Last",
        _ => return Vec::new(),
    };

    let Some(date) = nth_weekday_of_month(year, month as u32, number as u32, weekday) else {
        return Vec::new();
    };

    let label = match year_word {
        Some(rel) => format!("{word} {} of {rel} {name}", weekday_name(weekday)),
        None => format!("{word} {} of {name} {year}", weekday_name(weekday)),
    };
    vec![Candidate::new(label, date)]
}
