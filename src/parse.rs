//! Strict parsing of times, dates and zoned instants.
//!
//! Unlike the suggestion engine, nothing here guesses. Input either matches
//! one of the accepted forms or comes back as a [`UserInputError`] with the
//! offending text, ready to show to the user.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};

use crate::api::Context;
use crate::error::UserInputError;

/// Keyword dates, keyed by their first two characters. Two characters are
/// enough to tell every entry apart ("tomorrow" is the exception, handled
/// separately because "to" already means today).
const KEYWORDS: [(&str, &str); 11] = [
    ("su", "sunday"),
    ("mo", "monday"),
    ("tu", "tuesday"),
    ("we", "wednesday"),
    ("th", "thursday"),
    ("fr", "friday"),
    ("sa", "saturday"),
    ("to", "today"),
    ("ye", "yesterday"),
    ("ub", "ubermorgen"),
    ("üb", "übermorgen"),
];

/// Parses `h`, `h:mm`, `h:mm:ss`, each optionally followed by an am/pm
/// marker in any of its usual spellings (`a`, `am`, `a.m.`, ...).
pub(crate) fn parse_time(input: &str) -> Result<NaiveTime, UserInputError> {
    let lowered = input.trim().to_lowercase();
    let captures = regex!(r"^(\d{1,2})(?::(\d{2})(?::(\d{2}))?)? ?(?:([ap])\.?m?\.?)?$")
        .captures(&lowered)
        .ok_or_else(|| UserInputError::InvalidTime(input.trim().to_string()))?;

    let mut hour: u32 = captures[1].parse().unwrap_or(99);
    let minute: u32 = captures.get(2).map_or(Ok(0), |m| m.as_str().parse()).unwrap_or(99);
    let second: u32 = captures.get(3).map_or(Ok(0), |m| m.as_str().parse()).unwrap_or(99);

    match captures.get(4).map(|m| m.as_str()) {
        Some("a") if hour == 12 => hour = 0,
        Some("p") if hour != 12 => hour += 12,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| UserInputError::InvalidTime(input.trim().to_string()))
}

/// Parses a date the user typed next to a time: `[yyyy-]m-dd` with `-`, `/`
/// or `.` separators, a keyword (possibly abbreviated), or a signed day
/// offset. Keywords and offsets are relative to `now`'s calendar day.
pub(crate) fn parse_date(input: &str, now: DateTime<Tz>) -> Result<NaiveDate, UserInputError> {
    let trimmed = input.trim();
    let lowered = trimmed.to_lowercase();
    let today = now.date_naive();
    let invalid = || UserInputError::InvalidDate(trimmed.to_string());

    if let Some(captures) = regex!(r"^(?:(\d{4})[-/.])?(\d{1,2})[-/.](\d{2})$").captures(&lowered) {
        let year = captures.get(1).map_or(Ok(today.year()), |m| m.as_str().parse()).map_err(|_| invalid())?;
        let month: u32 = captures[2].parse().map_err(|_| invalid())?;
        let day: u32 = captures[3].parse().map_err(|_| invalid())?;
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
    }

    // Three characters minimum, so "to"/"tom" stay unambiguous against the
    // keyword table below.
    if (3..=8).contains(&lowered.chars().count()) && "tomorrow".starts_with(&lowered) {
        return today.checked_add_signed(Duration::days(1)).ok_or_else(invalid);
    }

    let mut chars = lowered.chars();
    let prefix: String = chars.by_ref().take(2).collect();
    if let Some((_, word)) = KEYWORDS.iter().find(|(key, _)| **key == prefix) {
        if !word.starts_with(&lowered) {
            return Err(invalid());
        }
        let offset = match *word {
            "today" => 0,
            "yesterday" => -1,
            "ubermorgen" | "übermorgen" => 2,
            weekday => {
                let target = crate::tables::WEEKDAY_NAMES
                    .iter()
                    .find(|(name, _)| name.to_lowercase() == weekday)
                    .map(|(_, iso)| *iso)
                    .ok_or_else(invalid)?;
                // Maps each weekday into [today − 1, today + 5].
                ((target as i64 - today.weekday().number_from_monday() as i64 + 8) % 7) - 1
            }
        };
        return today.checked_add_signed(Duration::days(offset)).ok_or_else(invalid);
    }

    if regex!(r"^([-+]\d+|0)$").is_match(&lowered) {
        let offset: i64 = lowered.parse().map_err(|_| invalid())?;
        return today.checked_add_signed(Duration::days(offset)).ok_or_else(invalid);
    }

    Err(invalid())
}

fn dst_active(now: &DateTime<Tz>) -> bool {
    !now.offset().dst_offset().is_zero()
}

/// Combines a parsed time and optional date into a zoned instant.
///
/// With no date, the time means "the next upcoming one", with an hour of
/// grace: a time up to an hour in the past still counts as today. Ambiguous
/// wall-clock times (the repeated hour when clocks fall back) are settled by
/// `daylight_saving`, defaulting to whichever side of the transition the
/// zone is currently on. Skipped wall-clock times are an error.
pub(crate) fn instant_of(
    time: &str,
    date: Option<&str>,
    daylight_saving: Option<bool>,
    zone: Tz,
    now: DateTime<Utc>,
) -> Result<DateTime<Tz>, UserInputError> {
    let local_time = parse_time(time)?;
    let zoned_now = now.with_timezone(&zone);

    let local_date = match date {
        Some(date) => parse_date(date, zoned_now)?,
        None => {
            let local_now = zoned_now.naive_local() - Duration::hours(1);
            let date = local_now.date();
            if date.and_time(local_time) < local_now {
                date + Duration::days(1)
            } else {
                date
            }
        }
    };

    let local = local_date.and_time(local_time);
    let as_dst = daylight_saving.unwrap_or_else(|| dst_active(&zoned_now));
    match zone.from_local_datetime(&local) {
        chrono::LocalResult::None => Err(UserInputError::SkippedTime(local, zone.to_string())),
        chrono::LocalResult::Single(instant) => Ok(instant),
        chrono::LocalResult::Ambiguous(early, late) => Ok(if as_dst { early } else { late }),
    }
}

/// Resolves a user-typed time, optional date and optional time zone id into
/// a zoned instant.
pub fn resolve_instant(
    time: &str,
    date: Option<&str>,
    timezone: Option<&str>,
    daylight_saving: Option<bool>,
    ctx: &Context,
) -> Result<DateTime<Tz>, UserInputError> {
    let zone = match timezone {
        Some(id) => id
            .parse::<Tz>()
            .map_err(|_| UserInputError::UnknownTimeZone(id.to_string()))?,
        None => ctx.zone,
    };
    instant_of(time, date, daylight_saving, zone, ctx.now)
}
