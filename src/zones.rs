//! Time zone lookup for autocomplete.
//!
//! Two query styles share one entry point. A time-shaped query ("7", "7:45",
//! "7pm") finds the zones where the wall clock currently reads that time,
//! within a tolerance. Anything else fuzzy-matches zone names. Empty input
//! just echoes the caller's default zone.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::{TZ_VARIANTS, Tz};

/// One zone hit, label formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ZoneCandidate {
    pub label: String,
    pub id: &'static str,
}

pub(crate) fn search(input: &str, now: DateTime<Utc>, default_zone: Tz) -> Vec<ZoneCandidate> {
    let input = input.trim();
    if input.is_empty() {
        let local = now.with_timezone(&default_zone);
        return vec![ZoneCandidate {
            label: format!("Default zone: {} ({})", default_zone.name(), local.format("%H:%M")),
            id: default_zone.name(),
        }];
    }

    if let Some(captures) = regex!(r"^(\d{1,2})(?::(\d{2}))? ?([ap])?\.?m?\.?$").captures(&input.to_lowercase()) {
        let mut hour: u32 = captures[1].parse().unwrap_or(99);
        let minute = captures.get(2).map(|m| m.as_str().parse::<u32>().unwrap_or(99));
        let marker = captures.get(3).map(|m| m.as_str().to_string());
        match marker.as_deref() {
            Some("a") if hour == 12 => hour = 0,
            Some("p") if hour != 12 => hour += 12,
            _ => {}
        }
        if hour < 24 && minute.is_none_or(|m| m < 60) {
            return by_current_time(hour, minute, marker.is_none(), now);
        }
    }

    by_name(input, now)
}

/// Alias families that shadow a real `Area/Location` zone. Time scans skip
/// them so every hit appears once.
fn is_canonical(id: &str) -> bool {
    match id.split_once('/') {
        Some((area, _)) => !matches!(area, "Etc" | "US" | "Canada" | "Chile" | "Brazil" | "Mexico"),
        None => false,
    }
}

/// Seconds since local midnight, window membership with midnight wraparound.
fn in_window(t: u32, min: u32, max: u32) -> bool {
    if min <= max { t > min && t < max } else { t > min || t < max }
}

/// Zones whose current wall clock reads the given time. An exact minute gets
/// a seven-and-a-half-minute tolerance either side; a bare hour accepts
/// ten past down to ten to, roughly. Without an am/pm marker the opposite
/// half of the day is scanned too, and labels switch to 12-hour form to
/// keep the two halves apart.
fn by_current_time(hour: u32, minute: Option<u32>, both_halves: bool, now: DateTime<Utc>) -> Vec<ZoneCandidate> {
    let mut hours = vec![hour];
    if both_halves {
        hours.push((hour + 12) % 24);
    }

    let mut out = Vec::new();
    for zone in TZ_VARIANTS {
        if !is_canonical(zone.name()) {
            continue;
        }
        let local = now.with_timezone(&zone);
        let t = local.num_seconds_from_midnight();
        let hit = hours.iter().any(|&h| {
            let (min, max) = match minute {
                Some(m) => {
                    let target = h * 3600 + m * 60;
                    ((target + 86_400 - 450) % 86_400, (target + 450) % 86_400)
                }
                None => (((h + 23) % 24) * 3600 + 50 * 60, ((h + 1) % 24) * 3600 + 10 * 60),
            };
            in_window(t, min, max)
        });
        if hit {
            let clock = if both_halves {
                local.format("%-I:%M %p").to_string()
            } else {
                local.format("%H:%M").to_string()
            };
            out.push(ZoneCandidate {
                label: format!("{} ({clock})", zone.name()),
                id: zone.name(),
            });
        }
    }

    out.sort_by(|a, b| a.id.cmp(b.id));
    out
}

/// Where `query` first matches inside `name`: substring matches outrank
/// subsequence matches, earlier positions outrank later ones.
fn name_match(query: &str, name: &str) -> Option<(i32, usize)> {
    if let Some(idx) = name.find(query) {
        return Some((2, idx));
    }
    let mut pending = query.chars();
    let mut wanted = pending.next()?;
    let mut first = None;
    for (idx, c) in name.char_indices() {
        if c == wanted {
            first.get_or_insert(idx);
            match pending.next() {
                Some(next) => wanted = next,
                None => return Some((1, first.unwrap_or(idx))),
            }
        }
    }
    None
}

fn by_name(input: &str, now: DateTime<Utc>) -> Vec<ZoneCandidate> {
    let query: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == '_' || *c == '/')
        .collect();
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<(i32, usize, ZoneCandidate)> = Vec::new();
    for zone in TZ_VARIANTS {
        let Some((level, idx)) = name_match(&query, &zone.name().to_lowercase()) else {
            continue;
        };
        let local = now.with_timezone(&zone);
        hits.push((
            level,
            idx,
            ZoneCandidate {
                label: format!("{} ({})", zone.name(), local.format("%H:%M")),
                id: zone.name(),
            },
        ));
    }

    hits.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.id.cmp(b.2.id)));
    hits.into_iter().map(|(_, _, candidate)| candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        // 10:30 UTC; Stockholm reads 11:30, Tokyo 19:30.
        Utc.with_ymd_and_hms(2024, 2, 15, 10, 30, 0).unwrap()
    }

    fn ids(out: &[ZoneCandidate]) -> Vec<&'static str> {
        out.iter().map(|c| c.id).collect()
    }

    #[test]
    fn empty_input_echoes_the_default_zone() {
        let out = search("", now(), chrono_tz::Europe::Stockholm);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, "Default zone: Europe/Stockholm (11:30)");
    }

    #[test]
    fn exact_minute_query() {
        let out = search("11:30", now(), chrono_tz::UTC);
        assert!(ids(&out).contains(&"Europe/Stockholm"));
        assert!(!ids(&out).contains(&"Asia/Tokyo"));
        // No marker: the label disambiguates the half of the day.
        assert!(out.iter().any(|c| c.label == "Europe/Stockholm (11:30 AM)"));
        // 23:30 zones count too. Tokyo at 19:30 does not, but a +13 zone does.
        assert!(ids(&out).contains(&"Pacific/Auckland"));
    }

    #[test]
    fn marker_pins_one_half_of_the_day() {
        let out = search("11:30 pm", now(), chrono_tz::UTC);
        assert!(!ids(&out).contains(&"Europe/Stockholm"));
        assert!(ids(&out).contains(&"Pacific/Auckland"));
        assert!(out.iter().any(|c| c.label == "Pacific/Auckland (23:30)"));
    }

    #[test]
    fn bare_hour_uses_the_wide_window() {
        // Stockholm reads 11:30, inside neither 10:50-12:10? It is inside.
        let out = search("11", now(), chrono_tz::UTC);
        assert!(ids(&out).contains(&"Europe/Stockholm"));
        // 19:30 is not near 11 or 23.
        assert!(!ids(&out).contains(&"Asia/Tokyo"));
        let out = search("7 pm", now(), chrono_tz::UTC);
        assert!(ids(&out).contains(&"Asia/Tokyo"));
    }

    #[test]
    fn minute_window_is_exclusive() {
        // India reads 16:00 exactly; 16:07 is 420 seconds off, 16:08 is 480.
        let out = search("16:07", now(), chrono_tz::UTC);
        assert!(ids(&out).contains(&"Asia/Kolkata"));
        let out = search("16:08", now(), chrono_tz::UTC);
        assert!(!ids(&out).contains(&"Asia/Kolkata"));
    }

    #[test]
    fn time_scan_skips_alias_families() {
        let out = search("11:30", now(), chrono_tz::UTC);
        assert!(!ids(&out).iter().any(|id| id.starts_with("Etc/")));
        assert!(!ids(&out).iter().any(|id| !id.contains('/')));
    }

    #[test]
    fn name_query_prefers_substrings_over_subsequences() {
        let out = search("stock", now(), chrono_tz::UTC);
        assert_eq!(out[0].id, "Europe/Stockholm");
        assert_eq!(out[0].label, "Europe/Stockholm (11:30)");
    }

    #[test]
    fn name_query_falls_back_to_subsequences() {
        // No zone id contains "nwyrk" literally.
        let out = search("nwyrk", now(), chrono_tz::UTC);
        assert!(ids(&out).contains(&"America/New_York"));
    }

    #[test]
    fn name_query_keeps_aliases() {
        let out = search("hongkong", now(), chrono_tz::UTC);
        assert!(ids(&out).contains(&"Hongkong"));
    }

    #[test]
    fn punctuation_is_stripped_from_name_queries() {
        let out = search("new york", now(), chrono_tz::UTC);
        assert!(ids(&out).contains(&"America/New_York"));
    }
}
