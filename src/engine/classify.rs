//! Splits raw input into tokens and classifies each token into zero or more
//! (value, field-kind) interpretations.
//!
//! A token is a maximal run of Latin letters or of digits; everything else
//! separates tokens. Classification is deliberately generous — `"12"` is a
//! month, a number, *and* a 2-digit year — and ambiguity is resolved later by
//! the chain builder.

use chrono::{Datelike, NaiveDate};

use crate::tables::{MONTH_NAMES, WEEKDAY_NAMES};
use crate::{Classification, FieldKind, Token};

pub(crate) fn tokenize(input: &str) -> Vec<Token> {
    regex!(r"[A-Za-z]+|[0-9]+")
        .find_iter(input)
        .map(|m| Token { text: m.as_str().to_string() })
        .collect()
}

pub(crate) fn classify(token: &Token, today: NaiveDate) -> Vec<Classification> {
    if token.text.chars().all(|c| c.is_ascii_alphabetic()) {
        classify_word(&token.text)
    } else {
        classify_digits(&token.text, today)
    }
}

fn classify_word(piece: &str) -> Vec<Classification> {
    let lower = piece.to_lowercase();
    let mut out = Vec::new();

    for (i, name) in MONTH_NAMES.iter().enumerate() {
        if name.to_lowercase().contains(&lower) {
            out.push(Classification::new(i as i32 + 1, FieldKind::Month));
        }
    }

    // Fragments of the literal word "day" match every weekday name, so they
    // get dedicated readings instead: "d" is Wednesday and "a" is Saturday,
    // the two days with no other single-letter code.
    if !"day".contains(&lower) {
        for (name, iso) in WEEKDAY_NAMES {
            if name.to_lowercase().contains(&lower) {
                out.push(Classification::new(iso as i32, FieldKind::DayOfWeek));
            }
        }
    } else if lower == "d" {
        out.push(Classification::new(3, FieldKind::DayOfWeek));
    } else if lower == "a" {
        out.push(Classification::new(6, FieldKind::DayOfWeek));
    }

    out
}

fn classify_digits(piece: &str, today: NaiveDate) -> Vec<Classification> {
    let Ok(value) = piece.parse::<i32>() else {
        return Vec::new();
    };
    let mut out = Vec::new();

    match piece.len() {
        1 => {
            for month in 1..=12 {
                if format!("{month:02}").contains(piece) {
                    out.push(Classification::new(month, FieldKind::Month));
                }
            }
            out.push(Classification::new(value, FieldKind::Number));
        }
        2 => {
            if (1..=12).contains(&value) {
                out.push(Classification::new(value, FieldKind::Month));
            }
            out.push(Classification::new(rolling_year(value, today.year()), FieldKind::Year));
            out.push(Classification::new(value, FieldKind::Number));
        }
        3 => out.push(Classification::new(value, FieldKind::Number)),
        4 => out.push(Classification::new(value, FieldKind::Year)),
        _ => {}
    }

    out
}

/// Resolves a 2-digit year within a rolling 100-year window anchored 39 years
/// before the current year, covering roughly the last 39 and next 61 years.
/// The anchor offset is observable behavior; do not "simplify" it.
fn rolling_year(value: i32, current_year: i32) -> i32 {
    let anchor = current_year - 39;
    anchor + (value + 100 - anchor).rem_euclid(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    fn classify_text(text: &str) -> Vec<Classification> {
        classify(&Token { text: text.to_string() }, today())
    }

    #[test]
    fn tokenizer_splits_letter_and_digit_runs() {
        let tokens = tokenize("jul14");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "jul");
        assert_eq!(tokens[1].text, "14");

        let tokens = tokenize("tue, 3 pm");
        assert_eq!(
            tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
            vec!["tue", "3", "pm"]
        );
    }

    #[test]
    fn month_fragments_match_by_containment() {
        let kinds = classify_text("jul");
        assert_eq!(kinds, vec![Classification::new(7, FieldKind::Month)]);

        // "r" occurs in eight month names and in Thursday/Friday/Saturday.
        let r = classify_text("r");
        assert!(r.contains(&Classification::new(1, FieldKind::Month)));
        assert!(r.contains(&Classification::new(4, FieldKind::DayOfWeek)));
        assert!(r.contains(&Classification::new(6, FieldKind::DayOfWeek)));
    }

    #[test]
    fn day_fragments_use_dedicated_weekday_codes() {
        assert_eq!(classify_text("d"), vec![Classification::new(3, FieldKind::DayOfWeek)]);
        let a = classify_text("a");
        assert!(a.contains(&Classification::new(6, FieldKind::DayOfWeek)));
        // "a" also appears in January..May and more, as a month fragment.
        assert!(a.contains(&Classification::new(1, FieldKind::Month)));
        // "da", "ay", "day" match nothing but months containing them (none).
        assert_eq!(classify_text("ay"), vec![Classification::new(5, FieldKind::Month)]);
        assert!(classify_text("day").is_empty());
    }

    #[test]
    fn single_digit_matches_padded_months() {
        let one = classify_text("1");
        let months: Vec<i32> =
            one.iter().filter(|c| c.kind == FieldKind::Month).map(|c| c.value).collect();
        assert_eq!(months, vec![1, 10, 11, 12]);
        assert!(one.contains(&Classification::new(1, FieldKind::Number)));

        let zero = classify_text("0");
        let months: Vec<i32> =
            zero.iter().filter(|c| c.kind == FieldKind::Month).map(|c| c.value).collect();
        assert_eq!(months, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn two_digits_fan_out_to_month_year_number() {
        let twelve = classify_text("12");
        assert_eq!(
            twelve,
            vec![
                Classification::new(12, FieldKind::Month),
                Classification::new(2012, FieldKind::Year),
                Classification::new(12, FieldKind::Number),
            ]
        );

        let ninety = classify_text("90");
        assert!(!ninety.iter().any(|c| c.kind == FieldKind::Month));
        assert!(ninety.contains(&Classification::new(1990, FieldKind::Year)));
    }

    #[test]
    fn rolling_year_window_splits_at_the_anchor() {
        // Anchor for 2024 is 1985: values 85..=99 are 19xx, 00..=84 are 20xx.
        assert_eq!(rolling_year(85, 2024), 1985);
        assert_eq!(rolling_year(99, 2024), 1999);
        assert_eq!(rolling_year(0, 2024), 2000);
        assert_eq!(rolling_year(84, 2024), 2084);
        assert_eq!(rolling_year(24, 2024), 2024);
    }

    #[test]
    fn longer_digit_runs() {
        assert_eq!(classify_text("123"), vec![Classification::new(123, FieldKind::Number)]);
        assert_eq!(classify_text("1994"), vec![Classification::new(1994, FieldKind::Year)]);
        assert!(classify_text("12345").is_empty());
    }
}
