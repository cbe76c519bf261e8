use chrono::NaiveDate;

#[macro_use]
mod macros;
mod api;
mod datemath;
mod engine;
mod error;
mod parse;
mod tables;
mod zones;

pub use api::{Context, Suggestion, ZoneSuggestion, suggest, suggest_with, suggest_zones};
pub use error::UserInputError;
pub use parse::resolve_instant;

// --- Internal types ---------------------------------------------------------

/// The semantic role a classified token can play inside a chain.
///
/// The derived ordering (`Year < Month < DayOfWeek < Number`) is load-bearing:
/// chains are normalized by sorting their elements on it before dispatch, so
/// token order in the input never affects which resolution rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum FieldKind {
    Year,
    Month,
    DayOfWeek,
    Number,
}

/// One lexical unit of user input: a maximal run of Latin letters or of
/// digits. Any other character separates tokens and belongs to none.
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub text: String,
}

/// One interpretation of a [`Token`]. A token may carry several of these
/// (e.g. `"12"` is a month, a plain number, and a 2-digit year).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Classification {
    pub value: i32,
    pub kind: FieldKind,
}

impl Classification {
    pub fn new(value: i32, kind: FieldKind) -> Self {
        Classification { value, kind }
    }
}

/// One fully-typed interpretation of a multi-token input: exactly one
/// classification per token, with pairwise-distinct field kinds.
pub(crate) type Chain = Vec<Classification>;

/// One candidate result produced by a resolver, before ranking.
///
/// `comment` is the human-readable half of the display label; candidates
/// without a comment display as the bare ISO date. Higher `priority` wins.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub comment: Option<String>,
    pub date: NaiveDate,
    pub priority: i32,
}

impl Candidate {
    pub fn new(comment: impl Into<String>, date: NaiveDate) -> Self {
        Candidate { comment: Some(comment.into()), date, priority: 0 }
    }

    pub fn with_priority(comment: impl Into<String>, date: NaiveDate, priority: i32) -> Self {
        Candidate { comment: Some(comment.into()), date, priority }
    }

    pub fn plain(date: NaiveDate) -> Self {
        Candidate { comment: None, date, priority: 0 }
    }

    /// Display label: `"{comment} (yyyy-mm-dd)"`, or the bare ISO date.
    pub fn label(&self) -> String {
        match &self.comment {
            Some(comment) => format!("{comment} ({})", self.date.format("%Y-%m-%d")),
            None => self.date.format("%Y-%m-%d").to_string(),
        }
    }
}
