//! The suggestion pipeline.
//!
//! Input flows through three stages. The resolver looks at the overall shape
//! of the input (empty, digits, signed number, letters, or a mix) and hands
//! it to the matching specialist, each of which emits zero or more dated
//! candidates. Multi-token input additionally goes through classification
//! and chain building, where every token gets its possible field readings
//! and every consistent combination of readings gets its own resolution
//! rule. Ranking then orders, deduplicates and caps the combined output.

#[path = "engine/chains.rs"]
mod chains;
#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/digits.rs"]
mod digits;
#[path = "engine/rank.rs"]
mod rank;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/text.rs"]
mod text;

pub(crate) use resolve::resolve;
