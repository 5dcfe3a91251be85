//! Pattern matchers
//!
//! Each matcher scans the whole password and reports every span it can
//! explain. Matches from different matchers, and from the same matcher, may
//! overlap; choosing between them is the job of [`crate::scoring`].

mod date;
mod dictionary;
mod l33t;
mod repeat;
mod sequence;
mod spatial;

use std::collections::BTreeMap;
use serde::Serialize;

use crate::dictionary::{DictionaryKind, RankedDictionary};
use crate::keyboard::KeyboardLayout;

pub use date::date_match;
pub use dictionary::{dictionary_match, reverse_dictionary_match};
pub use l33t::l33t_match;
pub use repeat::repeat_match;
pub use sequence::sequence_match;
pub use spatial::spatial_match;

/// A candidate explanation for the characters `start..end` of a password.
///
/// Positions count Unicode scalar values, not bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub token: String,
    pub pattern: Pattern,
    /// Estimated guesses; filled in by the scorer, zero until then.
    pub guesses: f64,
}

impl Match {
    pub(crate) fn new(start: usize, end: usize, token: String, pattern: Pattern) -> Self {
        Self { start, end, token, pattern, guesses: 0.0 }
    }

    /// Number of characters covered.
    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn kind(&self) -> MatchKind {
        match &self.pattern {
            Pattern::Dictionary(d) if d.l33t.is_some() => MatchKind::LeetDictionary,
            Pattern::Dictionary(d) if d.reversed => MatchKind::ReverseDictionary,
            Pattern::Dictionary(_) => MatchKind::Dictionary,
            Pattern::Sequence(_) => MatchKind::Sequence,
            Pattern::Repeat(_) => MatchKind::Repeat,
            Pattern::Spatial(_) => MatchKind::KeyboardAdjacent,
            Pattern::Date(_) => MatchKind::Date,
            Pattern::Bruteforce => MatchKind::Bruteforce,
        }
    }
}

/// Closed set of match tags reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Dictionary,
    ReverseDictionary,
    LeetDictionary,
    Sequence,
    Repeat,
    KeyboardAdjacent,
    Date,
    Bruteforce,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Dictionary(DictionaryPattern),
    Sequence(SequencePattern),
    Repeat(RepeatPattern),
    Spatial(SpatialPattern),
    Date(DatePattern),
    Bruteforce,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryPattern {
    pub matched_word: String,
    pub rank: usize,
    pub dictionary: DictionaryKind,
    pub reversed: bool,
    /// Substitutions present in the token, keyed by the substituted character.
    pub l33t: Option<BTreeMap<char, char>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Lower,
    Upper,
    Digits,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequencePattern {
    pub sequence: SequenceKind,
    pub ascending: bool,
    /// Code point distance between neighbours, always positive.
    pub step: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatPattern {
    pub base_token: String,
    pub base_guesses: f64,
    pub repeat_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialPattern {
    pub graph: KeyboardLayout,
    pub turns: usize,
    pub shifted_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatePattern {
    pub separator: Option<char>,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub four_digit_year: bool,
}

/// Runs every matcher over `password` and returns all candidates, sorted by
/// span.
pub fn omnimatch(password: &str, dictionaries: &[&RankedDictionary]) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let mut matches = Vec::new();
    matches.extend(dictionary_match(&chars, dictionaries));
    matches.extend(reverse_dictionary_match(&chars, dictionaries));
    matches.extend(l33t_match(&chars, dictionaries));
    matches.extend(spatial_match(&chars));
    matches.extend(repeat_match(&chars, dictionaries));
    matches.extend(sequence_match(&chars));
    matches.extend(date_match(&chars));
    sort_matches(&mut matches);
    matches
}

pub(crate) fn sort_matches(matches: &mut [Match]) {
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
}

/// Lowercase form of each character, keeping one character per position so
/// indices line up with the original password.
pub(crate) fn fold_case(chars: &[char]) -> Vec<char> {
    chars
        .iter()
        .map(|&c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}
