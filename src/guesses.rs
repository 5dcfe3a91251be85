//! Guess estimators - how many attempts an attacker needs for one match.

use crate::keyboard::adjacency_graphs;
use crate::matching::{
    DatePattern, DictionaryPattern, Match, Pattern, RepeatPattern, SequencePattern, SpatialPattern,
};

/// Ceiling for every guess figure. Products saturate here instead of
/// overflowing to infinity.
pub const MAX_GUESSES: f64 = f64::MAX;

/// Year that date guesses are measured against.
pub const REFERENCE_YEAR: i32 = 2026;

const MIN_YEAR_SPACE: f64 = 20.0;
const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;

const CLASS_LOWER: u8 = 1;
const CLASS_UPPER: u8 = 1 << 1;
const CLASS_DIGIT: u8 = 1 << 2;
const CLASS_SYMBOL: u8 = 1 << 3;
const CLASS_OTHER: u8 = 1 << 4;

pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() || value > MAX_GUESSES {
        MAX_GUESSES
    } else {
        value
    }
}

pub(crate) fn saturating_mul(a: f64, b: f64) -> f64 {
    saturate(a * b)
}

/// Binomial coefficient as a float; large values saturate.
pub(crate) fn n_ck(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 1..=k {
        result = saturate(result * (n - k + i) as f64 / i as f64);
    }
    result
}

/// Character class bit for bruteforce cardinality.
pub(crate) fn char_class(c: char) -> u8 {
    if c.is_ascii_lowercase() {
        CLASS_LOWER
    } else if c.is_ascii_uppercase() {
        CLASS_UPPER
    } else if c.is_ascii_digit() {
        CLASS_DIGIT
    } else if c.is_ascii() {
        CLASS_SYMBOL
    } else {
        CLASS_OTHER
    }
}

/// Size of the character space spanned by the classes in `mask`.
pub(crate) fn cardinality(mask: u8) -> f64 {
    [
        (CLASS_LOWER, 26.0),
        (CLASS_UPPER, 26.0),
        (CLASS_DIGIT, 10.0),
        (CLASS_SYMBOL, 33.0),
        (CLASS_OTHER, 100.0),
    ]
    .iter()
    .filter(|(class, _)| mask & class != 0)
    .map(|(_, size)| size)
    .sum()
}

/// Guesses for a span the attacker can only enumerate exhaustively.
pub fn bruteforce_guesses(token: &[char]) -> f64 {
    let mask = token.iter().fold(0, |mask, &c| mask | char_class(c));
    bruteforce_from_mask(mask, token.len())
}

pub(crate) fn bruteforce_from_mask(mask: u8, len: usize) -> f64 {
    let exponent = i32::try_from(len).unwrap_or(i32::MAX);
    saturate(cardinality(mask).powi(exponent))
}

/// Estimates guesses for `m` inside a password of `password_len` characters.
///
/// Matches that leave part of the password uncovered are floored, so that
/// splitting into many cheap fragments never beats one honest explanation.
pub fn estimate_guesses(m: &Match, password_len: usize) -> f64 {
    let chars: Vec<char> = m.token.chars().collect();
    let raw = match &m.pattern {
        Pattern::Dictionary(p) => dictionary_guesses(&chars, p),
        Pattern::Sequence(p) => sequence_guesses(&chars, p),
        Pattern::Repeat(p) => repeat_guesses(p),
        Pattern::Spatial(p) => spatial_guesses(chars.len(), p),
        Pattern::Date(p) => date_guesses(p),
        Pattern::Bruteforce => bruteforce_guesses(&chars),
    };

    let floor = if m.len() >= password_len {
        1.0
    } else if m.len() == 1 {
        MIN_SUBMATCH_GUESSES_SINGLE_CHAR
    } else {
        MIN_SUBMATCH_GUESSES_MULTI_CHAR
    };
    saturate(raw.max(floor))
}

fn dictionary_guesses(token: &[char], p: &DictionaryPattern) -> f64 {
    let mut guesses = p.rank as f64;
    guesses = saturating_mul(guesses, uppercase_variations(token));
    if let Some(subs) = &p.l33t {
        guesses = saturating_mul(guesses, l33t_variations(token, subs.iter().map(|(s, l)| (*s, *l))));
    }
    if p.reversed {
        guesses = saturating_mul(guesses, 2.0);
    }
    guesses
}

/// Extra guesses for capitalisation. Common placements (first letter, last
/// letter, all caps) only double the space.
pub(crate) fn uppercase_variations(token: &[char]) -> f64 {
    let upper = token.iter().filter(|c| c.is_uppercase()).count();
    let lower = token.iter().filter(|c| c.is_lowercase()).count();
    if upper == 0 {
        return 1.0;
    }
    if lower == 0 {
        return 2.0;
    }

    let first_only = token.first().is_some_and(|c| c.is_uppercase()) && upper == 1;
    let last_only = token.last().is_some_and(|c| c.is_uppercase()) && upper == 1;
    if first_only || last_only {
        return 2.0;
    }

    (1..=upper.min(lower)).map(|i| n_ck(upper + lower, i)).fold(0.0, |acc, v| saturate(acc + v))
}

/// Extra guesses for leet substitutions, multiplied across each
/// `(substitute, letter)` pair used in the token.
pub(crate) fn l33t_variations<I>(token: &[char], subs: I) -> f64
where
    I: IntoIterator<Item = (char, char)>,
{
    let lowered: Vec<char> = crate::matching::fold_case(token);
    let mut variations = 1.0;
    for (sub, letter) in subs {
        let substituted = lowered.iter().filter(|&&c| c == sub).count();
        let plain = lowered.iter().filter(|&&c| c == letter).count();
        let factor = if substituted == 0 || plain == 0 {
            2.0
        } else {
            (1..=substituted.min(plain))
                .map(|i| n_ck(substituted + plain, i))
                .fold(0.0, |acc, v| saturate(acc + v))
        };
        variations = saturating_mul(variations, factor);
    }
    variations
}

fn sequence_guesses(token: &[char], p: &SequencePattern) -> f64 {
    let base = match token.first() {
        Some('a' | 'A' | 'z' | 'Z' | '0' | '1' | '9') => 4.0,
        Some(c) if c.is_ascii_digit() => 10.0,
        _ => 26.0,
    };
    let direction = if p.ascending { 1.0 } else { 2.0 };
    saturate(base * direction * token.len() as f64 * f64::from(p.step))
}

fn repeat_guesses(p: &RepeatPattern) -> f64 {
    saturating_mul(p.base_guesses, p.repeat_count as f64)
}

fn spatial_guesses(len: usize, p: &SpatialPattern) -> f64 {
    let Some(graph) = adjacency_graphs().iter().find(|g| g.layout() == p.graph) else {
        return bruteforce_from_mask(CLASS_SYMBOL, len);
    };
    let starts = graph.starting_positions() as f64;
    let degree = graph.average_degree();

    let mut guesses = 0.0;
    for i in 2..=len {
        let possible_turns = p.turns.min(i - 1);
        for j in 1..=possible_turns {
            let exponent = i32::try_from(j).unwrap_or(i32::MAX);
            guesses = saturate(guesses + n_ck(i - 1, j - 1) * starts * degree.powi(exponent));
        }
    }

    let shifted = p.shifted_count;
    if shifted > 0 {
        let unshifted = len.saturating_sub(shifted);
        let factor = if unshifted == 0 {
            2.0
        } else {
            (1..=shifted.min(unshifted))
                .map(|i| n_ck(shifted + unshifted, i))
                .fold(0.0, |acc, v| saturate(acc + v))
        };
        guesses = saturating_mul(guesses, factor);
    }
    guesses
}

fn date_guesses(p: &DatePattern) -> f64 {
    let year_space = f64::from((p.year - REFERENCE_YEAR).abs()).max(MIN_YEAR_SPACE);
    let mut guesses = year_space * 365.0;
    if p.separator.is_some() {
        guesses *= 4.0;
    }
    if p.four_digit_year {
        guesses *= 2.0;
    }
    guesses
}
