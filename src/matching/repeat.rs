//! Repeat matcher - a unit of one or more characters repeated back to back.

use std::collections::HashMap;

use super::{Match, Pattern, RepeatPattern, omnimatch};
use crate::dictionary::RankedDictionary;
use crate::scoring::most_guessable_match_sequence;

const MIN_REPEAT_COUNT: usize = 3;

/// Widest repeat starting at `start` as `(unit_len, count)`. Among equally
/// wide repeats the shortest unit wins.
fn widest_repeat_at(chars: &[char], start: usize) -> Option<(usize, usize)> {
    let remaining = chars.len() - start;
    let mut best: Option<(usize, usize)> = None;

    for unit_len in 1..=remaining / MIN_REPEAT_COUNT {
        let unit = &chars[start..start + unit_len];
        let mut count = 1;
        while start + (count + 1) * unit_len <= chars.len()
            && &chars[start + count * unit_len..start + (count + 1) * unit_len] == unit
        {
            count += 1;
        }
        if count < MIN_REPEAT_COUNT {
            continue;
        }
        let width = unit_len * count;
        if best.is_none_or(|(len, n)| width > len * n) {
            best = Some((unit_len, count));
        }
    }

    best
}

/// Reports the widest repeat of at least three units starting at each
/// position. The unit is analysed on its own to price a single copy of it;
/// units seen twice are analysed once.
pub fn repeat_match(chars: &[char], dictionaries: &[&RankedDictionary]) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut unit_guesses: HashMap<String, f64> = HashMap::new();

    for start in 0..chars.len() {
        let Some((unit_len, count)) = widest_repeat_at(chars, start) else {
            continue;
        };
        let end = start + unit_len * count;
        let base_token: String = chars[start..start + unit_len].iter().collect();
        let base_guesses = *unit_guesses.entry(base_token.clone()).or_insert_with(|| {
            most_guessable_match_sequence(&base_token, omnimatch(&base_token, dictionaries)).guesses
        });

        matches.push(Match::new(
            start,
            end,
            chars[start..end].iter().collect(),
            Pattern::Repeat(RepeatPattern {
                base_token,
                base_guesses,
                repeat_count: count,
            }),
        ));
    }

    matches
}
