//! Dictionary matcher - ranked word list lookups, forwards and reversed.

use super::{DictionaryPattern, Match, Pattern, fold_case};
use crate::dictionary::RankedDictionary;

/// Finds every substring of the case-folded password that appears in one of
/// the dictionaries.
pub fn dictionary_match(chars: &[char], dictionaries: &[&RankedDictionary]) -> Vec<Match> {
    let folded = fold_case(chars);
    let mut matches = Vec::new();

    for dictionary in dictionaries {
        let max_len = dictionary.max_word_len();
        for start in 0..folded.len() {
            let mut word = String::new();
            for end in start + 1..=folded.len().min(start + max_len) {
                word.push(folded[end - 1]);
                if let Some(rank) = dictionary.rank(&word) {
                    matches.push(Match::new(
                        start,
                        end,
                        chars[start..end].iter().collect(),
                        Pattern::Dictionary(DictionaryPattern {
                            matched_word: word.clone(),
                            rank,
                            dictionary: dictionary.kind(),
                            reversed: false,
                            l33t: None,
                        }),
                    ));
                }
            }
        }
    }

    matches
}

/// Runs the dictionary matcher on the reversed password, mapping spans back
/// onto the original order.
pub fn reverse_dictionary_match(chars: &[char], dictionaries: &[&RankedDictionary]) -> Vec<Match> {
    let n = chars.len();
    let reversed: Vec<char> = chars.iter().rev().copied().collect();

    dictionary_match(&reversed, dictionaries)
        .into_iter()
        .map(|mut m| {
            let (start, end) = (n - m.end, n - m.start);
            m.token = chars[start..end].iter().collect();
            m.start = start;
            m.end = end;
            if let Pattern::Dictionary(ref mut d) = m.pattern {
                d.reversed = true;
            }
            m
        })
        // Palindromes are already reported forwards.
        .filter(|m| {
            let folded: String = fold_case(&chars[m.start..m.end]).into_iter().collect();
            match &m.pattern {
                Pattern::Dictionary(d) => folded != d.matched_word,
                _ => true,
            }
        })
        .collect()
}
