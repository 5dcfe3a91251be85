//! Leet-speak matcher - dictionary lookups after undoing common substitutions.

use std::collections::BTreeMap;

use super::dictionary::dictionary_match;
use super::{Match, Pattern, fold_case};
use crate::dictionary::RankedDictionary;

/// Letters and the characters commonly typed in their place.
const L33T_TABLE: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('b', &['8']),
    ('c', &['(', '{', '[', '<']),
    ('e', &['3']),
    ('g', &['6', '9']),
    ('i', &['1', '!', '|']),
    ('l', &['1', '|', '7']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['+', '7']),
    ('x', &['%']),
    ('z', &['2']),
];

/// Upper bound on translations tried for one password.
const MAX_SUBSTITUTIONS: usize = 64;

/// For every substitute character present in the password, the letters it
/// may stand for.
fn relevant_substitutions(chars: &[char]) -> BTreeMap<char, Vec<char>> {
    let mut table: BTreeMap<char, Vec<char>> = BTreeMap::new();
    for &(letter, subs) in L33T_TABLE {
        for &sub in subs {
            if chars.contains(&sub) {
                table.entry(sub).or_default().push(letter);
            }
        }
    }
    table
}

/// Every way of assigning one letter to each substitute character.
fn enumerate_substitutions(table: &BTreeMap<char, Vec<char>>) -> Vec<BTreeMap<char, char>> {
    let mut subs = vec![BTreeMap::new()];
    for (&sub, letters) in table {
        let mut next = Vec::with_capacity(subs.len() * letters.len());
        for current in &subs {
            for &letter in letters {
                let mut extended: BTreeMap<char, char> = current.clone();
                extended.insert(sub, letter);
                next.push(extended);
            }
        }
        next.truncate(MAX_SUBSTITUTIONS);
        subs = next;
    }
    subs
}

/// Finds dictionary words hidden behind leet substitutions, e.g. `p4ssw0rd`.
///
/// Tokens of a single character and tokens without any substituted
/// character are skipped; the plain dictionary matcher covers those.
pub fn l33t_match(chars: &[char], dictionaries: &[&RankedDictionary]) -> Vec<Match> {
    let table = relevant_substitutions(chars);
    if table.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<Match> = Vec::new();
    for sub in enumerate_substitutions(&table) {
        let translated: Vec<char> = chars
            .iter()
            .map(|c| sub.get(c).copied().unwrap_or(*c))
            .collect();

        for mut m in dictionary_match(&translated, dictionaries) {
            if m.len() <= 1 {
                continue;
            }
            let original = &chars[m.start..m.end];
            let used: BTreeMap<char, char> = original
                .iter()
                .filter_map(|c| sub.get(c).map(|letter| (*c, *letter)))
                .collect();
            if used.is_empty() {
                continue;
            }
            let folded: String = fold_case(original).into_iter().collect();
            if let Pattern::Dictionary(ref mut d) = m.pattern {
                if folded == d.matched_word {
                    continue;
                }
                d.l33t = Some(used);
            }
            m.token = original.iter().collect();

            let duplicate = matches.iter().any(|existing| {
                existing.start == m.start && existing.end == m.end && existing.pattern == m.pattern
            });
            if !duplicate {
                matches.push(m);
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryKind;

    fn dict(words: &[&str]) -> RankedDictionary {
        RankedDictionary::from_words(DictionaryKind::UserInputs, words.iter().copied())
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_relevant_substitutions() {
        let table = relevant_substitutions(&chars("p4$$w0rd1"));
        assert_eq!(table.get(&'4'), Some(&vec!['a']));
        assert_eq!(table.get(&'$'), Some(&vec!['s']));
        assert_eq!(table.get(&'0'), Some(&vec!['o']));
        assert_eq!(table.get(&'1'), Some(&vec!['i', 'l']));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_enumerate_ambiguous_substitutions() {
        let table = relevant_substitutions(&chars("1|"));
        let subs = enumerate_substitutions(&table);
        assert_eq!(subs.len(), 4);
        assert!(subs.iter().all(|s| s.len() == 2));
    }

    #[test]
    fn test_l33t_match_records_substitutions() {
        let d = dict(&["password", "troubador"]);
        let matches = l33t_match(&chars("Tr0ub4dor&3"), &[&d]);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.start, m.end), (0, 9));
        assert_eq!(m.token, "Tr0ub4dor");
        match &m.pattern {
            Pattern::Dictionary(p) => {
                let sub = p.l33t.as_ref().unwrap();
                assert_eq!(sub.get(&'0'), Some(&'o'));
                assert_eq!(sub.get(&'4'), Some(&'a'));
                assert_eq!(sub.len(), 2);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
    }

    #[test]
    fn test_l33t_match_ambiguous_one() {
        let d = dict(&["lily", "iris"]);
        let matches = l33t_match(&chars("1ily 1ris"), &[&d]);
        let words: Vec<_> = matches
            .iter()
            .filter_map(|m| match &m.pattern {
                Pattern::Dictionary(p) => Some(p.matched_word.as_str()),
                _ => None,
            })
            .collect();
        assert!(words.contains(&"lily"));
        assert!(words.contains(&"iris"));
    }

    #[test]
    fn test_l33t_match_skips_plain_words() {
        let d = dict(&["password"]);
        assert!(l33t_match(&chars("password0"), &[&d]).is_empty());
        assert!(l33t_match(&chars("abc"), &[&d]).is_empty());
    }
}
