//! Sequence matcher - runs like `abcd`, `9753` or `XYZ`.

use super::{Match, Pattern, SequenceKind, SequencePattern};

const MIN_SEQUENCE_LEN: usize = 3;
const MAX_STEP: i64 = 5;

fn classify(token: &[char]) -> Option<SequenceKind> {
    if token.iter().all(char::is_ascii_lowercase) {
        Some(SequenceKind::Lower)
    } else if token.iter().all(char::is_ascii_uppercase) {
        Some(SequenceKind::Upper)
    } else if token.iter().all(char::is_ascii_digit) {
        Some(SequenceKind::Digits)
    } else {
        None
    }
}

/// Finds runs of at least three characters whose code points change by the
/// same non-zero step, within one alphabet. Every stretch of three or more
/// characters inside a run is reported, so a shorter run that stops before a
/// word is available to the scorer.
pub fn sequence_match(chars: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    if chars.len() < MIN_SEQUENCE_LEN {
        return matches;
    }

    let mut push_run = |start: usize, last: usize, delta: i64| {
        if last - start + 1 < MIN_SEQUENCE_LEN || delta == 0 || delta.abs() > MAX_STEP {
            return;
        }
        for from in start..=last + 1 - MIN_SEQUENCE_LEN {
            for to in from + MIN_SEQUENCE_LEN - 1..=last {
                let token = &chars[from..=to];
                let Some(sequence) = classify(token) else {
                    continue;
                };
                matches.push(Match::new(
                    from,
                    to + 1,
                    token.iter().collect(),
                    Pattern::Sequence(SequencePattern {
                        sequence,
                        ascending: delta > 0,
                        step: delta.unsigned_abs() as u32,
                    }),
                ));
            }
        }
    };

    let mut start = 0;
    let mut last_delta: Option<i64> = None;
    for k in 1..chars.len() {
        let delta = i64::from(u32::from(chars[k])) - i64::from(u32::from(chars[k - 1]));
        match last_delta {
            None => last_delta = Some(delta),
            Some(d) if d == delta => {}
            Some(d) => {
                push_run(start, k - 1, d);
                start = k - 1;
                last_delta = Some(delta);
            }
        }
    }
    if let Some(d) = last_delta {
        push_run(start, chars.len() - 1, d);
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(s: &str) -> Vec<(usize, usize, String, bool, u32)> {
        let chars: Vec<char> = s.chars().collect();
        sequence_match(&chars)
            .into_iter()
            .map(|m| match m.pattern {
                Pattern::Sequence(p) => (m.start, m.end, m.token, p.ascending, p.step),
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn test_ascending_and_descending() {
        assert_eq!(run("abcd"), vec![
            (0, 3, "abc".to_string(), true, 1),
            (0, 4, "abcd".to_string(), true, 1),
            (1, 4, "bcd".to_string(), true, 1),
        ]);
        assert!(run("x4321y").contains(&(1, 5, "4321".to_string(), false, 1)));
        assert_eq!(run("XYZ"), vec![(0, 3, "XYZ".to_string(), true, 1)]);
    }

    #[test]
    fn test_stepped_sequence() {
        assert!(run("13579").contains(&(0, 5, "13579".to_string(), true, 2)));
        assert!(run("aeimq").contains(&(0, 5, "aeimq".to_string(), true, 4)));
        assert!(run("agmsy").is_empty());
    }

    #[test]
    fn test_every_stretch_of_a_run() {
        let found = run("lmnopen");
        assert_eq!(found.len(), 6);
        assert!(found.contains(&(0, 3, "lmn".to_string(), true, 1)));
        assert!(found.contains(&(0, 5, "lmnop".to_string(), true, 1)));
        assert!(found.contains(&(2, 5, "nop".to_string(), true, 1)));
        assert!(found.iter().all(|&(s, e, _, _, _)| e - s >= 3 && e <= 5));
    }

    #[test]
    fn test_adjacent_runs_share_boundary() {
        let found = run("abcba");
        assert_eq!(found, vec![
            (0, 3, "abc".to_string(), true, 1),
            (2, 5, "cba".to_string(), false, 1),
        ]);
    }

    #[test]
    fn test_rejects_short_mixed_and_flat() {
        assert!(run("ab").is_empty());
        assert!(run("aaaa").is_empty());
        assert!(run("xqzj").is_empty());
        assert!(run("9:;<").is_empty());
        assert_eq!(run("789:"), vec![(0, 3, "789".to_string(), true, 1)]);
        assert!(run("abC").is_empty());
    }
}
