//! Optimal coverage selection.
//!
//! Given every candidate match for a password, picks the non-overlapping
//! tiling with the fewest total guesses. Gaps between pattern matches are
//! filled with explicit bruteforce pieces.

use crate::guesses::{bruteforce_from_mask, char_class, estimate_guesses, saturate, saturating_mul};
use crate::matching::{Match, Pattern};

/// Relative tolerance under which two costs count as equal.
const TIE_TOLERANCE: f64 = 1e-10;

/// The cheapest explanation of a whole password.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Product of the piece guesses, saturating.
    pub guesses: f64,
    /// Pieces in order, tiling `0..len` exactly.
    pub sequence: Vec<Match>,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Start,
    Candidate(usize),
    Bruteforce { start: usize, mask: u8 },
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    cost: f64,
    pieces: usize,
    step: Step,
}

impl Cell {
    fn improves_on(&self, current: &Cell) -> bool {
        let scale = self.cost.abs().max(current.cost.abs());
        if (self.cost - current.cost).abs() <= TIE_TOLERANCE * scale {
            self.pieces < current.pieces
        } else {
            self.cost < current.cost
        }
    }
}

fn bruteforce_piece_guesses(mask: u8, len: usize, password_len: usize) -> f64 {
    let raw = bruteforce_from_mask(mask, len);
    let floor = if len >= password_len {
        1.0
    } else if len == 1 {
        10.0
    } else {
        50.0
    };
    raw.max(floor)
}

/// Finds the minimum-guesses decomposition of `password` from `matches`.
///
/// Each candidate's `guesses` is estimated in place. Candidates with spans
/// outside the password are ignored. An empty password costs one guess.
pub fn most_guessable_match_sequence(password: &str, matches: Vec<Match>) -> Decomposition {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    if n == 0 {
        return Decomposition { guesses: 1.0, sequence: Vec::new() };
    }

    let mut arena: Vec<Match> = matches
        .into_iter()
        .filter(|m| m.start < m.end && m.end <= n)
        .collect();
    let mut by_end: Vec<Vec<usize>> = vec![Vec::new(); n + 1];
    for (idx, m) in arena.iter_mut().enumerate() {
        m.guesses = estimate_guesses(m, n);
        by_end[m.end].push(idx);
    }

    let mut best: Vec<Cell> = Vec::with_capacity(n + 1);
    best.push(Cell { cost: 1.0, pieces: 0, step: Step::Start });

    for i in 1..=n {
        let mut current: Option<Cell> = None;
        let mut consider = |candidate: Cell| {
            if current.is_none_or(|c| candidate.improves_on(&c)) {
                current = Some(candidate);
            }
        };

        for &idx in &by_end[i] {
            let m = &arena[idx];
            let prev = best[m.start];
            consider(Cell {
                cost: saturating_mul(prev.cost, m.guesses),
                pieces: prev.pieces + 1,
                step: Step::Candidate(idx),
            });
        }

        let mut mask = 0;
        for j in (0..i).rev() {
            mask |= char_class(chars[j]);
            let prev = best[j];
            consider(Cell {
                cost: saturating_mul(prev.cost, bruteforce_piece_guesses(mask, i - j, n)),
                pieces: prev.pieces + 1,
                step: Step::Bruteforce { start: j, mask },
            });
        }

        // The bruteforce loop always offers at least one candidate.
        best.push(current.unwrap_or(Cell { cost: f64::MAX, pieces: usize::MAX, step: Step::Start }));
    }

    let mut sequence = Vec::new();
    let mut end = n;
    while end > 0 {
        match best[end].step {
            Step::Candidate(idx) => {
                let m = arena[idx].clone();
                end = m.start;
                sequence.push(m);
            }
            Step::Bruteforce { start, mask } => {
                let mut m = Match::new(start, end, chars[start..end].iter().collect(), Pattern::Bruteforce);
                m.guesses = bruteforce_piece_guesses(mask, end - start, n);
                sequence.push(m);
                end = start;
            }
            Step::Start => break,
        }
    }
    sequence.reverse();

    Decomposition { guesses: saturate(best[n].cost), sequence }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{RankedDictionary, builtin_dictionaries};
    use crate::guesses::{MAX_GUESSES, bruteforce_guesses};
    use crate::matching::{MatchKind, omnimatch};

    fn decompose(password: &str) -> Decomposition {
        let dictionaries: Vec<&RankedDictionary> = builtin_dictionaries().iter().collect();
        most_guessable_match_sequence(password, omnimatch(password, &dictionaries))
    }

    fn assert_tiles(password: &str, d: &Decomposition) {
        let mut position = 0;
        for m in &d.sequence {
            assert_eq!(m.start, position, "gap or overlap in {:?}", password);
            position = m.end;
        }
        assert_eq!(position, password.chars().count());
    }

    #[test]
    fn test_empty_password() {
        let d = most_guessable_match_sequence("", Vec::new());
        assert_eq!(d.guesses, 1.0);
        assert!(d.sequence.is_empty());
    }

    #[test]
    fn test_no_candidates_is_single_bruteforce() {
        let d = most_guessable_match_sequence("xqzj", Vec::new());
        assert_eq!(d.guesses, 26f64.powi(4));
        assert_eq!(d.sequence.len(), 1);
        assert_eq!(d.sequence[0].kind(), MatchKind::Bruteforce);
    }

    #[test]
    fn test_equal_cost_prefers_fewer_pieces() {
        let d = decompose("xqzj");
        assert_eq!(d.sequence.len(), 1);
        assert_eq!(d.guesses, 456_976.0);
    }

    #[test]
    fn test_dictionary_word_wins() {
        let d = decompose("password");
        assert_eq!(d.guesses, 2.0);
        assert_eq!(d.sequence.len(), 1);
        assert_eq!(d.sequence[0].kind(), MatchKind::Dictionary);
    }

    #[test]
    fn test_leet_word_with_bruteforce_tail() {
        let d = decompose("Tr0ub4dor&3");
        assert_tiles("Tr0ub4dor&3", &d);
        assert_eq!(d.sequence[0].kind(), MatchKind::LeetDictionary);
        assert_eq!(d.sequence[0].end, 9);
        assert!(d.guesses > 1e7 && d.guesses < 1e9, "guesses {}", d.guesses);
    }

    #[test]
    fn test_repeat_wins_for_single_char_run() {
        let d = decompose("aaaaaaaa");
        assert_eq!(d.sequence.len(), 1);
        assert_eq!(d.sequence[0].kind(), MatchKind::Repeat);
        assert_eq!(d.guesses, 208.0);
    }

    #[test]
    fn test_shorter_sequence_before_word() {
        let d = decompose("lmnopen");
        let pieces: Vec<_> = d.sequence.iter().map(|m| (m.kind(), m.token.as_str())).collect();
        assert_eq!(pieces, [(MatchKind::Sequence, "lmn"), (MatchKind::Dictionary, "open")]);
        assert_eq!(d.guesses, 78.0 * 235.0);

        for (password, run, word, guesses) in [
            ("rstuvwind", "rstuv", "wind", 45_110.0),
            ("hijklmnopen", "hijklmn", "open", 42_770.0),
        ] {
            let d = decompose(password);
            let tokens: Vec<_> = d.sequence.iter().map(|m| m.token.as_str()).collect();
            assert_eq!(tokens, [run, word], "{}", password);
            assert_eq!(d.guesses, guesses);
        }
    }

    #[test]
    fn test_tiling_and_bruteforce_bound() {
        for password in [
            "correct horse battery staple",
            "qwerty1987-04-12",
            "Zx!9é~kk",
            "abcabcabc4321",
            "a",
        ] {
            let d = decompose(password);
            assert_tiles(password, &d);
            let chars: Vec<char> = password.chars().collect();
            assert!(d.guesses <= bruteforce_guesses(&chars) * (1.0 + 1e-9));
            assert!(d.guesses >= 1.0);
            let product = d.sequence.iter().fold(1.0, |acc, m| saturating_mul(acc, m.guesses));
            assert!((product - d.guesses).abs() <= d.guesses * 1e-9);
        }
    }

    #[test]
    fn test_never_worse_than_whole_string_match() {
        let d = decompose("123456");
        assert!(d.guesses <= 1.0 + 1e-9);
    }

    #[test]
    fn test_out_of_range_candidates_ignored() {
        let stray = Match::new(2, 9, "zz".to_string(), Pattern::Bruteforce);
        let d = most_guessable_match_sequence("ab", vec![stray]);
        assert_tiles("ab", &d);
    }

    #[test]
    fn test_long_input_saturates() {
        let password: String = std::iter::repeat_n('é', 256).collect();
        let d = decompose(&password);
        assert!(d.guesses.is_finite());
        assert!(d.guesses <= MAX_GUESSES);
    }
}
