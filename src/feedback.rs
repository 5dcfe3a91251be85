//! Warning and suggestions derived from the winning decomposition.

use serde::Serialize;

use crate::dictionary::DictionaryKind;
use crate::matching::{DictionaryPattern, Match, Pattern};
use crate::scale::Score;

const EXTRA_WORDS: &str = "Add another word or two. Uncommon words are better.";

const GENERIC_ADVICE: [&str; 3] = [
    "Use at least 12 characters",
    "Mix uppercase and lowercase letters, numbers and symbols",
    "Don't reuse this password on other accounts",
];

const BASE_STRATEGIES: [&str; 5] = [
    "Use a password manager to generate and store complex passwords",
    "Enable two-factor authentication whenever possible",
    "Never reuse passwords across different accounts",
    "Change passwords periodically, especially for sensitive accounts",
    "Be cautious of phishing attempts asking for your password",
];

const LOW_SCORE_STRATEGIES: [&str; 5] = [
    "Increase your password length to at least 12 characters",
    "Use a combination of uppercase, lowercase, numbers, and special characters",
    "Avoid using personal information in your passwords",
    "Don't use sequential patterns like '12345' or 'qwerty'",
    "Consider using a passphrase (a sequence of random words)",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
}

/// The piece contributing most guesses; ties go to the longer span, then
/// the earlier one.
fn dominant_match(sequence: &[Match]) -> Option<&Match> {
    sequence.iter().reduce(|best, m| {
        let more_guesses = m.guesses > best.guesses;
        let longer_tie = m.guesses == best.guesses && m.len() > best.len();
        if more_guesses || longer_tie { m } else { best }
    })
}

pub fn get_feedback(score: Score, sequence: &[Match]) -> Feedback {
    if sequence.is_empty() {
        return Feedback {
            warning: None,
            suggestions: vec![
                "Use a few words, avoid common phrases".to_string(),
                "No need for symbols, digits, or uppercase letters".to_string(),
            ],
        };
    }

    let mut feedback = Feedback {
        warning: None,
        suggestions: vec![EXTRA_WORDS.to_string()],
    };

    if let Some(dominant) = dominant_match(sequence) {
        let (warning, advice) = match_feedback(dominant, sequence.len() == 1);
        feedback.warning = warning.map(str::to_string);
        feedback.suggestions.extend(advice.into_iter().map(str::to_string));
    }

    if score <= Score::Medium {
        feedback.suggestions.extend(GENERIC_ADVICE.iter().map(|s| s.to_string()));
    }
    feedback
}

fn match_feedback(m: &Match, is_sole_match: bool) -> (Option<&'static str>, Vec<&'static str>) {
    match &m.pattern {
        Pattern::Dictionary(p) => dictionary_feedback(m, p, is_sole_match),
        Pattern::Spatial(p) => {
            let warning = if p.turns == 1 {
                "Straight rows of keys are easy to guess"
            } else {
                "Short keyboard patterns are easy to guess"
            };
            (Some(warning), vec!["Use a longer keyboard pattern with more turns"])
        }
        Pattern::Repeat(p) => {
            let warning = if p.base_token.chars().count() == 1 {
                "Repeats like \"aaa\" are easy to guess"
            } else {
                "Repeats like \"abcabcabc\" are only slightly harder to guess than \"abc\""
            };
            (Some(warning), vec!["Avoid repeated words and characters"])
        }
        Pattern::Sequence(_) => (
            Some("Sequences like abc or 6543 are easy to guess"),
            vec!["Avoid sequences"],
        ),
        Pattern::Date(_) => (
            Some("Dates are often easy to guess"),
            vec!["Avoid dates and years that are associated with you"],
        ),
        Pattern::Bruteforce => (None, Vec::new()),
    }
}

fn dictionary_feedback(
    m: &Match,
    p: &DictionaryPattern,
    is_sole_match: bool,
) -> (Option<&'static str>, Vec<&'static str>) {
    let warning = match p.dictionary {
        DictionaryKind::Passwords | DictionaryKind::Custom => {
            if is_sole_match && p.l33t.is_none() && !p.reversed {
                Some(match p.rank {
                    0..=10 => "This is a top-10 common password",
                    11..=100 => "This is a top-100 common password",
                    _ => "This is a very common password",
                })
            } else if m.guesses.log10() <= 4.0 {
                Some("This is similar to a commonly used password")
            } else {
                None
            }
        }
        DictionaryKind::English if is_sole_match => Some("A word by itself is easy to guess"),
        DictionaryKind::English => Some("Common words are easy to guess"),
        DictionaryKind::Names | DictionaryKind::Surnames => {
            if is_sole_match {
                Some("Names and surnames by themselves are easy to guess")
            } else {
                Some("Common names and surnames are easy to guess")
            }
        }
        DictionaryKind::UserInputs => Some("Personal details are easy to guess"),
    };

    let mut suggestions = Vec::new();
    let token: Vec<char> = m.token.chars().collect();
    let has_lower = token.iter().any(|c| c.is_lowercase());
    let has_upper = token.iter().any(|c| c.is_uppercase());
    if token.first().is_some_and(|c| c.is_uppercase()) && has_lower {
        suggestions.push("Capitalization doesn't help very much");
    } else if has_upper && !has_lower {
        suggestions.push("All-uppercase is almost as easy to guess as all-lowercase");
    }
    if p.reversed && token.len() >= 4 {
        suggestions.push("Reversed words aren't much harder to guess");
    }
    if p.l33t.is_some() {
        suggestions.push("Predictable substitutions like '@' instead of 'a' don't help very much");
    }

    (warning, suggestions)
}

/// General account hygiene advice, extended for weak scores.
pub fn security_strategies(score: Score) -> Vec<&'static str> {
    let mut strategies = BASE_STRATEGIES.to_vec();
    if score <= Score::Medium {
        strategies.extend_from_slice(&LOW_SCORE_STRATEGIES);
    }
    strategies
}
