//! Password guessability estimation library
//!
//! Estimates how many guesses an attacker needs for a password by explaining
//! it as a sequence of recognisable patterns (common passwords, words, names,
//! leet-speak, keyboard walks, sequences, repeats, dates) and choosing the
//! cheapest explanation. The guess count maps onto a 0-4 score with crack
//! time estimates, a warning and suggestions.
//!
//! # Features
//!
//! - `async` (default): Enables cancellable and debounced analysis
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_DICTIONARY_PATH`: Custom ranked word list, one word per line
//!   (default: `./assets/custom-words.txt`)
//! - `PWD_MAX_LENGTH`: Longest accepted password, read by
//!   [`AnalyzerConfig::from_env`] (default: 256)
//!
//! # Example
//!
//! ```rust
//! use pwd_guess::{analyze, Score};
//!
//! let result = analyze("Tr0ub4dor&3").expect("short UTF-8 input");
//!
//! assert_eq!(result.score, Score::Medium);
//! println!("Guesses: {:.0}", result.guesses);
//! for piece in &result.match_summary {
//!     println!("{:?} {}..{}", piece.kind, piece.start, piece.end);
//! }
//! ```

// Internal modules
mod config;
mod dictionary;
mod evaluator;
mod feedback;
mod guesses;
mod keyboard;
mod matching;
mod scale;
mod scoring;
mod sections;

// Public API
pub use config::{AnalyzerConfig, ConfigError, DEFAULT_MAX_LENGTH};
pub use dictionary::{
    DictionaryError, DictionaryKind, RankedDictionary, builtin_dictionaries, custom_dictionary,
    init_custom_dictionary, init_custom_dictionary_from_path,
};
pub use evaluator::{
    AnalysisError, AnalysisResult, Analyzer, MatchSummary, analyze, analyze_bytes, analyze_secret,
};
pub use feedback::{Feedback, security_strategies};
pub use guesses::{MAX_GUESSES, REFERENCE_YEAR};
pub use keyboard::KeyboardLayout;
pub use matching::{
    DatePattern, DictionaryPattern, Match, MatchKind, Pattern, RepeatPattern, SequenceKind,
    SequencePattern, SpatialPattern, omnimatch,
};
pub use scale::{AttackProfile, CrackTime, Score, display_time, guesses_to_score};
pub use scoring::{Decomposition, most_guessable_match_sequence};
pub use sections::StrengthCheck;

#[cfg(feature = "async")]
pub use evaluator::{analyze_cancellable, analyze_tx};
