//! Ranked dictionary management module
//!
//! Holds the built-in frequency lists used by the dictionary matcher and
//! handles loading the optional process-wide custom list.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use serde::Serialize;
use thiserror::Error;

static BUILTIN_DICTIONARIES: LazyLock<Vec<RankedDictionary>> = LazyLock::new(|| {
    vec![
        RankedDictionary::from_list(DictionaryKind::Passwords, include_str!("../assets/passwords.txt")),
        RankedDictionary::from_list(DictionaryKind::English, include_str!("../assets/english.txt")),
        RankedDictionary::from_list(DictionaryKind::Names, include_str!("../assets/names.txt")),
        RankedDictionary::from_list(DictionaryKind::Surnames, include_str!("../assets/surnames.txt")),
    ]
});

/// Custom list location used when `PWD_DICTIONARY_PATH` is not set.
pub const DEFAULT_DICTIONARY_PATH: &str = "./assets/custom-words.txt";

static CUSTOM_DICTIONARY: RwLock<Option<Arc<RankedDictionary>>> = RwLock::new(None);

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Dictionary file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read dictionary file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Dictionary file is empty")]
    EmptyFile,
}

/// Which frequency list a dictionary match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryKind {
    Passwords,
    English,
    Names,
    Surnames,
    UserInputs,
    Custom,
}

/// A word list where each word maps to its 1-based popularity rank.
#[derive(Debug, Clone)]
pub struct RankedDictionary {
    kind: DictionaryKind,
    ranks: HashMap<String, usize>,
    max_word_len: usize,
}

impl RankedDictionary {
    /// Builds a dictionary from words in rank order. Words are case-folded;
    /// duplicates keep their first (best) rank.
    pub fn from_words<I, S>(kind: DictionaryKind, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranks = HashMap::new();
        let mut max_word_len = 0;
        let mut rank = 0;
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            rank += 1;
            max_word_len = max_word_len.max(word.chars().count());
            ranks.entry(word).or_insert(rank);
        }
        Self { kind, ranks, max_word_len }
    }

    /// Builds a dictionary from newline-separated text, one word per line.
    pub fn from_list(kind: DictionaryKind, content: &str) -> Self {
        Self::from_words(kind, content.lines())
    }

    pub fn kind(&self) -> DictionaryKind {
        self.kind
    }

    /// Rank of an already case-folded word.
    pub fn rank(&self, word: &str) -> Option<usize> {
        self.ranks.get(word).copied()
    }

    /// Length in characters of the longest word.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Returns the compiled-in frequency lists.
pub fn builtin_dictionaries() -> &'static [RankedDictionary] {
    &BUILTIN_DICTIONARIES
}

/// Returns the custom dictionary path.
///
/// Priority:
/// 1. Environment variable `PWD_DICTIONARY_PATH`
/// 2. Default path `./assets/custom-words.txt`
pub fn get_dictionary_path() -> PathBuf {
    std::env::var("PWD_DICTIONARY_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DICTIONARY_PATH))
}

/// Initializes the custom dictionary from an external file.
///
/// # Environment Variable
///
/// Set `PWD_DICTIONARY_PATH` to specify a custom file location.
/// If not set, defaults to `./assets/custom-words.txt`.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read
/// - File is empty
pub fn init_custom_dictionary() -> Result<usize, DictionaryError> {
    let path = get_dictionary_path();
    init_custom_dictionary_from_path(&path)
}

/// Initializes the custom dictionary from a specific file path.
///
/// The file holds one word per line, most popular first. Calling this again
/// after a successful load is a no-op that returns the loaded size.
pub fn init_custom_dictionary_from_path<P: AsRef<Path>>(path: P) -> Result<usize, DictionaryError> {
    {
        let guard = CUSTOM_DICTIONARY.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(dictionary) = guard.as_ref() {
            return Ok(dictionary.len());
        }
    }

    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Custom dictionary initialization FAILED: FileNotFound {:?}", path);
        return Err(DictionaryError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Custom dictionary initialization FAILED: Empty file {:?}", path);
        return Err(DictionaryError::EmptyFile);
    }

    let dictionary = RankedDictionary::from_list(DictionaryKind::Custom, &content);
    let count = dictionary.len();
    {
        let mut guard = CUSTOM_DICTIONARY.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(dictionary));
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Custom dictionary initialized: {} words from {:?}", count, path);

    Ok(count)
}

/// Returns the loaded custom dictionary, if `init_custom_dictionary()` succeeded.
pub fn custom_dictionary() -> Option<Arc<RankedDictionary>> {
    CUSTOM_DICTIONARY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Resets the custom dictionary for testing purposes.
#[cfg(test)]
pub fn reset_custom_dictionary_for_testing() {
    let mut guard = CUSTOM_DICTIONARY.write().unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}
