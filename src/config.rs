//! Analyzer configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::dictionary::{DEFAULT_DICTIONARY_PATH, get_dictionary_path};

/// Longest password accepted by default, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 256;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PWD_MAX_LENGTH must be a positive integer, got {0:?}")]
    InvalidMaxLength(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Inputs longer than this many characters are rejected.
    pub max_length: usize,
    /// Where [`crate::Analyzer::load_custom_dictionary`] reads the custom list.
    pub dictionary_path: PathBuf,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
        }
    }
}

impl AnalyzerConfig {
    /// Reads the configuration from the environment.
    ///
    /// - `PWD_MAX_LENGTH`: maximum password length (default 256)
    /// - `PWD_DICTIONARY_PATH`: custom list path (default `./assets/custom-words.txt`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_length = match std::env::var("PWD_MAX_LENGTH") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidMaxLength(raw)),
            },
            Err(_) => DEFAULT_MAX_LENGTH,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("Analyzer config loaded: max_length={}", max_length);

        Ok(Self {
            max_length,
            dictionary_path: get_dictionary_path(),
        })
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}
