//! Password analyzer - runs the matching, scoring and feedback pipeline.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::AnalyzerConfig;
use crate::dictionary::{
    DictionaryError, DictionaryKind, RankedDictionary, builtin_dictionaries, custom_dictionary,
    init_custom_dictionary_from_path,
};
use crate::feedback::get_feedback;
use crate::matching::{Match, MatchKind, omnimatch};
use crate::scale::{AttackProfile, CrackTime, Score, estimate_attack_times, guesses_to_score};
use crate::scoring::most_guessable_match_sequence;
use crate::sections::{StrengthCheck, strength_details};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Password is too long: {length} characters (maximum {max})")]
    InputTooLong { length: usize, max: usize },
    #[error("Password is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },
    #[cfg(feature = "async")]
    #[error("Analysis cancelled")]
    Cancelled,
}

/// One piece of the winning decomposition, without the password text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub kind: MatchKind,
    pub start: usize,
    pub end: usize,
    pub guesses: f64,
}

/// Everything known about one password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub score: Score,
    pub guesses: f64,
    pub guesses_log10: f64,
    pub crack_times: Vec<CrackTime>,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
    pub match_summary: Vec<MatchSummary>,
    pub strength_details: Vec<StrengthCheck>,
    pub verdict: &'static str,
    /// What the score means in practice.
    pub description: &'static str,
    /// Winning decomposition. Holds password fragments, so never serialized.
    #[serde(skip)]
    pub sequence: Vec<Match>,
}

impl AnalysisResult {
    pub fn crack_time(&self, profile: AttackProfile) -> Option<&CrackTime> {
        self.crack_times.iter().find(|t| t.profile == profile)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Installs the process-wide custom list from the configured path.
    pub fn load_custom_dictionary(&self) -> Result<usize, DictionaryError> {
        init_custom_dictionary_from_path(&self.config.dictionary_path)
    }

    pub fn analyze(&self, password: &str) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_inputs(password, &[])
    }

    /// Like [`Analyzer::analyze`], also treating `user_inputs` (names,
    /// e-mail, site name...) as a ranked list of known words.
    pub fn analyze_with_inputs(
        &self,
        password: &str,
        user_inputs: &[&str],
    ) -> Result<AnalysisResult, AnalysisError> {
        #[cfg(feature = "async")]
        let result = self.run(password, user_inputs, None);

        #[cfg(not(feature = "async"))]
        let result = self.run(password, user_inputs);

        result
    }

    /// Checks `token` between pipeline stages and gives up with
    /// [`AnalysisError::Cancelled`] once it fires.
    #[cfg(feature = "async")]
    pub fn analyze_cancellable(
        &self,
        password: &SecretString,
        token: &CancellationToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.run(password.expose_secret(), &[], Some(token))
    }

    fn run(
        &self,
        password: &str,
        user_inputs: &[&str],
        #[cfg(feature = "async")] token: Option<&CancellationToken>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let length = password.chars().count();
        if length > self.config.max_length {
            #[cfg(feature = "tracing")]
            tracing::warn!("Rejected password of {} characters (max {})", length, self.config.max_length);
            return Err(AnalysisError::InputTooLong { length, max: self.config.max_length });
        }

        let user_dictionary = (!user_inputs.is_empty())
            .then(|| RankedDictionary::from_words(DictionaryKind::UserInputs, user_inputs));
        let custom = custom_dictionary();
        let mut dictionaries: Vec<&RankedDictionary> = builtin_dictionaries().iter().collect();
        dictionaries.extend(custom.as_deref());
        dictionaries.extend(user_dictionary.as_ref());

        #[cfg(feature = "async")]
        check_cancelled(token)?;
        let matches = omnimatch(password, &dictionaries);

        #[cfg(feature = "async")]
        check_cancelled(token)?;
        let decomposition = most_guessable_match_sequence(password, matches);

        #[cfg(feature = "async")]
        check_cancelled(token)?;
        let score = guesses_to_score(decomposition.guesses);
        let feedback = get_feedback(score, &decomposition.sequence);
        let details = strength_details(password);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Analyzed password: length={}, score={}, pieces={}",
            length,
            score.value(),
            decomposition.sequence.len()
        );

        let match_summary = decomposition
            .sequence
            .iter()
            .map(|m| MatchSummary { kind: m.kind(), start: m.start, end: m.end, guesses: m.guesses })
            .collect();

        Ok(AnalysisResult {
            score,
            guesses: decomposition.guesses,
            guesses_log10: decomposition.guesses.log10(),
            crack_times: estimate_attack_times(decomposition.guesses),
            warning: feedback.warning,
            suggestions: feedback.suggestions,
            match_summary,
            strength_details: details,
            verdict: score.summary(),
            description: score.description(),
            sequence: decomposition.sequence,
        })
    }
}

#[cfg(feature = "async")]
fn check_cancelled(token: Option<&CancellationToken>) -> Result<(), AnalysisError> {
    if token.is_some_and(CancellationToken::is_cancelled) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Password analysis cancelled");
        return Err(AnalysisError::Cancelled);
    }
    Ok(())
}

/// Analyzes `password` with the default configuration.
pub fn analyze(password: &str) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::default().analyze(password)
}

/// Analyzes raw bytes, which must be UTF-8.
pub fn analyze_bytes(password: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    let password = std::str::from_utf8(password).map_err(|e| {
        #[cfg(feature = "tracing")]
        tracing::warn!("Rejected password with invalid UTF-8 at byte {}", e.valid_up_to());
        AnalysisError::InvalidEncoding { valid_up_to: e.valid_up_to() }
    })?;
    analyze(password)
}

pub fn analyze_secret(password: &SecretString) -> Result<AnalysisResult, AnalysisError> {
    analyze(password.expose_secret())
}

#[cfg(feature = "async")]
pub fn analyze_cancellable(
    password: &SecretString,
    token: &CancellationToken,
) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::default().analyze_cancellable(password, token)
}

/// Debounced analysis for keystroke-driven callers: waits 300 ms, analyzes
/// unless `token` fired meanwhile, and sends the outcome over `tx`.
#[cfg(feature = "async")]
pub async fn analyze_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<Result<AnalysisResult, AnalysisError>>,
) {
    use std::time::Duration;

    #[cfg(feature = "tracing")]
    tracing::info!("analysis is about to start...");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let result = analyze_cancellable(password, &token);

    if let Err(e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password analysis result: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::reset_custom_dictionary_for_testing;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn setup_with_tempfile(words: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for word in words {
            writeln!(temp_file, "{}", word).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    fn test_analyze_common_password() {
        let result = analyze("password").unwrap();
        assert_eq!(result.score, Score::VeryWeak);
        assert_eq!(result.guesses, 2.0);
        assert_eq!(result.match_summary.len(), 1);
        assert_eq!(result.match_summary[0].kind, MatchKind::Dictionary);
        assert_eq!(result.warning.as_deref(), Some("This is a top-10 common password"));
        assert_eq!(result.verdict, "Very weak password. Easily guessable.");
        assert!(result.description.starts_with("This password can be cracked almost instantly."));
    }

    #[test]
    fn test_analyze_empty_password() {
        let result = analyze("").unwrap();
        assert_eq!(result.score, Score::VeryWeak);
        assert_eq!(result.guesses, 1.0);
        assert_eq!(result.guesses_log10, 0.0);
        assert!(result.match_summary.is_empty());
        assert_eq!(result.warning, None);
        assert_eq!(result.suggestions.len(), 2);
    }

    #[test]
    fn test_analyze_rejects_long_input() {
        let long = "a".repeat(257);
        assert_eq!(
            analyze(&long).unwrap_err(),
            AnalysisError::InputTooLong { length: 257, max: 256 }
        );
        assert!(analyze(&"a".repeat(256)).is_ok());
    }

    #[test]
    fn test_configured_max_length() {
        let analyzer = Analyzer::new(AnalyzerConfig::default().with_max_length(4));
        assert!(analyzer.analyze("abcd").is_ok());
        assert_eq!(
            analyzer.analyze("abcde").unwrap_err(),
            AnalysisError::InputTooLong { length: 5, max: 4 }
        );
        // counted in characters, not bytes
        assert!(analyzer.analyze("éééé").is_ok());
    }

    #[test]
    fn test_analyze_bytes() {
        assert!(analyze_bytes(b"hunter2").is_ok());
        assert_eq!(
            analyze_bytes(&[b'a', b'b', 0xff, b'c']).unwrap_err(),
            AnalysisError::InvalidEncoding { valid_up_to: 2 }
        );
    }

    #[test]
    fn test_analyze_secret_matches_plain() {
        let secret = SecretString::new("Tr0ub4dor&3".to_string().into());
        let from_secret = analyze_secret(&secret).unwrap();
        let plain = analyze("Tr0ub4dor&3").unwrap();
        assert_eq!(from_secret, plain);
    }

    #[test]
    #[serial]
    fn test_user_inputs_lower_guesses() {
        let analyzer = Analyzer::default();
        let without = analyzer.analyze("zorblaxian").unwrap();
        let with = analyzer.analyze_with_inputs("zorblaxian", &["Zorblaxian"]).unwrap();
        assert!(with.guesses < without.guesses);
        assert_eq!(with.guesses, 1.0);
        match &with.sequence[0].pattern {
            crate::matching::Pattern::Dictionary(p) => assert_eq!(p.dictionary, DictionaryKind::UserInputs),
            other => panic!("unexpected pattern {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_custom_dictionary_is_used() {
        reset_custom_dictionary_for_testing();
        let temp_file = setup_with_tempfile(&["zorblaxian", "quuxinator"]);
        let config = AnalyzerConfig {
            dictionary_path: temp_file.path().to_path_buf(),
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(config);
        assert_eq!(analyzer.load_custom_dictionary().unwrap(), 2);

        let result = analyzer.analyze("quuxinator").unwrap();
        assert_eq!(result.guesses, 2.0);
        assert_eq!(result.warning.as_deref(), Some("This is a top-10 common password"));

        reset_custom_dictionary_for_testing();
    }

    #[test]
    fn test_result_serializes_without_password() {
        let result = analyze("Tr0ub4dor&3").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 2);
        assert!(json.get("sequence").is_none());
        assert_eq!(json["match_summary"][0]["kind"], "leet_dictionary");
        assert_eq!(json["crack_times"].as_array().map(Vec::len), Some(4));
        assert_eq!(json["strength_details"][0]["name"], "Length");
        assert!(!json.to_string().contains("Tr0ub4dor"));
    }

    #[test]
    fn test_crack_time_lookup() {
        let result = analyze("password").unwrap();
        let fast = result.crack_time(AttackProfile::OfflineFastHash).unwrap();
        assert_eq!(fast.display, "0.0 seconds");
        let throttled = result.crack_time(AttackProfile::OnlineThrottled).unwrap();
        assert_eq!(throttled.display, "1.2 minutes");
    }
}

#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    #[tokio::test]
    async fn test_analyze_with_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let pwd = SecretString::new("SomePassword123!".to_string().into());
        let result = analyze_cancellable(&pwd, &token);

        assert_eq!(result.unwrap_err(), AnalysisError::Cancelled);
    }

    #[tokio::test]
    async fn test_analyze_without_cancellation() {
        let token = CancellationToken::new();

        let pwd = SecretString::new("TestPass123!".to_string().into());
        let result = analyze_cancellable(&pwd, &token).unwrap();

        assert_eq!(result, analyze("TestPass123!").unwrap());
    }

    #[tokio::test]
    async fn test_long_input_rejected_before_cancellation_check() {
        let token = CancellationToken::new();
        token.cancel();

        let pwd = SecretString::new("x".repeat(300).into());
        assert!(matches!(
            analyze_cancellable(&pwd, &token),
            Err(AnalysisError::InputTooLong { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        let pwd = SecretString::new("TestPass123!".to_string().into());

        analyze_tx(&pwd, token, tx).await;

        let result = rx.recv().await.expect("Should receive result");
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_tx_cancelled_during_debounce() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        let pwd = SecretString::new("TestPass123!".to_string().into());

        let canceller = token.clone();
        tokio::join!(analyze_tx(&pwd, token, tx), async move {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let result = rx.recv().await.expect("Should receive result");
        assert_eq!(result.unwrap_err(), AnalysisError::Cancelled);
    }
}
