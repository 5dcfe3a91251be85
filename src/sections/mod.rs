//! Composition checks
//!
//! Each section inspects one aspect of how a password is put together and
//! reports a pass/fail verdict with a message. These run next to the guess
//! estimator and do not affect the score.

mod length;
mod pattern;
mod variety;

use serde::Serialize;

pub use length::length_section;
pub use pattern::{common_patterns_section, repetition_section};
pub use variety::{lowercase_section, numbers_section, special_chars_section, uppercase_section};

/// Result type for section functions.
/// - `Ok(message)` - check passed
/// - `Err(message)` - check failed
pub type SectionResult = Result<String, String>;

/// One named composition check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthCheck {
    pub name: &'static str,
    pub pass: bool,
    pub message: String,
}

/// Runs every composition check in display order.
pub fn strength_details(password: &str) -> Vec<StrengthCheck> {
    let sections: [(&'static str, fn(&str) -> SectionResult); 7] = [
        ("Length", length_section),
        ("Uppercase letters", uppercase_section),
        ("Lowercase letters", lowercase_section),
        ("Numbers", numbers_section),
        ("Special characters", special_chars_section),
        ("Common patterns", common_patterns_section),
        ("Repetition", repetition_section),
    ];

    sections
        .iter()
        .map(|&(name, section_fn)| match section_fn(password) {
            Ok(message) => StrengthCheck { name, pass: true, message },
            Err(message) => StrengthCheck { name, pass: false, message },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_details_order_and_names() {
        let details = strength_details("Abc123!x");
        let names: Vec<&str> = details.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "Length",
                "Uppercase letters",
                "Lowercase letters",
                "Numbers",
                "Special characters",
                "Common patterns",
                "Repetition"
            ]
        );
    }

    #[test]
    fn test_strength_details_verdicts() {
        let details = strength_details("Abc123!x");
        let passes: Vec<bool> = details.iter().map(|c| c.pass).collect();
        assert_eq!(passes, [true, true, true, true, true, false, true]);
    }

    #[test]
    fn test_strength_details_empty() {
        let details = strength_details("");
        assert!(!details[0].pass);
        assert!(details[5].pass);
        assert!(details[6].pass);
    }
}
