//! Character variety sections - uppercase, lowercase, numbers, special chars.

use std::sync::LazyLock;
use regex::Regex;

use super::SectionResult;

static SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("valid special chars pattern"));

fn presence(found: bool, pass: &str, fail: &str) -> SectionResult {
    if found {
        Ok(pass.to_string())
    } else {
        Err(fail.to_string())
    }
}

pub fn uppercase_section(password: &str) -> SectionResult {
    presence(
        password.chars().any(|c| c.is_ascii_uppercase()),
        "Contains uppercase letters",
        "No uppercase letters found",
    )
}

pub fn lowercase_section(password: &str) -> SectionResult {
    presence(
        password.chars().any(|c| c.is_ascii_lowercase()),
        "Contains lowercase letters",
        "No lowercase letters found",
    )
}

pub fn numbers_section(password: &str) -> SectionResult {
    presence(
        password.chars().any(|c| c.is_ascii_digit()),
        "Contains numbers",
        "No numbers found",
    )
}

/// Only the punctuation in `!@#$%^&*(),.?":{}|<>` counts here.
pub fn special_chars_section(password: &str) -> SectionResult {
    presence(
        SPECIAL_CHARS.is_match(password),
        "Contains special characters",
        "No special characters found",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variety_missing_uppercase() {
        assert_eq!(uppercase_section("lowercase123!"), Err("No uppercase letters found".to_string()));
        assert!(uppercase_section("Upper").is_ok());
    }

    #[test]
    fn test_variety_missing_lowercase() {
        assert_eq!(lowercase_section("UPPERCASE123!"), Err("No lowercase letters found".to_string()));
        assert!(lowercase_section("lower").is_ok());
    }

    #[test]
    fn test_variety_missing_numbers() {
        assert!(numbers_section("NoNumbers!").is_err());
        assert_eq!(numbers_section("n0"), Ok("Contains numbers".to_string()));
    }

    #[test]
    fn test_variety_special_chars() {
        assert!(special_chars_section("NoSpecial123").is_err());
        assert!(special_chars_section("Has{brace").is_ok());
        assert!(special_chars_section("quote\"d").is_ok());
        // outside the accepted set
        assert!(special_chars_section("under_score-dash").is_err());
    }
}
