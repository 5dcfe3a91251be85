//! Pattern sections - common substrings and runs of one character.

use super::SectionResult;

const COMMON_SEQUENCES: [&str; 5] = ["123", "abc", "qwerty", "password", "admin"];

const MAX_RUN: usize = 2;

/// Fails when the password contains a well-known substring, ignoring case.
pub fn common_patterns_section(password: &str) -> SectionResult {
    let lower = password.to_lowercase();
    if COMMON_SEQUENCES.iter().any(|seq| lower.contains(seq)) {
        return Err("Contains common patterns or sequences".to_string());
    }
    Ok("No obvious patterns detected".to_string())
}

/// Fails when any character appears three or more times in a row.
pub fn repetition_section(password: &str) -> SectionResult {
    let mut run = 0;
    let mut previous: Option<char> = None;
    for c in password.chars() {
        run = if previous == Some(c) { run + 1 } else { 1 };
        if run > MAX_RUN {
            return Err("Contains repeated characters".to_string());
        }
        previous = Some(c);
    }
    Ok("No excessive character repetition".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_patterns_detected() {
        for pwd in ["test1234", "ABCdef", "myQwertyKey", "PassWord!", "admin01"] {
            assert!(common_patterns_section(pwd).is_err(), "{}", pwd);
        }
    }

    #[test]
    fn test_common_patterns_clean() {
        assert_eq!(
            common_patterns_section("RandomPass!@#Word"),
            Ok("No obvious patterns detected".to_string())
        );
    }

    #[test]
    fn test_repetition_detected() {
        assert!(repetition_section("aaaaBBBB1111").is_err());
        assert!(repetition_section("xx!!!").is_err());
    }

    #[test]
    fn test_repetition_pairs_allowed() {
        assert!(repetition_section("aabbcc").is_ok());
        assert!(repetition_section("").is_ok());
    }
}
