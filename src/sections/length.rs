//! Length section - checks password minimum and recommended length.

use super::SectionResult;

const MIN_LENGTH: usize = 8;
const RECOMMENDED_LENGTH: usize = 12;

/// Checks the password length in characters.
///
/// Passwords between the minimum and the recommended length pass with a
/// nudge towards the recommended length.
pub fn length_section(password: &str) -> SectionResult {
    let length = password.chars().count();
    if length < MIN_LENGTH {
        return Err(format!(
            "Password is too short (minimum {} characters)",
            MIN_LENGTH
        ));
    }
    if length < RECOMMENDED_LENGTH {
        return Ok(format!(
            "Password meets minimum length, but {}+ characters is recommended",
            RECOMMENDED_LENGTH
        ));
    }
    Ok("Password has good length".to_string())
}
