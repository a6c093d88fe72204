//! Password strength scoring.
//!
//! Pure, deterministic scoring used to gate key generation and rotation.
//! The vault refuses weak passphrases unless the caller explicitly
//! overrides.

use serde::Serialize;

/// Minimum score considered strong enough to protect key material.
pub const STRONG_THRESHOLD: u8 = 70;

/// Substrings that mark a password as following a common pattern.
const WEAK_SUBSTRINGS: &[&str] = &["password", "12345", "qwerty"];

/// Result of scoring a candidate passphrase.
#[derive(Clone, Debug, Serialize)]
pub struct StrengthReport {
    pub score: u8,
    pub feedback: Vec<String>,
    pub is_strong: bool,
}

/// Scores a candidate passphrase on a 0–100 scale.
///
/// Length ≥ 12 earns 25 points and each present character class (upper,
/// lower, digit, special) earns 15. Absence of all known weak substrings
/// earns the final 15; each one present instead costs 25, saturating at
/// zero, so a common pattern cannot hide behind otherwise-perfect
/// composition.
pub fn evaluate(password: &str) -> StrengthReport {
    let mut score: i32 = 0;
    let mut feedback = Vec::new();

    if password.chars().count() >= 12 {
        score += 25;
    } else {
        feedback.push("use at least 12 characters".to_string());
    }

    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 15;
    } else {
        feedback.push("add an uppercase letter".to_string());
    }

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 15;
    } else {
        feedback.push("add a lowercase letter".to_string());
    }

    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 15;
    } else {
        feedback.push("add a digit".to_string());
    }

    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 15;
    } else {
        feedback.push("add a special character".to_string());
    }

    let lowered = password.to_lowercase();
    let hits: Vec<&&str> = WEAK_SUBSTRINGS
        .iter()
        .filter(|w| lowered.contains(**w))
        .collect();
    if hits.is_empty() {
        score += 15;
    } else {
        for weak in hits {
            score -= 25;
            feedback.push(format!("avoid common patterns like \"{weak}\""));
        }
    }

    let score = score.clamp(0, 100) as u8;
    StrengthReport {
        score,
        feedback,
        is_strong: score >= STRONG_THRESHOLD,
    }
}
