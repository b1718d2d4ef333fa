// src/generators/strength.rs
use crate::models::Strength;

const LABELS: [&str; 5] = ["Very weak", "Weak", "Medium", "Strong", "Very strong"];

/// Score a password from 0 (very weak) to 4 (very strong).
///
/// One point for length >= 8, another for length >= 12, and one point
/// per character class present (uppercase, lowercase, digit, symbol);
/// the final score is `min(4, points / 2)`. Character classes only
/// cover the ASCII ranges, so anything else (accented letters
/// included) counts as a symbol. Pure and cheap enough to run on
/// every keystroke.
pub fn evaluate_strength(password: &str) -> Strength {
    if password.is_empty() {
        return Strength { score: 0, label: LABELS[0] };
    }

    let mut points = 0u8;

    let length = password.chars().count();
    if length >= 8 {
        points += 1;
    }
    if length >= 12 {
        points += 1;
    }

    if password.chars().any(|c| c.is_ascii_uppercase()) {
        points += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        points += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        points += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        points += 1;
    }

    let score = (points / 2).min(4);
    Strength { score, label: LABELS[score as usize] }
}
