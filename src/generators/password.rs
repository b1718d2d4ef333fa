// src/generators/password.rs
use rand::Rng;

use crate::models::GeneratorOptions;

/// Bounds for the generated password length. Requests outside the
/// range are clamped, never rejected.
pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 32;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+~`|}{[]\\:;?><,./-=";

/// Generate a random password from the enabled character classes.
///
/// The alphabet always contains the lowercase letters, so generation
/// never fails even with every toggle off. Characters are drawn
/// uniformly with replacement; repeated characters and missing
/// categories in a single output are expected.
pub fn generate_password(options: &GeneratorOptions) -> String {
    let mut rng = rand::thread_rng();

    let mut chars: Vec<u8> = Vec::new();
    chars.extend(LOWERCASE);
    if options.include_uppercase {
        chars.extend(UPPERCASE);
    }
    if options.include_numbers {
        chars.extend(DIGITS);
    }
    if options.include_symbols {
        chars.extend(SYMBOLS);
    }

    let length = options.length.clamp(MIN_LENGTH, MAX_LENGTH);

    let mut password = String::with_capacity(length);
    for _ in 0..length {
        let idx = rng.gen_range(0..chars.len());
        password.push(chars[idx] as char);
    }

    password
}
