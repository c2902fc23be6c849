pub mod url_validator;

/// Alphabet for generated shortcodes. Lowercase plus digits keeps codes
/// case-insensitive-friendly and URL safe.
const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random shortcode candidate of the given length.
///
/// Codes are not security tokens, so the default thread-local PRNG is enough.
/// Collision handling is the registry's job.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}
