//! Short code generation.

use rand::Rng;

/// Alphabet short codes are drawn from: `[A-Za-z0-9]`.
pub const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Number of characters in a short code.
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code.
///
/// Each character is drawn uniformly from [`CODE_CHARSET`], giving 62^6
/// (about 5.6e10) possible codes. Codes are identifiers, not secrets, so the
/// thread-local RNG is sufficient.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

/// Codes that collide with fixed top-level routes.
pub const RESERVED_CODES: &[&str] = &["health"];

/// Returns true if `code` would be shadowed by a fixed route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
