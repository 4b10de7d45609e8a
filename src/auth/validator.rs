//! User name resolution
//!
//! Picks the name the session greets, falling back to the configured default
//! instead of failing startup.

const MAX_USERNAME_LENGTH: usize = 64;

/// Performs basic input sanitation on a user supplied name.
fn is_valid_username(input: &str) -> bool {
    !input.trim().is_empty()
        && input.chars().count() <= MAX_USERNAME_LENGTH
        && !input.chars().any(char::is_control)
}

/// Returns the requested name when it is usable, otherwise `default`.
pub fn resolve_username(requested: Option<&str>, default: &str) -> String {
    match requested.map(str::trim) {
        Some(name) if is_valid_username(name) => name.to_string(),
        _ => default.to_string(),
    }
}
