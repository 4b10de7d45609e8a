//! Input validation utilities

/// Validate that a raw line is short enough and carries no NUL bytes
pub fn is_valid_input(input: &str, max_length: usize) -> bool {
    input.len() <= max_length && !input.contains('\0')
}

/// Strip the line terminator left by the line reader
pub fn strip_line_ending(input: &str) -> &str {
    input.trim_end_matches(['\r', '\n'])
}
