//! Command line tokenizer
//!
//! Splits an input line into argument tokens on unquoted spaces. A token may
//! be wrapped in a pair of matching quotes (`'` or `"`), which are stripped.

const SEPARATOR: char = ' ';

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Split a raw input line into tokens.
///
/// Any quote character toggles quoted mode, whichever quote opened it. Only
/// the final unwrapping requires the first and last characters to match, so
/// a lone or mismatched quote is kept verbatim and never an error.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if is_quote(c) {
            in_quotes = !in_quotes;
            current.push(c);
        } else if c == SEPARATOR && !in_quotes {
            if !current.is_empty() {
                tokens.push(unwrap_quotes(std::mem::take(&mut current)));
            }
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        tokens.push(unwrap_quotes(current));
    }

    tokens
}

fn unwrap_quotes(raw: String) -> String {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if is_quote(first) && first == last => {
            raw[first.len_utf8()..raw.len() - last.len_utf8()].to_string()
        }
        _ => raw,
    }
}
