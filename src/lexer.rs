//! Splitting of raw input lines into command tokens.
//!
//! There is no quoting, escaping or substitution: a token is exactly the text
//! between two runs of delimiter characters.

use crate::command::Command;

/// Characters that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Splits `line` into tokens on any run of [`DELIMITERS`].
///
/// Runs of delimiters collapse, and leading or trailing delimiters produce no empty
/// tokens. A blank line yields an empty [`Command`].
pub fn split_into_tokens(line: &str) -> Command {
    line.split(DELIMITERS)
        .filter(|token| !token.is_empty())
        .collect()
}
