//! Tokenization of a raw command line.
//!
//! Words are separated by whitespace and nothing else: there is no quoting,
//! no escaping and no variable expansion. Control symbols (`&`, `|`, `<`,
//! `>>`) are ordinary tokens here; their meaning is decided later by
//! [`crate::command::classify`], which only recognizes them at structural
//! positions.

/// Split a command line into whitespace-separated tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}
