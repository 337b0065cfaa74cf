use alloc::vec::Vec;

use crate::{ParseError, ParserOptions, Recognizer, Token};

mod arbitrary;
mod property_agreement;

/// Runs the recognizer and collects everything it emitted.
pub(crate) fn recognize(input: &str, options: ParserOptions) -> (Result<(), ParseError>, Vec<Token<'_>>) {
    let mut tokens = Vec::new();
    let res = Recognizer::new(input, |t| tokens.push(t))
        .with_options(options)
        .try_parse();
    (res, tokens)
}

pub(crate) fn quickcheck_tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Longest prefix of `s` that is at most `cut` bytes and ends on a char
/// boundary.
pub(crate) fn prefix(s: &str, cut: usize) -> &str {
    let mut end = cut.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
