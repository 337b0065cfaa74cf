use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use super::{prefix, quickcheck_tests, recognize};
use crate::{ParserOptions, SyntaxError, Token, Tokens, Value};

/// Token sequence and outcome from the pull tokenizer.
fn pull(input: &str, options: ParserOptions) -> (Option<SyntaxError>, Vec<Token<'_>>) {
    let mut tokens = Vec::new();
    for item in Tokens::with_options(input, options) {
        match item {
            Ok(t) => tokens.push(t),
            Err(e) => return (Some(e), tokens),
        }
    }
    (None, tokens)
}

fn agree(input: &str, options: ParserOptions) -> bool {
    let (res, pushed) = recognize(input, options);
    let (err, pulled) = pull(input, options);
    pushed == pulled && res.err().and_then(|e| e.as_syntax()) == err
}

/// Property: push and pull produce the same tokens and the same verdict on
/// valid documents, their prefixes, and documents followed by junk.
#[test]
fn push_pull_agreement_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(values: Vec<Value>, cut: usize, tail: String, options: ParserOptions) -> bool {
        let mut doc = values
            .iter()
            .map(alloc::string::ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let cut = cut % (doc.len() + 1);
        doc = String::from(prefix(&doc, cut));
        doc.push_str(&tail);
        agree(&doc, options)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<Value>, usize, String, ParserOptions) -> bool);
}

#[test]
fn agreement_on_edge_cases() {
    let multi = ParserOptions {
        allow_multiple_json_values: true,
        reject_trailing_input: true,
        ..ParserOptions::default()
    };
    let shallow = ParserOptions {
        max_depth: Some(0),
        ..ParserOptions::default()
    };
    for input in ["", " ", "[1 {}", "{\"a\":}", "1 2 ]", "[[]", "\"a\\\"", "-.5e", "1 x"] {
        assert!(agree(input, ParserOptions::default()), "{input:?}");
        assert!(agree(input, multi), "{input:?}");
        assert!(agree(input, shallow), "{input:?}");
        assert!(agree(input, ParserOptions::strict()), "{input:?}");
    }
}
