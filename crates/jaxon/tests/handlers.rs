#![expect(missing_docs)]

use std::borrow::Cow;

use jaxon::{EventProjector, Handler, ParseError, ParserOptions, PrimitiveValue};

/// Checks keys and numeric values against an expected member list.
struct ExpectMembers {
    members: &'static [(&'static str, f64)],
    next: usize,
}

#[derive(Debug, PartialEq)]
enum Unexpected {
    Key(String),
    Value(PrimitiveValue<'static>),
}

impl<'src> Handler<'src> for ExpectMembers {
    type Error = Unexpected;

    fn on_object_key(&mut self, key: Cow<'src, str>) -> Result<(), Unexpected> {
        match self.members.get(self.next) {
            Some((expected, _)) if *expected == key => Ok(()),
            _ => Err(Unexpected::Key(key.into_owned())),
        }
    }

    fn on_value(&mut self, value: PrimitiveValue<'src>) -> Result<(), Unexpected> {
        let expected = self.members.get(self.next).map(|(_, v)| *v);
        self.next += 1;
        if let PrimitiveValue::Float64(n) = value {
            if Some(n) == expected {
                return Ok(());
            }
        }
        Err(Unexpected::Value(owned(value)))
    }
}

fn owned(value: PrimitiveValue<'_>) -> PrimitiveValue<'static> {
    match value {
        PrimitiveValue::Null => PrimitiveValue::Null,
        PrimitiveValue::Bool(b) => PrimitiveValue::Bool(b),
        PrimitiveValue::Float64(n) => PrimitiveValue::Float64(n),
        PrimitiveValue::String(s) => PrimitiveValue::String(Cow::Owned(s.into_owned())),
    }
}

const MEMBERS: &[(&str, f64)] = &[("first", 1.0), ("second", 2.0), ("third", 3.0)];

#[test]
fn keys_and_values_arrive_in_order() {
    let mut handler = ExpectMembers {
        members: MEMBERS,
        next: 0,
    };
    let json = r#"{ "first" : 1, "second" : 2, "third" : 3 }"#;
    assert!(EventProjector::new(json, &mut handler).parse());
    assert_eq!(handler.next, 3);
}

#[test]
fn unexpected_key_aborts() {
    let handler = ExpectMembers {
        members: MEMBERS,
        next: 0,
    };
    let json = r#"{ "first" : 1, "third" : 3 }"#;
    assert_eq!(
        EventProjector::new(json, handler).try_parse(),
        Err(ParseError::Sink(Unexpected::Key("third".into())))
    );
}

#[test]
fn unexpected_value_aborts() {
    let handler = ExpectMembers {
        members: MEMBERS,
        next: 0,
    };
    let json = r#"{ "first" : "one" }"#;
    assert_eq!(
        EventProjector::new(json, handler).try_parse(),
        Err(ParseError::Sink(Unexpected::Value(PrimitiveValue::String(
            "one".into()
        ))))
    );
}

/// Implements nothing; every callback falls back to the default.
struct Quiet;

impl Handler<'_> for Quiet {
    type Error = std::convert::Infallible;
}

#[test]
fn default_callbacks_do_nothing() {
    assert!(EventProjector::new(r#"{"a": [1, "b", null, {}]}"#, Quiet).parse());
    assert!(!EventProjector::new(r#"{"a": [1, "b", null, {}"#, Quiet).parse());
}

#[test]
fn projector_verdict_matches_the_recognizer() {
    let options = ParserOptions {
        reject_trailing_input: true,
        ..ParserOptions::default()
    };
    for input in ["[1] x", "[1] ", "{\"k\": tru}", "\"\\u00\"", "7"] {
        let tokens = jaxon::Recognizer::new(input, |_| {})
            .with_options(options)
            .parse();
        let events = EventProjector::new(input, Quiet).with_options(options).parse();
        assert_eq!(tokens, events, "{input:?}");
    }
}

#[derive(Default)]
struct Strings(Vec<String>);

impl<'src> Handler<'src> for Strings {
    type Error = std::convert::Infallible;

    fn on_value(&mut self, value: PrimitiveValue<'src>) -> Result<(), Self::Error> {
        if let PrimitiveValue::String(s) = value {
            assert!(matches!(s, Cow::Borrowed(_)), "{s:?} was copied");
            self.0.push(s.into_owned());
        }
        Ok(())
    }
}

#[test]
fn undecoded_strings_borrow_from_the_input() {
    let mut strings = Strings::default();
    let input = String::from(r#"["plain", "esc\"aped"]"#);
    assert!(EventProjector::new(&input, &mut strings).parse());
    assert_eq!(strings.0, ["plain", r#"esc\"aped"#]);
}
