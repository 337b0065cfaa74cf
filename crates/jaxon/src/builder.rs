//! Assembling owned [`Value`]s from parse events.

use alloc::{borrow::Cow, string::String, vec::Vec};

use thiserror::Error;

use crate::{
    EventProjector, Handler, ParseError, ParserOptions, PrimitiveValue, SyntaxError,
    value::{Array, Map, Value},
};

/// An event sequence that does not describe a well-formed value.
///
/// The recognizer never produces one; these only arise when a
/// [`ValueBuilder`] is driven by hand.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// A container end without a matching begin of the same kind.
    #[error("container end does not match the open container")]
    UnbalancedEnd,
    /// A key outside an object, or two keys in a row.
    #[error("object key in an unexpected position")]
    UnexpectedKey,
    /// A value inside an object that was not preceded by a key.
    #[error("object member value without a key")]
    MissingKey,
    /// Containers were still open when the values were taken.
    #[error("{0} container(s) left open")]
    Unclosed(usize),
}

#[derive(Debug)]
enum Frame {
    Array(Array),
    Object(Map, Option<String>),
}

/// A [`Handler`] that builds one [`Value`] per top-level JSON value.
///
/// Later duplicate keys overwrite earlier ones.
///
/// ```
/// use jaxon::{EventProjector, Value, ValueBuilder};
///
/// let mut builder = ValueBuilder::new();
/// assert!(EventProjector::new("[1, null]", &mut builder).parse());
/// assert_eq!(
///     builder.finish(),
///     Ok(vec![Value::Array(vec![Value::Number(1.0), Value::Null])])
/// );
/// ```
#[derive(Debug, Default)]
pub struct ValueBuilder {
    stack: Vec<Frame>,
    values: Vec<Value>,
}

impl ValueBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the completed top-level values.
    ///
    /// # Errors
    ///
    /// [`BuildError::Unclosed`] if a container is still open, which is the
    /// case after a failed parse.
    pub fn finish(self) -> Result<Vec<Value>, BuildError> {
        if self.stack.is_empty() {
            Ok(self.values)
        } else {
            Err(BuildError::Unclosed(self.stack.len()))
        }
    }

    fn insert(&mut self, value: Value) -> Result<(), BuildError> {
        match self.stack.last_mut() {
            None => self.values.push(value),
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Object(map, key)) => {
                let key = key.take().ok_or(BuildError::MissingKey)?;
                map.insert(key, value);
            }
        }
        Ok(())
    }

    /// A container may only open where a value is expected.
    fn open(&mut self, frame: Frame) -> Result<(), BuildError> {
        if let Some(Frame::Object(_, None)) = self.stack.last() {
            return Err(BuildError::MissingKey);
        }
        self.stack.push(frame);
        Ok(())
    }
}

impl<'src> Handler<'src> for ValueBuilder {
    type Error = BuildError;

    fn on_value(&mut self, value: PrimitiveValue<'src>) -> Result<(), BuildError> {
        self.insert(value.into())
    }

    fn on_array_begin(&mut self) -> Result<(), BuildError> {
        self.open(Frame::Array(Array::new()))
    }

    fn on_array_end(&mut self) -> Result<(), BuildError> {
        match self.stack.pop() {
            Some(Frame::Array(items)) => self.insert(Value::Array(items)),
            _ => Err(BuildError::UnbalancedEnd),
        }
    }

    fn on_object_begin(&mut self) -> Result<(), BuildError> {
        self.open(Frame::Object(Map::new(), None))
    }

    fn on_object_key(&mut self, key: Cow<'src, str>) -> Result<(), BuildError> {
        match self.stack.last_mut() {
            Some(Frame::Object(_, slot @ None)) => {
                *slot = Some(key.into_owned());
                Ok(())
            }
            _ => Err(BuildError::UnexpectedKey),
        }
    }

    fn on_object_end(&mut self) -> Result<(), BuildError> {
        match self.stack.pop() {
            Some(Frame::Object(map, None)) => self.insert(Value::Object(map)),
            _ => Err(BuildError::UnbalancedEnd),
        }
    }
}

/// Parses a complete JSON document into a [`Value`].
///
/// Uses [`ParserOptions::strict`]: escapes are decoded and anything but
/// whitespace after the value is an error.
///
/// # Errors
///
/// Returns the [`ParseError`] that stopped the parse.
///
/// # Examples
///
/// ```
/// use jaxon::{ParseError, SyntaxError, Value};
///
/// let v = jaxon::from_str(r#"{"greeting": "hi\n"}"#).unwrap();
/// assert_eq!(v.get("greeting"), Some(&Value::String("hi\n".into())));
///
/// assert_eq!(
///     jaxon::from_str("[1] [2]"),
///     Err(ParseError::Syntax(SyntaxError::TrailingInput))
/// );
/// ```
pub fn from_str(input: &str) -> Result<Value, ParseError<BuildError>> {
    from_str_with_options(input, ParserOptions::strict())
}

/// Parses `input` into a [`Value`] with the given options.
///
/// With [`ParserOptions::allow_multiple_json_values`] set, the first value is
/// returned; use [`values_from_str`] to get all of them.
///
/// # Errors
///
/// Returns the [`ParseError`] that stopped the parse.
pub fn from_str_with_options(
    input: &str,
    options: ParserOptions,
) -> Result<Value, ParseError<BuildError>> {
    values_from_str(input, options)?
        .into_iter()
        .next()
        .ok_or(ParseError::Syntax(SyntaxError::Mismatch))
}

/// Parses every top-level value in `input`.
///
/// # Errors
///
/// Returns the [`ParseError`] that stopped the parse.
///
/// # Examples
///
/// ```
/// use jaxon::{ParserOptions, Value, values_from_str};
///
/// let options = ParserOptions {
///     allow_multiple_json_values: true,
///     ..ParserOptions::strict()
/// };
/// let values = values_from_str("1\n{}\n", options).unwrap();
/// assert_eq!(values, [Value::Number(1.0), Value::Object(Default::default())]);
/// ```
pub fn values_from_str(
    input: &str,
    options: ParserOptions,
) -> Result<Vec<Value>, ParseError<BuildError>> {
    let mut builder = ValueBuilder::new();
    EventProjector::new(input, &mut builder)
        .with_options(options)
        .try_parse()?;
    builder.finish().map_err(ParseError::Sink)
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use rstest::rstest;

    use super::*;

    #[test]
    fn nested_document() {
        let v = from_str(r#"{"a": [1, {"b": null}], "c": "d", "e": {}}"#).unwrap();
        assert_eq!(
            v.to_string(),
            r#"{"a":[1,{"b":null}],"c":"d","e":{}}"#
        );
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let v = from_str(r#"{"k": 1, "k": 2}"#).unwrap();
        assert_eq!(v.get("k"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn default_options_keep_raw_strings_and_trailing_input() {
        let v = from_str_with_options(r#"["a\tb"] rest"#, ParserOptions::default()).unwrap();
        assert_eq!(v, Value::Array(vec![Value::String(r"a\tb".to_string())]));
    }

    #[rstest]
    #[case("", ParseError::Syntax(SyntaxError::Mismatch))]
    #[case("[1,", ParseError::Syntax(SyntaxError::Mismatch))]
    #[case("[] x", ParseError::Syntax(SyntaxError::TrailingInput))]
    #[case(r#"["\u12"]"#, ParseError::InvalidEscape(r"\u12".to_string()))]
    fn errors(#[case] input: &str, #[case] expected: ParseError<BuildError>) {
        assert_eq!(from_str(input), Err(expected));
    }

    #[test]
    fn hand_driven_misuse_is_reported() {
        let mut b = ValueBuilder::new();
        assert_eq!(b.on_array_end(), Err(BuildError::UnbalancedEnd));

        let mut b = ValueBuilder::new();
        b.on_object_begin().unwrap();
        assert_eq!(b.on_value(PrimitiveValue::Null), Err(BuildError::MissingKey));
        assert_eq!(b.on_array_begin(), Err(BuildError::MissingKey));
        b.on_object_key("k".into()).unwrap();
        assert_eq!(b.on_object_key("j".into()), Err(BuildError::UnexpectedKey));
        assert_eq!(b.on_object_end(), Err(BuildError::UnbalancedEnd));

        let mut b = ValueBuilder::new();
        b.on_array_begin().unwrap();
        assert_eq!(b.depth(), 1);
        assert_eq!(b.finish(), Err(BuildError::Unclosed(1)));
    }

    #[test]
    fn failed_parse_leaves_builder_unfinished() {
        let mut b = ValueBuilder::new();
        assert!(!EventProjector::new(r#"{"a": [1"#, &mut b).parse());
        assert_eq!(b.finish(), Err(BuildError::Unclosed(2)));
    }
}
