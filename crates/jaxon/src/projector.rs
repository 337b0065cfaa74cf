//! Event projection: tokens in, typed handler callbacks out.
//!
//! [`EventProjector`] drives a [`Recognizer`] and turns each token into exactly
//! one [`Handler`] call, synchronously and in token order. Scalars are decoded
//! on the way through; nothing is buffered.
//!
//! ```
//! use core::convert::Infallible;
//!
//! use jaxon::{EventProjector, Handler, PrimitiveValue};
//!
//! #[derive(Default)]
//! struct Sum(f64);
//!
//! impl<'src> Handler<'src> for Sum {
//!     type Error = Infallible;
//!
//!     fn on_value(&mut self, value: PrimitiveValue<'src>) -> Result<(), Infallible> {
//!         if let PrimitiveValue::Float64(n) = value {
//!             self.0 += n;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut sum = Sum::default();
//! assert!(EventProjector::new("[1, 2.5, {\"x\": 3}]", &mut sum).parse());
//! assert_eq!(sum.0, 6.5);
//! ```

use alloc::borrow::{Cow, ToOwned};

use tracing::trace;

use crate::{
    ParseError, ParserOptions,
    escape::unescape,
    recognizer::{Recognizer, TokenSink},
    token::{Token, TokenKind},
};

/// A decoded scalar.
///
/// Strings borrow from the input unless escape decoding had to allocate.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue<'src> {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Any number, as a 64-bit float.
    Float64(f64),
    /// String content, without quotes.
    String(Cow<'src, str>),
}

/// The callbacks an [`EventProjector`] dispatches to.
///
/// Every method defaults to doing nothing, so handlers implement only what
/// they need. Returning an error stops the parse at once; it surfaces from
/// [`EventProjector::try_parse`] as [`ParseError::Sink`].
pub trait Handler<'src> {
    /// Error returned to abort the parse.
    type Error;

    /// A scalar value, either an array element, a member value or the root.
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_value(&mut self, value: PrimitiveValue<'src>) -> Result<(), Self::Error> {
        let _ = value;
        Ok(())
    }

    /// `[`
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_array_begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `]`
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_array_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `{`
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_object_begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A member key. The member's value follows immediately.
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_object_key(&mut self, key: Cow<'src, str>) -> Result<(), Self::Error> {
        let _ = key;
        Ok(())
    }

    /// `}`
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_object_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<'src, H> Handler<'src> for &mut H
where
    H: Handler<'src> + ?Sized,
{
    type Error = H::Error;

    fn on_value(&mut self, value: PrimitiveValue<'src>) -> Result<(), Self::Error> {
        (**self).on_value(value)
    }

    fn on_array_begin(&mut self) -> Result<(), Self::Error> {
        (**self).on_array_begin()
    }

    fn on_array_end(&mut self) -> Result<(), Self::Error> {
        (**self).on_array_end()
    }

    fn on_object_begin(&mut self) -> Result<(), Self::Error> {
        (**self).on_object_begin()
    }

    fn on_object_key(&mut self, key: Cow<'src, str>) -> Result<(), Self::Error> {
        (**self).on_object_key(key)
    }

    fn on_object_end(&mut self) -> Result<(), Self::Error> {
        (**self).on_object_end()
    }
}

/// Token sink that decodes and forwards to a handler.
#[derive(Debug)]
struct Dispatch<H> {
    handler: H,
    decode_escapes: bool,
}

impl<'src, H> Dispatch<H>
where
    H: Handler<'src>,
{
    fn text(&self, raw: &'src str) -> Result<Cow<'src, str>, ParseError<H::Error>> {
        if !self.decode_escapes {
            return Ok(Cow::Borrowed(raw));
        }
        unescape(raw).ok_or_else(|| {
            trace!(raw, "invalid escape sequence");
            ParseError::InvalidEscape(raw.to_owned())
        })
    }
}

impl<'src, H> TokenSink<'src> for Dispatch<H>
where
    H: Handler<'src>,
{
    type Error = ParseError<H::Error>;

    fn accept(&mut self, token: Token<'src>) -> Result<(), Self::Error> {
        let dispatched = match token.kind() {
            TokenKind::Null => self.handler.on_value(PrimitiveValue::Null),
            TokenKind::Boolean => self
                .handler
                .on_value(PrimitiveValue::Bool(token.text() == "true")),
            TokenKind::Number => {
                let n = token.text().parse::<f64>().map_err(|_| {
                    trace!(text = token.text(), "number lexeme is not a valid f64");
                    ParseError::InvalidNumber(token.text().to_owned())
                })?;
                self.handler.on_value(PrimitiveValue::Float64(n))
            }
            TokenKind::String => {
                let s = self.text(token.text())?;
                self.handler.on_value(PrimitiveValue::String(s))
            }
            TokenKind::ArrayBegin => self.handler.on_array_begin(),
            TokenKind::ArrayEnd => self.handler.on_array_end(),
            TokenKind::ObjectBegin => self.handler.on_object_begin(),
            TokenKind::ObjectEnd => self.handler.on_object_end(),
            TokenKind::ObjectKey => {
                let key = self.text(token.text())?;
                self.handler.on_object_key(key)
            }
        };
        dispatched.map_err(ParseError::Sink)
    }
}

/// Single-use parser that reports typed events to a [`Handler`].
///
/// Pass the handler by `&mut` to inspect it after parsing.
#[derive(Debug)]
pub struct EventProjector<'src, H> {
    recognizer: Recognizer<'src, Dispatch<H>>,
}

impl<'src, H> EventProjector<'src, H>
where
    H: Handler<'src>,
{
    /// Binds a projector to `input` and `handler`.
    pub fn new(input: &'src str, handler: H) -> Self {
        let options = ParserOptions::default();
        Self {
            recognizer: Recognizer::with_sink(
                input,
                Dispatch {
                    handler,
                    decode_escapes: options.decode_escapes,
                },
            ),
        }
    }

    /// Replaces the default options.
    #[must_use]
    pub fn with_options(self, options: ParserOptions) -> Self {
        let mut recognizer = self.recognizer.with_options(options);
        recognizer.sink_mut().decode_escapes = options.decode_escapes;
        Self { recognizer }
    }

    /// Parses the input, dispatching events as tokens are recognized.
    ///
    /// Returns exactly what the underlying recognizer returns. On failure the
    /// handler has already seen the events for everything matched before the
    /// failure point.
    #[must_use]
    pub fn parse(self) -> bool {
        self.try_parse().is_ok()
    }

    /// Parses the input and reports why it was rejected.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Syntax`] when the grammar rejects the input.
    /// - [`ParseError::InvalidNumber`] if a number lexeme does not convert to
    ///   `f64`.
    /// - [`ParseError::InvalidEscape`] if escape decoding is enabled and a
    ///   string or key contains an invalid escape.
    /// - [`ParseError::Sink`] with the handler's error if it aborted.
    pub fn try_parse(self) -> Result<(), ParseError<H::Error>> {
        self.recognizer.try_parse().map_err(ParseError::flatten)
    }
}
