//! A recursive-descent JSON recognizer.
//!
//! [`Recognizer`] walks borrowed input once and pushes a [`Token`] to a sink
//! for every value, key and bracket it recognizes. [`Tokens`] yields the same
//! tokens on demand. [`EventProjector`] sits on top of the recognizer and
//! turns tokens into typed [`Handler`] callbacks, and [`ValueBuilder`] is a
//! handler that assembles owned [`Value`]s.
//!
//! ```
//! use jaxon::{Recognizer, TokenKind};
//!
//! let mut depth = 0;
//! let mut max_depth = 0;
//! let ok = Recognizer::new(r#"{"a": [[1], {}]}"#, |t| {
//!     if t.kind().is_begin() {
//!         depth += 1;
//!         max_depth = max_depth.max(depth);
//!     } else if t.kind().is_end() {
//!         depth -= 1;
//!     }
//! })
//! .parse();
//! assert!(ok);
//! assert_eq!(max_depth, 3);
//! ```
//!
//! By default only the leading value is recognized and anything after it is
//! ignored; [`ParserOptions`] can require the whole input to be consumed.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod builder;
mod error;
mod escape;
mod options;
mod projector;
mod recognizer;
mod scanner;
mod token;
mod tokens;
mod value;

#[cfg(test)]
mod tests;

pub use builder::{BuildError, ValueBuilder, from_str, from_str_with_options, values_from_str};
pub use error::{ParseError, SyntaxError};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};
pub use projector::{EventProjector, Handler, PrimitiveValue};
pub use recognizer::{Recognizer, TokenSink};
pub use token::{Token, TokenKind};
pub use tokens::{Tokens, tokenize};
pub use value::{Array, Map, Value};
