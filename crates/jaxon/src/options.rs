/// Nesting depth accepted by [`ParserOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration options for the recognizer and the layers built on it.
///
/// # Default
///
/// All boolean options default to `false`, which gives the plain grammar:
/// one leading value is recognized, anything after it is left
/// unread, and string content is passed through undecoded. Nesting is limited
/// to [`DEFAULT_MAX_DEPTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default the whitespace skip accepts space, horizontal tab, line
    /// feed, carriage return, vertical tab and form feed.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Whether to fail when non-whitespace input follows the leading value.
    ///
    /// By default `[1] garbage` is a successful parse of `[1]`. Setting this
    /// option requires the whole input to be consumed.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_trailing_input: bool,

    /// Whether to recognize multiple whitespace-delimited JSON values.
    ///
    /// When `true`, the recognizer keeps matching values after the first one
    /// until the input is exhausted. This supports formats such as JSON Lines
    /// and arbitrary concatenations of JSON values. Input that does not form
    /// a value fails the parse.
    ///
    /// # Examples
    ///
    /// ```json
    /// {}{}{}
    /// ```
    ///
    /// ```json
    /// 123 45 678 9
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_json_values: bool,

    /// Whether the event layer decodes backslash escapes in strings and keys.
    ///
    /// Tokens always carry the raw source text; this only affects the values
    /// handed to a [`Handler`](crate::Handler).
    ///
    /// # Default
    ///
    /// `false`
    pub decode_escapes: bool,

    /// Maximum array/object nesting depth, or `None` for no limit.
    ///
    /// The recognizer is recursive, so an unbounded limit lets hostile input
    /// exhaust the stack.
    ///
    /// # Default
    ///
    /// `Some(DEFAULT_MAX_DEPTH)`
    pub max_depth: Option<usize>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_unicode_whitespace: false,
            reject_trailing_input: false,
            allow_multiple_json_values: false,
            decode_escapes: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ParserOptions {
    /// Options for building complete values: escapes decoded, trailing input
    /// rejected.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            reject_trailing_input: true,
            decode_escapes: true,
            ..Self::default()
        }
    }
}
