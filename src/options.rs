//! Configuration options for TOON encoding and decoding.
//!
//! - [`ToonOptions`]: encoder configuration (indent width, delimiter, tabular preference,
//!   field naming rules)
//! - [`DecodeOptions`]: decoder configuration (lenient or strict mode, field naming rules)
//! - [`Delimiter`]: separator for inline arrays and tabular rows (comma, tab, or pipe)
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{to_string_with_options, Delimiter, ToonOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { numbers: Vec<i32> }
//!
//! let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
//! let toon = to_string_with_options(&Data { numbers: vec![1, 2, 3] }, options).unwrap();
//! assert_eq!(toon, "numbers[3]: 1|2|3\n");
//! ```

use crate::schema::FieldRules;

/// Delimiter choice for inline arrays and tabular rows.
///
/// The encoder applies one delimiter uniformly for a whole call. The decoder never
/// needs to be told which one was used: it infers it per line, testing for a tab,
/// then a pipe, then a comma.
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_str(), "\t");
/// assert_eq!(Delimiter::infer("a|b"), Delimiter::Pipe);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Inference priority used by the decoder.
    pub const PRIORITY: [Delimiter; 3] = [Delimiter::Tab, Delimiter::Pipe, Delimiter::Comma];

    /// Returns the string representation of this delimiter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Infers the delimiter of a row or inline value text.
    ///
    /// Only characters outside double-quoted tokens count. Falls back to
    /// [`Delimiter::Comma`] when none is present.
    #[must_use]
    pub fn infer(text: &str) -> Delimiter {
        Delimiter::PRIORITY
            .into_iter()
            .find(|d| crate::grammar::contains_unquoted(text, d.as_char()))
            .unwrap_or(Delimiter::Comma)
    }
}

/// Encoder configuration.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{ToonOptions, Delimiter};
///
/// let options = ToonOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_tabular(false);
/// assert_eq!(options.indent, 4);
/// assert!(!options.use_tabular);
/// ```
#[derive(Clone, Debug)]
pub struct ToonOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    pub delimiter: Delimiter,
    /// Render sequences of uniform flat records as tables instead of lists.
    pub use_tabular: bool,
    pub field_rules: FieldRules,
}

impl Default for ToonOptions {
    fn default() -> Self {
        ToonOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            use_tabular: true,
            field_rules: FieldRules::default(),
        }
    }
}

impl ToonOptions {
    /// Creates default options (2-space indent, comma delimiter, tabular enabled).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::ToonOptions;
    ///
    /// let options = ToonOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(options.use_tabular);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width (number of spaces per level).
    ///
    /// A width of zero would make nesting unrecoverable, so it is clamped to one.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Sets the delimiter for inline arrays and tabular rows.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables the tabular form for uniform record sequences.
    #[must_use]
    pub fn with_tabular(mut self, use_tabular: bool) -> Self {
        self.use_tabular = use_tabular;
        self
    }

    /// Installs codec-specific field renames and omissions.
    #[must_use]
    pub fn with_field_rules(mut self, rules: FieldRules) -> Self {
        self.field_rules = rules;
        self
    }
}

/// How the decoder treats input that does not follow the grammar exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Skip lines without `:`, treat malformed array headers as plain keys, truncate
    /// short tabular blocks, and ignore stray deeper lines.
    #[default]
    Lenient,
    /// Report each of those irregularities as [`Error::Syntax`](crate::Error::Syntax).
    Strict,
}

/// Decoder configuration.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{from_str_with_options, DecodeOptions};
///
/// let options = DecodeOptions::new().strict();
/// let result: Result<Vec<u32>, _> = from_str_with_options("[3]: 1,2", options);
/// assert!(result.is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
    pub mode: DecodeMode,
    pub field_rules: FieldRules,
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to [`DecodeMode::Strict`].
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.mode = DecodeMode::Strict;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Installs the same field rules the encoder used, so renamed and omitted
    /// fields resolve identically in both directions.
    #[must_use]
    pub fn with_field_rules(mut self, rules: FieldRules) -> Self {
        self.field_rules = rules;
        self
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.mode == DecodeMode::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_options() {
        let options = ToonOptions::default();
        assert_eq!(options.indent, 2);
        assert_eq!(options.delimiter, Delimiter::Comma);
        assert!(options.use_tabular);
        assert_eq!(DecodeOptions::default().mode, DecodeMode::Lenient);
    }

    #[test]
    fn test_infer_priority() {
        assert_eq!(Delimiter::infer("a\tb|c,d"), Delimiter::Tab);
        assert_eq!(Delimiter::infer("a|b,c"), Delimiter::Pipe);
        assert_eq!(Delimiter::infer("a,b"), Delimiter::Comma);
        assert_eq!(Delimiter::infer("single"), Delimiter::Comma);
    }

    #[test]
    fn test_infer_ignores_quoted_delimiters() {
        assert_eq!(Delimiter::infer("\"a|b\",c"), Delimiter::Comma);
        assert_eq!(Delimiter::infer("\"x\\ty\"|z"), Delimiter::Pipe);
    }

    #[test]
    fn test_zero_indent_is_clamped() {
        assert_eq!(ToonOptions::new().with_indent(0).indent, 1);
    }
}
