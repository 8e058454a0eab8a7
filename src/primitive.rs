//! Scalar rendering and parsing.
//!
//! Both directions agree on one quoting rule. A string is written verbatim unless
//! reading it back would change it, in which case it is wrapped in double quotes
//! with `\"`, `\\`, `\n`, `\r` and `\t` escaped. Quoting is required when the string:
//!
//! - contains any delimiter character (`,` `|` tab), a newline or carriage return,
//!   a double quote, a backslash, or a colon
//! - starts with `#`, `[` or `- `, or is a lone `-`
//! - is empty or has leading/trailing whitespace
//! - would otherwise be read as `null`, a boolean, or a number
//!
//! This is deliberately wider than quoting only delimiters and line breaks. A
//! minimal encoder writes the string `"30"` as `30`, which untyped decoding reads
//! back as a number; here it is written `"30"` so every string decodes to itself.
//!
//! ```rust
//! use toon_codec::primitive::{infer, render};
//! use toon_codec::Value;
//!
//! assert_eq!(render(&Value::from("ana")).unwrap(), "ana");
//! assert_eq!(render(&Value::from("a,b")).unwrap(), "\"a,b\"");
//! assert_eq!(render(&Value::from("42")).unwrap(), "\"42\"");
//!
//! assert_eq!(infer("42"), Value::from(42));
//! assert_eq!(infer("\"42\""), Value::from("42"));
//! ```

use crate::{Error, Number, Result, Value};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::str::FromStr;

/// Target category for [`parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Int,
    Uint,
    Float,
    Bool,
    /// Untyped inference.
    Any,
}

impl ScalarKind {
    fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int => "i64",
            ScalarKind::Uint => "u64",
            ScalarKind::Float => "f64",
            ScalarKind::Bool => "bool",
            ScalarKind::Any => "scalar",
        }
    }
}

/// Renders a scalar value as a TOON token.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for sequences, mappings and records.
pub fn render(value: &Value) -> Result<String> {
    let mut out = String::new();
    if write_scalar(&mut out, value) {
        Ok(out)
    } else {
        Err(Error::unsupported_type(&format!(
            "{} is not a scalar",
            value.kind_name()
        )))
    }
}

/// Parses a scalar token into `kind`, stripping one layer of quotes first.
///
/// Errors carry line 0 since the token is not tied to a document.
///
/// # Examples
///
/// ```rust
/// use toon_codec::primitive::{parse, ScalarKind};
/// use toon_codec::Value;
///
/// assert_eq!(parse("T", ScalarKind::Bool).unwrap(), Value::Bool(true));
/// assert_eq!(parse("\"7\"", ScalarKind::Uint).unwrap(), Value::from(7u64));
/// assert!(parse("seven", ScalarKind::Int).is_err());
/// ```
pub fn parse(text: &str, kind: ScalarKind) -> Result<Value> {
    let (unquoted, quoted) = unquote(text.trim());
    let fail = || Error::conversion(kind.name(), text, 0);
    match kind {
        ScalarKind::String => Ok(Value::String(unquoted.into_owned())),
        ScalarKind::Int => coerce::<i64>(&unquoted, "i64", 0).map(Value::from),
        ScalarKind::Uint => coerce::<u64>(&unquoted, "u64", 0).map(Value::from),
        ScalarKind::Float => coerce::<f64>(&unquoted, "f64", 0).map(Value::from),
        ScalarKind::Bool => parse_bool(&unquoted).map(Value::Bool).ok_or_else(fail),
        ScalarKind::Any if quoted => Ok(Value::String(unquoted.into_owned())),
        ScalarKind::Any => Ok(infer_bare(&unquoted)),
    }
}

/// Untyped inference: a quoted token is a string, anything else is tried as
/// `null`, then integer, then float, then boolean, falling back to string.
pub fn infer(text: &str) -> Value {
    match unquote(text.trim()) {
        (s, true) => Value::String(s.into_owned()),
        (s, false) => infer_bare(&s),
    }
}

pub(crate) fn infer_bare(text: &str) -> Value {
    if text == "null" {
        return Value::Null;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Value::Number(Number::Integer(i));
    }
    if let Ok(u) = text.parse::<u64>() {
        return Value::Number(Number::Unsigned(u));
    }
    if let Ok(f) = text.parse::<f64>() {
        return Value::Number(Number::Float(f));
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(text.to_string()),
    }
}

/// Typed coercion of unquoted text with range checking by `T`.
pub(crate) fn coerce<T: FromStr>(text: &str, kind: &'static str, line: usize) -> Result<T> {
    text.trim()
        .parse::<T>()
        .map_err(|_| Error::conversion(kind, text, line))
}

/// Boolean spellings accepted by typed decoding.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "1" | "t" | "T" | "TRUE" | "True" => Some(true),
        "false" | "0" | "f" | "F" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Strips one layer of surrounding double quotes and unescapes the content.
///
/// The flag reports whether the token was quoted.
pub fn unquote(text: &str) -> (Cow<'_, str>, bool) {
    match text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) if text.len() >= 2 => {
            if inner.contains('\\') {
                (Cow::Owned(unescape(inner)), true)
            } else {
                (Cow::Borrowed(inner), true)
            }
        }
        _ => (Cow::Borrowed(text), false),
    }
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

pub(crate) fn needs_quotes(s: &str) -> bool {
    if s.is_empty()
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
    {
        return true;
    }
    if s.contains(|c: char| matches!(c, ',' | '|' | '\t' | '\n' | '\r' | '"' | '\\' | ':')) {
        return true;
    }
    if s.starts_with('#') || s.starts_with('[') || s.starts_with("- ") || s == "-" {
        return true;
    }
    !matches!(infer_bare(s), Value::String(_))
}

fn needs_key_quotes(key: &str) -> bool {
    key.is_empty()
        || key.starts_with(char::is_whitespace)
        || key.ends_with(char::is_whitespace)
        || key.starts_with('#')
        || key.starts_with("- ")
        || key == "-"
        || key.contains(|c: char| {
            matches!(
                c,
                ',' | '|' | '\t' | '\n' | '\r' | '"' | '\\' | ':' | '[' | ']' | '{' | '}'
            )
        })
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

pub(crate) fn write_str(out: &mut String, s: &str) {
    if needs_quotes(s) {
        write_quoted(out, s);
    } else {
        out.push_str(s);
    }
}

/// Keys are always strings on decode, so only structural characters force quotes.
pub(crate) fn write_key(out: &mut String, key: &str) {
    if needs_key_quotes(key) {
        write_quoted(out, key);
    } else {
        out.push_str(key);
    }
}

pub(crate) fn write_number(out: &mut String, number: &Number) {
    // Writing into a String cannot fail.
    let _ = match number {
        Number::Integer(i) => write!(out, "{i}"),
        Number::Unsigned(u) => write!(out, "{u}"),
        Number::Float(f) => write!(out, "{f:?}"),
    };
}

/// Writes a scalar token; returns false for non-scalar values.
pub(crate) fn write_scalar(out: &mut String, value: &Value) -> bool {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_str(out, s),
        Value::Array(_) | Value::Object(_) | Value::Record(_) => return false,
    }
    true
}
