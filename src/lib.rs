//! # toon_codec
//!
//! A Serde codec for TOON, an indentation-based text format for structured
//! data. Records, mappings and sequences are written one entry per line, and
//! arrays carry their length in a `key[N]` header. Arrays of uniform records
//! collapse into a table with a single column header:
//!
//! ```text
//! friends[3]: ana,luis,sam
//! hikes[2]{id,name}:
//!   1,Blue Lake
//!   2,Ridge Overlook
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Hike {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Trip {
//!     friends: Vec<String>,
//!     hikes: Vec<Hike>,
//! }
//!
//! let trip = Trip {
//!     friends: vec!["ana".into(), "luis".into(), "sam".into()],
//!     hikes: vec![
//!         Hike { id: 1, name: "Blue Lake".into() },
//!         Hike { id: 2, name: "Ridge Overlook".into() },
//!     ],
//! };
//!
//! let text = to_string(&trip).unwrap();
//! assert_eq!(
//!     text,
//!     "friends[3]: ana,luis,sam\nhikes[2]{id,name}:\n  1,Blue Lake\n  2,Ridge Overlook\n"
//! );
//! assert_eq!(from_str::<Trip>(&text).unwrap(), trip);
//! ```
//!
//! ## Layout
//!
//! - [`ser`]: converts `Serialize` types into a [`Value`] tree and writes it as text.
//! - [`de`]: the line-oriented decoder, lenient by default and strict on request.
//! - [`primitive`]: scalar rendering, quoting and inference.
//! - [`grammar`]: the `key[N]{fields}:` header grammar.
//! - [`schema`]: per-type field renames and omissions ([`FieldRules`]).
//!
//! Decoding emits `tracing` events whenever lenient mode skips or truncates
//! input. The library never installs a subscriber.

pub mod de;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
pub mod primitive;
pub mod schema;
pub mod ser;
pub mod value;

pub use de::{Deserializer, ValueDeserializer};
pub use error::{Error, Result};
pub use grammar::ArrayHeader;
pub use map::ToonMap;
pub use options::{DecodeMode, DecodeOptions, Delimiter, ToonOptions};
pub use schema::{FieldDescriptor, FieldNaming, FieldRules, RecordSchema, SchemaCache};
pub use ser::{Encoder, ValueSerializer};
pub use value::{Number, Value};

use serde::{Deserialize, Serialize};
use std::io;

/// Serializes `value` as TOON text with default options.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for values with no TOON form, such as
/// non-scalar map keys or 128-bit integers outside the 64-bit range.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, ToonOptions::default())
}

/// Serializes `value` as TOON text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::{to_string_with_options, Delimiter, FieldRules, ToonOptions};
///
/// #[derive(Serialize)]
/// struct Hike {
///     id: u32,
///     name: String,
///     notes: String,
/// }
///
/// let hikes = vec![
///     Hike { id: 1, name: "Blue Lake".into(), notes: "windy".into() },
///     Hike { id: 2, name: "Ridge".into(), notes: "".into() },
/// ];
/// let options = ToonOptions::new()
///     .with_delimiter(Delimiter::Pipe)
///     .with_field_rules(FieldRules::new().omit("Hike", "notes"));
///
/// let text = to_string_with_options(&hikes, options).unwrap();
/// assert_eq!(text, "[2]{id,name}:\n  1|Blue Lake\n  2|Ridge\n");
/// ```
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: ToonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let schema = SchemaCache::new(options.field_rules.clone());
    let tree = value.serialize(ValueSerializer::new(&schema))?;
    Ok(encode_value(&tree, &options))
}

/// Serializes `value` as TOON bytes.
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Serializes `value` into a writer.
///
/// # Examples
///
/// ```rust
/// use toon_codec::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![1, 2, 3]).unwrap();
/// assert_eq!(buffer, b"[3]: 1,2,3\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] when the writer fails, or any error of [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, ToonOptions::default())
}

/// Serializes `value` into a writer with custom options.
///
/// # Errors
///
/// Same as [`to_writer`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: ToonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Converts `value` into a [`Value`] tree.
///
/// Structs become [`Value::Record`] with fields in declaration order; maps
/// become [`Value::Object`] with sorted keys.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_record());
/// assert_eq!(value.get("y"), Some(&Value::from(2)));
/// ```
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    let schema = SchemaCache::default();
    value.serialize(ValueSerializer::new(&schema))
}

/// Writes a [`Value`] tree as TOON text.
///
/// Unlike [`to_string`], object entries keep their stored order.
#[must_use]
pub fn encode_value(value: &Value, options: &ToonOptions) -> String {
    let mut encoder = Encoder::new(options.clone());
    encoder.encode(value);
    encoder.into_inner()
}

/// Deserializes an instance of `T` from TOON text in lenient mode.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// - [`Error::InvalidTarget`] when the document shape cannot fill `T`.
/// - [`Error::Conversion`] when a scalar does not fit its field type.
/// - [`Error::Message`] for errors raised by serde itself, such as a missing
///   required field.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_str_with_options(s, DecodeOptions::default())
}

/// Deserializes an instance of `T` from TOON text with custom options.
///
/// # Errors
///
/// Same as [`from_str`], plus [`Error::Syntax`] for irregular input in
/// [`DecodeMode::Strict`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<'a, T>(s: &'a str, options: DecodeOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::with_options(s, options);
    let value = T::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Deserializes an instance of `T` from an I/O stream of TOON text.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use toon_codec::from_reader;
///
/// let tags: Vec<String> = from_reader(Cursor::new(b"[2]: trail,lake\n")).unwrap();
/// assert_eq!(tags, vec!["trail", "lake"]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] when reading fails, or any error of [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&text)
}

/// Deserializes an instance of `T` from UTF-8 bytes of TOON text.
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8, or any error of [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}

/// Deserializes an instance of `T` from a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::{from_value, toon};
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_value(toon!({"x": 1, "y": 2})).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error when the tree cannot fill `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Quick structural check: every significant line contains `:` or `[`.
///
/// Blank lines and `#` comments are ignored. This does not parse the
/// document; use [`validate`] for a full check.
///
/// # Examples
///
/// ```rust
/// use toon_codec::valid;
///
/// assert!(valid("name: Ada\n# comment\n\nhikes[2]{id}:\n"));
/// assert!(!valid("name: Ada\njust words\n"));
/// ```
#[must_use]
pub fn valid(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .all(|line| line.contains(':') || line.contains('['))
}

/// Parses `text` into a [`Value`] in strict mode, discarding the result.
///
/// # Errors
///
/// Returns the first [`Error::Syntax`] found.
pub fn validate(text: &str) -> Result<()> {
    from_str_with_options::<Value>(text, DecodeOptions::new().strict()).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Member {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn member() -> Member {
        Member {
            id: 123,
            name: "Ada Lovelace".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "ops".to_string()],
        }
    }

    #[test]
    fn test_record_round_trip() {
        let text = to_string(&member()).unwrap();
        assert_eq!(
            text,
            "id: 123\nname: Ada Lovelace\nactive: true\ntags[2]: admin,ops\n"
        );
        assert_eq!(from_str::<Member>(&text).unwrap(), member());
    }

    #[test]
    fn test_round_trip_with_every_delimiter() {
        for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
            let options = ToonOptions::new().with_delimiter(delimiter);
            let text = to_string_with_options(&member(), options).unwrap();
            assert_eq!(from_str::<Member>(&text).unwrap(), member(), "{text:?}");
        }
    }

    #[test]
    fn test_value_round_trip() {
        let value = to_value(&member()).unwrap();
        assert!(value.is_record());
        assert_eq!(from_value::<Member>(value).unwrap(), member());
    }

    #[test]
    fn test_value_tree_encodes_like_its_source() {
        #[derive(Serialize)]
        struct Hike {
            zid: u32,
            name: String,
        }

        let hikes = vec![
            Hike { zid: 1, name: "a".to_string() },
            Hike { zid: 2, name: "b".to_string() },
        ];
        let direct = to_string(&hikes).unwrap();
        assert_eq!(direct, "[2]{zid,name}:\n  1,a\n  2,b\n");

        let tree = to_value(&hikes).unwrap();
        assert_eq!(to_string(&tree).unwrap(), direct);
        assert_eq!(to_value(&tree).unwrap(), tree);
        assert_eq!(
            serde_json::to_string(&tree).unwrap(),
            r#"[{"zid":1,"name":"a"},{"zid":2,"name":"b"}]"#
        );
    }

    #[test]
    fn test_to_vec_and_from_slice() {
        let bytes = to_vec(&vec![1u8, 2, 3]).unwrap();
        assert_eq!(bytes, b"[3]: 1,2,3\n");
        assert_eq!(from_slice::<Vec<u8>>(&bytes).unwrap(), vec![1, 2, 3]);
        assert!(from_slice::<Vec<u8>>(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_trailing_lines_in_strict_mode() {
        let text = "[1]: 5\nextra: line\n";
        assert_eq!(from_str::<Vec<u8>>(text).unwrap(), vec![5]);
        let err = from_str_with_options::<Vec<u8>>(text, DecodeOptions::new().strict());
        assert!(matches!(err, Err(Error::Syntax { line: 2, .. })));
    }

    #[test]
    fn test_validate() {
        assert!(validate("a: 1\nb[2]: x,y\n").is_ok());
        assert!(validate("a: 1\nb[3]: x,y\n").is_err());
    }
}
