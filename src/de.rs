//! TOON deserialization.
//!
//! [`Deserializer`] reads a document line by line. Every significant line has
//! an indent (its count of leading spaces) and the nested block of an entry at
//! indent `k` is the run of following lines indented deeper than `k`. Blank
//! lines and lines starting with `#` are ignored, and a trailing `\r` is dropped.
//!
//! ```rust
//! use serde::Deserialize;
//! use toon_codec::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Hike {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Trip {
//!     friends: Vec<String>,
//!     hikes: Vec<Hike>,
//! }
//!
//! let text = "friends[3]: ana,luis,sam\nhikes[2]{id,name}:\n  1,Blue Lake\n  2,Ridge Overlook\n";
//! let trip: Trip = from_str(text).unwrap();
//! assert_eq!(trip.friends, vec!["ana", "luis", "sam"]);
//! assert_eq!(trip.hikes[1], Hike { id: 2, name: "Ridge Overlook".to_string() });
//! ```
//!
//! ## Modes
//!
//! Lenient decoding (the default) skips lines it cannot place and tolerates
//! counts that disagree with the declared `[N]`. Strict decoding turns each of
//! those into [`Error::Syntax`](crate::Error::Syntax). Skipped lines are reported
//! as `tracing` events.

use crate::grammar::{self, ArrayHeader};
use crate::options::{DecodeOptions, Delimiter};
use crate::primitive::{self, coerce};
use crate::schema::{KeyMatch, RecordSchema, SchemaCache};
use crate::{Error, Number, Result, ToonMap, Value};
use serde::de::{self, DeserializeSeed, Deserializer as _, IntoDeserializer, Visitor};
use std::borrow::Cow;
use std::rc::Rc;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug)]
struct Line<'de> {
    /// 1-based position in the input.
    number: usize,
    indent: usize,
    content: &'de str,
}

fn significant_lines(input: &str) -> Vec<Line<'_>> {
    input
        .split('\n')
        .enumerate()
        .filter_map(|(i, raw)| {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            Some(Line {
                number: i + 1,
                indent: grammar::indent_of(raw),
                content: raw.trim_start_matches(' ').trim_end(),
            })
        })
        .collect()
}

/// A `key: value` or `key[N]...: value` line.
#[derive(Debug)]
struct Entry<'de> {
    key: Cow<'de, str>,
    header: Option<ArrayHeader>,
    value: &'de str,
    /// Lines deeper than this belong to the entry.
    indent: usize,
    line: usize,
}

impl Entry<'_> {
    fn is_bare_array(&self) -> bool {
        self.key.is_empty() && self.header.is_some()
    }
}

/// What the first significant line says about the whole document.
enum Document<'de> {
    Empty,
    Scalar(Line<'de>),
    Array(Entry<'de>),
    List,
    Mapping,
}

impl Document<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Document::Empty => "empty document",
            Document::Scalar(_) => "scalar document",
            Document::Array(_) | Document::List => "sequence document",
            Document::Mapping => "mapping document",
        }
    }
}

/// The TOON deserializer.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::{DecodeOptions, Deserializer};
///
/// let mut de = Deserializer::with_options("[2]: 1,2,3", DecodeOptions::new().strict());
/// assert!(Vec::<u8>::deserialize(&mut de).is_err());
///
/// let mut de = Deserializer::from_str("[2]: 1,2,3");
/// assert_eq!(Vec::<u8>::deserialize(&mut de).unwrap(), vec![1, 2]);
/// ```
pub struct Deserializer<'de> {
    lines: Vec<Line<'de>>,
    pos: usize,
    strict: bool,
    schema: SchemaCache,
}

impl<'de> Deserializer<'de> {
    /// Creates a lenient deserializer with no field rules.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, DecodeOptions::default())
    }

    pub fn with_options(input: &'de str, options: DecodeOptions) -> Self {
        let strict = options.is_strict();
        Deserializer {
            lines: significant_lines(input),
            pos: 0,
            strict,
            schema: SchemaCache::new(options.field_rules),
        }
    }

    /// Checks that the whole document was consumed.
    ///
    /// Strict mode rejects trailing lines; lenient mode drops them.
    pub fn end(&mut self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(line) if self.strict => Err(self.syntax(&line, "unexpected trailing content")),
            Some(line) => {
                debug!(
                    line = line.number,
                    remaining = self.lines.len() - self.pos,
                    "ignoring trailing lines"
                );
                self.pos = self.lines.len();
                Ok(())
            }
        }
    }

    fn peek(&self) -> Option<Line<'de>> {
        self.lines.get(self.pos).copied()
    }

    /// Next line if it lies inside the block owned by `parent`.
    fn peek_within(&self, parent: Option<usize>) -> Option<Line<'de>> {
        self.peek()
            .filter(|line| parent.map_or(true, |p| line.indent > p))
    }

    fn syntax(&self, line: &Line<'_>, msg: &str) -> Error {
        Error::syntax(line.number, line.indent + 1, msg)
    }

    fn parse_entry(
        &self,
        content: &'de str,
        indent: usize,
        line: usize,
    ) -> Result<Option<Entry<'de>>> {
        if self.strict && grammar::has_unterminated_quote(content) {
            return Err(Error::syntax(line, indent + 1, "unterminated quoted string"));
        }
        let Some((key, value)) = grammar::split_entry(content) else {
            return Ok(None);
        };

        let mut header = None;
        let key = if grammar::contains_unquoted(key, '[') {
            match ArrayHeader::parse(key) {
                Some(parsed) => {
                    let name = Cow::Owned(parsed.key.clone());
                    header = Some(parsed);
                    name
                }
                None if self.strict => {
                    return Err(Error::syntax(line, indent + 1, "malformed array header"));
                }
                None => {
                    trace!(line, key, "malformed array header, using literal key");
                    primitive::unquote(key).0
                }
            }
        } else {
            primitive::unquote(key).0
        };

        Ok(Some(Entry {
            key,
            header,
            value,
            indent,
            line,
        }))
    }

    /// Consumes lines up to the next entry of the block owned by `parent`.
    fn next_entry(&mut self, parent: Option<usize>) -> Result<Option<Entry<'de>>> {
        while let Some(line) = self.peek_within(parent) {
            self.pos += 1;
            if let Some(entry) = self.parse_entry(line.content, line.indent, line.number)? {
                return Ok(Some(entry));
            }
            if self.strict {
                return Err(self.syntax(&line, "expected `key: value`"));
            }
            trace!(line = line.number, "skipping line without `:`");
        }
        Ok(None)
    }

    /// Drops lines deeper than `indent` that nothing consumed.
    fn skip_deeper(&mut self, indent: usize) -> Result<()> {
        while let Some(line) = self.peek_within(Some(indent)) {
            if self.strict {
                return Err(self.syntax(&line, "unexpected indented line"));
            }
            trace!(line = line.number, "skipping stray indented line");
            self.pos += 1;
        }
        Ok(())
    }

    /// Silently consumes the block below `indent`.
    fn discard_deeper(&mut self, indent: usize) {
        while self.peek_within(Some(indent)).is_some() {
            self.pos += 1;
        }
    }

    fn classify(&mut self) -> Result<Document<'de>> {
        let Some(first) = self.peek() else {
            return Ok(Document::Empty);
        };
        if grammar::strip_list_marker(first.content).is_some() {
            return Ok(Document::List);
        }
        if let Some(entry) = self.parse_entry(first.content, first.indent, first.number)? {
            if entry.is_bare_array() {
                self.pos += 1;
                return Ok(Document::Array(entry));
            }
            return Ok(Document::Mapping);
        }
        if self.lines.len() - self.pos == 1 {
            self.pos += 1;
            return Ok(Document::Scalar(first));
        }
        Ok(Document::Mapping)
    }

    fn into_scalar(&mut self) -> Result<ScalarDe<'de>> {
        match self.classify()? {
            Document::Empty => Ok(ScalarDe::value("", 0)),
            Document::Scalar(line) => Ok(ScalarDe::value(line.content, line.number)),
            doc => Err(Error::invalid_target("scalar", doc.describe())),
        }
    }
}

macro_rules! forward_to_scalar {
    ($($method:ident)*) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            self.into_scalar()?.$method(visitor)
        }
    )*};
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.classify()? {
            Document::Empty | Document::Mapping => visitor.visit_map(BlockAccess::new(self, None)),
            Document::Scalar(line) => {
                ScalarDe::value(line.content, line.number).deserialize_any(visitor)
            }
            Document::Array(entry) => EntryDe::new(self, entry).deserialize_any(visitor),
            Document::List => visitor.visit_seq(ListAccess::unbounded(self, None)),
        }
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.classify()? {
            Document::Array(entry) => EntryDe::new(self, entry).deserialize_seq(visitor),
            Document::Empty | Document::List => {
                visitor.visit_seq(ListAccess::unbounded(self, None))
            }
            doc => Err(Error::invalid_target("sequence", doc.describe())),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.classify()? {
            Document::Empty | Document::Mapping => visitor.visit_map(BlockAccess::new(self, None)),
            doc => Err(Error::invalid_target("mapping", doc.describe())),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.classify()? {
            Document::Empty | Document::Mapping => {
                let schema = self.schema.record(name, fields);
                visitor.visit_map(BlockAccess::new(self, None).with_schema(schema))
            }
            doc => Err(Error::invalid_target(name, doc.describe())),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let remaining = &self.lines[self.pos..];
        match remaining {
            [] => visitor.visit_none(),
            [only] if only.content == "null" => {
                self.pos += 1;
                visitor.visit_none()
            }
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.classify()? {
            Document::Scalar(line) => ScalarDe::value(line.content, line.number)
                .deserialize_enum(name, variants, visitor),
            Document::Mapping => match self.next_entry(None)? {
                Some(entry) => visitor.visit_enum(VariantEntry::new(self, entry, name)),
                None => Err(Error::invalid_target(name, "empty document")),
            },
            doc => Err(Error::invalid_target(name, doc.describe())),
        }
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.pos = self.lines.len();
        visitor.visit_unit()
    }

    forward_to_scalar! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char deserialize_str
        deserialize_string deserialize_bytes deserialize_byte_buf deserialize_unit
        deserialize_identifier
    }
}

/// One scalar token: a value, a key, or a tabular cell.
struct ScalarDe<'de> {
    text: Cow<'de, str>,
    quoted: bool,
    line: usize,
}

impl<'de> ScalarDe<'de> {
    fn value(raw: &'de str, line: usize) -> Self {
        let (text, quoted) = primitive::unquote(raw.trim());
        ScalarDe { text, quoted, line }
    }

    /// Keys are always strings to untyped targets.
    fn key(text: Cow<'de, str>, line: usize) -> Self {
        ScalarDe {
            text,
            quoted: true,
            line,
        }
    }

    fn is_null(&self) -> bool {
        !self.quoted && self.text == "null"
    }

    fn visit_text<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.text {
            Cow::Borrowed(s) => visitor.visit_borrowed_str(s),
            Cow::Owned(s) => visitor.visit_string(s),
        }
    }
}

macro_rules! coerce_number {
    ($($method:ident => $visit:ident($ty:ty))*) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            visitor.$visit(coerce::<$ty>(&self.text, stringify!($ty), self.line)?)
        }
    )*};
}

impl<'de> de::Deserializer<'de> for ScalarDe<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.quoted {
            return self.visit_text(visitor);
        }
        match primitive::infer_bare(&self.text) {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Unsigned(u)) => visitor.visit_u64(u),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            _ => self.visit_text(visitor),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match primitive::parse_bool(&self.text) {
            Some(b) => visitor.visit_bool(b),
            None => Err(Error::conversion("bool", &self.text, self.line)),
        }
    }

    coerce_number! {
        deserialize_i8 => visit_i8(i8)
        deserialize_i16 => visit_i16(i16)
        deserialize_i32 => visit_i32(i32)
        deserialize_i64 => visit_i64(i64)
        deserialize_i128 => visit_i128(i128)
        deserialize_u8 => visit_u8(u8)
        deserialize_u16 => visit_u16(u16)
        deserialize_u32 => visit_u32(u32)
        deserialize_u64 => visit_u64(u64)
        deserialize_u128 => visit_u128(u128)
        deserialize_f32 => visit_f32(f32)
        deserialize_f64 => visit_f64(f64)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::conversion("char", &self.text, self.line)),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.visit_text(visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.visit_text(visitor)
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.visit_text(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_bytes(self.text.as_bytes())
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_byte_buf(self.text.into_owned().into_bytes())
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.is_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::invalid_target("sequence", "scalar"))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, _visitor: V) -> Result<V::Value> {
        Err(Error::invalid_target("tuple", "scalar"))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value> {
        Err(Error::invalid_target(name, "scalar"))
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::invalid_target("mapping", "scalar"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value> {
        Err(Error::invalid_target(name, "scalar"))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let variant: de::value::CowStrDeserializer<'de, Error> = self.text.into_deserializer();
        visitor.visit_enum(variant)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

/// The value of one entry: scalar text, a nested block, or an array.
struct EntryDe<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    entry: Entry<'de>,
}

impl<'a, 'de> EntryDe<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, entry: Entry<'de>) -> Self {
        EntryDe { de, entry }
    }

    fn is_array(&self) -> bool {
        self.entry.header.is_some()
    }

    fn is_block(&self) -> bool {
        self.entry.header.is_none() && self.entry.value.is_empty()
    }

    fn has_body(&self) -> bool {
        self.de.peek_within(Some(self.entry.indent)).is_some()
    }

    fn describe(&self) -> &'static str {
        if self.is_array() {
            "array"
        } else if self.is_block() {
            "nested block"
        } else {
            "scalar"
        }
    }

    fn into_scalar(self) -> Result<ScalarDe<'de>> {
        if self.is_array() || (self.is_block() && self.has_body()) {
            return Err(Error::invalid_target("scalar", self.describe()));
        }
        Ok(ScalarDe::value(self.entry.value, self.entry.line))
    }

    fn visit_array<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value> {
        let Some(header) = self.entry.header.take() else {
            return Err(Error::invalid_target("sequence", self.describe()));
        };
        let Entry {
            value,
            indent,
            line,
            ..
        } = self.entry;
        trace!(key = %self.entry.key, len = header.len, line, "decoding array");
        match header.fields {
            Some(fields) => visitor.visit_seq(TabularAccess {
                de: self.de,
                fields,
                parent: indent,
                declared: header.len,
                seen: 0,
                line,
            }),
            None if !value.is_empty() => {
                visitor.visit_seq(InlineAccess::new(self.de.strict, value, header.len, line)?)
            }
            None => visitor.visit_seq(ListAccess {
                de: self.de,
                parent: Some(indent),
                declared: Some(header.len),
                seen: 0,
                line,
            }),
        }
    }
}

impl<'de, 'a> de::Deserializer<'de> for EntryDe<'a, 'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.is_array() {
            return self.visit_array(visitor);
        }
        if !self.is_block() {
            return self.into_scalar()?.deserialize_any(visitor);
        }
        let parent = Some(self.entry.indent);
        let starts_list = self
            .de
            .peek_within(parent)
            .is_some_and(|line| grammar::strip_list_marker(line.content).is_some());
        if starts_list {
            visitor.visit_seq(ListAccess::unbounded(self.de, parent))
        } else {
            visitor.visit_map(BlockAccess::new(self.de, parent))
        }
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.is_array() {
            self.visit_array(visitor)
        } else if self.is_block() {
            let parent = Some(self.entry.indent);
            visitor.visit_seq(ListAccess::unbounded(self.de, parent))
        } else {
            Err(Error::invalid_target("sequence", self.describe()))
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if !self.is_block() {
            return Err(Error::invalid_target("mapping", self.describe()));
        }
        let parent = Some(self.entry.indent);
        visitor.visit_map(BlockAccess::new(self.de, parent))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        if !self.is_block() {
            return Err(Error::invalid_target(name, self.describe()));
        }
        let schema = self.de.schema.record(name, fields);
        let parent = Some(self.entry.indent);
        visitor.visit_map(BlockAccess::new(self.de, parent).with_schema(schema))
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.entry.header.is_none() && self.entry.value == "null" {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        if !self.is_block() {
            return self.into_scalar()?.deserialize_enum(name, variants, visitor);
        }
        match self.de.next_entry(Some(self.entry.indent))? {
            Some(variant) => visitor.visit_enum(VariantEntry::new(self.de, variant, name)),
            None => Err(Error::invalid_target(name, "empty block")),
        }
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.de.discard_deeper(self.entry.indent);
        visitor.visit_unit()
    }

    forward_to_scalar! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char deserialize_str
        deserialize_string deserialize_bytes deserialize_byte_buf deserialize_unit
        deserialize_identifier
    }
}

/// Entries of one block, decoded as a mapping or a record.
struct BlockAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    parent: Option<usize>,
    /// Entry written on a list item's dash line.
    first: Option<Entry<'de>>,
    pending: Option<(Entry<'de>, bool)>,
    schema: Option<Rc<RecordSchema>>,
}

impl<'a, 'de> BlockAccess<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, parent: Option<usize>) -> Self {
        BlockAccess {
            de,
            parent,
            first: None,
            pending: None,
            schema: None,
        }
    }

    fn with_first(mut self, entry: Entry<'de>) -> Self {
        self.first = Some(entry);
        self
    }

    fn with_schema(mut self, schema: Rc<RecordSchema>) -> Self {
        self.schema = Some(schema);
        self
    }
}

impl<'de, 'a> de::MapAccess<'de> for BlockAccess<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        loop {
            let (entry, on_dash_line) = match self.first.take() {
                Some(entry) => (entry, true),
                None => match self.de.next_entry(self.parent)? {
                    Some(entry) => (entry, false),
                    None => return Ok(None),
                },
            };

            let key = match &self.schema {
                None => entry.key.clone(),
                Some(schema) => match schema.match_key(&entry.key) {
                    KeyMatch::Field(source) => Cow::Borrowed(source),
                    KeyMatch::Unknown => entry.key.clone(),
                    KeyMatch::Shadowed => {
                        trace!(line = entry.line, key = %entry.key, "skipping shadowed field");
                        self.de.discard_deeper(entry.indent);
                        continue;
                    }
                },
            };

            let line = entry.line;
            self.pending = Some((entry, on_dash_line));
            return seed.deserialize(ScalarDe::key(key, line)).map(Some);
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let (entry, on_dash_line) = self
            .pending
            .take()
            .ok_or_else(|| Error::custom("next_value_seed called before next_key_seed"))?;
        let indent = entry.indent;
        let value = seed.deserialize(EntryDe::new(&mut *self.de, entry))?;
        if !on_dash_line {
            self.de.skip_deeper(indent)?;
        }
        Ok(value)
    }
}

/// `- ` items below a header or a bare block.
struct ListAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    parent: Option<usize>,
    declared: Option<usize>,
    seen: usize,
    line: usize,
}

impl<'a, 'de> ListAccess<'a, 'de> {
    fn unbounded(de: &'a mut Deserializer<'de>, parent: Option<usize>) -> Self {
        let line = de.peek().map_or(0, |line| line.number);
        ListAccess {
            de,
            parent,
            declared: None,
            seen: 0,
            line,
        }
    }

    fn finish(&self) -> Result<()> {
        let Some(declared) = self.declared else {
            return Ok(());
        };
        if self.de.strict {
            return Err(Error::syntax(
                self.line,
                1,
                &format!("list declares {declared} items, found {}", self.seen),
            ));
        }
        debug!(line = self.line, declared, found = self.seen, "list shorter than declared");
        Ok(())
    }
}

impl<'de, 'a> de::SeqAccess<'de> for ListAccess<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        loop {
            if self.declared == Some(self.seen) {
                return Ok(None);
            }
            let Some(line) = self.de.peek_within(self.parent) else {
                self.finish()?;
                return Ok(None);
            };
            self.de.pos += 1;
            let Some(rest) = grammar::strip_list_marker(line.content) else {
                if self.de.strict {
                    return Err(self.de.syntax(&line, "expected `- ` list item"));
                }
                trace!(line = line.number, "skipping non-item line in list");
                continue;
            };

            let item = ListItemDe {
                de: &mut *self.de,
                dash: line.indent,
                rest,
                line: line.number,
            };
            let value = seed.deserialize(item)?;
            self.de.skip_deeper(line.indent)?;
            self.seen += 1;
            return Ok(Some(value));
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.declared.map(|n| n - self.seen)
    }
}

/// Shape of a list item's dash line.
enum Item<'de> {
    Empty,
    Array(Entry<'de>),
    Record(Entry<'de>),
    Scalar,
}

/// One `- ` list item.
struct ListItemDe<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    dash: usize,
    rest: &'de str,
    line: usize,
}

impl<'a, 'de> ListItemDe<'a, 'de> {
    fn classify(&self) -> Result<Item<'de>> {
        if self.rest.is_empty() {
            return Ok(Item::Empty);
        }
        // Content after the dash sits two columns in.
        Ok(match self.de.parse_entry(self.rest, self.dash + 2, self.line)? {
            Some(entry) if entry.is_bare_array() => Item::Array(entry),
            Some(entry) => Item::Record(entry),
            None => Item::Scalar,
        })
    }

    fn has_body(&self) -> bool {
        self.de.peek_within(Some(self.dash)).is_some()
    }

    fn into_scalar(self) -> Result<ScalarDe<'de>> {
        if self.rest.is_empty() && self.has_body() {
            return Err(Error::invalid_target("scalar", "nested block"));
        }
        Ok(ScalarDe::value(self.rest, self.line))
    }

    fn block(self, first: Option<Entry<'de>>) -> BlockAccess<'a, 'de> {
        let access = BlockAccess::new(self.de, Some(self.dash));
        match first {
            Some(entry) => access.with_first(entry),
            None => access,
        }
    }
}

impl<'de, 'a> de::Deserializer<'de> for ListItemDe<'a, 'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.classify()? {
            Item::Empty => visitor.visit_map(self.block(None)),
            Item::Record(entry) => visitor.visit_map(self.block(Some(entry))),
            Item::Array(entry) => EntryDe::new(self.de, entry).deserialize_any(visitor),
            Item::Scalar => self.into_scalar()?.deserialize_any(visitor),
        }
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.classify()? {
            Item::Array(entry) => EntryDe::new(self.de, entry).deserialize_seq(visitor),
            Item::Empty => visitor.visit_seq(ListAccess::unbounded(self.de, Some(self.dash))),
            Item::Record(_) => Err(Error::invalid_target("sequence", "mapping")),
            Item::Scalar => Err(Error::invalid_target("sequence", "scalar")),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.classify()? {
            Item::Empty => visitor.visit_map(self.block(None)),
            Item::Record(entry) => visitor.visit_map(self.block(Some(entry))),
            Item::Array(_) => Err(Error::invalid_target("mapping", "array")),
            Item::Scalar => Err(Error::invalid_target("mapping", "scalar")),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let schema = self.de.schema.record(name, fields);
        match self.classify()? {
            Item::Empty => visitor.visit_map(self.block(None).with_schema(schema)),
            Item::Record(entry) => visitor.visit_map(self.block(Some(entry)).with_schema(schema)),
            Item::Array(_) => Err(Error::invalid_target(name, "array")),
            Item::Scalar => Err(Error::invalid_target(name, "scalar")),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.rest == "null" {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.classify()? {
            Item::Record(entry) => visitor.visit_enum(VariantEntry::new(self.de, entry, name)),
            Item::Scalar => self.into_scalar()?.deserialize_enum(name, variants, visitor),
            Item::Empty => Err(Error::invalid_target(name, "empty list item")),
            Item::Array(_) => Err(Error::invalid_target(name, "array")),
        }
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.de.discard_deeper(self.dash);
        visitor.visit_unit()
    }

    forward_to_scalar! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char deserialize_str
        deserialize_string deserialize_bytes deserialize_byte_buf deserialize_unit
        deserialize_identifier
    }
}

/// Delimited scalars written after a header on the same line.
struct InlineAccess<'de> {
    pieces: std::vec::IntoIter<&'de str>,
    line: usize,
}

impl<'de> InlineAccess<'de> {
    fn new(strict: bool, value: &'de str, declared: usize, line: usize) -> Result<Self> {
        let delimiter = Delimiter::infer(value);
        let mut pieces: Vec<&str> = grammar::split_delimited(value, delimiter.as_char())
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .collect();
        if pieces.len() != declared {
            if strict {
                return Err(Error::syntax(
                    line,
                    1,
                    &format!("array declares {declared} values, found {}", pieces.len()),
                ));
            }
            debug!(line, declared, found = pieces.len(), "inline array count mismatch");
            pieces.truncate(declared);
        }
        Ok(InlineAccess {
            pieces: pieces.into_iter(),
            line,
        })
    }
}

impl<'de> de::SeqAccess<'de> for InlineAccess<'de> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        match self.pieces.next() {
            Some(piece) => seed.deserialize(ScalarDe::value(piece, self.line)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.pieces.len())
    }
}

/// Rows of a `key[N]{c1,c2}:` array.
struct TabularAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    fields: Vec<String>,
    parent: usize,
    declared: usize,
    seen: usize,
    line: usize,
}

impl<'de, 'a> de::SeqAccess<'de> for TabularAccess<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        if self.seen == self.declared {
            return Ok(None);
        }
        let Some(row) = self.de.peek_within(Some(self.parent)) else {
            if self.de.strict {
                return Err(Error::syntax(
                    self.line,
                    1,
                    &format!("table declares {} rows, found {}", self.declared, self.seen),
                ));
            }
            debug!(
                line = self.line,
                declared = self.declared,
                found = self.seen,
                "table shorter than declared"
            );
            return Ok(None);
        };
        self.de.pos += 1;

        if self.de.strict && grammar::has_unterminated_quote(row.content) {
            return Err(self.de.syntax(&row, "unterminated quoted string"));
        }
        let delimiter = Delimiter::infer(row.content);
        let cells = grammar::split_delimited(row.content, delimiter.as_char());
        if cells.len() != self.fields.len() {
            if self.de.strict {
                return Err(self.de.syntax(
                    &row,
                    &format!("row has {} cells, expected {}", cells.len(), self.fields.len()),
                ));
            }
            trace!(line = row.number, cells = cells.len(), "row width differs from header");
        }

        self.seen += 1;
        let row = RowDe {
            schema: &self.de.schema,
            fields: &self.fields,
            cells,
            line: row.number,
        };
        seed.deserialize(row).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.declared - self.seen)
    }
}

/// One tabular row, viewed as a record keyed by the header's columns.
struct RowDe<'a, 'de> {
    schema: &'a SchemaCache,
    fields: &'a [String],
    cells: Vec<&'de str>,
    line: usize,
}

macro_rules! reject_row {
    ($($method:ident)*) => {$(
        fn $method<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
            Err(Error::unsupported_type("tabular rows decode only into records"))
        }
    )*};
}

impl<'de, 'a> RowDe<'a, 'de> {
    fn columns(&self) -> RowAccess<'de> {
        let entries: Vec<_> = self
            .fields
            .iter()
            .zip(&self.cells)
            .map(|(column, cell)| (Cow::Owned(column.clone()), *cell))
            .collect();
        RowAccess::new(entries, self.line)
    }
}

impl<'de, 'a> de::Deserializer<'de> for RowDe<'a, 'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_map(self.columns())
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_map(self.columns())
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let schema = self.schema.record(name, fields);
        let mut entries = Vec::with_capacity(self.cells.len());
        for (column, cell) in self.fields.iter().zip(&self.cells) {
            match schema.match_key(column) {
                KeyMatch::Field(source) => entries.push((Cow::Borrowed(source), *cell)),
                KeyMatch::Shadowed | KeyMatch::Unknown => {
                    trace!(line = self.line, column = %column, "skipping unmapped column");
                }
            }
        }
        visitor.visit_map(RowAccess::new(entries, self.line))
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _visitor: V,
    ) -> Result<V::Value> {
        Err(Error::unsupported_type("tabular rows decode only into records"))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, _visitor: V) -> Result<V::Value> {
        Err(Error::unsupported_type("tabular rows decode only into records"))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value> {
        Err(Error::unsupported_type("tabular rows decode only into records"))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value> {
        Err(Error::unsupported_type("tabular rows decode only into records"))
    }

    reject_row! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64 deserialize_f32
        deserialize_f64 deserialize_char deserialize_str deserialize_string deserialize_bytes
        deserialize_byte_buf deserialize_unit deserialize_seq deserialize_identifier
    }
}

struct RowAccess<'de> {
    entries: std::vec::IntoIter<(Cow<'de, str>, &'de str)>,
    cell: Option<&'de str>,
    line: usize,
}

impl<'de> RowAccess<'de> {
    fn new(entries: Vec<(Cow<'de, str>, &'de str)>, line: usize) -> Self {
        RowAccess {
            entries: entries.into_iter(),
            cell: None,
            line,
        }
    }
}

impl<'de> de::MapAccess<'de> for RowAccess<'de> {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        match self.entries.next() {
            Some((key, cell)) => {
                self.cell = Some(cell);
                seed.deserialize(ScalarDe::key(key, self.line)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let cell = self
            .cell
            .take()
            .ok_or_else(|| Error::custom("next_value_seed called before next_key_seed"))?;
        seed.deserialize(ScalarDe::value(cell, self.line))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// An externally tagged enum: the entry key names the variant and its value
/// carries the payload.
struct VariantEntry<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    entry: Entry<'de>,
    enum_name: &'static str,
}

impl<'a, 'de> VariantEntry<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, entry: Entry<'de>, enum_name: &'static str) -> Self {
        VariantEntry {
            de,
            entry,
            enum_name,
        }
    }
}

impl<'de, 'a> de::EnumAccess<'de> for VariantEntry<'a, 'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self)> {
        let key = ScalarDe::key(self.entry.key.clone(), self.entry.line);
        let variant = seed.deserialize(key)?;
        Ok((variant, self))
    }
}

impl<'de, 'a> de::VariantAccess<'de> for VariantEntry<'a, 'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(EntryDe::new(self.de, self.entry))
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        EntryDe::new(self.de, self.entry).deserialize_seq(visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        EntryDe::new(self.de, self.entry).deserialize_struct(self.enum_name, fields, visitor)
    }
}

/// Deserializes from an owned [`Value`] tree, for [`from_value`](crate::from_value).
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

fn visit_value_map<'de, V: Visitor<'de>>(map: ToonMap, visitor: V) -> Result<V::Value> {
    let mut access = de::value::MapDeserializer::new(map.into_iter());
    let value = visitor.visit_map(&mut access)?;
    access.end()?;
    Ok(value)
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Unsigned(u)) => visitor.visit_u64(u),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(items) => {
                let mut access = de::value::SeqDeserializer::new(items.into_iter());
                let value = visitor.visit_seq(&mut access)?;
                access.end()?;
                Ok(value)
            }
            Value::Object(map) | Value::Record(map) => visit_value_map(map, visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(ValueDeserializer::new(value)),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.value {
            Value::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            Value::Object(map) | Value::Record(map) if map.len() == 1 => {
                let mut entries = map.into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(ValueVariant { variant, value }),
                    None => Err(Error::invalid_target(name, "empty mapping")),
                }
            }
            other => Err(Error::invalid_target(name, other.kind_name())),
        }
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct ValueVariant {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for ValueVariant {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self)> {
        let variant: de::value::StringDeserializer<Error> =
            self.variant.clone().into_deserializer();
        Ok((seed.deserialize(variant)?, self))
    }
}

impl<'de> de::VariantAccess<'de> for ValueVariant {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(Error::invalid_target("unit variant", other.kind_name())),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        ValueDeserializer::new(self.value).deserialize_seq(visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        ValueDeserializer::new(self.value).deserialize_map(visitor)
    }
}
