//! TOON serialization.
//!
//! Encoding runs in two steps. [`ValueSerializer`] turns any `T: Serialize` into a
//! [`Value`] tree, resolving field names through the call's [`SchemaCache`]. The
//! [`Encoder`] then walks that tree depth-first and writes text, choosing one of
//! three forms for every sequence:
//!
//! - **Inline**: every element is a scalar, `tags[3]: a,b,c`
//! - **Tabular**: every element is a record with the same scalar-only fields,
//!   `rows[2]{id,name}:` followed by one delimited row per element
//! - **List**: anything else, one `- ` item per element
//!
//! Every line ends with `\n`.
//!
//! ```rust
//! use toon_codec::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Hike { id: u32, name: String }
//!
//! #[derive(Serialize)]
//! struct Trip { friends: Vec<&'static str>, hikes: Vec<Hike> }
//!
//! let trip = Trip {
//!     friends: vec!["ana", "luis", "sam"],
//!     hikes: vec![
//!         Hike { id: 1, name: "Blue Lake".into() },
//!         Hike { id: 2, name: "Ridge Overlook".into() },
//!     ],
//! };
//! assert_eq!(
//!     to_string(&trip).unwrap(),
//!     "friends[3]: ana,luis,sam\nhikes[2]{id,name}:\n  1,Blue Lake\n  2,Ridge Overlook\n"
//! );
//! ```
//!
//! The encoder can also be driven directly with a value tree:
//!
//! ```rust
//! use toon_codec::{toon, Encoder, ToonOptions};
//!
//! let mut encoder = Encoder::new(ToonOptions::new());
//! encoder.encode(&toon!([1, 2, 3]));
//! assert_eq!(encoder.into_inner(), "[3]: 1,2,3\n");
//! ```

use crate::grammar::ArrayHeader;
use crate::primitive;
use crate::schema::SchemaCache;
use crate::{Error, Number, Result, ToonMap, ToonOptions, Value};
use serde::{ser, Serialize};
use tracing::trace;

/// Writes a [`Value`] tree as TOON text.
pub struct Encoder {
    output: String,
    options: ToonOptions,
    unit: usize,
}

impl Encoder {
    pub fn new(options: ToonOptions) -> Self {
        Encoder {
            output: String::with_capacity(256),
            unit: options.indent.max(1),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends `value` as a document: mapping and record entries at column zero,
    /// a sequence under an empty-key header, a scalar as a bare token.
    pub fn encode(&mut self, value: &Value) {
        match value {
            Value::Object(map) | Value::Record(map) => self.write_entries(map, 0),
            Value::Array(items) => self.write_array("", items, 0),
            scalar => {
                primitive::write_scalar(&mut self.output, scalar);
                self.output.push('\n');
            }
        }
    }

    fn pad(&mut self, col: usize) {
        self.output.extend(std::iter::repeat(' ').take(col));
    }

    fn write_entries(&mut self, map: &ToonMap, col: usize) {
        for (key, value) in map {
            self.pad(col);
            self.write_field(key, value, col);
        }
    }

    /// Writes one `key: ...` entry whose indentation is already in place.
    /// `col` is the logical column of the key.
    fn write_field(&mut self, key: &str, value: &Value, col: usize) {
        match value {
            Value::Object(map) | Value::Record(map) => {
                primitive::write_key(&mut self.output, key);
                self.output.push_str(":\n");
                self.write_entries(map, col + self.unit);
            }
            Value::Array(items) => self.write_array(key, items, col),
            scalar => {
                primitive::write_key(&mut self.output, key);
                self.output.push_str(": ");
                primitive::write_scalar(&mut self.output, scalar);
                self.output.push('\n');
            }
        }
    }

    /// Writes an array declaration and its body. The header's indentation is
    /// already in place; `col` is its logical column.
    fn write_array(&mut self, key: &str, items: &[Value], col: usize) {
        let header = ArrayHeader::new(key, items.len());

        if items.iter().all(Value::is_scalar) {
            header.write_to(&mut self.output);
            self.output.push(':');
            for (i, item) in items.iter().enumerate() {
                self.output
                    .push_str(if i == 0 { " " } else { self.options.delimiter.as_str() });
                primitive::write_scalar(&mut self.output, item);
            }
            self.output.push('\n');
            return;
        }

        if let Some(columns) = self.tabular_columns(items) {
            trace!(key, len = items.len(), columns = columns.len(), "encoding tabular array");
            header.with_fields(columns).write_to(&mut self.output);
            self.output.push_str(":\n");
            for item in items {
                self.pad(col + self.unit);
                if let Value::Record(record) = item {
                    for (i, cell) in record.values().enumerate() {
                        if i > 0 {
                            self.output.push_str(self.options.delimiter.as_str());
                        }
                        primitive::write_scalar(&mut self.output, cell);
                    }
                }
                self.output.push('\n');
            }
            return;
        }

        trace!(key, len = items.len(), "encoding list array");
        header.write_to(&mut self.output);
        self.output.push_str(":\n");
        for item in items {
            self.write_list_item(item, col + self.unit);
        }
    }

    /// Column names when every element is a record with the same non-empty,
    /// scalar-only key sequence.
    fn tabular_columns(&self, items: &[Value]) -> Option<Vec<String>> {
        if !self.options.use_tabular {
            return None;
        }
        let mut records = items.iter().map(|item| match item {
            Value::Record(record) if record.values().all(Value::is_scalar) => Some(record),
            _ => None,
        });
        let first = records.next()??;
        if first.is_empty() {
            return None;
        }
        for record in records {
            if !record?.keys().eq(first.keys()) {
                return None;
            }
        }
        Some(first.keys().cloned().collect())
    }

    fn write_list_item(&mut self, item: &Value, dash: usize) {
        self.pad(dash);
        let content = dash + 2;
        match item {
            Value::Object(map) | Value::Record(map) => {
                let mut entries = map.iter();
                match entries.next() {
                    Some((key, value)) => {
                        self.output.push_str("- ");
                        self.write_field(key, value, content);
                    }
                    None => self.output.push_str("-\n"),
                }
                for (key, value) in entries {
                    self.pad(content);
                    self.write_field(key, value, content);
                }
            }
            Value::Array(items) => {
                self.output.push_str("- ");
                self.write_array("", items, content);
            }
            scalar => {
                self.output.push_str("- ");
                primitive::write_scalar(&mut self.output, scalar);
                self.output.push('\n');
            }
        }
    }
}

/// Serializes Rust values into a [`Value`] tree.
///
/// Struct fields are renamed or dropped according to the [`SchemaCache`]; serde
/// maps are collected with their keys sorted. A [`Value::Record`] passed back in
/// stays a record with its entries in their stored order.
#[derive(Clone, Copy)]
pub struct ValueSerializer<'a> {
    schema: &'a SchemaCache,
    /// The next map is the body of a [`RECORD_TOKEN`] newtype.
    record: bool,
}

impl<'a> ValueSerializer<'a> {
    pub fn new(schema: &'a SchemaCache) -> Self {
        ValueSerializer {
            schema,
            record: false,
        }
    }

    fn to_value<T: Serialize + ?Sized>(self, value: &T) -> Result<Value> {
        value.serialize(ValueSerializer::new(self.schema))
    }
}

/// Newtype name under which [`Value::Record`] serializes its entries.
///
/// Other serializers see an ordinary newtype around a map.
pub(crate) const RECORD_TOKEN: &str = "$toon_codec::private::Record";

pub struct SerializeVec<'a> {
    ser: ValueSerializer<'a>,
    vec: Vec<Value>,
}

pub struct SerializeMap<'a> {
    ser: ValueSerializer<'a>,
    map: ToonMap,
    current_key: Option<String>,
}

impl SerializeMap<'_> {
    fn into_value(mut self) -> Value {
        if self.ser.record {
            return Value::Record(self.map);
        }
        self.map.sort_keys();
        Value::Object(self.map)
    }
}

pub struct SerializeRecord<'a> {
    ser: ValueSerializer<'a>,
    type_name: &'static str,
    map: ToonMap,
}

pub struct SerializeTupleVariant<'a> {
    variant: &'static str,
    inner: SerializeVec<'a>,
}

pub struct SerializeStructVariant<'a> {
    variant: &'static str,
    inner: SerializeRecord<'a>,
}

fn tagged(variant: &str, value: Value) -> Value {
    let mut map = ToonMap::with_capacity(1);
    map.insert(variant.to_string(), value);
    Value::Object(map)
}

impl<'a> ser::Serializer for ValueSerializer<'a> {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec<'a>;
    type SerializeTuple = SerializeVec<'a>;
    type SerializeTupleStruct = SerializeVec<'a>;
    type SerializeTupleVariant = SerializeTupleVariant<'a>;
    type SerializeMap = SerializeMap<'a>;
    type SerializeStruct = SerializeRecord<'a>;
    type SerializeStructVariant = SerializeStructVariant<'a>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        if let Ok(i) = i64::try_from(v) {
            Ok(Value::from(i))
        } else if let Ok(u) = u64::try_from(v) {
            Ok(Value::from(u))
        } else {
            Err(Error::unsupported_type(&format!("integer {v} exceeds 64 bits")))
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        u64::try_from(v)
            .map(Value::from)
            .map_err(|_| Error::unsupported_type(&format!("integer {v} exceeds 64 bits")))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        if name == RECORD_TOKEN {
            return value.serialize(ValueSerializer {
                record: true,
                ..self
            });
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, self.to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec<'a>> {
        Ok(SerializeVec {
            ser: self,
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec<'a>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec<'a>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant<'a>> {
        Ok(SerializeTupleVariant {
            variant,
            inner: self.serialize_seq(Some(len))?,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap<'a>> {
        Ok(SerializeMap {
            ser: self,
            map: ToonMap::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<SerializeRecord<'a>> {
        Ok(SerializeRecord {
            ser: self,
            type_name: name,
            map: ToonMap::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant<'a>> {
        Ok(SerializeStructVariant {
            variant,
            inner: self.serialize_struct(name, len)?,
        })
    }
}

impl ser::SerializeSeq for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, ser::SerializeSeq::end(self.inner)?))
    }
}

/// Renders a serialized map key as text.
fn key_text(key: Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::unsupported_type(&format!(
            "{} as mapping key",
            other.kind_name()
        ))),
    }
}

impl ser::SerializeMap for SerializeMap<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key_text(self.ser.to_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.into_value())
    }
}

impl ser::SerializeStruct for SerializeRecord<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(name) = self.ser.schema.field_name(self.type_name, key) {
            self.map.insert(name, self.ser.to_value(value)?);
        }
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, ser::SerializeStruct::end(self.inner)?))
    }
}
