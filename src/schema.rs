//! Field name resolution for record types.
//!
//! Serde's derive macros already produce, for every record type, the ordered list of
//! fields and an accessor for each of them. This module decides the name each field is
//! written under, in priority order:
//!
//! 1. a codec-specific rule registered in [`FieldRules`] for `(type, field)`;
//! 2. a codec-specific [`FieldNaming`] registered for the whole type, applied to
//!    the serde name;
//! 3. the serde name, which carries `#[serde(rename = "...")]` and `rename_all`.
//!
//! The last step doubles as the lower-first fallback: a Rust field identifier
//! already starts in lower case, and serde only reports an upper-case first letter
//! when an annotation asked for it. Names chosen by serde annotations are never
//! rewritten unless their type opts in with [`FieldRules::with_naming`].
//!
//! A field that resolves to [`OMIT`] (`"-"`) is neither written nor matched on decode.
//! Resolution is pure, and each [`SchemaCache`] computes it once per type per call.
//!
//! ```rust
//! use toon_codec::{to_string_with_options, FieldRules, ToonOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Hike {
//!     id: u32,
//!     #[serde(rename = "km")]
//!     distance_km: f64,
//!     notes: String,
//! }
//!
//! let rules = FieldRules::new().omit("Hike", "notes");
//! let hike = Hike { id: 1, distance_km: 7.5, notes: "muddy".into() };
//! let toon = to_string_with_options(&hike, ToonOptions::new().with_field_rules(rules)).unwrap();
//! assert_eq!(toon, "id: 1\nkm: 7.5\n");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Sentinel name that suppresses a field.
pub const OMIT: &str = "-";

/// Naming rule for the fields of one type that have no per-field rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldNaming {
    /// Use the serde name as is.
    #[default]
    Verbatim,
    /// Lower-case the first character of the serde name.
    LowerFirst,
}

/// Codec-specific field renames and omissions, keyed by serde type name.
///
/// The same rules must be handed to the encoder ([`ToonOptions`](crate::ToonOptions))
/// and the decoder ([`DecodeOptions`](crate::DecodeOptions)).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldRules {
    overrides: HashMap<String, HashMap<String, String>>,
    naming: HashMap<String, FieldNaming>,
}

impl FieldRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `field` of `type_name` as `name`.
    #[must_use]
    pub fn rename(mut self, type_name: &str, field: &str, name: &str) -> Self {
        self.overrides
            .entry(type_name.to_string())
            .or_default()
            .insert(field.to_string(), name.to_string());
        self
    }

    /// Suppresses `field` of `type_name` in both directions.
    #[must_use]
    pub fn omit(self, type_name: &str, field: &str) -> Self {
        self.rename(type_name, field, OMIT)
    }

    /// Applies `naming` to every field of `type_name` without a per-field rule.
    #[must_use]
    pub fn with_naming(mut self, type_name: &str, naming: FieldNaming) -> Self {
        self.naming.insert(type_name.to_string(), naming);
        self
    }

    /// True when every field resolves to its serde name.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.overrides.is_empty()
            && self.naming.values().all(|n| *n == FieldNaming::Verbatim)
    }

    /// Resolves the emitted name of one field, or `None` when it is omitted.
    ///
    /// ```rust
    /// use toon_codec::{FieldNaming, FieldRules};
    ///
    /// let rules = FieldRules::new()
    ///     .rename("Hike", "id", "hikeId")
    ///     .with_naming("Hike", FieldNaming::LowerFirst);
    /// assert_eq!(rules.resolve("Hike", "id").as_deref(), Some("hikeId"));
    /// assert_eq!(rules.resolve("Hike", "Name").as_deref(), Some("name"));
    /// assert_eq!(rules.resolve("Link", "URL").as_deref(), Some("URL"));
    /// assert_eq!(rules.resolve("Hike", "-"), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, type_name: &str, field: &str) -> Option<String> {
        let name = match self
            .overrides
            .get(type_name)
            .and_then(|fields| fields.get(field))
        {
            Some(explicit) => explicit.clone(),
            None => match self.naming.get(type_name) {
                Some(FieldNaming::LowerFirst) => lower_first(field),
                Some(FieldNaming::Verbatim) | None => field.to_string(),
            },
        };
        if name == OMIT {
            None
        } else {
            Some(name)
        }
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One field of a record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name written to and matched in TOON text.
    pub name: String,
    /// Name serde uses for the field.
    pub source: &'static str,
    /// Declaration order.
    pub index: usize,
    pub omitted: bool,
}

/// Outcome of matching a TOON key against a record schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyMatch {
    /// The key names this serde field.
    Field(&'static str),
    /// The key is the serde name of a field that was renamed or omitted.
    Shadowed,
    /// Not a field of this type.
    Unknown,
}

/// Ordered, resolved field list of one record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    pub type_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    pub fn resolve(type_name: &'static str, fields: &[&'static str], rules: &FieldRules) -> Self {
        let fields = fields
            .iter()
            .enumerate()
            .map(|(index, &source)| {
                let resolved = rules.resolve(type_name, source);
                FieldDescriptor {
                    omitted: resolved.is_none(),
                    name: resolved.unwrap_or_else(|| OMIT.to_string()),
                    source,
                    index,
                }
            })
            .collect();
        RecordSchema { type_name, fields }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Fields that take part in encoding and decoding, in declaration order.
    pub fn emitted(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.omitted)
    }

    pub fn match_key(&self, key: &str) -> KeyMatch {
        if let Some(field) = self.emitted().find(|f| f.name == key) {
            return KeyMatch::Field(field.source);
        }
        if self
            .fields
            .iter()
            .any(|f| f.source == key && (f.omitted || f.name != f.source))
        {
            return KeyMatch::Shadowed;
        }
        KeyMatch::Unknown
    }
}

type FieldKey = (&'static str, &'static str);
type RecordKey = (&'static str, &'static [&'static str]);

/// Per-call memo of resolved names, so each type is resolved once.
#[derive(Debug, Default)]
pub struct SchemaCache {
    rules: FieldRules,
    names: RefCell<HashMap<FieldKey, Option<String>>>,
    records: RefCell<HashMap<RecordKey, Rc<RecordSchema>>>,
}

impl SchemaCache {
    pub fn new(rules: FieldRules) -> Self {
        SchemaCache {
            rules,
            names: RefCell::default(),
            records: RefCell::default(),
        }
    }

    /// Emitted name of one serialized field, `None` when omitted.
    pub fn field_name(&self, type_name: &'static str, field: &'static str) -> Option<String> {
        if self.rules.is_identity() {
            return (field != OMIT).then(|| field.to_string());
        }
        self.names
            .borrow_mut()
            .entry((type_name, field))
            .or_insert_with(|| self.rules.resolve(type_name, field))
            .clone()
    }

    /// Schema of a record type, given serde's field list for it.
    pub fn record(
        &self,
        type_name: &'static str,
        fields: &'static [&'static str],
    ) -> Rc<RecordSchema> {
        Rc::clone(
            self.records
                .borrow_mut()
                .entry((type_name, fields))
                .or_insert_with(|| Rc::new(RecordSchema::resolve(type_name, fields, &self.rules))),
        )
    }
}
