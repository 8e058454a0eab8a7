//! Array declaration grammar and line tokenizing.
//!
//! An array declaration is `<key>[<N>]`, optionally followed by a column list
//! `{<c1>,<c2>,...}` for tabular arrays, and always terminated by `:` on the line:
//!
//! ```text
//! friends[3]: ana,luis,sam
//! hikes[2]{id,name}:
//!   1,Blue Lake
//!   2,Ridge Overlook
//! [2]:
//!   - a
//!   - b
//! ```
//!
//! A single delimiter hint character before `]` (`[3|]`, `[3\t]`) is accepted and
//! ignored; the delimiter of the value text is always inferred. A `[`-bearing key
//! that does not match the grammar is not a header: the key is taken literally.
//!
//! All scanning here is quote-aware. A `"` opens a quoted token, a backslash inside
//! it escapes the next character, and delimiters or colons inside quotes never count.

use crate::options::Delimiter;
use crate::primitive;
use std::fmt;

/// A parsed `key[N]{c1,...}` declaration.
///
/// # Examples
///
/// ```rust
/// use toon_codec::ArrayHeader;
///
/// let header = ArrayHeader::parse("hikes[2]{id,name}").unwrap();
/// assert_eq!(header.key, "hikes");
/// assert_eq!(header.len, 2);
/// assert_eq!(header.fields.as_deref(), Some(&["id".to_string(), "name".to_string()][..]));
///
/// assert_eq!(ArrayHeader::parse("friends[3|]").unwrap().len, 3);
/// assert!(ArrayHeader::parse("weird[key").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayHeader {
    /// Field name, empty for top-level sequences and nested list elements.
    pub key: String,
    /// Declared element count.
    pub len: usize,
    /// Column names of a tabular array.
    pub fields: Option<Vec<String>>,
}

impl ArrayHeader {
    pub fn new(key: impl Into<String>, len: usize) -> Self {
        ArrayHeader {
            key: key.into(),
            len,
            fields: None,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn is_tabular(&self) -> bool {
        self.fields.is_some()
    }

    /// Parses the key part of a line (everything before its first unquoted `:`).
    ///
    /// Returns `None` when the text is not a well-formed declaration.
    pub fn parse(decl: &str) -> Option<ArrayHeader> {
        let decl = decl.trim();
        let open = find_unquoted(decl, '[')?;
        let close = open + decl[open..].find(']')?;

        let count = &decl[open + 1..close];
        let count = count
            .strip_suffix(|c| matches!(c, ',' | '|' | '\t'))
            .unwrap_or(count);
        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let len = count.parse().ok()?;

        let rest = decl[close + 1..].trim_start();
        let fields = if rest.is_empty() {
            None
        } else {
            let list = rest.strip_prefix('{')?.strip_suffix('}')?;
            Some(parse_field_list(list))
        };

        let key = decl[..open].trim();
        if contains_unquoted(key, ']') {
            return None;
        }
        let (key, _) = primitive::unquote(key);
        Some(ArrayHeader {
            key: key.into_owned(),
            len,
            fields,
        })
    }

    /// Appends the declaration, without the trailing `:`.
    pub(crate) fn write_to(&self, out: &mut String) {
        if !self.key.is_empty() {
            primitive::write_key(out, &self.key);
        }
        out.push('[');
        out.push_str(&self.len.to_string());
        out.push(']');
        if let Some(fields) = &self.fields {
            out.push('{');
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                primitive::write_key(out, field);
            }
            out.push('}');
        }
    }
}

impl fmt::Display for ArrayHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        out.push(':');
        f.write_str(&out)
    }
}

fn parse_field_list(list: &str) -> Vec<String> {
    split_delimited(list, Delimiter::infer(list).as_char())
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| primitive::unquote(name).0.into_owned())
        .collect()
}

/// Byte offset of the first `target` outside double quotes.
pub(crate) fn find_unquoted(text: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == target {
            return Some(i);
        }
    }
    None
}

pub(crate) fn contains_unquoted(text: &str, target: char) -> bool {
    find_unquoted(text, target).is_some()
}

/// True when a `"` opened in `text` is never closed.
pub(crate) fn has_unterminated_quote(text: &str) -> bool {
    let mut in_quotes = false;
    let mut escaped = false;
    for c in text.chars() {
        if escaped {
            escaped = false;
        } else if in_quotes && c == '\\' {
            escaped = true;
        } else if c == '"' {
            in_quotes = !in_quotes;
        }
    }
    in_quotes
}

/// Splits a line at its first unquoted `:` into trimmed key and value text.
pub(crate) fn split_entry(content: &str) -> Option<(&str, &str)> {
    let colon = find_unquoted(content, ':')?;
    Some((content[..colon].trim(), content[colon + 1..].trim()))
}

/// Splits `text` on unquoted `delimiter`, trimming each piece.
pub(crate) fn split_delimited(text: &str, delimiter: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while let Some(at) = find_unquoted(rest, delimiter) {
        pieces.push(rest[..at].trim());
        rest = &rest[at + delimiter.len_utf8()..];
    }
    pieces.push(rest.trim());
    pieces
}

/// Number of leading spaces.
pub(crate) fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Remainder of a list item after its `- ` marker.
pub(crate) fn strip_list_marker(content: &str) -> Option<&str> {
    if content == "-" {
        Some("")
    } else {
        content.strip_prefix("- ")
    }
}
