//! Error types for TOON encoding and decoding.
//!
//! Every failure aborts the current call; there is no partial result.
//!
//! ## Error Categories
//!
//! - **Invalid target**: the requested Rust type cannot hold the shape of the document
//! - **Syntax errors**: structural violations, with line/column information. The default
//!   lenient decode mode tolerates most irregularities, so these come mainly from
//!   [`DecodeMode::Strict`](crate::DecodeMode::Strict)
//! - **Conversion errors**: a scalar's text could not be coerced to the target kind
//! - **Unsupported types**: a value with no TOON representation (e.g. a map with
//!   structured keys), or tabular rows decoded into non-record elements
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{from_str, Error};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug)]
//! struct Hike { id: u32 }
//!
//! let err = from_str::<Hike>("id: first").unwrap_err();
//! assert!(matches!(err, Error::Conversion { .. }));
//! assert!(err.to_string().contains("first"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during TOON encoding/decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The requested target cannot receive the document.
    #[error("Invalid target: cannot decode {found} into {expected}")]
    InvalidTarget { expected: String, found: String },

    /// Structural grammar violation.
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Scalar text that could not be coerced to the destination kind.
    #[error("Conversion error at line {line}: cannot convert {text:?} to {kind}")]
    Conversion {
        kind: &'static str,
        text: String,
        line: usize,
    },

    /// A value category with no TOON representation.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Message raised through serde (`missing field`, `unknown variant`, ...).
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error at a 1-based line and column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::Error;
    ///
    /// let err = Error::syntax(10, 5, "unterminated quoted string");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a conversion error for `text` that does not fit `kind`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::Error;
    ///
    /// let err = Error::conversion("u8", "300", 2);
    /// assert!(err.to_string().contains("u8"));
    /// ```
    pub fn conversion(kind: &'static str, text: &str, line: usize) -> Self {
        Error::Conversion {
            kind,
            text: text.to_string(),
            line,
        }
    }

    pub fn invalid_target(expected: &str, found: &str) -> Self {
        Error::InvalidTarget {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for values that have no TOON form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a free-form error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
