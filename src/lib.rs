//! # axion
//!
//! An Ion-superset value model with two encodings: a configurable text form
//! and a compact, self-describing binary form ("Axion").
//!
//! ## Key Features
//!
//! - **Typed values**: thirteen kinds (null, bool, arbitrary-precision int,
//!   float, decimal, timestamp, string, symbol, blob, clob, list, sexp and
//!   struct), every one nullable and annotatable
//! - **Configurable text**: number radix, digit separators, bool case,
//!   multi-line strings and containers, timestamp precision and indentation
//! - **Compact binary**: one metadata byte per value, VarByte integers and a
//!   per-stream symbol table that turns repeated symbols into back-references
//! - **No panics on bad data**: every parse and read returns [`Result`]
//!
//! ## Quick Start
//!
//! ```rust
//! use axion::{from_str, to_string, Decimal, Value};
//!
//! let value = Value::list(vec![
//!     Value::decimal(Decimal::from(54)),
//!     Value::from(116),
//!     Value::from("some string"),
//! ]);
//! let text = to_string(&value);
//! assert_eq!(text, "[54.0, 116, \"some string\"]");
//! assert_eq!(from_str(&text).unwrap(), value);
//! ```
//!
//! ### Binary
//!
//! ```rust
//! use axion::{from_bytes, ion, to_bytes};
//!
//! let value = ion!({ "id": 7, "tags": ["a", "b"] });
//! let bytes = to_bytes(&value).unwrap();
//! assert_eq!(from_bytes(&bytes).unwrap(), value);
//! ```
//!
//! ### Options
//!
//! ```rust
//! use axion::{to_string_with_options, ion, SerializerOptions};
//!
//! let value = ion!([1, [2]]);
//! let text = to_string_with_options(&value, &SerializerOptions::pretty());
//! assert_eq!(text, "[\n    1,\n    [\n        2\n    ]\n]");
//! ```
//!
//! ## Demos
//!
//! The `demos/` directory holds runnable programs:
//!
//! - **`text_roundtrip.rs`** - parsing and rendering every kind
//! - **`custom_options.rs`** - serializer options, including loading them from JSON
//! - **`binary_stream.rs`** - writing several values into one binary stream
//!
//! Run any demo with: `cargo run --example <name>`

pub mod annotation;
pub mod binary;
pub mod decimal;
pub mod error;
pub mod ion_struct;
pub mod macros;
pub mod options;
pub mod symbol;
pub mod text;
pub mod timestamp;
pub mod value;

pub use annotation::{Annotation, Annotations};
pub use binary::SymbolHashList;
pub use decimal::Decimal;
pub use error::{Error, Result};
pub use ion_struct::{IonStruct, Property};
pub use options::{
    BoolOptions, ContainerOptions, DecimalOptions, IndentationStyle, IntOptions, LineStyle,
    NullOptions, NumberFormat, SerializerContext, SerializerOptions, StructOptions, TextOptions,
    TimestampOptions, ValueCase,
};
pub use symbol::{Symbol, SymbolKind};
pub use timestamp::{Timestamp, TimestampPrecision};
pub use value::{IonType, Payload, Value};

use std::io;
use tracing::debug;

/// Renders a value as text with default options.
///
/// # Examples
///
/// ```rust
/// use axion::{to_string, IonType, Value};
///
/// assert_eq!(to_string(&Value::null_of(IonType::Bool)), "null.bool");
/// ```
#[must_use]
pub fn to_string(value: &Value) -> String {
    to_string_with_options(value, &SerializerOptions::default())
}

/// Renders a value with multi-line containers.
#[must_use]
pub fn to_string_pretty(value: &Value) -> String {
    to_string_with_options(value, &SerializerOptions::pretty())
}

/// Renders a value as text with custom options.
///
/// # Examples
///
/// ```rust
/// use axion::{to_string_with_options, SerializerOptions, ValueCase, Value};
///
/// let options = SerializerOptions::new().with_bool_case(ValueCase::Upper);
/// assert_eq!(to_string_with_options(&Value::from(true), &options), "TRUE");
/// ```
#[must_use]
pub fn to_string_with_options(value: &Value, options: &SerializerOptions) -> String {
    let text = text::serialize(value, options);
    debug!("Serialized {} value to {} bytes of text", value.ion_type(), text.len());
    text
}

/// Writes the text form of a value.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn to_writer<W: io::Write>(mut writer: W, value: &Value) -> Result<()> {
    writer
        .write_all(to_string(value).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Parses one value from text.
///
/// # Examples
///
/// ```rust
/// use axion::{from_str, Value};
///
/// let value = from_str("meters::12").unwrap();
/// assert_eq!(value.as_i64(), Some(12));
/// assert_eq!(value.annotations().to_string(), "meters::");
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] with line and column for text the grammar
/// rejects, and a format error for invalid literals.
pub fn from_str(s: &str) -> Result<Value> {
    debug!("Parsing {} bytes of text", s.len());
    text::parse(s)
}

/// Parses one value from UTF-8 text bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8 or not valid text.
pub fn from_slice(v: &[u8]) -> Result<Value> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Parses one value from a text stream.
///
/// # Errors
///
/// Returns an error if reading fails or the text is invalid.
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Value> {
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Encodes a value in the binary format.
///
/// # Errors
///
/// Fails only for timestamps whose year does not fit the binary layout.
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    binary::to_bytes(value)
}

/// Decodes exactly one binary value.
///
/// # Errors
///
/// Returns an error for truncated, malformed or over-long input.
pub fn from_bytes(bytes: &[u8]) -> Result<Value> {
    binary::from_bytes(bytes)
}
