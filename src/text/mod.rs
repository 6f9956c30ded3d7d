//! Text codec: [`Value`] to Axion text and back.
//!
//! Serialization renders the annotation prefix and then the value body, which
//! is produced by a per-kind `serialize_<kind>` function driven by
//! [`SerializerOptions`]. Parsing runs the [`grammar`] recognizer and walks
//! the resulting [`SyntaxNode`] tree with the matching `parse_<kind>`
//! function.
//!
//! ```rust
//! use axion::text;
//! use axion::{SerializerOptions, Value};
//!
//! let value = text::parse("units::[54.0, 116, \"some string\"]").unwrap();
//! assert_eq!(value.annotations().to_string(), "units::");
//!
//! let rendered = text::serialize(&value, &SerializerOptions::default());
//! assert_eq!(rendered, "units::[54.0, 116, \"some string\"]");
//! ```

pub mod container;
pub mod escape;
pub mod grammar;
pub mod scalar;
pub mod textual;
pub mod timestamp;

use crate::annotation::{Annotation, Annotations};
use crate::options::{SerializerContext, SerializerOptions};
use crate::value::{IonType, Payload, Value};
use crate::{Error, Result};
use grammar::{symbols, SyntaxNode};

/// Serializes `value`, annotations included, with the given options.
#[must_use]
pub fn serialize(value: &Value, options: &SerializerOptions) -> String {
    serialize_with_context(value, SerializerContext::new(options))
}

/// Serializes `value` at the nesting depth carried by `ctx`.
#[must_use]
pub fn serialize_with_context(value: &Value, ctx: SerializerContext<'_>) -> String {
    let mut out = serialize_annotations(value.annotations());
    out.push_str(&serialize_body(value, ctx));
    out
}

#[must_use]
pub fn serialize_annotations(annotations: &Annotations) -> String {
    annotations.to_string()
}

/// Renders the value without its annotations.
#[must_use]
pub fn serialize_body(value: &Value, ctx: SerializerContext<'_>) -> String {
    match value.payload() {
        Payload::Bool(Some(b)) => scalar::serialize_bool(*b, ctx),
        Payload::Int(Some(i)) => scalar::serialize_int(i, ctx),
        Payload::Float(Some(f)) => scalar::serialize_float(*f),
        Payload::Decimal(Some(d)) => scalar::serialize_decimal(d, ctx),
        Payload::Timestamp(Some(ts)) => timestamp::serialize_timestamp(ts, ctx),
        Payload::String(Some(s)) => textual::serialize_string(s, ctx),
        Payload::Symbol(Some(symbol)) => textual::serialize_symbol(symbol),
        Payload::Blob(Some(bytes)) => textual::serialize_blob(bytes),
        Payload::Clob(Some(bytes)) => textual::serialize_clob(bytes, ctx),
        Payload::List(Some(items)) => container::serialize_list(items, ctx),
        Payload::Sexp(Some(items)) => container::serialize_sexp(items, ctx),
        Payload::Struct(Some(fields)) => container::serialize_struct(fields, ctx),
        null => scalar::serialize_null(null.ion_type(), ctx),
    }
}

/// Parses any single value.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for text the grammar rejects and a format error
/// for literals that are well-formed but out of range.
pub fn parse(text: &str) -> Result<Value> {
    parse_as(symbols::ION_VALUE, text)
}

/// Parses `text` as the production named `production`, e.g. `ion-int`.
///
/// # Errors
///
/// Returns [`Error::SymbolMismatch`] when the text holds another kind.
pub fn parse_as(production: &str, text: &str) -> Result<Value> {
    let node = grammar::recognize(production, text)?;
    parse_node(&node)
}

/// Converts a recognized `ion-value` or `ion-<kind>` node into a value.
///
/// # Errors
///
/// Returns an argument error for any other node.
pub fn parse_node(node: &SyntaxNode) -> Result<Value> {
    if node.symbol() == symbols::ION_VALUE {
        let inner = node
            .child(0)
            .ok_or_else(|| Error::argument("empty ion-value node"))?;
        return parse_node(inner);
    }
    let value = match node.symbol() {
        symbols::ION_NULL => scalar::parse_null(node),
        symbols::ION_BOOL => scalar::parse_bool(node),
        symbols::ION_INT => scalar::parse_int(node),
        symbols::ION_FLOAT => scalar::parse_float(node),
        symbols::ION_DECIMAL => scalar::parse_decimal(node),
        symbols::ION_TIMESTAMP => timestamp::parse_timestamp(node),
        symbols::ION_STRING => textual::parse_string(node),
        symbols::ION_SYMBOL => textual::parse_symbol(node),
        symbols::ION_BLOB => textual::parse_blob(node),
        symbols::ION_CLOB => textual::parse_clob(node),
        symbols::ION_LIST => container::parse_list(node),
        symbols::ION_SEXP => container::parse_sexp(node),
        symbols::ION_STRUCT => container::parse_struct(node),
        other => Err(Error::argument(format!(
            "'{}' is not a value production",
            other
        ))),
    }?;
    match node.find(symbols::ANNOTATION_LIST) {
        Some(list) => Ok(value.with_annotations(parse_annotations(list)?)),
        None => Ok(value),
    }
}

/// Parses an `annotation-list` node.
///
/// # Errors
///
/// Returns a format error for annotations that are reserved words.
pub fn parse_annotations(node: &SyntaxNode) -> Result<Annotations> {
    expect(node, symbols::ANNOTATION_LIST)?;
    node.children()
        .iter()
        .map(|annotation| {
            expect(annotation, symbols::ANNOTATION)?;
            Annotation::parse(annotation.text())
        })
        .collect()
}

pub(crate) fn expect(node: &SyntaxNode, symbol: &str) -> Result<()> {
    if node.symbol() == symbol {
        Ok(())
    } else {
        Err(Error::symbol_mismatch(symbol, node.symbol()))
    }
}

/// Checks that `node` is the `ion-<kind>` production for `ion_type` and
/// returns its literal child, or `None` for the kind's null.
pub(crate) fn literal_of(node: &SyntaxNode, ion_type: IonType) -> Result<Option<&SyntaxNode>> {
    let (production, null) = grammar::productions(ion_type);
    expect(node, production)?;
    let body = node
        .children()
        .last()
        .ok_or_else(|| Error::argument(format!("'{}' node has no body", production)))?;
    if body.symbol() == null {
        Ok(None)
    } else {
        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;

    #[test]
    fn test_annotations_prefix_any_kind() {
        let value = parse("a::'b c'::null.int").unwrap();
        assert!(value.is_null());
        assert_eq!(value.ion_type(), IonType::Int);
        assert_eq!(value.annotations().len(), 2);
        assert_eq!(
            serialize(&value, &SerializerOptions::default()),
            "a::'b c'::null.int"
        );
    }

    #[test]
    fn test_body_omits_annotations() {
        let value = Value::symbol(Symbol::quoted("x y"))
            .with_annotations(Annotation::parse("tag").unwrap());
        let options = SerializerOptions::default();
        assert_eq!(serialize_body(&value, SerializerContext::new(&options)), "'x y'");
        assert_eq!(value.to_string(), "'x y'");
    }

    #[test]
    fn test_parse_as_kind() {
        assert_eq!(parse_as("ion-int", "0x10").unwrap(), Value::from(16));
        assert!(matches!(
            parse_as("ion-bool", "1"),
            Err(Error::SymbolMismatch { .. })
        ));
    }

    #[test]
    fn test_reserved_word_annotation_is_rejected() {
        assert!(matches!(parse("null::1"), Err(Error::Format(_))));
    }

    #[test]
    fn test_parse_node_rejects_non_value_nodes() {
        let tree = grammar::recognize(symbols::ION_LIST, "[1]").unwrap();
        let items = tree.find(symbols::LIST_ITEMS).unwrap();
        assert!(matches!(parse_node(items), Err(Error::Argument(_))));
    }
}
