//! String, symbol, blob and clob text forms.

use super::escape;
use super::grammar::{symbols, SyntaxNode};
use super::{expect, literal_of};
use crate::options::{LineStyle, SerializerContext, TextOptions};
use crate::symbol::Symbol;
use crate::value::{IonType, Value};
use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Splits `items` into runs of `line_break_point` (everything in one run for 0).
fn chunks<T>(items: &[T], line_break_point: usize) -> Vec<&[T]> {
    if items.is_empty() || line_break_point == 0 {
        return vec![items];
    }
    items.chunks(line_break_point).collect()
}

fn join_segments(segments: Vec<String>, ctx: SerializerContext<'_>) -> String {
    segments.join(&format!("\n{}", ctx.indentation(0)))
}

/// `"..."` or, in multi-line style, `'''...'''` segments of
/// `line_break_point` characters joined by newline and indentation.
///
/// ```rust
/// use axion::text::textual::serialize_string;
/// use axion::{LineStyle, SerializerContext, SerializerOptions};
///
/// let options = SerializerOptions::new().with_string_line_style(LineStyle::Multiline, 3);
/// let ctx = SerializerContext::new(&options);
/// assert_eq!(serialize_string("abcdefg", ctx), "'''abc'''\n'''def'''\n'''g'''");
/// ```
#[must_use]
pub fn serialize_string(value: &str, ctx: SerializerContext<'_>) -> String {
    let TextOptions {
        line_style,
        line_break_point,
    } = ctx.options().strings;
    match line_style {
        LineStyle::Singleline => escape::quote_string(value),
        LineStyle::Multiline => {
            let chars: Vec<char> = value.chars().collect();
            let segments = chunks(&chars, line_break_point)
                .into_iter()
                .map(|chunk| escape::long_segment(&chunk.iter().collect::<String>()))
                .collect();
            join_segments(segments, ctx)
        }
    }
}

fn strip_delimiters<'a>(text: &'a str, delimiter: &str) -> Result<&'a str> {
    text.strip_prefix(delimiter)
        .and_then(|rest| rest.strip_suffix(delimiter))
        .ok_or_else(|| Error::format(format!("'{}' is not delimited by {}", text, delimiter)))
}

/// Decodes a `singleline-string` or `multiline-string` node into its raw parts.
fn quoted_text_parts(node: &SyntaxNode) -> Result<Vec<&str>> {
    match node.symbol() {
        symbols::SINGLELINE_STRING => Ok(vec![strip_delimiters(node.text(), "\"")?]),
        symbols::MULTILINE_STRING => node
            .children()
            .iter()
            .map(|segment| {
                expect(segment, symbols::STRING_SEGMENT)?;
                strip_delimiters(segment.text(), "'''")
            })
            .collect(),
        other => Err(Error::symbol_mismatch(symbols::SINGLELINE_STRING, other)),
    }
}

/// # Errors
///
/// Returns [`Error::SymbolMismatch`] unless `node` is an `ion-string` node,
/// and a format error for invalid escapes.
pub fn parse_string(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::String)? else {
        return Ok(Value::null_of(IonType::String));
    };
    let mut text = String::new();
    for part in quoted_text_parts(literal)? {
        text.push_str(&escape::unescape(part)?);
    }
    Ok(Value::from(text))
}

#[must_use]
pub fn serialize_symbol(value: &Symbol) -> String {
    value.to_lexeme()
}

/// # Errors
///
/// Returns [`Error::SymbolMismatch`] unless `node` is an `ion-symbol` node.
pub fn parse_symbol(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Symbol)? else {
        return Ok(Value::null_of(IonType::Symbol));
    };
    Ok(Value::symbol(parse_symbol_token(literal)?))
}

/// Decodes an `identifier`, `quoted-symbol` or `operator` token.
pub(crate) fn parse_symbol_token(token: &SyntaxNode) -> Result<Symbol> {
    match token.symbol() {
        symbols::IDENTIFIER => Symbol::identifier(token.text()),
        symbols::OPERATOR => Symbol::operator(token.text()),
        symbols::QUOTED_SYMBOL => {
            let inner = strip_delimiters(token.text(), "'")?;
            Ok(Symbol::quoted(escape::unescape(inner)?))
        }
        other => Err(Error::symbol_mismatch(symbols::IDENTIFIER, other)),
    }
}

/// `{{base64}}`.
#[must_use]
pub fn serialize_blob(value: &[u8]) -> String {
    format!("{{{{{}}}}}", STANDARD.encode(value))
}

/// # Errors
///
/// Returns a format error for invalid base64.
pub fn parse_blob(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Blob)? else {
        return Ok(Value::null_of(IonType::Blob));
    };
    expect(literal, symbols::BLOB_LITERAL)?;
    let body = literal
        .text()
        .strip_prefix("{{")
        .and_then(|rest| rest.strip_suffix("}}"))
        .ok_or_else(|| Error::format("blob is not wrapped in {{ }}"))?;
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::format(format!("invalid base64 in blob: {}", e)))?;
    Ok(Value::blob(bytes))
}

/// `{{"..."}}` or `{{'''...'''}}` segments; bytes outside printable ASCII
/// use `\xHH` escapes.
///
/// ```rust
/// use axion::text::textual::serialize_clob;
/// use axion::{SerializerContext, SerializerOptions};
///
/// let options = SerializerOptions::new();
/// assert_eq!(serialize_clob(b"hi\n", SerializerContext::new(&options)), "{{\"hi\\n\"}}");
/// ```
#[must_use]
pub fn serialize_clob(value: &[u8], ctx: SerializerContext<'_>) -> String {
    let TextOptions {
        line_style,
        line_break_point,
    } = ctx.options().clobs;
    let body = match line_style {
        LineStyle::Singleline => escape::quote_clob(value),
        LineStyle::Multiline => {
            let segments = chunks(value, line_break_point)
                .into_iter()
                .map(escape::long_clob_segment)
                .collect();
            join_segments(segments, ctx)
        }
    };
    format!("{{{{{}}}}}", body)
}

/// # Errors
///
/// Returns a format error for non-ASCII clob text or escapes above `\xFF`.
pub fn parse_clob(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Clob)? else {
        return Ok(Value::null_of(IonType::Clob));
    };
    expect(literal, symbols::CLOB_LITERAL)?;
    let text = literal
        .child(0)
        .ok_or_else(|| Error::argument("clob-literal node has no text"))?;
    let mut bytes = Vec::new();
    for part in quoted_text_parts(text)? {
        bytes.extend(escape::unescape_clob(part)?);
    }
    Ok(Value::clob(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SerializerOptions;
    use crate::text::{parse, serialize};
    use crate::SymbolKind;

    #[test]
    fn test_singleline_string_escapes_round_trip() {
        let value = Value::from("tab\tquote\"newline\n\u{e9}");
        let text = value.to_string();
        assert_eq!(text, "\"tab\\tquote\\\"newline\\n\u{e9}\"");
        assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn test_multiline_string_round_trip() {
        let options = SerializerOptions::new().with_string_line_style(LineStyle::Multiline, 4);
        let value = Value::from("it's a longer line");
        let text = serialize(&value, &options);
        assert!(text.starts_with("'''it\\'s'''\n'''"));
        assert_eq!(parse(&text).unwrap(), value);

        let empty = serialize(&Value::from(""), &options);
        assert_eq!(empty, "''''''");
        assert_eq!(parse(&empty).unwrap(), Value::from(""));
    }

    #[test]
    fn test_zero_break_point_is_one_segment() {
        let options = SerializerOptions::new().with_string_line_style(LineStyle::Multiline, 0);
        assert_eq!(serialize(&Value::from("abcdef"), &options), "'''abcdef'''");
    }

    #[test]
    fn test_symbol_sub_kinds_survive() {
        for text in ["abc", "'a b'", "<=", "'null'"] {
            let value = parse(text).unwrap();
            assert_eq!(value.to_string(), text);
        }
        let quoted = parse("'abc'").unwrap();
        assert_eq!(quoted.as_symbol().map(Symbol::kind), Some(SymbolKind::QuotedSymbol));
        assert_eq!(parse("null.symbol").unwrap(), Value::null_of(IonType::Symbol));
    }

    #[test]
    fn test_blob() {
        let value = Value::blob(b"hi".to_vec());
        assert_eq!(value.to_string(), "{{aGk=}}");
        assert_eq!(parse("{{ aG k= }}").unwrap(), value);
        assert_eq!(parse("{{}}").unwrap(), Value::blob(Vec::new()));
        assert!(matches!(parse("{{a}}"), Err(Error::Format(_))));
    }

    #[test]
    fn test_clob_forms() {
        let bytes = vec![b'a', 0x00, 0xFE, b'\'', b'z'];
        let value = Value::clob(bytes.clone());
        assert_eq!(parse(&value.to_string()).unwrap(), value);

        let options = SerializerOptions::new().with_clob_line_style(LineStyle::Multiline, 2);
        let text = serialize(&value, &options);
        assert!(text.starts_with("{{'''a\\0'''\n"));
        assert_eq!(parse(&text).unwrap().as_bytes(), Some(&bytes[..]));
    }
}
