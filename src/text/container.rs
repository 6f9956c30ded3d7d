//! List, sexp and struct text forms.
//!
//! Containers serialize their children through [`serialize_with_context`]
//! with a context one level deeper, so nested multi-line containers indent
//! one unit per level.

use super::escape;
use super::grammar::{symbols, SyntaxNode};
use super::textual::parse_symbol_token;
use super::{expect, literal_of, parse_node, serialize_with_context};
use crate::ion_struct::{IonStruct, Property};
use crate::options::SerializerContext;
use crate::value::{IonType, Value};
use crate::{Error, Result};

struct Delimiters {
    open: &'static str,
    close: &'static str,
    separator: &'static str,
    line_separator: &'static str,
}

const LIST: Delimiters = Delimiters {
    open: "[",
    close: "]",
    separator: ", ",
    line_separator: ",\n",
};

const SEXP: Delimiters = Delimiters {
    open: "(",
    close: ")",
    separator: " ",
    line_separator: "\n",
};

const STRUCT: Delimiters = Delimiters {
    open: "{",
    close: "}",
    separator: ", ",
    line_separator: ",\n",
};

/// Renders each child with the child context, then joins them.
fn render_children<T>(
    items: &[T],
    ctx: SerializerContext<'_>,
    multiline: bool,
    delimiters: &Delimiters,
    render: impl Fn(&T, SerializerContext<'_>) -> String,
) -> String {
    let child = ctx.indent();
    let parts = items.iter().map(|item| render(item, child)).collect();
    join_children(parts, ctx, multiline, delimiters)
}

fn join_children(
    parts: Vec<String>,
    ctx: SerializerContext<'_>,
    multiline: bool,
    delimiters: &Delimiters,
) -> String {
    if parts.is_empty() {
        return format!("{}{}", delimiters.open, delimiters.close);
    }
    if multiline {
        let child = ctx.indent();
        let lines: Vec<String> = parts
            .iter()
            .map(|part| format!("{}{}", child.indentation(0), part))
            .collect();
        format!(
            "{}\n{}\n{}{}",
            delimiters.open,
            lines.join(delimiters.line_separator),
            ctx.indentation(0),
            delimiters.close
        )
    } else {
        format!(
            "{}{}{}",
            delimiters.open,
            parts.join(delimiters.separator),
            delimiters.close
        )
    }
}

/// `[a, b]`, or one child per line when multi-line lists are enabled.
#[must_use]
pub fn serialize_list(items: &[Value], ctx: SerializerContext<'_>) -> String {
    let multiline = ctx.options().lists.use_multiple_lines;
    render_children(items, ctx, multiline, &LIST, serialize_with_context)
}

/// `(a b)`, or one child per line when multi-line sexps are enabled.
///
/// A multi-line string that directly follows another is written in `"..."`
/// form so the two stay separate values.
#[must_use]
pub fn serialize_sexp(items: &[Value], ctx: SerializerContext<'_>) -> String {
    let multiline = ctx.options().sexps.use_multiple_lines;
    let child = ctx.indent();
    let mut parts: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let mut part = serialize_with_context(item, child);
        // Whitespace between `'''` segments joins them into one string.
        let follows_long_string = parts.last().is_some_and(|prev| prev.ends_with("'''"));
        if follows_long_string && part.starts_with("'''") {
            if let Some(text) = item.as_str() {
                part = escape::quote_string(text);
            }
        }
        parts.push(part);
    }
    join_children(parts, ctx, multiline, &SEXP)
}

/// `{a:1, b:2}` with properties in name order.
///
/// ```rust
/// use axion::text::container::serialize_struct;
/// use axion::{IonStruct, Property, SerializerContext, SerializerOptions, Value};
///
/// let fields: IonStruct = vec![
///     Property::named("b", Value::from(2)),
///     Property::named("a b", Value::from(1)),
/// ]
/// .into_iter()
/// .collect();
/// let options = SerializerOptions::new();
/// assert_eq!(serialize_struct(&fields, SerializerContext::new(&options)), "{'a b':1, b:2}");
///
/// let quoted = SerializerOptions::new().with_quoted_property_names(true);
/// assert_eq!(serialize_struct(&fields, SerializerContext::new(&quoted)), "{'a b':1, 'b':2}");
/// ```
#[must_use]
pub fn serialize_struct(fields: &IonStruct, ctx: SerializerContext<'_>) -> String {
    let structs = &ctx.options().structs;
    let quote_all = structs.use_quoted_identifier_property_names;
    render_children(
        &fields.sorted(),
        ctx,
        structs.use_multiple_lines,
        &STRUCT,
        |property, child| {
            let name = if quote_all {
                escape::quote_symbol(property.name().text())
            } else {
                property.name().to_lexeme()
            };
            format!("{}:{}", name, serialize_with_context(property.value(), child))
        },
    )
}

fn parse_items(literal: &SyntaxNode, symbol: &str) -> Result<Vec<Value>> {
    expect(literal, symbol)?;
    literal.children().iter().map(parse_node).collect()
}

/// # Errors
///
/// Returns the first error raised by a child.
pub fn parse_list(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::List)? else {
        return Ok(Value::null_of(IonType::List));
    };
    Ok(Value::list(parse_items(literal, symbols::LIST_ITEMS)?))
}

/// # Errors
///
/// Returns the first error raised by a child.
pub fn parse_sexp(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Sexp)? else {
        return Ok(Value::null_of(IonType::Sexp));
    };
    Ok(Value::sexp(parse_items(literal, symbols::SEXP_ITEMS)?))
}

fn parse_field(field: &SyntaxNode) -> Result<Property> {
    expect(field, symbols::STRUCT_FIELD)?;
    let (name, value) = match field.children() {
        [name, value] => (name, value),
        _ => return Err(Error::argument("struct-field needs a name and a value")),
    };
    expect(name, symbols::PROPERTY_NAME)?;
    let token = name
        .child(0)
        .ok_or_else(|| Error::argument("property-name node is empty"))?;
    Property::new(parse_symbol_token(token)?, parse_node(value)?)
}

/// Repeated names keep the last value.
///
/// # Errors
///
/// Returns the first error raised by a property name or value.
pub fn parse_struct(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Struct)? else {
        return Ok(Value::null_of(IonType::Struct));
    };
    expect(literal, symbols::STRUCT_FIELDS)?;
    let fields = literal
        .children()
        .iter()
        .map(parse_field)
        .collect::<Result<IonStruct>>()?;
    Ok(Value::structure(fields))
}
