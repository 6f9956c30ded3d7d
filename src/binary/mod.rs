//! Axion binary codec.
//!
//! Every value is framed as one metadata byte, an optional annotation block
//! and a kind-specific payload:
//!
//! ```text
//! bit  7        6      5     4       3..0
//!     annotated null  (0)   flag    type tag
//! ```
//!
//! The flag bit holds the value of a bool and the sign of an int or decimal.
//! Symbol text (symbol values, struct property names and annotations) goes
//! through a [`SymbolHashList`], so a repeated symbol costs one back-reference.
//!
//! ```rust
//! use axion::{binary, Value};
//!
//! let value = Value::list(vec![Value::from(true), Value::from(-5)]);
//! let bytes = binary::to_bytes(&value).unwrap();
//! assert_eq!(binary::from_bytes(&bytes).unwrap(), value);
//! ```

pub mod symbols;
pub mod varbyte;

pub use symbols::SymbolHashList;
pub use varbyte::{read_var_byte_integer, read_var_usize, write_var_bytes, write_var_usize};

use crate::annotation::{Annotation, Annotations};
use crate::decimal::{Decimal, MAX_SCALE};
use crate::ion_struct::{IonStruct, Property};
use crate::symbol::{Symbol, SymbolKind};
use crate::timestamp::{Timestamp, TimestampPrecision};
use crate::value::{IonType, Payload, Value};
use crate::{Error, Result};
use chrono::{Datelike, Timelike};
use num_bigint::{BigInt, Sign};
use std::io::{ErrorKind, Read, Write};
use tracing::debug;
use varbyte::{read_array, read_block, read_u8, write_block};

const TAG_MASK: u8 = 0x0F;
const FLAG_BIT: u8 = 0x10;
const NULL_BIT: u8 = 0x40;
const ANNOTATED_BIT: u8 = 0x80;

/// Type tags stored in the low nibble of the metadata byte.
pub mod tag {
    pub const NULL: u8 = 0;
    pub const BOOL: u8 = 1;
    pub const INT: u8 = 2;
    pub const FLOAT: u8 = 3;
    pub const DECIMAL: u8 = 4;
    pub const TIMESTAMP: u8 = 5;
    pub const STRING: u8 = 6;
    pub const OPERATOR: u8 = 7;
    pub const IDENTIFIER: u8 = 8;
    pub const QUOTED_SYMBOL: u8 = 9;
    pub const BLOB: u8 = 10;
    pub const CLOB: u8 = 11;
    pub const LIST: u8 = 12;
    pub const SEXP: u8 = 13;
    pub const STRUCT: u8 = 14;
}

fn symbol_tag(kind: SymbolKind) -> u8 {
    match kind {
        SymbolKind::Operator => tag::OPERATOR,
        SymbolKind::Identifier => tag::IDENTIFIER,
        SymbolKind::QuotedSymbol => tag::QUOTED_SYMBOL,
    }
}

/// The metadata byte for `value`.
#[must_use]
pub fn metadata_byte(value: &Value) -> u8 {
    let (type_tag, flag) = match value.payload() {
        Payload::Null => (tag::NULL, false),
        Payload::Bool(b) => (tag::BOOL, *b == Some(true)),
        Payload::Int(i) => (
            tag::INT,
            i.as_ref().is_some_and(|i| i.sign() == Sign::Minus),
        ),
        Payload::Float(_) => (tag::FLOAT, false),
        Payload::Decimal(d) => (tag::DECIMAL, d.as_ref().is_some_and(Decimal::is_negative)),
        Payload::Timestamp(_) => (tag::TIMESTAMP, false),
        Payload::String(_) => (tag::STRING, false),
        Payload::Symbol(s) => (
            s.as_ref().map_or(tag::IDENTIFIER, |s| symbol_tag(s.kind())),
            false,
        ),
        Payload::Blob(_) => (tag::BLOB, false),
        Payload::Clob(_) => (tag::CLOB, false),
        Payload::List(_) => (tag::LIST, false),
        Payload::Sexp(_) => (tag::SEXP, false),
        Payload::Struct(_) => (tag::STRUCT, false),
    };
    let mut metadata = type_tag;
    if flag {
        metadata |= FLAG_BIT;
    }
    if value.is_null() {
        metadata |= NULL_BIT;
    }
    if !value.annotations().is_empty() {
        metadata |= ANNOTATED_BIT;
    }
    metadata
}

/// Writes one framed value.
///
/// # Errors
///
/// Propagates write failures and rejects timestamps whose year does not fit
/// in two bytes.
pub fn write_value<W: Write>(
    value: &Value,
    writer: &mut W,
    symbols: &mut SymbolHashList,
) -> Result<()> {
    writer.write_all(&[metadata_byte(value)])?;
    if !value.annotations().is_empty() {
        write_var_usize(writer, value.annotations().len())?;
        for annotation in value.annotations() {
            symbols.write_symbol(writer, &annotation.to_string())?;
        }
    }
    write_payload(value.payload(), writer, symbols)
}

fn write_payload<W: Write>(
    payload: &Payload,
    writer: &mut W,
    symbols: &mut SymbolHashList,
) -> Result<()> {
    match payload {
        Payload::Int(Some(i)) => write_var_bytes(writer, i.magnitude()),
        Payload::Float(Some(f)) => {
            writer.write_all(&f.to_bits().to_be_bytes())?;
            Ok(())
        }
        Payload::Decimal(Some(d)) => {
            write_var_usize(writer, d.scale() as usize)?;
            write_var_bytes(writer, d.coefficient().magnitude())
        }
        Payload::Timestamp(Some(ts)) => write_timestamp(ts, writer),
        Payload::String(Some(s)) => write_block(writer, s.as_bytes()),
        Payload::Symbol(Some(s)) => symbols.write_symbol(writer, s.text()),
        Payload::Blob(Some(bytes)) | Payload::Clob(Some(bytes)) => write_block(writer, bytes),
        Payload::List(Some(items)) | Payload::Sexp(Some(items)) => {
            write_var_usize(writer, items.len())?;
            for item in items {
                write_value(item, writer, symbols)?;
            }
            Ok(())
        }
        Payload::Struct(Some(fields)) => {
            write_var_usize(writer, fields.len())?;
            for property in fields.iter() {
                write_value(&Value::symbol(property.name().clone()), writer, symbols)?;
                write_value(property.value(), writer, symbols)?;
            }
            Ok(())
        }
        // Nulls and bools are fully described by the metadata byte.
        _ => Ok(()),
    }
}

fn precision_code(precision: TimestampPrecision) -> u8 {
    TimestampPrecision::ALL
        .iter()
        .position(|p| *p == precision)
        .map_or(0, |index| index as u8)
}

fn write_timestamp<W: Write>(ts: &Timestamp, writer: &mut W) -> Result<()> {
    let precision = ts.precision();
    let local = ts.datetime().naive_local();
    let year = i16::try_from(local.year()).map_err(|_| {
        Error::invariant(format!("year {} does not fit in two bytes", local.year()))
    })?;
    let mut fields = vec![precision_code(precision)];
    fields.extend_from_slice(&year.to_be_bytes());
    if precision >= TimestampPrecision::Month {
        fields.push(local.month() as u8);
    }
    if precision >= TimestampPrecision::Day {
        fields.push(local.day() as u8);
    }
    if precision >= TimestampPrecision::Minute {
        fields.push(local.hour() as u8);
        fields.push(local.minute() as u8);
    }
    if precision >= TimestampPrecision::Second {
        fields.push(local.second() as u8);
    }
    writer.write_all(&fields)?;
    if precision >= TimestampPrecision::Millisecond {
        write_var_usize(writer, local.nanosecond() as usize)?;
    }
    writer.write_all(&ts.offset().local_minus_utc().to_be_bytes())?;
    Ok(())
}

fn read_timestamp<R: Read>(reader: &mut R) -> Result<Timestamp> {
    let code = read_u8(reader)?;
    let precision = *TimestampPrecision::ALL
        .get(usize::from(code))
        .ok_or_else(|| Error::format(format!("unknown timestamp precision {}", code)))?;
    let year = i16::from_be_bytes(read_array(reader)?);
    let mut next_field = |wanted: TimestampPrecision, default: u32| -> Result<u32> {
        if precision >= wanted {
            Ok(u32::from(read_u8(reader)?))
        } else {
            Ok(default)
        }
    };
    let month = next_field(TimestampPrecision::Month, 1)?;
    let day = next_field(TimestampPrecision::Day, 1)?;
    let hour = next_field(TimestampPrecision::Minute, 0)?;
    let minute = next_field(TimestampPrecision::Minute, 0)?;
    let second = next_field(TimestampPrecision::Second, 0)?;
    let nanosecond = if precision >= TimestampPrecision::Millisecond {
        u32::try_from(read_var_usize(reader)?)
            .map_err(|_| Error::format("timestamp nanoseconds out of range"))?
    } else {
        0
    };
    let offset = i32::from_be_bytes(read_array(reader)?);
    Timestamp::from_fields(
        i32::from(year),
        month,
        day,
        hour,
        minute,
        second,
        nanosecond,
        offset,
    )
}

/// Reads one framed value.
///
/// # Errors
///
/// Returns [`Error::UnexpectedEof`] for truncated input and format or
/// invariant errors for malformed frames.
pub fn read_value<R: Read>(reader: &mut R, symbols: &mut SymbolHashList) -> Result<Value> {
    let metadata = read_u8(reader)?;
    read_framed(metadata, reader, symbols)
}

/// Reads values until the input is exhausted, sharing one symbol table.
///
/// # Errors
///
/// Fails on the first malformed or truncated value.
pub fn read_stream<R: Read>(reader: &mut R, symbols: &mut SymbolHashList) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    let mut metadata = [0u8; 1];
    loop {
        match reader.read(&mut metadata) {
            Ok(0) => break,
            Ok(_) => values.push(read_framed(metadata[0], reader, symbols)?),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    debug!("Read {} values from binary stream", values.len());
    Ok(values)
}

fn ion_type_of(type_tag: u8) -> Result<IonType> {
    Ok(match type_tag {
        tag::NULL => IonType::Null,
        tag::BOOL => IonType::Bool,
        tag::INT => IonType::Int,
        tag::FLOAT => IonType::Float,
        tag::DECIMAL => IonType::Decimal,
        tag::TIMESTAMP => IonType::Timestamp,
        tag::STRING => IonType::String,
        tag::OPERATOR | tag::IDENTIFIER | tag::QUOTED_SYMBOL => IonType::Symbol,
        tag::BLOB => IonType::Blob,
        tag::CLOB => IonType::Clob,
        tag::LIST => IonType::List,
        tag::SEXP => IonType::Sexp,
        tag::STRUCT => IonType::Struct,
        other => return Err(Error::format(format!("unknown type tag {}", other))),
    })
}

fn read_framed<R: Read>(
    metadata: u8,
    reader: &mut R,
    symbols: &mut SymbolHashList,
) -> Result<Value> {
    let annotations = if metadata & ANNOTATED_BIT != 0 {
        read_annotations(reader, symbols)?
    } else {
        Annotations::new()
    };
    let type_tag = metadata & TAG_MASK;
    let ion_type = ion_type_of(type_tag)?;
    let payload = if metadata & NULL_BIT != 0 {
        Payload::null_of(ion_type)
    } else {
        read_payload(type_tag, metadata & FLAG_BIT != 0, reader, symbols)?
    };
    Ok(Value::new(payload).with_annotations(annotations))
}

fn read_annotations<R: Read>(reader: &mut R, symbols: &mut SymbolHashList) -> Result<Annotations> {
    let count = read_var_usize(reader)?;
    let mut annotations = Annotations::new();
    for _ in 0..count {
        annotations.push(Annotation::parse(&symbols.read_symbol(reader)?)?);
    }
    Ok(annotations)
}

fn signed(magnitude: num_bigint::BigUint, negative: bool) -> BigInt {
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    BigInt::from_biguint(sign, magnitude)
}

fn read_symbol_value<R: Read>(
    type_tag: u8,
    reader: &mut R,
    symbols: &mut SymbolHashList,
) -> Result<Symbol> {
    let text = symbols.read_symbol(reader)?;
    match type_tag {
        tag::OPERATOR => Symbol::operator(text),
        tag::IDENTIFIER => Symbol::identifier(text),
        _ => Ok(Symbol::quoted(text)),
    }
}

fn read_items<R: Read>(reader: &mut R, symbols: &mut SymbolHashList) -> Result<Vec<Value>> {
    let count = read_var_usize(reader)?;
    let mut items = Vec::new();
    for _ in 0..count {
        items.push(read_value(reader, symbols)?);
    }
    Ok(items)
}

fn read_struct<R: Read>(reader: &mut R, symbols: &mut SymbolHashList) -> Result<IonStruct> {
    let count = read_var_usize(reader)?;
    let mut fields = IonStruct::new();
    for _ in 0..count {
        let name = read_value(reader, symbols)?;
        let name = name
            .as_symbol()
            .cloned()
            .ok_or_else(|| Error::invariant(format!("struct property name is a {}", name.ion_type())))?;
        let value = read_value(reader, symbols)?;
        fields.insert(Property::new(name, value)?);
    }
    Ok(fields)
}

fn read_payload<R: Read>(
    type_tag: u8,
    flag: bool,
    reader: &mut R,
    symbols: &mut SymbolHashList,
) -> Result<Payload> {
    Ok(match type_tag {
        tag::NULL => Payload::Null,
        tag::BOOL => Payload::Bool(Some(flag)),
        tag::INT => Payload::Int(Some(signed(read_var_byte_integer(reader)?, flag))),
        tag::FLOAT => Payload::Float(Some(f64::from_bits(u64::from_be_bytes(read_array(
            reader,
        )?)))),
        tag::DECIMAL => {
            let scale = u32::try_from(read_var_usize(reader)?)
                .ok()
                .filter(|scale| *scale <= MAX_SCALE)
                .ok_or_else(|| Error::format("decimal scale out of range"))?;
            let coefficient = signed(read_var_byte_integer(reader)?, flag);
            Payload::Decimal(Some(Decimal::new(coefficient, scale)?))
        }
        tag::TIMESTAMP => Payload::Timestamp(Some(read_timestamp(reader)?)),
        tag::STRING => {
            let text = String::from_utf8(read_block(reader)?)
                .map_err(|e| Error::format(format!("string is not UTF-8: {}", e)))?;
            Payload::String(Some(text))
        }
        tag::OPERATOR | tag::IDENTIFIER | tag::QUOTED_SYMBOL => {
            Payload::Symbol(Some(read_symbol_value(type_tag, reader, symbols)?))
        }
        tag::BLOB => Payload::Blob(Some(read_block(reader)?)),
        tag::CLOB => Payload::Clob(Some(read_block(reader)?)),
        tag::LIST => Payload::List(Some(read_items(reader, symbols)?)),
        tag::SEXP => Payload::Sexp(Some(read_items(reader, symbols)?)),
        tag::STRUCT => Payload::Struct(Some(read_struct(reader, symbols)?)),
        other => return Err(Error::format(format!("unknown type tag {}", other))),
    })
}

/// Encodes one value with a fresh symbol table.
///
/// # Errors
///
/// See [`write_value`].
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_value(value, &mut buf, &mut SymbolHashList::new())?;
    debug!("Encoded {} value into {} bytes", value.ion_type(), buf.len());
    Ok(buf)
}

/// Decodes exactly one value with a fresh symbol table.
///
/// # Errors
///
/// Returns an invariant error if bytes remain after the value.
pub fn from_bytes(bytes: &[u8]) -> Result<Value> {
    let mut input = bytes;
    let value = read_value(&mut input, &mut SymbolHashList::new())?;
    if !input.is_empty() {
        return Err(Error::invariant(format!(
            "{} trailing bytes after value",
            input.len()
        )));
    }
    debug!("Decoded {} value from {} bytes", value.ion_type(), bytes.len());
    Ok(value)
}
