//! The Axion value model.
//!
//! A [`Value`] pairs a [`Payload`] with an ordered [`Annotations`] list. The
//! payload is a closed tagged union with one variant per kind; every kind is
//! nullable and "no payload" and "null" are the same state.
//!
//! ## Creating Values
//!
//! ```rust
//! use axion::{Annotations, IonType, Value};
//!
//! let int = Value::from(42);
//! let text = Value::from("hello");
//! let null_int = Value::null_of(IonType::Int);
//!
//! assert!(!int.is_null());
//! assert!(null_int.is_null());
//! assert_eq!(null_int.to_string(), "null.int");
//!
//! let tagged = Value::from(3).with_annotations(Annotations::parse_collection("meters::").unwrap());
//! assert_eq!(tagged.annotations().len(), 1);
//! ```
//!
//! ## Equality
//!
//! Equality is structural: same kind, equal payloads and sequence-equal
//! annotations. Floats treat NaN as equal to NaN, decimals compare
//! numerically and structs ignore insertion order.

use crate::annotation::Annotations;
use crate::decimal::Decimal;
use crate::ion_struct::IonStruct;
use crate::symbol::Symbol;
use crate::timestamp::Timestamp;
use crate::{Error, SerializerContext, SerializerOptions};
use chrono::{DateTime, FixedOffset};
use num_bigint::BigInt;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The kind tag of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IonType {
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    Timestamp,
    String,
    Symbol,
    Blob,
    Clob,
    List,
    Sexp,
    Struct,
}

impl IonType {
    pub const ALL: [IonType; 13] = [
        IonType::Null,
        IonType::Bool,
        IonType::Int,
        IonType::Float,
        IonType::Decimal,
        IonType::Timestamp,
        IonType::String,
        IonType::Symbol,
        IonType::Blob,
        IonType::Clob,
        IonType::List,
        IonType::Sexp,
        IonType::Struct,
    ];

    /// The name used in `null.<name>` literals.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IonType::Null => "null",
            IonType::Bool => "bool",
            IonType::Int => "int",
            IonType::Float => "float",
            IonType::Decimal => "decimal",
            IonType::Timestamp => "timestamp",
            IonType::String => "string",
            IonType::Symbol => "symbol",
            IonType::Blob => "blob",
            IonType::Clob => "clob",
            IonType::List => "list",
            IonType::Sexp => "sexp",
            IonType::Struct => "struct",
        }
    }

    /// Looks up a kind by its `null.<name>` spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<IonType> {
        IonType::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for IonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload. `None` is the null of that kind.
#[derive(Clone, Debug, Default)]
pub enum Payload {
    #[default]
    Null,
    Bool(Option<bool>),
    Int(Option<BigInt>),
    Float(Option<f64>),
    Decimal(Option<Decimal>),
    Timestamp(Option<Timestamp>),
    String(Option<String>),
    Symbol(Option<Symbol>),
    Blob(Option<Vec<u8>>),
    Clob(Option<Vec<u8>>),
    List(Option<Vec<Value>>),
    Sexp(Option<Vec<Value>>),
    Struct(Option<IonStruct>),
}

impl Payload {
    /// The null payload of `ion_type`.
    #[must_use]
    pub fn null_of(ion_type: IonType) -> Payload {
        match ion_type {
            IonType::Null => Payload::Null,
            IonType::Bool => Payload::Bool(None),
            IonType::Int => Payload::Int(None),
            IonType::Float => Payload::Float(None),
            IonType::Decimal => Payload::Decimal(None),
            IonType::Timestamp => Payload::Timestamp(None),
            IonType::String => Payload::String(None),
            IonType::Symbol => Payload::Symbol(None),
            IonType::Blob => Payload::Blob(None),
            IonType::Clob => Payload::Clob(None),
            IonType::List => Payload::List(None),
            IonType::Sexp => Payload::Sexp(None),
            IonType::Struct => Payload::Struct(None),
        }
    }

    #[must_use]
    pub const fn ion_type(&self) -> IonType {
        match self {
            Payload::Null => IonType::Null,
            Payload::Bool(_) => IonType::Bool,
            Payload::Int(_) => IonType::Int,
            Payload::Float(_) => IonType::Float,
            Payload::Decimal(_) => IonType::Decimal,
            Payload::Timestamp(_) => IonType::Timestamp,
            Payload::String(_) => IonType::String,
            Payload::Symbol(_) => IonType::Symbol,
            Payload::Blob(_) => IonType::Blob,
            Payload::Clob(_) => IonType::Clob,
            Payload::List(_) => IonType::List,
            Payload::Sexp(_) => IonType::Sexp,
            Payload::Struct(_) => IonType::Struct,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(
            self,
            Payload::Null
                | Payload::Bool(None)
                | Payload::Int(None)
                | Payload::Float(None)
                | Payload::Decimal(None)
                | Payload::Timestamp(None)
                | Payload::String(None)
                | Payload::Symbol(None)
                | Payload::Blob(None)
                | Payload::Clob(None)
                | Payload::List(None)
                | Payload::Sexp(None)
                | Payload::Struct(None)
        )
    }
}

fn float_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn float_hash<H: Hasher>(f: f64, state: &mut H) {
    let canonical = if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0f64.to_bits()
    } else {
        f.to_bits()
    };
    canonical.hash(state);
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Null, Payload::Null) => true,
            (Payload::Bool(a), Payload::Bool(b)) => a == b,
            (Payload::Int(a), Payload::Int(b)) => a == b,
            (Payload::Float(a), Payload::Float(b)) => match (a, b) {
                (Some(a), Some(b)) => float_eq(*a, *b),
                (None, None) => true,
                _ => false,
            },
            (Payload::Decimal(a), Payload::Decimal(b)) => a == b,
            (Payload::Timestamp(a), Payload::Timestamp(b)) => a == b,
            (Payload::String(a), Payload::String(b)) => a == b,
            (Payload::Symbol(a), Payload::Symbol(b)) => a == b,
            (Payload::Blob(a), Payload::Blob(b)) => a == b,
            (Payload::Clob(a), Payload::Clob(b)) => a == b,
            (Payload::List(a), Payload::List(b)) => a == b,
            (Payload::Sexp(a), Payload::Sexp(b)) => a == b,
            (Payload::Struct(a), Payload::Struct(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Payload {}

impl Hash for Payload {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ion_type().hash(state);
        match self {
            Payload::Null => {}
            Payload::Bool(v) => v.hash(state),
            Payload::Int(v) => v.hash(state),
            Payload::Float(v) => match v {
                Some(f) => {
                    true.hash(state);
                    float_hash(*f, state);
                }
                None => false.hash(state),
            },
            Payload::Decimal(v) => v.hash(state),
            Payload::Timestamp(v) => v.hash(state),
            Payload::String(v) => v.hash(state),
            Payload::Symbol(v) => v.hash(state),
            Payload::Blob(v) | Payload::Clob(v) => v.hash(state),
            Payload::List(v) | Payload::Sexp(v) => v.hash(state),
            Payload::Struct(v) => v.hash(state),
        }
    }
}

/// A typed, annotated Axion value.
///
/// `Clone` produces an independent deep copy, including byte buffers and
/// container children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Value {
    payload: Payload,
    annotations: Annotations,
}

impl Value {
    #[must_use]
    pub fn new(payload: Payload) -> Self {
        Value {
            payload,
            annotations: Annotations::new(),
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: impl Into<Annotations>) -> Self {
        self.annotations = annotations.into();
        self
    }

    /// The untyped null (`null` / `null.null`).
    #[must_use]
    pub fn null() -> Self {
        Value::new(Payload::Null)
    }

    /// The null of `ion_type`, with no annotations.
    #[must_use]
    pub fn null_of(ion_type: IonType) -> Self {
        Value::new(Payload::null_of(ion_type))
    }

    #[must_use]
    pub fn decimal(value: Decimal) -> Self {
        Value::new(Payload::Decimal(Some(value)))
    }

    #[must_use]
    pub fn timestamp(value: Timestamp) -> Self {
        Value::new(Payload::Timestamp(Some(value)))
    }

    #[must_use]
    pub fn symbol(value: Symbol) -> Self {
        Value::new(Payload::Symbol(Some(value)))
    }

    #[must_use]
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        Value::new(Payload::Blob(Some(bytes.into())))
    }

    #[must_use]
    pub fn clob(bytes: impl Into<Vec<u8>>) -> Self {
        Value::new(Payload::Clob(Some(bytes.into())))
    }

    #[must_use]
    pub fn list(items: Vec<Value>) -> Self {
        Value::new(Payload::List(Some(items)))
    }

    #[must_use]
    pub fn sexp(items: Vec<Value>) -> Self {
        Value::new(Payload::Sexp(Some(items)))
    }

    #[must_use]
    pub fn structure(fields: IonStruct) -> Self {
        Value::new(Payload::Struct(Some(fields)))
    }

    #[inline]
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[inline]
    #[must_use]
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    #[must_use]
    pub fn into_parts(self) -> (Payload, Annotations) {
        (self.payload, self.annotations)
    }

    #[inline]
    #[must_use]
    pub const fn ion_type(&self) -> IonType {
        self.payload.ion_type()
    }

    /// Returns `true` if the payload is absent.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.payload.is_null()
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.payload {
            Payload::Bool(b) => b,
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&BigInt> {
        match &self.payload {
            Payload::Int(i) => i.as_ref(),
            _ => None,
        }
    }

    /// Returns the integer payload if it fits in an `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_int().and_then(|i| i64::try_from(i).ok())
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self.payload {
            Payload::Float(f) => f,
            _ => None,
        }
    }

    #[must_use]
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match &self.payload {
            Payload::Decimal(d) => d.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match &self.payload {
            Payload::Timestamp(t) => t.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(s) => s.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match &self.payload {
            Payload::Symbol(s) => s.as_ref(),
            _ => None,
        }
    }

    /// Bytes of a blob or clob.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Blob(b) | Payload::Clob(b) => b.as_deref(),
            _ => None,
        }
    }

    /// Children of a list or sexp.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match &self.payload {
            Payload::List(items) | Payload::Sexp(items) => items.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&IonStruct> {
        match &self.payload {
            Payload::Struct(s) => s.as_ref(),
            _ => None,
        }
    }

    /// Renders the bare value (no annotations) with default formatting.
    #[must_use]
    pub fn to_ion_text(&self) -> String {
        let options = SerializerOptions::default();
        crate::text::serialize_body(self, SerializerContext::new(&options))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ion_text())
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        Value::new(payload)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::new(Payload::Bool(Some(value)))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::new(Payload::Int(Some(BigInt::from(value))))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize);

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::new(Payload::Int(Some(value)))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::new(Payload::Float(Some(f64::from(value))))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::new(Payload::Float(Some(value)))
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::decimal(value)
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Value::timestamp(value)
    }
}

impl TryFrom<DateTime<FixedOffset>> for Value {
    type Error = Error;

    fn try_from(value: DateTime<FixedOffset>) -> crate::Result<Self> {
        Timestamp::new(value).map(Value::timestamp)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::new(Payload::String(Some(value)))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::new(Payload::String(Some(value.to_string())))
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::symbol(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::list(value)
    }
}

impl From<IonStruct> for Value {
    fn from(value: IonStruct) -> Self {
        Value::structure(value)
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::argument(format!("expected bool, found {}", value.ion_type())))
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| {
            Error::argument(format!(
                "expected int in i64 range, found {}",
                value.ion_type()
            ))
        })
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| Error::argument(format!("expected float, found {}", value.ion_type())))
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value.payload {
            Payload::String(Some(s)) => Ok(s),
            other => Err(Error::argument(format!(
                "expected string, found {}",
                other.ion_type()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Annotation;
    use crate::ion_struct::Property;

    #[test]
    fn test_null_canonicality() {
        for ion_type in IonType::ALL {
            let null = Value::null_of(ion_type);
            assert!(null.is_null());
            assert_eq!(null.ion_type(), ion_type);
            assert_eq!(null, Value::new(Payload::null_of(ion_type)));
        }
        assert!(!Value::from(false).is_null());
        assert!(!Value::list(vec![]).is_null());
    }

    #[test]
    fn test_null_kinds_are_distinct() {
        assert_ne!(Value::null_of(IonType::Int), Value::null_of(IonType::Float));
        assert_ne!(Value::null(), Value::null_of(IonType::Bool));
    }

    #[test]
    fn test_float_special_values() {
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_eq!(Value::from(0.0), Value::from(-0.0));
        assert_ne!(Value::from(f64::INFINITY), Value::from(f64::NEG_INFINITY));
    }

    #[test]
    fn test_annotation_order_matters() {
        let a = Annotation::parse("a").unwrap();
        let b = Annotation::parse("b").unwrap();
        let ab = Value::from(1).with_annotations(vec![a.clone(), b.clone()]);
        let ba = Value::from(1).with_annotations(vec![b, a]);
        assert_ne!(ab, ba);
        assert_ne!(ab, Value::from(1));
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Value::list(vec![Value::blob(vec![1u8, 2, 3])]);
        let mut copy = original.clone();
        assert_eq!(copy, original);
        if let Payload::List(Some(items)) = &mut copy.payload {
            items.push(Value::from(4));
        }
        assert_ne!(copy, original);
        assert_eq!(original.as_sequence().map(<[Value]>::len), Some(1));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(42).as_i64(), Some(42));
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::null_of(IonType::String).as_str(), None);
        assert_eq!(Value::clob(b"x".to_vec()).as_bytes(), Some(&b"x"[..]));

        let s: IonStruct = vec![Property::named("k", Value::from(true))]
            .into_iter()
            .collect();
        assert_eq!(
            Value::structure(s).as_struct().and_then(|s| s.get("k")),
            Some(&Value::from(true))
        );
    }

    #[test]
    fn test_try_from() {
        assert_eq!(i64::try_from(Value::from(7)).unwrap(), 7);
        assert!(i64::try_from(Value::from(BigInt::from(u128::MAX))).is_err());
        assert!(bool::try_from(Value::from(1)).is_err());
        assert_eq!(String::try_from(Value::from("s")).unwrap(), "s");
    }

    #[test]
    fn test_ion_type_names() {
        assert_eq!(IonType::from_name("timestamp"), Some(IonType::Timestamp));
        assert_eq!(IonType::from_name("nope"), None);
    }
}
