//! Null, bool, int, float and decimal text forms.

use super::grammar::{symbols, SyntaxNode};
use super::{expect, literal_of};
use crate::decimal::Decimal;
use crate::options::{NumberFormat, SerializerContext};
use crate::value::{IonType, Value};
use crate::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};

/// `null.<kind>`, or `null` / `null.null` for the null kind.
#[must_use]
pub fn serialize_null(ion_type: IonType, ctx: SerializerContext<'_>) -> String {
    match ion_type {
        IonType::Null if !ctx.options().nulls.use_long_form_nulls => "null".to_string(),
        other => format!("null.{}", other),
    }
}

/// # Errors
///
/// Returns [`Error::SymbolMismatch`] unless `node` is an `ion-null` node.
pub fn parse_null(node: &SyntaxNode) -> Result<Value> {
    let body = literal_of(node, IonType::Null)?;
    match body {
        None => Ok(Value::null()),
        Some(other) => Err(Error::symbol_mismatch(symbols::NULL_LITERAL, other.symbol())),
    }
}

#[must_use]
pub fn serialize_bool(value: bool, ctx: SerializerContext<'_>) -> String {
    let word = if value { "true" } else { "false" };
    ctx.options().bools.value_case.apply(word)
}

/// Accepts `true`, `TRUE` and `True` (and the same for `false`).
///
/// # Errors
///
/// Returns [`Error::SymbolMismatch`] unless `node` is an `ion-bool` node.
pub fn parse_bool(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Bool)? else {
        return Ok(Value::null_of(IonType::Bool));
    };
    expect(literal, symbols::BOOL_LITERAL)?;
    match literal.text() {
        "true" | "TRUE" | "True" => Ok(Value::from(true)),
        "false" | "FALSE" | "False" => Ok(Value::from(false)),
        other => Err(Error::format(format!("'{}' is not a bool", other))),
    }
}

/// Inserts `_` every `group` digits, counting from the right.
fn group_digits(digits: &str, group: usize) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / group);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % group == 0 {
            out.push('_');
        }
        out.push(ch);
    }
    out
}

/// Bits carried by one digit of a power-of-two radix.
fn bits_per_digit(radix: u32) -> usize {
    if radix == 16 {
        4
    } else {
        1
    }
}

/// `true` when the leading digit has its top bit set, which marks a negative
/// two's-complement number.
fn has_sign_bit(digits: &str, radix: u32) -> bool {
    digits
        .chars()
        .next()
        .and_then(|c| c.to_digit(radix))
        .is_some_and(|digit| digit >= radix / 2)
}

/// Shortest two's-complement digit string for `value` in radix 2 or 16.
fn twos_complement_digits(value: &BigInt, radix: u32) -> String {
    let magnitude = value.magnitude();
    let digits = magnitude.to_str_radix(radix);
    if value.sign() != Sign::Minus {
        return if has_sign_bit(&digits, radix) {
            format!("0{}", digits)
        } else {
            digits
        };
    }
    let mut width = digits.len();
    loop {
        let modulus = BigUint::from(1u32) << (bits_per_digit(radix) * width);
        if magnitude * 2u32 <= modulus {
            return (modulus - magnitude).to_str_radix(radix);
        }
        width += 1;
    }
}

/// Renders an integer in the configured radix.
///
/// Hex and binary forms are two's complement with no sign: a leading digit
/// with its top bit set means the value is negative.
///
/// ```rust
/// use axion::text::scalar::serialize_int;
/// use axion::{NumberFormat, SerializerContext, SerializerOptions};
/// use num_bigint::BigInt;
///
/// let options = SerializerOptions::new().with_digit_separator(true);
/// let ctx = SerializerContext::new(&options);
/// assert_eq!(serialize_int(&BigInt::from(-1234567), ctx), "-1_234_567");
///
/// let options = SerializerOptions::new().with_number_format(NumberFormat::BigHex);
/// let ctx = SerializerContext::new(&options);
/// assert_eq!(serialize_int(&BigInt::from(-31), ctx), "0XE1");
/// assert_eq!(serialize_int(&BigInt::from(255), ctx), "0X0FF");
///
/// let options = SerializerOptions::new().with_number_format(NumberFormat::SmallBinary);
/// assert_eq!(serialize_int(&BigInt::from(5), SerializerContext::new(&options)), "0b0101");
/// ```
#[must_use]
pub fn serialize_int(value: &BigInt, ctx: SerializerContext<'_>) -> String {
    let ints = &ctx.options().ints;
    let (prefix, radix, group) = match ints.number_format {
        NumberFormat::Decimal => ("", 10, 3),
        NumberFormat::BigHex => ("0X", 16, 4),
        NumberFormat::SmallHex => ("0x", 16, 4),
        NumberFormat::BigBinary => ("0B", 2, 4),
        NumberFormat::SmallBinary => ("0b", 2, 4),
    };
    let (sign, mut digits) = if radix == 10 {
        let sign = if value.sign() == Sign::Minus { "-" } else { "" };
        (sign, value.magnitude().to_str_radix(radix))
    } else {
        ("", twos_complement_digits(value, radix))
    };
    if ints.number_format == NumberFormat::BigHex {
        digits = digits.to_uppercase();
    }
    if ints.use_digit_separator {
        digits = group_digits(&digits, group);
    }
    format!("{}{}{}", sign, prefix, digits)
}

/// Decimal ints take their sign from a leading `-`. Hex and binary digits
/// are read as two's complement; a leading `-` on them negates the digits
/// read as a plain magnitude.
///
/// # Errors
///
/// Returns a format error for digit runs that are empty once separators are removed.
pub fn parse_int(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Int)? else {
        return Ok(Value::null_of(IonType::Int));
    };
    expect(literal, symbols::INT_LITERAL)?;
    let digits_node = literal
        .child(0)
        .ok_or_else(|| Error::argument("int-literal node has no digits"))?;
    let text = digits_node.text();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (radix, body) = match digits_node.symbol() {
        symbols::DECIMAL_INT => (10, unsigned),
        symbols::HEX_INT => (16, &unsigned[2..]),
        symbols::BINARY_INT => (2, &unsigned[2..]),
        other => return Err(Error::symbol_mismatch(symbols::DECIMAL_INT, other)),
    };
    let cleaned: String = body.chars().filter(|c| *c != '_').collect();
    let mut parsed = BigInt::parse_bytes(cleaned.as_bytes(), radix)
        .ok_or_else(|| Error::format(format!("'{}' is not a valid int", text)))?;
    if negative {
        parsed = -parsed;
    } else if radix != 10 && has_sign_bit(&cleaned, radix) {
        parsed -= BigInt::from(1) << (bits_per_digit(radix) * cleaned.len());
    }
    Ok(Value::from(parsed))
}

/// Mandatory exponent notation; `nan`, `+inf` and `-inf` for the special values.
///
/// ```rust
/// use axion::text::scalar::serialize_float;
///
/// assert_eq!(serialize_float(1234.5), "1.2345E3");
/// assert_eq!(serialize_float(1.0), "1.0E0");
/// assert_eq!(serialize_float(f64::NEG_INFINITY), "-inf");
/// ```
#[must_use]
pub fn serialize_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+inf" } else { "-inf" }.to_string();
    }
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => formatted,
    }
}

/// # Errors
///
/// Returns a format error for unparseable float text.
pub fn parse_float(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Float)? else {
        return Ok(Value::null_of(IonType::Float));
    };
    expect(literal, symbols::FLOAT_LITERAL)?;
    let value = match literal.text() {
        "nan" => f64::NAN,
        "+inf" => f64::INFINITY,
        "-inf" => f64::NEG_INFINITY,
        text => {
            let cleaned: String = text.chars().filter(|c| *c != '_').collect();
            cleaned
                .parse::<f64>()
                .map_err(|_| Error::format(format!("'{}' is not a valid float", text)))?
        }
    };
    Ok(Value::from(value))
}

#[must_use]
pub fn serialize_decimal(value: &Decimal, ctx: SerializerContext<'_>) -> String {
    if ctx.options().decimals.use_exponent_notation {
        value.to_exponent_string()
    } else {
        value.to_plain_string()
    }
}

/// # Errors
///
/// Returns a format error for unparseable decimal text.
pub fn parse_decimal(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Decimal)? else {
        return Ok(Value::null_of(IonType::Decimal));
    };
    expect(literal, symbols::DECIMAL_LITERAL)?;
    let cleaned: String = literal.text().chars().filter(|c| *c != '_').collect();
    Ok(Value::decimal(cleaned.parse::<Decimal>()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{SerializerOptions, ValueCase};
    use crate::text::{parse, parse_as, serialize};

    fn render(value: &Value, options: &SerializerOptions) -> String {
        serialize(value, options)
    }

    #[test]
    fn test_nulls() {
        let short = SerializerOptions::new();
        let long = SerializerOptions::new().with_long_form_nulls(true);
        assert_eq!(render(&Value::null(), &short), "null");
        assert_eq!(render(&Value::null(), &long), "null.null");
        assert_eq!(render(&Value::null_of(IonType::Bool), &long), "null.bool");
        assert_eq!(parse("null.null").unwrap(), Value::null());
        assert_eq!(parse("null").unwrap(), Value::null());
    }

    #[test]
    fn test_bool_cases() {
        let upper = SerializerOptions::new().with_bool_case(ValueCase::Upper);
        let title = SerializerOptions::new().with_bool_case(ValueCase::Title);
        assert_eq!(render(&Value::from(true), &upper), "TRUE");
        assert_eq!(render(&Value::from(false), &title), "False");
        assert_eq!(parse("True").unwrap(), Value::from(true));
        assert_eq!(parse("FALSE").unwrap(), Value::from(false));
    }

    #[test]
    fn test_big_hex_with_separator() {
        let options = SerializerOptions::new()
            .with_number_format(NumberFormat::BigHex)
            .with_digit_separator(true);
        let text = render(&Value::from(1234567890), &options);
        assert_eq!(text, "0X4996_02D2");
        assert_eq!(parse(&text).unwrap(), Value::from(1234567890));
    }

    #[test]
    fn test_negative_radix_forms() {
        let hex = SerializerOptions::new().with_number_format(NumberFormat::SmallHex);
        let bin = SerializerOptions::new()
            .with_number_format(NumberFormat::BigBinary)
            .with_digit_separator(true);
        assert_eq!(render(&Value::from(-31), &hex), "0xe1");
        assert_eq!(render(&Value::from(-1), &hex), "0xf");
        assert_eq!(render(&Value::from(-8), &hex), "0x8");
        assert_eq!(render(&Value::from(-9), &hex), "0xf7");
        assert_eq!(render(&Value::from(-37), &bin), "0B101_1011");
        assert_eq!(parse("0xe1").unwrap(), Value::from(-31));
        assert_eq!(parse("0xf").unwrap(), Value::from(-1));
        assert_eq!(parse("0B101_1011").unwrap(), Value::from(-37));
    }

    #[test]
    fn test_positive_radix_forms_keep_sign_bit_clear() {
        let hex = SerializerOptions::new().with_number_format(NumberFormat::SmallHex);
        let bin = SerializerOptions::new().with_number_format(NumberFormat::SmallBinary);
        assert_eq!(render(&Value::from(255), &hex), "0x0ff");
        assert_eq!(render(&Value::from(127), &hex), "0x7f");
        assert_eq!(render(&Value::from(0), &hex), "0x0");
        assert_eq!(render(&Value::from(5), &bin), "0b0101");
        assert_eq!(parse("0x0ff").unwrap(), Value::from(255));
        assert_eq!(parse("0x7f").unwrap(), Value::from(127));
        assert_eq!(parse("0b0101").unwrap(), Value::from(5));
    }

    #[test]
    fn test_signed_magnitude_radix_input() {
        assert_eq!(parse("-0x1f").unwrap(), Value::from(-31));
        assert_eq!(parse("-0b101").unwrap(), Value::from(-5));
    }

    #[test]
    fn test_radix_forms_round_trip_at_width_edges() {
        let formats = [NumberFormat::BigHex, NumberFormat::SmallBinary];
        let values = [i64::MIN, i64::MAX, -128, -129, 128, -16, 16, -2, 1];
        for format in formats {
            let options = SerializerOptions::new()
                .with_number_format(format)
                .with_digit_separator(true);
            for n in values {
                let text = render(&Value::from(n), &options);
                assert_eq!(parse(&text).unwrap(), Value::from(n), "{} as {:?}", text, format);
            }
        }
    }

    #[test]
    fn test_arbitrary_precision_ints() {
        let big = BigInt::from(u128::MAX) * BigInt::from(u128::MAX);
        let value = Value::from(big);
        assert_eq!(parse(&value.to_string()).unwrap(), value);
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1234567", 3), "1_234_567");
        assert_eq!(group_digits("123", 3), "123");
        assert_eq!(group_digits("11111", 4), "1_1111");
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(serialize_float(f64::NAN), "nan");
        assert_eq!(serialize_float(f64::INFINITY), "+inf");
        assert_eq!(serialize_float(0.001), "1.0E-3");
        assert!(parse("nan").unwrap().as_f64().unwrap().is_nan());
        assert_eq!(parse("-inf").unwrap(), Value::from(f64::NEG_INFINITY));
        assert_eq!(parse("1.2345E3").unwrap(), Value::from(1234.5));
        assert_eq!(parse("5e0").unwrap(), Value::from(5.0));
    }

    #[test]
    fn test_decimal_forms() {
        let d: Decimal = "123456789.0009".parse().unwrap();
        let exponent = SerializerOptions::new().with_exponent_decimals(true);
        assert_eq!(render(&Value::decimal(d.clone()), &exponent), "1.234567890009D8");
        assert_eq!(parse("1.234567890009D8").unwrap(), Value::decimal(d));
        assert_eq!(parse("54.0").unwrap(), Value::decimal(Decimal::from(54)));
        assert_eq!(parse("-0.5").unwrap().to_string(), "-0.5");
    }

    #[test]
    fn test_typed_nulls_for_numeric_kinds() {
        assert_eq!(parse_as("ion-int", "null.int").unwrap(), Value::null_of(IonType::Int));
        assert_eq!(
            parse_as("ion-decimal", "null.decimal").unwrap(),
            Value::null_of(IonType::Decimal)
        );
    }
}
