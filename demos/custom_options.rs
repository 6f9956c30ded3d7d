//! Customizing text output with SerializerOptions.
//!
//! Run with: cargo run --example custom_options

use axion::{
    ion, to_string, to_string_with_options, IndentationStyle, LineStyle, NumberFormat,
    SerializerOptions, Timestamp, TimestampPrecision, Value, ValueCase,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let value = ion!({
        "id": 1234567890,
        "enabled": true,
        "ratio": 0.125,
        "message": "a string long enough to be split into several segments",
        "tags": ["x", "y"]
    });

    println!("Default:\n{}\n", to_string(&value));

    println!("Hex with digit separators:");
    let hex = SerializerOptions::new()
        .with_number_format(NumberFormat::BigHex)
        .with_digit_separator(true);
    println!("{}\n", to_string_with_options(&value, &hex));

    println!("Pretty, tabs, upper-case bools and multi-line strings:");
    let pretty = SerializerOptions::pretty()
        .with_indentation_style(IndentationStyle::Tabs)
        .with_bool_case(ValueCase::Upper)
        .with_string_line_style(LineStyle::Multiline, 20);
    println!("{}\n", to_string_with_options(&value, &pretty));

    println!("Timestamp precisions:");
    let ts = Value::timestamp(Timestamp::from_fields(2023, 8, 19, 14, 5, 30, 125_000_000, 7200)?);
    for precision in [
        TimestampPrecision::Year,
        TimestampPrecision::Day,
        TimestampPrecision::Minute,
        TimestampPrecision::Millisecond,
    ] {
        let options = SerializerOptions::new().with_timestamp_precision(precision);
        println!("{:>12}: {}", format!("{:?}", precision), to_string_with_options(&ts, &options));
    }

    // Options deserialize from partial documents; missing fields keep defaults
    println!("\nOptions loaded from JSON:");
    let json = r#"{
        "ints": { "number_format": "SmallBinary" },
        "structs": { "use_multiple_lines": true, "use_quoted_identifier_property_names": true },
        "nulls": { "use_long_form_nulls": true }
    }"#;
    let loaded: SerializerOptions = serde_json::from_str(json)?;
    let small = ion!({ "bits": 10, "missing": null });
    println!("{}", to_string_with_options(&small, &loaded));

    Ok(())
}
