use axion::{
    ion, to_string_with_options, IndentationStyle, LineStyle, NumberFormat, SerializerOptions,
    TimestampPrecision, Value, ValueCase,
};

#[test]
fn test_defaults() {
    let options = SerializerOptions::default();
    assert_eq!(options.bools.value_case, ValueCase::Lower);
    assert_eq!(options.ints.number_format, NumberFormat::Decimal);
    assert!(!options.ints.use_digit_separator);
    assert!(!options.decimals.use_exponent_notation);
    assert_eq!(options.strings.line_style, LineStyle::Singleline);
    assert_eq!(options.strings.line_break_point, 80);
    assert_eq!(options.clobs.line_break_point, 80);
    assert!(!options.lists.use_multiple_lines);
    assert!(!options.structs.use_quoted_identifier_property_names);
    assert!(!options.nulls.use_long_form_nulls);
    assert_eq!(options.timestamps.timestamp_precision, TimestampPrecision::Millisecond);
    assert_eq!(options.indentation_style, IndentationStyle::Spaces);
}

#[test]
fn test_partial_json_fills_defaults() {
    let json = r#"{
        "ints": { "number_format": "SmallHex" },
        "bools": { "value_case": "Upper" },
        "strings": { "line_style": "Multiline" }
    }"#;
    let options: SerializerOptions = serde_json::from_str(json).unwrap();
    assert_eq!(options.ints.number_format, NumberFormat::SmallHex);
    assert!(!options.ints.use_digit_separator);
    assert_eq!(options.strings.line_break_point, 80);
    assert_eq!(options.indentation_style, IndentationStyle::Spaces);

    let value = ion!([255, true]);
    assert_eq!(to_string_with_options(&value, &options), "[0x0ff, TRUE]");
}

#[test]
fn test_empty_json_is_default() {
    let options: SerializerOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, SerializerOptions::default());
}

#[test]
fn test_json_round_trip() {
    let options = SerializerOptions::pretty()
        .with_indentation_style(IndentationStyle::Tabs)
        .with_timestamp_precision(TimestampPrecision::Day)
        .with_clob_line_style(LineStyle::Multiline, 16);
    let json = serde_json::to_string(&options).unwrap();
    let loaded: SerializerOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, options);
}

#[test]
fn test_unknown_variant_is_rejected() {
    let json = r#"{ "ints": { "number_format": "Octal" } }"#;
    assert!(serde_json::from_str::<SerializerOptions>(json).is_err());
}

#[test]
fn test_builders_compose() {
    let options = SerializerOptions::new()
        .with_multiple_lines(true)
        .with_quoted_property_names(true)
        .with_long_form_nulls(true)
        .with_indentation_style(IndentationStyle::None);
    let value = ion!({ "a": null, "b": [] });
    assert_eq!(
        to_string_with_options(&value, &options),
        "{\n'a':null.null,\n'b':[]\n}"
    );
}

#[test]
fn test_bool_cases() {
    for (case, expected) in [
        (ValueCase::Lower, "false"),
        (ValueCase::Upper, "FALSE"),
        (ValueCase::Title, "False"),
    ] {
        let options = SerializerOptions::new().with_bool_case(case);
        assert_eq!(to_string_with_options(&Value::from(false), &options), expected);
    }
}
