//! Parsing and rendering every kind of value as text.
//!
//! Run with: cargo run --example text_roundtrip

use axion::{from_str, text, to_string, to_string_pretty, IonType};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let source = r#"
        inventory::{
            updated: 2023-08-19T14:05:00.125+02:00,
            items: [
                { sku: 'A-1', count: 12, price: 4.50, weight: 1.25E0 },
                { sku: 'B-2', count: 0x10, price: null.decimal, weight: nan }
            ],
            query: (and (> count 3) (= tag warehouse::north)),
            thumbnail: {{aGVsbG8=}},
            raw: {{"bytes\x00"}},
            note: '''first line, '''
                  '''second line'''
        }
    "#;

    let value = from_str(source)?;
    println!("Compact:\n{}\n", to_string(&value));
    println!("Pretty:\n{}\n", to_string_pretty(&value));

    let fields = value.as_struct().ok_or("expected a struct")?;
    for property in fields.sorted() {
        println!("{:>10} -> {}", property.name().text(), property.value().ion_type());
    }

    // Round trip through the compact form
    assert_eq!(from_str(&to_string(&value))?, value);
    println!("\n✓ Round-trip successful");

    // A top-level kind can be enforced while parsing
    let list = text::parse_as("ion-list", "[1, 2, 3]")?;
    assert_eq!(list.ion_type(), IonType::List);
    match text::parse_as("ion-list", "{ a: 1 }") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Rejected as expected: {}", e),
    }

    // Syntax errors point at the offending line and column
    if let Err(e) = from_str("[1,\n  2 3]") {
        println!("{}", e);
    }

    Ok(())
}
