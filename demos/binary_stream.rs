//! Writing several values into one binary stream that shares a symbol table.
//!
//! Run with: cargo run --example binary_stream

use axion::binary::{read_stream, write_value};
use axion::{from_bytes, ion, to_bytes, to_string, SymbolHashList, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let events: Vec<Value> = (0..5)
        .map(|i| {
            ion!({
                "event": "login",
                "user": (format!("user{}", i % 2)),
                "attempt": i
            })
        })
        .collect();

    // One value, one table
    let single = to_bytes(&events[0])?;
    println!("Single event: {} bytes", single.len());
    assert_eq!(from_bytes(&single)?, events[0]);

    // Many values, one table: repeated names become back-references
    let mut table = SymbolHashList::new();
    let mut stream = Vec::new();
    for event in &events {
        let before = stream.len();
        write_value(event, &mut stream, &mut table)?;
        println!("Wrote {} bytes, table now holds {} symbols", stream.len() - before, table.len());
    }

    let text_len: usize = events.iter().map(|e| to_string(e).len()).sum();
    println!("\nBinary stream: {} bytes, text: {} bytes", stream.len(), text_len);

    let decoded = read_stream(&mut &stream[..], &mut SymbolHashList::new())?;
    assert_eq!(decoded, events);
    println!("✓ Decoded {} events", decoded.len());

    Ok(())
}
