//! Escape and unescape helpers for quoted text: strings, quoted symbols and clobs.

use crate::{Error, Result};

fn push_escaped(out: &mut String, ch: char, quote: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
        c => out.push(c),
    }
}

/// Wraps `s` in double quotes, escaping as needed.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        push_escaped(&mut out, ch, '"');
    }
    out.push('"');
    out
}

/// Wraps `s` in single quotes, escaping as needed.
pub fn quote_symbol(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        push_escaped(&mut out, ch, '\'');
    }
    out.push('\'');
    out
}

/// Wraps `s` in a `'''` segment. Every `'` is escaped so no run of quotes can
/// close the segment early.
pub fn long_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 6);
    out.push_str("'''");
    for ch in s.chars() {
        push_escaped(&mut out, ch, '\'');
    }
    out.push_str("'''");
    out
}

fn push_clob_byte(out: &mut String, byte: u8, quote: char) {
    match byte {
        b'\\' => out.push_str("\\\\"),
        b'\n' => out.push_str("\\n"),
        b'\r' => out.push_str("\\r"),
        b'\t' => out.push_str("\\t"),
        b'\0' => out.push_str("\\0"),
        b if b as char == quote => {
            out.push('\\');
            out.push(quote);
        }
        0x20..=0x7E => out.push(byte as char),
        b => out.push_str(&format!("\\x{:02x}", b)),
    }
}

/// Renders clob bytes as a double-quoted ASCII string.
pub fn quote_clob(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for &byte in bytes {
        push_clob_byte(&mut out, byte, '"');
    }
    out.push('"');
    out
}

/// Renders clob bytes as a `'''` segment.
pub fn long_clob_segment(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 6);
    out.push_str("'''");
    for &byte in bytes {
        push_clob_byte(&mut out, byte, '\'');
    }
    out.push_str("'''");
    out
}

enum Escaped {
    Char(char),
    Continuation,
}

fn read_hex<I: Iterator<Item = char>>(chars: &mut I, digits: usize) -> Result<u32> {
    let mut hex = String::with_capacity(digits);
    for _ in 0..digits {
        match chars.next() {
            Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
            _ => {
                return Err(Error::format(format!(
                    "expected {} hex digits in escape sequence",
                    digits
                )))
            }
        }
    }
    u32::from_str_radix(&hex, 16).map_err(|_| Error::format("invalid hex escape"))
}

fn read_escape<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> Result<Escaped> {
    let code = match chars.next() {
        Some('a') => 0x07,
        Some('b') => 0x08,
        Some('t') => 0x09,
        Some('n') => 0x0A,
        Some('v') => 0x0B,
        Some('f') => 0x0C,
        Some('r') => 0x0D,
        Some('0') => 0x00,
        Some(c @ ('?' | '/' | '\'' | '"' | '\\')) => c as u32,
        Some('x') => read_hex(chars, 2)?,
        Some('u') => read_hex(chars, 4)?,
        Some('U') => read_hex(chars, 8)?,
        Some('\n') => return Ok(Escaped::Continuation),
        Some('\r') => {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            return Ok(Escaped::Continuation);
        }
        Some(other) => {
            return Err(Error::format(format!("unknown escape sequence '\\{}'", other)))
        }
        None => return Err(Error::format("dangling escape at end of text")),
    };
    char::from_u32(code)
        .map(Escaped::Char)
        .ok_or_else(|| Error::format(format!("invalid code point U+{:X}", code)))
}

/// Resolves escape sequences in the body of a quoted string or symbol.
pub fn unescape(inner: &str) -> Result<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Escaped::Char(c) = read_escape(&mut chars)? {
                out.push(c);
            }
        } else {
            out.push(ch);
        }
    }
    Ok(out)
}

/// Resolves escape sequences in the body of a clob segment into raw bytes.
///
/// Clob text is restricted to ASCII; `\xHH` escapes supply any other byte.
pub fn unescape_clob(inner: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        let c = if ch == '\\' {
            match read_escape(&mut chars)? {
                Escaped::Char(c) => c,
                Escaped::Continuation => continue,
            }
        } else if ch.is_ascii() {
            ch
        } else {
            return Err(Error::format(format!(
                "clob text must be ASCII, found '{}'",
                ch
            )));
        };
        let code = c as u32;
        if code > 0xFF {
            return Err(Error::format(format!(
                "clob escape U+{:X} does not fit in a byte",
                code
            )));
        }
        out.push(code as u8);
    }
    Ok(out)
}
