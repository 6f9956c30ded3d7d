//! Symbol values and the lexical rules shared by symbols, annotations and
//! struct property names.
//!
//! A [`Symbol`] is one of three sub-kinds that never convert into each other:
//!
//! - **Operator**: a run of operator characters such as `+` or `--`
//! - **Identifier**: a bare word matching `[a-zA-Z_$][a-zA-Z0-9_$]*`
//! - **QuotedSymbol**: arbitrary text rendered inside single quotes
//!
//! ```rust
//! use axion::{Symbol, SymbolKind};
//!
//! let sym = Symbol::parse("'hello world'").unwrap();
//! assert_eq!(sym.kind(), SymbolKind::QuotedSymbol);
//! assert_eq!(sym.text(), "hello world");
//! assert_eq!(sym.to_string(), "'hello world'");
//! ```

use crate::text::escape;
use crate::{Error, Result};
use std::fmt;

/// Characters that may form an operator symbol.
pub const OPERATOR_CHARS: &[char] = &[
    '!', '#', '%', '&', '*', '+', '-', '.', '/', ';', '<', '=', '>', '?', '@', '^', '`', '|', '~',
];

/// Words the identifier pattern matches but that denote other kinds.
const RESERVED_WORDS: &[&str] = &[
    "null", "nan", "true", "false", "TRUE", "FALSE", "True", "False",
];

#[inline]
pub fn is_operator_char(ch: char) -> bool {
    OPERATOR_CHARS.contains(&ch)
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

#[inline]
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

/// Returns `true` if `text` is a non-reserved identifier.
///
/// ```rust
/// use axion::symbol::is_identifier;
///
/// assert!(is_identifier("user_id"));
/// assert!(is_identifier("$ion"));
/// assert!(!is_identifier("2nd"));
/// assert!(!is_identifier("null"));
/// ```
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => {
            chars.all(is_identifier_char) && !is_reserved_word(text)
        }
        _ => false,
    }
}

pub fn is_reserved_word(text: &str) -> bool {
    RESERVED_WORDS.contains(&text)
}

/// Returns `true` if `text` is a non-empty run of operator characters.
pub fn is_operator(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_operator_char)
}

/// The three symbol sub-kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Operator,
    Identifier,
    QuotedSymbol,
}

/// A symbol value: a sub-kind plus its (unescaped) text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    kind: SymbolKind,
    text: String,
}

impl Symbol {
    /// Creates an operator symbol.
    ///
    /// # Errors
    ///
    /// Returns a format error unless `text` is a non-empty run of operator characters.
    pub fn operator(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if !is_operator(&text) {
            return Err(Error::format(format!("'{}' is not an operator symbol", text)));
        }
        Ok(Symbol {
            kind: SymbolKind::Operator,
            text,
        })
    }

    /// Creates an identifier symbol.
    ///
    /// # Errors
    ///
    /// Returns a format error if `text` does not match the identifier pattern or
    /// is a reserved word such as `null` or `true`.
    pub fn identifier(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if !is_identifier(&text) {
            return Err(Error::format(format!("'{}' is not an identifier", text)));
        }
        Ok(Symbol {
            kind: SymbolKind::Identifier,
            text,
        })
    }

    /// Creates a quoted symbol. Any text is valid.
    pub fn quoted(text: impl Into<String>) -> Self {
        Symbol {
            kind: SymbolKind::QuotedSymbol,
            text: text.into(),
        }
    }

    /// Picks the identifier form when `text` allows it and the quoted form otherwise.
    ///
    /// ```rust
    /// use axion::{Symbol, SymbolKind};
    ///
    /// assert_eq!(Symbol::from_name("name").kind(), SymbolKind::Identifier);
    /// assert_eq!(Symbol::from_name("first name").kind(), SymbolKind::QuotedSymbol);
    /// ```
    pub fn from_name(text: impl Into<String>) -> Self {
        let text = text.into();
        if is_identifier(&text) {
            Symbol {
                kind: SymbolKind::Identifier,
                text,
            }
        } else {
            Symbol::quoted(text)
        }
    }

    /// Parses a symbol lexeme: an operator run, then a quoted form, then an identifier.
    ///
    /// # Errors
    ///
    /// Returns a format error if none of the three forms match.
    pub fn parse(lexeme: &str) -> Result<Self> {
        if is_operator(lexeme) {
            return Symbol::operator(lexeme);
        }
        if lexeme.len() >= 2 && lexeme.starts_with('\'') && lexeme.ends_with('\'') {
            let inner = &lexeme[1..lexeme.len() - 1];
            return Ok(Symbol::quoted(escape::unescape(inner)?));
        }
        if is_identifier(lexeme) {
            return Symbol::identifier(lexeme);
        }
        Err(Error::format(format!("'{}' is not a valid symbol", lexeme)))
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Renders the symbol the way it appears in text, quoting when quoted.
    #[must_use]
    pub fn to_lexeme(&self) -> String {
        match self.kind {
            SymbolKind::QuotedSymbol => escape::quote_symbol(&self.text),
            SymbolKind::Operator | SymbolKind::Identifier => self.text.clone(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lexeme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_disambiguates_lexical_forms() {
        assert_eq!(Symbol::parse("--").unwrap().kind(), SymbolKind::Operator);
        assert_eq!(Symbol::parse("abc").unwrap().kind(), SymbolKind::Identifier);
        let quoted = Symbol::parse("'it\\'s'").unwrap();
        assert_eq!(quoted.kind(), SymbolKind::QuotedSymbol);
        assert_eq!(quoted.text(), "it's");
        assert!(Symbol::parse("1abc").is_err());
        assert!(Symbol::parse("").is_err());
    }

    #[test]
    fn test_identifier_rejects_reserved_words() {
        assert!(Symbol::identifier("null").is_err());
        assert!(Symbol::identifier("TRUE").is_err());
        assert!(Symbol::identifier("nullable").is_ok());
        assert_eq!(Symbol::from_name("true").kind(), SymbolKind::QuotedSymbol);
    }

    #[test]
    fn test_operator_validation() {
        assert!(Symbol::operator("+").is_ok());
        assert!(Symbol::operator("<=>").is_ok());
        assert!(Symbol::operator("+a").is_err());
        assert!(Symbol::operator("").is_err());
    }

    #[test]
    fn test_kinds_do_not_interconvert() {
        let ident = Symbol::identifier("abc").unwrap();
        let quoted = Symbol::quoted("abc");
        assert_ne!(ident, quoted);
        assert_eq!(ident.to_string(), "abc");
        assert_eq!(quoted.to_string(), "'abc'");
    }
}
