//! Error types for Axion text parsing and binary decoding.
//!
//! Every parse-facing entry point in this crate returns [`Result`], so a
//! malformed document surfaces as a value rather than a panic.
//!
//! ## Error Categories
//!
//! - **Argument errors**: a grammar node with the wrong symbol name was handed
//!   to a kind-specific parser, or an input was unusable
//! - **Format errors**: lexically invalid annotation, symbol, number or
//!   timestamp text
//! - **Invariant errors**: structurally impossible requests, such as an
//!   operator symbol used as a struct property name or a dangling symbol
//!   back-reference in a binary stream
//! - **Syntax errors**: the grammar recognizer could not match the input,
//!   reported with line/column information
//!
//! ## Examples
//!
//! ```rust
//! use axion::{from_str, Error};
//!
//! let result = from_str("[1, 2");
//! assert!(matches!(result, Err(Error::Syntax { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while encoding or decoding Axion data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing a binary stream
    #[error("IO error: {0}")]
    Io(String),

    /// The recognizer could not match the text
    #[error("Syntax error at line {line}, column {col}: {msg}\n{context}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
    },

    /// A grammar node carried an unexpected symbol name
    #[error("Expected grammar symbol '{expected}', found '{found}'")]
    SymbolMismatch { expected: String, found: String },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Lexically invalid text for the requested kind
    #[error("Invalid format: {0}")]
    Format(String),

    /// Structural invariant violated
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Binary input ended before a complete value was read
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line, column and the offending source line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use axion::Error;
    ///
    /// let err = Error::syntax(3, 7, "unterminated list", "[1, 2");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str, context: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates an error for a grammar node whose symbol name is not the expected one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use axion::Error;
    ///
    /// let err = Error::symbol_mismatch("ion-int", "ion-string");
    /// assert!(err.to_string().contains("ion-int"));
    /// ```
    pub fn symbol_mismatch(expected: &str, found: &str) -> Self {
        Error::SymbolMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn argument<T: fmt::Display>(msg: T) -> Self {
        Error::Argument(msg.to_string())
    }

    /// Creates a format error for lexically invalid text.
    pub fn format<T: fmt::Display>(msg: T) -> Self {
        Error::Format(msg.to_string())
    }

    pub fn invariant<T: fmt::Display>(msg: T) -> Self {
        Error::Invariant(msg.to_string())
    }

    /// Creates an unexpected end-of-input error for truncated binary data.
    pub fn unexpected_eof(expected: &str) -> Self {
        Error::UnexpectedEof {
            expected: expected.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use axion::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::unexpected_eof("more bytes"),
            _ => Error::io(&err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_eof_maps_to_unexpected_eof() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, Error::UnexpectedEof { .. }));

        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert_eq!(err, Error::Io("boom".to_string()));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::format("bad digits").to_string(),
            "Invalid format: bad digits"
        );
        assert!(Error::invariant("operator name")
            .to_string()
            .starts_with("Invariant violated"));
    }
}
