//! Value annotations: ordered `name::` prefixes attached to any value.
//!
//! An [`Annotation`] is an identifier or quoted symbol. [`Annotations`] keeps
//! them in insertion order and allows duplicates; order is significant for
//! equality.
//!
//! ```rust
//! use axion::Annotations;
//!
//! let ab = Annotations::parse_collection("a::b::").unwrap();
//! let ba = Annotations::parse_collection("b::a::").unwrap();
//! assert_ne!(ab, ba);
//! assert_eq!(ab.to_string(), "a::b::");
//! ```

use crate::symbol::{Symbol, SymbolKind};
use crate::{Error, Result};
use std::fmt;

/// A single annotation: an identifier or quoted symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Annotation(Symbol);

impl Annotation {
    /// Parses annotation text, tolerating a trailing `::`.
    ///
    /// # Errors
    ///
    /// Returns a format error unless the text is an identifier or a quoted symbol.
    ///
    /// ```rust
    /// use axion::Annotation;
    ///
    /// assert_eq!(Annotation::parse("units::").unwrap().to_string(), "units");
    /// assert_eq!(Annotation::parse("'a b'").unwrap().text(), "a b");
    /// assert!(Annotation::parse("9lives").is_err());
    /// assert!(Annotation::parse("+").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let lexeme = trimmed.strip_suffix("::").unwrap_or(trimmed);
        match Symbol::parse(lexeme) {
            Ok(symbol) if symbol.kind() != SymbolKind::Operator => Ok(Annotation(symbol)),
            _ => Err(Error::format(format!(
                "'{}' is not a valid annotation",
                lexeme
            ))),
        }
    }

    /// Wraps a symbol as an annotation.
    ///
    /// # Errors
    ///
    /// Operator symbols cannot annotate values.
    pub fn from_symbol(symbol: Symbol) -> Result<Self> {
        if symbol.kind() == SymbolKind::Operator {
            return Err(Error::invariant(format!(
                "operator '{}' cannot be used as an annotation",
                symbol.text()
            )));
        }
        Ok(Annotation(symbol))
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.0.text()
    }

    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.0
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for Annotation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Annotation::parse(s)
    }
}

/// An ordered annotation list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    #[must_use]
    pub fn new() -> Self {
        Annotations(Vec::new())
    }

    /// Splits `a::b::` style text on `::`, dropping empty segments, and parses each.
    ///
    /// # Errors
    ///
    /// Fails on the first segment that is not a valid annotation.
    pub fn parse_collection(text: &str) -> Result<Self> {
        text.split("::")
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(Annotation::parse)
            .collect::<Result<Vec<_>>>()
            .map(Annotations)
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Annotation] {
        &self.0
    }
}

impl fmt::Display for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in &self.0 {
            write!(f, "{}::", annotation)?;
        }
        Ok(())
    }
}

impl From<Vec<Annotation>> for Annotations {
    fn from(annotations: Vec<Annotation>) -> Self {
        Annotations(annotations)
    }
}

impl From<Annotation> for Annotations {
    fn from(annotation: Annotation) -> Self {
        Annotations(vec![annotation])
    }
}

impl FromIterator<Annotation> for Annotations {
    fn from_iter<T: IntoIterator<Item = Annotation>>(iter: T) -> Self {
        Annotations(iter.into_iter().collect())
    }
}

impl IntoIterator for Annotations {
    type Item = Annotation;
    type IntoIter = std::vec::IntoIter<Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Annotations {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collection_preserves_order_and_duplicates() {
        let annotations = Annotations::parse_collection("a::'b c'::a::").unwrap();
        let texts: Vec<_> = annotations.iter().map(Annotation::text).collect();
        assert_eq!(texts, vec!["a", "b c", "a"]);
        assert_eq!(annotations.to_string(), "a::'b c'::a::");
    }

    #[test]
    fn test_parse_collection_rejects_invalid_segment() {
        assert!(Annotations::parse_collection("ok::1bad::").is_err());
        assert!(Annotations::parse_collection("").unwrap().is_empty());
    }

    #[test]
    fn test_from_symbol_rejects_operator() {
        let op = Symbol::operator("+").unwrap();
        assert!(matches!(
            Annotation::from_symbol(op),
            Err(Error::Invariant(_))
        ));
    }
}
