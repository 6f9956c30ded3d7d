//! Struct payloads.
//!
//! [`IonStruct`] wraps an [`IndexMap`] keyed by property-name text. Inserting
//! a name twice replaces the earlier property, and [`IonStruct::sorted`]
//! yields properties in ordinal name order, which is the order every text
//! rendering uses.
//!
//! ```rust
//! use axion::{IonStruct, Property, Symbol, Value};
//!
//! let mut s = IonStruct::new();
//! s.insert(Property::named("zeta", Value::from(1)));
//! s.insert(Property::named("alpha", Value::from(2)));
//!
//! let names: Vec<_> = s.sorted().iter().map(|p| p.name().text().to_string()).collect();
//! assert_eq!(names, vec!["alpha", "zeta"]);
//!
//! // Operator symbols cannot name a property
//! assert!(Property::new(Symbol::operator("+").unwrap(), Value::from(1)).is_err());
//! ```

use crate::symbol::{Symbol, SymbolKind};
use crate::{Error, Result, Value};
use indexmap::IndexMap;
use std::hash::{Hash, Hasher};

/// A `(name, value)` pair whose name is an identifier or quoted symbol.
#[derive(Clone, Debug)]
pub struct Property {
    name: Symbol,
    value: Value,
}

impl Property {
    /// Creates a property.
    ///
    /// # Errors
    ///
    /// Returns an invariant error if `name` is an operator symbol.
    pub fn new(name: Symbol, value: Value) -> Result<Self> {
        if name.kind() == SymbolKind::Operator {
            return Err(Error::invariant(format!(
                "operator '{}' cannot name a struct property",
                name.text()
            )));
        }
        Ok(Property { name, value })
    }

    /// Creates a property from plain text, quoting the name when it is not an identifier.
    pub fn named(name: impl Into<String>, value: Value) -> Self {
        Property {
            name: Symbol::from_name(name),
            value,
        }
    }

    #[must_use]
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Names compare by text: `abc` and `'abc'` name the same property.
impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.name.text() == other.name.text() && self.value == other.value
    }
}

impl Eq for Property {}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.text().hash(state);
        self.value.hash(state);
    }
}

#[derive(Clone, Debug, Default)]
pub struct IonStruct(IndexMap<String, Property>);

impl IonStruct {
    #[must_use]
    pub fn new() -> Self {
        IonStruct(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        IonStruct(IndexMap::with_capacity(capacity))
    }

    /// Inserts a property, returning the one it replaced.
    pub fn insert(&mut self, property: Property) -> Option<Property> {
        self.0.insert(property.name.text().to_string(), property)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).map(Property::value)
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Property> {
        self.0.shift_remove(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, Property> {
        self.0.values()
    }

    /// Properties in ordinal name order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Property> {
        let mut properties: Vec<&Property> = self.0.values().collect();
        properties.sort_by(|a, b| a.name.text().cmp(b.name.text()));
        properties
    }
}

impl PartialEq for IonStruct {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .all(|(name, property)| other.0.get(name) == Some(property))
    }
}

impl Eq for IonStruct {}

impl Hash for IonStruct {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for property in self.sorted() {
            property.hash(state);
        }
    }
}

impl FromIterator<Property> for IonStruct {
    fn from_iter<T: IntoIterator<Item = Property>>(iter: T) -> Self {
        let mut s = IonStruct::new();
        for property in iter {
            s.insert(property);
        }
        s
    }
}

impl IntoIterator for IonStruct {
    type Item = Property;
    type IntoIter = indexmap::map::IntoValues<String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut s = IonStruct::new();
        assert!(s.insert(Property::named("a", Value::from(1))).is_none());
        let replaced = s.insert(Property::named("a", Value::from(2)));
        assert_eq!(replaced.map(Property::into_value), Some(Value::from(1)));
        assert_eq!(s.len(), 1);
        assert_eq!(s.get("a"), Some(&Value::from(2)));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a: IonStruct = vec![
            Property::named("x", Value::from(1)),
            Property::named("y", Value::from(2)),
        ]
        .into_iter()
        .collect();
        let b: IonStruct = vec![
            Property::named("y", Value::from(2)),
            Property::named("x", Value::from(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identifier_and_quoted_names_match() {
        let ident = Property::new(Symbol::identifier("abc").unwrap(), Value::from(1)).unwrap();
        let quoted = Property::new(Symbol::quoted("abc"), Value::from(1)).unwrap();
        assert_eq!(ident, quoted);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut s: IonStruct = ["c", "a", "b"]
            .iter()
            .map(|n| Property::named(*n, Value::null()))
            .collect();
        s.remove("a");
        let names: Vec<_> = s.iter().map(|p| p.name().text()).collect();
        assert_eq!(names, vec!["c", "b"]);
    }
}
