//! Variable bindings shared between the evaluator and plot views.
//!
//! A [`SymbolTable`] is an immutable snapshot: a successful evaluation that
//! binds a variable produces a *new* table via [`SymbolTable::with_binding`],
//! and the application publishes the new snapshot to every open plot view.
//! Nothing ever mutates a published table in place.

use std::collections::HashMap;
use std::f64::consts;

/// An immutable snapshot of variable bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    bindings: HashMap<String, f64>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table seeded with the standard mathematical constants.
    pub fn standard() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert("pi".to_string(), consts::PI);
        bindings.insert("tau".to_string(), consts::TAU);
        bindings.insert("e".to_string(), consts::E);
        Self { bindings }
    }

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.bindings.get(name).copied()
    }

    /// Check whether a name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Build the next snapshot with one additional (or replaced) binding.
    ///
    /// The receiver is left untouched; views holding it keep seeing the
    /// values they were published.
    pub fn with_binding(&self, name: impl Into<String>, value: f64) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.insert(name.into(), value);
        Self { bindings }
    }

    /// Number of bindings in this snapshot.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check whether the table has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.bindings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_constants() {
        let table = SymbolTable::standard();
        assert_eq!(table.get("pi"), Some(consts::PI));
        assert_eq!(table.get("tau"), Some(consts::TAU));
        assert_eq!(table.get("e"), Some(consts::E));
        assert_eq!(table.get("x"), None);
    }

    #[test]
    fn with_binding_leaves_snapshot_untouched() {
        let old = SymbolTable::standard();
        let new = old.with_binding("a", 3.0);

        assert_eq!(old.get("a"), None);
        assert_eq!(new.get("a"), Some(3.0));
        assert_eq!(new.len(), old.len() + 1);
    }

    #[test]
    fn with_binding_replaces_existing_name() {
        let table = SymbolTable::new().with_binding("a", 1.0);
        let updated = table.with_binding("a", 2.0);
        assert_eq!(updated.get("a"), Some(2.0));
        assert_eq!(updated.len(), 1);
    }
}
