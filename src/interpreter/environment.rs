//! The interpreter's single flat namespace.

use ahash::AHashMap;

use crate::interpreter::value::Value;

/// Variable bindings for one evaluation session. There is no scope chain:
/// every name lives in the same global namespace.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: AHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, overwriting any previous binding.
    pub fn define(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted variable names (for shell introspection).
    pub fn var_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
