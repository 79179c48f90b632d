//! Compile-time symbol table: variable names to storage slots and name-table
//! indices.

use ahash::AHashMap;

/// Storage class of a symbol. Each class has its own slot counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Local,
}

/// A resolved variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    /// Slot within the symbol's scope class.
    pub slot: usize,
    /// Index into the name table; unique across all symbols.
    pub name_index: usize,
    pub scope: Scope,
}

/// Counter state captured by [`SymbolTable::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolCheckpoint {
    names: usize,
    globals: usize,
    locals: usize,
}

/// Maps names to symbols and owns the name table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Every symbol ever added, indexed by `name_index`.
    symbols: Vec<Symbol>,
    /// Live symbol for each name (index into `symbols`).
    table: AHashMap<String, usize>,
    /// Name table: `names[name_index]` is the symbol's name.
    names: Vec<String>,
    globals_count: usize,
    locals_count: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new symbol for `name` in `scope`.
    ///
    /// Always allocates: adding an existing name shadows the old symbol with a
    /// new slot and name index. Callers that want reuse must `resolve` first.
    pub fn add_symbol(&mut self, name: &str, scope: Scope) -> &Symbol {
        let slot = match scope {
            Scope::Global => {
                self.globals_count += 1;
                self.globals_count - 1
            }
            Scope::Local => {
                self.locals_count += 1;
                self.locals_count - 1
            }
        };
        let name_index = self.names.len();
        self.names.push(name.to_string());
        self.symbols.push(Symbol {
            name: name.to_string(),
            slot,
            name_index,
            scope,
        });
        self.table.insert(name.to_string(), name_index);
        log::trace!("symbol '{}' -> {:?} slot {}, name {}", name, scope, slot, name_index);
        &self.symbols[name_index]
    }

    /// Look up the live symbol for `name`.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.table.get(name).map(|&idx| &self.symbols[idx])
    }

    /// The name table, indexed by `name_index`.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, name_index: usize) -> Option<&str> {
        self.names.get(name_index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn checkpoint(&self) -> SymbolCheckpoint {
        SymbolCheckpoint {
            names: self.names.len(),
            globals: self.globals_count,
            locals: self.locals_count,
        }
    }

    /// Drop every symbol added after `checkpoint`, restoring any symbol it
    /// shadowed.
    pub fn rollback(&mut self, checkpoint: SymbolCheckpoint) {
        while self.symbols.len() > checkpoint.names {
            let Some(dropped) = self.symbols.pop() else {
                break;
            };
            self.names.pop();
            self.table.remove(&dropped.name);
            if let Some(prev) = self.symbols.iter().rposition(|s| s.name == dropped.name) {
                self.table.insert(dropped.name, prev);
            }
        }
        self.globals_count = checkpoint.globals;
        self.locals_count = checkpoint.locals;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_and_resolve() {
        let mut table = SymbolTable::new();
        let a = table.add_symbol("a", Scope::Global).clone();
        assert_eq!(a.slot, 0);
        assert_eq!(a.name_index, 0);
        assert_eq!(table.resolve("a"), Some(&a));
        assert_eq!(table.resolve("b"), None);
    }

    #[test]
    fn test_resolve_is_stable() {
        let mut table = SymbolTable::new();
        table.add_symbol("a", Scope::Global);
        table.add_symbol("b", Scope::Global);
        let first = table.resolve("b").cloned();
        let second = table.resolve("b").cloned();
        assert_eq!(first, second);
        assert_eq!(first.map(|s| (s.slot, s.name_index)), Some((1, 1)));
    }

    #[test]
    fn test_independent_slot_counters_shared_name_counter() {
        let mut table = SymbolTable::new();
        let g0 = table.add_symbol("g0", Scope::Global).clone();
        let l0 = table.add_symbol("l0", Scope::Local).clone();
        let g1 = table.add_symbol("g1", Scope::Global).clone();
        assert_eq!((g0.slot, g0.name_index), (0, 0));
        assert_eq!((l0.slot, l0.name_index), (0, 1));
        assert_eq!((g1.slot, g1.name_index), (1, 2));
        assert_eq!(table.names(), &["g0", "l0", "g1"]);
    }

    #[test]
    fn test_add_twice_shadows() {
        let mut table = SymbolTable::new();
        let first = table.add_symbol("x", Scope::Global).clone();
        let second = table.add_symbol("x", Scope::Global).clone();
        assert_ne!(first.slot, second.slot);
        assert_ne!(first.name_index, second.name_index);
        assert_eq!(table.resolve("x"), Some(&second));
        assert_eq!(table.name(first.name_index), Some("x"));
    }

    #[test]
    fn test_rollback_restores_shadowed_symbol() {
        let mut table = SymbolTable::new();
        let x = table.add_symbol("x", Scope::Global).clone();
        let checkpoint = table.checkpoint();
        table.add_symbol("y", Scope::Global);
        table.add_symbol("x", Scope::Global);

        table.rollback(checkpoint);
        assert_eq!(table.resolve("x"), Some(&x));
        assert_eq!(table.resolve("y"), None);
        assert_eq!(table.names(), &["x"]);
        assert_eq!(table.add_symbol("z", Scope::Global).slot, 1);
    }
}
