//! Label symbol table.
//!
//! Insertion-ordered, linear scan — a source file's label count is small
//! enough that a `HashMap` buys nothing but has to prove itself against a
//! `Vec` of a few dozen entries.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub address: Option<u64>,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines (or redefines) `name` at `address`.
    pub fn define(&mut self, name: &str, address: u64) {
        match self.entries.iter_mut().find(|s| s.name == name) {
            Some(sym) => sym.address = Some(address),
            None => self.entries.push(Symbol { name: name.to_string(), address: Some(address) }),
        }
    }

    /// Ensures an entry for `name` exists, creating an unresolved
    /// placeholder (`address: None`) on first forward reference.
    pub fn get_or_create(&mut self, name: &str) {
        if !self.entries.iter().any(|s| s.name == name) {
            self.entries.push(Symbol { name: name.to_string(), address: None });
        }
    }

    pub fn address_of(&self, name: &str) -> Option<u64> {
        self.entries.iter().find(|s| s.name == name).and_then(|s| s.address)
    }

    /// Shifts every symbol whose address is at or beyond `threshold` down
    /// by `delta` bytes. Used by `finalize_first_pass`'s branch tightening.
    pub fn shift_from(&mut self, threshold: u64, delta: u64) {
        for sym in self.entries.iter_mut() {
            if let Some(addr) = sym.address {
                if addr >= threshold {
                    sym.address = Some(addr - delta);
                }
            }
        }
    }
}
