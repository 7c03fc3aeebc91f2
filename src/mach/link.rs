use super::{Address, Cell};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// ## Label offsets
///
/// Filled while pass one lays out memory, read back in pass two to patch
/// references. A label declared twice keeps its last offset.

#[derive(Debug, Default)]
pub struct Link {
    symbols: HashMap<String, Address>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn insert(&mut self, label: &str, addr: Address) {
        if let Some(prev) = self.symbols.insert(label.to_string(), addr) {
            log::warn!("label {} moved from {} to {}", label, prev, addr);
        }
    }

    pub fn get(&self, label: &str) -> Option<Address> {
        self.symbols.get(label).copied()
    }

    /// The cell a reference on `line_number` resolves to.
    pub fn resolve(&self, line_number: usize, label: &str) -> Result<Cell> {
        match self.symbols.get(label) {
            Some(addr) => Ok(*addr as Cell),
            None => Err(error!(UnresolvedLabel, line_number; label)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_resolve() {
        let mut link = Link::new();
        link.insert("start", 3);
        link.insert("start", 5);
        assert_eq!(link.len(), 1);
        assert_eq!(link.resolve(1, "start").unwrap(), 5);
        let e = link.resolve(12, "finish").unwrap_err();
        assert!(e.is(ErrorCode::UnresolvedLabel));
        assert_eq!(e.line_number(), Some(12));
    }
}
