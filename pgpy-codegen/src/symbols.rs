//! Cross-file symbol table.
//!
//! Maps each generated name (`Address`, `Email`, `IntLoader`) to the module
//! that defines it, so later files can import it. The table only grows during
//! a run; a new run starts from an empty table.

use indexmap::IndexMap;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A generated value object.
    Record,
    /// An alias of a primitive type.
    ScalarAlias,
    /// A driver loader class.
    Loader,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub module: String,
    pub kind: SymbolKind,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `module` defines `name`.
    ///
    /// Registering the same name to the same module again is a no-op.
    ///
    /// ```
    /// use pgpy_codegen::symbols::{SymbolKind, SymbolTable};
    ///
    /// let mut table = SymbolTable::new();
    /// table.register("Address", "db.types.address", SymbolKind::Record).unwrap();
    /// table.register("Address", "db.types.address", SymbolKind::Record).unwrap();
    /// assert!(table.register("Address", "db.types.other", SymbolKind::Record).is_err());
    /// ```
    pub fn register(
        &mut self,
        name: impl Into<String>,
        module: impl Into<String>,
        kind: SymbolKind,
    ) -> Result<()> {
        let name = name.into();
        let module = module.into();
        if let Some(existing) = self.symbols.get(&name) {
            if existing.module == module {
                return Ok(());
            }
            return Err(Error::DuplicateSymbol {
                name,
                existing: existing.module.clone(),
                module,
            });
        }
        self.symbols.insert(name, Symbol { module, kind });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Symbol> {
        self.symbols.get(name).ok_or_else(|| Error::UnknownSymbol {
            name: name.to_string(),
        })
    }

    /// Module to import `name` from, or `None` when `current_module` defines it.
    pub fn import_for(&self, name: &str, current_module: &str) -> Result<Option<&str>> {
        let symbol = self.lookup(name)?;
        if symbol.module == current_module {
            Ok(None)
        } else {
            Ok(Some(&symbol.module))
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Iterate over symbols in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of symbols of a given kind.
    pub fn count(&self, kind: SymbolKind) -> usize {
        self.symbols.values().filter(|s| s.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
