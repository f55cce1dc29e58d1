//! Import collection.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks `from <module> import <symbol>` pairs and deduplicates them.
///
/// Modules keep insertion order; symbols within a module are sorted.
///
/// # Example
///
/// ```
/// use pgpy_codegen::imports::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("typing", "Optional");
/// imports.add("datetime", "timedelta");
/// imports.add("datetime", "datetime");
///
/// let rendered: Vec<String> = imports
///     .iter()
///     .map(|(module, symbols)| {
///         let symbols: Vec<&str> = symbols.iter().map(|s| s.as_str()).collect();
///         format!("from {} import {}", module, symbols.join(", "))
///     })
///     .collect();
/// assert_eq!(
///     rendered,
///     ["from typing import Optional", "from datetime import datetime, timedelta"]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for (module, symbols) in &other.imports {
            let entry = self.imports.entry(module.clone()).or_default();
            entry.extend(symbols.iter().cloned());
        }
    }

    pub fn has_module(&self, module: &str) -> bool {
        self.imports.contains_key(module)
    }

    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}
