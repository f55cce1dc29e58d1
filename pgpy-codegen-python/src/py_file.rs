//! PyFile abstraction for structured Python module generation.
//!
//! Provides a high-level API for generating Python modules with grouped
//! imports followed by top-level definitions.

use pgpy_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    imports::ImportCollector,
};

use crate::ast::Import;

/// Standard library modules generated code may import.
const STDLIB_MODULES: &[&str] = &["dataclasses", "datetime", "decimal", "typing"];

const THIRD_PARTY_ROOT: &str = "psycopg";

/// Import sections, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ImportGroup {
    Stdlib,
    ThirdParty,
    Generated,
}

impl ImportGroup {
    fn of(module: &str) -> Self {
        let root = module.split('.').next().unwrap_or(module);
        if STDLIB_MODULES.contains(&root) {
            ImportGroup::Stdlib
        } else if root == THIRD_PARTY_ROOT {
            ImportGroup::ThirdParty
        } else {
            ImportGroup::Generated
        }
    }
}

/// A structured representation of a Python module.
///
/// Imports are grouped (standard library, psycopg, generated modules) and
/// sorted within each group; top-level definitions are separated by two blank
/// lines.
///
/// # Example
///
/// ```
/// use pgpy_codegen_python::{Assign, PyFile};
///
/// let source = PyFile::new()
///     .import("typing", "Optional")
///     .add(Assign::new("Email", "str"))
///     .render();
/// assert_eq!(source, "from typing import Optional\n\n\nEmail = str\n");
/// ```
#[derive(Debug, Default)]
pub struct PyFile {
    imports: ImportCollector,
    body: Vec<Vec<CodeFragment>>,
}

impl PyFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import `name` from `module`.
    pub fn import(mut self, module: &str, name: &str) -> Self {
        self.imports.add(module, name);
        self
    }

    /// Add every import from a collector.
    pub fn imports(mut self, imports: &ImportCollector) -> Self {
        self.imports.merge(imports);
        self
    }

    /// Add a top-level definition.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add several top-level definitions.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.body.is_empty()
    }

    /// Import statements in output order.
    fn import_groups(&self) -> Vec<Vec<Import>> {
        let mut entries: Vec<(ImportGroup, &str, Vec<&str>)> = self
            .imports
            .iter()
            .map(|(module, names)| {
                (
                    ImportGroup::of(module),
                    module,
                    names.iter().map(String::as_str).collect(),
                )
            })
            .collect();
        entries.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut groups: Vec<(ImportGroup, Vec<Import>)> = Vec::new();
        for (group, module, names) in entries {
            let import = Import::new(module).names(names);
            match groups.last_mut() {
                Some((last, imports)) if *last == group => imports.push(import),
                _ => groups.push((group, vec![import])),
            }
        }
        groups.into_iter().map(|(_, imports)| imports).collect()
    }

    /// Render the module.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::python();

        // 1. Import groups, one blank line apart
        for (i, group) in self.import_groups().iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for import in group {
                builder.emit(import);
            }
        }

        // 2. Two blank lines between imports and body
        if !self.imports.is_empty() && !self.body.is_empty() {
            builder.push_blank().push_blank();
        }

        // 3. Definitions, two blank lines apart
        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank().push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Dataclass, Field};

    #[test]
    fn test_import_groups_are_ordered_and_separated() {
        let source = PyFile::new()
            .import("app.db.types.address", "Address")
            .import("psycopg", "Connection")
            .import("typing", "Optional")
            .import("dataclasses", "dataclass")
            .import("psycopg.rows", "class_row")
            .render();

        assert_eq!(
            source,
            "from dataclasses import dataclass\n\
             from typing import Optional\n\
             \n\
             from psycopg import Connection\n\
             from psycopg.rows import class_row\n\
             \n\
             from app.db.types.address import Address\n"
        );
    }

    #[test]
    fn test_definitions_are_two_blank_lines_apart() {
        let source = PyFile::new()
            .add(Dataclass::new("A").field(Field::new("x", "int")))
            .add(Dataclass::new("B").field(Field::new("y", "int")))
            .render();

        assert_eq!(
            source,
            "@dataclass\nclass A:\n    x: int\n\n\n@dataclass\nclass B:\n    y: int\n"
        );
    }

    #[test]
    fn test_empty_file_renders_nothing() {
        let file = PyFile::new();
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn test_import_group_classification() {
        assert_eq!(ImportGroup::of("datetime"), ImportGroup::Stdlib);
        assert_eq!(ImportGroup::of("psycopg.types.numeric"), ImportGroup::ThirdParty);
        assert_eq!(ImportGroup::of("psycopg_pool"), ImportGroup::Generated);
        assert_eq!(ImportGroup::of("app.db.types"), ImportGroup::Generated);
    }
}
