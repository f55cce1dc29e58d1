//! Python import builder.

use pgpy_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::LINE_WIDTH;

/// A `from <module> import <names>` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    module: String,
    names: Vec<String>,
}

impl Import {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            names: Vec::new(),
        }
    }

    /// Import a name from the module.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Import several names from the module.
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Build the import as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::python();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let single = format!("from {} import {}", self.module, self.names.join(", "));
        if single.len() <= LINE_WIDTH {
            return vec![CodeFragment::line(single)];
        }

        let names = self
            .names
            .iter()
            .map(|name| CodeFragment::line(format!("{name},")))
            .collect();
        vec![CodeFragment::block_with_close(
            format!("from {} import (", self.module),
            names,
            ")",
        )]
    }
}
