//! Schema source files handed to the pipeline.

use std::path::{Path, PathBuf};

/// One `.sql` file, with its path relative to the schema input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Source files grouped by schema directory.
#[derive(Debug, Clone, Default)]
pub struct SchemaSources {
    pub type_files: Vec<SourceFile>,
    pub view_files: Vec<SourceFile>,
    pub function_files: Vec<SourceFile>,
}

impl SchemaSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_file(mut self, file: SourceFile) -> Self {
        self.type_files.push(file);
        self
    }

    pub fn with_view_file(mut self, file: SourceFile) -> Self {
        self.view_files.push(file);
        self
    }

    pub fn with_function_file(mut self, file: SourceFile) -> Self {
        self.function_files.push(file);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.type_files.is_empty() && self.view_files.is_empty() && self.function_files.is_empty()
    }

    /// Total number of files across all groups.
    pub fn len(&self) -> usize {
        self.type_files.len() + self.view_files.len() + self.function_files.len()
    }
}
