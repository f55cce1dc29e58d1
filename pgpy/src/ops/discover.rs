//! Schema file discovery.

use std::path::Path;

use eyre::{Context, Result, eyre};
use pgpy_codegen::sources::{SchemaSources, SourceFile};
use tracing::debug;
use walkdir::WalkDir;

pub const TYPES_DIR: &str = "types";
pub const VIEWS_DIR: &str = "views";
pub const FUNCTIONS_DIR: &str = "functions";

const SCHEMA_EXTENSION: &str = "sql";

/// Read every `.sql` file under the `types/`, `views/` and `functions/`
/// directories of `input`.
///
/// Directories are walked recursively in file-name order. Source paths are
/// kept relative to `input` so module names can be derived from them. A
/// missing group directory is an empty group.
pub fn discover(input: &Path) -> Result<SchemaSources> {
    if !input.is_dir() {
        return Err(eyre!("schema directory '{}' does not exist", input.display()));
    }

    let sources = SchemaSources {
        type_files: read_group(input, TYPES_DIR)?,
        view_files: read_group(input, VIEWS_DIR)?,
        function_files: read_group(input, FUNCTIONS_DIR)?,
    };
    debug!(
        types = sources.type_files.len(),
        views = sources.view_files.len(),
        functions = sources.function_files.len(),
        "discovered schema files"
    );
    Ok(sources)
}

fn read_group(input: &Path, group: &str) -> Result<Vec<SourceFile>> {
    let dir = input.join(group);
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "schema directory missing, skipping");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&dir).sort_by_file_name().follow_links(true) {
        let entry = entry.wrap_err_with(|| format!("failed to walk {}", dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().is_none_or(|ext| ext != SCHEMA_EXTENSION)
        {
            continue;
        }

        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let relative = path.strip_prefix(input).unwrap_or(path);
        files.push(SourceFile::new(relative, contents));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_groups_are_walked_recursively_in_name_order() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "types/02_user.sql", "CREATE TYPE u AS (a TEXT);");
        touch(temp.path(), "types/01_address.sql", "");
        touch(temp.path(), "types/billing/invoice.sql", "");
        touch(temp.path(), "types/README.md", "");
        touch(temp.path(), "functions/users.sql", "");

        let sources = discover(temp.path()).unwrap();

        let types: Vec<_> = sources.type_files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            types,
            [
                PathBuf::from("types/01_address.sql"),
                PathBuf::from("types/02_user.sql"),
                PathBuf::from("types/billing/invoice.sql"),
            ]
        );
        assert_eq!(sources.type_files[1].contents, "CREATE TYPE u AS (a TEXT);");
        assert_eq!(sources.function_files.len(), 1);
        assert!(sources.view_files.is_empty());
    }

    #[test]
    fn test_missing_input_fails() {
        let temp = TempDir::new().unwrap();
        let err = discover(&temp.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
