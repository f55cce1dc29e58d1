use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, skipping the write when the content is unchanged
    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_if_changed(&self.path(base), &self.render())
    }
}

fn write_if_changed(path: &Path, content: &str) -> Result<WriteResult> {
    if let Ok(existing) = std::fs::read_to_string(path) {
        if existing == content {
            return Ok(WriteResult::Unchanged);
        }
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(WriteResult::Written)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had identical content
    Unchanged,
}

/// A file to be generated
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file
    pub fn write(&self) -> Result<WriteResult> {
        write_if_changed(&self.path, &self.content)
    }
}

/// Find files under `dir` with the given extension that are not in `keep`.
///
/// Used to detect modules left behind by schema files that were renamed or
/// deleted since the previous run. Returns paths sorted for stable output.
pub fn find_stale_files(dir: &Path, extension: &str, keep: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut stale = Vec::new();
    if dir.is_dir() {
        collect_stale(dir, extension, keep, &mut stale)?;
    }
    stale.sort();
    Ok(stale)
}

fn collect_stale(
    dir: &Path,
    extension: &str,
    keep: &[PathBuf],
    stale: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_stale(&path, extension, keep, stale)?;
        } else if path.extension().is_some_and(|ext| ext == extension) && !keep.contains(&path) {
            stale.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("module.py");

        let result = File::new(&path, "x = 1\n").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "x = 1\n");
    }

    #[test]
    fn test_write_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("module.py");

        File::new(&path, "first").write().unwrap();
        let result = File::new(&path, "first").write().unwrap();

        assert_eq!(result, WriteResult::Unchanged);
    }

    #[test]
    fn test_write_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("module.py");

        File::new(&path, "first").write().unwrap();
        let result = File::new(&path, "second").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_find_stale_files() {
        let temp = TempDir::new().unwrap();
        let keep = temp.path().join("types").join("address.py");
        let stale = temp.path().join("types").join("old.py");
        fs::create_dir_all(keep.parent().unwrap()).unwrap();
        fs::write(&keep, "").unwrap();
        fs::write(&stale, "").unwrap();
        fs::write(temp.path().join("py.typed"), "").unwrap();

        let found = find_stale_files(temp.path(), "py", &[keep]).unwrap();

        assert_eq!(found, vec![stale]);
    }

    #[test]
    fn test_find_stale_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        let found = find_stale_files(&temp.path().join("missing"), "py", &[]).unwrap();
        assert!(found.is_empty());
    }
}
