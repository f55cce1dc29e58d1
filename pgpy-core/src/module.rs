//! Module path derivation for generated files.

use std::path::{Component, Path, PathBuf};

use eyre::{Result, eyre};

use crate::utils::strip_ordering_prefix;

/// Separator between module path segments (`app.db.types.address`).
pub const MODULE_SEPARATOR: &str = ".";

/// Derive the generated module name for a schema source file.
///
/// `relative_path` is relative to the schema input root. The result joins the
/// output module, every parent directory of the file and the file stem with
/// its ordering prefix stripped:
///
/// ```
/// use std::path::Path;
/// use pgpy_core::module_name_for;
///
/// let name = module_name_for(Path::new("types/billing/01_invoice.sql"), "app.db").unwrap();
/// assert_eq!(name, "app.db.types.billing.invoice");
/// ```
pub fn module_name_for(relative_path: &Path, output_module: &str) -> Result<String> {
    let stem = relative_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| eyre!("'{}' has no usable file name", relative_path.display()))?;

    let mut parts = vec![output_module.to_string()];
    if let Some(parent) = relative_path.parent() {
        for component in parent.components() {
            match component {
                Component::Normal(segment) => {
                    let segment = segment.to_str().ok_or_else(|| {
                        eyre!("'{}' is not valid UTF-8", relative_path.display())
                    })?;
                    parts.push(segment.to_string());
                }
                Component::CurDir => {}
                _ => {
                    return Err(eyre!(
                        "'{}' must be relative to the schema root",
                        relative_path.display()
                    ));
                }
            }
        }
    }
    parts.push(strip_ordering_prefix(stem).to_string());

    Ok(parts.join(MODULE_SEPARATOR))
}

/// Path of the `.py` file for a dotted module name under a source root.
pub fn module_file_path(source_root: &Path, module_name: &str) -> PathBuf {
    let mut path = source_root.to_path_buf();
    path.extend(module_name.split(MODULE_SEPARATOR));
    path.set_extension("py");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_for_top_level_file() {
        let name = module_name_for(Path::new("types/address.sql"), "db").unwrap();
        assert_eq!(name, "db.types.address");
    }

    #[test]
    fn test_module_name_strips_ordering_prefix_from_file_only() {
        let name = module_name_for(Path::new("functions/01_auth/02_login.sql"), "api.db").unwrap();
        assert_eq!(name, "api.db.functions.01_auth.login");
    }

    #[test]
    fn test_module_name_rejects_parent_components() {
        assert!(module_name_for(Path::new("../escape.sql"), "db").is_err());
    }

    #[test]
    fn test_module_file_path() {
        let path = module_file_path(Path::new("/src"), "api.db.types.address");
        assert_eq!(path, PathBuf::from("/src/api/db/types/address.py"));
    }
}
