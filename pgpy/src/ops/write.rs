//! Writing generated modules to the package tree.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use pgpy_codegen::pipeline::GenerationOutput;
use pgpy_core::{File, MODULE_SEPARATOR, WriteResult, find_stale_files, module_file_path};
use tracing::{debug, info};

/// PEP 561 marker declaring the package as typed.
pub const TYPED_MARKER: &str = "py.typed";

/// Package initializers are left alone when cleaning stale modules.
const PACKAGE_INIT: &str = "__init__.py";

const MODULE_EXTENSION: &str = "py";

/// What [`write_output`] did on disk.
#[derive(Debug, Default)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

/// Directory holding the generated tree for `module` under `output_root`.
pub fn package_dir(output_root: &Path, module: &str) -> PathBuf {
    let mut dir = output_root.to_path_buf();
    dir.extend(module.split(MODULE_SEPARATOR));
    dir
}

/// Write every generated module under `output_root`.
///
/// Modules whose content did not change are not rewritten. `.py` files left
/// under the package directory by earlier runs are removed, and every
/// directory that received a module gets a `py.typed` marker.
pub fn write_output(
    output_root: &Path,
    module: &str,
    output: &GenerationOutput,
) -> Result<WriteSummary> {
    let package = package_dir(output_root, module);
    let mut summary = WriteSummary::default();
    let mut kept = Vec::new();

    for generated in output.all_modules() {
        let path = module_file_path(output_root, &generated.module_name);
        let result = File::new(&path, generated.source.as_str())
            .write()
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        match result {
            WriteResult::Written => {
                info!(path = %path.display(), "wrote module");
                summary.written.push(path.clone());
            }
            WriteResult::Unchanged => {
                debug!(path = %path.display(), "module unchanged");
                summary.unchanged.push(path.clone());
            }
        }
        kept.push(path);
    }

    for stale in find_stale_files(&package, MODULE_EXTENSION, &kept)? {
        if stale.file_name().is_some_and(|name| name == PACKAGE_INIT) {
            continue;
        }
        std::fs::remove_file(&stale)
            .wrap_err_with(|| format!("failed to remove {}", stale.display()))?;
        info!(path = %stale.display(), "removed stale module");
        summary.removed.push(stale);
    }

    for dir in typed_dirs(&package, &kept) {
        File::new(dir.join(TYPED_MARKER), "")
            .write()
            .wrap_err_with(|| format!("failed to mark {} as typed", dir.display()))?;
    }

    Ok(summary)
}

/// Every directory between `package` and a kept module, `package` included.
fn typed_dirs(package: &Path, kept: &[PathBuf]) -> BTreeSet<PathBuf> {
    kept.iter()
        .flat_map(|path| path.ancestors().skip(1))
        .filter(|dir| dir.starts_with(package))
        .map(Path::to_path_buf)
        .collect()
}
