//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from one generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Dotted root module that was generated.
    pub module: String,
    /// Number of schema scripts read.
    pub schema_files: usize,
    pub counts: ObjectCounts,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    /// Set when the scripts were rolled into the database.
    pub roll: Option<RollResult>,
    pub result: GenerationResult,
}

/// Recognized schema objects by kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ObjectCounts {
    pub types: usize,
    pub domains: usize,
    pub functions: usize,
}

impl ObjectCounts {
    pub fn summary(&self) -> String {
        format!(
            "{}, {}, {}",
            plural(self.types, "type"),
            plural(self.domains, "domain"),
            plural(self.functions, "function")
        )
    }
}

/// Outcome of applying the scripts with `psql`.
#[derive(Debug)]
pub struct RollResult {
    pub applied: usize,
    pub failed: Vec<PathBuf>,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Directory of the generated root module.
    pub package_dir: PathBuf,
    /// Modules whose content changed.
    pub written: Vec<PathBuf>,
    /// Number of modules left as they were.
    pub unchanged: usize,
    /// Stale modules deleted.
    pub removed: Vec<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        out.preformatted(&format!(
            "{}: {} from {}",
            self.module,
            self.counts.summary(),
            plural(self.schema_files, "schema file")
        ));

        if let Some(roll) = &self.roll {
            out.key_value(
                "Rolled",
                &format!("{} applied, {} failed", roll.applied, roll.failed.len()),
            );
            for script in &roll.failed {
                out.removed_item(&script.display().to_string());
            }
        }
        out.newline();

        out.key_value("Generated", &written.package_dir.display().to_string());
        for path in &written.written {
            out.added_item(&self.relative(path, written));
        }
        for path in &written.removed {
            out.removed_item(&self.relative(path, written));
        }
        if written.unchanged > 0 {
            out.preformatted(&format!("  {} unchanged", plural(written.unchanged, "module")));
        }
    }

    fn relative(&self, path: &std::path::Path, written: &WrittenResult) -> String {
        path.strip_prefix(&written.package_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} would be generated ({})",
            plural(preview.files.len(), "module"),
            self.counts.summary()
        ));
    }
}

pub(super) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_counts_summary() {
        let counts = ObjectCounts {
            types: 1,
            domains: 0,
            functions: 3,
        };
        assert_eq!(counts.summary(), "1 type, 0 domains, 3 functions");
    }

    #[test]
    fn test_written_lists_changes_relative_to_package() {
        let report = GenerateReport {
            module: "app.db".to_string(),
            schema_files: 2,
            counts: ObjectCounts::default(),
            warnings: Vec::new(),
            roll: None,
            result: GenerationResult::Written(WrittenResult {
                package_dir: PathBuf::from("/src/app/db"),
                written: vec![PathBuf::from("/src/app/db/types/address.py")],
                unchanged: 2,
                removed: vec![PathBuf::from("/src/app/db/types/old.py")],
            }),
        };
        let mut out = RecordingOutput::default();

        report.render(&mut out);

        assert!(out.lines.contains(&"+ types/address.py".to_string()));
        assert!(out.lines.contains(&"- types/old.py".to_string()));
        assert!(out.lines.contains(&"  2 modules unchanged".to_string()));
    }
}
