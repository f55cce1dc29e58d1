//! Check command report data structures.

use std::path::PathBuf;

use super::{
    ObjectCounts,
    generate::plural,
    output::{Output, Report},
};

/// Report data from schema validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Schema root that was checked.
    pub input: PathBuf,
    /// Modules a generate run would write, registration last.
    pub modules: Vec<String>,
    pub counts: ObjectCounts,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.input.display()));
        out.newline();
        out.preformatted(&format!("  {}", self.counts.summary()));
        out.section(&format!(
            "  {} would be generated",
            plural(self.modules.len(), "module")
        ));
        for module in &self.modules {
            out.list_item(module);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_valid_report_lists_modules() {
        let report = CheckReport {
            input: PathBuf::from("schema"),
            modules: vec!["db.types.user".to_string(), "db.register".to_string()],
            counts: ObjectCounts {
                types: 1,
                domains: 0,
                functions: 0,
            },
            errors: Vec::new(),
            warnings: Vec::new(),
            infos: Vec::new(),
        };
        let mut out = RecordingOutput::default();

        report.render(&mut out);

        assert_eq!(out.lines[0], "✓ schema is valid");
        assert!(out.lines.contains(&"- db.register".to_string()));
    }
}
