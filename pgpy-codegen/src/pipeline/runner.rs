//! Pipeline orchestrator.

use eyre::Result;
use tracing::debug;

use super::{
    GenerationContext, GenerationOutput, Phase, PhaseInfo,
    phases::{FunctionPhase, RegistrationPhase, TypePhase},
};
use crate::{language::LanguageCodegen, sources::SchemaSources};

/// The generation pipeline orchestrator.
///
/// Runs the type, function and registration phases in that order. The first
/// failing file aborts the run.
///
/// # Example
///
/// ```ignore
/// let output = Pipeline::new("app.db").run(&sources, &PythonGenerator::new())?;
/// ```
pub struct Pipeline {
    output_module: String,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a pipeline generating modules under `output_module`.
    pub fn new(output_module: impl Into<String>) -> Self {
        Self {
            output_module: output_module.into(),
            phases: vec![
                Box::new(TypePhase),
                Box::new(FunctionPhase),
                Box::new(RegistrationPhase),
            ],
        }
    }

    pub fn output_module(&self) -> &str {
        &self.output_module
    }

    /// The phases this pipeline runs, in order.
    pub fn phases(&self) -> Vec<PhaseInfo> {
        self.phases.iter().map(|phase| phase.info()).collect()
    }

    /// Run every phase over `sources`, rendering through `codegen`.
    pub fn run(
        &self,
        sources: &SchemaSources,
        codegen: &dyn LanguageCodegen,
    ) -> Result<GenerationOutput> {
        let mut ctx = GenerationContext::new(&self.output_module, sources, codegen);

        for builtin in codegen.builtin_symbols() {
            ctx.symbols
                .register(builtin.name, builtin.module, builtin.kind)?;
        }

        for phase in &self.phases {
            debug!(phase = phase.name(), language = codegen.language(), "running phase");
            phase.run(&mut ctx)?;
        }

        ctx.into_output()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::{
        pipeline::Severity,
        sources::SourceFile,
        symbols::SymbolKind,
        testing::OutlineCodegen,
    };

    #[test]
    fn test_phase_order() {
        let names: Vec<_> = Pipeline::new("db")
            .phases()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["types", "functions", "registration"]);
    }

    #[test]
    fn test_type_files_complete_before_functions() {
        let sources = SchemaSources::new()
            .with_function_file(SourceFile::new(
                "functions/users.sql",
                "CREATE FUNCTION get_user(p_id INTEGER_NOTNULL) RETURNS user LANGUAGE sql",
            ))
            .with_type_file(SourceFile::new(
                "types/02_user.sql",
                "CREATE TYPE user AS (id INTEGER_NOTNULL, home address);",
            ))
            .with_type_file(SourceFile::new(
                "types/01_address.sql",
                "CREATE TYPE address AS (street TEXT);",
            ));

        let output = Pipeline::new("db").run(&sources, &OutlineCodegen).unwrap();

        let modules: Vec<_> = output.modules.iter().map(|m| m.module_name.as_str()).collect();
        assert_eq!(
            modules,
            ["db.types.address", "db.types.user", "db.functions.users"]
        );
        assert_eq!(output.registration.module_name, "db.register");
        assert_eq!(
            output.symbols.lookup("User").unwrap().module,
            "db.types.user"
        );
        assert_eq!(output.object_count(), 3);
    }

    #[test]
    fn test_domains_register_only_new_names() {
        let sources = SchemaSources::new().with_type_file(SourceFile::new(
            "types/user.sql",
            indoc! {"
                CREATE TYPE user AS (id INTEGER_NOTNULL);
                CREATE DOMAIN user_notnull AS user NOT NULL;
                CREATE DOMAIN email AS TEXT;
                CREATE DOMAIN admin AS user;
            "},
        ));

        let output = Pipeline::new("db").run(&sources, &OutlineCodegen).unwrap();

        assert_eq!(output.symbols.lookup("User").unwrap().kind, SymbolKind::Record);
        assert_eq!(
            output.symbols.lookup("Email").unwrap().kind,
            SymbolKind::ScalarAlias
        );
        assert_eq!(output.symbols.lookup("Admin").unwrap().kind, SymbolKind::Record);
        assert_eq!(output.symbols.count(SymbolKind::Record), 2);
        assert_eq!(output.symbols.count(SymbolKind::ScalarAlias), 1);
    }

    #[test]
    fn test_empty_file_produces_no_module() {
        let sources = SchemaSources::new()
            .with_type_file(SourceFile::new("types/grants.sql", "GRANT ALL ON t TO u;"));

        let output = Pipeline::new("db").run(&sources, &OutlineCodegen).unwrap();

        assert!(output.modules.is_empty());
        let info = &output.diagnostics[0];
        assert_eq!(info.severity, Severity::Info);
        assert_eq!(info.location.as_deref(), Some("types/grants.sql"));
    }

    #[test]
    fn test_function_file_without_functions_is_noted() {
        let sources = SchemaSources::new().with_function_file(SourceFile::new(
            "functions/grants.sql",
            "GRANT EXECUTE ON ALL FUNCTIONS IN SCHEMA public TO app;",
        ));

        let output = Pipeline::new("db").run(&sources, &OutlineCodegen).unwrap();

        assert!(output.modules.is_empty());
        assert_eq!(output.diagnostics.len(), 1);
        let info = &output.diagnostics[0];
        assert_eq!(info.severity, Severity::Info);
        assert_eq!(info.phase, "functions");
        assert_eq!(
            info.to_string(),
            "info: no functions; nothing generated (at functions/grants.sql)"
        );
    }

    #[test]
    fn test_unknown_type_aborts_with_file_name() {
        let sources = SchemaSources::new().with_function_file(SourceFile::new(
            "functions/users.sql",
            "CREATE FUNCTION get_user() RETURNS user LANGUAGE sql",
        ));

        let err = Pipeline::new("db").run(&sources, &OutlineCodegen).unwrap_err();

        assert!(err.to_string().contains("functions/users.sql"));
        assert!(err.downcast_ref::<crate::Error>().is_some());
    }

    #[test]
    fn test_duplicate_type_across_files_fails() {
        let sources = SchemaSources::new()
            .with_type_file(SourceFile::new("types/a.sql", "CREATE TYPE thing AS (a TEXT);"))
            .with_type_file(SourceFile::new("types/b.sql", "CREATE TYPE thing AS (b TEXT);"));

        let err = Pipeline::new("db").run(&sources, &OutlineCodegen).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<crate::Error>(),
            Some(crate::Error::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn test_malformed_statement_keeps_schema_error() {
        let sources = SchemaSources::new().with_type_file(SourceFile::new(
            "types/broken.sql",
            "CREATE TYPE broken AS (a TEXT, b);",
        ));

        let err = Pipeline::new("db").run(&sources, &OutlineCodegen).unwrap_err();

        assert!(err.downcast_ref::<pgpy_schema::Error>().is_some());
    }

    #[test]
    fn test_views_are_passed_through() {
        let sources = SchemaSources::new()
            .with_view_file(SourceFile::new("views/b.sql", "CREATE VIEW b AS SELECT 1;"))
            .with_view_file(SourceFile::new("views/a.sql", "CREATE VIEW a AS SELECT 1;"));

        let output = Pipeline::new("db").run(&sources, &OutlineCodegen).unwrap();

        assert_eq!(output.view_files.len(), 2);
        assert!(output.view_files[0].ends_with("a.sql"));
    }

    #[test]
    fn test_builtin_symbols_are_registered_first() {
        let output = Pipeline::new("db")
            .run(&SchemaSources::new(), &OutlineCodegen)
            .unwrap();
        assert_eq!(output.symbols.count(SymbolKind::Loader), 1);
    }
}
