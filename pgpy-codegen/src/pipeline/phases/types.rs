//! Type phase - records and aliases from type files.

use eyre::{Context, Result};
use pgpy_core::module_name_for;
use pgpy_schema::{SchemaObject, TYPE_FILE_EXTRACTORS};
use tracing::debug;

use super::{parse_file, sorted};
use crate::{
    pipeline::{GeneratedModule, GenerationContext, Phase},
    sources::SourceFile,
    symbols::SymbolKind,
    types::{DomainShape, classify_domain, display_name},
};

/// Phase that turns every type file into a module and registers the names it
/// defines.
pub struct TypePhase;

impl Phase for TypePhase {
    fn name(&self) -> &'static str {
        "types"
    }

    fn description(&self) -> &'static str {
        "Generate records and aliases from composite types and domains"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let sources = ctx.sources;
        for file in sorted(&sources.type_files) {
            self.process(ctx, file)
                .wrap_err_with(|| format!("failed to generate types from '{}'", file.path.display()))?;
        }
        Ok(())
    }
}

impl TypePhase {
    fn process(&self, ctx: &mut GenerationContext<'_>, file: &SourceFile) -> Result<()> {
        let module_name = module_name_for(&file.path, &ctx.output_module)?;
        let objects = parse_file(file, TYPE_FILE_EXTRACTORS)?;
        debug!(file = %file.path.display(), module = %module_name, objects = objects.len(), "parsed type file");

        if objects.is_empty() {
            ctx.add_info(
                self.name(),
                "no composite types or domains; nothing generated",
                &file.path,
            );
            return Ok(());
        }

        let source = ctx
            .codegen
            .type_module(&module_name, &objects, &ctx.symbols)?;

        for object in &objects {
            match object {
                SchemaObject::Type(ty) => {
                    ctx.symbols
                        .register(display_name(&ty.name), &module_name, SymbolKind::Record)?;
                    ctx.types.push(ty.clone());
                }
                SchemaObject::Domain(domain) => {
                    let kind = match classify_domain(domain) {
                        DomainShape::SameAsUnderlying(_) => None,
                        DomainShape::ScalarAlias(_) => Some(SymbolKind::ScalarAlias),
                        DomainShape::CompositeAlias(_) => Some(SymbolKind::Record),
                    };
                    if let Some(kind) = kind {
                        ctx.symbols
                            .register(display_name(&domain.name), &module_name, kind)?;
                    }
                    ctx.domains.push(domain.clone());
                }
                SchemaObject::Function(function) => {
                    ctx.add_warning(
                        self.name(),
                        format!(
                            "function '{}' in type file '{}' was ignored",
                            function.name,
                            file.path.display()
                        ),
                    );
                }
            }
        }

        ctx.modules.push(GeneratedModule {
            module_name,
            source_file: Some(file.path.clone()),
            objects,
            source,
        });
        Ok(())
    }
}
