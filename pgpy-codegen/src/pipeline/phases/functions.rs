//! Function phase - callable wrappers from function files.

use eyre::{Context, Result};
use pgpy_core::module_name_for;
use pgpy_schema::{FUNCTION_FILE_EXTRACTORS, SchemaObject};
use tracing::debug;

use super::{parse_file, sorted};
use crate::{
    pipeline::{GeneratedModule, GenerationContext, Phase},
    sources::SourceFile,
};

/// Phase that turns every function file into a module of wrappers.
///
/// Runs after [`TypePhase`](super::TypePhase), so every record a function
/// refers to is already in the symbol table.
pub struct FunctionPhase;

impl Phase for FunctionPhase {
    fn name(&self) -> &'static str {
        "functions"
    }

    fn description(&self) -> &'static str {
        "Generate callable wrappers from stored functions"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let sources = ctx.sources;
        for file in sorted(&sources.function_files) {
            self.process(ctx, file).wrap_err_with(|| {
                format!("failed to generate functions from '{}'", file.path.display())
            })?;
        }
        Ok(())
    }
}

impl FunctionPhase {
    fn process(&self, ctx: &mut GenerationContext<'_>, file: &SourceFile) -> Result<()> {
        let module_name = module_name_for(&file.path, &ctx.output_module)?;
        let objects = parse_file(file, FUNCTION_FILE_EXTRACTORS)?;
        debug!(file = %file.path.display(), module = %module_name, objects = objects.len(), "parsed function file");

        let functions: Vec<_> = objects
            .iter()
            .filter_map(|object| match object {
                SchemaObject::Function(function) => Some(function.clone()),
                _ => None,
            })
            .collect();

        if functions.is_empty() {
            ctx.add_info(self.name(), "no functions; nothing generated", &file.path);
            return Ok(());
        }

        let source = ctx
            .codegen
            .function_module(&module_name, &functions, &ctx.symbols)?;

        ctx.modules.push(GeneratedModule {
            module_name,
            source_file: Some(file.path.clone()),
            objects,
            source,
        });
        Ok(())
    }
}
