//! Registration phase - the aggregate driver registration module.

use eyre::{Context, Result};
use pgpy_core::MODULE_SEPARATOR;
use tracing::debug;

use crate::pipeline::{GeneratedModule, GenerationContext, Phase};

/// Name of the registration module under the output module.
pub const REGISTRATION_MODULE: &str = "register";

/// Phase that emits one module registering every type and domain seen by
/// earlier phases.
pub struct RegistrationPhase;

impl Phase for RegistrationPhase {
    fn name(&self) -> &'static str {
        "registration"
    }

    fn description(&self) -> &'static str {
        "Generate the type registration module"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let module_name = [ctx.output_module.as_str(), REGISTRATION_MODULE].join(MODULE_SEPARATOR);
        debug!(
            module = %module_name,
            types = ctx.types.len(),
            domains = ctx.domains.len(),
            "generating registration module"
        );

        let source = ctx
            .codegen
            .registration_module(&module_name, &ctx.types, &ctx.domains, &ctx.symbols)
            .wrap_err("failed to generate the registration module")?;

        ctx.registration = Some(GeneratedModule {
            module_name,
            source_file: None,
            objects: Vec::new(),
            source,
        });
        Ok(())
    }
}
