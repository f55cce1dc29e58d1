//! Pipeline phase trait.

use eyre::Result;

use super::GenerationContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the generation pipeline.
///
/// Phases run in order and share one [`GenerationContext`]. A phase returns
/// an error to abort the run; non-fatal findings go into diagnostics.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and logs).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the generation context.
    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
