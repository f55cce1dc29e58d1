//! Generation pipeline.
//!
//! A [`Pipeline`] runs three phases in a fixed order over one
//! [`GenerationContext`]:
//!
//! - `types` - type files become records and aliases; their names enter the symbol table
//! - `functions` - function files become callable wrappers, importing from the table
//! - `registration` - one module registers every type and domain with the driver
//!
//! Type files must all be processed before any function file, since function
//! modules import the records that type modules define.
//!
//! # Example
//!
//! ```ignore
//! use pgpy_codegen::pipeline::Pipeline;
//!
//! let output = Pipeline::new("app.db").run(&sources, &generator)?;
//! for module in &output.modules {
//!     println!("{}", module.module_name);
//! }
//! ```

mod context;
mod diagnostic;
mod output;
mod phase;
pub mod phases;
mod runner;

pub use context::GenerationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use output::{GeneratedModule, GenerationOutput};
pub use phase::{Phase, PhaseInfo};
pub use runner::Pipeline;
