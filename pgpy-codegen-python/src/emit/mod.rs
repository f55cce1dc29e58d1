//! Code emitters.
//!
//! Each emitter turns the objects of one module into Python source. Emitters
//! are pure: output depends only on the objects and the symbol table.
//!
//! - [`record`] - dataclasses and aliases for type files
//! - [`callable`] - call wrappers for function files
//! - [`registration`] - the aggregate `register_types(conn)` module

pub mod callable;
pub mod record;
pub mod registration;

mod scope;

pub use callable::{CallableVariant, emit_function_module};
pub use record::emit_type_module;
pub use registration::emit_registration_module;
