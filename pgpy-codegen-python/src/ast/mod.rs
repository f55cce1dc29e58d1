//! Python AST nodes.
//!
//! Each node implements [`Renderable`](pgpy_codegen::builder::Renderable);
//! [`PyFile`](crate::PyFile) assembles them into a module.

mod dataclass;
mod def;
mod import;
mod stmt;

pub use dataclass::{Dataclass, Field};
pub use def::{Def, Param};
pub use import::Import;
pub use stmt::{Assign, Stmt};

/// Lines longer than this are exploded one element per line.
pub const LINE_WIDTH: usize = 88;
