//! Code generation building blocks.
//!
//! Backends describe output as [`CodeFragment`] trees through [`Renderable`]
//! nodes; a single [`CodeBuilder`] prints them with [`Indent`]-aware
//! indentation, so every generated file goes through one printer.

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
