//! Core operations.
//!
//! This module contains the business logic for pgpy commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod discover;
pub mod generate;
pub mod runner;
pub mod watcher;
pub mod write;

pub use check::check;
pub use discover::discover;
pub use generate::{GenerateOptions, generate};
pub use runner::ScriptRunner;
pub use watcher::watch;
pub use write::write_output;
