//! Python code generator for pgpy.
//!
//! This crate renders schema objects as Python modules that call the database
//! through [psycopg](https://www.psycopg.org/psycopg3/) 3.
//!
//! # Usage
//!
//! This crate is used internally by the `pgpy` CLI tool. You typically don't need
//! to use it directly.
//!
//! ```ignore
//! use pgpy_codegen::{pipeline::Pipeline, sources::SchemaSources};
//! use pgpy_codegen_python::Generator;
//!
//! let sources = SchemaSources::new().with_type_file(file);
//! let output = Pipeline::new("app.db").run(&sources, &Generator::new())?;
//! ```
//!
//! # Generated Output
//!
//! - one module per type file: a `@dataclass` per composite type and an alias
//!   per domain
//! - one module per function file: `<name>_fetchone` / `<name>_fetchall`
//!   wrappers, or a single `<name>` wrapper for `VOID` functions
//! - `register.py`: `register_types(conn)` registering every type and domain
//!   with the connection's adapters

mod generator;
mod naming;
mod py_file;
mod type_mapper;

pub mod ast;
pub mod emit;
pub mod loaders;

pub use ast::{Assign, Dataclass, Def, Field, Import, Param, Stmt};
pub use generator::Generator;
pub use loaders::{LOADERS, Loader, NOT_NULL_DOMAINS, NotNullDomain, builtin_domain, loader_for};
pub use naming::{PYTHON_KEYWORDS, function_name, param_name, safe_name};
pub use pgpy_codegen::language::LanguageCodegen;
pub use py_file::PyFile;
pub use type_mapper::PythonTypeMapper;
