//! Callable-wrapper emitter for function files.
//!
//! Each schema function becomes typed Python wrappers that run it inside a
//! transaction:
//!
//! ```python
//! def get_user_fetchone(conn: Connection, id: int) -> Optional[User]:
//!     try:
//!         with conn.cursor(row_factory=class_row(User)) as cur:
//!             rows = cur.execute(
//!                 "SELECT * FROM get_user(p_id => %s)",
//!                 [id],
//!             )
//!             conn.commit()
//!             return rows.fetchone()
//!     except BaseException:
//!         conn.rollback()
//!         raise
//! ```

use std::collections::HashSet;

use pgpy_codegen::{
    Error, Result,
    imports::ImportCollector,
    symbols::SymbolTable,
    types::{TypeDescriptor, TypeMapper, map_type},
};
use pgpy_schema::{SchemaArgument, SchemaFunction};

use super::scope::ModuleScope;
use crate::{
    PyFile,
    ast::{Def, Param, Stmt},
    naming::{function_name, param_name, safe_name},
    type_mapper::required,
};

/// One generated wrapper shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableVariant {
    /// `<name>(...) -> None`, for functions returning `VOID`.
    Execute,
    /// `<name>_fetchone(...) -> Optional[T]`
    FetchOne,
    /// `<name>_fetchall(...) -> list[T]`
    FetchAll,
}

impl CallableVariant {
    /// The variants generated for a function.
    pub fn for_function(function: &SchemaFunction) -> &'static [CallableVariant] {
        if map_type(&function.return_type).is_void() {
            &[CallableVariant::Execute]
        } else {
            &[CallableVariant::FetchOne, CallableVariant::FetchAll]
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            CallableVariant::Execute => "",
            CallableVariant::FetchOne => "_fetchone",
            CallableVariant::FetchAll => "_fetchall",
        }
    }

    fn fetch_method(self) -> Option<&'static str> {
        match self {
            CallableVariant::Execute => None,
            CallableVariant::FetchOne => Some("fetchone"),
            CallableVariant::FetchAll => Some("fetchall"),
        }
    }
}

/// Render the module for one function file.
pub fn emit_function_module(
    module_name: &str,
    functions: &[SchemaFunction],
    symbols: &SymbolTable,
) -> Result<String> {
    let scope = ModuleScope::new(module_name, symbols);
    let mut imports = ImportCollector::new();
    imports.add("psycopg", "Connection");

    let mut defs = Vec::new();
    for function in functions {
        for &variant in CallableVariant::for_function(function) {
            defs.push(emit_callable(function, variant, &scope, &mut imports)?);
        }
    }

    Ok(PyFile::new().imports(&imports).add_all(defs).render())
}

/// Render one wrapper of `function`.
///
/// Fails when `variant` does not fit the return type: fetch variants need a
/// value to fetch and the execute variant is reserved for `VOID` functions.
pub(crate) fn emit_callable(
    function: &SchemaFunction,
    variant: CallableVariant,
    scope: &ModuleScope<'_>,
    imports: &mut ImportCollector,
) -> Result<Def> {
    let returns = map_type(&function.return_type);
    match (variant, returns.is_void()) {
        (CallableVariant::Execute, false) => {
            return Err(Error::emission(
                &function.name,
                "only VOID functions have an execute wrapper",
            ));
        }
        (CallableVariant::FetchOne | CallableVariant::FetchAll, true) => {
            return Err(Error::emission(
                &function.name,
                "VOID functions have no rows to fetch",
            ));
        }
        _ => {}
    }

    let mut params = vec![Param::new("conn", "Connection")];
    let mut values = Vec::new();
    for (arg, name) in function.args.iter().zip(param_names(&function.args)) {
        let descriptor = map_type(&arg.type_name);
        scope.reference(&descriptor, imports)?;
        values.push(argument_value(&name, &descriptor, scope, imports)?);
        params.push(Param::new(name, scope.mapper().render_type(&descriptor)));
    }

    let execute_args = [sql_call(function), format!("[{}]", values.join(", "))];
    let name = format!("{}{}", function_name(&function.name), variant.suffix());

    let (return_annotation, body) = match variant.fetch_method() {
        None => (
            "None".to_string(),
            vec![
                Stmt::call("conn.execute", execute_args),
                Stmt::simple("conn.commit()"),
            ],
        ),
        Some(fetch) => {
            let row = required(&returns);
            scope.reference(&row, imports)?;
            let row_type = scope.mapper().render_type(&row);
            let annotation = if variant == CallableVariant::FetchOne {
                imports.add("typing", "Optional");
                scope.mapper().map_optional(&row_type)
            } else {
                scope.mapper().map_array(&row_type)
            };

            let cursor = format!(
                "with conn.cursor(row_factory={}) as cur:",
                row_factory(&returns, &row_type, scope, imports)?
            );
            let body = vec![Stmt::compound(
                cursor,
                vec![
                    Stmt::call("rows = cur.execute", execute_args),
                    Stmt::simple("conn.commit()"),
                    Stmt::simple(format!("return rows.{fetch}()")),
                ],
            )];
            (annotation, body)
        }
    };

    Ok(Def::new(name)
        .params(params)
        .returns(return_annotation)
        .stmt(Stmt::compound("try:", body))
        .stmt(Stmt::compound(
            "except BaseException:",
            vec![Stmt::simple("conn.rollback()"), Stmt::simple("raise")],
        )))
}

/// Python parameter names for `args`, unique among themselves and `conn`.
///
/// An argument whose stripped name is taken keeps its full SQL name
/// (`p_conn` stays `p_conn`); if that is taken too, `_` is appended until it
/// is free.
fn param_names(args: &[SchemaArgument]) -> Vec<String> {
    let mut used = HashSet::from(["conn".to_string()]);
    args.iter()
        .map(|arg| {
            let mut name = param_name(&arg.name);
            if used.contains(&name) {
                name = safe_name(&arg.name);
            }
            while used.contains(&name) {
                name.push('_');
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

/// `"SELECT * FROM name(p_a => %s, p_b => %s)"`, using named notation so the
/// call does not depend on argument order in the database. A variadic
/// argument is passed as `VARIADIC p_rest => %s` with the whole array.
fn sql_call(function: &SchemaFunction) -> String {
    let placeholders: Vec<String> = function
        .args
        .iter()
        .map(|arg| {
            if arg.variadic {
                format!("VARIADIC {} => %s", arg.name)
            } else {
                format!("{} => %s", arg.name)
            }
        })
        .collect();
    format!(
        "\"SELECT * FROM {}({})\"",
        function.name,
        placeholders.join(", ")
    )
}

/// Value bound for one argument. Dataclasses are sent as tuples.
fn argument_value(
    name: &str,
    ty: &TypeDescriptor,
    scope: &ModuleScope<'_>,
    imports: &mut ImportCollector,
) -> Result<String> {
    if !scope.is_record(ty)? {
        return Ok(name.to_string());
    }

    imports.add("dataclasses", "astuple");
    let value = match (ty.is_array, ty.element_nullable) {
        (false, _) => format!("astuple({name})"),
        (true, false) => format!("[astuple(x) for x in {name}]"),
        (true, true) => format!("[astuple(x) if x is not None else None for x in {name}]"),
    };
    if ty.is_nullable {
        Ok(format!("{value} if {name} is not None else None"))
    } else {
        Ok(value)
    }
}

/// Row factory for a return type: dataclasses load through `class_row`,
/// everything else is a single scalar column.
fn row_factory(
    returns: &TypeDescriptor,
    row_type: &str,
    scope: &ModuleScope<'_>,
    imports: &mut ImportCollector,
) -> Result<String> {
    if !returns.is_array && scope.is_record(returns)? {
        imports.add("psycopg.rows", "class_row");
        Ok(format!("class_row({row_type})"))
    } else {
        imports.add("psycopg.rows", "scalar_row");
        Ok("scalar_row".to_string())
    }
}
