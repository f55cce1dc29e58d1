//! Python function builder.

use pgpy_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{LINE_WIDTH, Stmt};

/// An annotated function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    fn render(&self) -> String {
        format!("{}: {}", self.name, self.ty)
    }
}

/// Builder for module-level `def` statements.
///
/// The signature stays on one line while it fits; otherwise every parameter
/// gets its own line with a trailing comma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Def {
    name: String,
    params: Vec<Param>,
    returns: Option<String>,
    body: Vec<Stmt>,
}

impl Def {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: None,
            body: Vec::new(),
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    pub fn stmt(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    pub fn stmts(mut self, stmts: impl IntoIterator<Item = Stmt>) -> Self {
        self.body.extend(stmts);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::python();
        builder.emit(self);
        builder.build()
    }

    fn return_annotation(&self) -> String {
        match &self.returns {
            Some(ty) => format!(" -> {ty}:"),
            None => ":".to_string(),
        }
    }
}

impl Renderable for Def {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let body: Vec<CodeFragment> = if self.body.is_empty() {
            vec![CodeFragment::line("pass")]
        } else {
            self.body.iter().flat_map(Renderable::to_fragments).collect()
        };

        let params: Vec<String> = self.params.iter().map(Param::render).collect();
        let single = format!(
            "def {}({}){}",
            self.name,
            params.join(", "),
            self.return_annotation()
        );
        if single.len() <= LINE_WIDTH {
            return vec![CodeFragment::block(single, body)];
        }

        vec![
            CodeFragment::line(format!("def {}(", self.name)),
            CodeFragment::indent(
                params
                    .into_iter()
                    .map(|p| CodeFragment::line(format!("{p},")))
                    .collect(),
            ),
            CodeFragment::block(format!("){}", self.return_annotation()), body),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_signature_stays_on_one_line() {
        let f = Def::new("register_types")
            .param(Param::new("conn", "Connection"))
            .returns("None")
            .stmt(Stmt::simple("pass"))
            .build();
        assert_eq!(f, "def register_types(conn: Connection) -> None:\n    pass\n");
    }

    #[test]
    fn test_long_signature_is_exploded() {
        let f = Def::new("register_composite_domain_type")
            .param(Param::new("conn", "Connection"))
            .param(Param::new("domain_name", "str"))
            .param(Param::new("underlying_type_name", "str"))
            .param(Param::new("factory", "type"))
            .returns("None")
            .stmt(Stmt::simple("pass"))
            .build();
        assert_eq!(
            f,
            "def register_composite_domain_type(\n    conn: Connection,\n    domain_name: str,\n    underlying_type_name: str,\n    factory: type,\n) -> None:\n    pass\n"
        );
    }

    #[test]
    fn test_empty_body_is_pass() {
        let f = Def::new("noop").build();
        assert_eq!(f, "def noop():\n    pass\n");
    }
}
