//! Python statements.

use pgpy_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A statement inside a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// A simple statement on one line (`conn.commit()`, `raise`).
    Simple(String),
    /// A compound statement: header line and indented body (`try:`, `if x:`).
    Compound { header: String, body: Vec<Stmt> },
    /// A call with one argument per line and trailing commas.
    Call { callee: String, args: Vec<String> },
}

impl Stmt {
    pub fn simple(line: impl Into<String>) -> Self {
        Self::Simple(line.into())
    }

    pub fn compound(header: impl Into<String>, body: Vec<Stmt>) -> Self {
        Self::Compound {
            header: header.into(),
            body,
        }
    }

    /// `callee` may carry an assignment target: `rows = cur.execute`.
    pub fn call<I, S>(callee: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Call {
            callee: callee.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn fragment(&self) -> CodeFragment {
        match self {
            Stmt::Simple(line) => CodeFragment::line(line.as_str()),
            Stmt::Compound { header, body } => CodeFragment::block(
                header.as_str(),
                body.iter().map(Stmt::fragment).collect(),
            ),
            Stmt::Call { callee, args } => CodeFragment::block_with_close(
                format!("{callee}("),
                args.iter()
                    .map(|arg| CodeFragment::line(format!("{arg},")))
                    .collect(),
                ")",
            ),
        }
    }
}

impl Renderable for Stmt {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.fragment()]
    }
}

/// A module-level assignment: `Email = str`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assign {
    pub target: String,
    pub value: String,
}

impl Assign {
    pub fn new(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::python();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Assign {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(format!("{} = {}", self.target, self.value))]
    }
}
