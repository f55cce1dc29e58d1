//! Python dataclass builder.

use pgpy_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// An annotated class attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A `@dataclass` class with annotated fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataclass {
    name: String,
    fields: Vec<Field>,
}

impl Dataclass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Build the class as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::python();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Dataclass {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let body = if self.fields.is_empty() {
            vec![CodeFragment::line("pass")]
        } else {
            self.fields
                .iter()
                .map(|f| CodeFragment::line(format!("{}: {}", f.name, f.ty)))
                .collect()
        };

        vec![
            CodeFragment::line("@dataclass"),
            CodeFragment::block(format!("class {}:", self.name), body),
        ]
    }
}
