use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for pgpy-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Wraps the statement being extracted so error factories don't need the
/// text threaded through every call.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(statement, "statement");
/// ctx.missing_type("type field", "address", "street", span);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    name: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            name: name.into(),
        }
    }

    /// Get the source text.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.src.clone())
    }

    /// A field or argument clause that has a name but no type.
    pub fn missing_type(
        &self,
        context: &'static str,
        owner: impl Into<String>,
        clause: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::MissingType {
            src: self.named_source(),
            span: span.into(),
            context,
            owner: owner.into(),
            clause: clause.into(),
        })
    }

    /// An opening parenthesis without its closing partner.
    pub fn unbalanced(&self, owner: impl Into<String>, open: usize) -> Box<Error> {
        Box::new(Error::Unbalanced {
            src: self.named_source(),
            span: SourceSpan::from((open, 1)),
            owner: owner.into(),
        })
    }

    /// A function definition without a usable RETURNS clause.
    pub fn missing_return(&self, function: impl Into<String>) -> Box<Error> {
        Box::new(Error::MissingReturn {
            src: self.named_source(),
            function: function.into(),
        })
    }

    /// A RETURNS clause whose shape has no binding.
    pub fn unsupported_return(
        &self,
        function: impl Into<String>,
        found: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnsupportedReturn {
            src: self.named_source(),
            span: span.into(),
            function: function.into(),
            found: found.into(),
        })
    }

    /// A domain whose AS clause names no type.
    pub fn missing_domain_type(&self, domain: impl Into<String>) -> Box<Error> {
        Box::new(Error::MissingDomainType {
            src: self.named_source(),
            domain: domain.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{context} '{clause}' in '{owner}' has no type")]
    #[diagnostic(
        code(pgpy::missing_type),
        help("write each {context} as `<name> <type>`")
    )]
    MissingType {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a type after this name")]
        span: SourceSpan,
        context: &'static str,
        owner: String,
        clause: String,
    },

    #[error("unterminated parenthesis in the definition of '{owner}'")]
    #[diagnostic(code(pgpy::unbalanced))]
    Unbalanced {
        #[source_code]
        src: NamedSource<String>,
        #[label("opened here")]
        span: SourceSpan,
        owner: String,
    },

    #[error("function '{function}' has no return type")]
    #[diagnostic(
        code(pgpy::missing_return),
        help("add `RETURNS <type>` after the argument list")
    )]
    MissingReturn {
        #[source_code]
        src: NamedSource<String>,
        function: String,
    },

    #[error("function '{function}' returns '{found}', which has no binding")]
    #[diagnostic(
        code(pgpy::unsupported_return),
        help("declare a composite type for the row and return `SETOF` that type")
    )]
    UnsupportedReturn {
        #[source_code]
        src: NamedSource<String>,
        #[label("unsupported return")]
        span: SourceSpan,
        function: String,
        found: String,
    },

    #[error("domain '{domain}' has no underlying type")]
    #[diagnostic(code(pgpy::missing_domain_type), help("write `CREATE DOMAIN <name> AS <type>`"))]
    MissingDomainType {
        #[source_code]
        src: NamedSource<String>,
        domain: String,
    },
}
