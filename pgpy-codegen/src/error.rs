use thiserror::Error;

/// Result type for pgpy-codegen operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("'{name}' is defined in '{existing}' and again in '{module}'")]
    DuplicateSymbol {
        name: String,
        existing: String,
        module: String,
    },

    /// A type was referenced before any processed file defined it.
    #[error("unknown type '{name}': it must be defined in a type file processed earlier")]
    UnknownSymbol { name: String },

    #[error("cannot emit '{object}': {reason}")]
    EmissionInvariant { object: String, reason: String },
}

impl Error {
    pub fn emission(object: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::EmissionInvariant {
            object: object.into(),
            reason: reason.into(),
        }
    }
}
