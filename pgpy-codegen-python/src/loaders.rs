//! psycopg loaders for primitive domains.
//!
//! A domain over a primitive is a distinct type to the driver; registering
//! the primitive's loader for it makes its values load like the primitive.

use pgpy_codegen::types::PrimitiveType;

/// A psycopg loader class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loader {
    pub name: &'static str,
    pub module: &'static str,
}

const INT_LOADER: Loader = Loader {
    name: "IntLoader",
    module: "psycopg.types.numeric",
};
const NUMERIC_LOADER: Loader = Loader {
    name: "NumericLoader",
    module: "psycopg.types.numeric",
};
const TIMESTAMP_LOADER: Loader = Loader {
    name: "TimestampLoader",
    module: "psycopg.types.datetime",
};
const DATE_LOADER: Loader = Loader {
    name: "DateLoader",
    module: "psycopg.types.datetime",
};
const INTERVAL_LOADER: Loader = Loader {
    name: "IntervalLoader",
    module: "psycopg.types.datetime",
};
const DATE_RANGE_LOADER: Loader = Loader {
    name: "DateRangeLoader",
    module: "psycopg.types.range",
};
const BOOL_LOADER: Loader = Loader {
    name: "BoolLoader",
    module: "psycopg.types.bool",
};

/// Every loader a generated module may reference.
pub const LOADERS: [Loader; 7] = [
    INT_LOADER,
    NUMERIC_LOADER,
    TIMESTAMP_LOADER,
    DATE_LOADER,
    INTERVAL_LOADER,
    DATE_RANGE_LOADER,
    BOOL_LOADER,
];

/// Loader for domains over `ty`. Text needs none.
pub fn loader_for(ty: PrimitiveType) -> Option<Loader> {
    match ty {
        PrimitiveType::Integer | PrimitiveType::BigInt => Some(INT_LOADER),
        PrimitiveType::Decimal => Some(NUMERIC_LOADER),
        PrimitiveType::Timestamp => Some(TIMESTAMP_LOADER),
        PrimitiveType::Date => Some(DATE_LOADER),
        PrimitiveType::Interval => Some(INTERVAL_LOADER),
        PrimitiveType::DateRange => Some(DATE_RANGE_LOADER),
        PrimitiveType::Boolean => Some(BOOL_LOADER),
        PrimitiveType::Text | PrimitiveType::Void => None,
    }
}

/// A not-null domain every database is expected to define.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotNullDomain {
    pub name: &'static str,
    pub primitive: PrimitiveType,
}

impl NotNullDomain {
    pub fn loader(&self) -> Option<Loader> {
        loader_for(self.primitive)
    }

    /// `CREATE DOMAIN` statement defining this domain.
    pub fn create_statement(&self) -> String {
        format!(
            "CREATE DOMAIN {} AS {} NOT NULL;",
            self.name,
            self.primitive.as_str().to_ascii_uppercase()
        )
    }

    /// Whether `name` refers to this domain.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// The built-in not-null domains, registered by every `register_types`.
pub const NOT_NULL_DOMAINS: [NotNullDomain; 8] = [
    NotNullDomain {
        name: "text_notnull",
        primitive: PrimitiveType::Text,
    },
    NotNullDomain {
        name: "integer_notnull",
        primitive: PrimitiveType::Integer,
    },
    NotNullDomain {
        name: "bigint_notnull",
        primitive: PrimitiveType::BigInt,
    },
    NotNullDomain {
        name: "decimal_notnull",
        primitive: PrimitiveType::Decimal,
    },
    NotNullDomain {
        name: "timestamp_notnull",
        primitive: PrimitiveType::Timestamp,
    },
    NotNullDomain {
        name: "interval_notnull",
        primitive: PrimitiveType::Interval,
    },
    NotNullDomain {
        name: "daterange_notnull",
        primitive: PrimitiveType::DateRange,
    },
    NotNullDomain {
        name: "boolean_notnull",
        primitive: PrimitiveType::Boolean,
    },
];

/// The built-in domain called `name`, if any.
pub fn builtin_domain(name: &str) -> Option<&'static NotNullDomain> {
    NOT_NULL_DOMAINS.iter().find(|domain| domain.matches(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaders() {
        assert_eq!(loader_for(PrimitiveType::BigInt).unwrap().name, "IntLoader");
        assert_eq!(
            loader_for(PrimitiveType::Timestamp).unwrap().name,
            "TimestampLoader"
        );
        assert_eq!(loader_for(PrimitiveType::Text), None);
    }

    #[test]
    fn test_create_statement() {
        assert_eq!(
            NOT_NULL_DOMAINS[1].create_statement(),
            "CREATE DOMAIN integer_notnull AS INTEGER NOT NULL;"
        );
    }

    #[test]
    fn test_builtin_domain_lookup_ignores_case() {
        assert!(builtin_domain("TEXT_NOTNULL").is_some());
        assert!(builtin_domain("email").is_none());
    }
}
