//! Error types for the type model.

use thiserror::Error;

use crate::TypeKind;

/// Coarse classification of a [`TypeError`].
///
/// Checkers surface these as diagnostic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Bad input: unknown schema names, malformed wire types, bad enum values.
    InvalidArgument,
    /// A declaration with the same identity is already present.
    AlreadyExists,
    /// The operation cannot be expressed for the given type.
    Internal,
}

/// Errors produced while constructing, converting or declaring types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A message name was not found in the schema registry.
    #[error("unknown message type: {name}")]
    UnknownMessage { name: String },

    /// A wire enum carried a number outside its declared set.
    #[error("invalid {enum_name} value: {value}")]
    InvalidEnumValue { enum_name: &'static str, value: i32 },

    /// A wire type was missing a required part.
    #[error("malformed type: {message}")]
    Malformed { message: String },

    /// A serialized descriptor set could not be decoded or registered.
    #[error("invalid descriptor set: {message}")]
    InvalidDescriptor { message: String },

    /// A well-known descriptor was used where a schema-backed type is required.
    #[error("well-known type cannot back a schema type: {name}")]
    WellKnownDescriptor { name: String },

    /// An overload with this id is already declared.
    #[error("overload already exists: {id}")]
    OverloadExists { id: String },

    /// Two overloads of the same function accept overlapping arguments.
    #[error("overload signature collision: {existing} collides with {candidate}")]
    OverloadCollision { existing: String, candidate: String },

    /// The type has no representation in the requested form.
    #[error("unsupported type kind: {kind}")]
    Unsupported { kind: TypeKind },
}

impl TypeError {
    /// Create a malformed-type error.
    pub fn malformed(message: impl Into<String>) -> Self {
        TypeError::Malformed {
            message: message.into(),
        }
    }

    /// Returns the status classification of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TypeError::UnknownMessage { .. }
            | TypeError::InvalidEnumValue { .. }
            | TypeError::Malformed { .. }
            | TypeError::InvalidDescriptor { .. }
            | TypeError::WellKnownDescriptor { .. }
            | TypeError::OverloadCollision { .. } => ErrorCode::InvalidArgument,
            TypeError::OverloadExists { .. } => ErrorCode::AlreadyExists,
            TypeError::Unsupported { .. } => ErrorCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        let err = TypeError::UnknownMessage {
            name: "a.B".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert_eq!(err.to_string(), "unknown message type: a.B");

        let err = TypeError::OverloadExists {
            id: "f_int".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::AlreadyExists);

        let err = TypeError::Unsupported {
            kind: TypeKind::Function,
        };
        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(err.to_string(), "unsupported type kind: function");
    }
}
