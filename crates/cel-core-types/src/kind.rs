//! Kind discriminant for CEL types.

use std::fmt;

/// The kind of a [`Type`](crate::Type).
///
/// Every `Type` variant maps to exactly one kind. `optional(T)` is an opaque
/// type and reports [`TypeKind::Opaque`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKind {
    // ==================== Leaf Types ====================
    Dyn,
    Any,
    Error,
    Unknown,
    Null,
    Bool,
    Int,
    Uint,
    Double,
    String,
    Bytes,
    Duration,
    Timestamp,

    // ==================== Wrapper Types ====================
    BoolWrapper,
    IntWrapper,
    UintWrapper,
    DoubleWrapper,
    StringWrapper,
    BytesWrapper,

    // ==================== Compound Types ====================
    List,
    Map,
    Function,
    Opaque,
    Type,
    TypeParam,
    Struct,
    Enum,
}

impl TypeKind {
    /// Returns the diagnostic spelling of this kind.
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::Dyn => "dyn",
            TypeKind::Any => "any",
            TypeKind::Error => "*error*",
            TypeKind::Unknown => "*unknown*",
            TypeKind::Null => "null_type",
            TypeKind::Bool => "bool",
            TypeKind::Int => "int",
            TypeKind::Uint => "uint",
            TypeKind::Double => "double",
            TypeKind::String => "string",
            TypeKind::Bytes => "bytes",
            TypeKind::Duration => "google.protobuf.Duration",
            TypeKind::Timestamp => "google.protobuf.Timestamp",
            TypeKind::BoolWrapper => "google.protobuf.BoolValue",
            TypeKind::IntWrapper => "google.protobuf.Int64Value",
            TypeKind::UintWrapper => "google.protobuf.UInt64Value",
            TypeKind::DoubleWrapper => "google.protobuf.DoubleValue",
            TypeKind::StringWrapper => "google.protobuf.StringValue",
            TypeKind::BytesWrapper => "google.protobuf.BytesValue",
            TypeKind::List => "list",
            TypeKind::Map => "map",
            TypeKind::Function => "function",
            TypeKind::Opaque => "*opaque*",
            TypeKind::Type => "type",
            TypeKind::TypeParam => "type_param",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
        }
    }

    /// Returns true for the six nullable-boxed primitive kinds.
    pub fn is_wrapper(self) -> bool {
        matches!(
            self,
            TypeKind::BoolWrapper
                | TypeKind::IntWrapper
                | TypeKind::UintWrapper
                | TypeKind::DoubleWrapper
                | TypeKind::StringWrapper
                | TypeKind::BytesWrapper
        )
    }

    /// Returns true for kinds whose values carry child types.
    pub fn is_parameterized(self) -> bool {
        matches!(
            self,
            TypeKind::List
                | TypeKind::Map
                | TypeKind::Function
                | TypeKind::Opaque
                | TypeKind::Type
        )
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
