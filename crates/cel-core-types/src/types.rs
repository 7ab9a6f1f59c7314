//! The CEL type representation.
//!
//! [`Type`] is a closed sum over every type the checker can produce. Leaf
//! kinds are stored inline; compound kinds hold a cheap handle to immutable,
//! shared payload, so cloning a `Type` never copies its children.
//!
//! Equality is structural: two types are equal when they agree on kind, name
//! and parameters. Schema-backed structs and enums compare by qualified name.
//! Every compound payload carries a precomputed fingerprint, which makes
//! hashing O(1) and lets most unequal comparisons return immediately.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::format::format_type_name;
use crate::{
    EnumType, FunctionType, ListType, MapType, OpaqueType, OptionalType, StructType, TypeKind,
    TypeParamType, TypeParameters, TypeType,
};

/// A CEL type.
///
/// The default value is [`Type::Dyn`].
#[derive(Debug, Clone, Default)]
pub enum Type {
    // ==================== Special Types ====================
    /// Dynamic type - assignable from anything
    #[default]
    Dyn,
    /// google.protobuf.Any
    Any,
    /// Error type - produced when inference fails
    Error,
    /// Unknown type - placeholder for partially known values
    Unknown,
    /// The type of `null`
    Null,

    // ==================== Primitives ====================
    /// Boolean type
    Bool,
    /// Signed 64-bit integer
    Int,
    /// Unsigned 64-bit integer
    Uint,
    /// 64-bit floating point
    Double,
    /// Unicode string
    String,
    /// Byte sequence
    Bytes,

    // ==================== Well-known Types ====================
    /// google.protobuf.Duration
    Duration,
    /// google.protobuf.Timestamp
    Timestamp,

    // ==================== Wrapper Types ====================
    /// google.protobuf.BoolValue
    BoolWrapper,
    /// google.protobuf.Int64Value (and Int32Value)
    IntWrapper,
    /// google.protobuf.UInt64Value (and UInt32Value)
    UintWrapper,
    /// google.protobuf.DoubleValue (and FloatValue)
    DoubleWrapper,
    /// google.protobuf.StringValue
    StringWrapper,
    /// google.protobuf.BytesValue
    BytesWrapper,

    // ==================== Compound Types ====================
    /// Homogeneous list: `list(T)`
    List(ListType),
    /// Key-value map: `map(K, V)`
    Map(MapType),
    /// Function signature, used for overload typing
    Function(FunctionType),
    /// Named parametric type, including `optional_type(T)`
    Opaque(OpaqueType),
    /// Type of a type: `type` or `type(T)`
    Type(TypeType),
    /// Free type parameter in a generic signature
    TypeParam(TypeParamType),
    /// Message type, schema-backed or name-only
    Struct(StructType),
    /// Schema-backed enum type
    Enum(EnumType),
}

macro_rules! leaf_predicates {
    ($($is:ident => $variant:ident),* $(,)?) => {
        $(
            #[doc = concat!("Returns true if this is the `", stringify!($variant), "` type.")]
            pub fn $is(&self) -> bool {
                matches!(self, Type::$variant)
            }
        )*
    };
}

macro_rules! compound_casts {
    ($($is:ident, $as:ident => $variant:ident($ty:ty)),* $(,)?) => {
        $(
            #[doc = concat!("Returns true if this is a `", stringify!($variant), "` type.")]
            pub fn $is(&self) -> bool {
                matches!(self, Type::$variant(_))
            }

            #[doc = concat!("Returns the `", stringify!($ty), "` payload, or `None` on a kind mismatch.")]
            pub fn $as(&self) -> Option<&$ty> {
                match self {
                    Type::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        )*
    };
}

macro_rules! compound_conversions {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Type {
                fn from(inner: $ty) -> Self {
                    Type::$variant(inner)
                }
            }

            impl TryFrom<Type> for $ty {
                type Error = Type;

                /// Downcast a `Type`, handing the original back on a kind mismatch.
                fn try_from(ty: Type) -> Result<Self, Type> {
                    match ty {
                        Type::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

compound_conversions! {
    List(ListType),
    Map(MapType),
    Function(FunctionType),
    Opaque(OpaqueType),
    Type(TypeType),
    TypeParam(TypeParamType),
    Struct(StructType),
    Enum(EnumType),
}

impl From<OptionalType> for Type {
    fn from(optional: OptionalType) -> Self {
        Type::Opaque(optional.into_opaque())
    }
}

impl TryFrom<Type> for OptionalType {
    type Error = Type;

    fn try_from(ty: Type) -> Result<Self, Type> {
        match ty {
            Type::Opaque(opaque) => {
                OptionalType::try_from(opaque).map_err(Type::Opaque)
            }
            other => Err(other),
        }
    }
}

// ==================== Introspection ====================

impl Type {
    /// Returns the kind of this type.
    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Dyn => TypeKind::Dyn,
            Type::Any => TypeKind::Any,
            Type::Error => TypeKind::Error,
            Type::Unknown => TypeKind::Unknown,
            Type::Null => TypeKind::Null,
            Type::Bool => TypeKind::Bool,
            Type::Int => TypeKind::Int,
            Type::Uint => TypeKind::Uint,
            Type::Double => TypeKind::Double,
            Type::String => TypeKind::String,
            Type::Bytes => TypeKind::Bytes,
            Type::Duration => TypeKind::Duration,
            Type::Timestamp => TypeKind::Timestamp,
            Type::BoolWrapper => TypeKind::BoolWrapper,
            Type::IntWrapper => TypeKind::IntWrapper,
            Type::UintWrapper => TypeKind::UintWrapper,
            Type::DoubleWrapper => TypeKind::DoubleWrapper,
            Type::StringWrapper => TypeKind::StringWrapper,
            Type::BytesWrapper => TypeKind::BytesWrapper,
            Type::List(_) => TypeKind::List,
            Type::Map(_) => TypeKind::Map,
            Type::Function(_) => TypeKind::Function,
            Type::Opaque(_) => TypeKind::Opaque,
            Type::Type(_) => TypeKind::Type,
            Type::TypeParam(_) => TypeKind::TypeParam,
            Type::Struct(_) => TypeKind::Struct,
            Type::Enum(_) => TypeKind::Enum,
        }
    }

    /// Returns the name of this type.
    ///
    /// Leaf kinds use their CEL or protobuf spelling (`int`,
    /// `google.protobuf.Duration`). Opaque types, type parameters, structs and
    /// enums return their own name. `list`, `map`, `function` and `type` are
    /// returned for the remaining compound kinds.
    pub fn name(&self) -> &str {
        match self {
            Type::Any => "google.protobuf.Any",
            Type::Opaque(opaque) => opaque.name(),
            Type::TypeParam(param) => param.name(),
            Type::Struct(structure) => structure.name(),
            Type::Enum(enumeration) => enumeration.name(),
            other => other.kind().name(),
        }
    }

    /// Returns the child types of this type.
    ///
    /// Lists yield `[element]`, maps `[key, value]`, functions
    /// `[result, args...]`, opaque types their parameters and `type(T)` yields
    /// `[T]`. All other kinds have no parameters.
    pub fn parameters(&self) -> TypeParameters {
        match self {
            Type::List(list) => list.parameters(),
            Type::Map(map) => map.parameters(),
            Type::Function(function) => function.parameters(),
            Type::Opaque(opaque) => opaque.parameters(),
            Type::Type(type_type) => type_type.parameters(),
            _ => TypeParameters::empty(),
        }
    }

    /// Returns the structural fingerprint of this type.
    ///
    /// Equal types always have equal fingerprints.
    pub(crate) fn fingerprint(&self) -> u64 {
        match self {
            Type::List(list) => list.fingerprint(),
            Type::Map(map) => map.fingerprint(),
            Type::Function(function) => function.fingerprint(),
            Type::Opaque(opaque) => opaque.fingerprint(),
            Type::Type(type_type) => type_type.fingerprint(),
            other => structural_fingerprint(other.kind(), other.name(), &[]),
        }
    }

    /// Returns true when both types share the same payload allocation.
    fn same_instance(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::List(a), Type::List(b)) => ListType::ptr_eq(a, b),
            (Type::Map(a), Type::Map(b)) => MapType::ptr_eq(a, b),
            (Type::Function(a), Type::Function(b)) => FunctionType::ptr_eq(a, b),
            (Type::Opaque(a), Type::Opaque(b)) => OpaqueType::ptr_eq(a, b),
            (Type::Type(a), Type::Type(b)) => TypeType::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Hash a type's shape. Children contribute their own fingerprint, so the
/// result is computed in time proportional to the number of direct children.
pub(crate) fn structural_fingerprint(kind: TypeKind, name: &str, params: &[Type]) -> u64 {
    let mut hasher = DefaultHasher::new();
    kind.hash(&mut hasher);
    name.hash(&mut hasher);
    hasher.write_usize(params.len());
    for param in params {
        hasher.write_u64(param.fingerprint());
    }
    hasher.finish()
}

// ==================== Checked Downcasts ====================

impl Type {
    leaf_predicates! {
        is_dyn => Dyn,
        is_any => Any,
        is_error => Error,
        is_unknown => Unknown,
        is_null => Null,
        is_bool => Bool,
        is_int => Int,
        is_uint => Uint,
        is_double => Double,
        is_string => String,
        is_bytes => Bytes,
        is_duration => Duration,
        is_timestamp => Timestamp,
        is_bool_wrapper => BoolWrapper,
        is_int_wrapper => IntWrapper,
        is_uint_wrapper => UintWrapper,
        is_double_wrapper => DoubleWrapper,
        is_string_wrapper => StringWrapper,
        is_bytes_wrapper => BytesWrapper,
    }

    compound_casts! {
        is_list, as_list => List(ListType),
        is_map, as_map => Map(MapType),
        is_function, as_function => Function(FunctionType),
        is_opaque, as_opaque => Opaque(OpaqueType),
        is_type, as_type => Type(TypeType),
        is_type_param, as_type_param => TypeParam(TypeParamType),
        is_struct, as_struct => Struct(StructType),
        is_enum, as_enum => Enum(EnumType),
    }

    /// Returns true if this is `optional_type(T)`.
    pub fn is_optional(&self) -> bool {
        self.as_opaque().is_some_and(OpaqueType::is_optional)
    }

    /// Returns this type viewed as an optional, or `None` if it is not one.
    pub fn as_optional(&self) -> Option<OptionalType> {
        self.as_opaque()
            .and_then(|opaque| OptionalType::try_from(opaque.clone()).ok())
    }

    /// Returns true for the six primitive kinds that have a wrapper.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Type::Bool | Type::Int | Type::Uint | Type::Double | Type::String | Type::Bytes
        )
    }

    /// Returns true for the six nullable-boxed primitive kinds.
    pub fn is_wrapper(&self) -> bool {
        self.kind().is_wrapper()
    }

    /// Returns true for types with a dedicated protobuf well-known meaning.
    pub fn is_well_known(&self) -> bool {
        matches!(self, Type::Any | Type::Duration | Type::Timestamp) || self.is_wrapper()
    }
}

// ==================== Wrapping ====================

impl Type {
    /// Returns the primitive boxed by a wrapper type.
    ///
    /// Every non-wrapper type is returned unchanged.
    pub fn unwrap(&self) -> Type {
        match self {
            Type::BoolWrapper => Type::Bool,
            Type::IntWrapper => Type::Int,
            Type::UintWrapper => Type::Uint,
            Type::DoubleWrapper => Type::Double,
            Type::StringWrapper => Type::String,
            Type::BytesWrapper => Type::Bytes,
            other => other.clone(),
        }
    }

    /// Returns the wrapper type boxing a primitive.
    ///
    /// Every non-primitive type is returned unchanged.
    pub fn wrap(&self) -> Type {
        match self {
            Type::Bool => Type::BoolWrapper,
            Type::Int => Type::IntWrapper,
            Type::Uint => Type::UintWrapper,
            Type::Double => Type::DoubleWrapper,
            Type::String => Type::StringWrapper,
            Type::Bytes => Type::BytesWrapper,
            other => other.clone(),
        }
    }
}

// ==================== Equality & Hashing ====================

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        if !self.kind().is_parameterized() || !other.kind().is_parameterized() {
            return self.kind() == other.kind() && self.name() == other.name();
        }

        let mut pending = vec![(self.clone(), other.clone())];
        while let Some((lhs, rhs)) = pending.pop() {
            if lhs.same_instance(&rhs) {
                continue;
            }
            if lhs.kind() != rhs.kind()
                || lhs.fingerprint() != rhs.fingerprint()
                || lhs.name() != rhs.name()
            {
                return false;
            }
            let lhs_params = lhs.parameters();
            let rhs_params = rhs.parameters();
            if lhs_params.len() != rhs_params.len() {
                return false;
            }
            pending.extend(lhs_params.iter().cloned().zip(rhs_params.iter().cloned()));
        }
        true
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint());
    }
}

// ==================== Release ====================

impl Type {
    /// Give up this handle, moving the children of a payload it solely owns
    /// onto `pending`.
    fn detach_into(self, pending: &mut Vec<Type>) {
        match self {
            Type::List(list) => list.detach_into(pending),
            Type::Map(map) => map.detach_into(pending),
            Type::Function(function) => function.detach_into(pending),
            Type::Opaque(opaque) => opaque.detach_into(pending),
            Type::Type(type_type) => type_type.detach_into(pending),
            _ => {}
        }
    }

    fn owns_children(&self) -> bool {
        matches!(
            self,
            Type::List(_) | Type::Map(_) | Type::Function(_) | Type::Opaque(_) | Type::Type(_)
        )
    }
}

/// Move `child` onto `pending` if it can own further children, leaving
/// `dyn` in its slot.
pub(crate) fn take_child(child: &mut Type, pending: &mut Vec<Type>) {
    if child.owns_children() {
        pending.push(std::mem::take(child));
    }
}

/// Drop detached children one payload at a time.
///
/// A payload released here hands its own children back to the work-list, so
/// dropping a chain of any depth uses constant stack.
pub(crate) fn release_children(mut pending: Vec<Type>) {
    while let Some(ty) = pending.pop() {
        ty.detach_into(&mut pending);
    }
}

// ==================== Display ====================

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_type_name(self))
    }
}
