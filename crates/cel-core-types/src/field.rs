//! Mapping schema descriptors to CEL types.
//!
//! Well-known protobuf messages are resolved to their dedicated kinds:
//! - `google.protobuf.Timestamp` -> `Type::Timestamp`
//! - `google.protobuf.Duration` -> `Type::Duration`
//! - `google.protobuf.Any` -> `Type::Any`
//! - Wrapper messages -> the matching wrapper kind
//! - `google.protobuf.Struct` -> `map(string, dyn)`
//! - `google.protobuf.ListValue` -> `list(dyn)`
//! - `google.protobuf.Value` -> `dyn`
//!
//! Every other message becomes a schema-backed [`StructType`].

use prost_reflect::{EnumDescriptor, FieldDescriptor, Kind, MessageDescriptor};

use crate::{EnumType, ListType, MapType, MessageType, StructType, Type, TypeKind};

/// Fully qualified name of the protobuf null enum.
pub const NULL_VALUE_ENUM: &str = "google.protobuf.NullValue";

/// Every well-known message with a dedicated CEL type, keyed to that type's
/// kind.
pub const WELL_KNOWN_MESSAGES: [(&str, TypeKind); 15] = [
    ("google.protobuf.Any", TypeKind::Any),
    ("google.protobuf.Duration", TypeKind::Duration),
    ("google.protobuf.Timestamp", TypeKind::Timestamp),
    ("google.protobuf.BoolValue", TypeKind::BoolWrapper),
    ("google.protobuf.Int32Value", TypeKind::IntWrapper),
    ("google.protobuf.Int64Value", TypeKind::IntWrapper),
    ("google.protobuf.UInt32Value", TypeKind::UintWrapper),
    ("google.protobuf.UInt64Value", TypeKind::UintWrapper),
    ("google.protobuf.FloatValue", TypeKind::DoubleWrapper),
    ("google.protobuf.DoubleValue", TypeKind::DoubleWrapper),
    ("google.protobuf.StringValue", TypeKind::StringWrapper),
    ("google.protobuf.BytesValue", TypeKind::BytesWrapper),
    ("google.protobuf.Struct", TypeKind::Map),
    ("google.protobuf.ListValue", TypeKind::List),
    ("google.protobuf.Value", TypeKind::Dyn),
];

/// Returns the dedicated type of a well-known message name, if it has one.
pub fn well_known_message_type(full_name: &str) -> Option<Type> {
    let (_, kind) = WELL_KNOWN_MESSAGES
        .iter()
        .find(|(name, _)| *name == full_name)?;
    let ty = match kind {
        TypeKind::Any => Type::Any,
        TypeKind::Duration => Type::Duration,
        TypeKind::Timestamp => Type::Timestamp,
        TypeKind::BoolWrapper => Type::BoolWrapper,
        TypeKind::IntWrapper => Type::IntWrapper,
        TypeKind::UintWrapper => Type::UintWrapper,
        TypeKind::DoubleWrapper => Type::DoubleWrapper,
        TypeKind::StringWrapper => Type::StringWrapper,
        TypeKind::BytesWrapper => Type::BytesWrapper,
        TypeKind::Map => Type::Map(MapType::json()),
        TypeKind::List => Type::List(ListType::default()),
        _ => Type::Dyn,
    };
    Some(ty)
}

pub(crate) fn is_well_known_message(full_name: &str) -> bool {
    well_known_message_type(full_name).is_some()
}

/// Convert a message descriptor to its CEL type.
pub fn type_from_message_descriptor(descriptor: MessageDescriptor) -> Type {
    match well_known_message_type(descriptor.full_name()) {
        Some(ty) => ty,
        None => Type::Struct(StructType::Message(MessageType::from_checked(descriptor))),
    }
}

/// Convert an enum descriptor to its CEL type.
///
/// `google.protobuf.NullValue` is the `null_type`.
pub fn type_from_enum_descriptor(descriptor: EnumDescriptor) -> Type {
    if descriptor.full_name() == NULL_VALUE_ENUM {
        Type::Null
    } else {
        Type::Enum(EnumType::from_checked(descriptor))
    }
}

/// Convert a single (non-repeated) field kind to its CEL type.
pub fn type_from_kind(kind: Kind) -> Type {
    match kind {
        Kind::Bool => Type::Bool,
        Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 | Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => {
            Type::Int
        }
        Kind::Uint32 | Kind::Fixed32 | Kind::Uint64 | Kind::Fixed64 => Type::Uint,
        Kind::Float | Kind::Double => Type::Double,
        Kind::String => Type::String,
        Kind::Bytes => Type::Bytes,
        Kind::Message(message) => type_from_message_descriptor(message),
        Kind::Enum(enumeration) => type_from_enum_descriptor(enumeration),
    }
}

/// Convert a field descriptor to its CEL type.
///
/// Repeated and map fields produce list and map types that read their
/// parameters straight from the field.
pub fn type_from_field(field: &FieldDescriptor) -> Type {
    if field.is_map() {
        if let Ok(map) = MapType::from_field(field.clone()) {
            return Type::Map(map);
        }
    } else if field.is_list() {
        if let Ok(list) = ListType::from_field(field.clone()) {
            return Type::List(list);
        }
    }
    type_from_kind(field.kind())
}
