//! Conversion between `Type` and the proto `cel.expr.Type`.
//!
//! ## Proto Round-Trip Limitations
//!
//! Six message names are resolved to dedicated kinds on input and are written
//! back in their dedicated form, not as message names:
//!
//! | message name                | type              | written back as   |
//! |-----------------------------|-------------------|-------------------|
//! | `google.protobuf.Any`       | `any`             | `well_known: ANY` |
//! | `google.protobuf.Timestamp` | `timestamp`       | `well_known`      |
//! | `google.protobuf.Duration`  | `duration`        | `well_known`      |
//! | `google.protobuf.Struct`    | `map(string, dyn)`| `map_type`        |
//! | `google.protobuf.ListValue` | `list(dyn)`       | `list_type`       |
//! | `google.protobuf.Value`     | `dyn`             | `dyn`             |
//!
//! Wrapper message names resolve through the registry and are written back
//! as `wrapper`.
//!
//! The wire format has no enum kind (enum values are ints) and no way to
//! express `*unknown*`; both fail to serialize, as does any function type.

use prost_reflect::DescriptorPool;
use tracing::debug;

use cel_core_types::{
    type_from_message_descriptor, well_known_message_type, Type, TypeError, TypeKind, TypePool,
    TypeParameters, TypeType,
};

use crate::gen::cel::expr::r#type::{
    AbstractType as ProtoAbstractType, ListType as ProtoListType, MapType as ProtoMapType,
    PrimitiveType as ProtoPrimitiveType, TypeKind as ProtoTypeKind,
    WellKnownType as ProtoWellKnownType,
};
use crate::gen::cel::expr::Type as ProtoType;

const PRIMITIVE_TYPE_ENUM: &str = "cel.expr.Type.PrimitiveType";
const WELL_KNOWN_TYPE_ENUM: &str = "cel.expr.Type.WellKnownType";
const NULL_VALUE_ENUM: &str = "google.protobuf.NullValue";

/// Convert a proto Type to a `Type`.
///
/// Message names are looked up in `descriptors`; compound types are interned
/// in `pool`. Nested types are converted from an explicit stack, so the
/// nesting depth is bounded only by memory.
pub fn type_from_proto(
    proto: &ProtoType,
    descriptors: &DescriptorPool,
    pool: &TypePool,
) -> Result<Type, TypeError> {
    let mut stack = vec![Decoding::open(proto)?];
    let mut decoded = Type::Dyn;
    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.next_child() {
            let child = Decoding::open(child)?;
            stack.push(child);
            continue;
        }
        let ty = frame.finish(descriptors, pool)?;
        stack.pop();
        match stack.last_mut() {
            Some(parent) => parent.built.push(ty),
            None => decoded = ty,
        }
    }
    Ok(decoded)
}

/// A wire node whose children are being converted.
struct Decoding<'a> {
    kind: &'a ProtoTypeKind,
    children: Vec<&'a ProtoType>,
    built: Vec<Type>,
}

impl<'a> Decoding<'a> {
    /// Check that the node is complete and collect its nested types.
    fn open(proto: &'a ProtoType) -> Result<Self, TypeError> {
        let kind = proto
            .type_kind
            .as_ref()
            .ok_or_else(|| rejected(TypeError::malformed("type_kind is not set")))?;
        let children = match kind {
            ProtoTypeKind::ListType(list) => {
                vec![required(list.elem_type.as_deref(), "list_type.elem_type")?]
            }
            ProtoTypeKind::MapType(map) => vec![
                required(map.key_type.as_deref(), "map_type.key_type")?,
                required(map.value_type.as_deref(), "map_type.value_type")?,
            ],
            ProtoTypeKind::Type(inner) if inner.type_kind.is_some() => vec![&**inner],
            ProtoTypeKind::AbstractType(abstract_type) => {
                abstract_type.parameter_types.iter().collect()
            }
            _ => Vec::new(),
        };
        Ok(Decoding {
            kind,
            built: Vec::with_capacity(children.len()),
            children,
        })
    }

    fn next_child(&self) -> Option<&'a ProtoType> {
        self.children.get(self.built.len()).copied()
    }

    /// Build the node from its converted children.
    fn finish(&mut self, descriptors: &DescriptorPool, pool: &TypePool) -> Result<Type, TypeError> {
        let mut built = std::mem::take(&mut self.built).into_iter();
        match self.kind {
            ProtoTypeKind::Dyn(()) => Ok(Type::Dyn),
            ProtoTypeKind::Error(()) => Ok(Type::Error),
            ProtoTypeKind::Null(value) => {
                if *value == prost_types::NullValue::NullValue as i32 {
                    Ok(Type::Null)
                } else {
                    Err(rejected(TypeError::InvalidEnumValue {
                        enum_name: NULL_VALUE_ENUM,
                        value: *value,
                    }))
                }
            }
            ProtoTypeKind::Primitive(value) => primitive_from_proto(*value),
            ProtoTypeKind::Wrapper(value) => primitive_from_proto(*value).map(|ty| ty.wrap()),
            ProtoTypeKind::WellKnown(value) => match ProtoWellKnownType::try_from(*value) {
                Ok(ProtoWellKnownType::Any) => Ok(Type::Any),
                Ok(ProtoWellKnownType::Timestamp) => Ok(Type::Timestamp),
                Ok(ProtoWellKnownType::Duration) => Ok(Type::Duration),
                Ok(ProtoWellKnownType::Unspecified) | Err(_) => {
                    Err(rejected(TypeError::InvalidEnumValue {
                        enum_name: WELL_KNOWN_TYPE_ENUM,
                        value: *value,
                    }))
                }
            },
            ProtoTypeKind::ListType(_) => {
                let elem = built.next().unwrap_or_default();
                Ok(Type::List(pool.make_list_type(elem)))
            }
            ProtoTypeKind::MapType(_) => {
                let key = built.next().unwrap_or_default();
                let value = built.next().unwrap_or_default();
                Ok(Type::Map(pool.make_map_type(key, value)))
            }
            ProtoTypeKind::Function(_) => Err(rejected(TypeError::malformed(
                "function types have no wire form",
            ))),
            ProtoTypeKind::MessageType(name) => message_type_from_name(name, descriptors),
            ProtoTypeKind::TypeParam(name) => Ok(Type::TypeParam(pool.make_type_param_type(name))),
            ProtoTypeKind::Type(_) => match built.next() {
                Some(inner) => Ok(Type::Type(pool.make_type_type(inner))),
                None => Ok(Type::Type(TypeType::default())),
            },
            ProtoTypeKind::AbstractType(abstract_type) => {
                let params: Vec<Type> = built.collect();
                Ok(Type::Opaque(
                    pool.make_opaque_type(&abstract_type.name, &params),
                ))
            }
        }
    }
}

/// Convert a `Type` to a proto Type.
///
/// Like [`type_from_proto`], nested types are converted from an explicit
/// stack.
pub fn type_to_proto(ty: &Type) -> Result<ProtoType, TypeError> {
    let mut stack = vec![Encoding::open(ty.clone())];
    let mut encoded = ProtoType::default();
    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.next_child() {
            stack.push(Encoding::open(child));
            continue;
        }
        let proto = frame.finish()?;
        stack.pop();
        match stack.last_mut() {
            Some(parent) => parent.built.push(proto),
            None => encoded = proto,
        }
    }
    Ok(encoded)
}

/// A type whose children are being converted.
struct Encoding {
    ty: Type,
    children: TypeParameters,
    built: Vec<ProtoType>,
}

impl Encoding {
    fn open(ty: Type) -> Self {
        let children = match &ty {
            Type::List(_) | Type::Map(_) | Type::Opaque(_) | Type::Type(_) => ty.parameters(),
            _ => TypeParameters::empty(),
        };
        Encoding {
            built: Vec::with_capacity(children.len()),
            children,
            ty,
        }
    }

    fn next_child(&self) -> Option<Type> {
        self.children.get(self.built.len()).cloned()
    }

    fn finish(&mut self) -> Result<ProtoType, TypeError> {
        let mut built = std::mem::take(&mut self.built).into_iter();
        let kind = match &self.ty {
            Type::Dyn => ProtoTypeKind::Dyn(()),
            Type::Error => ProtoTypeKind::Error(()),
            Type::Null => ProtoTypeKind::Null(prost_types::NullValue::NullValue as i32),
            Type::Any => ProtoTypeKind::WellKnown(ProtoWellKnownType::Any as i32),
            Type::Timestamp => ProtoTypeKind::WellKnown(ProtoWellKnownType::Timestamp as i32),
            Type::Duration => ProtoTypeKind::WellKnown(ProtoWellKnownType::Duration as i32),
            ty @ (Type::Bool | Type::Int | Type::Uint | Type::Double | Type::String | Type::Bytes) => {
                ProtoTypeKind::Primitive(primitive_to_proto(ty) as i32)
            }
            ty @ (Type::BoolWrapper
            | Type::IntWrapper
            | Type::UintWrapper
            | Type::DoubleWrapper
            | Type::StringWrapper
            | Type::BytesWrapper) => {
                ProtoTypeKind::Wrapper(primitive_to_proto(&ty.unwrap()) as i32)
            }
            Type::List(_) => ProtoTypeKind::ListType(Box::new(ProtoListType {
                elem_type: built.next().map(Box::new),
            })),
            Type::Map(_) => ProtoTypeKind::MapType(Box::new(ProtoMapType {
                key_type: built.next().map(Box::new),
                value_type: built.next().map(Box::new),
            })),
            Type::Opaque(opaque) => ProtoTypeKind::AbstractType(ProtoAbstractType {
                name: opaque.name().to_string(),
                parameter_types: built.collect(),
            }),
            Type::Type(_) => ProtoTypeKind::Type(Box::new(built.next().unwrap_or_default())),
            Type::TypeParam(param) => ProtoTypeKind::TypeParam(param.name().to_string()),
            Type::Struct(structure) => ProtoTypeKind::MessageType(structure.name().to_string()),
            ty @ (Type::Unknown | Type::Enum(_) | Type::Function(_)) => {
                return Err(rejected(TypeError::Unsupported { kind: ty.kind() }));
            }
        };
        Ok(ProtoType {
            type_kind: Some(kind),
        })
    }
}

/// Resolve a `message_type` name, shortcutting the JSON and time types.
///
/// Wrapper messages are only resolved when the registry knows them.
fn message_type_from_name(name: &str, descriptors: &DescriptorPool) -> Result<Type, TypeError> {
    if let Some(ty) = well_known_message_type(name).filter(|ty| !ty.kind().is_wrapper()) {
        return Ok(ty);
    }
    descriptors
        .get_message_by_name(name)
        .map(type_from_message_descriptor)
        .ok_or_else(|| {
            rejected(TypeError::UnknownMessage {
                name: name.to_string(),
            })
        })
}

fn primitive_from_proto(value: i32) -> Result<Type, TypeError> {
    match ProtoPrimitiveType::try_from(value) {
        Ok(ProtoPrimitiveType::Bool) => Ok(Type::Bool),
        Ok(ProtoPrimitiveType::Int64) => Ok(Type::Int),
        Ok(ProtoPrimitiveType::Uint64) => Ok(Type::Uint),
        Ok(ProtoPrimitiveType::Double) => Ok(Type::Double),
        Ok(ProtoPrimitiveType::String) => Ok(Type::String),
        Ok(ProtoPrimitiveType::Bytes) => Ok(Type::Bytes),
        Ok(ProtoPrimitiveType::Unspecified) | Err(_) => Err(rejected(TypeError::InvalidEnumValue {
            enum_name: PRIMITIVE_TYPE_ENUM,
            value,
        })),
    }
}

/// Only called with the six primitive kinds.
fn primitive_to_proto(ty: &Type) -> ProtoPrimitiveType {
    match ty.kind() {
        TypeKind::Bool => ProtoPrimitiveType::Bool,
        TypeKind::Int => ProtoPrimitiveType::Int64,
        TypeKind::Uint => ProtoPrimitiveType::Uint64,
        TypeKind::Double => ProtoPrimitiveType::Double,
        TypeKind::String => ProtoPrimitiveType::String,
        TypeKind::Bytes => ProtoPrimitiveType::Bytes,
        _ => ProtoPrimitiveType::Unspecified,
    }
}

fn required<'a>(field: Option<&'a ProtoType>, name: &str) -> Result<&'a ProtoType, TypeError> {
    field.ok_or_else(|| rejected(TypeError::malformed(format!("{name} is not set"))))
}

fn rejected(err: TypeError) -> TypeError {
    debug!(error = %err, "rejected type conversion");
    err
}
