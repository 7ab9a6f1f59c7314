//! Common test utilities for cel-core-proto integration tests.

use cel_core_proto::gen::cel::expr::r#type::{
    AbstractType, ListType, MapType, PrimitiveType, TypeKind, WellKnownType,
};
use cel_core_proto::Type;
use prost_reflect::prost_types::field_descriptor_proto::{Label, Type as FieldType};
use prost_reflect::prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto,
};
use prost_reflect::DescriptorPool;

/// The global pool plus `telemetry.v1.Reading { double value = 1; }` and
/// `telemetry.v1.Unit { UNIT_UNSPECIFIED = 0; }`.
#[allow(dead_code)]
pub fn telemetry_pool() -> DescriptorPool {
    let file = FileDescriptorProto {
        name: Some("telemetry/v1/reading.proto".to_string()),
        package: Some("telemetry.v1".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![DescriptorProto {
            name: Some("Reading".to_string()),
            field: vec![FieldDescriptorProto {
                name: Some("value".to_string()),
                number: Some(1),
                label: Some(Label::Optional as i32),
                r#type: Some(FieldType::Double as i32),
                ..Default::default()
            }],
            ..Default::default()
        }],
        enum_type: vec![EnumDescriptorProto {
            name: Some("Unit".to_string()),
            value: vec![EnumValueDescriptorProto {
                name: Some("UNIT_UNSPECIFIED".to_string()),
                number: Some(0),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    };
    let mut pool = DescriptorPool::global();
    pool.add_file_descriptor_proto(file)
        .expect("telemetry schema registers");
    pool
}

#[allow(dead_code)]
pub fn wire(kind: TypeKind) -> Type {
    Type {
        type_kind: Some(kind),
    }
}

#[allow(dead_code)]
pub fn primitive(primitive: PrimitiveType) -> Type {
    wire(TypeKind::Primitive(primitive as i32))
}

#[allow(dead_code)]
pub fn well_known(well_known: WellKnownType) -> Type {
    wire(TypeKind::WellKnown(well_known as i32))
}

#[allow(dead_code)]
pub fn message(name: &str) -> Type {
    wire(TypeKind::MessageType(name.to_string()))
}

#[allow(dead_code)]
pub fn list(elem: Type) -> Type {
    wire(TypeKind::ListType(Box::new(ListType {
        elem_type: Some(Box::new(elem)),
    })))
}

#[allow(dead_code)]
pub fn map(key: Type, value: Type) -> Type {
    wire(TypeKind::MapType(Box::new(MapType {
        key_type: Some(Box::new(key)),
        value_type: Some(Box::new(value)),
    })))
}

#[allow(dead_code)]
pub fn abstract_type(name: &str, params: Vec<Type>) -> Type {
    wire(TypeKind::AbstractType(AbstractType {
        name: name.to_string(),
        parameter_types: params,
    }))
}
