//! Common test utilities for cel-core-common integration tests.

use prost_reflect::prost::Message;
use prost_reflect::prost_types::field_descriptor_proto::{Label, Type as FieldType};
use prost_reflect::prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet, MessageOptions,
};

fn field(name: &str, number: i32, label: Label, ty: FieldType) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

fn typed_field(
    name: &str,
    number: i32,
    label: Label,
    ty: FieldType,
    type_name: &str,
) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..field(name, number, label, ty)
    }
}

/// A small schema in package `shop.v1`:
///
/// ```text
/// enum Status { STATUS_UNSPECIFIED = 0; STATUS_OPEN = 1; STATUS_CLOSED = 2; }
/// message Order {
///   string id = 1;
///   repeated string tags = 2;
///   map<string, int64> quantities = 3;
///   Status status = 4;
///   google.protobuf.Timestamp placed_at = 5;
///   google.protobuf.Int64Value discount = 6;
///   Customer customer = 7;
///   repeated Customer contacts = 8;
/// }
/// message Customer { string name = 1; }
/// ```
#[allow(dead_code)]
pub fn shop_schema() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("shop/v1/order.proto".to_string()),
        package: Some("shop.v1".to_string()),
        dependency: vec![
            "google/protobuf/timestamp.proto".to_string(),
            "google/protobuf/wrappers.proto".to_string(),
        ],
        syntax: Some("proto3".to_string()),
        message_type: vec![
            DescriptorProto {
                name: Some("Order".to_string()),
                field: vec![
                    field("id", 1, Label::Optional, FieldType::String),
                    field("tags", 2, Label::Repeated, FieldType::String),
                    typed_field(
                        "quantities",
                        3,
                        Label::Repeated,
                        FieldType::Message,
                        ".shop.v1.Order.QuantitiesEntry",
                    ),
                    typed_field("status", 4, Label::Optional, FieldType::Enum, ".shop.v1.Status"),
                    typed_field(
                        "placed_at",
                        5,
                        Label::Optional,
                        FieldType::Message,
                        ".google.protobuf.Timestamp",
                    ),
                    typed_field(
                        "discount",
                        6,
                        Label::Optional,
                        FieldType::Message,
                        ".google.protobuf.Int64Value",
                    ),
                    typed_field(
                        "customer",
                        7,
                        Label::Optional,
                        FieldType::Message,
                        ".shop.v1.Customer",
                    ),
                    typed_field(
                        "contacts",
                        8,
                        Label::Repeated,
                        FieldType::Message,
                        ".shop.v1.Customer",
                    ),
                ],
                nested_type: vec![DescriptorProto {
                    name: Some("QuantitiesEntry".to_string()),
                    field: vec![
                        field("key", 1, Label::Optional, FieldType::String),
                        field("value", 2, Label::Optional, FieldType::Int64),
                    ],
                    options: Some(MessageOptions {
                        map_entry: Some(true),
                        ..Default::default()
                    }),
                    ..Default::default()
                }],
                ..Default::default()
            },
            DescriptorProto {
                name: Some("Customer".to_string()),
                field: vec![field("name", 1, Label::Optional, FieldType::String)],
                ..Default::default()
            },
        ],
        enum_type: vec![EnumDescriptorProto {
            name: Some("Status".to_string()),
            value: ["STATUS_UNSPECIFIED", "STATUS_OPEN", "STATUS_CLOSED"]
                .into_iter()
                .enumerate()
                .map(|(number, name)| EnumValueDescriptorProto {
                    name: Some(name.to_string()),
                    number: Some(number as i32),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// The shop schema as a serialized `FileDescriptorSet`.
#[allow(dead_code)]
pub fn shop_descriptor_set() -> Vec<u8> {
    FileDescriptorSet {
        file: vec![shop_schema()],
    }
    .encode_to_vec()
}
