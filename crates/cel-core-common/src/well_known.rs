//! Names every introspector resolves without consulting a schema.

use std::collections::HashMap;
use std::sync::LazyLock;

use cel_core_types::{
    well_known_message_type, ListType, MapType, Type, TypeType, NULL_VALUE_ENUM,
    WELL_KNOWN_MESSAGES,
};

use crate::EnumConstant;

static WELL_KNOWN_TYPES: LazyLock<HashMap<&'static str, Type>> = LazyLock::new(|| {
    let mut types: HashMap<&'static str, Type> = WELL_KNOWN_MESSAGES
        .iter()
        .filter_map(|&(name, _)| Some((name, well_known_message_type(name)?)))
        .collect();
    types.extend([
        (NULL_VALUE_ENUM, Type::Null),
        ("null_type", Type::Null),
        ("bool", Type::Bool),
        ("bytes", Type::Bytes),
        ("double", Type::Double),
        ("dyn", Type::Dyn),
        ("int", Type::Int),
        ("list", Type::List(ListType::default())),
        ("map", Type::Map(MapType::default())),
        ("string", Type::String),
        ("type", Type::Type(TypeType::default())),
        ("uint", Type::Uint),
    ]);
    types
});

/// Resolve a built-in type name.
pub(crate) fn find_well_known_type(name: &str) -> Option<Type> {
    WELL_KNOWN_TYPES.get(name).cloned()
}

/// Resolve `google.protobuf.NullValue.NULL_VALUE`.
pub(crate) fn find_well_known_enum_constant(
    type_name: &str,
    value_name: &str,
) -> Option<EnumConstant> {
    (type_name == NULL_VALUE_ENUM && value_name == "NULL_VALUE").then(|| EnumConstant {
        enum_type: Type::Null,
        type_full_name: NULL_VALUE_ENUM.to_string(),
        value_name: value_name.to_string(),
        number: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_messages() {
        assert_eq!(find_well_known_type("int"), Some(Type::Int));
        assert_eq!(find_well_known_type("google.protobuf.Int32Value"), Some(Type::IntWrapper));
        assert_eq!(find_well_known_type("google.protobuf.Value"), Some(Type::Dyn));
        assert_eq!(find_well_known_type(NULL_VALUE_ENUM), Some(Type::Null));
        assert_eq!(find_well_known_type("null_type"), Some(Type::Null));
        assert!(find_well_known_type("google.protobuf.FieldMask").is_none());
        assert!(find_well_known_type("timestamp").is_none());

        let list = find_well_known_type("list").and_then(|t| t.as_list().cloned());
        assert!(list.is_some_and(|l| ListType::ptr_eq(&l, &ListType::default())));
        let json = find_well_known_type("google.protobuf.Struct").and_then(|t| t.as_map().cloned());
        assert!(json.is_some_and(|m| MapType::ptr_eq(&m, &MapType::json())));
    }

    #[test]
    fn null_value_constant() {
        let constant = find_well_known_enum_constant(NULL_VALUE_ENUM, "NULL_VALUE");
        assert_eq!(constant.map(|c| c.number), Some(0));
        assert!(find_well_known_enum_constant(NULL_VALUE_ENUM, "NULL").is_none());
    }
}
