//! Name resolution for types, struct fields and enum constants.
//!
//! A [`TypeIntrospector`] answers the checker's questions about names it
//! does not know: what type `acme.Order` is, what field `total` of that
//! message looks like, and which number `acme.Status.ACTIVE` carries. An
//! unresolved name is `Ok(None)`, never an error.
//!
//! Implementors override the `*_impl` hooks. The provided methods answer the
//! built-in names (`int`, `list`, `google.protobuf.Duration`, ...) before any
//! hook runs.

use prost_reflect::FieldDescriptor;
use tracing::trace;

use cel_core_types::{type_from_field, Type, TypeError};

use crate::well_known::{find_well_known_enum_constant, find_well_known_type};

/// A resolved enum value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    /// The enum's type (`null_type` for `google.protobuf.NullValue`).
    pub enum_type: Type,
    /// Fully qualified enum name.
    pub type_full_name: String,
    /// Name of the value within the enum.
    pub value_name: String,
    /// Numeric value.
    pub number: i32,
}

/// A field of a struct type.
#[derive(Debug, Clone)]
pub enum StructTypeField {
    /// A field read from a message descriptor.
    Message(FieldDescriptor),
    /// A field declared without a schema.
    Basic {
        name: String,
        number: i32,
        field_type: Type,
    },
}

impl StructTypeField {
    /// The field name.
    pub fn name(&self) -> &str {
        match self {
            StructTypeField::Message(field) => field.name(),
            StructTypeField::Basic { name, .. } => name,
        }
    }

    /// The field number, or 0 when unknown.
    pub fn number(&self) -> i32 {
        match self {
            StructTypeField::Message(field) => field.number() as i32,
            StructTypeField::Basic { number, .. } => *number,
        }
    }

    /// The CEL type of the field.
    pub fn field_type(&self) -> Type {
        match self {
            StructTypeField::Message(field) => type_from_field(field),
            StructTypeField::Basic { field_type, .. } => field_type.clone(),
        }
    }
}

/// Resolves type, field and enum constant names.
pub trait TypeIntrospector: Send + Sync {
    /// Resolve a type by name.
    fn find_type(&self, name: &str) -> Result<Option<Type>, TypeError> {
        if let Some(ty) = find_well_known_type(name) {
            return Ok(Some(ty));
        }
        self.find_type_impl(name)
    }

    /// Resolve an enum value by enum name and value name.
    fn find_enum_constant(
        &self,
        type_name: &str,
        value_name: &str,
    ) -> Result<Option<EnumConstant>, TypeError> {
        if let Some(constant) = find_well_known_enum_constant(type_name, value_name) {
            return Ok(Some(constant));
        }
        self.find_enum_constant_impl(type_name, value_name)
    }

    /// Resolve a field of a struct type.
    fn find_struct_type_field_by_name(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<Option<StructTypeField>, TypeError> {
        self.find_struct_type_field_by_name_impl(type_name, field_name)
    }

    fn find_type_impl(&self, _name: &str) -> Result<Option<Type>, TypeError> {
        Ok(None)
    }

    fn find_enum_constant_impl(
        &self,
        _type_name: &str,
        _value_name: &str,
    ) -> Result<Option<EnumConstant>, TypeError> {
        Ok(None)
    }

    fn find_struct_type_field_by_name_impl(
        &self,
        _type_name: &str,
        _field_name: &str,
    ) -> Result<Option<StructTypeField>, TypeError> {
        Ok(None)
    }
}

/// An introspector that knows only the built-in names.
#[derive(Debug, Clone, Copy, Default)]
pub struct WellKnownTypeIntrospector;

impl TypeIntrospector for WellKnownTypeIntrospector {}

/// Chains introspectors; the first one to resolve a name wins.
///
/// An error from any provider stops the search and is returned as is.
#[derive(Default)]
pub struct CompositeTypeIntrospector {
    providers: Vec<Box<dyn TypeIntrospector>>,
}

impl CompositeTypeIntrospector {
    /// Create an empty composite. It still resolves the built-in names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider, consulted after those already added.
    pub fn with(mut self, provider: impl TypeIntrospector + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Number of chained providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl TypeIntrospector for CompositeTypeIntrospector {
    fn find_type_impl(&self, name: &str) -> Result<Option<Type>, TypeError> {
        for (index, provider) in self.providers.iter().enumerate() {
            if let Some(ty) = provider.find_type(name)? {
                trace!(name, provider = index, "resolved type");
                return Ok(Some(ty));
            }
        }
        Ok(None)
    }

    fn find_enum_constant_impl(
        &self,
        type_name: &str,
        value_name: &str,
    ) -> Result<Option<EnumConstant>, TypeError> {
        for (index, provider) in self.providers.iter().enumerate() {
            if let Some(constant) = provider.find_enum_constant(type_name, value_name)? {
                trace!(type_name, value_name, provider = index, "resolved enum constant");
                return Ok(Some(constant));
            }
        }
        Ok(None)
    }

    fn find_struct_type_field_by_name_impl(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<Option<StructTypeField>, TypeError> {
        for (index, provider) in self.providers.iter().enumerate() {
            if let Some(field) = provider.find_struct_type_field_by_name(type_name, field_name)? {
                trace!(type_name, field_name, provider = index, "resolved struct field");
                return Ok(Some(field));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cel_core_types::{BasicStructType, StructType};

    /// Knows one name-only struct with one field.
    struct Orders;

    impl TypeIntrospector for Orders {
        fn find_type_impl(&self, name: &str) -> Result<Option<Type>, TypeError> {
            Ok((name == "acme.Order")
                .then(|| Type::from(StructType::from(BasicStructType::new(name)))))
        }

        fn find_struct_type_field_by_name_impl(
            &self,
            type_name: &str,
            field_name: &str,
        ) -> Result<Option<StructTypeField>, TypeError> {
            Ok((type_name == "acme.Order" && field_name == "total").then(|| {
                StructTypeField::Basic {
                    name: "total".to_string(),
                    number: 1,
                    field_type: Type::Double,
                }
            }))
        }
    }

    /// Shadows `acme.Order` with a different shape.
    struct Shadow;

    impl TypeIntrospector for Shadow {
        fn find_type_impl(&self, name: &str) -> Result<Option<Type>, TypeError> {
            Ok((name == "acme.Order").then_some(Type::Dyn))
        }
    }

    /// Fails every lookup.
    struct Broken;

    impl TypeIntrospector for Broken {
        fn find_type_impl(&self, name: &str) -> Result<Option<Type>, TypeError> {
            Err(TypeError::UnknownMessage {
                name: name.to_string(),
            })
        }
    }

    #[test]
    fn built_in_names_resolve_without_providers() {
        let introspector = WellKnownTypeIntrospector;
        assert_eq!(introspector.find_type("uint").unwrap(), Some(Type::Uint));
        assert_eq!(
            introspector
                .find_type("google.protobuf.Timestamp")
                .unwrap(),
            Some(Type::Timestamp)
        );
        assert_eq!(introspector.find_type("acme.Order").unwrap(), None);

        let null = introspector
            .find_enum_constant("google.protobuf.NullValue", "NULL_VALUE")
            .unwrap()
            .unwrap();
        assert_eq!(null.enum_type, Type::Null);
        assert_eq!(null.type_full_name, "google.protobuf.NullValue");
    }

    #[test]
    fn first_provider_wins() {
        let composite = CompositeTypeIntrospector::new().with(Orders).with(Shadow);
        assert_eq!(composite.len(), 2);
        let ty = composite.find_type("acme.Order").unwrap().unwrap();
        assert!(ty.is_struct());

        let reversed = CompositeTypeIntrospector::new().with(Shadow).with(Orders);
        assert_eq!(reversed.find_type("acme.Order").unwrap(), Some(Type::Dyn));

        let field = composite
            .find_struct_type_field_by_name("acme.Order", "total")
            .unwrap()
            .unwrap();
        assert_eq!(field.name(), "total");
        assert_eq!(field.number(), 1);
        assert_eq!(field.field_type(), Type::Double);
        assert!(composite
            .find_struct_type_field_by_name("acme.Order", "missing")
            .unwrap()
            .is_none());
    }

    #[test]
    fn errors_stop_the_search() {
        let composite = CompositeTypeIntrospector::new().with(Broken).with(Orders);
        let err = composite.find_type("acme.Order").unwrap_err();
        assert!(matches!(err, TypeError::UnknownMessage { .. }));

        // Built-in names never reach the providers.
        assert_eq!(composite.find_type("bytes").unwrap(), Some(Type::Bytes));

        let empty = CompositeTypeIntrospector::new();
        assert!(empty.is_empty());
        assert_eq!(empty.find_type("acme.Order").unwrap(), None);
    }
}
