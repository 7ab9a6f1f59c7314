//! Schema-backed type resolution.
//!
//! This module provides `DescriptorTypeIntrospector`, which wraps a
//! `prost_reflect::DescriptorPool` to resolve message types, enum types,
//! message fields and enum constants by name.

use prost_reflect::prost::Message;
use prost_reflect::prost_types::FileDescriptorSet;
use prost_reflect::{DescriptorPool, EnumDescriptor, MessageDescriptor};
use tracing::debug;

use cel_core_types::{type_from_enum_descriptor, type_from_message_descriptor, Type, TypeError};

use crate::{EnumConstant, StructTypeField, TypeIntrospector};

/// Introspector over a protobuf descriptor pool.
///
/// Well-known messages resolve to their dedicated kinds, so
/// `google.protobuf.Int64Value` is `wrapper(int)` and never a struct.
#[derive(Debug, Clone)]
pub struct DescriptorTypeIntrospector {
    pool: DescriptorPool,
}

impl DescriptorTypeIntrospector {
    /// Create an introspector with the well-known types pre-loaded.
    pub fn new() -> Self {
        Self {
            pool: DescriptorPool::global(),
        }
    }

    /// Create an introspector over an existing descriptor pool.
    pub fn from_pool(pool: DescriptorPool) -> Self {
        Self { pool }
    }

    /// Add file descriptors to the pool.
    ///
    /// The bytes should be a serialized `FileDescriptorSet`. Files already in
    /// the pool are skipped.
    pub fn add_file_descriptor_set(&mut self, bytes: &[u8]) -> Result<(), TypeError> {
        let fds = FileDescriptorSet::decode(bytes).map_err(|err| {
            debug!(error = %err, "rejected file descriptor set");
            TypeError::InvalidDescriptor {
                message: err.to_string(),
            }
        })?;
        self.pool.add_file_descriptor_set(fds).map_err(|err| {
            debug!(error = %err, "rejected file descriptor set");
            TypeError::InvalidDescriptor {
                message: err.to_string(),
            }
        })
    }

    /// Get a message descriptor by fully qualified name.
    pub fn get_message(&self, name: &str) -> Option<MessageDescriptor> {
        self.pool.get_message_by_name(name)
    }

    /// Get an enum descriptor by fully qualified name.
    pub fn get_enum(&self, name: &str) -> Option<EnumDescriptor> {
        self.pool.get_enum_by_name(name)
    }

    /// Resolve a message name relative to a container namespace.
    ///
    /// With container `a.b`, the name `C` is tried as `a.b.C`, then `a.C`,
    /// then `C`.
    pub fn resolve_message_name(&self, name: &str, container: &str) -> Option<String> {
        let mut scope = container;
        while !scope.is_empty() {
            let qualified = format!("{}.{}", scope, name);
            if self.get_message(&qualified).is_some() {
                return Some(qualified);
            }
            scope = scope.rsplit_once('.').map_or("", |(parent, _)| parent);
        }
        self.get_message(name).map(|_| name.to_string())
    }

    /// Get the underlying descriptor pool.
    pub fn pool(&self) -> &DescriptorPool {
        &self.pool
    }
}

impl Default for DescriptorTypeIntrospector {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeIntrospector for DescriptorTypeIntrospector {
    fn find_type_impl(&self, name: &str) -> Result<Option<Type>, TypeError> {
        if let Some(message) = self.get_message(name) {
            return Ok(Some(type_from_message_descriptor(message)));
        }
        Ok(self.get_enum(name).map(type_from_enum_descriptor))
    }

    fn find_enum_constant_impl(
        &self,
        type_name: &str,
        value_name: &str,
    ) -> Result<Option<EnumConstant>, TypeError> {
        let Some(enum_desc) = self.get_enum(type_name) else {
            return Ok(None);
        };
        let Some(value) = enum_desc.get_value_by_name(value_name) else {
            return Ok(None);
        };
        Ok(Some(EnumConstant {
            type_full_name: enum_desc.full_name().to_string(),
            value_name: value.name().to_string(),
            number: value.number(),
            enum_type: type_from_enum_descriptor(enum_desc),
        }))
    }

    fn find_struct_type_field_by_name_impl(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<Option<StructTypeField>, TypeError> {
        Ok(self
            .get_message(type_name)
            .and_then(|message| message.get_field_by_name(field_name))
            .map(StructTypeField::Message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_messages() {
        let introspector = DescriptorTypeIntrospector::new();
        assert_eq!(
            introspector.find_type("google.protobuf.Int64Value").unwrap(),
            Some(Type::IntWrapper)
        );
        let field_mask = introspector
            .find_type("google.protobuf.FieldMask")
            .unwrap()
            .unwrap();
        assert!(field_mask.is_struct());
        assert_eq!(field_mask.name(), "google.protobuf.FieldMask");
    }

    #[test]
    fn test_well_known_fields() {
        let introspector = DescriptorTypeIntrospector::new();
        let paths = introspector
            .find_struct_type_field_by_name("google.protobuf.FieldMask", "paths")
            .unwrap()
            .unwrap();
        assert_eq!(paths.number(), 1);
        let paths_type = paths.field_type();
        assert_eq!(paths_type.as_list().map(|l| l.element()), Some(Type::String));

        let seconds = introspector
            .find_struct_type_field_by_name("google.protobuf.Duration", "seconds")
            .unwrap()
            .unwrap();
        assert_eq!(seconds.field_type(), Type::Int);
    }

    #[test]
    fn test_invalid_descriptor_set() {
        let mut introspector = DescriptorTypeIntrospector::new();
        let err = introspector
            .add_file_descriptor_set(&[0xff, 0xff, 0xff])
            .unwrap_err();
        assert!(matches!(err, TypeError::InvalidDescriptor { .. }));
    }
}
