//! Struct and enum types.
//!
//! Schema-backed types wrap `prost_reflect` descriptors and compare by their
//! fully qualified name. Well-known protobuf types have dedicated [`Type`]
//! kinds, so they are rejected here.
//!
//! [`Type`]: crate::Type

use std::sync::Arc;

use prost_reflect::{EnumDescriptor, MessageDescriptor};

use crate::field::{is_well_known_message, NULL_VALUE_ENUM};
use crate::TypeError;

/// A message type backed by a schema descriptor.
#[derive(Debug, Clone)]
pub struct MessageType(MessageDescriptor);

impl MessageType {
    /// Create a message type from a descriptor.
    ///
    /// Fails for well-known messages such as `google.protobuf.Duration`;
    /// those map to dedicated kinds via
    /// [`type_from_message_descriptor`](crate::type_from_message_descriptor).
    pub fn new(descriptor: MessageDescriptor) -> Result<Self, TypeError> {
        if is_well_known_message(descriptor.full_name()) {
            return Err(TypeError::WellKnownDescriptor {
                name: descriptor.full_name().to_string(),
            });
        }
        Ok(MessageType(descriptor))
    }

    pub(crate) fn from_checked(descriptor: MessageDescriptor) -> Self {
        MessageType(descriptor)
    }

    /// Returns the fully qualified message name.
    pub fn name(&self) -> &str {
        self.0.full_name()
    }

    /// Returns the message descriptor.
    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.0
    }
}

/// A struct type known only by name, with no schema behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasicStructType(Arc<str>);

impl BasicStructType {
    /// Create a name-only struct type.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        BasicStructType(name.into())
    }

    /// Returns the struct name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A message type, schema-backed or name-only.
///
/// Equality compares qualified names only, so a `Basic` struct equals the
/// `Message` struct of the same name.
#[derive(Debug, Clone)]
pub enum StructType {
    Message(MessageType),
    Basic(BasicStructType),
}

impl StructType {
    /// Returns the fully qualified struct name.
    pub fn name(&self) -> &str {
        match self {
            StructType::Message(message) => message.name(),
            StructType::Basic(basic) => basic.name(),
        }
    }

    /// Returns the schema-backed message type, if any.
    pub fn as_message(&self) -> Option<&MessageType> {
        match self {
            StructType::Message(message) => Some(message),
            StructType::Basic(_) => None,
        }
    }
}

impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for StructType {}

impl From<MessageType> for StructType {
    fn from(message: MessageType) -> Self {
        StructType::Message(message)
    }
}

impl From<BasicStructType> for StructType {
    fn from(basic: BasicStructType) -> Self {
        StructType::Basic(basic)
    }
}

/// An enum type backed by a schema descriptor.
#[derive(Debug, Clone)]
pub struct EnumType(EnumDescriptor);

impl EnumType {
    /// Create an enum type from a descriptor.
    ///
    /// Fails for `google.protobuf.NullValue`, which is the `null_type`.
    pub fn new(descriptor: EnumDescriptor) -> Result<Self, TypeError> {
        if descriptor.full_name() == NULL_VALUE_ENUM {
            return Err(TypeError::WellKnownDescriptor {
                name: descriptor.full_name().to_string(),
            });
        }
        Ok(EnumType(descriptor))
    }

    pub(crate) fn from_checked(descriptor: EnumDescriptor) -> Self {
        EnumType(descriptor)
    }

    /// Returns the fully qualified enum name.
    pub fn name(&self) -> &str {
        self.0.full_name()
    }

    /// Returns the enum descriptor.
    pub fn descriptor(&self) -> &EnumDescriptor {
        &self.0
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for EnumType {}
