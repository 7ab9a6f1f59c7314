//! Map types.

use std::sync::{Arc, LazyLock};

use prost_reflect::{FieldDescriptor, Kind};

use crate::field::type_from_kind;
use crate::types::{release_children, structural_fingerprint, take_child};
use crate::{Type, TypeError, TypeKind, TypeParameters};

static DYN_MAP: LazyLock<Arc<MapTypeData>> =
    LazyLock::new(|| Arc::new(MapTypeData::new(Type::Dyn, Type::Dyn)));

static JSON_MAP: LazyLock<Arc<MapTypeData>> =
    LazyLock::new(|| Arc::new(MapTypeData::new(Type::String, Type::Dyn)));

/// A key-value map type: `map(K, V)`.
#[derive(Debug, Clone)]
pub struct MapType(MapRepr);

#[derive(Debug, Clone)]
enum MapRepr {
    Interned(Arc<MapTypeData>),
    Field(FieldDescriptor),
}

#[derive(Debug)]
pub(crate) struct MapTypeData {
    key: Type,
    value: Type,
    fingerprint: u64,
}

impl MapTypeData {
    pub(crate) fn new(key: Type, value: Type) -> Self {
        let fingerprint =
            structural_fingerprint(TypeKind::Map, "map", &[key.clone(), value.clone()]);
        Self {
            key,
            value,
            fingerprint,
        }
    }

    fn detach_into(&mut self, pending: &mut Vec<Type>) {
        take_child(&mut self.key, pending);
        take_child(&mut self.value, pending);
    }
}

impl Drop for MapTypeData {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        release_children(pending);
    }
}

impl MapType {
    /// Create a map type outside of any pool.
    ///
    /// `map(dyn, dyn)` and `map(string, dyn)` resolve to shared instances.
    pub fn new(key: Type, value: Type) -> Self {
        Self::shared(&key, &value).unwrap_or_else(|| Self::from_data(MapTypeData::new(key, value)))
    }

    /// The JSON object shape, `map(string, dyn)`.
    pub fn json() -> Self {
        MapType(MapRepr::Interned(JSON_MAP.clone()))
    }

    /// Returns the process-wide instance for the fully dynamic shapes.
    pub(crate) fn shared(key: &Type, value: &Type) -> Option<Self> {
        if !value.is_dyn() {
            return None;
        }
        match key {
            Type::Dyn => Some(Self::default()),
            Type::String => Some(Self::json()),
            _ => None,
        }
    }

    pub(crate) fn from_data(data: MapTypeData) -> Self {
        MapType(MapRepr::Interned(Arc::new(data)))
    }

    /// Create a map type backed by a map schema field.
    pub fn from_field(field: FieldDescriptor) -> Result<Self, TypeError> {
        if !field.is_map() {
            return Err(TypeError::malformed(format!(
                "field {} is not a map field",
                field.full_name()
            )));
        }
        Ok(MapType(MapRepr::Field(field)))
    }

    /// Returns the key type.
    pub fn key(&self) -> Type {
        match &self.0 {
            MapRepr::Interned(data) => data.key.clone(),
            MapRepr::Field(field) => entry_field_type(field, "key"),
        }
    }

    /// Returns the value type.
    pub fn value(&self) -> Type {
        match &self.0 {
            MapRepr::Interned(data) => data.value.clone(),
            MapRepr::Field(field) => entry_field_type(field, "value"),
        }
    }

    /// Returns `[key, value]`.
    pub fn parameters(&self) -> TypeParameters {
        TypeParameters::two(self.key(), self.value())
    }

    /// Returns the schema field this map mirrors, if any.
    pub fn field(&self) -> Option<&FieldDescriptor> {
        match &self.0 {
            MapRepr::Field(field) => Some(field),
            MapRepr::Interned(_) => None,
        }
    }

    /// Returns true if both handles refer to the same canonical instance.
    pub fn ptr_eq(a: &MapType, b: &MapType) -> bool {
        match (&a.0, &b.0) {
            (MapRepr::Interned(a), MapRepr::Interned(b)) => Arc::ptr_eq(a, b),
            (MapRepr::Field(a), MapRepr::Field(b)) => a == b,
            _ => false,
        }
    }

    pub(crate) fn detach_into(self, pending: &mut Vec<Type>) {
        if let MapRepr::Interned(data) = self.0 {
            if let Some(mut data) = Arc::into_inner(data) {
                data.detach_into(pending);
            }
        }
    }

    pub(crate) fn fingerprint(&self) -> u64 {
        match &self.0 {
            MapRepr::Interned(data) => data.fingerprint,
            MapRepr::Field(_) => {
                structural_fingerprint(TypeKind::Map, "map", &[self.key(), self.value()])
            }
        }
    }
}

/// Read the key or value type out of a map field's synthetic entry message.
fn entry_field_type(field: &FieldDescriptor, name: &str) -> Type {
    match field.kind() {
        Kind::Message(entry) => entry
            .get_field_by_name(name)
            .map(|f| type_from_kind(f.kind()))
            .unwrap_or(Type::Dyn),
        _ => Type::Dyn,
    }
}

impl Default for MapType {
    /// Returns the shared `map(dyn, dyn)` instance.
    fn default() -> Self {
        MapType(MapRepr::Interned(DYN_MAP.clone()))
    }
}

impl PartialEq for MapType {
    fn eq(&self, other: &Self) -> bool {
        MapType::ptr_eq(self, other) || (self.key() == other.key() && self.value() == other.value())
    }
}

impl Eq for MapType {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_shapes_are_shared() {
        assert!(MapType::ptr_eq(&MapType::new(Type::Dyn, Type::Dyn), &MapType::default()));
        assert!(MapType::ptr_eq(&MapType::new(Type::String, Type::Dyn), &MapType::json()));
        assert!(!MapType::ptr_eq(&MapType::json(), &MapType::default()));
    }

    #[test]
    fn key_and_value() {
        let map = MapType::new(Type::Int, Type::Bytes);
        assert_eq!(map.key(), Type::Int);
        assert_eq!(map.value(), Type::Bytes);
        assert_eq!(map.parameters().as_slice(), &[Type::Int, Type::Bytes]);
        assert_eq!(map, MapType::new(Type::Int, Type::Bytes));
        assert_ne!(map, MapType::new(Type::Bytes, Type::Int));
    }
}
