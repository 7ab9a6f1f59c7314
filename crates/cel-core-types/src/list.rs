//! List types.

use std::sync::{Arc, LazyLock};

use prost_reflect::FieldDescriptor;

use crate::field::type_from_kind;
use crate::types::{release_children, structural_fingerprint, take_child};
use crate::{Type, TypeError, TypeKind, TypeParameters};

static DYN_LIST: LazyLock<Arc<ListTypeData>> =
    LazyLock::new(|| Arc::new(ListTypeData::new(Type::Dyn)));

/// A homogeneous list type: `list(T)`.
///
/// The element type either lives in a shared payload block or is read from a
/// repeated schema field, so a list mirroring a message field never copies
/// the field's type information.
#[derive(Debug, Clone)]
pub struct ListType(ListRepr);

#[derive(Debug, Clone)]
enum ListRepr {
    Interned(Arc<ListTypeData>),
    Field(FieldDescriptor),
}

#[derive(Debug)]
pub(crate) struct ListTypeData {
    element: Type,
    fingerprint: u64,
}

impl ListTypeData {
    pub(crate) fn new(element: Type) -> Self {
        let fingerprint =
            structural_fingerprint(TypeKind::List, "list", std::slice::from_ref(&element));
        Self {
            element,
            fingerprint,
        }
    }

    fn detach_into(&mut self, pending: &mut Vec<Type>) {
        take_child(&mut self.element, pending);
    }
}

impl Drop for ListTypeData {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        release_children(pending);
    }
}

impl ListType {
    /// Create a list type outside of any pool.
    ///
    /// `list(dyn)` always resolves to the shared default instance.
    pub fn new(element: Type) -> Self {
        if element.is_dyn() {
            return Self::default();
        }
        Self::from_data(ListTypeData::new(element))
    }

    pub(crate) fn from_data(data: ListTypeData) -> Self {
        ListType(ListRepr::Interned(Arc::new(data)))
    }

    /// Create a list type backed by a repeated (non-map) schema field.
    pub fn from_field(field: FieldDescriptor) -> Result<Self, TypeError> {
        if !field.is_list() {
            return Err(TypeError::malformed(format!(
                "field {} is not a repeated field",
                field.full_name()
            )));
        }
        Ok(ListType(ListRepr::Field(field)))
    }

    /// Returns the element type.
    pub fn element(&self) -> Type {
        match &self.0 {
            ListRepr::Interned(data) => data.element.clone(),
            ListRepr::Field(field) => type_from_kind(field.kind()),
        }
    }

    /// Returns `[element]`.
    pub fn parameters(&self) -> TypeParameters {
        TypeParameters::one(self.element())
    }

    /// Returns the schema field this list mirrors, if any.
    pub fn field(&self) -> Option<&FieldDescriptor> {
        match &self.0 {
            ListRepr::Field(field) => Some(field),
            ListRepr::Interned(_) => None,
        }
    }

    /// Returns true if both handles refer to the same canonical instance.
    pub fn ptr_eq(a: &ListType, b: &ListType) -> bool {
        match (&a.0, &b.0) {
            (ListRepr::Interned(a), ListRepr::Interned(b)) => Arc::ptr_eq(a, b),
            (ListRepr::Field(a), ListRepr::Field(b)) => a == b,
            _ => false,
        }
    }

    pub(crate) fn detach_into(self, pending: &mut Vec<Type>) {
        if let ListRepr::Interned(data) = self.0 {
            if let Some(mut data) = Arc::into_inner(data) {
                data.detach_into(pending);
            }
        }
    }

    pub(crate) fn fingerprint(&self) -> u64 {
        match &self.0 {
            ListRepr::Interned(data) => data.fingerprint,
            ListRepr::Field(_) => {
                structural_fingerprint(TypeKind::List, "list", &[self.element()])
            }
        }
    }
}

impl Default for ListType {
    /// Returns the shared `list(dyn)` instance.
    fn default() -> Self {
        ListType(ListRepr::Interned(DYN_LIST.clone()))
    }
}

impl PartialEq for ListType {
    fn eq(&self, other: &Self) -> bool {
        ListType::ptr_eq(self, other) || self.element() == other.element()
    }
}

impl Eq for ListType {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dyn_list_is_shared() {
        let a = ListType::new(Type::Dyn);
        let b = ListType::default();
        assert!(ListType::ptr_eq(&a, &b));
        assert_eq!(a.element(), Type::Dyn);
    }

    #[test]
    fn unpooled_lists_compare_structurally() {
        let a = ListType::new(Type::Int);
        let b = ListType::new(Type::Int);
        assert!(!ListType::ptr_eq(&a, &b));
        assert_eq!(a, b);
        assert_eq!(a.parameters().as_slice(), &[Type::Int]);
        assert!(a.field().is_none());
    }
}
