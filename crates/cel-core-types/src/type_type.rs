//! Type-of-type and type parameter types.

use std::sync::Arc;

use crate::types::{release_children, structural_fingerprint, take_child};
use crate::{Type, TypeKind, TypeParameters};

/// The type of a type value: bare `type` or `type(T)`.
#[derive(Debug, Clone, Default)]
pub struct TypeType(Option<Arc<TypeTypeData>>);

#[derive(Debug)]
pub(crate) struct TypeTypeData {
    param: Type,
    fingerprint: u64,
}

impl TypeTypeData {
    pub(crate) fn new(param: Type) -> Self {
        let fingerprint =
            structural_fingerprint(TypeKind::Type, "type", std::slice::from_ref(&param));
        Self { param, fingerprint }
    }
}

impl Drop for TypeTypeData {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_child(&mut self.param, &mut pending);
        release_children(pending);
    }
}

impl TypeType {
    /// Create `type(T)` outside of any pool.
    pub fn new(param: Type) -> Self {
        Self::from_data(TypeTypeData::new(param))
    }

    pub(crate) fn from_data(data: TypeTypeData) -> Self {
        TypeType(Some(Arc::new(data)))
    }

    /// Returns `T` for `type(T)`, or `None` for bare `type`.
    pub fn parameter(&self) -> Option<&Type> {
        self.0.as_ref().map(|data| &data.param)
    }

    /// Returns `[T]`, or no parameters for bare `type`.
    pub fn parameters(&self) -> TypeParameters {
        match self.parameter() {
            Some(param) => TypeParameters::one(param.clone()),
            None => TypeParameters::empty(),
        }
    }

    /// Returns true if both handles refer to the same canonical instance.
    pub fn ptr_eq(a: &TypeType, b: &TypeType) -> bool {
        match (&a.0, &b.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub(crate) fn detach_into(self, pending: &mut Vec<Type>) {
        if let Some(mut data) = self.0.and_then(Arc::into_inner) {
            take_child(&mut data.param, pending);
        }
    }

    pub(crate) fn fingerprint(&self) -> u64 {
        match &self.0 {
            Some(data) => data.fingerprint,
            None => structural_fingerprint(TypeKind::Type, "type", &[]),
        }
    }
}

impl PartialEq for TypeType {
    fn eq(&self, other: &Self) -> bool {
        TypeType::ptr_eq(self, other) || self.parameter() == other.parameter()
    }
}

impl Eq for TypeType {}

/// A free type parameter in a generic signature, such as `T` in `list(T)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParamType(Arc<str>);

impl TypeParamType {
    /// Create a type parameter with the given name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        TypeParamType(name.into())
    }

    /// Returns the parameter name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_parameterized() {
        let bare = TypeType::default();
        assert!(bare.parameter().is_none());
        assert!(bare.parameters().is_empty());

        let of_int = TypeType::new(Type::Int);
        assert_eq!(of_int.parameter(), Some(&Type::Int));
        assert_ne!(bare, of_int);
        assert_eq!(of_int, TypeType::new(Type::Int));
    }

    #[test]
    fn type_param_name() {
        let param = TypeParamType::new("T");
        assert_eq!(param.name(), "T");
        assert_eq!(param, TypeParamType::new(String::from("T")));
    }
}
