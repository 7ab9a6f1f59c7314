//! Opaque (named parametric) types and the optional specialization.

use std::sync::{Arc, LazyLock};

use crate::types::{release_children, structural_fingerprint, take_child};
use crate::{Type, TypeKind, TypeParameters};

/// Name shared by every `optional_type(T)`.
pub const OPTIONAL_TYPE_NAME: &str = "optional_type";

static DYN_OPTIONAL: LazyLock<Arc<OpaqueTypeData>> = LazyLock::new(|| {
    Arc::new(OpaqueTypeData::new(
        Arc::from(OPTIONAL_TYPE_NAME),
        Arc::from([Type::Dyn]),
    ))
});

/// A named parametric type outside the built-in list/map/struct family.
#[derive(Debug, Clone)]
pub struct OpaqueType(Arc<OpaqueTypeData>);

#[derive(Debug)]
pub(crate) struct OpaqueTypeData {
    name: Arc<str>,
    params: Arc<[Type]>,
    fingerprint: u64,
}

impl OpaqueTypeData {
    pub(crate) fn new(name: Arc<str>, params: Arc<[Type]>) -> Self {
        let fingerprint = structural_fingerprint(TypeKind::Opaque, &name, &params);
        Self {
            name,
            params,
            fingerprint,
        }
    }

    fn detach_into(&mut self, pending: &mut Vec<Type>) {
        // A span still shared with a pool key is released by its last owner.
        if let Some(params) = Arc::get_mut(&mut self.params) {
            for param in params {
                take_child(param, pending);
            }
        }
    }
}

impl Drop for OpaqueTypeData {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        release_children(pending);
    }
}

impl OpaqueType {
    /// Create an opaque type outside of any pool.
    pub fn new(name: &str, params: &[Type]) -> Self {
        Self::shared(name, params).unwrap_or_else(|| {
            Self::from_data(OpaqueTypeData::new(Arc::from(name), Arc::from(params)))
        })
    }

    /// Returns the process-wide `optional_type(dyn)` for that exact shape.
    pub(crate) fn shared(name: &str, params: &[Type]) -> Option<Self> {
        match params {
            [param] if name == OPTIONAL_TYPE_NAME && param.is_dyn() => {
                Some(OpaqueType(DYN_OPTIONAL.clone()))
            }
            _ => None,
        }
    }

    pub(crate) fn from_data(data: OpaqueTypeData) -> Self {
        OpaqueType(Arc::new(data))
    }

    /// Returns the type name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the type parameters.
    pub fn parameters(&self) -> TypeParameters {
        TypeParameters::shared(self.0.params.clone())
    }

    /// Returns true if this is `optional_type(T)`.
    pub fn is_optional(&self) -> bool {
        self.name() == OPTIONAL_TYPE_NAME && self.0.params.len() == 1
    }

    /// Returns true if both handles refer to the same canonical instance.
    pub fn ptr_eq(a: &OpaqueType, b: &OpaqueType) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn detach_into(self, pending: &mut Vec<Type>) {
        if let Some(mut data) = Arc::into_inner(self.0) {
            data.detach_into(pending);
        }
    }

    pub(crate) fn fingerprint(&self) -> u64 {
        self.0.fingerprint
    }
}

impl PartialEq for OpaqueType {
    fn eq(&self, other: &Self) -> bool {
        OpaqueType::ptr_eq(self, other)
            || (self.0.name == other.0.name && self.0.params == other.0.params)
    }
}

impl Eq for OpaqueType {}

/// `optional_type(T)`: a checked view over an [`OpaqueType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalType(OpaqueType);

impl OptionalType {
    /// Create an optional type outside of any pool.
    pub fn new(param: Type) -> Self {
        OptionalType(OpaqueType::new(OPTIONAL_TYPE_NAME, &[param]))
    }

    pub(crate) fn from_opaque_unchecked(opaque: OpaqueType) -> Self {
        OptionalType(opaque)
    }

    /// Returns the wrapped type `T`.
    pub fn parameter(&self) -> Type {
        self.0 .0.params[0].clone()
    }

    /// Returns the underlying opaque type.
    pub fn as_opaque(&self) -> &OpaqueType {
        &self.0
    }

    /// Converts into the underlying opaque type.
    pub fn into_opaque(self) -> OpaqueType {
        self.0
    }
}

impl Default for OptionalType {
    /// Returns the shared `optional_type(dyn)` instance.
    fn default() -> Self {
        OptionalType(OpaqueType(DYN_OPTIONAL.clone()))
    }
}

impl TryFrom<OpaqueType> for OptionalType {
    type Error = OpaqueType;

    fn try_from(opaque: OpaqueType) -> Result<Self, OpaqueType> {
        if opaque.is_optional() {
            Ok(OptionalType(opaque))
        } else {
            Err(opaque)
        }
    }
}
