//! Function types.

use std::sync::Arc;

use crate::types::{release_children, structural_fingerprint, take_child};
use crate::{Type, TypeKind, TypeParameters};

/// A function signature type: a result type and ordered argument types.
///
/// Function types are checker-internal; they describe overloads and have no
/// wire representation.
#[derive(Debug, Clone)]
pub struct FunctionType(Arc<FunctionTypeData>);

#[derive(Debug)]
pub(crate) struct FunctionTypeData {
    /// `[result, args...]`
    signature: Arc<[Type]>,
    fingerprint: u64,
}

impl FunctionTypeData {
    pub(crate) fn new(signature: Arc<[Type]>) -> Self {
        let fingerprint = structural_fingerprint(TypeKind::Function, "function", &signature);
        Self {
            signature,
            fingerprint,
        }
    }

    fn detach_into(&mut self, pending: &mut Vec<Type>) {
        if let Some(signature) = Arc::get_mut(&mut self.signature) {
            for ty in signature {
                take_child(ty, pending);
            }
        }
    }
}

impl Drop for FunctionTypeData {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        release_children(pending);
    }
}

impl FunctionType {
    /// Create a function type outside of any pool.
    pub fn new(result: Type, args: &[Type]) -> Self {
        Self::from_data(FunctionTypeData::new(signature(result, args)))
    }

    pub(crate) fn from_data(data: FunctionTypeData) -> Self {
        FunctionType(Arc::new(data))
    }

    /// Returns the result type.
    pub fn result(&self) -> &Type {
        &self.0.signature[0]
    }

    /// Returns the argument types in declaration order.
    pub fn args(&self) -> &[Type] {
        &self.0.signature[1..]
    }

    /// Returns `[result, args...]`.
    pub fn parameters(&self) -> TypeParameters {
        TypeParameters::shared(self.0.signature.clone())
    }

    /// Returns true if both handles refer to the same canonical instance.
    pub fn ptr_eq(a: &FunctionType, b: &FunctionType) -> bool {
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

/// Lay out a signature as `[result, args...]`.
pub(crate) fn signature(result: Type, args: &[Type]) -> Arc<[Type]> {
    let mut signature = Vec::with_capacity(args.len() + 1);
    signature.push(result);
    signature.extend_from_slice(args);
    Arc::from(signature)
}

impl PartialEq for FunctionType {
    fn eq(&self, other: &Self) -> bool {
        FunctionType::ptr_eq(self, other) || self.0.signature == other.0.signature
    }
}

impl Eq for FunctionType {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_and_args() {
        let function = FunctionType::new(Type::Bool, &[Type::String, Type::Int]);
        assert_eq!(function.result(), &Type::Bool);
        assert_eq!(function.args(), &[Type::String, Type::Int]);
        assert_eq!(
            function.parameters().as_slice(),
            &[Type::Bool, Type::String, Type::Int]
        );
    }

    #[test]
    fn nullary_function() {
        let function = FunctionType::new(Type::Timestamp, &[]);
        assert!(function.args().is_empty());
        assert_ne!(function, FunctionType::new(Type::Duration, &[]));
    }
}
