//! Child type lists for parameterized types.

use std::ops::Deref;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::Type;

/// An immutable, ordered view of a type's child types.
///
/// Up to two parameters (every list, map and type-of-type) are held inline.
/// Larger lists share the owning type's span, so building a
/// `TypeParameters` never copies more than two types.
#[derive(Debug, Clone, Default)]
pub struct TypeParameters(Repr);

#[derive(Debug, Clone)]
enum Repr {
    Inline(SmallVec<[Type; 2]>),
    Shared(Arc<[Type]>),
}

impl Default for Repr {
    fn default() -> Self {
        Repr::Inline(SmallVec::new())
    }
}

impl TypeParameters {
    /// An empty parameter list.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn one(a: Type) -> Self {
        let mut inline = SmallVec::new();
        inline.push(a);
        TypeParameters(Repr::Inline(inline))
    }

    pub(crate) fn two(a: Type, b: Type) -> Self {
        let mut inline = SmallVec::new();
        inline.push(a);
        inline.push(b);
        TypeParameters(Repr::Inline(inline))
    }

    pub(crate) fn shared(span: Arc<[Type]>) -> Self {
        TypeParameters(Repr::Shared(span))
    }

    /// Returns the parameters as a slice.
    pub fn as_slice(&self) -> &[Type] {
        match &self.0 {
            Repr::Inline(inline) => inline.as_slice(),
            Repr::Shared(span) => span,
        }
    }
}

impl PartialEq for TypeParameters {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for TypeParameters {}

impl Deref for TypeParameters {
    type Target = [Type];

    fn deref(&self) -> &[Type] {
        self.as_slice()
    }
}

impl AsRef<[Type]> for TypeParameters {
    fn as_ref(&self) -> &[Type] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a TypeParameters {
    type Item = &'a Type;
    type IntoIter = std::slice::Iter<'a, Type>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
