//! Type assignability.

use crate::Type;

/// Returns true if a value of type `from` may be used where `to` is expected.
///
/// - Equal types are assignable.
/// - Anything is assignable to `dyn`.
/// - A wrapper accepts `null` and its own primitive.
///
/// Otherwise both sides must agree on kind, name and arity, and every
/// parameter of `from` must be assignable to the matching parameter of `to`.
/// Parameters are compared covariantly, function arguments and map keys
/// included.
pub fn type_is_assignable(to: &Type, from: &Type) -> bool {
    let mut pending = vec![(to.clone(), from.clone())];
    while let Some((to, from)) = pending.pop() {
        if to.is_dyn() || to == from {
            continue;
        }
        if to.is_wrapper() {
            if from.is_null() || to.unwrap() == from {
                continue;
            }
            return false;
        }
        if to.kind() != from.kind() || to.name() != from.name() {
            return false;
        }
        let to_params = to.parameters();
        let from_params = from.parameters();
        if to_params.len() != from_params.len() {
            return false;
        }
        pending.extend(to_params.iter().cloned().zip(from_params.iter().cloned()));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FunctionType, ListType, MapType, OpaqueType, OptionalType, TypeType};

    fn optional(param: Type) -> Type {
        Type::from(OptionalType::new(param))
    }

    #[test]
    fn wrappers_accept_null_and_their_primitive() {
        assert!(type_is_assignable(&Type::IntWrapper, &Type::Null));
        assert!(type_is_assignable(&Type::IntWrapper, &Type::Int));
        assert!(type_is_assignable(&Type::IntWrapper, &Type::IntWrapper));
        assert!(!type_is_assignable(&Type::IntWrapper, &Type::Duration));
        assert!(!type_is_assignable(&Type::IntWrapper, &Type::Uint));
        assert!(!type_is_assignable(&Type::Int, &Type::IntWrapper));
    }

    #[test]
    fn dyn_accepts_everything() {
        assert!(type_is_assignable(&Type::Dyn, &Type::Bytes));
        assert!(type_is_assignable(&Type::Dyn, &Type::from(ListType::new(Type::Int))));
        assert!(!type_is_assignable(&Type::Bytes, &Type::Dyn));
    }

    #[test]
    fn parameters_are_covariant() {
        assert!(type_is_assignable(&optional(Type::Dyn), &optional(Type::String)));
        assert!(!type_is_assignable(&optional(Type::Bool), &optional(Type::String)));

        let dyn_keys = Type::from(MapType::new(Type::Dyn, Type::IntWrapper));
        let int_keys = Type::from(MapType::new(Type::Int, Type::Null));
        assert!(type_is_assignable(&dyn_keys, &int_keys));
        assert!(!type_is_assignable(&int_keys, &dyn_keys));

        let takes_dyn = Type::from(FunctionType::new(Type::Bool, &[Type::Dyn]));
        let takes_int = Type::from(FunctionType::new(Type::Bool, &[Type::Int]));
        assert!(type_is_assignable(&takes_dyn, &takes_int));
        assert!(!type_is_assignable(&takes_int, &takes_dyn));
    }

    #[test]
    fn shape_must_match() {
        let pair = Type::from(OpaqueType::new("pair", &[Type::Int, Type::Int]));
        let single = Type::from(OpaqueType::new("pair", &[Type::Int]));
        let other = Type::from(OpaqueType::new("tuple", &[Type::Int, Type::Int]));
        assert!(!type_is_assignable(&pair, &single));
        assert!(!type_is_assignable(&pair, &other));

        let bare = Type::from(TypeType::default());
        let of_int = Type::from(TypeType::new(Type::Int));
        assert!(!type_is_assignable(&bare, &of_int));
        assert!(type_is_assignable(&Type::from(TypeType::new(Type::Dyn)), &of_int));
    }

    #[test]
    fn deep_nesting_is_iterative() {
        let mut to = Type::Dyn;
        let mut from = Type::Int;
        for _ in 0..1000 {
            to = Type::from(ListType::new(to));
            from = Type::from(ListType::new(from));
        }
        assert!(type_is_assignable(&to, &from));
        assert!(!type_is_assignable(&from, &to));
    }
}
