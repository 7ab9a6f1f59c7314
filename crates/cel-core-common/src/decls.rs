//! Declaration types for variables, functions, and overloads.
//!
//! These define the type environment a checker resolves identifiers and
//! calls against. They are plain owned values: build them once, then share
//! them read-only.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use cel_core_types::{type_is_assignable, Type, TypeError};
use prost_reflect::prost_types;
use tracing::debug;

/// A compile-time constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// Unsigned 64-bit integer.
    Uint(u64),
    /// 64-bit floating point.
    Double(f64),
    /// Unicode string.
    String(String),
    /// Byte sequence.
    Bytes(Vec<u8>),
    /// Signed span of time.
    Duration(prost_types::Duration),
    /// Point in time.
    Timestamp(prost_types::Timestamp),
}

impl Constant {
    /// Get the CEL type of this value.
    pub fn constant_type(&self) -> Type {
        match self {
            Constant::Null => Type::Null,
            Constant::Bool(_) => Type::Bool,
            Constant::Int(_) => Type::Int,
            Constant::Uint(_) => Type::Uint,
            Constant::Double(_) => Type::Double,
            Constant::String(_) => Type::String,
            Constant::Bytes(_) => Type::Bytes,
            Constant::Duration(_) => Type::Duration,
            Constant::Timestamp(_) => Type::Timestamp,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Null => write!(f, "null"),
            Constant::Bool(v) => write!(f, "{}", v),
            Constant::Int(v) => write!(f, "{}", v),
            Constant::Uint(v) => write!(f, "{}u", v),
            Constant::Double(v) => write!(f, "{}", v),
            Constant::String(v) => write!(f, "\"{}\"", v),
            Constant::Bytes(v) => write!(f, "b\"{}\"", String::from_utf8_lossy(v)),
            Constant::Duration(v) => write!(f, "duration(\"{}\")", v),
            Constant::Timestamp(v) => write!(f, "timestamp(\"{}\")", v),
        }
    }
}

/// Variable declaration.
///
/// Represents a variable or constant that can be referenced in CEL expressions.
#[derive(Debug, Clone)]
pub struct VariableDecl {
    /// The variable name.
    pub name: String,
    /// The CEL type of the variable.
    pub cel_type: Type,
    /// For constants, the compile-time value.
    pub const_value: Option<Constant>,
}

impl VariableDecl {
    /// Create a new variable declaration.
    pub fn new(name: impl Into<String>, cel_type: Type) -> Self {
        Self {
            name: name.into(),
            cel_type,
            const_value: None,
        }
    }

    /// Create a constant declaration typed by its value.
    pub fn constant(name: impl Into<String>, value: Constant) -> Self {
        Self {
            name: name.into(),
            cel_type: value.constant_type(),
            const_value: Some(value),
        }
    }
}

/// Function overload declaration.
///
/// A single signature of a function. For member overloads the receiver is
/// the first argument.
#[derive(Debug, Clone)]
pub struct OverloadDecl {
    /// Unique identifier for this overload (e.g., "add_int64_int64").
    pub id: String,
    /// Argument types, receiver first for member overloads.
    pub args: Vec<Type>,
    /// Return type.
    pub result: Type,
    /// Whether this is a member function (receiver.method(args)).
    pub is_member: bool,
}

impl OverloadDecl {
    /// Create a new standalone function overload.
    pub fn function(id: impl Into<String>, args: Vec<Type>, result: Type) -> Self {
        Self {
            id: id.into(),
            args,
            result,
            is_member: false,
        }
    }

    /// Create a new member function overload.
    ///
    /// The first type in `args` is the receiver type.
    pub fn method(id: impl Into<String>, args: Vec<Type>, result: Type) -> Self {
        Self {
            id: id.into(),
            args,
            result,
            is_member: true,
        }
    }

    /// Get the argument types, receiver included.
    pub fn args(&self) -> &[Type] {
        &self.args
    }

    /// Get the result type.
    pub fn result(&self) -> &Type {
        &self.result
    }

    /// Whether this overload is called with receiver syntax.
    pub fn is_member(&self) -> bool {
        self.is_member
    }

    /// Get the receiver type for member functions.
    pub fn receiver_type(&self) -> Option<&Type> {
        if self.is_member {
            self.args.first()
        } else {
            None
        }
    }

    /// Collect the names of the free type parameters in this signature.
    ///
    /// The result and every argument are searched through list, map, opaque
    /// and function children.
    pub fn type_params(&self) -> BTreeSet<String> {
        let mut params = BTreeSet::new();
        let mut pending: Vec<Type> = Vec::with_capacity(self.args.len() + 1);
        pending.push(self.result.clone());
        pending.extend(self.args.iter().cloned());

        while let Some(ty) = pending.pop() {
            match &ty {
                Type::TypeParam(param) => {
                    params.insert(param.name().to_string());
                }
                Type::List(_) | Type::Map(_) | Type::Opaque(_) | Type::Function(_) => {
                    pending.extend(ty.parameters().iter().cloned());
                }
                _ => {}
            }
        }
        params
    }

    /// Returns true if a call could match both this overload and `other`.
    ///
    /// Signatures overlap when they agree on member-ness and arity and every
    /// argument of one is assignable to the matching argument of the other,
    /// in either direction.
    pub fn signature_overlaps(&self, other: &OverloadDecl) -> bool {
        self.is_member == other.is_member
            && self.args.len() == other.args.len()
            && self
                .args
                .iter()
                .zip(&other.args)
                .all(|(a, b)| type_is_assignable(a, b) || type_is_assignable(b, a))
    }
}

/// Function declaration with overloads.
///
/// Overload ids are unique within a function, and no two overloads may
/// accept overlapping arguments. Overloads keep their insertion order.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    name: String,
    overloads: Vec<OverloadDecl>,
    by_id: HashMap<String, usize>,
}

impl FunctionDecl {
    /// Create a new function declaration with no overloads.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overloads: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Create a function declaration from a set of overloads.
    ///
    /// Fails on the first overload that [`add_overload`](Self::add_overload)
    /// rejects.
    pub fn with_overloads(
        name: impl Into<String>,
        overloads: impl IntoIterator<Item = OverloadDecl>,
    ) -> Result<Self, TypeError> {
        let mut decl = Self::new(name);
        for overload in overloads {
            decl.add_overload(overload)?;
        }
        Ok(decl)
    }

    /// Add an overload to this function.
    ///
    /// Fails with [`TypeError::OverloadExists`] if the id is taken, and with
    /// [`TypeError::OverloadCollision`] if the signature overlaps an existing
    /// overload.
    pub fn add_overload(&mut self, overload: OverloadDecl) -> Result<(), TypeError> {
        if self.by_id.contains_key(&overload.id) {
            return Err(TypeError::OverloadExists { id: overload.id });
        }
        if let Some(existing) = self
            .overloads
            .iter()
            .find(|existing| existing.signature_overlaps(&overload))
        {
            debug!(
                function = %self.name,
                existing = %existing.id,
                candidate = %overload.id,
                "overload signature collision"
            );
            return Err(TypeError::OverloadCollision {
                existing: existing.id.clone(),
                candidate: overload.id,
            });
        }
        self.by_id.insert(overload.id.clone(), self.overloads.len());
        self.overloads.push(overload);
        Ok(())
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All overloads, in insertion order.
    pub fn overloads(&self) -> &[OverloadDecl] {
        &self.overloads
    }

    /// Look up an overload by id.
    pub fn find_overload(&self, id: &str) -> Option<&OverloadDecl> {
        self.by_id.get(id).map(|&index| &self.overloads[index])
    }

    /// Overloads called with receiver syntax.
    pub fn member_overloads(&self) -> impl Iterator<Item = &OverloadDecl> {
        self.overloads.iter().filter(|o| o.is_member)
    }

    /// Overloads called as free functions.
    pub fn global_overloads(&self) -> impl Iterator<Item = &OverloadDecl> {
        self.overloads.iter().filter(|o| !o.is_member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cel_core_types::{ErrorCode, FunctionType, ListType, MapType, OpaqueType, TypeParamType};

    fn param(name: &str) -> Type {
        Type::from(TypeParamType::new(name))
    }

    #[test]
    fn test_variable_decl() {
        let var = VariableDecl::new("x", Type::Int);
        assert_eq!(var.name, "x");
        assert_eq!(var.cel_type, Type::Int);
        assert!(var.const_value.is_none());
    }

    #[test]
    fn test_constant_decl() {
        let var = VariableDecl::constant(
            "one_second",
            Constant::Duration(prost_types::Duration {
                seconds: 1,
                nanos: 0,
            }),
        );
        assert_eq!(var.cel_type, Type::Duration);
        assert_eq!(Constant::Uint(3).to_string(), "3u");
        assert_eq!(Constant::Null.constant_type(), Type::Null);
    }

    #[test]
    fn test_overload_decl_method() {
        let overload = OverloadDecl::method(
            "string_contains_string",
            vec![Type::String, Type::String],
            Type::Bool,
        );
        assert!(overload.is_member());
        assert_eq!(overload.receiver_type(), Some(&Type::String));
        assert_eq!(overload.args().len(), 2);
        assert_eq!(overload.result(), &Type::Bool);

        let global = OverloadDecl::function("size_string", vec![Type::String], Type::Int);
        assert!(global.receiver_type().is_none());
    }

    #[test]
    fn test_type_params() {
        let overload = OverloadDecl::function(
            "f",
            vec![
                Type::from(ListType::new(param("A"))),
                Type::from(MapType::new(param("B"), param("C"))),
                Type::from(OpaqueType::new(
                    "opaque",
                    &[Type::from(FunctionType::new(param("D"), &[]))],
                )),
            ],
            Type::Int,
        );
        let expected: BTreeSet<String> = ["A", "B", "C", "D"].into_iter().map(String::from).collect();
        assert_eq!(overload.type_params(), expected);

        let result_only = OverloadDecl::function("g", vec![Type::Dyn], param("T"));
        assert_eq!(result_only.type_params().len(), 1);
    }

    #[test]
    fn test_type_params_deep_nesting() {
        let deep = (0..1000).fold(param("T"), |ty, depth| {
            if depth % 2 == 0 {
                Type::from(OpaqueType::new("box", &[ty]))
            } else {
                Type::from(ListType::new(ty))
            }
        });
        let overload = OverloadDecl::function("unbox", vec![deep], param("T"));
        let expected: BTreeSet<String> = ["T"].into_iter().map(String::from).collect();
        assert_eq!(overload.type_params(), expected);
    }

    #[test]
    fn test_duplicate_overload_id() {
        let mut func = FunctionDecl::new("f");
        func.add_overload(OverloadDecl::function("f_int", vec![Type::Int], Type::Int))
            .unwrap();
        let err = func
            .add_overload(OverloadDecl::function("f_int", vec![Type::String], Type::Int))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
        assert_eq!(func.overloads().len(), 1);
    }

    #[test]
    fn test_overlapping_signatures() {
        let mut func = FunctionDecl::new("f");
        func.add_overload(OverloadDecl::function("f_int", vec![Type::Int], param("T1")))
            .unwrap();
        let err = func
            .add_overload(OverloadDecl::function("f_dyn", vec![Type::Dyn], param("T2")))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(matches!(err, TypeError::OverloadCollision { .. }));

        func.add_overload(OverloadDecl::function("f_string", vec![Type::String], Type::Int))
            .unwrap();
        func.add_overload(OverloadDecl::method("int_f", vec![Type::Int], Type::Int))
            .unwrap();
        func.add_overload(OverloadDecl::function("f_int_int", vec![Type::Int, Type::Int], Type::Int))
            .unwrap();
        assert_eq!(func.overloads().len(), 4);
    }

    #[test]
    fn test_function_decl() {
        let func = FunctionDecl::with_overloads(
            "size",
            [
                OverloadDecl::function("size_string", vec![Type::String], Type::Int),
                OverloadDecl::method("string_size", vec![Type::String], Type::Int),
                OverloadDecl::function("size_bytes", vec![Type::Bytes], Type::Int),
            ],
        )
        .unwrap();

        assert_eq!(func.name(), "size");
        let ids: Vec<_> = func.overloads().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["size_string", "string_size", "size_bytes"]);
        assert_eq!(func.member_overloads().count(), 1);
        assert_eq!(func.global_overloads().count(), 2);
        assert_eq!(
            func.find_overload("size_bytes").map(|o| o.result().clone()),
            Some(Type::Int)
        );
        assert!(func.find_overload("size_list").is_none());
    }

    #[test]
    fn test_with_overloads_propagates_errors() {
        let result = FunctionDecl::with_overloads(
            "f",
            [
                OverloadDecl::function("f_wrapper", vec![Type::IntWrapper], Type::Int),
                OverloadDecl::function("f_null", vec![Type::Null], Type::Int),
            ],
        );
        assert!(matches!(result, Err(TypeError::OverloadCollision { .. })));
    }
}
