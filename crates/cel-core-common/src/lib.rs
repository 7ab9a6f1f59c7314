//! Declarations and name resolution for CEL type checking.
//!
//! This crate provides the environment side of the type model:
//!
//! - **Declarations**: `VariableDecl`, `FunctionDecl` and `OverloadDecl`,
//!   with duplicate-id and overlapping-signature checks on overloads.
//! - **Introspection**: the `TypeIntrospector` trait for resolving type,
//!   field and enum constant names, plus `CompositeTypeIntrospector` for
//!   chaining providers.
//! - **Schemas**: `DescriptorTypeIntrospector`, which resolves names against
//!   a `prost_reflect::DescriptorPool`.
//!
//! Types themselves live in `cel_core_types` and are re-exported here.

pub use cel_core_types as types;

// Declarations module
mod decls;
pub use decls::{Constant, FunctionDecl, OverloadDecl, VariableDecl};

// Introspection module
mod introspector;
mod well_known;
pub use introspector::{
    CompositeTypeIntrospector, EnumConstant, StructTypeField, TypeIntrospector,
    WellKnownTypeIntrospector,
};

// Proto types module
pub mod proto_types;
pub use proto_types::DescriptorTypeIntrospector;
