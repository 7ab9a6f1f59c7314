//! Conversion between CEL types and the google/cel-spec `cel.expr.Type` message.
//!
//! This crate gives wire compatibility with other CEL implementations (cel-go,
//! cel-cpp, etc.) for type declarations and checked types.
//!
//! # Example
//!
//! ```
//! use cel_core_proto::{type_from_proto, type_to_proto};
//! use cel_core_types::{Type, TypePool};
//! use prost_reflect::DescriptorPool;
//!
//! let pool = TypePool::new();
//! let list = Type::from(pool.make_list_type(Type::Timestamp));
//!
//! let wire = type_to_proto(&list).unwrap();
//! let back = type_from_proto(&wire, &DescriptorPool::global(), &pool).unwrap();
//! assert_eq!(back, list);
//! ```

pub mod gen;
mod type_conversion;

pub use type_conversion::{type_from_proto, type_to_proto};

// Re-export proto types for convenience
pub use gen::cel::expr::Type;
