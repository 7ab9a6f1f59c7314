//! CEL type model: the closed set of types a checker can produce.
//!
//! This crate provides:
//!
//! - **Types**: [`Type`], a 27-way enum over primitives, wrappers, well-known
//!   types and the compound kinds (`list(T)`, `map(K, V)`, functions, opaque
//!   types such as `optional_type(T)`, `type(T)`, type parameters, structs and
//!   enums), with checked downcasts and structural equality.
//! - **Interning**: [`TypePool`], a thread-safe session that canonicalizes
//!   structurally equal compound types to one shared instance.
//! - **Schema mapping**: [`type_from_field`] and friends, which turn
//!   `prost_reflect` descriptors into types.
//! - **Assignability**: [`type_is_assignable`].
//! - **Formatting**: [`format_type_name`], the diagnostic spelling of a type.
//!
//! Every tree walk in this crate uses an explicit work-list, so arbitrarily
//! deep types never exhaust the call stack.
//!
//! # Example
//!
//! ```
//! use cel_core_types::{type_is_assignable, Type, TypePool};
//!
//! let pool = TypePool::new();
//! let ints = Type::from(pool.make_list_type(Type::Int));
//! let dyns = Type::from(pool.make_list_type(Type::Dyn));
//!
//! assert_eq!(ints.to_string(), "list(int)");
//! assert!(type_is_assignable(&dyns, &ints));
//! assert!(!type_is_assignable(&ints, &dyns));
//! ```

// Kinds and errors
mod error;
mod kind;
pub use error::{ErrorCode, TypeError};
pub use kind::TypeKind;

// Type representation
mod function;
mod list;
mod map;
mod opaque;
mod parameters;
mod structs;
mod type_type;
mod types;
pub use function::FunctionType;
pub use list::ListType;
pub use map::MapType;
pub use opaque::{OpaqueType, OptionalType, OPTIONAL_TYPE_NAME};
pub use parameters::TypeParameters;
pub use structs::{BasicStructType, EnumType, MessageType, StructType};
pub use type_type::{TypeParamType, TypeType};
pub use types::Type;

// Interning
mod pool;
pub use pool::{PoolStats, TypePool};

// Schema descriptors
mod field;
pub use field::{
    type_from_enum_descriptor, type_from_field, type_from_kind, type_from_message_descriptor,
    well_known_message_type, NULL_VALUE_ENUM, WELL_KNOWN_MESSAGES,
};

// Algorithms
mod assignable;
mod format;
pub use assignable::type_is_assignable;
pub use format::format_type_name;
