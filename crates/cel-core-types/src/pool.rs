//! Canonicalizing factories for compound types.
//!
//! A [`TypePool`] is the session that owns one canonical instance per
//! structurally distinct compound type. Each family (list, map, function,
//! opaque, type-of-type) is interned in its own sharded map, so concurrent
//! checkers only contend when they hit the same shard of the same family.
//! Nothing is ever evicted.
//!
//! The fully dynamic shapes (`list(dyn)`, `map(dyn, dyn)`, `map(string, dyn)`
//! and `optional_type(dyn)`) are process-wide singletons and never enter a
//! pool.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::function::{signature, FunctionTypeData};
use crate::list::ListTypeData;
use crate::map::MapTypeData;
use crate::opaque::OpaqueTypeData;
use crate::type_type::TypeTypeData;
use crate::{
    BasicStructType, FunctionType, ListType, MapType, OpaqueType, OptionalType, Type,
    TypeParamType, TypeType, OPTIONAL_TYPE_NAME,
};

/// Interning session for compound types.
///
/// `TypePool` is `Send + Sync`; share it by reference across checker threads.
pub struct TypePool {
    strings: DashMap<Arc<str>, ()>,
    lists: DashMap<Type, ListType>,
    maps: DashMap<(Type, Type), MapType>,
    functions: DashMap<Arc<[Type]>, FunctionType>,
    opaques: DashMap<(Arc<str>, Arc<[Type]>), OpaqueType>,
    type_types: DashMap<Type, TypeType>,
}

/// Entry counts per interning family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    pub strings: usize,
    pub lists: usize,
    pub maps: usize,
    pub functions: usize,
    pub opaques: usize,
    pub type_types: usize,
}

impl PoolStats {
    /// Total number of canonical instances held by the pool.
    pub fn total(&self) -> usize {
        self.strings + self.lists + self.maps + self.functions + self.opaques + self.type_types
    }
}

impl TypePool {
    /// Create an empty pool with the default shard count.
    pub fn new() -> Self {
        debug!("creating type pool");
        Self {
            strings: DashMap::new(),
            lists: DashMap::new(),
            maps: DashMap::new(),
            functions: DashMap::new(),
            opaques: DashMap::new(),
            type_types: DashMap::new(),
        }
    }

    /// Create an empty pool whose family maps use `shards` shards each.
    ///
    /// The count is rounded up to a power of two no smaller than 2.
    pub fn with_shard_amount(shards: usize) -> Self {
        let shards = shards.max(2).next_power_of_two();
        debug!(shards, "creating type pool");
        Self {
            strings: DashMap::with_shard_amount(shards),
            lists: DashMap::with_shard_amount(shards),
            maps: DashMap::with_shard_amount(shards),
            functions: DashMap::with_shard_amount(shards),
            opaques: DashMap::with_shard_amount(shards),
            type_types: DashMap::with_shard_amount(shards),
        }
    }

    /// Returns the canonical shared copy of `value`.
    pub fn intern_string(&self, value: &str) -> Arc<str> {
        if let Some(entry) = self.strings.get(value) {
            return entry.key().clone();
        }
        self.strings
            .entry(Arc::from(value))
            .or_insert(())
            .key()
            .clone()
    }

    /// Returns the canonical `list(element)`.
    pub fn make_list_type(&self, element: Type) -> ListType {
        if element.is_dyn() {
            return ListType::default();
        }
        if let Some(entry) = self.lists.get(&element) {
            return entry.value().clone();
        }
        self.lists
            .entry(element.clone())
            .or_insert_with(|| {
                trace!(%element, "interning list type");
                ListType::from_data(ListTypeData::new(element))
            })
            .value()
            .clone()
    }

    /// Returns the canonical `map(key, value)`.
    pub fn make_map_type(&self, key: Type, value: Type) -> MapType {
        if let Some(shared) = MapType::shared(&key, &value) {
            return shared;
        }
        let params = (key, value);
        if let Some(entry) = self.maps.get(&params) {
            return entry.value().clone();
        }
        self.maps
            .entry(params.clone())
            .or_insert_with(|| {
                let (key, value) = params;
                trace!(%key, %value, "interning map type");
                MapType::from_data(MapTypeData::new(key, value))
            })
            .value()
            .clone()
    }

    /// Returns the canonical function type `(args...) -> result`.
    pub fn make_function_type(&self, result: Type, args: &[Type]) -> FunctionType {
        let signature = signature(result, args);
        if let Some(entry) = self.functions.get(&signature) {
            return entry.value().clone();
        }
        self.functions
            .entry(signature.clone())
            .or_insert_with(|| {
                trace!(arity = signature.len() - 1, "interning function type");
                FunctionType::from_data(FunctionTypeData::new(signature))
            })
            .value()
            .clone()
    }

    /// Returns the canonical opaque type `name(params...)`.
    pub fn make_opaque_type(&self, name: &str, params: &[Type]) -> OpaqueType {
        if let Some(shared) = OpaqueType::shared(name, params) {
            return shared;
        }
        let key = (self.intern_string(name), Arc::<[Type]>::from(params));
        if let Some(entry) = self.opaques.get(&key) {
            return entry.value().clone();
        }
        self.opaques
            .entry(key.clone())
            .or_insert_with(|| {
                let (name, params) = key;
                trace!(name = %name, arity = params.len(), "interning opaque type");
                OpaqueType::from_data(OpaqueTypeData::new(name, params))
            })
            .value()
            .clone()
    }

    /// Returns the canonical `optional_type(param)`.
    pub fn make_optional_type(&self, param: Type) -> OptionalType {
        let opaque = self.make_opaque_type(OPTIONAL_TYPE_NAME, std::slice::from_ref(&param));
        OptionalType::from_opaque_unchecked(opaque)
    }

    /// Returns the canonical `type(param)`.
    ///
    /// Bare `type` needs no pool: use [`TypeType::default`].
    pub fn make_type_type(&self, param: Type) -> TypeType {
        if let Some(entry) = self.type_types.get(&param) {
            return entry.value().clone();
        }
        self.type_types
            .entry(param.clone())
            .or_insert_with(|| {
                trace!(%param, "interning type-of-type");
                TypeType::from_data(TypeTypeData::new(param))
            })
            .value()
            .clone()
    }

    /// Returns a type parameter whose name is interned in this pool.
    pub fn make_type_param_type(&self, name: &str) -> TypeParamType {
        TypeParamType::new(self.intern_string(name))
    }

    /// Returns a name-only struct type whose name is interned in this pool.
    pub fn make_basic_struct_type(&self, name: &str) -> BasicStructType {
        BasicStructType::new(self.intern_string(name))
    }

    /// Returns the number of canonical instances per family.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            strings: self.strings.len(),
            lists: self.lists.len(),
            maps: self.maps.len(),
            functions: self.functions.len(),
            opaques: self.opaques.len(),
            type_types: self.type_types.len(),
        }
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePool")
            .field("stats", &self.stats())
            .finish()
    }
}
