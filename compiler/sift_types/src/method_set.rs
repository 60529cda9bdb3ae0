//! Interface method sets.
//!
//! An interface *explicitly* declares the methods written in its own body; its
//! full method set also includes everything its embedded interfaces supply,
//! transitively.

use rustc_hash::FxHashSet;
use sift_ir::{InterfaceType, MethodId, TypeId, TypePool};

/// Does `iface` list `method` in its own body?
pub fn explicitly_declares_method(iface: &InterfaceType, method: MethodId<'_>) -> bool {
    iface.methods.iter().any(|m| m.id() == method)
}

/// Is `method` in the full method set of the interface `ty`?
///
/// Walks the embedding graph with a worklist; a malformed, cyclic graph is
/// visited once per type. Non-interface types declare nothing.
pub fn declares_method(pool: &TypePool, ty: TypeId, method: MethodId<'_>) -> bool {
    let mut visited = FxHashSet::default();
    let mut worklist = vec![ty];
    while let Some(current) = worklist.pop() {
        if !visited.insert(current) {
            continue;
        }
        let Some(iface) = pool.as_interface(current) else {
            continue;
        };
        if explicitly_declares_method(iface, method) {
            return true;
        }
        worklist.extend(iface.embeddeds.iter().rev().copied());
    }
    false
}
