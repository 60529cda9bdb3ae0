//! Interface resolution.
//!
//! A call `x.M()` may resolve through struct embedding and interface
//! embedding before reaching the interface that actually declares `M`:
//!
//! ```text
//! type T struct{ W }           x.M() where x: T
//! type W interface{ io.Closer } ->  chain [T, W, io.Closer]
//! ```
//!
//! Exclusion rules can name any link of that chain (`(W).Close` suppresses
//! the call just like `(io.Closer).Close` does), so the chain is what callee
//! naming works from.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use sift_ir::{MethodId, Selection, SelectionKind, TypeId, TypePool};

use crate::method_set::{declares_method, explicitly_declares_method};

/// Types visited from a receiver to the interface declaring a method.
///
/// The first element is the receiver's static type; the last is the
/// interface whose own body declares the method.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SelectionChain {
    types: SmallVec<[TypeId; 4]>,
}

impl SelectionChain {
    pub fn types(&self) -> &[TypeId] {
        &self.types
    }
}

/// Compute the selection chain of a method selection.
///
/// Method values (`x.M`) and method expressions (`T.M`) are walked alike,
/// starting from the static type of `x` or `T`. Returns `None` ("not
/// applicable") for field selections, when the selected member is not reached through an interface,
/// and for malformed input: an index path through a non-struct, or an
/// interface none of whose embedded interfaces supplies the method.
pub fn selection_chain(
    pool: &TypePool,
    selection: &Selection,
    method: MethodId<'_>,
) -> Option<SelectionChain> {
    if selection.kind == SelectionKind::FieldVal {
        return None;
    }
    let (_, fields) = selection.index.split_last()?;

    let mut current = selection.recv;
    let mut types: SmallVec<[TypeId; 4]> = SmallVec::new();
    types.push(current);

    for &index in fields {
        let Some(field) = pool
            .as_struct(pool.deref(current))
            .and_then(|fields| fields.get(index as usize))
        else {
            trace!(?current, index, "selection index leaves struct");
            return None;
        };
        current = field.ty;
        types.push(current);
    }

    let mut visited = FxHashSet::default();
    visited.insert(current);
    let mut iface = pool.as_interface(current)?;

    while !explicitly_declares_method(iface, method) {
        let next = iface
            .embeddeds
            .iter()
            .copied()
            .find(|&embedded| declares_method(pool, embedded, method))?;
        if !visited.insert(next) {
            trace!(?next, "cyclic interface embedding");
            return None;
        }
        types.push(next);
        iface = pool.as_interface(next)?;
    }

    Some(SelectionChain { types })
}
