//! The process-wide terminal node, one per element type.
//!
//! Terminals are created lazily on first demand and never torn down. Lookup
//! follows the same discipline as a node slot: a shared read first, then an
//! exclusive re-check before inserting.

use std::any::{Any, TypeId};
use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::node::LazySequence;

type Registry = RwLock<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>;

static TERMINALS: OnceLock<Registry> = OnceLock::new();

/// Returns the canonical terminal node for `E`.
pub(crate) fn canonical<E: Send + Sync + 'static>() -> LazySequence<E> {
    let registry = TERMINALS.get_or_init(Registry::default);
    let key = TypeId::of::<E>();

    if let Some(terminal) = registry
        .read()
        .get(&key)
        .and_then(|entry| entry.downcast_ref::<LazySequence<E>>())
    {
        return terminal.clone();
    }

    let mut terminals = registry.write();
    let entry = terminals.entry(key).or_insert_with(|| {
        tracing::debug!(
            element_type = std::any::type_name::<E>(),
            "registering terminal lazy sequence"
        );
        Box::new(LazySequence::<E>::terminal_node())
    });

    // Entries are keyed by their own `TypeId`, so the downcast cannot miss.
    entry
        .downcast_ref::<LazySequence<E>>()
        .cloned()
        .unwrap_or_else(LazySequence::terminal_node)
}
