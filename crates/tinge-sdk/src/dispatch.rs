//! Dispatch tables: name → trampoline
//!
//! Dispatch is a flat per-kind lookup — no inheritance chains, no dynamic
//! method resolution. Tables are composed once at module assembly by set
//! union (a kind that reuses another kind's operations gets clones of the
//! same `Arc`'d trampolines) and are immutable afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::BindResult;
use crate::registry::TypeRegistry;
use crate::value::Value;

/// The validated call-and-convert wrapper around one native operation.
///
/// The registry is passed at call time (trampolines use it to unwrap their
/// handle arguments, cast edges included); everything else a trampoline
/// needs — the engine above all — is captured at registration.
pub type Trampoline = Arc<dyn Fn(&TypeRegistry, &[Value]) -> BindResult<Value> + Send + Sync>;

/// Method table for one kind.
pub type MethodTable = HashMap<&'static str, Trampoline>;

/// Property table for one kind.
pub type PropertyTable = HashMap<&'static str, PropertySlot>;

/// Accessor pair for one named property.
///
/// `get` is called with `[receiver]`; `set`, when present, with
/// `[receiver, new_value]`. A missing `set` makes the property read-only and
/// writes fail with `ImmutableProperty` — caller intent mismatch is reported,
/// not silently ignored.
#[derive(Clone)]
pub struct PropertySlot {
    /// Zero-argument accessor trampoline.
    pub get: Trampoline,
    /// Mutation trampoline, absent for read-only properties.
    pub set: Option<Trampoline>,
}

impl PropertySlot {
    /// A read-only property.
    pub fn read_only(get: Trampoline) -> Self {
        PropertySlot { get, set: None }
    }

    /// A readable and writable property.
    pub fn read_write(get: Trampoline, set: Trampoline) -> Self {
        PropertySlot {
            get,
            set: Some(set),
        }
    }
}
