//! tinge-sdk — generic marshaling infrastructure for exposing native
//! resources to a dynamically-typed embedding host.
//!
//! This crate knows nothing about graphics. It provides the pieces a
//! binding module composes:
//!
//! - [`Value`] — the dynamically-typed host value
//! - [`Handle`] — an owning wrapper around one opaque native pointer with a
//!   finalize-exactly-once contract
//! - [`TypeRegistry`] — kind registrations, cast edges and the single
//!   checked-downcast operation ([`TypeRegistry::unwrap`])
//! - [`Trampoline`] and the per-kind method/property tables
//! - [`Args`] — positional argument validation
//! - [`BindError`] — the error taxonomy
//!
//! Binding modules register their kinds and trampolines once at startup;
//! all registries are immutable afterwards.

#![warn(missing_docs)]

mod args;
mod dispatch;
mod error;
mod handle;
mod registry;
mod value;

pub use args::Args;
pub use dispatch::{MethodTable, PropertySlot, PropertyTable, Trampoline};
pub use error::{BindError, BindResult};
pub use handle::{Finalizer, Handle, RawPtr};
pub use registry::{CastFn, Kind, TypeDescriptor, TypeRegistry};
pub use value::Value;
