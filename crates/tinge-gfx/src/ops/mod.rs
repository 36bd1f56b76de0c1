//! Trampolines: validated wrappers around the engine entry points
//!
//! One submodule per operation family. Each exposes `install_*` functions
//! that insert named closures into the tables the module assembles. Every
//! closure follows the same shape: check arguments by position, unwrap
//! handle arguments through the registry (cast edges included), make at
//! most one engine call, convert the result back to a host value.

use std::sync::Arc;

use tinge_sdk::{Args, BindResult, Trampoline, TypeRegistry, Value};

pub(crate) mod draw;
pub(crate) mod image;
pub(crate) mod misc;
pub(crate) mod text;
pub(crate) mod window;

/// Box a closure as a [`Trampoline`].
pub(crate) fn trampoline<F>(f: F) -> Trampoline
where
    F: Fn(&TypeRegistry, &[Value]) -> BindResult<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A non-negative i32 argument (coordinates, sizes, radii).
pub(crate) fn coord(args: &Args<'_>, index: usize) -> BindResult<i32> {
    Ok(args.int(index, 0, i64::from(i32::MAX))? as i32)
}

/// A clip extent: -1 means "to the surface edge".
pub(crate) fn clip_extent(args: &Args<'_>, index: usize) -> BindResult<i32> {
    Ok(args.int(index, -1, i64::from(i32::MAX))? as i32)
}
