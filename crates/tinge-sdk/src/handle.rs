//! Owning handles around opaque native pointers
//!
//! A [`Handle`] is the host-visible wrapper for exactly one native resource.
//! Clones share a single interior cell; the cell's pointer slot is
//! *take-once*, so the finalizer runs exactly once whether the resource is
//! released explicitly or by the last clone going out of scope. After the
//! slot is drained every access fails with `UseAfterFree` instead of ever
//! touching the stale pointer.

use std::ffi::c_void;
use std::ptr::NonNull;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{BindError, BindResult};
use crate::registry::Kind;

/// Opaque non-null pointer into the native engine's heap.
///
/// This layer never dereferences it; it only carries it between the host
/// and the engine's function table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawPtr(NonNull<c_void>);

// Safety: the engine is driven from one logical thread and this layer never
// dereferences the pointer, only carries it.
unsafe impl Send for RawPtr {}
unsafe impl Sync for RawPtr {}

impl RawPtr {
    /// Wrap a raw engine pointer. Returns `None` for null, which constructor
    /// trampolines must surface as an allocation failure.
    pub fn new(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(RawPtr)
    }

    /// The underlying pointer, for handing back to the engine.
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// Finalizer invoked with the native pointer when a handle is released.
///
/// Built at registration time, closing over whatever the release needs
/// (typically the engine reference).
pub type Finalizer = Arc<dyn Fn(RawPtr) + Send + Sync>;

struct HandleCell {
    kind: Kind,
    slot: Mutex<Option<RawPtr>>,
    finalizer: Option<Finalizer>,
}

impl HandleCell {
    /// Take the pointer out of the slot and run the finalizer on it.
    /// Idempotent: a drained slot is a no-op.
    fn drain(&self) {
        let taken = self.slot.lock().take();
        if let Some(ptr) = taken {
            log::trace!("releasing {} handle", self.kind);
            if let Some(finalizer) = &self.finalizer {
                finalizer(ptr);
            }
        }
    }
}

impl Drop for HandleCell {
    fn drop(&mut self) {
        self.drain();
    }
}

/// Host-visible wrapper owning exactly one native resource pointer.
///
/// Cloning is cheap and shares ownership; the native resource is released
/// when [`Handle::release`] is called or the last clone is dropped,
/// whichever comes first.
#[derive(Clone)]
pub struct Handle {
    cell: Arc<HandleCell>,
}

impl Handle {
    /// Wrap a native pointer with its kind tag and optional finalizer.
    ///
    /// `None` for the finalizer wraps an unowned resource (a process-wide
    /// engine singleton): releasing such a handle drains the slot but frees
    /// nothing.
    pub fn new(kind: Kind, ptr: RawPtr, finalizer: Option<Finalizer>) -> Self {
        Handle {
            cell: Arc::new(HandleCell {
                kind,
                slot: Mutex::new(Some(ptr)),
                finalizer,
            }),
        }
    }

    /// The kind tag this handle was created with.
    pub fn kind(&self) -> Kind {
        self.cell.kind
    }

    /// The native pointer, or `UseAfterFree` if the resource was released.
    pub fn raw(&self) -> BindResult<RawPtr> {
        self.cell.slot.lock().ok_or(BindError::UseAfterFree {
            kind: self.cell.kind,
        })
    }

    /// Release the native resource now, running the finalizer if it has not
    /// already run. Subsequent [`Handle::raw`] calls on any clone fail with
    /// `UseAfterFree`.
    pub fn release(&self) {
        self.cell.drain();
    }

    /// Whether the native resource has been released.
    pub fn is_released(&self) -> bool {
        self.cell.slot.lock().is_none()
    }
}

impl PartialEq for Handle {
    /// Identity comparison: two handles are equal when they share the same
    /// cell, i.e. they are clones of one wrap.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &self.cell.kind)
            .field("released", &self.is_released())
            .finish()
    }
}
