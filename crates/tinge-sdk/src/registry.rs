//! Type and cast registries
//!
//! Per-kind registrations (method/property tables plus finalizer) and the
//! directed cast edges between kinds. Both registries are populated once at
//! module assembly and never mutated afterwards; `unwrap` is the single
//! checked-downcast operation every trampoline uses on its handle arguments.

use std::collections::HashMap;

use crate::dispatch::{MethodTable, PropertySlot, PropertyTable, Trampoline};
use crate::error::{BindError, BindResult};
use crate::handle::{Finalizer, Handle, RawPtr};
use crate::value::Value;

/// The category of a handle.
///
/// A flat tag set — kinds do not form a hierarchy. Relations between kinds
/// are expressed as explicit cast edges, never subtyping. New kinds are
/// added by extending this enum and registering a descriptor for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An OS window. Its native object embeds a drawable surface, reachable
    /// through the registered Window→Bitmap cast.
    Window,
    /// An off-screen drawable surface.
    Bitmap,
    /// A loaded (or built-in) font.
    Font,
}

impl Kind {
    /// Lowercase name used in host-facing messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Window => "window",
            Kind::Bitmap => "bitmap",
            Kind::Font => "font",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pointer-reinterpreting conversion from one kind to another.
///
/// Pure: no allocation, no copy, no ownership transfer — the returned
/// pointer is the same resource viewed as the target kind.
pub type CastFn = fn(RawPtr) -> RawPtr;

/// One-time static registration for a kind.
pub struct TypeDescriptor {
    /// The kind being described.
    pub kind: Kind,
    /// Name → method trampoline.
    pub methods: MethodTable,
    /// Name → property accessor pair.
    pub properties: PropertyTable,
    /// Release function for owned resources of this kind; `None` for kinds
    /// whose handles only ever wrap unowned singletons.
    pub finalizer: Option<Finalizer>,
}

/// Registry of kinds and the cast edges between them.
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<Kind, TypeDescriptor>,
    casts: HashMap<(Kind, Kind), CastFn>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind. Registering the same kind twice is a configuration
    /// error, fatal at startup.
    pub fn register_type(&mut self, descriptor: TypeDescriptor) -> BindResult<()> {
        let kind = descriptor.kind;
        if self.types.contains_key(&kind) {
            return Err(BindError::Configuration {
                message: format!("kind '{kind}' registered twice"),
            });
        }
        log::debug!(
            "registered kind {} ({} methods, {} properties)",
            kind,
            descriptor.methods.len(),
            descriptor.properties.len()
        );
        self.types.insert(kind, descriptor);
        Ok(())
    }

    /// Register a directed cast edge. Registering the same (source, target)
    /// pair twice is a configuration error, fatal at startup.
    pub fn register_cast(&mut self, from: Kind, to: Kind, cast: CastFn) -> BindResult<()> {
        if self.casts.contains_key(&(from, to)) {
            return Err(BindError::Configuration {
                message: format!("cast {from} -> {to} registered twice"),
            });
        }
        log::debug!("registered cast {from} -> {to}");
        self.casts.insert((from, to), cast);
        Ok(())
    }

    /// Exact-pair cast lookup. Absence is not an error at this layer; the
    /// caller ([`TypeRegistry::unwrap`]) reports it as a kind mismatch.
    pub fn resolve_cast(&self, from: Kind, to: Kind) -> Option<CastFn> {
        self.casts.get(&(from, to)).copied()
    }

    /// Look up a method trampoline on a kind.
    pub fn method(&self, kind: Kind, name: &str) -> Option<&Trampoline> {
        self.types.get(&kind)?.methods.get(name)
    }

    /// Look up a property slot on a kind.
    pub fn property(&self, kind: Kind, name: &str) -> Option<&PropertySlot> {
        self.types.get(&kind)?.properties.get(name)
    }

    /// Wrap a freshly created native pointer as an owned handle of `kind`,
    /// attaching the kind's registered finalizer.
    ///
    /// `None` signals the engine could not create the resource and becomes
    /// an allocation error — constructors surface it to the host instead of
    /// ever returning an invalid handle.
    pub fn wrap(&self, ptr: Option<RawPtr>, kind: Kind) -> BindResult<Value> {
        let ptr = ptr.ok_or_else(|| BindError::Allocation {
            message: format!("error creating {kind}"),
        })?;
        let finalizer = self.types.get(&kind).and_then(|d| d.finalizer.clone());
        Ok(Value::Handle(Handle::new(kind, ptr, finalizer)))
    }

    /// Wrap a process-wide engine singleton as an unowned handle of `kind`:
    /// no finalizer, releasing it frees nothing.
    pub fn wrap_unowned(&self, ptr: RawPtr, kind: Kind) -> Value {
        Value::Handle(Handle::new(kind, ptr, None))
    }

    /// The single checked downcast: the native pointer behind `value`,
    /// viewed as `expected`.
    ///
    /// Succeeds when the value is a live handle of `expected`, or of a kind
    /// with a registered cast edge to `expected` (the conversion is applied
    /// to the pointer; no new handle is created — the result is a view).
    /// Fails with a kind mismatch otherwise, and with use-after-free for a
    /// released handle of an acceptable kind.
    pub fn unwrap(&self, value: &Value, expected: Kind) -> BindResult<RawPtr> {
        let handle = match value {
            Value::Handle(h) => h,
            other => {
                return Err(BindError::KindMismatch {
                    expected: expected.name(),
                    got: other.type_name(),
                })
            }
        };
        let actual = handle.kind();
        if actual == expected {
            return handle.raw();
        }
        match self.resolve_cast(actual, expected) {
            Some(cast) => Ok(cast(handle.raw()?)),
            None => Err(BindError::KindMismatch {
                expected: expected.name(),
                got: actual.name(),
            }),
        }
    }
}
