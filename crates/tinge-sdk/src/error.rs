//! Error types for the binding layer

use crate::registry::Kind;

/// Result type for binding-layer calls
pub type BindResult<T> = Result<T, BindError>;

/// Binding-layer error taxonomy.
///
/// Every recoverable failure a trampoline or registry operation can produce
/// is one of these variants. Errors are raised synchronously at the point of
/// detection and propagate to the host's call frame; there are no retries
/// and no partial rollback.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BindError {
    /// Bad type or out-of-range positional argument. `index` is 1-based.
    #[error("argument {index}: {message}")]
    Argument {
        /// 1-based argument position
        index: usize,
        /// What was wrong with it
        message: String,
    },

    /// Native resource creation failed (engine returned null).
    #[error("{message}")]
    Allocation {
        /// Engine-supplied message when available, generic otherwise
        message: String,
    },

    /// Handle kind mismatch with no applicable cast edge.
    #[error("type mismatch: expected {expected}, got {got}")]
    KindMismatch {
        /// Kind (or value shape) the operation required
        expected: &'static str,
        /// Kind or value type actually supplied
        got: &'static str,
    },

    /// Operation on a handle whose native resource was already released.
    #[error("{kind} handle used after release")]
    UseAfterFree {
        /// Kind of the offending handle
        kind: Kind,
    },

    /// Write to a read-only property.
    #[error("attempt to set read-only property '{name}' on {kind}")]
    ImmutableProperty {
        /// Kind the property belongs to
        kind: Kind,
        /// Property name
        name: String,
    },

    /// Unknown method, property or function name.
    #[error("no {what} named '{name}' on {target}")]
    NoSuchMember {
        /// "method", "property" or "function"
        what: &'static str,
        /// The name that failed to resolve
        name: String,
        /// Kind name or "module"
        target: &'static str,
    },

    /// Duplicate type or cast registration. Fatal at startup only.
    #[error("configuration error: {message}")]
    Configuration {
        /// What was registered twice
        message: String,
    },

    /// A delegated engine operation failed after construction.
    /// The message is the engine's own text, verbatim.
    #[error("{message}")]
    Engine {
        /// Engine-supplied message
        message: String,
    },
}

impl BindError {
    /// Shorthand for an [`BindError::Argument`] with a 1-based position.
    pub fn argument(index: usize, message: impl Into<String>) -> Self {
        BindError::Argument {
            index,
            message: message.into(),
        }
    }
}
