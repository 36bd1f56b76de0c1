//! Positional argument checking for trampolines
//!
//! Every trampoline validates its arguments through this wrapper before
//! touching the engine. Failures name the 1-based position of the offending
//! argument.

use crate::error::{BindError, BindResult};
use crate::value::Value;

/// View over a trampoline's positional arguments.
pub struct Args<'a> {
    values: &'a [Value],
}

impl<'a> Args<'a> {
    /// Wrap an argument slice.
    pub fn new(values: &'a [Value]) -> Self {
        Args { values }
    }

    /// Number of arguments supplied.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The argument at `index`, which must be present.
    pub fn value(&self, index: usize) -> BindResult<&'a Value> {
        self.values
            .get(index)
            .ok_or_else(|| BindError::argument(index + 1, "missing argument"))
    }

    /// The argument at `index` if present and not null. Used for optional
    /// trailing arguments with defaults.
    pub fn opt(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index).filter(|v| !v.is_null())
    }

    /// Arguments from `from` onward (variadic tails).
    pub fn rest(&self, from: usize) -> &'a [Value] {
        &self.values[from.min(self.values.len())..]
    }

    /// An integer in the inclusive range `min..=max`.
    pub fn int(&self, index: usize, min: i64, max: i64) -> BindResult<i64> {
        match self.value(index)? {
            Value::Int(n) if (min..=max).contains(n) => Ok(*n),
            Value::Int(n) => Err(BindError::argument(
                index + 1,
                format!("integer {n} out of range [{min}, {max}]"),
            )),
            other => Err(BindError::argument(
                index + 1,
                format!("expected integer, got {}", other.type_name()),
            )),
        }
    }

    /// A float; integers coerce.
    pub fn float(&self, index: usize) -> BindResult<f64> {
        let value = self.value(index)?;
        value.as_float().ok_or_else(|| {
            BindError::argument(
                index + 1,
                format!("expected number, got {}", value.type_name()),
            )
        })
    }

    /// A string.
    pub fn str(&self, index: usize) -> BindResult<&'a str> {
        let value = self.value(index)?;
        value.as_str().ok_or_else(|| {
            BindError::argument(
                index + 1,
                format!("expected string, got {}", value.type_name()),
            )
        })
    }

    /// A byte buffer; strings are accepted as their bytes.
    pub fn bytes(&self, index: usize) -> BindResult<&'a [u8]> {
        let value = self.value(index)?;
        value.as_bytes().ok_or_else(|| {
            BindError::argument(
                index + 1,
                format!("expected bytes or string, got {}", value.type_name()),
            )
        })
    }
}
