//! Host-visible dynamically-typed values

use crate::handle::Handle;

/// A value as seen by the embedding host.
///
/// This is the single representation crossing the host/native boundary in
/// both directions: trampoline arguments arrive as `Value`s and results are
/// returned as `Value`s. Pixels cross as `Int` carrying the packed u32 wire
/// encoding; raw image bytes cross as `Bytes`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent / no result.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer (64-bit signed; also carries u32 pixel values).
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text string.
    Str(String),
    /// Raw byte buffer (in-memory image data).
    Bytes(Vec<u8>),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Wrapped native resource.
    Handle(Handle),
}

impl Value {
    /// Create a string value.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create a list value.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items)
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as an integer. No float coercion: a host float is not
    /// silently truncated into an integer argument.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as a float. Integers coerce, as they would in the host.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to get as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as raw bytes. Strings are accepted as their UTF-8 bytes,
    /// matching hosts where binary data travels in strings.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            Value::Str(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Try to get as a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get as a handle.
    pub fn as_handle(&self) -> Option<&Handle> {
        match self {
            Value::Handle(h) => Some(h),
            _ => None,
        }
    }

    /// Name of this value's type, for error messages. Handles report their
    /// kind name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Handle(h) => h.kind().name(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Handle> for Value {
    fn from(h: Handle) -> Self {
        Value::Handle(h)
    }
}
