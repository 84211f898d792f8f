//! Values crossing the interpreter boundary
//!
//! The mapping is fixed: nothing (the interpreter's unspecified value),
//! booleans, 64-bit integers, doubles, UTF-8 strings, lists and callables.
//! Anything else has no representation and never crosses the boundary.

use std::fmt;
use std::sync::Arc;

use crate::error::{BridgeError, Result};

type HostFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// Host function made callable from interpreter code
///
/// A function gets a name when it is first registered with a session; until
/// then it is anonymous. Clones share the function and compare equal.
#[derive(Clone)]
pub struct HostFunction {
    name: Option<String>,
    func: Arc<HostFn>,
}

impl HostFunction {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(func),
        }
    }

    /// Name assigned by the callable registry, if registered
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Run the function on `args`
    ///
    /// # Errors
    ///
    /// Returns whatever error the function itself raises.
    pub fn invoke(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }

    pub(crate) fn named(&self, name: String) -> Self {
        Self {
            name: Some(name),
            func: Arc::clone(&self.func),
        }
    }

    pub(crate) fn same_function(&self, other: &HostFunction) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl PartialEq for HostFunction {
    fn eq(&self, other: &Self) -> bool {
        self.same_function(other)
    }
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "HostFunction({})", name),
            None => f.write_str("HostFunction(<anonymous>)"),
        }
    }
}

/// Something that can be called across the boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    /// Function implemented by the host
    Host(HostFunction),
    /// Procedure living inside the interpreter, known by its name
    Procedure(String),
}

impl Callable {
    /// Name of the callable, if it has one yet
    pub fn name(&self) -> Option<&str> {
        match self {
            Callable::Host(host) => host.name(),
            Callable::Procedure(name) => Some(name),
        }
    }
}

/// A value in the fixed boundary mapping
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Callable(Callable),
}

impl Value {
    /// Wrap a host closure as a callable value
    pub fn host_fn<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Value::Callable(Callable::Host(HostFunction::new(func)))
    }

    /// Short name of the variant, used in conversion errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Callable(_) => "callable",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    fn mismatch(&self, expected: &'static str) -> BridgeError {
        BridgeError::TypeConversion {
            expected,
            found: self.type_name(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Callable> for Value {
    fn from(v: Callable) -> Self {
        Value::Callable(v)
    }
}

impl From<HostFunction> for Value {
    fn from(v: HostFunction) -> Self {
        Value::Callable(Callable::Host(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

/// Integers 0 and 1 are accepted as booleans
impl TryFrom<Value> for bool {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            other => Err(other.mismatch("bool")),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(other.mismatch("int")),
        }
    }
}

/// Integers widen to doubles
impl TryFrom<Value> for f64 {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(other.mismatch("float")),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => Ok(items),
            other => Err(other.mismatch("list")),
        }
    }
}

impl TryFrom<Value> for Callable {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Callable(c) => Ok(c),
            other => Err(other.mismatch("callable")),
        }
    }
}
