//! The embedded-interpreter seam
//!
//! Anything that can hold top-level bindings and apply procedures can host
//! revstore scripts. Implementations translate [`Value`]s into their own
//! object representation and back; values without a counterpart must fail
//! with `TypeConversion` rather than be approximated.

use crate::error::Result;
use crate::value::Value;

pub trait Interpreter {
    /// Bind `name` at top level, replacing any previous binding
    ///
    /// Host callables inside `value` arrive already named, so the
    /// interpreter can expose them under that name.
    ///
    /// # Errors
    ///
    /// `TypeConversion` if `value` cannot be represented.
    fn define(&mut self, name: &str, value: Value) -> Result<()>;

    /// Read the value bound to `name`
    ///
    /// # Errors
    ///
    /// `UndefinedName` if nothing is bound; `TypeConversion` if the bound
    /// object has no boundary representation.
    fn lookup(&self, name: &str) -> Result<Value>;

    /// Apply `procedure` to `args`
    ///
    /// # Errors
    ///
    /// `TypeConversion` if `procedure` is not callable or an argument or the
    /// result cannot be represented; `ProcedureFailed` if the procedure
    /// raises an error.
    fn call(&mut self, procedure: &Value, args: &[Value]) -> Result<Value>;
}
