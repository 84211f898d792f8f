//! Embedding session
//!
//! A [`Session`] owns one interpreter and the registry of host functions that
//! interpreter can call back into. Nothing is process-wide: two sessions
//! never see each other's callables, and closing a session releases them.
//!
//! ## Logging Ownership
//!
//! Every boundary crossing (`define`, `lookup`, `call`, `invoke_registered`)
//! is logged here:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Each event carries the session's `session_id`.

use std::time::Instant;

use revstore_core::{log_op_end, log_op_error, log_op_start};
use revstore_core_types::SessionId;

use crate::error::{BridgeError, Result};
use crate::interpreter::Interpreter;
use crate::registry::{CallableRegistry, DEFAULT_PREFIX};
use crate::value::{Callable, Value};

pub struct Session<I: Interpreter> {
    id: SessionId,
    interpreter: I,
    registry: CallableRegistry,
}

impl<I: Interpreter> Session<I> {
    /// Open a session around `interpreter` with the default callable prefix
    pub fn new(interpreter: I) -> Self {
        Self::with_prefix(interpreter, DEFAULT_PREFIX)
    }

    /// Open a session whose generated callable names start with `prefix`
    pub fn with_prefix(interpreter: I, prefix: impl Into<String>) -> Self {
        let id = SessionId::new();
        tracing::debug!(session_id = %id, "session opened");
        Self {
            id,
            interpreter,
            registry: CallableRegistry::new(prefix),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn interpreter(&self) -> &I {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut I {
        &mut self.interpreter
    }

    pub fn registry(&self) -> &CallableRegistry {
        &self.registry
    }

    /// Bind `name` in the interpreter
    ///
    /// Host functions anywhere inside `value` are registered first, so the
    /// interpreter receives them already named.
    ///
    /// # Errors
    ///
    /// Whatever the interpreter reports for the binding.
    pub fn define(&mut self, name: &str, value: Value) -> Result<()> {
        let session_id = self.id.to_string();
        log_op_start!("define", session_id = session_id.as_str(), name = name);
        let start = Instant::now();

        let value = self.export(value);
        let result = self.interpreter.define(name, value);
        finish("define", &session_id, start, result)
    }

    /// Read the value bound to `name`
    ///
    /// Procedures that are registered host functions come back as those
    /// functions.
    ///
    /// # Errors
    ///
    /// `UndefinedName` if nothing is bound to `name`.
    pub fn lookup(&self, name: &str) -> Result<Value> {
        let session_id = self.id.to_string();
        log_op_start!("lookup", session_id = session_id.as_str(), name = name);
        let start = Instant::now();

        let result = self.interpreter.lookup(name).map(|v| self.import(v));
        finish("lookup", &session_id, start, result)
    }

    /// Apply `procedure` to `args` inside the interpreter
    ///
    /// # Errors
    ///
    /// `TypeConversion` if `procedure` is not callable, `ProcedureFailed` if
    /// it raises an error, or any error a host function raises.
    pub fn call(&mut self, procedure: &Value, args: &[Value]) -> Result<Value> {
        let session_id = self.id.to_string();
        log_op_start!("call", session_id = session_id.as_str(), argc = args.len());
        let start = Instant::now();

        let result = self.call_impl(procedure, args);
        finish("call", &session_id, start, result)
    }

    /// Look up `name` and apply it to `args`
    ///
    /// # Errors
    ///
    /// `UndefinedName` if nothing is bound, otherwise as [`call`](Self::call).
    pub fn call_by_name(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let procedure = self.lookup(name)?;
        self.call(&procedure, args)
    }

    /// Run a registered host function on behalf of the interpreter
    ///
    /// This is the entry point an interpreter's trampoline uses when script
    /// code calls a host function by its generated name.
    ///
    /// # Errors
    ///
    /// `UndefinedName` if `name` is not registered in this session, or any
    /// error the function raises.
    pub fn invoke_registered(&self, name: &str, args: &[Value]) -> Result<Value> {
        let session_id = self.id.to_string();
        log_op_start!("invoke_registered", session_id = session_id.as_str(), name = name);
        let start = Instant::now();

        let result = match self.registry.get(name) {
            Some(func) => func.invoke(args).map(|v| self.import(v)),
            None => Err(BridgeError::UndefinedName {
                name: name.to_string(),
            }),
        };
        finish("invoke_registered", &session_id, start, result)
    }

    /// Close the session, dropping its registry, and hand back the
    /// interpreter
    pub fn close(self) -> I {
        tracing::debug!(
            session_id = %self.id,
            callables = self.registry.len(),
            "session closed"
        );
        self.interpreter
    }

    fn call_impl(&mut self, procedure: &Value, args: &[Value]) -> Result<Value> {
        let procedure = match self.export(procedure.clone()) {
            callable @ Value::Callable(_) => callable,
            other => {
                return Err(BridgeError::TypeConversion {
                    expected: "callable",
                    found: other.type_name(),
                })
            }
        };
        let args: Vec<Value> = args.iter().cloned().map(|a| self.export(a)).collect();
        let result = self.interpreter.call(&procedure, &args)?;
        Ok(self.import(result))
    }

    /// Name every anonymous host function inside `value`
    fn export(&mut self, value: Value) -> Value {
        match value {
            Value::Callable(Callable::Host(func)) => {
                Value::Callable(Callable::Host(self.registry.register(&func)))
            }
            Value::List(items) => Value::List(items.into_iter().map(|v| self.export(v)).collect()),
            other => other,
        }
    }

    /// Replace procedures naming registered host functions by the functions
    fn import(&self, value: Value) -> Value {
        match value {
            Value::Callable(Callable::Procedure(name)) => match self.registry.get(&name) {
                Some(func) => Value::Callable(Callable::Host(func.clone())),
                None => Value::Callable(Callable::Procedure(name)),
            },
            Value::List(items) => Value::List(items.into_iter().map(|v| self.import(v)).collect()),
            other => other,
        }
    }
}

fn finish<T>(op: &'static str, session_id: &str, start: Instant, result: Result<T>) -> Result<T> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(value) => {
            log_op_end!(op, duration_ms = duration_ms, session_id = session_id);
            Ok(value)
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = duration_ms, session_id = session_id);
            Err(err)
        }
    }
}
