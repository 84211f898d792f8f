#![allow(dead_code)]

//! Mock interpreter for deterministic boundary tests
//!
//! Stores top-level bindings in memory, knows a few builtin procedures
//! (`+`, `list`, `error`) and records every operation for verification.
//! Failures can be injected per operation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use revstore_bridge::{BridgeError, Callable, HostFunction, Interpreter, Result, Value};

/// Which operation should fail, and how
#[derive(Debug, Clone)]
pub enum FailOn {
    Define(BridgeError),
    Call(BridgeError),
}

/// Recorded operation for test verification
#[derive(Debug, Clone, PartialEq)]
pub enum MockOperation {
    Define { name: String },
    Lookup { name: String },
    Call { procedure: Option<String>, argc: usize },
}

#[derive(Debug, Default)]
struct MockInner {
    globals: HashMap<String, Value>,
    /// Host functions known by name only, as a real interpreter keeps them
    hosts: HashMap<String, HostFunction>,
    opaque_callables: bool,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Thread-safe via internal `Arc<Mutex<...>>`; clones share state, so a
/// test can keep a handle after moving the interpreter into a session
#[derive(Debug, Clone, Default)]
pub struct MockInterpreter {
    inner: Arc<Mutex<MockInner>>,
}

impl MockInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An interpreter that keeps host functions by name only, so lookups
    /// return procedure names that the session must map back
    pub fn opaque() -> Self {
        let mock = Self::default();
        mock.inner.lock().unwrap().opaque_callables = true;
        mock
    }

    pub fn fail_on(&self, fail: FailOn) {
        self.inner.lock().unwrap().fail_on = Some(fail);
    }

    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Raw binding as stored by the interpreter
    pub fn global(&self, name: &str) -> Option<Value> {
        self.inner.lock().unwrap().globals.get(name).cloned()
    }

    fn hide_callables(inner: &mut MockInner, value: Value) -> Result<Value> {
        match value {
            Value::Callable(Callable::Host(func)) => {
                let name = func
                    .name()
                    .ok_or(BridgeError::TypeConversion {
                        expected: "named callable",
                        found: "callable",
                    })?
                    .to_string();
                inner.hosts.insert(name.clone(), func);
                Ok(Value::Callable(Callable::Procedure(name)))
            }
            Value::List(items) => items
                .into_iter()
                .map(|v| Self::hide_callables(inner, v))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            other => Ok(other),
        }
    }
}

fn builtin(name: &str, args: &[Value]) -> Option<Result<Value>> {
    let result = match name {
        "+" => {
            if args.iter().all(|a| matches!(a, Value::Int(_))) {
                let mut sum = 0i64;
                for a in args {
                    if let Value::Int(i) = a {
                        sum += i;
                    }
                }
                Ok(Value::Int(sum))
            } else {
                args.iter()
                    .cloned()
                    .map(f64::try_from)
                    .sum::<Result<f64>>()
                    .map(Value::Float)
            }
        }
        "list" => Ok(Value::List(args.to_vec())),
        "error" => Err(BridgeError::ProcedureFailed {
            name: "error".to_string(),
            message: args
                .first()
                .cloned()
                .and_then(|a| String::try_from(a).ok())
                .unwrap_or_default(),
        }),
        _ => return None,
    };
    Some(result)
}

impl Interpreter for MockInterpreter {
    fn define(&mut self, name: &str, value: Value) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::Define {
            name: name.to_string(),
        });
        if let Some(FailOn::Define(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        let value = if inner.opaque_callables {
            Self::hide_callables(&mut inner, value)?
        } else {
            value
        };
        inner.globals.insert(name.to_string(), value);
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<Value> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::Lookup {
            name: name.to_string(),
        });
        if let Some(value) = inner.globals.get(name) {
            return Ok(value.clone());
        }
        if builtin(name, &[]).is_some() {
            return Ok(Value::Callable(Callable::Procedure(name.to_string())));
        }
        Err(BridgeError::UndefinedName {
            name: name.to_string(),
        })
    }

    fn call(&mut self, procedure: &Value, args: &[Value]) -> Result<Value> {
        let procedure_name = match procedure {
            Value::Callable(c) => c.name().map(str::to_string),
            _ => None,
        };
        let host = {
            let mut inner = self.inner.lock().unwrap();
            inner.operations.push(MockOperation::Call {
                procedure: procedure_name.clone(),
                argc: args.len(),
            });
            if let Some(FailOn::Call(err)) = &inner.fail_on {
                return Err(err.clone());
            }
            match procedure {
                Value::Callable(Callable::Host(func)) => Some(func.clone()),
                Value::Callable(Callable::Procedure(name)) => inner.hosts.get(name).cloned(),
                other => {
                    return Err(BridgeError::TypeConversion {
                        expected: "callable",
                        found: other.type_name(),
                    })
                }
            }
        };

        // Host functions run without the interpreter lock held
        match host {
            Some(func) => func.invoke(args),
            None => {
                let name = procedure_name.unwrap_or_default();
                builtin(&name, args).unwrap_or(Err(BridgeError::UndefinedName { name }))
            }
        }
    }
}

pub fn add_fn() -> Value {
    Value::host_fn(|args| {
        let (x, y) = match args {
            [x, y] => (x.clone(), y.clone()),
            _ => {
                return Err(BridgeError::ProcedureFailed {
                    name: "add".to_string(),
                    message: format!("expected 2 arguments, got {}", args.len()),
                })
            }
        };
        match (x, y) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
            (a, b) => Ok(Value::Float(f64::try_from(a)? + f64::try_from(b)?)),
        }
    })
}
