//! Session-scoped registry of host callables
//!
//! Interpreters know host functions only by name. The registry hands out
//! those names and maps them back to the functions, so a procedure returned
//! by interpreter code can be recognised as a host function again.
//!
//! Each [`Session`](crate::Session) owns exactly one registry; it goes away
//! with the session.

use std::collections::BTreeMap;

use crate::value::HostFunction;

/// Default prefix of generated callable names
pub const DEFAULT_PREFIX: &str = "__host_callable_";

#[derive(Debug)]
pub struct CallableRegistry {
    prefix: String,
    next: u64,
    entries: BTreeMap<String, HostFunction>,
}

impl Default for CallableRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl CallableRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
            entries: BTreeMap::new(),
        }
    }

    /// Register `func` and return it under its generated name
    ///
    /// A function that is already registered keeps its existing name.
    pub fn register(&mut self, func: &HostFunction) -> HostFunction {
        if let Some(existing) = self.entries.values().find(|f| f.same_function(func)) {
            return existing.clone();
        }
        let name = format!("{}{:x}__", self.prefix, self.next);
        self.next += 1;
        let named = func.named(name.clone());
        tracing::debug!(callable = %name, "host callable registered");
        self.entries.insert(name, named.clone());
        named
    }

    pub fn get(&self, name: &str) -> Option<&HostFunction> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
