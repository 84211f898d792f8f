//! revstore bridge - boundary contracts around the store
//!
//! Provides the two surfaces the store is embedded through:
//!
//! - An extension-language boundary: a fixed [`Value`] mapping, the
//!   [`Interpreter`] trait an embedded interpreter implements, and a
//!   [`Session`] that owns one interpreter together with its
//!   [`CallableRegistry`] of host functions.
//! - An export boundary: the read-only [`Netlist`] shapes consumed by netlist
//!   export scripts.
//!
//! ## Logging Ownership
//!
//! Calls crossing the interpreter boundary are logged here with
//! `log_op_start!` / `log_op_end!` / `log_op_error!`. The store below only
//! emits `tracing::debug!()` events.

pub mod error;
pub mod interpreter;
pub mod netlist;
pub mod registry;
pub mod session;
pub mod value;

pub use error::{BridgeError, Result};
pub use interpreter::Interpreter;
pub use netlist::{Net, Netlist, Package, Pin};
pub use registry::CallableRegistry;
pub use session::Session;
pub use value::{Callable, HostFunction, Value};
