//! Structured logging facility for revstore
//!
//! One initialization point (`init(profile)`) plus three lifecycle macros:
//!
//! - `log_op_start!(op, ...)` logs the start of a boundary operation
//! - `log_op_end!(op, duration_ms = ...)` logs its successful end
//! - `log_op_error!(op, err, duration_ms = ...)` logs its failure with the
//!   canonical `err.kind` / `err.code` classification
//!
//! Lifecycle events belong to the outermost boundary (the interpreter bridge).
//! Revision operations inside this crate only emit `tracing::debug!` events.
//!
//! # Usage
//!
//! ```rust
//! use revstore_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
