//! Core types shared across revstore facilities
//!
//! This crate provides foundational types used by the store, its error
//! facility and the logging facility:
//!
//! - **Correlation types**: SessionId for tying boundary events to one embedding session
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::SessionId;
