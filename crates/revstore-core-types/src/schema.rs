//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_SESSION_ID: &str = "session_id";

// Entity identifiers
pub const FIELD_OBJECT_ID: &str = "object_id";
pub const FIELD_PARENT_ID: &str = "parent_id";
pub const FIELD_OBJECT_TYPE: &str = "object_type";

// Collection sizes
pub const FIELD_OBJECT_COUNT: &str = "object_count";
pub const FIELD_ADDED: &str = "added";
pub const FIELD_REMOVED: &str = "removed";
pub const FIELD_MODIFIED: &str = "modified";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_MESSAGE: &str = "err.message";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
