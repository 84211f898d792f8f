use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity token for a schematic element
///
/// Identities are drawn from a process-wide counter, so an `Object` never
/// collides with another one and stays a valid lookup key in every revision,
/// including after it has been deleted from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Object(u64);

impl Object {
    pub(crate) fn allocate() -> Self {
        Object(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) fn from_id(id: u64) -> Self {
        Object(id)
    }

    /// Numeric identity, for logging and reports
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ob#{}", self.0)
    }
}

/// Primitive kind of an object's data record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Arc,
    Box,
    Circle,
    Component,
    Line,
    Net,
    Path,
    Picture,
    Text,
}

impl ObjectType {
    /// Whether objects of this type can have other objects attached
    pub fn accepts_attachments(&self) -> bool {
        matches!(self, ObjectType::Net | ObjectType::Component)
    }

    /// Whether objects of this type can be attached to another object
    pub fn is_attachable(&self) -> bool {
        matches!(self, ObjectType::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Arc => "arc",
            ObjectType::Box => "box",
            ObjectType::Circle => "circle",
            ObjectType::Component => "component",
            ObjectType::Line => "line",
            ObjectType::Net => "net",
            ObjectType::Path => "path",
            ObjectType::Picture => "picture",
            ObjectType::Text => "text",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
