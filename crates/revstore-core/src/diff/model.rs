//! Structured diff output types.
//!
//! Lists are sorted by object identity so serialization is deterministic.

use serde::Serialize;

use crate::model::{Object, ObjectType};

/// Schema version of [`RevisionDiff`]
pub const DIFF_SCHEMA_VERSION: u32 = 1;

/// Structured diff between two revisions
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RevisionDiff {
    pub diff_schema_version: u32,
    pub classification: DiffClassification,
    /// Objects existing only in the newer revision
    pub added: Vec<DiffEntry>,
    /// Objects existing only in the older revision
    pub removed: Vec<DiffEntry>,
    /// Objects existing in both whose data differs
    pub modified: Vec<ModifiedEntry>,
}

impl RevisionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffClassification {
    Identical,
    Changed,
}

/// An added or removed object
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DiffEntry {
    pub object: Object,
    pub object_type: ObjectType,
}

/// An object whose data record changed; the type may have changed as well
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ModifiedEntry {
    pub object: Object,
    pub from_type: ObjectType,
    pub to_type: ObjectType,
}
