//! Diff computation over the shared slot tries of two revisions.

use std::sync::Arc;

use crate::diff::model::{
    DiffClassification, DiffEntry, ModifiedEntry, RevisionDiff, DIFF_SCHEMA_VERSION,
};
use crate::model::Object;
use crate::ops::revision::{Revision, Slot};
use crate::selection::Selection;

enum Change<'a> {
    Added(&'a Slot),
    Removed(&'a Slot),
    Modified(&'a Slot, &'a Slot),
}

/// Visit every object that differs between `from` and `to`
fn walk<'a, F>(from: &'a Revision, to: &'a Revision, mut visit: F)
where
    F: FnMut(Object, Change<'a>),
{
    from.slots.diff(&to.slots, |id, a, b| {
        let ob = Object::from_id(id);
        match (a, b) {
            (Some(a), Some(b)) => {
                if !Arc::ptr_eq(&a.data, &b.data) && a.data != b.data {
                    visit(ob, Change::Modified(a, b));
                }
            }
            (None, Some(b)) => visit(ob, Change::Added(b)),
            (Some(a), None) => visit(ob, Change::Removed(a)),
            (None, None) => {}
        }
    });
}

/// Objects existing in `to` but not in `from`
pub fn get_added_objects(from: &Revision, to: &Revision) -> Selection {
    let mut added = Vec::new();
    walk(from, to, |ob, change| {
        if matches!(change, Change::Added(_)) {
            added.push(ob);
        }
    });
    added.into_iter().collect()
}

/// Objects existing in `from` but not in `to`
pub fn get_removed_objects(from: &Revision, to: &Revision) -> Selection {
    let mut removed = Vec::new();
    walk(from, to, |ob, change| {
        if matches!(change, Change::Removed(_)) {
            removed.push(ob);
        }
    });
    removed.into_iter().collect()
}

/// Objects existing in both revisions whose type or data differs
pub fn get_modified_objects(from: &Revision, to: &Revision) -> Selection {
    let mut modified = Vec::new();
    walk(from, to, |ob, change| {
        if matches!(change, Change::Modified(..)) {
            modified.push(ob);
        }
    });
    modified.into_iter().collect()
}

/// Compute the full structured diff in one walk
pub fn compute_diff(from: &Revision, to: &Revision) -> RevisionDiff {
    let mut added = Vec::new();
    let mut removed = Vec::new();
    let mut modified = Vec::new();

    walk(from, to, |object, change| match change {
        Change::Added(slot) => added.push(DiffEntry {
            object,
            object_type: slot.data.object_type(),
        }),
        Change::Removed(slot) => removed.push(DiffEntry {
            object,
            object_type: slot.data.object_type(),
        }),
        Change::Modified(a, b) => modified.push(ModifiedEntry {
            object,
            from_type: a.data.object_type(),
            to_type: b.data.object_type(),
        }),
    });

    // Deterministic serialization order
    added.sort_by_key(|e| e.object);
    removed.sort_by_key(|e| e.object);
    modified.sort_by_key(|e| e.object);

    let classification = if added.is_empty() && removed.is_empty() && modified.is_empty() {
        DiffClassification::Identical
    } else {
        DiffClassification::Changed
    };

    tracing::debug!(
        added = added.len(),
        removed = removed.len(),
        modified = modified.len(),
        "revision diff computed"
    );

    RevisionDiff {
        diff_schema_version: DIFF_SCHEMA_VERSION,
        classification,
        added,
        removed,
        modified,
    }
}
