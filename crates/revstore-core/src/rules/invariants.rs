use std::collections::HashSet;

use crate::model::Object;
use crate::ops::Revision;

/// Find attached objects whose parent does not exist or does not list them
///
/// Returns list of (child, parent) tuples
pub fn find_orphans(rev: &Revision) -> Vec<(Object, Object)> {
    let mut orphans = Vec::new();
    for (id, slot) in rev.slots.iter() {
        if let Some(parent) = slot.parent {
            let child = Object::from_id(id);
            let listed = rev
                .slots
                .get(parent.id())
                .is_some_and(|p| p.children.contains(&child));
            if !listed {
                orphans.push((child, parent));
            }
        }
    }
    orphans
}

/// Find objects attached to an object that is itself attached
///
/// Returns list of (child, parent) tuples
pub fn find_nested_attachments(rev: &Revision) -> Vec<(Object, Object)> {
    let mut nested = Vec::new();
    for (id, slot) in rev.slots.iter() {
        let Some(parent) = slot.parent else {
            continue;
        };
        let parent_attached = rev
            .slots
            .get(parent.id())
            .is_some_and(|p| p.parent.is_some());
        if parent_attached {
            nested.push((Object::from_id(id), parent));
        }
    }
    nested
}

/// Find attachments breaking the type rules (text under net or component)
///
/// Returns list of (child, parent) tuples
pub fn find_invalid_attachments(rev: &Revision) -> Vec<(Object, Object)> {
    let mut invalid = Vec::new();
    for (id, slot) in rev.slots.iter() {
        let Some(parent) = slot.parent else {
            continue;
        };
        let parent_ok = rev
            .get_object_type(parent)
            .is_some_and(|t| t.accepts_attachments());
        if !parent_ok || !slot.data.object_type().is_attachable() {
            invalid.push((Object::from_id(id), parent));
        }
    }
    invalid
}

/// Find objects listed in a sibling list more than once, or listed but
/// missing from the revision
pub fn find_listing_errors(rev: &Revision) -> Vec<Object> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    for ob in rev.get_objects() {
        if !seen.insert(ob) || !rev.object_exists(ob) {
            errors.push(ob);
        }
    }
    if seen.len() != rev.object_count() {
        for (id, _) in rev.slots.iter() {
            let ob = Object::from_id(id);
            if !seen.contains(&ob) {
                errors.push(ob);
            }
        }
    }
    errors
}

/// Whether the revision satisfies every structural invariant
pub fn is_consistent(rev: &Revision) -> bool {
    find_orphans(rev).is_empty()
        && find_nested_attachments(rev).is_empty()
        && find_invalid_attachments(rev).is_empty()
        && find_listing_errors(rev).is_empty()
}
