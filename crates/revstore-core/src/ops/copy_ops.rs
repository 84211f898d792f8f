use std::sync::Arc;

use crate::errors::Result;
use crate::model::Object;
use crate::selection::Selection;

use super::revision::{Revision, Slot};

/// Copy an object and its attached objects from `src` into `dest`
///
/// The copy gets a fresh identity and is appended as a root object, even if
/// the original was attached. Copies of attached objects get fresh
/// identities too and stay attached to the new root. Data records are
/// duplicated, which increments any pointer slots they hold.
///
/// To duplicate an object within one revision, copy from a snapshot:
/// `copy_object(&mut rev, &Revision::copy_of(&rev), ob)`.
///
/// # Errors
/// * `RevisionNotTransient` - `dest` has been finalized
/// * `ObjectNotFound` - `ob` does not exist in `src`
/// * `OutOfMemory` - Allocation failed; `dest` is unchanged
pub fn copy_object(dest: &mut Revision, src: &Revision, ob: Object) -> Result<Object> {
    dest.ensure_transient()?;
    let slot = src.slot(ob)?;
    dest.roots_mut().try_reserve(1)?;
    let children = reserved(slot.children.len())?;

    let copy = copy_subtree(dest, src, slot, children);
    tracing::debug!(object_id = ob.id(), copy_id = copy.id(), "object copied");
    Ok(copy)
}

/// Copy every selected object that exists in `src` into `dest`
///
/// Attached objects are copied along with their parent. A selected attached
/// object whose parent is not selected is copied on its own and becomes a
/// root object in `dest`. New roots are appended in `src` order.
///
/// # Returns
/// A selection of the new root objects (not their attachments)
///
/// # Errors
/// * `RevisionNotTransient` - `dest` has been finalized
/// * `OutOfMemory` - Allocation failed; `dest` is unchanged
pub fn copy_objects(dest: &mut Revision, src: &Revision, sel: &Selection) -> Result<Selection> {
    dest.ensure_transient()?;

    let mut picked: Vec<(&Slot, Vec<Object>)> = Vec::new();
    for ob in src.get_objects() {
        if !sel.contains(ob) {
            continue;
        }
        let Some(slot) = src.slots.get(ob.id()) else {
            continue;
        };
        if let Some(parent) = slot.parent {
            if sel.contains(parent) {
                continue;
            }
        }
        picked.try_reserve(1)?;
        picked.push((slot, reserved(slot.children.len())?));
    }

    dest.roots_mut().try_reserve(picked.len())?;
    let mut copies = reserved(picked.len())?;
    for (slot, children) in picked {
        copies.push(copy_subtree(dest, src, slot, children));
    }

    tracing::debug!(object_count = copies.len(), "objects copied");
    Ok(copies.into_iter().collect())
}

fn reserved(capacity: usize) -> Result<Vec<Object>> {
    let mut v = Vec::new();
    v.try_reserve(capacity)?;
    Ok(v)
}

/// Insert a copy of `slot` and its attachments as a new root
///
/// The caller has already reserved room for one more root, and `children`
/// has room for every attachment.
fn copy_subtree(dest: &mut Revision, src: &Revision, slot: &Slot, mut children: Vec<Object>) -> Object {
    let root = Object::allocate();
    for child in slot.children.iter() {
        let Some(child_slot) = src.slots.get(child.id()) else {
            continue;
        };
        let copy = Object::allocate();
        let data = Arc::new(child_slot.data.as_ref().clone());
        dest.slots.insert(copy.id(), Slot::new(data, Some(root)));
        children.push(copy);
    }

    let mut root_slot = Slot::new(Arc::new(slot.data.as_ref().clone()), None);
    root_slot.children = Arc::new(children);
    dest.slots.insert(root.id(), root_slot);
    dest.roots_mut().push(root);
    root
}
