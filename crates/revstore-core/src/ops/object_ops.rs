use std::collections::BTreeSet;
use std::sync::Arc;

use crate::errors::{Result, StoreError};
use crate::model::{Object, ObjectData, ObjectType};
use crate::rules::validation::validate_object_data;
use crate::selection::Selection;

use super::revision::{Revision, Slot};

/// Add a new root object at the end of the revision
///
/// # Arguments
/// * `rev` - Transient revision to add to
/// * `data` - Data record of the new object
///
/// # Returns
/// The identity of the new object
///
/// # Errors
/// * `RevisionNotTransient` - The revision has been finalized
/// * `InvalidObjectData` - The record failed validation
/// * `OutOfMemory` - The root list could not grow
pub fn add_object(rev: &mut Revision, data: impl Into<ObjectData>) -> Result<Object> {
    rev.ensure_transient()?;
    let data = data.into();
    validate_object_data(&data)?;
    rev.roots_mut().try_reserve(1)?;

    let ob = Object::allocate();
    let object_type = data.object_type();
    rev.slots.insert(ob.id(), Slot::new(Arc::new(data), None));
    rev.roots_mut().push(ob);

    tracing::debug!(object_id = ob.id(), %object_type, "object added");
    Ok(ob)
}

/// Set an object's data record
///
/// If `ob` does not exist in the revision it is created as the last root
/// object. Otherwise its data is replaced in place and its location kept.
///
/// # Errors
/// * `RevisionNotTransient` - The revision has been finalized
/// * `InvalidObjectData` - The record failed validation
/// * `InvalidExistingChild` - `ob` has attached objects and the new type
///   cannot carry them
/// * `InvalidParent` - `ob` is attached and the new type cannot be attached
/// * `OutOfMemory` - The root list could not grow
pub fn set_object_data(rev: &mut Revision, ob: Object, data: impl Into<ObjectData>) -> Result<()> {
    rev.ensure_transient()?;
    let data = data.into();
    validate_object_data(&data)?;
    let object_type = data.object_type();

    let existing = rev
        .slots
        .get(ob.id())
        .map(|slot| (slot.parent, !slot.children.is_empty()));

    match existing {
        None => {
            rev.roots_mut().try_reserve(1)?;
            rev.slots.insert(ob.id(), Slot::new(Arc::new(data), None));
            rev.roots_mut().push(ob);
            tracing::debug!(object_id = ob.id(), %object_type, "object re-created");
        }
        Some((parent, has_children)) => {
            if has_children && !object_type.accepts_attachments() {
                return Err(StoreError::InvalidExistingChild { object: ob });
            }
            if let Some(parent) = parent {
                if !object_type.is_attachable() {
                    return Err(StoreError::InvalidParent {
                        reason: format!(
                            "{} is attached to {}; only text can be attached",
                            ob, parent
                        ),
                    });
                }
            }
            if let Some(slot) = rev.slots.get_mut(ob.id()) {
                slot.data = Arc::new(data);
            }
            tracing::debug!(object_id = ob.id(), %object_type, "object data set");
        }
    }
    Ok(())
}

/// Move an object within the revision
///
/// Attaches `ob` to `attach_to` (or makes it a root object if `None`) and
/// places it immediately before `insert_before`, or at the end of the sibling
/// list if `insert_before` is `None`. Relocating an object before itself does
/// nothing.
///
/// # Errors
/// * `RevisionNotTransient` - The revision has been finalized
/// * `ObjectNotFound` - `ob` does not exist
/// * `ParentNotFound` - `attach_to` does not exist
/// * `InvalidParent` - `ob` is not text, or `attach_to` is not a net or
///   component
/// * `SuccessorNotFound` - `insert_before` does not exist
/// * `SuccessorNotSibling` - `insert_before` is not attached to `attach_to`
/// * `OutOfMemory` - The target sibling list could not grow
pub fn relocate_object(
    rev: &mut Revision,
    ob: Object,
    attach_to: Option<Object>,
    insert_before: Option<Object>,
) -> Result<()> {
    rev.ensure_transient()?;
    let slot = rev.slot(ob)?;
    let ob_type = slot.data.object_type();
    let old_parent = slot.parent;

    if let Some(parent) = attach_to {
        let parent_type = rev
            .get_object_type(parent)
            .ok_or(StoreError::ParentNotFound { object: parent })?;
        check_attachment(ob, ob_type, parent, parent_type)?;
    }

    if let Some(successor) = insert_before {
        let successor_parent = rev
            .slots
            .get(successor.id())
            .ok_or(StoreError::SuccessorNotFound { object: successor })?
            .parent;
        if successor_parent != attach_to {
            return Err(StoreError::SuccessorNotSibling { object: successor });
        }
    }

    if insert_before == Some(ob) {
        return Ok(());
    }

    if old_parent != attach_to {
        rev.siblings_mut(attach_to)?.try_reserve(1)?;
    }

    rev.siblings_mut(old_parent)?.retain(|o| *o != ob);
    let target = rev.siblings_mut(attach_to)?;
    let position = insert_before
        .and_then(|successor| target.iter().position(|o| *o == successor))
        .unwrap_or(target.len());
    target.insert(position, ob);

    if old_parent != attach_to {
        if let Some(slot) = rev.slots.get_mut(ob.id()) {
            slot.parent = attach_to;
        }
    }

    tracing::debug!(
        object_id = ob.id(),
        parent_id = attach_to.map(|p| p.id()),
        position,
        "object relocated"
    );
    Ok(())
}

pub(crate) fn check_attachment(
    ob: Object,
    ob_type: ObjectType,
    parent: Object,
    parent_type: ObjectType,
) -> Result<()> {
    if !parent_type.accepts_attachments() {
        return Err(StoreError::InvalidParent {
            reason: format!(
                "cannot attach to {} ({}); only nets and components accept attachments",
                parent, parent_type
            ),
        });
    }
    if !ob_type.is_attachable() {
        return Err(StoreError::InvalidParent {
            reason: format!("cannot attach {} ({}); only text can be attached", ob, ob_type),
        });
    }
    Ok(())
}

/// Delete an object and everything attached to it
///
/// The identity stays usable: a later `set_object_data` re-creates it.
///
/// # Errors
/// * `RevisionNotTransient` - The revision has been finalized
/// * `ObjectNotFound` - `ob` does not exist
pub fn delete_object(rev: &mut Revision, ob: Object) -> Result<()> {
    rev.ensure_transient()?;
    let slot = rev.slot(ob)?;
    let parent = slot.parent;
    let children = Arc::clone(&slot.children);

    rev.siblings_mut(parent)?.retain(|o| *o != ob);
    for child in children.iter() {
        rev.slots.remove(child.id());
    }
    rev.slots.remove(ob.id());

    tracing::debug!(
        object_id = ob.id(),
        attached_removed = children.len(),
        "object deleted"
    );
    Ok(())
}

/// Delete every selected object that exists, with its attached objects
///
/// Selected objects that do not exist in the revision are ignored.
///
/// # Errors
/// * `RevisionNotTransient` - The revision has been finalized
pub fn delete_objects(rev: &mut Revision, sel: &Selection) -> Result<()> {
    rev.ensure_transient()?;

    let mut doomed = BTreeSet::new();
    let mut touched_parents = BTreeSet::new();
    let mut touches_roots = false;
    for ob in sel.iter() {
        let Some(slot) = rev.slots.get(ob.id()) else {
            continue;
        };
        doomed.insert(ob);
        doomed.extend(slot.children.iter().copied());
        match slot.parent {
            None => touches_roots = true,
            Some(parent) => {
                touched_parents.insert(parent);
            }
        }
    }
    if doomed.is_empty() {
        return Ok(());
    }

    if touches_roots {
        rev.roots_mut().retain(|o| !doomed.contains(o));
    }
    for parent in touched_parents {
        if doomed.contains(&parent) {
            continue;
        }
        rev.siblings_mut(Some(parent))?
            .retain(|o| !doomed.contains(o));
    }
    for ob in &doomed {
        rev.slots.remove(ob.id());
    }

    tracing::debug!(object_count = doomed.len(), "objects deleted");
    Ok(())
}
