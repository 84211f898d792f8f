use std::sync::Arc;

use crate::errors::{Result, StoreError};
use crate::model::{Object, ObjectData, ObjectType};
use crate::selection::Selection;

use super::pmap::PersistentMap;

/// Per-revision state of one existing object
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    /// Shared with every revision that has not changed this object since
    pub(crate) data: Arc<ObjectData>,
    pub(crate) parent: Option<Object>,
    pub(crate) children: Arc<Vec<Object>>,
}

impl Slot {
    pub(crate) fn new(data: Arc<ObjectData>, parent: Option<Object>) -> Self {
        Self {
            data,
            parent,
            children: Arc::new(Vec::new()),
        }
    }
}

/// Snapshot of a design's object structure
///
/// A revision starts out transient (mutable). [`finalize`](Revision::finalize)
/// freezes it for good; from then on it can be shared freely between threads
/// and used as the base of new transient revisions.
///
/// Copies share every part of the structure they have not changed, so
/// [`copy_of`](Revision::copy_of) costs O(1) and a mutation of the copy only
/// duplicates the path to the touched object.
#[derive(Debug, Clone)]
pub struct Revision {
    pub(crate) transient: bool,
    pub(crate) slots: PersistentMap<Slot>,
    pub(crate) roots: Arc<Vec<Object>>,
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}

impl Revision {
    /// Create an empty transient revision
    pub fn new() -> Self {
        Self {
            transient: true,
            slots: PersistentMap::new(),
            roots: Arc::new(Vec::new()),
        }
    }

    /// Create a transient revision with the same content as `base`
    ///
    /// Nothing is copied up front; later changes to either revision are not
    /// visible in the other.
    pub fn copy_of(base: &Revision) -> Self {
        Self {
            transient: true,
            slots: base.slots.clone(),
            roots: Arc::clone(&base.roots),
        }
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }

    /// Make the revision immutable; calling it again has no effect
    pub fn finalize(&mut self) {
        if self.transient {
            self.transient = false;
            tracing::debug!(object_count = self.slots.len(), "revision finalized");
        }
    }

    /// Number of objects existing in this revision
    pub fn object_count(&self) -> usize {
        self.slots.len()
    }

    /// All existing objects in pre-order
    ///
    /// Root objects in positional order, each immediately followed by the
    /// objects attached to it.
    pub fn get_objects(&self) -> Vec<Object> {
        let mut objects = Vec::with_capacity(self.slots.len());
        for root in self.roots.iter() {
            objects.push(*root);
            if let Some(slot) = self.slots.get(root.id()) {
                objects.extend(slot.children.iter().copied());
            }
        }
        objects
    }

    pub fn object_exists(&self, ob: Object) -> bool {
        self.slots.contains_key(ob.id())
    }

    /// Type of an object's data, or `None` if it does not exist here
    pub fn get_object_type(&self, ob: Object) -> Option<ObjectType> {
        self.slots.get(ob.id()).map(|slot| slot.data.object_type())
    }

    /// Get an object's data record
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` if the object does not exist in this revision.
    pub fn get_object_data(&self, ob: Object) -> Result<&ObjectData> {
        self.slot(ob).map(|slot| slot.data.as_ref())
    }

    /// Get the object an object is attached to (if any) and its position
    /// among its siblings
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` if the object does not exist in this revision.
    pub fn get_object_location(&self, ob: Object) -> Result<(Option<Object>, usize)> {
        let slot = self.slot(ob)?;
        let siblings = self.siblings(slot.parent);
        let position = siblings
            .iter()
            .position(|o| *o == ob)
            .ok_or(StoreError::ObjectNotFound { object: ob })?;
        Ok((slot.parent, position))
    }

    /// Objects directly attached to `ob` in positional order, or all root
    /// objects if `ob` is `None`
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` if `ob` is given and does not exist.
    pub fn get_objects_attached_to(&self, ob: Option<Object>) -> Result<Vec<Object>> {
        match ob {
            None => Ok(self.roots.to_vec()),
            Some(parent) => Ok(self.slot(parent)?.children.to_vec()),
        }
    }

    /// Selected objects that exist in this revision, in ascending identity
    /// order
    pub fn get_selected_objects(&self, sel: &Selection) -> Vec<Object> {
        sel.iter().filter(|ob| self.object_exists(*ob)).collect()
    }

    /// Whether no selected object exists in this revision
    pub fn selection_is_empty(&self, sel: &Selection) -> bool {
        !sel.iter().any(|ob| self.object_exists(ob))
    }

    /// Whether `ob` is selected and exists in this revision
    pub fn object_is_selected(&self, sel: &Selection, ob: Object) -> bool {
        sel.contains(ob) && self.object_exists(ob)
    }

    pub(crate) fn slot(&self, ob: Object) -> Result<&Slot> {
        self.slots
            .get(ob.id())
            .ok_or(StoreError::ObjectNotFound { object: ob })
    }

    pub(crate) fn siblings(&self, parent: Option<Object>) -> &[Object] {
        match parent {
            None => self.roots.as_slice(),
            Some(p) => self
                .slots
                .get(p.id())
                .map(|slot| slot.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub(crate) fn ensure_transient(&self) -> Result<()> {
        if self.transient {
            Ok(())
        } else {
            Err(StoreError::RevisionNotTransient)
        }
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Vec<Object> {
        Arc::make_mut(&mut self.roots)
    }

    /// Mutable sibling list under `parent`; copies it first if it is shared
    ///
    /// # Errors
    ///
    /// Returns `ParentNotFound` if `parent` is given and does not exist.
    pub(crate) fn siblings_mut(&mut self, parent: Option<Object>) -> Result<&mut Vec<Object>> {
        match parent {
            None => Ok(self.roots_mut()),
            Some(p) => self
                .slots
                .get_mut(p.id())
                .map(|slot| Arc::make_mut(&mut slot.children))
                .ok_or(StoreError::ParentNotFound { object: p }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetData;
    use crate::ops::object_ops::add_object;

    #[test]
    fn test_new_revision_is_empty_and_transient() {
        let rev = Revision::new();
        assert!(rev.is_transient());
        assert!(rev.get_objects().is_empty());
        assert_eq!(rev.object_count(), 0);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut rev = Revision::new();
        rev.finalize();
        rev.finalize();
        assert!(!rev.is_transient());
    }

    #[test]
    fn test_copy_is_transient_even_from_finalized_base() {
        let mut base = Revision::new();
        let ob = add_object(&mut base, NetData::default()).unwrap();
        base.finalize();

        let copy = Revision::copy_of(&base);
        assert!(copy.is_transient());
        assert_eq!(copy.get_objects(), vec![ob]);
    }

    #[test]
    fn test_missing_object_queries() {
        let mut other = Revision::new();
        let ob = add_object(&mut other, NetData::default()).unwrap();
        let rev = Revision::new();

        assert!(!rev.object_exists(ob));
        assert_eq!(rev.get_object_type(ob), None);
        assert_eq!(
            rev.get_object_data(ob).unwrap_err(),
            StoreError::ObjectNotFound { object: ob }
        );
        assert!(rev.get_object_location(ob).is_err());
        assert!(rev.get_objects_attached_to(Some(ob)).is_err());
        assert!(rev.get_objects_attached_to(None).unwrap().is_empty());
    }
}
