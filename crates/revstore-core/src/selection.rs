//! Selection algebra
//!
//! A [`Selection`] is an immutable set of object identities. It is not tied to
//! any revision: members that do not exist in the revision a selection is used
//! with are ignored at query time.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::model::Object;
use crate::ops::Revision;

/// Immutable set of object identities
///
/// Cloning is O(1). Every operation returns a new selection and leaves its
/// inputs untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    objects: Arc<BTreeSet<Object>>,
}

impl Selection {
    fn from_set(objects: BTreeSet<Object>) -> Self {
        Self {
            objects: Arc::new(objects),
        }
    }

    /// The empty selection
    pub fn none() -> Self {
        Self::default()
    }

    /// A selection holding exactly `ob`
    pub fn single(ob: Object) -> Self {
        Self::from_set(BTreeSet::from([ob]))
    }

    /// Objects directly attached to `ob`, or every root object if `ob` is
    /// `None`
    ///
    /// Empty if `ob` does not exist in `rev`.
    pub fn attached_to(rev: &Revision, ob: Option<Object>) -> Self {
        match ob {
            None => rev.siblings(None).iter().copied().collect(),
            Some(parent) if rev.object_exists(parent) => {
                rev.siblings(Some(parent)).iter().copied().collect()
            }
            Some(_) => Self::none(),
        }
    }

    /// Every object existing in `rev`, attached or not
    pub fn all(rev: &Revision) -> Self {
        rev.slots.keys().map(Object::from_id).collect()
    }

    /// Every object existing in `rev` except the members of `sel`
    pub fn all_except(rev: &Revision, sel: &Selection) -> Self {
        rev.slots
            .keys()
            .map(Object::from_id)
            .filter(|ob| !sel.contains(*ob))
            .collect()
    }

    /// This selection plus `ob`
    pub fn including(&self, ob: Object) -> Self {
        if self.contains(ob) {
            return self.clone();
        }
        let mut objects = (*self.objects).clone();
        objects.insert(ob);
        Self::from_set(objects)
    }

    /// This selection without `ob`
    pub fn excluding(&self, ob: Object) -> Self {
        if !self.contains(ob) {
            return self.clone();
        }
        let mut objects = (*self.objects).clone();
        objects.remove(&ob);
        Self::from_set(objects)
    }

    pub fn union(&self, other: &Selection) -> Self {
        if Arc::ptr_eq(&self.objects, &other.objects) || other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        self.objects.union(&other.objects).copied().collect()
    }

    pub fn intersection(&self, other: &Selection) -> Self {
        if Arc::ptr_eq(&self.objects, &other.objects) {
            return self.clone();
        }
        self.objects.intersection(&other.objects).copied().collect()
    }

    pub fn difference(&self, other: &Selection) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        self.objects.difference(&other.objects).copied().collect()
    }

    pub fn contains(&self, ob: Object) -> bool {
        self.objects.contains(&ob)
    }

    /// Number of members, whether or not they exist in any revision
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Members in ascending identity order
    pub fn iter(&self) -> impl Iterator<Item = Object> + '_ {
        self.objects.iter().copied()
    }
}

impl FromIterator<Object> for Selection {
    fn from_iter<I: IntoIterator<Item = Object>>(iter: I) -> Self {
        Self::from_set(iter.into_iter().collect())
    }
}

impl From<Object> for Selection {
    fn from(ob: Object) -> Self {
        Self::single(ob)
    }
}
