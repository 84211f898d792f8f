//! Attribute state of a selection
//!
//! Answers "what value does this attribute have across the selection?" for a
//! property editor: not applicable, one consistent value, or mixed.

use crate::model::{FillAttr, LineAttr, ObjectData};
use crate::ops::Revision;
use crate::selection::Selection;

/// Combined state of one attribute over a set of objects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrState<T> {
    /// No selected object carries the attribute
    NotApplicable,
    /// Every selected object carrying the attribute has this value
    Consistent(T),
    /// Selected objects carry different values
    Inconsistent,
}

impl<T> AttrState<T> {
    /// The consistent value, if there is one
    pub fn value(&self) -> Option<&T> {
        match self {
            AttrState::Consistent(value) => Some(value),
            AttrState::NotApplicable | AttrState::Inconsistent => None,
        }
    }
}

fn fold_state<T: PartialEq>(values: impl Iterator<Item = T>) -> AttrState<T> {
    let mut state = AttrState::NotApplicable;
    for value in values {
        state = match state {
            AttrState::NotApplicable => AttrState::Consistent(value),
            AttrState::Consistent(current) if current == value => AttrState::Consistent(current),
            AttrState::Consistent(_) | AttrState::Inconsistent => return AttrState::Inconsistent,
        };
    }
    state
}

fn selected_data<'a>(rev: &'a Revision, sel: &'a Selection) -> impl Iterator<Item = &'a ObjectData> + 'a {
    sel.iter().filter_map(move |ob| rev.get_object_data(ob).ok())
}

/// Color across the selected objects that carry one
pub fn get_selected_color(rev: &Revision, sel: &Selection) -> AttrState<i32> {
    fold_state(selected_data(rev, sel).filter_map(ObjectData::color))
}

/// Stroke style across the selected objects that carry one
pub fn get_selected_line(rev: &Revision, sel: &Selection) -> AttrState<LineAttr> {
    fold_state(selected_data(rev, sel).filter_map(|d| d.line().copied()))
}

/// Fill style across the selected objects that carry one
pub fn get_selected_fill(rev: &Revision, sel: &Selection) -> AttrState<FillAttr> {
    fold_state(selected_data(rev, sel).filter_map(|d| d.fill().copied()))
}
