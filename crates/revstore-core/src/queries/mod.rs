//! Read-only queries over a revision and a selection
//!
//! Queries never fail: selected objects that do not exist in the revision are
//! ignored, like everywhere else selections meet revisions.

pub mod attributes;

pub use attributes::{get_selected_color, get_selected_fill, get_selected_line, AttrState};
