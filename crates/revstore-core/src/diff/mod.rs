//! Revision diff engine
//!
//! Compares the existence sets and data records of two revisions.
//!
//! ```
//! use revstore_core::diff::{compute_diff, render_human_summary};
//! use revstore_core::model::NetData;
//! use revstore_core::ops::{add_object, Revision};
//!
//! let mut base = Revision::new();
//! add_object(&mut base, NetData::default()).unwrap();
//! base.finalize();
//!
//! let mut next = Revision::copy_of(&base);
//! add_object(&mut next, NetData::default()).unwrap();
//!
//! let diff = compute_diff(&base, &next);
//! assert_eq!(diff.added.len(), 1);
//! println!("{}", render_human_summary(&diff));
//! ```
//!
//! ## Guarantees
//!
//! - Results depend only on the two revisions' content, never on how they
//!   are related. Sharing between a revision and its copy only lets the
//!   walk skip subtrees it already knows to be identical.
//! - Data records compare field by field; pointer slots compare by identity.
//! - A location change alone does not make an object modified.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compute_diff, get_added_objects, get_modified_objects, get_removed_objects};
pub use human_summary::render_human_summary;
pub use model::{DiffClassification, DiffEntry, ModifiedEntry, RevisionDiff};
