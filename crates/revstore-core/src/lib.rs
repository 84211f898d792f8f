//! revstore core - revisioned copy-on-write store for schematic objects
//!
//! This crate provides:
//! - Stable object identities valid across related revisions
//! - Typed data records for the schematic primitives, with external pointer
//!   slots for caller-owned data (component symbols, picture pixmaps)
//! - Revisions: transient or finalized snapshots sharing unchanged structure
//! - A selection algebra for batch queries and edits
//! - Added / removed / modified diffs between revisions
//! - Attribute-state queries over selections
//!
//! ```
//! use revstore_core::model::{NetData, TextData};
//! use revstore_core::ops::{add_object, relocate_object, Revision};
//!
//! let mut rev = Revision::new();
//! let net = add_object(&mut rev, NetData { width: 100.0, ..Default::default() })?;
//! let label = add_object(&mut rev, TextData { text: "netname=GND".into(), ..Default::default() })?;
//! relocate_object(&mut rev, label, Some(net), None)?;
//! rev.finalize();
//!
//! assert_eq!(rev.get_object_location(label)?, (Some(net), 0));
//! # Ok::<(), revstore_core::StoreError>(())
//! ```

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;
pub mod rules;
pub mod selection;

// Used by the logging macros
#[doc(hidden)]
pub use revstore_core_types;

pub use diff::{compute_diff, RevisionDiff};
pub use errors::{ExError, ExErrorKind, Result, StoreError};
pub use model::{Object, ObjectData, ObjectType, Pointee, Pointer};
pub use ops::Revision;
pub use queries::AttrState;
pub use selection::Selection;
