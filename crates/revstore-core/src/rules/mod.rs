//! Validation of data records and structural invariants of revisions

pub mod invariants;
pub mod validation;

pub use invariants::is_consistent;
pub use validation::validate_object_data;
