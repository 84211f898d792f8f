pub mod attribute_ops;
pub mod copy_ops;
pub mod object_ops;
pub mod pmap;
pub mod revision;

pub use attribute_ops::{set_selected_color, set_selected_fill, set_selected_line};
pub use copy_ops::{copy_object, copy_objects};
pub use object_ops::{add_object, delete_object, delete_objects, relocate_object, set_object_data};
pub use revision::Revision;
