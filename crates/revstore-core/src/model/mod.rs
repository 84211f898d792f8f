pub mod attrs;
pub mod data;
pub mod object;
pub mod pointer;

pub use attrs::{FillAttr, LineAttr};
pub use data::{
    ArcData, BoxData, CircleData, ComponentData, LineData, NetData, ObjectData, PathData,
    PictureData, TextData,
};
pub use object::{Object, ObjectType};
pub use pointer::{Pointee, Pointer};
