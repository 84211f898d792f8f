use super::attrs::{FillAttr, LineAttr};
use super::object::ObjectType;
use super::pointer::Pointer;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcData {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub startangle: i32,
    pub sweepangle: i32,
    pub color: i32,
    pub line: LineAttr,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxData {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: i32,
    pub line: LineAttr,
    pub fill: FillAttr,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircleData {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: i32,
    pub line: LineAttr,
    pub fill: FillAttr,
}

/// Placed symbol instance; `symbol` refers to the caller's symbol definition
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentData {
    pub x: f64,
    pub y: f64,
    pub selectable: bool,
    pub angle: i32,
    pub mirror: bool,
    pub symbol: Pointer,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineData {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: i32,
    pub line: LineAttr,
}

/// Net segment, bus segment or pin
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetData {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: i32,
    pub is_bus: bool,
    pub is_pin: bool,
    pub is_inverted: bool,
}

/// `pathdata` is raw bytes, not necessarily UTF-8; embedded NUL is kept
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    pub pathdata: Vec<u8>,
    pub color: i32,
    pub line: LineAttr,
    pub fill: FillAttr,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PictureData {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: i32,
    pub mirror: bool,
    pub pixmap: Pointer,
}

/// Free text or attribute; `text` is raw bytes, not necessarily UTF-8
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextData {
    pub x: f64,
    pub y: f64,
    pub color: i32,
    pub text_size: i32,
    pub visibility: bool,
    pub show_name_value: i32,
    pub angle: i32,
    pub alignment: i32,
    pub text: Vec<u8>,
}

macro_rules! object_variants {
    ($($variant:ident($data:ident) => $accessor:ident),* $(,)?) => {
        /// Typed data record of one object
        ///
        /// Equality is field by field. Pointer slots compare by identity.
        #[derive(Debug, Clone, PartialEq)]
        pub enum ObjectData {
            $($variant($data),)*
        }

        impl ObjectData {
            pub fn object_type(&self) -> ObjectType {
                match self {
                    $(ObjectData::$variant(_) => ObjectType::$variant,)*
                }
            }

            $(
                pub fn $accessor(&self) -> Option<&$data> {
                    match self {
                        ObjectData::$variant(data) => Some(data),
                        _ => None,
                    }
                }
            )*
        }

        $(
            impl From<$data> for ObjectData {
                fn from(data: $data) -> Self {
                    ObjectData::$variant(data)
                }
            }
        )*
    };
}

object_variants! {
    Arc(ArcData) => as_arc,
    Box(BoxData) => as_box,
    Circle(CircleData) => as_circle,
    Component(ComponentData) => as_component,
    Line(LineData) => as_line,
    Net(NetData) => as_net,
    Path(PathData) => as_path,
    Picture(PictureData) => as_picture,
    Text(TextData) => as_text,
}

impl ObjectData {
    /// Color, for the kinds that carry one
    pub fn color(&self) -> Option<i32> {
        match self {
            ObjectData::Arc(d) => Some(d.color),
            ObjectData::Box(d) => Some(d.color),
            ObjectData::Circle(d) => Some(d.color),
            ObjectData::Line(d) => Some(d.color),
            ObjectData::Net(d) => Some(d.color),
            ObjectData::Path(d) => Some(d.color),
            ObjectData::Text(d) => Some(d.color),
            ObjectData::Component(_) | ObjectData::Picture(_) => None,
        }
    }

    /// Stroke style, for the kinds that carry one
    pub fn line(&self) -> Option<&LineAttr> {
        match self {
            ObjectData::Arc(d) => Some(&d.line),
            ObjectData::Box(d) => Some(&d.line),
            ObjectData::Circle(d) => Some(&d.line),
            ObjectData::Line(d) => Some(&d.line),
            ObjectData::Path(d) => Some(&d.line),
            _ => None,
        }
    }

    /// Fill style, for the kinds that carry one
    pub fn fill(&self) -> Option<&FillAttr> {
        match self {
            ObjectData::Box(d) => Some(&d.fill),
            ObjectData::Circle(d) => Some(&d.fill),
            ObjectData::Path(d) => Some(&d.fill),
            _ => None,
        }
    }

    pub(crate) fn color_mut(&mut self) -> Option<&mut i32> {
        match self {
            ObjectData::Arc(d) => Some(&mut d.color),
            ObjectData::Box(d) => Some(&mut d.color),
            ObjectData::Circle(d) => Some(&mut d.color),
            ObjectData::Line(d) => Some(&mut d.color),
            ObjectData::Net(d) => Some(&mut d.color),
            ObjectData::Path(d) => Some(&mut d.color),
            ObjectData::Text(d) => Some(&mut d.color),
            ObjectData::Component(_) | ObjectData::Picture(_) => None,
        }
    }

    pub(crate) fn line_mut(&mut self) -> Option<&mut LineAttr> {
        match self {
            ObjectData::Arc(d) => Some(&mut d.line),
            ObjectData::Box(d) => Some(&mut d.line),
            ObjectData::Circle(d) => Some(&mut d.line),
            ObjectData::Line(d) => Some(&mut d.line),
            ObjectData::Path(d) => Some(&mut d.line),
            _ => None,
        }
    }

    pub(crate) fn fill_mut(&mut self) -> Option<&mut FillAttr> {
        match self {
            ObjectData::Box(d) => Some(&mut d.fill),
            ObjectData::Circle(d) => Some(&mut d.fill),
            ObjectData::Path(d) => Some(&mut d.fill),
            _ => None,
        }
    }
}
