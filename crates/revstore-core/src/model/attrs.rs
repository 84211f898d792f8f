/// Stroke style shared by arcs, boxes, circles, lines and paths
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineAttr {
    pub width: f64,
    pub cap_style: i32,
    pub dash_style: i32,
    pub dash_length: f64,
    pub dash_space: f64,
}

/// Fill style shared by boxes, circles and paths
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FillAttr {
    pub type_: i32,
    pub width: f64,
    pub angle0: i32,
    pub pitch0: f64,
    pub angle1: i32,
    pub pitch1: f64,
}
