use crate::errors::{Result, StoreError};
use crate::model::{FillAttr, LineAttr, ObjectData, ObjectType};

/// Validate a data record before it is stored
///
/// Every floating-point field must be finite. Integer enumerations
/// (cap style, dash style, fill type, alignment, show-name-value) are accepted
/// whatever their value; interpreting them is up to the caller. Type mismatches
/// cannot be expressed with typed records, and strings are stored as given.
///
/// # Errors
/// Returns `InvalidObjectData` naming the first offending field.
pub fn validate_object_data(data: &ObjectData) -> Result<()> {
    let ty = data.object_type();
    match data {
        ObjectData::Arc(d) => {
            finite(ty, "x", d.x)?;
            finite(ty, "y", d.y)?;
            finite(ty, "radius", d.radius)?;
            validate_line(ty, &d.line)
        }
        ObjectData::Box(d) => {
            finite(ty, "x", d.x)?;
            finite(ty, "y", d.y)?;
            finite(ty, "width", d.width)?;
            finite(ty, "height", d.height)?;
            validate_line(ty, &d.line)?;
            validate_fill(ty, &d.fill)
        }
        ObjectData::Circle(d) => {
            finite(ty, "x", d.x)?;
            finite(ty, "y", d.y)?;
            finite(ty, "radius", d.radius)?;
            validate_line(ty, &d.line)?;
            validate_fill(ty, &d.fill)
        }
        ObjectData::Component(d) => {
            finite(ty, "x", d.x)?;
            finite(ty, "y", d.y)
        }
        ObjectData::Line(d) => {
            finite(ty, "x", d.x)?;
            finite(ty, "y", d.y)?;
            finite(ty, "width", d.width)?;
            finite(ty, "height", d.height)?;
            validate_line(ty, &d.line)
        }
        ObjectData::Net(d) => {
            finite(ty, "x", d.x)?;
            finite(ty, "y", d.y)?;
            finite(ty, "width", d.width)?;
            finite(ty, "height", d.height)
        }
        ObjectData::Path(d) => {
            validate_line(ty, &d.line)?;
            validate_fill(ty, &d.fill)
        }
        ObjectData::Picture(d) => {
            finite(ty, "x", d.x)?;
            finite(ty, "y", d.y)?;
            finite(ty, "width", d.width)?;
            finite(ty, "height", d.height)
        }
        ObjectData::Text(d) => {
            finite(ty, "x", d.x)?;
            finite(ty, "y", d.y)
        }
    }
}

/// Validate a stroke style on its own (used when restyling a selection)
///
/// # Errors
/// Returns `InvalidObjectData` naming the first non-finite field.
pub fn validate_line(object_type: ObjectType, line: &LineAttr) -> Result<()> {
    finite(object_type, "line.width", line.width)?;
    finite(object_type, "line.dash_length", line.dash_length)?;
    finite(object_type, "line.dash_space", line.dash_space)
}

/// Validate a fill style on its own (used when restyling a selection)
///
/// # Errors
/// Returns `InvalidObjectData` naming the first non-finite field.
pub fn validate_fill(object_type: ObjectType, fill: &FillAttr) -> Result<()> {
    finite(object_type, "fill.width", fill.width)?;
    finite(object_type, "fill.pitch0", fill.pitch0)?;
    finite(object_type, "fill.pitch1", fill.pitch1)
}

fn finite(object_type: ObjectType, field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StoreError::InvalidObjectData {
            object_type,
            field,
            reason: format!("must be finite, got {}", value),
        })
    }
}
