use std::sync::Arc;

use crate::errors::Result;
use crate::model::{FillAttr, LineAttr, Object, ObjectData, ObjectType};
use crate::rules::validation::{validate_fill, validate_line};
use crate::selection::Selection;

use super::revision::Revision;

/// Selected existing objects for which `needs_change` holds
fn targets<'a, F>(
    rev: &'a Revision,
    sel: &Selection,
    needs_change: F,
) -> Result<Vec<(Object, &'a ObjectData)>>
where
    F: Fn(&ObjectData) -> bool,
{
    let mut out = Vec::new();
    for ob in sel.iter() {
        let Some(slot) = rev.slots.get(ob.id()) else {
            continue;
        };
        if needs_change(&slot.data) {
            out.try_reserve(1)?;
            out.push((ob, slot.data.as_ref()));
        }
    }
    Ok(out)
}

/// Replace the data of each target with an edited copy
fn rewrite<F>(rev: &mut Revision, updates: Vec<(Object, ObjectData)>, edit: F)
where
    F: Fn(&mut ObjectData),
{
    for (ob, mut data) in updates {
        edit(&mut data);
        if let Some(slot) = rev.slots.get_mut(ob.id()) {
            slot.data = Arc::new(data);
        }
    }
}

fn prepare<F>(rev: &Revision, sel: &Selection, needs_change: F) -> Result<Vec<(Object, ObjectData)>>
where
    F: Fn(&ObjectData) -> bool,
{
    rev.ensure_transient()?;
    let found = targets(rev, sel, needs_change)?;
    let mut updates = Vec::new();
    updates.try_reserve(found.len())?;
    updates.extend(found.into_iter().map(|(ob, data)| (ob, data.clone())));
    Ok(updates)
}

/// Set the color of every selected object that has one
///
/// Objects without a color, and objects already using it, are left alone.
///
/// # Errors
/// * `RevisionNotTransient` - The revision has been finalized
/// * `OutOfMemory` - Allocation failed; the revision is unchanged
pub fn set_selected_color(rev: &mut Revision, sel: &Selection, color: i32) -> Result<()> {
    let updates = prepare(rev, sel, |d| d.color().is_some_and(|c| c != color))?;
    let count = updates.len();
    rewrite(rev, updates, |d| {
        if let Some(c) = d.color_mut() {
            *c = color;
        }
    });
    tracing::debug!(object_count = count, color, "selection recolored");
    Ok(())
}

/// Set the stroke style of every selected object that has one
///
/// # Errors
/// * `RevisionNotTransient` - The revision has been finalized
/// * `InvalidObjectData` - A floating-point field of `line` is not finite,
///   even when no selected object carries a stroke
/// * `OutOfMemory` - Allocation failed; the revision is unchanged
pub fn set_selected_line(rev: &mut Revision, sel: &Selection, line: LineAttr) -> Result<()> {
    let updates = prepare(rev, sel, |d| d.line().is_some_and(|l| *l != line))?;
    let carrier = updates.first().map_or(ObjectType::Line, |(_, d)| d.object_type());
    validate_line(carrier, &line)?;
    let count = updates.len();
    rewrite(rev, updates, |d| {
        if let Some(l) = d.line_mut() {
            *l = line;
        }
    });
    tracing::debug!(object_count = count, "selection line style set");
    Ok(())
}

/// Set the fill style of every selected object that has one
///
/// # Errors
/// * `RevisionNotTransient` - The revision has been finalized
/// * `InvalidObjectData` - A floating-point field of `fill` is not finite,
///   even when no selected object carries a fill
/// * `OutOfMemory` - Allocation failed; the revision is unchanged
pub fn set_selected_fill(rev: &mut Revision, sel: &Selection, fill: FillAttr) -> Result<()> {
    let updates = prepare(rev, sel, |d| d.fill().is_some_and(|f| *f != fill))?;
    let carrier = updates.first().map_or(ObjectType::Box, |(_, d)| d.object_type());
    validate_fill(carrier, &fill)?;
    let count = updates.len();
    rewrite(rev, updates, |d| {
        if let Some(f) = d.fill_mut() {
            *f = fill;
        }
    });
    tracing::debug!(object_count = count, "selection fill style set");
    Ok(())
}
