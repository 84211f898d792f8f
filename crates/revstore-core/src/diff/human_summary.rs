//! Human-readable summary renderer for revision diffs.

use crate::diff::model::{DiffClassification, DiffEntry, RevisionDiff};

/// Render a Markdown summary of a [`RevisionDiff`]
///
/// Informational only; nothing parses it back.
pub fn render_human_summary(diff: &RevisionDiff) -> String {
    let mut out = String::new();
    out.push_str("## Revision Diff\n\n");

    let class_label = match diff.classification {
        DiffClassification::Identical => "Identical",
        DiffClassification::Changed => "Changed",
    };
    out.push_str(&format!(
        "**Classification**: {class_label}  \n**Changes**: {}\n\n",
        diff.change_count()
    ));

    if diff.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    render_entries(&mut out, "Added", &diff.added);
    render_entries(&mut out, "Removed", &diff.removed);

    if !diff.modified.is_empty() {
        out.push_str(&format!("### Modified ({})\n\n", diff.modified.len()));
        for entry in &diff.modified {
            if entry.from_type == entry.to_type {
                out.push_str(&format!("- {} ({})\n", entry.object, entry.to_type));
            } else {
                out.push_str(&format!(
                    "- {} ({} -> {})\n",
                    entry.object, entry.from_type, entry.to_type
                ));
            }
        }
        out.push('\n');
    }

    out
}

fn render_entries(out: &mut String, title: &str, entries: &[DiffEntry]) {
    if entries.is_empty() {
        return;
    }
    out.push_str(&format!("### {} ({})\n\n", title, entries.len()));
    for entry in entries {
        out.push_str(&format!("- {} ({})\n", entry.object, entry.object_type));
    }
    out.push('\n');
}
