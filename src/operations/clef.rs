//! Clefs
//!
//! Every clef edit carries the pitch updates for the custodes and neumes
//! whose reading it changes; they are applied in the same edit.

use serde::{Deserialize, Serialize};

use super::pitched::{apply_pitch_info, PitchedElementUpdate};
use super::{place, placement};
use crate::errors::{EditError, EditResult};
use crate::models::{BoundingBox, ClefShape, MeiDocument, NodeId, NodeName};

/// One clef to delete, with the pitch updates its removal causes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClefDeletion {
    pub id: String,
    #[serde(default)]
    pub pitch_info: Vec<PitchedElementUpdate>,
}

fn write_line(doc: &mut MeiDocument, clef: NodeId, line: u32) -> EditResult<()> {
    if line == 0 {
        return Err(EditError::malformed("clef lines are numbered from 1"));
    }
    doc.set_attribute(clef, "line", line.to_string());
    Ok(())
}

/// Insert a clef; returns its id
pub fn insert_clef(
    doc: &mut MeiDocument,
    shape: ClefShape,
    line: u32,
    pitch_info: &[PitchedElementUpdate],
    before_id: Option<&str>,
    bbox: Option<BoundingBox>,
) -> EditResult<String> {
    let at = placement(doc, before_id)?;

    let clef = doc.create(NodeName::Clef);
    doc.set_attribute(clef, "shape", shape.as_str());
    write_line(doc, clef, line)?;
    place(doc, clef, at)?;
    if let Some(bbox) = bbox {
        doc.add_zone(clef, bbox)?;
    }
    apply_pitch_info(doc, pitch_info)?;

    let id = doc.id_of(clef).to_string();
    log::info!("inserted {} clef '{}' on line {}", shape.as_str(), id, line);
    Ok(id)
}

/// Move a clef to another staff line
pub fn move_clef(
    doc: &mut MeiDocument,
    id: &str,
    line: u32,
    pitch_info: &[PitchedElementUpdate],
    bbox: BoundingBox,
) -> EditResult<()> {
    let clef = doc.resolve_named(id, &NodeName::Clef)?;
    write_line(doc, clef, line)?;
    doc.update_or_create_zone(clef, bbox)?;
    apply_pitch_info(doc, pitch_info)?;

    log::info!("clef '{}' moved to line {}", id, line);
    Ok(())
}

pub fn update_clef_shape(
    doc: &mut MeiDocument,
    id: &str,
    shape: ClefShape,
    pitch_info: &[PitchedElementUpdate],
    bbox: BoundingBox,
) -> EditResult<()> {
    let clef = doc.resolve_named(id, &NodeName::Clef)?;
    doc.set_attribute(clef, "shape", shape.as_str());
    doc.update_or_create_zone(clef, bbox)?;
    apply_pitch_info(doc, pitch_info)?;

    log::info!("clef '{}' is now {}", id, shape.as_str());
    Ok(())
}

/// Delete clefs with their zones, applying each one's pitch updates
///
/// Every id must name a clef; the whole batch fails otherwise.
pub fn delete_clefs(doc: &mut MeiDocument, deletions: &[ClefDeletion]) -> EditResult<usize> {
    for deletion in deletions {
        let clef = doc.resolve_named(&deletion.id, &NodeName::Clef)?;
        doc.remove_with_zone(clef);
        apply_pitch_info(doc, &deletion.pitch_info)?;
    }
    log::info!("deleted {} clefs", deletions.len());
    Ok(deletions.len())
}
