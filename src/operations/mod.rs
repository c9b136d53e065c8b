//! Structured editing operations on an MEI chant document
//!
//! Every operation takes the loaded [`MeiDocument`] plus typed parameters,
//! applies its mutations, and returns the ids of anything it created. The
//! engine keeps no state between calls.
//!
//! ## Modules
//!
//! - `neume`: punctum insert, move, delete, head shape, neumify, ungroup
//! - `ornament`: dots and episemata on notes
//! - `division`: division insert/move/reshape/delete
//! - `staff`: staff split and merge used by final divisions
//! - `clef`, `custos`: clefs and custodes plus the pitch cascade they drive
//! - `system`: systems, system breaks and their zones

pub mod neume;
pub mod ornament;
pub mod division;
pub mod staff;
pub mod pitched;
pub mod clef;
pub mod custos;
pub mod system;

pub use neume::{
    delete_neumes, insert_punctum, move_neume, neumify, ungroup, update_head_shape, PunctumSpec,
};
pub use ornament::{add_dot, add_episema, delete_dot, delete_episema};
pub use division::{delete_divisions, insert_division, move_division, update_division_shape};
pub use pitched::{apply_pitch_info, PitchedElementUpdate};
pub use clef::{delete_clefs, insert_clef, move_clef, update_clef_shape, ClefDeletion};
pub use custos::{delete_custodes, insert_custos, move_custos};
pub use system::{
    delete_system_breaks, delete_systems, insert_system, insert_system_break, modify_system_break,
    update_system_zone,
};

use crate::errors::{EditError, EditResult};
use crate::models::{MeiDocument, NodeCategory, NodeId, NodeName, Pitch};

/// Where a new or moved content element goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Immediately before this node, in its parent
    Before(NodeId),
    /// At the end of this layer
    Append(NodeId),
}

/// Resolve the insertion point for content
///
/// With an anchor id the element goes in front of the anchor, which must be
/// layer-level content. Without one it is appended to the last layer of the
/// document; the editor client always works within a concrete layer, so that
/// layer is the end of the chant.
pub(crate) fn placement(doc: &MeiDocument, before_id: Option<&str>) -> EditResult<Placement> {
    match before_id {
        Some(id) => {
            let anchor = doc.resolve(id)?;
            if doc.name_of(anchor).category() != NodeCategory::Content {
                return Err(EditError::malformed(format!(
                    "cannot insert before <{}> '{}'",
                    doc.name_of(anchor),
                    id
                )));
            }
            if !doc.is_attached(anchor) {
                return Err(EditError::malformed(format!("anchor '{}' is not in the document", id)));
            }
            Ok(Placement::Before(anchor))
        }
        None => doc
            .last_by_name(&NodeName::Layer)
            .map(Placement::Append)
            .ok_or_else(|| EditError::malformed("document has no <layer> to append to")),
    }
}

/// Put `node` at the given placement
pub(crate) fn place(doc: &mut MeiDocument, node: NodeId, placement: Placement) -> EditResult<()> {
    match placement {
        Placement::Before(anchor) => doc.insert_before_node(anchor, node),
        Placement::Append(layer) => doc.append(layer, node),
    }
}

/// Write `pname`/`oct` on a note or custos
pub(crate) fn write_pitch(doc: &mut MeiDocument, node: NodeId, pitch: Pitch) {
    doc.set_attribute(node, "pname", pitch.pname.as_str());
    doc.set_attribute(node, "oct", pitch.oct.to_string());
}

/// Rewrite a neume's notes from a pitch list, pairwise
///
/// Pairs stop at the shorter of the two sequences; surplus notes keep their
/// pitch and surplus pitches are ignored.
pub(crate) fn rewrite_note_pitches(doc: &mut MeiDocument, neume: NodeId, pitches: &[Pitch]) {
    let notes = doc.descendants_by_name(neume, &NodeName::Note);
    if notes.len() != pitches.len() {
        log::debug!(
            "pitch list for '{}' has {} entries for {} notes; applying {}",
            doc.id_of(neume),
            pitches.len(),
            notes.len(),
            notes.len().min(pitches.len())
        );
    }
    for (note, pitch) in notes.into_iter().zip(pitches.iter()) {
        write_pitch(doc, note, *pitch);
    }
}

/// Create a `note` carrying the given pitch
pub(crate) fn new_note(doc: &mut MeiDocument, pitch: Pitch) -> NodeId {
    let note = doc.create(NodeName::Note);
    write_pitch(doc, note, pitch);
    note
}
