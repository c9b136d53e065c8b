//! Neume editing: insert, move, delete, reshape, neumify and ungroup
//!
//! A neume is `neume > nc+ > note+`. Notes may carry `dot`/`episema`
//! children. An `nc` or `neume` left without children is removed in the same
//! operation, and a removed neume always takes its zone with it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{new_note, place, placement, rewrite_note_pitches};
use crate::errors::{EditError, EditResult};
use crate::models::{
    BoundingBox, DotForm, EpisemaForm, HeadShape, MeiDocument, NeumeType, NodeId, NodeName, Pitch,
    NC_MODIFIERS,
};

/// Parameters for a new single-note neume
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PunctumSpec {
    pub pitch: Pitch,
    #[serde(default = "default_head_shape")]
    pub head_shape: HeadShape,
    #[serde(default)]
    pub dot_form: Option<DotForm>,
    #[serde(default)]
    pub episema_form: Option<EpisemaForm>,
    #[serde(default)]
    pub before_id: Option<String>,
    pub bbox: BoundingBox,
}

fn default_head_shape() -> HeadShape {
    HeadShape::Punctum
}

impl PunctumSpec {
    pub fn new(pitch: Pitch, bbox: BoundingBox) -> Self {
        Self {
            pitch,
            head_shape: HeadShape::Punctum,
            dot_form: None,
            episema_form: None,
            before_id: None,
            bbox,
        }
    }

    pub fn before(mut self, id: impl Into<String>) -> Self {
        self.before_id = Some(id.into());
        self
    }
}

/// Set the `nc` modifier attributes, dropping any previous ones
fn write_nc_modifiers(doc: &mut MeiDocument, nc: NodeId, modifiers: &[&str]) {
    for modifier in NC_MODIFIERS {
        doc.remove_attribute(nc, modifier);
    }
    for modifier in modifiers {
        doc.set_attribute(nc, modifier, "true");
    }
}

/// Build a detached `neume > nc` with the head's name and modifiers
fn new_neume_shell(doc: &mut MeiDocument, head: HeadShape) -> EditResult<(NodeId, NodeId)> {
    let neume = doc.create(NodeName::Neume);
    doc.set_attribute(neume, "name", head.neume_name());
    let nc = doc.create(NodeName::Nc);
    write_nc_modifiers(doc, nc, head.nc_modifiers());
    doc.append(neume, nc)?;
    Ok((neume, nc))
}

/// Insert a one-note neume; returns its id
pub fn insert_punctum(doc: &mut MeiDocument, spec: &PunctumSpec) -> EditResult<String> {
    let at = placement(doc, spec.before_id.as_deref())?;
    doc.surface()?;

    let (neume, nc) = new_neume_shell(doc, spec.head_shape)?;
    let note = new_note(doc, spec.pitch);
    doc.append(nc, note)?;

    if let Some(form) = spec.dot_form {
        let dot = doc.create(NodeName::Dot);
        doc.set_attribute(dot, "form", form.as_str());
        doc.append(note, dot)?;
    }
    if let Some(form) = spec.episema_form {
        let episema = doc.create(NodeName::Episema);
        doc.set_attribute(episema, "form", form.as_str());
        doc.append(note, episema)?;
    }

    place(doc, neume, at)?;
    doc.add_zone(neume, spec.bbox)?;

    let id = doc.id_of(neume).to_string();
    log::info!("inserted {} '{}' at {}", spec.head_shape, id, spec.pitch);
    Ok(id)
}

/// Reposition a neume, optionally re-pitching its notes, and update its zone
pub fn move_neume(
    doc: &mut MeiDocument,
    id: &str,
    before_id: Option<&str>,
    pitches: Option<&[Pitch]>,
    bbox: BoundingBox,
) -> EditResult<()> {
    let neume = doc.resolve_named(id, &NodeName::Neume)?;
    let at = placement(doc, before_id)?;

    if let Some(pitches) = pitches {
        rewrite_note_pitches(doc, neume, pitches);
    }

    doc.detach(neume);
    place(doc, neume, at)?;
    doc.update_or_create_zone(neume, bbox)?;

    log::info!("moved neume '{}' before {:?}", id, before_id);
    Ok(())
}

/// Delete notes and/or neumes by id; returns how many elements were removed
///
/// A note takes its `nc` with it when that empties, and the `nc` its neume
/// (and zone). Ids that do not resolve, or that name anything other than a
/// note or neume, are skipped.
pub fn delete_neumes<S: AsRef<str>>(doc: &mut MeiDocument, ids: &[S]) -> usize {
    let mut removed = 0;
    for id in ids.iter().map(|s| s.as_ref()) {
        let Some(node) = doc.find_by_id(id) else {
            log::debug!("delete: '{}' does not resolve, skipping", id);
            continue;
        };
        match doc.name_of(node).clone() {
            NodeName::Note => {
                if delete_note(doc, node) {
                    removed += 1;
                }
            }
            NodeName::Neume => {
                doc.remove_with_zone(node);
                removed += 1;
            }
            other => log::warn!("delete: '{}' is a <{}>, not a note or neume", id, other),
        }
    }
    removed
}

fn delete_note(doc: &mut MeiDocument, note: NodeId) -> bool {
    let Some(nc) = doc.parent(note).filter(|&p| doc.node(p).is(&NodeName::Nc)) else {
        log::warn!("note '{}' is not inside an <nc>", doc.id_of(note));
        return false;
    };
    let Some(neume) = doc.parent(nc).filter(|&p| doc.node(p).is(&NodeName::Neume)) else {
        log::warn!("nc '{}' is not inside a <neume>", doc.id_of(nc));
        return false;
    };

    doc.remove(note);
    if doc.children(nc).is_empty() {
        doc.remove(nc);
    }
    if doc.children(neume).is_empty() {
        doc.remove_with_zone(neume);
    }
    true
}

/// Change the head shape of a neume's components
///
/// Sets the neume name from the shape and replaces every `nc`'s modifier
/// attributes with the shape's set.
pub fn update_head_shape(
    doc: &mut MeiDocument,
    id: &str,
    shape: HeadShape,
    bbox: Option<BoundingBox>,
) -> EditResult<()> {
    let neume = doc.resolve_named(id, &NodeName::Neume)?;

    doc.set_attribute(neume, "name", shape.neume_name());
    for nc in doc.children_by_name(neume, &NodeName::Nc) {
        write_nc_modifiers(doc, nc, shape.nc_modifiers());
    }
    if let Some(bbox) = bbox {
        doc.update_or_create_zone(neume, bbox)?;
    }

    log::info!("head shape of '{}' set to {}", id, shape);
    Ok(())
}

/// Merge several neumes into one; returns the new neume's id
///
/// Notes are taken from the referenced neumes in the order given and grouped
/// into `nc`s: consecutive notes whose head shapes share modifier attributes
/// share an `nc`. `head_shapes` must hold one entry per collected note.
/// A liquescent neume (epiphonus, cephalicus) marks its final `nc` with a
/// `liquescent` child.
pub fn neumify<S: AsRef<str>>(
    doc: &mut MeiDocument,
    ids: &[S],
    type_id: &str,
    head_shapes: &[HeadShape],
    liquescent: bool,
    bbox: Option<BoundingBox>,
) -> EditResult<String> {
    let neume_type = NeumeType::parse(type_id)?;
    if ids.is_empty() {
        return Err(EditError::malformed("neumify needs at least one neume"));
    }

    let mut seen = HashSet::new();
    let mut old_neumes = Vec::with_capacity(ids.len());
    for id in ids.iter().map(|s| s.as_ref()) {
        if !seen.insert(id) {
            return Err(EditError::malformed(format!("neume '{}' listed twice", id)));
        }
        old_neumes.push(doc.resolve_named(id, &NodeName::Neume)?);
    }

    let notes: Vec<NodeId> = old_neumes
        .iter()
        .flat_map(|&n| doc.descendants_by_name(n, &NodeName::Note))
        .collect();
    if notes.is_empty() {
        return Err(EditError::malformed("selected neumes contain no notes"));
    }
    if notes.len() != head_shapes.len() {
        return Err(EditError::malformed(format!(
            "{} head shapes supplied for {} notes",
            head_shapes.len(),
            notes.len()
        )));
    }
    if bbox.is_some() {
        doc.surface()?;
    }
    let first = old_neumes[0];
    if doc.parent(first).is_none() {
        return Err(EditError::malformed(format!("neume '{}' is not in the document", doc.id_of(first))));
    }

    let neume = doc.create(NodeName::Neume);
    doc.set_attribute(neume, "name", neume_type.name.as_str());
    if let Some(variant) = &neume_type.variant {
        doc.set_attribute(neume, "variant", variant.as_str());
    }

    let mut current: Option<(NodeId, &[&str])> = None;
    for (&note, &shape) in notes.iter().zip(head_shapes) {
        let modifiers = shape.nc_modifiers();
        let nc = match current {
            Some((nc, mods)) if mods == modifiers => nc,
            _ => {
                let nc = doc.create(NodeName::Nc);
                write_nc_modifiers(doc, nc, modifiers);
                doc.append(neume, nc)?;
                current = Some((nc, modifiers));
                nc
            }
        };
        doc.append(nc, note)?;
    }
    if let (true, Some((last_nc, _))) = (liquescent, current) {
        let mark = doc.create(NodeName::Liquescent);
        doc.append(last_nc, mark)?;
    }

    doc.insert_before_node(first, neume)?;
    for old in old_neumes {
        doc.remove_with_zone(old);
    }
    if let Some(bbox) = bbox {
        doc.add_zone(neume, bbox)?;
    }

    let id = doc.id_of(neume).to_string();
    log::info!("neumified {} notes into {} '{}'", notes.len(), neume_type.name, id);
    Ok(id)
}

/// Split neumes into one punctum per note
///
/// `bboxes[i]` supplies one box per note of `ids[i]`. The puncta take the
/// original's place, in note order; the original neume and its zone are
/// removed. Returns the new ids grouped per input neume.
pub fn ungroup<S: AsRef<str>>(
    doc: &mut MeiDocument,
    ids: &[S],
    bboxes: &[Vec<BoundingBox>],
) -> EditResult<Vec<Vec<String>>> {
    if ids.len() != bboxes.len() {
        return Err(EditError::malformed(format!(
            "{} bounding box lists supplied for {} neumes",
            bboxes.len(),
            ids.len()
        )));
    }

    let mut seen = HashSet::new();
    let mut plan = Vec::with_capacity(ids.len());
    for (id, boxes) in ids.iter().map(|s| s.as_ref()).zip(bboxes) {
        if !seen.insert(id) {
            return Err(EditError::malformed(format!("neume '{}' listed twice", id)));
        }
        let neume = doc.resolve_named(id, &NodeName::Neume)?;
        if doc.parent(neume).is_none() {
            return Err(EditError::malformed(format!("neume '{}' is not in the document", id)));
        }
        let notes = doc.descendants_by_name(neume, &NodeName::Note);
        if notes.len() != boxes.len() {
            return Err(EditError::malformed(format!(
                "{} bounding boxes supplied for the {} notes of '{}'",
                boxes.len(),
                notes.len(),
                id
            )));
        }
        plan.push((neume, notes, boxes));
    }
    doc.surface()?;

    let mut new_ids = Vec::with_capacity(plan.len());
    for (neume, notes, boxes) in plan {
        let mut puncta = Vec::with_capacity(notes.len());
        for (note, bbox) in notes.into_iter().zip(boxes.iter()) {
            let (punctum, nc) = new_neume_shell(doc, HeadShape::Punctum)?;
            doc.append(nc, note)?;
            doc.insert_before_node(neume, punctum)?;
            doc.add_zone(punctum, *bbox)?;
            puncta.push(doc.id_of(punctum).to_string());
        }
        log::info!("ungrouped '{}' into {} puncta", doc.id_of(neume), puncta.len());
        doc.remove_with_zone(neume);
        new_ids.push(puncta);
    }

    Ok(new_ids)
}
