//! Staff split and merge
//!
//! A final division closes its staff: everything after it lives in the next
//! staff. Splitting moves the tail of a layer into a new `staff > layer`
//! placed right after the current staff; merging folds the following staff
//! back in. Both renumber the section's staves contiguously from the first
//! staff's `n`, and keep the first `staffGrp`'s `staffDef`s in step when
//! there is exactly one per staff.

use crate::errors::{EditError, EditResult};
use crate::models::{MeiDocument, NodeId, NodeName};

/// The `layer > staff > section` chain around a content element
struct StaffContext {
    layer: NodeId,
    staff: NodeId,
    section: NodeId,
}

fn context(doc: &MeiDocument, element: NodeId) -> EditResult<StaffContext> {
    let id = doc.id_of(element);
    let layer = doc
        .parent(element)
        .filter(|&p| doc.node(p).is(&NodeName::Layer))
        .ok_or_else(|| EditError::malformed(format!("'{}' is not inside a <layer>", id)))?;
    let staff = doc
        .parent(layer)
        .filter(|&p| doc.node(p).is(&NodeName::Staff))
        .ok_or_else(|| EditError::malformed(format!("layer of '{}' is not inside a <staff>", id)))?;
    let section = doc
        .parent(staff)
        .ok_or_else(|| EditError::malformed(format!("staff of '{}' is detached", id)))?;
    Ok(StaffContext { layer, staff, section })
}

/// The staffDefs to keep in step with `staff_count` staves, if they line up
fn mirrored_staff_defs(doc: &MeiDocument, staff_count: usize) -> Option<(NodeId, Vec<NodeId>)> {
    let group = doc.first_by_name(&NodeName::StaffGrp)?;
    let defs = doc.children_by_name(group, &NodeName::StaffDef);
    if defs.len() == staff_count {
        Some((group, defs))
    } else {
        log::warn!(
            "{} staffDefs for {} staves; leaving staffDefs unchanged",
            defs.len(),
            staff_count
        );
        None
    }
}

/// Number staves (and mirrored staffDefs) contiguously from the base
fn renumber(doc: &mut MeiDocument, section: NodeId, base: i64, defs: Option<NodeId>) {
    for (i, staff) in doc.children_by_name(section, &NodeName::Staff).into_iter().enumerate() {
        doc.set_attribute(staff, "n", (base + i as i64).to_string());
    }
    if let Some(group) = defs {
        for (i, def) in doc.children_by_name(group, &NodeName::StaffDef).into_iter().enumerate() {
            doc.set_attribute(def, "n", (base + i as i64).to_string());
        }
    }
}

fn base_number(doc: &MeiDocument, section: NodeId) -> i64 {
    doc.children_by_name(section, &NodeName::Staff)
        .first()
        .and_then(|&s| doc.attribute(s, "n"))
        .and_then(|n| n.trim().parse().ok())
        .unwrap_or(1)
}

/// Move `anchor` and everything after it in its layer into a new staff
///
/// Returns the new staff.
pub(crate) fn split_staff_at(doc: &mut MeiDocument, anchor: NodeId) -> EditResult<NodeId> {
    let ctx = context(doc, anchor)?;
    let staves = doc.children_by_name(ctx.section, &NodeName::Staff);
    let position = staves
        .iter()
        .position(|&s| s == ctx.staff)
        .ok_or_else(|| EditError::malformed("staff is not a direct child of its section"))?;
    let base = base_number(doc, ctx.section);
    let defs = mirrored_staff_defs(doc, staves.len());

    let new_staff = doc.create(NodeName::Staff);
    let new_layer = doc.create(NodeName::Layer);
    doc.set_attribute(new_layer, "n", "1");
    doc.append(new_staff, new_layer)?;
    let moved = doc.following_peers(anchor);
    for &element in &moved {
        doc.append(new_layer, element)?;
    }
    doc.insert_after(ctx.section, ctx.staff, new_staff)?;

    let group = match defs {
        Some((group, defs)) => {
            let template = defs[position];
            let def = doc.create(NodeName::StaffDef);
            let attributes = doc.node(template).attributes.clone();
            doc.node_mut(def).attributes = attributes;
            doc.insert_after(group, template, def)?;
            Some(group)
        }
        None => None,
    };
    renumber(doc, ctx.section, base, group);

    log::debug!(
        "split staff '{}' at '{}': {} elements moved to '{}'",
        doc.id_of(ctx.staff),
        doc.id_of(anchor),
        moved.len(),
        doc.id_of(new_staff)
    );
    Ok(new_staff)
}

/// Fold the staff after `element`'s staff back into `element`'s layer
///
/// Returns `false` when there is no following staff.
pub(crate) fn merge_following_staff(doc: &mut MeiDocument, element: NodeId) -> EditResult<bool> {
    let ctx = context(doc, element)?;
    let staves = doc.children_by_name(ctx.section, &NodeName::Staff);
    let position = staves
        .iter()
        .position(|&s| s == ctx.staff)
        .ok_or_else(|| EditError::malformed("staff is not a direct child of its section"))?;
    let Some(&next) = staves.get(position + 1) else {
        log::debug!("'{}' closes the last staff; nothing to merge", doc.id_of(element));
        return Ok(false);
    };
    let base = base_number(doc, ctx.section);
    let defs = mirrored_staff_defs(doc, staves.len());

    for next_layer in doc.children_by_name(next, &NodeName::Layer) {
        for child in doc.children(next_layer).to_vec() {
            doc.append(ctx.layer, child)?;
        }
    }
    let next_id = doc.id_of(next).to_string();
    doc.remove_with_zone(next);

    let group = match defs {
        Some((group, defs)) => {
            doc.remove(defs[position + 1]);
            Some(group)
        }
        None => None,
    };
    renumber(doc, ctx.section, base, group);

    log::debug!("merged staff '{}' into '{}'", next_id, doc.id_of(ctx.staff));
    Ok(true)
}
