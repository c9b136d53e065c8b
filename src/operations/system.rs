//! Systems and system breaks
//!
//! A `system` under a `page` carries the zone of one line of the scan. The
//! music stream marks where each system starts with an `sb` whose
//! `systemref` names that system. The two are created separately but
//! deleted as a pair.

use super::{place, placement, Placement};
use crate::errors::{EditError, EditResult};
use crate::models::{BoundingBox, MeiDocument, NodeId, NodeName};

fn reference_target(value: &str) -> &str {
    value.strip_prefix('#').unwrap_or(value)
}

/// Append a system with its zone to a page; returns the system id
pub fn insert_system(doc: &mut MeiDocument, page_id: &str, bbox: BoundingBox) -> EditResult<String> {
    let page = doc.resolve_named(page_id, &NodeName::Page)?;
    doc.surface()?;

    let system = doc.create(NodeName::System);
    doc.append(page, system)?;
    doc.add_zone(system, bbox)?;

    let id = doc.id_of(system).to_string();
    log::info!("inserted system '{}' on page '{}'", id, page_id);
    Ok(id)
}

/// Insert an `sb` pointing at a system; returns the break's id
///
/// The break goes before `next_sb_id` when given, otherwise at the end of
/// the last layer.
pub fn insert_system_break(
    doc: &mut MeiDocument,
    system_id: &str,
    order_number: u32,
    next_sb_id: Option<&str>,
) -> EditResult<String> {
    doc.resolve_named(system_id, &NodeName::System)?;
    let at = match next_sb_id {
        Some(next) => Placement::Before(doc.resolve_named(next, &NodeName::Sb)?),
        None => placement(doc, None)?,
    };

    let sb = doc.create(NodeName::Sb);
    doc.set_attribute(sb, "n", order_number.to_string());
    doc.set_attribute(sb, "systemref", system_id);
    place(doc, sb, at)?;

    let id = doc.id_of(sb).to_string();
    log::info!("inserted system break '{}' (n={}) for '{}'", id, order_number, system_id);
    Ok(id)
}

/// Renumber one system break
pub fn modify_system_break(doc: &mut MeiDocument, sb_id: &str, order_number: u32) -> EditResult<()> {
    let sb = doc.resolve_named(sb_id, &NodeName::Sb)?;
    doc.set_attribute(sb, "n", order_number.to_string());
    log::debug!("system break '{}' renumbered to {}", sb_id, order_number);
    Ok(())
}

/// Remove system breaks (and any zones they carry); returns how many
///
/// The systems they point at are kept. Unknown ids and other elements are
/// skipped.
pub fn delete_system_breaks<S: AsRef<str>>(doc: &mut MeiDocument, ids: &[S]) -> usize {
    let mut removed = 0;
    for id in ids.iter().map(|s| s.as_ref()) {
        match doc.find_by_id(id) {
            Some(sb) if doc.node(sb).is(&NodeName::Sb) => {
                doc.remove_with_zone(sb);
                removed += 1;
            }
            Some(_) => log::warn!("delete: '{}' is not a system break, skipping", id),
            None => log::warn!("delete: system break '{}' does not resolve, skipping", id),
        }
    }
    removed
}

fn breaks_referring_to(doc: &MeiDocument, system_id: &str) -> Vec<NodeId> {
    doc.elements_by_name(&NodeName::Sb)
        .into_iter()
        .filter(|&sb| doc.attribute(sb, "systemref").map(reference_target) == Some(system_id))
        .collect()
}

/// Delete systems together with their breaks and zones; returns how many
/// elements were removed
///
/// Each id may name either the `system` or one of its `sb` elements; the
/// partner is removed as well. Unknown ids and other elements are skipped.
pub fn delete_systems<S: AsRef<str>>(doc: &mut MeiDocument, ids: &[S]) -> usize {
    let mut removed = 0;
    for id in ids.iter().map(|s| s.as_ref()) {
        let Some(node) = doc.find_by_id(id) else {
            log::warn!("delete: system '{}' does not resolve, skipping", id);
            continue;
        };
        let reference = doc.attribute(node, "systemref").map(|r| reference_target(r).to_string());
        let system_id = match (doc.name_of(node).clone(), reference) {
            (NodeName::System, _) => id.to_string(),
            (NodeName::Sb, Some(reference)) => reference,
            (NodeName::Sb, None) => {
                doc.remove_with_zone(node);
                removed += 1;
                continue;
            }
            (other, _) => {
                log::warn!("delete: '{}' is a <{}>, not a system", id, other);
                continue;
            }
        };

        let mut doomed = breaks_referring_to(doc, &system_id);
        if node_is(doc, &system_id, &NodeName::System) {
            doomed.extend(doc.find_by_id(&system_id));
        }
        if !doomed.contains(&node) {
            doomed.push(node);
        }
        for element in doomed {
            doc.remove_with_zone(element);
            removed += 1;
        }
        log::info!("deleted system '{}'", system_id);
    }
    removed
}

fn node_is(doc: &MeiDocument, id: &str, name: &NodeName) -> bool {
    doc.find_by_id(id).map_or(false, |n| doc.node(n).is(name))
}

/// Update or create the zone of a system (or any zoned element)
pub fn update_system_zone(doc: &mut MeiDocument, id: &str, bbox: BoundingBox) -> EditResult<()> {
    let system = doc.resolve(id)?;
    if !matches!(doc.name_of(system), NodeName::System | NodeName::Sb) {
        return Err(EditError::malformed(format!(
            "'{}' is a <{}>, not a system",
            id,
            doc.name_of(system)
        )));
    }
    doc.update_or_create_zone(system, bbox)?;
    log::info!("updated zone of system '{}'", id);
    Ok(())
}
