//! Dots and episemata
//!
//! Ornaments sit on the first note of a neume. A note carries at most one
//! ornament of each kind; adding one replaces the previous.

use crate::errors::{EditError, EditResult};
use crate::models::{BoundingBox, DotForm, EpisemaForm, MeiDocument, NodeId, NodeName};

fn first_note(doc: &MeiDocument, neume_id: &str) -> EditResult<(NodeId, NodeId)> {
    let neume = doc.resolve_named(neume_id, &NodeName::Neume)?;
    let note = doc
        .descendants_by_name(neume, &NodeName::Note)
        .into_iter()
        .next()
        .ok_or_else(|| EditError::malformed(format!("neume '{}' has no notes", neume_id)))?;
    Ok((neume, note))
}

fn set_ornament(
    doc: &mut MeiDocument,
    neume_id: &str,
    kind: NodeName,
    form: &str,
    bbox: BoundingBox,
) -> EditResult<()> {
    let (neume, note) = first_note(doc, neume_id)?;
    for old in doc.children_by_name(note, &kind) {
        doc.remove(old);
    }
    let ornament = doc.create(kind.clone());
    doc.set_attribute(ornament, "form", form);
    doc.append(note, ornament)?;
    doc.update_or_create_zone(neume, bbox)?;

    log::info!("added {} {} to '{}'", form, kind, neume_id);
    Ok(())
}

fn clear_ornament(
    doc: &mut MeiDocument,
    neume_id: &str,
    kind: NodeName,
    bbox: BoundingBox,
) -> EditResult<()> {
    let (neume, note) = first_note(doc, neume_id)?;
    let existing = doc.children_by_name(note, &kind);
    if existing.is_empty() {
        log::warn!("'{}' has no {} to delete", neume_id, kind);
    }
    for old in existing {
        doc.remove(old);
    }
    doc.update_or_create_zone(neume, bbox)?;

    log::info!("deleted {} from '{}'", kind, neume_id);
    Ok(())
}

pub fn add_dot(doc: &mut MeiDocument, neume_id: &str, form: DotForm, bbox: BoundingBox) -> EditResult<()> {
    set_ornament(doc, neume_id, NodeName::Dot, form.as_str(), bbox)
}

pub fn delete_dot(doc: &mut MeiDocument, neume_id: &str, bbox: BoundingBox) -> EditResult<()> {
    clear_ornament(doc, neume_id, NodeName::Dot, bbox)
}

pub fn add_episema(
    doc: &mut MeiDocument,
    neume_id: &str,
    form: EpisemaForm,
    bbox: BoundingBox,
) -> EditResult<()> {
    set_ornament(doc, neume_id, NodeName::Episema, form.as_str(), bbox)
}

pub fn delete_episema(doc: &mut MeiDocument, neume_id: &str, bbox: BoundingBox) -> EditResult<()> {
    clear_ornament(doc, neume_id, NodeName::Episema, bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mei::parse_mei;

    const FIXTURE: &str = include_str!("../../tests/data/chant.mei");

    fn bbox() -> BoundingBox {
        BoundingBox::new(100, 200, 130, 230)
    }

    #[test]
    fn test_add_dot_replaces_existing() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        add_dot(&mut doc, "m-n3", DotForm::Div, bbox()).unwrap();

        let note = doc.resolve("m-n3-note").unwrap();
        let dots = doc.children_by_name(note, &NodeName::Dot);
        assert_eq!(dots.len(), 1);
        assert_eq!(doc.attribute(dots[0], "form"), Some("div"));
        assert!(doc.find_by_id("m-n3-dot").is_none());

        let zone = doc.resolve("z-n3").unwrap();
        assert_eq!(doc.zone_bbox(zone), Some(bbox()));
    }

    #[test]
    fn test_episema_goes_on_first_note() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        add_episema(&mut doc, "m-n2", EpisemaForm::Horizontal, bbox()).unwrap();

        let first = doc.resolve("m-n2-note1").unwrap();
        let second = doc.resolve("m-n2-note2").unwrap();
        assert_eq!(doc.children_by_name(first, &NodeName::Episema).len(), 1);
        assert!(doc.children_by_name(second, &NodeName::Episema).is_empty());

        delete_episema(&mut doc, "m-n2", bbox()).unwrap();
        assert!(doc.children_by_name(first, &NodeName::Episema).is_empty());
    }

    #[test]
    fn test_delete_dot() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        delete_dot(&mut doc, "m-n3", bbox()).unwrap();
        assert!(doc.find_by_id("m-n3-dot").is_none());
        assert!(doc.find_by_id("m-n3-note").is_some());
    }

    #[test]
    fn test_ornament_on_non_neume_is_rejected() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        assert!(matches!(
            add_dot(&mut doc, "m-clef1", DotForm::Aug, bbox()),
            Err(EditError::MalformedInput(_))
        ));
        assert_eq!(
            add_dot(&mut doc, "m-nope", DotForm::Aug, bbox()),
            Err(EditError::NotFound("m-nope".to_string()))
        );
    }
}
