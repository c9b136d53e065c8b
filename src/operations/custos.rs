//! Custodes

use super::{place, placement, write_pitch};
use crate::errors::EditResult;
use crate::models::{BoundingBox, MeiDocument, NodeName, Pitch};

/// Insert a custos; returns its id
pub fn insert_custos(
    doc: &mut MeiDocument,
    pitch: Pitch,
    before_id: Option<&str>,
    bbox: BoundingBox,
) -> EditResult<String> {
    let at = placement(doc, before_id)?;
    doc.surface()?;

    let custos = doc.create(NodeName::Custos);
    write_pitch(doc, custos, pitch);
    place(doc, custos, at)?;
    doc.add_zone(custos, bbox)?;

    let id = doc.id_of(custos).to_string();
    log::info!("inserted custos '{}' at {}", id, pitch);
    Ok(id)
}

/// Re-pitch a custos (if a pitch is given) and update its zone
pub fn move_custos(
    doc: &mut MeiDocument,
    id: &str,
    pitch: Option<Pitch>,
    bbox: BoundingBox,
) -> EditResult<()> {
    let custos = doc.resolve_named(id, &NodeName::Custos)?;
    if let Some(pitch) = pitch {
        write_pitch(doc, custos, pitch);
    }
    doc.update_or_create_zone(custos, bbox)?;

    log::info!("moved custos '{}'", id);
    Ok(())
}

/// Delete custodes with their zones; unknown ids and other elements are skipped
pub fn delete_custodes<S: AsRef<str>>(doc: &mut MeiDocument, ids: &[S]) -> usize {
    let mut removed = 0;
    for id in ids.iter().map(|s| s.as_ref()) {
        match doc.find_by_id(id) {
            Some(custos) if doc.node(custos).is(&NodeName::Custos) => {
                doc.remove_with_zone(custos);
                removed += 1;
            }
            Some(_) => log::warn!("delete: '{}' is not a custos, skipping", id),
            None => log::warn!("delete: custos '{}' does not resolve, skipping", id),
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mei::parse_mei;
    use crate::models::PitchName;

    const FIXTURE: &str = include_str!("../../tests/data/chant.mei");

    fn bbox() -> BoundingBox {
        BoundingBox::new(1800, 120, 1820, 150)
    }

    #[test]
    fn test_insert_custos_appends_without_anchor() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        let id = insert_custos(&mut doc, Pitch::new(PitchName::B, 4), None, bbox()).unwrap();

        let custos = doc.find_by_id(&id).unwrap();
        let layer = doc.resolve("m-layer2").unwrap();
        assert_eq!(doc.children(layer).last().copied(), Some(custos));
        assert_eq!(doc.attribute(custos, "pname"), Some("b"));
        assert_eq!(doc.attribute(custos, "oct"), Some("4"));
    }

    #[test]
    fn test_move_custos_keeps_pitch_when_none_given() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        move_custos(&mut doc, "m-custos1", None, bbox()).unwrap();

        let custos = doc.resolve("m-custos1").unwrap();
        assert_eq!(doc.attribute(custos, "pname"), Some("g"));
        assert_eq!(doc.zone_bbox(doc.resolve("z-custos1").unwrap()), Some(bbox()));
    }

    #[test]
    fn test_delete_custodes() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        assert_eq!(delete_custodes(&mut doc, &["m-custos1", "m-n1", "m-missing"]), 1);
        assert!(doc.find_by_id("z-custos1").is_none());
        assert!(doc.find_by_id("m-n1").is_some());
    }
}
