//! Divisions
//!
//! Non-final divisions are plain layer content. A final division also ends
//! its staff, so inserting, moving, reshaping or deleting one splits or
//! merges staves through [`super::staff`].

use super::staff::{merge_following_staff, split_staff_at};
use super::{place, placement, Placement};
use crate::errors::{EditError, EditResult};
use crate::models::{BoundingBox, DivisionForm, MeiDocument, NodeId, NodeName};

fn is_final(doc: &MeiDocument, division: NodeId) -> bool {
    doc.attribute(division, "form") == Some(DivisionForm::Final.as_str())
}

/// Insert a division; returns its id
///
/// A final division placed before an anchor moves the anchor and everything
/// after it into a new staff. Without an anchor it is appended to the last
/// layer and there is nothing to split off.
pub fn insert_division(
    doc: &mut MeiDocument,
    form: DivisionForm,
    before_id: Option<&str>,
    bbox: BoundingBox,
) -> EditResult<String> {
    let at = placement(doc, before_id)?;
    doc.surface()?;

    let division = doc.create(NodeName::Division);
    doc.set_attribute(division, "form", form.as_str());
    place(doc, division, at)?;
    doc.add_zone(division, bbox)?;

    if let (true, Placement::Before(anchor)) = (form.is_final(), at) {
        split_staff_at(doc, anchor)?;
    }

    let id = doc.id_of(division).to_string();
    log::info!("inserted {} division '{}' before {:?}", form.as_str(), id, before_id);
    Ok(id)
}

/// Move a division and update its zone
///
/// A final division first gives back the staff it closed, then splits again
/// at its new position.
pub fn move_division(
    doc: &mut MeiDocument,
    id: &str,
    before_id: Option<&str>,
    bbox: BoundingBox,
) -> EditResult<()> {
    let division = doc.resolve_named(id, &NodeName::Division)?;
    if placement(doc, before_id)? == Placement::Before(division) {
        return Err(EditError::malformed(format!("cannot move '{}' before itself", id)));
    }
    let final_division = is_final(doc, division);

    if final_division {
        merge_following_staff(doc, division)?;
    }
    // The merge may have removed the last layer, so resolve the target now.
    let at = placement(doc, before_id)?;
    doc.detach(division);
    place(doc, division, at)?;
    doc.update_or_create_zone(division, bbox)?;
    if let (true, Placement::Before(anchor)) = (final_division, at) {
        split_staff_at(doc, anchor)?;
    }

    log::info!("moved division '{}' before {:?}", id, before_id);
    Ok(())
}

/// Change a division's form
///
/// Leaving `final` merges the following staff back; becoming `final` splits
/// at the division's next sibling, if it has one.
pub fn update_division_shape(
    doc: &mut MeiDocument,
    id: &str,
    form: DivisionForm,
    bbox: BoundingBox,
) -> EditResult<()> {
    let division = doc.resolve_named(id, &NodeName::Division)?;
    let was_final = is_final(doc, division);

    doc.set_attribute(division, "form", form.as_str());
    match (was_final, form.is_final()) {
        (true, false) => {
            merge_following_staff(doc, division)?;
        }
        (false, true) => {
            if let Some(next) = doc.next_sibling(division) {
                split_staff_at(doc, next)?;
            }
        }
        _ => {}
    }
    doc.update_or_create_zone(division, bbox)?;

    log::info!("division '{}' is now {}", id, form.as_str());
    Ok(())
}

/// Delete divisions with their zones; returns how many were removed
///
/// Deleting a final division first merges the staff it closed. Unknown ids
/// and ids naming other elements are skipped.
pub fn delete_divisions<S: AsRef<str>>(doc: &mut MeiDocument, ids: &[S]) -> EditResult<usize> {
    let mut removed = 0;
    for id in ids.iter().map(|s| s.as_ref()) {
        let Some(division) = doc.find_by_id(id) else {
            log::warn!("delete: division '{}' does not resolve, skipping", id);
            continue;
        };
        if !doc.node(division).is(&NodeName::Division) {
            log::warn!("delete: '{}' is a <{}>, not a division", id, doc.name_of(division));
            continue;
        }
        if is_final(doc, division) {
            merge_following_staff(doc, division)?;
        }
        doc.remove_with_zone(division);
        removed += 1;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mei::parse_mei;

    const FIXTURE: &str = include_str!("../../tests/data/chant.mei");

    fn bbox() -> BoundingBox {
        BoundingBox::new(330, 110, 340, 250)
    }

    fn staff_count(doc: &MeiDocument) -> usize {
        doc.elements_by_name(&NodeName::Staff).len()
    }

    #[test]
    fn test_non_final_division_leaves_staves() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        let id = insert_division(&mut doc, DivisionForm::Comma, Some("m-n3"), bbox()).unwrap();

        assert_eq!(staff_count(&doc), 2);
        let division = doc.find_by_id(&id).unwrap();
        assert_eq!(doc.next_sibling(division), doc.find_by_id("m-n3"));
        assert!(doc.zone_of(division).is_some());
    }

    #[test]
    fn test_final_division_without_anchor_does_not_split() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        let id = insert_division(&mut doc, DivisionForm::Final, None, bbox()).unwrap();

        assert_eq!(staff_count(&doc), 2);
        let layer2 = doc.resolve("m-layer2").unwrap();
        assert_eq!(doc.children(layer2).last().copied(), doc.find_by_id(&id));
    }

    #[test]
    fn test_update_shape_to_final_and_back() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        update_division_shape(&mut doc, "m-div1", DivisionForm::Final, bbox()).unwrap();
        assert_eq!(staff_count(&doc), 3);
        let n4 = doc.resolve("m-n4").unwrap();
        let staff = doc.ancestor_by_name(n4, &NodeName::Staff).unwrap();
        assert_eq!(doc.attribute(staff, "n"), Some("2"));

        update_division_shape(&mut doc, "m-div1", DivisionForm::Major, bbox()).unwrap();
        assert_eq!(staff_count(&doc), 2);
        let staff = doc.ancestor_by_name(n4, &NodeName::Staff).unwrap();
        assert_eq!(doc.id_of(staff), "m-staff1");
    }

    #[test]
    fn test_move_before_itself_is_rejected() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        assert!(matches!(
            move_division(&mut doc, "m-div1", Some("m-div1"), bbox()),
            Err(EditError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_delete_skips_other_elements() {
        let mut doc = parse_mei(FIXTURE).unwrap();
        let removed = delete_divisions(&mut doc, &["m-div1", "m-n1", "m-gone"]).unwrap();
        assert_eq!(removed, 1);
        assert!(doc.find_by_id("m-div1").is_none());
        assert!(doc.find_by_id("z-div1").is_none());
        assert!(doc.find_by_id("m-n1").is_some());
    }
}
