mod common;

use common::{bbox, content_order, load, staff_def_numbers, staff_layout, staff_numbers};
use neume_editor_wasm::models::DivisionForm;
use neume_editor_wasm::operations::{delete_divisions, insert_division, move_division, update_division_shape};

fn strs(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Inserting a final division and deleting it again restores the staves
#[test]
fn test_final_division_insert_delete_round_trip() {
    let mut doc = load();
    let layout = staff_layout(&doc);
    let staff_ids: Vec<String> = doc
        .elements_by_name(&neume_editor_wasm::NodeName::Staff)
        .into_iter()
        .map(|s| doc.id_of(s).to_string())
        .collect();

    let id = insert_division(&mut doc, DivisionForm::Final, Some("m-n2"), bbox(240)).unwrap();

    let split = staff_layout(&doc);
    assert_eq!(split.len(), 3);
    assert_eq!(staff_numbers(&doc), strs(&["1", "2", "3"]));
    assert_eq!(staff_def_numbers(&doc), strs(&["1", "2", "3"]));
    assert_eq!(split[0].1, strs(&["m-sb1", "m-clef1", "m-n1", id.as_str()]));
    assert_eq!(split[1].1, strs(&["m-n2", "m-n3", "m-div1", "m-n4", "m-custos1"]));
    assert_eq!(split[2].1, layout[1].1);

    assert_eq!(delete_divisions(&mut doc, &[id.as_str()]).unwrap(), 1);

    assert_eq!(staff_layout(&doc), layout);
    assert_eq!(staff_def_numbers(&doc), strs(&["1", "2"]));
    let staff_ids_after: Vec<String> = doc
        .elements_by_name(&neume_editor_wasm::NodeName::Staff)
        .into_iter()
        .map(|s| doc.id_of(s).to_string())
        .collect();
    assert_eq!(staff_ids_after, staff_ids);
    common::assert_no_dangling_facs(&doc);
}

/// With no staff after the anchor's staff the new staff is appended
#[test]
fn test_final_division_in_last_staff_appends_staff() {
    let mut doc = load();

    insert_division(&mut doc, DivisionForm::Final, Some("m-n6"), bbox(250)).unwrap();

    let layout = staff_layout(&doc);
    assert_eq!(layout.len(), 3);
    assert_eq!(layout[2], ("3".to_string(), strs(&["m-n6"])));
    assert_eq!(staff_def_numbers(&doc), strs(&["1", "2", "3"]));
}

#[test]
fn test_move_final_division_resplits() {
    let mut doc = load();
    let order = content_order(&doc);
    let id = insert_division(&mut doc, DivisionForm::Final, Some("m-n2"), bbox(240)).unwrap();

    move_division(&mut doc, &id, Some("m-n5"), bbox(190)).unwrap();

    let layout = staff_layout(&doc);
    assert_eq!(layout.len(), 3);
    assert_eq!(staff_numbers(&doc), strs(&["1", "2", "3"]));
    assert_eq!(layout[0].1, strs(&["m-sb1", "m-clef1", "m-n1", "m-n2", "m-n3", "m-div1", "m-n4", "m-custos1"]));
    assert_eq!(layout[1].1, strs(&["m-sb2", "m-clef2", id.as_str()]));
    assert_eq!(layout[2].1, strs(&["m-n5", "m-n6"]));
    assert_eq!(staff_def_numbers(&doc), strs(&["1", "2", "3"]));

    delete_divisions(&mut doc, &[id.as_str()]).unwrap();
    assert_eq!(content_order(&doc), order);
    assert_eq!(staff_numbers(&doc), strs(&["1", "2"]));
}

/// Moving a final division to the end merges the staff it closed and lands
/// in what is then the last layer
#[test]
fn test_move_final_division_to_end_of_chant() {
    let mut doc = load();
    let id = insert_division(&mut doc, DivisionForm::Final, Some("m-n5"), bbox(190)).unwrap();
    assert_eq!(staff_layout(&doc).len(), 3);

    doc.transact(|d| move_division(d, &id, None, bbox(320))).unwrap();

    let layout = staff_layout(&doc);
    assert_eq!(layout.len(), 2);
    assert_eq!(staff_numbers(&doc), strs(&["1", "2"]));
    assert_eq!(staff_def_numbers(&doc), strs(&["1", "2"]));
    assert_eq!(layout[1].1, strs(&["m-sb2", "m-clef2", "m-n5", "m-n6", id.as_str()]));
    common::assert_no_dangling_facs(&doc);
}

#[test]
fn test_non_final_division_move_keeps_staves() {
    let mut doc = load();

    move_division(&mut doc, "m-div1", Some("m-n1"), bbox(180)).unwrap();

    let layout = staff_layout(&doc);
    assert_eq!(layout.len(), 2);
    assert_eq!(&layout[0].1[2..4], &["m-div1", "m-n1"]);
}

#[test]
fn test_reshaping_into_final_splits_at_next_element() {
    let mut doc = load();

    update_division_shape(&mut doc, "m-div1", DivisionForm::Final, bbox(420)).unwrap();

    let layout = staff_layout(&doc);
    assert_eq!(layout.len(), 3);
    assert_eq!(layout[1].1, strs(&["m-n4", "m-custos1"]));

    delete_divisions(&mut doc, &["m-div1"]).unwrap();
    assert_eq!(staff_layout(&doc).len(), 2);
    assert!(doc.find_by_id("z-div1").is_none());
}

/// A final division appended at the very end splits nothing, and removing
/// it merges nothing
#[test]
fn test_trailing_final_division() {
    let mut doc = load();
    let layout = staff_layout(&doc);

    let id = insert_division(&mut doc, DivisionForm::Final, None, bbox(300)).unwrap();
    assert_eq!(staff_layout(&doc).len(), 2);

    delete_divisions(&mut doc, &[id.as_str()]).unwrap();
    assert_eq!(staff_layout(&doc), layout);
}
