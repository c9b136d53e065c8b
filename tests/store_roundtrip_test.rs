mod common;

use std::fs;

use neume_editor_wasm::api::run_edit;
use neume_editor_wasm::operations::{insert_punctum, PunctumSpec};
use neume_editor_wasm::{parse_mei, write_mei, EditError, MeiError, MeiStore, NodeName, Pitch, PitchName, StoreConfig};

fn store() -> (tempfile::TempDir, MeiStore) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("folio1r.mei"), common::CHANT).unwrap();
    let store = MeiStore::new(StoreConfig::new(dir.path()));
    (dir, store)
}

#[test]
fn test_edit_is_persisted_through_store() {
    let (_dir, store) = store();
    let spec = PunctumSpec::new(Pitch::new(PitchName::B, 3), common::bbox(600)).before("m-custos1");

    let id = store.edit("folio1r", |doc| insert_punctum(doc, &spec)).unwrap();

    let doc = store.load("folio1r").unwrap();
    let neume = doc.resolve(&id).unwrap();
    assert!(doc.zone_of(neume).is_some());
    assert_eq!(doc.next_sibling(neume), doc.find_by_id("m-custos1"));
    assert_eq!(store.list().unwrap(), vec!["folio1r".to_string()]);
}

#[test]
fn test_failed_edit_is_not_persisted() {
    let (dir, store) = store();
    let spec = PunctumSpec::new(Pitch::new(PitchName::B, 3), common::bbox(600)).before("m-missing");

    let result = store.edit("folio1r", |doc| insert_punctum(doc, &spec));

    assert!(matches!(result, Err(MeiError::Edit(EditError::NotFound(_)))));
    assert_eq!(fs::read_to_string(dir.path().join("folio1r.mei")).unwrap(), common::CHANT);
}

/// Elements the editor does not know about survive a write and re-read
#[test]
fn test_unknown_content_survives_round_trip() {
    let doc = parse_mei(common::CHANT).unwrap();
    let reparsed = parse_mei(&write_mei(&doc, 4).unwrap()).unwrap();

    let title = reparsed.resolve("m-title").unwrap();
    assert_eq!(reparsed.name_of(title), &NodeName::Other("title".to_string()));
    assert_eq!(reparsed.node(title).text.as_deref(), Some("Salzinnes Antiphoner, folio 1r"));
    let root = reparsed.root();
    assert_eq!(reparsed.attribute(root, "meiversion"), Some("2013"));
    assert_eq!(common::content_order(&reparsed), common::content_order(&doc));
}

#[test]
fn test_api_edit_cycle_returns_rewritten_text() {
    let spec = PunctumSpec::new(Pitch::new(PitchName::C, 4), common::bbox(700));
    let response = run_edit(common::CHANT, |doc| insert_punctum(doc, &spec)).unwrap();

    let doc = parse_mei(&response.mei).unwrap();
    let neume = doc.resolve(&response.result).unwrap();
    let layer2 = doc.resolve("m-layer2").unwrap();
    assert_eq!(doc.children(layer2).last().copied(), Some(neume));
}
