//! Division, clef, custos and system operations

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, edit_for_js};
use super::types::{
    DeleteClefsRequest, IdResult, IdsRequest, InsertClefRequest, InsertCustosRequest,
    InsertDivisionRequest, InsertSystemBreakRequest, InsertSystemRequest, ModifySystemBreakRequest,
    MoveClefRequest, MoveCustosRequest, MoveRequest, RemovedResult, UpdateClefShapeRequest,
    UpdateDivisionShapeRequest, ZoneRequest,
};
use crate::operations;
use crate::wasm_info;

// ============================================================================
// Divisions
// ============================================================================

#[wasm_bindgen(js_name = insertDivision)]
pub fn insert_division(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: InsertDivisionRequest = deserialize(request, "insertDivision request")?;
    wasm_info!("insertDivision: {} before {:?}", request.form.as_str(), request.before_id);
    edit_for_js("insertDivision", mei, |doc| {
        operations::insert_division(doc, request.form, request.before_id.as_deref(), request.bbox)
            .map(|id| IdResult { id })
    })
}

#[wasm_bindgen(js_name = moveDivision)]
pub fn move_division(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: MoveRequest = deserialize(request, "moveDivision request")?;
    wasm_info!("moveDivision: '{}' before {:?}", request.id, request.before_id);
    edit_for_js("moveDivision", mei, |doc| {
        operations::move_division(doc, &request.id, request.before_id.as_deref(), request.bbox)
    })
}

#[wasm_bindgen(js_name = updateDivisionShape)]
pub fn update_division_shape(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: UpdateDivisionShapeRequest = deserialize(request, "updateDivisionShape request")?;
    edit_for_js("updateDivisionShape", mei, |doc| {
        operations::update_division_shape(doc, &request.id, request.form, request.bbox)
    })
}

#[wasm_bindgen(js_name = deleteDivisions)]
pub fn delete_divisions(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: IdsRequest = deserialize(request, "deleteDivisions request")?;
    wasm_info!("deleteDivisions: {} ids", request.ids.len());
    edit_for_js("deleteDivisions", mei, |doc| {
        operations::delete_divisions(doc, &request.ids).map(|removed| RemovedResult { removed })
    })
}

// ============================================================================
// Clefs
// ============================================================================

#[wasm_bindgen(js_name = insertClef)]
pub fn insert_clef(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: InsertClefRequest = deserialize(request, "insertClef request")?;
    wasm_info!(
        "insertClef: {} on line {}, {} pitch updates",
        request.shape.as_str(),
        request.line,
        request.pitch_info.len()
    );
    edit_for_js("insertClef", mei, |doc| {
        operations::insert_clef(
            doc,
            request.shape,
            request.line,
            &request.pitch_info,
            request.before_id.as_deref(),
            request.bbox,
        )
        .map(|id| IdResult { id })
    })
}

#[wasm_bindgen(js_name = moveClef)]
pub fn move_clef(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: MoveClefRequest = deserialize(request, "moveClef request")?;
    edit_for_js("moveClef", mei, |doc| {
        operations::move_clef(doc, &request.id, request.line, &request.pitch_info, request.bbox)
    })
}

#[wasm_bindgen(js_name = updateClefShape)]
pub fn update_clef_shape(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: UpdateClefShapeRequest = deserialize(request, "updateClefShape request")?;
    edit_for_js("updateClefShape", mei, |doc| {
        operations::update_clef_shape(doc, &request.id, request.shape, &request.pitch_info, request.bbox)
    })
}

#[wasm_bindgen(js_name = deleteClefs)]
pub fn delete_clefs(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: DeleteClefsRequest = deserialize(request, "deleteClefs request")?;
    wasm_info!("deleteClefs: {} clefs", request.clefs.len());
    edit_for_js("deleteClefs", mei, |doc| {
        operations::delete_clefs(doc, &request.clefs).map(|removed| RemovedResult { removed })
    })
}

// ============================================================================
// Custodes
// ============================================================================

#[wasm_bindgen(js_name = insertCustos)]
pub fn insert_custos(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: InsertCustosRequest = deserialize(request, "insertCustos request")?;
    edit_for_js("insertCustos", mei, |doc| {
        operations::insert_custos(doc, request.pitch, request.before_id.as_deref(), request.bbox)
            .map(|id| IdResult { id })
    })
}

#[wasm_bindgen(js_name = moveCustos)]
pub fn move_custos(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: MoveCustosRequest = deserialize(request, "moveCustos request")?;
    edit_for_js("moveCustos", mei, |doc| {
        operations::move_custos(doc, &request.id, request.pitch, request.bbox)
    })
}

#[wasm_bindgen(js_name = deleteCustodes)]
pub fn delete_custodes(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: IdsRequest = deserialize(request, "deleteCustodes request")?;
    edit_for_js("deleteCustodes", mei, |doc| {
        Ok(RemovedResult { removed: operations::delete_custodes(doc, &request.ids) })
    })
}

// ============================================================================
// Systems
// ============================================================================

#[wasm_bindgen(js_name = insertSystem)]
pub fn insert_system(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: InsertSystemRequest = deserialize(request, "insertSystem request")?;
    edit_for_js("insertSystem", mei, |doc| {
        operations::insert_system(doc, &request.page_id, request.bbox).map(|id| IdResult { id })
    })
}

#[wasm_bindgen(js_name = insertSystemBreak)]
pub fn insert_system_break(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: InsertSystemBreakRequest = deserialize(request, "insertSystemBreak request")?;
    edit_for_js("insertSystemBreak", mei, |doc| {
        operations::insert_system_break(
            doc,
            &request.system_id,
            request.order_number,
            request.next_sb_id.as_deref(),
        )
        .map(|id| IdResult { id })
    })
}

#[wasm_bindgen(js_name = modifySystemBreak)]
pub fn modify_system_break(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: ModifySystemBreakRequest = deserialize(request, "modifySystemBreak request")?;
    edit_for_js("modifySystemBreak", mei, |doc| {
        operations::modify_system_break(doc, &request.sb_id, request.order_number)
    })
}

#[wasm_bindgen(js_name = deleteSystemBreaks)]
pub fn delete_system_breaks(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: IdsRequest = deserialize(request, "deleteSystemBreaks request")?;
    edit_for_js("deleteSystemBreaks", mei, |doc| {
        Ok(RemovedResult { removed: operations::delete_system_breaks(doc, &request.ids) })
    })
}

#[wasm_bindgen(js_name = deleteSystems)]
pub fn delete_systems(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: IdsRequest = deserialize(request, "deleteSystems request")?;
    wasm_info!("deleteSystems: {:?}", request.ids);
    edit_for_js("deleteSystems", mei, |doc| {
        Ok(RemovedResult { removed: operations::delete_systems(doc, &request.ids) })
    })
}

#[wasm_bindgen(js_name = updateSystemZone)]
pub fn update_system_zone(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: ZoneRequest = deserialize(request, "updateSystemZone request")?;
    edit_for_js("updateSystemZone", mei, |doc| {
        operations::update_system_zone(doc, &request.id, request.bbox)
    })
}
