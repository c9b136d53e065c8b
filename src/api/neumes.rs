//! Neume and ornament operations
//!
//! Each function takes the current MEI text and a request record and returns
//! `{ mei, result }`, or throws with the error kind as the JS error name.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, edit_for_js};
use super::types::{
    DotRequest, EpisemaRequest, IdResult, IdsRequest, IdsResult, MoveNeumeRequest, NeumifyRequest,
    RemovedResult, UngroupRequest, UpdateHeadShapeRequest, ZoneRequest,
};
use crate::operations::{self, PunctumSpec};
use crate::wasm_info;

#[wasm_bindgen(js_name = insertPunctum)]
pub fn insert_punctum(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let spec: PunctumSpec = deserialize(request, "insertPunctum request")?;
    wasm_info!("insertPunctum: {} before {:?}", spec.pitch, spec.before_id);
    edit_for_js("insertPunctum", mei, |doc| {
        operations::insert_punctum(doc, &spec).map(|id| IdResult { id })
    })
}

#[wasm_bindgen(js_name = moveNeume)]
pub fn move_neume(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: MoveNeumeRequest = deserialize(request, "moveNeume request")?;
    wasm_info!("moveNeume: '{}' before {:?}", request.id, request.before_id);
    edit_for_js("moveNeume", mei, |doc| {
        operations::move_neume(
            doc,
            &request.id,
            request.before_id.as_deref(),
            request.pitches.as_deref(),
            request.bbox,
        )
    })
}

#[wasm_bindgen(js_name = deleteNeumes)]
pub fn delete_neumes(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: IdsRequest = deserialize(request, "deleteNeumes request")?;
    wasm_info!("deleteNeumes: {} ids", request.ids.len());
    edit_for_js("deleteNeumes", mei, |doc| {
        Ok(RemovedResult { removed: operations::delete_neumes(doc, &request.ids) })
    })
}

#[wasm_bindgen(js_name = updateHeadShape)]
pub fn update_head_shape(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: UpdateHeadShapeRequest = deserialize(request, "updateHeadShape request")?;
    wasm_info!("updateHeadShape: '{}' -> {}", request.id, request.shape);
    edit_for_js("updateHeadShape", mei, |doc| {
        operations::update_head_shape(doc, &request.id, request.shape, request.bbox)
    })
}

#[wasm_bindgen]
pub fn neumify(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: NeumifyRequest = deserialize(request, "neumify request")?;
    wasm_info!("neumify: {} neumes as {}", request.ids.len(), request.type_id);
    edit_for_js("neumify", mei, |doc| {
        operations::neumify(
            doc,
            &request.ids,
            &request.type_id,
            &request.head_shapes,
            request.liquescence,
            request.bbox,
        )
            .map(|id| IdResult { id })
    })
}

#[wasm_bindgen]
pub fn ungroup(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: UngroupRequest = deserialize(request, "ungroup request")?;
    wasm_info!("ungroup: {} neumes", request.ids.len());
    edit_for_js("ungroup", mei, |doc| {
        operations::ungroup(doc, &request.ids, &request.bboxes).map(|ids| IdsResult { ids })
    })
}

#[wasm_bindgen(js_name = addDot)]
pub fn add_dot(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: DotRequest = deserialize(request, "addDot request")?;
    edit_for_js("addDot", mei, |doc| {
        operations::add_dot(doc, &request.id, request.form, request.bbox)
    })
}

#[wasm_bindgen(js_name = deleteDot)]
pub fn delete_dot(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: ZoneRequest = deserialize(request, "deleteDot request")?;
    edit_for_js("deleteDot", mei, |doc| operations::delete_dot(doc, &request.id, request.bbox))
}

#[wasm_bindgen(js_name = addEpisema)]
pub fn add_episema(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: EpisemaRequest = deserialize(request, "addEpisema request")?;
    edit_for_js("addEpisema", mei, |doc| {
        operations::add_episema(doc, &request.id, request.form, request.bbox)
    })
}

#[wasm_bindgen(js_name = deleteEpisema)]
pub fn delete_episema(mei: &str, request: JsValue) -> Result<JsValue, JsValue> {
    let request: ZoneRequest = deserialize(request, "deleteEpisema request")?;
    edit_for_js("deleteEpisema", mei, |doc| {
        operations::delete_episema(doc, &request.id, request.bbox)
    })
}
