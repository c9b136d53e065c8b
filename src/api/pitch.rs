//! Pitch arithmetic for the client

use wasm_bindgen::prelude::*;

use super::helpers::serialize;
use crate::models::{self, Pitch, PitchName};

fn pitch_name(value: &str) -> Result<PitchName, JsValue> {
    value
        .parse::<PitchName>()
        .map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

/// Diatonic steps from (pname1, oct1) to (pname2, oct2)
#[wasm_bindgen(js_name = pitchDistance)]
pub fn pitch_distance(pname1: &str, oct1: i32, pname2: &str, oct2: i32) -> Result<i32, JsValue> {
    Ok(models::distance(pitch_name(pname1)?, oct1, pitch_name(pname2)?, oct2))
}

/// The pitch `delta` diatonic steps away, as `{ pname, oct }`
#[wasm_bindgen(js_name = pitchTranspose)]
pub fn pitch_transpose(pname: &str, oct: i32, delta: i32) -> Result<JsValue, JsValue> {
    let (pname, oct) = models::transpose(pitch_name(pname)?, oct, delta);
    serialize(&Pitch::new(pname, oct), "pitchTranspose result")
}
