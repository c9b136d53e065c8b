//! Shared helpers for the WASM API
//!
//! Console logging macros, serde conversion to and from `JsValue`, and the
//! parse → edit → write cycle every editing call goes through.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::types::EditResponse;
use crate::errors::EditResult;
use crate::mei::{parse_mei, write_mei, MeiError, MeiResult};
use crate::models::MeiDocument;

/// Indentation of MEI text handed back to the client
pub const OUTPUT_INDENT: usize = 2;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript, logging and converting failures
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        js_sys::Error::new(&msg).into()
    })
}

/// Serialize a value to JavaScript, logging and converting failures
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| {
            let msg = format!("{}: {}", error_context, e);
            log_error(&msg);
            js_sys::Error::new(&msg).into()
        })
}

// ============================================================================
// Edit Cycle
// ============================================================================

/// Parse `mei`, run `edit` atomically, and write the result back out
///
/// Nothing is written when the edit fails; the caller keeps its original
/// text.
pub fn run_edit<T>(
    mei: &str,
    edit: impl FnOnce(&mut MeiDocument) -> EditResult<T>,
) -> MeiResult<EditResponse<T>> {
    let mut doc = parse_mei(mei)?;
    let result = doc.transact(edit)?;
    let mei = write_mei(&doc, OUTPUT_INDENT)?;
    Ok(EditResponse { mei, result })
}

/// Short machine-readable name for an error, used as the JS error name
pub fn error_kind(err: &MeiError) -> &'static str {
    use crate::errors::EditError;

    match err {
        MeiError::Edit(EditError::NotFound(_)) => "NotFound",
        MeiError::Edit(EditError::InvalidEnum { .. }) => "InvalidEnum",
        MeiError::Edit(EditError::MalformedInput(_)) => "MalformedInput",
        MeiError::Xml(_) | MeiError::InvalidDocument(_) => "InvalidDocument",
        MeiError::InvalidName(_) | MeiError::Io(_) => "StoreError",
    }
}

/// Run an edit for a JS caller and hand back `{ mei, result }`
pub fn edit_for_js<T: Serialize>(
    operation: &str,
    mei: &str,
    edit: impl FnOnce(&mut MeiDocument) -> EditResult<T>,
) -> Result<JsValue, JsValue> {
    match run_edit(mei, edit) {
        Ok(response) => {
            wasm_log!("{} completed", operation);
            serialize(&response, operation)
        }
        Err(err) => {
            wasm_error!("{} failed: {}", operation, err);
            let js_err = js_sys::Error::new(&err.to_string());
            js_err.set_name(error_kind(&err));
            Err(js_err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EditError;
    use crate::operations::delete_neumes;

    const FIXTURE: &str = include_str!("../../tests/data/chant.mei");

    #[test]
    fn test_run_edit_returns_new_text() {
        let response = run_edit(FIXTURE, |doc| Ok(delete_neumes(doc, &["m-n1"]))).unwrap();
        assert_eq!(response.result, 1);
        assert!(!response.mei.contains("m-n1-note"));
        assert!(!response.mei.contains("z-n1\""));
    }

    #[test]
    fn test_run_edit_error_kinds() {
        let err = run_edit(FIXTURE, |doc| doc.resolve("m-missing").map(|_| ())).unwrap_err();
        assert_eq!(error_kind(&err), "NotFound");

        let err = run_edit(FIXTURE, |_| -> EditResult<()> { Err(EditError::malformed("x")) }).unwrap_err();
        assert_eq!(error_kind(&err), "MalformedInput");

        let err = run_edit("<mei", |_| Ok(())).unwrap_err();
        assert_eq!(error_kind(&err), "InvalidDocument");
    }
}
