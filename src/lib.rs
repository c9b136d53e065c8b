//! Chant Editor WASM Module
//!
//! Editing core for square-note chant encoded in MEI. Documents are loaded
//! into an arena tree, changed by the operations in [`operations`], and
//! written back out; [`api`] exposes the same operations to JavaScript.

pub mod errors;
pub mod models;
pub mod operations;
pub mod mei;
pub mod api;

// Re-export commonly used types
pub use errors::{EditError, EditResult};
pub use mei::{parse_mei, write_mei, MeiError, MeiStore, StoreConfig};
pub use models::{BoundingBox, MeiDocument, NodeId, NodeName, Pitch, PitchName};

use once_cell::sync::OnceCell;
use wasm_bindgen::prelude::*;

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install the panic hook and console logger; later calls do nothing
#[wasm_bindgen(js_name = initEditor)]
pub fn init() {
    INITIALIZED.get_or_init(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        #[cfg(feature = "console_log")]
        {
            if console_log::init_with_level(log::Level::Debug).is_err() {
                api::helpers::log_warn("a logger was already installed; keeping it");
            }
        }

        log::info!("Chant editor WASM module initialized");
    });
}

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    init();
}
