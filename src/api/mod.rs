//! Chant Editor WASM API
//!
//! JavaScript-facing surface of the editing engine. Every editing call takes
//! the current MEI text plus a request object and returns
//! `{ mei, result }`; the text is only rewritten when the edit succeeds.
//!
//! # Module Structure
//!
//! - `helpers`: console logging, serde conversion, and the edit cycle
//! - `types`: request and response records
//! - `neumes`: neume and ornament operations
//! - `staves`: division, clef, custos and system operations
//! - `pitch`: pitch distance and transposition

pub mod helpers;
pub mod types;
pub mod neumes;
pub mod staves;
pub mod pitch;

pub use helpers::{run_edit, OUTPUT_INDENT};
pub use neumes::*;
pub use staves::*;
pub use pitch::{pitch_distance, pitch_transpose};
