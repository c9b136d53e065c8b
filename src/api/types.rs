//! Request and response records for the WASM API
//!
//! Field names follow the client's camelCase JSON. Enumerated fields use the
//! model enums directly so an unknown shape or form fails deserialization.

use serde::{Deserialize, Serialize};

use crate::models::{BoundingBox, ClefShape, DivisionForm, DotForm, EpisemaForm, HeadShape, Pitch};
use crate::operations::{ClefDeletion, PitchedElementUpdate};

/// What every editing call returns: the rewritten document and the
/// operation's own result
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EditResponse<T> {
    pub mei: String,
    pub result: T,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IdResult {
    pub id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IdsResult {
    pub ids: Vec<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RemovedResult {
    pub removed: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

/// An element id with a new bounding box
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ZoneRequest {
    pub id: String,
    pub bbox: BoundingBox,
}

// ============================================================================
// Neumes
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoveNeumeRequest {
    pub id: String,
    #[serde(default)]
    pub before_id: Option<String>,
    #[serde(default)]
    pub pitches: Option<Vec<Pitch>>,
    pub bbox: BoundingBox,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHeadShapeRequest {
    pub id: String,
    pub shape: HeadShape,
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NeumifyRequest {
    pub ids: Vec<String>,
    pub type_id: String,
    pub head_shapes: Vec<HeadShape>,
    #[serde(default)]
    pub liquescence: bool,
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UngroupRequest {
    pub ids: Vec<String>,
    pub bboxes: Vec<Vec<BoundingBox>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DotRequest {
    pub id: String,
    pub form: DotForm,
    pub bbox: BoundingBox,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EpisemaRequest {
    pub id: String,
    pub form: EpisemaForm,
    pub bbox: BoundingBox,
}

// ============================================================================
// Divisions, clefs, custodes
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertDivisionRequest {
    pub form: DivisionForm,
    #[serde(default)]
    pub before_id: Option<String>,
    pub bbox: BoundingBox,
}

/// Reposition an element before another (or at the end of the last layer)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub id: String,
    #[serde(default)]
    pub before_id: Option<String>,
    pub bbox: BoundingBox,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UpdateDivisionShapeRequest {
    pub id: String,
    pub form: DivisionForm,
    pub bbox: BoundingBox,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertClefRequest {
    pub shape: ClefShape,
    pub line: u32,
    #[serde(default)]
    pub pitch_info: Vec<PitchedElementUpdate>,
    #[serde(default)]
    pub before_id: Option<String>,
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoveClefRequest {
    pub id: String,
    pub line: u32,
    #[serde(default)]
    pub pitch_info: Vec<PitchedElementUpdate>,
    pub bbox: BoundingBox,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClefShapeRequest {
    pub id: String,
    pub shape: ClefShape,
    #[serde(default)]
    pub pitch_info: Vec<PitchedElementUpdate>,
    pub bbox: BoundingBox,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeleteClefsRequest {
    pub clefs: Vec<ClefDeletion>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertCustosRequest {
    pub pitch: Pitch,
    #[serde(default)]
    pub before_id: Option<String>,
    pub bbox: BoundingBox,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MoveCustosRequest {
    pub id: String,
    #[serde(default)]
    pub pitch: Option<Pitch>,
    pub bbox: BoundingBox,
}

// ============================================================================
// Systems
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertSystemRequest {
    pub page_id: String,
    pub bbox: BoundingBox,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertSystemBreakRequest {
    pub system_id: String,
    pub order_number: u32,
    #[serde(default)]
    pub next_sb_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModifySystemBreakRequest {
    pub sb_id: String,
    pub order_number: u32,
}
