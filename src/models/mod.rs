//! Models module for the chant editor
//!
//! This module contains the in-memory MEI document tree and the small value
//! types (pitches, shapes, bounding boxes) the editing operations work with.

pub mod node;
pub mod tree;
pub mod zone;
pub mod pitch;
pub mod shapes;

// Re-export commonly used types
pub use node::{Node, NodeCategory, NodeId, NodeName};
pub use tree::{new_element_id, MeiDocument};
pub use zone::BoundingBox;
pub use pitch::{distance, transpose, Pitch, PitchName};
pub use shapes::{ClefShape, DivisionForm, DotForm, EpisemaForm, HeadShape, NeumeType, NC_MODIFIERS};
