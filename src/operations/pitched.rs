//! Pitch updates supplied alongside clef edits
//!
//! Changing a clef changes how every custos and neume after it reads. The
//! client computes the new pitches; this module only writes them.

use serde::{Deserialize, Serialize};

use super::{rewrite_note_pitches, write_pitch};
use crate::errors::{EditError, EditResult};
use crate::models::{MeiDocument, NodeName, Pitch};

/// New pitches for one custos or neume
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PitchedElementUpdate {
    pub id: String,
    /// One pitch for a custos, one per note (in document order) for a neume
    pub pitches: Vec<Pitch>,
}

impl PitchedElementUpdate {
    pub fn new(id: impl Into<String>, pitches: Vec<Pitch>) -> Self {
        Self { id: id.into(), pitches }
    }
}

/// Apply a batch of pitch updates
///
/// A custos takes the first pitch. A neume's notes are paired with the list
/// and pairing stops at the shorter of the two.
pub fn apply_pitch_info(doc: &mut MeiDocument, updates: &[PitchedElementUpdate]) -> EditResult<()> {
    for update in updates {
        let element = doc.resolve(&update.id)?;
        match doc.name_of(element).clone() {
            NodeName::Custos => {
                let pitch = update.pitches.first().ok_or_else(|| {
                    EditError::malformed(format!("no pitch supplied for custos '{}'", update.id))
                })?;
                write_pitch(doc, element, *pitch);
            }
            NodeName::Neume => rewrite_note_pitches(doc, element, &update.pitches),
            other => {
                return Err(EditError::malformed(format!(
                    "'{}' is a <{}>, which has no pitch",
                    update.id, other
                )))
            }
        }
    }
    if !updates.is_empty() {
        log::debug!("re-pitched {} elements", updates.len());
    }
    Ok(())
}
