//! Diatonic pitch arithmetic for square-note chant
//!
//! Pitch names cycle through the letter order `a b c d e f g`; the octave
//! number carries when that cycle wraps past `g` back to `a`. This is a
//! letter-name ring, not chromatic, and it is the numbering the editor's
//! client uses when it reports pitches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EditError;

/// Letter name of a pitch
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PitchName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl PitchName {
    pub const ORDER: [PitchName; 7] = [
        PitchName::A,
        PitchName::B,
        PitchName::C,
        PitchName::D,
        PitchName::E,
        PitchName::F,
        PitchName::G,
    ];

    /// Position in the `a..g` ring
    pub fn index(self) -> i32 {
        match self {
            PitchName::A => 0,
            PitchName::B => 1,
            PitchName::C => 2,
            PitchName::D => 3,
            PitchName::E => 4,
            PitchName::F => 5,
            PitchName::G => 6,
        }
    }

    pub fn from_index(index: i32) -> PitchName {
        Self::ORDER[index.rem_euclid(7) as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PitchName::A => "a",
            PitchName::B => "b",
            PitchName::C => "c",
            PitchName::D => "d",
            PitchName::E => "e",
            PitchName::F => "f",
            PitchName::G => "g",
        }
    }
}

impl FromStr for PitchName {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" => Ok(PitchName::A),
            "b" => Ok(PitchName::B),
            "c" => Ok(PitchName::C),
            "d" => Ok(PitchName::D),
            "e" => Ok(PitchName::E),
            "f" => Ok(PitchName::F),
            "g" => Ok(PitchName::G),
            _ => Err(EditError::invalid_enum("pitch name", s)),
        }
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pitch as stored on `note` and `custos` elements (`pname` + `oct`)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub pname: PitchName,
    pub oct: i32,
}

impl Pitch {
    pub fn new(pname: PitchName, oct: i32) -> Self {
        Self { pname, oct }
    }

    /// Steps from `self` to `other`
    pub fn distance_to(self, other: Pitch) -> i32 {
        distance(self.pname, self.oct, other.pname, other.oct)
    }

    /// The pitch `delta` steps away
    pub fn transposed(self, delta: i32) -> Pitch {
        let (pname, oct) = transpose(self.pname, self.oct, delta);
        Pitch { pname, oct }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pname, self.oct)
    }
}

/// Number of diatonic steps from (pname1, oct1) up to (pname2, oct2)
pub fn distance(pname1: PitchName, oct1: i32, pname2: PitchName, oct2: i32) -> i32 {
    (pname2.index() - pname1.index()) + 7 * (oct2 - oct1)
}

/// Move a pitch by `delta` diatonic steps, carrying into the octave
///
/// Uses floor division so downward moves borrow from the octave correctly.
pub fn transpose(pname: PitchName, oct: i32, delta: i32) -> (PitchName, i32) {
    let raw = pname.index() + delta;
    (PitchName::from_index(raw.rem_euclid(7)), oct + raw.div_euclid(7))
}
