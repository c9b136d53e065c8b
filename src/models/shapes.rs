//! Closed enumerations for note heads, clefs, divisions and ornaments
//!
//! Each value maps to the attribute text MEI expects. Parsing an unknown
//! value is an `InvalidEnum` error; nothing here falls back silently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EditError;

/// Modifier attributes an `nc` may carry to alter its head
pub const NC_MODIFIERS: [&str; 3] = ["inclinatum", "deminutus", "quilisma"];

/// Note head shapes offered by the editor
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HeadShape {
    Punctum,
    PunctumInclinatum,
    PunctumInclinatumParvum,
    Quilisma,
    Virga,
    Cavum,
}

impl HeadShape {
    /// Neume `name` a single-note neume takes with this head
    pub fn neume_name(self) -> &'static str {
        match self {
            HeadShape::Punctum
            | HeadShape::PunctumInclinatum
            | HeadShape::PunctumInclinatumParvum
            | HeadShape::Quilisma => "punctum",
            HeadShape::Virga => "virga",
            HeadShape::Cavum => "cavum",
        }
    }

    /// Modifier attributes set on the `nc` holding notes of this head
    pub fn nc_modifiers(self) -> &'static [&'static str] {
        match self {
            HeadShape::Punctum | HeadShape::Virga | HeadShape::Cavum => &[],
            HeadShape::PunctumInclinatum => &["inclinatum"],
            HeadShape::PunctumInclinatumParvum => &["inclinatum", "deminutus"],
            HeadShape::Quilisma => &["quilisma"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeadShape::Punctum => "punctum",
            HeadShape::PunctumInclinatum => "punctum_inclinatum",
            HeadShape::PunctumInclinatumParvum => "punctum_inclinatum_parvum",
            HeadShape::Quilisma => "quilisma",
            HeadShape::Virga => "virga",
            HeadShape::Cavum => "cavum",
        }
    }
}

impl FromStr for HeadShape {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "punctum" => Ok(HeadShape::Punctum),
            "punctum_inclinatum" => Ok(HeadShape::PunctumInclinatum),
            "punctum_inclinatum_parvum" => Ok(HeadShape::PunctumInclinatumParvum),
            "quilisma" => Ok(HeadShape::Quilisma),
            "virga" => Ok(HeadShape::Virga),
            "cavum" => Ok(HeadShape::Cavum),
            _ => Err(EditError::invalid_enum("head shape", s)),
        }
    }
}

impl fmt::Display for HeadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clef shapes in square notation: doh (C) and fah (F)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClefShape {
    C,
    F,
}

impl ClefShape {
    pub fn as_str(self) -> &'static str {
        match self {
            ClefShape::C => "C",
            ClefShape::F => "F",
        }
    }
}

impl FromStr for ClefShape {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" | "c" => Ok(ClefShape::C),
            "F" | "f" => Ok(ClefShape::F),
            _ => Err(EditError::invalid_enum("clef shape", s)),
        }
    }
}

/// Division forms; only `Final` closes a staff
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DivisionForm {
    Comma,
    Small,
    Minor,
    Major,
    Final,
}

impl DivisionForm {
    pub fn as_str(self) -> &'static str {
        match self {
            DivisionForm::Comma => "comma",
            DivisionForm::Small => "small",
            DivisionForm::Minor => "minor",
            DivisionForm::Major => "major",
            DivisionForm::Final => "final",
        }
    }

    pub fn is_final(self) -> bool {
        self == DivisionForm::Final
    }
}

impl FromStr for DivisionForm {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comma" => Ok(DivisionForm::Comma),
            "small" => Ok(DivisionForm::Small),
            "minor" => Ok(DivisionForm::Minor),
            "major" => Ok(DivisionForm::Major),
            "final" => Ok(DivisionForm::Final),
            _ => Err(EditError::invalid_enum("division form", s)),
        }
    }
}

/// Dot forms
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DotForm {
    /// Augmentation dot (morae vocis)
    Aug,
    Div,
}

impl DotForm {
    pub fn as_str(self) -> &'static str {
        match self {
            DotForm::Aug => "aug",
            DotForm::Div => "div",
        }
    }
}

impl FromStr for DotForm {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aug" => Ok(DotForm::Aug),
            "div" => Ok(DotForm::Div),
            _ => Err(EditError::invalid_enum("dot form", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EpisemaForm {
    Horizontal,
    Vertical,
}

impl EpisemaForm {
    pub fn as_str(self) -> &'static str {
        match self {
            EpisemaForm::Horizontal => "horizontal",
            EpisemaForm::Vertical => "vertical",
        }
    }
}

impl FromStr for EpisemaForm {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(EpisemaForm::Horizontal),
            "vertical" => Ok(EpisemaForm::Vertical),
            _ => Err(EditError::invalid_enum("episema form", s)),
        }
    }
}

/// Neume type decoded from a client type id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeumeType {
    pub name: String,
    pub variant: Option<String>,
}

impl NeumeType {
    /// Decode a dot-separated type id such as `scandicus.flexus.2`
    ///
    /// A trailing purely numeric segment only disambiguates variants in the
    /// client palette and is dropped. The first remaining segment is the neume
    /// name; any further segments, joined by spaces, are the variant.
    pub fn parse(type_id: &str) -> Result<NeumeType, EditError> {
        let mut tokens: Vec<&str> = type_id.split('.').collect();
        if tokens.len() > 1 {
            if let Some(last) = tokens.last() {
                if !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()) {
                    tokens.pop();
                }
            }
        }

        let name = match tokens.first() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(EditError::invalid_enum("neume type", type_id)),
        };
        let variant = if tokens.len() > 1 {
            Some(tokens[1..].join(" "))
        } else {
            None
        };

        Ok(NeumeType { name, variant })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neume_type_parsing() {
        assert_eq!(
            NeumeType::parse("podatus.2").unwrap(),
            NeumeType { name: "podatus".to_string(), variant: None }
        );
        assert_eq!(
            NeumeType::parse("scandicus.flexus.2").unwrap(),
            NeumeType { name: "scandicus".to_string(), variant: Some("flexus".to_string()) }
        );
        assert_eq!(
            NeumeType::parse("porrectus.subpunctis.resupinus").unwrap(),
            NeumeType {
                name: "porrectus".to_string(),
                variant: Some("subpunctis resupinus".to_string())
            }
        );
        assert_eq!(NeumeType::parse("clivis").unwrap().variant, None);
        assert!(NeumeType::parse("").is_err());
    }

    #[test]
    fn test_head_shape_table() {
        assert_eq!(HeadShape::PunctumInclinatumParvum.neume_name(), "punctum");
        assert_eq!(
            HeadShape::PunctumInclinatumParvum.nc_modifiers(),
            &["inclinatum", "deminutus"]
        );
        assert_eq!(HeadShape::Virga.neume_name(), "virga");
        assert!(HeadShape::Cavum.nc_modifiers().is_empty());
    }

    #[test]
    fn test_unknown_shapes_are_rejected() {
        assert!(matches!(
            "liquescent".parse::<HeadShape>(),
            Err(EditError::InvalidEnum { kind: "head shape", .. })
        ));
        assert!("G".parse::<ClefShape>().is_err());
        assert!("double".parse::<DivisionForm>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let shape: HeadShape = serde_json::from_str("\"punctum_inclinatum\"").unwrap();
        assert_eq!(shape, HeadShape::PunctumInclinatum);
        let form: DivisionForm = serde_json::from_str("\"final\"").unwrap();
        assert!(form.is_final());
    }
}
