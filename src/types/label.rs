//! Personality type labels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TetoegenError;

/// One of the four teto/egen personality archetypes.
///
/// Serialized as the Korean label the product displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalityType {
    /// Assertive, confident, direct (male).
    #[serde(rename = "테토남")]
    TetoMale,
    /// Independent, leading, confident (female).
    #[serde(rename = "테토녀")]
    TetoFemale,
    /// Emotional, empathetic, gentle (male).
    #[serde(rename = "에겐남")]
    EgenMale,
    /// Warm, emotional, embracing (female).
    #[serde(rename = "에겐녀")]
    EgenFemale,
}

impl PersonalityType {
    /// All labels, in the order the classification prompt lists them.
    pub const ALL: [PersonalityType; 4] = [
        PersonalityType::TetoMale,
        PersonalityType::TetoFemale,
        PersonalityType::EgenMale,
        PersonalityType::EgenFemale,
    ];

    /// Wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            PersonalityType::TetoMale => "테토남",
            PersonalityType::TetoFemale => "테토녀",
            PersonalityType::EgenMale => "에겐남",
            PersonalityType::EgenFemale => "에겐녀",
        }
    }

    /// Display glyph shown next to the label.
    pub fn emoji(self) -> &'static str {
        match self {
            PersonalityType::TetoMale => "💪",
            PersonalityType::TetoFemale => "👑",
            PersonalityType::EgenMale => "🌸",
            PersonalityType::EgenFemale => "🌺",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalityType {
    type Err = TetoegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonalityType::ALL
            .into_iter()
            .find(|label| label.as_str() == s.trim())
            .ok_or_else(|| TetoegenError::InvalidInput(format!("unknown personality type: {s}")))
    }
}
