//! Classification result types

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::label::PersonalityType;

/// Result of classifying a single photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "type")]
    pub label: PersonalityType,
    pub emoji: String,
    /// Percentage in `0..=100`. Whole-number floats (`81.0`) are accepted.
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: u8,
    /// Justifications, usually three.
    pub reasons: Vec<String>,
}

impl AnalysisResult {
    /// Highest confidence a well-formed result may carry.
    pub const MAX_CONFIDENCE: u8 = 100;

    /// Whether the confidence lies within `0..=100`.
    pub fn has_valid_confidence(&self) -> bool {
        self.confidence <= Self::MAX_CONFIDENCE
    }
}

fn deserialize_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    let whole = match (number.as_u64(), number.as_f64()) {
        (Some(n), _) => Some(n),
        // whole-number floats only; negatives and fractions are rejected
        (None, Some(f)) if f.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&f) => {
            Some(f as u64)
        }
        _ => None,
    };
    whole
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| de::Error::custom(format!("invalid confidence {number}")))
}

/// A persisted analysis, as kept by the history store.
///
/// Storage is owned by an external collaborator; this type only fixes the
/// shape exchanged with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistoryEntry {
    pub id: String,
    pub user_id: String,
    pub image_url: String,
    pub result: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confidence_of(raw: &str) -> serde_json::Result<u8> {
        let json = format!(r#"{{"type":"테토남","emoji":"💪","confidence":{raw},"reasons":[]}}"#);
        serde_json::from_str::<AnalysisResult>(&json).map(|r| r.confidence)
    }

    #[test]
    fn integer_confidence() {
        assert_eq!(confidence_of("81").unwrap(), 81);
        assert_eq!(confidence_of("0").unwrap(), 0);
    }

    #[test]
    fn whole_float_confidence() {
        assert_eq!(confidence_of("81.0").unwrap(), 81);
        assert_eq!(confidence_of("100.0").unwrap(), 100);
    }

    #[test]
    fn rejected_confidence() {
        for raw in ["81.5", "-1", "-3.0", "256", "300.0", "\"81\"", "null"] {
            assert!(confidence_of(raw).is_err(), "accepted {raw}");
        }
    }

    #[test]
    fn serializes_as_integer() {
        let result = AnalysisResult {
            label: PersonalityType::EgenMale,
            emoji: "🌸".into(),
            confidence: 81,
            reasons: vec![],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["confidence"], serde_json::json!(81));
    }
}
