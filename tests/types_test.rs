//! Wire shapes of the public payloads.

use serde_json::json;
use tetoegen::{AnalysisHistoryEntry, AnalysisResult, DevelopmentTip, PersonalityType};

// ============================================================================
// PersonalityType
// ============================================================================

#[test]
fn labels_serialize_as_korean() {
    assert_eq!(
        serde_json::to_value(PersonalityType::TetoMale).unwrap(),
        json!("테토남")
    );
    assert_eq!(
        serde_json::to_value(PersonalityType::EgenFemale).unwrap(),
        json!("에겐녀")
    );
}

#[test]
fn labels_parse_from_str() {
    for label in PersonalityType::ALL {
        let parsed: PersonalityType = label.as_str().parse().unwrap();
        assert_eq!(parsed, label);
    }
    assert!("알파남".parse::<PersonalityType>().is_err());
}

#[test]
fn emojis_are_fixed_per_label() {
    assert_eq!(PersonalityType::TetoMale.emoji(), "💪");
    assert_eq!(PersonalityType::TetoFemale.emoji(), "👑");
    assert_eq!(PersonalityType::EgenMale.emoji(), "🌸");
    assert_eq!(PersonalityType::EgenFemale.emoji(), "🌺");
}

// ============================================================================
// AnalysisResult
// ============================================================================

#[test]
fn analysis_result_uses_type_key() {
    let result = AnalysisResult {
        label: PersonalityType::EgenMale,
        emoji: "🌸".to_string(),
        confidence: 77,
        reasons: vec!["a".into(), "b".into(), "c".into()],
    };
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "에겐남",
            "emoji": "🌸",
            "confidence": 77,
            "reasons": ["a", "b", "c"],
        })
    );
}

#[test]
fn analysis_result_rejects_unknown_label() {
    let value = json!({"type": "알파남", "emoji": "🐺", "confidence": 80, "reasons": []});
    assert!(serde_json::from_value::<AnalysisResult>(value).is_err());
}

#[test]
fn confidence_bounds() {
    let mut result = AnalysisResult {
        label: PersonalityType::TetoMale,
        emoji: "💪".to_string(),
        confidence: 100,
        reasons: vec![],
    };
    assert!(result.has_valid_confidence());
    result.confidence = 101;
    assert!(!result.has_valid_confidence());
}

#[test]
fn history_entry_roundtrips_timestamp() {
    let value = json!({
        "id": "h1",
        "user_id": "u1",
        "image_url": "https://img.test/1.jpg",
        "result": {"type": "테토녀", "emoji": "👑", "confidence": 90, "reasons": ["x"]},
        "created_at": "2025-01-02T03:04:05Z",
    });
    let entry: AnalysisHistoryEntry = serde_json::from_value(value).unwrap();
    assert_eq!(entry.result.label, PersonalityType::TetoFemale);
    assert_eq!(entry.created_at.to_rfc3339(), "2025-01-02T03:04:05+00:00");
}

// ============================================================================
// DevelopmentTip
// ============================================================================

#[test]
fn tips_use_camel_case_keywords() {
    let tip = DevelopmentTip {
        title: "t".into(),
        tips: vec!["a".into()],
        shopping_keywords: vec!["k".into()],
    };
    let value = serde_json::to_value(&tip).unwrap();
    assert_eq!(
        value,
        json!({"title": "t", "tips": ["a"], "shoppingKeywords": ["k"]})
    );
}
