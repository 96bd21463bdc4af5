//! Synthetic results served when the upstream model can't be used.
//!
//! Two policies coexist and must stay distinct:
//! - [`unavailable_result`]: upstream unreachable, non-2xx or unconfigured.
//!   Label and confidence are sampled fresh on every call.
//! - [`malformed_result`]: upstream answered 2xx with an unusable payload.
//!   Always the same literal result.
//!
//! Tips have a single deterministic policy, [`static_tips`].

use crate::types::{AnalysisResult, DevelopmentTip, PersonalityType};

/// Reasons attached to every synthetic analysis result.
pub const CANNED_REASONS: [&str; 3] = [
    "사진에서 강한 자신감과 주도적인 분위기가 느껴집니다",
    "표정과 눈빛에서 내면의 강인함이 드러납니다",
    "전체적인 포즈와 표현에서 리더십 성향이 보입니다",
];

/// Inclusive confidence range of randomized results.
pub const FALLBACK_CONFIDENCE_MIN: u8 = 70;
pub const FALLBACK_CONFIDENCE_MAX: u8 = 95;

/// Confidence of the fixed result.
pub const MALFORMED_CONFIDENCE: u8 = 85;

/// Randomized placeholder result for an unreachable upstream.
pub fn unavailable_result() -> AnalysisResult {
    let label = PersonalityType::ALL[uniform_below(PersonalityType::ALL.len() as u32) as usize];
    let span = u32::from(FALLBACK_CONFIDENCE_MAX - FALLBACK_CONFIDENCE_MIN) + 1;
    // span <= 26, so the sum always fits in a u8
    let confidence = FALLBACK_CONFIDENCE_MIN + uniform_below(span) as u8;
    AnalysisResult {
        label,
        emoji: label.emoji().to_string(),
        confidence,
        reasons: canned_reasons(),
    }
}

/// Fixed placeholder result for an unusable upstream payload.
pub fn malformed_result() -> AnalysisResult {
    let label = PersonalityType::TetoMale;
    AnalysisResult {
        label,
        emoji: label.emoji().to_string(),
        confidence: MALFORMED_CONFIDENCE,
        reasons: canned_reasons(),
    }
}

fn canned_reasons() -> Vec<String> {
    CANNED_REASONS.iter().map(|r| r.to_string()).collect()
}

/// Hand-authored tips for `label`.
pub fn static_tips(label: PersonalityType) -> DevelopmentTip {
    let (title, tips, keywords): (&str, [&str; 3], [&str; 3]) = match label {
        PersonalityType::TetoMale => (
            "💪 당신의 리더십을 더욱 빛나게 하는 방법",
            [
                "🎯 목표 설정과 달성: 매주 도전적인 목표를 세우고 체계적으로 달성해보세요",
                "💬 커뮤니케이션 스킬: 강한 리더십에 따뜻함을 더해 팀원들과의 관계를 개선하세요",
                "🏋️‍♂️ 신체 단련: 규칙적인 운동으로 내면의 강인함을 외적으로도 표현하세요",
            ],
            ["리더십 서적", "운동 기구", "비즈니스 수트"],
        ),
        PersonalityType::TetoFemale => (
            "👑 독립적인 여성의 자신감 업그레이드",
            [
                "💼 커리어 발전: 새로운 도전과 기회를 적극적으로 찾아 자신의 영역을 넓혀보세요",
                "✨ 스타일링: 자신만의 개성있는 스타일로 내면의 강함을 표현하세요",
                "🗣️ 네트워킹: 같은 가치관을 가진 사람들과의 네트워크를 구축하세요",
            ],
            ["파워 수트", "자기계발서", "프리미엄 액세서리"],
        ),
        PersonalityType::EgenMale => (
            "🌸 섬세한 감성의 매력을 발산하는 법",
            [
                "🎨 예술 활동: 그림, 음악, 글쓰기 등을 통해 풍부한 감성을 표현해보세요",
                "🤝 공감 능력 활용: 상담이나 멘토링을 통해 타인을 도우며 성취감을 느껴보세요",
                "🧘‍♂️ 마음챙김: 명상이나 요가로 내면의 평화와 안정감을 키워보세요",
            ],
            ["아트 용품", "요가 매트", "감성 도서"],
        ),
        PersonalityType::EgenFemale => (
            "🌺 따뜻한 마음의 힐링 파워 극대화",
            [
                "🌿 자연과의 교감: 가드닝이나 산책을 통해 자연에서 에너지를 충전하세요",
                "💕 관계 맺기: 진정성 있는 대화와 공감으로 깊은 인간관계를 만들어보세요",
                "🍯 셀프케어: 아로마테라피나 스파 등으로 자신을 아끼고 돌보는 시간을 가져보세요",
            ],
            ["아로마 오일", "플랜트 용품", "스킨케어 제품"],
        ),
    };

    DevelopmentTip {
        title: title.to_string(),
        tips: tips.iter().map(|t| t.to_string()).collect(),
        shopping_keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Uniform sample in `0..bound` from the OS entropy source.
///
/// Rejection sampling removes modulo bias. Returns 0 if the entropy source
/// fails.
fn uniform_below(bound: u32) -> u32 {
    debug_assert!(bound > 0);
    let zone = u32::MAX - (u32::MAX % bound);
    loop {
        let Ok(value) = getrandom::u32() else {
            return 0;
        };
        if value < zone {
            return value % bound;
        }
    }
}
