//! Model request construction.
//!
//! [`ClassificationRequest`] turns an uploaded photo into the vision request
//! the [`AnalysisGateway`](crate::gateway::AnalysisGateway) sends upstream;
//! [`tip_request`] builds the text-only request for development tips.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::types::{
    ChatMessage, CompletionRequest, ContentPart, ImageDetail, ImageUpload, ImageUrl,
    PersonalityType,
};
use crate::{Result, TetoegenError};

/// Default vision model for classification.
pub const DEFAULT_ANALYZE_MODEL: &str = "gpt-4-vision-preview";

/// Default text model for development tips.
pub const DEFAULT_TIPS_MODEL: &str = "gpt-4";

const ANALYZE_MAX_TOKENS: u32 = 1000;
const ANALYZE_TEMPERATURE: f32 = 0.7;
const TIPS_MAX_TOKENS: u32 = 800;
const TIPS_TEMPERATURE: f32 = 0.8;

/// Instruction sent with every photo. Asks the model to weigh demeanour
/// (confidence, inner strength, softness, emotionality) over appearance.
pub const CLASSIFICATION_PROMPT: &str = "당신은 사람의 얼굴 표정과 전체적인 분위기를 통해 성격 유형을 분석하는 AI 심리학자입니다. \
주어진 사진 속 인물을 분석하여, 4가지 '호르몬 기반 성격 유형' 중 가장 가능성이 높은 유형을 판단해 주세요. \
분석 시에는 외형이나 스타일보다는, 사진에서 유추할 수 있는 자신감, 내면의 강인함, 부드러움, 감성 등 성격적 특성에 집중해야 합니다.

* **테토남:** 강인함, 주도적, 자신감, 직설적 태도가 느껴지는가?
* **에겐남:** 감성적, 공감 능력, 부드러운 태도가 느껴지는가?
* **테토녀:** 독립적, 주도적, 자신감 있는 분위기인가?
* **에겐녀:** 따뜻함, 감성적, 포용적인 분위기인가?

분석 결과를 바탕으로 가장 가능성 높은 유형, 해당 유형의 이모지, 신뢰도 백분율(70~95%), \
그리고 당신의 판단을 뒷받침하는 구체적인 근거 3가지를 JSON 형식으로 반환해 주세요. \
JSON 키는 \"type\", \"emoji\", \"confidence\", \"reasons\"를 사용하세요.";

/// A photo ready to be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    prompt: &'static str,
    image_data_url: String,
}

impl ClassificationRequest {
    /// Build a request from an uploaded image.
    ///
    /// Returns `MissingInput` when no image was supplied or it is empty.
    pub fn new(image: Option<ImageUpload>) -> Result<Self> {
        let image = image
            .filter(|image| !image.is_empty())
            .ok_or(TetoegenError::MissingInput("image"))?;
        Ok(Self {
            prompt: CLASSIFICATION_PROMPT,
            image_data_url: to_data_url(&image),
        })
    }

    pub fn prompt(&self) -> &str {
        self.prompt
    }

    /// The image as a `data:` URL.
    pub fn image_data_url(&self) -> &str {
        &self.image_data_url
    }

    /// Render the chat-completions request for `model`.
    pub fn to_completion(&self, model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::user_parts(vec![
                ContentPart::Text {
                    text: self.prompt.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: self.image_data_url.clone(),
                        detail: ImageDetail::High,
                    },
                },
            ])],
            max_tokens: ANALYZE_MAX_TOKENS,
            temperature: ANALYZE_TEMPERATURE,
        }
    }
}

/// Encode an image as `data:{mime};base64,{payload}`.
pub fn to_data_url(image: &ImageUpload) -> String {
    format!(
        "data:{};base64,{}",
        image.image_mime(),
        STANDARD.encode(&image.bytes)
    )
}

/// Prompt asking for development tips for `label`.
pub fn tip_prompt(label: PersonalityType) -> String {
    format!(
        "사용자의 분석 유형은 '{label}'입니다. 당신은 재치있는 라이프 코치 AI입니다.
'{label}' 유형이 가진 핵심 강점(예: 테토남의 '주도력', 에겐녀의 '공감 능력')을 더욱 발전시킬 수 있는, \
재미있고 실용적인 '호르몬 발전 팁'을 생성해 주세요. 이것은 의학적 조언이 아닌, 성격 발전을 위한 즐거운 제안입니다.

결과는 다음 내용을 포함하는 JSON 형식이어야 합니다:
1. 사용자의 흥미를 끄는 재치 있는 제목 (\"title\").
2. 각 유형의 강점을 강화하는 구체적인 팁 2~3개, 이모지 포함 (\"tips\").
3. 해당 유형의 사람이 관심을 가질 만한 쇼핑 키워드 3개 (\"shoppingKeywords\")."
    )
}

/// Render the chat-completions request for development tips.
pub fn tip_request(label: PersonalityType, model: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(tip_prompt(label))],
        max_tokens: TIPS_MAX_TOKENS,
        temperature: TIPS_TEMPERATURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_defaults_to_jpeg() {
        let image = ImageUpload::new(vec![0xff, 0xd8, 0xff]);
        assert_eq!(to_data_url(&image), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn data_url_keeps_image_content_type() {
        let image = ImageUpload::new(b"png".to_vec()).content_type("image/png");
        assert!(to_data_url(&image).starts_with("data:image/png;base64,"));
    }

    #[test]
    fn data_url_ignores_non_image_content_type() {
        let image = ImageUpload::new(b"x".to_vec()).content_type("application/octet-stream");
        assert!(to_data_url(&image).starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn tip_prompt_mentions_label() {
        let prompt = tip_prompt(PersonalityType::EgenMale);
        assert!(prompt.contains("'에겐남'"));
    }
}
