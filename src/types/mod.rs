//! Public types for the Tetoegen API.

mod analysis;
mod completion;
mod health;
mod label;
mod tip;
mod upload;

pub use analysis::{AnalysisHistoryEntry, AnalysisResult};
pub use completion::{
    ChatMessage, CompletionChoice, CompletionMessage, CompletionRequest, CompletionResponse,
    ContentPart, ImageDetail, ImageUrl, MessageContent, Role,
};
pub use health::HealthResponse;
pub use label::PersonalityType;
pub use tip::DevelopmentTip;
pub use upload::ImageUpload;
