//! Presentation state for the analyze screen.
//!
//! [`AnalyzeView`] owns everything the screen shows: the selected photo and
//! its preview, the pending flags, and the last result and tips. Front ends
//! drive it through `begin_*`/`complete_*` pairs around their HTTP calls:
//!
//! ```ignore
//! if let Some(upload) = view.begin_analysis() {
//!     let outcome = client.analyze(&upload).await;
//!     view.complete_analysis(outcome);
//! }
//! ```
//!
//! The pending flags only stop this view from issuing a duplicate request;
//! the server does no de-duplication of its own.

use crate::Result;
use crate::request::to_data_url;
use crate::types::{AnalysisResult, DevelopmentTip, ImageUpload, PersonalityType};

/// Title used when sharing a result.
pub const SHARE_TITLE: &str = "테토-에겐 분석 결과";

/// State of the analyze screen.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeView {
    image: Option<ImageUpload>,
    preview: Option<String>,
    analyzing: bool,
    loading_tips: bool,
    result: Option<AnalysisResult>,
    tips: Option<DevelopmentTip>,
    last_error: Option<String>,
}

impl AnalyzeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a new photo. Clears any previous result and tips.
    pub fn select_image(&mut self, image: ImageUpload) {
        self.preview = Some(to_data_url(&image));
        self.image = Some(image);
        self.result = None;
        self.tips = None;
        self.last_error = None;
    }

    /// Start a classification request.
    ///
    /// Returns the upload to submit, or `None` when there is no photo, a
    /// request is already pending, or a result is already shown.
    pub fn begin_analysis(&mut self) -> Option<ImageUpload> {
        if !self.can_analyze() {
            return None;
        }
        self.analyzing = true;
        self.last_error = None;
        self.image.clone()
    }

    /// Finish the pending classification request.
    pub fn complete_analysis(&mut self, outcome: Result<AnalysisResult>) {
        self.analyzing = false;
        match outcome {
            Ok(result) => self.result = Some(result),
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    /// Start a tips request for the current result's label.
    ///
    /// Returns `None` without a result or while a tips request is pending.
    pub fn begin_tips(&mut self) -> Option<PersonalityType> {
        if !self.can_request_tips() {
            return None;
        }
        self.loading_tips = true;
        self.last_error = None;
        self.result.as_ref().map(|r| r.label)
    }

    /// Finish the pending tips request.
    pub fn complete_tips(&mut self, outcome: Result<DevelopmentTip>) {
        self.loading_tips = false;
        match outcome {
            Ok(tips) => self.tips = Some(tips),
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    /// Clear all transient state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && !self.analyzing && self.result.is_none()
    }

    pub fn can_request_tips(&self) -> bool {
        self.result.is_some() && !self.loading_tips
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    /// Preview of the selected photo as a `data:` URL.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn is_loading_tips(&self) -> bool {
        self.loading_tips
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn tips(&self) -> Option<&DevelopmentTip> {
        self.tips.as_ref()
    }

    /// Message of the last failed request, cleared by the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// What to share for the current result.
    pub fn share_payload(&self, url: impl Into<String>) -> Option<SharePayload> {
        self.result.as_ref().map(|result| SharePayload {
            title: SHARE_TITLE.to_string(),
            text: share_text(result),
            url: url.into(),
        })
    }

    /// Share the current result through `native` when available, otherwise
    /// copy the text to `clipboard`.
    ///
    /// Returns `None` when there is nothing to share.
    pub fn share(
        &self,
        url: impl Into<String>,
        native: Option<&dyn ShareTarget>,
        clipboard: &dyn ClipboardTarget,
    ) -> Option<Result<ShareOutcome>> {
        let payload = self.share_payload(url)?;
        let outcome = match native {
            Some(target) => target.share(&payload).map(|()| ShareOutcome::Shared),
            None => clipboard
                .copy_text(&payload.text)
                .map(|()| ShareOutcome::Copied),
        };
        Some(outcome)
    }
}

/// One-line summary of a result.
pub fn share_text(result: &AnalysisResult) -> String {
    format!(
        "{SHARE_TITLE}: {} {} (신뢰도 {}%)",
        result.label, result.emoji, result.confidence
    )
}

/// Content handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// How a result left the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the platform share sheet.
    Shared,
    /// Copied to the clipboard.
    Copied,
}

/// Platform share capability.
pub trait ShareTarget {
    fn share(&self, payload: &SharePayload) -> Result<()>;
}

/// Clipboard used when no share capability exists.
pub trait ClipboardTarget {
    fn copy_text(&self, text: &str) -> Result<()>;
}
