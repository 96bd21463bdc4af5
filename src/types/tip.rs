//! Development tip types

use serde::{Deserialize, Serialize};

/// Advice content for a personality type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentTip {
    pub title: String,
    pub tips: Vec<String>,
    pub shopping_keywords: Vec<String>,
}
