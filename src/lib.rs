//! Tetoegen - photo-based personality-type classification
//!
//! This crate classifies a photo into one of four hormone-themed personality
//! types (테토남, 테토녀, 에겐남, 에겐녀) by asking a vision-capable chat
//! model, and generates self-development tips per type. Every upstream
//! failure degrades to a plausible fallback, so callers always get a result.
//!
//! # Example
//!
//! ```rust,no_run
//! use tetoegen::{ClassificationRequest, ImageUpload, Tetoegen};
//!
//! #[tokio::main]
//! async fn main() -> tetoegen::Result<()> {
//!     let gateway = Tetoegen::builder()
//!         .openai("sk-your-key")
//!         .build()?;
//!
//!     let photo = std::fs::read("face.jpg").map_err(|e| {
//!         tetoegen::TetoegenError::InvalidInput(e.to_string())
//!     })?;
//!     let request = ClassificationRequest::new(Some(
//!         ImageUpload::new(photo).content_type("image/jpeg"),
//!     ))?;
//!
//!     let result = gateway.analyze(&request).await;
//!     println!("{} {} ({}%)", result.label, result.emoji, result.confidence);
//!
//!     let tips = gateway.development_tips(result.label).await;
//!     println!("{}", tips.title);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `server`: the axum HTTP service (`tetoegend`)
//! - `client`: [`client::ServiceClient`] and the `tetoegen` CLI

pub mod cache;
#[cfg(feature = "client")]
pub mod client;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod providers;
pub mod request;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod types;
pub mod view;

/// Crate version, reported by `/health`.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types at crate root
pub use error::{Result, TetoegenError};
pub use gateway::{Gateway, Tetoegen, TetoegenBuilder};
pub use request::ClassificationRequest;
pub use view::AnalyzeView;

pub use types::{
    AnalysisHistoryEntry, AnalysisResult, DevelopmentTip, HealthResponse, ImageUpload,
    PersonalityType,
};
