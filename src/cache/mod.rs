//! Caching layer.

pub mod tips;

pub use tips::{CacheConfig, TipCache};
