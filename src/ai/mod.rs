//! AI service integration for caption and creative generation
//!
//! Defines the capability seams the session orchestrates over, plus the
//! Gemini-backed implementations and the mock clients used in tests.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiCaptionClient, GeminiCreativeClient};
pub use mock::{MockCaptionClient, MockCreativeClient};

use crate::encoding::ReferenceImage;
use crate::models::Language;
use crate::Result;
use async_trait::async_trait;

/// Produces a marketing caption from a briefing and optional reference image.
#[async_trait]
pub trait CaptionService: Send + Sync {
    async fn generate_caption(
        &self,
        reference: Option<&ReferenceImage>,
        briefing: &str,
        language: Language,
    ) -> Result<String>;
}

/// Produces a creative image (as a data URL) from a briefing, optionally
/// style-matched against a reference image.
#[async_trait]
pub trait CreativeService: Send + Sync {
    async fn generate_creative(
        &self,
        briefing: &str,
        language: Language,
        reference: Option<&ReferenceImage>,
    ) -> Result<String>;
}
