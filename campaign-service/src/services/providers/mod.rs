//! AI provider abstraction for campaign generation.
//!
//! The orchestrator only sees the two-method `CampaignProvider` trait, so
//! the Gemini backend can be swapped for a mock in tests.

pub mod gemini;
pub mod mock;

use crate::models::{AdLanguage, AspectRatio, ReferenceImage};
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations. None of these are retried; they
/// abort the request they occurred in.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("no usable text in response")]
    EmptyResponse,

    #[error("no inline image data in response; parts received:\n{0}")]
    NoImageData(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => AppError::InternalError(err.into()),
            other => AppError::BadGateway(other.to_string()),
        }
    }
}

/// The two upstream operations a campaign needs, in call order.
#[async_trait]
pub trait CampaignProvider: Send + Sync {
    /// Summarize the business behind `url` in `language`, using the
    /// provider's web-search augmentation to read the site.
    async fn summarize_business(
        &self,
        url: &str,
        language: AdLanguage,
    ) -> Result<String, ProviderError>;

    /// Generate the ad image for an already-built prompt, constrained to
    /// `aspect_ratio`, with any reference images attached as inline parts.
    /// Returns the raw image bytes; persistence is the caller's concern.
    async fn generate_ad_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        reference_images: &[ReferenceImage],
    ) -> Result<Vec<u8>, ProviderError>;
}
