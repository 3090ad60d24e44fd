use crate::models::{AdLanguage, AspectRatio, ImageStyle, ReferenceImage};
use serde::Serialize;
use validator::Validate;

/// One incoming request, assembled from the multipart form and discarded
/// once the response is sent.
#[derive(Debug, Validate)]
pub struct CampaignRequest {
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
    pub language: AdLanguage,
    pub style: ImageStyle,
    pub aspect_ratio: AspectRatio,
    pub reference_images: Vec<ReferenceImage>,
}

#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    /// Prompt text used for image generation.
    pub description: String,
    /// Data-URI-wrapped base64 PNG.
    pub image: String,
}
