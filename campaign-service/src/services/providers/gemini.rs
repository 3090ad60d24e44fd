//! Gemini-backed campaign provider.
//!
//! Talks to the Gemini REST API with two calls per campaign: text
//! summarization with the Google Search tool enabled, then image generation
//! with `responseModalities: ["IMAGE", "TEXT"]` and an aspect-ratio
//! constraint. Reference images travel as inline base64 parts after the
//! single text part.

use super::{CampaignProvider, ProviderError};
use crate::models::{AdLanguage, AspectRatio, ReferenceImage};
use crate::prompts;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
}

pub struct GeminiCampaignProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiCampaignProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn api_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, model, self.config.api_key
        )
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url(model))
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl CampaignProvider for GeminiCampaignProvider {
    async fn summarize_business(
        &self,
        url: &str,
        language: AdLanguage,
    ) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ContentPart::Text {
                    text: prompts::summary_prompt(url, language),
                }],
            }],
            generation_config: None,
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
        };

        tracing::debug!(
            model = %self.config.text_model,
            url = %url,
            "Requesting business summary from Gemini"
        );

        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        extract_text(&response).ok_or(ProviderError::EmptyResponse)
    }

    async fn generate_ad_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        reference_images: &[ReferenceImage],
    ) -> Result<Vec<u8>, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: build_image_parts(prompt, reference_images),
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.code().to_string(),
                }),
            }),
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
        };

        tracing::debug!(
            model = %self.config.image_model,
            aspect_ratio = %aspect_ratio.code(),
            reference_count = reference_images.len(),
            "Requesting ad image from Gemini"
        );

        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;

        let parts = response
            .candidates
            .first()
            .map(|c| c.content.parts.as_slice())
            .unwrap_or_default();

        extract_inline_image(parts)
    }
}

/// One text part carrying the prompt, then one inline part per reference
/// image, in upload order.
fn build_image_parts(prompt: &str, reference_images: &[ReferenceImage]) -> Vec<ContentPart> {
    let mut parts = vec![ContentPart::Text {
        text: prompt.to_string(),
    }];

    for image in reference_images {
        parts.push(ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: BASE64.encode(&image.data),
            },
        });
    }

    parts
}

fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .first()?
        .content
        .parts
        .iter()
        .find_map(|p| match p {
            ContentPart::Text { text } if !text.is_empty() => Some(text.clone()),
            _ => None,
        })
}

/// Decode the first inline-data part. A response with no such part fails
/// with the concatenated text of every part for diagnostics.
fn extract_inline_image(parts: &[ContentPart]) -> Result<Vec<u8>, ProviderError> {
    for part in parts {
        if let ContentPart::InlineData { inline_data } = part {
            return BASE64
                .decode(&inline_data.data)
                .map_err(|e| ProviderError::ApiError(format!("Invalid inline image data: {}", e)));
        }
    }

    let debug_text = parts
        .iter()
        .map(|p| match p {
            ContentPart::Text { text } => text.as_str(),
            _ => "[no text]",
        })
        .collect::<Vec<_>>()
        .join("\n");

    Err(ProviderError::NoImageData(debug_text))
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: InlineData,
    },
    // Parts this service does not consume (thoughts, tool calls).
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(data: &[u8], mime: &str) -> ReferenceImage {
        ReferenceImage {
            data: data.to_vec(),
            mime_type: mime.to_string(),
        }
    }

    #[test]
    fn image_parts_are_one_text_plus_n_inline() {
        let refs = vec![
            reference(b"logo", "image/png"),
            reference(b"product", "image/jpeg"),
            reference(b"storefront", "image/webp"),
        ];

        let parts = build_image_parts("make an ad", &refs);

        assert_eq!(parts.len(), 4);
        assert!(matches!(&parts[0], ContentPart::Text { text } if text == "make an ad"));
        let inline_count = parts
            .iter()
            .filter(|p| matches!(p, ContentPart::InlineData { .. }))
            .count();
        assert_eq!(inline_count, 3);
    }

    #[test]
    fn inline_parts_preserve_order_and_mime_type() {
        let refs = vec![
            reference(b"first", "image/png"),
            reference(b"second", "image/jpeg"),
        ];

        let parts = build_image_parts("prompt", &refs);

        match &parts[1] {
            ContentPart::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/png");
                assert_eq!(BASE64.decode(&inline_data.data).unwrap(), b"first");
            }
            other => panic!("Expected inline part, got {:?}", other),
        }
        match &parts[2] {
            ContentPart::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/jpeg");
            }
            other => panic!("Expected inline part, got {:?}", other),
        }
    }

    #[test]
    fn request_serializes_to_gemini_wire_format() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: build_image_parts("prompt", &[reference(b"logo", "image/png")]),
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
                image_config: Some(ImageConfig {
                    aspect_ratio: "9:16".to_string(),
                }),
            }),
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
        assert_eq!(json["generationConfig"]["imageConfig"]["aspectRatio"], "9:16");
        assert!(json["tools"][0]["googleSearch"].is_object());
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
    }

    #[test]
    fn response_with_camel_case_inline_data_deserializes() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": BASE64.encode(b"png-bytes") } }
                    ]
                }
            }]
        });

        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let parts = &response.candidates[0].content.parts;
        let bytes = extract_inline_image(parts).unwrap();
        assert_eq!(bytes, b"png-bytes");
    }

    #[test]
    fn text_only_response_fails_with_concatenated_parts() {
        let parts = vec![
            ContentPart::Text {
                text: "I cannot draw that".to_string(),
            },
            ContentPart::Text {
                text: "try a different prompt".to_string(),
            },
        ];

        let err = extract_inline_image(&parts).unwrap_err();
        match err {
            ProviderError::NoImageData(text) => {
                assert!(text.contains("I cannot draw that"));
                assert!(text.contains("try a different prompt"));
            }
            other => panic!("Expected NoImageData, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_parts_do_not_count_as_a_summary() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [ { "text": "" } ] } }]
        }))
        .unwrap();

        assert!(extract_text(&response).is_none());
    }
}
