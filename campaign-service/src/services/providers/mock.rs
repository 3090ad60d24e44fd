//! Mock provider for testing.
//!
//! Records every call so tests can assert ordering (a failed summary must
//! not be followed by an image call) and argument pass-through.

use super::{CampaignProvider, ProviderError};
use crate::models::{AdLanguage, AspectRatio, ReferenceImage};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock has seen so far.
#[derive(Debug, Default, Clone)]
pub struct RecordedCalls {
    pub summarize_calls: usize,
    pub image_calls: usize,
    pub last_url: Option<String>,
    pub last_prompt: Option<String>,
    pub last_aspect_ratio: Option<String>,
    pub last_reference_count: Option<usize>,
}

pub struct MockCampaignProvider {
    summary: Option<String>,
    image: Option<Vec<u8>>,
    image_failure_text: String,
    recorded: Mutex<RecordedCalls>,
}

impl MockCampaignProvider {
    /// Provider that succeeds on both calls.
    pub fn new(summary: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            summary: Some(summary.into()),
            image: Some(image),
            image_failure_text: String::new(),
            recorded: Mutex::new(RecordedCalls::default()),
        }
    }

    /// Provider whose summarize call returns no usable text.
    pub fn failing_summary() -> Self {
        Self {
            summary: None,
            image: Some(vec![0u8; 16]),
            image_failure_text: String::new(),
            recorded: Mutex::new(RecordedCalls::default()),
        }
    }

    /// Provider whose image call returns only the given text parts.
    pub fn text_only_image(summary: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            image: None,
            image_failure_text: text.into(),
            recorded: Mutex::new(RecordedCalls::default()),
        }
    }

    pub fn recorded(&self) -> RecordedCalls {
        self.recorded.lock().expect("Mock lock poisoned").clone()
    }
}

#[async_trait]
impl CampaignProvider for MockCampaignProvider {
    async fn summarize_business(
        &self,
        url: &str,
        _language: AdLanguage,
    ) -> Result<String, ProviderError> {
        {
            let mut recorded = self.recorded.lock().expect("Mock lock poisoned");
            recorded.summarize_calls += 1;
            recorded.last_url = Some(url.to_string());
        }

        self.summary.clone().ok_or(ProviderError::EmptyResponse)
    }

    async fn generate_ad_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        reference_images: &[ReferenceImage],
    ) -> Result<Vec<u8>, ProviderError> {
        {
            let mut recorded = self.recorded.lock().expect("Mock lock poisoned");
            recorded.image_calls += 1;
            recorded.last_prompt = Some(prompt.to_string());
            recorded.last_aspect_ratio = Some(aspect_ratio.code().to_string());
            recorded.last_reference_count = Some(reference_images.len());
        }

        self.image
            .clone()
            .ok_or_else(|| ProviderError::NoImageData(self.image_failure_text.clone()))
    }
}
