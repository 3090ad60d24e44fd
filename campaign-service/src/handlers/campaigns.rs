//! The campaign-generation endpoint.
//!
//! Strictly sequential per request: parse multipart → summarize business →
//! build image prompt → generate image → save to scratch → read back and
//! base64-encode → delete the scratch file → respond. Any failure aborts
//! the request; nothing is retried.

use crate::dtos::{CampaignRequest, CampaignResponse};
use crate::models::{
    AdLanguage, AspectRatio, BusinessSummary, GeneratedAd, ImageStyle, InvalidChoice,
    ReferenceImage,
};
use crate::prompts;
use crate::startup::AppState;
use axum::{
    extract::{multipart::Field, Multipart, State},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use service_core::error::AppError;
use validator::Validate;

pub async fn generate_campaign(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let request = parse_campaign_form(multipart).await?;
    request.validate()?;

    tracing::info!(
        url = %request.url,
        style = ?request.style,
        aspect_ratio = %request.aspect_ratio.code(),
        reference_count = request.reference_images.len(),
        "Campaign generation started"
    );

    let summary = BusinessSummary {
        text: state
            .provider
            .summarize_business(&request.url, request.language)
            .await?,
        language: request.language,
        style: request.style,
        aspect_ratio: request.aspect_ratio,
    };

    let prompt = prompts::ad_image_prompt(&summary.text, summary.style, summary.language);

    let image_bytes = state
        .provider
        .generate_ad_image(&prompt, summary.aspect_ratio, &request.reference_images)
        .await?;

    let ad = GeneratedAd {
        handle: state.store.save(&image_bytes).await?,
        prompt,
    };

    // Deletion runs whether or not the read-back succeeded, so the scratch
    // directory never accumulates files.
    let read_back = state.store.read(&ad.handle).await;
    if let Err(e) = state.store.delete(&ad.handle).await {
        tracing::warn!(
            file = %ad.handle.file_name(),
            "Failed to delete scratch image: {}",
            e
        );
    }
    let served = read_back?;

    tracing::info!(
        file = %ad.handle.file_name(),
        size = served.len(),
        "Campaign generation completed"
    );

    Ok(Json(CampaignResponse {
        description: ad.prompt,
        image: format!("data:image/png;base64,{}", BASE64.encode(&served)),
    }))
}

async fn parse_campaign_form(mut multipart: Multipart) -> Result<CampaignRequest, AppError> {
    let mut url = None;
    let mut language = None;
    let mut style = None;
    let mut aspect_ratio = None;
    let mut reference_images = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        match field.name() {
            Some("url") => {
                url = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read url field: {}", e))
                })?);
            }
            Some("countryAdLanguage") => {
                language = Some(parse_choice::<AdLanguage>(field).await?);
            }
            Some("imageType") => {
                style = Some(parse_choice::<ImageStyle>(field).await?);
            }
            Some("imageAspectRatio") => {
                aspect_ratio = Some(parse_choice::<AspectRatio>(field).await?);
            }
            Some("referenceImages") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::BadRequest(anyhow::anyhow!(
                            "Failed to read reference image: {}",
                            e
                        ))
                    })?
                    .to_vec();
                // Browsers submit an empty part when no file was chosen.
                if !data.is_empty() {
                    reference_images.push(ReferenceImage { data, mime_type });
                }
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    Ok(CampaignRequest {
        url: url.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("url field is required")))?,
        language: language.ok_or_else(|| {
            AppError::BadRequest(anyhow::anyhow!("countryAdLanguage field is required"))
        })?,
        style: style
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("imageType field is required")))?,
        aspect_ratio: aspect_ratio.ok_or_else(|| {
            AppError::BadRequest(anyhow::anyhow!("imageAspectRatio field is required"))
        })?,
        reference_images,
    })
}

/// Parse an integer-discriminant form field into one of the closed enums.
async fn parse_choice<T>(field: Field<'_>) -> Result<T, AppError>
where
    T: TryFrom<u8, Error = InvalidChoice>,
{
    let name = field.name().unwrap_or("field").to_string();
    let text = field.text().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read {} field: {}", name, e))
    })?;
    let value: u8 = text.trim().parse().map_err(|_| {
        AppError::BadRequest(anyhow::anyhow!("{} must be an integer, got '{}'", name, text))
    })?;
    T::try_from(value).map_err(|e| AppError::BadRequest(e.into()))
}
