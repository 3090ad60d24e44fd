use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for business summarization (e.g., gemini-2.5-flash)
    pub text_model: String,
    /// Model for ad image generation (e.g., gemini-3.1-flash-image-preview)
    pub image_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Scratch directory for generated images, deleted after serving.
    pub scratch_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Browser frontend origin allowed to call the API with credentials.
    pub allowed_origin: String,
}

impl CampaignConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(CampaignConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
            },
            models: ModelConfig {
                text_model: get_env("CAMPAIGN_TEXT_MODEL", Some("gemini-2.5-flash"), is_prod)?,
                image_model: get_env(
                    "CAMPAIGN_IMAGE_MODEL",
                    Some("gemini-3.1-flash-image-preview"),
                    is_prod,
                )?,
            },
            storage: StorageConfig {
                scratch_dir: get_env("SCRATCH_DIR", Some("generated-images"), is_prod)?,
            },
            cors: CorsConfig {
                allowed_origin: get_env(
                    "CORS_ALLOWED_ORIGIN",
                    Some("http://localhost:5173"),
                    is_prod,
                )?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
