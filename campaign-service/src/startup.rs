//! Application startup and lifecycle management.

use crate::config::CampaignConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiCampaignProvider, GeminiConfig};
use crate::services::providers::CampaignProvider;
use crate::services::ImageStore;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Uploaded reference images are held in memory; cap the request body.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Shared application state. No mutable state; every request is an
/// independent transaction.
#[derive(Clone)]
pub struct AppState {
    pub config: CampaignConfig,
    pub provider: Arc<dyn CampaignProvider>,
    pub store: ImageStore,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with the Gemini provider from configuration.
    pub async fn build(config: CampaignConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn CampaignProvider> =
            Arc::new(GeminiCampaignProvider::new(GeminiConfig {
                api_key: config.google.api_key.clone(),
                text_model: config.models.text_model.clone(),
                image_model: config.models.image_model.clone(),
            }));

        tracing::info!(
            text_model = %config.models.text_model,
            image_model = %config.models.image_model,
            "Initialized Gemini campaign provider"
        );

        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an arbitrary provider (mocked in tests).
    pub async fn build_with_provider(
        config: CampaignConfig,
        provider: Arc<dyn CampaignProvider>,
    ) -> Result<Self, AppError> {
        let store = ImageStore::new(&config.storage.scratch_dir)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to initialize scratch storage at {}: {}",
                    config.storage.scratch_dir,
                    e
                );
                e
            })?;

        let cors = cors_layer(&config.cors.allowed_origin)?;

        let state = AppState {
            config: config.clone(),
            provider,
            store,
        };

        let app = Router::new()
            .route("/", get(handlers::index))
            .route("/health", get(handlers::health_check))
            .route(
                "/api/gemini/generate-campaign",
                post(handlers::generate_campaign),
            )
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

/// Allow the configured frontend origin with credentials, mirroring
/// whatever method/headers the browser asks for.
fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, AppError> {
    let origin = allowed_origin.parse::<HeaderValue>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Invalid CORS origin '{}': {}",
            allowed_origin,
            e
        ))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
