use campaign_service::config::CampaignConfig;
use campaign_service::services::providers::mock::MockCampaignProvider;
use campaign_service::services::providers::CampaignProvider;
use campaign_service::startup::Application;
use std::sync::Arc;
use uuid::Uuid;

pub const BAKERY_SUMMARY: &str =
    "Example Bakery is a family-run bakery in Sofia offering sourdough bread, \
     custom cakes, and morning pastries.";

pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

pub struct TestApp {
    pub address: String,
    pub scratch_dir: String,
    pub provider: Arc<MockCampaignProvider>,
}

impl TestApp {
    pub async fn spawn(provider: MockCampaignProvider) -> Self {
        std::env::set_var("GOOGLE_API_KEY", "test-api-key");

        let scratch_dir = format!("target/test-scratch-{}", Uuid::new_v4());

        let mut config = CampaignConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.storage.scratch_dir = scratch_dir.clone();

        let provider = Arc::new(provider);
        let app =
            Application::build_with_provider(config, provider.clone() as Arc<dyn CampaignProvider>)
                .await
                .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            scratch_dir,
            provider,
        }
    }

    /// Number of files currently sitting in the scratch directory.
    pub fn scratch_file_count(&self) -> usize {
        std::fs::read_dir(&self.scratch_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.scratch_dir).await;
    }
}
