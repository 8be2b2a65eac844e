use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// HTTP client with bearer authentication and built-in rate limiting
pub struct RateLimitedClient {
    client: Client,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimitedClient {
    pub fn new(
        user_agent: &str,
        timeout_secs: u64,
        rate_limit_ms: u64,
        api_key: &str,
    ) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs, api_key)?;

        Ok(Self {
            client,
            min_interval: Duration::from_millis(rate_limit_ms),
            last_request: Mutex::new(None),
        })
    }

    pub async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<reqwest::Response> {
        self.wait_for_slot().await;
        self.send_post_request(url, body).await
    }

    fn build_client(user_agent: &str, timeout_secs: u64, api_key: &str) -> Result<Client> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .context("API key contains invalid header characters")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")
    }

    /// Enforce a minimum interval between consecutive requests
    async fn wait_for_slot(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn send_post_request(&self, url: &str, body: &serde_json::Value) -> Result<reqwest::Response> {
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send POST request")
    }
}
