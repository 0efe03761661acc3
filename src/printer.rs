use crate::config::PrinterConfig;
use crate::history::PrintJob;
use anyhow::{bail, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Leading feed so the text clears the tear bar before printing starts.
const FEED_PREFIX: &str = "\n\n\n";

/// HTTP client for the receipt printer endpoint. The same URL serves the
/// liveness GET and the print POST.
#[derive(Debug, Clone)]
pub struct PrinterClient {
    client: Client,
    endpoint: String,
}

impl PrinterClient {
    pub fn new(cfg: &PrinterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .user_agent(concat!("print_station/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(PrinterClient {
            client,
            endpoint: cfg.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Liveness probe: 200 means online, any other status or transport
    /// error means offline.
    pub async fn is_online(&self) -> bool {
        match self.client.get(&self.endpoint).send().await {
            Ok(resp) => resp.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!("status poll failed: {}", e);
                false
            }
        }
    }

    /// Sends `text` as the raw request body, prefixed with the paper feed.
    /// Returns the job record to store on HTTP 200.
    pub async fn print(&self, text: &str) -> Result<PrintJob> {
        let body = format!("{}{}", FEED_PREFIX, text);
        let resp = self.client.post(&self.endpoint).body(body).send().await?;
        if resp.status() != StatusCode::OK {
            bail!("printer returned status {}", resp.status());
        }
        Ok(PrintJob::new(text))
    }
}
