use crate::history::{HistoryStore, PrintJob};
use crate::printer::PrinterClient;
use anyhow::Result;

/// Validates editor input, sends it to the printer, and records the job.
#[derive(Clone)]
pub struct Submitter {
    client: PrinterClient,
    history: HistoryStore,
}

impl Submitter {
    pub fn new(client: PrinterClient, history: HistoryStore) -> Self {
        Submitter { client, history }
    }

    /// Empty or whitespace-only input returns `Ok(None)` without touching
    /// the network. On HTTP 200 the new job lands at the front of history;
    /// any failure leaves history untouched and the job is discarded.
    pub async fn submit(&self, raw: &str) -> Result<Option<PrintJob>> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let job = self.client.print(text).await?;
        self.history.prepend(job.clone())?;
        tracing::info!(job_id = %job.id, "printed {} bytes", job.text.len());
        Ok(Some(job))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrinterConfig;
    use tempfile::TempDir;

    fn submitter_for(endpoint: String, dir: &std::path::Path) -> (Submitter, HistoryStore) {
        let client = PrinterClient::new(&PrinterConfig {
            endpoint,
            request_timeout_ms: 2000,
        })
        .unwrap();
        let history = HistoryStore::open(dir).unwrap();
        (Submitter::new(client, history.clone()), history)
    }

    #[tokio::test]
    async fn test_blank_input_makes_no_network_call() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/")
            .expect(0)
            .create_async()
            .await;

        let tmpdir = TempDir::new().unwrap();
        let (submitter, history) = submitter_for(server.url() + "/", tmpdir.path());

        assert!(submitter.submit("").await.unwrap().is_none());
        assert!(submitter.submit("   \n\t  ").await.unwrap().is_none());

        m.assert_async().await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_success_prepends_one_trimmed_job() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .expect(2)
            .create_async()
            .await;

        let tmpdir = TempDir::new().unwrap();
        let (submitter, history) = submitter_for(server.url() + "/", tmpdir.path());

        let first = submitter.submit("  first receipt  ").await.unwrap().unwrap();
        assert_eq!(first.text, "first receipt");
        assert_eq!(history.len(), 1);

        let second = submitter.submit("second receipt").await.unwrap().unwrap();
        assert_ne!(first.id, second.id);

        let jobs = history.jobs();
        assert_eq!(jobs[0].text, "second receipt");
        assert_eq!(jobs[1].text, "first receipt");
    }

    #[tokio::test]
    async fn test_failure_discards_job() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .with_status(500)
            .create_async()
            .await;

        let tmpdir = TempDir::new().unwrap();
        let (submitter, history) = submitter_for(server.url() + "/", tmpdir.path());

        assert!(submitter.submit("doomed").await.is_err());
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_connection_error_discards_job() {
        // Nothing listens on port 1.
        let tmpdir = TempDir::new().unwrap();
        let (submitter, history) = submitter_for("http://127.0.0.1:1/".into(), tmpdir.path());

        assert!(submitter.submit("unreachable").await.is_err());
        assert!(history.is_empty());
    }
}
