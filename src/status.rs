use crate::printer::PrinterClient;
use crate::utils::now_unix_ms;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Snapshot of the most recent poll results.
#[derive(Debug, Clone)]
pub struct PrinterStatus {
    pub online: bool,
    pub last_poll_unix_ms: Option<u64>,
    pub failed_polls: u64,
}

/// Background poller keeping the online flag current. Clones share the
/// same flag, so the UI reads what the poll task writes.
#[derive(Clone)]
pub struct StatusPoller {
    client: PrinterClient,
    interval: Duration,
    online: Arc<AtomicBool>,
    last_poll_ms: Arc<AtomicU64>,
    failed_polls: Arc<AtomicU64>,
}

impl StatusPoller {
    pub fn new(client: PrinterClient, interval: Duration) -> Self {
        StatusPoller {
            client,
            interval,
            online: Arc::new(AtomicBool::new(false)),
            last_poll_ms: Arc::new(AtomicU64::new(0)),
            failed_polls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    pub fn status(&self) -> PrinterStatus {
        let last = self.last_poll_ms.load(Ordering::Acquire);
        PrinterStatus {
            online: self.is_online(),
            last_poll_unix_ms: (last > 0).then_some(last),
            failed_polls: self.failed_polls.load(Ordering::Acquire),
        }
    }

    /// One poll round. A failure only lasts until the next round; there is
    /// no retry and no backoff.
    pub async fn poll_once(&self) {
        let online = self.client.is_online().await;
        let was_online = self.online.swap(online, Ordering::AcqRel);
        self.last_poll_ms.store(now_unix_ms(), Ordering::Release);
        if !online {
            self.failed_polls.fetch_add(1, Ordering::Relaxed);
        }
        if online != was_online {
            tracing::info!(
                "printer {} at {}",
                if online { "online" } else { "offline" },
                self.client.endpoint()
            );
        }
    }

    /// Polls immediately, then once per interval until the task is aborted.
    pub async fn poll_loop(&self) {
        loop {
            self.poll_once().await;
            sleep(self.interval).await;
        }
    }
}

pub fn start_status_poller(poller: StatusPoller) -> JoinHandle<()> {
    tokio::spawn(async move {
        poller.poll_loop().await;
    })
}
