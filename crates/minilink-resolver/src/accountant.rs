use minilink_core::{MappingStore, ShortCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{trace, warn};

/// Deadline for a single hit-count increment.
const CALL_TIMEOUT: Duration = Duration::from_secs(3);

/// Fire-and-forget hit-count accounting against the durable store.
///
/// Each recorded hit runs in a detached task using the store's atomic
/// increment. The caller holds no reference to the task; failures are
/// logged and dropped, so under-counting is possible but the request
/// path never waits on accounting.
#[derive(Debug, Clone)]
pub struct HitAccountant<S> {
    store: Arc<S>,
}

impl<S: MappingStore> HitAccountant<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Schedules a hit-count increment for `code` without waiting for it.
    pub fn record(&self, code: &ShortCode) {
        let store = Arc::clone(&self.store);
        let code = code.clone();

        tokio::spawn(async move {
            match timeout(CALL_TIMEOUT, store.increment_hits(&code)).await {
                Ok(Ok(())) => trace!(code = %code, "recorded hit"),
                Ok(Err(e)) => warn!(code = %code, error = %e, "failed to record hit"),
                Err(_) => warn!(code = %code, "hit record timed out"),
            }
        });
    }
}
