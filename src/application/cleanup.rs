//! Background deletion of orphaned image objects.
//!
//! Post deletion and profile-image replacement must not block on object
//! storage, but the old objects still have to go away. This component
//! runs the storage delete on a background task with bounded retries,
//! so a transient storage failure does not leak the object silently.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, warn};

use crate::domain::post::ImageKey;
use crate::ports::ImageStore;

const MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Schedules image deletions on background tasks with bounded retries.
#[derive(Clone)]
pub struct ImageCleanup {
    store: Arc<dyn ImageStore>,
    retry_delay: Duration,
}

impl ImageCleanup {
    /// Creates a cleanup component over the given image store.
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self {
            store,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Overrides the delay between retry attempts.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Schedules `key` for deletion and returns immediately.
    pub fn schedule(&self, key: ImageKey) {
        let store = Arc::clone(&self.store);
        let retry_delay = self.retry_delay;

        tokio::spawn(async move {
            for attempt in 1..=MAX_ATTEMPTS {
                match store.delete(&key).await {
                    Ok(()) => return,
                    Err(e) if attempt < MAX_ATTEMPTS => {
                        warn!(
                            key = key.as_str(),
                            attempt,
                            error = %e,
                            "Image deletion failed, retrying"
                        );
                        tokio::time::sleep(retry_delay).await;
                    }
                    Err(e) => {
                        error!(
                            key = key.as_str(),
                            attempts = MAX_ATTEMPTS,
                            error = %e,
                            "Giving up on image deletion"
                        );
                    }
                }
            }
        });
    }
}
