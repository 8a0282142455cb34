use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use viewer_logging::{viewer_debug, viewer_info, viewer_warn};

use crate::fetch::ResultsClient;
use crate::record::{JobRecord, JobStatus};
use crate::types::PollOutcome;

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Delay between the settlement of one fetch and the next request.
    pub delay: Duration,
    /// Optional cap on the number of fetches. No backoff either way; a
    /// failed fetch is terminal, not retried.
    pub max_attempts: Option<u32>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(300),
            max_attempts: None,
        }
    }
}

/// Receives every fetched record, in arrival order, terminal ones included.
pub trait PollSink: Send + Sync {
    fn record(&self, record: JobRecord);
}

/// Polls one job until a terminal status, a transport failure, cancellation,
/// or the attempt cap. At most one request is ever in flight: the loop is a
/// plain sequential await chain.
pub struct Poller {
    client: Arc<dyn ResultsClient>,
    settings: PollSettings,
}

impl Poller {
    pub fn new(client: Arc<dyn ResultsClient>, settings: PollSettings) -> Self {
        Self { client, settings }
    }

    pub async fn run(
        &self,
        picture_id: &str,
        sink: &dyn PollSink,
        cancel: &CancellationToken,
    ) -> PollOutcome {
        let mut attempts: u32 = 0;
        loop {
            if let Some(max) = self.settings.max_attempts {
                if attempts >= max {
                    viewer_warn!("poll for {picture_id} gave up after {attempts} attempts");
                    return PollOutcome::AttemptsExhausted { attempts };
                }
            }
            attempts += 1;

            // An in-flight fetch cannot be aborted; losing the race against
            // cancellation means its result is dropped, never emitted.
            let fetched = tokio::select! {
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                result = self.client.fetch_record(picture_id) => result,
            };

            let record = match fetched {
                Ok(record) => record,
                Err(err) => {
                    viewer_warn!("poll for {picture_id} ended on transport failure: {err}");
                    return PollOutcome::Transport(err);
                }
            };

            sink.record(record.clone());

            match &record.status {
                JobStatus::Processed => {
                    viewer_info!("job {picture_id} processed after {attempts} fetches");
                    return PollOutcome::Processed(record);
                }
                JobStatus::Error => {
                    viewer_warn!(
                        "backend reported error for {picture_id}: {}",
                        record.error_message.as_deref().unwrap_or("(no message)")
                    );
                    return PollOutcome::BackendError(record);
                }
                JobStatus::InProgress(stage) => {
                    viewer_debug!("job {picture_id} still working: {stage}");
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                _ = tokio::time::sleep(self.settings.delay) => {}
            }
        }
    }
}
