use std::sync::{mpsc, Arc};
use std::thread;

use tokio_util::sync::CancellationToken;

use crate::fetch::{ClientSettings, ReqwestResultsClient};
use crate::poll::{PollSettings, PollSink, Poller};
use crate::probe::probe_image_dimensions;
use crate::record::JobRecord;
use crate::types::{EngineEvent, FetchError};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub client: ClientSettings,
    pub poll: PollSettings,
}

impl EngineConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: ClientSettings::new(base_url),
            poll: PollSettings::default(),
        }
    }
}

enum EngineCommand {
    StartPolling { picture_id: String },
    FetchImage { server_path: String },
    Stop,
}

struct ChannelPollSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl PollSink for ChannelPollSink {
    fn record(&self, record: JobRecord) {
        let _ = self.tx.send(EngineEvent::Record(record));
    }
}

/// Bridges the synchronous host to the tokio side: commands in, events out.
/// `stop()` trips the cancellation token shared by every spawned task, so a
/// pending poll delay or in-flight fetch is abandoned instead of acted on.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, FetchError> {
        let client = Arc::new(ReqwestResultsClient::new(config.client)?);
        let poll_settings = config.poll;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let cancel = CancellationToken::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartPolling { picture_id } => {
                        let poller = Poller::new(client.clone(), poll_settings.clone());
                        let event_tx = event_tx.clone();
                        let cancel = cancel.clone();
                        runtime.spawn(async move {
                            let sink = ChannelPollSink {
                                tx: event_tx.clone(),
                            };
                            let outcome = poller.run(&picture_id, &sink, &cancel).await;
                            let _ = event_tx.send(EngineEvent::PollEnded(outcome));
                        });
                    }
                    EngineCommand::FetchImage { server_path } => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let event = match client.fetch_image(&server_path).await {
                                Ok(bytes) => match probe_image_dimensions(&bytes) {
                                    Ok((width, height)) => {
                                        EngineEvent::ImageLoaded { width, height }
                                    }
                                    Err(err) => EngineEvent::ImageFailed {
                                        message: err.to_string(),
                                    },
                                },
                                Err(err) => EngineEvent::ImageFailed {
                                    message: err.to_string(),
                                },
                            };
                            let _ = event_tx.send(event);
                        });
                    }
                    EngineCommand::Stop => {
                        cancel.cancel();
                        break;
                    }
                }
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn start_polling(&self, picture_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling {
            picture_id: picture_id.into(),
        });
    }

    pub fn fetch_image(&self, server_path: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchImage {
            server_path: server_path.into(),
        });
    }

    pub fn stop(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Stop);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}
