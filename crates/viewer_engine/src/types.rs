use std::fmt;

use crate::record::JobRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A job record arrived from the poller (terminal records included).
    Record(JobRecord),
    /// The poll loop ended; no further records will follow.
    PollEnded(PollOutcome),
    /// The source image was fetched and decoded.
    ImageLoaded { width: u32, height: u32 },
    /// The source image could not be fetched or decoded.
    ImageFailed { message: String },
}

/// How a poll run ended. `Processed` and `BackendError` carry the terminal
/// record for convenience; it was already emitted through the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Processed(JobRecord),
    BackendError(JobRecord),
    Transport(FetchError),
    Cancelled,
    AttemptsExhausted { attempts: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    /// The response body was not a well-formed JSON job record.
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
