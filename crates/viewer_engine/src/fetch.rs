use std::time::Duration;

use url::Url;

use crate::record::JobRecord;
use crate::types::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL of the backend, e.g. `http://localhost:8000/`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Fetches job records by picture id. The poller talks to the backend only
/// through this trait so tests can substitute a scripted client.
#[async_trait::async_trait]
pub trait ResultsClient: Send + Sync {
    async fn fetch_record(&self, picture_id: &str) -> Result<JobRecord, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestResultsClient {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestResultsClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    /// Downloads the source raster from its server path (the record's
    /// `input_image` value).
    pub async fn fetch_image(&self, server_path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.endpoint(server_path)?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl ResultsClient for ReqwestResultsClient {
    async fn fetch_record(&self, picture_id: &str) -> Result<JobRecord, FetchError> {
        let url = self.endpoint(&format!("api/results/{picture_id}"))?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.json::<JobRecord>().await.map_err(|err| {
            if err.is_decode() {
                FetchError::new(FailureKind::Decode, err.to_string())
            } else {
                map_reqwest_error(err)
            }
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
