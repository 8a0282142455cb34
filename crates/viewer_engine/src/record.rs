use std::collections::BTreeMap;

use serde::Deserialize;

/// Job status as reported by the backend: a small open-ended set of
/// progress strings, or one of the two terminal sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobStatus {
    InProgress(String),
    Processed,
    Error,
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "processed" => JobStatus::Processed,
            "error" => JobStatus::Error,
            _ => JobStatus::InProgress(raw),
        }
    }
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Processed | JobStatus::Error)
    }

    pub fn label(&self) -> &str {
        match self {
            JobStatus::InProgress(stage) => stage,
            JobStatus::Processed => "processed",
            JobStatus::Error => "error",
        }
    }
}

/// The backend's result record for one uploaded picture, exactly as served
/// by `GET /api/results/{picture_id}`. Fields fill in as the pipeline
/// progresses; once the status is terminal the record never changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobRecord {
    pub picture_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub original_filename: Option<String>,
    /// Server path to the source raster image.
    #[serde(default)]
    pub input_image: Option<String>,
    /// Present only when `status` is `error`.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Raw PAGE-XML text, present once the structure stages complete.
    #[serde(default)]
    pub xml_content: Option<String>,
    /// Server path to a downloadable copy of the XML.
    #[serde(default)]
    pub xml_filename: Option<String>,
    /// Table-region id -> rendered HTML fragment.
    #[serde(default)]
    pub html_tables: BTreeMap<String, String>,
}
