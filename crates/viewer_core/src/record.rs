use std::collections::BTreeMap;

/// Backend job status: an open set of human-readable progress strings plus
/// the two terminal sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Any non-terminal progress string reported by the backend.
    InProgress(String),
    /// Terminal success: the record carries the final results.
    Processed,
    /// Terminal failure: `error_message` carries the backend's explanation.
    Error,
}

impl JobStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "processed" => JobStatus::Processed,
            "error" => JobStatus::Error,
            other => JobStatus::InProgress(other.to_string()),
        }
    }

    /// Once terminal, the backend record never changes again.
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

/// One fetched job record, as the core sees it. The engine owns the wire
/// format; the host maps its deserialized record into this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub picture_id: String,
    pub status: JobStatus,
    pub original_filename: Option<String>,
    /// Server path to the source raster image, once available.
    pub input_image: Option<String>,
    pub error_message: Option<String>,
    /// Raw PAGE-XML text, once the structure stages complete.
    pub xml_content: Option<String>,
    /// Server path to a downloadable copy of the XML.
    pub xml_filename: Option<String>,
    /// Table-region id -> rendered HTML fragment.
    pub html_tables: BTreeMap<String, String>,
}

/// Attribution link shown next to a known in-progress stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLink {
    pub label: &'static str,
    pub url: &'static str,
}

/// Maps known progress stages to the tool doing the work at that stage.
/// Unknown stage strings get no link.
pub fn status_link(status: &JobStatus) -> Option<StatusLink> {
    let stage = match status {
        JobStatus::InProgress(stage) => stage.as_str(),
        _ => return None,
    };
    if stage.starts_with("Processing OCR") {
        Some(StatusLink {
            label: "pero_ocr",
            url: "https://github.com/DCGM/pero-ocr",
        })
    } else if stage.starts_with("Detecting tables") {
        Some(StatusLink {
            label: "Microsoft table transformer detector",
            url: "https://huggingface.co/microsoft/table-transformer-detection",
        })
    } else if stage.starts_with("Recognizing table structure") {
        Some(StatusLink {
            label: "Microsoft table transformer",
            url: "https://huggingface.co/microsoft/table-transformer-structure-recognition",
        })
    } else {
        None
    }
}
