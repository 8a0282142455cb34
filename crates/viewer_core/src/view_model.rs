use crate::record::{status_link, StatusLink};
use crate::region::{RegionKind, RegionSummary};
use crate::state::{ExtractionStatus, PollPhase, ViewerState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// Rendered HTML fragment from the backend's `html_tables` join.
    Html(String),
    /// No rendered counterpart: fall back to the serialized XML fragment.
    RawXml(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEntry {
    Table { region_id: String, body: TableBody },
    TextLine {
        region_id: String,
        transcription: Option<String>,
    },
}

impl PanelEntry {
    pub fn region_id(&self) -> &str {
        match self {
            PanelEntry::Table { region_id, .. } => region_id,
            PanelEntry::TextLine { region_id, .. } => region_id,
        }
    }
}

/// Everything the host needs to render the result view.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultViewModel {
    pub phase: PollPhase,
    pub status_text: String,
    pub status_link: Option<StatusLink>,
    pub error_message: Option<String>,
    /// False until extraction succeeded and the image is usable.
    pub show_map: bool,
    pub image_path: Option<String>,
    pub xml_download: Option<String>,
    pub panels: Vec<PanelEntry>,
}

impl ResultViewModel {
    pub(crate) fn from_state(state: &ViewerState) -> Self {
        let record = state.record();
        let status_text = match record {
            Some(record) => record.status.label().to_string(),
            None => "Waiting for results".to_string(),
        };
        let status_link = record.and_then(|r| status_link(&r.status));

        let panels = match state.extraction() {
            ExtractionStatus::Ready(regions) => build_panels(state, regions),
            _ => Vec::new(),
        };

        let extraction_ready = matches!(state.extraction(), ExtractionStatus::Ready(_));
        let show_map = state.phase() == PollPhase::Done && extraction_ready && !state.image_failed();

        Self {
            phase: state.phase(),
            status_text,
            status_link,
            error_message: state.error().map(str::to_string),
            show_map,
            image_path: record.and_then(|r| r.input_image.clone()),
            xml_download: record.and_then(|r| r.xml_filename.clone()),
            panels,
        }
    }
}

/// The table-region id is the join key into `html_tables`; a missing entry
/// falls back to the raw XML fragment.
fn build_panels(state: &ViewerState, regions: &[RegionSummary]) -> Vec<PanelEntry> {
    let html_tables = state.record().map(|r| &r.html_tables);
    regions
        .iter()
        .map(|region| match region.kind {
            RegionKind::Table => {
                let body = match html_tables.and_then(|tables| tables.get(&region.id)) {
                    Some(html) => TableBody::Html(html.clone()),
                    None => TableBody::RawXml(region.raw_content.clone().unwrap_or_default()),
                };
                PanelEntry::Table {
                    region_id: region.id.clone(),
                    body,
                }
            }
            RegionKind::TextLine => PanelEntry::TextLine {
                region_id: region.id.clone(),
                transcription: region.transcription.clone(),
            },
        })
        .collect()
}
