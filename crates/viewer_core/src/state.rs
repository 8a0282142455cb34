use crate::record::{JobRecord, JobStatus};
use crate::region::RegionSummary;
use crate::view_model::ResultViewModel;

/// Poll lifecycle of the result view. `Done` and `Failed` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    #[default]
    Idle,
    Polling,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtractionStatus {
    #[default]
    NotStarted,
    /// The extract effect has been emitted; results not yet back.
    Requested,
    Ready(Vec<RegionSummary>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewerState {
    phase: PollPhase,
    picture_id: Option<String>,
    record: Option<JobRecord>,
    image_size: Option<(u32, u32)>,
    image_failed: bool,
    extraction: ExtractionStatus,
    error: Option<String>,
    dirty: bool,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn record(&self) -> Option<&JobRecord> {
        self.record.as_ref()
    }

    pub fn extraction(&self) -> &ExtractionStatus {
        &self.extraction
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> ResultViewModel {
        ResultViewModel::from_state(self)
    }

    pub(crate) fn image_failed(&self) -> bool {
        self.image_failed
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin(&mut self, picture_id: String) {
        self.phase = PollPhase::Polling;
        self.picture_id = Some(picture_id);
        self.mark_dirty();
    }

    /// Stores a fetched record and advances the phase on terminal statuses.
    pub(crate) fn apply_record(&mut self, record: JobRecord) {
        match record.status {
            JobStatus::Processed => self.phase = PollPhase::Done,
            JobStatus::Error => {
                self.phase = PollPhase::Failed;
                self.error = Some(
                    record
                        .error_message
                        .clone()
                        .unwrap_or_else(|| "backend reported an error".to_string()),
                );
            }
            JobStatus::InProgress(_) => {}
        }
        self.record = Some(record);
        self.mark_dirty();
    }

    pub(crate) fn fail_transport(&mut self, message: String) {
        self.phase = PollPhase::Failed;
        self.error = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn set_image_size(&mut self, width: u32, height: u32) {
        self.image_size = Some((width, height));
        self.image_failed = false;
        self.mark_dirty();
    }

    pub(crate) fn set_image_failed(&mut self) {
        self.image_failed = true;
        self.mark_dirty();
    }

    /// If the terminal record and the image dimensions are both in, hands out
    /// the extraction input exactly once.
    pub(crate) fn take_extraction_request(&mut self) -> Option<(String, f64)> {
        if self.phase != PollPhase::Done || self.extraction != ExtractionStatus::NotStarted {
            return None;
        }
        let (_, height) = self.image_size?;
        let xml = self.record.as_ref()?.xml_content.clone()?;
        self.extraction = ExtractionStatus::Requested;
        Some((xml, f64::from(height)))
    }

    pub(crate) fn set_regions(&mut self, regions: Vec<RegionSummary>) {
        self.extraction = ExtractionStatus::Ready(regions);
        self.mark_dirty();
    }

    pub(crate) fn set_extraction_failed(&mut self, message: String) {
        self.extraction = ExtractionStatus::Failed(message);
        self.mark_dirty();
    }

    pub(crate) fn stop(&mut self) {
        self.phase = PollPhase::Idle;
        self.mark_dirty();
    }
}
