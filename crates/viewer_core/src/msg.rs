#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Open the result view for a picture and begin polling.
    OpenResult { picture_id: String },
    /// A job record arrived from the poller.
    RecordArrived(crate::JobRecord),
    /// The poll loop ended with a transport failure (network or HTTP error).
    PollFailed { message: String },
    /// The source image finished loading; pixel dimensions are now known.
    ImageLoaded { width: u32, height: u32 },
    /// The source image failed to load; show a placeholder, keep the panels.
    ImageFailed,
    /// Region extraction finished.
    RegionsExtracted(Vec<crate::RegionSummary>),
    /// Region extraction failed (malformed document).
    ExtractionFailed { message: String },
    /// The hosting view is being torn down.
    StopRequested,
    /// Fallback for placeholder wiring.
    NoOp,
}
