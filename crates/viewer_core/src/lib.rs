//! Viewer core: pure result-view state machine, selection index, and
//! view-model helpers. No I/O happens in this crate; the engine feeds it
//! messages and the host executes the effects it returns.
mod effect;
mod msg;
mod record;
mod region;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, TableExport};
pub use msg::Msg;
pub use record::{status_link, JobRecord, JobStatus, StatusLink};
pub use region::{RegionKind, RegionSummary};
pub use selection::{
    PanelSurface, PolygonHandle, RenderSurface, SelectionIndex, HIGHLIGHT_REVERT,
};
pub use state::{ExtractionStatus, PollPhase, ViewerState};
pub use update::update;
pub use view_model::{PanelEntry, ResultViewModel, TableBody};
