//! Viewer engine: job-status polling, PAGE-XML region extraction,
//! coordinate mapping, and table export.
mod coords;
mod engine;
mod export;
mod extract;
mod fetch;
mod poll;
mod probe;
mod record;
mod types;

pub use coords::{map_coordinates, parse_points, CoordError, Point};
pub use engine::{EngineConfig, EngineHandle};
pub use export::{ensure_output_dir, export_tables, table_filename, ExportError, TableDocument};
pub use extract::{
    count_tables, extract_regions, ExtractError, RegionSet, TableRegion, TextLineRegion,
};
pub use fetch::{ClientSettings, ReqwestResultsClient, ResultsClient};
pub use poll::{PollSettings, PollSink, Poller};
pub use probe::{probe_image_dimensions, ProbeError};
pub use record::{JobRecord, JobStatus};
pub use types::{EngineEvent, FailureKind, FetchError, PollOutcome};
