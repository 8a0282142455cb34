use crate::{Effect, Msg, PollPhase, TableExport, ViewerState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ViewerState, msg: Msg) -> (ViewerState, Vec<Effect>) {
    let effects = match msg {
        Msg::OpenResult { picture_id } => {
            if state.phase() != PollPhase::Idle {
                return (state, Vec::new());
            }
            state.begin(picture_id.clone());
            vec![Effect::StartPolling { picture_id }]
        }
        Msg::RecordArrived(record) => {
            // Records that lose the race against StopRequested are discarded.
            if state.phase() != PollPhase::Polling {
                return (state, Vec::new());
            }
            state.apply_record(record);
            extraction_effects(&mut state)
        }
        Msg::PollFailed { message } => {
            if state.phase() != PollPhase::Polling {
                return (state, Vec::new());
            }
            state.fail_transport(message);
            Vec::new()
        }
        Msg::ImageLoaded { width, height } => {
            state.set_image_size(width, height);
            extraction_effects(&mut state)
        }
        Msg::ImageFailed => {
            state.set_image_failed();
            Vec::new()
        }
        Msg::RegionsExtracted(regions) => {
            state.set_regions(regions);
            export_effects(&state)
        }
        Msg::ExtractionFailed { message } => {
            state.set_extraction_failed(message);
            Vec::new()
        }
        Msg::StopRequested => {
            if state.phase() == PollPhase::Polling {
                state.stop();
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// The extractor needs both the terminal record and the image height; the
/// two arrive in either order, so both handlers funnel through here.
fn extraction_effects(state: &mut ViewerState) -> Vec<Effect> {
    match state.take_extraction_request() {
        Some((xml, image_height)) => vec![Effect::ExtractRegions { xml, image_height }],
        None => Vec::new(),
    }
}

fn export_effects(state: &ViewerState) -> Vec<Effect> {
    let Some(record) = state.record() else {
        return Vec::new();
    };
    let tables: Vec<TableExport> = record
        .html_tables
        .iter()
        .map(|(table_id, html)| TableExport {
            table_id: table_id.clone(),
            html: html.clone(),
        })
        .collect();
    if tables.is_empty() {
        Vec::new()
    } else {
        vec![Effect::ExportTables { tables }]
    }
}
