use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use viewer_core::{
    update, Effect, JobRecord, JobStatus, Msg, PollPhase, RegionSummary, ViewerState,
};

fn record(status: &str) -> JobRecord {
    JobRecord {
        picture_id: "pic-1".to_string(),
        status: JobStatus::from_wire(status),
        original_filename: Some("scan.png".to_string()),
        input_image: Some("pic-1/pic-1.png".to_string()),
        error_message: None,
        xml_content: None,
        xml_filename: None,
        html_tables: BTreeMap::new(),
    }
}

fn processed_record(xml: &str) -> JobRecord {
    JobRecord {
        status: JobStatus::Processed,
        xml_content: Some(xml.to_string()),
        xml_filename: Some("pic-1/pic-1.xml".to_string()),
        ..record("processed")
    }
}

fn opened() -> ViewerState {
    let (state, effects) = update(
        ViewerState::new(),
        Msg::OpenResult {
            picture_id: "pic-1".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            picture_id: "pic-1".to_string()
        }]
    );
    state
}

#[test]
fn each_record_triggers_exactly_one_render() {
    let mut state = opened();
    assert!(state.consume_dirty());

    // Three records on three ticks: "Processing OCR", "Detecting tables",
    // "processed". Each must mark the view dirty exactly once.
    for status in ["Processing OCR", "Detecting tables", "processed"] {
        let (mut next, _effects) = update(state, Msg::RecordArrived(record(status)));
        assert!(next.consume_dirty());
        assert!(!next.consume_dirty());
        state = next;
    }

    assert_eq!(state.phase(), PollPhase::Done);
}

#[test]
fn backend_error_record_fails_the_view() {
    let state = opened();
    let failed = JobRecord {
        status: JobStatus::Error,
        error_message: Some("OCR engine crashed".to_string()),
        ..record("error")
    };

    let (mut state, effects) = update(state, Msg::RecordArrived(failed));

    assert!(effects.is_empty());
    assert_eq!(state.phase(), PollPhase::Failed);
    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(view.error_message.as_deref(), Some("OCR engine crashed"));
    assert!(!view.show_map);
}

#[test]
fn transport_failure_fails_the_view() {
    let state = opened();

    let (state, effects) = update(
        state,
        Msg::PollFailed {
            message: "http status 503".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), PollPhase::Failed);
    assert_eq!(
        state.view().error_message.as_deref(),
        Some("http status 503")
    );
}

#[test]
fn extraction_waits_for_image_dimensions() {
    let state = opened();

    // Terminal record arrives first; no image yet, so no extraction.
    let (state, effects) = update(state, Msg::RecordArrived(processed_record("<PcGts/>")));
    assert!(effects.is_empty());

    // Image load completes the pair.
    let (_state, effects) = update(
        state,
        Msg::ImageLoaded {
            width: 800,
            height: 600,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ExtractRegions {
            xml: "<PcGts/>".to_string(),
            image_height: 600.0,
        }]
    );
}

#[test]
fn extraction_waits_for_terminal_record() {
    let state = opened();

    // Image dimensions first; extraction must wait for "processed".
    let (state, effects) = update(
        state,
        Msg::ImageLoaded {
            width: 800,
            height: 600,
        },
    );
    assert!(effects.is_empty());

    let (_state, effects) = update(state, Msg::RecordArrived(processed_record("<PcGts/>")));
    assert_eq!(
        effects,
        vec![Effect::ExtractRegions {
            xml: "<PcGts/>".to_string(),
            image_height: 600.0,
        }]
    );
}

#[test]
fn extraction_is_requested_only_once() {
    let state = opened();
    let (state, _effects) = update(
        state,
        Msg::ImageLoaded {
            width: 800,
            height: 600,
        },
    );
    let (state, effects) = update(state, Msg::RecordArrived(processed_record("<PcGts/>")));
    assert_eq!(effects.len(), 1);

    // A duplicate image-load event must not re-run extraction.
    let (_state, effects) = update(
        state,
        Msg::ImageLoaded {
            width: 800,
            height: 600,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn records_after_stop_are_discarded() {
    let state = opened();

    let (state, effects) = update(state, Msg::StopRequested);
    assert_eq!(effects, vec![Effect::StopPolling]);

    let (mut state, effects) = update(state, Msg::RecordArrived(record("Detecting tables")));
    assert!(effects.is_empty());
    state.consume_dirty();
    assert!(state.record().is_none());
}

#[test]
fn open_result_is_ignored_while_polling() {
    let state = opened();
    let (_state, effects) = update(
        state,
        Msg::OpenResult {
            picture_id: "pic-2".to_string(),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn extraction_results_produce_export_effect() {
    let state = opened();
    let mut html_tables = BTreeMap::new();
    html_tables.insert("t1".to_string(), "<table><tr><td>x</td></tr></table>".to_string());
    let terminal = JobRecord {
        html_tables,
        ..processed_record("<PcGts/>")
    };

    let (state, _effects) = update(
        state,
        Msg::ImageLoaded {
            width: 800,
            height: 600,
        },
    );
    let (state, _effects) = update(state, Msg::RecordArrived(terminal));

    let regions = vec![RegionSummary::table("t1", "<TableRegion id=\"t1\"/>")];
    let (_state, effects) = update(state, Msg::RegionsExtracted(regions));

    match effects.as_slice() {
        [Effect::ExportTables { tables }] => {
            assert_eq!(tables.len(), 1);
            assert_eq!(tables[0].table_id, "t1");
            assert!(tables[0].html.starts_with("<table>"));
        }
        other => panic!("expected one export effect, got {other:?}"),
    }
}

#[test]
fn malformed_document_degrades_without_map() {
    let state = opened();
    let (state, _effects) = update(
        state,
        Msg::ImageLoaded {
            width: 800,
            height: 600,
        },
    );
    let (state, _effects) = update(state, Msg::RecordArrived(processed_record("not xml")));
    let (state, effects) = update(
        state,
        Msg::ExtractionFailed {
            message: "document is not well-formed XML".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    // Degrade gracefully: keep the record view, omit the map.
    assert!(!view.show_map);
    assert_eq!(view.phase, PollPhase::Done);
    assert!(view.panels.is_empty());
}

#[test]
fn image_failure_keeps_panels_but_disables_map() {
    let state = opened();
    let (state, _effects) = update(state, Msg::RecordArrived(processed_record("<PcGts/>")));
    let (state, effects) = update(state, Msg::ImageFailed);
    assert!(effects.is_empty());

    let view = state.view();
    assert!(!view.show_map);
    assert_eq!(view.phase, PollPhase::Done);
}
