use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use std::time::Instant;

use anyhow::{anyhow, Result};
use viewer_core::{
    update, Effect, ExtractionStatus, Msg, PanelEntry, PollPhase, RegionSummary, SelectionIndex,
    TableBody, TableExport, ViewerState, HIGHLIGHT_REVERT,
};
use viewer_engine::{
    export_tables, extract_regions, EngineConfig, EngineEvent, EngineHandle, PollOutcome,
    TableDocument,
};
use viewer_logging::{viewer_info, viewer_warn};

use crate::surface::ConsoleSurface;

/// Drives the whole result view: engine events become core messages, core
/// effects become engine commands or synchronous extraction/export work.
pub fn run(base_url: &str, picture_id: &str, output_dir: &Path) -> Result<()> {
    let engine = EngineHandle::new(EngineConfig::new(base_url))
        .map_err(|err| anyhow!("cannot set up backend client: {err}"))?;

    let mut host = Host {
        engine,
        state: ViewerState::new(),
        surface: ConsoleSurface::new(),
        index: SelectionIndex::new(),
        output_dir: output_dir.to_path_buf(),
        image_requested: false,
        image_failed: false,
        focused: None,
    };

    host.apply(Msg::OpenResult {
        picture_id: picture_id.to_string(),
    });

    loop {
        while let Some(event) = host.engine.try_recv() {
            host.on_event(event);
        }
        host.revert_stale_focus();
        host.render();
        if let Some(result) = host.finished() {
            return result;
        }
        thread::sleep(Duration::from_millis(20));
    }
}

struct Host {
    engine: EngineHandle,
    state: ViewerState,
    surface: ConsoleSurface,
    index: SelectionIndex,
    output_dir: PathBuf,
    image_requested: bool,
    image_failed: bool,
    focused: Option<(String, Instant)>,
}

impl Host {
    fn apply(&mut self, msg: Msg) {
        let mut queue = vec![msg];
        while let Some(msg) = queue.pop() {
            let (next, effects) = update(std::mem::take(&mut self.state), msg);
            self.state = next;
            for effect in effects {
                if let Some(follow_up) = self.run_effect(effect) {
                    queue.push(follow_up);
                }
            }
        }
    }

    fn on_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Record(record) => {
                // Kick off the image load as soon as a record names the
                // source raster; extraction waits on its dimensions.
                if !self.image_requested {
                    if let Some(path) = record.input_image.clone() {
                        self.engine.fetch_image(path);
                        self.image_requested = true;
                    }
                }
                self.apply(Msg::RecordArrived(map_record(record)));
            }
            EngineEvent::PollEnded(outcome) => self.on_poll_ended(outcome),
            EngineEvent::ImageLoaded { width, height } => {
                self.apply(Msg::ImageLoaded { width, height });
            }
            EngineEvent::ImageFailed { message } => {
                viewer_warn!("image unavailable, showing placeholder: {message}");
                self.image_failed = true;
                self.apply(Msg::ImageFailed);
            }
        }
    }

    fn on_poll_ended(&mut self, outcome: PollOutcome) {
        match outcome {
            PollOutcome::Processed(record) => {
                // The record itself already arrived through the sink. A job
                // that never named an image cannot satisfy the extraction
                // gate, so settle the image side as failed.
                if !self.image_requested && record.input_image.is_none() {
                    self.image_failed = true;
                    self.apply(Msg::ImageFailed);
                }
            }
            PollOutcome::BackendError(_) | PollOutcome::Cancelled => {}
            PollOutcome::Transport(err) => self.apply(Msg::PollFailed {
                message: err.to_string(),
            }),
            PollOutcome::AttemptsExhausted { attempts } => self.apply(Msg::PollFailed {
                message: format!("job still not finished after {attempts} fetches"),
            }),
        }
    }

    fn run_effect(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::StartPolling { picture_id } => {
                viewer_info!("polling results for {picture_id}");
                self.engine.start_polling(picture_id);
                None
            }
            Effect::StopPolling => {
                self.engine.stop();
                None
            }
            Effect::ExtractRegions { xml, image_height } => {
                Some(self.run_extraction(&xml, image_height))
            }
            Effect::ExportTables { tables } => {
                self.run_export(tables);
                None
            }
        }
    }

    fn run_extraction(&mut self, xml: &str, image_height: f64) -> Msg {
        let regions = match extract_regions(xml, image_height) {
            Ok(regions) => regions,
            Err(err) => {
                viewer_warn!("extraction failed, degrading to raw record view: {err}");
                return Msg::ExtractionFailed {
                    message: err.to_string(),
                };
            }
        };

        let mut summaries =
            Vec::with_capacity(regions.tables.len() + regions.text_lines.len());
        for table in &regions.tables {
            let points: Vec<(f64, f64)> =
                table.polygon.iter().map(|p| (p.row, p.col)).collect();
            let handle = self.surface.add_polygon(&table.id, &points);
            self.index.register_polygon(table.id.as_str(), handle);
            self.index.register_panel(table.id.as_str());
            summaries.push(RegionSummary::table(
                table.id.as_str(),
                table.raw_content.as_str(),
            ));
        }
        for line in &regions.text_lines {
            let points: Vec<(f64, f64)> =
                line.polygon.iter().map(|p| (p.row, p.col)).collect();
            let handle = self.surface.add_polygon(&line.id, &points);
            self.index.register_polygon(line.id.as_str(), handle);
            self.index.register_panel(line.id.as_str());
            summaries.push(RegionSummary::text_line(
                line.id.as_str(),
                line.transcription.clone(),
            ));
        }

        // Bring the first table into view once everything is registered.
        if let Some(first) = regions.tables.first() {
            if self.index.focus(&first.id, &mut self.surface) {
                self.focused = Some((first.id.clone(), Instant::now()));
            }
        }

        Msg::RegionsExtracted(summaries)
    }

    fn revert_stale_focus(&mut self) {
        let due = self
            .focused
            .as_ref()
            .is_some_and(|(_, since)| since.elapsed() >= HIGHLIGHT_REVERT);
        if due {
            if let Some((region_id, _)) = self.focused.take() {
                self.index.clear_focus(&region_id, &mut self.surface);
            }
        }
    }

    fn run_export(&mut self, tables: Vec<TableExport>) {
        let docs: Vec<TableDocument> = tables
            .into_iter()
            .map(|t| TableDocument {
                table_id: t.table_id,
                html: t.html,
            })
            .collect();
        match export_tables(&self.output_dir, &docs) {
            Ok(written) => viewer_info!(
                "exported {} table file(s) to {}",
                written.len(),
                self.output_dir.display()
            ),
            Err(err) => viewer_warn!("table export failed: {err}"),
        }
    }

    fn render(&mut self) {
        if !self.state.consume_dirty() {
            return;
        }
        let view = self.state.view();
        match view.phase {
            PollPhase::Failed => {
                println!(
                    "error: {}",
                    view.error_message.as_deref().unwrap_or("unknown failure")
                );
            }
            PollPhase::Done => {
                println!("status: {}", view.status_text);
                for panel in &view.panels {
                    match panel {
                        PanelEntry::Table { region_id, body } => match body {
                            TableBody::Html(_) => {
                                println!("  table {region_id}: rendered HTML table");
                            }
                            TableBody::RawXml(_) => {
                                println!("  table {region_id}: no rendering, raw XML fallback");
                            }
                        },
                        PanelEntry::TextLine {
                            region_id,
                            transcription,
                        } => {
                            println!(
                                "  line {region_id}: {}",
                                transcription.as_deref().unwrap_or("(no transcription)")
                            );
                        }
                    }
                }
                if let Some(xml) = &view.xml_download {
                    println!("xml download: {xml}");
                }
            }
            PollPhase::Idle | PollPhase::Polling => match view.status_link {
                Some(link) => println!("{} (using {}: {})", view.status_text, link.label, link.url),
                None => println!("{}", view.status_text),
            },
        }
    }

    /// The loop ends once the view reached a terminal, fully-settled shape.
    fn finished(&mut self) -> Option<Result<()>> {
        match self.state.phase() {
            PollPhase::Failed => {
                let message = self
                    .state
                    .view()
                    .error_message
                    .unwrap_or_else(|| "unknown failure".to_string());
                Some(Err(anyhow!("job failed: {message}")))
            }
            PollPhase::Done => {
                let extraction_settled = matches!(
                    self.state.extraction(),
                    ExtractionStatus::Ready(_) | ExtractionStatus::Failed(_)
                );
                let no_xml = self
                    .state
                    .record()
                    .is_some_and(|r| r.xml_content.is_none());
                if extraction_settled || self.image_failed || no_xml {
                    Some(Ok(()))
                } else {
                    None
                }
            }
            PollPhase::Idle | PollPhase::Polling => None,
        }
    }
}

fn map_record(record: viewer_engine::JobRecord) -> viewer_core::JobRecord {
    viewer_core::JobRecord {
        picture_id: record.picture_id,
        status: map_status(record.status),
        original_filename: record.original_filename,
        input_image: record.input_image,
        error_message: record.error_message,
        xml_content: record.xml_content,
        xml_filename: record.xml_filename,
        html_tables: record.html_tables,
    }
}

fn map_status(status: viewer_engine::JobStatus) -> viewer_core::JobStatus {
    match status {
        viewer_engine::JobStatus::Processed => viewer_core::JobStatus::Processed,
        viewer_engine::JobStatus::Error => viewer_core::JobStatus::Error,
        viewer_engine::JobStatus::InProgress(stage) => viewer_core::JobStatus::InProgress(stage),
    }
}
