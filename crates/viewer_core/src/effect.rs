#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartPolling { picture_id: String },
    /// Cancel the poll loop; in-flight results must be discarded.
    StopPolling,
    /// Run the extractor over the fetched XML. Only emitted once both the
    /// terminal record and the image dimensions are known.
    ExtractRegions { xml: String, image_height: f64 },
    /// Write each rendered table out as a downloadable `{table_id}.html`.
    ExportTables { tables: Vec<TableExport> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExport {
    pub table_id: String,
    pub html: String,
}
