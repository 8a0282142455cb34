#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Table,
    TextLine,
}

/// Core-side summary of one extracted region. Polygon geometry stays with
/// the rendering surface; the core only needs the id-keyed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub id: String,
    pub kind: RegionKind,
    /// Line-level transcription; `None` for tables and for lines without one.
    pub transcription: Option<String>,
    /// Serialized source XML fragment; fallback display for tables with no
    /// rendered HTML counterpart.
    pub raw_content: Option<String>,
}

impl RegionSummary {
    pub fn table(id: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: RegionKind::Table,
            transcription: None,
            raw_content: Some(raw_content.into()),
        }
    }

    pub fn text_line(id: impl Into<String>, transcription: Option<String>) -> Self {
        Self {
            id: id.into(),
            kind: RegionKind::TextLine,
            transcription,
            raw_content: None,
        }
    }
}
