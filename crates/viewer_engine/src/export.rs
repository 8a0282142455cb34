use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// One rendered table on its way to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDocument {
    pub table_id: String,
    pub html: String,
}

/// Ensure the output directory exists and is writable; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ExportError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
    }
    // Writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Downloadable filename for one table: `{table_id}.html`, with the id
/// sanitized for the filesystem.
pub fn table_filename(table_id: &str) -> String {
    format!("{}.html", sanitize_id(table_id))
}

/// Writes each rendered table as a standalone `{table_id}.html` document.
/// Each file is written atomically (temp file, then rename) so a re-export
/// never leaves a half-written artifact behind.
pub fn export_tables(
    output_dir: &Path,
    tables: &[TableDocument],
) -> Result<Vec<PathBuf>, ExportError> {
    ensure_output_dir(output_dir)?;

    let mut written = Vec::with_capacity(tables.len());
    for table in tables {
        let target = output_dir.join(table_filename(&table.table_id));
        let mut tmp = NamedTempFile::new_in(output_dir)?;
        tmp.write_all(wrap_fragment(&table.table_id, &table.html).as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| ExportError::Io(e.error))?;
        written.push(target);
    }
    Ok(written)
}

/// Wraps the backend's table fragment in a minimal standalone document.
fn wrap_fragment(table_id: &str, html: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{table_id}</title></head>\n<body>\n{html}\n</body>\n</html>\n"
    )
}

fn sanitize_id(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let mut cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = "table".to_string();
    }
    if cleaned.chars().count() > 80 {
        cleaned = cleaned.chars().take(80).collect();
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
