use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::snapshot::{RowSnapshot, SheetFile};

/// Error type for sheet and clipboard files
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize sheet: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

/// Load a character sheet from a JSON file.
pub fn load_sheet(path: &Path) -> Result<SheetFile, SheetError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|e| SheetError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load clipboard rows. The file holds either a JSON array of rows or a
/// single row object.
pub fn load_rows(path: &Path) -> Result<Vec<RowSnapshot>, SheetError> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Rows {
        Many(Vec<RowSnapshot>),
        One(Box<RowSnapshot>),
    }

    let text = read(path)?;
    let rows: Rows = serde_json::from_str(&text).map_err(|e| SheetError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(match rows {
        Rows::Many(rows) => rows,
        Rows::One(row) => vec![*row],
    })
}

/// Write a sheet as pretty JSON, replacing the file atomically.
pub fn save_sheet(path: &Path, sheet: &SheetFile) -> Result<(), SheetError> {
    let mut json = serde_json::to_string_pretty(sheet)?;
    json.push('\n');
    atomic_write(path, json.as_bytes()).map_err(|e| SheetError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "saved sheet");
    Ok(())
}

fn read(path: &Path) -> Result<String, SheetError> {
    fs::read_to_string(path).map_err(|e| SheetError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write to a temp file in the same directory, then rename over `path`.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
