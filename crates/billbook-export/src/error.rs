//! # Export Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors while writing report files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The workbook could not be built or saved.
    #[error("Spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The PDF could not be built or saved.
    #[error("PDF export failed: {0}")]
    Pdf(String),

    /// Writing the file failed.
    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested format is not supported.
    ///
    /// ## When This Occurs
    /// - `--export csv`
    /// - An output path ending in an unknown extension
    #[error("Unsupported export format '{0}' (expected xlsx or pdf)")]
    UnsupportedFormat(String),
}

impl ExportError {
    pub(crate) fn pdf(err: impl std::fmt::Display) -> Self {
        ExportError::Pdf(err.to_string())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
