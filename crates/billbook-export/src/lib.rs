//! # billbook-export: Report File Writers
//!
//! Writes the tables built by [`billbook_core::report`] to spreadsheet or
//! PDF files. Both writers take the same [`Report`], so the file matches
//! what the terminal shows.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌─────────────────────────┐
//! │ Vec<Bill>    │────►│ Report       │──┬─►│ xlsx.rs  bills_*.xlsx   │
//! │ (backend)    │     │ (core)       │  └─►│ pdf.rs   bills_*.pdf    │
//! └──────────────┘     └──────────────┘     └─────────────────────────┘
//! ```

pub mod error;
pub mod pdf;
pub mod xlsx;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use billbook_core::report::Report;
use billbook_core::DateRange;
use tracing::info;

pub use error::{ExportError, ExportResult};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Xlsx, ExportFormat::Pdf];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// File name used when no output path is given, e.g.
    /// `bills_2024-01-01_2024-01-07.pdf`.
    pub fn default_file_name(&self, range: DateRange) -> String {
        format!(
            "bills_{}_{}.{}",
            range.start_str(),
            range.end_str(),
            self.extension()
        )
    }

    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> ExportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ExportError::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }

    /// Resolves the output path: `path` as given, or the default file
    /// name for `range` inside `dir`.
    pub fn output_path(&self, path: Option<&Path>, dir: &Path, range: DateRange) -> PathBuf {
        match path {
            Some(path) => path.to_path_buf(),
            None => dir.join(self.default_file_name(range)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Writes `report` to `path` in `format`.
pub fn export(report: &Report, format: ExportFormat, path: &Path) -> ExportResult<()> {
    match format {
        ExportFormat::Xlsx => xlsx::write_xlsx(report, path)?,
        ExportFormat::Pdf => pdf::write_pdf(report, path)?,
    }
    info!(
        format = %format,
        path = %path.display(),
        rows = report.bill_count(),
        "Report exported"
    );
    Ok(())
}
