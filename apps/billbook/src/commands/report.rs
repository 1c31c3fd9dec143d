//! # Reports
//!
//! ```text
//! report week   ──► bills().week(range)       ──► Report::weekly
//! report party  ──► bills().for_party(..)     ──► Report::party
//! report year   ──► bills().year(range)       ──► Report::yearly
//!                                                    │
//!                                   table on stdout ◄┴► --export xlsx|pdf
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use billbook_client::BillbookClient;
use billbook_core::report::Report;
use billbook_core::validation::validate_party_selection;
use billbook_core::DateRange;
use billbook_export::{export, ExportFormat};

use super::required_range;
use crate::error::CliResult;
use crate::render;

/// Where, and whether, to write the report file.
#[derive(Debug, Clone, Default)]
pub struct ExportTarget {
    /// Explicit format; inferred from `output` when missing.
    pub format: Option<ExportFormat>,

    /// Explicit file path.
    pub output: Option<PathBuf>,

    /// Directory for the default file name.
    pub dir: PathBuf,
}

impl ExportTarget {
    /// `None` when neither a format nor an output path was given.
    fn resolve(&self, range: DateRange) -> CliResult<Option<(ExportFormat, PathBuf)>> {
        let format = match (self.format, self.output.as_deref()) {
            (Some(format), _) => format,
            (None, Some(path)) => ExportFormat::from_path(path)?,
            (None, None) => return Ok(None),
        };
        let path = format.output_path(self.output.as_deref(), &self.dir, range);
        Ok(Some((format, path)))
    }
}

pub async fn week(
    client: &BillbookClient,
    start: Option<&str>,
    end: Option<&str>,
    target: &ExportTarget,
    out: &mut impl Write,
) -> CliResult<()> {
    let range = required_range(start, end)?;
    let bills = client.bills().week(range).await?;
    if bills.is_empty() {
        writeln!(out, "No bills found for {}.", range)?;
        return Ok(());
    }
    emit(&Report::weekly(&bills, range), target, out)
}

pub async fn party(
    client: &BillbookClient,
    name: &str,
    code: &str,
    start: Option<&str>,
    end: Option<&str>,
    target: &ExportTarget,
    out: &mut impl Write,
) -> CliResult<()> {
    validate_party_selection(name, code)?;
    let range = required_range(start, end)?;
    let bills = client.bills().for_party(code, name, range).await?;
    if bills.is_empty() {
        writeln!(out, "No bills found for {} ({}) in {}.", name, code, range)?;
        return Ok(());
    }
    emit(&Report::party(&bills, range, name), target, out)
}

pub async fn year(
    client: &BillbookClient,
    start: Option<&str>,
    end: Option<&str>,
    target: &ExportTarget,
    out: &mut impl Write,
) -> CliResult<()> {
    let range = required_range(start, end)?;
    let bills = client.bills().year(range).await?;
    if bills.is_empty() {
        writeln!(out, "No bills found for {}.", range)?;
        return Ok(());
    }
    emit(&Report::yearly(&bills, range), target, out)
}

fn emit(report: &Report, target: &ExportTarget, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "{}", report.title())?;
    writeln!(out, "{}", render::report_table(report))?;

    if let Some((format, path)) = target.resolve(report.range())? {
        ensure_parent(&path)?;
        export(report, format, &path)?;
        writeln!(out, "Saved {}", path.display())?;
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week() -> DateRange {
        required_range(Some("2024-01-01"), Some("2024-01-07")).unwrap()
    }

    #[test]
    fn test_no_export_requested() {
        let target = ExportTarget {
            dir: PathBuf::from("/tmp"),
            ..ExportTarget::default()
        };
        assert!(target.resolve(week()).unwrap().is_none());
    }

    #[test]
    fn test_format_without_path_uses_default_name() {
        let target = ExportTarget {
            format: Some(ExportFormat::Pdf),
            output: None,
            dir: PathBuf::from("/srv/reports"),
        };
        let (format, path) = target.resolve(week()).unwrap().unwrap();
        assert_eq!(format, ExportFormat::Pdf);
        assert_eq!(path, PathBuf::from("/srv/reports/bills_2024-01-01_2024-01-07.pdf"));
    }

    #[test]
    fn test_path_without_format_uses_extension() {
        let target = ExportTarget {
            format: None,
            output: Some(PathBuf::from("week.xlsx")),
            dir: PathBuf::from("."),
        };
        let (format, path) = target.resolve(week()).unwrap().unwrap();
        assert_eq!(format, ExportFormat::Xlsx);
        assert_eq!(path, PathBuf::from("week.xlsx"));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let target = ExportTarget {
            format: None,
            output: Some(PathBuf::from("week.csv")),
            dir: PathBuf::from("."),
        };
        assert!(target.resolve(week()).is_err());
    }
}
