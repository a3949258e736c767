//! Report assembly and export
//!
//! A [`Report`] is built once from the (filtered) asset and log tables and
//! then handed to any [`ReportExporter`]. Exporters only format; they never
//! recompute statistics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{ErrorCode, RelibotError, Result};
use crate::model::{Asset, LogEntry};
use crate::stats::{failure_mode_pareto, summarize_logs, ParetoBucket, ReliabilitySummary};

pub mod excel;
pub mod json;
pub mod markdown;
pub mod pdf;

pub use excel::ExcelExporter;
pub use json::JsonExporter;
pub use markdown::MarkdownExporter;
pub use pdf::PdfExporter;

pub const REPORT_TITLE: &str = "ReliBotAI Failure Summary Report";

/// Everything an exporter needs, computed up front.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub total_logs: usize,
    pub stats: Vec<ReliabilitySummary>,
    pub pareto: Vec<ParetoBucket>,
    pub logs: Vec<LogEntry>,
    /// Asset id to asset name
    pub asset_names: BTreeMap<String, String>,
}

impl Report {
    pub fn build(assets: &[Asset], logs: Vec<LogEntry>) -> Result<Self> {
        let stats = summarize_logs(&logs)?;
        let pareto = failure_mode_pareto(&logs);
        let asset_names = assets
            .iter()
            .map(|a| (a.id.to_string(), a.name.clone()))
            .collect();

        Ok(Self {
            title: REPORT_TITLE.to_string(),
            generated_at: Utc::now(),
            total_logs: logs.len(),
            stats,
            pareto,
            logs,
            asset_names,
        })
    }

    /// Display name for an asset id, empty when unknown
    pub fn asset_name(&self, id: &str) -> &str {
        self.asset_names.get(id).map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Pdf,
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }

    /// File name used when the caller does not pick one
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Xlsx => "reli_logs_export.xlsx",
            Self::Pdf => "reli_report.pdf",
            Self::Markdown => "reli_report.md",
            Self::Json => "reli_report.json",
        }
    }

    /// Default output path inside `dir`
    pub fn default_path(&self, dir: impl Into<PathBuf>) -> PathBuf {
        dir.into().join(self.default_file_name())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = RelibotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            "md" | "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(RelibotError::export_with_code(
                ErrorCode::EXPORT_UNKNOWN_FORMAT,
                format!("unknown export format '{}' (expected xlsx, pdf, md or json)", other),
                Some(other.to_string()),
            )),
        }
    }
}

#[async_trait]
pub trait ReportExporter: Send + Sync {
    async fn export(&self, report: &Report) -> Result<Vec<u8>>;
    fn format(&self) -> ExportFormat;
}

/// Exporter for `format`; `font_dir` is only consulted for PDF output.
pub fn exporter_for(format: ExportFormat, font_dir: Option<PathBuf>) -> Box<dyn ReportExporter> {
    match format {
        ExportFormat::Xlsx => Box::new(ExcelExporter::new()),
        ExportFormat::Pdf => Box::new(PdfExporter::new(font_dir)),
        ExportFormat::Markdown => Box::new(MarkdownExporter::new()),
        ExportFormat::Json => Box::new(JsonExporter::new()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_report() {
        let report = fixtures::sample_report();
        assert_eq!(report.title, REPORT_TITLE);
        assert_eq!(report.total_logs, 5);
        assert_eq!(report.stats.len(), 2);
        assert_eq!(report.stats[0].mtbf_display(), "24.00");
        assert_eq!(report.stats[0].mttr_display(), "3.00");
        assert_eq!(report.stats[1].mtbf_display(), "N/A");
        assert_eq!(report.pareto[0].failure_mode, "seal leak");
        assert_eq!(report.asset_name("2"), "Fan 2");
        assert_eq!(report.asset_name("9"), "");
    }

    #[test]
    fn test_format_aliases() {
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!("markdown".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);

        let err = "docx".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::EXPORT_UNKNOWN_FORMAT);
    }

    #[test]
    fn test_default_paths() {
        assert_eq!(
            ExportFormat::Xlsx.default_path("out"),
            PathBuf::from("out/reli_logs_export.xlsx")
        );
        assert_eq!(ExportFormat::Pdf.default_file_name(), "reli_report.pdf");
    }

    #[test]
    fn test_exporter_for_matches_format() {
        for format in [
            ExportFormat::Xlsx,
            ExportFormat::Pdf,
            ExportFormat::Markdown,
            ExportFormat::Json,
        ] {
            assert_eq!(exporter_for(format, None).format(), format);
        }
    }
}
