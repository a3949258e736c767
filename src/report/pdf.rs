//! One-page PDF summary rendered with `genpdf`
//!
//! Layout is computed by [`pdf_lines`] so it can be checked without fonts;
//! rendering needs a LiberationSans family on disk.

use async_trait::async_trait;
use genpdf::elements::{Break, Paragraph};
use genpdf::fonts::{self, FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Document, Element, SimplePageDecorator};
use std::path::PathBuf;
use tracing::debug;

use super::{ExportFormat, Report, ReportExporter};
use crate::error::{ErrorCode, RelibotError, Result};

const FONT_FAMILY: &str = "LiberationSans";

/// Font directories to search on different platforms
const FONT_DIRS: &[&str] = &[
    "./fonts",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/truetype/dejavu",
    "/System/Library/Fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
];

/// A logical line of the summary document.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfLine {
    Title(String),
    Heading(String),
    Text(String),
    Gap,
}

/// Lines of the summary, in order.
pub fn pdf_lines(report: &Report) -> Vec<PdfLine> {
    let mut lines = vec![
        PdfLine::Title(report.title.clone()),
        PdfLine::Gap,
        PdfLine::Text(format!("Total Failure Logs: {}", report.total_logs)),
    ];

    if !report.stats.is_empty() {
        lines.push(PdfLine::Gap);
        lines.push(PdfLine::Heading("MTBF & MTTR per Asset".to_string()));
        lines.extend(report.stats.iter().map(|s| {
            PdfLine::Text(format!(
                "Asset {} - MTBF: {}, MTTR: {}",
                s.asset_id,
                s.mtbf_display(),
                s.mttr_display()
            ))
        }));
    }

    lines
}

pub struct PdfExporter {
    font_dir: Option<PathBuf>,
}

impl PdfExporter {
    /// `font_dir` is searched before the platform font directories
    pub fn new(font_dir: Option<PathBuf>) -> Self {
        Self { font_dir }
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        self.font_dir
            .iter()
            .cloned()
            .chain(FONT_DIRS.iter().map(PathBuf::from))
            .collect()
    }

    fn load_fonts(&self) -> Result<FontFamily<FontData>> {
        let dirs = self.search_dirs();
        dirs.iter()
            .filter(|dir| dir.exists())
            .find_map(|dir| {
                let family = fonts::from_files(dir, FONT_FAMILY, None).ok();
                if family.is_some() {
                    debug!("Using {} fonts from {}", FONT_FAMILY, dir.display());
                }
                family
            })
            .ok_or_else(|| {
                RelibotError::export_with_code(
                    ErrorCode::EXPORT_FONTS_MISSING,
                    format!(
                        "no {} fonts found, searched {:?}; install Liberation fonts or set RELIBOT_FONT_DIR",
                        FONT_FAMILY, dirs
                    ),
                    Some("pdf".to_string()),
                )
            })
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let mut doc = Document::new(self.load_fonts()?);
        doc.set_title(report.title.clone());
        doc.set_minimal_conformance();
        doc.set_line_spacing(1.25);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);

        for line in pdf_lines(report) {
            match line {
                PdfLine::Title(text) => {
                    doc.push(Paragraph::new(text).styled(Style::new().bold().with_font_size(18)))
                }
                PdfLine::Heading(text) => {
                    doc.push(Paragraph::new(text).styled(Style::new().bold().with_font_size(13)))
                }
                PdfLine::Text(text) => {
                    doc.push(Paragraph::new(text).styled(Style::new().with_font_size(11)))
                }
                PdfLine::Gap => doc.push(Break::new(0.5)),
            }
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer).map_err(|e| {
            RelibotError::export_with_code(
                ErrorCode::EXPORT_PDF_FAILED,
                "could not render PDF",
                Some("pdf".to_string()),
            )
            .with_context(e)
        })?;
        Ok(buffer)
    }
}

#[async_trait]
impl ReportExporter for PdfExporter {
    async fn export(&self, report: &Report) -> Result<Vec<u8>> {
        self.render(report)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;
    use tempfile::TempDir;

    #[test]
    fn test_summary_lines() {
        let lines = pdf_lines(&sample_report());
        assert_eq!(
            lines[0],
            PdfLine::Title("ReliBotAI Failure Summary Report".into())
        );
        assert!(lines.contains(&PdfLine::Text("Total Failure Logs: 5".into())));
        assert!(lines.contains(&PdfLine::Heading("MTBF & MTTR per Asset".into())));
        assert!(lines.contains(&PdfLine::Text(
            "Asset 1 - MTBF: 24.00, MTTR: 3.00".into()
        )));
        assert!(lines.contains(&PdfLine::Text("Asset 2 - MTBF: N/A, MTTR: N/A".into())));
    }

    #[test]
    fn test_no_stats_section_without_stats() {
        let report = Report::build(&[], Vec::new()).unwrap();
        let lines = pdf_lines(&report);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], PdfLine::Text("Total Failure Logs: 0".into()));
    }

    #[test]
    fn test_custom_font_dir_searched_first() {
        let exporter = PdfExporter::new(Some(PathBuf::from("/opt/fonts")));
        assert_eq!(exporter.search_dirs()[0], PathBuf::from("/opt/fonts"));
    }

    #[tokio::test]
    async fn test_render_or_report_missing_fonts() {
        // Result depends on the host having Liberation fonts installed.
        let exporter = PdfExporter::new(None);
        match exporter.export(&sample_report()).await {
            Ok(bytes) => assert!(bytes.starts_with(b"%PDF")),
            Err(e) => assert_eq!(e.code(), ErrorCode::EXPORT_FONTS_MISSING),
        }
    }

    #[test]
    fn test_empty_font_dir_is_skipped() {
        let dir = TempDir::new().unwrap();
        let exporter = PdfExporter::new(Some(dir.path().to_path_buf()));
        // An empty directory never yields a family; the search moves on.
        if let Err(e) = exporter.load_fonts() {
            assert_eq!(e.code(), ErrorCode::EXPORT_FONTS_MISSING);
        }
    }
}
