use async_trait::async_trait;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::{ExportFormat, Report, ReportExporter};
use crate::error::{ErrorCode, RelibotError, Result};
use crate::model::EventTime;
use crate::stats::{reliability::round2, NOT_APPLICABLE};

const LOG_SHEET: &str = "Failure Logs";
const STATS_SHEET: &str = "MTBF_MTTR";

const LOG_COLUMNS: &[&str] = &[
    "id",
    "asset_id",
    "asset_name",
    "event_type",
    "event_time",
    "failure_mode",
    "description",
];

const STATS_COLUMNS: &[&str] = &["Asset ID", "MTBF (hrs)", "MTTR (hrs)"];

/// Workbook with the raw log rows and, when available, per-asset statistics.
pub struct ExcelExporter;

impl ExcelExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExcelExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn xlsx_error(err: XlsxError) -> RelibotError {
    RelibotError::export_with_code(
        ErrorCode::EXPORT_XLSX_FAILED,
        "could not build workbook",
        Some("xlsx".to_string()),
    )
    .with_source(err)
}

fn write_header(sheet: &mut Worksheet, columns: &[&str]) -> std::result::Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }
    Ok(())
}

fn event_time_text(time: &EventTime) -> String {
    match time {
        EventTime::Parsed(ts) => ts.to_rfc3339(),
        EventTime::Raw(raw) => raw.clone(),
    }
}

fn write_logs(sheet: &mut Worksheet, report: &Report) -> std::result::Result<(), XlsxError> {
    sheet.set_name(LOG_SHEET)?;
    write_header(sheet, LOG_COLUMNS)?;

    for (i, log) in report.logs.iter().enumerate() {
        let row = (i + 1) as u32;
        let id = log.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        sheet.write_string(row, 0, id)?;
        sheet.write_string(row, 1, log.asset_id.as_str())?;
        sheet.write_string(row, 2, report.asset_name(log.asset_id.as_str()))?;
        sheet.write_string(row, 3, log.event_type.as_str())?;
        sheet.write_string(row, 4, event_time_text(&log.event_time))?;
        sheet.write_string(row, 5, log.failure_mode.as_str())?;
        sheet.write_string(row, 6, log.description.as_str())?;
    }
    Ok(())
}

fn write_hours(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    hours: Option<f64>,
) -> std::result::Result<(), XlsxError> {
    match hours {
        Some(h) => sheet.write_number(row, col, round2(h))?,
        None => sheet.write_string(row, col, NOT_APPLICABLE)?,
    };
    Ok(())
}

fn write_stats(sheet: &mut Worksheet, report: &Report) -> std::result::Result<(), XlsxError> {
    sheet.set_name(STATS_SHEET)?;
    write_header(sheet, STATS_COLUMNS)?;

    for (i, summary) in report.stats.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, summary.asset_id.as_str())?;
        write_hours(sheet, row, 1, summary.mtbf_hours)?;
        write_hours(sheet, row, 2, summary.mttr_hours)?;
    }
    Ok(())
}

fn build_workbook(report: &Report) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    write_logs(workbook.add_worksheet(), report)?;
    if !report.stats.is_empty() {
        write_stats(workbook.add_worksheet(), report)?;
    }
    workbook.save_to_buffer()
}

#[async_trait]
impl ReportExporter for ExcelExporter {
    async fn export(&self, report: &Report) -> Result<Vec<u8>> {
        build_workbook(report).map_err(xlsx_error)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[tokio::test]
    async fn test_workbook_is_a_zip_container() {
        let bytes = ExcelExporter::new().export(&sample_report()).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(bytes.len() > 1000);
    }

    #[tokio::test]
    async fn test_empty_report_still_exports() {
        let report = crate::report::Report::build(&[], Vec::new()).unwrap();
        let bytes = ExcelExporter::new().export(&report).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
