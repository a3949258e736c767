use async_trait::async_trait;

use super::{ExportFormat, Report, ReportExporter};
use crate::error::Result;

/// Width of the longest Pareto bar, in characters
const BAR_WIDTH: f64 = 20.0;

pub struct MarkdownExporter;

impl MarkdownExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn render(report: &Report) -> String {
    let mut markdown = String::new();

    markdown.push_str(&format!("# {}\n\n", report.title));
    markdown.push_str(&format!(
        "**Generated:** {}\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    markdown.push_str(&format!("**Total Failure Logs:** {}\n\n", report.total_logs));

    if !report.stats.is_empty() {
        markdown.push_str("## MTBF & MTTR per Asset\n\n");
        markdown.push_str("| Asset ID | Asset | MTBF (hrs) | MTTR (hrs) |\n");
        markdown.push_str("| --- | --- | --- | --- |\n");
        for summary in &report.stats {
            markdown.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                summary.asset_id,
                report.asset_name(summary.asset_id.as_str()),
                summary.mtbf_display(),
                summary.mttr_display()
            ));
        }
        markdown.push('\n');
    }

    if !report.pareto.is_empty() {
        markdown.push_str("## Failure Modes (Pareto)\n\n");
        markdown.push_str("```\n");

        let max_count = report.pareto.iter().map(|b| b.count).max().unwrap_or(1) as f64;
        let label_width = report
            .pareto
            .iter()
            .map(|b| b.failure_mode.chars().count())
            .max()
            .unwrap_or(0)
            .max(12);

        for bucket in &report.pareto {
            let bar_length = ((bucket.count as f64 / max_count) * BAR_WIDTH).round() as usize;
            markdown.push_str(&format!(
                "{:<width$} {:<bar$} {:>4}  {:>6.1}%\n",
                bucket.failure_mode,
                "█".repeat(bar_length.max(1)),
                bucket.count,
                bucket.cumulative_percent,
                width = label_width,
                bar = BAR_WIDTH as usize,
            ));
        }
        markdown.push_str("```\n");
    }

    markdown
}

#[async_trait]
impl ReportExporter for MarkdownExporter {
    async fn export(&self, report: &Report) -> Result<Vec<u8>> {
        Ok(render(report).into_bytes())
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[tokio::test]
    async fn test_markdown_sections() {
        let bytes = MarkdownExporter::new().export(&sample_report()).await.unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("# ReliBotAI Failure Summary Report"));
        assert!(text.contains("**Total Failure Logs:** 5"));
        assert!(text.contains("| 1 | Pump 1 | 24.00 | 3.00 |"));
        assert!(text.contains("| 2 | Fan 2 | N/A | N/A |"));
        assert!(text.contains("## Failure Modes (Pareto)"));
    }

    #[test]
    fn test_pareto_bars_scale_to_most_frequent() {
        let text = render(&sample_report());
        let seal = text.lines().find(|l| l.starts_with("seal leak")).unwrap();
        let bearing = text.lines().find(|l| l.starts_with("bearing")).unwrap();

        assert_eq!(seal.matches('█').count(), 20);
        assert_eq!(bearing.matches('█').count(), 13);
        assert!(seal.trim_end().ends_with("60.0%"));
        assert!(bearing.trim_end().ends_with("100.0%"));
    }

    #[test]
    fn test_empty_report_has_no_tables() {
        let report = Report::build(&[], Vec::new()).unwrap();
        let text = render(&report);
        assert!(text.contains("**Total Failure Logs:** 0"));
        assert!(!text.contains("MTBF & MTTR"));
        assert!(!text.contains("Pareto"));
    }
}
