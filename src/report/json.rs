use async_trait::async_trait;

use super::{ExportFormat, Report, ReportExporter};
use crate::error::Result;

pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportExporter for JsonExporter {
    async fn export(&self, report: &Report) -> Result<Vec<u8>> {
        let json = serde_json::to_vec_pretty(report)?;
        Ok(json)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;
    use serde_json::Value;

    #[tokio::test]
    async fn test_json_shape() {
        let bytes = JsonExporter::new().export(&sample_report()).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["total_logs"], 5);
        assert_eq!(value["stats"][0]["mtbf_hours"], 24.0);
        assert_eq!(value["stats"][1]["mttr_hours"], "N/A");
        assert_eq!(value["pareto"][0]["failure_mode"], "seal leak");
        assert_eq!(value["asset_names"]["1"], "Pump 1");
    }
}
