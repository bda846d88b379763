use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use uuid::Uuid;

use crate::transfer::TransferReport;

/// Create a JSON summary of a transfer run.
///
/// The summary carries a unique run id, timestamps, the aggregate counts,
/// the abandoned object names, and the full progress transcript, so a
/// batch transfer remains auditable after the terminal scrollback is gone.
pub fn create_run_report(
    source: &Path,
    container: &str,
    report: &TransferReport,
) -> Result<String> {
    let summary = json!({
        "run_id": Uuid::new_v4().to_string(),
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "tool_version": env!("CARGO_PKG_VERSION"),
        "source": source.display().to_string(),
        "container": container,
        "files_total": report.total,
        "files_uploaded": report.succeeded,
        "abandoned_objects": report.abandoned,
        "transcript": report.lines,
    });

    serde_json::to_string_pretty(&summary).context("failed to serialize run report to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_run_report_contains_counts_and_transcript() {
        let report = TransferReport {
            succeeded: 2,
            total: 3,
            abandoned: vec!["MyData/broken.pdf".to_string()],
            lines: vec![
                "Container '1935' exists.".to_string(),
                "Uploaded MyData/a.pdf (1.0 MiB)".to_string(),
            ],
        };

        let rendered =
            create_run_report(&PathBuf::from("/data/MyData"), "1935", &report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed["files_total"], 3);
        assert_eq!(parsed["files_uploaded"], 2);
        assert_eq!(parsed["container"], "1935");
        assert_eq!(parsed["abandoned_objects"][0], "MyData/broken.pdf");
        assert_eq!(parsed["transcript"][0], "Container '1935' exists.");
        assert!(parsed["run_id"].as_str().unwrap().len() >= 36);
    }
}
