use crate::analyzer::{QualityAnalyzer, SearchOptions};
use crate::display::DisplayManager;
use anyhow::Result;
use tracing::warn;

/// Search the range and print the merged records.
pub fn run_search(
    options: &SearchOptions,
    limit: Option<usize>,
    json_output: bool,
    json_pretty: bool,
) -> Result<()> {
    let result = QualityAnalyzer::new().search(options)?;

    if result.files_found == 0 {
        warn!(root = %options.root.display(), "No log files found in range");
        if !json_output {
            eprintln!(
                "No log files found under {} for {} day(s).",
                options.root.display(),
                result.files_scanned
            );
        }
    }

    DisplayManager::new()
        .with_pretty_json(json_pretty)
        .display_records(&result.records, limit, json_output)
}
