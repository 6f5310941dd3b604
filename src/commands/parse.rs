use crate::display::DisplayManager;
use crate::parser::LogParser;
use anyhow::Result;
use std::path::Path;

/// Parse one file and print its records. Unlike a range search, a file that
/// cannot be read is reported as an error.
pub fn run_parse(path: &Path, file_date: &str, json_output: bool, json_pretty: bool) -> Result<()> {
    let records = LogParser::new().try_parse_file(path, file_date)?;
    DisplayManager::new()
        .with_pretty_json(json_pretty)
        .display_records(&records, None, json_output)
}
