use crate::display::DisplayManager;
use crate::file_discovery::FileDiscovery;
use anyhow::Result;
use std::path::Path;

/// List every day under `root` that has a log file.
pub fn run_dates(root: &Path, file_name: &str, json_output: bool) -> Result<()> {
    let dates = FileDiscovery::new(root, file_name).available_dates()?;
    DisplayManager::new().display_dates(&dates, json_output)
}
