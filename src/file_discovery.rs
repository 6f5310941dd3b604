use crate::dates::DateRange;
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

/// Default name of the per-day log written by the test stations.
pub const DEFAULT_LOG_FILE_NAME: &str = "Production state data.htm";

/// Locates per-day log files under `<root>/<YYYY>/<MM>/<DD>/<file_name>`.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    root: PathBuf,
    file_name: String,
}

impl FileDiscovery {
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the log for `date` would live. The file need not exist.
    pub fn log_path(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
            .join(format!("{:02}", date.day()))
            .join(&self.file_name)
    }

    /// One candidate path per day of the range, present or not.
    pub fn candidates(&self, range: &DateRange) -> Vec<(NaiveDate, PathBuf)> {
        range.days().map(|day| (day, self.log_path(day))).collect()
    }

    /// Dates that have a log file on disk, oldest first.
    pub fn available_dates(&self) -> Result<Vec<NaiveDate>> {
        // Escape so roots and file names with brackets are taken literally.
        let pattern = PathBuf::from(Pattern::escape(&self.root.to_string_lossy()))
            .join("*")
            .join("*")
            .join("*")
            .join(Pattern::escape(&self.file_name));

        let mut dates = Vec::new();
        for entry in glob(&pattern.to_string_lossy())
            .with_context(|| format!("Invalid search root: {}", self.root.display()))?
            .flatten()
        {
            if let Some(date) = date_from_path(&entry) {
                dates.push(date);
            }
        }

        dates.sort();
        dates.dedup();
        Ok(dates)
    }
}

/// Recover the date from `.../<YYYY>/<MM>/<DD>/<file>`.
fn date_from_path(path: &Path) -> Option<NaiveDate> {
    let day_dir = path.parent()?;
    let month_dir = day_dir.parent()?;
    let year_dir = month_dir.parent()?;

    let component = |p: &Path| -> Option<u32> { p.file_name()?.to_str()?.parse().ok() };
    let year = component(year_dir)? as i32;
    NaiveDate::from_ymd_opt(year, component(month_dir)?, component(day_dir)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateParser;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, parts: &[&str]) {
        let mut dir = root.to_path_buf();
        for part in &parts[..parts.len() - 1] {
            dir = dir.join(part);
        }
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(parts[parts.len() - 1]), "").unwrap();
    }

    #[test]
    fn test_log_path_layout() {
        let discovery = FileDiscovery::new("/data", DEFAULT_LOG_FILE_NAME);
        let path = discovery.log_path(DateParser::parse("2024-03-05").unwrap());
        assert_eq!(
            path,
            PathBuf::from("/data/2024/03/05/Production state data.htm")
        );
    }

    #[test]
    fn test_candidates_cover_every_day() {
        let discovery = FileDiscovery::new("/data", "log.htm");
        let range = DateRange::parse("2024-12-30", "2025-01-02").unwrap();
        let candidates = discovery.candidates(&range);
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[3].1, PathBuf::from("/data/2025/01/02/log.htm"));
    }

    #[test]
    fn test_available_dates() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["2024", "03", "02", DEFAULT_LOG_FILE_NAME]);
        touch(temp.path(), &["2024", "03", "01", DEFAULT_LOG_FILE_NAME]);
        touch(temp.path(), &["2024", "03", "03", "other.htm"]);
        touch(temp.path(), &["2024", "13", "01", DEFAULT_LOG_FILE_NAME]);

        let discovery = FileDiscovery::new(temp.path(), DEFAULT_LOG_FILE_NAME);
        let dates: Vec<String> = discovery
            .available_dates()
            .unwrap()
            .into_iter()
            .map(DateParser::format)
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-02"]);
    }
}
