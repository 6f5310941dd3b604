//! Quality Analysis Engine
//!
//! Orchestrates a batch search over a date range:
//!
//! 1. **Discovery**: one candidate path per day under the log root
//! 2. **Parsing**: each present file is parsed with the best-effort [`LogParser`];
//!    missing or unreadable days contribute nothing
//! 3. **Filtering**: the optional free-text filter is applied to the merged rows
//! 4. **Sorting**: the optional column sort is applied last
//!
//! The scan is serial and every file is parsed start-to-finish before the next one.
//! Nothing here reads global configuration; the CLI resolves config into
//! [`SearchOptions`] first.

use crate::dates::{DateParser, DateRange};
use crate::file_discovery::FileDiscovery;
use crate::filter::{filter_records, sort_records};
use crate::logging::new_run_id;
use crate::models::{Column, MeasurementRecord};
use crate::parser::LogParser;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info, info_span};

/// Everything a search needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub root: PathBuf,
    pub file_name: String,
    pub range: DateRange,
    pub filter: Option<String>,
    pub sort: Option<(Column, bool)>,
}

/// Records found by a search plus scan bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub records: Vec<MeasurementRecord>,
    /// Days examined in the range.
    pub files_scanned: usize,
    /// Days that had a log file on disk.
    pub files_found: usize,
}

pub struct QualityAnalyzer {
    parser: LogParser,
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self {
            parser: LogParser::new(),
        }
    }

    pub fn search(&self, options: &SearchOptions) -> Result<SearchResult> {
        let span = info_span!(
            "search",
            run_id = %new_run_id(),
            from = %DateParser::format(options.range.from),
            to = %DateParser::format(options.range.to),
        );
        let _enter = span.enter();

        let discovery = FileDiscovery::new(&options.root, &options.file_name);
        let mut result = SearchResult::default();

        for (day, path) in discovery.candidates(&options.range) {
            result.files_scanned += 1;
            if !path.is_file() {
                debug!(path = %path.display(), "No log for day");
                continue;
            }
            result.files_found += 1;

            let records = self.parser.parse_file(&path, &DateParser::format(day));
            debug!(date = %day, records = records.len(), "Scanned day");
            result.records.extend(records);
        }

        if let Some(needle) = &options.filter {
            result.records = filter_records(result.records, needle);
        }
        if let Some((column, descending)) = options.sort {
            sort_records(&mut result.records, column, descending);
        }

        info!(
            files_scanned = result.files_scanned,
            files_found = result.files_found,
            records = result.records.len(),
            "Search complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_discovery::DEFAULT_LOG_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    fn write_log(root: &std::path::Path, date: &str, body: &str) {
        let day = DateParser::parse(date).unwrap();
        let path = FileDiscovery::new(root, DEFAULT_LOG_FILE_NAME).log_path(day);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn options(root: &std::path::Path, from: &str, to: &str) -> SearchOptions {
        SearchOptions {
            root: root.to_path_buf(),
            file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            range: DateRange::parse(from, to).unwrap(),
            filter: None,
            sort: None,
        }
    }

    #[test]
    fn test_search_skips_missing_days() {
        let temp = TempDir::new().unwrap();
        write_log(
            temp.path(),
            "2024-03-01",
            "ArticleKey = <font><b>A1</b></font>\nWireLength = <b>W1,TRUE,10</b>\n",
        );
        write_log(
            temp.path(),
            "2024-03-03",
            "ArticleKey = <font><b>A2</b></font>\nWireLength = <b>W1,FALSE,11</b>\n",
        );

        let result = QualityAnalyzer::new()
            .search(&options(temp.path(), "2024-03-01", "2024-03-03"))
            .unwrap();
        assert_eq!(result.files_scanned, 3);
        assert_eq!(result.files_found, 2);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].date, "2024-03-01");
        assert_eq!(result.records[1].date, "2024-03-03");
    }

    #[test]
    fn test_search_filter_and_sort() {
        let temp = TempDir::new().unwrap();
        write_log(
            temp.path(),
            "2024-03-01",
            "ArticleKey = <font><b>A1</b></font>\n\
             WireLength = <b>W1,TRUE,10</b>\n\
             WireLength = <b>W2,TRUE,9.5</b>\n\
             ArticleKey = <font><b>B1</b></font>\n\
             WireLength = <b>W3,TRUE,1</b>\n",
        );

        let mut opts = options(temp.path(), "2024-03-01", "2024-03-01");
        opts.filter = Some("a1".to_string());
        opts.sort = Some((Column::LengthValue, false));

        let result = QualityAnalyzer::new().search(&opts).unwrap();
        let wires: Vec<_> = result.records.iter().map(|r| r.wire.as_str()).collect();
        assert_eq!(wires, vec!["W2", "W1"]);
    }
}
