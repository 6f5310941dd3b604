use crate::merger::RecordMerger;
use crate::models::MeasurementRecord;
use crate::scanner::LineScanner;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Parses one production-state log into merged measurement records.
///
/// Files are decoded as Latin-1: every byte maps to the code point with the same
/// value, so decoding cannot fail on legacy station output.
pub struct LogParser {}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser {
    pub fn new() -> Self {
        Self {}
    }

    /// Best-effort parse used by batch scans. A missing or unreadable file yields no
    /// records; the caller never sees partial data or an error.
    pub fn parse_file(&self, path: &Path, file_date: &str) -> Vec<MeasurementRecord> {
        if !path.exists() {
            debug!(path = %path.display(), "Log file not present, skipping");
            return Vec::new();
        }

        match self.try_parse_file(path, file_date) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read log file, skipping");
                Vec::new()
            }
        }
    }

    /// Strict variant of [`LogParser::parse_file`] that reports why a file could not
    /// be read.
    pub fn try_parse_file(&self, path: &Path, file_date: &str) -> Result<Vec<MeasurementRecord>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        let records = self
            .parse_reader(BufReader::new(file), file_date)
            .with_context(|| format!("Failed to read log file: {}", path.display()))?;

        debug!(
            path = %path.display(),
            date = file_date,
            records = records.len(),
            "Parsed log file"
        );
        Ok(records)
    }

    /// Scan any buffered Latin-1 source. Lines may end in `\n`, `\r\n` or a bare `\r`.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R, file_date: &str) -> Result<Vec<MeasurementRecord>> {
        let mut scanner = LineScanner::new();
        let mut merger = RecordMerger::new(file_date);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            feed_text(&decode_latin1(&buf), &mut scanner, &mut merger);
        }

        if scanner.rejected_lines() > 0 {
            debug!(
                rejected = scanner.rejected_lines(),
                lines = scanner.lines_scanned(),
                "Skipped malformed measurement lines"
            );
        }

        Ok(merger.into_records())
    }

    /// In-memory text, split on the same line endings as files.
    pub fn parse_str(&self, text: &str, file_date: &str) -> Vec<MeasurementRecord> {
        let mut scanner = LineScanner::new();
        let mut merger = RecordMerger::new(file_date);
        feed_text(text, &mut scanner, &mut merger);
        merger.into_records()
    }
}

/// Scan every non-empty line of `text`; `\n`, `\r\n` and a bare `\r` all end a line.
fn feed_text(text: &str, scanner: &mut LineScanner, merger: &mut RecordMerger) {
    for line in text.split(['\r', '\n']).filter(|l| !l.is_empty()) {
        if let Some(measurement) = scanner.scan_line(line) {
            merger.upsert(measurement, scanner.context());
        }
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
