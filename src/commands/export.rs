use crate::analyzer::{QualityAnalyzer, SearchOptions};
use crate::dates::DateParser;
use crate::reports::html::{write_html, ReportContext};
use crate::reports::{csv::write_csv, write_to_path, ExportFormat};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used when `--output` is not given.
pub fn default_output_path(format: ExportFormat, today: NaiveDate) -> PathBuf {
    let stem = match format {
        ExportFormat::Csv => "quality_raw_data",
        ExportFormat::Html => "quality_report",
    };
    PathBuf::from(format!(
        "{}_{}.{}",
        stem,
        DateParser::format(today),
        format.extension()
    ))
}

/// Search the range and write the result as CSV or an HTML report.
/// Returns the number of records written.
pub fn run_export(options: &SearchOptions, format: ExportFormat, output: &Path) -> Result<usize> {
    let result = QualityAnalyzer::new().search(options)?;
    if result.records.is_empty() {
        anyhow::bail!("No records to export");
    }

    match format {
        ExportFormat::Csv => write_to_path(output, |out| {
            write_csv(out, &result.records)?;
            Ok(())
        })?,
        ExportFormat::Html => {
            let context = ReportContext {
                from: DateParser::format(options.range.from),
                to: DateParser::format(options.range.to),
                filter: options.filter.clone().unwrap_or_default(),
            };
            write_to_path(output, |out| {
                write_html(out, &result.records, &context)?;
                Ok(())
            })?
        }
    }

    info!(
        path = %output.display(),
        format = %format,
        records = result.records.len(),
        "Export written"
    );
    Ok(result.records.len())
}
