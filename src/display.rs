//! Output Formatting and Display Management
//!
//! Renders search results either as machine-readable JSON on stdout or as a
//! colour-coded terminal table. In the table every row holding a FAIL status is
//! printed in red so failing wires stand out in long scans; a one-line summary with
//! totals and yield follows the table.
//!
//! ## JSON output
//!
//! ```json
//! {
//!   "records": [
//!     {
//!       "date": "2024-03-01",
//!       "time": "10:00",
//!       "user": "jdoe",
//!       "article": "ART1",
//!       "wire": "W1",
//!       "terminal": "T1",
//!       "crimpHeight": "2.50",
//!       "crimpStatus": "PASS",
//!       "pullForce": "12.3",
//!       "pullStatus": "PASS",
//!       "lengthValue": "---",
//!       "lengthStatus": "---"
//!     }
//!   ],
//!   "summary": { "total": 1, "failures": 0, "yieldPct": 100.0, "topFailingArticles": [] }
//! }
//! ```

use crate::models::{Column, MeasurementRecord};
use crate::reports::Summary;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;

pub struct DisplayManager {
    json_pretty: bool,
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self { json_pretty: false }
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.json_pretty = pretty;
        self
    }

    /// JSON document with the records and their summary.
    pub fn render_json(&self, records: &[MeasurementRecord]) -> Result<String> {
        let output = serde_json::json!({
            "records": records,
            "summary": Summary::from_records(records),
        });
        let rendered = if self.json_pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        };
        rendered.context("Failed to serialize records to JSON")
    }

    pub fn display_records(
        &self,
        records: &[MeasurementRecord],
        limit: Option<usize>,
        json_output: bool,
    ) -> Result<()> {
        if json_output {
            println!("{}", self.render_json(records)?);
            return Ok(());
        }

        if records.is_empty() {
            println!("No records found in that range.");
            return Ok(());
        }

        let shown = limit.map_or(records.len(), |l| l.min(records.len()));
        for line in self.render_table(&records[..shown]) {
            println!("{}", line);
        }
        if shown < records.len() {
            println!(
                "{}",
                format!("... {} more rows not shown", records.len() - shown).dimmed()
            );
        }

        let summary = Summary::from_records(records);
        println!();
        println!(
            "{} records • {} failures • {} yield",
            summary.total.to_string().bright_white().bold(),
            summary.failures.to_string().bright_red().bold(),
            format!("{:.1}%", summary.yield_pct).bright_green().bold()
        );
        Ok(())
    }

    /// Table lines: header, rule, then one line per record.
    pub fn render_table(&self, records: &[MeasurementRecord]) -> Vec<String> {
        let rows: Vec<Vec<String>> = records.iter().map(|r| r.to_row()).collect();

        let widths: Vec<usize> = Column::ALL
            .iter()
            .enumerate()
            .map(|(i, c)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(c.label().len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let pad = |cells: &[&str]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut lines = Vec::with_capacity(rows.len() + 2);
        let labels: Vec<&str> = Column::ALL.iter().map(|c| c.label()).collect();
        lines.push(pad(&labels[..]).bright_cyan().bold().to_string());
        lines.push("-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));

        for (record, row) in records.iter().zip(&rows) {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            let line = pad(&cells[..]);
            if record.has_failure() {
                lines.push(line.red().to_string());
            } else {
                lines.push(line);
            }
        }
        lines
    }

    pub fn display_dates(&self, dates: &[NaiveDate], json_output: bool) -> Result<()> {
        let formatted: Vec<String> = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
        if json_output {
            let json = serde_json::to_string(&formatted).context("Failed to serialize dates")?;
            println!("{}", json);
            return Ok(());
        }

        if formatted.is_empty() {
            println!("No log files found.");
            return Ok(());
        }
        for date in &formatted {
            println!("{}", date);
        }
        println!(
            "\n{} days with logs",
            formatted.len().to_string().bright_white().bold()
        );
        Ok(())
    }
}
