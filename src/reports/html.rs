//! Standalone HTML quality report.
//!
//! The page has no external assets: styles are inlined so the file can be mailed
//! or opened from a network share as-is.

use super::summary::Summary;
use crate::models::{MeasurementRecord, Status, UNSET};
use std::io::{self, Write};

/// Context printed in the report header.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    pub from: String,
    pub to: String,
    pub filter: String,
}

const STYLE: &str = r#"
    body { font-family: 'Segoe UI', sans-serif; margin: 40px; background: #f4f7f6; color: #333; }
    .header { background: #2c3e50; color: white; padding: 25px; border-radius: 8px; margin-bottom: 30px; }
    h1 { margin: 0; font-size: 24px; }
    .stats-row { display: flex; gap: 20px; margin-bottom: 30px; }
    .card { background: white; padding: 20px; border-radius: 8px; flex: 1; box-shadow: 0 4px 6px rgba(0,0,0,0.1); border-top: 4px solid #3498db; }
    .card.fail { border-top-color: #e74c3c; }
    .card.yield { border-top-color: #2ecc71; }
    .big-num { font-size: 32px; font-weight: bold; margin-top: 5px; }
    .fail-list { background: #fff0f0; padding: 15px; border-radius: 8px; border: 1px solid #ffcccc; margin-bottom: 30px; }
    table { width: 100%; border-collapse: collapse; background: white; box-shadow: 0 2px 4px rgba(0,0,0,0.1); font-size: 14px; }
    th { background: #34495e; color: white; padding: 12px 8px; text-align: left; }
    td { padding: 10px 8px; border-bottom: 1px solid #eee; }
    tr:nth-child(even) { background: #f9f9f9; }
    .badge { padding: 4px 8px; border-radius: 12px; font-size: 11px; font-weight: bold; display: inline-block; min-width: 40px; text-align: center; }
    .pass { background: #d4edda; color: #155724; }
    .fail { background: #f8d7da; color: #721c24; }
"#;

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn badge(value: &Option<String>, status: Option<Status>) -> String {
    match status {
        Some(status) => {
            let class = match status {
                Status::Pass => "pass",
                Status::Fail => "fail",
            };
            format!(
                "<span class=\"badge {}\">{}</span>",
                class,
                escape(value.as_deref().unwrap_or(UNSET))
            )
        }
        None => UNSET.to_string(),
    }
}

pub fn write_html<W: Write>(
    w: &mut W,
    records: &[MeasurementRecord],
    context: &ReportContext,
) -> io::Result<()> {
    let summary = Summary::from_records(records);

    writeln!(w, "<!DOCTYPE html>")?;
    writeln!(w, "<html><head><meta charset=\"utf-8\"><title>Production Quality Report</title>")?;
    writeln!(w, "<style>{}</style>", STYLE)?;
    writeln!(w, "</head><body>")?;

    writeln!(w, "<div class=\"header\">")?;
    writeln!(w, "<h1>Production Quality Report</h1>")?;
    writeln!(
        w,
        "<p>Range: {} to {} | Filter: \"{}\"</p>",
        escape(&context.from),
        escape(&context.to),
        escape(&context.filter)
    )?;
    writeln!(w, "</div>")?;

    writeln!(w, "<div class=\"stats-row\">")?;
    writeln!(
        w,
        "<div class=\"card\"><div>Total Processed</div><div class=\"big-num\">{}</div></div>",
        summary.total
    )?;
    writeln!(
        w,
        "<div class=\"card fail\"><div>Total Failures</div><div class=\"big-num\">{}</div></div>",
        summary.failures
    )?;
    writeln!(
        w,
        "<div class=\"card yield\"><div>Yield Rate</div><div class=\"big-num\">{:.1}%</div></div>",
        summary.yield_pct
    )?;
    writeln!(w, "</div>")?;

    writeln!(w, "<div class=\"fail-list\">")?;
    writeln!(w, "<h3>Top Failing Articles</h3>")?;
    writeln!(w, "<ul>")?;
    if summary.top_failing_articles.is_empty() {
        writeln!(w, "<li>No failures found.</li>")?;
    }
    for entry in &summary.top_failing_articles {
        writeln!(
            w,
            "<li><b>{}</b>: {} Failures</li>",
            escape(&entry.article),
            entry.failures
        )?;
    }
    writeln!(w, "</ul>")?;
    writeln!(w, "</div>")?;

    writeln!(w, "<table>")?;
    writeln!(
        w,
        "<thead><tr><th>Date</th><th>User</th><th>Article</th><th>Wire</th><th>Crimp</th><th>Pull</th><th>Length</th></tr></thead>"
    )?;
    writeln!(w, "<tbody>")?;
    for r in records {
        writeln!(
            w,
            "<tr><td>{} {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&r.date),
            escape(&r.time),
            escape(&r.user),
            escape(&r.article),
            escape(&r.wire),
            badge(&r.crimp_height, r.crimp_status),
            badge(&r.pull_force, r.pull_status),
            badge(&r.length_value, r.length_status),
        )?;
    }
    writeln!(w, "</tbody></table>")?;
    writeln!(w, "</body></html>")?;
    Ok(())
}

pub fn to_html_string(records: &[MeasurementRecord], context: &ReportContext) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_html(&mut buf, records, context);
    String::from_utf8_lossy(&buf).into_owned()
}
