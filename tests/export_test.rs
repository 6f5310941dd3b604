//! CSV and HTML export of search results

use crimp_quality::commands::run_export;
use crimp_quality::dates::DateRange;
use crimp_quality::file_discovery::DEFAULT_LOG_FILE_NAME;
use crimp_quality::reports::ExportFormat;
use crimp_quality::SearchOptions;
use std::fs;

mod common;

fn options(root: &std::path::Path) -> SearchOptions {
    SearchOptions {
        root: root.to_path_buf(),
        file_name: DEFAULT_LOG_FILE_NAME.to_string(),
        range: DateRange::parse("2024-03-01", "2024-03-03").unwrap(),
        filter: None,
        sort: None,
    }
}

#[test]
fn test_csv_export() -> anyhow::Result<()> {
    let temp_dir = common::setup_log_tree()?;
    let output = temp_dir.path().join("out").join("raw.csv");

    let written = run_export(&options(temp_dir.path()), ExportFormat::Csv, &output)?;
    assert_eq!(written, 4);

    let csv = fs::read_to_string(&output)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "Date,Time,User,Article,Wire,Terminal,Crimp_H,Crimp_Stat,Pull_F,Pull_Stat,Len_Val,Len_Stat"
    );
    assert_eq!(
        lines[1],
        "2024-03-01,2024-03-01 07:58:12,jdoe,ART-100,W1,T1,2.50,PASS,55.2,PASS,---,---"
    );
    assert_eq!(
        lines[3],
        "2024-03-01,2024-03-01 07:58:12,jdoe,ART-100,W1,WIRE-LEN,---,---,---,---,120.0,PASS"
    );
    Ok(())
}

#[test]
fn test_html_export() -> anyhow::Result<()> {
    let temp_dir = common::setup_log_tree()?;
    let output = temp_dir.path().join("report.html");

    run_export(&options(temp_dir.path()), ExportFormat::Html, &output)?;

    let html = fs::read_to_string(&output)?;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Range: 2024-03-01 to 2024-03-03"));
    // Two of four records carry a FAIL status.
    assert!(html.contains("<div class=\"big-num\">4</div>"));
    assert!(html.contains("<div class=\"big-num\">2</div>"));
    assert!(html.contains("<div class=\"big-num\">50.0%</div>"));
    assert!(html.contains("<li><b>ART-100</b>: 1 Failures</li>"));
    assert!(html.contains("<li><b>ART-200</b>: 1 Failures</li>"));
    Ok(())
}

#[test]
fn test_export_with_no_records_fails() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let output = temp_dir.path().join("empty.csv");

    let err = run_export(&options(temp_dir.path()), ExportFormat::Csv, &output).unwrap_err();
    assert!(err.to_string().contains("No records"));
    assert!(!output.exists());
    Ok(())
}
