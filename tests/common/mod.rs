#![allow(dead_code)]

use anyhow::Result;
use crimp_quality::dates::DateParser;
use crimp_quality::file_discovery::{FileDiscovery, DEFAULT_LOG_FILE_NAME};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a day's log under `<root>/<YYYY>/<MM>/<DD>/`.
pub fn write_day_log(root: &Path, date: &str, content: &[u8]) -> Result<PathBuf> {
    let day = DateParser::parse(date)?;
    let path = FileDiscovery::new(root, DEFAULT_LOG_FILE_NAME).log_path(day);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
}

pub fn context_lines(timestamp: &str, user: &str, article: &str) -> String {
    format!(
        "<p>LearnStarted ( {} )</p>\n\
         <p>UserName = <font color=\"#0000FF\"><b>{}</b></font></p>\n\
         <p>ArticleKey = <font color=\"#0000FF\"><b>{}</b></font></p>\n",
        timestamp, user, article
    )
}

pub fn crimp_line(wire: &str, terminal: &str, ok: &str, height: &str) -> String {
    format!(
        "<p>CrimpHeight = <b>\"{}\",\"{}\",\"{}\",\"{}\",\"0.05\"</b></p>\n",
        wire, terminal, ok, height
    )
}

pub fn pull_line(wire: &str, terminal: &str, ok: &str, force: &str) -> String {
    format!(
        "<p>PullOffForce = <b>\"{}\",\"{}\",\"{}\",\"{}\"</b></p>\n",
        wire, terminal, ok, force
    )
}

pub fn length_line(wire: &str, ok: &str, value: &str) -> String {
    format!("<p>WireLength = <b>\"{}\",\"{}\",\"{}\"</b></p>\n", wire, ok, value)
}

/// A three-day tree: two days with logs, one day missing in between.
pub fn setup_log_tree() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;

    let mut day1 = String::from("<html><body>\n");
    day1.push_str(&context_lines("2024-03-01 07:58:12", "jdoe", "ART-100"));
    day1.push_str(&crimp_line("W1", "T1", "TRUE", "2.50"));
    day1.push_str(&pull_line("W1", "T1", "PASS", "55.2"));
    day1.push_str(&crimp_line("W1", "T2", "FALSE", "2.71"));
    day1.push_str(&length_line("W1", "TRUE", "120.0"));
    day1.push_str("</body></html>\n");
    write_day_log(temp_dir.path(), "2024-03-01", day1.as_bytes())?;

    let mut day3 = String::from("<html><body>\n");
    day3.push_str(&context_lines("2024-03-03 13:02:40", "asmith", "ART-200"));
    day3.push_str(&pull_line("W7", "T9", "false", "11.0"));
    day3.push_str(&crimp_line("W7", "T9", "true", "1.95"));
    day3.push_str("</body></html>\n");
    write_day_log(temp_dir.path(), "2024-03-03", day3.as_bytes())?;

    Ok(temp_dir)
}
