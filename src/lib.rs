//! Crimp Quality Library
//!
//! Parses the per-day production-state logs written by crimp, pull-off and wire
//! length test stations, merges the measurement lines that describe the same wire
//! into one row, and turns the merged rows into pass/fail reports.
//!
//! ## Core Features
//!
//! - **Log-merging parser**: a single-pass, stateful line scanner that tracks the
//!   current session, article and operator and coalesces crimp and pull lines for a
//!   wire/terminal pair regardless of the order they were logged in
//! - **Best-effort batch scans**: walks a `<root>/<YYYY>/<MM>/<DD>/` tree over a date
//!   range; missing or unreadable days simply contribute no rows
//! - **Reports**: terminal tables, JSON, CSV and standalone HTML with yield figures
//!
//! ## Architecture Overview
//!
//! - [`scanner`] - line grammar, scanning context and measurement extraction
//! - [`merger`] - identity keys and the insertion-ordered merge map
//! - [`parser`] - file entry point with Latin-1 decoding and the failure policy
//! - [`file_discovery`] / [`dates`] - date ranges and log file locations
//! - [`analyzer`] - batch search over a date range
//! - [`filter`] - free-text filtering and column sorting
//! - [`reports`] - summary statistics, CSV and HTML export
//! - [`display`] - terminal and JSON output
//! - [`config`] / [`logging`] - configuration layering and structured logging
//!
//! ## Example
//!
//! ```rust
//! use crimp_quality::LogParser;
//!
//! let log = "LearnStarted ( 10:00 )\n\
//!            ArticleKey = <font color=blue><b>ART1</b></font>\n\
//!            CrimpHeight = <b>\"W1\",\"T1\",\"TRUE\",\"2.50\",\"tol\"</b>\n\
//!            PullOffForce = <b>\"W1\",\"T1\",\"PASS\",\"12.3\"</b>\n";
//!
//! let records = LogParser::new().parse_str(log, "2024-03-01");
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].crimp_height.as_deref(), Some("2.50"));
//! assert_eq!(records[0].pull_force.as_deref(), Some("12.3"));
//! ```

pub mod analyzer;
pub mod commands;
pub mod config;
pub mod dates;
pub mod display;
pub mod file_discovery;
pub mod filter;
pub mod logging;
pub mod merger;
pub mod models;
pub mod parser;
pub mod reports;
pub mod scanner;

pub use analyzer::{QualityAnalyzer, SearchOptions, SearchResult};
pub use models::*;
pub use parser::LogParser;
