//! Line Scanner
//!
//! Turns production-log lines into context updates and measurement tuples. The
//! scanner only knows the fixed log grammar written by the crimp/pull/length test
//! stations:
//!
//! ```text
//! LearnStarted ( 10:00 )
//! UserName = <font color=blue><b>jdoe</b></font>
//! ArticleKey = <font color=blue><b>ART1</b></font>
//! CrimpHeight = <b>"W1","T1","TRUE","2.50","tol"</b>
//! PullOffForce = <b>"W1","T1","PASS","12.3"</b>
//! WireLength = <b>"W2","FALSE","99.1"</b>
//! ```
//!
//! Context lines update a [`LogContext`] that stays in effect for every later line of
//! the same file. Data lines are classified by marker substring in the priority
//! order of [`MeasurementKind::PRIORITY`]; a line whose payload is too short for a
//! kind is simply not a data line of that kind.

use crate::models::{MeasurementKind, Status, UNKNOWN};
use regex::Regex;
use std::sync::OnceLock;

struct Grammar {
    learn_started: Regex,
    user_name: Regex,
    article_key: Regex,
    bold_payload: Regex,
}

fn grammar() -> &'static Grammar {
    static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| Grammar {
        learn_started: Regex::new(r"LearnStarted\s*\(\s*(.*?)\)").expect("valid LearnStarted pattern"),
        user_name: Regex::new(r"UserName = <font.*?><b>(.*?)</b></font>").expect("valid UserName pattern"),
        article_key: Regex::new(r"ArticleKey = <font.*?><b>(.*?)</b></font>").expect("valid ArticleKey pattern"),
        bold_payload: Regex::new(r"<b>(.*?)</b>").expect("valid payload pattern"),
    })
}

/// Scanning state carried from line to line within one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub timestamp: String,
    pub article_key: String,
    pub user_name: String,
}

impl Default for LogContext {
    fn default() -> Self {
        Self {
            timestamp: UNKNOWN.to_string(),
            article_key: UNKNOWN.to_string(),
            user_name: UNKNOWN.to_string(),
        }
    }
}

/// A recognised data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Measurement {
    Crimp {
        wire: String,
        terminal: String,
        status: Status,
        height: String,
    },
    Pull {
        wire: String,
        terminal: String,
        status: Status,
        force: String,
    },
    Length {
        wire: String,
        status: Status,
        value: String,
    },
}

impl Measurement {
    pub fn kind(&self) -> MeasurementKind {
        match self {
            Measurement::Crimp { .. } => MeasurementKind::Crimp,
            Measurement::Pull { .. } => MeasurementKind::Pull,
            Measurement::Length { .. } => MeasurementKind::Length,
        }
    }

    pub fn wire(&self) -> &str {
        match self {
            Measurement::Crimp { wire, .. }
            | Measurement::Pull { wire, .. }
            | Measurement::Length { wire, .. } => wire,
        }
    }

    /// Build a measurement of `kind` from normalized tokens, or `None` when the
    /// payload is too short for that kind.
    pub fn from_tokens(kind: MeasurementKind, tokens: &[String]) -> Option<Self> {
        if tokens.len() < kind.min_tokens() {
            return None;
        }

        let measurement = match kind {
            MeasurementKind::Crimp => Measurement::Crimp {
                wire: tokens[0].clone(),
                terminal: tokens[1].clone(),
                status: Status::classify(&tokens[2]),
                height: tokens[3].clone(),
            },
            MeasurementKind::Pull => Measurement::Pull {
                wire: tokens[0].clone(),
                terminal: tokens[1].clone(),
                status: Status::classify(&tokens[2]),
                force: tokens[3].clone(),
            },
            MeasurementKind::Length => Measurement::Length {
                wire: tokens[0].clone(),
                status: Status::classify(&tokens[1]),
                value: tokens[2].clone(),
            },
        };
        Some(measurement)
    }
}

/// Split a bold payload on commas, trimming whitespace and dropping quotes.
pub fn tokenize(payload: &str) -> Vec<String> {
    payload
        .split(',')
        .map(|token| token.trim().replace('"', ""))
        .collect()
}

/// Stateful scanner for one file.
#[derive(Debug, Default)]
pub struct LineScanner {
    context: LogContext,
    lines_scanned: usize,
    rejected_lines: usize,
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn lines_scanned(&self) -> usize {
        self.lines_scanned
    }

    /// Lines that carried a measurement marker but no acceptable payload.
    pub fn rejected_lines(&self) -> usize {
        self.rejected_lines
    }

    /// Scan one line. Context updates are applied first, so a data pattern on the
    /// same line already sees them.
    pub fn scan_line(&mut self, line: &str) -> Option<Measurement> {
        self.lines_scanned += 1;
        self.update_context(line);
        let measurement = self.extract_measurement(line);
        if measurement.is_none() && has_marker(line) {
            self.rejected_lines += 1;
        }
        measurement
    }

    fn update_context(&mut self, line: &str) {
        let g = grammar();

        if let Some(caps) = g.learn_started.captures(line) {
            self.context.timestamp = caps[1].trim().to_string();
        }
        if let Some(caps) = g.article_key.captures(line) {
            self.context.article_key = caps[1].trim().to_string();
        }
        if let Some(caps) = g.user_name.captures(line) {
            self.context.user_name = caps[1].trim().to_string();
        }
    }

    fn extract_measurement(&self, line: &str) -> Option<Measurement> {
        if !line.contains("<b>") {
            return None;
        }
        let payload = grammar().bold_payload.captures(line)?;
        let tokens = tokenize(&payload[1]);

        MeasurementKind::PRIORITY
            .iter()
            .filter(|kind| line.contains(kind.marker()))
            .find_map(|kind| Measurement::from_tokens(*kind, &tokens))
    }
}

fn has_marker(line: &str) -> bool {
    MeasurementKind::PRIORITY
        .iter()
        .any(|kind| line.contains(kind.marker()))
}
