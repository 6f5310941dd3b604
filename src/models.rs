//! Core Data Models
//!
//! This module defines the data structures shared by the scanner, the merger and
//! every output format. The flow is:
//!
//! 1. **Raw lines**: the scanner turns log lines into [`MeasurementKind`]-tagged tuples
//! 2. **Merged rows**: the merger coalesces them into [`MeasurementRecord`] values
//! 3. **Output**: records are rendered by [`Column`] in a fixed order for CSV, JSON,
//!    terminal tables and HTML reports
//!
//! ## Unset fields
//!
//! A measurement that has not been seen for a record is `None` in memory. All external
//! forms write it as [`UNSET`] so a consumer can always read all twelve columns.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Serialized form of a field that was never populated.
pub const UNSET: &str = "---";

/// Context value used until the log provides one.
pub const UNKNOWN: &str = "Unknown";

/// Terminal shown on wire-length records, which are measured per wire.
pub const LENGTH_TERMINAL: &str = "WIRE-LEN";

/// Pass/fail outcome of a single measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    /// Classify a raw indicator token. `TRUE` and `PASS` (any case) pass,
    /// everything else fails, including the empty string.
    pub fn classify(token: &str) -> Self {
        let upper = token.to_ascii_uppercase();
        if upper == "TRUE" || upper == "PASS" {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three measurement kinds the log grammar knows, in dispatch priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    Crimp,
    Pull,
    Length,
}

impl MeasurementKind {
    pub const PRIORITY: [MeasurementKind; 3] = [
        MeasurementKind::Crimp,
        MeasurementKind::Pull,
        MeasurementKind::Length,
    ];

    /// Substring that identifies a data line of this kind.
    pub fn marker(&self) -> &'static str {
        match self {
            MeasurementKind::Crimp => "CrimpHeight =",
            MeasurementKind::Pull => "PullOffForce =",
            MeasurementKind::Length => "WireLength =",
        }
    }

    /// Fewest payload tokens a line of this kind must carry to be accepted.
    pub fn min_tokens(&self) -> usize {
        match self {
            MeasurementKind::Crimp => 5,
            MeasurementKind::Pull => 4,
            MeasurementKind::Length => 3,
        }
    }
}

/// One merged row: everything known about a wire/terminal pair (or a wire, for
/// length) within one test session of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    pub date: String,
    pub time: String,
    pub user: String,
    pub article: String,
    pub wire: String,
    pub terminal: String,
    #[serde(serialize_with = "serialize_or_unset")]
    pub crimp_height: Option<String>,
    #[serde(serialize_with = "serialize_or_unset")]
    pub crimp_status: Option<Status>,
    #[serde(serialize_with = "serialize_or_unset")]
    pub pull_force: Option<String>,
    #[serde(serialize_with = "serialize_or_unset")]
    pub pull_status: Option<Status>,
    #[serde(serialize_with = "serialize_or_unset")]
    pub length_value: Option<String>,
    #[serde(serialize_with = "serialize_or_unset")]
    pub length_status: Option<Status>,
}

fn serialize_or_unset<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_str(UNSET),
    }
}

impl MeasurementRecord {
    /// A record with identity fields filled and every measurement unset.
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        user: impl Into<String>,
        article: impl Into<String>,
        wire: impl Into<String>,
        terminal: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            user: user.into(),
            article: article.into(),
            wire: wire.into(),
            terminal: terminal.into(),
            crimp_height: None,
            crimp_status: None,
            pull_force: None,
            pull_status: None,
            length_value: None,
            length_status: None,
        }
    }

    /// True when any populated status is FAIL.
    pub fn has_failure(&self) -> bool {
        [self.crimp_status, self.pull_status, self.length_status]
            .iter()
            .any(|s| *s == Some(Status::Fail))
    }

    /// Serialized value of one column, with unset fields rendered as [`UNSET`].
    pub fn value(&self, column: Column) -> Cow<'_, str> {
        fn opt(v: &Option<String>) -> Cow<'_, str> {
            Cow::Borrowed(v.as_deref().unwrap_or(UNSET))
        }
        fn stat(v: &Option<Status>) -> Cow<'static, str> {
            Cow::Borrowed(v.map(|s| s.as_str()).unwrap_or(UNSET))
        }

        match column {
            Column::Date => Cow::Borrowed(&self.date),
            Column::Time => Cow::Borrowed(&self.time),
            Column::User => Cow::Borrowed(&self.user),
            Column::Article => Cow::Borrowed(&self.article),
            Column::Wire => Cow::Borrowed(&self.wire),
            Column::Terminal => Cow::Borrowed(&self.terminal),
            Column::CrimpHeight => opt(&self.crimp_height),
            Column::CrimpStatus => stat(&self.crimp_status),
            Column::PullForce => opt(&self.pull_force),
            Column::PullStatus => stat(&self.pull_status),
            Column::LengthValue => opt(&self.length_value),
            Column::LengthStatus => stat(&self.length_status),
        }
    }

    /// All twelve columns in output order.
    pub fn to_row(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|c| self.value(*c).into_owned())
            .collect()
    }
}

/// Output columns in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Time,
    User,
    Article,
    Wire,
    Terminal,
    CrimpHeight,
    CrimpStatus,
    PullForce,
    PullStatus,
    LengthValue,
    LengthStatus,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::Date,
        Column::Time,
        Column::User,
        Column::Article,
        Column::Wire,
        Column::Terminal,
        Column::CrimpHeight,
        Column::CrimpStatus,
        Column::PullForce,
        Column::PullStatus,
        Column::LengthValue,
        Column::LengthStatus,
    ];

    /// CSV header name, compatible with existing exports.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Time => "Time",
            Column::User => "User",
            Column::Article => "Article",
            Column::Wire => "Wire",
            Column::Terminal => "Terminal",
            Column::CrimpHeight => "Crimp_H",
            Column::CrimpStatus => "Crimp_Stat",
            Column::PullForce => "Pull_F",
            Column::PullStatus => "Pull_Stat",
            Column::LengthValue => "Len_Val",
            Column::LengthStatus => "Len_Stat",
        }
    }

    /// Short label for terminal tables.
    pub fn label(&self) -> &'static str {
        match self {
            Column::User => "Operator",
            Column::CrimpHeight => "Crimp H",
            Column::CrimpStatus => "C-Stat",
            Column::PullForce => "Pull F",
            Column::PullStatus => "P-Stat",
            Column::LengthValue => "Length",
            Column::LengthStatus => "L-Stat",
            other => other.header(),
        }
    }

    fn long_name(&self) -> &'static str {
        match self {
            Column::CrimpHeight => "CrimpHeight",
            Column::CrimpStatus => "CrimpStatus",
            Column::PullForce => "PullForce",
            Column::PullStatus => "PullStatus",
            Column::LengthValue => "LengthValue",
            Column::LengthStatus => "LengthStatus",
            other => other.header(),
        }
    }
}

impl FromStr for Column {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let wanted = s.trim();
        Column::ALL
            .iter()
            .copied()
            .find(|c| {
                c.header().eq_ignore_ascii_case(wanted) || c.long_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| anyhow::anyhow!("Unknown column: {}", s))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}
