use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// ISO calendar date format used for log directories and record dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the `YYYY-MM-DD` dates accepted on the command line and in records
pub struct DateParser;

impl DateParser {
    pub fn parse(date_str: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT)
            .with_context(|| format!("Invalid date: {}. Use YYYY-MM-DD", date_str))
    }

    pub fn format(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            anyhow::bail!(
                "Start date {} is after end date {}",
                DateParser::format(from),
                DateParser::format(to)
            );
        }
        Ok(Self { from, to })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Self::new(DateParser::parse(from)?, DateParser::parse(to)?)
    }

    pub fn num_days(&self) -> usize {
        ((self.to - self.from).num_days() + 1) as usize
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    /// Every day from `from` to `to`, both included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        std::iter::successors(Some(self.from), |d| d.checked_add_signed(Duration::days(1)))
            .take_while(move |d| *d <= to)
    }
}
