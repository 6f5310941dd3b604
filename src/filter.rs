//! Record filtering and sorting for the presentation layer.
//!
//! Neither operation touches the parser: both work on already merged records and
//! read them through their serialized column values, so an unset field matches and
//! sorts as `---`.

use crate::models::{Column, MeasurementRecord};
use std::cmp::Ordering;

/// Case-insensitive substring match against every column. The needle is used as
/// typed, surrounding spaces included. An empty needle matches.
pub fn matches(record: &MeasurementRecord, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    Column::ALL
        .iter()
        .any(|c| record.value(*c).to_lowercase().contains(&needle))
}

/// Keep only the records that match `needle`.
pub fn filter_records(records: Vec<MeasurementRecord>, needle: &str) -> Vec<MeasurementRecord> {
    if needle.is_empty() {
        return records;
    }
    records.into_iter().filter(|r| matches(r, needle)).collect()
}

#[derive(Debug, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(value: &str) -> Self {
        if looks_numeric(value) {
            if let Ok(n) = value.parse::<f64>() {
                return SortKey::Number(n);
            }
        }
        SortKey::Text(value.to_lowercase())
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        }
    }
}

/// Digits with at most one decimal point; signs and exponents are text.
fn looks_numeric(value: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for ch in value.chars() {
        match ch {
            '.' => dots += 1,
            c if c.is_ascii_digit() => digits += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Stable sort by one column. Numeric-looking values order numerically and before
/// text; text orders case-insensitively. Ties keep their order in both directions.
pub fn sort_records(records: &mut [MeasurementRecord], column: Column, descending: bool) {
    records.sort_by(|a, b| {
        let ordering = SortKey::of(&a.value(column)).compare(&SortKey::of(&b.value(column)));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn record(article: &str, height: Option<&str>) -> MeasurementRecord {
        let mut r = MeasurementRecord::new("2024-03-01", "10:00", "jdoe", article, "W1", "T1");
        r.crimp_height = height.map(str::to_string);
        r.crimp_status = height.map(|_| Status::Pass);
        r
    }

    #[test]
    fn test_matches_is_case_insensitive_over_all_columns() {
        let r = record("ART-Alpha", Some("2.50"));
        assert!(matches(&r, "alpha"));
        assert!(matches(&r, "JDOE"));
        assert!(matches(&r, "pass"));
        assert!(matches(&r, ""));
        assert!(!matches(&r, "beta"));
    }

    #[test]
    fn test_unset_placeholder_is_searchable() {
        let r = record("A", None);
        assert!(matches(&r, "---"));
    }

    #[test]
    fn test_needle_spaces_are_significant() {
        let r = record("A1", None);
        assert!(!matches(&r, " A1"));
        assert!(filter_records(vec![r.clone()], " a1").is_empty());
        assert_eq!(filter_records(vec![r], "a1").len(), 1);
    }

    #[test]
    fn test_filter_records() {
        let records = vec![record("A1", None), record("B1", None), record("A2", None)];
        let kept: Vec<_> = filter_records(records, "a")
            .into_iter()
            .map(|r| r.article)
            .collect();
        assert_eq!(kept, vec!["A1", "A2"]);
    }

    #[test]
    fn test_numeric_sort() {
        let mut records = vec![
            record("a", Some("10.5")),
            record("b", Some("2.5")),
            record("c", None),
            record("d", Some("9")),
        ];
        sort_records(&mut records, Column::CrimpHeight, false);
        let order: Vec<_> = records.iter().map(|r| r.article.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_descending_sort_keeps_ties_stable() {
        let mut records = vec![
            record("x", Some("1")),
            record("y", Some("2")),
            record("z", Some("1")),
        ];
        sort_records(&mut records, Column::CrimpHeight, true);
        let order: Vec<_> = records.iter().map(|r| r.article.as_str()).collect();
        assert_eq!(order, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let mut records = vec![record("beta", None), record("Alpha", None), record("gamma", None)];
        sort_records(&mut records, Column::Article, false);
        let order: Vec<_> = records.iter().map(|r| r.article.as_str()).collect();
        assert_eq!(order, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_looks_numeric() {
        assert!(looks_numeric("12"));
        assert!(looks_numeric("1.5"));
        assert!(looks_numeric(".5"));
        assert!(!looks_numeric("1.2.3"));
        assert!(!looks_numeric("-1"));
        assert!(!looks_numeric("."));
        assert!(!looks_numeric("---"));
    }
}
