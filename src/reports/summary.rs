use crate::models::MeasurementRecord;
use serde::Serialize;
use std::collections::HashMap;

/// How many articles the failure ranking keeps.
pub const TOP_FAILING_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleFailures {
    pub article: String,
    pub failures: usize,
}

/// Aggregate quality figures over a set of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub failures: usize,
    pub yield_pct: f64,
    pub top_failing_articles: Vec<ArticleFailures>,
}

impl Summary {
    pub fn from_records(records: &[MeasurementRecord]) -> Self {
        let total = records.len();
        let failed: Vec<&MeasurementRecord> = records.iter().filter(|r| r.has_failure()).collect();
        let failures = failed.len();
        let yield_pct = if total > 0 {
            (total - failures) as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            failures,
            yield_pct,
            top_failing_articles: rank_articles(&failed),
        }
    }

    pub fn passed(&self) -> usize {
        self.total - self.failures
    }
}

/// Count failures per article; ties keep the order in which articles first failed.
fn rank_articles(failed: &[&MeasurementRecord]) -> Vec<ArticleFailures> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for record in failed {
        let count = counts.entry(record.article.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(record.article.as_str());
        }
        *count += 1;
    }

    let mut ranked: Vec<ArticleFailures> = first_seen
        .into_iter()
        .map(|article| ArticleFailures {
            article: article.to_string(),
            failures: counts[article],
        })
        .collect();
    ranked.sort_by(|a, b| b.failures.cmp(&a.failures));
    ranked.truncate(TOP_FAILING_LIMIT);
    ranked
}
