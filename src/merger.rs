//! Record Merger
//!
//! Coalesces measurement lines that share a logical identity into one
//! [`MeasurementRecord`]. Crimp and pull lines for the same wire/terminal pair in
//! the same session may arrive in either order; whichever arrives second only adds
//! its own fields, so the merged row does not depend on arrival order.
//!
//! Wire-length lines are keyed with a fixed terminal placeholder and therefore never
//! collide with per-terminal crimp/pull rows.

use crate::models::{MeasurementRecord, LENGTH_TERMINAL};
use crate::scanner::{LogContext, Measurement};
use std::collections::HashMap;

/// Terminal component used in the identity key of wire-length records.
pub const LENGTH_KEY_TERMINAL: &str = "LEN";

/// Merge identity: `(date, article, wire, terminal-or-LEN, timestamp)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub date: String,
    pub article: String,
    pub wire: String,
    pub terminal: String,
    pub timestamp: String,
}

impl IdentityKey {
    pub fn for_measurement(date: &str, context: &LogContext, measurement: &Measurement) -> Self {
        let terminal = match measurement {
            Measurement::Crimp { terminal, .. } | Measurement::Pull { terminal, .. } => {
                terminal.clone()
            }
            Measurement::Length { .. } => LENGTH_KEY_TERMINAL.to_string(),
        };

        Self {
            date: date.to_string(),
            article: context.article_key.clone(),
            wire: measurement.wire().to_string(),
            terminal,
            timestamp: context.timestamp.clone(),
        }
    }
}

/// Insertion-ordered map from identity to record.
#[derive(Debug, Default)]
pub struct MergeMap {
    index: HashMap<IdentityKey, usize>,
    records: Vec<MeasurementRecord>,
}

impl MergeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&MeasurementRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, key: &IdentityKey) -> Option<&mut MeasurementRecord> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.records[i]),
            None => None,
        }
    }

    /// Insert or replace the record at `key`. A replaced record keeps its position.
    pub fn insert(&mut self, key: IdentityKey, record: MeasurementRecord) {
        match self.index.get(&key) {
            Some(&i) => self.records[i] = record,
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Records in order of first key sighting.
    pub fn into_values(self) -> Vec<MeasurementRecord> {
        self.records
    }
}

/// Builds merged records for one file.
#[derive(Debug)]
pub struct RecordMerger {
    date: String,
    map: MergeMap,
}

impl RecordMerger {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            map: MergeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Fold one measurement into the map under the given scanning context.
    pub fn upsert(&mut self, measurement: Measurement, context: &LogContext) {
        let key = IdentityKey::for_measurement(&self.date, context, &measurement);

        match measurement {
            Measurement::Crimp {
                wire,
                terminal,
                status,
                height,
            } => {
                if let Some(existing) = self.map.get_mut(&key) {
                    existing.crimp_height = Some(height);
                    existing.crimp_status = Some(status);
                } else {
                    let mut record = self.fresh_record(context, wire, terminal);
                    record.crimp_height = Some(height);
                    record.crimp_status = Some(status);
                    self.map.insert(key, record);
                }
            }
            Measurement::Pull {
                wire,
                terminal,
                status,
                force,
            } => {
                if let Some(existing) = self.map.get_mut(&key) {
                    existing.pull_force = Some(force);
                    existing.pull_status = Some(status);
                } else {
                    let mut record = self.fresh_record(context, wire, terminal);
                    record.pull_force = Some(force);
                    record.pull_status = Some(status);
                    self.map.insert(key, record);
                }
            }
            Measurement::Length {
                wire,
                status,
                value,
            } => {
                let mut record = self.fresh_record(context, wire, LENGTH_TERMINAL.to_string());
                record.length_value = Some(value);
                record.length_status = Some(status);
                self.map.insert(key, record);
            }
        }
    }

    /// Hand the finished records to the caller in first-insertion order.
    pub fn into_records(self) -> Vec<MeasurementRecord> {
        self.map.into_values()
    }

    fn fresh_record(&self, context: &LogContext, wire: String, terminal: String) -> MeasurementRecord {
        MeasurementRecord::new(
            self.date.clone(),
            context.timestamp.clone(),
            context.user_name.clone(),
            context.article_key.clone(),
            wire,
            terminal,
        )
    }
}
