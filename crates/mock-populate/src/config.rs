//! Run configuration.

use crate::error::PopulateError;
use crate::table::{TargetTable, RECORD_COLUMNS};
use mock_generator::{GroupId, GroupIdDomain, KeyStrategy, DEFAULT_MAX_ATTEMPTS};
use std::collections::HashSet;

/// Default number of rows generated per enabled table.
pub const DEFAULT_ROW_COUNT: u64 = 100_000;

/// Default number of records per INSERT statement.
pub const DEFAULT_BATCH_SIZE: usize = 1;

/// Placeholder limit of a single MySQL prepared statement.
pub const MAX_STATEMENT_PLACEHOLDERS: usize = 65_535;

/// Largest value the `groupID INT` column holds.
pub const MAX_GROUP_ID: GroupId = i32::MAX as GroupId;

/// Everything a population run needs besides the store.
#[derive(Debug, Clone)]
pub struct PopulateConfig {
    /// Tables that receive rows, in the order they are populated.
    pub enabled_targets: Vec<TargetTable>,
    /// Rows generated per enabled table.
    pub row_count: u64,
    /// Records per INSERT statement.
    pub batch_size: usize,
    /// Seed for reproducible runs; OS entropy when `None`.
    pub seed: Option<u64>,
    pub key_strategy: KeyStrategy,
    /// Draw limit per key for rejection sampling.
    pub max_attempts: u32,
    pub domain: GroupIdDomain,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            enabled_targets: TargetTable::DEFAULT_ENABLED.to_vec(),
            row_count: DEFAULT_ROW_COUNT,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            key_strategy: KeyStrategy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            domain: GroupIdDomain::default(),
        }
    }
}

impl PopulateConfig {
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = TargetTable>) -> Self {
        self.enabled_targets = targets.into_iter().collect();
        self
    }

    pub fn with_row_count(mut self, row_count: u64) -> Self {
        self.row_count = row_count;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_domain(mut self, domain: GroupIdDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_key_strategy(mut self, key_strategy: KeyStrategy) -> Self {
        self.key_strategy = key_strategy;
        self
    }

    pub fn validate(&self) -> Result<(), PopulateError> {
        if self.batch_size == 0 {
            return Err(PopulateError::Config(
                "batch size must be at least 1".to_string(),
            ));
        }
        let max_batch_size = MAX_STATEMENT_PLACEHOLDERS / RECORD_COLUMNS.len();
        if self.batch_size > max_batch_size {
            return Err(PopulateError::Config(format!(
                "batch size {} exceeds {} rows per INSERT statement",
                self.batch_size, max_batch_size
            )));
        }
        if self.domain.max() > MAX_GROUP_ID {
            return Err(PopulateError::Config(format!(
                "max group ID {} exceeds the groupID column limit {}",
                self.domain.max(),
                MAX_GROUP_ID
            )));
        }
        if self.max_attempts == 0 {
            return Err(PopulateError::Config(
                "max attempts must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for table in &self.enabled_targets {
            if !seen.insert(*table) {
                return Err(PopulateError::Config(format!(
                    "table '{table}' is enabled more than once"
                )));
            }
        }
        Ok(())
    }
}
