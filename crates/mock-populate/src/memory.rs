//! In-memory record store.
//!
//! Backs dry runs and tests. It mirrors the parts of the MySQL behaviour the
//! populator relies on: tables must exist before inserts, current-state
//! tables reject duplicate groupIDs, inserts inside a transaction stay
//! invisible to [`MemoryStore::rows`] until commit but are visible to the
//! session's own key scans.

use crate::store::RecordStore;
use crate::table::TargetTable;
use async_trait::async_trait;
use mock_generator::{GroupId, MockRecord};
use std::collections::{BTreeMap, HashSet};

/// Errors raised by [`MemoryStore`].
#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("Table '{0}' doesn't exist")]
    TableMissing(TargetTable),

    #[error("Duplicate entry '{group_id}' for key '{table}.PRIMARY'")]
    DuplicateKey { table: TargetTable, group_id: GroupId },

    #[error("Insert statement limit of {0} reached")]
    InsertLimit(u64),

    #[error("Store has been released")]
    Released,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: BTreeMap<TargetTable, Vec<MockRecord>>,
    pending: BTreeMap<TargetTable, Vec<MockRecord>>,
    /// groupIDs of committed and pending rows, per current-state table.
    keys: BTreeMap<TargetTable, HashSet<GroupId>>,
    in_transaction: bool,
    commit_count: u64,
    insert_statements: u64,
    insert_limit: Option<u64>,
    released: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `table` and store `records` as already committed rows.
    pub fn preload(&mut self, table: TargetTable, records: Vec<MockRecord>) {
        if !table.is_history() {
            self.keys
                .entry(table)
                .or_default()
                .extend(records.iter().map(|r| r.group_id));
        }
        self.committed.entry(table).or_default().extend(records);
    }

    /// Fail every insert statement after the first `limit`.
    pub fn fail_inserts_after(mut self, limit: u64) -> Self {
        self.insert_limit = Some(limit);
        self
    }

    /// Committed rows of `table`.
    pub fn rows(&self, table: TargetTable) -> &[MockRecord] {
        self.committed.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_table(&self, table: TargetTable) -> bool {
        self.committed.contains_key(&table)
    }

    pub fn table_count(&self) -> usize {
        self.committed.len()
    }

    pub fn commit_count(&self) -> u64 {
        self.commit_count
    }

    pub fn insert_statements(&self) -> u64 {
        self.insert_statements
    }

    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn check_open(&self) -> Result<(), MemoryStoreError> {
        if self.released {
            return Err(MemoryStoreError::Released);
        }
        Ok(())
    }

    fn visible(&self, table: TargetTable) -> impl Iterator<Item = &MockRecord> {
        self.rows(table)
            .iter()
            .chain(self.pending.get(&table).into_iter().flatten())
    }

    fn discard_pending(&mut self) {
        self.pending.clear();
        self.in_transaction = false;
        self.keys = self
            .committed
            .iter()
            .filter(|(table, _)| !table.is_history())
            .map(|(table, rows)| (*table, rows.iter().map(|r| r.group_id).collect()))
            .collect();
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn ensure_table(&mut self, table: TargetTable) -> Result<(), Self::Error> {
        self.check_open()?;
        self.committed.entry(table).or_default();
        Ok(())
    }

    async fn existing_group_ids(&mut self, table: TargetTable) -> Result<Vec<GroupId>, Self::Error> {
        self.check_open()?;
        if !self.has_table(table) {
            return Err(MemoryStoreError::TableMissing(table));
        }
        Ok(self.visible(table).map(|r| r.group_id).collect())
    }

    async fn row_count(&mut self, table: TargetTable) -> Result<u64, Self::Error> {
        self.check_open()?;
        if !self.has_table(table) {
            return Err(MemoryStoreError::TableMissing(table));
        }
        Ok(self.visible(table).count() as u64)
    }

    async fn begin(&mut self) -> Result<(), Self::Error> {
        self.check_open()?;
        self.in_transaction = true;
        Ok(())
    }

    async fn insert_records(
        &mut self,
        table: TargetTable,
        records: &[MockRecord],
    ) -> Result<u64, Self::Error> {
        self.check_open()?;
        if !self.has_table(table) {
            return Err(MemoryStoreError::TableMissing(table));
        }
        if let Some(limit) = self.insert_limit {
            if self.insert_statements >= limit {
                return Err(MemoryStoreError::InsertLimit(limit));
            }
        }

        if !table.is_history() {
            // A multi-row statement is all or nothing.
            let keys = self.keys.entry(table).or_default();
            let mut statement_keys = HashSet::with_capacity(records.len());
            for record in records {
                if keys.contains(&record.group_id) || !statement_keys.insert(record.group_id) {
                    return Err(MemoryStoreError::DuplicateKey {
                        table,
                        group_id: record.group_id,
                    });
                }
            }
            keys.extend(statement_keys);
        }

        let target = if self.in_transaction {
            self.pending.entry(table).or_default()
        } else {
            self.committed.entry(table).or_default()
        };
        target.extend_from_slice(records);
        self.insert_statements += 1;

        Ok(records.len() as u64)
    }

    async fn commit(&mut self) -> Result<(), Self::Error> {
        self.check_open()?;
        for (table, rows) in std::mem::take(&mut self.pending) {
            self.committed.entry(table).or_default().extend(rows);
        }
        self.in_transaction = false;
        self.commit_count += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), Self::Error> {
        self.check_open()?;
        self.discard_pending();
        Ok(())
    }

    async fn release(&mut self) -> Result<(), Self::Error> {
        self.discard_pending();
        self.released = true;
        Ok(())
    }
}
