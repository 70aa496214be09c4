//! The database session seam.
//!
//! A [`RecordStore`] is one exclusive session against the target database.
//! The populator drives it through schema setup, key scans, inserts and a
//! single commit; [`crate::run_session`] guarantees `rollback` on failure and
//! `release` on every exit path.

use crate::table::TargetTable;
use async_trait::async_trait;
use mock_generator::{GroupId, MockRecord};

#[async_trait]
pub trait RecordStore: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create the table if it does not exist yet.
    async fn ensure_table(&mut self, table: TargetTable) -> Result<(), Self::Error>;

    /// Every non-NULL groupID currently present in the table.
    async fn existing_group_ids(&mut self, table: TargetTable) -> Result<Vec<GroupId>, Self::Error>;

    /// Number of rows in the table.
    async fn row_count(&mut self, table: TargetTable) -> Result<u64, Self::Error>;

    /// Open the transaction the run's inserts belong to.
    async fn begin(&mut self) -> Result<(), Self::Error>;

    /// Insert `records` with a single statement. Returns the number of rows written.
    async fn insert_records(
        &mut self,
        table: TargetTable,
        records: &[MockRecord],
    ) -> Result<u64, Self::Error>;

    async fn commit(&mut self) -> Result<(), Self::Error>;

    /// Discard uncommitted inserts. A no-op when no transaction is open.
    async fn rollback(&mut self) -> Result<(), Self::Error>;

    /// Give the underlying connection back. The store is unusable afterwards.
    async fn release(&mut self) -> Result<(), Self::Error>;
}
