//! Mock record populator and run driver.

use crate::config::PopulateConfig;
use crate::error::PopulateError;
use crate::store::RecordStore;
use crate::table::TargetTable;
use mock_generator::{GroupIdAllocator, MockRecord, MockRecordGenerator};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Metrics from populating one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
    pub table: TargetTable,
    /// Rows present before this run touched the table.
    pub existing_rows: u64,
    pub rows_inserted: u64,
    /// Number of INSERT statements issued.
    pub statement_count: u64,
    pub duration: Duration,
}

impl TableReport {
    fn new(table: TargetTable, existing_rows: u64) -> Self {
        Self {
            table,
            existing_rows,
            rows_inserted: 0,
            statement_count: 0,
            duration: Duration::ZERO,
        }
    }

    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Metrics from a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub tables: Vec<TableReport>,
    pub total_duration: Duration,
}

impl RunReport {
    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_inserted).sum()
    }

    pub fn table(&self, table: TargetTable) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == table)
    }
}

/// Drives one store through schema setup, generation, insertion and commit.
pub struct MockPopulator<'a, S: RecordStore> {
    store: &'a mut S,
    generator: MockRecordGenerator,
    config: PopulateConfig,
}

impl<'a, S: RecordStore> MockPopulator<'a, S> {
    pub fn new(store: &'a mut S, config: PopulateConfig) -> Self {
        let generator = MockRecordGenerator::new(config.seed);
        Self {
            store,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &PopulateConfig {
        &self.config
    }

    /// Create all four target tables if missing.
    pub async fn initialize_schema(&mut self) -> Result<(), PopulateError> {
        for table in TargetTable::ALL {
            debug!("Ensuring table '{}' exists", table);
            self.store
                .ensure_table(table)
                .await
                .map_err(PopulateError::store)?;
        }
        info!("Schema ready ({} tables)", TargetTable::ALL.len());
        Ok(())
    }

    /// Scan the keys already present in `table` and seed an allocator with them.
    pub async fn load_existing_keys(
        &mut self,
        table: TargetTable,
    ) -> Result<GroupIdAllocator, PopulateError> {
        let existing = self
            .store
            .existing_group_ids(table)
            .await
            .map_err(PopulateError::store)?;
        debug!("Loaded {} existing group IDs from '{}'", existing.len(), table);

        Ok(GroupIdAllocator::new(self.config.domain, existing)
            .with_strategy(self.config.key_strategy)
            .with_max_attempts(self.config.max_attempts))
    }

    /// Insert `count` fresh records into `table`.
    ///
    /// All group IDs for the table are reserved before the first insert, so a
    /// domain that cannot hold `count` more keys fails without writing anything.
    pub async fn populate_table(
        &mut self,
        table: TargetTable,
        count: u64,
    ) -> Result<TableReport, PopulateError> {
        let start_time = Instant::now();

        let existing_rows = self
            .store
            .row_count(table)
            .await
            .map_err(PopulateError::store)?;
        let mut allocator = self.load_existing_keys(table).await?;

        info!(
            "Inserting {} rows into '{}' ({} existing rows, {} free keys, batch size: {})",
            count,
            table,
            existing_rows,
            allocator.available(),
            self.config.batch_size
        );

        let keys = self.generator.reserve_keys(&mut allocator, count)?;

        let mut report = TableReport::new(table, existing_rows);
        let progress_step = (count / 10).max(1);

        for chunk in keys.chunks(self.config.batch_size) {
            let records: Vec<MockRecord> = chunk
                .iter()
                .map(|id| self.generator.record_for(*id))
                .collect();

            let inserted = self
                .store
                .insert_records(table, &records)
                .await
                .map_err(PopulateError::store)?;

            let before = report.rows_inserted;
            report.rows_inserted += inserted;
            report.statement_count += 1;

            if report.rows_inserted / progress_step > before / progress_step {
                info!("{}: {}/{} rows", table, report.rows_inserted, count);
            }
        }

        report.duration = start_time.elapsed();
        info!(
            "Populated '{}': {} rows in {:?} ({:.2} rows/sec)",
            table,
            report.rows_inserted,
            report.duration,
            report.rows_per_second()
        );

        Ok(report)
    }

    /// Schema setup, then every enabled table, then a single commit.
    pub async fn run(&mut self) -> Result<RunReport, PopulateError> {
        let start_time = Instant::now();

        self.initialize_schema().await?;
        self.store.begin().await.map_err(PopulateError::store)?;

        let mut report = RunReport::default();
        let targets = self.config.enabled_targets.clone();
        for table in targets {
            let table_report = self.populate_table(table, self.config.row_count).await?;
            report.tables.push(table_report);
        }

        self.store.commit().await.map_err(PopulateError::store)?;
        report.total_duration = start_time.elapsed();

        info!(
            "Mock data created: {} rows across {} tables in {:?}",
            report.total_rows(),
            report.tables.len(),
            report.total_duration
        );
        Ok(report)
    }
}

/// Run a full population against `store`.
///
/// On failure the open transaction is rolled back. The store is released on
/// every path; a release error is only reported when the run itself succeeded.
pub async fn run_session<S: RecordStore>(
    store: &mut S,
    config: PopulateConfig,
) -> Result<RunReport, PopulateError> {
    let outcome = match config.validate() {
        Ok(()) => MockPopulator::new(store, config).run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = &outcome {
        error!("Population failed, rolling back: {}", e);
        if let Err(rollback_err) = store.rollback().await {
            warn!("Rollback failed: {}", rollback_err);
        }
    }

    finish_session(store, outcome).await
}

/// Create the target tables and release the store.
pub async fn init_schema_session<S: RecordStore>(store: &mut S) -> Result<(), PopulateError> {
    let outcome = MockPopulator::new(store, PopulateConfig::default())
        .initialize_schema()
        .await;
    finish_session(store, outcome).await
}

async fn finish_session<S: RecordStore, T>(
    store: &mut S,
    outcome: Result<T, PopulateError>,
) -> Result<T, PopulateError> {
    let released = store.release().await;
    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(PopulateError::store(e)),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(release_err)) => {
            warn!("Releasing store failed: {}", release_err);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_table_report_rate() {
        let report = TableReport {
            table: TargetTable::Agd,
            existing_rows: 0,
            rows_inserted: 1000,
            statement_count: 1000,
            duration: Duration::from_secs(10),
        };
        assert_eq!(report.rows_per_second(), 100.0);
    }

    #[tokio::test]
    async fn test_initialize_schema_creates_all_tables() {
        let mut store = MemoryStore::new();
        let mut populator = MockPopulator::new(&mut store, PopulateConfig::default());
        populator.initialize_schema().await.unwrap();
        populator.initialize_schema().await.unwrap();

        assert_eq!(store.table_count(), 4);
        for table in TargetTable::ALL {
            assert!(store.has_table(table));
        }
    }

    #[tokio::test]
    async fn test_populate_table_batches_statements() {
        let mut store = MemoryStore::new();
        let config = PopulateConfig::default().with_batch_size(4).with_seed(42);
        let mut populator = MockPopulator::new(&mut store, config);
        populator.initialize_schema().await.unwrap();

        let report = populator.populate_table(TargetTable::Gel, 10).await.unwrap();
        assert_eq!(report.rows_inserted, 10);
        assert_eq!(report.statement_count, 3);
        assert_eq!(store.insert_statements(), 3);
    }

    #[tokio::test]
    async fn test_populate_zero_rows() {
        let mut store = MemoryStore::new();
        let mut populator = MockPopulator::new(&mut store, PopulateConfig::default());
        populator.initialize_schema().await.unwrap();

        let report = populator.populate_table(TargetTable::Agd, 0).await.unwrap();
        assert_eq!(report.rows_inserted, 0);
        assert_eq!(report.statement_count, 0);
    }

    #[tokio::test]
    async fn test_invalid_config_still_releases() {
        let mut store = MemoryStore::new();
        let config = PopulateConfig::default().with_batch_size(0);

        let result = run_session(&mut store, config).await;
        assert!(matches!(result, Err(PopulateError::Config(_))));
        assert!(store.is_released());
        assert_eq!(store.table_count(), 0);
    }

    #[tokio::test]
    async fn test_init_schema_session() {
        let mut store = MemoryStore::new();
        init_schema_session(&mut store).await.unwrap();
        assert_eq!(store.table_count(), 4);
        assert!(store.is_released());
        assert_eq!(store.commit_count(), 0);
    }
}
