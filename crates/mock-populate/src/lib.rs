//! Population of the mock target tables.
//!
//! This crate holds everything that is independent of the concrete database:
//! the target table catalogue, the [`RecordStore`] session trait, an
//! in-memory store for dry runs and tests, the run configuration and the
//! populator that sequences schema setup, key scans, inserts and the final
//! commit.
//!
//! # Example
//!
//! ```rust
//! use mock_populate::{run_session, MemoryStore, PopulateConfig, TargetTable};
//!
//! # tokio_test::block_on(async {
//! let mut store = MemoryStore::new();
//! let config = PopulateConfig::default().with_row_count(5).with_seed(42);
//!
//! let report = run_session(&mut store, config).await.unwrap();
//! assert_eq!(report.total_rows(), 10);
//! assert_eq!(store.rows(TargetTable::Agd).len(), 5);
//! # });
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod memory;
pub mod populator;
pub mod store;
pub mod table;

pub use args::{CommonPopulateArgs, KeyStrategyArg};
pub use config::{
    PopulateConfig, DEFAULT_BATCH_SIZE, DEFAULT_ROW_COUNT, MAX_GROUP_ID, MAX_STATEMENT_PLACEHOLDERS,
};
pub use error::PopulateError;
pub use memory::{MemoryStore, MemoryStoreError};
pub use populator::{init_schema_session, run_session, MockPopulator, RunReport, TableReport};
pub use store::RecordStore;
pub use table::{TargetTable, RECORD_COLUMNS, SURROGATE_KEY_COLUMN};
