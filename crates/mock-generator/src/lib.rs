//! Mock record generator for mock-data.
//!
//! This crate produces the synthetic rows written to the target tables. Each
//! record gets a group ID that is unique within its table, including keys that
//! were already present before the run, and independently drawn values for
//! the remaining fields.
//!
//! # Architecture
//!
//! ```text
//! existing keys (table scan)
//!        │
//!        ▼
//! ┌──────────────────┐      ┌─────────────────────┐
//! │ GroupIdAllocator │◄─────│ MockRecordGenerator │
//! │  - domain        │ keys │  - rng (StdRng)     │
//! │  - taken         │      │  - seed             │
//! │  - strategy      │      └──────────┬──────────┘
//! └──────────────────┘                 │
//!                                      ▼
//!                  MockRecord { group_id, status, program_name, carrier }
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_generator::{GroupIdAllocator, GroupIdDomain, MockRecordGenerator};
//!
//! let mut allocator = GroupIdAllocator::new(GroupIdDomain::default(), [1, 2, 3]);
//! let mut generator = MockRecordGenerator::with_seed(42);
//!
//! let records = generator.records(&mut allocator, 5).unwrap();
//! assert_eq!(records.len(), 5);
//! assert!(records.iter().all(|r| !matches!(r.group_id, 1..=3)));
//! ```

pub mod generator;
pub mod generators;
pub mod keys;
pub mod record;

// Re-exports for convenience
pub use generator::{GeneratorError, MockRecordGenerator};
pub use keys::{
    GroupIdAllocator, GroupIdDomain, KeyError, KeyStrategy, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_GROUP_ID, DEFAULT_MIN_GROUP_ID,
};
pub use record::{Carrier, GroupId, MockRecord, ProgramName, Status};
