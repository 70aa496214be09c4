//! Main generator for producing mock records.

use crate::generators::{generate_carrier, generate_program_name, generate_status};
use crate::keys::{GroupIdAllocator, KeyError};
use crate::record::{GroupId, MockRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Key allocation failed
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Generator that produces mock records with unique group IDs.
///
/// With a fixed seed the generator is reproducible: the same seed, the same
/// existing keys and the same sequence of calls yield the same records.
pub struct MockRecordGenerator {
    rng: StdRng,
    seed: Option<u64>,
}

impl MockRecordGenerator {
    /// Create a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Create a deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Seeded when `seed` is given, OS entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Reserve `count` fresh group IDs from the allocator.
    pub fn reserve_keys(
        &mut self,
        allocator: &mut GroupIdAllocator,
        count: u64,
    ) -> Result<Vec<GroupId>, GeneratorError> {
        Ok(allocator.reserve(&mut self.rng, count)?)
    }

    /// Fill in the remaining fields for an already reserved group ID.
    pub fn record_for(&mut self, group_id: GroupId) -> MockRecord {
        MockRecord {
            group_id,
            status: generate_status(&mut self.rng),
            program_name: generate_program_name(&mut self.rng),
            carrier: generate_carrier(&mut self.rng),
        }
    }

    /// Generate the next record, reserving a single key.
    pub fn next_record(
        &mut self,
        allocator: &mut GroupIdAllocator,
    ) -> Result<MockRecord, GeneratorError> {
        let group_id = self.reserve_keys(allocator, 1)?[0];
        Ok(self.record_for(group_id))
    }

    /// Generate `count` records. Keys are reserved up front, so either all
    /// records are produced or none are.
    pub fn records(
        &mut self,
        allocator: &mut GroupIdAllocator,
        count: u64,
    ) -> Result<Vec<MockRecord>, GeneratorError> {
        let keys = self.reserve_keys(allocator, count)?;
        Ok(keys.into_iter().map(|id| self.record_for(id)).collect())
    }
}
