//! Common CLI argument definitions shared by all populators.

use crate::config::PopulateConfig;
use crate::error::PopulateError;
use crate::table::TargetTable;
use clap::{Args, ValueEnum};
use mock_generator::{GroupIdDomain, KeyStrategy, DEFAULT_MIN_GROUP_ID};

/// Key allocation strategy as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyStrategyArg {
    /// Rejection sampling while the key domain is at most half full, shuffle beyond that
    Auto,
    /// Draw and redraw on collision, bounded by --max-attempts
    Rejection,
    /// Shuffle the remaining free keys
    Shuffle,
}

impl From<KeyStrategyArg> for KeyStrategy {
    fn from(arg: KeyStrategyArg) -> Self {
        match arg {
            KeyStrategyArg::Auto => KeyStrategy::Auto,
            KeyStrategyArg::Rejection => KeyStrategy::Rejection,
            KeyStrategyArg::Shuffle => KeyStrategy::Shuffle,
        }
    }
}

/// Common arguments shared by all populators.
#[derive(Args, Clone, Debug)]
pub struct CommonPopulateArgs {
    /// Number of rows to generate per enabled table
    #[arg(long, default_value_t = crate::config::DEFAULT_ROW_COUNT)]
    pub row_count: u64,

    /// Tables to populate (comma-separated)
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = TargetTable::DEFAULT_ENABLED.to_vec()
    )]
    pub tables: Vec<TargetTable>,

    /// Rows per INSERT statement
    #[arg(long, default_value_t = crate::config::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Random seed for reproducible generation (same seed = same data)
    #[arg(long, env = "MOCK_DATA_SEED")]
    pub seed: Option<u64>,

    /// How unique group IDs are picked
    #[arg(long, value_enum, default_value_t = KeyStrategyArg::Auto)]
    pub key_strategy: KeyStrategyArg,

    /// Draws per key before rejection sampling gives up
    #[arg(long, default_value_t = mock_generator::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Largest group ID that may be generated
    #[arg(long, default_value_t = mock_generator::DEFAULT_MAX_GROUP_ID)]
    pub max_group_id: u32,

    /// Dry-run mode: generate into an in-memory store without touching the database
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonPopulateArgs {
    /// Build and validate the run configuration.
    pub fn to_config(&self) -> Result<PopulateConfig, PopulateError> {
        let domain = GroupIdDomain::new(DEFAULT_MIN_GROUP_ID, self.max_group_id)
            .map_err(|e| PopulateError::Config(e.to_string()))?;

        let config = PopulateConfig {
            enabled_targets: self.tables.clone(),
            row_count: self.row_count,
            batch_size: self.batch_size,
            seed: self.seed,
            key_strategy: self.key_strategy.into(),
            max_attempts: self.max_attempts,
            domain,
        };
        config.validate()?;
        Ok(config)
    }
}
