//! The four target tables and their column layout.

use clap::ValueEnum;
use std::fmt;

/// Columns shared by every target table, in insert order.
pub const RECORD_COLUMNS: [&str; 4] = ["groupID", "status", "programName", "carrier"];

/// Auto-increment surrogate key carried by history tables.
pub const SURROGATE_KEY_COLUMN: &str = "id";

/// A table this program populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum TargetTable {
    /// Current state, keyed by groupID
    Agd,
    /// History of `agd`
    Agdh,
    /// Current state, keyed by groupID
    Gel,
    /// History of `gel`
    Gelh,
}

impl TargetTable {
    pub const ALL: [TargetTable; 4] = [
        TargetTable::Agd,
        TargetTable::Agdh,
        TargetTable::Gel,
        TargetTable::Gelh,
    ];

    /// Tables populated when nothing else is configured.
    pub const DEFAULT_ENABLED: [TargetTable; 2] = [TargetTable::Agd, TargetTable::Gel];

    pub fn name(self) -> &'static str {
        match self {
            TargetTable::Agd => "agd",
            TargetTable::Agdh => "agdh",
            TargetTable::Gel => "gel",
            TargetTable::Gelh => "gelh",
        }
    }

    /// History tables have a surrogate key and do not enforce groupID uniqueness.
    pub fn is_history(self) -> bool {
        matches!(self, TargetTable::Agdh | TargetTable::Gelh)
    }

    /// Primary key column of the table.
    pub fn primary_key(self) -> &'static str {
        if self.is_history() {
            SURROGATE_KEY_COLUMN
        } else {
            RECORD_COLUMNS[0]
        }
    }
}

impl fmt::Display for TargetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        let names: Vec<&str> = TargetTable::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["agd", "agdh", "gel", "gelh"]);
    }

    #[test]
    fn test_history_tables() {
        assert!(!TargetTable::Agd.is_history());
        assert!(TargetTable::Agdh.is_history());
        assert!(!TargetTable::Gel.is_history());
        assert!(TargetTable::Gelh.is_history());
        assert_eq!(TargetTable::Gel.primary_key(), "groupID");
        assert_eq!(TargetTable::Gelh.primary_key(), "id");
    }

    #[test]
    fn test_value_enum_parsing() {
        assert_eq!(
            TargetTable::from_str("agdh", false).unwrap(),
            TargetTable::Agdh
        );
        assert!(TargetTable::from_str("table1", false).is_err());
    }
}
