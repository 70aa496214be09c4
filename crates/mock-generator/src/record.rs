//! The mock record shape shared by all four target tables.

use serde::{Serialize, Serializer};
use std::fmt;

/// Primary key of a mock record.
pub type GroupId = u32;

/// Length of a generated program name.
pub const PROGRAM_NAME_LEN: usize = 6;

/// Alphabet program names are drawn from.
pub const PROGRAM_NAME_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Single-character record status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// `F`
    Failed,
    /// `T`
    Terminated,
    /// `I`
    Inactive,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Failed, Status::Terminated, Status::Inactive];

    pub fn as_char(self) -> char {
        match self {
            Status::Failed => 'F',
            Status::Terminated => 'T',
            Status::Inactive => 'I',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_char() == c)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.as_char())
    }
}

/// Carrier a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Carrier {
    Carrier1,
    Carrier2,
    Carrier3,
}

impl Carrier {
    pub const ALL: [Carrier; 3] = [Carrier::Carrier1, Carrier::Carrier2, Carrier::Carrier3];

    pub fn as_str(self) -> &'static str {
        match self {
            Carrier::Carrier1 => "carrier1",
            Carrier::Carrier2 => "carrier2",
            Carrier::Carrier3 => "carrier3",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A six character `[A-Z0-9]` program name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProgramName(String);

impl ProgramName {
    /// Validate and wrap a program name.
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == PROGRAM_NAME_LEN
            && s.bytes().all(|b| PROGRAM_NAME_ALPHABET.contains(&b));
        valid.then(|| ProgramName(s.to_string()))
    }

    /// Wrap a string already produced from [`PROGRAM_NAME_ALPHABET`].
    pub(crate) fn from_generated(s: String) -> Self {
        debug_assert!(Self::parse(&s).is_some());
        ProgramName(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProgramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One generated row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockRecord {
    #[serde(rename = "groupID")]
    pub group_id: GroupId,
    pub status: Status,
    #[serde(rename = "programName")]
    pub program_name: ProgramName,
    pub carrier: Carrier,
}
