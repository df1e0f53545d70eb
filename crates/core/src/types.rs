//! Shared scalar types used across the workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// All record primary keys are integers.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier of a record inside a normalized collection.
///
/// Typed records use integer keys, but untyped rows may carry string ids.
/// Serializes as its native JSON type (number or string), which also makes it
/// usable as a JSON object key.
///
/// `UInt` only holds values above `i64::MAX`; smaller unsigned ids are `Int`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    UInt(u64),
    Str(String),
}

impl RecordId {
    /// The form used as a `byId` key.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{id}"),
            RecordId::UInt(id) => write!(f, "{id}"),
            RecordId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        match i64::try_from(id) {
            Ok(small) => RecordId::Int(small),
            Err(_) => RecordId::UInt(id),
        }
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Str(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Str(id.to_string())
    }
}
