//! Row identifiers for spreadsheet-backed records.
//!
//! Staff rows are addressed by `(branch, row index)`. The index is the row
//! number in the branch worksheet; it is only unique within that worksheet and
//! shifts when rows above it are deleted, so never hold one across a reload.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A worksheet row number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RowIndex(pub u32);

impl RowIndex {
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowIndex({})", self.0)
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RowIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl FromStr for RowIndex {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Accepts a number or a numeric string; the form fields send strings.
impl<'de> Deserialize<'de> for RowIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(RowIndex)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid row index: {n}"))),
            serde_json::Value::String(s) => s.parse().map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!("invalid row index: {other}"))),
        }
    }
}
