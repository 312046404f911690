//! Staff records as delivered by the spreadsheet service.
//!
//! Each staff row arrives as a JSON object keyed by the worksheet's header
//! cells. Header spelling drifts between worksheets (stray spaces, curly
//! apostrophes in "Father's Name"), so keys are normalised once here and the
//! rest of the code only ever sees the canonical names in [`headers`].

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use staffdir_core::serde::value_as_text;

use crate::ids::RowIndex;

/// Canonical header names.
pub mod headers {
    pub const FULL_NAME: &str = "Full Name";
    pub const DESIGNATION: &str = "Designation";
    pub const MOBILE: &str = "Mobile";
    pub const CURRENT_ADDRESS: &str = "Current Address";
    pub const FATHERS_NAME: &str = "Father's Name";
    pub const JOINING_DATE: &str = "Joining Date";
    pub const INCREMENT_DATE: &str = "Increment Date";
    pub const PHOTO_URL: &str = "Photo URL";

    /// Keys in a row object that carry record metadata rather than cells.
    pub const ROW_INDEX_KEY: &str = "rowIndex";
}

const APOSTROPHE_VARIANTS: [char; 5] = ['\u{2019}', '\u{2018}', '\u{02BC}', '`', '\u{00B4}'];

/// Folds a header cell to its canonical spelling.
///
/// Trims, collapses internal whitespace and replaces apostrophe look-alikes
/// with `'`.
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .map(|c| if APOSTROPHE_VARIANTS.contains(&c) { '\'' } else { c })
        .collect()
}

/// One staff member in one branch worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    pub branch: String,
    pub row_index: RowIndex,
    pub is_former: bool,
    pub fields: BTreeMap<String, String>,
}

impl StaffRecord {
    pub fn new(branch: impl Into<String>, row_index: RowIndex, is_former: bool) -> Self {
        Self {
            branch: branch.into(),
            row_index,
            is_former,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style setter; the header is normalised.
    pub fn with_field(mut self, header: &str, value: impl Into<String>) -> Self {
        self.fields.insert(normalize_header(header), value.into());
        self
    }

    /// Builds a record from one row object of the `getInitialData` payload.
    ///
    /// Returns `None` when the row has no usable `rowIndex`. Scalars are
    /// stringified; nested values are dropped. If two raw headers normalise to
    /// the same name, the first non-blank value wins.
    pub fn from_remote(branch: &str, row: &Map<String, Value>, is_former: bool) -> Option<Self> {
        let row_index: RowIndex =
            serde_json::from_value(row.get(headers::ROW_INDEX_KEY)?.clone()).ok()?;

        let mut record = Self::new(branch, row_index, is_former);
        for (raw_key, value) in row {
            if raw_key == headers::ROW_INDEX_KEY {
                continue;
            }
            let Some(text) = value_as_text(value) else {
                continue;
            };
            let key = normalize_header(raw_key);
            if key.is_empty() {
                continue;
            }
            let slot = record.fields.entry(key).or_default();
            if slot.trim().is_empty() {
                *slot = text;
            }
        }
        Some(record)
    }

    /// The trimmed value of `header`, or `""`.
    pub fn field(&self, header: &str) -> &str {
        self.fields.get(header).map(|s| s.trim()).unwrap_or("")
    }

    pub fn full_name(&self) -> &str {
        self.field(headers::FULL_NAME)
    }

    pub fn designation(&self) -> &str {
        self.field(headers::DESIGNATION)
    }

    pub fn mobile(&self) -> &str {
        self.field(headers::MOBILE)
    }

    pub fn current_address(&self) -> &str {
        self.field(headers::CURRENT_ADDRESS)
    }

    pub fn fathers_name(&self) -> &str {
        self.field(headers::FATHERS_NAME)
    }

    pub fn joining_date(&self) -> &str {
        self.field(headers::JOINING_DATE)
    }

    pub fn increment_date(&self) -> &str {
        self.field(headers::INCREMENT_DATE)
    }

    /// The photo reference, or `fallback` when it is blank.
    pub fn photo_url_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.field(headers::PHOTO_URL) {
            "" => fallback,
            url => url,
        }
    }
}
