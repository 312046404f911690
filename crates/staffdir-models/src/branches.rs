//! Branch directory models.
//!
//! The directory is the parsed `getInitialData` payload: one entry per branch
//! worksheet, each split into current and former staff.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::ids::RowIndex;
use crate::staff::StaffRecord;
use crate::tenure::{TenureClassification, classify};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    pub current_staff: Vec<StaffRecord>,
    pub former_staff: Vec<StaffRecord>,
}

impl Branch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_staff: Vec::new(),
            former_staff: Vec::new(),
        }
    }

    /// Current staff followed by former staff.
    pub fn all_staff(&self) -> impl Iterator<Item = &StaffRecord> {
        self.current_staff.iter().chain(self.former_staff.iter())
    }

    pub fn staff_count(&self) -> usize {
        self.current_staff.len() + self.former_staff.len()
    }

    fn from_remote(value: &Value) -> Option<Self> {
        let name = value.get("branchName")?.as_str()?.trim();
        if name.is_empty() {
            return None;
        }
        let rows = |key: &str, is_former: bool| -> Vec<StaffRecord> {
            value
                .get(key)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_object)
                        .filter_map(|row| StaffRecord::from_remote(name, row, is_former))
                        .collect()
                })
                .unwrap_or_default()
        };
        Some(Self {
            name: name.to_string(),
            current_staff: rows("currentStaff", false),
            former_staff: rows("formerStaff", true),
        })
    }
}

/// A staff record that matched a search, with the classification used to
/// match it.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub staff: &'a StaffRecord,
    pub tenure: TenureClassification,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchDirectory {
    pub branches: Vec<Branch>,
}

impl BranchDirectory {
    /// Parses the `data` array of a `getInitialData` reply.
    ///
    /// Entries without a branch name and rows without a row index are skipped.
    /// Anything other than an array yields an empty directory.
    pub fn from_remote(data: &Value) -> Self {
        let branches = data
            .as_array()
            .map(|items| items.iter().filter_map(Branch::from_remote).collect())
            .unwrap_or_default();
        Self { branches }
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn branch_names(&self) -> Vec<&str> {
        self.branches.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn find_branch(&self, name: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.name == name)
    }

    pub fn find_staff(&self, branch: &str, row: RowIndex) -> Option<&StaffRecord> {
        self.find_branch(branch)?
            .all_staff()
            .find(|s| s.row_index == row)
    }

    /// Whether the row sits in the branch's former-staff list.
    pub fn is_former(&self, branch: &str, row: RowIndex) -> bool {
        self.find_branch(branch)
            .map(|b| b.former_staff.iter().any(|s| s.row_index == row))
            .unwrap_or(false)
    }

    /// Whether a branch section should show its former-staff grid. Admins
    /// always see it so they can move people back.
    pub fn shows_former_section(&self, branch: &str, is_admin: bool) -> bool {
        is_admin
            || self
                .find_branch(branch)
                .map(|b| !b.former_staff.is_empty())
                .unwrap_or(false)
    }

    /// Staff in `branch` whose name, designation or tenure text contains
    /// `term`, ignoring case. A blank term matches everyone.
    pub fn search(&self, branch: &str, term: &str, now: NaiveDate) -> Vec<SearchHit<'_>> {
        let Some(branch) = self.find_branch(branch) else {
            return Vec::new();
        };
        let needle = term.trim().to_lowercase();

        branch
            .all_staff()
            .filter_map(|staff| {
                let tenure = classify(staff, now);
                matches_term(staff, &tenure, &needle).then_some(SearchHit { staff, tenure })
            })
            .collect()
    }
}

fn matches_term(staff: &StaffRecord, tenure: &TenureClassification, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(staff.full_name())
        || contains(staff.designation())
        || tenure.elapsed_text().is_some_and(|text| contains(&text))
}
