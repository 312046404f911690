//! Admin capability evaluation.
//!
//! An authenticated admin session carries a [`PermissionSnapshot`]: a superadmin
//! flag, a map of capability rights and the set of branches the admin may touch.
//! The functions in this module answer "may this session do X (to branch Y)?"
//! and never fail: an absent or malformed snapshot simply denies.
//!
//! These checks are advisory. The remote service re-checks every mutation and
//! may reject an action the client believed was permitted.
//!
//! # Example
//!
//! ```
//! use staffdir_core::permissions::{Capability, PermissionSnapshot, can_perform};
//!
//! let snapshot = PermissionSnapshot::scoped(
//!     [(Capability::EditStaff, true)],
//!     ["Head Office"],
//! );
//!
//! assert!(can_perform(Some(&snapshot), Capability::EditStaff, "Head Office"));
//! assert!(!can_perform(Some(&snapshot), Capability::EditStaff, "Harbour Road"));
//! assert!(!can_perform(None, Capability::EditStaff, "Head Office"));
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_lenient_bool, deserialize_lenient_branches, deserialize_lenient_rights};

// =============================================================================
// Capability
// =============================================================================

/// A single permitted-action flag. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    AddBranch,
    DeleteBranch,
    RenameBranch,
    EditStaff,
    DeleteStaff,
    MoveStaff,
    UpdatePhotos,
    ManagePermissions,
    ManageAdmins,
}

impl Capability {
    /// Every capability, in wire order.
    pub const ALL: [Capability; 9] = [
        Capability::AddBranch,
        Capability::DeleteBranch,
        Capability::RenameBranch,
        Capability::EditStaff,
        Capability::DeleteStaff,
        Capability::MoveStaff,
        Capability::UpdatePhotos,
        Capability::ManagePermissions,
        Capability::ManageAdmins,
    ];

    /// The key used for this capability in the remote `rights` object.
    pub const fn as_str(self) -> &'static str {
        match self {
            Capability::AddBranch => "canAddBranch",
            Capability::DeleteBranch => "canDeleteBranch",
            Capability::RenameBranch => "canRenameBranch",
            Capability::EditStaff => "canEditStaff",
            Capability::DeleteStaff => "canDeleteStaff",
            Capability::MoveStaff => "canMoveStaff",
            Capability::UpdatePhotos => "canUpdatePhotos",
            Capability::ManagePermissions => "canManagePermissions",
            Capability::ManageAdmins => "canManageAdmins",
        }
    }

    /// Short human description, used in denial messages.
    pub const fn describe(self) -> &'static str {
        match self {
            Capability::AddBranch => "add branches",
            Capability::DeleteBranch => "delete branches",
            Capability::RenameBranch => "rename branches",
            Capability::EditStaff => "edit staff",
            Capability::DeleteStaff => "delete staff",
            Capability::MoveStaff => "move staff between branches",
            Capability::UpdatePhotos => "update staff photos",
            Capability::ManagePermissions => "manage admin permissions",
            Capability::ManageAdmins => "manage admin accounts",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCapability(pub String);

impl fmt::Display for UnknownCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown capability: {}", self.0)
    }
}

impl std::error::Error for UnknownCapability {}

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|cap| cap.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCapability(s.to_string()))
    }
}

impl Serialize for Capability {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// PermissionSnapshot
// =============================================================================

/// Immutable description of one admin session's rights and branch scope.
///
/// Deserialization is lenient: missing fields default to "nothing granted",
/// unknown right keys are kept but never consulted, and non-boolean right
/// values count as `false` unless they spell `"true"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSnapshot {
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    is_super_admin: bool,
    #[serde(default, deserialize_with = "deserialize_lenient_rights")]
    rights: HashMap<String, bool>,
    #[serde(default, deserialize_with = "deserialize_lenient_branches")]
    branches: BTreeSet<String>,
}

impl PermissionSnapshot {
    /// A superadmin snapshot. Grants everything.
    pub fn super_admin() -> Self {
        Self {
            is_super_admin: true,
            ..Self::default()
        }
    }

    /// A regular admin snapshot limited to the given rights and branches.
    pub fn scoped<R, B, S>(rights: R, branches: B) -> Self
    where
        R: IntoIterator<Item = (Capability, bool)>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_super_admin: false,
            rights: rights
                .into_iter()
                .map(|(cap, granted)| (cap.as_str().to_string(), granted))
                .collect(),
            branches: branches.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.is_super_admin
    }

    /// The raw right flag for `capability`, ignoring the superadmin flag.
    pub fn right(&self, capability: Capability) -> bool {
        self.rights
            .get(capability.as_str())
            .copied()
            .unwrap_or(false)
    }

    /// Branch names this snapshot is scoped to, ignoring the superadmin flag.
    pub fn branches(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(String::as_str)
    }

    /// Capabilities granted explicitly through `rights`.
    pub fn granted(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|cap| self.right(*cap))
            .collect()
    }
}

// =============================================================================
// Evaluator
// =============================================================================

/// Whether the session may use `capability` at all.
///
/// Denies when there is no session. A superadmin passes unconditionally.
pub fn has_capability(snapshot: Option<&PermissionSnapshot>, capability: Capability) -> bool {
    match snapshot {
        None => false,
        Some(s) if s.is_super_admin => true,
        Some(s) => s.right(capability),
    }
}

/// Whether the session is scoped to `branch_name`.
pub fn has_branch_access(snapshot: Option<&PermissionSnapshot>, branch_name: &str) -> bool {
    match snapshot {
        None => false,
        Some(s) if s.is_super_admin => true,
        Some(s) => s.branches.contains(branch_name),
    }
}

/// Whether the session may use `capability` on `branch_name`.
pub fn can_perform(
    snapshot: Option<&PermissionSnapshot>,
    capability: Capability,
    branch_name: &str,
) -> bool {
    has_capability(snapshot, capability) && has_branch_access(snapshot, branch_name)
}
