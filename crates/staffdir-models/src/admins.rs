//! Admin account listings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use staffdir_core::permissions::PermissionSnapshot;

/// One row of the `getAdmins` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub email: String,
    #[serde(flatten)]
    pub permissions: PermissionSnapshot,
}

impl AdminSummary {
    /// Parses the reply's `data` array, skipping rows without an email.
    pub fn list_from_remote(data: &Value) -> Vec<Self> {
        data.as_array()
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| serde_json::from_value::<Self>(row.clone()).ok())
                    .filter(|admin| !admin.email.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
