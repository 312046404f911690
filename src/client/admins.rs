use staffdir_core::errors::AppError;
use staffdir_core::permissions::Capability;
use staffdir_models::{AdminAccountDto, AdminRefDto, AdminSummary, UpdatePermissionsDto};

use super::{DirectoryClient, Gate, validate};
use crate::remote::{RemoteFunction, Transport};

impl<T: Transport> DirectoryClient<T> {
    pub fn list_admins(&self) -> Result<Vec<AdminSummary>, AppError> {
        let call = self.get(RemoteFunction::GetAdmins);
        let envelope = self.execute(Gate::Capability(Capability::ManageAdmins), call)?;
        Ok(envelope
            .data
            .as_ref()
            .map(AdminSummary::list_from_remote)
            .unwrap_or_default())
    }

    /// Creates or updates an admin account, rights included.
    ///
    /// Granting rights is itself a permission change, so a non-empty grant
    /// also needs the permissions right.
    pub fn save_admin(&self, dto: &AdminAccountDto) -> Result<String, AppError> {
        validate(dto)?;
        if dto.is_super_admin || dto.rights.values().any(|granted| *granted) {
            self.authorize(Gate::Capability(Capability::ManagePermissions))?;
        }
        let call = self.post(RemoteFunction::SaveAdmin, dto)?;
        let envelope = self.execute(Gate::Capability(Capability::ManageAdmins), call)?;
        Ok(envelope.message_or("Admin saved.").to_string())
    }

    pub fn delete_admin(&self, dto: &AdminRefDto) -> Result<String, AppError> {
        validate(dto)?;
        if let Some(session) = self.session() {
            if session.email.eq_ignore_ascii_case(dto.email.trim()) {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "You cannot delete the account you are logged in with."
                )));
            }
        }
        let call = self.post(RemoteFunction::DeleteAdmin, dto)?;
        let envelope = self.execute(Gate::Capability(Capability::ManageAdmins), call)?;
        Ok(envelope.message_or("Admin deleted.").to_string())
    }

    pub fn update_permissions(&self, dto: &UpdatePermissionsDto) -> Result<String, AppError> {
        validate(dto)?;
        let call = self.post(RemoteFunction::UpdatePermissions, dto)?;
        let envelope = self.execute(Gate::Capability(Capability::ManagePermissions), call)?;
        Ok(envelope.message_or("Permissions updated.").to_string())
    }
}
