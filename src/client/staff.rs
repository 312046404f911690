use staffdir_core::errors::AppError;
use staffdir_core::permissions::Capability;
use staffdir_models::{MoveStaffDto, StaffFormDto, StaffRefDto, UpdatePhotoDto};

use super::{DirectoryClient, Gate, validate};
use crate::remote::{RemoteFunction, Transport};

/// Rights needed to save a staff form that carries a photo.
const EDIT_WITH_PHOTO: [Capability; 2] = [Capability::EditStaff, Capability::UpdatePhotos];

impl<T: Transport> DirectoryClient<T> {
    /// Adds a staff row (no row index) or overwrites one. A photo in the form
    /// additionally needs the photo right, and a refusal names both.
    pub fn save_staff(&self, dto: &StaffFormDto) -> Result<String, AppError> {
        validate(dto)?;
        let call = self.post(RemoteFunction::SaveStaff, dto)?;
        let gate = match dto.photo {
            Some(_) => Gate::BranchAll(&EDIT_WITH_PHOTO, &dto.branch_name),
            None => Gate::Branch(Capability::EditStaff, &dto.branch_name),
        };
        let envelope = self.execute(gate, call)?;
        let default = if dto.is_new() { "Staff added." } else { "Staff updated." };
        Ok(envelope.message_or(default).to_string())
    }

    pub fn delete_staff(&self, dto: &StaffRefDto) -> Result<String, AppError> {
        validate(dto)?;
        let call = self.post(RemoteFunction::DeleteStaff, dto)?;
        let gate = Gate::Branch(Capability::DeleteStaff, &dto.branch_name);
        let envelope = self.execute(gate, call)?;
        Ok(envelope.message_or("Staff deleted.").to_string())
    }

    /// Moves a staff row to another branch. Needs the move right on both.
    pub fn move_staff(&self, dto: &MoveStaffDto) -> Result<String, AppError> {
        validate(dto)?;
        if dto.from_branch == dto.to_branch {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Staff member is already in \"{}\".",
                dto.to_branch
            )));
        }
        let call = self.post(RemoteFunction::MoveStaff, dto)?;
        let gate = Gate::Branches(Capability::MoveStaff, &dto.from_branch, &dto.to_branch);
        let envelope = self.execute(gate, call)?;
        Ok(envelope.message_or("Staff moved.").to_string())
    }

    pub fn update_photo(&self, dto: &UpdatePhotoDto) -> Result<String, AppError> {
        validate(dto)?;
        let call = self.post(RemoteFunction::UpdatePhoto, dto)?;
        let gate = Gate::Branch(Capability::UpdatePhotos, &dto.branch_name);
        let envelope = self.execute(gate, call)?;
        Ok(envelope.message_or("Photo updated.").to_string())
    }
}
