use staffdir_core::errors::AppError;
use staffdir_core::permissions::Capability;
use staffdir_models::{BranchDirectory, BranchNameDto, RenameBranchDto};
use tracing::info;

use super::{DirectoryClient, Gate, validate};
use crate::remote::{RemoteFunction, RemoteOutcome, Transport};

impl<T: Transport> DirectoryClient<T> {
    /// Loads every branch with its current and former staff. Works without a
    /// session; the token is attached when there is one.
    pub fn load_directory(&self) -> Result<BranchDirectory, AppError> {
        let mut call = self.get(RemoteFunction::GetInitialData);
        if let Some(session) = self.sessions.current() {
            call = call.with_token(&session.token);
        }
        let envelope = self.send(&call)?;

        match envelope.outcome() {
            RemoteOutcome::Success => {}
            RemoteOutcome::Failed(message) => {
                return Err(AppError::remote(anyhow::anyhow!(
                    "Error loading data: {}",
                    message
                )));
            }
            RemoteOutcome::Denied | RemoteOutcome::Expired => {
                return Err(AppError::remote(anyhow::anyhow!(
                    "Error loading data: {}",
                    envelope.message_or("access refused")
                )));
            }
        }

        let directory = envelope
            .data
            .as_ref()
            .map(BranchDirectory::from_remote)
            .unwrap_or_default();
        info!(branches = directory.branches.len(), "directory loaded");
        Ok(directory)
    }

    /// Creates a branch worksheet.
    pub fn add_branch(&self, dto: &BranchNameDto) -> Result<String, AppError> {
        validate(dto)?;
        let call = self.post(RemoteFunction::AddBranch, dto)?;
        let envelope = self.execute(Gate::Capability(Capability::AddBranch), call)?;
        Ok(envelope.message_or("Branch added.").to_string())
    }

    /// Deletes a branch worksheet and everyone in it.
    pub fn delete_branch(&self, dto: &BranchNameDto) -> Result<String, AppError> {
        validate(dto)?;
        let call = self.post(RemoteFunction::DeleteBranch, dto)?;
        let gate = Gate::Branch(Capability::DeleteBranch, &dto.branch_name);
        let envelope = self.execute(gate, call)?;
        Ok(envelope.message_or("Branch deleted.").to_string())
    }

    pub fn rename_branch(&self, dto: &RenameBranchDto) -> Result<String, AppError> {
        validate(dto)?;
        let call = self.post(RemoteFunction::RenameBranch, dto)?;
        let gate = Gate::Branch(Capability::RenameBranch, &dto.branch_name);
        let envelope = self.execute(gate, call)?;
        Ok(envelope.message_or("Branch renamed.").to_string())
    }
}
