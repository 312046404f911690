use std::sync::Arc;

use anyhow::anyhow;
use serde_json::Value;
use staffdir_core::errors::AppError;
use staffdir_core::permissions::PermissionSnapshot;
use staffdir_models::{ChangePasswordDto, LoginDto};
use tracing::{info, warn};

use super::{DirectoryClient, Gate, not_logged_in, validate};
use crate::remote::{RemoteFunction, RemoteOutcome, Transport};
use crate::session::AdminSession;

/// Reads a permission snapshot from a login or refresh reply. A missing or
/// unreadable value grants nothing.
fn snapshot_from(value: Option<&Value>) -> PermissionSnapshot {
    value
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

impl<T: Transport> DirectoryClient<T> {
    /// Verifies admin credentials and starts a session.
    pub fn login(&self, dto: &LoginDto) -> Result<Arc<AdminSession>, AppError> {
        validate(dto)?;
        let call = self.post(RemoteFunction::VerifyAdmin, dto)?;
        let envelope = self.send(&call)?;

        if envelope.verified != Some(true) {
            warn!(email = %dto.email, "admin login rejected");
            return Err(AppError::unauthorized(anyhow!("Invalid credentials.")));
        }
        let token = envelope
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::internal(anyhow!("verifyAdmin reply carried no session token")))?;

        let session = self.sessions.replace(AdminSession {
            email: envelope.email.clone().unwrap_or_else(|| dto.email.clone()),
            token: token.to_string(),
            permissions: snapshot_from(envelope.permissions.as_ref()),
        });
        info!(
            email = %session.email,
            super_admin = session.permissions.is_super_admin(),
            "admin logged in"
        );
        Ok(session)
    }

    /// Ends the session locally. Tokens expire on the remote side.
    pub fn logout(&self) {
        if let Some(previous) = self.sessions.clear() {
            info!(email = %previous.email, "admin logged out");
        }
    }

    /// Fetches the current rights for the session's token and swaps in a new
    /// session built from them.
    pub fn refresh_session(&self) -> Result<Arc<AdminSession>, AppError> {
        let current = self.sessions.current().ok_or_else(not_logged_in)?;
        let call = self
            .get(RemoteFunction::RefreshSession)
            .with_token(&current.token);
        let envelope = self.send(&call)?;

        match envelope.outcome() {
            RemoteOutcome::Success => {}
            RemoteOutcome::Denied | RemoteOutcome::Expired => {
                warn!(email = %current.email, "session refresh refused, logging out");
                self.sessions.clear();
                return Err(AppError::unauthorized(anyhow!(
                    "Your session has expired. Please log in again."
                )));
            }
            RemoteOutcome::Failed(message) => return Err(AppError::remote(anyhow!(message))),
        }

        let token = envelope
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(current.token.as_str())
            .to_string();
        let session = self.sessions.replace(AdminSession {
            email: current.email.clone(),
            token,
            permissions: snapshot_from(envelope.permissions.as_ref()),
        });
        info!(email = %session.email, "admin session refreshed");
        Ok(session)
    }

    /// Changes the logged-in admin's password. Returns the service's message.
    pub fn change_password(&self, dto: &ChangePasswordDto) -> Result<String, AppError> {
        validate(dto)?;
        let call = self.post(RemoteFunction::ChangePassword, dto)?;
        let envelope = self.execute(Gate::Session, call)?;

        // This procedure predates `status`; it answers with the bare word
        // "Success" or with the reason it refused.
        let message = envelope.message_or("");
        if envelope.status.is_none() && message != "Success" {
            return Err(AppError::remote(anyhow!(
                "{}",
                envelope.message_or("Password change failed.")
            )));
        }
        Ok(envelope.message_or("Success").to_string())
    }
}
