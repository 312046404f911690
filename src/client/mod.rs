//! Directory client.
//!
//! Every mutation follows the same path: validate the DTO, check the
//! session's permission snapshot, send one remote call, read the envelope.
//! The local check only saves a round trip; the web app checks again and its
//! refusal is reported with exactly the same message as a local refusal.

mod admins;
mod auth;
mod branches;
mod staff;

use std::sync::Arc;

use anyhow::anyhow;
use staffdir_config::RemoteConfig;
use staffdir_core::errors::AppError;
use staffdir_core::permissions::{Capability, PermissionSnapshot, can_perform, has_capability};
use staffdir_models::{StaffRecord, format_errors};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::remote::{RemoteCall, RemoteEnvelope, RemoteFunction, RemoteOutcome, Transport};
use crate::session::{AdminSession, SessionStore};

/// What an action needs from the session before it may be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate<'a> {
    /// Any authenticated admin.
    Session,
    /// A capability with no branch scope.
    Capability(Capability),
    /// A capability on one branch.
    Branch(Capability, &'a str),
    /// A capability on two branches, e.g. moving staff between them.
    Branches(Capability, &'a str, &'a str),
    /// Several capabilities on one branch, all required.
    BranchAll(&'a [Capability], &'a str),
}

impl Gate<'_> {
    pub fn allows(&self, snapshot: Option<&PermissionSnapshot>) -> bool {
        match *self {
            Gate::Session => snapshot.is_some(),
            Gate::Capability(cap) => has_capability(snapshot, cap),
            Gate::Branch(cap, branch) => can_perform(snapshot, cap, branch),
            Gate::Branches(cap, from, to) => {
                can_perform(snapshot, cap, from) && can_perform(snapshot, cap, to)
            }
            Gate::BranchAll(caps, branch) => caps
                .iter()
                .all(|cap| can_perform(snapshot, *cap, branch)),
        }
    }

    /// The refusal shown to the user, whoever refused.
    pub fn denial(&self) -> AppError {
        let message = match *self {
            Gate::Session => "Your admin session does not allow this action.".to_string(),
            Gate::Capability(cap) => format!("You do not have permission to {}.", cap.describe()),
            Gate::Branch(cap, branch) => format!(
                "You do not have permission to {} in the \"{}\" branch.",
                cap.describe(),
                branch
            ),
            Gate::Branches(cap, from, to) => format!(
                "You do not have permission to {} from \"{}\" to \"{}\".",
                cap.describe(),
                from,
                to
            ),
            Gate::BranchAll(caps, branch) => format!(
                "You do not have permission to {} in the \"{}\" branch.",
                describe_all(caps),
                branch
            ),
        };
        AppError::forbidden(message)
    }
}

/// "a", "a and b", "a, b and c".
fn describe_all(caps: &[Capability]) -> String {
    let parts: Vec<&str> = caps.iter().map(|cap| cap.describe()).collect();
    match parts.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

pub(crate) fn not_logged_in() -> AppError {
    AppError::unauthorized(anyhow!("Please log in as an admin to continue."))
}

pub(crate) fn validate<T: Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate()
        .map_err(|errors| AppError::bad_request(anyhow!("{}", format_errors(&errors))))
}

pub struct DirectoryClient<T> {
    config: RemoteConfig,
    transport: T,
    sessions: SessionStore,
}

impl<T: Transport> DirectoryClient<T> {
    /// Fails when the remote URL is missing or malformed.
    pub fn new(config: RemoteConfig, transport: T) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            sessions: SessionStore::new(),
        })
    }

    pub fn session(&self) -> Option<Arc<AdminSession>> {
        self.sessions.current()
    }

    pub fn is_admin(&self) -> bool {
        self.sessions.is_authenticated()
    }

    /// Evaluates a gate against the current session without sending anything.
    /// UIs use this to decide which buttons to show.
    pub fn allows(&self, gate: Gate<'_>) -> bool {
        let session = self.sessions.current();
        gate.allows(session.as_deref().map(|s| &s.permissions))
    }

    pub fn photo_url<'a>(&'a self, staff: &'a StaffRecord) -> &'a str {
        staff.photo_url_or(&self.config.fallback_photo_url)
    }

    pub(crate) fn get(&self, function: RemoteFunction) -> RemoteCall {
        RemoteCall::get(&self.config.url, function)
    }

    pub(crate) fn post<B: serde::Serialize>(
        &self,
        function: RemoteFunction,
        body: &B,
    ) -> Result<RemoteCall, AppError> {
        RemoteCall::post(&self.config.url, function, body)
    }

    /// Checks `gate` against the current session.
    pub(crate) fn authorize(&self, gate: Gate<'_>) -> Result<Arc<AdminSession>, AppError> {
        let session = self.sessions.current().ok_or_else(not_logged_in)?;
        if !gate.allows(Some(&session.permissions)) {
            warn!(email = %session.email, ?gate, "action denied by local permission check");
            return Err(gate.denial());
        }
        Ok(session)
    }

    /// Sends `call` and returns the raw envelope. Transport failures are
    /// internal errors.
    pub(crate) fn send(&self, call: &RemoteCall) -> Result<RemoteEnvelope, AppError> {
        debug!(function = %call.function, method = ?call.method, "sending remote call");
        self.transport.send(call).map_err(|err| {
            warn!(function = %call.function, error = %err, "remote call failed");
            AppError::internal(err)
        })
    }

    /// Runs a gated action: authorize, attach the token, send, interpret.
    pub(crate) fn execute(&self, gate: Gate<'_>, call: RemoteCall) -> Result<RemoteEnvelope, AppError> {
        let session = self.authorize(gate)?;
        let call = call.with_token(&session.token);
        let envelope = self.send(&call)?;
        self.interpret(gate, &call, envelope)
    }

    fn interpret(
        &self,
        gate: Gate<'_>,
        call: &RemoteCall,
        envelope: RemoteEnvelope,
    ) -> Result<RemoteEnvelope, AppError> {
        match envelope.outcome() {
            RemoteOutcome::Success => {
                info!(function = %call.function, message = envelope.message_or(""), "remote call succeeded");
                Ok(envelope)
            }
            RemoteOutcome::Denied => {
                warn!(function = %call.function, ?gate, "action denied by remote service");
                Err(gate.denial())
            }
            RemoteOutcome::Expired => {
                warn!(function = %call.function, "remote service reports session expired");
                self.sessions.clear();
                Err(AppError::unauthorized(anyhow!(
                    "Your session has expired. Please log in again."
                )))
            }
            RemoteOutcome::Failed(message) => {
                warn!(function = %call.function, %message, "remote call rejected");
                Err(AppError::remote(anyhow!(message)))
            }
        }
    }
}
