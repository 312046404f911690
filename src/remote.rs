//! Remote procedure protocol.
//!
//! The spreadsheet web app exposes one URL. The procedure is chosen with a
//! `function` query parameter; reads pass arguments as further query
//! parameters, writes send a JSON body. Replies share one loose envelope.
//!
//! This module describes calls and reads replies. Moving bytes is the job of
//! a [`Transport`] supplied by the embedding application.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use staffdir_core::errors::AppError;

/// Content type for POST bodies. The web app only accepts simple requests,
/// so JSON travels as plain text.
pub const POST_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Query parameter naming the procedure.
pub const FUNCTION_PARAM: &str = "function";
/// Query parameter carrying the session token.
pub const TOKEN_PARAM: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteFunction {
    GetInitialData,
    VerifyAdmin,
    RefreshSession,
    AddBranch,
    DeleteBranch,
    RenameBranch,
    SaveStaff,
    DeleteStaff,
    MoveStaff,
    UpdatePhoto,
    ChangePassword,
    GetAdmins,
    SaveAdmin,
    DeleteAdmin,
    UpdatePermissions,
}

impl RemoteFunction {
    pub const fn as_str(self) -> &'static str {
        match self {
            RemoteFunction::GetInitialData => "getInitialData",
            RemoteFunction::VerifyAdmin => "verifyAdmin",
            RemoteFunction::RefreshSession => "refreshSession",
            RemoteFunction::AddBranch => "addBranch",
            RemoteFunction::DeleteBranch => "deleteBranch",
            RemoteFunction::RenameBranch => "renameBranch",
            RemoteFunction::SaveStaff => "saveStaff",
            RemoteFunction::DeleteStaff => "deleteStaff",
            RemoteFunction::MoveStaff => "moveStaff",
            RemoteFunction::UpdatePhoto => "updatePhoto",
            RemoteFunction::ChangePassword => "changePassword",
            RemoteFunction::GetAdmins => "getAdmins",
            RemoteFunction::SaveAdmin => "saveAdmin",
            RemoteFunction::DeleteAdmin => "deleteAdmin",
            RemoteFunction::UpdatePermissions => "updatePermissions",
        }
    }
}

impl fmt::Display for RemoteFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One request to the web app, ready for a transport to send.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCall {
    pub endpoint: String,
    pub function: RemoteFunction,
    pub method: Method,
    /// Query parameters in send order, `function` first.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RemoteCall {
    pub fn get(endpoint: &str, function: RemoteFunction) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            function,
            method: Method::Get,
            query: vec![(FUNCTION_PARAM.to_string(), function.as_str().to_string())],
            body: None,
        }
    }

    pub fn post<B: Serialize>(
        endpoint: &str,
        function: RemoteFunction,
        body: &B,
    ) -> Result<Self, AppError> {
        let body = serde_json::to_value(body)?;
        Ok(Self {
            method: Method::Post,
            body: Some(body),
            ..Self::get(endpoint, function)
        })
    }

    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn with_token(self, token: &str) -> Self {
        self.with_param(TOKEN_PARAM, token)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The POST body as sent on the wire.
    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(Value::to_string)
    }
}

/// The reply shape shared by every procedure. All fields are optional;
/// procedures fill in the ones they use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub permissions: Option<Value>,
}

/// How the web app answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    Success,
    /// The web app refused the action for lack of permission.
    Denied,
    /// The session token is no longer valid.
    Expired,
    Failed(String),
}

impl RemoteEnvelope {
    pub fn success(message: &str) -> Self {
        Self {
            status: Some("success".to_string()),
            message: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: Some("error".to_string()),
            message: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn message_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(default)
    }

    /// Classifies the reply.
    ///
    /// An explicit success status always wins. Older procedures omit `status`
    /// and only send a message; those count as success unless the message
    /// reports a permission problem.
    pub fn outcome(&self) -> RemoteOutcome {
        let status = self
            .status
            .as_deref()
            .map(|s| s.trim().to_ascii_lowercase());
        let mentions_permission = self
            .message
            .as_deref()
            .map(|m| m.to_lowercase().contains("permission"))
            .unwrap_or(false);

        match status.as_deref() {
            Some("denied" | "forbidden" | "unauthorized") => RemoteOutcome::Denied,
            Some("expired") => RemoteOutcome::Expired,
            Some("success" | "ok") => RemoteOutcome::Success,
            _ if mentions_permission => RemoteOutcome::Denied,
            None => RemoteOutcome::Success,
            Some(_) => RemoteOutcome::Failed(self.message_or("The request failed.").to_string()),
        }
    }
}

/// Sends a call and returns the decoded reply. One attempt, no retries.
pub trait Transport {
    fn send(&self, call: &RemoteCall) -> anyhow::Result<RemoteEnvelope>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, call: &RemoteCall) -> anyhow::Result<RemoteEnvelope> {
        (**self).send(call)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, call: &RemoteCall) -> anyhow::Result<RemoteEnvelope> {
        (**self).send(call)
    }
}
