use std::fmt;

use anyhow::Error;

/// Broad category of a failed directory action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed validation before anything was sent.
    BadRequest,
    /// No admin session, or the session was rejected as expired.
    Unauthorized,
    /// The session lacks the capability or branch scope for the action.
    Forbidden,
    /// The remote service answered with an error.
    Remote,
    /// Transport failure or an unreadable reply.
    Internal,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Unauthorized, err)
    }

    pub fn remote<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Remote, err)
    }

    /// A permission denial. Client-side and remote denials both go through
    /// here so they read the same to the user.
    pub fn forbidden(message: String) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message))
    }

    pub fn is_forbidden(&self) -> bool {
        self.kind == ErrorKind::Forbidden
    }

    /// Text suitable for an alert dialog. Internal causes are not shown.
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Internal => "An error occurred. Please try again.".to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.error)
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
