//! # Staffdir
//!
//! Client-side core of a staff directory whose data lives in a spreadsheet
//! behind a remote procedure web app.
//!
//! ## Overview
//!
//! - **Directory**: branches, each with current and former staff
//! - **Tenure**: which staff are due for increment approval
//! - **Admin permissions**: superadmin flag, per-capability rights and branch
//!   scope, checked before any mutation is sent
//! - **Remote calls**: one endpoint, procedures selected by a `function`
//!   parameter, session token attached once logged in
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── staffdir-core/           # Capability evaluator, dates, errors
//! ├── staffdir-models/         # Staff records, directory, tenure, DTOs
//! ├── staffdir-config/         # Environment configuration
//! ├── staffdir-observability/  # Console logging
//! └── staffdir-cli/            # Command-line tool
//! src/
//! ├── client/                  # Gated directory actions
//! ├── remote.rs                # Call descriptors, reply envelope, transport
//! └── session.rs               # Immutable admin session holder
//! ```
//!
//! ## Permissions
//!
//! | Action | Needs |
//! |--------|-------|
//! | Add branch | `canAddBranch` |
//! | Delete / rename branch | `canDeleteBranch` / `canRenameBranch` + branch scope |
//! | Add / edit staff | `canEditStaff` + branch scope (`canUpdatePhotos` too with a photo) |
//! | Delete staff | `canDeleteStaff` + branch scope |
//! | Move staff | `canMoveStaff` + scope on both branches |
//! | Update photo | `canUpdatePhotos` + branch scope |
//! | Admin accounts | `canManageAdmins` (`canManagePermissions` too when granting rights) |
//! | Admin rights | `canManagePermissions` |
//!
//! A superadmin passes every check. The web app is the authority: it checks
//! again, and its refusals surface as the same [`AppError`] a local refusal
//! produces.
//!
//! ## Environment Variables
//!
//! ```bash
//! STAFFDIR_REMOTE_URL=https://script.google.com/macros/s/.../exec
//! STAFFDIR_FALLBACK_PHOTO_URL=https://example.com/blank.png
//! LOG_LEVEL=info
//! ```

pub mod client;
pub mod remote;
pub mod session;

pub use client::{DirectoryClient, Gate};
pub use remote::{Method, RemoteCall, RemoteEnvelope, RemoteFunction, RemoteOutcome, Transport};
pub use session::{AdminSession, SessionStore};
pub use staffdir_core::AppError;

// Re-export workspace crates for convenience
pub use staffdir_config;
pub use staffdir_core;
pub use staffdir_models;
