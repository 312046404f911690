//! # Staffdir CLI
//!
//! Offline checks for the staff directory, used by admins to answer "why is
//! this button missing?" and "who is due for an increment?" without the web
//! front-end.
//!
//! ## Usage
//!
//! ```ignore
//! use staffdir_cli::commands;
//!
//! let line = commands::classify("2024-01-15", "", today);
//! let allowed = commands::check(&snapshot_json, "canEditStaff", Some("Head Office"))?;
//! ```

pub mod commands;
