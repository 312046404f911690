//! # Staffdir Core
//!
//! Core types, errors, and utilities for the staff directory.
//!
//! - [`permissions`]: Capability enumeration, permission snapshots and the
//!   capability evaluator
//! - [`dates`]: Flexible date parsing and calendar-aware elapsed time
//! - [`errors`]: Application error type
//! - [`serde`]: Lenient deserialization helpers for remote payloads
//!
//! # Example
//!
//! ```
//! use staffdir_core::dates::{Elapsed, format_elapsed, parse_flexible_date};
//!
//! let from = parse_flexible_date("2024-01-15").unwrap();
//! let to = parse_flexible_date("20/02/2025").unwrap();
//! assert_eq!(format_elapsed(&Elapsed::between(from, to)), "1 Year, 1 Month and 5 Days");
//! ```

pub mod dates;
pub mod errors;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use dates::{Elapsed, format_elapsed, parse_flexible_date};
pub use errors::{AppError, ErrorKind};
pub use permissions::{Capability, PermissionSnapshot, can_perform, has_branch_access, has_capability};
