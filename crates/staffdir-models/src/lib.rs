//! # Staffdir Models
//!
//! Domain models and request DTOs for the staff directory.
//!
//! # Modules
//!
//! - [`admins`]: Admin account listings
//! - [`branches`]: The branch directory parsed from the remote service
//! - [`ids`]: Worksheet row identifiers
//! - [`requests`]: Validated payloads for mutations
//! - [`staff`]: Staff records and header normalisation
//! - [`tenure`]: Raise-review classification of staff records
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use staffdir_models::{RowIndex, StaffRecord, TenureCategory, classify, headers};
//!
//! let staff = StaffRecord::new("Head Office", RowIndex(2), false)
//!     .with_field(headers::JOINING_DATE, "15/01/2025");
//! let now = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//!
//! let tenure = classify(&staff, now);
//! assert_eq!(tenure.category, TenureCategory::Ongoing);
//! assert_eq!(tenure.elapsed_text().as_deref(), Some("1 Month and 14 Days"));
//! ```

pub mod admins;
pub mod branches;
pub mod ids;
pub mod requests;
pub mod staff;
pub mod tenure;

// Re-export commonly used types at crate root for convenience
pub use admins::AdminSummary;
pub use branches::{Branch, BranchDirectory, SearchHit};
pub use ids::RowIndex;
pub use requests::{
    AdminAccountDto, AdminRefDto, BranchNameDto, ChangePasswordDto, LoginDto, MoveStaffDto,
    PhotoUpload, RenameBranchDto, StaffFormDto, StaffRefDto, UpdatePermissionsDto, UpdatePhotoDto,
    format_errors,
};
pub use staff::{StaffRecord, headers, normalize_header};
pub use tenure::{
    ReferenceKind, TenureCategory, TenureClassification, classify, classify_dates, classify_today,
};
