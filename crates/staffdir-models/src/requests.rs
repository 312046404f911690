//! Request payloads for directory mutations.
//!
//! Field names follow the remote service's camelCase convention so the DTOs
//! can be sent as JSON bodies unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use staffdir_core::permissions::Capability;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::ids::RowIndex;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Joins validation failures into one readable line.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => format!("{field} {msg}"),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BranchNameDto {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub branch_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenameBranchDto {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub branch_name: String,
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub new_name: String,
}

/// A photo picked in the staff form, already encoded as a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PhotoUpload {
    #[validate(length(min = 1))]
    pub base64: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Add (no `row_index`) or edit (with `row_index`) a staff row.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffFormDto {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub branch_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<RowIndex>,
    #[serde(default)]
    pub is_former: bool,
    /// Cell values keyed by header name; sent flattened beside the metadata.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub photo: Option<PhotoUpload>,
}

impl StaffFormDto {
    pub fn is_new(&self) -> bool {
        self.row_index.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffRefDto {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub branch_name: String,
    pub row_index: RowIndex,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveStaffDto {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub from_branch: String,
    pub row_index: RowIndex,
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub to_branch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhotoDto {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub branch_name: String,
    pub row_index: RowIndex,
    #[validate(nested)]
    pub photo: PhotoUpload,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_password_change"))]
pub struct ChangePasswordDto {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 6))]
    pub new_password: String,
}

fn validate_password_change(dto: &ChangePasswordDto) -> Result<(), ValidationError> {
    if dto.current_password == dto.new_password {
        return Err(ValidationError::new("unchanged")
            .with_message("new password must differ from the current one".into()));
    }
    Ok(())
}

/// Create or update an admin account. A blank password on update keeps the
/// existing one.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccountDto {
    #[validate(email)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6))]
    pub password: Option<String>,
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(default)]
    pub rights: BTreeMap<Capability, bool>,
    #[serde(default)]
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminRefDto {
    #[validate(email)]
    pub email: String,
}

/// Replace one admin's rights and branch scope.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionsDto {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub is_super_admin: bool,
    pub rights: BTreeMap<Capability, bool>,
    pub branches: Vec<String>,
}
