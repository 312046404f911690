mod common;

use std::collections::BTreeMap;

use common::{TEST_TOKEN, logged_in_client, scoped, super_admin};
use serde_json::json;
use staffdir::staffdir_core::ErrorKind;
use staffdir::staffdir_models::{
    MoveStaffDto, PhotoUpload, RowIndex, StaffFormDto, StaffRefDto, UpdatePhotoDto, headers,
};
use staffdir::RemoteFunction;

fn form(branch: &str, row: Option<u32>, photo: Option<PhotoUpload>) -> StaffFormDto {
    let mut fields = BTreeMap::new();
    fields.insert(headers::FULL_NAME.to_string(), "Amina Rahman".to_string());
    fields.insert(headers::DESIGNATION.to_string(), "Accountant".to_string());
    StaffFormDto {
        branch_name: branch.to_string(),
        row_index: row.map(RowIndex),
        is_former: false,
        fields,
        photo,
    }
}

fn photo() -> PhotoUpload {
    PhotoUpload {
        base64: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
        name: "amina.jpg".to_string(),
    }
}

#[test]
fn test_add_staff_with_edit_right() {
    let (client, transport) = logged_in_client(scoped(&["canEditStaff"], &["Head Office"]));
    transport.reply_json(json!({ "status": "success" }));

    let message = client.save_staff(&form("Head Office", None, None)).unwrap();

    assert_eq!(message, "Staff added.");
    let call = transport.last_call();
    assert_eq!(call.function, RemoteFunction::SaveStaff);
    assert_eq!(call.param("token"), Some(TEST_TOKEN));
    assert_eq!(
        call.body,
        Some(json!({
            "branchName": "Head Office",
            "isFormer": false,
            "Full Name": "Amina Rahman",
            "Designation": "Accountant"
        }))
    );
}

#[test]
fn test_edit_staff_outside_scope_is_denied() {
    let (client, transport) = logged_in_client(scoped(&["canEditStaff"], &["Head Office"]));

    let err = client.save_staff(&form("Harbour Road", Some(4), None)).unwrap_err();

    assert!(err.is_forbidden());
    assert_eq!(
        err.user_message(),
        "You do not have permission to edit staff in the \"Harbour Road\" branch."
    );
    assert!(transport.calls().is_empty());
}

#[test]
fn test_save_staff_with_photo_needs_photo_right() {
    let (client, transport) = logged_in_client(scoped(&["canEditStaff"], &["Head Office"]));

    let err = client
        .save_staff(&form("Head Office", Some(4), Some(photo())))
        .unwrap_err();

    assert!(err.is_forbidden());
    assert_eq!(
        err.user_message(),
        "You do not have permission to edit staff and update staff photos in the \"Head Office\" branch."
    );
    assert!(transport.calls().is_empty());

    let (client, transport) =
        logged_in_client(scoped(&["canEditStaff", "canUpdatePhotos"], &["Head Office"]));
    assert_eq!(
        client
            .save_staff(&form("Head Office", Some(4), Some(photo())))
            .unwrap(),
        "OK"
    );
    assert_eq!(transport.last_call().body.unwrap()["photo"]["name"], "amina.jpg");
}

#[test]
fn test_remote_refusal_of_photo_save_names_both_rights() {
    let (client, transport) =
        logged_in_client(scoped(&["canEditStaff", "canUpdatePhotos"], &["Head Office"]));
    transport.reply_json(json!({ "status": "denied", "message": "Not allowed" }));

    let err = client
        .save_staff(&form("Head Office", Some(4), Some(photo())))
        .unwrap_err();

    assert!(err.is_forbidden());
    assert!(err.user_message().contains("edit staff and update staff photos"));
}

#[test]
fn test_delete_staff() {
    let (client, transport) = logged_in_client(scoped(&["canDeleteStaff"], &["Head Office"]));
    let dto = StaffRefDto {
        branch_name: "Head Office".to_string(),
        row_index: RowIndex(5),
    };
    transport.reply_json(json!({ "status": "success", "message": "Staff deleted successfully." }));

    assert_eq!(client.delete_staff(&dto).unwrap(), "Staff deleted successfully.");
    assert_eq!(
        transport.last_call().body,
        Some(json!({ "branchName": "Head Office", "rowIndex": 5 }))
    );
}

fn move_dto(from: &str, to: &str) -> MoveStaffDto {
    MoveStaffDto {
        from_branch: from.to_string(),
        row_index: RowIndex(3),
        to_branch: to.to_string(),
    }
}

#[test]
fn test_move_staff_needs_both_branches() {
    let (client, transport) = logged_in_client(scoped(&["canMoveStaff"], &["Head Office"]));

    let err = client
        .move_staff(&move_dto("Head Office", "Harbour Road"))
        .unwrap_err();
    assert!(err.is_forbidden());

    let err = client
        .move_staff(&move_dto("Harbour Road", "Head Office"))
        .unwrap_err();
    assert!(err.is_forbidden());
    assert!(transport.calls().is_empty());

    let (client, transport) =
        logged_in_client(scoped(&["canMoveStaff"], &["Head Office", "Harbour Road"]));
    client
        .move_staff(&move_dto("Head Office", "Harbour Road"))
        .unwrap();
    assert_eq!(
        transport.last_call().body,
        Some(json!({ "fromBranch": "Head Office", "rowIndex": 3, "toBranch": "Harbour Road" }))
    );
}

#[test]
fn test_move_staff_to_same_branch() {
    let (client, transport) = logged_in_client(super_admin());

    let err = client
        .move_staff(&move_dto("Head Office", "Head Office"))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::BadRequest);
    assert!(transport.calls().is_empty());
}

#[test]
fn test_update_photo() {
    let (client, transport) = logged_in_client(scoped(&["canUpdatePhotos"], &["Head Office"]));
    let dto = UpdatePhotoDto {
        branch_name: "Head Office".to_string(),
        row_index: RowIndex(2),
        photo: photo(),
    };

    assert_eq!(client.update_photo(&dto).unwrap(), "OK");
    assert_eq!(transport.functions(), vec![RemoteFunction::UpdatePhoto]);

    let elsewhere = UpdatePhotoDto {
        branch_name: "Harbour Road".to_string(),
        ..dto
    };
    assert!(client.update_photo(&elsewhere).unwrap_err().is_forbidden());
}

#[test]
fn test_remote_failure_message_is_shown() {
    let (client, transport) = logged_in_client(super_admin());
    transport.reply_json(json!({ "status": "error", "message": "Row 9 does not exist." }));
    let dto = StaffRefDto {
        branch_name: "Head Office".to_string(),
        row_index: RowIndex(9),
    };

    let err = client.delete_staff(&dto).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Remote);
    assert_eq!(err.user_message(), "Row 9 does not exist.");
}
