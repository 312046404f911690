mod common;

use common::{TEST_TOKEN, logged_in_client, scoped, setup_client, super_admin};
use serde_json::json;
use staffdir::staffdir_core::ErrorKind;
use staffdir::staffdir_core::permissions::Capability;
use staffdir::staffdir_models::{ChangePasswordDto, LoginDto};
use staffdir::{Gate, Method, RemoteFunction};

fn login_dto() -> LoginDto {
    LoginDto {
        email: "ops@example.com".to_string(),
        password: "secret".to_string(),
    }
}

#[test]
fn test_login_success_starts_session() {
    let (client, transport) = setup_client();
    transport.reply_json(json!({
        "verified": true,
        "token": TEST_TOKEN,
        "email": "ops@example.com",
        "permissions": super_admin()
    }));

    let session = client.login(&login_dto()).unwrap();

    assert_eq!(session.email, "ops@example.com");
    assert_eq!(session.token, TEST_TOKEN);
    assert!(session.permissions.is_super_admin());
    assert!(client.is_admin());

    let call = transport.last_call();
    assert_eq!(call.function, RemoteFunction::VerifyAdmin);
    assert_eq!(call.method, Method::Post);
    assert_eq!(call.param("function"), Some("verifyAdmin"));
    assert_eq!(call.param("token"), None);
    assert_eq!(
        call.body,
        Some(json!({ "email": "ops@example.com", "password": "secret" }))
    );
}

#[test]
fn test_login_rejected_credentials() {
    let (client, transport) = setup_client();
    transport.reply_json(json!({ "verified": false, "message": "Invalid email or password" }));

    let err = client.login(&login_dto()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.user_message(), "Invalid credentials.");
    assert!(!client.is_admin());
}

#[test]
fn test_login_validates_before_sending() {
    let (client, transport) = setup_client();
    let dto = LoginDto {
        email: "not-an-email".to_string(),
        password: String::new(),
    };

    let err = client.login(&dto).unwrap_err();

    assert_eq!(err.kind, ErrorKind::BadRequest);
    assert!(transport.calls().is_empty());
}

#[test]
fn test_login_without_permissions_grants_nothing() {
    let (client, transport) = setup_client();
    transport.reply_json(json!({ "verified": true, "token": TEST_TOKEN }));

    let session = client.login(&login_dto()).unwrap();

    assert_eq!(session.email, "ops@example.com");
    assert!(!session.permissions.is_super_admin());
    assert!(client.allows(Gate::Session));
    for cap in Capability::ALL {
        assert!(!client.allows(Gate::Capability(cap)));
    }
}

#[test]
fn test_login_transport_failure_is_internal() {
    let (client, transport) = setup_client();
    transport.fail("connection reset");

    let err = client.login(&login_dto()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.user_message(), "An error occurred. Please try again.");
}

#[test]
fn test_logout_clears_session() {
    let (client, transport) = logged_in_client(super_admin());
    assert!(client.is_admin());

    client.logout();

    assert!(!client.is_admin());
    assert!(client.session().is_none());
    assert!(!client.allows(Gate::Capability(Capability::AddBranch)));
    assert!(transport.calls().is_empty());
}

#[test]
fn test_refresh_replaces_snapshot() {
    let (client, transport) = logged_in_client(scoped(&["canEditStaff"], &["Head Office"]));
    let before = client.session().unwrap();
    transport.reply_json(json!({
        "status": "success",
        "permissions": scoped(&["canEditStaff", "canDeleteStaff"], &["Head Office", "Harbour Road"])
    }));

    let after = client.refresh_session().unwrap();

    let call = transport.last_call();
    assert_eq!(call.function, RemoteFunction::RefreshSession);
    assert_eq!(call.method, Method::Get);
    assert_eq!(call.param("token"), Some(TEST_TOKEN));

    assert_eq!(after.token, TEST_TOKEN);
    assert!(client.allows(Gate::Branch(Capability::DeleteStaff, "Harbour Road")));
    // Earlier readers keep the snapshot they were handed.
    assert!(!before.permissions.right(Capability::DeleteStaff));
}

#[test]
fn test_refresh_expired_logs_out() {
    let (client, transport) = logged_in_client(super_admin());
    transport.reply_json(json!({ "status": "expired", "message": "Session expired" }));

    let err = client.refresh_session().unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert!(!client.is_admin());
}

#[test]
fn test_refresh_without_session() {
    let (client, transport) = setup_client();

    let err = client.refresh_session().unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert!(transport.calls().is_empty());
}

fn password_dto() -> ChangePasswordDto {
    ChangePasswordDto {
        current_password: "old-secret".to_string(),
        new_password: "new-secret".to_string(),
    }
}

#[test]
fn test_change_password_success() {
    let (client, transport) = logged_in_client(scoped(&[], &[]));
    transport.reply_json(json!({ "message": "Success" }));

    let message = client.change_password(&password_dto()).unwrap();

    assert_eq!(message, "Success");
    let call = transport.last_call();
    assert_eq!(call.function, RemoteFunction::ChangePassword);
    assert_eq!(call.param("token"), Some(TEST_TOKEN));
    assert_eq!(
        call.body,
        Some(json!({ "currentPassword": "old-secret", "newPassword": "new-secret" }))
    );
}

#[test]
fn test_change_password_refused() {
    let (client, transport) = logged_in_client(scoped(&[], &[]));
    transport.reply_json(json!({ "message": "Current password is incorrect" }));

    let err = client.change_password(&password_dto()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Remote);
    assert_eq!(err.user_message(), "Current password is incorrect");
    assert!(client.is_admin());
}

#[test]
fn test_change_password_requires_login() {
    let (client, transport) = setup_client();

    let err = client.change_password(&password_dto()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert!(transport.calls().is_empty());
}
