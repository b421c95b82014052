use healthbuddy::db::UserRepository;
use healthbuddy::models::{LoginRequest, RegisterRequest};
use healthbuddy::AppError;

mod common;

fn register_request(phone: &str, password: &str, name: &str) -> RegisterRequest {
    RegisterRequest {
        phone: phone.to_string(),
        password: password.to_string(),
        name: name.to_string(),
    }
}

fn login_request(phone: &str, password: &str) -> LoginRequest {
    LoginRequest {
        phone: phone.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::user_repository(dir.path());

    repo.register(&register_request("555-123-4567", "secret1", "Ann"))
        .await
        .unwrap();

    let err = repo
        .register(&register_request("555-123-4567", "another1", "Ann Again"))
        .await
        .unwrap_err();
    assert!(err.user_message().contains("already registered"));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::user_repository(dir.path());
    repo.register(&register_request("555-123-4567", "secret1", "Ann"))
        .await
        .unwrap();

    let err = repo
        .login(&login_request("555-123-4567", "secret2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.user_message(), "Incorrect password");

    let user = repo.lookup("5551234567").await.unwrap().unwrap();
    assert!(user.last_login.is_none());
}

#[tokio::test]
async fn test_login_stamps_last_login() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::user_repository(dir.path());
    repo.register(&register_request("555-123-4567", "secret1", "Ann"))
        .await
        .unwrap();

    let user = repo
        .login(&login_request("555-123-4567", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.phone, "5551234567");
    assert_eq!(user.name, "Ann");
    let last_login = user.last_login.expect("login should set last_login");
    assert!(last_login > user.created_at);

    // Persisted, not just returned
    let stored = repo.lookup("555-123-4567").await.unwrap().unwrap();
    assert_eq!(stored.last_login, Some(last_login));
}

#[tokio::test]
async fn test_unknown_phone_cannot_login() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::user_repository(dir.path());

    let err = repo
        .login(&login_request("555-999-0000", "secret1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(
        err.user_message(),
        "Phone number not found. Please register first."
    );
}

#[tokio::test]
async fn test_phone_formats_share_one_account() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::user_repository(dir.path());

    repo.register(&register_request("(555) 123-4567", "secret1", "Ann"))
        .await
        .unwrap();

    let err = repo
        .register(&register_request("5551234567", "secret1", "Ann"))
        .await
        .unwrap_err();
    assert!(err.user_message().contains("already registered"));

    let user = repo
        .login(&login_request("5551234567", "secret1"))
        .await
        .unwrap();
    assert_eq!(user.phone, "5551234567");
}

#[tokio::test]
async fn test_lookup_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::user_repository(dir.path());
    repo.register(&register_request("555-123-4567", "secret1", "Ann"))
        .await
        .unwrap();

    let first = repo.lookup("555-123-4567").await.unwrap();
    let second = repo.lookup("(555) 123 4567").await.unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);

    assert!(repo.lookup("5550000000").await.unwrap().is_none());
}

#[tokio::test]
async fn test_directory_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    common::user_repository(dir.path())
        .register(&register_request("555-123-4567", "secret1", "Ann"))
        .await
        .unwrap();

    let reopened = common::user_repository(dir.path());
    let user = reopened
        .login(&login_request("555-123-4567", "secret1"))
        .await
        .unwrap();
    assert_eq!(user.name, "Ann");
}
