//! Integration tests for the members crate with a real database

use std::sync::Arc;

use roster_config::{DatabaseConfig, HashingConfig};
use roster_database::initialize_database;
use roster_members::{
    AuthError, AuthenticationService, DirectoryQueryService, MemberRepository, MembershipError,
    MembershipService, PasswordHasher, RegisterRequest, RegistrationError, RegistrationService,
    TokenIssuer, UpdateMemberRequest,
};
use tempfile::TempDir;

struct Services {
    registration: RegistrationService,
    authentication: AuthenticationService,
    directory: DirectoryQueryService,
    membership: MembershipService,
    tokens: Arc<TokenIssuer>,
    _temp_dir: TempDir,
}

/// Helper function to wire every service against one temporary database
async fn create_services() -> Services {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test_members.db");
    let pool = initialize_database(&DatabaseConfig {
        url: format!("sqlite://{}", db_path.display()),
        max_connections: 4,
    })
    .await
    .expect("Failed to create test database");

    let hasher = Arc::new(
        PasswordHasher::new(&HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap(),
    );
    let tokens = Arc::new(TokenIssuer::new("integration-secret", "roster-test", 600).unwrap());
    let repository = MemberRepository::new(pool);

    Services {
        registration: RegistrationService::new(repository.clone(), hasher.clone()),
        authentication: AuthenticationService::new(
            repository.clone(),
            hasher.clone(),
            tokens.clone(),
        ),
        directory: DirectoryQueryService::new(repository.clone(), 100),
        membership: MembershipService::new(repository, hasher),
        tokens,
        _temp_dir: temp_dir,
    }
}

fn candidate(identifier: i64, display_name: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        identifier,
        display_name: display_name.to_string(),
        email: format!("{identifier}@school.example"),
        sex: String::new(),
        grade: "2024".to_string(),
        password: password.to_string(),
        password_confirmation: password.to_string(),
    }
}

#[tokio::test]
async fn test_alice_scenario() {
    let services = create_services().await;

    services
        .registration
        .register(candidate(1001, "Alice", "pw"))
        .await
        .unwrap();

    let issued = services.authentication.login(1001, "pw").await.unwrap();
    let claims = services.tokens.verify(&issued.token).unwrap();
    assert_eq!(claims.name, "Alice");
    assert_eq!(claims.identifier(), Some(1001));

    assert_eq!(
        services.authentication.login(1001, "wrong").await.unwrap_err(),
        AuthError::InvalidCredentials
    );

    let alice = services
        .directory
        .find_by_identifier(1001)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alice.display_name, "Alice");
    assert_ne!(alice.password_hash, "pw");
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected_by_the_store() {
    let services = create_services().await;

    services
        .registration
        .register(candidate(1001, "Alice", "pw"))
        .await
        .unwrap();
    let err = services
        .registration
        .register(candidate(1001, "Mallory", "pw"))
        .await
        .unwrap_err();

    assert_eq!(err, RegistrationError::DuplicateIdentifier(1001));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_duplicate_registrations() {
    let services = create_services().await;

    let (first, second) = tokio::join!(
        services.registration.register(candidate(7, "Sam", "pw")),
        services.registration.register(candidate(7, "Sam", "pw"))
    );
    let outcomes = [first, second];

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(RegistrationError::DuplicateIdentifier(7)))));

    let everyone = services.directory.list_everything().await.unwrap();
    assert_eq!(everyone.len(), 1);
}

#[tokio::test]
async fn test_pagination_against_sqlite() {
    let services = create_services().await;
    for identifier in 1..=25 {
        services
            .registration
            .register(candidate(identifier, "Member", "pw"))
            .await
            .unwrap();
    }

    let first = services.directory.list_all(1, 10).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_count, 25);

    let third = services.directory.list_all(3, 10).await.unwrap();
    assert_eq!(third.items.len(), 5);
    assert_eq!(third.items.first().map(|m| m.identifier), Some(21));

    let fourth = services.directory.list_all(4, 10).await.unwrap();
    assert!(fourth.items.is_empty());
    assert_eq!(fourth.total_count, 25);

    let by_name = services.directory.find_by_name("Member", 2, 20).await.unwrap();
    assert_eq!(by_name.items.len(), 5);
    assert_eq!(by_name.total_count, 25);
}

#[tokio::test]
async fn test_update_then_login_with_new_password() {
    let services = create_services().await;
    services
        .registration
        .register(candidate(1001, "Alice", "pw"))
        .await
        .unwrap();

    services
        .membership
        .update_member(
            1001,
            UpdateMemberRequest {
                password: Some("rotated".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(
        services.authentication.login(1001, "pw").await.unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert!(services.authentication.login(1001, "rotated").await.is_ok());
}

#[tokio::test]
async fn test_delete_frees_identifier() {
    let services = create_services().await;
    services
        .registration
        .register(candidate(1001, "Alice", "pw"))
        .await
        .unwrap();

    services.membership.delete_member(1001).await.unwrap();
    assert_eq!(
        services.membership.delete_member(1001).await.unwrap_err(),
        MembershipError::MemberNotFound(1001)
    );
    assert_eq!(
        services.authentication.login(1001, "pw").await.unwrap_err(),
        AuthError::MemberNotFound
    );

    services
        .registration
        .register(candidate(1001, "Alice", "pw"))
        .await
        .unwrap();
}
