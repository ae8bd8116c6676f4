//! Tests for the authentication service
//!
//! Covers mock login, signup, logout, password reset and impersonation.

use migration_portal_application::{
    validation::PasswordResetRequest, ApplicationError, AuthService, ServiceEvent,
};
use migration_portal_domain::{RoleId, UserId, UserStatus};
use migration_portal_testing::{builders::*, fixtures::*, mocks::*};
use std::sync::Arc;

fn service() -> (
    AuthService<MockUserStore, MockEventPublisher>,
    Arc<MockUserStore>,
    Arc<MockEventPublisher>,
) {
    let store = Arc::new(MockUserStore::with_users(demo_users()));
    let events = Arc::new(MockEventPublisher::new());
    let service = AuthService::new(store.clone(), events.clone(), test_auth_config());
    (service, store, events)
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_privileged_login_requires_shared_password() {
    // Arrange
    let (auth, _, _) = service();

    // Act
    let wrong = auth.login("admin@company.com", "guess").await;
    let right = auth.login("admin@company.com", DEMO_SHARED_PASSWORD).await;

    // Assert
    assert_eq!(
        wrong.unwrap_err(),
        ApplicationError::Unauthorized("Invalid password".into())
    );
    let user = right.unwrap();
    assert_eq!(user.email, "admin@company.com");
    assert_eq!(auth.current_user(), Some(user));
}

#[tokio::test]
async fn test_regular_login_accepts_any_non_empty_password() {
    let (auth, store, events) = service();

    let user = auth.login("sarah@company.com", "anything").await.unwrap();

    assert!(user.last_login_at.is_some());
    let stored = store
        .snapshot()
        .into_iter()
        .find(|u| u.email == "sarah@company.com")
        .unwrap();
    assert_eq!(stored.last_login_at, user.last_login_at);
    assert_eq!(
        events.get_published_events(),
        vec![ServiceEvent::UserSignedIn { user_id: user.id }]
    );
}

#[tokio::test]
async fn test_login_rejects_empty_password_and_unknown_email() {
    let (auth, _, _) = service();

    assert!(auth.login("sarah@company.com", "").await.is_err());

    let err = auth.login("nobody@company.com", "pw").await.unwrap_err();
    assert_eq!(err.message(), "Invalid credentials");
    assert!(auth.current_user().is_none());
}

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn test_signup_creates_signed_in_client() {
    let (auth, store, _) = service();
    let before = store.count();

    let user = auth
        .signup(SignupRequestBuilder::new().with_email("new.hire@company.com").build())
        .await
        .unwrap();

    assert_eq!(user.name, "new.hire");
    assert_eq!(user.role, RoleId::client());
    assert_eq!(user.status, UserStatus::Active);
    assert_eq!(user.organization.as_deref(), Some("TechCorp"));
    assert_eq!(store.count(), before + 1);
    assert_eq!(auth.current_user().map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_signup_rejections_create_nothing() {
    let (auth, store, _) = service();

    let mismatch = auth
        .signup(SignupRequestBuilder::new().with_passwords("a", "b").build())
        .await
        .unwrap_err();
    assert_eq!(mismatch.message(), "Passwords do not match");

    let no_code = auth
        .signup(SignupRequestBuilder::new().without_verification_code().build())
        .await
        .unwrap_err();
    assert_eq!(no_code.message(), "Please enter verification code");

    assert_eq!(store.write_count(), 0);
    assert!(auth.current_user().is_none());
}

#[tokio::test]
async fn test_signup_does_not_check_email_uniqueness() {
    let (auth, store, _) = service();

    auth.signup(SignupRequestBuilder::new().with_email("sarah@company.com").build())
        .await
        .unwrap();

    let sarahs = store
        .snapshot()
        .into_iter()
        .filter(|u| u.email == "sarah@company.com")
        .count();
    assert_eq!(sarahs, 2);
}

// ============================================================================
// Logout, reset, restore
// ============================================================================

#[tokio::test]
async fn test_logout_clears_session() {
    let (auth, _, events) = service();
    let user = auth.login("mike@company.com", "pw").await.unwrap();

    let previous = auth.logout().await.unwrap();

    assert_eq!(previous.map(|u| u.id), Some(user.id));
    assert!(auth.current_user().is_none());
    assert!(auth.logout().await.unwrap().is_none());
    assert_eq!(events.event_count(), 2);
}

#[tokio::test]
async fn test_password_reset_only_checks_code() {
    let (auth, store, _) = service();

    let ok = auth
        .request_password_reset(PasswordResetRequest {
            email: "sarah@company.com".into(),
            verification_code: "42".into(),
        })
        .await;
    assert!(ok.is_ok());

    let missing = auth
        .request_password_reset(PasswordResetRequest {
            email: "sarah@company.com".into(),
            verification_code: String::new(),
        })
        .await;
    assert!(missing.is_err());
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_restore_session_by_id() {
    let (auth, store, _) = service();
    let jane = store
        .snapshot()
        .into_iter()
        .find(|u| u.email == "jane@company.com")
        .unwrap();

    let restored = auth.restore_session(jane.id).await.unwrap();
    assert_eq!(restored.map(|u| u.name), Some("Jane Smith".to_string()));

    let gone = auth.restore_session(UserId::new()).await.unwrap();
    assert!(gone.is_none());
    assert!(auth.current_user().is_none());
}

#[tokio::test]
async fn test_restore_ignores_accounts_sharing_the_email() {
    let (auth, store, _) = service();
    let impostor = auth
        .signup(
            SignupRequestBuilder::new()
                .with_email("admin@company.com")
                .build(),
        )
        .await
        .unwrap();
    auth.logout().await.unwrap();

    let restored = auth.restore_session(impostor.id).await.unwrap().unwrap();

    assert_eq!(restored.role, RoleId::client());
    assert_eq!(restored.id, impostor.id);
    assert_eq!(
        store
            .snapshot()
            .iter()
            .filter(|u| u.email == "admin@company.com")
            .count(),
        2
    );
}

// ============================================================================
// Impersonation
// ============================================================================

#[tokio::test]
async fn test_developer_can_impersonate() {
    let (auth, store, events) = service();
    let developer = auth.login("john@company.com", "pw").await.unwrap();
    let sarah = store.snapshot()[3].clone();

    let target = auth.impersonate(&auth.context(), sarah.id).await.unwrap();

    assert_eq!(target.id, sarah.id);
    assert_eq!(auth.current_user().map(|u| u.email), Some(sarah.email));
    assert_eq!(
        events.get_published_events().last(),
        Some(&ServiceEvent::UserImpersonated {
            actor_id: developer.id,
            user_id: sarah.id
        })
    );
}

#[tokio::test]
async fn test_impersonating_self_is_rejected() {
    let (auth, _, _) = service();
    let developer = auth.login("john@company.com", "pw").await.unwrap();

    let err = auth
        .impersonate(&auth.context(), developer.id)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[tokio::test]
async fn test_non_developer_cannot_impersonate() {
    let (auth, store, _) = service();
    auth.login("jane@company.com", "pw").await.unwrap();
    let target = store.snapshot()[3].id;

    let err = auth.impersonate(&auth.context(), target).await.unwrap_err();

    assert_eq!(err.error_code(), "FORBIDDEN");
    assert_eq!(
        auth.current_user().map(|u| u.email),
        Some("jane@company.com".to_string())
    );
}

#[tokio::test]
async fn test_user_builder_accounts_can_sign_in() {
    let user = UserBuilder::new()
        .with_email("builder@company.com")
        .manager()
        .build();
    let store = Arc::new(MockUserStore::with_users(vec![user.clone()]));
    let auth = AuthService::new(store, Arc::new(MockEventPublisher::new()), test_auth_config());

    let signed_in = auth.login("builder@company.com", "pw").await.unwrap();
    assert_eq!(signed_in.id, user.id);
}
