//! Integration tests for the snapshot-backed stores
//!
//! Each test works in its own temporary data directory.

use migration_portal_application::{
    NoOpEventPublisher, ProjectRepositoryPort, ProjectService, ServiceContext, UserService,
    UserStorePort,
};
use migration_portal_common::PortalConfig;
use migration_portal_infrastructure::{
    JsonProjectRepository, JsonUserStore, PortalStores, PROJECTS_FILE, USERS_FILE,
};
use migration_portal_testing::{builders::*, fixtures::*};
use std::sync::Arc;

fn config_in(dir: &std::path::Path) -> PortalConfig {
    let mut config = PortalConfig::default();
    config.storage.data_dir = dir.to_path_buf();
    config
}

#[tokio::test]
async fn test_open_seeds_missing_snapshots() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    // Act
    let stores = PortalStores::open(&config).await.unwrap();

    // Assert
    assert!(dir.path().join(USERS_FILE).exists());
    assert!(dir.path().join(PROJECTS_FILE).exists());
    let emails: Vec<String> = stores
        .users
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.email)
        .collect();
    let expected: Vec<String> = demo_users().into_iter().map(|u| u.email).collect();
    assert_eq!(emails, expected);
    assert_eq!(stores.projects.len(), config.projects.len());
}

#[tokio::test]
async fn test_changes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(USERS_FILE);
    let extra = UserBuilder::new().with_email("extra@company.com").build();

    {
        let store = JsonUserStore::open(&path, demo_users()).await.unwrap();
        store.append(extra.clone()).await.unwrap();
    }

    // The seed is ignored once the snapshot exists.
    let reopened = JsonUserStore::open(&path, Vec::new()).await.unwrap();
    assert_eq!(reopened.len(), 7);
    assert_eq!(
        reopened.find_by_id(extra.id).await.unwrap().map(|u| u.email),
        Some("extra@company.com".to_string())
    );
}

#[tokio::test]
async fn test_remove_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let users = demo_users();
    let store = JsonUserStore::open(dir.path().join(USERS_FILE), users.clone())
        .await
        .unwrap();

    let removed = store.remove(users[2].id).await.unwrap();
    let missing = store.remove(users[2].id).await.unwrap();

    assert_eq!(removed.map(|u| u.id), Some(users[2].id));
    assert!(missing.is_none());
    let remaining: Vec<_> = store.list().await.unwrap().into_iter().map(|u| u.id).collect();
    let expected: Vec<_> = users
        .iter()
        .filter(|u| u.id != users[2].id)
        .map(|u| u.id)
        .collect();
    assert_eq!(remaining, expected);
}

#[tokio::test]
async fn test_replace_unknown_user_is_not_found() {
    let store = JsonUserStore::in_memory(Vec::new());

    let err = store
        .replace(UserBuilder::new().build())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "NOT_FOUND");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_find_by_email_returns_first_match() {
    let first = UserBuilder::new().with_email("dup@company.com").build();
    let second = UserBuilder::new().with_email("dup@company.com").build();
    let store = JsonUserStore::in_memory(vec![first.clone(), second]);

    let found = store.find_by_email("dup@company.com").await.unwrap();

    assert_eq!(found.map(|u| u.id), Some(first.id));
}

#[tokio::test]
async fn test_user_service_over_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(USERS_FILE);
    let users = demo_users();
    let admin = users[1].clone();
    let store = Arc::new(JsonUserStore::open(&path, users).await.unwrap());
    let service = UserService::new(
        store,
        Arc::new(NoOpEventPublisher),
        Arc::new(standard_role_table()),
    );
    let ctx = ServiceContext::authenticated(admin, "test".into());

    let created = service
        .create_user(&ctx, CreateUserRequestBuilder::new().build())
        .await
        .unwrap();

    let reopened = JsonUserStore::open(&path, Vec::new()).await.unwrap();
    assert_eq!(
        reopened.find_by_id(created.id).await.unwrap().map(|u| u.role),
        Some(created.role)
    );
}

#[tokio::test]
async fn test_projects_persist_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROJECTS_FILE);
    let repo = Arc::new(JsonProjectRepository::open(&path, Vec::new()).await.unwrap());
    let service = ProjectService::new(
        repo.clone(),
        Arc::new(NoOpEventPublisher),
        Arc::new(standard_role_table()),
    );
    let ctx = ServiceContext::authenticated(create_test_user(), "test".into());

    let first = service
        .create_project(&ctx, ProjectRequestBuilder::new().with_name("First").build())
        .await
        .unwrap();
    let second = service
        .create_project(&ctx, ProjectRequestBuilder::new().with_name("Second").build())
        .await
        .unwrap();

    let reopened = JsonProjectRepository::open(&path, Vec::new()).await.unwrap();
    let ids: Vec<_> = reopened.list().await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(reopened.get(second.id).await.unwrap(), Some(second));
}

#[tokio::test]
async fn test_in_memory_stores_leave_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let stores = PortalStores::in_memory(&config);
    stores
        .users
        .append(UserBuilder::new().build())
        .await
        .unwrap();

    assert!(!dir.path().join(USERS_FILE).exists());
    assert_eq!(stores.users.len(), 7);
}
