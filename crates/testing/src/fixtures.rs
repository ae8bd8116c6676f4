//! Test fixtures for generating domain entities with realistic data.

use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Fake,
};
use migration_portal_common::{AuthConfig, PortalConfig};
use migration_portal_domain::{
    role::{RoleId, RoleTable},
    user::User,
};

/// Password shared by the privileged demo accounts
pub const DEMO_SHARED_PASSWORD: &str = "Aa1234567$$$";

/// The built-in four-role table
pub fn standard_role_table() -> RoleTable {
    RoleTable::standard()
}

/// Mock authentication policy matching the built-in demo accounts
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        privileged_accounts: vec![
            "gundo@company.com".to_string(),
            "admin@company.com".to_string(),
        ],
        shared_password: Some(DEMO_SHARED_PASSWORD.to_string()),
        default_signup_organization: Some("TechCorp".to_string()),
    }
}

/// The six demo accounts, all in TechCorp
pub fn demo_users() -> Vec<User> {
    PortalConfig::default().seed_users()
}

/// Find a demo account by email
pub fn demo_user(email: &str) -> Option<User> {
    demo_users().into_iter().find(|u| u.email == email)
}

/// Create a test user with generated name and email
pub fn create_test_user() -> User {
    create_test_user_with_role(RoleId::CLIENT, Some("TechCorp"))
}

/// Create a test user with a specific role and organization
pub fn create_test_user_with_role(role: &str, organization: Option<&str>) -> User {
    User::new(
        Name().fake::<String>(),
        SafeEmail().fake::<String>(),
        RoleId::new(role),
        organization.map(String::from),
    )
}

/// A manager in org "X" and the users [client X, client Y, manager X].
pub fn manager_scenario() -> (User, Vec<User>) {
    let manager = create_test_user_with_role(RoleId::MANAGER, Some("X"));
    let users = vec![
        create_test_user_with_role(RoleId::CLIENT, Some("X")),
        create_test_user_with_role(RoleId::CLIENT, Some("Y")),
        create_test_user_with_role(RoleId::MANAGER, Some("X")),
    ];
    (manager, users)
}

/// Users of every standard role spread over two organizations.
pub fn mixed_organization_users() -> Vec<User> {
    let roles = [
        RoleId::CLIENT,
        RoleId::MANAGER,
        RoleId::LOCAL_ADMIN,
        RoleId::DEVELOPER,
    ];
    ["Acme", "Globex"]
        .into_iter()
        .flat_map(|org| {
            roles
                .into_iter()
                .map(move |role| create_test_user_with_role(role, Some(org)))
        })
        .collect()
}
