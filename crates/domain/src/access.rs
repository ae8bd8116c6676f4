//! Access control evaluator.
//!
//! Three pure predicates decide what a signed-in user may do:
//!
//! - [`has_permission`]: does a role hold a permission
//! - [`can_create_role`]: may an actor create an account of a given role
//! - [`accessible_users`]: which user records an actor may see
//!
//! The role table is always passed in explicitly. Unknown roles never
//! raise errors; they simply hold no permissions.

use crate::errors::AuthorizationError;
use crate::identifiers::UserId;
use crate::role::{permissions, RoleDefinition, RoleId, RoleTable};
use crate::user::User;

/// True iff `role` is defined and its permission set contains `permission`
/// or the wildcard.
pub fn has_permission(table: &RoleTable, role: &str, permission: &str) -> bool {
    table
        .get(role)
        .map(|definition| definition.grants(permission))
        .unwrap_or(false)
}

/// Role-creation matrix.
///
/// This is a fixed list of allowances rather than a level comparison:
/// a `local_admin` sits above `local_admin` accounts by no measure, and
/// may not create them.
pub fn can_create_role(table: &RoleTable, actor_role: &str, target_role: &str) -> bool {
    if !table.contains(actor_role) || !table.contains(target_role) {
        return false;
    }

    match actor_role {
        RoleId::DEVELOPER => true,
        RoleId::LOCAL_ADMIN => matches!(target_role, RoleId::CLIENT | RoleId::MANAGER),
        RoleId::MANAGER => target_role == RoleId::CLIENT,
        _ => false,
    }
}

/// Roles an actor may assign when creating an account, in table order.
pub fn creatable_roles<'a>(table: &'a RoleTable, actor_role: &str) -> Vec<&'a RoleDefinition> {
    table
        .iter()
        .filter(|role| can_create_role(table, actor_role, role.id.as_str()))
        .collect()
}

/// The subset of `all_users` visible to `actor`, in input order.
///
/// Developers see everyone. Local admins see clients and managers of their
/// own organization; managers see clients of their own organization. Any
/// other role sees only itself, whether or not it appears in `all_users`.
pub fn accessible_users(actor: &User, all_users: &[User]) -> Vec<User> {
    let visible_roles: &[&str] = match actor.role.as_str() {
        RoleId::DEVELOPER => return all_users.to_vec(),
        RoleId::LOCAL_ADMIN => &[RoleId::CLIENT, RoleId::MANAGER],
        RoleId::MANAGER => &[RoleId::CLIENT],
        _ => return vec![actor.clone()],
    };

    all_users
        .iter()
        .filter(|user| actor.shares_organization_with(user))
        .filter(|user| visible_roles.contains(&user.role.as_str()))
        .cloned()
        .collect()
}

/// Whether the actor may open user management at all.
pub fn can_manage_users(table: &RoleTable, role: &str) -> bool {
    has_permission(table, role, permissions::MANAGE_TEAM_USERS)
        || has_permission(table, role, permissions::MANAGE_ORGANIZATION_USERS)
}

/// Deletion check: the permission is tested before the self-deletion guard.
pub fn authorize_deletion(
    table: &RoleTable,
    actor: &User,
    target: UserId,
) -> Result<(), AuthorizationError> {
    if !has_permission(table, actor.role.as_str(), permissions::MANAGE_ORGANIZATION_USERS) {
        return Err(AuthorizationError::DeletionDenied);
    }

    if actor.id == target {
        return Err(AuthorizationError::SelfDeletion);
    }

    Ok(())
}

/// Creation check returning the user-facing denial.
pub fn authorize_role_creation(
    table: &RoleTable,
    actor: &User,
    target_role: &str,
) -> Result<(), AuthorizationError> {
    if can_create_role(table, actor.role.as_str(), target_role) {
        Ok(())
    } else {
        Err(AuthorizationError::RoleCreationDenied {
            actor_role: actor.role.to_string(),
            target_role: target_role.to_string(),
        })
    }
}

/// Requires `permission`, returning [`AuthorizationError::MissingPermission`] otherwise.
pub fn require_permission(
    table: &RoleTable,
    actor: &User,
    permission: &str,
) -> Result<(), AuthorizationError> {
    if has_permission(table, actor.role.as_str(), permission) {
        Ok(())
    } else {
        Err(AuthorizationError::MissingPermission {
            role: actor.role.to_string(),
            permission: permission.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleDefinition;

    fn user(role: &str, org: Option<&str>) -> User {
        User::new(role, format!("{role}@example.com"), RoleId::new(role), org.map(String::from))
    }

    #[test]
    fn test_unknown_role_has_no_permissions() {
        let table = RoleTable::standard();
        assert!(!has_permission(&table, "auditor", "read_dashboard"));
        assert!(!has_permission(&table, "", "*"));
    }

    #[test]
    fn test_standard_permissions() {
        let table = RoleTable::standard();
        assert!(has_permission(&table, "client", "read_own_data"));
        assert!(!has_permission(&table, "client", "read_analytics"));
        assert!(has_permission(&table, "manager", "manage_team_users"));
        assert!(!has_permission(&table, "manager", "manage_organization_users"));
        assert!(has_permission(&table, "local_admin", "manage_organization_users"));
        assert!(!has_permission(&table, "local_admin", "read_analytics"));
        assert!(has_permission(&table, "developer", "read_analytics"));
    }

    #[test]
    fn test_local_admin_cannot_create_peer() {
        let table = RoleTable::standard();
        assert!(!can_create_role(&table, "local_admin", "local_admin"));
        assert!(!can_create_role(&table, "local_admin", "developer"));
    }

    #[test]
    fn test_creation_requires_defined_roles() {
        let table = RoleTable::standard();
        assert!(!can_create_role(&table, "developer", "auditor"));
        assert!(!can_create_role(&table, "root", "client"));
    }

    #[test]
    fn test_matrix_ignores_levels_of_custom_tables() {
        // A custom table where "client" outranks everyone still follows the matrix.
        let table = RoleTable::new([
            RoleDefinition::new("client", "Client", 9, ["*"]),
            RoleDefinition::new("manager", "Manager", 2, ["read_dashboard"]),
        ])
        .unwrap();
        assert!(!can_create_role(&table, "client", "manager"));
        assert!(can_create_role(&table, "manager", "client"));
    }

    #[test]
    fn test_creatable_roles_in_table_order() {
        let table = RoleTable::standard();
        let ids: Vec<&str> = creatable_roles(&table, "local_admin")
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["client", "manager"]);
        assert!(creatable_roles(&table, "client").is_empty());
    }

    #[test]
    fn test_local_admin_visibility() {
        let admin = user("local_admin", Some("Acme"));
        let users = vec![
            user("client", Some("Acme")),
            user("developer", Some("Acme")),
            user("manager", Some("Acme")),
            user("local_admin", Some("Acme")),
            user("manager", Some("Globex")),
        ];
        let visible = accessible_users(&admin, &users);
        assert_eq!(visible, vec![users[0].clone(), users[2].clone()]);
    }

    #[test]
    fn test_unknown_role_sees_only_self() {
        let auditor = user("auditor", Some("Acme"));
        let users = vec![user("client", Some("Acme"))];
        assert_eq!(accessible_users(&auditor, &users), vec![auditor.clone()]);
    }

    #[test]
    fn test_deletion_checks_permission_before_self() {
        let table = RoleTable::standard();
        let manager = user("manager", Some("Acme"));
        assert_eq!(
            authorize_deletion(&table, &manager, manager.id),
            Err(AuthorizationError::DeletionDenied)
        );

        let admin = user("local_admin", Some("Acme"));
        assert_eq!(
            authorize_deletion(&table, &admin, admin.id),
            Err(AuthorizationError::SelfDeletion)
        );
        assert!(authorize_deletion(&table, &admin, UserId::new()).is_ok());
    }

    #[test]
    fn test_can_manage_users() {
        let table = RoleTable::standard();
        assert!(!can_manage_users(&table, "client"));
        assert!(can_manage_users(&table, "manager"));
        assert!(can_manage_users(&table, "local_admin"));
        assert!(can_manage_users(&table, "developer"));
    }
}
