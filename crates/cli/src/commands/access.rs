//! Role table inspection and permission checks

use anyhow::Result;

use crate::commands::CommandContext;
use crate::output::{AccessDecision, RoleList, TabList};
use migration_portal_domain::{available_tabs, creatable_roles, has_permission};

/// List the configured roles in table order
pub fn roles_list(ctx: &CommandContext) -> Result<()> {
    let roles: RoleList = ctx.roles.iter().collect();
    ctx.emit(&roles)
}

/// Roles that `role` may assign; defaults to the signed-in user's role
pub fn roles_creatable(ctx: &CommandContext, role: Option<String>) -> Result<()> {
    let role = match role {
        Some(role) => role,
        None => ctx.require_auth()?.require_authenticated()?.role.to_string(),
    };

    let roles: RoleList = creatable_roles(&ctx.roles, &role).into_iter().collect();
    ctx.emit(&roles)
}

/// Whether `role` holds `permission`
pub fn check(ctx: &CommandContext, role: String, permission: String) -> Result<()> {
    let granted = has_permission(&ctx.roles, &role, &permission);
    ctx.emit(&AccessDecision {
        role,
        permission,
        granted,
    })
}

/// Dashboard tabs available to the signed-in user; none when signed out
pub fn tabs(ctx: &CommandContext) -> Result<()> {
    let user = ctx.auth.current_user();
    let tabs: TabList = available_tabs(&ctx.roles, user.as_ref()).into_iter().collect();
    ctx.emit(&tabs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    #[tokio::test]
    async fn test_creatable_defaults_to_session_role() {
        let dir = tempfile::tempdir().unwrap();
        let signed_out = test_support::context(dir.path()).await;
        assert!(roles_creatable(&signed_out, None).is_err());
        assert!(roles_creatable(&signed_out, Some("manager".into())).is_ok());

        let signed_in = test_support::signed_in(dir.path(), "jane@company.com").await;
        assert!(roles_creatable(&signed_in, None).is_ok());
    }

    #[tokio::test]
    async fn test_listing_commands_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::context(dir.path()).await;

        assert!(roles_list(&ctx).is_ok());
        assert!(check(&ctx, "auditor".into(), "read_dashboard".into()).is_ok());
        assert!(tabs(&ctx).is_ok());
    }
}
