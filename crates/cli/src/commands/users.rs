//! User management commands

use anyhow::Result;
use colored::Colorize;

use crate::commands::CommandContext;
use crate::interactive::{confirm, secret_or_prompt, select, value_or_prompt};
use crate::output::{colors, UserList, UserView};
use migration_portal_application::{CreateUserRequest, ServiceContext};
use migration_portal_domain::{User, UserId};

/// List the accounts visible to the signed-in user
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let session = ctx.require_auth()?;
    let users = ctx.users.visible_users(&session).await?;

    if users.is_empty() && ctx.chatty() {
        println!("{}", colors::warning("No users to show."));
        return Ok(());
    }

    ctx.emit(&UserList::new(&users, &ctx.roles))
}

/// Fields of the add-user form
#[derive(Debug, Default)]
pub struct CreateArgs {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub organization: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Create an account of a role the signed-in user may assign
pub async fn create(ctx: &CommandContext, args: CreateArgs) -> Result<()> {
    let session = ctx.require_auth()?;

    if !ctx.users.manageable(&session) {
        anyhow::bail!("Your role cannot manage users.");
    }

    let role = match args.role {
        Some(role) => role,
        None => {
            let roles = ctx.users.creatable_roles(&session)?;
            if roles.is_empty() {
                anyhow::bail!("There are no roles you can assign.");
            }
            let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
            let index = select("Role", &names)?;
            roles[index].id.to_string()
        }
    };

    // Reject before asking for anything else.
    ctx.users.authorize_creation(&session, &role).ensure_allowed()?;

    let request = CreateUserRequest {
        name: value_or_prompt(args.name, "Full name")?,
        email: value_or_prompt(args.email, "Email")?,
        role,
        organization: args.organization,
        password: secret_or_prompt(args.password, "Password")?,
        confirm_password: secret_or_prompt(args.confirm_password, "Confirm password")?,
    };

    let user = ctx.users.create_user(&session, request).await?;

    if ctx.chatty() {
        println!(
            "{}",
            colors::success(&format!("Created {} ({}).", user.email, user.role))
        );
    }
    ctx.emit(&UserView::new(&user, &ctx.roles))
}

/// Delete an account, identified by id or email
pub async fn delete(ctx: &CommandContext, target: String, yes: bool) -> Result<()> {
    let session = ctx.require_auth()?;
    let user = resolve(ctx, &session, &target).await?;

    // Denials are reported before the confirmation prompt.
    ctx.users.authorize_deletion(&session, user.id).ensure_allowed()?;

    if !yes && !confirm(&format!("Delete {} <{}>?", user.name, user.email))? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = ctx.users.delete_user(&session, user.id).await?;
    println!(
        "{} {}",
        "Deleted".red().bold(),
        colors::dim(&removed.email)
    );
    Ok(())
}

/// Switch the session to another account (developers only)
pub async fn impersonate(ctx: &CommandContext, target: String) -> Result<()> {
    let session = ctx.require_auth()?;
    let user = resolve(ctx, &session, &target).await?;

    let user = ctx.auth.impersonate(&session, user.id).await?;
    ctx.remember(&user).await?;

    if ctx.chatty() {
        println!(
            "{}",
            colors::info(&format!("Now acting as {} <{}>.", user.name, user.email))
        );
    }
    ctx.emit(&UserView::new(&user, &ctx.roles))
}

/// Find an account by UUID or email: the actor's own first, then the
/// accounts visible to them.
async fn resolve(ctx: &CommandContext, session: &ServiceContext, target: &str) -> Result<User> {
    let target = target.trim();
    let actor = session.require_authenticated()?;

    let id = target.parse::<UserId>().ok();
    if id == Some(actor.id) || actor.email == target {
        return Ok(actor.clone());
    }

    if let Some(id) = id {
        let visible = ctx.users.visible_users(session).await?;
        return visible
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| anyhow::anyhow!("User not found: {}", target));
    }

    Ok(ctx.users.find_visible_by_email(session, target).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    fn new_client() -> CreateArgs {
        CreateArgs {
            name: Some("Pat Lee".into()),
            email: Some("pat@company.com".into()),
            role: Some("client".into()),
            organization: None,
            password: Some("pw".into()),
            confirm_password: Some("pw".into()),
        }
    }

    #[tokio::test]
    async fn test_manager_creates_client() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::signed_in(dir.path(), "mike@company.com").await;

        create(&ctx, new_client()).await.unwrap();

        let session = ctx.require_auth().unwrap();
        let created = ctx
            .users
            .find_visible_by_email(&session, "pat@company.com")
            .await
            .unwrap();
        assert_eq!(created.organization.as_deref(), Some("TechCorp"));
    }

    #[tokio::test]
    async fn test_client_cannot_create() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::signed_in(dir.path(), "sarah@company.com").await;

        assert!(create(&ctx, new_client()).await.is_err());
    }

    #[tokio::test]
    async fn test_manager_cannot_assign_admin() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::signed_in(dir.path(), "mike@company.com").await;

        let err = create(
            &ctx,
            CreateArgs {
                role: Some("local_admin".into()),
                ..new_client()
            },
        )
        .await
        .unwrap_err();

        assert!(err
            .to_string()
            .contains("You do not have permission to create this user role"));
    }

    #[tokio::test]
    async fn test_admin_deletes_by_email_without_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::signed_in(dir.path(), "jane@company.com").await;

        delete(&ctx, "sarah@company.com".into(), true).await.unwrap();

        let session = ctx.require_auth().unwrap();
        assert!(ctx
            .users
            .find_visible_by_email(&session, "sarah@company.com")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_developer_cannot_delete_self() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::signed_in(dir.path(), "john@company.com").await;
        let me = ctx.auth.current_user().unwrap();

        let err = delete(&ctx, me.id.to_string(), true).await.unwrap_err();

        assert!(err.to_string().contains("You cannot delete your own account"));
    }

    #[tokio::test]
    async fn test_local_admin_self_deletion_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::signed_in(dir.path(), "jane@company.com").await;
        let me = ctx.auth.current_user().unwrap();

        let by_id = delete(&ctx, me.id.to_string(), true).await.unwrap_err();
        let by_email = delete(&ctx, me.email.clone(), true).await.unwrap_err();

        assert!(by_id.to_string().contains("You cannot delete your own account"));
        assert!(by_email.to_string().contains("You cannot delete your own account"));
    }

    #[tokio::test]
    async fn test_manager_deleting_self_lacks_permission() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::signed_in(dir.path(), "mike@company.com").await;

        let err = delete(&ctx, "mike@company.com".into(), true).await.unwrap_err();

        assert!(err
            .to_string()
            .contains("You do not have permission to delete users"));
    }

    #[tokio::test]
    async fn test_impersonation_is_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::signed_in(dir.path(), "john@company.com").await;

        impersonate(&ctx, "sarah@company.com".into()).await.unwrap();

        let restored = test_support::context(dir.path()).await;
        assert_eq!(
            restored.auth.current_user().map(|u| u.email),
            Some("sarah@company.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_list_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::context(dir.path()).await;

        assert!(list(&ctx).await.is_err());
    }
}
