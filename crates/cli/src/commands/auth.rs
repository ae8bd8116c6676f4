//! Authentication commands

use anyhow::Result;

use crate::commands::CommandContext;
use crate::interactive::{secret_or_prompt, value_or_prompt};
use crate::output::{colors, SessionView, UserView};
use migration_portal_application::{PasswordResetRequest, SignupRequest};
use migration_portal_domain::{access, available_tabs};

/// Sign in with email and password
pub async fn login(
    ctx: &CommandContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = value_or_prompt(email, "Email")?;
    let password = secret_or_prompt(password, "Password")?;

    let user = ctx.auth.login(email.trim(), &password).await?;
    ctx.remember(&user).await?;

    if ctx.chatty() {
        println!("{}", colors::success(&format!("Welcome, {}!", user.name)));
    }
    ctx.emit(&UserView::new(&user, &ctx.roles))
}

/// Fields of the signup form
#[derive(Debug, Default)]
pub struct SignupArgs {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub verification_code: Option<String>,
}

/// Register a client account and sign it in
pub async fn signup(ctx: &CommandContext, args: SignupArgs) -> Result<()> {
    let email = value_or_prompt(args.email, "Email")?;
    let password = secret_or_prompt(args.password, "Password")?;
    let confirm_password = secret_or_prompt(args.confirm_password, "Confirm password")?;
    let verification_code = value_or_prompt(args.verification_code, "Verification code")?;

    let user = ctx
        .auth
        .signup(SignupRequest {
            email: email.trim().to_string(),
            password,
            confirm_password,
            verification_code,
        })
        .await?;
    ctx.remember(&user).await?;

    if ctx.chatty() {
        println!("{}", colors::success("Account created. You are now signed in."));
    }
    ctx.emit(&UserView::new(&user, &ctx.roles))
}

/// Sign out and forget the session
pub async fn logout(ctx: &CommandContext) -> Result<()> {
    let previous = ctx.auth.logout().await?;
    ctx.forget().await?;

    match previous {
        Some(user) => println!(
            "{}",
            colors::success(&format!("Signed out {}.", user.email))
        ),
        None => println!("{}", colors::warning("Not currently signed in.")),
    }

    Ok(())
}

/// Show the signed-in account, its permissions and dashboard tabs
pub async fn whoami(ctx: &CommandContext) -> Result<()> {
    let session = ctx.require_auth()?;
    let user = session.require_authenticated()?;

    let permissions: Vec<String> = ctx
        .roles
        .get(user.role.as_str())
        .map(|role| role.permissions.iter().map(|p| p.label()).collect())
        .unwrap_or_default();

    let view = SessionView {
        user: UserView::new(user, &ctx.roles),
        permissions,
        tabs: available_tabs(&ctx.roles, Some(user))
            .into_iter()
            .map(|tab| tab.name().to_string())
            .collect(),
        can_manage_users: access::can_manage_users(&ctx.roles, user.role.as_str()),
    };

    ctx.emit(&view)
}

/// Request a password reset link
pub async fn reset_password(
    ctx: &CommandContext,
    email: Option<String>,
    verification_code: Option<String>,
) -> Result<()> {
    let email = value_or_prompt(email, "Email")?;
    let verification_code = value_or_prompt(verification_code, "Verification code")?;

    ctx.auth
        .request_password_reset(PasswordResetRequest {
            email: email.trim().to_string(),
            verification_code,
        })
        .await?;

    println!(
        "{}",
        colors::success(&format!("Password reset link sent to {}.", email.trim()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use migration_portal_domain::RoleId;

    #[tokio::test]
    async fn test_login_is_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::context(dir.path()).await;

        login(&ctx, Some("sarah@company.com".into()), Some("pw".into()))
            .await
            .unwrap();

        // A fresh context over the same data directory restores the session.
        let restored = test_support::context(dir.path()).await;
        assert_eq!(
            restored.auth.current_user().map(|u| u.email),
            Some("sarah@company.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_login_keeps_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::context(dir.path()).await;

        let err = login(&ctx, Some("admin@company.com".into()), Some("nope".into()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid password"));
        assert!(ctx.auth.current_user().is_none());
        assert!(!dir.path().join("session.json").exists());
    }

    #[tokio::test]
    async fn test_signup_signs_in_client() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::context(dir.path()).await;

        signup(
            &ctx,
            SignupArgs {
                email: Some("pat@company.com".into()),
                password: Some("pw".into()),
                confirm_password: Some("pw".into()),
                verification_code: Some("123456".into()),
            },
        )
        .await
        .unwrap();

        let user = ctx.auth.current_user().unwrap();
        assert_eq!(user.name, "pat");
        assert_eq!(user.role, RoleId::client());
    }

    #[tokio::test]
    async fn test_signup_with_taken_email_restores_the_new_account() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::context(dir.path()).await;

        signup(
            &ctx,
            SignupArgs {
                email: Some("admin@company.com".into()),
                password: Some("x".into()),
                confirm_password: Some("x".into()),
                verification_code: Some("1".into()),
            },
        )
        .await
        .unwrap();
        let created = ctx.auth.current_user().unwrap();

        let restored = test_support::context(dir.path()).await;
        let user = restored.auth.current_user().unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(user.role, RoleId::client());
        assert_eq!(user.name, "admin");
    }

    #[tokio::test]
    async fn test_logout_forgets_session() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::signed_in(dir.path(), "mike@company.com").await;

        logout(&ctx).await.unwrap();

        assert!(ctx.auth.current_user().is_none());
        let restored = test_support::context(dir.path()).await;
        assert!(restored.auth.current_user().is_none());
    }

    #[tokio::test]
    async fn test_whoami_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::context(dir.path()).await;

        assert!(whoami(&ctx).await.is_err());
    }

    #[tokio::test]
    async fn test_reset_requires_code() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::context(dir.path()).await;

        assert!(reset_password(&ctx, Some("sarah@company.com".into()), Some(String::new()))
            .await
            .is_err());
        assert!(reset_password(&ctx, Some("sarah@company.com".into()), Some("1".into()))
            .await
            .is_ok());
    }
}
