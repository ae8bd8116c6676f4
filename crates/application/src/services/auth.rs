//! Authentication Service
//!
//! Mock sign-in against the user store plus the single session slot.
//!
//! This is demo authentication: configured privileged accounts share one
//! plaintext password and every other account accepts any non-empty
//! password. Nothing here is suitable for a real deployment.

use super::{EventPublisher, ServiceContext, ServiceEvent, UserStorePort};
use crate::validation::{PasswordResetRequest, SignupRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use chrono::Utc;
use migration_portal_common::AuthConfig;
use migration_portal_domain::{
    user::name_from_email, AuthenticationError, AuthorizationError, RoleId, User, UserId,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Authentication service implementation
pub struct AuthService<S, E>
where
    S: UserStorePort,
    E: EventPublisher,
{
    store: Arc<S>,
    event_publisher: Arc<E>,
    config: AuthConfig,
    session: RwLock<Option<User>>,
}

impl<S, E> AuthService<S, E>
where
    S: UserStorePort,
    E: EventPublisher,
{
    pub fn new(store: Arc<S>, event_publisher: Arc<E>, config: AuthConfig) -> Self {
        Self {
            store,
            event_publisher,
            config,
            session: RwLock::new(None),
        }
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.session.read().clone()
    }

    /// A service context for the current session.
    pub fn context(&self) -> ServiceContext {
        ServiceContext::for_session(self.current_user())
    }

    /// Sign in by email.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ApplicationResult<User> {
        if password.is_empty() {
            return Err(AuthenticationError::EmptyPassword.into());
        }

        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthenticationError::InvalidCredentials)?;

        if self.config.is_privileged(&user.email)
            && self.config.shared_password.as_deref() != Some(password)
        {
            warn!(email = %user.email, "Rejected password for privileged account");
            return Err(AuthenticationError::InvalidPassword.into());
        }

        let user = user.with_last_login(Utc::now());
        self.store.replace(user.clone()).await?;
        *self.session.write() = Some(user.clone());

        info!(user_id = %user.id, role = %user.role, "User signed in");

        self.event_publisher
            .publish(ServiceEvent::UserSignedIn { user_id: user.id })
            .await?;

        Ok(user)
    }

    /// Register a `client` account and sign it in.
    ///
    /// Email uniqueness is not checked.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ApplicationResult<User> {
        request.validate_all().ensure_valid()?;

        let user = User::new(
            name_from_email(&request.email),
            request.email,
            RoleId::client(),
            self.config.default_signup_organization.clone(),
        )
        .with_last_login(Utc::now());

        self.store.append(user.clone()).await?;
        *self.session.write() = Some(user.clone());

        info!(user_id = %user.id, "User registered");

        self.event_publisher
            .publish(ServiceEvent::UserRegistered { user_id: user.id })
            .await?;

        Ok(user)
    }

    /// Clear the session slot, returning the user that was signed in.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ApplicationResult<Option<User>> {
        let previous = self.session.write().take();

        if let Some(user) = &previous {
            info!(user_id = %user.id, "User signed out");
            self.event_publisher
                .publish(ServiceEvent::UserSignedOut { user_id: user.id })
                .await?;
        }

        Ok(previous)
    }

    /// Accept a password reset request. Only the verification code's presence
    /// is checked and no state changes.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn request_password_reset(&self, request: PasswordResetRequest) -> ApplicationResult<()> {
        request.validate_all().ensure_valid()?;

        info!("Password reset link sent");

        self.event_publisher
            .publish(ServiceEvent::PasswordResetRequested {
                email: request.email,
            })
            .await
    }

    /// Put a stored account back into the session slot, e.g. after a restart.
    ///
    /// Looked up by id: emails are not unique. Returns `None` and leaves the
    /// slot empty if the account no longer exists.
    #[instrument(skip(self))]
    pub async fn restore_session(&self, user_id: UserId) -> ApplicationResult<Option<User>> {
        let user = self.store.find_by_id(user_id).await?;
        *self.session.write() = user.clone();
        Ok(user)
    }

    /// Switch the session to another account. Developers only.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn impersonate(&self, ctx: &ServiceContext, user_id: UserId) -> ApplicationResult<User> {
        let actor = ctx.require_authenticated()?;

        if !actor.has_role(RoleId::DEVELOPER) {
            warn!(actor = %actor.email, "Impersonation denied");
            return Err(ApplicationError::Forbidden(
                "Only developers can impersonate users".to_string(),
            ));
        }

        if actor.id == user_id {
            return Err(ApplicationError::InvalidInput(
                "You are already signed in as this user".to_string(),
            ));
        }

        let target = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("User not found: {}", user_id)))?;

        *self.session.write() = Some(target.clone());

        info!(actor = %actor.email, user_id = %target.id, "Now impersonating user");

        self.event_publisher
            .publish(ServiceEvent::UserImpersonated {
                actor_id: actor.id,
                user_id: target.id,
            })
            .await?;

        Ok(target)
    }

    /// Fail unless someone is signed in.
    pub fn require_session(&self) -> ApplicationResult<User> {
        self.current_user()
            .ok_or_else(|| AuthorizationError::NotSignedIn.into())
    }
}
