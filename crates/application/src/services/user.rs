//! User Service
//!
//! Account management under the access rules: creating accounts of the
//! roles an actor may assign, deleting accounts, and listing the accounts
//! an actor may see.

use super::{AuthorizationResult, EventPublisher, ServiceContext, ServiceEvent};
use crate::validation::{CreateUserRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use migration_portal_domain::{
    access, AuthorizationError, RoleDefinition, RoleId, RoleTable, User, UserId,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Ordered user collection.
///
/// `list` returns users in insertion order; accounts are never edited in
/// place, `replace` swaps a whole record.
#[async_trait]
pub trait UserStorePort: Send + Sync {
    async fn append(&self, user: User) -> Result<(), ApplicationError>;
    async fn list(&self) -> Result<Vec<User>, ApplicationError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApplicationError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError>;
    async fn replace(&self, user: User) -> Result<(), ApplicationError>;
    /// Remove a user, returning the removed record if it existed.
    async fn remove(&self, id: UserId) -> Result<Option<User>, ApplicationError>;
}

/// User service implementation
pub struct UserService<S, E>
where
    S: UserStorePort,
    E: EventPublisher,
{
    store: Arc<S>,
    event_publisher: Arc<E>,
    roles: Arc<RoleTable>,
}

impl<S, E> UserService<S, E>
where
    S: UserStorePort,
    E: EventPublisher,
{
    pub fn new(store: Arc<S>, event_publisher: Arc<E>, roles: Arc<RoleTable>) -> Self {
        Self {
            store,
            event_publisher,
            roles,
        }
    }

    /// Whether the actor may open user management.
    pub fn manageable(&self, ctx: &ServiceContext) -> bool {
        ctx.actor
            .as_ref()
            .map(|actor| access::can_manage_users(&self.roles, actor.role.as_str()))
            .unwrap_or(false)
    }

    /// Roles the actor may assign, in table order.
    pub fn creatable_roles(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<RoleDefinition>> {
        let actor = ctx.require_authenticated()?;
        Ok(access::creatable_roles(&self.roles, actor.role.as_str())
            .into_iter()
            .cloned()
            .collect())
    }

    /// Check whether the actor may create an account of `role`.
    pub fn authorize_creation(&self, ctx: &ServiceContext, role: &str) -> AuthorizationResult {
        match ctx.actor.as_ref() {
            Some(actor) => access::authorize_role_creation(&self.roles, actor, role).into(),
            None => AuthorizationResult::deny(AuthorizationError::NotSignedIn.to_string()),
        }
    }

    /// Check whether the actor may delete `user_id`.
    pub fn authorize_deletion(&self, ctx: &ServiceContext, user_id: UserId) -> AuthorizationResult {
        match ctx.actor.as_ref() {
            Some(actor) => access::authorize_deletion(&self.roles, actor, user_id).into(),
            None => AuthorizationResult::deny(AuthorizationError::NotSignedIn.to_string()),
        }
    }

    /// Users visible to the actor, in store order.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn visible_users(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<User>> {
        let actor = ctx.require_authenticated()?;
        let all = self.store.list().await?;
        let visible = access::accessible_users(actor, &all);

        debug!(
            role = %actor.role,
            total = all.len(),
            visible = visible.len(),
            "Filtered user list"
        );

        Ok(visible)
    }

    /// Create an account on behalf of the signed-in actor.
    ///
    /// The role check runs before request validation, and nothing is stored
    /// unless both pass.
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id, role = %request.role))]
    pub async fn create_user(
        &self,
        ctx: &ServiceContext,
        request: CreateUserRequest,
    ) -> ApplicationResult<User> {
        let actor = ctx.require_authenticated()?;

        if let Err(denial) = access::authorize_role_creation(&self.roles, actor, &request.role) {
            warn!(actor = %actor.email, target_role = %request.role, "Role creation denied");
            return Err(denial.into());
        }

        let request = request.normalized();
        request.validate_all().ensure_valid()?;

        let organization = request
            .organization
            .filter(|org| !org.trim().is_empty())
            .or_else(|| actor.organization.clone());

        let user = User::new(
            request.name,
            request.email,
            RoleId::new(request.role),
            organization,
        );

        self.store.append(user.clone()).await?;

        info!(user_id = %user.id, email = %user.email, role = %user.role, "User created");

        self.event_publisher
            .publish(ServiceEvent::UserCreated {
                user_id: user.id,
                role: user.role.to_string(),
            })
            .await?;

        Ok(user)
    }

    /// Delete an account. Returns the removed record.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn delete_user(
        &self,
        ctx: &ServiceContext,
        user_id: UserId,
    ) -> ApplicationResult<User> {
        let actor = ctx.require_authenticated()?;

        if let Err(denial) = access::authorize_deletion(&self.roles, actor, user_id) {
            warn!(actor = %actor.email, target = %user_id, reason = %denial, "Deletion denied");
            return Err(denial.into());
        }

        let removed = self
            .store
            .remove(user_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("User not found: {}", user_id)))?;

        info!(user_id = %removed.id, email = %removed.email, "User deleted");

        self.event_publisher
            .publish(ServiceEvent::UserDeleted { user_id: removed.id })
            .await?;

        Ok(removed)
    }

    /// Look up a user by email within the actor's visible set.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn find_visible_by_email(
        &self,
        ctx: &ServiceContext,
        email: &str,
    ) -> ApplicationResult<User> {
        self.visible_users(ctx)
            .await?
            .into_iter()
            .find(|user| user.email == email)
            .ok_or_else(|| ApplicationError::NotFound(format!("User not found: {}", email)))
    }
}
