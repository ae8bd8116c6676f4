//! Fluent builder pattern for constructing test data.

use chrono::{DateTime, Utc};
use migration_portal_application::validation::{
    CreateProjectRequest, CreateUserRequest, SignupRequest,
};
use migration_portal_domain::{
    identifiers::UserId,
    project::{CloudProvider, EstimatedDuration, Priority, SourceEnvironment},
    role::RoleId,
    user::{User, UserStatus},
};

/// Builder for creating User test instances
#[derive(Clone)]
pub struct UserBuilder {
    id: UserId,
    name: String,
    email: String,
    role: RoleId,
    organization: Option<String>,
    status: UserStatus,
    last_login_at: Option<DateTime<Utc>>,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self {
            id: UserId::new(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            role: RoleId::client(),
            organization: Some("TechCorp".to_string()),
            status: UserStatus::Active,
            last_login_at: None,
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = RoleId::new(role);
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn without_organization(mut self) -> Self {
        self.organization = None;
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    pub fn logged_in_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_login_at = Some(at);
        self
    }

    pub fn client(mut self) -> Self {
        self.role = RoleId::client();
        self
    }

    pub fn manager(mut self) -> Self {
        self.role = RoleId::manager();
        self
    }

    pub fn local_admin(mut self) -> Self {
        self.role = RoleId::local_admin();
        self
    }

    pub fn developer(mut self) -> Self {
        self.role = RoleId::developer();
        self
    }

    pub fn build(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
            organization: self.organization,
            status: self.status,
            created_at: Utc::now(),
            last_login_at: self.last_login_at,
        }
    }
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for account creation requests
#[derive(Clone)]
pub struct CreateUserRequestBuilder {
    request: CreateUserRequest,
}

impl CreateUserRequestBuilder {
    pub fn new() -> Self {
        Self {
            request: CreateUserRequest {
                name: "New User".to_string(),
                email: "new.user@company.com".to_string(),
                role: RoleId::CLIENT.to_string(),
                organization: None,
                password: "password123".to_string(),
                confirm_password: "password123".to_string(),
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.request.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.request.email = email.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.request.role = role.into();
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.request.organization = Some(organization.into());
        self
    }

    pub fn with_passwords(mut self, password: &str, confirm: &str) -> Self {
        self.request.password = password.to_string();
        self.request.confirm_password = confirm.to_string();
        self
    }

    pub fn build(self) -> CreateUserRequest {
        self.request
    }
}

impl Default for CreateUserRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for signup requests
#[derive(Clone)]
pub struct SignupRequestBuilder {
    request: SignupRequest,
}

impl SignupRequestBuilder {
    pub fn new() -> Self {
        Self {
            request: SignupRequest {
                email: "new.client@company.com".to_string(),
                password: "password123".to_string(),
                confirm_password: "password123".to_string(),
                verification_code: "123456".to_string(),
            },
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.request.email = email.into();
        self
    }

    pub fn with_passwords(mut self, password: &str, confirm: &str) -> Self {
        self.request.password = password.to_string();
        self.request.confirm_password = confirm.to_string();
        self
    }

    pub fn without_verification_code(mut self) -> Self {
        self.request.verification_code = String::new();
        self
    }

    pub fn build(self) -> SignupRequest {
        self.request
    }
}

impl Default for SignupRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for new project requests
#[derive(Clone)]
pub struct ProjectRequestBuilder {
    request: CreateProjectRequest,
}

impl ProjectRequestBuilder {
    pub fn new() -> Self {
        Self {
            request: CreateProjectRequest {
                name: "Test Migration".to_string(),
                description: "Lift and shift of the test workloads".to_string(),
                source_environment: Some(SourceEnvironment::OnPremises),
                target_provider: Some(CloudProvider::Aws),
                applications: vec!["web".to_string(), "api".to_string()],
                priority: Priority::Medium,
                estimated_duration: None,
                team_lead: None,
                budget: None,
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.request.name = name.into();
        self
    }

    pub fn with_duration(mut self, duration: EstimatedDuration) -> Self {
        self.request.estimated_duration = Some(duration);
        self
    }

    pub fn with_provider(mut self, provider: CloudProvider) -> Self {
        self.request.target_provider = Some(provider);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.request.priority = priority;
        self
    }

    pub fn with_team_lead(mut self, team_lead: impl Into<String>) -> Self {
        self.request.team_lead = Some(team_lead.into());
        self
    }

    pub fn build(self) -> CreateProjectRequest {
        self.request
    }
}

impl Default for ProjectRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
