//! Error types for the migration portal domain.
//!
//! Access decisions themselves are plain booleans; these errors carry the
//! denials that callers must surface to the user, plus configuration and
//! validation failures. The application layer maps them onto its own error.

/// Denials produced by the access control rules.
///
/// The messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    /// No user is signed in
    #[error("You must be signed in to perform this action")]
    NotSignedIn,

    /// The actor's role lacks a required permission
    #[error("Role `{role}` does not have permission `{permission}`")]
    MissingPermission { role: String, permission: String },

    /// The actor may not create accounts of the requested role
    #[error("You do not have permission to create this user role")]
    RoleCreationDenied { actor_role: String, target_role: String },

    /// The actor lacks `manage_organization_users`
    #[error("You do not have permission to delete users")]
    DeletionDenied,

    /// The actor tried to delete their own account
    #[error("You cannot delete your own account")]
    SelfDeletion,
}

/// Mock authentication failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    /// No account with this email
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Privileged account with a wrong password
    #[error("Invalid password")]
    InvalidPassword,

    /// Empty password supplied
    #[error("Password is required")]
    EmptyPassword,

    /// Signup or reset without a verification code
    #[error("Please enter verification code")]
    MissingVerificationCode,
}

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was left empty
    #[error("{0} is required")]
    RequiredField(String),

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Role table or seed data errors detected while loading configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The role table has no roles
    #[error("role table must define at least one role")]
    EmptyRoleTable,

    /// Two roles share an identifier
    #[error("role `{0}` is defined more than once")]
    DuplicateRole(String),

    /// Two roles share a privilege level
    #[error("roles `{first}` and `{second}` share level {level}")]
    DuplicateLevel {
        level: u8,
        first: String,
        second: String,
    },

    /// A role identifier is blank
    #[error("role identifiers must not be empty")]
    BlankRoleId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_messages() {
        let err = ConfigurationError::DuplicateLevel {
            level: 2,
            first: "manager".into(),
            second: "auditor".into(),
        };
        assert_eq!(err.to_string(), "roles `manager` and `auditor` share level 2");
        assert_eq!(
            ValidationError::RequiredField("Name".into()).to_string(),
            "Name is required"
        );
    }

    #[test]
    fn test_denial_messages_are_user_facing() {
        assert_eq!(
            AuthorizationError::SelfDeletion.to_string(),
            "You cannot delete your own account"
        );
        assert_eq!(
            AuthorizationError::DeletionDenied.to_string(),
            "You do not have permission to delete users"
        );
        assert_eq!(
            AuthorizationError::RoleCreationDenied {
                actor_role: "manager".into(),
                target_role: "developer".into(),
            }
            .to_string(),
            "You do not have permission to create this user role"
        );
    }
}
