//! Account request validation rules

use super::{Validatable, ValidationResult, ValidatorExt};
use migration_portal_domain::{AuthenticationError, ValidationError};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Self-registration request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub confirm_password: String,
    /// Must be non-empty; the code itself is not checked
    pub verification_code: String,
}

impl Validatable for SignupRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if self.password != self.confirm_password {
            result.add_object_error(ValidationError::PasswordMismatch.to_string());
        }

        if self.verification_code.trim().is_empty() {
            result.add_object_error(AuthenticationError::MissingVerificationCode.to_string());
        }

        result.merge(self.to_validation_result());
        result
    }
}

/// Account creation by a signed-in administrator
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Role identifier to assign
    pub role: String,
    /// Defaults to the creator's organization when absent or blank
    #[serde(default)]
    pub organization: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub confirm_password: String,
}

impl CreateUserRequest {
    /// Trim the name and email before they are validated and stored.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }
}

impl Validatable for CreateUserRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if !self.name.is_empty() && self.name.trim().is_empty() {
            result.add_field_error("name", ValidationError::RequiredField("Name".into()).to_string());
        }

        if self.password != self.confirm_password {
            result.add_object_error(ValidationError::PasswordMismatch.to_string());
        }

        if self.role.trim().is_empty() {
            result.add_field_error("role", ValidationError::RequiredField("Role".into()).to_string());
        }

        result.merge(self.to_validation_result());
        result
    }
}

/// Password reset request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub verification_code: String,
}

impl Validatable for PasswordResetRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if self.verification_code.trim().is_empty() {
            result.add_object_error(AuthenticationError::MissingVerificationCode.to_string());
        }

        result.merge(self.to_validation_result());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupRequest {
        SignupRequest {
            email: "new.user@company.com".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
            verification_code: "123456".into(),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert!(signup().validate_all().valid);
    }

    #[test]
    fn test_signup_password_mismatch() {
        let request = SignupRequest {
            confirm_password: "other".into(),
            ..signup()
        };
        let result = request.validate_all();
        assert_eq!(result.object_errors, vec!["Passwords do not match".to_string()]);
    }

    #[test]
    fn test_signup_requires_verification_code() {
        let request = SignupRequest {
            verification_code: "  ".into(),
            ..signup()
        };
        let result = request.validate_all();
        assert_eq!(
            result.object_errors,
            vec!["Please enter verification code".to_string()]
        );
    }

    #[test]
    fn test_create_user_field_rules() {
        let request = CreateUserRequest {
            name: String::new(),
            email: "not-an-email".into(),
            role: "client".into(),
            organization: None,
            password: "pw".into(),
            confirm_password: "pw".into(),
        };
        let result = request.validate_all();
        assert!(!result.valid);
        assert!(result.field_errors.contains_key("name"));
        assert!(result.field_errors.contains_key("email"));
        assert!(result.object_errors.is_empty());
    }

    #[test]
    fn test_create_user_rejects_blank_name() {
        let request = CreateUserRequest {
            name: "   ".into(),
            email: "pat@company.com".into(),
            role: "client".into(),
            organization: None,
            password: "pw".into(),
            confirm_password: "pw".into(),
        };

        assert!(request.validate_all().field_errors.contains_key("name"));
        assert!(request.normalized().validate_all().field_errors.contains_key("name"));
    }

    #[test]
    fn test_normalized_trims_email_before_validation() {
        let request = CreateUserRequest {
            name: " Pat Lee ".into(),
            email: "  pat@company.com ".into(),
            role: "client".into(),
            organization: None,
            password: "pw".into(),
            confirm_password: "pw".into(),
        }
        .normalized();

        assert_eq!(request.name, "Pat Lee");
        assert_eq!(request.email, "pat@company.com");
        assert!(request.validate_all().valid);
    }

    #[test]
    fn test_reset_requires_code() {
        let request = PasswordResetRequest {
            email: "sarah@company.com".into(),
            verification_code: String::new(),
        };
        assert!(!request.validate_all().valid);
    }
}
