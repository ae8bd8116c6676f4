//! Project request validation rules

use super::{Validatable, ValidationResult, ValidatorExt};
use migration_portal_domain::project::{
    CloudProvider, EstimatedDuration, Priority, ProjectPlan, SourceEnvironment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// New migration project form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200, message = "Project name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[serde(default)]
    pub source_environment: Option<SourceEnvironment>,
    #[serde(default)]
    pub target_provider: Option<CloudProvider>,
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub estimated_duration: Option<EstimatedDuration>,
    #[serde(default)]
    pub team_lead: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

impl Validatable for CreateProjectRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();

        if !self.name.is_empty() && self.name.trim().is_empty() {
            result.add_field_error("name", "Project name is required");
        }

        if self.applications.iter().any(|app| app.trim().is_empty()) {
            result.add_field_error("applications", "Application names must not be blank");
        }

        result
    }
}

impl From<CreateProjectRequest> for ProjectPlan {
    fn from(request: CreateProjectRequest) -> Self {
        ProjectPlan {
            name: request.name.trim().to_string(),
            description: request.description,
            source_environment: request.source_environment,
            target_provider: request.target_provider,
            applications: request.applications,
            priority: request.priority,
            estimated_duration: request.estimated_duration,
            team_lead: request.team_lead,
            budget: request.budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        let request = CreateProjectRequest::default();
        let result = request.validate_all();
        assert_eq!(
            result.field_errors.get("name"),
            Some(&vec!["Project name is required".to_string()])
        );

        let request = CreateProjectRequest {
            name: "   ".into(),
            ..Default::default()
        };
        assert!(!request.validate_all().valid);
    }

    #[test]
    fn test_minimal_request_is_valid() {
        let request = CreateProjectRequest {
            name: "Payments".into(),
            ..Default::default()
        };
        assert!(request.validate_all().valid);
    }
}
