//! Cloud migration projects.
//!
//! A project is planned with an estimated duration bucket; the target date
//! is derived from the start date and that bucket.

use crate::identifiers::ProjectId;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Progress reported by a freshly planned project.
pub const INITIAL_PROGRESS: u8 = 5;

/// Lifecycle status of a migration project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the workloads run today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceEnvironment {
    OnPremises,
    PrivateCloud,
    Hybrid,
    OtherCloud,
}

impl SourceEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnPremises => "on-premises",
            Self::PrivateCloud => "private-cloud",
            Self::Hybrid => "hybrid",
            Self::OtherCloud => "other-cloud",
        }
    }
}

impl fmt::Display for SourceEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-premises" => Ok(Self::OnPremises),
            "private-cloud" => Ok(Self::PrivateCloud),
            "hybrid" => Ok(Self::Hybrid),
            "other-cloud" => Ok(Self::OtherCloud),
            _ => Err(format!("unknown source environment: {s}")),
        }
    }
}

/// Target cloud provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
    Hybrid,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aws" => Ok(Self::Aws),
            "azure" => Ok(Self::Azure),
            "gcp" => Ok(Self::Gcp),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!("unknown cloud provider: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("unknown priority: {s}")),
        }
    }
}

/// Estimated duration bucket chosen when planning a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstimatedDuration {
    #[serde(rename = "1-2 weeks")]
    OneToTwoWeeks,
    #[serde(rename = "3-4 weeks")]
    ThreeToFourWeeks,
    #[serde(rename = "1-2 months")]
    OneToTwoMonths,
    #[serde(rename = "3-6 months")]
    ThreeToSixMonths,
    #[serde(rename = "6+ months")]
    SixMonthsPlus,
}

impl EstimatedDuration {
    /// Days added when no bucket is chosen.
    pub const DEFAULT_DAYS: u64 = 30;

    pub const ALL: [EstimatedDuration; 5] = [
        Self::OneToTwoWeeks,
        Self::ThreeToFourWeeks,
        Self::OneToTwoMonths,
        Self::ThreeToSixMonths,
        Self::SixMonthsPlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneToTwoWeeks => "1-2 weeks",
            Self::ThreeToFourWeeks => "3-4 weeks",
            Self::OneToTwoMonths => "1-2 months",
            Self::ThreeToSixMonths => "3-6 months",
            Self::SixMonthsPlus => "6+ months",
        }
    }

    pub fn days(&self) -> u64 {
        match self {
            Self::OneToTwoWeeks => 14,
            Self::ThreeToFourWeeks => 28,
            Self::OneToTwoMonths => 60,
            Self::ThreeToSixMonths => 120,
            Self::SixMonthsPlus => 180,
        }
    }

    /// Parse a bucket label. Unknown or blank labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label.trim())
    }
}

impl fmt::Display for EstimatedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Start date plus the bucket's days, or 30 days when no bucket applies.
///
/// Returns `None` only if the result leaves chrono's representable range.
pub fn target_date(start: NaiveDate, duration: Option<EstimatedDuration>) -> Option<NaiveDate> {
    let days = duration
        .map(|d| d.days())
        .unwrap_or(EstimatedDuration::DEFAULT_DAYS);
    start.checked_add_days(Days::new(days))
}

/// Inputs for planning a new project.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectPlan {
    pub name: String,
    #[serde(default)]
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

/// A tracked migration project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationProject {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    /// Percent complete, 0-100
    pub progress: u8,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_environment: Option<SourceEnvironment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_provider: Option<CloudProvider>,
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_lead: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

impl MigrationProject {
    /// A new project in `Planning`, starting `today`.
    ///
    /// Returns `None` if the target date cannot be represented.
    pub fn plan(plan: ProjectPlan, today: NaiveDate) -> Option<Self> {
        let target = target_date(today, plan.estimated_duration)?;

        Some(Self {
            id: ProjectId::new(),
            name: plan.name,
            description: plan.description,
            status: ProjectStatus::Planning,
            progress: INITIAL_PROGRESS,
            start_date: today,
            target_date: target,
            source_environment: plan.source_environment,
            target_provider: plan.target_provider,
            applications: plan.applications,
            priority: plan.priority,
            team_lead: plan.team_lead.filter(|s| !s.trim().is_empty()),
            budget: plan.budget.filter(|s| !s.trim().is_empty()),
        })
    }

    pub fn is_complete(&self) -> bool {
        self.status == ProjectStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_days() {
        let expected = [14, 28, 60, 120, 180];
        for (duration, days) in EstimatedDuration::ALL.iter().zip(expected) {
            assert_eq!(duration.days(), days);
        }
    }

    #[test]
    fn test_duration_from_label() {
        assert_eq!(
            EstimatedDuration::from_label("3-6 months"),
            Some(EstimatedDuration::ThreeToSixMonths)
        );
        assert_eq!(EstimatedDuration::from_label(""), None);
        assert_eq!(EstimatedDuration::from_label("a while"), None);
    }

    #[test]
    fn test_target_date_defaults_to_thirty_days() {
        let start = date(2024, 1, 15);
        assert_eq!(target_date(start, None), Some(date(2024, 2, 14)));
        assert_eq!(
            target_date(start, Some(EstimatedDuration::OneToTwoWeeks)),
            Some(date(2024, 1, 29))
        );
    }

    #[test]
    fn test_plan_starts_in_planning() {
        let plan = ProjectPlan {
            name: "Payments".into(),
            target_provider: Some(CloudProvider::Gcp),
            estimated_duration: Some(EstimatedDuration::OneToTwoMonths),
            team_lead: Some("  ".into()),
            ..Default::default()
        };
        let project = MigrationProject::plan(plan, date(2024, 3, 1)).unwrap();

        assert_eq!(project.status, ProjectStatus::Planning);
        assert_eq!(project.progress, INITIAL_PROGRESS);
        assert_eq!(project.target_date, date(2024, 4, 30));
        assert_eq!(project.priority, Priority::Medium);
        assert!(project.team_lead.is_none());
    }

    #[test]
    fn test_status_serializes_with_display_names() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let json = serde_json::to_string(&SourceEnvironment::OnPremises).unwrap();
        assert_eq!(json, "\"on-premises\"");
        let json = serde_json::to_string(&EstimatedDuration::SixMonthsPlus).unwrap();
        assert_eq!(json, "\"6+ months\"");
    }
}
