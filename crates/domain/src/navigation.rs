//! Dashboard navigation gated by permissions.

use crate::access::has_permission;
use crate::role::{permissions, RoleTable};
use crate::user::User;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level dashboard tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    Overview,
    Discovery,
    Projects,
    Execution,
    Analytics,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 5] = [
        Self::Overview,
        Self::Discovery,
        Self::Projects,
        Self::Execution,
        Self::Analytics,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Discovery => "discovery",
            Self::Projects => "projects",
            Self::Execution => "execution",
            Self::Analytics => "analytics",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Discovery => "Discovery & Planning",
            Self::Projects => "Active Projects",
            Self::Execution => "Execution",
            Self::Analytics => "Analytics",
        }
    }

    pub fn required_permission(&self) -> &'static str {
        match self {
            Self::Analytics => permissions::READ_ANALYTICS,
            _ => permissions::READ_DASHBOARD,
        }
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tabs the signed-in user may open. Without a session nothing is shown.
pub fn available_tabs(table: &RoleTable, user: Option<&User>) -> Vec<DashboardTab> {
    let Some(user) = user else {
        return Vec::new();
    };

    DashboardTab::ALL
        .into_iter()
        .filter(|tab| has_permission(table, user.role.as_str(), tab.required_permission()))
        .collect()
}
