//! Serializable views of portal data, one per command output.

use super::{Formattable, TableFormatter};
use anyhow::Result;
use chrono::{DateTime, Utc};
use migration_portal_domain::{
    DashboardTab, MigrationProject, RoleDefinition, RoleTable, User,
};
use serde::Serialize;

fn optional(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// A user account as shown to operators
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub role_name: String,
    pub organization: Option<String>,
    pub status: String,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl UserView {
    pub fn new(user: &User, roles: &RoleTable) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            role_name: roles.display_name(user.role.as_str()).to_string(),
            organization: user.organization.clone(),
            status: user.status.as_str().to_string(),
            last_login_at: user.last_login_at,
        }
    }

    fn last_login(&self) -> String {
        self.last_login_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string())
    }
}

impl Formattable for UserView {
    fn format_table(&self) -> Result<String> {
        Ok(TableFormatter::record(vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Email", self.email.clone()),
            ("Role", self.role_name.clone()),
            ("Organization", optional(self.organization.as_deref())),
            ("Status", self.status.clone()),
            ("Last Login", self.last_login()),
        ]))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct UserList(pub Vec<UserView>);

impl UserList {
    pub fn new(users: &[User], roles: &RoleTable) -> Self {
        Self(users.iter().map(|u| UserView::new(u, roles)).collect())
    }
}

impl Formattable for UserList {
    fn format_table(&self) -> Result<String> {
        let rows: Vec<Vec<String>> = self
            .0
            .iter()
            .map(|u| {
                vec![
                    u.name.clone(),
                    u.email.clone(),
                    u.role_name.clone(),
                    optional(u.organization.as_deref()),
                    u.status.clone(),
                    u.last_login(),
                ]
            })
            .collect();
        Ok(TableFormatter::rows(&["Name", "Email", "Role", "Organization", "Status", "Last Login"], rows))
    }
}

/// A role definition with readable permission labels
#[derive(Debug, Clone, Serialize)]
pub struct RoleView {
    pub id: String,
    pub name: String,
    pub level: u8,
    pub permissions: Vec<String>,
}

impl From<&RoleDefinition> for RoleView {
    fn from(role: &RoleDefinition) -> Self {
        Self {
            id: role.id.to_string(),
            name: role.name.clone(),
            level: role.level,
            permissions: role.permissions.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RoleList(pub Vec<RoleView>);

impl<'a> FromIterator<&'a RoleDefinition> for RoleList {
    fn from_iter<I: IntoIterator<Item = &'a RoleDefinition>>(iter: I) -> Self {
        Self(iter.into_iter().map(RoleView::from).collect())
    }
}

impl Formattable for RoleList {
    fn format_table(&self) -> Result<String> {
        let rows: Vec<Vec<String>> = self
            .0
            .iter()
            .map(|r| {
                let labels: Vec<String> = r
                    .permissions
                    .iter()
                    .map(|p| migration_portal_domain::Permission::new(p.as_str()).label())
                    .collect();
                vec![
                    r.level.to_string(),
                    r.id.clone(),
                    r.name.clone(),
                    labels.join("\n"),
                ]
            })
            .collect();
        Ok(TableFormatter::rows(&["Level", "ID", "Name", "Permissions"], rows))
    }
}

/// Outcome of a single permission check
#[derive(Debug, Clone, Serialize)]
pub struct AccessDecision {
    pub role: String,
    pub permission: String,
    pub granted: bool,
}

impl Formattable for AccessDecision {
    fn format_table(&self) -> Result<String> {
        Ok(TableFormatter::record(vec![
            ("Role", self.role.clone()),
            ("Permission", self.permission.clone()),
            ("Granted", if self.granted { "yes" } else { "no" }.to_string()),
        ]))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TabView {
    pub id: String,
    pub name: String,
    pub permission: String,
}

impl From<DashboardTab> for TabView {
    fn from(tab: DashboardTab) -> Self {
        Self {
            id: tab.id().to_string(),
            name: tab.name().to_string(),
            permission: tab.required_permission().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct TabList(pub Vec<TabView>);

impl FromIterator<DashboardTab> for TabList {
    fn from_iter<I: IntoIterator<Item = DashboardTab>>(iter: I) -> Self {
        Self(iter.into_iter().map(TabView::from).collect())
    }
}

impl Formattable for TabList {
    fn format_table(&self) -> Result<String> {
        let rows: Vec<Vec<String>> = self
            .0
            .iter()
            .map(|t| vec![t.id.clone(), t.name.clone(), t.permission.clone()])
            .collect();
        Ok(TableFormatter::rows(&["ID", "Tab", "Requires"], rows))
    }
}

/// The signed-in account and what it may do
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub user: UserView,
    pub permissions: Vec<String>,
    pub tabs: Vec<String>,
    pub can_manage_users: bool,
}

impl Formattable for SessionView {
    fn format_table(&self) -> Result<String> {
        let mut table = self.user.format_table()?;
        table.push('\n');
        table.push_str(&TableFormatter::record(vec![
            ("Permissions", self.permissions.join(", ")),
            ("Tabs", self.tabs.join(", ")),
            (
                "User Management",
                if self.can_manage_users { "yes" } else { "no" }.to_string(),
            ),
        ]));
        Ok(table)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ProjectView(pub MigrationProject);

impl Formattable for ProjectView {
    fn format_table(&self) -> Result<String> {
        let p = &self.0;
        Ok(TableFormatter::record(vec![
            ("ID", p.id.to_string()),
            ("Name", p.name.clone()),
            ("Status", p.status.to_string()),
            ("Progress", format!("{}%", p.progress)),
            ("Priority", p.priority.to_string()),
            ("Start", p.start_date.to_string()),
            ("Target", p.target_date.to_string()),
            (
                "Source",
                optional(p.source_environment.map(|s| s.as_str())),
            ),
            ("Provider", optional(p.target_provider.map(|c| c.as_str()))),
            ("Applications", p.applications.join(", ")),
            ("Team Lead", optional(p.team_lead.as_deref())),
            ("Budget", optional(p.budget.as_deref())),
        ]))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ProjectList(pub Vec<MigrationProject>);

impl Formattable for ProjectList {
    fn format_table(&self) -> Result<String> {
        let rows: Vec<Vec<String>> = self
            .0
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.status.to_string(),
                    format!("{}%", p.progress),
                    p.priority.to_string(),
                    p.start_date.to_string(),
                    p.target_date.to_string(),
                ]
            })
            .collect();
        Ok(TableFormatter::rows(&["Name", "Status", "Progress", "Priority", "Start", "Target"], rows))
    }
}
