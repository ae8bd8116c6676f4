//! Roles, permissions and the role table.
//!
//! A role is a named bundle of permission strings plus a privilege level.
//! Roles are data: the table is loaded from configuration once and never
//! mutated afterwards. [`RoleTable::standard`] provides the built-in
//! four-role hierarchy used when configuration does not override it.

use crate::errors::ConfigurationError;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display};

/// Well-known permission names used by the portal
pub mod permissions {
    /// Grants every permission
    pub const WILDCARD: &str = "*";
    pub const READ_DASHBOARD: &str = "read_dashboard";
    pub const READ_ALERTS: &str = "read_alerts";
    pub const READ_OWN_DATA: &str = "read_own_data";
    pub const UPDATE_OWN_PROFILE: &str = "update_own_profile";
    pub const READ_TEAM_DATA: &str = "read_team_data";
    pub const MANAGE_TEAM_USERS: &str = "manage_team_users";
    pub const READ_ANALYTICS: &str = "read_analytics";
    pub const MANAGE_ORGANIZATION_USERS: &str = "manage_organization_users";
    pub const READ_ORGANIZATION_DATA: &str = "read_organization_data";
    pub const CONFIGURE_ORGANIZATION: &str = "configure_organization";
}

/// An opaque capability tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn wildcard() -> Self {
        Self(permissions::WILDCARD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == permissions::WILDCARD
    }

    /// Human-readable label, e.g. `manage team_users` for `manage_team_users`.
    ///
    /// Only the first underscore is replaced, matching the labels the
    /// dashboard has always shown.
    pub fn label(&self) -> String {
        if self.is_wildcard() {
            "All permissions (FULL ACCESS)".to_string()
        } else {
            self.0.replacen('_', " ", 1)
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier of a role, e.g. `local_admin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    pub const CLIENT: &'static str = "client";
    pub const MANAGER: &'static str = "manager";
    pub const LOCAL_ADMIN: &'static str = "local_admin";
    pub const DEVELOPER: &'static str = "developer";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn client() -> Self {
        Self::new(Self::CLIENT)
    }

    pub fn manager() -> Self {
        Self::new(Self::MANAGER)
    }

    pub fn local_admin() -> Self {
        Self::new(Self::LOCAL_ADMIN)
    }

    pub fn developer() -> Self {
        Self::new(Self::DEVELOPER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RoleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for RoleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RoleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A named bundle of permissions plus a privilege level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub id: RoleId,
    pub name: String,
    pub level: u8,
    pub permissions: IndexSet<Permission>,
}

impl RoleDefinition {
    pub fn new<I, P>(id: impl Into<String>, name: impl Into<String>, level: u8, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self {
            id: RoleId::new(id),
            name: name.into(),
            level,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the role holds `permission` exactly or holds the wildcard.
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.contains(permissions::WILDCARD) || self.permissions.contains(permission)
    }

    pub fn has_full_access(&self) -> bool {
        self.permissions.contains(permissions::WILDCARD)
    }
}

/// The fixed mapping from role id to role definition.
///
/// Iteration follows the order the roles were defined in. Construction
/// rejects empty tables, blank or duplicate ids, and duplicate levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RoleDefinition>", into = "Vec<RoleDefinition>")]
pub struct RoleTable {
    roles: IndexMap<RoleId, RoleDefinition>,
}

impl RoleTable {
    pub fn new<I>(roles: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = RoleDefinition>,
    {
        let mut table: IndexMap<RoleId, RoleDefinition> = IndexMap::new();

        for role in roles {
            if role.id.as_str().trim().is_empty() {
                return Err(ConfigurationError::BlankRoleId);
            }
            if table.contains_key(&role.id) {
                return Err(ConfigurationError::DuplicateRole(role.id.to_string()));
            }
            if let Some(existing) = table.values().find(|r| r.level == role.level) {
                return Err(ConfigurationError::DuplicateLevel {
                    level: role.level,
                    first: existing.id.to_string(),
                    second: role.id.to_string(),
                });
            }
            table.insert(role.id.clone(), role);
        }

        if table.is_empty() {
            return Err(ConfigurationError::EmptyRoleTable);
        }

        Ok(Self { roles: table })
    }

    /// The built-in hierarchy: client < manager < local_admin < developer.
    pub fn standard() -> Self {
        use permissions::*;

        let roles = IndexMap::from_iter(
            [
                RoleDefinition::new(
                    RoleId::CLIENT,
                    "Client",
                    1,
                    [READ_DASHBOARD, READ_ALERTS, READ_OWN_DATA, UPDATE_OWN_PROFILE],
                ),
                RoleDefinition::new(
                    RoleId::MANAGER,
                    "Manager",
                    2,
                    [
                        READ_DASHBOARD,
                        READ_ALERTS,
                        READ_TEAM_DATA,
                        MANAGE_TEAM_USERS,
                        READ_ANALYTICS,
                    ],
                ),
                RoleDefinition::new(
                    RoleId::LOCAL_ADMIN,
                    "Local Admin",
                    3,
                    [
                        READ_DASHBOARD,
                        READ_ALERTS,
                        MANAGE_ORGANIZATION_USERS,
                        READ_ORGANIZATION_DATA,
                        CONFIGURE_ORGANIZATION,
                    ],
                ),
                RoleDefinition::new(RoleId::DEVELOPER, "Developer", 4, [WILDCARD]),
            ]
            .into_iter()
            .map(|role| (role.id.clone(), role)),
        );

        Self { roles }
    }

    pub fn get(&self, id: &str) -> Option<&RoleDefinition> {
        self.roles.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.roles.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.values()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Display name for a role id, falling back to the raw id.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|r| r.name.as_str()).unwrap_or(id)
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<RoleDefinition>> for RoleTable {
    type Error = ConfigurationError;

    fn try_from(roles: Vec<RoleDefinition>) -> Result<Self, Self::Error> {
        Self::new(roles)
    }
}

impl From<RoleTable> for Vec<RoleDefinition> {
    fn from(table: RoleTable) -> Self {
        table.roles.into_values().collect()
    }
}
