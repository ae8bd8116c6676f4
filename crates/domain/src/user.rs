//! User accounts.

use crate::identifiers::UserId;
use crate::role::RoleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A portal account.
///
/// Records are never mutated field by field; updates produce a replacement
/// record (see [`User::with_last_login`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique login key
    pub email: String,
    pub role: RoleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// A new active account that has never signed in.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: RoleId,
        organization: Option<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
            organization,
            status: UserStatus::Active,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Both users carry the same organization tag (including both having none).
    pub fn shares_organization_with(&self, other: &User) -> bool {
        self.organization == other.organization
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn with_last_login(self, at: DateTime<Utc>) -> Self {
        Self {
            last_login_at: Some(at),
            ..self
        }
    }
}

/// Display name derived from the local part of an email address.
pub fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            _ => Err(format!("invalid user status: {s}")),
        }
    }
}
