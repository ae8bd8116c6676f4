//! Migration Portal Domain Types
//!
//! Core domain model for the cloud migration portal: roles and permissions,
//! user accounts, the access control evaluator, dashboard navigation and
//! migration projects.
//!
//! ## Architecture
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers
//! - **role**: Permissions, role definitions and the immutable role table
//! - **user**: User accounts and account status
//! - **access**: Permission checks, the role-creation matrix and visibility filtering
//! - **navigation**: Permission-gated dashboard tabs
//! - **project**: Migration projects and target date planning
//! - **errors**: Error types with stable error codes
//!
//! ## Usage
//!
//! ```rust
//! use migration_portal_domain::{
//!     access::{can_create_role, has_permission},
//!     role::RoleTable,
//! };
//!
//! let roles = RoleTable::standard();
//! assert!(has_permission(&roles, "manager", "read_analytics"));
//! assert!(can_create_role(&roles, "local_admin", "manager"));
//! assert!(!can_create_role(&roles, "local_admin", "local_admin"));
//! ```

#![warn(clippy::all)]

pub mod access;
pub mod errors;
pub mod identifiers;
pub mod navigation;
pub mod project;
pub mod role;
pub mod user;

pub use access::{accessible_users, can_create_role, creatable_roles, has_permission};
pub use errors::{AuthenticationError, AuthorizationError, ConfigurationError, ValidationError};
pub use identifiers::*;
pub use navigation::{available_tabs, DashboardTab};
pub use project::{
    CloudProvider, EstimatedDuration, MigrationProject, Priority, ProjectPlan, ProjectStatus,
    SourceEnvironment,
};
pub use role::{Permission, RoleDefinition, RoleId, RoleTable};
pub use user::{User, UserStatus};
