//! Testing utilities for the migration portal
//!
//! - Fixtures: the standard role table, the demo accounts and generated users
//! - Builders for users and request types
//! - Recording mocks for the store ports and the event publisher
//!
//! # Examples
//!
//! ```
//! use migration_portal_testing::{builders::*, fixtures::*};
//!
//! let roles = standard_role_table();
//! let manager = UserBuilder::new().manager().with_organization("Acme").build();
//! assert!(roles.get(manager.role.as_str()).is_some());
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
