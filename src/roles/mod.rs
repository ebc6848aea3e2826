//! Roles, the personas that decide which tabs, widgets and permissions
//! a console session sees.

pub mod types;

pub use types::{ActiveRole, Role};
