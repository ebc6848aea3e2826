//! HRIS admin console
//!
//! Role-based access and dashboard layout configuration for the HRIS web
//! console: per-role tab/widget visibility and permission tags merged over
//! built-in defaults, the active role of a session, per-role widget order,
//! and change notification for everything that renders from them.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod logging;
pub mod model;
pub mod permissions;
pub mod roles;
pub mod storage;
pub mod store;
pub mod version;

pub use catalog::{TabDefinition, WidgetCatalog, WidgetDefinition};
pub use dashboard::{DashboardView, LayoutDraft};
pub use error::{Error, ErrorCode, Result};
pub use events::{ChangeEvent, SubscriptionId};
pub use model::{GeneralSettings, RoleConfig, SystemConfig};
pub use roles::{ActiveRole, Role};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::ConfigStore;
