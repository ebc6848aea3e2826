//! System configuration model: per-role layout plus general settings,
//! with the defaults every read is merged onto.

pub mod settings;
pub mod system;

pub use settings::GeneralSettings;
pub use system::{PersistedConfig, RoleConfig, SystemConfig};
