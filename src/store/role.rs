//! Active role resolution.

use tracing::{debug, info, warn};

use super::{ConfigStore, ROLE_KEY};
use crate::error::Result;
use crate::events::ChangeEvent;
use crate::roles::{ActiveRole, Role};

impl ConfigStore {
    /// The persisted active role, or [`Role::DEFAULT`] when none is stored.
    pub fn current_role(&self) -> Result<ActiveRole> {
        match self.storage.get(ROLE_KEY)? {
            None => {
                debug!(default = %Role::DEFAULT, "No active role stored, using default");
                Ok(ActiveRole::Known(Role::DEFAULT))
            }
            Some(value) => {
                let active = ActiveRole::from_persisted(&value);
                if let ActiveRole::Unrecognized(name) = &active {
                    warn!(role = %name, "Stored role is not recognized; access will be restricted");
                }
                Ok(active)
            }
        }
    }

    /// Persist `role` as active and emit role-changed.
    pub fn set_current_role(&self, role: Role) -> Result<()> {
        self.storage.set(ROLE_KEY, role.as_str())?;
        info!(role = %role, "Active role changed");
        self.emit(ChangeEvent::RoleChanged);
        Ok(())
    }
}
