//! Per-role dashboard widget order.
//!
//! The saved order is trusted as-is: no catalog or permission checks
//! happen here.

use tracing::{debug, info};

use super::{layout_key, ConfigStore};
use crate::error::{Error, Result};
use crate::events::ChangeEvent;

impl ConfigStore {
    /// Saved widget order for `role`, or the role's enabled-by-default
    /// widgets in config order if nothing has been saved. A role without
    /// config gets an empty layout.
    pub fn user_layout(&self, role: &str) -> Result<Vec<String>> {
        let key = layout_key(role);
        if let Some(raw) = self.storage.get(&key)? {
            return serde_json::from_str(&raw).map_err(|e| Error::corrupt_layout(role, e.to_string()));
        }

        let config = self.read()?;
        let derived = config
            .role_config(role)
            .map(|cfg| cfg.enabled_widgets())
            .unwrap_or_default();
        debug!(role, widgets = derived.len(), "No saved layout, derived from role defaults");
        Ok(derived)
    }

    /// Persist `order` verbatim (duplicates and unknown ids included) and
    /// emit layout-changed.
    pub fn save_user_layout(&self, role: &str, order: &[String]) -> Result<()> {
        let json = serde_json::to_string(order)?;
        self.storage.set(&layout_key(role), &json)?;
        info!(role, widgets = order.len(), "Dashboard layout saved");
        self.emit(ChangeEvent::LayoutChanged);
        Ok(())
    }

    /// Forget the saved order so the derived default applies again.
    pub fn reset_user_layout(&self, role: &str) -> Result<()> {
        self.storage.remove(&layout_key(role))?;
        info!(role, "Dashboard layout reset");
        self.emit(ChangeEvent::LayoutChanged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoleConfig, SystemConfig};
    use crate::roles::Role;
    use crate::storage::MemoryStore;

    fn store() -> ConfigStore {
        ConfigStore::new(Box::new(MemoryStore::new()))
    }

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fallback_uses_enabled_widgets() {
        let store = store();
        assert_eq!(
            store.user_layout("Employee").unwrap(),
            RoleConfig::default_for(Role::Employee).enabled_widgets()
        );
    }

    #[test]
    fn test_fallback_tracks_config_changes() {
        let store = store();
        let mut config = SystemConfig::default();
        config
            .role_config_mut(Role::Employee)
            .widgets
            .insert("announcements".into(), false);
        store.write(&config).unwrap();
        assert_eq!(
            store.user_layout("Employee").unwrap(),
            ids(&["my-timesheet", "time-off-balance"])
        );
    }

    #[test]
    fn test_unknown_role_layout_empty() {
        assert!(store().user_layout("Contractor").unwrap().is_empty());
    }

    #[test]
    fn test_saved_layout_verbatim() {
        let store = store();
        let order = ids(&["announcements", "announcements", "ghost-widget"]);
        store.save_user_layout("Manager", &order).unwrap();
        assert_eq!(store.user_layout("Manager").unwrap(), order);

        store.save_user_layout("Manager", &[]).unwrap();
        assert!(store.user_layout("Manager").unwrap().is_empty());
    }

    #[test]
    fn test_reset_restores_fallback() {
        let store = store();
        store.save_user_layout("Employee", &ids(&["announcements"])).unwrap();
        store.reset_user_layout("Employee").unwrap();
        assert_eq!(store.user_layout("Employee").unwrap().len(), 3);
    }

    #[test]
    fn test_corrupt_layout_recovered_by_layout_reset() {
        let store = ConfigStore::new(Box::new(MemoryStore::with_entries([(
            layout_key("Admin"),
            "{bad".to_string(),
        )])));

        let err = store.user_layout("Admin").unwrap_err();
        assert!(matches!(err, Error::CorruptLayout { ref role, .. } if role == "Admin"));

        // Resetting the system config leaves the saved order alone.
        store.reset().unwrap();
        assert!(store.user_layout("Admin").is_err());

        store.reset_user_layout("Admin").unwrap();
        assert_eq!(
            store.user_layout("Admin").unwrap(),
            RoleConfig::default_for(Role::Admin).enabled_widgets()
        );
    }

    #[test]
    fn test_layouts_are_per_role() {
        let store = store();
        store.save_user_layout("Manager", &ids(&["team-calendar"])).unwrap();
        assert_ne!(store.user_layout("Executive").unwrap(), ids(&["team-calendar"]));
    }
}
