//! Config store: the single source of truth for system config, the
//! active role and per-role widget order, with change notification.
//!
//! One `ConfigStore` is constructed per session and handed to whatever
//! needs it. Writes replace whole values (last writer wins); nothing here
//! merges concurrent edits.

mod layout;
mod role;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::events::{ChangeBus, ChangeEvent, SubscriptionId};
use crate::model::{PersistedConfig, SystemConfig};
use crate::storage::KeyValueStore;

// ─────────────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────────────

/// Current system config key. Bumping the schema means a new key; older
/// blobs are left behind, not migrated.
pub const CONFIG_KEY: &str = "hris_system_config_v3";

/// Keys used by earlier schema versions.
pub const LEGACY_CONFIG_KEYS: &[&str] = &["hris_system_config_v1", "hris_system_config_v2"];

pub const ROLE_KEY: &str = "hris_current_role";

pub const LAYOUT_KEY_PREFIX: &str = "hris_user_layout_";

/// Storage key for a role's saved widget order.
pub fn layout_key(role: &str) -> String {
    format!("{}{}", LAYOUT_KEY_PREFIX, role)
}

// ─────────────────────────────────────────────────────────────────
// Config Store
// ─────────────────────────────────────────────────────────────────

pub struct ConfigStore {
    storage: Box<dyn KeyValueStore>,
    bus: ChangeBus,
}

impl ConfigStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            bus: ChangeBus::new(),
        }
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    // ─────────────────────────────────────────────────────────────
    // System Config
    // ─────────────────────────────────────────────────────────────

    /// Stored config merged onto the defaults.
    ///
    /// Nothing stored yields exactly the defaults. A blob that does not
    /// parse is reported as [`Error::CorruptConfig`]; it is not discarded.
    pub fn read(&self) -> Result<SystemConfig> {
        let Some(raw) = self.storage.get(CONFIG_KEY)? else {
            debug!(key = CONFIG_KEY, "No stored system config, using defaults");
            return Ok(SystemConfig::default());
        };
        let persisted: PersistedConfig = serde_json::from_str(&raw)
            .map_err(|e| Error::corrupt_config(CONFIG_KEY, e.to_string()))?;
        Ok(SystemConfig::merge_persisted(persisted))
    }

    /// Persist the whole config, then emit config-changed.
    pub fn write(&self, config: &SystemConfig) -> Result<()> {
        let json = serde_json::to_string(config)?;
        self.storage.set(CONFIG_KEY, &json)?;
        info!(key = CONFIG_KEY, roles = config.layout.len(), "System config saved");
        self.bus.emit(ChangeEvent::ConfigChanged);
        Ok(())
    }

    /// Read, apply `edit` to the copy, write it back. Same last-writer-wins
    /// semantics as calling the two separately.
    pub fn update<F>(&self, edit: F) -> Result<SystemConfig>
    where
        F: FnOnce(&mut SystemConfig) -> Result<()>,
    {
        let mut config = self.read()?;
        edit(&mut config)?;
        self.write(&config)?;
        Ok(config)
    }

    /// Delete the stored config, emit config-changed, return the defaults.
    ///
    /// Never reads the old value. If the medium itself cannot be parsed it
    /// is repaired first, which discards everything it held.
    pub fn reset(&self) -> Result<SystemConfig> {
        if self.storage.repair()? {
            warn!("Unreadable store discarded; active role and saved layouts are back to defaults");
        }
        self.storage.remove(CONFIG_KEY)?;
        info!(key = CONFIG_KEY, "System config reset to defaults");
        self.bus.emit(ChangeEvent::ConfigChanged);
        Ok(SystemConfig::default())
    }

    /// Config blobs from earlier schema versions still sitting in storage.
    ///
    /// An unreadable medium yields an empty list; the command that actually
    /// needs the data reports it.
    pub fn orphaned_config_keys(&self) -> Result<Vec<String>> {
        let keys = match self.storage.keys() {
            Ok(keys) => keys,
            Err(e @ Error::CorruptStore { .. }) => {
                debug!(error = %e, "Skipping legacy key scan");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        let orphaned: Vec<String> = keys
            .into_iter()
            .filter(|k| LEGACY_CONFIG_KEYS.contains(&k.as_str()))
            .collect();
        if !orphaned.is_empty() {
            warn!(keys = ?orphaned, current = CONFIG_KEY, "Ignoring config stored under an old schema key");
        }
        Ok(orphaned)
    }

    // ─────────────────────────────────────────────────────────────
    // Notification
    // ─────────────────────────────────────────────────────────────

    pub fn subscribe<F>(&self, event: ChangeEvent, handler: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.bus.subscribe(event, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub(crate) fn emit(&self, event: ChangeEvent) {
        self.bus.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;
    use crate::storage::MemoryStore;

    fn memory_store() -> ConfigStore {
        ConfigStore::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_read_without_blob_is_default() {
        assert_eq!(memory_store().read().unwrap(), SystemConfig::default());
    }

    #[test]
    fn test_write_read_round_trip() {
        let store = memory_store();
        let mut config = SystemConfig::default();
        config.settings.company_name = "Globex".into();
        config.role_config_mut(Role::Employee).grant("team:view");
        store.write(&config).unwrap();
        assert_eq!(store.read().unwrap(), config);
    }

    #[test]
    fn test_corrupt_blob_propagates() {
        let store = ConfigStore::new(Box::new(MemoryStore::with_entries([(CONFIG_KEY, "{not json")])));
        let err = store.read().unwrap_err();
        assert!(matches!(err, Error::CorruptConfig { .. }));
        // Reset recovers.
        store.reset().unwrap();
        assert_eq!(store.read().unwrap(), SystemConfig::default());
    }

    #[test]
    fn test_update_applies_edit() {
        let store = memory_store();
        store
            .update(|cfg| cfg.settings.set("currency", "GBP"))
            .unwrap();
        assert_eq!(store.read().unwrap().settings.currency, "GBP");
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let store = memory_store();
        assert!(store.update(|cfg| cfg.settings.set("currency", "pounds")).is_err());
        assert_eq!(store.storage().get(CONFIG_KEY).unwrap(), None);
    }

    #[test]
    fn test_legacy_keys_detected_not_read() {
        let store = ConfigStore::new(Box::new(MemoryStore::with_entries([(
            "hris_system_config_v2",
            r#"{"settings":{"companyName":"Old Co"}}"#,
        )])));
        assert_eq!(store.orphaned_config_keys().unwrap(), vec!["hris_system_config_v2"]);
        assert_eq!(store.read().unwrap().settings.company_name, "Acme Corporation");
    }

    #[test]
    fn test_layout_key() {
        assert_eq!(layout_key("HR_Admin"), "hris_user_layout_HR_Admin");
    }
}
