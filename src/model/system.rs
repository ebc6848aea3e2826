//! Per-role layout config, the aggregate system config, and the
//! default-plus-overlay merge applied on every read.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::settings::GeneralSettings;
use crate::catalog::{WidgetCatalog, WidgetDefinition};
use crate::permissions::{self, COMPLIANCE_VIEW, FINANCE_VIEW, HIRING_MANAGE, ORG_VIEW, TEAM_VIEW};
use crate::roles::Role;

// ─────────────────────────────────────────────────────────────────
// Role Config
// ─────────────────────────────────────────────────────────────────

/// Tabs, default widgets and permission tags for one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Tab id -> shown in navigation.
    pub tabs: IndexMap<String, bool>,
    /// Widget id -> enabled by default on a fresh dashboard.
    pub widgets: IndexMap<String, bool>,
    /// Granted permission tags.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RoleConfig {
    pub fn has_permission(&self, tag: &str) -> bool {
        self.permissions.iter().any(|p| p == tag)
    }

    /// Missing tab entries count as hidden.
    pub fn is_tab_visible(&self, tab: &str) -> bool {
        self.tabs.get(tab).copied().unwrap_or(false)
    }

    pub fn is_widget_enabled(&self, widget: &str) -> bool {
        self.widgets.get(widget).copied().unwrap_or(false)
    }

    /// Enabled widgets in map order.
    pub fn enabled_widgets(&self) -> Vec<String> {
        self.widgets
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Returns false if the tag was already granted.
    pub fn grant(&mut self, tag: &str) -> bool {
        if self.has_permission(tag) {
            return false;
        }
        self.permissions.push(tag.to_string());
        true
    }

    /// Returns false if the tag was not granted.
    pub fn revoke(&mut self, tag: &str) -> bool {
        let before = self.permissions.len();
        self.permissions.retain(|p| p != tag);
        self.permissions.len() != before
    }

    fn overlay(&mut self, persisted: PersistedRoleConfig) {
        if let Some(tabs) = persisted.tabs {
            self.tabs.extend(tabs);
        }
        if let Some(widgets) = persisted.widgets {
            self.widgets.extend(widgets);
        }
        if let Some(permissions) = persisted.permissions {
            self.permissions = permissions;
        }
    }

    /// Every catalog tab and widget gets an explicit entry, enabled iff listed.
    fn from_catalog(tabs: &[&str], widgets: &[&str], permissions: &[&str]) -> Self {
        let catalog = WidgetCatalog::new();
        Self {
            tabs: catalog
                .tabs()
                .iter()
                .map(|t| (t.id.to_string(), tabs.contains(&t.id)))
                .collect(),
            widgets: catalog
                .widgets()
                .iter()
                .map(|w| (w.id.to_string(), widgets.contains(&w.id)))
                .collect(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Built-in config for a role.
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Admin => {
                let catalog = WidgetCatalog::new();
                let tabs: Vec<&str> = catalog.tabs().iter().map(|t| t.id).collect();
                let widgets: Vec<&str> = catalog.widgets().iter().map(|w| w.id).collect();
                Self::from_catalog(&tabs, &widgets, permissions::ALL_PERMISSIONS)
            }
            Role::Executive => Self::from_catalog(
                &["dashboard", "employees", "reports"],
                &[
                    "headcount-overview",
                    "attrition-trend",
                    "payroll-summary",
                    "finance-widget",
                    "announcements",
                ],
                &[ORG_VIEW, FINANCE_VIEW],
            ),
            Role::Manager => Self::from_catalog(
                &["dashboard", "employees", "time-tracking", "hiring", "reports"],
                &[
                    "team-calendar",
                    "pending-approvals",
                    "hiring-pipeline",
                    "my-timesheet",
                    "announcements",
                ],
                &[TEAM_VIEW, HIRING_MANAGE, FINANCE_VIEW],
            ),
            Role::HrAdmin => Self::from_catalog(
                &[
                    "dashboard",
                    "employees",
                    "compliance",
                    "time-tracking",
                    "hiring",
                    "reports",
                ],
                &[
                    "headcount-overview",
                    "compliance-score",
                    "visa-expiry",
                    "hiring-pipeline",
                    "pending-approvals",
                    "announcements",
                ],
                &[ORG_VIEW, COMPLIANCE_VIEW, HIRING_MANAGE, TEAM_VIEW],
            ),
            Role::Employee => Self::from_catalog(
                &["dashboard", "time-tracking"],
                &["my-timesheet", "time-off-balance", "announcements"],
                &[],
            ),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// System Config
// ─────────────────────────────────────────────────────────────────

/// The single process-wide configuration object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Role name -> config. Keyed by name so entries for roles outside the
    /// enum survive a round-trip.
    pub layout: IndexMap<String, RoleConfig>,
    pub settings: GeneralSettings,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            layout: Role::all()
                .iter()
                .map(|r| (r.as_str().to_string(), RoleConfig::default_for(*r)))
                .collect(),
            settings: GeneralSettings::default(),
        }
    }
}

impl SystemConfig {
    /// Defaults with a stored blob laid over them.
    ///
    /// Settings overlay field by field. Each stored role overlays its
    /// default entry key by key for `tabs` and `widgets`; `permissions`
    /// replaces the default list when present. Roles that only exist in the
    /// blob are kept as stored.
    pub fn merge_persisted(persisted: PersistedConfig) -> Self {
        let mut merged = Self::default();
        if let Some(settings) = persisted.settings {
            merged.settings = settings;
        }
        for (role, stored) in persisted.layout {
            merged.layout.entry(role).or_default().overlay(stored);
        }
        merged
    }

    /// Config for a role name, if any. Unknown names resolve to `None`,
    /// which every consumer treats as fully restricted.
    pub fn role_config(&self, role: &str) -> Option<&RoleConfig> {
        self.layout.get(role)
    }

    /// Mutable config for a known role, created from its defaults if a
    /// caller removed it.
    pub fn role_config_mut(&mut self, role: Role) -> &mut RoleConfig {
        self.layout
            .entry(role.as_str().to_string())
            .or_insert_with(|| RoleConfig::default_for(role))
    }

    /// Permission gate against this config.
    pub fn is_permitted(&self, role: &str, widget: &WidgetDefinition) -> bool {
        permissions::is_permitted(self.role_config(role), widget)
    }
}

// ─────────────────────────────────────────────────────────────────
// Stored Form
// ─────────────────────────────────────────────────────────────────

/// A stored system config blob as it may appear on disk: any subset of
/// the fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersistedConfig {
    pub layout: IndexMap<String, PersistedRoleConfig>,
    pub settings: Option<GeneralSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersistedRoleConfig {
    pub tabs: Option<IndexMap<String, bool>>,
    pub widgets: Option<IndexMap<String, bool>>,
    pub permissions: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SystemConfig {
        SystemConfig::merge_persisted(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_defaults_cover_every_role_and_catalog_entry() {
        let config = SystemConfig::default();
        let catalog = WidgetCatalog::new();
        for role in Role::all() {
            let cfg = config.role_config(role.as_str()).unwrap();
            assert_eq!(cfg.tabs.len(), catalog.tabs().len());
            assert_eq!(cfg.widgets.len(), catalog.widgets().len());
        }
    }

    #[test]
    fn test_empty_blob_is_default() {
        assert_eq!(parse("{}"), SystemConfig::default());
    }

    #[test]
    fn test_partial_role_overlays_keys() {
        let merged = parse(r#"{"layout":{"Employee":{"tabs":{"hiring":true}}}}"#);
        let employee = merged.role_config("Employee").unwrap();
        assert!(employee.is_tab_visible("hiring"));
        assert!(employee.is_tab_visible("dashboard"));
        assert_eq!(employee.widgets, RoleConfig::default_for(Role::Employee).widgets);
    }

    #[test]
    fn test_stored_permissions_replace_defaults() {
        let merged = parse(r#"{"layout":{"Manager":{"permissions":["org:view"]}}}"#);
        assert_eq!(merged.role_config("Manager").unwrap().permissions, vec!["org:view"]);
    }

    #[test]
    fn test_extra_role_kept() {
        let merged = parse(r#"{"layout":{"Contractor":{"widgets":{"my-timesheet":true}}}}"#);
        let contractor = merged.role_config("Contractor").unwrap();
        assert_eq!(contractor.enabled_widgets(), vec!["my-timesheet"]);
        assert!(contractor.tabs.is_empty());
        assert_eq!(merged.layout.len(), Role::all().len() + 1);
    }

    #[test]
    fn test_enabled_widgets_follow_catalog_order() {
        let employee = RoleConfig::default_for(Role::Employee);
        assert_eq!(
            employee.enabled_widgets(),
            vec!["my-timesheet", "time-off-balance", "announcements"]
        );
    }

    #[test]
    fn test_grant_revoke() {
        let mut cfg = RoleConfig::default_for(Role::Employee);
        assert!(cfg.grant(TEAM_VIEW));
        assert!(!cfg.grant(TEAM_VIEW));
        assert!(cfg.revoke(TEAM_VIEW));
        assert!(!cfg.revoke(TEAM_VIEW));
    }

    #[test]
    fn test_unknown_role_fail_closed() {
        let config = SystemConfig::default();
        let widget = WidgetCatalog::new().get("payroll-summary").unwrap();
        assert!(config.is_permitted("Admin", widget));
        assert!(!config.is_permitted("Employee", widget));
        assert!(!config.is_permitted("Contractor", widget));
    }
}
