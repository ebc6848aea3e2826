//! Permission gate.
//!
//! A widget may declare one permission tag; a role may use it only if its
//! config grants that tag. Missing config grants nothing.

use crate::catalog::WidgetDefinition;
use crate::model::RoleConfig;

/// Payroll and budget figures.
pub const FINANCE_VIEW: &str = "finance:view";
/// Visa, certification and policy compliance data.
pub const COMPLIANCE_VIEW: &str = "compliance:view";
/// Requisitions and candidate pipeline.
pub const HIRING_MANAGE: &str = "hiring:manage";
/// Direct reports' calendars and timesheets.
pub const TEAM_VIEW: &str = "team:view";
/// Organisation-wide headcount and attrition.
pub const ORG_VIEW: &str = "org:view";
/// The configuration panel itself.
pub const ADMIN_CONFIGURE: &str = "admin:configure";

/// Every tag the console knows about.
pub const ALL_PERMISSIONS: &[&str] = &[
    FINANCE_VIEW,
    COMPLIANCE_VIEW,
    HIRING_MANAGE,
    TEAM_VIEW,
    ORG_VIEW,
    ADMIN_CONFIGURE,
];

/// Whether a role holding `role_config` may use `widget`.
///
/// Widgets without a requirement are open to everyone, including roles with
/// no config at all.
pub fn is_permitted(role_config: Option<&RoleConfig>, widget: &WidgetDefinition) -> bool {
    match widget.permission_req {
        None => true,
        Some(required) => role_config.is_some_and(|cfg| cfg.has_permission(required)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WidgetCatalog;

    #[test]
    fn test_open_widget_always_permitted() {
        let catalog = WidgetCatalog::new();
        let open = catalog
            .widgets()
            .iter()
            .find(|w| w.permission_req.is_none())
            .unwrap();
        assert!(is_permitted(None, open));
        assert!(is_permitted(Some(&RoleConfig::default()), open));
    }

    #[test]
    fn test_missing_config_is_closed() {
        let catalog = WidgetCatalog::new();
        for widget in catalog.widgets().iter().filter(|w| w.permission_req.is_some()) {
            assert!(!is_permitted(None, widget), "{} should be gated", widget.id);
        }
    }

    #[test]
    fn test_granted_tag_opens_gate() {
        let catalog = WidgetCatalog::new();
        let payroll = catalog.get("payroll-summary").unwrap();

        let mut cfg = RoleConfig::default();
        assert!(!is_permitted(Some(&cfg), payroll));

        cfg.permissions.push(FINANCE_VIEW.to_string());
        assert!(is_permitted(Some(&cfg), payroll));
    }
}
