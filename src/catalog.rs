//! Static tab and widget catalog.
//!
//! The catalog is read-only reference data: the store never validates
//! layouts against it, and views use it to drop ids that no longer exist.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::permissions::{
    ADMIN_CONFIGURE, COMPLIANCE_VIEW, FINANCE_VIEW, HIRING_MANAGE, ORG_VIEW, TEAM_VIEW,
};

/// A dashboard panel as the catalog describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Minimum grid columns.
    pub min_w: u8,
    /// Minimum grid rows.
    pub min_h: u8,
    /// Permission tag required to place this widget, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_req: Option<&'static str>,
}

/// A navigation tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabDefinition {
    pub id: &'static str,
    pub label: &'static str,
}

const TABS: &[TabDefinition] = &[
    TabDefinition { id: "dashboard", label: "Dashboard" },
    TabDefinition { id: "employees", label: "Employees" },
    TabDefinition { id: "compliance", label: "Compliance" },
    TabDefinition { id: "time-tracking", label: "Time Tracking" },
    TabDefinition { id: "hiring", label: "Hiring" },
    TabDefinition { id: "reports", label: "Reports" },
    TabDefinition { id: "admin", label: "Admin" },
];

const WIDGETS: &[WidgetDefinition] = &[
    WidgetDefinition {
        id: "headcount-overview",
        title: "Headcount Overview",
        description: "Active employees by department and location",
        min_w: 2,
        min_h: 1,
        permission_req: Some(ORG_VIEW),
    },
    WidgetDefinition {
        id: "attrition-trend",
        title: "Attrition Trend",
        description: "Rolling twelve-month voluntary and involuntary exits",
        min_w: 2,
        min_h: 2,
        permission_req: Some(ORG_VIEW),
    },
    WidgetDefinition {
        id: "payroll-summary",
        title: "Payroll Summary",
        description: "Current period gross pay, taxes and deductions",
        min_w: 2,
        min_h: 1,
        permission_req: Some(FINANCE_VIEW),
    },
    WidgetDefinition {
        id: "finance-widget",
        title: "Budget vs Actual",
        description: "Department spend against approved budget",
        min_w: 2,
        min_h: 2,
        permission_req: Some(FINANCE_VIEW),
    },
    WidgetDefinition {
        id: "compliance-score",
        title: "Compliance Score",
        description: "Share of required documents and trainings on file",
        min_w: 1,
        min_h: 1,
        permission_req: Some(COMPLIANCE_VIEW),
    },
    WidgetDefinition {
        id: "visa-expiry",
        title: "Visa Expiry Tracker",
        description: "Work authorizations expiring in the next 90 days",
        min_w: 2,
        min_h: 2,
        permission_req: Some(COMPLIANCE_VIEW),
    },
    WidgetDefinition {
        id: "hiring-pipeline",
        title: "Hiring Pipeline",
        description: "Open requisitions and candidates per stage",
        min_w: 2,
        min_h: 2,
        permission_req: Some(HIRING_MANAGE),
    },
    WidgetDefinition {
        id: "team-calendar",
        title: "Team Calendar",
        description: "Leave and holidays for direct reports",
        min_w: 2,
        min_h: 2,
        permission_req: Some(TEAM_VIEW),
    },
    WidgetDefinition {
        id: "pending-approvals",
        title: "Pending Approvals",
        description: "Timesheets and leave requests awaiting sign-off",
        min_w: 1,
        min_h: 1,
        permission_req: Some(TEAM_VIEW),
    },
    WidgetDefinition {
        id: "my-timesheet",
        title: "My Timesheet",
        description: "Running timer and hours logged this week",
        min_w: 1,
        min_h: 1,
        permission_req: None,
    },
    WidgetDefinition {
        id: "time-off-balance",
        title: "Time Off Balance",
        description: "Remaining vacation and sick leave",
        min_w: 1,
        min_h: 1,
        permission_req: None,
    },
    WidgetDefinition {
        id: "announcements",
        title: "Announcements",
        description: "Company news and policy updates",
        min_w: 2,
        min_h: 1,
        permission_req: None,
    },
    WidgetDefinition {
        id: "config-status",
        title: "Configuration Status",
        description: "Active role overrides and stored layout counts",
        min_w: 1,
        min_h: 1,
        permission_req: Some(ADMIN_CONFIGURE),
    },
];

/// Read-only view over the bundled catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct WidgetCatalog;

impl WidgetCatalog {
    pub fn new() -> Self {
        Self
    }

    /// All widgets in catalog order.
    pub fn widgets(&self) -> &'static [WidgetDefinition] {
        WIDGETS
    }

    /// All tabs in navigation order.
    pub fn tabs(&self) -> &'static [TabDefinition] {
        TABS
    }

    pub fn get(&self, id: &str) -> Option<&'static WidgetDefinition> {
        WIDGETS.iter().find(|w| w.id == id)
    }

    /// Like [`get`](Self::get) but for user input, where an unknown id is an error.
    pub fn require(&self, id: &str) -> Result<&'static WidgetDefinition> {
        self.get(id).ok_or_else(|| Error::UnknownWidget { id: id.to_string() })
    }

    pub fn tab(&self, id: &str) -> Option<&'static TabDefinition> {
        TABS.iter().find(|t| t.id == id)
    }

    pub fn require_tab(&self, id: &str) -> Result<&'static TabDefinition> {
        self.tab(id).ok_or_else(|| Error::UnknownTab { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::permissions::ALL_PERMISSIONS;

    #[test]
    fn test_ids_unique() {
        let catalog = WidgetCatalog::new();
        let widgets: HashSet<_> = catalog.widgets().iter().map(|w| w.id).collect();
        assert_eq!(widgets.len(), catalog.widgets().len());
        let tabs: HashSet<_> = catalog.tabs().iter().map(|t| t.id).collect();
        assert_eq!(tabs.len(), catalog.tabs().len());
    }

    #[test]
    fn test_requirements_are_known_tags() {
        for widget in WidgetCatalog::new().widgets() {
            if let Some(tag) = widget.permission_req {
                assert!(ALL_PERMISSIONS.contains(&tag), "{} uses unknown tag {}", widget.id, tag);
            }
            assert!(widget.min_w >= 1 && widget.min_h >= 1);
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = WidgetCatalog::new();
        assert_eq!(catalog.get("visa-expiry").unwrap().permission_req, Some(COMPLIANCE_VIEW));
        assert!(catalog.get("ghost-widget").is_none());
        assert!(matches!(
            catalog.require("ghost-widget"),
            Err(Error::UnknownWidget { .. })
        ));
        assert!(catalog.require_tab("hiring").is_ok());
        assert!(catalog.require_tab("payroll").is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(WidgetCatalog::new().get("my-timesheet").unwrap()).unwrap();
        assert_eq!(json["minW"], 1);
        assert!(json.get("permissionReq").is_none());
    }
}
