//! Dashboard view-model: what a role sees and how its widget order is
//! edited before being committed to the store.

use serde::Serialize;
use tracing::warn;

use crate::catalog::{TabDefinition, WidgetCatalog, WidgetDefinition};
use crate::error::{Error, Result};
use crate::model::SystemConfig;
use crate::roles::ActiveRole;
use crate::store::ConfigStore;

/// Navigation tabs shown for `role`, in catalog order.
pub fn visible_tabs(
    config: &SystemConfig,
    role: &str,
    catalog: &WidgetCatalog,
) -> Vec<&'static TabDefinition> {
    let Some(role_config) = config.role_config(role) else {
        return Vec::new();
    };
    catalog
        .tabs()
        .iter()
        .filter(|t| role_config.is_tab_visible(t.id))
        .collect()
}

/// Resolve a saved order against the catalog. Ids the catalog does not
/// know are skipped.
pub fn render_widgets(layout: &[String], catalog: &WidgetCatalog) -> Vec<&'static WidgetDefinition> {
    layout
        .iter()
        .filter_map(|id| {
            let widget = catalog.get(id);
            if widget.is_none() {
                warn!(widget = %id, "Skipping layout entry missing from catalog");
            }
            widget
        })
        .collect()
}

/// Catalog widgets `role` may add: permitted and not already placed.
pub fn addable_widgets(
    config: &SystemConfig,
    role: &str,
    layout: &[String],
    catalog: &WidgetCatalog,
) -> Vec<&'static WidgetDefinition> {
    catalog
        .widgets()
        .iter()
        .filter(|w| !layout.iter().any(|id| id == w.id))
        .filter(|w| config.is_permitted(role, w))
        .collect()
}

// ─────────────────────────────────────────────────────────────────
// Layout Draft
// ─────────────────────────────────────────────────────────────────

/// Working copy of a role's widget order.
///
/// Edits stay in memory until [`commit`](Self::commit). `add` runs the
/// permission gate because the store itself will accept anything.
#[derive(Debug, Clone)]
pub struct LayoutDraft {
    role: String,
    order: Vec<String>,
}

impl LayoutDraft {
    /// Start from the role's current layout.
    pub fn load(store: &ConfigStore, role: &str) -> Result<Self> {
        Ok(Self {
            role: role.to_string(),
            order: store.user_layout(role)?,
        })
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Append `widget` if `config` lets the role use it.
    pub fn add(&mut self, config: &SystemConfig, widget: &WidgetDefinition) -> Result<()> {
        if !config.is_permitted(&self.role, widget) {
            return Err(Error::PermissionDenied {
                role: self.role.clone(),
                widget: widget.id.to_string(),
                permission: widget.permission_req.unwrap_or_default().to_string(),
            });
        }
        self.order.push(widget.id.to_string());
        Ok(())
    }

    /// Drop every occurrence of `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.order.len();
        self.order.retain(|w| w != id);
        self.order.len() != before
    }

    /// Move the first occurrence of `id` to position `index`.
    pub fn move_to(&mut self, id: &str, index: usize) -> Result<()> {
        let from = self
            .order
            .iter()
            .position(|w| w == id)
            .ok_or_else(|| Error::UnknownWidget { id: id.to_string() })?;
        if index >= self.order.len() {
            return Err(Error::LayoutIndex {
                index,
                len: self.order.len(),
            });
        }
        let widget = self.order.remove(from);
        self.order.insert(index, widget);
        Ok(())
    }

    pub fn commit(&self, store: &ConfigStore) -> Result<()> {
        store.save_user_layout(&self.role, &self.order)
    }
}

// ─────────────────────────────────────────────────────────────────
// Dashboard View
// ─────────────────────────────────────────────────────────────────

/// Everything the dashboard needs for the active role.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub role: String,
    /// False when the stored role is outside the known set.
    pub recognized: bool,
    pub tabs: Vec<&'static TabDefinition>,
    pub widgets: Vec<&'static WidgetDefinition>,
    pub addable: Vec<&'static WidgetDefinition>,
}

impl DashboardView {
    pub fn resolve(store: &ConfigStore, catalog: &WidgetCatalog) -> Result<Self> {
        let active = store.current_role()?;
        let config = store.read()?;
        let layout = store.user_layout(active.as_str())?;
        Ok(Self::build(&active, &config, &layout, catalog))
    }

    pub fn build(
        active: &ActiveRole,
        config: &SystemConfig,
        layout: &[String],
        catalog: &WidgetCatalog,
    ) -> Self {
        let role = active.as_str();
        Self {
            role: role.to_string(),
            recognized: active.role().is_some(),
            tabs: visible_tabs(config, role, catalog),
            widgets: render_widgets(layout, catalog),
            addable: addable_widgets(config, role, layout, catalog),
        }
    }
}
