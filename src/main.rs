//! HRIS admin console - command-line entry point.

use clap::Parser;
use tracing::{debug, info};

use hris_admin::cli::{Cli, Commands, ConfigSubcommand, LayoutSubcommand, RoleSubcommand};
use hris_admin::config::{self, AppConfig};
use hris_admin::dashboard::{DashboardView, LayoutDraft};
use hris_admin::error::{Error, Result};
use hris_admin::permissions::ALL_PERMISSIONS;
use hris_admin::{logging, version};
use hris_admin::{ActiveRole, ConfigStore, JsonFileStore, Role, WidgetCatalog};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        debug!(error = %e.format_for_log(), "Command failed");
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

/// Global options shared by every command that opens the store.
struct Console {
    config_path: Option<String>,
    verbose: u8,
    quiet: bool,
}

/// An opened store plus the logging guards that must outlive it.
struct Session {
    store: ConfigStore,
    _log_guards: logging::LogGuards,
}

impl Console {
    fn open(&self) -> Result<Session> {
        let app_config = AppConfig::load(self.config_path.as_deref())?;
        let log_guards = logging::init_logging(&app_config.logging, self.verbose, self.quiet)?;

        let store_path = app_config.store_path();
        debug!(path = %store_path.display(), "Opening store");
        let store = ConfigStore::new(Box::new(JsonFileStore::new(store_path)));
        store.orphaned_config_keys()?;

        Ok(Session {
            store,
            _log_guards: log_guards,
        })
    }
}

fn run(cli: Cli) -> Result<()> {
    let console = Console {
        config_path: cli.config,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };
    let catalog = WidgetCatalog::new();

    match cli.command {
        Commands::Version => {
            version::print_version();
            Ok(())
        }
        Commands::Config { subcommand } => handle_config_command(&console, &catalog, subcommand),
        Commands::Role { subcommand } => handle_role_command(&console.open()?.store, subcommand),
        Commands::Layout { subcommand } => {
            handle_layout_command(&console.open()?.store, &catalog, subcommand)
        }
        Commands::Widgets { role } => show_widgets(&console.open()?.store, &catalog, role.as_deref()),
        Commands::Dashboard { json } => show_dashboard(&console.open()?.store, &catalog, json),
    }
}

/// Explicit `--role` (validated against the role set) or the active role.
fn resolve_role(store: &ConfigStore, role: Option<&str>) -> Result<ActiveRole> {
    match role {
        Some(name) => Ok(ActiveRole::Known(name.parse::<Role>()?)),
        None => store.current_role(),
    }
}

fn handle_config_command(
    console: &Console,
    catalog: &WidgetCatalog,
    subcommand: ConfigSubcommand,
) -> Result<()> {
    match subcommand {
        // These two work on the console config file and never open the store.
        ConfigSubcommand::Init { path, force } => {
            logging::init_simple(tracing::Level::WARN)?;
            let path = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", path.display());
        }
        ConfigSubcommand::Validate => {
            logging::init_simple(tracing::Level::WARN)?;
            AppConfig::load(console.config_path.as_deref())?;
            println!("Configuration is valid.");
        }
        ConfigSubcommand::Show => {
            let config = console.open()?.store.read()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigSubcommand::Reset => {
            console.open()?.store.reset()?;
            println!("System configuration reset to defaults.");
        }
        ConfigSubcommand::Set { key, value } => {
            let config = console
                .open()?
                .store
                .update(|cfg| cfg.settings.set(&key, &value))?;
            println!("{} = {}", key, config.settings.get(&key)?);
        }
        ConfigSubcommand::Tab { role, tab, state } => {
            let role: Role = role.parse()?;
            let tab = catalog.require_tab(&tab)?;
            console.open()?.store.update(|cfg| {
                cfg.role_config_mut(role)
                    .tabs
                    .insert(tab.id.to_string(), state.enabled());
                Ok(())
            })?;
            println!("{}: tab '{}' {}", role, tab.id, on_off(state.enabled()));
        }
        ConfigSubcommand::Widget { role, widget, state } => {
            let role: Role = role.parse()?;
            let widget = catalog.require(&widget)?;
            console.open()?.store.update(|cfg| {
                cfg.role_config_mut(role)
                    .widgets
                    .insert(widget.id.to_string(), state.enabled());
                Ok(())
            })?;
            println!("{}: widget '{}' {}", role, widget.id, on_off(state.enabled()));
        }
        ConfigSubcommand::Grant { role, permission } => {
            let role: Role = role.parse()?;
            check_permission_tag(&permission)?;
            let mut changed = false;
            console.open()?.store.update(|cfg| {
                changed = cfg.role_config_mut(role).grant(&permission);
                Ok(())
            })?;
            if changed {
                println!("{}: granted '{}'", role, permission);
            } else {
                println!("{}: already has '{}'", role, permission);
            }
        }
        ConfigSubcommand::Revoke { role, permission } => {
            let role: Role = role.parse()?;
            let mut changed = false;
            console.open()?.store.update(|cfg| {
                changed = cfg.role_config_mut(role).revoke(&permission);
                Ok(())
            })?;
            if changed {
                println!("{}: revoked '{}'", role, permission);
            } else {
                println!("{}: did not have '{}'", role, permission);
            }
        }
    }
    Ok(())
}

fn handle_role_command(store: &ConfigStore, subcommand: RoleSubcommand) -> Result<()> {
    match subcommand {
        RoleSubcommand::Show => match store.current_role()? {
            ActiveRole::Known(role) => println!("{} ({})", role, role.display_name()),
            ActiveRole::Unrecognized(name) => {
                println!("{} (unrecognized role, access restricted)", name)
            }
        },
        RoleSubcommand::Set { role } => {
            let role: Role = role.parse()?;
            store.set_current_role(role)?;
            println!("Active role: {}", role);
        }
        RoleSubcommand::List => {
            let active = store.current_role()?;
            for role in Role::all() {
                let marker = if active.role() == Some(*role) { "*" } else { " " };
                println!("{} {:<10} {}", marker, role.as_str(), role.display_name());
            }
        }
    }
    Ok(())
}

fn handle_layout_command(
    store: &ConfigStore,
    catalog: &WidgetCatalog,
    subcommand: LayoutSubcommand,
) -> Result<()> {
    match subcommand {
        LayoutSubcommand::Show { role } => {
            let role = resolve_role(store, role.as_deref())?;
            let layout = store.user_layout(role.as_str())?;
            println!("Layout for {}:", role);
            if layout.is_empty() {
                println!("  (empty)");
            }
            for (index, id) in layout.iter().enumerate() {
                match catalog.get(id) {
                    Some(widget) => println!("  {:>2}. {:<20} {}", index, id, widget.title),
                    None => println!("  {:>2}. {:<20} (not in catalog, hidden)", index, id),
                }
            }
        }
        LayoutSubcommand::Add { widget, role } => {
            let role = resolve_role(store, role.as_deref())?;
            let widget = catalog.require(&widget)?;
            let config = store.read()?;
            let mut draft = LayoutDraft::load(store, role.as_str())?;
            draft.add(&config, widget)?;
            draft.commit(store)?;
            info!(role = %role, widget = widget.id, "Widget added");
            println!("Added '{}' to {}'s dashboard.", widget.id, role);
        }
        LayoutSubcommand::Remove { widget, role } => {
            let role = resolve_role(store, role.as_deref())?;
            let mut draft = LayoutDraft::load(store, role.as_str())?;
            if draft.remove(&widget) {
                draft.commit(store)?;
                println!("Removed '{}' from {}'s dashboard.", widget, role);
            } else {
                println!("'{}' is not on {}'s dashboard.", widget, role);
            }
        }
        LayoutSubcommand::Move {
            widget,
            position,
            role,
        } => {
            let role = resolve_role(store, role.as_deref())?;
            let mut draft = LayoutDraft::load(store, role.as_str())?;
            draft.move_to(&widget, position)?;
            draft.commit(store)?;
            println!("Moved '{}' to position {}.", widget, position);
        }
        LayoutSubcommand::Reset { role } => {
            let role = resolve_role(store, role.as_deref())?;
            store.reset_user_layout(role.as_str())?;
            println!("Layout for {} reset to role defaults.", role);
        }
    }
    Ok(())
}

fn show_widgets(store: &ConfigStore, catalog: &WidgetCatalog, role: Option<&str>) -> Result<()> {
    let role = resolve_role(store, role)?;
    let config = store.read()?;
    let layout = store.user_layout(role.as_str())?;

    println!("Widgets for {}:", role);
    for widget in catalog.widgets() {
        let status = if layout.iter().any(|id| id == widget.id) {
            "placed"
        } else if config.is_permitted(role.as_str(), widget) {
            "available"
        } else {
            "locked"
        };
        println!(
            "  {:<20} {:<10} {:<16} {}",
            widget.id,
            status,
            widget.permission_req.unwrap_or("-"),
            widget.title
        );
    }
    Ok(())
}

fn show_dashboard(store: &ConfigStore, catalog: &WidgetCatalog, json: bool) -> Result<()> {
    let view = DashboardView::resolve(store, catalog)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Role: {}", view.role);
    if !view.recognized {
        println!("  (unrecognized role, access restricted)");
    }
    let tabs: Vec<&str> = view.tabs.iter().map(|t| t.label).collect();
    println!("Tabs: {}", if tabs.is_empty() { "(none)".to_string() } else { tabs.join(", ") });
    println!("Widgets:");
    for widget in &view.widgets {
        println!("  - {} [{}x{}]", widget.title, widget.min_w, widget.min_h);
    }
    if !view.addable.is_empty() {
        let addable: Vec<&str> = view.addable.iter().map(|w| w.id).collect();
        println!("Can add: {}", addable.join(", "));
    }
    Ok(())
}

fn check_permission_tag(tag: &str) -> Result<()> {
    if ALL_PERMISSIONS.contains(&tag) {
        return Ok(());
    }
    Err(Error::invalid_setting(
        "permission",
        tag,
        format!("expected one of {}", ALL_PERMISSIONS.join(", ")),
    ))
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
