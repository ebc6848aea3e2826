//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the HRIS admin console.

use clap::{Parser, Subcommand, ValueEnum};

/// HRIS Admin Console - role-based dashboard and access configuration
///
/// Manages which navigation tabs, dashboard widgets and permissions each
/// HRIS role gets, the active role of this session, and per-role widget
/// order.
#[derive(Parser, Debug)]
#[command(name = "hris-admin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the console configuration file
    #[arg(short, long, env = "HRIS_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version and build information
    Version,

    /// System configuration (per-role tabs, widgets, permissions, settings)
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Active role of this session
    Role {
        #[command(subcommand)]
        subcommand: RoleSubcommand,
    },

    /// Dashboard widget order for a role
    Layout {
        #[command(subcommand)]
        subcommand: LayoutSubcommand,
    },

    /// List the widget catalog and what a role may place
    Widgets {
        /// Role to check (defaults to the active role)
        #[arg(long)]
        role: Option<String>,
    },

    /// Show the resolved dashboard for the active role
    Dashboard {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// On/off switch for tab and widget toggles
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Print the merged system configuration as JSON
    Show,

    /// Delete the stored system configuration and revert to defaults
    Reset,

    /// Set a general setting (e.g. companyName, dateFormat, currency)
    Set { key: String, value: String },

    /// Show or hide a navigation tab for a role
    Tab {
        role: String,
        tab: String,
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Enable or disable a widget by default for a role
    Widget {
        role: String,
        widget: String,
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Grant a permission tag to a role
    Grant { role: String, permission: String },

    /// Revoke a permission tag from a role
    Revoke { role: String, permission: String },

    /// Write a commented default console configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the console configuration file
    Validate,
}

/// Role subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum RoleSubcommand {
    /// Show the active role
    Show,

    /// Switch the active role
    Set { role: String },

    /// List all roles
    List,
}

/// Layout subcommands. All default to the active role.
#[derive(Subcommand, Debug, Clone)]
pub enum LayoutSubcommand {
    /// Show the stored widget order
    Show {
        #[arg(long)]
        role: Option<String>,
    },

    /// Append a widget (permission checked)
    Add {
        widget: String,
        #[arg(long)]
        role: Option<String>,
    },

    /// Remove a widget
    Remove {
        widget: String,
        #[arg(long)]
        role: Option<String>,
    },

    /// Move a widget to a zero-based position
    Move {
        widget: String,
        position: usize,
        #[arg(long)]
        role: Option<String>,
    },

    /// Forget the saved order and fall back to role defaults
    Reset {
        #[arg(long)]
        role: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_role_set() {
        let cli = Cli::parse_from(["hris-admin", "role", "set", "Employee"]);
        match cli.command {
            Commands::Role { subcommand: RoleSubcommand::Set { role } } => {
                assert_eq!(role, "Employee");
            }
            _ => panic!("Expected Role Set command"),
        }
    }

    #[test]
    fn test_config_tab_toggle() {
        let cli = Cli::parse_from(["hris-admin", "config", "tab", "Manager", "hiring", "off"]);
        match cli.command {
            Commands::Config {
                subcommand: ConfigSubcommand::Tab { role, tab, state },
            } => {
                assert_eq!(role, "Manager");
                assert_eq!(tab, "hiring");
                assert!(!state.enabled());
            }
            _ => panic!("Expected Config Tab command"),
        }
    }

    #[test]
    fn test_layout_move_with_role() {
        let cli = Cli::parse_from([
            "hris-admin",
            "layout",
            "move",
            "announcements",
            "0",
            "--role",
            "Employee",
        ]);
        match cli.command {
            Commands::Layout {
                subcommand: LayoutSubcommand::Move { widget, position, role },
            } => {
                assert_eq!(widget, "announcements");
                assert_eq!(position, 0);
                assert_eq!(role.as_deref(), Some("Employee"));
            }
            _ => panic!("Expected Layout Move command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["hris-admin", "-vv", "--config", "/tmp/a.toml", "version"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some("/tmp/a.toml"));
        assert!(!cli.quiet);
    }

    #[test]
    fn test_bad_toggle_rejected() {
        let result = Cli::try_parse_from(["hris-admin", "config", "widget", "Admin", "x", "maybe"]);
        assert!(result.is_err());
    }
}
