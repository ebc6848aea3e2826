//! Core role types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ─────────────────────────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────────────────────────

/// The closed set of console roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Full system administration, including the configuration panel.
    Admin,
    /// Company-wide read access to headcount and finance figures.
    Executive,
    /// Team lead: approvals, team calendar, hiring for their reports.
    Manager,
    /// HR administration: compliance, onboarding, employee records.
    #[serde(rename = "HR_Admin")]
    HrAdmin,
    /// Self-service only.
    Employee,
}

impl Role {
    /// Role assumed when nothing has been persisted.
    pub const DEFAULT: Role = Role::Admin;

    /// Canonical name, used as the persisted value and as the layout map key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Executive => "Executive",
            Role::Manager => "Manager",
            Role::HrAdmin => "HR_Admin",
            Role::Employee => "Employee",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Executive => "Executive",
            Role::Manager => "Manager",
            Role::HrAdmin => "HR Administrator",
            Role::Employee => "Employee",
        }
    }

    /// All roles in declaration order.
    pub fn all() -> &'static [Role] {
        &[
            Role::Admin,
            Role::Executive,
            Role::Manager,
            Role::HrAdmin,
            Role::Employee,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "executive" => Ok(Role::Executive),
            "manager" => Ok(Role::Manager),
            "hr_admin" | "hr-admin" | "hradmin" => Ok(Role::HrAdmin),
            "employee" => Ok(Role::Employee),
            _ => Err(Error::unknown_role(s)),
        }
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ─────────────────────────────────────────────────────────────────
// Active Role
// ─────────────────────────────────────────────────────────────────

/// The role read back from storage.
///
/// New values can only be written as a [`Role`], but an older or hand-edited
/// store may still hold a name outside the set. That value is kept verbatim
/// so lookups against it miss and resolve fail-closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveRole {
    Known(Role),
    Unrecognized(String),
}

impl ActiveRole {
    /// Interpret a persisted value. Exact canonical names only; the lenient
    /// spellings accepted by `FromStr` are for user input.
    pub fn from_persisted(value: &str) -> Self {
        Role::all()
            .iter()
            .find(|r| r.as_str() == value)
            .map(|r| ActiveRole::Known(*r))
            .unwrap_or_else(|| ActiveRole::Unrecognized(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActiveRole::Known(role) => role.as_str(),
            ActiveRole::Unrecognized(name) => name,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            ActiveRole::Known(role) => Some(*role),
            ActiveRole::Unrecognized(_) => None,
        }
    }
}

impl From<Role> for ActiveRole {
    fn from(role: Role) -> Self {
        ActiveRole::Known(role)
    }
}

impl fmt::Display for ActiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ActiveRole {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
        assert_eq!("HR_Admin".parse::<Role>().unwrap(), Role::HrAdmin);
        assert_eq!("hr-admin".parse::<Role>().unwrap(), Role::HrAdmin);
        assert!("Intern".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for role in Role::all() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn test_active_role_from_persisted() {
        assert_eq!(
            ActiveRole::from_persisted("Manager"),
            ActiveRole::Known(Role::Manager)
        );
        let stale = ActiveRole::from_persisted("Contractor");
        assert_eq!(stale.role(), None);
        assert_eq!(stale.as_str(), "Contractor");
        // Persisted values are matched exactly.
        assert_eq!(stale, ActiveRole::Unrecognized("Contractor".into()));
        assert!(ActiveRole::from_persisted("manager").role().is_none());
    }
}
