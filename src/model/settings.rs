//! General (non role-specific) console preferences.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date formats the console can render.
pub const DATE_FORMATS: &[&str] = &["MM/DD/YYYY", "DD/MM/YYYY", "YYYY-MM-DD"];

/// Flat record of scalar preferences.
///
/// `#[serde(default)]` gives the field-by-field overlay used when a stored
/// blob predates a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneralSettings {
    pub company_name: String,
    /// Name shown in the header for the signed-in user.
    pub display_name: String,
    pub date_format: String,
    /// ISO 4217 code
    pub currency: String,
    pub timezone: String,
    pub week_starts_on_monday: bool,
    pub enable_notifications: bool,
    pub compact_mode: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            company_name: "Acme Corporation".to_string(),
            display_name: "HR Administrator".to_string(),
            date_format: "MM/DD/YYYY".to_string(),
            currency: "USD".to_string(),
            timezone: "America/New_York".to_string(),
            week_starts_on_monday: false,
            enable_notifications: true,
            compact_mode: false,
        }
    }
}

impl GeneralSettings {
    /// Settings keys as stored.
    pub const KEYS: &'static [&'static str] = &[
        "companyName",
        "displayName",
        "dateFormat",
        "currency",
        "timezone",
        "weekStartsOnMonday",
        "enableNotifications",
        "compactMode",
    ];

    /// Read a setting as display text. Accepts `companyName`, `company_name`
    /// or `company-name`.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match normalize_key(key).as_str() {
            "companyname" => self.company_name.clone(),
            "displayname" => self.display_name.clone(),
            "dateformat" => self.date_format.clone(),
            "currency" => self.currency.clone(),
            "timezone" => self.timezone.clone(),
            "weekstartsonmonday" => self.week_starts_on_monday.to_string(),
            "enablenotifications" => self.enable_notifications.to_string(),
            "compactmode" => self.compact_mode.to_string(),
            _ => return Err(Error::UnknownSetting { key: key.to_string() }),
        };
        Ok(value)
    }

    /// Parse and assign a setting from text.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match normalize_key(key).as_str() {
            "companyname" => self.company_name = non_empty(key, value)?,
            "displayname" => self.display_name = non_empty(key, value)?,
            "dateformat" => {
                if !DATE_FORMATS.contains(&value) {
                    return Err(Error::invalid_setting(
                        key,
                        value,
                        format!("expected one of {}", DATE_FORMATS.join(", ")),
                    ));
                }
                self.date_format = value.to_string();
            }
            "currency" => {
                let code = value.trim().to_uppercase();
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(Error::invalid_setting(key, value, "expected a 3-letter ISO code"));
                }
                self.currency = code;
            }
            "timezone" => self.timezone = non_empty(key, value)?,
            "weekstartsonmonday" => self.week_starts_on_monday = parse_bool(key, value)?,
            "enablenotifications" => self.enable_notifications = parse_bool(key, value)?,
            "compactmode" => self.compact_mode = parse_bool(key, value)?,
            _ => return Err(Error::UnknownSetting { key: key.to_string() }),
        }
        Ok(())
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_setting(key, value, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Parse the boolean spellings accepted on the command line.
pub fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(Error::invalid_setting(key, value, "expected true/false or on/off")),
    }
}
