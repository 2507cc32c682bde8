//! Common types used across Sunboard components.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Dashboard section shown as a footer shortcut.
///
/// The persisted form is the stable string id returned by [`TabId::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabId {
    Overview,
    Production,
    Savings,
    Rewards,
    Referrals,
    Clients,
    Commissions,
    Community,
    Support,
    Settings,
    Admin,
}

impl TabId {
    /// Every tab the dashboard knows about, in menu order.
    pub const ALL: [TabId; 11] = [
        TabId::Overview,
        TabId::Production,
        TabId::Savings,
        TabId::Rewards,
        TabId::Referrals,
        TabId::Clients,
        TabId::Commissions,
        TabId::Community,
        TabId::Support,
        TabId::Settings,
        TabId::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TabId::Overview => "overview",
            TabId::Production => "production",
            TabId::Savings => "savings",
            TabId::Rewards => "rewards",
            TabId::Referrals => "referrals",
            TabId::Clients => "clients",
            TabId::Commissions => "commissions",
            TabId::Community => "community",
            TabId::Support => "support",
            TabId::Settings => "settings",
            TabId::Admin => "admin",
        }
    }

    /// Human-readable label for the footer button.
    pub fn label(self) -> &'static str {
        match self {
            TabId::Overview => "Overview",
            TabId::Production => "Production",
            TabId::Savings => "Savings",
            TabId::Rewards => "Rewards",
            TabId::Referrals => "Referrals",
            TabId::Clients => "Clients",
            TabId::Commissions => "Commissions",
            TabId::Community => "Community",
            TabId::Support => "Support",
            TabId::Settings => "Settings",
            TabId::Admin => "Admin",
        }
    }

    /// Icon reference resolved by the host's icon set.
    pub fn icon(self) -> &'static str {
        match self {
            TabId::Overview => "layout-dashboard",
            TabId::Production => "sun",
            TabId::Savings => "piggy-bank",
            TabId::Rewards => "trophy",
            TabId::Referrals => "user-plus",
            TabId::Clients => "users",
            TabId::Commissions => "badge-euro",
            TabId::Community => "messages-square",
            TabId::Support => "life-buoy",
            TabId::Settings => "settings",
            TabId::Admin => "shield",
        }
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string did not name any known tab.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tab id '{0}'")]
pub struct UnknownTab(pub String);

impl FromStr for TabId {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabId::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// Descriptor of a tab as offered by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabDescriptor {
    pub id: TabId,
    pub label: &'static str,
    pub icon: &'static str,
}

impl From<TabId> for TabDescriptor {
    fn from(id: TabId) -> Self {
        Self {
            id,
            label: id.label(),
            icon: id.icon(),
        }
    }
}

/// Who is looking at the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Consultant,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Consultant => "consultant",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "consultant" => Ok(Role::Consultant),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Sunboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SunboardConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub typewriter: TypewriterSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory holding persisted dashboard preferences.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Role used to build the tab catalog.
    #[serde(default)]
    pub role: Role,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: None,
            role: Role::Customer,
        }
    }
}

/// Typewriter settings as they appear in the config file (milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypewriterSettings {
    #[serde(default = "default_messages")]
    pub messages: Vec<String>,
    #[serde(default = "default_typing_speed")]
    pub typing_speed_ms: u64,
    #[serde(default = "default_deleting_speed")]
    pub deleting_speed_ms: u64,
    #[serde(default = "default_pause_after_type")]
    pub pause_after_type_ms: u64,
    #[serde(default = "default_pause_after_delete")]
    pub pause_after_delete_ms: u64,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            messages: default_messages(),
            typing_speed_ms: default_typing_speed(),
            deleting_speed_ms: default_deleting_speed(),
            pause_after_type_ms: default_pause_after_type(),
            pause_after_delete_ms: default_pause_after_delete(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_messages() -> Vec<String> {
    vec![
        "Power your home with the sun.".to_string(),
        "Save on every kilowatt-hour.".to_string(),
        "Earn rewards for clean energy.".to_string(),
    ]
}

fn default_typing_speed() -> u64 {
    100
}

fn default_deleting_speed() -> u64 {
    50
}

fn default_pause_after_type() -> u64 {
    2000
}

fn default_pause_after_delete() -> u64 {
    500
}
