//! # Application Configuration
//!
//! Settings for the command line application.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BILLBOOK_BASE_URL=https://billing.example.com                       │
//! │     BILLBOOK_USER_EMAIL=owner@example.com                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                 │
//! │     ~/.config/billbook/config.toml (Linux)                              │
//! │     ~/Library/Application Support/com.billbook.billbook/config.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:5000, 30s timeout, current directory exports      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [backend]
//! base_url = "https://billing.example.com"
//! timeout_secs = 30
//!
//! [user]
//! email = "owner@example.com"
//!
//! [display]
//! currency_symbol = "₹"
//!
//! [export]
//! output_dir = "/home/owner/reports"
//!
//! [subscription]
//! amount = 500
//! currency = "INR"
//! plan = "monthly"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use billbook_client::ClientConfig;
use billbook_core::validation::validate_email;
use billbook_core::SubscriptionPlan;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CliError, CliResult};

// =============================================================================
// Backend Settings
// =============================================================================

/// Where the billing backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL; endpoints are appended as `/api/...`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token sent with every request, when the deployment needs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            api_token: None,
        }
    }
}

// =============================================================================
// User, Display, Export
// =============================================================================

/// The signed-in owner. Every party and bill is scoped to this e-mail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for amounts on the dashboard.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory for `bills_<start>_<end>.xlsx|pdf` when `-o` is not given.
    /// Unset means the current directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

// =============================================================================
// Subscription Settings
// =============================================================================

/// What `subscription order` charges.
///
/// The amount is sent to the backend unchanged, independent of the plan's
/// advertised price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSettings {
    #[serde(default = "default_subscription_amount")]
    pub amount: i64,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_plan")]
    pub plan: String,
}

fn default_subscription_amount() -> i64 {
    500
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_plan() -> String {
    SubscriptionPlan::Monthly.wire_name().to_string()
}

impl Default for SubscriptionSettings {
    fn default() -> Self {
        SubscriptionSettings {
            amount: default_subscription_amount(),
            currency: default_currency(),
            plan: default_plan(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub user: UserSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub subscription: SubscriptionSettings,
}

impl AppConfig {
    /// Loads configuration from file and environment, over defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config.toml`)
    /// 3. Environment variables
    ///
    /// Validation is left to the caller: `config show` must work on an
    /// incomplete config.
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let mut config = Self::load_file(config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Defaults overlaid with the config file only, for rewriting it.
    pub fn load_file(config_path: Option<&Path>) -> CliResult<Self> {
        match config_path.map(Path::to_path_buf).or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from file");
                Self::read_file(&path)
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => {
                warn!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("Could not read {}: {}", path.display(), e)))?;
        toml::from_str(&contents)
            .map_err(|e| CliError::config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Saves configuration to `config_path` or the default location and
    /// returns the path written.
    pub fn save(&self, config_path: Option<&Path>) -> CliResult<PathBuf> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::config("No config path available; pass --config"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Checks everything a backend command needs.
    pub fn validate(&self) -> CliResult<()> {
        let url = Url::parse(&self.backend.base_url).map_err(|e| {
            CliError::config(format!(
                "backend.base_url '{}' is not a valid URL: {}",
                self.backend.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CliError::config(format!(
                "backend.base_url must start with http:// or https://, got: {}",
                self.backend.base_url
            )));
        }

        if self.user.email.trim().is_empty() {
            return Err(CliError::config(
                "user.email is not set; run `billbook config init` or set BILLBOOK_USER_EMAIL",
            ));
        }
        validate_email(&self.user.email)
            .map_err(|e| CliError::config(format!("user.email: {}", e)))?;

        if self.backend.timeout_secs == 0 {
            return Err(CliError::config(
                "backend.timeout_secs must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Applies `BILLBOOK_*` overrides read through `lookup`.
    pub(crate) fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BILLBOOK_BASE_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.backend.base_url = url;
        }

        if let Some(email) = lookup("BILLBOOK_USER_EMAIL") {
            self.user.email = email;
        }

        if let Some(token) = lookup("BILLBOOK_API_TOKEN") {
            self.backend.api_token = Some(token);
        }

        if let Some(timeout) = lookup("BILLBOOK_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.backend.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid BILLBOOK_TIMEOUT_SECS"),
            }
        }

        if let Some(dir) = lookup("BILLBOOK_EXPORT_DIR") {
            self.export.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(symbol) = lookup("BILLBOOK_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "billbook", "billbook")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// Directory for default export file names.
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Settings for [`billbook_client::BillbookClient::new`].
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::new(self.backend.base_url.clone(), self.user.email.trim())
            .timeout(self.timeout())
            .api_token(self.backend.api_token.clone())
    }

    /// The configured plan, falling back to monthly when unreadable.
    pub fn subscription_plan(&self) -> SubscriptionPlan {
        self.subscription.plan.parse().unwrap_or_else(|_| {
            warn!(plan = %self.subscription.plan, "Unknown subscription plan, using monthly");
            SubscriptionPlan::Monthly
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid() -> AppConfig {
        let mut config = AppConfig::default();
        config.user.email = "owner@example.com".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.subscription.amount, 500);
        assert_eq!(config.subscription.currency, "INR");
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid();
        assert!(config.validate().is_ok());

        config.backend.base_url = "ftp://billing.example.com".to_string();
        assert!(config.validate().is_err());

        config.backend.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.backend.base_url = "https://billing.example.com".to_string();
        config.backend.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.backend.timeout_secs = 10;
        config.user.email = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("user.email"));

        config.user.email = "not-an-email".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("BILLBOOK_BASE_URL", "https://api.example.com"),
            ("BILLBOOK_USER_EMAIL", "env@example.com"),
            ("BILLBOOK_TIMEOUT_SECS", "5"),
            ("BILLBOOK_EXPORT_DIR", "/tmp/out"),
            ("BILLBOOK_CURRENCY_SYMBOL", "Rs"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.base_url, "https://api.example.com");
        assert_eq!(config.user.email, "env@example.com");
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/out"));
        assert_eq!(config.display.currency_symbol, "Rs");
    }

    #[test]
    fn test_invalid_timeout_env_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| {
            (key == "BILLBOOK_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [user]
            email = "owner@example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.user.email, "owner@example.com");
        assert_eq!(config.backend, BackendSettings::default());
    }

    #[test]
    fn test_save_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = valid();
        config.backend.base_url = "https://billing.example.com".to_string();
        config.export.output_dir = Some(PathBuf::from("/srv/reports"));

        let written = config.save(Some(&path)).unwrap();
        assert_eq!(written, path);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[backend]"));
        assert!(contents.contains("[user]"));

        let loaded = AppConfig::read_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_subscription_plan_fallback() {
        let mut config = AppConfig::default();
        assert_eq!(config.subscription_plan(), SubscriptionPlan::Monthly);
        config.subscription.plan = "premium".to_string();
        assert_eq!(config.subscription_plan(), SubscriptionPlan::HalfYearly);
        config.subscription.plan = "gold".to_string();
        assert_eq!(config.subscription_plan(), SubscriptionPlan::Monthly);
    }
}
