//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use softo_commerce::cart::CART_STORAGE_KEY;
use softo_commerce::catalog::Lang;
use softo_commerce::checkout::CheckoutConfig;
use softo_commerce::money::Currency;

/// Config file names looked up from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["softo.toml", ".softo.toml", "softo.json"];

/// Environment variable overriding `api.base_url`.
pub const API_BASE_URL_ENV: &str = "SOFTO_API_BASE_URL";

/// Storefront configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog API access.
    #[serde(default)]
    pub api: ApiConfig,

    /// Cart persistence.
    #[serde(default)]
    pub cart: CartConfig,

    /// WhatsApp checkout.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Presentation.
    #[serde(default)]
    pub storefront: StorefrontSection,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment overrides.
    pub fn apply_env(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    concat!("softo/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Directory holding the cart slot. Defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Storage key of the cart slot.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Currency prices are held in.
    #[serde(default)]
    pub currency: Currency,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            storage_key: default_storage_key(),
            currency: Currency::default(),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontSection {
    /// Display language for names and labels.
    #[serde(default)]
    pub lang: Lang,
}

/// Generate a default softo.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# SoftoDev storefront configuration

[api]
base_url = "{base_url}"
timeout_secs = {timeout}

[cart]
# storage_dir = "~/.local/share/softo"
storage_key = "{storage_key}"
currency = "IQD"

[checkout]
phone = "+905015954826"
greeting = "مرحبا SoftoDev، أريد تأكيد هذا الطلب:"
total_label = "الإجمالي"
empty_message = "مرحبا SoftoDev، أريد طلب."
currency_symbol = ""

[storefront]
lang = "ar"
"#,
        base_url = default_base_url(),
        timeout = default_timeout_secs(),
        storage_key = CART_STORAGE_KEY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let parsed: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        let defaults = StorefrontConfig::default();

        assert_eq!(parsed.api.base_url, defaults.api.base_url);
        assert_eq!(parsed.api.timeout_secs, 15);
        assert_eq!(parsed.cart.storage_key, "softodev_cart_v1");
        assert_eq!(parsed.cart.currency, Currency::IQD);
        assert_eq!(parsed.checkout, CheckoutConfig::default());
        assert_eq!(parsed.storefront.lang, Lang::Ar);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed: StorefrontConfig = toml::from_str(
            r#"
[storefront]
lang = "en"

[checkout]
currency_symbol = "$"
"#,
        )
        .unwrap();

        assert_eq!(parsed.storefront.lang, Lang::En);
        assert_eq!(parsed.checkout.currency_symbol, "$");
        assert_eq!(parsed.checkout.phone, "+905015954826");
        assert_eq!(parsed.api.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_env_override() {
        let mut config = StorefrontConfig::default();
        config.apply_env(Some("   ".to_string()));
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");

        config.apply_env(Some("https://api.softodev.com".to_string()));
        assert_eq!(config.api.base_url, "https://api.softodev.com");
    }

    #[test]
    fn test_save_and_load_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("softo.json");

        let mut config = StorefrontConfig::default();
        config.storefront.lang = Lang::En;
        config.cart.storage_dir = Some(tmp.path().join("cart"));
        config.save(&path).unwrap();

        let loaded = StorefrontConfig::load(&path).unwrap();
        assert_eq!(loaded.storefront.lang, Lang::En);
        assert_eq!(loaded.cart.storage_dir, Some(tmp.path().join("cart")));
    }
}
