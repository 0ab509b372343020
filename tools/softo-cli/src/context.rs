//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use softo_cache::FileStore;
use softo_commerce::cart::{CartStore, KvPersistence};
use softo_data::CatalogClient;

use crate::config::{StorefrontConfig, API_BASE_URL_ENV, CONFIG_NAMES};
use crate::output::Output;

/// Cart store as the CLI persists it.
pub type FileCartStore = CartStore<KvPersistence<FileStore>>;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the configuration was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file and environment.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (StorefrontConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };
        config.apply_env(std::env::var(API_BASE_URL_ENV).ok());

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find a config file in the directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Directory holding the cart slot.
    pub fn storage_dir(&self) -> PathBuf {
        match &self.config.cart.storage_dir {
            Some(dir) => resolve(&self.cwd, &expand_home(dir)),
            None => dirs_path().join("softo"),
        }
    }

    /// Open the persisted cart.
    pub fn cart_store(&self) -> FileCartStore {
        let currency = self.config.cart.currency;
        let persistence = KvPersistence::with_key(
            FileStore::new(self.storage_dir()),
            self.config.cart.storage_key.clone(),
            currency,
        );
        CartStore::open(persistence, currency)
    }

    /// Catalog API client.
    pub fn catalog(&self) -> Result<CatalogClient> {
        let api = &self.config.api;
        CatalogClient::new(&api.base_url, api.timeout_secs, &api.user_agent)
            .context("Failed to build catalog client")
    }
}

fn resolve(cwd: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join(".softo.toml"), "").unwrap();

        assert_eq!(
            Context::find_config(&nested),
            Some(tmp.path().join(".softo.toml"))
        );
    }

    #[test]
    fn test_resolve_relative_paths() {
        let cwd = Path::new("/srv/shop");
        assert_eq!(resolve(cwd, "cart"), PathBuf::from("/srv/shop/cart"));
        assert_eq!(resolve(cwd, "/var/cart"), PathBuf::from("/var/cart"));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home(Path::new("data")), PathBuf::from("data"));
    }
}
