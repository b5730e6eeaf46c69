//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use storefront_cache::{Cache, SessionId, SessionStore};
use storefront_core::config::CONFIG_FILE_NAMES;
use storefront_core::prelude::*;
use storefront_data::{FetchClient, RemoteMenu, RemoteOrders};
use tracing::{debug, warn};

use crate::output::Output;

/// The cart store every command works against.
pub type Cart = CartStore<Box<dyn PersistenceAdapter>>;

/// Global flags that shape the context.
#[derive(Debug, Default)]
pub struct Options {
    pub config_path: Option<String>,
    pub session: Option<String>,
    pub menu_path: Option<String>,
}

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration, with environment overrides applied.
    pub config: StorefrontConfig,
    /// Where the configuration was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    session: Option<SessionId>,
    menu_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(options: Options, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = if let Some(path) = options.config_path.as_deref() {
            let path = resolve_path(&cwd, path);
            let config = StorefrontConfig::load(&path)?;
            (config, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };
        config.apply_process_env();

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            session: options.session.map(SessionId::new),
            menu_path: options.menu_path.map(|p| resolve_path(&cwd, &p)),
            cwd,
        })
    }

    /// Directory holding the persisted cart.
    pub fn store_dir(&self) -> PathBuf {
        resolve_path(&self.cwd, &self.config.storage.dir).join(&self.config.storage.store)
    }

    /// Open the cart, restoring whatever was persisted.
    pub fn open_cart(&self) -> Result<Cart> {
        let settings = self.config.cart_settings()?;
        let dir = self.store_dir();
        let cache = Cache::at(&dir)
            .with_context(|| format!("Failed to open cart store at {}", dir.display()))?;

        debug!(
            dir = %dir.display(),
            session = self.session.as_ref().map(SessionId::as_str),
            "opening cart store"
        );

        let storage: Box<dyn PersistenceAdapter> = match &self.session {
            Some(id) => Box::new(SessionStore::new(cache, id.clone())),
            None => Box::new(cache),
        };

        Ok(CartStore::open(storage, settings))
    }

    /// HTTP client for the storefront backend.
    pub fn client(&self) -> Result<FetchClient> {
        let api = &self.config.api;
        debug!(base_url = %api.base_url, timeout_secs = api.timeout_secs, "creating API client");
        let client = FetchClient::http(api.base_url.clone(), Duration::from_secs(api.timeout_secs))
            .context("Failed to create HTTP client")?
            .with_default_header("Accept", "application/json");
        Ok(client)
    }

    /// Product source: the `--menu` file when given, the API otherwise.
    pub fn products(&self) -> Result<Box<dyn ProductApi>> {
        if let Some(path) = &self.menu_path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read menu: {}", path.display()))?;
            let menu = StaticMenu::from_json(&content)
                .with_context(|| format!("Failed to parse menu: {}", path.display()))?;
            return Ok(Box::new(menu));
        }

        let currency = self.config.pricing.currency()?;
        Ok(Box::new(RemoteMenu::new(self.client()?).with_currency(currency)))
    }

    pub fn orders(&self) -> Result<RemoteOrders> {
        Ok(RemoteOrders::new(self.client()?))
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match StorefrontConfig::load(&config_path) {
                    Ok(config) => return Some((config, config_path)),
                    Err(e) => warn!(
                        path = %config_path.display(),
                        error = %e,
                        "ignoring unreadable config file"
                    ),
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}
