//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use jsp_cache::FileStore;
use jsp_commerce::catalog::Catalog;
use jsp_render::HttpIconSource;
use jsp_storefront::Storefront;

use crate::config::{CliConfig, CONFIG_FILE};
use crate::output::Output;

/// Catalog used when `[catalog] path` is not set.
pub const DEMO_CATALOG: &str = include_str!("../data/catalog.json");

const LOCAL_STORE: &str = "local.json";
const SESSION_STORE: &str = "session.json";

/// The storefront the CLI drives: both stores are files, so the cart and the
/// last order survive between invocations.
pub type CliStorefront = Storefront<FileStore, FileStore>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file, or the nearest `jsp.toml`.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        tracing::debug!(config = ?config_path, "configuration loaded");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory relative config paths are resolved against: the config
    /// file's directory, or the working directory without one.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a configured path.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Load the configured catalog.
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        let catalog = match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))?
            }
            None => Catalog::from_json(DEMO_CATALOG).context("Failed to load demo catalog")?,
        };
        Ok(Arc::new(catalog))
    }

    /// Open the storefront over the configured stores.
    pub fn storefront(&self) -> Result<CliStorefront> {
        let dir = self.resolve_path(&self.config.storage.dir);
        let local = FileStore::open(dir.join(LOCAL_STORE))
            .with_context(|| format!("Failed to open store in {}", dir.display()))?;
        let session = FileStore::open(dir.join(SESSION_STORE))
            .with_context(|| format!("Failed to open store in {}", dir.display()))?;
        let app = Storefront::new(self.catalog()?, local, session)?
            .with_page_size(self.config.search.page_size);
        Ok(app)
    }

    /// Icon source for rendering, unless disabled.
    pub fn icon_source(&self) -> Option<HttpIconSource> {
        self.config
            .icons
            .enabled
            .then(|| HttpIconSource::new(self.config.icons.base_url.as_str()))
    }
}

/// Find the nearest config file from `start` upward.
fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config: CliConfig, config_path: Option<PathBuf>, cwd: &Path) -> Context {
        Context {
            config,
            config_path,
            output: Output::new(true),
            cwd: cwd.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "").unwrap();
        assert_eq!(find_config(&nested), Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_demo_catalog_loads() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(CliConfig::default(), None, dir.path());
        let catalog = ctx.catalog().unwrap();
        assert!(catalog.len() >= 13);
        assert_eq!(catalog.categories().len(), 13);
    }

    #[test]
    fn test_storage_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE);
        let ctx = context(CliConfig::default(), Some(config_path), Path::new("/"));
        assert_eq!(ctx.base_dir(), dir.path());

        let app = ctx.storefront().unwrap();
        app.carts()
            .add_to_cart("Audeze Penrose", jsp_commerce::Money::new(1), 1)
            .unwrap();
        assert!(dir.path().join(".jsp").join(LOCAL_STORE).exists());
    }
}
