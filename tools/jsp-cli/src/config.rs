//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jsp_commerce::search::DEFAULT_PAGE_SIZE;
use jsp_render::DEFAULT_ICON_BASE_URL;
use serde::{Deserialize, Serialize};

/// File name looked up from the working directory upward.
pub const CONFIG_FILE: &str = "jsp.toml";

/// Contents of `jsp.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub icons: IconsConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}

/// Where the local and session stores live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding `local.json` and `session.json`.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".jsp")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Product catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// JSON catalog file; the bundled demo catalog when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Products per results page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Brand icon fetching for `jsp render`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IconsConfig {
    #[serde(default = "default_icon_base_url")]
    pub base_url: String,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            base_url: default_icon_base_url(),
            enabled: true,
        }
    }
}

/// Generate a default jsp.toml.
pub fn generate_default_config() -> String {
    format!(
        r#"# JSP Store CLI configuration

[storage]
# Cart and order summary files
dir = ".jsp"

[catalog]
# path = "catalog.json"

[search]
page_size = {page_size}

[icons]
base_url = "{base_url}"
enabled = true
"#,
        page_size = DEFAULT_PAGE_SIZE,
        base_url = DEFAULT_ICON_BASE_URL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.storage.dir, PathBuf::from(".jsp"));
        assert_eq!(config.search.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.icons.enabled);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: CliConfig = toml::from_str(
            r#"
            [search]
            page_size = 4

            [icons]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.search.page_size, 4);
        assert!(!config.icons.enabled);
        assert_eq!(config.icons.base_url, DEFAULT_ICON_BASE_URL);
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[catalog]\npath = \"parts.json\"\n").unwrap();
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.catalog.path, Some(PathBuf::from("parts.json")));

        std::fs::write(&path, "[search]\npage_size = \"ten\"\n").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }
}
