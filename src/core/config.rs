//! # Configuration
//!
//! Startup settings: which category and country to open with, NewsAPI
//! credentials, and presentation knobs (page-button cap, placeholder image).
//!
//! Each value is taken from the first source that sets it: CLI flag,
//! environment variable, `~/.newsdesk/config.toml`, built-in default.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::news::Category;
use crate::news::providers::newsapi::DEFAULT_NEWSAPI_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NewsdeskConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub newsapi: NewsApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_category: Option<String>,
    pub country: Option<String>,
    pub max_page_buttons: Option<u32>,
    pub placeholder_image: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NewsApiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "placeholder.webp";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub category: Category,
    pub country: String,
    /// Cap on numbered page buttons; `None` renders one per page.
    pub max_page_buttons: Option<u32>,
    pub placeholder_image: String,
    pub newsapi_api_key: Option<String>,
    pub newsapi_base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Location of the config file: `~/.newsdesk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".newsdesk").join("config.toml"))
}

/// Reads the config from its standard location (see [`load_config_from`]).
pub fn load_config() -> Result<NewsdeskConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("No home directory; skipping config file");
            Ok(NewsdeskConfig::default())
        }
    }
}

/// Parses the config at `path`.
///
/// A missing file yields the defaults and a commented template is written
/// in its place. An unreadable or malformed file is an error.
pub fn load_config_from(path: &Path) -> Result<NewsdeskConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("{} not found, writing template", path.display());
            write_template(path);
            return Ok(NewsdeskConfig::default());
        }
        Err(e) => return Err(ConfigError::Io(e)),
    };
    let config: NewsdeskConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    debug!("Config from {}: {:?}", path.display(), config);
    Ok(config)
}

const CONFIG_TEMPLATE: &str = r#"# Newsdesk
# Every key is optional. Precedence: built-in defaults, this file,
# environment (NEWSAPI_KEY, NEWSAPI_BASE_URL, NEWSDESK_COUNTRY,
# NEWSDESK_CATEGORY), then --category / --country.

# [general]
# default_category = "business"         # business | technology | entertainment
# country = "us"
# max_page_buttons = 0                  # 0: a button for every page
# placeholder_image = "placeholder.webp"

# [newsapi]
# api_key = ""
# base_url = "https://newsapi.org/v2"
"#;

fn write_template(path: &Path) {
    let written = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| fs::write(path, CONFIG_TEMPLATE));
    if let Err(e) = written {
        warn!("Could not write config template to {}: {}", path.display(), e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn parse_category(source: &str, raw: Option<String>) -> Option<Category> {
    match raw?.parse::<Category>() {
        Ok(category) => Some(category),
        Err(e) => {
            warn!("Ignoring {}: {}", source, e);
            None
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_category` and `cli_country` are from CLI flags (None = not specified).
pub fn resolve(
    config: &NewsdeskConfig,
    cli_category: Option<Category>,
    cli_country: Option<&str>,
) -> ResolvedConfig {
    resolve_with_env(config, cli_category, cli_country, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &NewsdeskConfig,
    cli_category: Option<Category>,
    cli_country: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Category: CLI → env → config → default. An unparseable source is
    // skipped so the next one still applies.
    let category = cli_category
        .or_else(|| {
            parse_category("NEWSDESK_CATEGORY", env("NEWSDESK_CATEGORY"))
        })
        .or_else(|| {
            parse_category(
                "general.default_category",
                config.general.default_category.clone(),
            )
        })
        .unwrap_or_default();

    // Country: CLI → env → config → default
    let country = cli_country
        .map(|s| s.to_string())
        .or_else(|| env("NEWSDESK_COUNTRY"))
        .or_else(|| config.general.country.clone())
        .map(|c| c.trim().to_ascii_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

    // API key: env → config
    let newsapi_api_key = env("NEWSAPI_KEY")
        .or_else(|| config.newsapi.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    // Base URL: env → config → default
    let newsapi_base_url = env("NEWSAPI_BASE_URL")
        .or_else(|| config.newsapi.base_url.clone())
        .unwrap_or_else(|| DEFAULT_NEWSAPI_BASE_URL.to_string());

    ResolvedConfig {
        category,
        country,
        max_page_buttons: config.general.max_page_buttons.filter(|&n| n > 0),
        placeholder_image: config
            .general
            .placeholder_image
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER_IMAGE.to_string()),
        newsapi_api_key,
        newsapi_base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = NewsdeskConfig::default();
        assert!(config.general.default_category.is_none());
        assert!(config.newsapi.api_key.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = NewsdeskConfig::default();
        let resolved = resolve_with_env(&config, Some(Category::Business), Some("us"), no_env);
        assert_eq!(resolved.category, Category::Business);
        assert_eq!(resolved.country, "us");
        assert_eq!(resolved.max_page_buttons, None);
        assert_eq!(resolved.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = NewsdeskConfig {
            general: GeneralConfig {
                default_category: Some("Technology".to_string()),
                country: Some("GB".to_string()),
                max_page_buttons: Some(5),
                placeholder_image: Some("/tmp/fallback.png".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, None, None, no_env);
        assert_eq!(resolved.category, Category::Technology);
        assert_eq!(resolved.country, "gb");
        assert_eq!(resolved.max_page_buttons, Some(5));
        assert_eq!(resolved.placeholder_image, "/tmp/fallback.png");
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_invalid_env_category_falls_through_to_config_file() {
        let config = NewsdeskConfig {
            general: GeneralConfig {
                default_category: Some("technology".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "NEWSDESK_CATEGORY").then(|| "sports".to_string());
        let resolved = resolve_with_env(&config, None, None, env);
        assert_eq!(resolved.category, Category::Technology);
    }

    #[test]
    fn test_env_overrides_config_file() {
        let config = NewsdeskConfig {
            general: GeneralConfig {
                default_category: Some("technology".to_string()),
                country: Some("gb".to_string()),
                ..Default::default()
            },
            newsapi: NewsApiConfig {
                api_key: Some("file-key".to_string()),
                base_url: None,
            },
        };
        let env = |key: &str| match key {
            "NEWSDESK_CATEGORY" => Some("Entertainment".to_string()),
            "NEWSDESK_COUNTRY" => Some("DE".to_string()),
            "NEWSAPI_KEY" => Some("env-key".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, None, None, env);
        assert_eq!(resolved.category, Category::Entertainment);
        assert_eq!(resolved.country, "de");
        assert_eq!(resolved.newsapi_api_key.as_deref(), Some("env-key"));
        assert_eq!(resolved.newsapi_base_url, DEFAULT_NEWSAPI_BASE_URL);
    }

    #[test]
    fn test_resolve_invalid_file_category_uses_default() {
        let config = NewsdeskConfig {
            general: GeneralConfig {
                default_category: Some("sports".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, None, Some("us"), no_env);
        assert_eq!(resolved.category, Category::default());
    }

    #[test]
    fn test_resolve_cli_category_wins() {
        let config = NewsdeskConfig {
            general: GeneralConfig {
                default_category: Some("technology".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, Some(Category::Entertainment), None, no_env);
        assert_eq!(resolved.category, Category::Entertainment);
    }

    #[test]
    fn test_resolve_zero_page_buttons_means_unbounded() {
        let config = NewsdeskConfig {
            general: GeneralConfig {
                max_page_buttons: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, Some(Category::Business), Some("us"), no_env);
        assert_eq!(resolved.max_page_buttons, None);
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[general]
default_category = "entertainment"
country = "ca"
max_page_buttons = 7
placeholder_image = "img.webp"

[newsapi]
api_key = "abc123"
base_url = "http://localhost:8080/v2"
"#;
        let config: NewsdeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.default_category.as_deref(),
            Some("entertainment")
        );
        assert_eq!(config.general.max_page_buttons, Some(7));
        assert_eq!(config.newsapi.api_key.as_deref(), Some("abc123"));
        assert_eq!(
            config.newsapi.base_url.as_deref(),
            Some("http://localhost:8080/v2")
        );
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("newsdesk-{}-{}", name, std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_missing_file_writes_parseable_template() {
        let path = scratch_path("missing");
        let _ = fs::remove_file(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.general.country.is_none());

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, CONFIG_TEMPLATE);
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.newsapi.api_key.is_none());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = scratch_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[general\ncountry = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
country = "de"
"#;
        let config: NewsdeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.country.as_deref(), Some("de"));
        assert!(config.general.default_category.is_none());
        assert!(config.newsapi.base_url.is_none());
    }
}
