//! Configuration management for the catalog client.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use catalog_engine::DEFAULT_PAGE_SIZE;

/// Product endpoint used when `CATALOG_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com/products";

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors only when stdout is a terminal and `NO_COLOR` is unset
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(ConfigError::InvalidColor(s.to_string())),
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Product list endpoint
    pub api_url: String,
    /// Directory holding the key-value storage files
    pub data_dir: PathBuf,
    /// Products revealed per page
    pub page_size: usize,
    pub color: ColorMode,
    /// Render once after hydration and exit instead of reading commands
    pub once: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(".catalog"),
            page_size: DEFAULT_PAGE_SIZE,
            color: ColorMode::Auto,
            once: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("CATALOG_API_URL").unwrap_or(defaults.api_url);
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        let data_dir = lookup("CATALOG_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let page_size = match lookup("CATALOG_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidPageSize(raw)),
            },
            None => defaults.page_size,
        };

        let color = match lookup("CATALOG_COLOR") {
            Some(raw) => raw.parse()?,
            None => defaults.color,
        };

        let once = match lookup("CATALOG_ONCE") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "CATALOG_ONCE",
                value: raw,
            })?,
            None => defaults.once,
        };

        Ok(Self {
            api_url,
            data_dir,
            page_size,
            color,
            once,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CATALOG_API_URL must be an http(s) URL, got '{0}'")]
    InvalidApiUrl(String),

    #[error("Invalid CATALOG_PAGE_SIZE value '{0}' (expected a positive integer)")]
    InvalidPageSize(String),

    #[error("Invalid CATALOG_COLOR value '{0}' (expected auto, always or never)")]
    InvalidColor(String),

    #[error("Invalid {name} value '{value}'")]
    InvalidFlag { name: &'static str, value: String },
}
