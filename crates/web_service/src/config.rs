//! Configuration management for web service
//!
//! Supports loading configuration from environment variables with fallback to defaults.

use std::str::FromStr;

use toolbox_tools::{tools::qr_code::DEFAULT_QR_API, ToolsConfig};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_SITE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Public origin used for canonical links, the sitemap and OG image URLs.
    pub site_url: String,
    pub qr_api_base: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            site_url: DEFAULT_SITE_URL.to_string(),
            qr_api_base: DEFAULT_QR_API.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load ServerConfig from environment variables
    ///
    /// Environment variables:
    /// - `APP_HOST`: Bind address (default: 127.0.0.1)
    /// - `APP_PORT`: Listen port (default: 8080)
    /// - `APP_WORKERS`: actix worker threads (default: 4)
    /// - `TOOLBOX_SITE_URL`: Public site origin (default: http://localhost:8080)
    /// - `TOOLBOX_QR_API`: QR image service base URL (default: api.qrserver.com)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: non_empty("APP_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "APP_PORT").unwrap_or(defaults.port),
            workers: parsed(&lookup, "APP_WORKERS")
                .filter(|w| *w > 0)
                .unwrap_or(defaults.workers),
            site_url: non_empty("TOOLBOX_SITE_URL")
                .map(|url| normalize_site_url(&url))
                .unwrap_or(defaults.site_url),
            qr_api_base: non_empty("TOOLBOX_QR_API").unwrap_or(defaults.qr_api_base),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tools_config(&self) -> ToolsConfig {
        ToolsConfig {
            qr_api_base: self.qr_api_base.clone(),
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

/// Strip trailing slashes so paths can be appended with a single `/`.
pub fn normalize_site_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_server_config_has_sensible_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.tools_config().qr_api_base, DEFAULT_QR_API);
    }

    #[test]
    fn test_server_config_reads_variables() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("APP_HOST", "0.0.0.0"),
            ("APP_PORT", "9000"),
            ("APP_WORKERS", "2"),
            ("TOOLBOX_SITE_URL", "https://tools.example.com/"),
            ("TOOLBOX_QR_API", "https://qr.example.com/render"),
        ]));

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.workers, 2);
        assert_eq!(config.site_url, "https://tools.example.com");
        assert_eq!(config.qr_api_base, "https://qr.example.com/render");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("APP_PORT", "not-a-port"),
            ("APP_WORKERS", "0"),
            ("TOOLBOX_SITE_URL", "  "),
        ]));

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.site_url, DEFAULT_SITE_URL);
    }
}
