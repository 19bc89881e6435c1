use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// The bookmark site being scraped
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Base URL of the manga tracking site
    #[serde(default = "default_site_base_url")]
    pub base_url: String,

    /// Path of the bookmark listing (page 1 is the bare path)
    #[serde(default = "default_bookmark_path")]
    pub bookmark_path: String,
}

/// The catalog API used to resolve latest chapter dates
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Translated language requested from the chapter feed
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Filename of the exported JSON document
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Timeout for HTTP requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Enable cookie support
    #[serde(default = "default_true")]
    pub enable_cookies: bool,

    /// Enable gzip compression
    #[serde(default = "default_true")]
    pub enable_gzip: bool,
}

fn default_true() -> bool { true }
fn default_site_base_url() -> String { "https://www.natomanga.com".to_string() }
fn default_bookmark_path() -> String { "/bookmark".to_string() }
fn default_api_url() -> String { "https://api.mangadex.org".to_string() }
fn default_language() -> String { "en".to_string() }
fn default_output_file() -> String { "natomanga_bookmarks.json".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_site_base_url(),
            bookmark_path: default_bookmark_path(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            language: default_language(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            enable_cookies: true,
            enable_gzip: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            catalog: CatalogConfig::default(),
            export: ExportConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                match toml::from_str::<Config>(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => log::warn!("Invalid config at {}: {}", path.display(), e),
                }
            }
        }
        Self::default()
    }

    /// URL of the bookmark listing, bare path for page 1
    pub fn bookmark_list_url(&self) -> String {
        format!(
            "{}{}",
            self.site.base_url.trim_end_matches('/'),
            self.site.bookmark_path
        )
    }
}

impl HttpConfig {
    /// Create an HTTP client from this configuration
    pub fn create_http_client(&self) -> Result<crate::http_client::HttpClient, reqwest::Error> {
        use crate::http_client::{HttpClient, HttpClientConfig};

        let config = HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            enable_cookies: self.enable_cookies,
            enable_gzip: self.enable_gzip,
        };

        HttpClient::with_config(config)
    }
}
