//! Process-wide admin configuration.
//!
//! Loaded once at startup from a TOML file and shared read-only with every
//! request through an `Arc`.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8000"
//! admin_root = "/admin"
//!
//! [branding]
//! site_title = "Acme"
//! theme = "dark"
//!
//! [apps.auth]
//! priority = 10
//! order = ["User", "Group"]
//!
//! [[registry]]
//! label = "auth"
//! name = "Authentication"
//! models = [{ object_name = "User", name = "Users" }]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::registry::RegisteredApp;

pub mod error;
pub mod reorder;

pub use reorder::{AppReorder, ModelOverride, ReorderConfig};

pub type Result<T> = core::result::Result<T, error::Error>;

pub const CONFIG_PATH_ENV: &str = "ADMIN_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "admin.toml";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

const DEFAULT_SITE_TITLE: &str = "django admin";
const DEFAULT_SITE_HEADER: &str = "Administration";
const DEFAULT_INDEX_TITLE: &str = "hi, welcome to your dashboard";
const DEFAULT_LOGO: &str = "admin/img/daisyui-logomark.svg";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server listens on.
    pub bind: String,
    /// Mount point of every admin route, without trailing slash.
    pub admin_root: String,
    /// Scheme used when building absolute URLs.
    pub scheme: String,
    /// Prefix of static assets, with trailing slash.
    pub static_url: String,
    /// Host (with optional port) used for absolute URLs instead of the
    /// request's `Host` header.
    pub public_host: Option<String>,
    /// Host names accepted from the request when `public_host` is unset.
    /// A leading dot matches the domain and its subdomains, `*` matches any.
    pub allowed_hosts: Vec<String>,
}

impl ServerConfig {
    /// Whether `host`, with or without port, matches `allowed_hosts`.
    pub fn is_allowed_host(&self, host: &str) -> bool {
        let domain = strip_port(host).to_ascii_lowercase();
        if domain.is_empty() {
            return false;
        }
        self.allowed_hosts.iter().any(|pattern| {
            let pattern = pattern.to_ascii_lowercase();
            if pattern == "*" {
                return true;
            }
            match pattern.strip_prefix('.') {
                Some(parent) => domain == parent || domain.ends_with(&pattern),
                None => domain == pattern,
            }
        })
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((domain, _)) => domain,
        None => host,
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: String::from("127.0.0.1:8000"),
            admin_root: String::from("/admin"),
            scheme: String::from("http"),
            static_url: String::from("/static/"),
            public_host: None,
            allowed_hosts: vec![
                String::from("localhost"),
                String::from("127.0.0.1"),
                String::from("[::1]"),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
}

/// Branding settings injected into every admin page.
///
/// Unknown keys are kept in `extra` and reach the page context unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_logo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BrandingSettings {
    pub fn site_title(&self) -> &str {
        self.site_title.as_deref().unwrap_or(DEFAULT_SITE_TITLE)
    }

    pub fn site_header(&self) -> &str {
        self.site_header.as_deref().unwrap_or(DEFAULT_SITE_HEADER)
    }

    pub fn index_title(&self) -> &str {
        self.index_title.as_deref().unwrap_or(DEFAULT_INDEX_TITLE)
    }

    /// Configured logo, or the bundled one under `static_url`.
    pub fn logo(&self, static_url: &str) -> String {
        match &self.site_logo {
            Some(logo) => logo.clone(),
            None => format!("{static_url}{DEFAULT_LOGO}"),
        }
    }

    /// Flat mapping of every configured key, as merged into page context.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory uploads are written to.
    pub media_root: PathBuf,
    /// URL prefix uploads are served under, with trailing slash.
    pub media_url: String,
    /// Largest accepted request body on the upload route.
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("media"),
            media_url: String::from("/media/"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    pub use_i18n: bool,
}

/// Complete admin configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub branding: BrandingSettings,
    pub storage: StorageConfig,
    pub i18n: I18nConfig,
    /// Named routes available for reversal, e.g. `set_language`.
    pub routes: BTreeMap<String, String>,
    /// Navigation overrides keyed by app label.
    pub apps: ReorderConfig,
    /// Installed apps and their registered models.
    pub registry: Vec<RegisteredApp>,
}

impl AdminConfig {
    /// Load configuration from the file named by `ADMIN_CONFIG`.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::from_file(Path::new(&path))
    }

    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        info!("Loading admin configuration from {}", file_path.display());
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        let config: Self = toml::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that app labels and model object names are unique.
    pub fn validate(&self) -> Result<()> {
        let mut labels = HashSet::new();
        for app in &self.registry {
            if !labels.insert(app.label.as_str()) {
                return Err(error::Error::DuplicateApp(app.label.clone()));
            }
            let mut models = HashSet::new();
            for model in &app.models {
                if !models.insert(model.object_name.as_str()) {
                    return Err(error::Error::DuplicateModel {
                        app: app.label.clone(),
                        model: model.object_name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Token secret, `JWT_SECRET` taking precedence over the file.
    pub fn jwt_secret(&self) -> Result<String> {
        std::env::var(JWT_SECRET_ENV)
            .ok()
            .or_else(|| self.auth.jwt_secret.clone())
            .ok_or(error::Error::MissingJwtSecret)
    }

    /// Joins `path` under the admin root.
    pub fn admin_path(&self, path: &str) -> String {
        format!("{}/{path}", self.server.admin_root.trim_end_matches('/'))
    }
}
