//! Snapshot of the installed apps and their registered models.

use serde::{Deserialize, Serialize};

/// A model registered with the admin site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredModel {
    pub object_name: String,
    /// Verbose plural name shown in the navigation.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,
}

/// An installed app together with the models it registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredApp {
    pub label: String,
    pub name: String,
    /// Icon declared by the app itself.
    #[serde(default)]
    pub icon: String,
    /// Divider title declared by the app itself.
    #[serde(default)]
    pub divider_title: String,
    #[serde(default)]
    pub models: Vec<RegisteredModel>,
}

/// Source of the live model registry.
///
/// Implementations return a fresh snapshot on every call; callers never
/// cache it across requests.
pub trait ModelRegistry: Send + Sync {
    fn apps(&self) -> Vec<RegisteredApp>;
}

/// Registry backed by a fixed list, usually the `[[registry]]` config section.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    apps: Vec<RegisteredApp>,
}

impl StaticRegistry {
    pub fn new(apps: Vec<RegisteredApp>) -> Self {
        Self { apps }
    }
}

impl ModelRegistry for StaticRegistry {
    fn apps(&self) -> Vec<RegisteredApp> {
        self.apps.clone()
    }
}
