//! Rendering context shared by every admin page.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::config::BrandingSettings;
use crate::nav::AppEntry;

pub const SET_LANGUAGE_ROUTE: &str = "set_language";

/// Template context, one JSON object per page.
pub type Context = Map<String, Value>;

/// Reverses a named route into a path.
pub trait UrlResolver: Send + Sync {
    fn reverse(&self, name: &str) -> Option<String>;
}

/// Named routes known to the site, from the `[routes]` config section.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
}

impl RouteTable {
    pub fn new(routes: BTreeMap<String, String>) -> Self {
        Self { routes }
    }
}

impl UrlResolver for RouteTable {
    fn reverse(&self, name: &str) -> Option<String> {
        self.routes.get(name).cloned()
    }
}

/// Context every admin page gets before customization.
pub fn default_context(
    branding: &BrandingSettings,
    has_permission: bool,
    available_apps: &[AppEntry],
) -> Context {
    let value = json!({
        "site_title": branding.site_title(),
        "site_header": branding.site_header(),
        "site_url": "/",
        "has_permission": has_permission,
        "available_apps": available_apps,
        "is_popup": false,
        "is_nav_sidebar_enabled": true,
    });
    match value {
        Value::Object(map) => map,
        _ => Context::new(),
    }
}

/// Merges the default context with branding and site extras.
///
/// Later sources win: defaults, then branding keys, then the language
/// switch URL, logo and i18n flag. `change_language_url` is `null` when
/// no `set_language` route exists.
pub fn each_context(
    default: Context,
    branding: &BrandingSettings,
    resolver: &dyn UrlResolver,
    logo: &str,
    use_i18n: bool,
) -> Context {
    let mut context = default;
    context.extend(branding.to_map());
    context.insert(
        String::from("change_language_url"),
        resolver
            .reverse(SET_LANGUAGE_ROUTE)
            .map_or(Value::Null, Value::String),
    );
    context.insert(String::from("logo"), Value::from(logo));
    context.insert(String::from("can_delete_popup"), Value::from(""));
    context.insert(String::from("use_i18n"), Value::from(use_i18n));
    context
}
