//! The customized admin site.
//!
//! Composes the framework collaborators (model registry, route resolver)
//! with the immutable [`AdminConfig`] and produces everything an admin page
//! needs for the current principal: the app dictionary, the navigation list
//! and the rendering context.

use std::sync::Arc;

use serde_json::Value;

use crate::config::AdminConfig;
use crate::context::{self, Context, RouteTable, UrlResolver};
use crate::nav::{self, AppDict, AppEntry};
use crate::permission::{PermissionChecker, Principal};
use crate::registry::{ModelRegistry, StaticRegistry};

#[derive(Clone)]
pub struct AdminSite {
    config: Arc<AdminConfig>,
    registry: Arc<dyn ModelRegistry>,
    resolver: Arc<dyn UrlResolver>,
}

impl AdminSite {
    pub fn new(
        config: Arc<AdminConfig>,
        registry: Arc<dyn ModelRegistry>,
        resolver: Arc<dyn UrlResolver>,
    ) -> Self {
        Self {
            config,
            registry,
            resolver,
        }
    }

    /// Site backed by the registry and routes declared in the config itself.
    pub fn from_config(config: Arc<AdminConfig>) -> Self {
        let registry = Arc::new(StaticRegistry::new(config.registry.clone()));
        let resolver = Arc::new(RouteTable::new(config.routes.clone()));
        Self::new(config, registry, resolver)
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn build_app_dict(&self, label: Option<&str>) -> AppDict {
        nav::build_app_dict(self.registry.apps(), &self.config.server.admin_root, label)
    }

    /// Navigation list for the principal behind `checker`.
    pub fn get_app_list<P>(&self, checker: &P) -> Vec<AppEntry>
    where
        P: PermissionChecker + ?Sized,
    {
        let apps = nav::default_app_list(self.build_app_dict(None));
        nav::build_app_list(apps, &self.config.apps, checker)
    }

    /// A single app as its index page shows it, `None` when not visible.
    pub fn app_index<P>(&self, label: &str, checker: &P) -> Option<AppEntry>
    where
        P: PermissionChecker + ?Sized,
    {
        let mut dict = self.build_app_dict(Some(label));
        let mut app = dict.remove(label)?;
        app.models.sort_by(|a, b| a.name.cmp(&b.name));
        nav::app_index(app, &self.config.apps, checker)
    }

    pub fn logo(&self) -> String {
        self.config.branding.logo(&self.config.server.static_url)
    }

    /// Context shared by every admin page.
    pub fn each_context(&self, principal: &Principal) -> Context {
        let branding = &self.config.branding;
        let available_apps = if principal.can_access_admin() {
            self.get_app_list(principal)
        } else {
            Vec::new()
        };
        let default =
            context::default_context(branding, principal.can_access_admin(), &available_apps);
        context::each_context(
            default,
            branding,
            self.resolver.as_ref(),
            &self.logo(),
            self.config.i18n.use_i18n,
        )
    }

    /// Context of the admin index page: the shared context plus the title
    /// and the app list.
    pub fn index_context(&self, principal: &Principal) -> Context {
        let mut context = self.each_context(principal);
        let app_list = context
            .get("available_apps")
            .cloned()
            .unwrap_or(Value::Array(Vec::new()));
        context.insert(
            String::from("title"),
            Value::from(self.config.branding.index_title()),
        );
        context.insert(String::from("app_list"), app_list);
        context
    }
}
