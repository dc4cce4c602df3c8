//! Admin navigation: the per-request app dictionary and the filtered,
//! reordered app list built on top of it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AppReorder, ReorderConfig};
use crate::permission::PermissionChecker;
use crate::registry::RegisteredApp;

/// One model row of the navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub object_name: String,
    pub name: String,
    /// Permission the principal needed to see this model.
    pub perm: String,
    pub admin_url: String,
}

/// One app block of the navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub app_label: String,
    pub name: String,
    pub icon: String,
    pub divider_title: String,
    pub priority: i32,
    pub app_url: String,
    pub models: Vec<ModelEntry>,
}

/// Apps of the current request keyed by label.
pub type AppDict = BTreeMap<String, AppEntry>;

/// Default permission guarding a model: `<app_label>.view_<model>`.
pub fn default_perm(app_label: &str, object_name: &str) -> String {
    format!("{app_label}.view_{}", object_name.to_lowercase())
}

/// Builds the app dictionary from a registry snapshot.
///
/// With `label`, only that app is returned and left as registered. Without
/// it, every app carries the icon and divider title it declares. Apps
/// with an empty label are skipped, and the first app wins on a repeated
/// label.
pub fn build_app_dict(apps: Vec<RegisteredApp>, admin_root: &str, label: Option<&str>) -> AppDict {
    let admin_root = admin_root.trim_end_matches('/');
    let mut dict = AppDict::new();

    for app in apps {
        if app.label.is_empty() {
            debug!("Skipping registered app without label");
            continue;
        }
        if label.is_some_and(|label| label != app.label) {
            continue;
        }

        let app_url = format!("{admin_root}/{}/", app.label);
        let models = app
            .models
            .into_iter()
            .map(|model| ModelEntry {
                perm: default_perm(&app.label, &model.object_name),
                admin_url: model.admin_url.unwrap_or_else(|| {
                    format!("{app_url}{}/", model.object_name.to_lowercase())
                }),
                object_name: model.object_name,
                name: model.name,
            })
            .collect();

        let (icon, divider_title) = match label {
            Some(_) => (String::new(), String::new()),
            None => (app.icon, app.divider_title),
        };

        dict.entry(app.label.clone()).or_insert(AppEntry {
            app_label: app.label,
            name: app.name,
            icon,
            divider_title,
            priority: 0,
            app_url,
            models,
        });
    }
    dict
}

/// The unfiltered list the admin index would show: apps sorted by name
/// (case-insensitive), models by name.
pub fn default_app_list(dict: AppDict) -> Vec<AppEntry> {
    let mut apps: Vec<AppEntry> = dict.into_values().collect();
    apps.sort_by_key(|app| app.name.to_lowercase());
    for app in &mut apps {
        app.models.sort_by(|a, b| a.name.cmp(&b.name));
    }
    apps
}

/// Filters and reorders `apps` for the principal behind `checker`.
///
/// Hidden apps, apps whose app-level permission is missing and apps left
/// without visible models are dropped. The result is ordered by priority,
/// highest first, keeping the incoming order on ties.
pub fn build_app_list<P>(apps: Vec<AppEntry>, reorder: &ReorderConfig, checker: &P) -> Vec<AppEntry>
where
    P: PermissionChecker + ?Sized,
{
    let fallback = AppReorder::default();
    let mut final_apps: Vec<AppEntry> = apps
        .into_iter()
        .filter(|app| {
            if app.app_label.is_empty() {
                debug!("Skipping app entry without label");
                return false;
            }
            true
        })
        .filter_map(|app| {
            let cfg = reorder.get(&app.app_label).unwrap_or(&fallback);
            apply_reorder(app, cfg, checker)
        })
        .collect();

    final_apps.sort_by(|a, b| b.priority.cmp(&a.priority));
    final_apps
}

/// Navigation entry of a single app, `None` when the principal may not see it.
pub fn app_index<P>(app: AppEntry, reorder: &ReorderConfig, checker: &P) -> Option<AppEntry>
where
    P: PermissionChecker + ?Sized,
{
    let fallback = AppReorder::default();
    let cfg = reorder.get(&app.app_label).unwrap_or(&fallback);
    apply_reorder(app, cfg, checker)
}

fn apply_reorder<P>(mut app: AppEntry, cfg: &AppReorder, checker: &P) -> Option<AppEntry>
where
    P: PermissionChecker + ?Sized,
{
    if cfg.hide {
        return None;
    }
    if let Some(perm) = &cfg.perm {
        if !checker.has_perm(perm) {
            return None;
        }
    }

    let label = app.app_label.as_str();
    let mut models: Vec<ModelEntry> = app
        .models
        .into_iter()
        .filter_map(|mut model| {
            let overrides = cfg.model_override(&model.object_name);
            let perm = overrides
                .and_then(|o| o.perm.clone())
                .unwrap_or_else(|| default_perm(label, &model.object_name));
            if !checker.has_perm(&perm) {
                return None;
            }
            model.perm = perm;
            if let Some(name) = overrides.and_then(|o| o.name.clone()) {
                model.name = name;
            }
            Some(model)
        })
        .collect();

    if models.is_empty() {
        return None;
    }

    match &cfg.order {
        Some(order) if !order.is_empty() => {
            models.sort_by_key(|model| cfg.order_index(&model.object_name))
        }
        _ => models.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    app.models = models;

    if let Some(name) = &cfg.name {
        app.name = name.clone();
    }
    if let Some(icon) = &cfg.icon {
        app.icon = icon.clone();
    }
    if let Some(divider_title) = &cfg.divider_title {
        app.divider_title = divider_title.clone();
    }
    if let Some(priority) = cfg.priority {
        app.priority = priority;
    }

    Some(app)
}
