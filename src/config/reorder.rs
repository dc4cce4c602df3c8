//! Per-app navigation overrides, keyed by app label.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Navigation overrides for every configured app.
pub type ReorderConfig = BTreeMap<String, AppReorder>;

/// Overrides for a single model inside an app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOverride {
    /// Permission required to see the model, replacing `<app>.view_<model>`.
    pub perm: Option<String>,
    /// Display name shown instead of the registered one.
    pub name: Option<String>,
}

/// Overrides for one app of the admin navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppReorder {
    /// Removes the app from the navigation regardless of permissions.
    pub hide: bool,
    /// App-level permission the principal must hold.
    pub perm: Option<String>,
    /// Per-model overrides keyed by object name.
    pub models: BTreeMap<String, ModelOverride>,
    /// Explicit model order by object name. Unlisted models go last.
    pub order: Option<Vec<String>>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub divider_title: Option<String>,
    pub priority: Option<i32>,
}

impl AppReorder {
    /// Position of `object_name` in the explicit order, unlisted names rank
    /// after every listed one.
    pub fn order_index(&self, object_name: &str) -> Option<usize> {
        self.order.as_ref().map(|order| {
            order
                .iter()
                .position(|name| name == object_name)
                .unwrap_or(order.len())
        })
    }

    pub fn model_override(&self, object_name: &str) -> Option<&ModelOverride> {
        self.models.get(object_name)
    }
}
