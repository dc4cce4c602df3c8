//! HTTP surface of the admin site.

use std::sync::Arc;

use crate::auth::jwt::JwtKeys;
use crate::config::AdminConfig;
use crate::prelude::*;
use crate::site::AdminSite;
use crate::storage::{FileSystemStorage, Storage};

pub mod api;
pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod upload;

/// State shared by every admin route.
#[derive(Clone)]
pub struct AdminState {
    pub site: Arc<AdminSite>,
    pub storage: Arc<dyn Storage>,
    pub keys: JwtKeys,
}

impl AdminState {
    pub fn new(site: AdminSite, storage: Arc<dyn Storage>, keys: JwtKeys) -> Self {
        Self {
            site: Arc::new(site),
            storage,
            keys,
        }
    }

    /// State wired entirely from the config: static registry, route table
    /// and file system storage under `media_root`.
    pub fn from_config(config: Arc<AdminConfig>) -> Result<Self> {
        let keys = JwtKeys::new(config.jwt_secret()?.as_bytes());
        let storage = Arc::new(FileSystemStorage::new(
            config.storage.media_root.clone(),
            config.storage.media_url.clone(),
        ));
        Ok(Self::new(AdminSite::from_config(config), storage, keys))
    }

    pub fn config(&self) -> &AdminConfig {
        self.site.config()
    }
}
