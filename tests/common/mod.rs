#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use chrono::TimeDelta;
use daisy_admin::{
    auth::{
        auth::{AuthToken, encode_token},
        jwt::JwtKeys,
    },
    config::AdminConfig,
    permission::Principal,
    site::AdminSite,
    storage::{FileSystemStorage, Storage},
    web::{AdminState, api::router},
};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const CONFIG: &str = r#"
    [auth]
    jwt_secret = "integration-secret"

    [branding]
    site_title = "Acme Admin"
    theme = "corporate"

    [routes]
    set_language = "/i18n/setlang/"

    [apps.auth]
    perm = "auth.manage"
    priority = 10
    icon = "fa fa-lock"

    [apps.blog]
    order = ["Post", "Comment"]
    priority = 5

    [apps.blog.models.Tag]
    perm = "blog.change_tag"
    name = "Labels"

    [apps.sessions]
    hide = true

    [[registry]]
    label = "auth"
    name = "Authentication and Authorization"
    models = [
        { object_name = "User", name = "Users" },
        { object_name = "Group", name = "Groups" },
    ]

    [[registry]]
    label = "blog"
    name = "Blog"
    divider_title = "Content"
    models = [
        { object_name = "Comment", name = "Comments" },
        { object_name = "Tag", name = "Tags" },
        { object_name = "Post", name = "Posts" },
    ]

    [[registry]]
    label = "sessions"
    name = "Sessions"
    models = [{ object_name = "Session", name = "Sessions" }]

    [[registry]]
    label = "shop"
    name = "Shop"
    models = [{ object_name = "Order", name = "Orders" }]
"#;

pub struct TestContext {
    pub url: String,
    pub client: reqwest::Client,
    pub keys: JwtKeys,
    pub media: TempDir,
    handle: JoinHandle<()>,
}

impl TestContext {
    /// Server backed by file system storage in a temporary media root.
    pub async fn new() -> Self {
        Self::build(None).await
    }

    pub async fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self::build(Some(storage)).await
    }

    async fn build(storage: Option<Arc<dyn Storage>>) -> Self {
        let media = tempfile::tempdir().expect("Failed to create media root");
        let mut config = AdminConfig::from_toml(CONFIG).expect("Invalid test config");
        config.storage.media_root = media.path().to_path_buf();
        let config = Arc::new(config);

        let keys = JwtKeys::new(config.jwt_secret().expect("Missing secret").as_bytes());
        let storage = storage.unwrap_or_else(|| {
            Arc::new(FileSystemStorage::new(
                config.storage.media_root.clone(),
                config.storage.media_url.clone(),
            ))
        });
        let state = AdminState::new(AdminSite::from_config(config), storage, keys.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            axum::serve(listener, router(state))
                .await
                .expect("Test server failed");
        });

        Self {
            url,
            client: reqwest::Client::new(),
            keys,
            media,
            handle,
        }
    }

    pub fn path(&self, endpoint: &str) -> String {
        format!("{}/admin/{endpoint}", self.url)
    }

    pub fn token(&self, principal: &Principal) -> String {
        let claims = AuthToken::new(principal, TimeDelta::hours(1)).expect("Invalid claims");
        encode_token(&self.keys, &claims)
            .expect("Failed to encode token")
            .access_token
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn staff(perms: &[&str]) -> Principal {
    Principal {
        id: Uuid::new_v4(),
        username: String::from("editor"),
        is_active: true,
        is_staff: true,
        is_superuser: false,
        permissions: perms.iter().map(|p| String::from(*p)).collect::<HashSet<_>>(),
    }
}

pub fn superuser() -> Principal {
    Principal {
        username: String::from("root"),
        is_superuser: true,
        ..staff(&[])
    }
}
