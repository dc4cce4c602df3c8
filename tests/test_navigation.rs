use std::error::Error;

use common::{TestContext, staff, superuser};
use daisy_admin::{nav::AppEntry, permission::Principal};
use reqwest::{StatusCode, header};
use serde_json::Value;

mod common;

async fn get(ctx: &TestContext, endpoint: &str, principal: &Principal) -> reqwest::Response {
    ctx.client
        .get(ctx.path(endpoint))
        .bearer_auth(ctx.token(principal))
        .send()
        .await
        .expect("Failed to send request")
}

async fn app_list(ctx: &TestContext, principal: &Principal) -> Result<Vec<AppEntry>, Box<dyn Error>> {
    let response = get(ctx, "api/apps", principal).await;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(serde_json::from_str(&response.text().await?)?)
}

fn labels(apps: &[AppEntry]) -> Vec<&str> {
    apps.iter().map(|a| a.app_label.as_str()).collect()
}

fn object_names(app: &AppEntry) -> Vec<&str> {
    app.models.iter().map(|m| m.object_name.as_str()).collect()
}

#[tokio::test]
async fn superuser_sees_configured_order() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let apps = app_list(&ctx, &superuser()).await?;

    assert_eq!(labels(&apps), ["auth", "blog", "shop"]);
    assert_eq!(apps[0].icon, "fa fa-lock");
    assert_eq!(apps[1].divider_title, "Content");
    assert_eq!(object_names(&apps[1]), ["Post", "Comment", "Tag"]);
    assert_eq!(apps[1].models[2].name, "Labels");
    assert_eq!(apps[1].models[2].perm, "blog.change_tag");
    Ok(())
}

#[tokio::test]
async fn permissions_filter_apps_and_models() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;
    let editor = staff(&["blog.view_post", "blog.view_tag", "shop.view_order", "auth.view_user"]);

    let apps = app_list(&ctx, &editor).await?;

    assert_eq!(labels(&apps), ["blog", "shop"]);
    assert_eq!(object_names(&apps[0]), ["Post"]);
    Ok(())
}

#[tokio::test]
async fn principal_without_permissions_gets_empty_list() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    assert!(app_list(&ctx, &staff(&[])).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn app_detail_hidden_and_missing_apps_not_found() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;
    let root = superuser();

    let response = get(&ctx, "api/apps/blog", &root).await;
    assert_eq!(response.status(), StatusCode::OK);
    let blog: AppEntry = serde_json::from_str(&response.text().await?)?;
    assert_eq!(object_names(&blog), ["Post", "Comment", "Tag"]);

    assert_eq!(get(&ctx, "api/apps/sessions", &root).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&ctx, "api/apps/unknown", &root).await.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn context_carries_branding() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = get(&ctx, "api/context", &superuser()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let context: Value = serde_json::from_str(&response.text().await?)?;

    assert_eq!(context["site_title"], "Acme Admin");
    assert_eq!(context["site_header"], "Administration");
    assert_eq!(context["theme"], "corporate");
    assert_eq!(context["change_language_url"], "/i18n/setlang/");
    assert_eq!(context["logo"], "/static/admin/img/daisyui-logomark.svg");
    assert_eq!(context["use_i18n"], false);
    assert_eq!(context["has_permission"], true);
    assert_eq!(context["available_apps"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn index_context_has_title() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = get(&ctx, "api/index", &superuser()).await;
    let context: Value = serde_json::from_str(&response.text().await?)?;

    assert_eq!(context["title"], "hi, welcome to your dashboard");
    assert_eq!(context["app_list"], context["available_apps"]);
    Ok(())
}

#[tokio::test]
async fn missing_token_unauthorized() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = ctx.client.get(ctx.path("api/apps")).send().await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.text().await?, "Authentication required");
    Ok(())
}

#[tokio::test]
async fn invalid_token_unauthorized() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .get(ctx.path("api/apps"))
        .bearer_auth("not-a-token")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn non_staff_forbidden() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;
    let mut visitor = superuser();
    visitor.is_staff = false;

    for endpoint in ["api/apps", "api/context", "json-editor-upload-handler/"] {
        let response = get(&ctx, endpoint, &visitor).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{endpoint}");
    }
    Ok(())
}

#[tokio::test]
async fn token_accepted_from_cookie() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;
    let token = ctx.token(&superuser());

    let response = ctx
        .client
        .get(ctx.path("api/apps"))
        .header(header::COOKIE, format!("auth-token={token}"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
