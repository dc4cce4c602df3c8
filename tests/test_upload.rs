use std::error::Error;

use common::{TestContext, superuser};
use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};

mod common;

const UPLOAD: &str = "json-editor-upload-handler/";

async fn post_form(ctx: &TestContext, form: Form) -> reqwest::Result<reqwest::Response> {
    ctx.client
        .post(ctx.path(UPLOAD))
        .bearer_auth(ctx.token(&superuser()))
        .multipart(form)
        .send()
        .await
}

fn file_part(name: &str, content: &'static [u8]) -> Part {
    Part::bytes(content).file_name(name.to_string())
}

#[tokio::test]
async fn upload_returns_absolute_url() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = post_form(&ctx, Form::new().part("file", file_part("report.pdf", b"%PDF-1.7"))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/plain"))
    );
    let url = response.text().await?;
    assert_eq!(url, format!("{}/media/report.pdf", ctx.url));
    assert_eq!(std::fs::read(ctx.media.path().join("report.pdf"))?, b"%PDF-1.7");
    Ok(())
}

#[tokio::test]
async fn colliding_uploads_get_distinct_names() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let first = post_form(&ctx, Form::new().part("file", file_part("report.pdf", b"one")))
        .await?
        .text()
        .await?;
    let second = post_form(&ctx, Form::new().part("file", file_part("report.pdf", b"two")))
        .await?
        .text()
        .await?;

    assert_ne!(first, second);
    let stored = second.rsplit('/').next().unwrap_or_default();
    assert!(stored.starts_with("report_") && stored.ends_with(".pdf"));
    assert_eq!(std::fs::read(ctx.media.path().join(stored))?, b"two");
    Ok(())
}

#[tokio::test]
async fn unsafe_file_name_flattened() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = post_form(&ctx, Form::new().part("file", file_part("../../my notes.txt", b"hi"))).await?;

    assert_eq!(response.text().await?, format!("{}/media/my_notes.txt", ctx.url));
    assert!(ctx.media.path().join("my_notes.txt").is_file());
    Ok(())
}

#[tokio::test]
async fn missing_file_field_bad_request() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = post_form(&ctx, Form::new().text("title", "no file here")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "No file uploaded");
    Ok(())
}

#[tokio::test]
async fn text_field_named_file_is_not_an_upload() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = post_form(&ctx, Form::new().text("file", "plain text")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn non_multipart_body_bad_request() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.path(UPLOAD))
        .bearer_auth(ctx.token(&superuser()))
        .body("file=report.pdf")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "No file uploaded");
    Ok(())
}

#[tokio::test]
async fn get_not_allowed() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .get(ctx.path(UPLOAD))
        .bearer_auth(ctx.token(&superuser()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.text().await?, "Invalid request method");
    Ok(())
}

#[tokio::test]
async fn upload_requires_token() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.path(UPLOAD))
        .multipart(Form::new().part("file", file_part("report.pdf", b"x")))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!ctx.media.path().join("report.pdf").exists());
    Ok(())
}

#[tokio::test]
async fn empty_file_name_is_not_an_upload() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = post_form(&ctx, Form::new().part("file", file_part("", b""))).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "No file uploaded");
    assert_eq!(std::fs::read_dir(ctx.media.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn foreign_host_header_rejected() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.path(UPLOAD))
        .bearer_auth(ctx.token(&superuser()))
        .header(reqwest::header::HOST, "evil.example")
        .multipart(Form::new().part("file", file_part("a.txt", b"a")))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "Invalid host");
    assert!(!ctx.media.path().join("a.txt").exists());
    Ok(())
}
