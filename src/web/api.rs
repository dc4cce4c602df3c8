//! Router and JSON endpoints of the admin site.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Path, State},
    middleware,
    routing::{any, get},
};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::context::Context;
use crate::nav::AppEntry;
use crate::prelude::*;

use super::{
    AdminState,
    ctx::{Ctx, mw_ctx_resolver},
    mw_auth::{mw_require_auth, mw_require_staff},
    upload::upload_file,
};

pub const UPLOAD_PATH: &str = "json-editor-upload-handler/";

/// Every admin route, guarded by the staff check and mounted under
/// `admin_root`.
pub fn router(state: AdminState) -> Router {
    let config = state.config();
    let upload_limit = config.storage.max_upload_bytes;

    Router::new()
        .route(&config.admin_path(UPLOAD_PATH), any(upload_file))
        .route(&config.admin_path("api/apps"), get(app_list))
        .route(&config.admin_path("api/apps/{app_label}"), get(app_detail))
        .route(&config.admin_path("api/context"), get(page_context))
        .route(&config.admin_path("api/index"), get(index_context))
        .route_layer(middleware::from_fn(mw_require_staff))
        .route_layer(middleware::from_fn(mw_require_auth))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            mw_ctx_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

async fn app_list(State(state): State<AdminState>, ctx: Ctx) -> Json<Vec<AppEntry>> {
    Json(state.site.get_app_list(&ctx.principal))
}

async fn app_detail(
    State(state): State<AdminState>,
    ctx: Ctx,
    Path(app_label): Path<String>,
) -> Result<Json<AppEntry>> {
    state
        .site
        .app_index(&app_label, &ctx.principal)
        .map(Json)
        .ok_or(Error::AppNotFound)
}

async fn page_context(State(state): State<AdminState>, ctx: Ctx) -> Json<Context> {
    Json(state.site.each_context(&ctx.principal))
}

async fn index_context(State(state): State<AdminState>, ctx: Ctx) -> Json<Context> {
    Json(state.site.index_context(&ctx.principal))
}
