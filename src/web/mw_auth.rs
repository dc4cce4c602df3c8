//! Guards for admin routes.

use crate::prelude::*;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::debug;

use super::ctx::Ctx;

/// Rejects requests without a valid auth token.
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}

/// Only active staff principals may use the admin site.
pub async fn mw_require_staff(ctx: Ctx, req: Request, next: Next) -> Result<Response> {
    if !ctx.principal.can_access_admin() {
        debug!("{} is not active staff", ctx.principal.username);
        return Err(Error::ApiForbidden);
    }
    Ok(next.run(req).await)
}
