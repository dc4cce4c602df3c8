//! Request context: the principal resolved from the auth token.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tower_cookies::{Cookie, Cookies};

use crate::auth::auth::{AuthError, decode_token};
use crate::permission::Principal;
use crate::prelude::*;

use super::AdminState;

pub const AUTH_TOKEN_COOKIE: &str = "auth-token";
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";

#[derive(Clone, Debug)]
pub struct Ctx {
    pub principal: Principal,
}

impl Ctx {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }
}

/// Resolves the token from the `auth-token` cookie or the bearer header and
/// stores the outcome in the request extensions. Never rejects by itself.
#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    State(state): State<AdminState>,
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = cookies
        .get(AUTH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
                .map(|s| s.to_string())
        })
        .ok_or(AuthError::TokenMissing)
        .and_then(|token| decode_token(&state.keys, &token))
        .map(|token| Ctx::new(token.into()));

    if ctx.is_err() {
        cookies.remove(Cookie::from(AUTH_TOKEN_COOKIE));
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<std::result::Result<Ctx, AuthError>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}
