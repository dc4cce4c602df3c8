use std::collections::HashSet;

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::permission::Principal;
use crate::prelude::*;

use super::TOKEN_TYPE;
use super::jwt::JwtKeys;

const ISS: &str = "daisy-admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub sub: Uuid,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,

    pub username: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub permissions: HashSet<String>,
}

/// Signed token as handed to the editor widget or an API client.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthBody {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, thiserror::Error, Clone)]
pub enum AuthError {
    #[error("Invalid Token")]
    InvalidToken,
    #[error("Token Missing")]
    TokenMissing,
    #[error("Token Expired")]
    TokenExpired,
    #[error("Token Creation")]
    TokenCreation,
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::TokenCreation => Self::AuthTokenCreation,
            AuthError::InvalidToken => Self::AuthInvalidToken,
            AuthError::TokenMissing => Self::AuthTokenMissing,
            AuthError::TokenExpired => Self::AuthTokenExpired,
        }
    }
}

impl AuthToken {
    pub fn new(principal: &Principal, token_duration: TimeDelta) -> Result<Self> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(token_duration)
            .ok_or(Error::AuthTokenCreation)?;

        Ok(Self {
            sub: principal.id,
            iss: String::from(ISS),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            username: principal.username.clone(),
            is_active: principal.is_active,
            is_staff: principal.is_staff,
            is_superuser: principal.is_superuser,
            permissions: principal.permissions.clone(),
        })
    }
}

impl From<AuthToken> for Principal {
    fn from(token: AuthToken) -> Self {
        Self {
            id: token.sub,
            username: token.username,
            is_active: token.is_active,
            is_staff: token.is_staff,
            is_superuser: token.is_superuser,
            permissions: token.permissions,
        }
    }
}

pub fn encode_token(keys: &JwtKeys, token: &AuthToken) -> std::result::Result<AuthBody, AuthError> {
    let token = keys.encode(token).map_err(|err| {
        error!("Failed to encode JWT {err}");
        AuthError::TokenCreation
    })?;

    Ok(AuthBody {
        access_token: token,
        token_type: String::from(TOKEN_TYPE),
    })
}

pub fn decode_token(keys: &JwtKeys, token: &str) -> std::result::Result<AuthToken, AuthError> {
    Ok(keys
        .decode::<AuthToken>(token)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => {
                debug!("Failed to decode jwt token {err}");
                AuthError::InvalidToken
            }
        })?
        .claims)
}
