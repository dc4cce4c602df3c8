use crate::prelude::*;
use axum::{http::StatusCode, response::IntoResponse};
use tracing::{debug, error};

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            // Upload errors
            Error::InvalidMethod => (StatusCode::METHOD_NOT_ALLOWED, "Invalid request method"),
            Error::NoFileUploaded => (StatusCode::BAD_REQUEST, "No file uploaded"),
            Error::UploadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "File too large"),
            Error::DisallowedHost(_) => (StatusCode::BAD_REQUEST, "Invalid host"),
            Error::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save file"),

            // Auth-related errors
            Error::AuthTokenMissing => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Error::AuthTokenExpired => (StatusCode::UNAUTHORIZED, "Authentication token expired"),
            Error::AuthInvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
            Error::CtxMissing => (StatusCode::UNAUTHORIZED, "Authentication required"),

            // Permission-related errors
            Error::ApiForbidden => (StatusCode::FORBIDDEN, "Access forbidden"),
            Error::AppNotFound => (StatusCode::NOT_FOUND, "Not found"),

            // Internal errors - hide details
            Error::AuthTokenCreation | Error::IO(_) | Error::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        match &self {
            Error::Storage(err) => error!("Error saving file: {err}"),
            _ if status.is_server_error() => error!("Internal error: {self:?}"),
            _ => debug!("Rejecting request with {status}: {self}"),
        }

        (status, message).into_response()
    }
}
