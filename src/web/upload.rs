//! Upload endpoint used by the JSON/rich-text editor widget.
//!
//! The widget posts a multipart form with a single `file` part and expects
//! the absolute URL of the stored file back as plain text. There is no CSRF
//! token involved; the route only exists behind the staff guard.

use axum::{
    extract::{
        Multipart, State,
        multipart::{Field, MultipartError, MultipartRejection},
    },
    http::{HeaderMap, Method, StatusCode, Uri, header::HOST},
};
use tracing::info;

use crate::config::ServerConfig;
use crate::prelude::*;

use super::AdminState;

pub const UPLOAD_FIELD: &str = "file";

#[axum::debug_handler]
pub async fn upload_file(
    State(state): State<AdminState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<String> {
    if method != Method::POST {
        return Err(Error::InvalidMethod);
    }
    let config = state.config();
    let host = public_host(&config.server, &headers, &uri)?;
    let mut multipart = multipart.map_err(|_| Error::NoFileUploaded)?;

    let (file_name, content) = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if is_file_field(&field) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(read_error)?;
                break (file_name, content);
            }
            Ok(Some(_)) => continue,
            Ok(None) => return Err(Error::NoFileUploaded),
            Err(err) => return Err(read_error(err)),
        }
    };

    let stored = state.storage.save(&file_name, &content).await?;
    info!("Stored upload '{file_name}' as '{stored}'");

    Ok(build_absolute_uri(
        &config.server.scheme,
        &host,
        &state.storage.url(&stored),
    ))
}

/// Only parts carrying a non-empty file name count as uploaded files.
/// Browsers send `filename=""` when no file was picked.
fn is_file_field(field: &Field<'_>) -> bool {
    field.name() == Some(UPLOAD_FIELD) && field.file_name().is_some_and(|n| !n.is_empty())
}

fn read_error(err: MultipartError) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::UploadTooLarge
    } else {
        Error::NoFileUploaded
    }
}

/// Host the returned URL points at: the configured `public_host`, else the
/// request's `Host` header (or HTTP/2 authority) when it is allowed.
fn public_host(server: &ServerConfig, headers: &HeaderMap, uri: &Uri) -> Result<String> {
    if let Some(host) = &server.public_host {
        return Ok(host.clone());
    }
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or_default();
    if server.is_allowed_host(host) {
        Ok(host.to_string())
    } else {
        Err(Error::DisallowedHost(host.to_string()))
    }
}

/// Absolute URL of `location` as seen by the client. Locations that are
/// already absolute are returned unchanged.
pub fn build_absolute_uri(scheme: &str, host: &str, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.to_string();
    }
    let location = location.strip_prefix('/').unwrap_or(location);
    format!("{scheme}://{host}/{location}")
}
