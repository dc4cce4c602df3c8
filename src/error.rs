//! Main Crate Error

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] crate::config::error::Error),

    #[error(transparent)]
    Storage(#[from] crate::storage::error::Error),

    /* Upload Errors */
    #[error("Invalid request method")]
    InvalidMethod,
    #[error("No file uploaded")]
    NoFileUploaded,
    #[error("Upload too large")]
    UploadTooLarge,
    #[error("Disallowed host: {0}")]
    DisallowedHost(String),

    /* Api Errors */
    #[error("API Forbidden")]
    ApiForbidden,
    #[error("App Not Found")]
    AppNotFound,

    /* Auth Errors */
    #[error("Auth Token Missing")]
    AuthTokenMissing,
    #[error("Auth Token Expired")]
    AuthTokenExpired,
    #[error("Invalid Token")]
    AuthInvalidToken,
    #[error("Auth Token Creation")]
    AuthTokenCreation,

    #[error("Context Missing")]
    CtxMissing,
}
