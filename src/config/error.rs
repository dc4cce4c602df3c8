//! Configuration error types.

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error(transparent)]
    IO(#[from] std::io::Error),

    /// TOML deserialization failed.
    #[error(transparent)]
    Deserialization(#[from] toml::de::Error),

    /// Two registry entries share the same app label.
    #[error("Duplicate app label '{0}' in registry")]
    DuplicateApp(String),

    /// Two models of the same app share an object name.
    #[error("Duplicate model '{model}' in app '{app}'")]
    DuplicateModel { app: String, model: String },

    /// Neither `JWT_SECRET` nor `[auth] jwt_secret` is set.
    #[error("JWT secret missing")]
    MissingJwtSecret,
}
