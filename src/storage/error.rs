//! Storage error types.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("No available name for '{0}'")]
    NoAvailableName(String),
}
