//! Storage abstraction for uploaded files.

use async_trait::async_trait;

pub mod error;
pub mod local;

pub use local::FileSystemStorage;

pub type Result<T> = core::result::Result<T, error::Error>;

/// Persists uploaded content and maps stored names to URLs.
///
/// Backends own collision handling: `save` returns the name the content was
/// actually stored under, which may differ from the requested one.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Save `content` under a name derived from `name`.
    async fn save(&self, name: &str, content: &[u8]) -> Result<String>;

    /// Site-relative URL of a stored name.
    fn url(&self, name: &str) -> String;
}
