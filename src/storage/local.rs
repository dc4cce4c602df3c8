//! Local file system storage backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::{Rng, distributions::Alphanumeric};
use tokio::{
    fs,
    io::{AsyncWrite, AsyncWriteExt},
};
use tracing::{debug, warn};

use super::{Result, Storage, error::Error};

const RANDOM_SUFFIX_LEN: usize = 7;
const MAX_NAME_ATTEMPTS: usize = 100;
const FALLBACK_NAME: &str = "upload";

/// Stores files flat under `media_root`, served below `media_url`.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    media_root: PathBuf,
    media_url: String,
}

impl FileSystemStorage {
    pub fn new(media_root: impl Into<PathBuf>, media_url: impl Into<String>) -> Self {
        Self {
            media_root: media_root.into(),
            media_url: media_url.into(),
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }
}

/// Reduces a client supplied file name to a safe, flat name.
///
/// Keeps the final path component, turns spaces into underscores and drops
/// everything outside `[A-Za-z0-9._-]`.
pub fn get_valid_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') => Some(c),
            _ => None,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => String::from(FALLBACK_NAME),
        _ => cleaned,
    }
}

/// Splits `name` into stem and extension, the extension keeping its dot.
/// A leading dot does not start an extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(char::from)
        .collect()
}

/// `name` with a random suffix inserted before its extension.
fn alternative_name(name: &str) -> String {
    let (stem, ext) = split_extension(name);
    format!("{stem}_{}{ext}", random_suffix())
}

/// Writes `content` to the freshly created file at `path`, removing the file
/// again when the write fails so no truncated upload keeps the name taken.
async fn write_or_discard<W>(mut file: W, path: &Path, content: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match file.write_all(content).await {
        Ok(()) => file.flush().await,
        Err(err) => Err(err),
    };
    if let Err(err) = written {
        drop(file);
        if let Err(remove_err) = fs::remove_file(path).await {
            warn!("Failed to remove partial upload {}: {remove_err}", path.display());
        }
        return Err(err.into());
    }
    Ok(())
}

#[async_trait]
impl Storage for FileSystemStorage {
    async fn save(&self, name: &str, content: &[u8]) -> Result<String> {
        fs::create_dir_all(&self.media_root).await?;

        let valid = get_valid_name(name);
        let mut candidate = valid.clone();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let path = self.media_root.join(&candidate);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => {
                    write_or_discard(file, &path, content).await?;
                    debug!("Stored {} bytes as {}", content.len(), path.display());
                    return Ok(candidate);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    candidate = alternative_name(&valid);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(Error::NoAvailableName(valid))
    }

    fn url(&self, name: &str) -> String {
        format!("{}{name}", self.media_url)
    }
}
