//! Local disk storage for uploaded images
//!
//! Files land in a single directory as `<receipt-millis>-<original name>`.
//! The directory is created on demand and is also served statically, so the
//! stored path doubles as the public reference kept in report rows.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::error::AppError;

/// Upper bound on stamp bumps when a generated name is already taken
const MAX_NAME_ATTEMPTS: i64 = 1000;

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path of the written file, relative to the working directory when the
    /// upload directory is relative
    pub path: PathBuf,
    /// Name supplied by the client
    pub original_name: String,
    /// Generated name inside the upload directory
    pub file_name: String,
}

impl StoredFile {
    /// Path as stored in report rows
    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Writes uploads into a single local directory
#[derive(Debug, Clone)]
pub struct LocalDiskStorage {
    root: PathBuf,
}

impl LocalDiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_root(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Persist `data` under a fresh `<millis>-<name>` filename.
    ///
    /// An existing file is never overwritten: if the generated name is taken
    /// the stamp is bumped until a free name is found.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<StoredFile, AppError> {
        self.ensure_root().await?;

        let safe_name = sanitize_file_name(original_name);
        let received_at = Utc::now().timestamp_millis();

        for offset in 0..MAX_NAME_ATTEMPTS {
            let file_name = format!("{}-{}", received_at + offset, safe_name);
            let path = self.root.join(&file_name);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Upload name taken, bumping stamp: {}", file_name);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = write_all(&mut file, data).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(e.into());
            }

            info!(
                "Stored upload: path={}, original_name={}, size={}",
                path.display(),
                original_name,
                data.len()
            );

            return Ok(StoredFile {
                path,
                original_name: original_name.to_string(),
                file_name,
            });
        }

        Err(AppError::Internal(format!(
            "Could not find a free upload name for '{}'",
            original_name
        )))
    }

    /// Delete a stored file, logging instead of failing when it is already gone
    pub async fn remove(&self, file: &StoredFile) {
        match fs::remove_file(&file.path).await {
            Ok(()) => info!("Removed orphaned upload: {}", file.path.display()),
            Err(e) => warn!(
                "Failed to remove orphaned upload {}: {}",
                file.path.display(),
                e
            ),
        }
    }
}

async fn write_all(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_all().await
}

/// Reduce a client supplied filename to a bare name that cannot escape the
/// upload directory.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(&['/', '\\'][..]).next().unwrap_or("").trim();

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "unnamed".to_string(),
        _ => cleaned,
    }
}
