//! # Media Store
//!
//! Product image storage on the local file system.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Image Upload Flow                            │
//! │                                                                     │
//! │  User picks /home/ana/fotos/anzuelo.jpg                             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  MediaStore::import(path)                                           │
//! │       │  copy into uploads/ under a generated name                  │
//! │       ▼                                                             │
//! │  uploads/producto_550e8400-...-0000.jpg                             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Product.image = "producto_550e8400-...-0000.jpg"  (filename only)  │
//! │                                                                     │
//! │  The database never stores image bytes or absolute paths; the       │
//! │  generated name makes collisions between uploads impossible.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// Stores product images in an uploads directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    uploads_dir: PathBuf,
}

impl MediaStore {
    /// Creates a media store rooted at the given uploads directory.
    ///
    /// The directory itself is created lazily by the write operations.
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        MediaStore {
            uploads_dir: uploads_dir.into(),
        }
    }

    /// The uploads directory this store writes into.
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Copies a source image into the uploads directory under a
    /// collision-resistant generated filename.
    ///
    /// ## Returns
    /// * `Ok(String)` - The generated filename (store it on the product row)
    /// * `Err(DbError::Io)` - Missing source or copy failure
    pub async fn import(&self, source: &Path) -> DbResult<String> {
        fs::create_dir_all(&self.uploads_dir).await?;

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();
        let filename = format!("producto_{}{}", Uuid::new_v4(), extension);

        let destination = self.uploads_dir.join(&filename);
        fs::copy(source, &destination).await?;

        debug!(
            source = %source.display(),
            filename = %filename,
            "Imported product image"
        );
        Ok(filename)
    }

    /// Writes raw image bytes under a generated filename.
    ///
    /// `original_name` only contributes its extension.
    pub async fn save_bytes(&self, original_name: &str, bytes: &[u8]) -> DbResult<String> {
        fs::create_dir_all(&self.uploads_dir).await?;

        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();
        let filename = format!("producto_{}{}", Uuid::new_v4(), extension);

        fs::write(self.uploads_dir.join(&filename), bytes).await?;

        debug!(filename = %filename, size = bytes.len(), "Saved product image");
        Ok(filename)
    }

    /// Absolute path of a stored image, for display.
    ///
    /// Rejects names with path components so a crafted filename cannot
    /// escape the uploads directory.
    pub fn path_of(&self, filename: &str) -> DbResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.uploads_dir.join(filename))
    }

    /// Removes a stored image.
    ///
    /// Idempotent: a missing file is not an error (the product row may
    /// outlive its image, or vice versa).
    pub async fn delete(&self, filename: &str) -> DbResult<()> {
        validate_filename(filename)?;

        match fs::remove_file(self.uploads_dir.join(filename)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(filename = %filename, "Image already gone");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Rejects filenames that are empty or contain path components.
fn validate_filename(filename: &str) -> DbResult<()> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename == "."
        || filename == ".."
    {
        return Err(DbError::Io(format!("invalid image filename: {filename:?}")));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("tackle-media-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_import_copies_under_generated_name() {
        let dir = scratch_dir();
        let store = MediaStore::new(&dir);

        let source = dir.join("source.JPG");
        fs::create_dir_all(&dir).await.unwrap();
        fs::write(&source, b"not really a jpeg").await.unwrap();

        let filename = store.import(&source).await.unwrap();
        assert!(filename.starts_with("producto_"));
        assert!(filename.ends_with(".jpg"));

        let stored = fs::read(store.path_of(&filename).unwrap()).await.unwrap();
        assert_eq!(stored, b"not really a jpeg");

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_import_missing_source_is_io_error() {
        let dir = scratch_dir();
        let store = MediaStore::new(&dir);

        let result = store.import(Path::new("/no/such/image.png")).await;
        assert!(matches!(result, Err(DbError::Io(_))));
    }

    #[tokio::test]
    async fn test_save_bytes_and_delete_idempotent() {
        let dir = scratch_dir();
        let store = MediaStore::new(&dir);

        let filename = store.save_bytes("foto.png", b"bytes").await.unwrap();
        assert!(filename.ends_with(".png"));

        store.delete(&filename).await.unwrap();
        // Second delete is a no-op
        store.delete(&filename).await.unwrap();

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn test_path_traversal_rejected() {
        let store = MediaStore::new("/tmp/uploads");

        assert!(store.path_of("../etc/passwd").is_err());
        assert!(store.path_of("a/b.png").is_err());
        assert!(store.path_of("").is_err());
        assert!(store.path_of("producto_x.png").is_ok());
    }
}
