//! Uploaded-file handle and flat-directory storage.
//!
//! [`UploadedFile`] is the boundary type handed in by the hosting
//! application: a readable path plus the MIME type and file name the client
//! declared. The service never takes ownership of it — the source file is
//! read-only input.
//!
//! [`FileStore`] owns the storage directory. One flat directory, one file per
//! asset; existence and naming convention are the only durable contract.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::UploadError;
use crate::naming::{extension_for_mime, mime_for_extension, upload_file_name};

/// A caller-supplied upload: content path, declared MIME type, client name.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    path: PathBuf,
    mime_type: Option<String>,
    client_name: Option<String>,
}

impl UploadedFile {
    pub fn new(
        path: impl Into<PathBuf>,
        mime_type: Option<String>,
        client_name: Option<String>,
    ) -> Self {
        Self {
            path: path.into(),
            mime_type,
            client_name,
        }
    }

    /// Build a handle from a bare path, guessing the MIME type from the
    /// extension and taking the file name as the client name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(mime_for_extension)
            .map(str::to_string);
        let client_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        Self {
            path,
            mime_type,
            client_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// MIME type as declared by the client, if any.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// File name as supplied by the client, if any.
    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    /// Extension for generated output: derived from the declared MIME type,
    /// falling back to the source path's own extension.
    pub fn guess_extension(&self) -> Option<&str> {
        self.mime_type()
            .and_then(extension_for_mime)
            .or_else(|| self.path.extension().and_then(|e| e.to_str()))
    }

    /// Client name without its extension, for slug-based storage names.
    pub fn client_stem(&self) -> Option<&str> {
        self.client_name()
            .map(|name| Path::new(name))
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
    }
}

/// Flat-directory file storage under a configured root.
#[derive(Debug, Clone)]
pub struct FileStore {
    target_directory: PathBuf,
}

impl FileStore {
    /// Open the store, creating the directory recursively if absent.
    pub fn open(target_directory: impl Into<PathBuf>) -> io::Result<Self> {
        let target_directory = target_directory.into();
        fs::create_dir_all(&target_directory)?;
        Ok(Self { target_directory })
    }

    pub fn target_directory(&self) -> &Path {
        &self.target_directory
    }

    /// Store an upload verbatim under `{slug}-{uid}.{ext}` and return the
    /// generated name.
    pub fn save(&self, file: &UploadedFile) -> Result<String, UploadError> {
        let extension = file.guess_extension().unwrap_or("bin");
        let file_name = upload_file_name(file.client_stem(), extension);
        let target = self.target_directory.join(&file_name);
        fs::copy(file.path(), &target).map_err(UploadError::SaveFailed)?;
        debug!(file_name = %file_name, "stored upload");
        Ok(file_name)
    }

    /// Remove a stored file by name. Removing a name that is not present is
    /// not an error.
    pub fn delete(&self, file_name: &str) -> io::Result<()> {
        match fs::remove_file(self.target_directory.join(file_name)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_guesses_mime_and_client_name() {
        let file = UploadedFile::from_path("/tmp/photos/Chair 7.JPG");
        assert_eq!(file.mime_type(), Some("image/jpeg"));
        assert_eq!(file.client_name(), Some("Chair 7.JPG"));
        assert_eq!(file.client_stem(), Some("Chair 7"));
        assert_eq!(file.guess_extension(), Some("jpeg"));
    }

    #[test]
    fn from_path_with_unknown_extension_has_no_mime() {
        let file = UploadedFile::from_path("/tmp/readme.txt");
        assert_eq!(file.mime_type(), None);
        // extension still falls back to the path
        assert_eq!(file.guess_extension(), Some("txt"));
    }

    #[test]
    fn guess_extension_prefers_declared_mime() {
        let file = UploadedFile::new(
            "/tmp/upload-3a9f",
            Some("image/png".to_string()),
            Some("photo.jpg".to_string()),
        );
        assert_eq!(file.guess_extension(), Some("png"));
    }

    #[test]
    fn open_creates_nested_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path().join("a").join("b").join("store");
        let store = FileStore::open(&root).unwrap();
        assert!(store.target_directory().is_dir());
    }

    #[test]
    fn save_copies_bytes_under_generated_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.bin");
        fs::write(&source, b"payload").unwrap();

        let store = FileStore::open(tmp.path().join("store")).unwrap();
        let file = UploadedFile::new(&source, None, Some("My Invoice.pdf".to_string()));
        let name = store.save(&file).unwrap();

        assert!(name.starts_with("my-invoice-"));
        assert!(name.ends_with(".bin"));
        let stored = fs::read(store.target_directory().join(&name)).unwrap();
        assert_eq!(stored, b"payload");
        // source is read-only input and stays in place
        assert!(source.exists());
    }

    #[test]
    fn save_missing_source_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = FileStore::open(tmp.path().join("store")).unwrap();
        let file = UploadedFile::from_path(tmp.path().join("absent.jpeg"));
        assert!(matches!(
            store.save(&file),
            Err(UploadError::SaveFailed(_))
        ));
    }

    #[test]
    fn delete_is_idempotent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        fs::write(tmp.path().join("image_x.jpeg"), b"data").unwrap();

        store.delete("image_x.jpeg").unwrap();
        assert!(!tmp.path().join("image_x.jpeg").exists());
        store.delete("image_x.jpeg").unwrap();
    }
}
