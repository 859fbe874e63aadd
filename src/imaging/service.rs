//! The rendition pipeline: validate, plan, resize or copy, encode.
//!
//! [`RenditionService`] combines the pure planning math in
//! [`geometry`](super::geometry) with the codec adapters in
//! [`codec`](super::codec). It holds only immutable configuration, so one
//! instance can be shared across threads; everything derived from a specific
//! upload travels in a call-local [`SourceImage`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use tracing::{debug, warn};

use crate::config::{RenditionsConfig, UploadConfig};
use crate::error::UploadError;
use crate::imaging::codec::{codec_for_extension, EncodeOptions};
use crate::imaging::geometry::{plan_resize, Dimensions, FitMode, ResizePlan};
use crate::naming::{extension_for_mime, rendition_file_name, Rendition};
use crate::store::{FileStore, UploadedFile};

/// A validated upload: source path, accepted MIME type, probed geometry.
///
/// Produced by [`RenditionService::validate`] and consumed by the resize
/// pipeline; never stored on the service.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub path: PathBuf,
    pub mime_type: String,
    pub dimensions: Dimensions,
}

/// Generates sized renditions of uploaded catalog images.
pub struct RenditionService {
    store: FileStore,
    allowed_mime_types: Vec<String>,
    renditions: RenditionsConfig,
    encoding: EncodeOptions,
}

impl RenditionService {
    /// Build a service from configuration, creating the storage directory
    /// recursively if absent.
    pub fn open(config: &UploadConfig) -> io::Result<Self> {
        Ok(Self {
            store: FileStore::open(&config.target_directory)?,
            allowed_mime_types: config.allowed_mime_types.clone(),
            renditions: config.renditions.clone(),
            encoding: EncodeOptions::from(&config.encoding),
        })
    }

    pub fn target_directory(&self) -> &Path {
        self.store.target_directory()
    }

    /// Check the upload against the MIME allow-list and probe its geometry.
    pub fn validate(&self, file: &UploadedFile) -> Result<SourceImage, UploadError> {
        let mime_type = file.mime_type().ok_or_else(|| {
            UploadError::UnreadableImage("MIME type could not be determined".to_string())
        })?;
        if !self.allowed_mime_types.iter().any(|m| m == mime_type) {
            return Err(UploadError::UnreadableImage(format!(
                "MIME type `{mime_type}` is not allowed"
            )));
        }
        let (width, height) = image::image_dimensions(file.path()).map_err(|e| {
            UploadError::UnreadableImage(format!("could not read dimensions: {e}"))
        })?;
        Ok(SourceImage {
            path: file.path().to_path_buf(),
            mime_type: mime_type.to_string(),
            dimensions: Dimensions::new(width, height),
        })
    }

    /// Generate one rendition of `file` and return the stored file name.
    ///
    /// The name is `{prefix}_{base}.{ext}`; without an explicit `base_name` a
    /// fresh unique id is used. Fails before touching storage when the
    /// rendition has no configured box or the upload does not validate.
    pub fn create_rendition(
        &self,
        file: &UploadedFile,
        rendition: Rendition,
        mode: FitMode,
        base_name: Option<&str>,
    ) -> Result<String, UploadError> {
        let frame = self
            .renditions
            .box_for(rendition)
            .ok_or(UploadError::SizeNotConfigured(rendition))?;
        let source = self.validate(file)?;
        let extension = extension_for_mime(&source.mime_type)
            .or_else(|| file.guess_extension())
            .ok_or_else(|| {
                UploadError::UnreadableImage("no usable file extension".to_string())
            })?;
        let file_name = rendition_file_name(rendition, base_name, extension);
        let target = self.store.target_directory().join(&file_name);
        self.resize_or_copy(&source, frame, mode, &target)?;
        debug!(rendition = %rendition, file_name = %file_name, "rendition written");
        Ok(file_name)
    }

    /// Generate all three renditions in order (default, small, big), in
    /// Contain mode, and return their names in that order.
    ///
    /// A failing sub-step aborts the run; renditions already written are left
    /// in place, so callers seeing an error must treat storage as unknown and
    /// inspect or sweep it.
    pub fn create_all(
        &self,
        file: &UploadedFile,
        base_name: Option<&str>,
    ) -> Result<[String; 3], UploadError> {
        let run = || -> Result<[String; 3], UploadError> {
            Ok([
                self.create_rendition(file, Rendition::Default, FitMode::Contain, base_name)?,
                self.create_rendition(file, Rendition::Small, FitMode::Contain, base_name)?,
                self.create_rendition(file, Rendition::Big, FitMode::Contain, base_name)?,
            ])
        };
        run().map_err(|e| UploadError::AllRenditionsFailed(Box::new(e)))
    }

    /// Store a plain (non-rendition) upload verbatim. See [`FileStore::save`].
    pub fn save_file(&self, file: &UploadedFile) -> Result<String, UploadError> {
        self.store.save(file)
    }

    /// Remove a generated file by name; absent names are not an error.
    pub fn delete(&self, file_name: &str) -> io::Result<()> {
        self.store.delete(file_name)
    }

    fn resize_or_copy(
        &self,
        source: &SourceImage,
        frame: [u32; 2],
        mode: FitMode,
        target: &Path,
    ) -> Result<(), UploadError> {
        match plan_resize(source.dimensions, frame, mode) {
            ResizePlan::Copy => {
                debug!(source = %source.path.display(), "source fits the frame, copying");
                fs::copy(&source.path, target).map_err(UploadError::CopyFailed)?;
                Ok(())
            }
            ResizePlan::Resample { width, height } => {
                let extension = target
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default();
                let Some(codec) = codec_for_extension(extension) else {
                    // only the copy path is safe without a codec
                    warn!(extension, "no codec registered, copying source unchanged");
                    fs::copy(&source.path, target).map_err(UploadError::CopyFailed)?;
                    return Ok(());
                };
                if width == 0 || height == 0 {
                    return Err(UploadError::TargetCreationFailed { width, height });
                }
                debug!(
                    source = %source.path.display(),
                    width, height, ?mode, "resampling"
                );
                let decoded = codec.decode(&source.path)?;
                let resampled = decoded.resize_exact(width, height, FilterType::Lanczos3);
                if resampled.width() != width || resampled.height() != height {
                    return Err(UploadError::ResizeFailed { width, height });
                }
                codec.encode(&resampled, target, &self.encoding)
            }
        }
    }
}
