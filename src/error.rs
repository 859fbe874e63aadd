//! Error taxonomy for upload and rendition operations.
//!
//! Every failure mode gets its own variant so callers can tell "bad input"
//! apart from "processing failure" apart from "storage failure". Codec
//! failures carry the [`CodecFormat`](crate::imaging::CodecFormat) they
//! occurred in rather than being separate nominal types per format.

use std::io;

use thiserror::Error;

use crate::imaging::CodecFormat;
use crate::naming::Rendition;

#[derive(Error, Debug)]
pub enum UploadError {
    /// The MIME type could not be determined, is not in the allow-list, or
    /// the image header dimensions could not be read.
    #[error("unreadable image: {0}")]
    UnreadableImage(String),

    /// The requested rendition has no `[width, height]` box configured.
    #[error("no box configured for the `{0}` rendition")]
    SizeNotConfigured(Rendition),

    /// The raw byte copy of the source into the storage directory failed.
    #[error("copying the source image failed")]
    CopyFailed(#[source] io::Error),

    /// The computed target box collapsed to a zero dimension, so no output
    /// image could be allocated.
    #[error("allocating a {width}x{height} target image failed")]
    TargetCreationFailed { width: u32, height: u32 },

    /// Resampling did not produce an image of the planned dimensions.
    #[error("resampling to {width}x{height} failed")]
    ResizeFailed { width: u32, height: u32 },

    #[error("{format} decode failed: {source}")]
    Decode {
        format: CodecFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("{format} encode failed: {source}")]
    Encode {
        format: CodecFormat,
        #[source]
        source: image::ImageError,
    },

    /// Persisting a plain (non-rendition) upload into storage failed.
    #[error("saving the uploaded file failed")]
    SaveFailed(#[source] io::Error),

    /// One of the three renditions in a create-all run failed. Renditions
    /// written before the failure are left in place.
    #[error("rendition generation failed")]
    AllRenditionsFailed(#[source] Box<UploadError>),
}
