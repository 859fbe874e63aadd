//! Format-specific decode/encode adapters.
//!
//! The [`ImageCodec`] trait is the seam between the rendition pipeline and
//! the pixel work: one implementation per supported format, looked up by
//! file extension through [`codec_for_extension`]. Adding a format means
//! adding a codec and a registry entry; the pipeline itself never changes.
//!
//! | Format | Decode | Encode |
//! |---|---|---|
//! | JPEG | `image` crate → RGB8 | `JpegEncoder` with configured quality |
//! | PNG | `image` crate → RGBA8 | `PngEncoder` with mapped compression |
//!
//! PNG decodes to RGBA8 so the alpha channel rides through resampling;
//! transparent source pixels stay transparent in the output.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, ImageError, ImageReader};

use crate::error::UploadError;

/// Discriminant identifying which codec a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecFormat {
    Jpeg,
    Png,
}

impl fmt::Display for CodecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecFormat::Jpeg => f.write_str("JPEG"),
            CodecFormat::Png => f.write_str("PNG"),
        }
    }
}

/// Encode-time quality parameters, set once at service construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality, 0-100.
    pub jpeg_quality: u8,
    /// PNG compression level 0-9; `None` leaves the encoder default.
    pub png_compression: Option<u8>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 60,
            png_compression: None,
        }
    }
}

/// A format-specific decode/encode pair.
pub trait ImageCodec: Sync {
    fn format(&self) -> CodecFormat;

    /// Decode the file at `path` into an in-memory bitmap.
    fn decode(&self, path: &Path) -> Result<DynamicImage, UploadError>;

    /// Encode `image` to `path` with this codec's quality parameter.
    fn encode(
        &self,
        image: &DynamicImage,
        path: &Path,
        options: &EncodeOptions,
    ) -> Result<(), UploadError>;
}

/// Look up the codec registered for a file extension. Case-insensitive;
/// returns `None` for formats without a codec.
pub fn codec_for_extension(extension: &str) -> Option<&'static dyn ImageCodec> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some(&JpegCodec),
        "png" => Some(&PngCodec),
        _ => None,
    }
}

fn open_decode(path: &Path, format: CodecFormat) -> Result<DynamicImage, UploadError> {
    ImageReader::open(path)
        .map_err(|e| UploadError::Decode {
            format,
            source: ImageError::IoError(e),
        })?
        .decode()
        .map_err(|e| UploadError::Decode { format, source: e })
}

fn create_output(path: &Path, format: CodecFormat) -> Result<BufWriter<File>, UploadError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| UploadError::Encode {
            format,
            source: ImageError::IoError(e),
        })
}

pub struct JpegCodec;

impl ImageCodec for JpegCodec {
    fn format(&self) -> CodecFormat {
        CodecFormat::Jpeg
    }

    fn decode(&self, path: &Path) -> Result<DynamicImage, UploadError> {
        let img = open_decode(path, CodecFormat::Jpeg)?;
        Ok(DynamicImage::ImageRgb8(img.to_rgb8()))
    }

    fn encode(
        &self,
        image: &DynamicImage,
        path: &Path,
        options: &EncodeOptions,
    ) -> Result<(), UploadError> {
        let writer = create_output(path, CodecFormat::Jpeg)?;
        let encoder = JpegEncoder::new_with_quality(writer, options.jpeg_quality);
        image
            .write_with_encoder(encoder)
            .map_err(|e| UploadError::Encode {
                format: CodecFormat::Jpeg,
                source: e,
            })
    }
}

pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn format(&self) -> CodecFormat {
        CodecFormat::Png
    }

    fn decode(&self, path: &Path) -> Result<DynamicImage, UploadError> {
        let img = open_decode(path, CodecFormat::Png)?;
        Ok(DynamicImage::ImageRgba8(img.to_rgba8()))
    }

    fn encode(
        &self,
        image: &DynamicImage,
        path: &Path,
        options: &EncodeOptions,
    ) -> Result<(), UploadError> {
        // zlib-style 0-9 folded onto the encoder's three tiers
        let compression = match options.png_compression {
            None | Some(4..=6) => CompressionType::Default,
            Some(0..=3) => CompressionType::Fast,
            Some(_) => CompressionType::Best,
        };
        let writer = create_output(path, CodecFormat::Png)?;
        let encoder = PngEncoder::new_with_quality(writer, compression, PngFilter::Adaptive);
        image
            .write_with_encoder(encoder)
            .map_err(|e| UploadError::Encode {
                format: CodecFormat::Png,
                source: e,
            })
    }
}
