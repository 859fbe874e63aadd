//! Image validation, planning, and resampling.
//!
//! The module is split into:
//! - **Geometry**: pure functions for the fit-mode math (unit testable)
//! - **Codec**: [`ImageCodec`] trait + the JPEG/PNG adapters
//! - **Service**: [`RenditionService`] combining geometry + codecs + storage

pub mod codec;
pub mod geometry;
pub mod service;

pub use codec::{codec_for_extension, CodecFormat, EncodeOptions, ImageCodec};
pub use geometry::{plan_resize, Dimensions, FitMode, ResizePlan};
pub use service::{RenditionService, SourceImage};
