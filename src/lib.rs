//! # Rendify
//!
//! Catalog image rendition generator. Takes an uploaded product photo and
//! produces up to three sized variants — `default`, `small`, `big` — by
//! aspect-ratio-aware resizing, then stores them in a flat directory under
//! predictable names the hosting application can persist.
//!
//! # Pipeline
//!
//! ```text
//! 1. Validate   MIME allow-list + header geometry probe  → SourceImage
//! 2. Plan       source ratio vs frame ratio, fit mode    → Copy | Resample
//! 3. Execute    raw byte copy, or decode → Lanczos3 → encode
//! 4. Name       {prefix}_{base}.{ext} in the storage directory
//! ```
//!
//! The planning step never upscales: a source that already fits the frame on
//! the priority axis is copied byte-for-byte. PNG sources keep their alpha
//! channel through the resample.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Fit-mode geometry, JPEG/PNG codec adapters, the rendition service |
//! | [`store`] | Uploaded-file handle, flat-directory storage, idempotent delete |
//! | [`config`] | `config.toml` loading, validation, stock config generation |
//! | [`naming`] | File-name conventions: rendition prefixes, slugs, unique ids |
//! | [`error`] | One typed variant per failure kind, codec errors tagged by format |
//!
//! # Design Decisions
//!
//! ## Fit Modes Without Cropping
//!
//! `Contain` scales the source to fit entirely inside the target box.
//! `Cover` scales it to fill the box on the priority axis — best-fit cover:
//! the off-axis dimension may overflow the box, and no crop is applied. Both
//! modes preserve the source aspect ratio exactly (integer truncation on the
//! derived axis).
//!
//! ## Share-Safe Service
//!
//! [`imaging::RenditionService`] holds only configuration. Per-upload state
//! (path, MIME type, geometry) lives in a call-local
//! [`imaging::SourceImage`], so one service instance serves concurrent
//! callers without synchronization.
//!
//! ## Flat Storage Contract
//!
//! One directory, one file per asset, no manifest or index (the CLI's batch
//! report is advisory output, not a registry). File names are the durable
//! contract: renditions of one source share a base name, so a caller holding
//! `image_{base}.jpeg` can derive its siblings.
//!
//! ## Two Codecs, One Seam
//!
//! JPEG and PNG are the supported formats, each behind the
//! [`imaging::ImageCodec`] trait and found by extension. Uploads in other
//! allowed formats only ever take the copy path.

pub mod config;
pub mod error;
pub mod imaging;
pub mod naming;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
