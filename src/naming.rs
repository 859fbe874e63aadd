//! File naming for generated assets.
//!
//! Every stored file follows one of two conventions:
//! - renditions: `{prefix}_{base}.{ext}` where the prefix identifies the
//!   rendition (`image`, `small`, `big`) and the base is either a
//!   caller-supplied name or a fresh unique id
//! - plain uploads: `{slug}-{uid}.{ext}` built from the client file name
//!
//! Sharing a base name across renditions is what lets a caller address the
//! whole set of variants of one source image.

use std::fmt;

use uuid::Uuid;

/// One named output size variant of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rendition {
    Default,
    Small,
    Big,
}

impl Rendition {
    /// All renditions, in generation order.
    pub const ALL: [Rendition; 3] = [Rendition::Default, Rendition::Small, Rendition::Big];

    /// File-name prefix for this rendition.
    pub fn prefix(self) -> &'static str {
        match self {
            Rendition::Default => "image",
            Rendition::Small => "small",
            Rendition::Big => "big",
        }
    }
}

impl fmt::Display for Rendition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rendition::Default => "default",
            Rendition::Small => "small",
            Rendition::Big => "big",
        };
        f.write_str(name)
    }
}

/// Fresh 32-character hex id for files without an explicit base name.
pub fn unique_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Build a rendition file name: `{prefix}_{base}.{ext}`.
///
/// When no base name is given, a fresh [`unique_id`] is used, so repeated
/// calls never collide.
pub fn rendition_file_name(rendition: Rendition, base: Option<&str>, extension: &str) -> String {
    let base = base.map_or_else(unique_id, str::to_string);
    format!("{}_{}.{}", rendition.prefix(), base, extension)
}

/// Build a plain-upload file name: `{slug}-{uid}.{ext}`.
///
/// The client-supplied stem is slugified; a missing or empty stem falls back
/// to `file`.
pub fn upload_file_name(client_stem: Option<&str>, extension: &str) -> String {
    let stem = client_stem
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "file".to_string());
    format!("{}-{}.{}", stem, unique_id(), extension)
}

/// Reduce a client-supplied name to lowercase ASCII alphanumerics and single
/// dashes. Anything else becomes a dash; runs collapse; ends are trimmed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// MIME type → generated file extension.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" | "image/jpg" => Some("jpeg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// File extension → declared MIME type, for files picked up from disk.
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
